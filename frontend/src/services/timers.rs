use std::time::Duration;

use async_trait::async_trait;
use gembank_core::clock::Sleeper;

/// `setTimeout`-backed sleep.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSleeper;

#[async_trait(?Send)]
impl Sleeper for BrowserSleeper {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
