use async_trait::async_trait;
use gembank_core::i18n::{Language, TranslationSource};
use gembank_core::TranslationError;
use gloo_console::log;
use gloo_net::http::Request;
use serde_json::Value;

/// Fetches `<base>/<code>.json` from the site itself.
pub struct FetchLocales {
    base: &'static str,
}

impl FetchLocales {
    pub fn new(base: &'static str) -> Self {
        Self { base }
    }
}

#[async_trait(?Send)]
impl TranslationSource for FetchLocales {
    async fn fetch(&self, language: Language) -> Result<Value, TranslationError> {
        let url = format!("{}/{}.json", self.base, language.code());
        let failed = |message: String| TranslationError::Fetch {
            language: language.code().to_string(),
            message,
        };
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;
        if !response.ok() {
            log!(format!("GET {} returned {}", url, response.status()));
            return Err(failed(format!("status {}", response.status())));
        }
        response.json::<Value>().await.map_err(|e| failed(e.to_string()))
    }
}
