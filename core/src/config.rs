use std::time::Duration;

/// Delays and limits shared by the simulated flows and the assistant loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long a notice stays on screen unless dismissed.
    pub notice_ttl: Duration,
    /// Stand-in for backend payment confirmation.
    pub payment_confirmation: Duration,
    pub contact_submit: Duration,
    pub feedback_submit: Duration,
    /// Seconds before "resend code" becomes available again.
    pub otp_resend_secs: u32,
    /// Lets the hidden LOI template render before it is rasterized.
    pub loi_render_settle: Duration,
    /// Upper bound on field-update round trips within one assistant turn.
    pub max_tool_rounds: usize,
    /// Sample charge in whole rupees.
    pub payment_amount: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            notice_ttl: Duration::from_secs(5),
            payment_confirmation: Duration::from_millis(1500),
            contact_submit: Duration::from_millis(2000),
            feedback_submit: Duration::from_millis(1500),
            otp_resend_secs: 30,
            loi_render_settle: Duration::from_millis(1000),
            max_tool_rounds: 8,
            payment_amount: 1000,
        }
    }
}
