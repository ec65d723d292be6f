use log::Level;

/// Public test key from Stripe's documentation.
const STRIPE_TEST_KEY: &str = "pk_test_51BTUDGJAJfZb9HEBwDgAbc5TVC7IFgVpB9RxP2aJdI1YdNrhCZVw9q3tv4e3Mv6w1gqW2j2ECmbusfRH7hR6XyYp00OXy32qR0";

/// Set at build time. Without it both assistants report themselves unavailable.
pub fn gemini_api_key() -> Option<&'static str> {
    option_env!("GEMINI_API_KEY").filter(|key| !key.trim().is_empty())
}

pub fn stripe_publishable_key() -> &'static str {
    option_env!("STRIPE_PUBLISHABLE_KEY")
        .filter(|key| !key.trim().is_empty())
        .unwrap_or(STRIPE_TEST_KEY)
}

#[cfg(debug_assertions)]
pub fn get_locales_url() -> &'static str {
    "/locales" // trunk serve copies core/locales here
}

#[cfg(not(debug_assertions))]
pub fn get_locales_url() -> &'static str {
    "locales"
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
