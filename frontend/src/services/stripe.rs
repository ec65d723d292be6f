//! Stripe.js card element behind `PaymentGateway`.
//!
//! Only tokenization happens in the browser. The card number never reaches
//! Rust: the element lives in Stripe's iframe and we get back an id.

use async_trait::async_trait;
use gembank_core::payments::{BillingDetails, PaymentGateway};
use gembank_core::PaymentError;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    type StripeJs;

    #[wasm_bindgen(js_name = Stripe, catch)]
    fn init_stripe(publishable_key: &str) -> Result<StripeJs, JsValue>;

    #[wasm_bindgen(method)]
    fn elements(this: &StripeJs) -> Elements;

    #[wasm_bindgen(method, js_name = createPaymentMethod)]
    fn create_payment_method(this: &StripeJs, data: &JsValue) -> js_sys::Promise;

    type Elements;

    #[wasm_bindgen(method)]
    fn create(this: &Elements, kind: &str, options: &JsValue) -> CardElement;

    type CardElement;

    #[wasm_bindgen(method, catch)]
    fn mount(this: &CardElement, selector: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &CardElement);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardOptions {
    hide_postal_code: bool,
}

#[derive(Serialize)]
struct PaymentMethodData<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    billing_details: BillingDetailsData<'a>,
}

#[derive(Serialize)]
struct BillingDetailsData<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Deserialize)]
struct CreatePaymentMethodResult {
    #[serde(rename = "paymentMethod")]
    payment_method: Option<PaymentMethod>,
    error: Option<StripeError>,
}

#[derive(Deserialize)]
struct PaymentMethod {
    id: String,
}

#[derive(Deserialize)]
struct StripeError {
    code: Option<String>,
    message: Option<String>,
}

fn describe(error: JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}

/// A mounted card element and the Stripe instance that owns it.
pub struct StripeCard {
    stripe: StripeJs,
    card: CardElement,
}

impl StripeCard {
    /// Mounts a card element into the node matched by `selector`.
    pub fn mount(publishable_key: &str, selector: &str) -> Result<Self, PaymentError> {
        let stripe = init_stripe(publishable_key)
            .map_err(|e| PaymentError::new(format!("Stripe.js is not available: {}", describe(e))))?;
        let options = serde_wasm_bindgen::to_value(&CardOptions {
            hide_postal_code: true,
        })
        .map_err(|e| PaymentError::new(e.to_string()))?;
        let card = stripe.elements().create("card", &options);
        card.mount(selector)
            .map_err(|e| PaymentError::new(format!("could not mount card element: {}", describe(e))))?;
        log::debug!("card element mounted at {}", selector);
        Ok(Self { stripe, card })
    }
}

impl Drop for StripeCard {
    fn drop(&mut self) {
        self.card.destroy();
    }
}

#[async_trait(?Send)]
impl PaymentGateway for StripeCard {
    async fn create_payment_method(&self, billing: &BillingDetails) -> Result<String, PaymentError> {
        let data = serde_wasm_bindgen::to_value(&PaymentMethodData {
            kind: "card",
            billing_details: BillingDetailsData {
                name: billing.name.trim(),
                email: billing.email.trim(),
            },
        })
        .map_err(|e| PaymentError::new(e.to_string()))?;
        js_sys::Reflect::set(&data, &JsValue::from_str("card"), self.card.as_ref())
            .map_err(|e| PaymentError::new(describe(e)))?;

        let result = JsFuture::from(self.stripe.create_payment_method(&data))
            .await
            .map_err(|e| PaymentError::new(describe(e)))?;
        let result: CreatePaymentMethodResult = serde_wasm_bindgen::from_value(result)
            .map_err(|e| PaymentError::new(e.to_string()))?;

        match (result.payment_method, result.error) {
            (_, Some(error)) => Err(PaymentError {
                code: error.code,
                message: error
                    .message
                    .unwrap_or_else(|| "An unexpected error occurred.".to_string()),
            }),
            (Some(method), None) => Ok(method.id),
            (None, None) => Err(PaymentError::new("Stripe returned no payment method")),
        }
    }
}
