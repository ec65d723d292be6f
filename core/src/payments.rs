//! Sample checkout: tokenize a card, simulate confirmation, keep an invoice.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, Sleeper};
use crate::documents::{append_invoice, Invoice};
use crate::error::PaymentError;
use crate::storage::KeyValueStore;
use crate::validation::{self, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BillingField {
    Name,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BillingDetails {
    pub name: String,
    pub email: String,
}

impl BillingDetails {
    pub fn validate(&self) -> FieldErrors<BillingField> {
        let mut errors = FieldErrors::new();
        errors.check(BillingField::Name, validation::required(&self.name));
        errors.check(BillingField::Email, validation::email(&self.email));
        errors
    }
}

/// Card tokenization. The card itself stays inside the gateway's widget.
#[async_trait(?Send)]
pub trait PaymentGateway {
    /// Returns the payment-method id.
    async fn create_payment_method(&self, billing: &BillingDetails) -> Result<String, PaymentError>;
}

/// Turns a payment method into a charge and its invoice.
#[async_trait(?Send)]
pub trait PaymentProcessor {
    async fn confirm(
        &self,
        payment_method_id: &str,
        billing: &BillingDetails,
        amount: u64,
    ) -> Result<Invoice, PaymentError>;
}

/// Stands in for a payments backend: waits, then always succeeds.
pub struct SimulatedProcessor {
    sleeper: Rc<dyn Sleeper>,
    clock: Rc<dyn Clock>,
    delay: Duration,
}

impl SimulatedProcessor {
    pub fn new(sleeper: Rc<dyn Sleeper>, clock: Rc<dyn Clock>, delay: Duration) -> Self {
        Self {
            sleeper,
            clock,
            delay,
        }
    }
}

#[async_trait(?Send)]
impl PaymentProcessor for SimulatedProcessor {
    async fn confirm(
        &self,
        payment_method_id: &str,
        billing: &BillingDetails,
        amount: u64,
    ) -> Result<Invoice, PaymentError> {
        self.sleeper.sleep(self.delay).await;
        let invoice = Invoice::new(
            payment_method_id,
            billing.name.trim(),
            billing.email.trim(),
            amount,
            self.clock.now(),
        );
        log::info!("simulated confirmation of {} as {}", payment_method_id, invoice.id);
        Ok(invoice)
    }
}

/// Tokenize then confirm. No retries.
pub async fn process_payment(
    gateway: &dyn PaymentGateway,
    processor: &dyn PaymentProcessor,
    billing: &BillingDetails,
    amount: u64,
) -> Result<Invoice, PaymentError> {
    let payment_method_id = gateway.create_payment_method(billing).await?;
    log::debug!("tokenized card as {}", payment_method_id);
    processor.confirm(&payment_method_id, billing, amount).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Idle,
    Processing,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// A payment is already being processed.
    Busy,
    Invalid(FieldErrors<BillingField>),
}

/// What the payments page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFlow {
    status: PaymentStatus,
    error: Option<PaymentError>,
    invoice: Option<Invoice>,
    showing_invoice: bool,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self {
            status: PaymentStatus::Idle,
            error: None,
            invoice: None,
            showing_invoice: false,
        }
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn is_processing(&self) -> bool {
        self.status == PaymentStatus::Processing
    }

    pub fn error(&self) -> Option<&PaymentError> {
        self.error.as_ref()
    }

    pub fn invoice(&self) -> Option<&Invoice> {
        self.invoice.as_ref()
    }

    pub fn payment_method_id(&self) -> Option<&str> {
        self.invoice.as_ref().map(|invoice| invoice.payment_method_id.as_str())
    }

    pub fn showing_invoice(&self) -> bool {
        self.showing_invoice && self.invoice.is_some()
    }

    /// Call before tokenizing.
    pub fn begin(&mut self, billing: &BillingDetails) -> Result<(), CheckoutError> {
        if self.is_processing() {
            return Err(CheckoutError::Busy);
        }
        billing.validate().into_result().map_err(CheckoutError::Invalid)?;
        self.status = PaymentStatus::Processing;
        self.error = None;
        Ok(())
    }

    /// Records the outcome; a new invoice is appended to the stored list.
    pub fn complete(&mut self, result: Result<Invoice, PaymentError>, store: &dyn KeyValueStore) {
        if !self.is_processing() {
            log::warn!("payment result arrived while {:?}", self.status);
            return;
        }
        match result {
            Ok(invoice) => {
                if let Err(e) = append_invoice(store, &invoice) {
                    log::error!("failed to save invoice {}: {}", invoice.id, e);
                }
                self.invoice = Some(invoice);
                self.status = PaymentStatus::Succeeded;
            }
            Err(e) => {
                log::warn!("payment failed: {}", e);
                self.error = Some(e);
                self.status = PaymentStatus::Failed;
            }
        }
    }

    /// Back to an empty form. A fresh tokenization is needed.
    pub fn try_again(&mut self) {
        *self = Self::new();
    }

    pub fn show_invoice(&mut self) {
        self.showing_invoice = self.invoice.is_some();
    }

    pub fn close_invoice(&mut self) {
        self.showing_invoice = false;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::clock::{FixedClock, NoDelay};
    use crate::documents::load_invoices;
    use crate::storage::MemoryStore;

    /// Answers tokenization requests from a script.
    struct ScriptedGateway {
        results: RefCell<VecDeque<Result<String, PaymentError>>>,
        calls: RefCell<usize>,
    }

    impl ScriptedGateway {
        fn new(results: Vec<Result<String, PaymentError>>) -> Self {
            Self {
                results: RefCell::new(results.into()),
                calls: RefCell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl PaymentGateway for ScriptedGateway {
        async fn create_payment_method(&self, _billing: &BillingDetails) -> Result<String, PaymentError> {
            *self.calls.borrow_mut() += 1;
            self.results
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(PaymentError::new("no more results")))
        }
    }

    fn processor() -> SimulatedProcessor {
        let clock = FixedClock(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap());
        SimulatedProcessor::new(Rc::new(NoDelay), Rc::new(clock), Duration::from_millis(1500))
    }

    fn billing() -> BillingDetails {
        BillingDetails {
            name: "Asha Patel".into(),
            email: "asha@acme.test".into(),
        }
    }

    #[tokio::test]
    async fn decline_then_retry_needs_a_new_tokenization() {
        let gateway = ScriptedGateway::new(vec![
            Err(PaymentError::with_code("card_declined", "Your card was declined.")),
            Ok("pm_second".into()),
        ]);
        let processor = processor();
        let store = MemoryStore::new();
        let mut flow = CheckoutFlow::new();

        flow.begin(&billing()).unwrap();
        let result = process_payment(&gateway, &processor, &billing(), 1000).await;
        flow.complete(result, &store);
        assert_eq!(flow.status(), PaymentStatus::Failed);
        assert_eq!(flow.error().and_then(|e| e.code.as_deref()), Some("card_declined"));
        assert!(load_invoices(&store).unwrap().is_empty());

        flow.try_again();
        assert_eq!(flow.status(), PaymentStatus::Idle);
        assert!(flow.error().is_none());
        assert!(flow.invoice().is_none());
        assert!(!flow.is_processing());

        flow.begin(&billing()).unwrap();
        let result = process_payment(&gateway, &processor, &billing(), 1000).await;
        flow.complete(result, &store);
        assert_eq!(*gateway.calls.borrow(), 2);
        assert_eq!(flow.status(), PaymentStatus::Succeeded);
        assert_eq!(flow.payment_method_id(), Some("pm_second"));
    }

    #[tokio::test]
    async fn success_stores_the_invoice() {
        let gateway = ScriptedGateway::new(vec![Ok("pm_1".into())]);
        let store = MemoryStore::new();
        let mut flow = CheckoutFlow::new();

        flow.begin(&billing()).unwrap();
        assert_eq!(flow.begin(&billing()), Err(CheckoutError::Busy));
        let result = process_payment(&gateway, &processor(), &billing(), 1000).await;
        flow.complete(result, &store);

        let invoice = flow.invoice().cloned().unwrap();
        assert_eq!(invoice.id, "INV-1700000000000");
        assert_eq!(invoice.amount, 1000);
        assert_eq!(invoice.customer_name, "Asha Patel");
        assert_eq!(load_invoices(&store).unwrap(), vec![invoice]);

        flow.show_invoice();
        assert!(flow.showing_invoice());
        flow.close_invoice();
        assert!(!flow.showing_invoice());
    }

    #[test]
    fn billing_details_are_checked_before_tokenizing() {
        let mut flow = CheckoutFlow::new();
        let err = flow
            .begin(&BillingDetails {
                name: "Asha".into(),
                email: "asha".into(),
            })
            .unwrap_err();
        let CheckoutError::Invalid(errors) = err else {
            panic!("expected field errors");
        };
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![BillingField::Email]);
        assert_eq!(flow.status(), PaymentStatus::Idle);
    }

    #[test]
    fn late_result_after_reset_is_ignored() {
        let store = MemoryStore::new();
        let mut flow = CheckoutFlow::new();
        flow.complete(Err(PaymentError::new("late")), &store);
        assert_eq!(flow.status(), PaymentStatus::Idle);
        assert!(flow.error().is_none());
    }
}
