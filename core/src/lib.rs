//! Behavior behind the GEMBank site: forms, the form-filling assistant,
//! notices, localization, the sample payment flow and generated documents.
//!
//! Nothing in here touches the DOM. Browser-facing pieces (HTTP, local
//! storage, Stripe.js, PDF export) are traits the frontend implements.

pub mod assistant;
pub mod auth;
pub mod blog;
pub mod clock;
pub mod config;
pub mod contact;
pub mod documents;
pub mod error;
pub mod feedback;
pub mod i18n;
pub mod lifetime;
pub mod loi;
pub mod notice;
pub mod payments;
pub mod storage;
pub mod tools;
pub mod validation;

pub use config::Timings;
pub use error::{
    AssistantError, FieldError, FlowError, PaymentError, RenderError, StorageError,
    TranslationError,
};
