use thiserror::Error;

/// Local key-value storage failures (browser localStorage or the in-memory store).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to read key '{key}': {message}")]
    Read { key: String, message: String },
    #[error("failed to write key '{key}': {message}")]
    Write { key: String, message: String },
    #[error("stored value under '{key}' is malformed: {message}")]
    Malformed { key: String, message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("unsupported language code '{0}'")]
    UnsupportedLanguage(String),
    #[error("failed to fetch translations for '{language}': {message}")]
    Fetch { language: String, message: String },
    #[error("translation table for '{language}' is not a JSON object")]
    NotATable { language: String },
}

/// Errors from the external conversational API or from driving a turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    #[error("assistant is not configured")]
    Unavailable,
    #[error("request to the assistant failed: {0}")]
    Transport(String),
    #[error("assistant returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("could not decode assistant response: {0}")]
    Decode(String),
    #[error("assistant response was empty")]
    EmptyResponse,
    #[error("assistant exceeded {limit} tool rounds")]
    TooManyToolRounds { limit: usize },
}

/// Structured tokenization or confirmation failure, shaped like Stripe's error object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PaymentError {
    pub code: Option<String>,
    pub message: String,
}

impl PaymentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("template element '{0}' was not found")]
    MissingTemplate(String),
    #[error("rasterizing the template failed: {0}")]
    Raster(String),
    #[error("building the document failed: {0}")]
    Document(String),
}

/// Rejection of a single form write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("field '{field}' cannot be set by the assistant")]
    NotAssistantSettable { field: String },
    #[error("'{value}' is not a valid value for '{field}'")]
    InvalidValue { field: String, value: String },
}

/// A flow was asked to do something its current state does not allow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("an operation is already in flight")]
    Busy,
    #[error("nothing to send")]
    EmptyInput,
    #[error("operation is not valid in state '{0}'")]
    InvalidState(&'static str),
}
