//! Contact form. Sending is simulated: validate, wait, log.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::Sleeper;
use crate::i18n::keys;
use crate::validation::{self, FieldErrors, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    /// Inline message for a failed check on this field.
    pub fn error_key(self, error: ValidationError) -> &'static str {
        match (self, error) {
            (ContactField::Email, ValidationError::InvalidEmail) => keys::contact::EMAIL_INVALID,
            (ContactField::Name, _) => keys::contact::NAME_REQUIRED,
            (ContactField::Email, _) => keys::contact::EMAIL_REQUIRED,
            (ContactField::Subject, _) => keys::contact::SUBJECT_REQUIRED,
            (ContactField::Message, _) => keys::contact::MESSAGE_REQUIRED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> FieldErrors<ContactField> {
        let mut errors = FieldErrors::new();
        errors.check(ContactField::Name, validation::required(&self.name));
        errors.check(ContactField::Email, validation::email(&self.email));
        errors.check(ContactField::Subject, validation::required(&self.subject));
        errors.check(ContactField::Message, validation::required(&self.message));
        errors
    }
}

/// Validates, then pretends to deliver after `delay`.
///
/// The message is only read, so on errors every value the visitor typed is
/// still in place.
pub async fn send_message(
    message: &ContactMessage,
    sleeper: &dyn Sleeper,
    delay: Duration,
) -> Result<(), FieldErrors<ContactField>> {
    message.validate().into_result()?;
    sleeper.sleep(delay).await;
    log::info!(
        "contact message from {} <{}>: {}",
        message.name.trim(),
        message.email.trim(),
        message.subject.trim()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::NoDelay;

    fn filled() -> ContactMessage {
        ContactMessage {
            name: "Asha Patel".into(),
            email: "asha@acme.test".into(),
            subject: "Pilot pricing".into(),
            message: "How much does the pilot cost?".into(),
        }
    }

    #[tokio::test]
    async fn empty_subject_flags_only_subject_and_keeps_values() {
        let mut message = filled();
        message.subject.clear();
        let before = message.clone();

        let errors = send_message(&message, &NoDelay, Duration::from_secs(2))
            .await
            .unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![ContactField::Subject]);
        assert_eq!(
            ContactField::Subject.error_key(errors.get(ContactField::Subject).unwrap()),
            "contact.subjectRequired"
        );
        assert_eq!(message, before);
    }

    #[tokio::test]
    async fn complete_message_is_sent() {
        assert_eq!(send_message(&filled(), &NoDelay, Duration::ZERO).await, Ok(()));
    }

    #[test]
    fn email_errors_distinguish_missing_from_malformed() {
        let mut message = filled();
        message.email = "asha".into();
        let error = message.validate().get(ContactField::Email).unwrap();
        assert_eq!(ContactField::Email.error_key(error), keys::contact::EMAIL_INVALID);

        message.email.clear();
        let error = message.validate().get(ContactField::Email).unwrap();
        assert_eq!(ContactField::Email.error_key(error), keys::contact::EMAIL_REQUIRED);
    }
}
