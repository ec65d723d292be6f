use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::Sleeper;
use crate::error::FlowError;
use crate::i18n::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Positive,
    Neutral,
    Negative,
}

impl Rating {
    pub const ALL: [Rating; 3] = [Rating::Positive, Rating::Neutral, Rating::Negative];

    pub fn label_key(self) -> &'static str {
        match self {
            Rating::Positive => keys::feedback::POSITIVE,
            Rating::Neutral => keys::feedback::NEUTRAL,
            Rating::Negative => keys::feedback::NEGATIVE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackPhase {
    Editing,
    Submitting,
    Submitted,
}

/// State of the floating feedback widget while it is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackForm {
    pub rating: Option<Rating>,
    pub comment: String,
    pub may_contact: bool,
    phase: FeedbackPhase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub rating: Rating,
    pub comment: String,
    pub may_contact: bool,
}

impl Default for FeedbackForm {
    fn default() -> Self {
        Self {
            rating: None,
            comment: String::new(),
            may_contact: false,
            phase: FeedbackPhase::Editing,
        }
    }
}

impl FeedbackForm {
    pub fn phase(&self) -> FeedbackPhase {
        self.phase
    }

    /// Comment prompt, tailored to the chosen rating.
    pub fn placeholder_key(&self) -> &'static str {
        match self.rating {
            Some(Rating::Positive) => keys::feedback::POSITIVE_PLACEHOLDER,
            Some(Rating::Neutral) => keys::feedback::NEUTRAL_PLACEHOLDER,
            Some(Rating::Negative) => keys::feedback::NEGATIVE_PLACEHOLDER,
            None => keys::feedback::DEFAULT_PLACEHOLDER,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.rating.is_some() && self.phase == FeedbackPhase::Editing
    }

    pub fn begin_submit(&mut self) -> Result<FeedbackEntry, FlowError> {
        if self.phase != FeedbackPhase::Editing {
            return Err(FlowError::Busy);
        }
        let rating = self.rating.ok_or(FlowError::InvalidState("no rating"))?;
        self.phase = FeedbackPhase::Submitting;
        Ok(FeedbackEntry {
            rating,
            comment: self.comment.trim().to_string(),
            may_contact: self.may_contact,
        })
    }

    pub fn finish_submit(&mut self) {
        if self.phase == FeedbackPhase::Submitting {
            self.phase = FeedbackPhase::Submitted;
        }
    }

    /// Closing the widget forgets everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Stand-in for posting feedback somewhere.
pub async fn send_feedback(entry: &FeedbackEntry, sleeper: &dyn Sleeper, delay: Duration) {
    sleeper.sleep(delay).await;
    log::info!(
        "feedback received: {:?}, {} chars, may contact: {}",
        entry.rating,
        entry.comment.chars().count(),
        entry.may_contact
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::NoDelay;

    #[test]
    fn rating_is_required() {
        let mut form = FeedbackForm::default();
        form.comment = "nice".into();
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), Err(FlowError::InvalidState("no rating")));
        assert_eq!(form.phase(), FeedbackPhase::Editing);
    }

    #[test]
    fn placeholder_follows_rating() {
        let mut form = FeedbackForm::default();
        assert_eq!(form.placeholder_key(), "feedback.defaultPlaceholder");
        form.rating = Some(Rating::Negative);
        assert_eq!(form.placeholder_key(), "feedback.negativePlaceholder");
    }

    #[tokio::test]
    async fn submit_then_reset_on_close() {
        let mut form = FeedbackForm::default();
        form.rating = Some(Rating::Positive);
        form.comment = "  Smooth signup ".into();
        form.may_contact = true;

        let entry = form.begin_submit().unwrap();
        assert_eq!(entry.comment, "Smooth signup");
        assert_eq!(form.begin_submit(), Err(FlowError::Busy));

        send_feedback(&entry, &NoDelay, Duration::ZERO).await;
        form.finish_submit();
        assert_eq!(form.phase(), FeedbackPhase::Submitted);

        form.reset();
        assert_eq!(form, FeedbackForm::default());
    }
}
