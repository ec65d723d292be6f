use chrono::{DateTime, Utc};

use super::{LoiField, LoiForm};
use crate::documents::LetterOfIntent;
use crate::error::{FlowError, RenderError};
use crate::validation::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Generating,
    Done,
    Failed,
}

impl SubmissionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Validating => "validating",
            SubmissionPhase::Generating => "generating",
            SubmissionPhase::Done => "done",
            SubmissionPhase::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Back to idle; show these inline.
    Invalid(FieldErrors<LoiField>),
    /// Render this document, then report back through `finish`.
    Generate(LetterOfIntent),
}

/// Tracks one page's submit attempts.
///
/// `Failed` is only reached from a render error. The form itself is never
/// touched here, so a failed render can be retried with the same answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFlow {
    phase: SubmissionPhase,
    document: Option<LetterOfIntent>,
    last_error: Option<RenderError>,
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self {
            phase: SubmissionPhase::Idle,
            document: None,
            last_error: None,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == SubmissionPhase::Generating
    }

    /// Document being (or last) rendered.
    pub fn document(&self) -> Option<&LetterOfIntent> {
        self.document.as_ref()
    }

    pub fn last_error(&self) -> Option<&RenderError> {
        self.last_error.as_ref()
    }

    pub fn submit(&mut self, form: &LoiForm, now: DateTime<Utc>) -> Result<SubmitOutcome, FlowError> {
        if self.is_busy() {
            return Err(FlowError::Busy);
        }
        self.phase = SubmissionPhase::Validating;
        match form.submission() {
            Err(errors) => {
                log::debug!("letter of intent rejected: {} field(s) invalid", errors.len());
                self.phase = SubmissionPhase::Idle;
                Ok(SubmitOutcome::Invalid(errors))
            }
            Ok(submission) => {
                let document = LetterOfIntent::new(submission, now);
                log::info!("generating letter of intent {}", document.id);
                self.document = Some(document.clone());
                self.last_error = None;
                self.phase = SubmissionPhase::Generating;
                Ok(SubmitOutcome::Generate(document))
            }
        }
    }

    pub fn finish(&mut self, result: Result<(), RenderError>) -> Result<(), FlowError> {
        if self.phase != SubmissionPhase::Generating {
            return Err(FlowError::InvalidState(self.phase.as_str()));
        }
        match result {
            Ok(()) => self.phase = SubmissionPhase::Done,
            Err(e) => {
                log::error!("letter of intent export failed: {}", e);
                self.last_error = Some(e);
                self.phase = SubmissionPhase::Failed;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
    }

    fn acme() -> LoiForm {
        let mut form = LoiForm::new();
        form.set_field(LoiField::CompanyName, "Acme Gems").unwrap();
        form.set_field(LoiField::ContactName, "A. Sharma").unwrap();
        form.set_field(LoiField::Email, "a@acme.test").unwrap();
        form.set_field(LoiField::Phone, "9990001111").unwrap();
        form.set_authorization(true);
        form
    }

    #[test]
    fn valid_form_produces_one_document_with_matching_fields() {
        let form = acme();
        let mut flow = SubmissionFlow::new();

        let document = match flow.submit(&form, now()).unwrap() {
            SubmitOutcome::Generate(document) => document,
            other => panic!("expected a document, got {:?}", other),
        };
        assert_eq!(document.id, "GEM-1700000000123");
        assert_eq!(document.issued_at, now());
        assert_eq!(document.submission.company_name, "Acme Gems");
        assert_eq!(document.submission.contact_name, "A. Sharma");
        assert_eq!(document.submission.email, "a@acme.test");
        assert_eq!(document.submission.phone, "9990001111");
        assert_eq!(flow.phase(), SubmissionPhase::Generating);

        assert_eq!(flow.submit(&form, now()), Err(FlowError::Busy));

        flow.finish(Ok(())).unwrap();
        assert_eq!(flow.phase(), SubmissionPhase::Done);
        assert_eq!(flow.document(), Some(&document));
    }

    #[test]
    fn each_missing_requirement_blocks_submit() {
        let blanks = [
            LoiField::CompanyName,
            LoiField::ContactName,
            LoiField::Email,
            LoiField::Phone,
        ];
        for field in blanks {
            let mut form = acme();
            form.set_field(field, "").unwrap();
            let mut flow = SubmissionFlow::new();
            match flow.submit(&form, now()).unwrap() {
                SubmitOutcome::Invalid(errors) => {
                    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field]);
                }
                other => panic!("{} blank still produced {:?}", field, other),
            }
            assert_eq!(flow.phase(), SubmissionPhase::Idle);
            assert!(flow.document().is_none());
        }
    }

    #[test]
    fn render_failure_keeps_form_for_retry() {
        let form = acme();
        let mut flow = SubmissionFlow::new();
        flow.submit(&form, now()).unwrap();
        flow.finish(Err(RenderError::Raster("canvas tainted".into()))).unwrap();

        assert_eq!(flow.phase(), SubmissionPhase::Failed);
        assert_eq!(flow.last_error(), Some(&RenderError::Raster("canvas tainted".into())));
        assert_eq!(form.values().company_name, "Acme Gems");

        assert!(matches!(flow.submit(&form, now()), Ok(SubmitOutcome::Generate(_))));
        assert!(flow.last_error().is_none());
    }

    #[test]
    fn finish_outside_generation_is_rejected() {
        let mut flow = SubmissionFlow::new();
        assert_eq!(flow.finish(Ok(())), Err(FlowError::InvalidState("idle")));
    }
}
