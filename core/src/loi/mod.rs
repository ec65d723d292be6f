//! Letter-of-intent form: the closed field set, its values and validation.
//!
//! The same `LoiForm` is written by the page's inputs and by the form-filling
//! assistant. Every write re-validates, so `errors()` always matches the
//! current values.

mod submission;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assistant::{FieldTarget, FieldTool};
use crate::error::FieldError;
use crate::i18n::{keys, TranslationTable};
use crate::validation::{self, FieldErrors};

pub use submission::{SubmissionFlow, SubmissionPhase, SubmitOutcome};

/// Fields of the letter-of-intent form, in on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoiField {
    CompanyName,
    BusinessType,
    City,
    Gstin,
    ContactName,
    Designation,
    Email,
    Phone,
    Turnover,
    InterestLevel,
    Authorization,
}

impl LoiField {
    pub const ALL: [LoiField; 11] = [
        LoiField::CompanyName,
        LoiField::BusinessType,
        LoiField::City,
        LoiField::Gstin,
        LoiField::ContactName,
        LoiField::Designation,
        LoiField::Email,
        LoiField::Phone,
        LoiField::Turnover,
        LoiField::InterestLevel,
        LoiField::Authorization,
    ];

    /// Name used by the form inputs and in assistant tool calls.
    pub fn name(self) -> &'static str {
        match self {
            LoiField::CompanyName => "companyName",
            LoiField::BusinessType => "businessType",
            LoiField::City => "city",
            LoiField::Gstin => "gstin",
            LoiField::ContactName => "contactName",
            LoiField::Designation => "designation",
            LoiField::Email => "email",
            LoiField::Phone => "phone",
            LoiField::Turnover => "turnover",
            LoiField::InterestLevel => "interestLevel",
            LoiField::Authorization => "authorization",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        LoiField::ALL.into_iter().find(|field| field.name() == name.trim())
    }

    /// Authorization has to be ticked by the person submitting.
    pub fn assistant_settable(self) -> bool {
        self != LoiField::Authorization
    }

    pub fn assistant_settable_names() -> Vec<&'static str> {
        LoiField::ALL
            .into_iter()
            .filter(|field| field.assistant_settable())
            .map(LoiField::name)
            .collect()
    }

    /// Inline message for a failed check on this field.
    pub fn error_key(self, error: validation::ValidationError) -> &'static str {
        match (self, error) {
            (_, validation::ValidationError::InvalidEmail) => keys::loi::EMAIL_INVALID,
            (LoiField::Authorization, _) => keys::loi::AUTHORIZATION_ERROR,
            _ => keys::loi::REQUIRED,
        }
    }

    /// Label shown next to the input.
    pub fn label_key(self) -> &'static str {
        match self {
            LoiField::CompanyName => keys::loi::COMPANY_NAME,
            LoiField::BusinessType => keys::loi::BUSINESS_TYPE,
            LoiField::City => keys::loi::CITY_STATE,
            LoiField::Gstin => keys::loi::GSTIN,
            LoiField::ContactName => keys::loi::FULL_NAME,
            LoiField::Designation => keys::loi::DESIGNATION,
            LoiField::Email => keys::loi::EMAIL,
            LoiField::Phone => keys::loi::PHONE,
            LoiField::Turnover => keys::loi::TURNOVER,
            LoiField::InterestLevel => keys::loi::INTEREST_LEVEL,
            LoiField::Authorization => keys::loi::AUTHORIZATION,
        }
    }
}

impl fmt::Display for LoiField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LoiField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoiField::from_name(s).ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

/// Lowercase ASCII letters and digits only, so "₹1 Cr - ₹5 Cr" and "1cr-5cr" compare equal.
fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect::<String>()
        .replace("crores", "cr")
        .replace("crore", "cr")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BusinessType {
    #[default]
    Manufacturer,
    Retail,
    Wholesale,
    Distributor,
    Other,
}

impl BusinessType {
    pub const ALL: [BusinessType; 5] = [
        BusinessType::Manufacturer,
        BusinessType::Retail,
        BusinessType::Wholesale,
        BusinessType::Distributor,
        BusinessType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BusinessType::Manufacturer => "Manufacturer",
            BusinessType::Retail => "Retail",
            BusinessType::Wholesale => "Wholesale",
            BusinessType::Distributor => "Distributor",
            BusinessType::Other => "Other",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            BusinessType::Manufacturer => keys::auth::MANUFACTURER,
            BusinessType::Retail => keys::auth::RETAILER,
            BusinessType::Wholesale => keys::auth::WHOLESALER,
            BusinessType::Distributor => keys::auth::DISTRIBUTOR,
            BusinessType::Other => keys::auth::OTHER,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match normalize(value).as_str() {
            "manufacturer" | "manufacturing" => Some(BusinessType::Manufacturer),
            "retail" | "retailer" => Some(BusinessType::Retail),
            "wholesale" | "wholesaler" => Some(BusinessType::Wholesale),
            "distributor" | "distribution" => Some(BusinessType::Distributor),
            "other" => Some(BusinessType::Other),
            _ => None,
        }
    }
}

/// Annual turnover bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TurnoverBracket {
    #[default]
    BelowOneCrore,
    OneToFiveCrore,
    FiveToTwentyFiveCrore,
    AboveTwentyFiveCrore,
}

impl TurnoverBracket {
    pub const ALL: [TurnoverBracket; 4] = [
        TurnoverBracket::BelowOneCrore,
        TurnoverBracket::OneToFiveCrore,
        TurnoverBracket::FiveToTwentyFiveCrore,
        TurnoverBracket::AboveTwentyFiveCrore,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TurnoverBracket::BelowOneCrore => "below-1cr",
            TurnoverBracket::OneToFiveCrore => "1cr-5cr",
            TurnoverBracket::FiveToTwentyFiveCrore => "5cr-25cr",
            TurnoverBracket::AboveTwentyFiveCrore => "above-25cr",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            TurnoverBracket::BelowOneCrore => keys::auth::TURNOVER_1,
            TurnoverBracket::OneToFiveCrore => keys::auth::TURNOVER_2,
            TurnoverBracket::FiveToTwentyFiveCrore => keys::auth::TURNOVER_3,
            TurnoverBracket::AboveTwentyFiveCrore => keys::auth::TURNOVER_4,
        }
    }

    /// Accepts the bracket code, its English label or its position (1-4).
    pub fn parse(value: &str) -> Option<Self> {
        match normalize(value).as_str() {
            "1" | "below1cr" | "lessthan1cr" | "under1cr" => Some(TurnoverBracket::BelowOneCrore),
            "2" | "1cr5cr" | "1to5cr" => Some(TurnoverBracket::OneToFiveCrore),
            "3" | "5cr25cr" | "5to25cr" => Some(TurnoverBracket::FiveToTwentyFiveCrore),
            "4" | "above25cr" | "over25cr" | "morethan25cr" => {
                Some(TurnoverBracket::AboveTwentyFiveCrore)
            }
            _ => None,
        }
    }
}

/// Interest in the pilot on a 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct InterestLevel(u8);

impl InterestLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn all() -> impl Iterator<Item = InterestLevel> {
        (Self::MIN..=Self::MAX).map(InterestLevel)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label_key(self) -> &'static str {
        match self.0 {
            1 => keys::loi::INTEREST_1,
            2 => keys::loi::INTEREST_2,
            3 => keys::loi::INTEREST_3,
            4 => keys::loi::INTEREST_4,
            _ => keys::loi::INTEREST_5,
        }
    }

    /// Reads the leading number, so "4 - Very interested" is level 4.
    pub fn parse(value: &str) -> Option<Self> {
        let digits: String = value
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok().and_then(Self::new)
    }
}

impl Default for InterestLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for InterestLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| format!("interest level {} is outside 1-5", level))
    }
}

impl From<InterestLevel> for u8 {
    fn from(level: InterestLevel) -> u8 {
        level.0
    }
}

/// Raw values as typed, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoiValues {
    pub company_name: String,
    pub business_type: BusinessType,
    pub city: String,
    pub gstin: String,
    pub contact_name: String,
    pub designation: String,
    pub email: String,
    pub phone: String,
    pub turnover: TurnoverBracket,
    pub interest_level: InterestLevel,
    pub authorization: bool,
}

impl LoiValues {
    /// Text shown in the input for `field`.
    pub fn text(&self, field: LoiField) -> String {
        match field {
            LoiField::CompanyName => self.company_name.clone(),
            LoiField::BusinessType => self.business_type.as_str().to_string(),
            LoiField::City => self.city.clone(),
            LoiField::Gstin => self.gstin.clone(),
            LoiField::ContactName => self.contact_name.clone(),
            LoiField::Designation => self.designation.clone(),
            LoiField::Email => self.email.clone(),
            LoiField::Phone => self.phone.clone(),
            LoiField::Turnover => self.turnover.as_str().to_string(),
            LoiField::InterestLevel => self.interest_level.value().to_string(),
            LoiField::Authorization => self.authorization.to_string(),
        }
    }

    pub fn validate(&self) -> FieldErrors<LoiField> {
        let mut errors = FieldErrors::new();
        errors.check(LoiField::CompanyName, validation::required(&self.company_name));
        errors.check(LoiField::ContactName, validation::required(&self.contact_name));
        errors.check(LoiField::Email, validation::email(&self.email));
        errors.check(LoiField::Phone, validation::required(&self.phone));
        errors.check(LoiField::Authorization, validation::accepted(self.authorization));
        errors
    }
}

/// A validated, trimmed copy of the form taken at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoiSubmission {
    pub company_name: String,
    pub business_type: BusinessType,
    pub city: String,
    pub gstin: Option<String>,
    pub contact_name: String,
    pub designation: String,
    pub email: String,
    pub phone: String,
    pub turnover: TurnoverBracket,
    pub interest_level: InterestLevel,
}

impl LoiSubmission {
    fn from_values(values: &LoiValues) -> Self {
        let gstin = values.gstin.trim();
        Self {
            company_name: values.company_name.trim().to_string(),
            business_type: values.business_type,
            city: values.city.trim().to_string(),
            gstin: (!gstin.is_empty()).then(|| gstin.to_string()),
            contact_name: values.contact_name.trim().to_string(),
            designation: values.designation.trim().to_string(),
            email: values.email.trim().to_string(),
            phone: values.phone.trim().to_string(),
            turnover: values.turnover,
            interest_level: values.interest_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoiForm {
    values: LoiValues,
    errors: FieldErrors<LoiField>,
}

impl Default for LoiForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoiForm {
    pub fn new() -> Self {
        Self::from_values(LoiValues::default())
    }

    pub fn from_values(values: LoiValues) -> Self {
        let errors = values.validate();
        Self { values, errors }
    }

    pub fn values(&self) -> &LoiValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors<LoiField> {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Writes one field. Enum fields reject values they cannot parse and keep
    /// their previous value.
    pub fn set_field(&mut self, field: LoiField, value: &str) -> Result<(), FieldError> {
        let invalid = || FieldError::InvalidValue {
            field: field.name().to_string(),
            value: value.to_string(),
        };
        match field {
            LoiField::CompanyName => self.values.company_name = value.to_string(),
            LoiField::City => self.values.city = value.to_string(),
            LoiField::Gstin => self.values.gstin = value.to_string(),
            LoiField::ContactName => self.values.contact_name = value.to_string(),
            LoiField::Designation => self.values.designation = value.to_string(),
            LoiField::Email => self.values.email = value.to_string(),
            LoiField::Phone => self.values.phone = value.to_string(),
            LoiField::BusinessType => {
                self.values.business_type = BusinessType::parse(value).ok_or_else(invalid)?
            }
            LoiField::Turnover => {
                self.values.turnover = TurnoverBracket::parse(value).ok_or_else(invalid)?
            }
            LoiField::InterestLevel => {
                self.values.interest_level = InterestLevel::parse(value).ok_or_else(invalid)?
            }
            LoiField::Authorization => {
                self.values.authorization = match value.trim() {
                    "true" | "on" => true,
                    "false" | "off" | "" => false,
                    _ => return Err(invalid()),
                }
            }
        }
        self.revalidate();
        Ok(())
    }

    pub fn set_authorization(&mut self, accepted: bool) {
        self.values.authorization = accepted;
        self.revalidate();
    }

    /// Snapshot for document generation, or the current errors.
    pub fn submission(&self) -> Result<LoiSubmission, FieldErrors<LoiField>> {
        let errors = self.values.validate();
        errors
            .into_result()
            .map(|()| LoiSubmission::from_values(&self.values))
    }

    fn revalidate(&mut self) {
        self.errors = self.values.validate();
    }
}

impl FieldTarget for LoiForm {
    fn apply_update(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        let field: LoiField = name.parse()?;
        if !field.assistant_settable() {
            return Err(FieldError::NotAssistantSettable {
                field: field.name().to_string(),
            });
        }
        self.set_field(field, value)
    }
}

impl LoiForm {
    /// `updateFormField` declaration listing each closed-choice field's codes
    /// and its option labels in `labels`.
    pub fn assistant_tool(labels: &TranslationTable) -> FieldTool {
        let choices = |options: Vec<(String, &'static str)>| {
            let mut values: Vec<String> = options.iter().map(|(code, _)| code.clone()).collect();
            for (_, key) in options {
                let label = labels.translate(key);
                if !values.contains(&label) {
                    values.push(label);
                }
            }
            values
        };
        FieldTool::new(LoiField::assistant_settable_names())
            .with_choices(
                LoiField::BusinessType.name(),
                choices(
                    BusinessType::ALL
                        .iter()
                        .map(|kind| (kind.as_str().to_string(), kind.label_key()))
                        .collect(),
                ),
            )
            .with_choices(
                LoiField::Turnover.name(),
                choices(
                    TurnoverBracket::ALL
                        .iter()
                        .map(|bracket| (bracket.as_str().to_string(), bracket.label_key()))
                        .collect(),
                ),
            )
            .with_choices(
                LoiField::InterestLevel.name(),
                choices(
                    InterestLevel::all()
                        .map(|level| (level.value().to_string(), level.label_key()))
                        .collect(),
                ),
            )
    }
}

/// The form as the assistant writes it: closed-choice fields also accept the
/// option labels of the language the page is shown in.
pub struct LocalizedForm<'a> {
    form: &'a mut LoiForm,
    labels: &'a TranslationTable,
}

impl<'a> LocalizedForm<'a> {
    pub fn new(form: &'a mut LoiForm, labels: &'a TranslationTable) -> Self {
        Self { form, labels }
    }

    fn code_for_label(&self, field: LoiField, value: &str) -> Option<String> {
        let value = value.trim().to_lowercase();
        let shown = |key: &str| {
            self.labels
                .get(key)
                .map_or(false, |label| label.trim().to_lowercase() == value)
        };
        match field {
            LoiField::BusinessType => BusinessType::ALL
                .into_iter()
                .find(|kind| shown(kind.label_key()))
                .map(|kind| kind.as_str().to_string()),
            LoiField::Turnover => TurnoverBracket::ALL
                .into_iter()
                .find(|bracket| shown(bracket.label_key()))
                .map(|bracket| bracket.as_str().to_string()),
            LoiField::InterestLevel => InterestLevel::all()
                .find(|level| shown(level.label_key()))
                .map(|level| level.value().to_string()),
            _ => None,
        }
    }
}

impl FieldTarget for LocalizedForm<'_> {
    fn apply_update(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        let code = LoiField::from_name(name).and_then(|field| self.code_for_label(field, value));
        self.form.apply_update(name, code.as_deref().unwrap_or(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    fn filled() -> LoiForm {
        let mut form = LoiForm::new();
        form.set_field(LoiField::CompanyName, "Acme Gems").unwrap();
        form.set_field(LoiField::ContactName, "A. Sharma").unwrap();
        form.set_field(LoiField::Email, "a@acme.test").unwrap();
        form.set_field(LoiField::Phone, "9990001111").unwrap();
        form.set_authorization(true);
        form
    }

    #[test]
    fn field_names_round_trip() {
        for field in LoiField::ALL {
            assert_eq!(field.name().parse::<LoiField>(), Ok(field));
        }
        assert_eq!(
            "foo".parse::<LoiField>(),
            Err(FieldError::UnknownField("foo".into()))
        );
    }

    #[test]
    fn fresh_form_reports_required_fields() {
        let form = LoiForm::new();
        let fields: Vec<_> = form.errors().fields().collect();
        assert_eq!(
            fields,
            vec![
                LoiField::CompanyName,
                LoiField::ContactName,
                LoiField::Email,
                LoiField::Phone,
                LoiField::Authorization,
            ]
        );
        assert_eq!(form.values().business_type, BusinessType::Manufacturer);
        assert_eq!(form.values().turnover, TurnoverBracket::BelowOneCrore);
        assert_eq!(form.values().interest_level.value(), 1);
    }

    #[test]
    fn every_write_revalidates() {
        let mut form = filled();
        assert!(form.is_valid());

        form.set_field(LoiField::Email, "not an email").unwrap();
        assert_eq!(form.errors().get(LoiField::Email), Some(ValidationError::InvalidEmail));

        form.set_field(LoiField::Email, "a@acme.test").unwrap();
        form.set_authorization(false);
        assert_eq!(
            form.errors().get(LoiField::Authorization),
            Some(ValidationError::MustAccept)
        );
    }

    #[test]
    fn submission_requires_authorization() {
        let mut form = filled();
        form.set_authorization(false);
        let errors = form.submission().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![LoiField::Authorization]);
    }

    #[test]
    fn submission_trims_and_drops_blank_gstin() {
        let mut form = filled();
        form.set_field(LoiField::CompanyName, "  Acme Gems ").unwrap();
        form.set_field(LoiField::Gstin, "   ").unwrap();
        let submission = form.submission().unwrap();
        assert_eq!(submission.company_name, "Acme Gems");
        assert_eq!(submission.gstin, None);
    }

    #[test]
    fn enum_fields_accept_labels_and_keep_value_on_garbage() {
        let mut form = LoiForm::new();
        form.set_field(LoiField::BusinessType, "retailer").unwrap();
        form.set_field(LoiField::Turnover, "₹5 Cr - ₹25 Cr").unwrap();
        form.set_field(LoiField::InterestLevel, "4 - Very interested").unwrap();
        assert_eq!(form.values().business_type, BusinessType::Retail);
        assert_eq!(form.values().turnover, TurnoverBracket::FiveToTwentyFiveCrore);
        assert_eq!(form.values().interest_level.value(), 4);

        let err = form.set_field(LoiField::InterestLevel, "9").unwrap_err();
        assert!(matches!(err, FieldError::InvalidValue { .. }));
        assert_eq!(form.values().interest_level.value(), 4);
    }

    #[test]
    fn assistant_cannot_tick_authorization() {
        let mut form = LoiForm::new();
        let err = form.apply_update("authorization", "true").unwrap_err();
        assert_eq!(
            err,
            FieldError::NotAssistantSettable {
                field: "authorization".into()
            }
        );
        assert!(!form.values().authorization);
        assert!(!LoiField::assistant_settable_names().contains(&"authorization"));
    }

    #[test]
    fn localized_labels_resolve_to_codes() {
        let labels = TranslationTable::from_pairs([
            (keys::auth::RETAILER, "खुदरा विक्रेता"),
            (keys::auth::TURNOVER_2, "₹1 करोड़ - ₹5 करोड़"),
            (keys::loi::INTEREST_5, "5 - पायलट के लिए तैयार"),
        ]);
        let mut form = LoiForm::new();
        let mut target = LocalizedForm::new(&mut form, &labels);
        target.apply_update("businessType", " खुदरा विक्रेता ").unwrap();
        target.apply_update("turnover", "₹1 करोड़ - ₹5 करोड़").unwrap();
        target.apply_update("interestLevel", "5 - पायलट के लिए तैयार").unwrap();
        target.apply_update("city", "Surat").unwrap();
        assert_eq!(
            target.apply_update("authorization", "true"),
            Err(FieldError::NotAssistantSettable {
                field: "authorization".into()
            })
        );
        target.apply_update("businessType", "wholesaler").unwrap();

        assert_eq!(form.values().business_type, BusinessType::Wholesale);
        assert_eq!(form.values().turnover, TurnoverBracket::OneToFiveCrore);
        assert_eq!(form.values().interest_level.value(), 5);
        assert_eq!(form.values().city, "Surat");
    }

    #[test]
    fn assistant_tool_lists_codes_then_labels() {
        let labels = TranslationTable::from_pairs([(keys::auth::MANUFACTURER, "निर्माता")]);
        let tool = LoiForm::assistant_tool(&labels);
        let (field, values) = &tool.choices[0];
        assert_eq!(*field, "businessType");
        assert_eq!(&values[..5], ["Manufacturer", "Retail", "Wholesale", "Distributor", "Other"]);
        assert_eq!(values[5], "निर्माता");
        assert!(tool.describe_values().contains("\"1cr-5cr\""));
        assert!(!tool.fields.contains(&"authorization"));
    }

    #[test]
    fn inline_messages_per_field() {
        use crate::validation::ValidationError;
        assert_eq!(LoiField::Email.error_key(ValidationError::InvalidEmail), "loi.emailInvalid");
        assert_eq!(LoiField::Email.error_key(ValidationError::Required), "loi.required");
        assert_eq!(LoiField::Phone.error_key(ValidationError::Required), "loi.required");
        assert_eq!(
            LoiField::Authorization.error_key(ValidationError::MustAccept),
            "loi.authorizationError"
        );
    }
}
