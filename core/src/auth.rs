//! Sign-in and sign-up screens.
//!
//! Nothing here authenticates anyone. Login is a mock, sign-up ends in a
//! notice, and one-time codes go through `OtpService`, whose only
//! implementation is `SimulatedOtp`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FlowError;
use crate::i18n::keys;
use crate::loi::{BusinessType, TurnoverBracket};
use crate::validation::{self, FieldErrors, ValidationError};

pub const OTP_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStep {
    Credentials,
    BusinessProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthView {
    Login,
    Signup(SignupStep),
    OtpPhone,
    OtpVerify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AuthField {
    Email,
    Password,
    BusinessName,
    City,
    Terms,
    Phone,
    Code,
}

impl AuthField {
    pub fn error_key(self, error: ValidationError) -> &'static str {
        match (self, error) {
            (_, ValidationError::InvalidEmail) => keys::auth::EMAIL_INVALID,
            (_, ValidationError::InvalidPhone) => keys::auth::PHONE_INVALID,
            (_, ValidationError::MustAccept) => keys::auth::TERMS_REQUIRED,
            (AuthField::Code, _) | (_, ValidationError::Invalid) => keys::auth::INVALID_OTP,
            (_, ValidationError::Required) => keys::auth::REQUIRED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> FieldErrors<AuthField> {
        let mut errors = FieldErrors::new();
        errors.check(AuthField::Email, validation::email(&self.email));
        errors.check(AuthField::Password, validation::required(&self.password));
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub business_name: String,
    pub business_type: BusinessType,
    pub city: String,
    pub turnover: TurnoverBracket,
    pub terms_accepted: bool,
}

impl BusinessProfile {
    pub fn validate(&self) -> FieldErrors<AuthField> {
        let mut errors = FieldErrors::new();
        errors.check(AuthField::BusinessName, validation::required(&self.business_name));
        errors.check(AuthField::City, validation::required(&self.city));
        errors.check(AuthField::Terms, validation::accepted(self.terms_accepted));
        errors
    }
}

/// Seconds until "resend code" unlocks. Ticked once a second by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResendCountdown {
    remaining: u32,
    period: u32,
}

impl ResendCountdown {
    pub fn new(period: u32) -> Self {
        Self {
            remaining: period,
            period,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }

    /// Returns true while still counting.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining > 0
    }

    pub fn restart(&mut self) {
        self.remaining = self.period;
    }
}

#[async_trait(?Send)]
pub trait OtpService {
    async fn send_code(&self, phone: &str);
    async fn verify(&self, phone: &str, code: &str) -> bool;
}

/// Accepts any six-digit code. There is no backend to send real ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedOtp;

#[async_trait(?Send)]
impl OtpService for SimulatedOtp {
    async fn send_code(&self, phone: &str) {
        log::info!("simulated one-time code sent to {}", phone);
    }

    async fn verify(&self, _phone: &str, code: &str) -> bool {
        code.len() == OTP_LENGTH && code.chars().all(|c| c.is_ascii_digit())
    }
}

/// Which auth screen is showing, and what it remembers between screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFlow {
    view: AuthView,
    phone: String,
    countdown: ResendCountdown,
}

impl AuthFlow {
    pub fn new(resend_period_secs: u32) -> Self {
        Self {
            view: AuthView::Login,
            phone: String::new(),
            countdown: ResendCountdown::new(resend_period_secs),
        }
    }

    pub fn view(&self) -> AuthView {
        self.view
    }

    /// Phone number the code was sent to.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn countdown(&self) -> &ResendCountdown {
        &self.countdown
    }

    pub fn tick(&mut self) -> bool {
        self.countdown.tick()
    }

    pub fn show_login(&mut self) {
        self.view = AuthView::Login;
    }

    pub fn show_signup(&mut self) {
        self.view = AuthView::Signup(SignupStep::Credentials);
    }

    pub fn show_phone_otp(&mut self) {
        self.view = AuthView::OtpPhone;
    }

    /// The back arrow: profile goes to credentials, code entry goes to the phone form.
    pub fn back(&mut self) {
        self.view = match self.view {
            AuthView::Signup(SignupStep::BusinessProfile) => AuthView::Signup(SignupStep::Credentials),
            AuthView::OtpVerify => AuthView::OtpPhone,
            _ => AuthView::Login,
        };
    }

    /// Mock sign-in. Valid credentials only mean the demo notice is shown.
    pub fn login(&self, credentials: &Credentials) -> Result<(), FieldErrors<AuthField>> {
        credentials.validate().into_result()?;
        log::info!("demo sign-in for {}", credentials.email.trim());
        Ok(())
    }

    pub fn submit_credentials(&mut self, credentials: &Credentials) -> Result<(), FieldErrors<AuthField>> {
        credentials.validate().into_result()?;
        self.view = AuthView::Signup(SignupStep::BusinessProfile);
        Ok(())
    }

    /// Final sign-up step. On success the login screen comes back.
    pub fn complete_signup(&mut self, profile: &BusinessProfile) -> Result<(), FieldErrors<AuthField>> {
        if self.view != AuthView::Signup(SignupStep::BusinessProfile) {
            log::warn!("sign-up completed from {:?}", self.view);
        }
        profile.validate().into_result()?;
        log::info!("sign-up completed for {}", profile.business_name.trim());
        self.view = AuthView::Login;
        Ok(())
    }

    pub async fn send_code(
        &mut self,
        otp: &dyn OtpService,
        phone: &str,
    ) -> Result<(), FieldErrors<AuthField>> {
        let mut errors = FieldErrors::new();
        errors.check(AuthField::Phone, validation::phone(phone));
        errors.into_result()?;
        self.phone = phone.trim().to_string();
        otp.send_code(&self.phone).await;
        self.countdown.restart();
        self.view = AuthView::OtpVerify;
        Ok(())
    }

    /// Only once the countdown has run out.
    pub async fn resend_code(&mut self, otp: &dyn OtpService) -> Result<(), FlowError> {
        if self.view != AuthView::OtpVerify {
            return Err(FlowError::InvalidState("not verifying"));
        }
        if !self.countdown.can_resend() {
            return Err(FlowError::Busy);
        }
        otp.send_code(&self.phone).await;
        self.countdown.restart();
        Ok(())
    }

    pub async fn verify_code(
        &mut self,
        otp: &dyn OtpService,
        code: &str,
    ) -> Result<(), FieldErrors<AuthField>> {
        let code = code.trim();
        let mut errors = FieldErrors::new();
        errors.check(AuthField::Code, validation::required(code));
        errors.clone().into_result()?;
        if !otp.verify(&self.phone, code).await {
            errors.insert(AuthField::Code, ValidationError::Invalid);
            return Err(errors);
        }
        self.view = AuthView::Login;
        Ok(())
    }
}

/// Password-reset modal: returns the address to put in the notice.
pub fn request_password_reset(email: &str) -> Result<String, FieldErrors<AuthField>> {
    let mut errors = FieldErrors::new();
    errors.check(AuthField::Email, validation::email(email));
    errors.into_result()?;
    log::info!("password reset requested for {}", email.trim());
    Ok(email.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            email: "owner@acme.test".into(),
            password: "correct horse".into(),
        }
    }

    #[test]
    fn signup_walks_both_steps_back_to_login() {
        let mut flow = AuthFlow::new(30);
        flow.show_signup();

        let errors = flow.submit_credentials(&Credentials::default()).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![AuthField::Email, AuthField::Password]);
        assert_eq!(flow.view(), AuthView::Signup(SignupStep::Credentials));

        flow.submit_credentials(&credentials()).unwrap();
        assert_eq!(flow.view(), AuthView::Signup(SignupStep::BusinessProfile));

        let mut profile = BusinessProfile {
            business_name: "Acme Gems".into(),
            city: "Surat".into(),
            ..BusinessProfile::default()
        };
        let errors = flow.complete_signup(&profile).unwrap_err();
        assert_eq!(errors.get(AuthField::Terms), Some(ValidationError::MustAccept));
        assert_eq!(AuthField::Terms.error_key(ValidationError::MustAccept), keys::auth::TERMS_REQUIRED);

        profile.terms_accepted = true;
        flow.complete_signup(&profile).unwrap();
        assert_eq!(flow.view(), AuthView::Login);
    }

    #[tokio::test]
    async fn otp_sign_in_with_countdown() {
        let mut flow = AuthFlow::new(3);
        flow.show_phone_otp();

        let errors = flow.send_code(&SimulatedOtp, "123").await.unwrap_err();
        assert_eq!(errors.get(AuthField::Phone), Some(ValidationError::InvalidPhone));
        assert_eq!(flow.view(), AuthView::OtpPhone);

        flow.send_code(&SimulatedOtp, " 9990001111 ").await.unwrap();
        assert_eq!(flow.view(), AuthView::OtpVerify);
        assert_eq!(flow.phone(), "9990001111");
        assert_eq!(flow.resend_code(&SimulatedOtp).await, Err(FlowError::Busy));

        assert!(flow.tick());
        assert!(flow.tick());
        assert!(!flow.tick());
        assert!(!flow.tick());
        assert_eq!(flow.countdown().remaining(), 0);
        flow.resend_code(&SimulatedOtp).await.unwrap();
        assert_eq!(flow.countdown().remaining(), 3);

        let errors = flow.verify_code(&SimulatedOtp, "12ab56").await.unwrap_err();
        assert_eq!(errors.get(AuthField::Code), Some(ValidationError::Invalid));
        assert_eq!(AuthField::Code.error_key(ValidationError::Invalid), keys::auth::INVALID_OTP);
        assert_eq!(flow.view(), AuthView::OtpVerify);
        let errors = flow.verify_code(&SimulatedOtp, "  ").await.unwrap_err();
        assert_eq!(errors.get(AuthField::Code), Some(ValidationError::Required));
        flow.verify_code(&SimulatedOtp, "123456").await.unwrap();
        assert_eq!(flow.view(), AuthView::Login);
    }

    #[test]
    fn back_steps_one_screen() {
        let mut flow = AuthFlow::new(30);
        flow.show_signup();
        flow.submit_credentials(&credentials()).unwrap();
        flow.back();
        assert_eq!(flow.view(), AuthView::Signup(SignupStep::Credentials));
        flow.back();
        assert_eq!(flow.view(), AuthView::Login);
    }

    #[test]
    fn password_reset_needs_an_email() {
        assert_eq!(request_password_reset(" a@acme.test "), Ok("a@acme.test".to_string()));
        assert!(request_password_reset("nope").is_err());
    }
}
