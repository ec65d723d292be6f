//! Every translation key the site renders.
//!
//! Pages refer to these constants instead of string literals; `ALL` lets the
//! locale tests check that each language file defines every key.

macro_rules! translation_keys {
    ($( $group:ident { $( $name:ident => $path:literal ),* $(,)? } )*) => {
        $(
            pub mod $group {
                $( pub const $name: &str = $path; )*
            }
        )*

        pub const ALL: &[&str] = &[ $( $( $path, )* )* ];
    };
}

translation_keys! {
    nav {
        HOME => "nav.home",
        FEATURES => "nav.features",
        TOOLS => "nav.tools",
        ABOUT => "nav.about",
        BLOG => "nav.blog",
        CONTACT => "nav.contact",
        PAYMENTS => "nav.payments",
        SIGN_IN => "nav.signIn",
        APPLY_NOW => "nav.applyNow",
        CHANGE_LANGUAGE => "nav.changeLanguage",
        MENU => "nav.menu",
    }
    footer {
        TAGLINE => "footer.tagline",
        PRODUCT => "footer.product",
        COMPANY => "footer.company",
        RIGHTS => "footer.rights",
    }
    home {
        HERO_TITLE => "home.heroTitle",
        HERO_SUBTITLE => "home.heroSubtitle",
        CTA_PRIMARY => "home.ctaPrimary",
        CTA_SECONDARY => "home.ctaSecondary",
        PROBLEM_TITLE => "home.problemTitle",
        PROBLEM_BODY => "home.problemBody",
        PILLAR_CREDIT_TITLE => "home.pillarCreditTitle",
        PILLAR_CREDIT_BODY => "home.pillarCreditBody",
        PILLAR_PAYMENTS_TITLE => "home.pillarPaymentsTitle",
        PILLAR_PAYMENTS_BODY => "home.pillarPaymentsBody",
        PILLAR_COMPLIANCE_TITLE => "home.pillarComplianceTitle",
        PILLAR_COMPLIANCE_BODY => "home.pillarComplianceBody",
        FINAL_CTA_TITLE => "home.finalCtaTitle",
        FINAL_CTA_BODY => "home.finalCtaBody",
    }
    features {
        TITLE => "features.title",
        SUBTITLE => "features.subtitle",
        CREDIT_TITLE => "features.creditTitle",
        CREDIT_BODY => "features.creditBody",
        PAYMENTS_TITLE => "features.paymentsTitle",
        PAYMENTS_BODY => "features.paymentsBody",
        INVENTORY_TITLE => "features.inventoryTitle",
        INVENTORY_BODY => "features.inventoryBody",
        COMPLIANCE_TITLE => "features.complianceTitle",
        COMPLIANCE_BODY => "features.complianceBody",
    }
    about {
        TITLE => "about.title",
        MISSION_TITLE => "about.missionTitle",
        MISSION_BODY => "about.missionBody",
        VISION_TITLE => "about.visionTitle",
        VISION_BODY => "about.visionBody",
        TEAM_TITLE => "about.teamTitle",
        TEAM_BODY => "about.teamBody",
    }
    blog {
        TITLE => "blog.title",
        SUBTITLE => "blog.subtitle",
        READ_MORE => "blog.readMore",
        BY => "blog.by",
    }
    blog_post {
        NOT_FOUND => "blogPost.postNotFound",
        BACK => "blogPost.backToBlog",
    }
    tools {
        GENERATOR_TITLE => "tools.generatorTitle",
        GENERATOR_DESCRIPTION => "tools.generatorDescription",
        PRODUCT_TYPE => "tools.productType",
        PRODUCT_TYPE_PLACEHOLDER => "tools.productTypePlaceholder",
        FEATURES => "tools.features",
        FEATURES_PLACEHOLDER => "tools.featuresPlaceholder",
        AUDIENCE => "tools.audience",
        AUDIENCE_PLACEHOLDER => "tools.audiencePlaceholder",
        TONE => "tools.tone",
        TONE_ELEGANT => "tools.toneElegant",
        TONE_LUXURIOUS => "tools.toneLuxurious",
        TONE_MODERN => "tools.toneModern",
        TONE_PLAYFUL => "tools.tonePlayful",
        TONE_TRADITIONAL => "tools.toneTraditional",
        GENERATE => "tools.generate",
        GENERATING => "tools.generating",
        RESULT => "tools.result",
        COPY => "tools.copy",
        COPY_SUCCESS => "tools.copySuccess",
        ERROR => "tools.error",
        GENERATE_ERROR => "tools.generateError",
    }
    auth {
        SIGN_IN_TO_ACCOUNT => "auth.signInToAccount",
        CREATE_YOUR_ACCOUNT => "auth.createYourAccount",
        EMAIL => "auth.email",
        PASSWORD => "auth.password",
        PASSWORD_PLACEHOLDER => "auth.passwordPlaceholder",
        FORGOT_PASSWORD => "auth.forgotPassword",
        SIGN_IN => "auth.signIn",
        CREATE_ACCOUNT => "auth.createAccount",
        NO_ACCOUNT => "auth.noAccount",
        HAVE_ACCOUNT => "auth.haveAccount",
        OR_CONTINUE_WITH => "auth.orContinueWith",
        PHONE_OTP => "auth.phoneOtp",
        BACK => "auth.back",
        BUSINESS_PROFILE => "auth.businessProfile",
        BUSINESS_NAME => "auth.businessName",
        BUSINESS_NAME_PLACEHOLDER => "auth.businessNamePlaceholder",
        BUSINESS_TYPE => "auth.businessType",
        MANUFACTURER => "auth.manufacturer",
        RETAILER => "auth.retailer",
        WHOLESALER => "auth.wholesaler",
        DISTRIBUTOR => "auth.distributor",
        OTHER => "auth.other",
        CITY => "auth.city",
        CITY_PLACEHOLDER => "auth.cityPlaceholder",
        TURNOVER => "auth.turnover",
        TURNOVER_1 => "auth.turnover1",
        TURNOVER_2 => "auth.turnover2",
        TURNOVER_3 => "auth.turnover3",
        TURNOVER_4 => "auth.turnover4",
        TERMS => "auth.terms",
        COMPLETE_SIGNUP => "auth.completeSignup",
        PHONE => "auth.phone",
        PHONE_PLACEHOLDER => "auth.phonePlaceholder",
        SEND_OTP => "auth.sendOtp",
        ENTER_OTP => "auth.enterOtp",
        OTP_SENT_TO => "auth.otpSentTo",
        VERIFY_SIGN_IN => "auth.verifySignIn",
        DID_NOT_RECEIVE => "auth.didNotReceive",
        RESEND => "auth.resend",
        INVALID_OTP => "auth.invalidOtp",
        REQUIRED => "auth.required",
        EMAIL_INVALID => "auth.emailInvalid",
        PHONE_INVALID => "auth.phoneInvalid",
        TERMS_REQUIRED => "auth.termsRequired",
    }
    password_reset {
        TITLE => "passwordReset.title",
        DESCRIPTION => "passwordReset.description",
        SEND => "passwordReset.send",
        CLOSE => "passwordReset.close",
    }
    toasts {
        REGISTRATION_SUCCESS_TITLE => "toasts.registrationSuccessTitle",
        REGISTRATION_SUCCESS_MESSAGE => "toasts.registrationSuccessMessage",
        PASSWORD_RESET_TITLE => "toasts.passwordResetTitle",
        PASSWORD_RESET_MESSAGE => "toasts.passwordResetMessage",
        OTP_SENT_TITLE => "toasts.otpSentTitle",
        OTP_SENT_MESSAGE => "toasts.otpSentMessage",
        OTP_RESENT_TITLE => "toasts.otpResentTitle",
        OTP_RESENT_MESSAGE => "toasts.otpResentMessage",
        SIGNED_IN_TITLE => "toasts.signedInTitle",
        SIGNED_IN_MESSAGE => "toasts.signedInMessage",
        DEMO_LOGIN_TITLE => "toasts.demoLoginTitle",
        DEMO_LOGIN_MESSAGE => "toasts.demoLoginMessage",
        SUCCESS_TITLE => "toasts.successTitle",
        ERROR_TITLE => "toasts.errorTitle",
    }
    loi {
        TITLE => "loi.title",
        DESCRIPTION => "loi.description",
        FILL_MANUALLY => "loi.fillManually",
        USE_AI_ASSISTANT => "loi.useAIAssistant",
        COMPANY_INFO => "loi.companyInfo",
        COMPANY_NAME => "loi.companyName",
        BUSINESS_TYPE => "loi.businessType",
        CITY_STATE => "loi.cityState",
        GSTIN => "loi.gstin",
        CONTACT_PERSON => "loi.contactPerson",
        FULL_NAME => "loi.fullName",
        DESIGNATION => "loi.designation",
        EMAIL => "loi.email",
        PHONE => "loi.phone",
        BUSINESS_DETAILS => "loi.businessDetails",
        TURNOVER => "loi.turnover",
        INTEREST_LEVEL => "loi.interestLevel",
        INTEREST_1 => "loi.interest1",
        INTEREST_2 => "loi.interest2",
        INTEREST_3 => "loi.interest3",
        INTEREST_4 => "loi.interest4",
        INTEREST_5 => "loi.interest5",
        AUTHORIZATION => "loi.authorization",
        AUTHORIZATION_ERROR => "loi.authorizationError",
        REQUIRED => "loi.required",
        EMAIL_INVALID => "loi.emailInvalid",
        SUBMIT => "loi.submit",
        SUBMITTING => "loi.submitting",
        PDF_SUCCESS => "loi.pdfSuccess",
        PDF_ERROR => "loi.pdfError",
        AI_ASSISTANT_TITLE => "loi.aiAssistantTitle",
        AI_SYSTEM_INSTRUCTION => "loi.aiSystemInstruction",
        AI_GREETING => "loi.aiGreeting",
        AI_UNAVAILABLE => "loi.aiUnavailable",
        AI_ERROR => "loi.aiError",
        AI_CHAT_PLACEHOLDER => "loi.aiChatPlaceholder",
        SEND => "loi.send",
    }
    contact {
        TITLE => "contact.title",
        DESCRIPTION => "contact.description",
        FULL_NAME => "contact.fullName",
        EMAIL => "contact.email",
        SUBJECT => "contact.subject",
        MESSAGE => "contact.message",
        NAME_REQUIRED => "contact.nameRequired",
        EMAIL_REQUIRED => "contact.emailRequired",
        EMAIL_INVALID => "contact.emailInvalid",
        SUBJECT_REQUIRED => "contact.subjectRequired",
        MESSAGE_REQUIRED => "contact.messageRequired",
        SEND => "contact.send",
        SENDING => "contact.sending",
        SUCCESS => "contact.success",
    }
    admin {
        TITLE => "admin.title",
        COMING_SOON_DESC_1 => "admin.comingSoonDesc1",
        COMING_SOON_DESC_2 => "admin.comingSoonDesc2",
    }
    payments {
        TITLE => "payments.title",
        DESCRIPTION => "payments.description",
        NAME => "payments.name",
        EMAIL => "payments.email",
        CARD => "payments.card",
        PAY_NOW => "payments.payNow",
        PROCESSING => "payments.processing",
        PAYMENT_ERROR => "payments.paymentError",
        DETAILS_REQUIRED => "payments.detailsRequired",
        PAYMENT_SUCCESS_TITLE => "payments.paymentSuccessTitle",
        PAYMENT_SUCCESS_MESSAGE => "payments.paymentSuccessMessage",
        PAYMENT_FAILED_TITLE => "payments.paymentFailedTitle",
        VIEW_INVOICE => "payments.viewInvoice",
        TRY_AGAIN => "payments.tryAgain",
        INVOICE_TITLE => "payments.invoiceTitle",
        INVOICE_ID => "payments.invoiceId",
        DATE => "payments.date",
        BILLED_TO => "payments.billedTo",
        ITEM => "payments.item",
        ITEM_DESCRIPTION => "payments.itemDescription",
        AMOUNT => "payments.amount",
        TOTAL => "payments.total",
        PAYMENT_METHOD => "payments.paymentMethod",
        CLOSE => "payments.close",
        DOWNLOAD_INVOICE => "payments.downloadInvoice",
        INVOICE_GENERATED_SUCCESS => "payments.invoiceGeneratedSuccess",
        INVOICE_GENERATED_ERROR => "payments.invoiceGeneratedError",
        POWERED_BY => "payments.poweredBy",
    }
    chatbot {
        TITLE => "chatbot.title",
        OPEN => "chatbot.open",
        CLOSE => "chatbot.close",
        GREETING => "chatbot.greeting",
        SYSTEM_INSTRUCTION => "chatbot.systemInstruction",
        PLACEHOLDER => "chatbot.placeholder",
        CONNECT_ERROR => "chatbot.connectError",
        SEND_ERROR => "chatbot.sendError",
    }
    feedback {
        OPEN => "feedback.open",
        TITLE => "feedback.title",
        PROMPT => "feedback.prompt",
        POSITIVE => "feedback.positive",
        NEUTRAL => "feedback.neutral",
        NEGATIVE => "feedback.negative",
        POSITIVE_PLACEHOLDER => "feedback.positivePlaceholder",
        NEUTRAL_PLACEHOLDER => "feedback.neutralPlaceholder",
        NEGATIVE_PLACEHOLDER => "feedback.negativePlaceholder",
        DEFAULT_PLACEHOLDER => "feedback.defaultPlaceholder",
        CAN_CONTACT => "feedback.canContact",
        SUBMIT => "feedback.submit",
        SUBMITTING => "feedback.submitting",
        THANKS_TITLE => "feedback.thanksTitle",
        THANKS_MESSAGE => "feedback.thanksMessage",
    }
    not_found {
        TITLE => "notFound.title",
        BODY => "notFound.body",
        BACK_HOME => "notFound.backHome",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique_and_dotted() {
        let mut seen = HashSet::new();
        for key in ALL {
            assert!(seen.insert(*key), "duplicate key {key}");
            assert!(key.contains('.'), "key {key} has no section");
        }
    }
}
