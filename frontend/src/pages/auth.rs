use gembank_core::auth::{
    AuthField, AuthFlow, AuthView, BusinessProfile, Credentials, SignupStep, SimulatedOtp,
};
use gembank_core::i18n::keys;
use gembank_core::lifetime::ViewLifetime;
use gembank_core::loi::{BusinessType, TurnoverBracket};
use gembank_core::validation::FieldErrors;
use gembank_core::Timings;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::password_reset::PasswordResetModal;
use crate::context::i18n::{use_i18n, I18n};
use crate::context::notices::use_notices;

fn field_error(i18n: &I18n, errors: &FieldErrors<AuthField>, field: AuthField) -> Html {
    match errors.get(field) {
        Some(error) => html! { <span class="field-error">{i18n.t(field.error_key(error))}</span> },
        None => html! {},
    }
}

fn input_value(e: InputEvent) -> String {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value()
}

#[function_component]
pub fn Auth() -> Html {
    let i18n = use_i18n();
    let notices = use_notices();
    let flow = use_state(|| AuthFlow::new(Timings::default().otp_resend_secs));
    let credentials = use_state(Credentials::default);
    let profile = use_state(BusinessProfile::default);
    let phone = use_state(String::new);
    let code = use_state(String::new);
    let errors = use_state(FieldErrors::<AuthField>::new);
    let busy = use_state(|| false);
    let show_reset = use_state(|| false);
    let lifetime = use_memo(|_| ViewLifetime::new(), ());

    let counting = flow.view() == AuthView::OtpVerify && !flow.countdown().can_resend();
    {
        let flow = flow.clone();
        use_interval(
            move || {
                let mut next = (*flow).clone();
                next.tick();
                flow.set(next);
            },
            if counting { 1000 } else { 0 },
        );
    }

    // Switching screens clears inline errors.
    let navigate = |apply: fn(&mut AuthFlow)| {
        let flow = flow.clone();
        let errors = errors.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*flow).clone();
            apply(&mut next);
            flow.set(next);
            errors.set(FieldErrors::new());
        })
    };
    let to_login = navigate(AuthFlow::show_login);
    let to_signup = navigate(AuthFlow::show_signup);
    let to_phone = navigate(AuthFlow::show_phone_otp);
    let go_back = navigate(AuthFlow::back);

    let on_email = {
        let credentials = credentials.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*credentials).clone();
            next.email = input_value(e);
            credentials.set(next);
        })
    };
    let on_password = {
        let credentials = credentials.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*credentials).clone();
            next.password = input_value(e);
            credentials.set(next);
        })
    };

    let on_login = {
        let flow = flow.clone();
        let credentials = credentials.clone();
        let errors = errors.clone();
        let notices = notices.clone();
        let i18n = i18n.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match flow.login(&credentials) {
                Ok(()) => {
                    errors.set(FieldErrors::new());
                    notices.info(
                        i18n.t(keys::toasts::DEMO_LOGIN_TITLE),
                        i18n.t(keys::toasts::DEMO_LOGIN_MESSAGE),
                    );
                }
                Err(found) => errors.set(found),
            }
        })
    };

    let on_credentials = {
        let flow = flow.clone();
        let credentials = credentials.clone();
        let errors = errors.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*flow).clone();
            match next.submit_credentials(&credentials) {
                Ok(()) => {
                    flow.set(next);
                    errors.set(FieldErrors::new());
                }
                Err(found) => errors.set(found),
            }
        })
    };

    let on_business_name = {
        let profile = profile.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*profile).clone();
            next.business_name = input_value(e);
            profile.set(next);
        })
    };
    let on_city = {
        let profile = profile.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*profile).clone();
            next.city = input_value(e);
            profile.set(next);
        })
    };
    let on_business_type = {
        let profile = profile.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(business_type) = BusinessType::parse(&select.value()) {
                let mut next = (*profile).clone();
                next.business_type = business_type;
                profile.set(next);
            }
        })
    };
    let on_turnover = {
        let profile = profile.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(turnover) = TurnoverBracket::parse(&select.value()) {
                let mut next = (*profile).clone();
                next.turnover = turnover;
                profile.set(next);
            }
        })
    };
    let on_terms = {
        let profile = profile.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*profile).clone();
            next.terms_accepted = input.checked();
            profile.set(next);
        })
    };

    let on_complete_signup = {
        let flow = flow.clone();
        let profile = profile.clone();
        let credentials = credentials.clone();
        let errors = errors.clone();
        let notices = notices.clone();
        let i18n = i18n.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*flow).clone();
            match next.complete_signup(&profile) {
                Ok(()) => {
                    flow.set(next);
                    errors.set(FieldErrors::new());
                    profile.set(BusinessProfile::default());
                    credentials.set(Credentials::default());
                    notices.success(
                        i18n.t(keys::toasts::REGISTRATION_SUCCESS_TITLE),
                        i18n.t(keys::toasts::REGISTRATION_SUCCESS_MESSAGE),
                    );
                }
                Err(found) => errors.set(found),
            }
        })
    };

    let on_phone = {
        let phone = phone.clone();
        Callback::from(move |e: InputEvent| phone.set(input_value(e)))
    };
    let on_code = {
        let code = code.clone();
        Callback::from(move |e: InputEvent| code.set(input_value(e)))
    };

    let on_send_code = {
        let flow = flow.clone();
        let phone = phone.clone();
        let errors = errors.clone();
        let busy = busy.clone();
        let notices = notices.clone();
        let i18n = i18n.clone();
        let token = lifetime.token();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            busy.set(true);
            let mut next = (*flow).clone();
            let number = (*phone).clone();
            let flow = flow.clone();
            let errors = errors.clone();
            let busy = busy.clone();
            let notices = notices.clone();
            let i18n = i18n.clone();
            let token = token.clone();
            spawn_local(async move {
                let result = next.send_code(&SimulatedOtp, &number).await;
                token.run(|| {
                    busy.set(false);
                    match result {
                        Ok(()) => {
                            flow.set(next);
                            errors.set(FieldErrors::new());
                            notices.success(
                                i18n.t(keys::toasts::OTP_SENT_TITLE),
                                i18n.t(keys::toasts::OTP_SENT_MESSAGE),
                            );
                        }
                        Err(found) => errors.set(found),
                    }
                });
            });
        })
    };

    let on_resend = {
        let flow = flow.clone();
        let notices = notices.clone();
        let i18n = i18n.clone();
        let token = lifetime.token();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*flow).clone();
            let flow = flow.clone();
            let notices = notices.clone();
            let i18n = i18n.clone();
            let token = token.clone();
            spawn_local(async move {
                match next.resend_code(&SimulatedOtp).await {
                    Ok(()) => {
                        token.run(|| {
                            flow.set(next);
                            notices.info(
                                i18n.t(keys::toasts::OTP_RESENT_TITLE),
                                i18n.t(keys::toasts::OTP_RESENT_MESSAGE),
                            );
                        });
                    }
                    Err(e) => log::debug!("resend refused: {}", e),
                }
            });
        })
    };

    let on_verify = {
        let flow = flow.clone();
        let code = code.clone();
        let phone = phone.clone();
        let errors = errors.clone();
        let busy = busy.clone();
        let notices = notices.clone();
        let i18n = i18n.clone();
        let token = lifetime.token();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            busy.set(true);
            let mut next = (*flow).clone();
            let entered = (*code).clone();
            let flow = flow.clone();
            let code = code.clone();
            let phone = phone.clone();
            let errors = errors.clone();
            let busy = busy.clone();
            let notices = notices.clone();
            let i18n = i18n.clone();
            let token = token.clone();
            spawn_local(async move {
                let result = next.verify_code(&SimulatedOtp, &entered).await;
                token.run(|| {
                    busy.set(false);
                    match result {
                        Ok(()) => {
                            flow.set(next);
                            errors.set(FieldErrors::new());
                            code.set(String::new());
                            phone.set(String::new());
                            notices.success(
                                i18n.t(keys::toasts::SIGNED_IN_TITLE),
                                i18n.t(keys::toasts::SIGNED_IN_MESSAGE),
                            );
                        }
                        Err(found) => errors.set(found),
                    }
                });
            });
        })
    };

    let open_reset = {
        let show_reset = show_reset.clone();
        Callback::from(move |_: MouseEvent| show_reset.set(true))
    };
    let close_reset = {
        let show_reset = show_reset.clone();
        Callback::from(move |_| show_reset.set(false))
    };

    let invalid = |field: AuthField| errors.contains(field).then(|| "invalid");

    let credential_fields = html! {
        <>
            <div class="form-field">
                <label for="auth-email">{i18n.t(keys::auth::EMAIL)}</label>
                <input
                    id="auth-email"
                    type="email"
                    class={classes!(invalid(AuthField::Email))}
                    value={credentials.email.clone()}
                    oninput={on_email}
                />
                {field_error(&i18n, &errors, AuthField::Email)}
            </div>
            <div class="form-field">
                <label for="auth-password">{i18n.t(keys::auth::PASSWORD)}</label>
                <input
                    id="auth-password"
                    type="password"
                    class={classes!(invalid(AuthField::Password))}
                    placeholder={i18n.t(keys::auth::PASSWORD_PLACEHOLDER)}
                    value={credentials.password.clone()}
                    oninput={on_password}
                />
                {field_error(&i18n, &errors, AuthField::Password)}
            </div>
        </>
    };

    let back_button = html! {
        <button type="button" class="link-button auth-back" onclick={go_back}>
            {"← "}{i18n.t(keys::auth::BACK)}
        </button>
    };

    let body = match flow.view() {
        AuthView::Login => html! {
            <>
                <h1>{i18n.t(keys::auth::SIGN_IN_TO_ACCOUNT)}</h1>
                <form class="auth-form" onsubmit={on_login} novalidate=true>
                    {credential_fields}
                    <button type="button" class="link-button" onclick={open_reset}>
                        {i18n.t(keys::auth::FORGOT_PASSWORD)}
                    </button>
                    <button type="submit" class="primary-button">{i18n.t(keys::auth::SIGN_IN)}</button>
                </form>
                <div class="auth-divider">{i18n.t(keys::auth::OR_CONTINUE_WITH)}</div>
                <button class="secondary-button" onclick={to_phone}>{i18n.t(keys::auth::PHONE_OTP)}</button>
                <p class="auth-switch">
                    {i18n.t(keys::auth::NO_ACCOUNT)}{" "}
                    <button class="link-button" onclick={to_signup}>{i18n.t(keys::auth::CREATE_ACCOUNT)}</button>
                </p>
            </>
        },
        AuthView::Signup(SignupStep::Credentials) => html! {
            <>
                <h1>{i18n.t(keys::auth::CREATE_YOUR_ACCOUNT)}</h1>
                <form class="auth-form" onsubmit={on_credentials} novalidate=true>
                    {credential_fields}
                    <button type="submit" class="primary-button">{i18n.t(keys::auth::CREATE_ACCOUNT)}</button>
                </form>
                <p class="auth-switch">
                    {i18n.t(keys::auth::HAVE_ACCOUNT)}{" "}
                    <button class="link-button" onclick={to_login}>{i18n.t(keys::auth::SIGN_IN)}</button>
                </p>
            </>
        },
        AuthView::Signup(SignupStep::BusinessProfile) => html! {
            <>
                {back_button}
                <h1>{i18n.t(keys::auth::BUSINESS_PROFILE)}</h1>
                <form class="auth-form" onsubmit={on_complete_signup} novalidate=true>
                    <div class="form-field">
                        <label for="business-name">{i18n.t(keys::auth::BUSINESS_NAME)}</label>
                        <input
                            id="business-name"
                            type="text"
                            class={classes!(invalid(AuthField::BusinessName))}
                            placeholder={i18n.t(keys::auth::BUSINESS_NAME_PLACEHOLDER)}
                            value={profile.business_name.clone()}
                            oninput={on_business_name}
                        />
                        {field_error(&i18n, &errors, AuthField::BusinessName)}
                    </div>
                    <div class="form-field">
                        <label for="business-type">{i18n.t(keys::auth::BUSINESS_TYPE)}</label>
                        <select id="business-type" onchange={on_business_type}>
                            { for BusinessType::ALL.iter().map(|&kind| html! {
                                <option value={kind.as_str()} selected={kind == profile.business_type}>
                                    {i18n.t(kind.label_key())}
                                </option>
                            }) }
                        </select>
                    </div>
                    <div class="form-field">
                        <label for="business-city">{i18n.t(keys::auth::CITY)}</label>
                        <input
                            id="business-city"
                            type="text"
                            class={classes!(invalid(AuthField::City))}
                            placeholder={i18n.t(keys::auth::CITY_PLACEHOLDER)}
                            value={profile.city.clone()}
                            oninput={on_city}
                        />
                        {field_error(&i18n, &errors, AuthField::City)}
                    </div>
                    <div class="form-field">
                        <label for="business-turnover">{i18n.t(keys::auth::TURNOVER)}</label>
                        <select id="business-turnover" onchange={on_turnover}>
                            { for TurnoverBracket::ALL.iter().map(|&bracket| html! {
                                <option value={bracket.as_str()} selected={bracket == profile.turnover}>
                                    {i18n.t(bracket.label_key())}
                                </option>
                            }) }
                        </select>
                    </div>
                    <label class="checkbox-field">
                        <input type="checkbox" checked={profile.terms_accepted} onchange={on_terms} />
                        {i18n.t(keys::auth::TERMS)}
                    </label>
                    {field_error(&i18n, &errors, AuthField::Terms)}
                    <button type="submit" class="primary-button">{i18n.t(keys::auth::COMPLETE_SIGNUP)}</button>
                </form>
            </>
        },
        AuthView::OtpPhone => html! {
            <>
                {back_button}
                <h1>{i18n.t(keys::auth::PHONE_OTP)}</h1>
                <form class="auth-form" onsubmit={on_send_code} novalidate=true>
                    <div class="form-field">
                        <label for="otp-phone">{i18n.t(keys::auth::PHONE)}</label>
                        <input
                            id="otp-phone"
                            type="tel"
                            class={classes!(invalid(AuthField::Phone))}
                            placeholder={i18n.t(keys::auth::PHONE_PLACEHOLDER)}
                            value={(*phone).clone()}
                            oninput={on_phone}
                        />
                        {field_error(&i18n, &errors, AuthField::Phone)}
                    </div>
                    <button type="submit" class="primary-button" disabled={*busy}>
                        {i18n.t(keys::auth::SEND_OTP)}
                    </button>
                </form>
            </>
        },
        AuthView::OtpVerify => html! {
            <>
                {back_button}
                <h1>{i18n.t(keys::auth::ENTER_OTP)}</h1>
                <p>{i18n.t_with(keys::auth::OTP_SENT_TO, &[("phone", flow.phone())])}</p>
                <form class="auth-form" onsubmit={on_verify} novalidate=true>
                    <div class="form-field">
                        <input
                            id="otp-code"
                            type="text"
                            inputmode="numeric"
                            maxlength="6"
                            class={classes!("otp-input", invalid(AuthField::Code))}
                            value={(*code).clone()}
                            oninput={on_code}
                        />
                        {field_error(&i18n, &errors, AuthField::Code)}
                    </div>
                    <button type="submit" class="primary-button" disabled={*busy}>
                        {i18n.t(keys::auth::VERIFY_SIGN_IN)}
                    </button>
                </form>
                <p class="auth-switch">
                    {i18n.t(keys::auth::DID_NOT_RECEIVE)}{" "}
                    <button class="link-button" onclick={on_resend} disabled={counting}>
                        {i18n.t(keys::auth::RESEND)}
                        if counting {
                            {format!(" ({}s)", flow.countdown().remaining())}
                        }
                    </button>
                </p>
            </>
        },
    };

    html! {
        <div class="page auth-page">
            <div class="auth-card">
                {body}
            </div>
            if *show_reset {
                <PasswordResetModal on_close={close_reset} />
            }
        </div>
    }
}
