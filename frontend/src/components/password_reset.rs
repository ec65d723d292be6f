use gembank_core::auth::{request_password_reset, AuthField};
use gembank_core::i18n::keys;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::context::i18n::use_i18n;
use crate::context::notices::use_notices;

#[derive(Properties, PartialEq)]
pub struct PasswordResetProps {
    pub on_close: Callback<()>,
}

#[function_component]
pub fn PasswordResetModal(props: &PasswordResetProps) -> Html {
    let i18n = use_i18n();
    let notices = use_notices();
    let email = use_state(String::new);
    let error = use_state(|| None::<&'static str>);

    let oninput = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let onsubmit = {
        let email = email.clone();
        let error = error.clone();
        let i18n = i18n.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match request_password_reset(&email) {
                Ok(address) => {
                    notices.success(
                        i18n.t(keys::toasts::PASSWORD_RESET_TITLE),
                        i18n.t_with(keys::toasts::PASSWORD_RESET_MESSAGE, &[("email", &address)]),
                    );
                    on_close.emit(());
                }
                Err(errors) => {
                    error.set(
                        errors
                            .get(AuthField::Email)
                            .map(|e| AuthField::Email.error_key(e)),
                    );
                }
            }
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog">
                <h2>{i18n.t(keys::password_reset::TITLE)}</h2>
                <p>{i18n.t(keys::password_reset::DESCRIPTION)}</p>
                <form {onsubmit}>
                    <label for="reset-email">{i18n.t(keys::auth::EMAIL)}</label>
                    <input id="reset-email" type="email" value={(*email).clone()} {oninput} />
                    if let Some(key) = *error {
                        <span class="field-error">{i18n.t(key)}</span>
                    }
                    <div class="modal-actions">
                        <button type="button" class="secondary-button" onclick={close}>
                            {i18n.t(keys::password_reset::CLOSE)}
                        </button>
                        <button type="submit" class="primary-button">
                            {i18n.t(keys::password_reset::SEND)}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
