use gembank_core::contact::{send_message, ContactField, ContactMessage};
use gembank_core::i18n::keys;
use gembank_core::lifetime::ViewLifetime;
use gembank_core::validation::FieldErrors;
use gembank_core::Timings;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::context::i18n::use_i18n;
use crate::context::notices::use_notices;
use crate::services::timers::BrowserSleeper;

#[function_component]
pub fn Contact() -> Html {
    let i18n = use_i18n();
    let notices = use_notices();
    let message = use_state(ContactMessage::default);
    let errors = use_state(FieldErrors::<ContactField>::new);
    let sending = use_state(|| false);
    let lifetime = use_memo(|_| ViewLifetime::new(), ());

    let setter = |apply: fn(&mut ContactMessage, String)| {
        let message = message.clone();
        move |value: String| {
            let mut next = (*message).clone();
            apply(&mut next, value);
            message.set(next);
        }
    };
    let on_input = |apply: fn(&mut ContactMessage, String)| {
        let set = setter(apply);
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set(input.value());
        })
    };
    let on_message = {
        let set = setter(|message, value| message.message = value);
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            set(input.value());
        })
    };

    let onsubmit = {
        let message = message.clone();
        let errors = errors.clone();
        let sending = sending.clone();
        let token = lifetime.token();
        let i18n = i18n.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *sending {
                return;
            }
            let draft = (*message).clone();
            let found = draft.validate();
            if !found.is_empty() {
                errors.set(found);
                return;
            }
            errors.set(FieldErrors::new());
            sending.set(true);

            let message = message.clone();
            let errors = errors.clone();
            let sending = sending.clone();
            let token = token.clone();
            let notices = notices.clone();
            let i18n = i18n.clone();
            spawn_local(async move {
                let result = send_message(&draft, &BrowserSleeper, Timings::default().contact_submit).await;
                token.run(|| {
                    sending.set(false);
                    match result {
                        Ok(()) => {
                            notices.success(i18n.t(keys::toasts::SUCCESS_TITLE), i18n.t(keys::contact::SUCCESS));
                            message.set(ContactMessage::default());
                        }
                        Err(found) => errors.set(found),
                    }
                });
            });
        })
    };

    let field_error = |field: ContactField| -> Html {
        match errors.get(field) {
            Some(error) => html! { <span class="field-error">{i18n.t(field.error_key(error))}</span> },
            None => html! {},
        }
    };
    let invalid = |field: ContactField| errors.contains(field).then(|| "invalid");

    html! {
        <div class="page contact-page">
            <header class="page-header">
                <h1>{i18n.t(keys::contact::TITLE)}</h1>
                <p>{i18n.t(keys::contact::DESCRIPTION)}</p>
            </header>
            <form class="card-form" {onsubmit} novalidate=true>
                <div class="form-row">
                    <div class="form-field">
                        <label for="contact-name">{i18n.t(keys::contact::FULL_NAME)}</label>
                        <input
                            id="contact-name"
                            type="text"
                            class={classes!(invalid(ContactField::Name))}
                            value={message.name.clone()}
                            oninput={on_input(|message, value| message.name = value)}
                        />
                        {field_error(ContactField::Name)}
                    </div>
                    <div class="form-field">
                        <label for="contact-email">{i18n.t(keys::contact::EMAIL)}</label>
                        <input
                            id="contact-email"
                            type="email"
                            class={classes!(invalid(ContactField::Email))}
                            value={message.email.clone()}
                            oninput={on_input(|message, value| message.email = value)}
                        />
                        {field_error(ContactField::Email)}
                    </div>
                </div>
                <div class="form-field">
                    <label for="contact-subject">{i18n.t(keys::contact::SUBJECT)}</label>
                    <input
                        id="contact-subject"
                        type="text"
                        class={classes!(invalid(ContactField::Subject))}
                        value={message.subject.clone()}
                        oninput={on_input(|message, value| message.subject = value)}
                    />
                    {field_error(ContactField::Subject)}
                </div>
                <div class="form-field">
                    <label for="contact-message">{i18n.t(keys::contact::MESSAGE)}</label>
                    <textarea
                        id="contact-message"
                        rows="5"
                        class={classes!(invalid(ContactField::Message))}
                        value={message.message.clone()}
                        oninput={on_message}
                    />
                    {field_error(ContactField::Message)}
                </div>
                <button type="submit" class="primary-button" disabled={*sending}>
                    if *sending {
                        <span class="loading-spinner"></span>{i18n.t(keys::contact::SENDING)}
                    } else {
                        {i18n.t(keys::contact::SEND)}
                    }
                </button>
            </form>
        </div>
    }
}
