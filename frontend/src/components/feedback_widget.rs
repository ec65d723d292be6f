use gembank_core::feedback::{send_feedback, FeedbackForm, FeedbackPhase, Rating};
use gembank_core::i18n::keys;
use gembank_core::lifetime::ViewLifetime;
use gembank_core::Timings;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::context::i18n::use_i18n;
use crate::services::timers::BrowserSleeper;

fn rating_icon(rating: Rating) -> &'static str {
    match rating {
        Rating::Positive => "😊",
        Rating::Neutral => "😐",
        Rating::Negative => "☹️",
    }
}

#[derive(Properties, PartialEq)]
struct FeedbackPanelProps {
    on_close: Callback<()>,
}

/// Mounted only while open, so closing forgets the form and any pending send.
#[function_component]
fn FeedbackPanel(props: &FeedbackPanelProps) -> Html {
    let i18n = use_i18n();
    let form = use_state(FeedbackForm::default);
    let lifetime = use_memo(|_| ViewLifetime::new(), ());

    let on_comment = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.comment = input.value();
            form.set(next);
        })
    };

    let on_contact = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.may_contact = input.checked();
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let token = lifetime.token();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*form).clone();
            let entry = match next.begin_submit() {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("feedback not sent: {}", e);
                    return;
                }
            };
            form.set(next.clone());
            let form = form.clone();
            let token = token.clone();
            spawn_local(async move {
                send_feedback(&entry, &BrowserSleeper, Timings::default().feedback_submit).await;
                token.run(|| {
                    next.finish_submit();
                    form.set(next);
                });
            });
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let submitting = form.phase() == FeedbackPhase::Submitting;

    html! {
        <div class="feedback-panel">
            <div class="feedback-header">
                <h3>{i18n.t(keys::feedback::TITLE)}</h3>
                <button class="feedback-close" onclick={close}>{"✕"}</button>
            </div>
            if form.phase() == FeedbackPhase::Submitted {
                <div class="feedback-thanks">
                    <div class="feedback-thanks-icon">{"👍"}</div>
                    <h4>{i18n.t(keys::feedback::THANKS_TITLE)}</h4>
                    <p>{i18n.t(keys::feedback::THANKS_MESSAGE)}</p>
                </div>
            } else {
                <form class="feedback-form" {onsubmit}>
                    <p class="feedback-prompt">{i18n.t(keys::feedback::PROMPT)}</p>
                    <div class="feedback-ratings">
                        { for Rating::ALL.iter().map(|&rating| {
                            let onclick = {
                                let form = form.clone();
                                Callback::from(move |_: MouseEvent| {
                                    let mut next = (*form).clone();
                                    next.rating = Some(rating);
                                    form.set(next);
                                })
                            };
                            html! {
                                <button
                                    type="button"
                                    class={classes!("feedback-rating", (form.rating == Some(rating)).then(|| "selected"))}
                                    aria-label={i18n.t(rating.label_key())}
                                    disabled={submitting}
                                    {onclick}
                                >
                                    {rating_icon(rating)}
                                </button>
                            }
                        }) }
                    </div>
                    if form.rating.is_some() {
                        <textarea
                            rows="4"
                            value={form.comment.clone()}
                            placeholder={i18n.t(form.placeholder_key())}
                            disabled={submitting}
                            oninput={on_comment}
                        />
                        <label class="feedback-contact">
                            <input type="checkbox" checked={form.may_contact} onchange={on_contact} disabled={submitting} />
                            {i18n.t(keys::feedback::CAN_CONTACT)}
                        </label>
                        <button type="submit" class="feedback-submit" disabled={!form.can_submit()}>
                            if submitting {
                                <span class="loading-spinner"></span>{i18n.t(keys::feedback::SUBMITTING)}
                            } else {
                                {i18n.t(keys::feedback::SUBMIT)}
                            }
                        </button>
                    }
                </form>
            }
        </div>
    }
}

#[function_component]
pub fn FeedbackWidget() -> Html {
    let i18n = use_i18n();
    let open = use_state(|| false);

    let on_open = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(true))
    };
    let on_close = {
        let open = open.clone();
        Callback::from(move |_| open.set(false))
    };

    html! {
        <div class="feedback-widget">
            <button class="feedback-toggle" onclick={on_open} aria-label={i18n.t(keys::feedback::OPEN)}>
                {"★"}
            </button>
            if *open {
                <FeedbackPanel {on_close} />
            }
        </div>
    }
}
