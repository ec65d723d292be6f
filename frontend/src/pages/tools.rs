use std::rc::Rc;

use gembank_core::assistant::ConversationApi;
use gembank_core::i18n::keys;
use gembank_core::lifetime::ViewLifetime;
use gembank_core::tools::{generate_description, DescriptionBrief, GenerateError, Tone};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::context::i18n::use_i18n;
use crate::context::notices::use_notices;
use crate::services::gemini::GeminiClient;

#[function_component]
pub fn Tools() -> Html {
    let i18n = use_i18n();
    let notices = use_notices();
    let clipboard = use_clipboard();
    let brief = use_state(DescriptionBrief::default);
    let result = use_state(|| None::<String>);
    let error = use_state(|| None::<&'static str>);
    let loading = use_state(|| false);
    let lifetime = use_memo(|_| ViewLifetime::new(), ());
    let api = use_memo(
        |_| GeminiClient::from_config().map(|client| Rc::new(client) as Rc<dyn ConversationApi>),
        (),
    );

    let set_text = |apply: fn(&mut DescriptionBrief, String)| {
        let brief = brief.clone();
        Callback::from(move |value: String| {
            let mut next = (*brief).clone();
            apply(&mut next, value);
            brief.set(next);
        })
    };
    let on_product_type = set_text(|brief, value| brief.product_type = value);
    let on_features = set_text(|brief, value| brief.features = value);
    let on_audience = set_text(|brief, value| brief.audience = value);

    let on_tone = {
        let brief = brief.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(tone) = Tone::parse(&select.value()) {
                let mut next = (*brief).clone();
                next.tone = tone;
                brief.set(next);
            }
        })
    };

    let onsubmit = {
        let brief = brief.clone();
        let result = result.clone();
        let error = error.clone();
        let loading = loading.clone();
        let token = lifetime.token();
        let api = api.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            if !brief.is_complete() {
                error.set(Some(keys::tools::ERROR));
                return;
            }
            let Some(api) = (*api).clone() else {
                error.set(Some(keys::tools::GENERATE_ERROR));
                return;
            };
            error.set(None);
            result.set(None);
            loading.set(true);

            let brief = (*brief).clone();
            let result = result.clone();
            let error = error.clone();
            let loading = loading.clone();
            let token = token.clone();
            spawn_local(async move {
                let outcome = generate_description(api.as_ref(), &brief).await;
                token.run(|| {
                    match outcome {
                        Ok(text) => result.set(Some(text)),
                        Err(GenerateError::Incomplete) => error.set(Some(keys::tools::ERROR)),
                        Err(GenerateError::Assistant(_)) => error.set(Some(keys::tools::GENERATE_ERROR)),
                    }
                    loading.set(false);
                });
            });
        })
    };

    let on_copy = {
        let result = result.clone();
        let notices = notices.clone();
        let i18n = i18n.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(text) = (*result).clone() {
                clipboard.write_text(text);
                notices.success(i18n.t(keys::toasts::SUCCESS_TITLE), i18n.t(keys::tools::COPY_SUCCESS));
            }
        })
    };

    let text_input = |callback: Callback<String>| {
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            callback.emit(input.value());
        })
    };

    html! {
        <div class="page tools-page">
            <header class="page-header">
                <h1>{i18n.t(keys::tools::GENERATOR_TITLE)}</h1>
                <p>{i18n.t(keys::tools::GENERATOR_DESCRIPTION)}</p>
            </header>
            <div class="tools-grid">
                <form class="card-form" {onsubmit}>
                    <label for="product-type">{i18n.t(keys::tools::PRODUCT_TYPE)}</label>
                    <input
                        id="product-type"
                        type="text"
                        value={brief.product_type.clone()}
                        placeholder={i18n.t(keys::tools::PRODUCT_TYPE_PLACEHOLDER)}
                        oninput={text_input(on_product_type)}
                    />
                    <label for="features">{i18n.t(keys::tools::FEATURES)}</label>
                    <textarea
                        id="features"
                        rows="3"
                        value={brief.features.clone()}
                        placeholder={i18n.t(keys::tools::FEATURES_PLACEHOLDER)}
                        oninput={Callback::from(move |e: InputEvent| {
                            let input: HtmlTextAreaElement = e.target_unchecked_into();
                            on_features.emit(input.value());
                        })}
                    />
                    <label for="audience">{i18n.t(keys::tools::AUDIENCE)}</label>
                    <input
                        id="audience"
                        type="text"
                        value={brief.audience.clone()}
                        placeholder={i18n.t(keys::tools::AUDIENCE_PLACEHOLDER)}
                        oninput={text_input(on_audience)}
                    />
                    <label for="tone">{i18n.t(keys::tools::TONE)}</label>
                    <select id="tone" onchange={on_tone}>
                        { for Tone::ALL.iter().map(|&tone| html! {
                            <option value={tone.as_str()} selected={tone == brief.tone}>
                                {i18n.t(tone.label_key())}
                            </option>
                        }) }
                    </select>
                    if let Some(key) = *error {
                        <p class="form-error">{i18n.t(key)}</p>
                    }
                    <button type="submit" class="primary-button" disabled={*loading}>
                        if *loading {
                            <span class="loading-spinner"></span>{i18n.t(keys::tools::GENERATING)}
                        } else {
                            {i18n.t(keys::tools::GENERATE)}
                        }
                    </button>
                </form>

                if let Some(text) = (*result).clone() {
                    <div class="tools-result">
                        <div class="tools-result-header">
                            <h2>{i18n.t(keys::tools::RESULT)}</h2>
                            <button class="secondary-button" onclick={on_copy}>{i18n.t(keys::tools::COPY)}</button>
                        </div>
                        <pre class="generated-text">{text}</pre>
                    </div>
                }
            </div>
        </div>
    }
}
