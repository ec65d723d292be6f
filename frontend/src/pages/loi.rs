use std::rc::Rc;

use chrono::Utc;
use gembank_core::assistant::{
    AssistantReply, AssistantRequest, AssistantSession, ConversationApi, Role, Step,
};
use gembank_core::documents::{DocumentRenderer, LetterOfIntent, LOI_TEMPLATE_ID};
use gembank_core::clock::Sleeper;
use gembank_core::i18n::keys;
use gembank_core::loi::{
    BusinessType, InterestLevel, LocalizedForm, LoiField, LoiForm, SubmissionFlow, SubmitOutcome,
    TurnoverBracket,
};
use gembank_core::{AssistantError, RenderError, Timings};
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};
use yew::context::ContextHandle;
use yew::prelude::*;

use crate::context::i18n::I18n;
use crate::context::notices::{NoticeContext, Notices};
use crate::services::gemini::GeminiClient;
use crate::services::pdf::CanvasPdfRenderer;
use crate::services::timers::BrowserSleeper;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Manual,
    Assistant,
}

pub enum LoiMsg {
    SetMode(EntryMode),
    Input(LoiField, String),
    SetAuthorization(bool),
    Submit,
    Rendered(Result<(), RenderError>),
    ChatInput(String),
    ChatSend,
    Replied(Result<AssistantReply, AssistantError>),
    LanguageChanged(I18n),
    NoticesChanged(NoticeContext),
}

/// Letter-of-intent page. The inputs and the assistant write the same form.
pub struct LoiPage {
    form: LoiForm,
    flow: SubmissionFlow,
    show_errors: bool,
    mode: EntryMode,
    session: AssistantSession,
    chat_input: String,
    api: Option<Rc<GeminiClient>>,
    i18n: I18n,
    notices: Notices,
    _i18n_handle: Option<ContextHandle<I18n>>,
    _notices_handle: Option<ContextHandle<NoticeContext>>,
    chat_end: NodeRef,
}

fn new_session(i18n: &I18n) -> AssistantSession {
    AssistantSession::new(
        i18n.t(keys::loi::AI_SYSTEM_INSTRUCTION),
        Some(i18n.t(keys::loi::AI_GREETING)),
        i18n.t(keys::loi::AI_ERROR),
        Timings::default().max_tool_rounds,
    )
    .with_tool(LoiForm::assistant_tool(i18n.table()))
}

impl LoiPage {
    fn dispatch(&self, ctx: &Context<Self>, request: AssistantRequest) {
        let Some(api) = self.api.clone() else {
            ctx.link()
                .send_message(LoiMsg::Replied(Err(AssistantError::Unavailable)));
            return;
        };
        ctx.link()
            .send_future(async move { LoiMsg::Replied(api.send(&request).await) });
    }

    fn field_error(&self, field: LoiField) -> Html {
        if !self.show_errors {
            return html! {};
        }
        match self.form.errors().get(field) {
            Some(error) => html! { <span class="field-error">{self.i18n.t(field.error_key(error))}</span> },
            None => html! {},
        }
    }

    fn invalid(&self, field: LoiField) -> Option<&'static str> {
        (self.show_errors && self.form.errors().contains(field)).then(|| "invalid")
    }

    fn text_input(&self, ctx: &Context<Self>, field: LoiField, kind: &'static str) -> Html {
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            LoiMsg::Input(field, input.value())
        });
        html! {
            <div class="form-field">
                <label for={field.name()}>{self.i18n.t(field.label_key())}</label>
                <input
                    id={field.name()}
                    name={field.name()}
                    type={kind}
                    class={classes!(self.invalid(field))}
                    value={self.form.values().text(field)}
                    {oninput}
                />
                {self.field_error(field)}
            </div>
        }
    }

    fn select_input(&self, ctx: &Context<Self>, field: LoiField, options: Vec<(String, &'static str)>) -> Html {
        let onchange = ctx.link().callback(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            LoiMsg::Input(field, select.value())
        });
        let current = self.form.values().text(field);
        html! {
            <div class="form-field">
                <label for={field.name()}>{self.i18n.t(field.label_key())}</label>
                <select id={field.name()} name={field.name()} {onchange}>
                    { for options.into_iter().map(|(value, label)| {
                        let selected = value == current;
                        html! { <option {selected} {value}>{self.i18n.t(label)}</option> }
                    }) }
                </select>
            </div>
        }
    }

    fn view_form(&self, ctx: &Context<Self>) -> Html {
        let t = |key: &str| self.i18n.t(key);
        let busy = self.flow.is_busy();
        let business_types = BusinessType::ALL
            .iter()
            .map(|kind| (kind.as_str().to_string(), kind.label_key()))
            .collect();
        let turnovers = TurnoverBracket::ALL
            .iter()
            .map(|bracket| (bracket.as_str().to_string(), bracket.label_key()))
            .collect();
        let interest_levels = InterestLevel::all()
            .map(|level| (level.value().to_string(), level.label_key()))
            .collect();
        let on_authorization = ctx.link().callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            LoiMsg::SetAuthorization(input.checked())
        });
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            LoiMsg::Submit
        });

        html! {
            <form class="loi-form card-form" {onsubmit} novalidate=true>
                <fieldset>
                    <legend>{t(keys::loi::COMPANY_INFO)}</legend>
                    {self.text_input(ctx, LoiField::CompanyName, "text")}
                    {self.select_input(ctx, LoiField::BusinessType, business_types)}
                    {self.text_input(ctx, LoiField::City, "text")}
                    {self.text_input(ctx, LoiField::Gstin, "text")}
                </fieldset>
                <fieldset>
                    <legend>{t(keys::loi::CONTACT_PERSON)}</legend>
                    {self.text_input(ctx, LoiField::ContactName, "text")}
                    {self.text_input(ctx, LoiField::Designation, "text")}
                    {self.text_input(ctx, LoiField::Email, "email")}
                    {self.text_input(ctx, LoiField::Phone, "tel")}
                </fieldset>
                <fieldset>
                    <legend>{t(keys::loi::BUSINESS_DETAILS)}</legend>
                    {self.select_input(ctx, LoiField::Turnover, turnovers)}
                    {self.select_input(ctx, LoiField::InterestLevel, interest_levels)}
                </fieldset>
                <label class={classes!("checkbox-field", self.invalid(LoiField::Authorization))}>
                    <input
                        type="checkbox"
                        checked={self.form.values().authorization}
                        onchange={on_authorization}
                    />
                    {t(keys::loi::AUTHORIZATION)}
                </label>
                {self.field_error(LoiField::Authorization)}
                <button type="submit" class="primary-button" disabled={busy}>
                    if busy {
                        <span class="loading-spinner"></span>{t(keys::loi::SUBMITTING)}
                    } else {
                        {t(keys::loi::SUBMIT)}
                    }
                </button>
            </form>
        }
    }

    fn view_assistant(&self, ctx: &Context<Self>) -> Html {
        let t = |key: &str| self.i18n.t(key);
        let waiting = self.session.is_waiting();
        let disabled = waiting || self.api.is_none();
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            LoiMsg::ChatSend
        });
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            LoiMsg::ChatInput(input.value())
        });

        html! {
            <aside class="loi-assistant">
                <h3>{t(keys::loi::AI_ASSISTANT_TITLE)}</h3>
                <div class="chat-messages">
                    if self.api.is_none() {
                        <div class="chat-bubble assistant error">{t(keys::loi::AI_UNAVAILABLE)}</div>
                    } else {
                        { for self.session.conversation().iter().map(|turn| {
                            let class = match turn.role {
                                Role::User => "chat-bubble user",
                                Role::Assistant => "chat-bubble assistant",
                            };
                            html! { <div {class}>{&turn.text}</div> }
                        }) }
                    }
                    if waiting {
                        <div class="chat-bubble assistant typing">{"…"}</div>
                    }
                    <div ref={self.chat_end.clone()}></div>
                </div>
                <form class="chat-input" {onsubmit}>
                    <input
                        type="text"
                        value={self.chat_input.clone()}
                        placeholder={t(keys::loi::AI_CHAT_PLACEHOLDER)}
                        {disabled}
                        {oninput}
                    />
                    <button type="submit" disabled={disabled || self.chat_input.trim().is_empty()}>
                        {t(keys::loi::SEND)}
                    </button>
                </form>
            </aside>
        }
    }
}

/// Off-screen letter that html2canvas rasterizes.
fn view_letter(document: &LetterOfIntent) -> Html {
    let submission = &document.submission;
    let signatory = if submission.designation.is_empty() {
        submission.contact_name.clone()
    } else {
        format!("{}, {}", submission.contact_name, submission.designation)
    };
    html! {
        <div id={LOI_TEMPLATE_ID} class="pdf-template loi-letter">
            <div class="letter-head">
                <h2>{"GEMBank"}</h2>
                <p>{format!("Date: {}", document.issued_on())}</p>
                <p>{format!("Reference: {}", document.id)}</p>
            </div>
            <h3>{"Letter of Intent"}</h3>
            <p>{"To the GEMBank team,"}</p>
            <p>
                {format!(
                    "{}, a {} based in {}, confirms its interest in taking part in the GEMBank pilot programme.",
                    submission.company_name,
                    submission.business_type.as_str(),
                    if submission.city.is_empty() { "India" } else { submission.city.as_str() },
                )}
            </p>
            <table class="letter-details">
                <tr><td>{"Company"}</td><td>{&submission.company_name}</td></tr>
                if let Some(gstin) = &submission.gstin {
                    <tr><td>{"GSTIN"}</td><td>{gstin}</td></tr>
                }
                <tr><td>{"Annual turnover"}</td><td>{submission.turnover.as_str()}</td></tr>
                <tr><td>{"Interest level"}</td><td>{format!("{} / 5", submission.interest_level.value())}</td></tr>
                <tr><td>{"Email"}</td><td>{&submission.email}</td></tr>
                <tr><td>{"Phone"}</td><td>{&submission.phone}</td></tr>
            </table>
            <p>{"This letter is not a binding commitment."}</p>
            <div class="letter-signature">
                <p>{signatory}</p>
                <p>{&submission.company_name}</p>
            </div>
        </div>
    }
}

impl Component for LoiPage {
    type Message = LoiMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (i18n, i18n_handle) = match ctx
            .link()
            .context::<I18n>(ctx.link().callback(LoiMsg::LanguageChanged))
        {
            Some((i18n, handle)) => (i18n, Some(handle)),
            None => (I18n::default(), None),
        };
        let (notices, notices_handle) = match ctx
            .link()
            .context::<NoticeContext>(ctx.link().callback(LoiMsg::NoticesChanged))
        {
            Some((notices, handle)) => (Some(notices), Some(handle)),
            None => (None, None),
        };
        let api = GeminiClient::from_config().map(Rc::new);

        Self {
            form: LoiForm::new(),
            flow: SubmissionFlow::new(),
            show_errors: false,
            mode: EntryMode::Manual,
            session: new_session(&i18n),
            chat_input: String::new(),
            api,
            i18n,
            notices: Notices::from_context(notices),
            _i18n_handle: i18n_handle,
            _notices_handle: notices_handle,
            chat_end: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            LoiMsg::SetMode(mode) => {
                self.mode = mode;
                true
            }
            LoiMsg::Input(field, value) => {
                if let Err(e) = self.form.set_field(field, &value) {
                    log::debug!("ignored input: {}", e);
                }
                true
            }
            LoiMsg::SetAuthorization(accepted) => {
                self.form.set_authorization(accepted);
                true
            }
            LoiMsg::Submit => match self.flow.submit(&self.form, Utc::now()) {
                Ok(SubmitOutcome::Invalid(_)) => {
                    self.show_errors = true;
                    true
                }
                Ok(SubmitOutcome::Generate(document)) => {
                    self.show_errors = false;
                    let settle = Timings::default().loi_render_settle;
                    ctx.link().send_future(async move {
                        // The template is mounted by the render this update triggers.
                        BrowserSleeper.sleep(settle).await;
                        LoiMsg::Rendered(CanvasPdfRenderer.render(&document.render_request()).await)
                    });
                    true
                }
                Err(e) => {
                    log::debug!("submit ignored: {}", e);
                    false
                }
            },
            LoiMsg::Rendered(result) => {
                let succeeded = result.is_ok();
                if let Err(e) = self.flow.finish(result) {
                    log::warn!("render result dropped: {}", e);
                    return false;
                }
                if succeeded {
                    self.notices.success(
                        self.i18n.t(keys::toasts::SUCCESS_TITLE),
                        self.i18n.t(keys::loi::PDF_SUCCESS),
                    );
                } else {
                    self.notices.error(
                        self.i18n.t(keys::toasts::ERROR_TITLE),
                        self.i18n.t(keys::loi::PDF_ERROR),
                    );
                }
                true
            }
            LoiMsg::ChatInput(input) => {
                self.chat_input = input;
                true
            }
            LoiMsg::ChatSend => {
                if self.api.is_none() {
                    return false;
                }
                match self.session.begin_user_turn(&self.chat_input) {
                    Ok(request) => {
                        self.chat_input.clear();
                        self.dispatch(ctx, request);
                        true
                    }
                    Err(e) => {
                        log::debug!("assistant input ignored: {}", e);
                        false
                    }
                }
            }
            LoiMsg::Replied(result) => {
                let step = match result {
                    Ok(reply) => {
                        let mut target = LocalizedForm::new(&mut self.form, self.i18n.table());
                        self.session.handle_reply(reply, &mut target)
                    }
                    Err(e) => self.session.handle_error(e),
                };
                if let Step::Continue(request) = step {
                    self.dispatch(ctx, request);
                }
                true
            }
            LoiMsg::LanguageChanged(i18n) => {
                self.i18n = i18n;
                if !self.session.is_waiting() && self.session.conversation().len() <= 1 {
                    self.session = new_session(&self.i18n);
                }
                true
            }
            LoiMsg::NoticesChanged(notices) => {
                self.notices = Notices::from_context(Some(notices));
                false
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if let Some(end) = self.chat_end.cast::<Element>() {
            end.scroll_into_view();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let t = |key: &str| self.i18n.t(key);
        let mode_button = |mode: EntryMode, label: &str| {
            html! {
                <button
                    type="button"
                    class={classes!("mode-button", (self.mode == mode).then(|| "active"))}
                    onclick={ctx.link().callback(move |_| LoiMsg::SetMode(mode))}
                >
                    {t(label)}
                </button>
            }
        };

        html! {
            <div class="page loi-page">
                <header class="page-header">
                    <h1>{t(keys::loi::TITLE)}</h1>
                    <p>{t(keys::loi::DESCRIPTION)}</p>
                </header>
                <div class="mode-toggle">
                    {mode_button(EntryMode::Manual, keys::loi::FILL_MANUALLY)}
                    {mode_button(EntryMode::Assistant, keys::loi::USE_AI_ASSISTANT)}
                </div>
                <div class={classes!("loi-layout", (self.mode == EntryMode::Assistant).then(|| "with-assistant"))}>
                    {self.view_form(ctx)}
                    if self.mode == EntryMode::Assistant {
                        {self.view_assistant(ctx)}
                    }
                </div>
                if let Some(document) = self.flow.document() {
                    <div class="pdf-offscreen" aria-hidden="true">
                        {view_letter(document)}
                    </div>
                }
            </div>
        }
    }
}
