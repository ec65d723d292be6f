use std::rc::Rc;

use gembank_core::assistant::{
    AssistantReply, AssistantRequest, AssistantSession, ConversationApi, NoFields, Role, Step,
};
use gembank_core::i18n::keys;
use gembank_core::{AssistantError, Timings};
use web_sys::{Element, HtmlInputElement};
use yew::context::ContextHandle;
use yew::prelude::*;

use crate::context::i18n::I18n;
use crate::services::gemini::GeminiClient;

pub enum ChatbotMsg {
    Toggle,
    SetInput(String),
    Send,
    Replied(Result<AssistantReply, AssistantError>),
    LanguageChanged(I18n),
}

/// Floating support chat. Same session loop as the LOI assistant, no form behind it.
pub struct Chatbot {
    open: bool,
    input: String,
    session: AssistantSession,
    api: Option<Rc<GeminiClient>>,
    i18n: I18n,
    _i18n_handle: Option<ContextHandle<I18n>>,
    end_ref: NodeRef,
}

fn new_session(i18n: &I18n) -> AssistantSession {
    AssistantSession::new(
        i18n.t(keys::chatbot::SYSTEM_INSTRUCTION),
        Some(i18n.t(keys::chatbot::GREETING)),
        i18n.t(keys::chatbot::SEND_ERROR),
        Timings::default().max_tool_rounds,
    )
}

impl Chatbot {
    fn dispatch(&self, ctx: &Context<Self>, request: AssistantRequest) {
        let Some(api) = self.api.clone() else {
            ctx.link()
                .send_message(ChatbotMsg::Replied(Err(AssistantError::Unavailable)));
            return;
        };
        ctx.link().send_future(async move {
            ChatbotMsg::Replied(api.send(&request).await)
        });
    }
}

impl Component for Chatbot {
    type Message = ChatbotMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (i18n, handle) = match ctx
            .link()
            .context::<I18n>(ctx.link().callback(ChatbotMsg::LanguageChanged))
        {
            Some((i18n, handle)) => (i18n, Some(handle)),
            None => (I18n::default(), None),
        };
        let api = GeminiClient::from_config().map(Rc::new);
        if api.is_none() {
            log::warn!("no assistant key configured, chatbot is disabled");
        }

        Self {
            open: false,
            input: String::new(),
            session: new_session(&i18n),
            api,
            i18n,
            _i18n_handle: handle,
            end_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ChatbotMsg::Toggle => {
                self.open = !self.open;
                if self.open {
                    // Each opening starts a fresh conversation.
                    self.session = new_session(&self.i18n);
                    self.input.clear();
                }
                true
            }
            ChatbotMsg::SetInput(input) => {
                self.input = input;
                true
            }
            ChatbotMsg::Send => {
                if self.api.is_none() {
                    return false;
                }
                match self.session.begin_user_turn(&self.input) {
                    Ok(request) => {
                        self.input.clear();
                        self.dispatch(ctx, request);
                        true
                    }
                    Err(e) => {
                        log::debug!("chat input ignored: {}", e);
                        false
                    }
                }
            }
            ChatbotMsg::Replied(result) => {
                let step = match result {
                    Ok(reply) => self.session.handle_reply(reply, &mut NoFields),
                    Err(e) => self.session.handle_error(e),
                };
                if let Step::Continue(request) = step {
                    self.dispatch(ctx, request);
                }
                true
            }
            ChatbotMsg::LanguageChanged(i18n) => {
                self.i18n = i18n;
                if !self.session.is_waiting() && self.session.conversation().len() <= 1 {
                    self.session = new_session(&self.i18n);
                }
                true
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if let Some(end) = self.end_ref.cast::<Element>() {
            end.scroll_into_view();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let t = |key: &str| self.i18n.t(key);
        let toggle = ctx.link().callback(|_| ChatbotMsg::Toggle);
        let waiting = self.session.is_waiting();
        let disabled = waiting || self.api.is_none();

        html! {
            <div class={classes!("chatbot", self.open.then(|| "expanded"))}>
                <button
                    onclick={toggle}
                    class="chatbot-toggle"
                    aria-label={if self.open { t(keys::chatbot::CLOSE) } else { t(keys::chatbot::OPEN) }}
                >
                    if self.open { {"✕"} } else { {"💬"} }
                </button>

                if self.open {
                    <div class="chatbot-panel">
                        <h3>{t(keys::chatbot::TITLE)}</h3>
                        <div class="chat-messages">
                            { for self.session.conversation().iter().map(|turn| {
                                let class = match turn.role {
                                    Role::User => "chat-bubble user",
                                    Role::Assistant => "chat-bubble assistant",
                                };
                                html! { <div {class}>{&turn.text}</div> }
                            }) }
                            if self.api.is_none() {
                                <div class="chat-bubble assistant error">{t(keys::chatbot::CONNECT_ERROR)}</div>
                            }
                            if waiting {
                                <div class="chat-bubble assistant typing">{"…"}</div>
                            }
                            <div ref={self.end_ref.clone()}></div>
                        </div>
                        <form
                            class="chat-input"
                            onsubmit={ctx.link().callback(|e: SubmitEvent| {
                                e.prevent_default();
                                ChatbotMsg::Send
                            })}
                        >
                            <input
                                type="text"
                                value={self.input.clone()}
                                placeholder={t(keys::chatbot::PLACEHOLDER)}
                                disabled={disabled}
                                oninput={ctx.link().callback(|e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    ChatbotMsg::SetInput(input.value())
                                })}
                            />
                            <button type="submit" disabled={disabled || self.input.trim().is_empty()}>
                                {"➤"}
                            </button>
                        </form>
                    </div>
                }
            </div>
        }
    }
}
