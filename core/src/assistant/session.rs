use super::{
    AssistantReply, AssistantRequest, ConversationApi, FieldTarget, FieldTool, FieldUpdateAck,
    Message, Turn,
};
use crate::error::{AssistantError, FieldError, FlowError};

/// What the caller does after feeding the session a reply or an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Send this request and feed the answer back in.
    Continue(AssistantRequest),
    /// A text reply was appended; input can be re-enabled.
    Done,
    /// The fallback message was appended; input can be re-enabled.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// `turn_start` is the history length before the user's message.
    Waiting { rounds: usize, turn_start: usize },
}

/// One assistant panel's conversation.
///
/// The session never awaits. Callers send the request it hands out and pass
/// the reply back, which keeps form borrows out of async code.
#[derive(Debug, Clone)]
pub struct AssistantSession {
    system_instruction: String,
    greeting: Option<String>,
    fallback: String,
    tool: Option<FieldTool>,
    max_tool_rounds: usize,
    conversation: Vec<Turn>,
    history: Vec<Message>,
    state: State,
}

impl AssistantSession {
    pub fn new(
        system_instruction: impl Into<String>,
        greeting: Option<String>,
        fallback: impl Into<String>,
        max_tool_rounds: usize,
    ) -> Self {
        let mut session = Self {
            system_instruction: system_instruction.into(),
            greeting,
            fallback: fallback.into(),
            tool: None,
            max_tool_rounds,
            conversation: Vec::new(),
            history: Vec::new(),
            state: State::Idle,
        };
        session.reset();
        session
    }

    pub fn with_tool(mut self, tool: FieldTool) -> Self {
        self.tool = Some(tool);
        self
    }

    pub fn conversation(&self) -> &[Turn] {
        &self.conversation
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, State::Waiting { .. })
    }

    /// Empties the conversation, keeping only the greeting.
    pub fn reset(&mut self) {
        self.conversation.clear();
        self.history.clear();
        self.state = State::Idle;
        if let Some(greeting) = &self.greeting {
            self.conversation.push(Turn::assistant(greeting.clone()));
        }
    }

    pub fn begin_user_turn(&mut self, text: &str) -> Result<AssistantRequest, FlowError> {
        if self.is_waiting() {
            return Err(FlowError::Busy);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(FlowError::EmptyInput);
        }
        self.state = State::Waiting {
            rounds: 0,
            turn_start: self.history.len(),
        };
        self.conversation.push(Turn::user(text));
        self.history.push(Message::UserText(text.to_string()));
        Ok(self.request())
    }

    pub fn handle_reply(&mut self, reply: AssistantReply, target: &mut dyn FieldTarget) -> Step {
        let State::Waiting { rounds, turn_start } = self.state else {
            log::warn!("assistant reply arrived with no turn in flight");
            return Step::Done;
        };
        match reply {
            AssistantReply::Text(text) if text.trim().is_empty() => {
                self.handle_error(AssistantError::EmptyResponse)
            }
            AssistantReply::Text(text) => {
                self.history.push(Message::AssistantText(text.clone()));
                self.conversation.push(Turn::assistant(text));
                self.state = State::Idle;
                Step::Done
            }
            AssistantReply::FieldUpdates(requests) if requests.is_empty() => {
                self.handle_error(AssistantError::EmptyResponse)
            }
            AssistantReply::FieldUpdates(requests) => {
                if rounds >= self.max_tool_rounds {
                    return self.handle_error(AssistantError::TooManyToolRounds {
                        limit: self.max_tool_rounds,
                    });
                }
                let acks: Vec<FieldUpdateAck> = requests
                    .iter()
                    .map(|request| {
                        let result = target.apply_update(&request.field, &request.value);
                        match &result {
                            Ok(()) => log::debug!("assistant set {}", request.field),
                            Err(FieldError::UnknownField(name)) => {
                                log::warn!("assistant tried to set unknown field '{}'", name)
                            }
                            Err(e) => log::warn!("assistant update rejected: {}", e),
                        }
                        FieldUpdateAck::for_result(request, &result)
                    })
                    .collect();
                self.history.push(Message::FieldUpdates(requests));
                self.history.push(Message::FieldAcks(acks));
                self.state = State::Waiting {
                    rounds: rounds + 1,
                    turn_start,
                };
                Step::Continue(self.request())
            }
        }
    }

    /// Ends the turn with the fallback message. Field updates already applied stay.
    pub fn handle_error(&mut self, error: AssistantError) -> Step {
        log::error!("assistant turn failed: {}", error);
        if let State::Waiting { turn_start, .. } = self.state {
            self.history.truncate(turn_start);
        }
        self.conversation.push(Turn::assistant(self.fallback.clone()));
        self.state = State::Idle;
        Step::Failed
    }

    fn request(&self) -> AssistantRequest {
        AssistantRequest {
            system_instruction: Some(self.system_instruction.clone()),
            messages: self.history.clone(),
            tool: self.tool.clone(),
        }
    }
}

/// Drives one user turn to completion against `api`.
pub async fn run_turn(
    session: &mut AssistantSession,
    api: &dyn ConversationApi,
    target: &mut dyn FieldTarget,
    text: &str,
) -> Result<Step, FlowError> {
    let mut request = session.begin_user_turn(text)?;
    loop {
        let step = match api.send(&request).await {
            Ok(reply) => session.handle_reply(reply, target),
            Err(e) => session.handle_error(e),
        };
        match step {
            Step::Continue(next) => request = next,
            finished => return Ok(finished),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use async_trait::async_trait;

    use super::*;
    use crate::assistant::{FieldUpdateRequest, NoFields, Role};
    use crate::loi::{LoiField, LoiForm};

    /// Plays back canned replies and records every request.
    struct Scripted {
        replies: RefCell<VecDeque<Result<AssistantReply, AssistantError>>>,
        requests: RefCell<Vec<AssistantRequest>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<AssistantReply, AssistantError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ConversationApi for Scripted {
        async fn send(&self, request: &AssistantRequest) -> Result<AssistantReply, AssistantError> {
            self.requests.borrow_mut().push(request.clone());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(AssistantError::Transport("script exhausted".into())))
        }
    }

    fn updates(pairs: &[(&str, &str)]) -> Result<AssistantReply, AssistantError> {
        Ok(AssistantReply::FieldUpdates(
            pairs
                .iter()
                .map(|(field, value)| FieldUpdateRequest::new(*field, *value))
                .collect(),
        ))
    }

    fn text(reply: &str) -> Result<AssistantReply, AssistantError> {
        Ok(AssistantReply::Text(reply.to_string()))
    }

    fn session() -> AssistantSession {
        AssistantSession::new("fill the form", Some("Hi!".into()), "Sorry.", 3)
            .with_tool(FieldTool::new(LoiField::assistant_settable_names()))
    }

    #[tokio::test]
    async fn updates_apply_in_order_and_last_write_wins() {
        let api = Scripted::new(vec![
            updates(&[("companyName", "Acme"), ("city", "Jaipur"), ("companyName", "Acme Gems")]),
            text("Done, anything else?"),
        ]);
        let mut form = LoiForm::new();
        let mut session = session();

        let step = run_turn(&mut session, &api, &mut form, "We are Acme Gems in Jaipur").await;
        assert_eq!(step, Ok(Step::Done));
        assert_eq!(form.values().company_name, "Acme Gems");
        assert_eq!(form.values().city, "Jaipur");

        let requests = api.requests.borrow();
        assert_eq!(requests.len(), 2);
        let Some(Message::FieldAcks(acks)) = requests[1].messages.last() else {
            panic!("second request should end with acknowledgments");
        };
        let fields: Vec<&str> = acks.iter().map(|ack| ack.field.as_str()).collect();
        assert_eq!(fields, vec!["companyName", "city", "companyName"]);
        assert!(acks.iter().all(|ack| ack.applied));
    }

    #[tokio::test]
    async fn unknown_field_leaves_form_unchanged_and_reply_still_arrives() {
        let api = Scripted::new(vec![updates(&[("foo", "bar")]), text("Noted.")]);
        let mut form = LoiForm::new();
        let before = form.clone();
        let mut session = session();

        let step = run_turn(&mut session, &api, &mut form, "hello").await;
        assert_eq!(step, Ok(Step::Done));
        assert_eq!(form, before);
        assert_eq!(session.conversation().last(), Some(&Turn::assistant("Noted.")));
        assert!(!session
            .conversation()
            .iter()
            .any(|turn| turn.text.contains("foo")));
    }

    #[tokio::test]
    async fn api_error_appends_one_fallback_and_keeps_applied_updates() {
        let api = Scripted::new(vec![
            updates(&[("phone", "9990001111")]),
            Err(AssistantError::Api {
                status: 503,
                message: "overloaded".into(),
            }),
        ]);
        let mut form = LoiForm::new();
        let mut session = session();

        let step = run_turn(&mut session, &api, &mut form, "my phone is 9990001111").await;
        assert_eq!(step, Ok(Step::Failed));
        assert_eq!(form.values().phone, "9990001111");
        assert!(!session.is_waiting());

        let roles: Vec<Role> = session.conversation().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(session.conversation()[2].text, "Sorry.");
    }

    #[tokio::test]
    async fn tool_loop_is_capped() {
        let api = Scripted::new(vec![
            updates(&[("city", "A")]),
            updates(&[("city", "B")]),
            updates(&[("city", "C")]),
            updates(&[("city", "D")]),
            text("never reached"),
        ]);
        let mut form = LoiForm::new();
        let mut session = session();

        let step = run_turn(&mut session, &api, &mut form, "loop").await;
        assert_eq!(step, Ok(Step::Failed));
        assert_eq!(api.requests.borrow().len(), 4);
        assert_eq!(form.values().city, "C");
        assert_eq!(session.conversation().last().map(|t| t.text.as_str()), Some("Sorry."));
    }

    #[tokio::test]
    async fn failed_turn_is_dropped_from_the_next_request() {
        let api = Scripted::new(vec![
            Err(AssistantError::Transport("offline".into())),
            text("Hello again"),
        ]);
        let mut session = session();
        let mut target = NoFields;

        run_turn(&mut session, &api, &mut target, "first").await.unwrap();
        run_turn(&mut session, &api, &mut target, "second").await.unwrap();

        let requests = api.requests.borrow();
        assert_eq!(requests[1].messages, vec![Message::UserText("second".into())]);
        assert_eq!(session.conversation().len(), 5);
    }

    #[test]
    fn input_is_rejected_while_waiting_or_blank() {
        let mut session = session();
        assert_eq!(session.begin_user_turn("   "), Err(FlowError::EmptyInput));
        session.begin_user_turn("hi").unwrap();
        assert!(session.is_waiting());
        assert_eq!(session.begin_user_turn("again"), Err(FlowError::Busy));
    }

    #[test]
    fn reset_keeps_only_the_greeting() {
        let mut session = session();
        session.begin_user_turn("hi").unwrap();
        session.handle_reply(AssistantReply::Text("hello".into()), &mut NoFields);
        assert_eq!(session.conversation().len(), 3);

        session.reset();
        assert_eq!(session.conversation(), &[Turn::assistant("Hi!")]);
        let request = session.begin_user_turn("new").unwrap();
        assert_eq!(request.messages, vec![Message::UserText("new".into())]);
    }

    #[test]
    fn authorization_request_is_acknowledged_as_rejected() {
        let mut session = session();
        let mut form = LoiForm::new();
        session.begin_user_turn("tick the box").unwrap();
        let step = session.handle_reply(
            AssistantReply::FieldUpdates(vec![FieldUpdateRequest::new("authorization", "true")]),
            &mut form,
        );
        assert!(!form.values().authorization);
        let Step::Continue(request) = step else {
            panic!("expected a follow-up request");
        };
        let Some(Message::FieldAcks(acks)) = request.messages.last() else {
            panic!("expected acknowledgments");
        };
        assert!(!acks[0].applied);
    }
}
