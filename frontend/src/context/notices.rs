//! Notice board shared through context. Toasts schedule their own expiry
//! from `time_left`, so a dismissed notice takes its timer with it.

use std::rc::Rc;
use std::time::Duration;

use gembank_core::clock::{Clock, SystemClock};
use gembank_core::notice::{Notice, NoticeBoard, NoticeId, Severity};
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoticeState {
    board: NoticeBoard,
}

pub enum NoticeAction {
    Raise {
        title: String,
        message: String,
        severity: Severity,
    },
    Dismiss(NoticeId),
    Expire,
}

impl Reducible for NoticeState {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut board = self.board.clone();
        match action {
            NoticeAction::Raise {
                title,
                message,
                severity,
            } => {
                board.add(title, message, severity, SystemClock.now());
            }
            NoticeAction::Dismiss(id) => {
                if !board.remove(id) {
                    return self;
                }
            }
            NoticeAction::Expire => {
                if board.expire(SystemClock.now()).is_empty() {
                    return self;
                }
            }
        }
        Rc::new(Self { board })
    }
}

pub type NoticeContext = UseReducerHandle<NoticeState>;

/// Handle for raising and reading notices.
#[derive(Clone, PartialEq)]
pub struct Notices {
    handle: Option<NoticeContext>,
}

impl Notices {
    /// For struct components, which read context through their scope.
    pub fn from_context(handle: Option<NoticeContext>) -> Self {
        Self { handle }
    }

    pub fn raise(&self, title: String, message: String, severity: Severity) {
        match &self.handle {
            Some(handle) => handle.dispatch(NoticeAction::Raise {
                title,
                message,
                severity,
            }),
            None => log::warn!("notice '{}' raised outside the provider", title),
        }
    }

    pub fn success(&self, title: String, message: String) {
        self.raise(title, message, Severity::Success);
    }

    pub fn error(&self, title: String, message: String) {
        self.raise(title, message, Severity::Error);
    }

    pub fn info(&self, title: String, message: String) {
        self.raise(title, message, Severity::Info);
    }

    pub fn dismiss(&self, id: NoticeId) {
        if let Some(handle) = &self.handle {
            handle.dispatch(NoticeAction::Dismiss(id));
        }
    }

    pub fn expire(&self) {
        if let Some(handle) = &self.handle {
            handle.dispatch(NoticeAction::Expire);
        }
    }

    pub fn list(&self) -> Vec<Notice> {
        self.handle
            .as_ref()
            .map(|handle| handle.board.notices().to_vec())
            .unwrap_or_default()
    }

    pub fn time_left(&self, id: NoticeId) -> Option<Duration> {
        self.handle
            .as_ref()
            .and_then(|handle| handle.board.time_left(id, SystemClock.now()))
    }
}

#[hook]
pub fn use_notices() -> Notices {
    Notices::from_context(use_context::<NoticeContext>())
}

#[derive(Properties, PartialEq)]
pub struct NoticeProviderProps {
    pub children: Children,
}

#[function_component]
pub fn NoticeProvider(props: &NoticeProviderProps) -> Html {
    let notices = use_reducer(NoticeState::default);

    html! {
        <ContextProvider<NoticeContext> context={notices}>
            { props.children.clone() }
        </ContextProvider<NoticeContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raise(state: Rc<NoticeState>, title: &str) -> Rc<NoticeState> {
        state.reduce(NoticeAction::Raise {
            title: title.to_string(),
            message: String::new(),
            severity: Severity::Info,
        })
    }

    #[test]
    fn raise_then_dismiss() {
        let state = raise(Rc::new(NoticeState::default()), "Saved");
        assert_eq!(state.board.len(), 1);
        let id = state.board.notices()[0].id;

        let state = state.reduce(NoticeAction::Dismiss(id));
        assert!(state.board.is_empty());
    }

    #[test]
    fn repeated_dismiss_keeps_the_same_state() {
        let state = raise(Rc::new(NoticeState::default()), "Saved");
        let id = state.board.notices()[0].id;
        let state = state.reduce(NoticeAction::Dismiss(id));
        let again = Rc::clone(&state).reduce(NoticeAction::Dismiss(id));
        assert!(Rc::ptr_eq(&state, &again));
    }

    #[test]
    fn fresh_notices_survive_an_expiry_pass() {
        let state = raise(Rc::new(NoticeState::default()), "Saved");
        let after = Rc::clone(&state).reduce(NoticeAction::Expire);
        assert!(Rc::ptr_eq(&state, &after));
    }
}
