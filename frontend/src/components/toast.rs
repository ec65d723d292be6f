use gembank_core::notice::{Notice, Severity};
use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::context::notices::{use_notices, Notices};

#[derive(Properties, PartialEq)]
struct ToastProps {
    notice: Notice,
    notices: Notices,
}

fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Error => "⚠",
        Severity::Info => "ℹ",
    }
}

#[function_component]
fn Toast(props: &ToastProps) -> Html {
    let ToastProps { notice, notices } = props;

    // Unmounting (dismissal) drops the timer with it.
    {
        let notices = notices.clone();
        let id = notice.id;
        use_effect_with_deps(
            move |_| {
                let wait = notices.time_left(id).unwrap_or_default();
                let millis = u32::try_from(wait.as_millis()).unwrap_or(u32::MAX);
                let timeout = Timeout::new(millis, move || notices.expire());
                move || drop(timeout)
            },
            id,
        );
    }

    let dismiss = {
        let notices = notices.clone();
        let id = notice.id;
        Callback::from(move |_: MouseEvent| notices.dismiss(id))
    };

    html! {
        <div class={classes!("toast", format!("toast-{}", notice.severity.as_str()))} role="status">
            <div class="toast-icon">{icon(notice.severity)}</div>
            <div class="toast-body">
                <h4>{&notice.title}</h4>
                <p>{&notice.message}</p>
            </div>
            <button class="toast-close" onclick={dismiss}>{"✕"}</button>
        </div>
    }
}

#[function_component]
pub fn ToastContainer() -> Html {
    let notices = use_notices();

    html! {
        <div class="toast-container">
            { for notices.list().into_iter().map(|notice| html! {
                <Toast key={notice.id.to_string()} notice={notice.clone()} notices={notices.clone()} />
            }) }
        </div>
    }
}
