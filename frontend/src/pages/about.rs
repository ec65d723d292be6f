use gembank_core::i18n::keys;
use yew::prelude::*;

use crate::context::i18n::use_i18n;

#[function_component]
pub fn About() -> Html {
    let i18n = use_i18n();
    let sections = [
        (keys::about::MISSION_TITLE, keys::about::MISSION_BODY),
        (keys::about::VISION_TITLE, keys::about::VISION_BODY),
        (keys::about::TEAM_TITLE, keys::about::TEAM_BODY),
    ];

    html! {
        <div class="page">
            <header class="page-header">
                <h1>{i18n.t(keys::about::TITLE)}</h1>
            </header>
            { for sections.into_iter().map(|(title, body)| html! {
                <section class="about-section">
                    <h2>{i18n.t(title)}</h2>
                    <p>{i18n.t(body)}</p>
                </section>
            }) }
        </div>
    }
}
