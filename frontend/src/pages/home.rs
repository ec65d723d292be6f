use gembank_core::i18n::keys;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::i18n::use_i18n;
use crate::Route;

#[function_component]
pub fn Home() -> Html {
    let i18n = use_i18n();
    let pillars = [
        ("💳", keys::home::PILLAR_CREDIT_TITLE, keys::home::PILLAR_CREDIT_BODY),
        ("⚡", keys::home::PILLAR_PAYMENTS_TITLE, keys::home::PILLAR_PAYMENTS_BODY),
        ("🛡️", keys::home::PILLAR_COMPLIANCE_TITLE, keys::home::PILLAR_COMPLIANCE_BODY),
    ];

    html! {
        <div class="landing-page">
            <section class="hero">
                <h1>{i18n.t(keys::home::HERO_TITLE)}</h1>
                <p class="hero-subtitle">{i18n.t(keys::home::HERO_SUBTITLE)}</p>
                <div class="hero-actions">
                    <Link<Route> to={Route::Loi} classes="primary-button">
                        {i18n.t(keys::home::CTA_PRIMARY)}
                    </Link<Route>>
                    <Link<Route> to={Route::Features} classes="secondary-button">
                        {i18n.t(keys::home::CTA_SECONDARY)}
                    </Link<Route>>
                </div>
            </section>

            <section class="problem-section">
                <h2>{i18n.t(keys::home::PROBLEM_TITLE)}</h2>
                <p>{i18n.t(keys::home::PROBLEM_BODY)}</p>
            </section>

            <section class="pillars">
                { for pillars.into_iter().map(|(icon, title, body)| html! {
                    <div class="pillar-card">
                        <div class="pillar-icon">{icon}</div>
                        <h3>{i18n.t(title)}</h3>
                        <p>{i18n.t(body)}</p>
                    </div>
                }) }
            </section>

            <section class="final-cta">
                <h2>{i18n.t(keys::home::FINAL_CTA_TITLE)}</h2>
                <p>{i18n.t(keys::home::FINAL_CTA_BODY)}</p>
                <Link<Route> to={Route::Loi} classes="primary-button">
                    {i18n.t(keys::nav::APPLY_NOW)}
                </Link<Route>>
            </section>
        </div>
    }
}
