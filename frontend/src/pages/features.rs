use gembank_core::i18n::keys;
use yew::prelude::*;

use crate::context::i18n::use_i18n;

#[function_component]
pub fn Features() -> Html {
    let i18n = use_i18n();
    let features = [
        ("🏦", keys::features::CREDIT_TITLE, keys::features::CREDIT_BODY),
        ("💸", keys::features::PAYMENTS_TITLE, keys::features::PAYMENTS_BODY),
        ("📦", keys::features::INVENTORY_TITLE, keys::features::INVENTORY_BODY),
        ("📑", keys::features::COMPLIANCE_TITLE, keys::features::COMPLIANCE_BODY),
    ];

    html! {
        <div class="page">
            <header class="page-header">
                <h1>{i18n.t(keys::features::TITLE)}</h1>
                <p>{i18n.t(keys::features::SUBTITLE)}</p>
            </header>
            <div class="feature-grid">
                { for features.into_iter().map(|(icon, title, body)| html! {
                    <div class="feature-card">
                        <div class="feature-icon">{icon}</div>
                        <h3>{i18n.t(title)}</h3>
                        <p>{i18n.t(body)}</p>
                    </div>
                }) }
            </div>
        </div>
    }
}
