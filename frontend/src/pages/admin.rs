use gembank_core::i18n::keys;
use yew::prelude::*;

use crate::context::i18n::use_i18n;

/// Placeholder until there is a backend to administer.
#[function_component]
pub fn Admin() -> Html {
    let i18n = use_i18n();

    html! {
        <div class="page coming-soon">
            <div class="coming-soon-icon">{"🛠️"}</div>
            <h1>{i18n.t(keys::admin::TITLE)}</h1>
            <p>{i18n.t(keys::admin::COMING_SOON_DESC_1)}</p>
            <p>{i18n.t(keys::admin::COMING_SOON_DESC_2)}</p>
        </div>
    }
}
