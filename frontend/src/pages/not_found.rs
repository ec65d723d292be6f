use gembank_core::i18n::keys;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::i18n::use_i18n;
use crate::Route;

#[function_component]
pub fn NotFound() -> Html {
    let i18n = use_i18n();

    html! {
        <div class="page not-found">
            <h1>{i18n.t(keys::not_found::TITLE)}</h1>
            <p>{i18n.t(keys::not_found::BODY)}</p>
            <Link<Route> to={Route::Home} classes="primary-button">
                {i18n.t(keys::not_found::BACK_HOME)}
            </Link<Route>>
        </div>
    }
}
