use chrono::{Datelike, Utc};
use gembank_core::i18n::keys;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::i18n::use_i18n;
use crate::Route;

#[function_component]
pub fn Footer() -> Html {
    let i18n = use_i18n();
    let year = Utc::now().year().to_string();

    html! {
        <footer class="site-footer">
            <div class="footer-content">
                <div class="footer-brand">
                    <span class="nav-logo">{"💎 GEMBank"}</span>
                    <p>{i18n.t(keys::footer::TAGLINE)}</p>
                </div>
                <div class="footer-column">
                    <h4>{i18n.t(keys::footer::PRODUCT)}</h4>
                    <Link<Route> to={Route::Features}>{i18n.t(keys::nav::FEATURES)}</Link<Route>>
                    <Link<Route> to={Route::Tools}>{i18n.t(keys::nav::TOOLS)}</Link<Route>>
                    <Link<Route> to={Route::Payments}>{i18n.t(keys::nav::PAYMENTS)}</Link<Route>>
                    <Link<Route> to={Route::Loi}>{i18n.t(keys::nav::APPLY_NOW)}</Link<Route>>
                </div>
                <div class="footer-column">
                    <h4>{i18n.t(keys::footer::COMPANY)}</h4>
                    <Link<Route> to={Route::About}>{i18n.t(keys::nav::ABOUT)}</Link<Route>>
                    <Link<Route> to={Route::Blog}>{i18n.t(keys::nav::BLOG)}</Link<Route>>
                    <Link<Route> to={Route::Contact}>{i18n.t(keys::nav::CONTACT)}</Link<Route>>
                </div>
            </div>
            <p class="footer-rights">{i18n.t_with(keys::footer::RIGHTS, &[("year", &year)])}</p>
        </footer>
    }
}
