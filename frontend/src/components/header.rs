use gembank_core::i18n::{keys, Language};
use web_sys::MouseEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::i18n::use_i18n;
use crate::Route;

#[function_component]
fn LanguageSwitcher() -> Html {
    let i18n = use_i18n();
    let open = use_state(|| false);

    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };
    let close = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(false))
    };

    html! {
        <div class="language-switcher">
            <button class="language-toggle" onclick={toggle} aria-label={i18n.t(keys::nav::CHANGE_LANGUAGE)}>
                {"🌐 "}{i18n.language().code().to_uppercase()}
            </button>
            if *open {
                <div class="language-menu" onmouseleave={close}>
                    { for Language::ALL.iter().map(|&language| {
                        let onclick = {
                            let i18n = i18n.clone();
                            let open = open.clone();
                            Callback::from(move |_: MouseEvent| {
                                i18n.change_language(language);
                                open.set(false);
                            })
                        };
                        html! {
                            <button
                                class={classes!("language-option", (language == i18n.language()).then(|| "active"))}
                                {onclick}
                            >
                                {language.native_name()}
                            </button>
                        }
                    }) }
                </div>
            }
        </div>
    }
}

#[function_component]
pub fn Header() -> Html {
    let i18n = use_i18n();
    let menu_open = use_state(|| false);
    let location = use_location();

    // Any navigation closes the mobile menu.
    {
        let menu_open = menu_open.clone();
        let path = location.map(|l| l.path().to_string()).unwrap_or_default();
        use_effect_with_deps(
            move |_| {
                menu_open.set(false);
                || ()
            },
            path,
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let links = [
        (Route::Features, keys::nav::FEATURES),
        (Route::About, keys::nav::ABOUT),
        (Route::Tools, keys::nav::TOOLS),
        (Route::Blog, keys::nav::BLOG),
        (Route::Payments, keys::nav::PAYMENTS),
        (Route::Contact, keys::nav::CONTACT),
    ];

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class="top-nav">
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"💎 GEMBank"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu} aria-label={i18n.t(keys::nav::MENU)}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    { for links.into_iter().map(|(route, key)| html! {
                        <Link<Route> to={route} classes="nav-link">
                            {i18n.t(key)}
                        </Link<Route>>
                    }) }
                    <LanguageSwitcher />
                    <Link<Route> to={Route::Auth} classes="nav-link nav-signin">
                        {i18n.t(keys::nav::SIGN_IN)}
                    </Link<Route>>
                    <Link<Route> to={Route::Loi} classes="nav-cta">
                        {i18n.t(keys::nav::APPLY_NOW)}
                    </Link<Route>>
                </div>
            </div>
        </nav>
    }
}
