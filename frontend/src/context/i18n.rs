//! Language context. Children are not rendered until the first table has
//! loaded (or failed to, in which case raw keys show).

use std::rc::Rc;

use gembank_core::i18n::{interpolate, Language, Localizer, TranslationTable};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config;
use crate::services::locales::FetchLocales;
use crate::services::storage::local_store;

#[derive(Clone)]
pub struct I18n {
    table: Rc<TranslationTable>,
    language: Language,
    change: Callback<Language>,
}

impl PartialEq for I18n {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.table, &other.table) && self.language == other.language
    }
}

/// Used outside a provider: every lookup returns its key.
impl Default for I18n {
    fn default() -> Self {
        Self {
            table: Rc::new(TranslationTable::empty()),
            language: Language::DEFAULT,
            change: Callback::from(|language: Language| {
                log::warn!("language change to {} outside the provider", language)
            }),
        }
    }
}

impl I18n {
    pub fn t(&self, key: &str) -> String {
        self.table.translate(key)
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(&self.table.translate(key), args)
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn change_language(&self, language: Language) {
        self.change.emit(language);
    }
}

#[hook]
pub fn use_i18n() -> I18n {
    use_context::<I18n>().unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct I18nProviderProps {
    pub children: Children,
}

fn set_document_language(language: Language) {
    if let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    {
        let _ = root.set_attribute("lang", language.code());
    }
}

#[function_component]
pub fn I18nProvider(props: &I18nProviderProps) -> Html {
    let localizer = use_memo(
        |_| {
            Localizer::new(
                Rc::new(FetchLocales::new(config::get_locales_url())),
                local_store(),
            )
        },
        (),
    );
    let table = use_state(|| None::<Rc<TranslationTable>>);
    let language = use_state(|| localizer.selected());

    {
        let localizer = localizer.clone();
        let table = table.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let loaded = localizer.initialize().await;
                    table.set(Some(loaded));
                });
                || ()
            },
            (),
        );
    }

    use_effect_with_deps(
        |language| {
            set_document_language(**language);
            || ()
        },
        language.clone(),
    );

    let change = {
        let localizer = localizer.clone();
        let table = table.clone();
        let language = language.clone();
        Callback::from(move |next: Language| {
            let localizer = localizer.clone();
            let table = table.clone();
            let language = language.clone();
            spawn_local(async move {
                match localizer.change_language(next.code()).await {
                    Ok(loaded) => {
                        language.set(localizer.selected());
                        table.set(Some(loaded));
                    }
                    Err(e) => log::error!("{}", e),
                }
            });
        })
    };

    match &*table {
        Some(table) => {
            let context = I18n {
                table: Rc::clone(table),
                language: *language,
                change,
            };
            html! {
                <ContextProvider<I18n> {context}>
                    { props.children.clone() }
                </ContextProvider<I18n>>
            }
        }
        None => html! {
            <div class="app-loading">
                <div class="loading-spinner"></div>
            </div>
        },
    }
}
