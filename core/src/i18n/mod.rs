//! Current-language selection and lazily loaded translation tables.

pub mod keys;
mod table;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TranslationError;
use crate::storage::{KeyValueStore, LANGUAGE_KEY};

pub use table::{interpolate, TranslationTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Gu,
}

impl Language {
    pub const DEFAULT: Language = Language::En;
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Gu];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Gu => "gu",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "en" => Some(Language::En),
            "hi" => Some(Language::Hi),
            "gu" => Some(Language::Gu),
            _ => None,
        }
    }

    /// Name shown in the language switcher, in the language itself.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिन्दी",
            Language::Gu => "ગુજરાતી",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where translation files come from (`locales/<code>.json` in the browser).
#[async_trait(?Send)]
pub trait TranslationSource {
    async fn fetch(&self, language: Language) -> Result<Value, TranslationError>;
}

/// Owns the language selection and the per-language table cache.
///
/// Shared by reference between the provider and anything that switches
/// language. Borrows never span an await.
pub struct Localizer {
    source: Rc<dyn TranslationSource>,
    store: Rc<dyn KeyValueStore>,
    cache: RefCell<HashMap<Language, Rc<TranslationTable>>>,
    selected: Cell<Language>,
    active: RefCell<Option<Rc<TranslationTable>>>,
}

impl Localizer {
    /// Restores the persisted choice, or the default language.
    pub fn new(source: Rc<dyn TranslationSource>, store: Rc<dyn KeyValueStore>) -> Self {
        let selected = match store.get(LANGUAGE_KEY) {
            Ok(Some(code)) => Language::from_code(&code).unwrap_or(Language::DEFAULT),
            Ok(None) => Language::DEFAULT,
            Err(e) => {
                log::warn!("could not read stored language: {}", e);
                Language::DEFAULT
            }
        };
        Self {
            source,
            store,
            cache: RefCell::new(HashMap::new()),
            selected: Cell::new(selected),
            active: RefCell::new(None),
        }
    }

    pub fn selected(&self) -> Language {
        self.selected.get()
    }

    /// False until the first table (or the empty fallback) is in place.
    pub fn is_ready(&self) -> bool {
        self.active.borrow().is_some()
    }

    pub fn table(&self) -> Rc<TranslationTable> {
        self.active
            .borrow()
            .clone()
            .unwrap_or_else(|| Rc::new(TranslationTable::empty()))
    }

    pub fn translate(&self, key: &str) -> String {
        match self.active.borrow().as_ref() {
            Some(table) => table.translate(key),
            None => key.to_string(),
        }
    }

    /// Loads the table for the current selection.
    pub async fn initialize(&self) -> Rc<TranslationTable> {
        self.persist(self.selected());
        self.activate(self.selected()).await
    }

    pub async fn change_language(&self, code: &str) -> Result<Rc<TranslationTable>, TranslationError> {
        let language = Language::from_code(code)
            .ok_or_else(|| TranslationError::UnsupportedLanguage(code.to_string()))?;
        self.selected.set(language);
        self.persist(language);
        Ok(self.activate(language).await)
    }

    fn persist(&self, language: Language) {
        if let Err(e) = self.store.set(LANGUAGE_KEY, language.code()) {
            log::warn!("could not persist language '{}': {}", language, e);
        }
    }

    async fn activate(&self, language: Language) -> Rc<TranslationTable> {
        let table = match self.load(language).await {
            Ok(table) => table,
            Err(e) => {
                log::error!("{}", e);
                if language != Language::DEFAULT {
                    match self.load(Language::DEFAULT).await {
                        Ok(table) => table,
                        Err(e) => {
                            log::error!("{}", e);
                            Rc::new(TranslationTable::empty())
                        }
                    }
                } else {
                    Rc::new(TranslationTable::empty())
                }
            }
        };

        // A slower load for an earlier selection must not replace a newer one.
        if self.selected() == language || !self.is_ready() {
            *self.active.borrow_mut() = Some(Rc::clone(&table));
            Rc::clone(&table)
        } else {
            self.table()
        }
    }

    async fn load(&self, language: Language) -> Result<Rc<TranslationTable>, TranslationError> {
        if let Some(table) = self.cache.borrow().get(&language) {
            return Ok(Rc::clone(table));
        }
        let value = self.source.fetch(language).await?;
        let table = TranslationTable::from_json(&value).ok_or_else(|| TranslationError::NotATable {
            language: language.code().to_string(),
        })?;
        let table = Rc::new(table);
        self.cache.borrow_mut().insert(language, Rc::clone(&table));
        log::info!("loaded {} translations for '{}'", table.len(), language);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    /// Serves fixed tables; languages without one fail to load.
    struct FakeSource {
        tables: HashMap<Language, Value>,
        fetches: RefCell<Vec<Language>>,
    }

    impl FakeSource {
        fn new(tables: Vec<(Language, Value)>) -> Rc<Self> {
            Rc::new(Self {
                tables: tables.into_iter().collect(),
                fetches: RefCell::new(Vec::new()),
            })
        }
    }

    #[async_trait(?Send)]
    impl TranslationSource for FakeSource {
        async fn fetch(&self, language: Language) -> Result<Value, TranslationError> {
            self.fetches.borrow_mut().push(language);
            self.tables.get(&language).cloned().ok_or(TranslationError::Fetch {
                language: language.code().to_string(),
                message: "404".to_string(),
            })
        }
    }

    fn english() -> Value {
        json!({ "header": { "features": "Features" } })
    }

    fn hindi() -> Value {
        json!({ "header": { "features": "विशेषताएँ" } })
    }

    #[tokio::test]
    async fn not_ready_until_initialized() {
        let source = FakeSource::new(vec![(Language::En, english())]);
        let localizer = Localizer::new(source, Rc::new(MemoryStore::new()));
        assert!(!localizer.is_ready());
        assert_eq!(localizer.translate("header.features"), "header.features");

        localizer.initialize().await;
        assert!(localizer.is_ready());
        assert_eq!(localizer.translate("header.features"), "Features");
    }

    #[tokio::test]
    async fn change_language_persists_and_caches() {
        let source = FakeSource::new(vec![(Language::En, english()), (Language::Hi, hindi())]);
        let store = Rc::new(MemoryStore::new());
        let localizer = Localizer::new(source.clone(), store.clone());
        localizer.initialize().await;

        localizer.change_language("hi").await.unwrap();
        assert_eq!(localizer.translate("header.features"), "विशेषताएँ");
        assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("hi"));

        localizer.change_language("en").await.unwrap();
        localizer.change_language("hi").await.unwrap();
        assert_eq!(*source.fetches.borrow(), vec![Language::En, Language::Hi]);
    }

    #[tokio::test]
    async fn failed_language_falls_back_to_default_table() {
        let source = FakeSource::new(vec![(Language::En, english())]);
        let localizer = Localizer::new(source, Rc::new(MemoryStore::new()));
        localizer.initialize().await;

        localizer.change_language("gu").await.unwrap();
        assert_eq!(localizer.selected(), Language::Gu);
        assert_eq!(localizer.translate("header.features"), "Features");
    }

    #[tokio::test]
    async fn failed_default_leaves_raw_keys_but_ready() {
        let source = FakeSource::new(vec![]);
        let localizer = Localizer::new(source, Rc::new(MemoryStore::new()));
        localizer.initialize().await;
        assert!(localizer.is_ready());
        assert_eq!(localizer.translate("header.features"), "header.features");
    }

    #[tokio::test]
    async fn stored_preference_is_restored() {
        let store = Rc::new(MemoryStore::new());
        store.set(LANGUAGE_KEY, "hi").unwrap();
        let source = FakeSource::new(vec![(Language::En, english()), (Language::Hi, hindi())]);
        let localizer = Localizer::new(source, store);
        assert_eq!(localizer.selected(), Language::Hi);
        localizer.initialize().await;
        assert_eq!(localizer.translate("header.features"), "विशेषताएँ");
    }

    #[tokio::test]
    async fn unsupported_code_is_rejected_without_changing_selection() {
        let source = FakeSource::new(vec![(Language::En, english())]);
        let localizer = Localizer::new(source, Rc::new(MemoryStore::new()));
        localizer.initialize().await;
        let err = localizer.change_language("fr").await.unwrap_err();
        assert_eq!(err, TranslationError::UnsupportedLanguage("fr".into()));
        assert_eq!(localizer.selected(), Language::En);
    }
}
