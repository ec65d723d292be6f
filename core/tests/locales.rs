use gembank_core::assistant::FieldTarget;
use gembank_core::i18n::{keys, Language, TranslationTable};
use gembank_core::loi::{BusinessType, InterestLevel, LocalizedForm, LoiForm, TurnoverBracket};
use serde_json::Value;

fn shipped(language: Language) -> &'static str {
    match language {
        Language::En => include_str!("../locales/en.json"),
        Language::Hi => include_str!("../locales/hi.json"),
        Language::Gu => include_str!("../locales/gu.json"),
    }
}

fn table(language: Language) -> TranslationTable {
    let value: Value = serde_json::from_str(shipped(language))
        .unwrap_or_else(|e| panic!("locales/{}.json is not valid JSON: {}", language, e));
    TranslationTable::from_json(&value)
        .unwrap_or_else(|| panic!("locales/{}.json is not an object", language))
}

#[test]
fn every_registered_key_is_translated_in_every_language() {
    for language in Language::ALL {
        let table = table(language);
        let missing: Vec<&str> = keys::ALL
            .iter()
            .copied()
            .filter(|key| table.get(key).is_none())
            .collect();
        assert!(missing.is_empty(), "{} is missing {:?}", language, missing);
    }
}

#[test]
fn locale_files_carry_no_unregistered_keys() {
    for language in Language::ALL {
        let table = table(language);
        let mut extra: Vec<&str> = table.keys().filter(|key| !keys::ALL.contains(key)).collect();
        extra.sort_unstable();
        assert!(extra.is_empty(), "{} has unregistered keys {:?}", language, extra);
    }
}

#[test]
fn placeholders_survive_translation() {
    let placeholders = [
        (keys::toasts::PASSWORD_RESET_MESSAGE, "{email}"),
        (keys::payments::PAYMENT_SUCCESS_MESSAGE, "{paymentMethodId}"),
        (keys::auth::OTP_SENT_TO, "{phone}"),
        (keys::footer::RIGHTS, "{year}"),
        (keys::blog::BY, "{author}"),
    ];
    for language in Language::ALL {
        let table = table(language);
        for (key, placeholder) in placeholders {
            let text = table.translate(key);
            assert!(
                text.contains(placeholder),
                "{} {} lost {}",
                language,
                key,
                placeholder
            );
        }
    }
}

#[test]
fn assistant_can_choose_every_option_by_its_shown_label() {
    for language in Language::ALL {
        let table = table(language);
        let mut form = LoiForm::new();
        for kind in BusinessType::ALL {
            let label = table.translate(kind.label_key());
            LocalizedForm::new(&mut form, &table)
                .apply_update("businessType", &label)
                .unwrap_or_else(|e| panic!("{} rejected {:?}: {}", language, label, e));
            assert_eq!(form.values().business_type, kind, "{} {:?}", language, label);
        }
        for bracket in TurnoverBracket::ALL {
            let label = table.translate(bracket.label_key());
            LocalizedForm::new(&mut form, &table)
                .apply_update("turnover", &label)
                .unwrap_or_else(|e| panic!("{} rejected {:?}: {}", language, label, e));
            assert_eq!(form.values().turnover, bracket, "{} {:?}", language, label);
        }
        for level in InterestLevel::all() {
            let label = table.translate(level.label_key());
            LocalizedForm::new(&mut form, &table)
                .apply_update("interestLevel", &label)
                .unwrap_or_else(|e| panic!("{} rejected {:?}: {}", language, label, e));
            assert_eq!(form.values().interest_level, level, "{} {:?}", language, label);
        }
    }
}
