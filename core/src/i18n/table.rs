use std::collections::HashMap;

use serde_json::Value;

/// A translation file flattened to `"section.key" -> text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Flattens a nested JSON object. Returns `None` when the root is not an object.
    pub fn from_json(value: &Value) -> Option<Self> {
        let root = value.as_object()?;
        let mut entries = HashMap::new();
        for (key, child) in root {
            flatten_into(&mut entries, key.clone(), child);
        }
        Some(Self { entries })
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Looks up `key`, falling back to the key itself.
    pub fn translate(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_string()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten_into(entries: &mut HashMap<String, String>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(entries, format!("{prefix}.{key}"), child);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(entries, format!("{prefix}.{index}"), child);
            }
        }
        Value::String(text) => {
            entries.insert(prefix, text.clone());
        }
        Value::Number(n) => {
            entries.insert(prefix, n.to_string());
        }
        Value::Bool(b) => {
            entries.insert(prefix, b.to_string());
        }
        Value::Null => {}
    }
}

/// Replaces `{name}` placeholders. Unknown placeholders are left as written.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_flatten_to_dotted_keys() {
        let table = TranslationTable::from_json(&json!({
            "header": { "features": "Features", "cta": { "apply": "Apply" } },
            "steps": ["one", "two"],
            "count": 3
        }))
        .unwrap();

        assert_eq!(table.get("header.features"), Some("Features"));
        assert_eq!(table.get("header.cta.apply"), Some("Apply"));
        assert_eq!(table.get("steps.1"), Some("two"));
        assert_eq!(table.get("count"), Some("3"));
    }

    #[test]
    fn missing_or_partial_paths_return_the_key() {
        let table = TranslationTable::from_json(&json!({ "header": { "features": "Features" } })).unwrap();
        assert_eq!(table.translate("header.missing"), "header.missing");
        assert_eq!(table.translate("nope.at.all"), "nope.at.all");
        // A section is not a leaf.
        assert_eq!(table.translate("header"), "header");
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let table = TranslationTable::from_pairs([("a.b", "")]);
        assert_eq!(table.translate("a.b"), "a.b");
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(TranslationTable::from_json(&json!(["x"])).is_none());
    }

    #[test]
    fn interpolate_fills_named_placeholders() {
        assert_eq!(
            interpolate("Reset link sent to {email}.", &[("email", "a@acme.test")]),
            "Reset link sent to a@acme.test."
        );
        assert_eq!(interpolate("Hi {name}", &[]), "Hi {name}");
    }
}
