use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

/// Translation table keyed by the English source string.
///
/// Lookups fall through to the key itself, so already localised text can be
/// passed through unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct I18n {
    table: HashMap<String, String>,
}

impl I18n {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            table: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Parse a flat JSON object of `"source": "translation"` pairs.
    pub fn from_json(data: &str) -> Result<Self> {
        let table: HashMap<String, String> = serde_json::from_str(data)?;
        Ok(Self { table })
    }

    /// Load a translation file; a missing file yields an empty table.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(data) => Self::from_json(&data),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no translations at {}", path.display());
                Ok(Self::default())
            },
            Err(err) => Err(err.into()),
        }
    }

    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_through_to_key() {
        let i18n = I18n::from_pairs([("Back", "Retour")]);
        assert_eq!(i18n.get("Back"), "Retour");
        assert_eq!(i18n.get("Déjà traduit"), "Déjà traduit");
    }

    #[test]
    fn given_json_object_when_parsed_then_pairs_are_loaded() {
        let i18n = I18n::from_json(r#"{"On": "Ein", "Off": "Aus"}"#)
            .expect("translations should parse");
        assert_eq!(i18n.len(), 2);
        assert_eq!(i18n.get("Off"), "Aus");
    }

    #[test]
    fn given_non_object_json_when_parsed_then_error_is_returned() {
        assert!(I18n::from_json("[1, 2]").is_err());
    }
}
