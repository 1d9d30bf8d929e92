//! Typed, JSON-backed option values.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::context::TextScrollSpeed;
use crate::error::{Error, Result};

/// Option key for the marquee speed shared by all scrolling text.
pub const TEXT_SCROLL_SPEED: &str = "text_scroll_speed";

/// How an [`OptionStore`] was populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Missing,
    Invalid(String),
}

/// Boolean option with a default used until a value is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionBool {
    key: String,
    default: bool,
}

impl OptionBool {
    pub fn new(key: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.into(),
            default,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Integer option with a default used until a value is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLong {
    key: String,
    default: i64,
}

impl OptionLong {
    pub fn new(key: impl Into<String>, default: i64) -> Self {
        Self {
            key: key.into(),
            default,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Flat key/value option storage.
///
/// Stores opened from a file write every change back to it; in-memory stores
/// only keep values for the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionStore {
    path: Option<PathBuf>,
    values: Map<String, Value>,
}

impl OptionStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `path`. Missing or unparsable files start empty and
    /// report it through [`LoadStatus`]; other I/O failures are errors.
    pub fn open(path: impl Into<PathBuf>) -> Result<(Self, LoadStatus)> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let store = Self {
                    path: Some(path),
                    values: Map::new(),
                };
                return Ok((store, LoadStatus::Missing));
            },
            Err(err) => return Err(err.into()),
        };

        let (values, status) = match serde_json::from_str::<Value>(&data) {
            Ok(Value::Object(values)) => (values, LoadStatus::Loaded),
            Ok(other) => (
                Map::new(),
                LoadStatus::Invalid(format!(
                    "expected an object, found {}",
                    value_kind(&other)
                )),
            ),
            Err(err) => (Map::new(), LoadStatus::Invalid(format!("{err}"))),
        };

        Ok((
            Self {
                path: Some(path),
                values,
            },
            status,
        ))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn read_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(other) => Err(type_error(key, "bool", other)),
        }
    }

    pub fn read_long(&self, key: &str) -> Result<Option<i64>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => match value.as_i64() {
                Some(number) => Ok(Some(number)),
                None => Err(type_error(key, "integer", value)),
            },
        }
    }

    /// Stored value, or the default when absent or of the wrong type.
    pub fn get_bool(&self, option: &OptionBool) -> bool {
        match self.read_bool(&option.key) {
            Ok(value) => value.unwrap_or(option.default),
            Err(err) => {
                log::warn!("{err}");
                option.default
            },
        }
    }

    pub fn get_long(&self, option: &OptionLong) -> i64 {
        match self.read_long(&option.key) {
            Ok(value) => value.unwrap_or(option.default),
            Err(err) => {
                log::warn!("{err}");
                option.default
            },
        }
    }

    /// Store `value` and persist the store when it is file backed.
    pub fn set_bool(&mut self, option: &OptionBool, value: bool) -> Result<()> {
        self.values.insert(option.key.clone(), Value::Bool(value));
        self.save()
    }

    pub fn set_long(&mut self, option: &OptionLong, value: i64) -> Result<()> {
        self.values.insert(option.key.clone(), Value::from(value));
        self.save()
    }

    pub fn text_scroll_speed(&self) -> TextScrollSpeed {
        let option = OptionLong::new(
            TEXT_SCROLL_SPEED,
            TextScrollSpeed::default().index(),
        );
        TextScrollSpeed::from_index(self.get_long(&option))
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let payload = serde_json::to_string_pretty(&self.values)?;
        write_atomic(path, payload.as_bytes())?;
        Ok(())
    }
}

/// `$HOME/.config/nxui`, or a directory under the temp dir without `HOME`.
pub fn default_config_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home).join(".config").join("nxui");
    }

    std::env::temp_dir().join("nxui")
}

fn write_atomic(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}

fn type_error(key: &str, expected: &'static str, found: &Value) -> Error {
    Error::OptionType {
        key: key.to_string(),
        expected,
        found: value_kind(found),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[test]
    fn given_saved_store_when_reopened_then_values_round_trip() {
        let root = test_temp_dir("round_trip");
        let path = root.join("options.json");
        let wifi = OptionBool::new("wifi", false);
        let speed = OptionLong::new(TEXT_SCROLL_SPEED, 1);

        let (mut store, status) =
            OptionStore::open(&path).expect("store should open");
        assert_eq!(status, LoadStatus::Missing);
        store.set_bool(&wifi, true).expect("bool should persist");
        store.set_long(&speed, 2).expect("long should persist");

        let (reopened, status) =
            OptionStore::open(&path).expect("store should reopen");
        assert_eq!(status, LoadStatus::Loaded);
        assert!(reopened.get_bool(&wifi));
        assert_eq!(reopened.text_scroll_speed(), TextScrollSpeed::Fast);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_invalid_json_when_opened_then_store_is_empty_with_invalid_status() {
        let root = test_temp_dir("invalid_json");
        let path = root.join("options.json");
        fs::write(&path, "{ not json").expect("payload should be written");

        let (store, status) =
            OptionStore::open(&path).expect("invalid json is not an io error");

        assert!(matches!(status, LoadStatus::Invalid(ref msg) if !msg.is_empty()));
        assert!(store.get_bool(&OptionBool::new("wifi", true)));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_value_of_wrong_type_when_read_then_default_is_used() {
        let mut store = OptionStore::in_memory();
        let option = OptionLong::new("volume", 3);
        store
            .set_long(&option, 9)
            .expect("in-memory store never fails");

        assert!(matches!(
            store.read_bool("volume"),
            Err(Error::OptionType { expected: "bool", .. })
        ));
        assert!(store.get_bool(&OptionBool::new("volume", true)));
        assert_eq!(store.get_long(&option), 9);
    }

    fn test_temp_dir(test_name: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "nxui-options-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir)
            .expect("temporary directory should be created");
        dir
    }
}
