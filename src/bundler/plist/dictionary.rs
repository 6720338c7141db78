//! Insertion-ordered dictionary backing every Info.plist document.

use super::PlistValue;
use crate::bundler::error::{Error, ErrorExt, Result};
use std::io::Cursor;
use std::path::Path;

/// Ordered string-keyed dictionary.
///
/// Keys are unique. [`put`](Self::put) replaces an existing value in place and
/// appends new keys, and [`remove`](Self::remove) keeps the relative order of
/// the remaining entries. Info.plist documents are small, so a vector of
/// entries with linear lookup is all that is needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedDictionary {
    entries: Vec<(String, PlistValue)>,
}

impl OrderedDictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a property list document (XML or binary) from disk.
    ///
    /// Fails with [`Error::Parse`] when the file is missing, malformed, or its
    /// root object is not a dictionary.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(&bytes).map_err(|reason| Error::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, String> {
        let raw = plist::Value::from_reader(Cursor::new(bytes)).map_err(|e| e.to_string())?;
        match raw {
            plist::Value::Dictionary(dict) => Self::from_raw(dict),
            other => Err(format!(
                "root object is not a dictionary ({})",
                raw_type_name(&other)
            )),
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the value under `key` when it is a string.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PlistValue::as_string)
    }

    /// Inserts or replaces a value.
    ///
    /// An existing key keeps its position; a new key is appended. Returns the
    /// previous value, if any.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<PlistValue>) -> Option<PlistValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes `key`, keeping the order of every other entry.
    pub fn remove(&mut self, key: &str) -> Option<PlistValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns `true` when `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlistValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the document as an XML property list, creating parent directories.
    pub fn save_as_xml(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        plist::Value::Dictionary(self.to_raw()).to_writer_xml(&mut buf)?;
        write_document(path, &buf)
    }

    /// Writes the document as a binary property list, creating parent directories.
    pub fn save_as_binary(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        plist::Value::Dictionary(self.to_raw()).to_writer_binary(&mut buf)?;
        write_document(path, &buf)
    }

    pub(crate) fn from_raw(dict: plist::Dictionary) -> std::result::Result<Self, String> {
        let mut out = Self::new();
        for (key, value) in dict {
            let value = PlistValue::from_raw(value).map_err(|e| format!("{key}: {e}"))?;
            out.put(key, value);
        }
        Ok(out)
    }

    pub(crate) fn to_raw(&self) -> plist::Dictionary {
        let mut dict = plist::Dictionary::new();
        for (key, value) in &self.entries {
            dict.insert(key.clone(), value.to_raw());
        }
        dict
    }
}

impl<K: Into<String>, V: Into<PlistValue>> FromIterator<(K, V)> for OrderedDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (key, value) in iter {
            dict.put(key, value);
        }
        dict
    }
}

impl IntoIterator for OrderedDictionary {
    type Item = (String, PlistValue);
    type IntoIter = std::vec::IntoIter<(String, PlistValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn write_document(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
    }
    std::fs::write(path, bytes).fs_context("writing property list", path)
}

fn raw_type_name(value: &plist::Value) -> &'static str {
    match value {
        plist::Value::Array(_) => "array",
        plist::Value::Boolean(_) => "boolean",
        plist::Value::Data(_) => "data",
        plist::Value::Date(_) => "date",
        plist::Value::Integer(_) | plist::Value::Real(_) => "number",
        plist::Value::String(_) => "string",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrderedDictionary {
        [
            ("CFBundleName", PlistValue::from("Demo")),
            ("CFBundleVersion", PlistValue::from("1.0")),
            ("LSRequiresIPhoneOS", PlistValue::from(true)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_put_existing_key_keeps_position() {
        let mut dict = sample();
        let previous = dict.put("CFBundleName", "Other");
        assert_eq!(previous, Some(PlistValue::from("Demo")));
        assert_eq!(
            dict.keys().collect::<Vec<_>>(),
            ["CFBundleName", "CFBundleVersion", "LSRequiresIPhoneOS"]
        );
        assert_eq!(dict.get_string("CFBundleName"), Some("Other"));
    }

    #[test]
    fn test_put_new_key_appends() {
        let mut dict = sample();
        assert!(dict.put("DTSDKName", "iphoneos17.2").is_none());
        assert_eq!(dict.keys().last(), Some("DTSDKName"));
        assert_eq!(dict.len(), 4);
    }

    #[test]
    fn test_remove_preserves_order_of_remaining_keys() {
        let mut dict = sample();
        dict.remove("CFBundleName");
        assert_eq!(
            dict.keys().collect::<Vec<_>>(),
            ["CFBundleVersion", "LSRequiresIPhoneOS"]
        );
        assert!(dict.remove("missing").is_none());
    }

    #[test]
    fn test_xml_round_trip_keeps_nested_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/Info.plist");

        let mut inner = OrderedDictionary::new();
        inner.put("zeta", 1i64);
        inner.put("alpha", PlistValue::Array(vec!["b".into(), "a".into()]));
        let mut dict = sample();
        dict.put("UIApplicationSceneManifest", inner);
        dict.put("Payload", PlistValue::Data(vec![0, 1, 2]));
        dict.put("Ratio", 0.5f64);

        dict.save_as_xml(&path).unwrap();
        let reopened = OrderedDictionary::open(&path).unwrap();
        assert_eq!(reopened, dict);
        let nested = reopened
            .get("UIApplicationSceneManifest")
            .and_then(PlistValue::as_dictionary)
            .unwrap();
        assert_eq!(nested.keys().collect::<Vec<_>>(), ["zeta", "alpha"]);
    }

    #[test]
    fn test_binary_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Info.plist");
        let mut dict = sample();
        dict.put(
            "CFBundleSupportedPlatforms",
            PlistValue::Array(vec!["iPhoneOS".into()]),
        );
        dict.save_as_binary(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"bplist00"));
        assert_eq!(OrderedDictionary::open(&path).unwrap(), dict);
    }

    #[test]
    fn test_open_missing_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = OrderedDictionary::open(&dir.path().join("absent.plist")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_open_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.plist");
        std::fs::write(&path, "<plist><dict><key>oops").unwrap();
        let err = OrderedDictionary::open(&path).unwrap_err();
        assert!(err.to_string().contains("broken.plist"));
    }

    #[test]
    fn test_open_non_dictionary_root_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("array.plist");
        plist::Value::Array(vec![plist::Value::Boolean(true)])
            .to_file_xml(&path)
            .unwrap();
        match OrderedDictionary::open(&path).unwrap_err() {
            Error::Parse { reason, .. } => assert!(reason.contains("array")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
