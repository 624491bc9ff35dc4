//! Parse the `tag='value';` text of a decoded ICY metadata block
//!
//! some reference <https://cast.readme.io/docs/icy#metadata>

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping of metadata tag to value, in the order the tags appeared
///
/// Inserting a already existing tag overwrites the value but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataMap {
    entries: Vec<(String, String)>,
}

impl MetadataMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a tag, returning the previous value if there was one
    pub fn insert(&mut self, tag: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let tag = tag.into();
        let value = value.into();

        if let Some((_, old)) = self.entries.iter_mut().find(|(k, _)| *k == tag) {
            return Some(std::mem::replace(old, value));
        }

        self.entries.push((tag, value));
        None
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == tag)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keep only the entries for which `f` returns `true`
    pub fn retain<F: FnMut(&str, &str) -> bool>(&mut self, mut f: F) {
        self.entries.retain(|(k, v)| f(k, v));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }

        map
    }
}

impl IntoIterator for MetadataMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for MetadataMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    ReadingTag,
    ReadingValue,
}

/// Remove exactly one `'` from each end, if both ends have one
fn unquote(value: &str) -> &str {
    // a single "'" would otherwise be both start and end
    if value.len() >= 2 {
        if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
            return inner;
        }
    }

    value
}

/// Parse decoded ICY metadata text like `StreamTitle='Artist - Title';StreamUrl='';`
///
/// The scan is not aware of quoting: the first `;` after a `=` always ends the value,
/// even if it is inside a quoted value. Anything after the last `;` is dropped.
pub fn parse_metadata(text: &str) -> MetadataMap {
    let mut metadata = MetadataMap::new();

    let mut state = ScanState::ReadingTag;
    let mut tag = String::new();
    let mut value = String::new();

    for ch in text.chars() {
        match (state, ch) {
            (ScanState::ReadingTag, '=') => state = ScanState::ReadingValue,
            (ScanState::ReadingTag, ch) => tag.push(ch),
            (ScanState::ReadingValue, ';') => {
                metadata.insert(std::mem::take(&mut tag), unquote(&value));
                value.clear();
                state = ScanState::ReadingTag;
            }
            (ScanState::ReadingValue, ch) => value.push(ch),
        }
    }

    if !tag.is_empty() || !value.is_empty() {
        trace!("Dropping unterminated metadata segment {tag:?}={value:?}");
    }

    metadata
}
