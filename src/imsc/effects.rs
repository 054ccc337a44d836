/*!
 * Effect string codec.
 *
 * A paragraph's effect string is a flat `key=value|key=value` list that
 * carries attributes the format-agnostic paragraph model has no field
 * for. Decoding is lenient: an entry that is not exactly one non-empty
 * key and one non-empty value is skipped.
 */

use log::debug;

/// Separator between entries
pub const ENTRY_SEPARATOR: char = '|';

/// Separator between key and value
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Insertion-ordered attribute map
///
/// Re-inserting an existing key replaces its value in place, so the
/// last occurrence of a key wins while the first occurrence fixes the
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectMap {
    entries: Vec<(String, String)>,
}

impl EffectMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value stored for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes an entry, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EffectMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = EffectMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Decodes an effect string into an ordered map
pub fn decode(effect: &str) -> EffectMap {
    let mut map = EffectMap::new();

    for entry in effect.split(ENTRY_SEPARATOR) {
        let parts: Vec<&str> = entry.split(KEY_VALUE_SEPARATOR).collect();
        match parts.as_slice() {
            [key, value] if !key.is_empty() && !value.is_empty() => map.insert(*key, *value),
            _ => {
                if !entry.is_empty() {
                    debug!("Dropping malformed effect entry '{}'", entry);
                }
            }
        }
    }

    map
}

/// Encodes a map back into the `key=value|...` form
pub fn encode(map: &EffectMap) -> String {
    map.iter()
        .map(|(k, v)| format!("{}{}{}", k, KEY_VALUE_SEPARATOR, v))
        .collect::<Vec<_>>()
        .join(&ENTRY_SEPARATOR.to_string())
}
