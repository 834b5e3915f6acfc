// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Table of known ciphertexts, looked up by reference key.
///
/// Pages usually ship an indexed list and refer to entries by position, so
/// keys are strings such as `"0"`, `"1"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AddressTable", into = "HashMap<String, String>")]
pub struct AddressBook {
    entries: HashMap<String, String>,
}

/// Accepted serialized shapes: a list (indexed from zero) or a map.
#[derive(Deserialize)]
#[serde(untagged)]
enum AddressTable {
    Indexed(Vec<String>),
    Keyed(HashMap<String, String>),
}

impl From<AddressTable> for AddressBook {
    fn from(table: AddressTable) -> Self {
        match table {
            AddressTable::Indexed(list) => AddressBook::from_indexed(list),
            AddressTable::Keyed(map) => AddressBook { entries: map },
        }
    }
}

impl From<AddressBook> for HashMap<String, String> {
    fn from(book: AddressBook) -> Self {
        book.entries
    }
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book keyed by list position.
    pub fn from_indexed<I, S>(ciphertexts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ciphertexts
            .into_iter()
            .enumerate()
            .map(|(index, ciphertext)| (index.to_string(), ciphertext.into()))
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, ciphertext: impl Into<String>) {
        self.entries.insert(key.into(), ciphertext.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Return the ciphertext mapped to `cipher_ref`, or `cipher_ref` itself
    /// when it is not a known key.
    pub fn resolve<'a>(&'a self, cipher_ref: &'a str) -> &'a str {
        self.get(cipher_ref).unwrap_or(cipher_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AddressBook
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_keys_and_passes_through_others() {
        let book = AddressBook::from_indexed(["10 20", "30 40"]);

        assert_eq!(book.resolve("1"), "30 40");
        assert_eq!(book.resolve("2"), "2");
        assert_eq!(book.resolve("5 6 7"), "5 6 7");
    }

    #[test]
    fn deserializes_list_or_map() {
        let list: AddressBook = serde_json::from_str(r#"["1 2", "3 4"]"#).unwrap();
        assert_eq!(list.get("0"), Some("1 2"));
        assert_eq!(list.len(), 2);

        let map: AddressBook = serde_json::from_str(r#"{"webmaster": "5 6"}"#).unwrap();
        assert_eq!(map.resolve("webmaster"), "5 6");
    }

    #[test]
    fn serializes_as_map() {
        let mut book = AddressBook::new();
        book.insert("sales", "9 9");
        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(json, r#"{"sales":"9 9"}"#);
    }
}
