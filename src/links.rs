//! Link keys and the registry of keys already in use.
//!
//! An entry that links an item carries a `link:link` child whose
//! `rdf:resource` attribute holds a key of the form `#item_<N>`. The registry
//! collects every key in a document so new attachments can mint keys that
//! collide with nothing.

use crate::namespaces::Namespaces;
use crate::xml::Element;
use crate::{AttachError, Result};

/// The key an entry's `link:link` child points at, if the entry has one.
///
/// # Errors
///
/// Returns [`AttachError::MalformedEntry`] for a `link:link` child without an
/// `rdf:resource` attribute.
pub fn link_key(entry: &Element, ns: &Namespaces) -> Result<Option<String>> {
    let Some(link) = entry.find_child(ns, "link", "link") else {
        return Ok(None);
    };
    let key = link.attr(ns, "rdf", "resource").ok_or_else(|| {
        AttachError::MalformedEntry(format!("link:link in {} has no rdf:resource", entry.name()))
    })?;
    Ok(Some(key.to_string()))
}

/// The integer after the last `_` of a `#item_<N>` key.
fn key_number(key: &str) -> Result<u64> {
    key.rsplit('_')
        .next()
        .unwrap_or(key)
        .parse()
        .map_err(|_| AttachError::InvalidLinkKey(key.to_string()))
}

/// The link key numbers one document already uses.
///
/// The registry is owned by a single rewrite pass: it is scanned from the
/// document's entries up front, then handed to the attachment step, which
/// records each key it mints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkRegistry {
    keys: Vec<u64>,
}

impl LinkRegistry {
    /// Collects the key of every entry that already links an item.
    ///
    /// # Errors
    ///
    /// Fails on a `link:link` without `rdf:resource` or a key whose tail is
    /// not an integer that fits `u64`.
    pub fn scan<'a, I>(entries: I, ns: &Namespaces) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let mut registry = LinkRegistry::default();
        for entry in entries {
            if let Some(key) = link_key(entry, ns)? {
                registry.record(key_number(&key)?);
            }
        }
        Ok(registry)
    }

    /// The next key number nothing uses yet.
    ///
    /// One past the highest recorded key; an empty registry starts at 1.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::LinkKeysExhausted`] when the highest recorded
    /// key is already the largest representable number, since minting past it
    /// would reuse or wrap a key.
    pub fn next_key(&self) -> Result<u64> {
        let Some(&max) = self.keys.iter().max() else {
            return Ok(1);
        };
        max.checked_add(1)
            .ok_or(AttachError::LinkKeysExhausted(max))
    }

    /// Marks a key number as used.
    pub fn record(&mut self, key: u64) {
        self.keys.push(key);
    }

    /// How many keys have been recorded, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
