//! The namespace table read from a document's root element.
//!
//! A usable export declares at least these prefixes on its root:
//!
//! | Prefix | URI                                          |
//! |--------|----------------------------------------------|
//! | `rdf`  | `http://www.w3.org/1999/02/22-rdf-syntax-ns#`|
//! | `z`    | `http://www.zotero.org/namespaces/export#`   |
//! | `dc`   | `http://purl.org/dc/elements/1.1/`           |
//! | `bib`  | `http://purl.org/net/biblio#`                |
//! | `foaf` | `http://xmlns.com/foaf/0.1/`                 |
//! | `link` | `http://purl.org/rss/1.0/modules/link/`      |
//!
//! Additional declarations (`dcterms`, `prism`, `vcard`, ...) are carried along
//! but never required.

use crate::xml::Element;
use crate::{AttachError, Result};
use std::collections::HashMap;

/// The prefixes a document must declare before rewriting can start.
const REQUIRED_PREFIXES: [&str; 6] = ["rdf", "bib", "foaf", "dc", "z", "link"];

/// Immutable prefix-to-URI table for one document.
///
/// Built once per document by [`Namespaces::from_root`], which fails up front
/// when a required prefix is missing, so later lookups for those prefixes
/// always succeed.
#[derive(Debug, Clone)]
pub struct Namespaces {
    uris: HashMap<String, String>,
}

impl Namespaces {
    /// Collects the `xmlns` declarations from a document's root element.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::MissingNamespace`] naming the first required
    /// prefix the root does not declare.
    pub fn from_root(root: &Element) -> Result<Self> {
        let mut uris = HashMap::new();
        for (name, value) in root.attributes() {
            if let Some(prefix) = name.strip_prefix("xmlns:") {
                uris.insert(prefix.to_string(), value.clone());
            } else if name == "xmlns" {
                // Default namespace, keyed by the empty prefix.
                uris.insert(String::new(), value.clone());
            }
        }

        for prefix in REQUIRED_PREFIXES {
            if !uris.contains_key(prefix) {
                return Err(AttachError::MissingNamespace(prefix));
            }
        }

        Ok(Namespaces { uris })
    }

    /// The URI declared for a prefix, if any.
    #[must_use]
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.uris.get(prefix).map(String::as_str)
    }

    /// Splits a qualified name and maps its prefix to the declared URI.
    ///
    /// Returns the `(uri, local name)` pair, or `None` for an undeclared
    /// prefix. Unprefixed names resolve through the default declaration when
    /// one exists.
    #[must_use]
    pub fn resolve<'n>(&self, name: &'n str) -> Option<(&str, &'n str)> {
        match name.split_once(':') {
            Some((prefix, local)) => Some((self.uri(prefix)?, local)),
            None => Some((self.uri("")?, name)),
        }
    }
}
