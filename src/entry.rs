//! Reading author and date metadata out of a bibliographic entry.
//!
//! Zotero's RDF export nests authors as
//! `bib:authors > rdf:Seq > rdf:li > foaf:Person > foaf:surname` and dates as
//! a free-form `dc:date` string. These accessors walk that structure and
//! treat any break in it as a malformed entry.

use crate::namespaces::Namespaces;
use crate::utils::normalize_surname;
use crate::xml::Element;
use crate::{AttachError, Result};

/// Whether the entry carries a `bib:authors` container.
///
/// Entries without one (edited volumes, webpages) are passed through the
/// rewrite untouched rather than treated as malformed.
#[must_use]
pub fn has_authors(entry: &Element, ns: &Namespaces) -> bool {
    entry.find_child(ns, "bib", "authors").is_some()
}

/// The normalized surnames of the entry's authors, in sequence order.
///
/// # Errors
///
/// Returns [`AttachError::MalformedEntry`] when the `bib:authors` container,
/// its `rdf:Seq`, a member's `foaf:Person` or a person's `foaf:surname` is
/// missing, or when a surname has no text.
pub fn author_surnames(entry: &Element, ns: &Namespaces) -> Result<Vec<String>> {
    let authors = entry.find_child(ns, "bib", "authors").ok_or_else(|| {
        AttachError::MalformedEntry(format!("{} has no authors container", entry.name()))
    })?;
    let seq = authors
        .find_child(ns, "rdf", "Seq")
        .ok_or_else(|| AttachError::MalformedEntry("authors container has no rdf:Seq".to_string()))?;

    let mut surnames = Vec::new();
    for member in seq.child_elements() {
        let person = member.find_child(ns, "foaf", "Person").ok_or_else(|| {
            AttachError::MalformedEntry("author sequence member has no foaf:Person".to_string())
        })?;
        let surname = person
            .find_child(ns, "foaf", "surname")
            .ok_or_else(|| AttachError::MalformedEntry("author has no foaf:surname".to_string()))?;
        let text = surname.text();
        if text.is_empty() {
            return Err(AttachError::MalformedEntry(
                "author surname is empty".to_string(),
            ));
        }
        surnames.push(normalize_surname(&text));
    }
    Ok(surnames)
}

/// The publication year, taken verbatim from the front of `dc:date`.
///
/// The date splits on `-` and the first piece is returned untouched, so
/// `2019-05-01` yields `2019`, a bare `1999` passes through, and so does a
/// non-numeric date like `in press`.
///
/// # Errors
///
/// Returns [`AttachError::MalformedEntry`] when the entry has no `dc:date`
/// or the date is empty.
pub fn publication_year(entry: &Element, ns: &Namespaces) -> Result<String> {
    let date = entry
        .find_child(ns, "dc", "date")
        .ok_or_else(|| AttachError::MalformedEntry(format!("{} has no dc:date", entry.name())))?;
    let text = date.text();
    if text.is_empty() {
        return Err(AttachError::MalformedEntry(format!(
            "dc:date in {} is empty",
            entry.name()
        )));
    }
    Ok(text.split('-').next().unwrap_or_default().to_string())
}
