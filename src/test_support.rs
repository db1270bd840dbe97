//! Shared fixtures for the unit tests.

use crate::namespaces::Namespaces;
use crate::xml::Element;

/// The namespace declarations every fixture root carries.
pub(crate) const NAMESPACE_DECLS: [(&str, &str); 6] = [
    ("xmlns:rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("xmlns:z", "http://www.zotero.org/namespaces/export#"),
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:bib", "http://purl.org/net/biblio#"),
    ("xmlns:foaf", "http://xmlns.com/foaf/0.1/"),
    ("xmlns:link", "http://purl.org/rss/1.0/modules/link/"),
];

/// An `rdf:RDF` root element declaring all required namespaces.
pub(crate) fn rdf_root() -> Element {
    let mut root = Element::new("rdf:RDF");
    for (name, uri) in NAMESPACE_DECLS {
        root.push_attribute(name, uri);
    }
    root
}

/// A namespace table covering the required prefixes.
pub(crate) fn namespaces() -> Namespaces {
    Namespaces::from_root(&rdf_root()).expect("fixture root declares all required namespaces")
}

/// Builds a bibliographic entry with the given tag, author surnames and date.
///
/// An empty `date` leaves the `dc:date` element out entirely.
pub(crate) fn entry_with(tag: &str, surnames: &[&str], date: &str) -> Element {
    let mut seq = Element::new("rdf:Seq");
    for surname in surnames {
        seq.push_child(Element::new("rdf:li").with_child(
            Element::new("foaf:Person")
                .with_child(Element::new("foaf:surname").with_text(*surname)),
        ));
    }

    let mut entry =
        Element::new(tag).with_child(Element::new("bib:authors").with_child(seq));
    if !date.is_empty() {
        entry.push_child(Element::new("dc:date").with_text(date));
    }
    entry
}
