//! Synthesizing attachment nodes for entries whose PDF is on disk.

use crate::filename::format_pdf_name;
use crate::links::{LinkRegistry, link_key};
use crate::namespaces::Namespaces;
use crate::xml::Element;
use crate::{MissingPdf, Result};
use std::path::Path;

/// What the attachment step decided for one entry.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentOutcome {
    /// The PDF exists; holds the node to place directly after the entry.
    Attached(Element),
    /// The PDF is not on disk; the entry passes through without one.
    Missing(MissingPdf),
}

/// Builds the attachment node for an entry, if its expected PDF exists.
///
/// Looks up the entry's derived PDF path under `attachment_dir`. When the
/// file is there, the entry keeps its existing link key or gets a fresh
/// `link:link` child minted from the registry, and the matching
/// `z:Attachment` node is returned. When it is not, the miss is returned as
/// a diagnostic and the entry is left untouched.
///
/// # Errors
///
/// Fails when the filename cannot be derived, the entry's existing link is
/// malformed, or no key greater than the registry's highest can be minted.
pub fn make_attachment(
    entry: &mut Element,
    ns: &Namespaces,
    registry: &mut LinkRegistry,
    attachment_dir: &Path,
) -> Result<AttachmentOutcome> {
    let pdf_name = format_pdf_name(entry, ns)?;
    if !attachment_dir.join(&pdf_name).exists() {
        return Ok(AttachmentOutcome::Missing(MissingPdf {
            pdf_name,
            attachment_dir: attachment_dir.to_path_buf(),
        }));
    }

    let key = match link_key(entry, ns)? {
        Some(key) => key,
        None => {
            let minted = registry.next_key()?;
            let key = format!("#item_{minted}");
            add_link(entry, &key);
            registry.record(minted);
            key
        }
    };

    Ok(AttachmentOutcome::Attached(attachment_node(&key, &pdf_name)))
}

/// Appends a `link:link` child pointing the entry at a key.
pub fn add_link(entry: &mut Element, key: &str) {
    entry.push_child(Element::new("link:link").with_attr("rdf:resource", key));
}

fn attachment_node(key: &str, pdf_name: &Path) -> Element {
    let title = pdf_name
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Element::new("z:Attachment")
        .with_attr("rdf:about", key)
        .with_child(Element::new("z:itemType").with_text("attachment"))
        // Zotero's vocabulary nests an rdf:resource attribute inside an
        // rdf:resource element.
        .with_child(
            Element::new("rdf:resource")
                .with_attr("rdf:resource", format!("attachments:{}", pdf_name.display())),
        )
        .with_child(Element::new("dc:title").with_text(title))
        .with_child(Element::new("z:linkMode").with_text("2"))
        .with_child(Element::new("link:type").with_text("application/pdf"))
}
