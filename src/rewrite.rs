//! Rewriting a document: walk its entries, attach PDFs, build the output tree.

use crate::attach::{AttachmentOutcome, make_attachment};
use crate::entry::has_authors;
use crate::links::LinkRegistry;
use crate::namespaces::Namespaces;
use crate::xml::{Element, Node, document_to_string, parse_document};
use crate::{AttachReport, Result};
use std::fs;
use std::path::Path;

/// Rewrites a serialized export, attaching the PDFs found in
/// `attachment_dir`, and returns the new document with a run report.
///
/// The output root keeps the input root's name and attributes, so the
/// namespace declarations survive. Only bibliographic entries are carried
/// over; anything else at the root, earlier attachment nodes included, is
/// dropped and rebuilt from the entries' link keys. Running the output
/// through a second pass therefore reproduces it unchanged.
///
/// Entries without an authors container pass through untouched. Entries
/// whose expected PDF is absent pass through too, with the miss recorded in
/// [`AttachReport::missing`].
///
/// # Errors
///
/// Fails on malformed XML, a root missing a required namespace declaration,
/// an entry with broken author, date or link structure, or a mint attempt
/// once the document's highest link key cannot be topped.
pub fn rewrite_document(
    xml: &str,
    attachment_dir: impl AsRef<Path>,
) -> Result<(String, AttachReport)> {
    let attachment_dir = attachment_dir.as_ref();
    let root = parse_document(xml)?;
    let ns = Namespaces::from_root(&root)?;

    let mut output = root.without_children();
    let entries: Vec<Element> = root
        .into_children()
        .into_iter()
        .filter_map(|node| match node {
            Node::Element(element) if is_bibliographic(&element, &ns) => Some(element),
            _ => None,
        })
        .collect();

    let mut registry = LinkRegistry::scan(&entries, &ns)?;
    let mut report = AttachReport {
        entries: entries.len(),
        ..Default::default()
    };

    for mut entry in entries {
        if !has_authors(&entry, &ns) {
            output.push_child(entry);
            continue;
        }
        match make_attachment(&mut entry, &ns, &mut registry, attachment_dir)? {
            AttachmentOutcome::Attached(attachment) => {
                report.attached += 1;
                output.push_child(entry);
                output.push_child(attachment);
            }
            AttachmentOutcome::Missing(missing) => {
                report.missing.push(missing);
                output.push_child(entry);
            }
        }
    }

    Ok((document_to_string(&output)?, report))
}

/// Whether a root child is a bibliographic entry, whatever its local name.
fn is_bibliographic(element: &Element, ns: &Namespaces) -> bool {
    match (ns.resolve(element.name()), ns.uri("bib")) {
        (Some((uri, _)), Some(bib)) => uri == bib,
        _ => false,
    }
}

/// Reads an export from `input`, attaches PDFs from `attachment_dir`, and
/// writes the rewritten document to `output`.
///
/// # Errors
///
/// Fails when `input` cannot be read, `output` cannot be written, or the
/// rewrite itself fails.
pub fn add_attachments(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    attachment_dir: impl AsRef<Path>,
) -> Result<AttachReport> {
    let xml = fs::read_to_string(input)?;
    let (rewritten, report) = rewrite_document(&xml, attachment_dir)?;
    fs::write(output, rewritten)?;
    Ok(report)
}
