//! Attach local PDF files to the entries of a bibliographic RDF/XML export.
//!
//! `bibattach` post-processes the RDF/XML documents produced by reference managers
//! (Zotero's RDF export in particular). For every bibliographic entry with known
//! authors it derives the expected PDF filename from the entry's metadata, checks
//! whether that file exists in a designated attachment directory, and if so
//! synthesizes a `z:Attachment` node linking the entry to the file. The rewritten
//! tree is written to a new document with each attachment node directly after its
//! entry.
//!
//! # Filename Conventions
//!
//! The expected path combines the citation type, the normalized author surnames
//! (accents, apostrophes, hyphens and spaces removed, lowercased) and the
//! publication year:
//!
//! - `Article`, `BookSection` and `Report` file under their year:
//!   `2019/obrien2019.pdf`
//! - `Book` files under `books/`: `books/smithandjones2001.pdf`
//! - `Thesis` files under `thesis/`, with the year replaced by the literal
//!   `thesis`: `thesis/leeetalthesis.pdf`
//! - two authors join with `and`; three or more shorten to `<first>etal<year>.pdf`
//!
//! # Basic Usage
//!
//! ```no_run
//! use bibattach::add_attachments;
//!
//! let report = add_attachments("library.rdf", "library-linked.rdf", "/data/papers")?;
//! println!("attached {} of {} entries", report.attached, report.entries);
//! for missing in &report.missing {
//!     eprintln!("{missing}");
//! }
//! # Ok::<(), bibattach::AttachError>(())
//! ```
//!
//! # Error Handling
//!
//! All operations return the crate [`Result`] wrapping [`AttachError`]. Malformed
//! metadata, such as an `authors` container without its sequence or a person
//! without a surname, aborts the run. A missing PDF never does: the entry passes
//! through without an attachment and the miss is reported in
//! [`AttachReport::missing`].

use quick_xml::events::attributes::AttrError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub mod attach;
pub mod entry;
pub mod filename;
pub mod links;
pub mod namespaces;
pub mod rewrite;
mod utils;
pub mod xml;

#[cfg(test)]
pub(crate) mod test_support;

// Reexports
pub use attach::{AttachmentOutcome, add_link, make_attachment};
pub use filename::format_pdf_name;
pub use links::{LinkRegistry, link_key};
pub use namespaces::Namespaces;
pub use rewrite::{add_attachments, rewrite_document};
pub use xml::{Element, Node};

/// A specialized Result type for attachment operations.
pub type Result<T> = std::result::Result<T, AttachError>;

/// Represents errors that can occur while rewriting an export.
#[derive(Error, Debug)]
pub enum AttachError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("missing namespace declaration for prefix '{0}'")]
    MissingNamespace(&'static str),

    #[error("malformed entry: {0}")]
    MalformedEntry(String),

    #[error("invalid link key '{0}': expected the form #item_<integer>")]
    InvalidLinkKey(String),

    #[error("link keys exhausted: no key greater than '#item_{0}' is available")]
    LinkKeysExhausted(u64),
}

// Add From implementations for the quick-xml error types
impl From<quick_xml::Error> for AttachError {
    fn from(err: quick_xml::Error) -> Self {
        AttachError::Xml(err.to_string())
    }
}

impl From<AttrError> for AttachError {
    fn from(err: AttrError) -> Self {
        AttachError::Xml(err.to_string())
    }
}

/// The category of a bibliographic entry, taken from its tag's local name.
///
/// Unknown local names land in the distinct [`Other`](CitationType::Other)
/// variant instead of any known bucket; the filename deriver gives that variant
/// its own subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitationType {
    /// `bib:Article`, filed under the publication year.
    Article,
    /// `bib:BookSection`, filed under the publication year.
    BookSection,
    /// `bib:Report`, filed under the publication year.
    Report,
    /// `bib:Book`, filed under `books/`.
    Book,
    /// `bib:Thesis`, filed under `thesis/` with the year replaced by `thesis`.
    Thesis,
    /// Any other local name.
    Other,
}

impl CitationType {
    /// Maps a tag's local name (`Article`, `Book`, ...) to its citation type.
    #[must_use]
    pub fn from_local_name(name: &str) -> Self {
        match name {
            "Article" => CitationType::Article,
            "BookSection" => CitationType::BookSection,
            "Report" => CitationType::Report,
            "Book" => CitationType::Book,
            "Thesis" => CitationType::Thesis,
            _ => CitationType::Other,
        }
    }
}

/// Diagnostic record for an entry whose expected PDF was not found.
///
/// Rendering one with `Display` yields the single console line callers are
/// expected to emit per missing file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingPdf {
    /// The derived path, relative to the attachment directory.
    pub pdf_name: PathBuf,
    /// The directory that was searched.
    pub attachment_dir: PathBuf,
}

impl fmt::Display for MissingPdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not find {} in {}",
            self.pdf_name.display(),
            self.attachment_dir.display()
        )
    }
}

/// Summary of one rewrite run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachReport {
    /// Bibliographic entries found in the document.
    pub entries: usize,
    /// Entries that received an attachment node.
    pub attached: usize,
    /// Entries whose expected PDF was not on disk, in document order.
    pub missing: Vec<MissingPdf>,
}
