//! Deriving the PDF path an entry's file is expected at.

use crate::entry::{author_surnames, publication_year};
use crate::namespaces::Namespaces;
use crate::xml::Element;
use crate::{AttachError, CitationType, Result};
use std::path::{Path, PathBuf};

/// Derives an entry's expected PDF path, relative to the attachment directory.
///
/// The subdirectory comes from the citation type: articles, book sections and
/// reports file under their publication year, books under `books`, theses
/// under `thesis`. The filename stem joins the normalized surnames with the
/// year: one author gives `obrien2019.pdf`, two give
/// `smithandjones2001.pdf`, three or more shorten to `leeetal2015.pdf`. A
/// thesis uses the literal `thesis` in place of its year.
///
/// # Errors
///
/// Returns [`AttachError::MalformedEntry`] when the author sequence is empty
/// or the metadata walk fails, including a date-less thesis even though the
/// year never reaches its filename.
pub fn format_pdf_name(entry: &Element, ns: &Namespaces) -> Result<PathBuf> {
    let citation_type = CitationType::from_local_name(entry.local_name());
    let surnames = author_surnames(entry, ns)?;
    let year = publication_year(entry, ns)?;

    let (subdir, year) = match citation_type {
        CitationType::Article | CitationType::BookSection | CitationType::Report => {
            (year.clone(), year)
        }
        CitationType::Book => ("books".to_string(), year),
        CitationType::Thesis => ("thesis".to_string(), "thesis".to_string()),
        // Unrecognized types file under the literal "year", not the entry's year.
        CitationType::Other => ("year".to_string(), year),
    };

    let stem = match surnames.as_slice() {
        [] => {
            return Err(AttachError::MalformedEntry(format!(
                "{} has an empty author sequence",
                entry.name()
            )));
        }
        [only] => format!("{only}{year}"),
        [first, second] => format!("{first}and{second}{year}"),
        [first, ..] => format!("{first}etal{year}"),
    };

    Ok(Path::new(&subdir).join(format!("{stem}.pdf")))
}
