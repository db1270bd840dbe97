//! Utility functions for normalizing author names.

use unicode_normalization::UnicodeNormalization;

/// Strips accents and other non-ASCII marks from text.
///
/// Decomposes the text (NFD) so accented letters split into a base letter plus
/// combining marks, then keeps only the ASCII characters. "García" becomes
/// "Garcia"; characters with no ASCII base letter are dropped entirely.
pub(crate) fn strip_accents(text: &str) -> String {
    text.nfd().filter(char::is_ascii).collect()
}

/// Normalizes a surname for use in a PDF filename.
///
/// Removes accents, apostrophes, hyphens and internal spaces, then lowercases,
/// so "O'Brien" becomes "obrien" and "Smith-Jones" becomes "smithjones".
pub(crate) fn normalize_surname(surname: &str) -> String {
    strip_accents(surname)
        .chars()
        .filter(|c| !matches!(c, '\'' | '-' | ' '))
        .collect::<String>()
        .to_lowercase()
}
