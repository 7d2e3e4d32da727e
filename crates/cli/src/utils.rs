use gogo::errors::*;

use crate::constants::*;

/// validates a 1-indexed selection against a list length, returning the
/// zero-based index.
pub fn checked_selection(requested: usize, available: usize) -> Result<usize> {
    if requested == 0 || requested > available {
        return Err(GogoError::SelectionOutOfRange {
            requested,
            available,
        });
    }

    Ok(requested - 1)
}

pub fn sanitize_filename(title: &str) -> String {
    let cleaned = UNSAFE_FILENAME_RE.replace_all(title, " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.is_empty() {
        "episode".to_string()
    } else {
        cleaned
    }
}

/// default output name for a downloaded episode.
pub fn suggested_filename(title: &str) -> String {
    format!("{}.mp4", sanitize_filename(title))
}
