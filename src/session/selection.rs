//! Selection tokens to destination cells.
//!
//! The operator tags each chosen image with a slot token: `p1`..`p5` for
//! primary images and `l1`..`l5` for lifestyle images. Slots map, in order,
//! onto the destination columns.

use crate::config::{LIFESTYLE_SLOTS, PRIMARY_SLOTS, SELECTION_SLOTS};
use crate::error_handling::SelectionError;

/// Returns the 0-based destination slot for `token`.
///
/// `Ok(None)` means the token is not a slot token at all (for example an
/// empty "not selected" value) and should be ignored.
fn slot_for(token: &str) -> Result<Option<usize>, SelectionError> {
    let token = token.trim();
    let (offset, count, digits) = if let Some(rest) = token.strip_prefix('p') {
        (0, PRIMARY_SLOTS, rest)
    } else if let Some(rest) = token.strip_prefix('l') {
        (PRIMARY_SLOTS, LIFESTYLE_SLOTS, rest)
    } else {
        return Ok(None);
    };

    match digits.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) && !digits.starts_with('+') => {
            Ok(Some(offset + n - 1))
        }
        _ => Err(SelectionError::UnknownSlot(token.to_string())),
    }
}

/// Builds the destination row from `(image_url, token)` pairs.
///
/// The result always has one entry per slot; unfilled slots are empty. When
/// two images claim the same slot, the later pair wins.
///
/// # Errors
///
/// Returns `SelectionError::UnknownSlot` for a `p`/`l` token outside its range
/// (`p0`, `p6`, `l12`, `px`).
pub fn build_selection_row(selections: &[(String, String)]) -> Result<Vec<String>, SelectionError> {
    let mut row = vec![String::new(); SELECTION_SLOTS];
    for (image, token) in selections {
        if let Some(slot) = slot_for(token)? {
            row[slot] = image.clone();
        }
    }
    Ok(row)
}
