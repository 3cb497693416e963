//! CSS selector parsing.

use scraper::Selector;

/// Parses a CSS selector, logging instead of panicking on failure.
///
/// `context` names the caller in the error log (e.g. "image extraction").
/// Callers treat `None` as "match nothing".
pub fn parse_selector_logged(selector_str: &str, context: &str) -> Option<Selector> {
    match Selector::parse(selector_str) {
        Ok(selector) => Some(selector),
        Err(e) => {
            log::error!(
                "Failed to parse CSS selector '{}' in {}: {}",
                selector_str,
                context,
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_selector() {
        assert!(parse_selector_logged("img", "test").is_some());
        assert!(parse_selector_logged("picture > img[src]", "test").is_some());
    }

    #[test]
    fn test_invalid_selector_is_none() {
        assert!(parse_selector_logged("img[", "test").is_none());
        assert!(parse_selector_logged("", "test").is_none());
    }
}
