//! Fixed-size pagination of document text
//!
//! Pages are counted in characters, not bytes, so multi-byte text never gets
//! split inside a code point.

use crate::errors::{Result, TunerError};

/// Default page size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Split `text` into consecutive, non-overlapping pages of `chunk_size`
/// characters. The last page may be shorter; empty text yields no pages.
pub fn paginate(text: &str, chunk_size: usize) -> Result<Vec<String>> {
    if chunk_size == 0 {
        return Err(TunerError::Config(
            "chunk_size must be greater than 0".to_string(),
        ));
    }

    let mut pages = Vec::with_capacity(text.len() / chunk_size + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == chunk_size {
            pages.push(text[start..idx].to_string());
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        pages.push(text[start..].to_string());
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_empty_text_has_no_pages() {
        assert!(paginate("", 10).unwrap().is_empty());
    }

    #[test]
    fn test_exact_multiple() {
        let pages = paginate("abcdef", 3).unwrap();
        assert_eq!(pages, vec!["abc", "def"]);
    }

    #[test]
    fn test_short_last_page() {
        let pages = paginate("abcdefg", 3).unwrap();
        assert_eq!(pages, vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_text_shorter_than_chunk() {
        assert_eq!(paginate("hi", DEFAULT_CHUNK_SIZE).unwrap(), vec!["hi"]);
    }

    #[test]
    fn test_multibyte_characters() {
        let pages = paginate("héllo wörld", 4).unwrap();
        assert_eq!(pages, vec!["héll", "o wö", "rld"]);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(paginate("abc", 0).is_err());
    }

    #[quickcheck]
    fn prop_pages_concatenate_to_input(text: String, size: u8) -> bool {
        let size = size as usize % 64 + 1;
        paginate(&text, size).unwrap().concat() == text
    }

    #[quickcheck]
    fn prop_all_but_last_are_full(text: String, size: u8) -> bool {
        let size = size as usize % 64 + 1;
        let pages = paginate(&text, size).unwrap();
        match pages.split_last() {
            None => text.is_empty(),
            Some((last, full)) => {
                let last_len = last.chars().count();
                full.iter().all(|p| p.chars().count() == size) && last_len >= 1 && last_len <= size
            }
        }
    }
}
