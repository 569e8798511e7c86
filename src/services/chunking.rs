use std::num::NonZeroUsize;

pub const DEFAULT_MAX_CHUNK_CHARS: NonZeroUsize = NonZeroUsize::new(7000).unwrap();

/// Split `text` into consecutive pieces of at most `max_chars` characters.
///
/// Splitting is purely positional: pieces may cut a word or sentence in half.
/// Concatenating the result in order yields `text` again.
pub fn chunk_text(text: &str, max_chars: NonZeroUsize) -> Vec<&str> {
    let max_chars = max_chars.get();
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}
