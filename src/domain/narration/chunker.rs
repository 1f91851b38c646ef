use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Longest chunk handed to the speech engine in one utterance
pub const DEFAULT_MAX_CHUNK_LEN: usize = 250;

/// Sentence punctuation, optional whitespace, then an uppercase letter
fn sentence_boundary() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.?!]\s*\p{Lu}").expect("valid sentence pattern"))
}

/// Split text into chunks small enough for reliable speech synthesis.
///
/// Sentences are packed greedily while the chunk stays within `max_len`
/// characters. A sentence longer than `max_len` is kept whole as its own
/// chunk. Each chunk is an exact slice of `text`; only the whitespace
/// separating two chunks is dropped.
pub fn chunk_text(text: &str, max_len: usize) -> Vec<String> {
    let sentences = split_sentences(text);

    let mut chunks = Vec::new();
    let mut current: Option<Range<usize>> = None;

    for sentence in sentences {
        current = match current {
            None => Some(sentence),
            Some(chunk) => {
                let extended = chunk.start..sentence.end;
                if char_len(&text[extended.clone()]) > max_len {
                    chunks.push(text[chunk].to_string());
                    Some(sentence)
                } else {
                    Some(extended)
                }
            }
        };
    }

    if let Some(chunk) = current {
        chunks.push(text[chunk].to_string());
    }

    chunks
}

/// First `len` characters of `text` after leading whitespace, trimmed.
/// Used as a degraded narration payload.
pub fn excerpt(text: &str, len: usize) -> String {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .nth(len)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    text[..end].trim_end().to_string()
}

/// Byte ranges of the trimmed sentences in `text`, in order
fn split_sentences(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;

    for boundary in sentence_boundary().find_iter(text) {
        // punctuation is a single ASCII byte
        let end = boundary.start() + 1;
        push_trimmed(text, start..end, &mut ranges);

        let capital_len = text[..boundary.end()]
            .chars()
            .next_back()
            .map(char::len_utf8)
            .unwrap_or(0);
        start = boundary.end() - capital_len;
    }

    push_trimmed(text, start..text.len(), &mut ranges);
    ranges
}

fn push_trimmed(text: &str, range: Range<usize>, ranges: &mut Vec<Range<usize>>) {
    let slice = &text[range.clone()];
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();
    if leading == slice.len() {
        return;
    }
    ranges.push(range.start + leading..range.end - trailing);
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
