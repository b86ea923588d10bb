use crate::types::LiteralMatch;

/// Text immediately surrounding a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow<'t> {
    pub before: &'t str,
    pub after: &'t str,
}

impl<'t> ContextWindow<'t> {
    /// Slice up to `chars` characters on each side of the literal,
    /// clipped at the text boundaries
    pub fn around(text: &'t str, literal: &LiteralMatch, chars: usize) -> Self {
        let start = literal.byte_range.start.min(text.len());
        let end = literal.byte_range.end.clamp(start, text.len());

        let head = &text[..start];
        let before_start = head
            .char_indices()
            .rev()
            .take(chars)
            .last()
            .map_or(start, |(i, _)| i);

        let tail = &text[end..];
        let after_end = tail
            .char_indices()
            .nth(chars)
            .map_or(text.len(), |(i, _)| end + i);

        Self {
            before: &text[before_start..start],
            after: &text[end..after_end],
        }
    }
}
