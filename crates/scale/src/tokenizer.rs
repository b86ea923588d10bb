use crate::dictionary::ScaleDictionary;
use crate::types::{AttachedSuffix, LiteralMatch, LiteralNotation};
use bigdecimal::BigDecimal;
use regex::{Captures, Regex};
use std::str::FromStr;
use std::sync::OnceLock;

static LITERAL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn literal_pattern() -> &'static Regex {
    // Alternation order is the match preference at a given start:
    // power, then scientific, then grouped plain, then bare plain.
    LITERAL_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?:(?P<sign>-)[$€£]?)?
            (?:
                (?P<pbase>[0-9]+(?:\.[0-9]+)?)\^(?P<pexp>[0-9]+)
              | (?P<mant>[0-9]+(?:\.[0-9]+)?)[eE](?P<sexp>[+-]?[0-9]+)
              | (?P<plain>[0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]+)?|[0-9]+(?:\.[0-9]+)?)
            )",
        )
        .expect("literal pattern is valid")
    })
}

/// Lazy, document-ordered scanner over the numeric literals in a text
///
/// Candidates that fail a boundary or parse check are skipped and counted
/// in [`Tokenizer::rejected`].
pub struct Tokenizer<'t, 'd> {
    text: &'t str,
    dictionary: &'d ScaleDictionary,
    pos: usize,
    cursor_byte: usize,
    cursor_char: usize,
    rejected: usize,
}

impl<'t, 'd> Tokenizer<'t, 'd> {
    pub fn new(text: &'t str, dictionary: &'d ScaleDictionary) -> Self {
        Self {
            text,
            dictionary,
            pos: 0,
            cursor_byte: 0,
            cursor_char: 0,
            rejected: 0,
        }
    }

    /// Number of candidates rejected so far
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.rejected
    }

    fn classify(&self, caps: &Captures<'_>) -> Option<Candidate> {
        let whole = caps.get(0)?;
        let mut start = whole.start();
        let mut negative = caps.name("sign").is_some();

        if negative && is_word_char(self.char_before(start)) {
            // `10-20`: the dash is a range separator, not a sign
            negative = false;
            start = caps
                .name("pbase")
                .or_else(|| caps.name("mant"))
                .or_else(|| caps.name("plain"))?
                .start();
        }
        if is_word_char(self.char_before(start)) || self.continues_decimal_before(start) {
            return None;
        }

        let end = whole.end();
        if let Some(mantissa) = caps.name("mant") {
            let exponent = parse_exponent(caps.name("sexp")?.as_str());
            self.ensure_closed(end)?;
            return Some(Candidate {
                start,
                end,
                value: signed(parse_decimal(mantissa.as_str())?, negative),
                notation: LiteralNotation::Scientific { exponent },
                suffix: None,
            });
        }

        if let Some(base) = caps.name("pbase") {
            let exponent = parse_exponent(caps.name("pexp")?.as_str());
            self.ensure_closed(end)?;
            return Some(Candidate {
                start,
                end,
                value: signed(BigDecimal::from(1), negative),
                notation: LiteralNotation::Power {
                    base: parse_decimal(base.as_str())?,
                    exponent,
                },
                suffix: None,
            });
        }

        let digits = caps.name("plain")?.as_str();
        let value = signed(parse_decimal(&digits.replace(',', ""))?, negative);
        let (end, suffix) = match self.attached_suffix(end) {
            SuffixScan::Attached { end, suffix } => (end, Some(suffix)),
            SuffixScan::Detached => (end, None),
            SuffixScan::Embedded => return None,
        };
        Some(Candidate {
            start,
            end,
            value,
            notation: LiteralNotation::Plain,
            suffix,
        })
    }

    /// Look for `K`, `bn`, ... directly after `end` or after a single space
    fn attached_suffix(&self, end: usize) -> SuffixScan {
        let rest = &self.text[end..];
        let gap = usize::from(rest.starts_with(' '));
        let letters_start = end + gap;
        let letters: &str = {
            let tail = &self.text[letters_start..];
            let len = tail
                .bytes()
                .take_while(u8::is_ascii_alphabetic)
                .count();
            &tail[..len]
        };

        if !letters.is_empty() {
            let after = letters_start + letters.len();
            if !is_word_char(self.text[after..].chars().next()) {
                if let Some(exponent) = self.dictionary.suffix_exponent(letters) {
                    return SuffixScan::Attached {
                        end: after,
                        suffix: AttachedSuffix {
                            text: letters.to_string(),
                            exponent,
                        },
                    };
                }
            }
        }

        if gap == 0 && self.ensure_closed(end).is_none() {
            SuffixScan::Embedded
        } else {
            SuffixScan::Detached
        }
    }

    /// The literal must not run on into a word or another decimal group
    fn ensure_closed(&self, end: usize) -> Option<()> {
        let mut rest = self.text[end..].chars();
        match rest.next() {
            Some(c) if is_word_char(Some(c)) => None,
            Some('.' | ',') if rest.next().is_some_and(|c| c.is_ascii_digit()) => None,
            _ => Some(()),
        }
    }

    fn char_before(&self, byte: usize) -> Option<char> {
        self.text[..byte].chars().next_back()
    }

    /// `1.2.3`: a digit preceded by `<digit>.` continues an earlier number
    fn continues_decimal_before(&self, start: usize) -> bool {
        let mut before = self.text[..start].chars().rev();
        before.next() == Some('.') && before.next().is_some_and(|c| c.is_ascii_digit())
    }

    /// Resume scanning past the rest of a rejected token
    fn skip_token(&self, from: usize) -> usize {
        let mut pos = from;
        let mut chars = self.text[from..].char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let joins = matches!(c, '.' | ',')
                && chars.peek().is_some_and(|(_, next)| next.is_ascii_digit());
            if !(is_word_char(Some(c)) || joins) {
                break;
            }
            pos = from + i + c.len_utf8();
        }
        pos
    }

    fn emit(&mut self, candidate: Candidate) -> LiteralMatch {
        self.cursor_char += self.text[self.cursor_byte..candidate.start].chars().count();
        self.cursor_byte = candidate.start;
        let raw_text = self.text[candidate.start..candidate.end].to_string();
        let start_offset = self.cursor_char;
        let end_offset = start_offset + raw_text.chars().count();
        self.cursor_byte = candidate.end;
        self.cursor_char = end_offset;

        LiteralMatch {
            raw_text,
            numeric_value: candidate.value,
            start_offset,
            end_offset,
            byte_range: candidate.start..candidate.end,
            notation: candidate.notation,
            attached_suffix: candidate.suffix,
        }
    }
}

impl Iterator for Tokenizer<'_, '_> {
    type Item = LiteralMatch;

    fn next(&mut self) -> Option<LiteralMatch> {
        while self.pos < self.text.len() {
            let Some(caps) = literal_pattern().captures_at(self.text, self.pos) else {
                self.pos = self.text.len();
                break;
            };
            let match_end = caps.get(0).map_or(self.text.len(), |m| m.end());

            match self.classify(&caps) {
                Some(candidate) => {
                    self.pos = candidate.end;
                    return Some(self.emit(candidate));
                }
                None => {
                    self.rejected += 1;
                    self.pos = self.skip_token(match_end);
                    log::trace!("Rejected numeric candidate ending at byte {match_end}");
                }
            }
        }
        None
    }
}

struct Candidate {
    start: usize,
    end: usize,
    value: BigDecimal,
    notation: LiteralNotation,
    suffix: Option<AttachedSuffix>,
}

enum SuffixScan {
    Attached { end: usize, suffix: AttachedSuffix },
    Detached,
    Embedded,
}

fn is_word_char(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn parse_decimal(raw: &str) -> Option<BigDecimal> {
    BigDecimal::from_str(raw).ok()
}

/// Exponents too long for `i64` saturate so the overflow guard still trips
fn parse_exponent(raw: &str) -> i64 {
    raw.parse::<i64>().unwrap_or(if raw.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn signed(value: BigDecimal, negative: bool) -> BigDecimal {
    if negative {
        -value
    } else {
        value
    }
}
