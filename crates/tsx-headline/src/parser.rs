//! Document parser: splits text into word, separator and markup units.
//!
//! Every character of the input belongs to exactly one unit, so the unit
//! lengths of a parse always sum to the document's character count.

/// What kind of text a unit covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// A run of alphanumeric characters.
    Word,
    /// A run of whitespace or punctuation.
    Space,
    /// A markup tag such as `<b>` or `</p>`.
    Tag,
}

/// A single unit produced by a [`TextParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedUnit<'a> {
    pub kind: UnitKind,
    /// The unit's text, borrowed from the document.
    pub text: &'a str,
    /// Byte offset of the unit in the document.
    pub start: usize,
    /// Length in characters (Unicode scalar values).
    pub char_len: usize,
}

/// Trait for document parsers.
pub trait TextParser: Send + Sync {
    /// Return the parser name.
    fn name(&self) -> &'static str;

    /// Split `text` into consecutive units covering all of it.
    fn parse<'a>(&self, text: &'a str) -> Vec<ParsedUnit<'a>>;
}

/// Default parser: alphanumeric words, separator runs, and `<...>` tags.
///
/// A `<` only opens a tag when it is followed by an ASCII letter, `/` or
/// `!` and a `>` appears before the next `<`; otherwise it is ordinary
/// punctuation.
#[derive(Debug, Default)]
pub struct DefaultParser;

impl DefaultParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

/// Byte index one past the `>` closing a tag opened at `start`.
///
/// The scan stops at the first `<` or `>`, so each character is examined
/// by at most one candidate tag.
fn tag_end(text: &str, start: usize) -> Option<usize> {
    let body = text[start..].strip_prefix('<')?;
    match body.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!' => {}
        _ => return None,
    }
    let stop = body.find(['<', '>'])?;
    (body.as_bytes()[stop] == b'>').then_some(start + 1 + stop + 1)
}

impl TextParser for DefaultParser {
    fn name(&self) -> &'static str {
        "default"
    }

    fn parse<'a>(&self, text: &'a str) -> Vec<ParsedUnit<'a>> {
        let mut units = Vec::new();
        let mut iter = text.char_indices().peekable();

        while let Some(&(start, ch)) = iter.peek() {
            if ch == '<' {
                if let Some(end) = tag_end(text, start) {
                    let slice = &text[start..end];
                    let char_len = slice.chars().count();
                    for _ in 0..char_len {
                        let _ = iter.next();
                    }
                    units.push(ParsedUnit {
                        kind: UnitKind::Tag,
                        text: slice,
                        start,
                        char_len,
                    });
                    continue;
                }
            }

            let kind = if is_word_char(ch) {
                UnitKind::Word
            } else {
                UnitKind::Space
            };
            let mut end = start;
            let mut char_len = 0;
            while let Some(&(i, c)) = iter.peek() {
                let belongs = match kind {
                    UnitKind::Word => is_word_char(c),
                    _ => !is_word_char(c) && !(c == '<' && tag_end(text, i).is_some()),
                };
                if !belongs {
                    break;
                }
                end = i + c.len_utf8();
                char_len += 1;
                let _ = iter.next();
            }

            units.push(ParsedUnit {
                kind,
                text: &text[start..end],
                start,
                char_len,
            });
        }

        units
    }
}
