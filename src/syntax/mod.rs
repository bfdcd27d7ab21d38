//! Syntax highlighting
//!
//! A per-row scanner that tags every rendered byte with a display class.
//! The only state carried between rows is whether a block comment is still
//! open at the end of the previous row; the document re-runs following rows
//! until that state stops changing.

use bitflags::bitflags;

pub mod languages;

pub use languages::{select_rules, LANGUAGES};

/// Display class of one rendered byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    BlockComment,
    /// Plain keywords
    Keyword,
    /// Types and builtins (keywords written with a trailing `|`)
    KeywordSecondary,
    String,
    Number,
    /// Current search hit
    Match,
}

bitflags! {
    /// Optional highlighter passes enabled for a language
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HighlightFlags: u8 {
        const NUMBERS = 1 << 0;
        const STRINGS = 1 << 1;
    }
}

/// Marker suffix that turns a keyword into a secondary keyword
pub const SECONDARY_MARKER: u8 = b'|';

/// Static highlighting rules for one file type
#[derive(Debug)]
pub struct LanguageRules {
    /// Name shown in the status bar
    pub name: &'static str,
    /// Patterns starting with `.` match the extension exactly; others match anywhere in the name
    pub file_match: &'static [&'static str],
    pub keywords: &'static [&'static str],
    /// Empty disables single-line comments
    pub single_line_comment: &'static str,
    /// Start and end delimiter; empty strings disable block comments
    pub block_comment: (&'static str, &'static str),
    pub flags: HighlightFlags,
}

impl LanguageRules {
    /// Whether `filename` selects this rule set
    #[must_use]
    pub fn matches(&self, filename: &str) -> bool {
        let ext = filename.rfind('.').map(|i| &filename[i..]);
        self.file_match.iter().any(|pattern| {
            if pattern.starts_with('.') {
                ext == Some(*pattern)
            } else {
                filename.contains(pattern)
            }
        })
    }

    fn block_comment_enabled(&self) -> bool {
        !self.block_comment.0.is_empty() && !self.block_comment.1.is_empty()
    }
}

/// Whitespace, NUL, and punctuation that can border a number or keyword
#[must_use]
pub fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0 || b",.()+-/*=~%<>[];".contains(&byte)
}

/// Longest keyword that starts at `text[0]` and is followed by a separator or the end of the row
fn match_keyword(text: &[u8], keywords: &[&str]) -> Option<(usize, Highlight)> {
    keywords
        .iter()
        .filter_map(|kw| {
            let kw = kw.as_bytes();
            let (word, class) = match kw.split_last() {
                Some((&SECONDARY_MARKER, word)) => (word, Highlight::KeywordSecondary),
                _ => (kw, Highlight::Keyword),
            };
            let followed_by_separator = text.get(word.len()).map_or(true, |&b| is_separator(b));
            (!word.is_empty() && text.starts_with(word) && followed_by_separator)
                .then_some((word.len(), class))
        })
        .max_by_key(|(len, _)| *len)
}

/// Tag `rendered` into `out`, returning whether a block comment is open at the end
///
/// `out` is resized to `rendered.len()`. Without rules every byte is `Normal`.
pub fn highlight_line(
    rendered: &[u8],
    rules: Option<&LanguageRules>,
    starts_in_comment: bool,
    out: &mut Vec<Highlight>,
) -> bool {
    out.clear();
    out.resize(rendered.len(), Highlight::Normal);

    let Some(rules) = rules else {
        return false;
    };

    let scs = rules.single_line_comment.as_bytes();
    let (mcs, mce) = (
        rules.block_comment.0.as_bytes(),
        rules.block_comment.1.as_bytes(),
    );
    let block_comments = rules.block_comment_enabled();

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = starts_in_comment && block_comments;

    let mut i = 0;
    while i < rendered.len() {
        let c = rendered[i];
        let rest = &rendered[i..];
        let prev_hl = if i > 0 { out[i - 1] } else { Highlight::Normal };

        if !scs.is_empty() && in_string.is_none() && !in_comment && rest.starts_with(scs) {
            out[i..].fill(Highlight::Comment);
            break;
        }

        if block_comments && in_string.is_none() {
            if in_comment {
                if rest.starts_with(mce) {
                    out[i..i + mce.len()].fill(Highlight::BlockComment);
                    i += mce.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    out[i] = Highlight::BlockComment;
                    i += 1;
                }
                continue;
            } else if rest.starts_with(mcs) {
                out[i..i + mcs.len()].fill(Highlight::BlockComment);
                i += mcs.len();
                in_comment = true;
                continue;
            }
        }

        if rules.flags.contains(HighlightFlags::STRINGS) {
            if let Some(quote) = in_string {
                out[i] = Highlight::String;
                if c == b'\\' && i + 1 < rendered.len() {
                    out[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                out[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if rules.flags.contains(HighlightFlags::NUMBERS)
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            out[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            if let Some((len, class)) = match_keyword(rest, rules.keywords) {
                out[i..i + len].fill(class);
                i += len;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    in_comment
}
