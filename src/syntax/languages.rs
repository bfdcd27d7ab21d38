//! Built-in language rule tables

use super::{HighlightFlags, LanguageRules};

const C_KEYWORDS: &[&str] = &[
    "switch", "if", "while", "for", "break", "continue", "return", "else", "struct", "union",
    "typedef", "static", "enum", "class", "case", "default", "goto", "sizeof", "const",
    "int|", "long|", "double|", "float|", "char|", "unsigned|", "signed|", "void|", "short|",
    "bool|", "size_t|",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "break", "continue", "return", "yield", "pass",
    "raise", "try", "except", "finally", "with", "as", "assert", "def", "class", "lambda",
    "global", "nonlocal", "import", "from", "and", "or", "not", "in", "is", "async", "await",
    "None|", "True|", "False|", "self|", "int|", "str|", "float|", "bool|", "list|", "dict|",
    "tuple|", "set|", "bytes|",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "fn", "for", "if",
    "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "static", "struct", "trait", "type", "unsafe", "use", "where", "while", "dyn",
    "Self|", "self|", "true|", "false|", "i8|", "i16|", "i32|", "i64|", "i128|", "isize|",
    "u8|", "u16|", "u32|", "u64|", "u128|", "usize|", "f32|", "f64|", "bool|", "char|",
    "str|", "String|", "Vec|", "Option|", "Result|", "Box|",
];

/// Every rule set, tried in order when a file is opened or renamed
pub static LANGUAGES: &[LanguageRules] = &[
    LanguageRules {
        name: "c",
        file_match: &[".c", ".h", ".cpp", ".hpp", ".cc"],
        keywords: C_KEYWORDS,
        single_line_comment: "//",
        block_comment: ("/*", "*/"),
        flags: HighlightFlags::NUMBERS.union(HighlightFlags::STRINGS),
    },
    LanguageRules {
        name: "python",
        file_match: &[".py", ".pyw"],
        keywords: PYTHON_KEYWORDS,
        single_line_comment: "#",
        block_comment: ("", ""),
        flags: HighlightFlags::NUMBERS.union(HighlightFlags::STRINGS),
    },
    LanguageRules {
        name: "rust",
        file_match: &[".rs"],
        keywords: RUST_KEYWORDS,
        single_line_comment: "//",
        block_comment: ("/*", "*/"),
        flags: HighlightFlags::NUMBERS.union(HighlightFlags::STRINGS),
    },
];

/// Rule set for `filename`, if any
#[must_use]
pub fn select_rules(filename: &str) -> Option<&'static LanguageRules> {
    LANGUAGES.iter().find(|rules| rules.matches(filename))
}
