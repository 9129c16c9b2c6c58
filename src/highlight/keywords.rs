//! Reserved-word tables for the code token classifier
//!
//! Each table is listed in the order the keyword pass applies it. Tags are
//! matched after lowercasing; aliases resolve to a canonical table.

// ─────────────────────────────────────────────────────────────────────────────
// Keyword Tables
// ─────────────────────────────────────────────────────────────────────────────

const JAVASCRIPT: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "do", "switch",
    "case", "break", "continue", "default", "new", "this", "class", "extends", "super", "import",
    "export", "from", "async", "await", "try", "catch", "finally", "throw", "typeof",
    "instanceof", "in", "of", "delete", "void", "yield", "null", "undefined", "true", "false",
];

const TYPESCRIPT: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "do", "switch",
    "case", "break", "continue", "default", "new", "this", "class", "extends", "implements",
    "super", "import", "export", "from", "async", "await", "try", "catch", "finally", "throw",
    "typeof", "instanceof", "in", "of", "interface", "type", "enum", "namespace", "public",
    "private", "protected", "readonly", "abstract", "declare", "keyof", "as", "is", "null",
    "undefined", "true", "false", "void", "never", "unknown", "any",
];

const PYTHON: &[&str] = &[
    "def", "class", "return", "if", "elif", "else", "for", "while", "break", "continue",
    "pass", "import", "from", "as", "try", "except", "finally", "raise", "with", "yield",
    "lambda", "global", "nonlocal", "assert", "del", "and", "or", "not", "in", "is", "async",
    "await", "None", "True", "False",
];

const RUST: &[&str] = &[
    "fn", "let", "mut", "const", "static", "struct", "enum", "trait", "impl", "for", "where",
    "pub", "crate", "mod", "use", "super", "self", "Self", "return", "if", "else", "match",
    "loop", "while", "break", "continue", "in", "as", "ref", "move", "unsafe", "async",
    "await", "dyn", "type", "extern", "true", "false",
];

const JAVA: &[&str] = &[
    "public", "private", "protected", "class", "interface", "enum", "extends", "implements",
    "static", "final", "abstract", "void", "new", "return", "if", "else", "for", "while", "do",
    "switch", "case", "break", "continue", "default", "try", "catch", "finally", "throw",
    "throws", "import", "package", "this", "super", "null", "true", "false", "instanceof",
    "synchronized", "var",
];

const GO: &[&str] = &[
    "func", "package", "import", "var", "const", "type", "struct", "interface", "map", "chan",
    "go", "defer", "return", "if", "else", "for", "range", "switch", "case", "default",
    "break", "continue", "fallthrough", "goto", "select", "nil", "true", "false",
];

const CPP: &[&str] = &[
    "int", "char", "float", "double", "bool", "void", "long", "short", "unsigned", "signed",
    "auto", "const", "static", "struct", "class", "union", "enum", "namespace", "using",
    "template", "typename", "public", "private", "protected", "virtual", "override", "new",
    "delete", "return", "if", "else", "for", "while", "do", "switch", "case", "break",
    "continue", "default", "try", "catch", "throw", "nullptr", "true", "false", "this",
];

const C: &[&str] = &[
    "int", "char", "float", "double", "void", "long", "short", "unsigned", "signed", "const",
    "static", "extern", "struct", "union", "enum", "typedef", "sizeof", "return", "if", "else",
    "for", "while", "do", "switch", "case", "break", "continue", "default", "goto", "NULL",
];

const BASH: &[&str] = &[
    "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done", "case", "esac",
    "function", "return", "in", "local", "export", "readonly", "echo", "exit",
];

const SQL: &[&str] = &[
    "SELECT", "FROM", "WHERE", "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE", "CREATE",
    "TABLE", "DROP", "ALTER", "JOIN", "LEFT", "RIGHT", "INNER", "OUTER", "ON", "GROUP", "BY",
    "ORDER", "HAVING", "LIMIT", "AS", "AND", "OR", "NOT", "NULL", "IS", "IN", "DISTINCT",
];

/// Canonical language tags with their reserved words.
pub const KEYWORD_TABLE: &[(&str, &[&str])] = &[
    ("javascript", JAVASCRIPT),
    ("typescript", TYPESCRIPT),
    ("python", PYTHON),
    ("rust", RUST),
    ("java", JAVA),
    ("go", GO),
    ("cpp", CPP),
    ("c", C),
    ("bash", BASH),
    ("sql", SQL),
];

/// Alternative spellings of the canonical tags.
const ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("py", "python"),
    ("rs", "rust"),
    ("golang", "go"),
    ("c++", "cpp"),
    ("cc", "cpp"),
    ("h", "c"),
    ("sh", "bash"),
    ("shell", "bash"),
    ("zsh", "bash"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve a fence language tag to its canonical table name.
pub fn canonical_language(language: &str) -> Option<&'static str> {
    let tag = language.trim().to_ascii_lowercase();

    ALIASES
        .iter()
        .find(|(alias, _)| *alias == tag)
        .map(|(_, canonical)| *canonical)
        .or_else(|| {
            KEYWORD_TABLE
                .iter()
                .find(|(name, _)| *name == tag)
                .map(|(name, _)| *name)
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
