//! Language tag normalization.
//!
//! Fence tags arrive in whatever spelling the author used (`JS`, `py3`,
//! `shell`). They are normalized in two steps:
//!
//! 1. [`normalize_language`] maps an alias to a canonical lowercase name
//!    (`js` → `javascript`), with empty and plain-text tags mapped to
//!    `plain`. Unknown tags pass through unchanged.
//! 2. [`syntax_name`] maps a canonical name to the syntect syntax name
//!    used to look up a definition.

use mockdown_core::PLAIN_LANGUAGE;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Alias → canonical language name. Keys are lowercase.
pub static LANGUAGE_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Plain text
    m.insert("text", PLAIN_LANGUAGE);
    m.insert("txt", PLAIN_LANGUAGE);
    m.insert("plaintext", PLAIN_LANGUAGE);

    // Scripting
    m.insert("js", "javascript");
    m.insert("node", "javascript");
    m.insert("nodejs", "javascript");
    m.insert("mjs", "javascript");
    m.insert("ts", "typescript");
    m.insert("py", "python");
    m.insert("py3", "python");
    m.insert("python3", "python");
    m.insert("rb", "ruby");
    m.insert("pl", "perl");

    // Shell
    m.insert("sh", "bash");
    m.insert("shell", "bash");
    m.insert("zsh", "bash");
    m.insert("console", "bash");

    // Systems
    m.insert("rs", "rust");
    m.insert("golang", "go");
    m.insert("c++", "cpp");
    m.insert("cxx", "cpp");
    m.insert("hpp", "cpp");
    m.insert("h", "c");
    m.insert("cs", "csharp");
    m.insert("c#", "csharp");
    m.insert("kt", "kotlin");
    m.insert("hs", "haskell");

    // Data and markup
    m.insert("yml", "yaml");
    m.insert("jsonc", "json");
    m.insert("md", "markdown");
    m.insert("htm", "html");
    m.insert("xhtml", "html");
    m.insert("svg", "xml");
    m.insert("tex", "latex");
    m.insert("postgres", "sql");
    m.insert("postgresql", "sql");
    m.insert("mysql", "sql");
    m.insert("sqlite", "sql");

    // Tooling
    m.insert("patch", "diff");
    m.insert("make", "makefile");
    m.insert("mk", "makefile");
    m.insert("docker", "dockerfile");
    m.insert("ps1", "powershell");
    m.insert("bat", "batch");
    m.insert("cmd", "batch");

    m
});

/// Canonical language name → syntect syntax name.
pub static SYNTAX_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(PLAIN_LANGUAGE, "Plain Text");
    m.insert("javascript", "JavaScript");
    m.insert("typescript", "TypeScript");
    m.insert("python", "Python");
    m.insert("ruby", "Ruby");
    m.insert("perl", "Perl");
    m.insert("php", "PHP");
    m.insert("lua", "Lua");
    m.insert("bash", "Bourne Again Shell (bash)");
    m.insert("rust", "Rust");
    m.insert("go", "Go");
    m.insert("c", "C");
    m.insert("cpp", "C++");
    m.insert("csharp", "C#");
    m.insert("java", "Java");
    m.insert("kotlin", "Kotlin");
    m.insert("swift", "Swift");
    m.insert("scala", "Scala");
    m.insert("haskell", "Haskell");
    m.insert("ocaml", "OCaml");
    m.insert("erlang", "Erlang");
    m.insert("clojure", "Clojure");
    m.insert("r", "R");
    m.insert("d", "D");
    m.insert("yaml", "YAML");
    m.insert("json", "JSON");
    m.insert("toml", "TOML");
    m.insert("xml", "XML");
    m.insert("html", "HTML");
    m.insert("css", "CSS");
    m.insert("markdown", "Markdown");
    m.insert("latex", "LaTeX");
    m.insert("sql", "SQL");
    m.insert("diff", "Diff");
    m.insert("makefile", "Makefile");
    m.insert("dockerfile", "Dockerfile");
    m.insert("powershell", "PowerShell");
    m.insert("batch", "Batch File");

    m
});

/// Normalize a fence language tag.
///
/// Lookup is case-insensitive. Empty and plain-text tags become
/// [`PLAIN_LANGUAGE`]; aliases become their canonical name; known canonical
/// names are lowercased. Anything else is returned trimmed but otherwise
/// unchanged.
///
/// # Example
/// ```
/// use mockdown_syntax::normalize_language;
///
/// assert_eq!(normalize_language("JS"), "javascript");
/// assert_eq!(normalize_language("sh"), "bash");
/// assert_eq!(normalize_language(""), "plain");
/// assert_eq!(normalize_language("Brainfuck"), "Brainfuck");
/// ```
pub fn normalize_language(tag: &str) -> String {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return PLAIN_LANGUAGE.to_string();
    }

    let lower = trimmed.to_lowercase();
    if let Some(canonical) = LANGUAGE_ALIASES.get(lower.as_str()) {
        return canonical.to_string();
    }
    if SYNTAX_NAMES.contains_key(lower.as_str()) {
        return lower;
    }
    trimmed.to_string()
}

/// Syntect syntax name for a canonical language, if one is mapped.
pub fn syntax_name(language: &str) -> Option<&'static str> {
    SYNTAX_NAMES.get(language).copied()
}

/// All aliases that normalize to `language`.
pub fn aliases_for(language: &str) -> Vec<&'static str> {
    let mut aliases: Vec<_> = LANGUAGE_ALIASES
        .iter()
        .filter_map(|(alias, canonical)| (*canonical == language).then_some(*alias))
        .collect();
    aliases.sort_unstable();
    aliases
}
