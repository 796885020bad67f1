//! LaTeX to Unicode typesetting.
//!
//! Converts the LaTeX found in chat and assistant messages into plain
//! Unicode text.
//!
//! # Supported conversions
//!
//! - Greek letters: `\alpha` → α, `\Omega` → Ω
//! - Operators: `\sum` → Σ, `\prod` → Π, `\int` → ∫
//! - Relations: `\leq` → ≤, `\neq` → ≠, `\in` → ∈
//! - Arrows and symbols: `\to` → →, `\infty` → ∞, `\pm` → ±
//! - Subscripts: `x_1` → x₁, `x_{10}` → x₁₀
//! - Superscripts: `x^2` → x², `x^{10}` → x¹⁰
//! - Fractions: `\frac{a}{b}` → a/b, `\frac{a+1}{2}` → (a+1)/2
//! - Roots: `\sqrt{2}` → √2
//! - Text: `\text{speed}` → speed
//!
//! Unknown commands are left as written.

use crate::Typesetter;
use log::trace;
use mockdown_core::{MockdownError, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Typesetter producing Unicode text.
///
/// Malformed expressions (unbalanced braces, a dangling backslash, nothing
/// to typeset) are rejected with [`MockdownError::Typeset`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTypesetter;

impl UnicodeTypesetter {
    pub fn new() -> Self {
        Self
    }
}

impl Typesetter for UnicodeTypesetter {
    fn typeset(&self, expression: &str, display: bool) -> Result<String> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(MockdownError::Typeset("empty expression".to_string()));
        }
        check_syntax(expression)?;

        let out = latex_to_unicode(expression, display);
        trace!("typeset {:?} -> {:?}", expression, out);
        Ok(out)
    }
}

/// Reject unbalanced braces and a trailing lone backslash.
fn check_syntax(expression: &str) -> Result<()> {
    let mut depth: i32 = 0;
    let mut chars = expression.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return Err(MockdownError::Typeset(format!(
                        "dangling backslash in {:?}",
                        expression
                    )));
                }
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err(MockdownError::Typeset(format!(
                        "unexpected '}}' in {:?}",
                        expression
                    )));
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(MockdownError::Typeset(format!(
            "{} unclosed '{{' in {:?}",
            depth, expression
        )));
    }
    Ok(())
}

// =============================================================================
// Symbol tables
// =============================================================================

const GREEK: &[(&str, &str)] = &[
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("epsilon", "ε"),
    ("varepsilon", "ε"),
    ("zeta", "ζ"),
    ("eta", "η"),
    ("theta", "θ"),
    ("vartheta", "ϑ"),
    ("iota", "ι"),
    ("kappa", "κ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("xi", "ξ"),
    ("pi", "π"),
    ("rho", "ρ"),
    ("sigma", "σ"),
    ("tau", "τ"),
    ("upsilon", "υ"),
    ("phi", "φ"),
    ("varphi", "ϕ"),
    ("chi", "χ"),
    ("psi", "ψ"),
    ("omega", "ω"),
    ("Gamma", "Γ"),
    ("Delta", "Δ"),
    ("Theta", "Θ"),
    ("Lambda", "Λ"),
    ("Xi", "Ξ"),
    ("Pi", "Π"),
    ("Sigma", "Σ"),
    ("Phi", "Φ"),
    ("Psi", "Ψ"),
    ("Omega", "Ω"),
];

const OPERATORS: &[(&str, &str)] = &[
    ("sum", "Σ"),
    ("prod", "Π"),
    ("int", "∫"),
    ("iint", "∬"),
    ("oint", "∮"),
    ("partial", "∂"),
    ("nabla", "∇"),
    ("times", "×"),
    ("div", "÷"),
    ("cdot", "·"),
    ("circ", "∘"),
    ("oplus", "⊕"),
    ("otimes", "⊗"),
    ("cap", "∩"),
    ("cup", "∪"),
    ("setminus", "∖"),
    ("land", "∧"),
    ("wedge", "∧"),
    ("lor", "∨"),
    ("vee", "∨"),
    ("neg", "¬"),
];

const RELATIONS: &[(&str, &str)] = &[
    ("leq", "≤"),
    ("le", "≤"),
    ("geq", "≥"),
    ("ge", "≥"),
    ("neq", "≠"),
    ("ne", "≠"),
    ("approx", "≈"),
    ("equiv", "≡"),
    ("sim", "∼"),
    ("cong", "≅"),
    ("propto", "∝"),
    ("ll", "≪"),
    ("gg", "≫"),
    ("subset", "⊂"),
    ("supset", "⊃"),
    ("subseteq", "⊆"),
    ("supseteq", "⊇"),
    ("in", "∈"),
    ("notin", "∉"),
    ("forall", "∀"),
    ("exists", "∃"),
];

const SYMBOLS: &[(&str, &str)] = &[
    ("infty", "∞"),
    ("pm", "±"),
    ("mp", "∓"),
    ("to", "→"),
    ("rightarrow", "→"),
    ("leftarrow", "←"),
    ("leftrightarrow", "↔"),
    ("Rightarrow", "⇒"),
    ("Leftarrow", "⇐"),
    ("Leftrightarrow", "⇔"),
    ("implies", "⇒"),
    ("iff", "⇔"),
    ("mapsto", "↦"),
    ("ldots", "…"),
    ("cdots", "⋯"),
    ("dots", "…"),
    ("therefore", "∴"),
    ("because", "∵"),
    ("angle", "∠"),
    ("perp", "⊥"),
    ("parallel", "∥"),
    ("emptyset", "∅"),
    ("varnothing", "∅"),
    ("aleph", "ℵ"),
    ("hbar", "ℏ"),
    ("ell", "ℓ"),
    ("prime", "′"),
    ("degree", "°"),
    ("quad", " "),
    ("qquad", "  "),
];

/// Function names typeset upright, without the backslash.
const FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "sec", "csc", "cot", "arcsin", "arccos", "arctan", "sinh", "cosh",
    "tanh", "log", "ln", "exp", "lim", "max", "min", "sup", "inf", "det", "gcd", "deg", "arg",
];

static COMMANDS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    GREEK
        .iter()
        .chain(OPERATORS)
        .chain(RELATIONS)
        .chain(SYMBOLS)
        .copied()
        .chain(FUNCTIONS.iter().map(|f| (*f, *f)))
        .collect()
});

/// Characters with a Unicode subscript form, paired by position.
const SUBSCRIPT_FROM: &str = "0123456789+-=()aehijklmnoprstuvx";
const SUBSCRIPT_TO: &str = "₀₁₂₃₄₅₆₇₈₉₊₋₌₍₎ₐₑₕᵢⱼₖₗₘₙₒₚᵣₛₜᵤᵥₓ";

/// Characters with a Unicode superscript form, paired by position.
const SUPERSCRIPT_FROM: &str = "0123456789+-=()abcdefghijklmnoprstuvwxyz";
const SUPERSCRIPT_TO: &str = "⁰¹²³⁴⁵⁶⁷⁸⁹⁺⁻⁼⁽⁾ᵃᵇᶜᵈᵉᶠᵍʰⁱʲᵏˡᵐⁿᵒᵖʳˢᵗᵘᵛʷˣʸᶻ";

static SUBSCRIPTS: LazyLock<HashMap<char, char>> =
    LazyLock::new(|| SUBSCRIPT_FROM.chars().zip(SUBSCRIPT_TO.chars()).collect());

static SUPERSCRIPTS: LazyLock<HashMap<char, char>> =
    LazyLock::new(|| SUPERSCRIPT_FROM.chars().zip(SUPERSCRIPT_TO.chars()).collect());

/// Stand-ins for escaped braces while grouping braces are being removed.
const OPEN_BRACE: char = '\u{E000}';
const CLOSE_BRACE: char = '\u{E001}';

// =============================================================================
// Regex patterns
// =============================================================================

static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\\\\\s*").unwrap());

static SIZING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(?:left|right|[bB]igg?[lr]?)\b\s*").unwrap());

static TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:text|textrm|mathrm|mathbf|mathit|mathsf|mathtt|operatorname)\{([^{}]*)\}")
        .unwrap()
});

static ESCAPED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\([$&#%])").unwrap());

static SPACING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\[,;: !]").unwrap());

static SQRT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\sqrt\{([^{}]*)\}").unwrap());

static FRAC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[dt]?frac\{([^{}]*)\}\{([^{}]*)\}").unwrap());

static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\([a-zA-Z]+)").unwrap());

static BRACED_SUB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_\{([^{}]+)\}").unwrap());

static SINGLE_SUB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([0-9a-z])").unwrap());

static BRACED_SUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\^\{([^{}]+)\}").unwrap());

static SINGLE_SUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\^([0-9a-z])").unwrap());

// =============================================================================
// Conversion
// =============================================================================

/// Convert a LaTeX expression to Unicode text.
///
/// Lenient: never fails, and leaves anything it does not understand in
/// place. `display` turns `\\` line breaks into newlines instead of spaces.
pub fn latex_to_unicode(latex: &str, display: bool) -> String {
    let mut s = latex
        .replace(r"\{", &OPEN_BRACE.to_string())
        .replace(r"\}", &CLOSE_BRACE.to_string());

    let line_break = if display { "\n" } else { " " };
    s = LINE_BREAK_RE.replace_all(&s, line_break).into_owned();
    s = SIZING_RE.replace_all(&s, "").into_owned();
    s = TEXT_RE.replace_all(&s, "$1").into_owned();
    s = ESCAPED_RE.replace_all(&s, "$1").into_owned();
    s = SPACING_RE
        .replace_all(&s, |caps: &Captures| if &caps[0] == r"\!" { "" } else { " " })
        .into_owned();
    s = convert_commands(&s);
    s = convert_roots(&s);
    s = convert_fractions(&s);
    s = convert_scripts(&s, &BRACED_SUB_RE, &SINGLE_SUB_RE, &SUBSCRIPTS, '_');
    s = convert_scripts(&s, &BRACED_SUP_RE, &SINGLE_SUP_RE, &SUPERSCRIPTS, '^');

    s.chars()
        .filter(|&c| c != '{' && c != '}')
        .map(|c| match c {
            OPEN_BRACE => '{',
            CLOSE_BRACE => '}',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn convert_commands(input: &str) -> String {
    COMMAND_RE
        .replace_all(input, |caps: &Captures| match COMMANDS.get(&caps[1]) {
            Some(symbol) => (*symbol).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn convert_roots(input: &str) -> String {
    SQRT_RE
        .replace_all(input, |caps: &Captures| format!("√{}", group(&caps[1])))
        .into_owned()
}

/// Innermost fractions first, until none are left.
fn convert_fractions(input: &str) -> String {
    let mut s = input.to_string();
    while FRAC_RE.is_match(&s) {
        s = FRAC_RE
            .replace_all(&s, |caps: &Captures| {
                format!("{}/{}", group(&caps[1]), group(&caps[2]))
            })
            .into_owned();
    }
    s
}

/// Parenthesize a compound operand so `a+1/2` is not misread.
fn group(operand: &str) -> String {
    let operand = operand.trim();
    let compound = operand.chars().count() > 1
        && operand.contains(|c: char| matches!(c, '+' | '-' | '*' | '/' | ' ' | '='));
    if compound {
        format!("({})", operand)
    } else {
        operand.to_string()
    }
}

/// Replace `_{..}`/`^{..}` and `_x`/`^x` with script characters.
///
/// A braced group is only converted when every character has a script
/// form; otherwise it is written as `_(..)` so nothing is lost.
fn convert_scripts(
    input: &str,
    braced: &Regex,
    single: &Regex,
    table: &HashMap<char, char>,
    marker: char,
) -> String {
    let s = braced.replace_all(input, |caps: &Captures| {
        let content = &caps[1];
        content
            .chars()
            .map(|c| table.get(&c).copied())
            .collect::<Option<String>>()
            .unwrap_or_else(|| format!("{}({})", marker, content))
    });

    single
        .replace_all(&s, |caps: &Captures| {
            caps[1]
                .chars()
                .next()
                .and_then(|c| table.get(&c))
                .map(|c| c.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(expression: &str) -> String {
        UnicodeTypesetter::new().typeset(expression, false).unwrap()
    }

    #[test]
    fn test_script_tables_pair_up() {
        assert_eq!(SUBSCRIPT_FROM.chars().count(), SUBSCRIPT_TO.chars().count());
        assert_eq!(SUPERSCRIPT_FROM.chars().count(), SUPERSCRIPT_TO.chars().count());
    }

    #[test]
    fn test_greek_letters() {
        assert_eq!(ts(r"\alpha + \beta"), "α + β");
        assert_eq!(ts(r"\Gamma\Delta"), "ΓΔ");
        assert_eq!(ts(r"\pi r^2"), "π r²");
    }

    #[test]
    fn test_relations_and_symbols() {
        assert_eq!(ts(r"x \leq y"), "x ≤ y");
        assert_eq!(ts(r"a \neq b"), "a ≠ b");
        assert_eq!(ts(r"x \to \infty"), "x → ∞");
        assert_eq!(ts(r"\pm 1"), "± 1");
    }

    #[test]
    fn test_longest_command_wins() {
        assert_eq!(ts(r"x \in A \cap B"), "x ∈ A ∩ B");
        assert_eq!(ts(r"\int f"), "∫ f");
    }

    #[test]
    fn test_subscripts() {
        assert_eq!(ts("x_1"), "x₁");
        assert_eq!(ts("x_{12}"), "x₁₂");
        assert_eq!(ts("a_n"), "aₙ");
    }

    #[test]
    fn test_superscripts() {
        assert_eq!(ts("x^2"), "x²");
        assert_eq!(ts("x^{10}"), "x¹⁰");
        assert_eq!(ts("E = mc^2"), "E = mc²");
    }

    #[test]
    fn test_unconvertible_script_kept_readable() {
        assert_eq!(ts(r"e^{i\pi}"), "e^(iπ)");
        assert_eq!(ts("x_q"), "x_q");
    }

    #[test]
    fn test_sum_with_limits() {
        assert_eq!(ts(r"\sum_{i=1}^n x_i"), "Σᵢ₌₁ⁿ xᵢ");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(ts(r"\frac{a}{b}"), "a/b");
        assert_eq!(ts(r"\frac{a+1}{2}"), "(a+1)/2");
        assert_eq!(ts(r"\frac{\frac{1}{2}}{3}"), "(1/2)/3");
    }

    #[test]
    fn test_roots_and_text() {
        assert_eq!(ts(r"\sqrt{2}"), "√2");
        assert_eq!(ts(r"\sqrt{x+1}"), "√(x+1)");
        assert_eq!(ts(r"\text{speed} = d/t"), "speed = d/t");
    }

    #[test]
    fn test_sizing_and_escapes() {
        assert_eq!(ts(r"\left( x \right)"), "( x )");
        assert_eq!(ts(r"\{ x \}"), "{ x }");
        assert_eq!(ts(r"50\%"), "50%");
        assert_eq!(ts(r"\sin x"), "sin x");
    }

    #[test]
    fn test_unknown_command_kept() {
        assert_eq!(ts(r"\foo x"), r"\foo x");
    }

    #[test]
    fn test_line_breaks() {
        let t = UnicodeTypesetter::new();
        assert_eq!(t.typeset(r"a \\ b", true).unwrap(), "a\nb");
        assert_eq!(t.typeset(r"a \\ b", false).unwrap(), "a b");
    }

    #[test]
    fn test_malformed_is_error() {
        let t = UnicodeTypesetter::new();
        assert!(matches!(
            t.typeset(r"\frac{a}{b", false),
            Err(MockdownError::Typeset(_))
        ));
        assert!(t.typeset("a}", false).is_err());
        assert!(t.typeset(r"x \", false).is_err());
        assert!(t.typeset("   ", true).is_err());
    }

    #[test]
    fn test_lenient_conversion_never_fails() {
        assert_eq!(latex_to_unicode(r"\alpha{", false), "α");
    }
}
