//! Inline visual content.
//!
//! Converts the parser's spans into [`InlineNode`]s, typesetting math on
//! the way. A math expression the typesetter rejects (or panics on) is kept
//! as its raw source and flagged with `fallback`.

use log::warn;
use mockdown_core::{Span, SpanKind};
use mockdown_math::Typesetter;
use mockdown_parser::{parse_inline, InlineOptions};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// One styled run of inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    Text(String),
    Bold(String),
    Italic(String),
    Strike(String),
    Code(String),
    Link {
        label: String,
        href: String,
    },
    Math {
        /// Expression as written, delimiters stripped
        source: String,
        /// Typeset text, or `source` when `fallback` is set
        text: String,
        display: bool,
        fallback: bool,
    },
}

impl InlineNode {
    /// The text a reader sees.
    pub fn visible_text(&self) -> &str {
        match self {
            InlineNode::Text(s)
            | InlineNode::Bold(s)
            | InlineNode::Italic(s)
            | InlineNode::Strike(s)
            | InlineNode::Code(s) => s,
            InlineNode::Link { label, .. } => label,
            InlineNode::Math { text, .. } => text,
        }
    }

    pub fn is_display_math(&self) -> bool {
        matches!(self, InlineNode::Math { display: true, .. })
    }
}

/// Concatenated visible text of a node sequence.
pub fn visible_text(nodes: &[InlineNode]) -> String {
    nodes.iter().map(InlineNode::visible_text).collect()
}

/// Parse `text` and convert the spans to inline nodes.
pub fn build_inline(text: &str, options: &InlineOptions, typesetter: &dyn Typesetter) -> Vec<InlineNode> {
    parse_inline(text, options)
        .into_iter()
        .map(|span| span_to_node(span, typesetter))
        .collect()
}

/// Convert one span.
pub fn span_to_node(span: Span, typesetter: &dyn Typesetter) -> InlineNode {
    match span.kind {
        SpanKind::Text => InlineNode::Text(span.content),
        SpanKind::Bold => InlineNode::Bold(span.content),
        SpanKind::Italic => InlineNode::Italic(span.content),
        SpanKind::Strikethrough => InlineNode::Strike(span.content),
        SpanKind::Code => InlineNode::Code(span.content),
        SpanKind::Link => {
            let href = span.href.unwrap_or_else(|| span.content.clone());
            InlineNode::Link {
                label: span.content,
                href,
            }
        }
        SpanKind::MathInline => typeset_math(span.content, false, typesetter),
        SpanKind::MathDisplay => typeset_math(span.content, true, typesetter),
    }
}

fn typeset_math(source: String, display: bool, typesetter: &dyn Typesetter) -> InlineNode {
    let result = catch_unwind(AssertUnwindSafe(|| typesetter.typeset(&source, display)));

    let typeset = match result {
        Ok(Ok(text)) => Some(text),
        Ok(Err(e)) => {
            warn!("math fallback for {:?}: {}", source, e);
            None
        }
        Err(_) => {
            warn!("math typesetter panicked on {:?}", source);
            None
        }
    };

    match typeset {
        Some(text) => InlineNode::Math {
            source,
            text,
            display,
            fallback: false,
        },
        None => InlineNode::Math {
            text: source.clone(),
            source,
            display,
            fallback: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockdown_core::{MockdownError, Result};
    use mockdown_math::UnicodeTypesetter;
    use mockdown_parser::InlineProfile;

    struct Panicking;

    impl Typesetter for Panicking {
        fn typeset(&self, _expression: &str, _display: bool) -> Result<String> {
            panic!("typesetter exploded");
        }
    }

    struct Failing;

    impl Typesetter for Failing {
        fn typeset(&self, _expression: &str, _display: bool) -> Result<String> {
            Err(MockdownError::Typeset("nope".to_string()))
        }
    }

    #[test]
    fn test_markdown_spans() {
        let nodes = build_inline(
            "**bold** and [docs](https://x.io)",
            &InlineProfile::Markdown.options(),
            &UnicodeTypesetter::new(),
        );
        assert_eq!(
            nodes,
            vec![
                InlineNode::Bold("bold".to_string()),
                InlineNode::Text(" and ".to_string()),
                InlineNode::Link {
                    label: "docs".to_string(),
                    href: "https://x.io".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_math_typeset() {
        let nodes = build_inline(
            r"area $\pi r^2$",
            &InlineProfile::Assistant.options(),
            &UnicodeTypesetter::new(),
        );
        assert_eq!(nodes.len(), 2);
        match &nodes[1] {
            InlineNode::Math {
                source,
                text,
                display,
                fallback,
            } => {
                assert_eq!(source, r"\pi r^2");
                assert_eq!(text, "π r²");
                assert!(!display);
                assert!(!fallback);
            }
            other => panic!("expected math, got {:?}", other),
        }
    }

    #[test]
    fn test_math_error_falls_back() {
        let node = span_to_node(Span::math_display(r"\frac{a}{b"), &UnicodeTypesetter::new());
        assert_eq!(
            node,
            InlineNode::Math {
                source: r"\frac{a}{b".to_string(),
                text: r"\frac{a}{b".to_string(),
                display: true,
                fallback: true,
            }
        );

        let node = span_to_node(Span::math_inline("x"), &Failing);
        assert!(matches!(node, InlineNode::Math { fallback: true, .. }));
    }

    #[test]
    fn test_math_panic_falls_back() {
        let node = span_to_node(Span::math_inline("x+1"), &Panicking);
        assert_eq!(node.visible_text(), "x+1");
        assert!(matches!(node, InlineNode::Math { fallback: true, .. }));
    }

    #[test]
    fn test_visible_text() {
        let nodes = vec![
            InlineNode::Text("a ".to_string()),
            InlineNode::Code("b".to_string()),
            InlineNode::Link {
                label: "c".to_string(),
                href: "https://c".to_string(),
            },
        ];
        assert_eq!(visible_text(&nodes), "a bc");
    }
}
