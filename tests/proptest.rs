//! Property-based tests for mockdown.
//!
//! Generated documents and inline text exercise the pipeline's structural
//! guarantees: no stage panics, segmentation is a pure function of its
//! input and covers every line, and stripping inline markers leaves the
//! surrounding text untouched.

use proptest::prelude::*;

use mockdown_ansi::utils::{visible, visible_length, wrap_ansi};
use mockdown_core::{plain_text, Variant};
use mockdown_math::latex_to_unicode;
use mockdown_parser::{parse_inline, segment, tokenize, InlineProfile};
use mockdown_render::{render_document, Painter};

/// Lines built from the constructs the segmenter recognises.
fn document_strategy() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        prop::string::string_regex(r"[a-z *_`~$]{0,20}").unwrap(),
        prop::string::string_regex(r"#{1,6} [a-z ]{0,10}").unwrap(),
        prop::string::string_regex(r"[-*+] [a-z]{0,8}").unwrap(),
        prop::string::string_regex(r"[0-9]{1,2}\. [a-z]{0,8}").unwrap(),
        prop::string::string_regex(r"> ?[a-z]{0,8}").unwrap(),
        prop::string::string_regex(r"\|? ?[a-z]{0,4} ?\| ?[a-z]{0,4} ?\|?").unwrap(),
        Just("|---|---|".to_string()),
        Just("```".to_string()),
        Just("```py".to_string()),
        Just("---".to_string()),
        Just(String::new()),
    ];
    prop::collection::vec(line, 0..30).prop_map(|lines| lines.join("\n"))
}

/// One inline piece: (marker, content) where content has no marker characters.
fn piece_strategy() -> impl Strategy<Value = (&'static str, String)> {
    (
        prop_oneof![
            Just(""),
            Just("**"),
            Just("_"),
            Just("`"),
            Just("~~"),
        ],
        prop::string::string_regex(r"[a-z][a-z ]{0,6}[a-z]").unwrap(),
    )
}

proptest! {
    #[test]
    fn segment_never_panics(s in r"[\x20-\x7E\n\t]*") {
        let _ = segment(&s);
    }

    #[test]
    fn tokenize_never_panics(s in r"[\x20-\x7E\t]*") {
        let _ = tokenize(&s);
    }

    #[test]
    fn parse_inline_never_panics(s in r"[\x20-\x7E\t]*") {
        for profile in [InlineProfile::Chat, InlineProfile::Assistant, InlineProfile::Markdown] {
            let _ = parse_inline(&s, &profile.options());
        }
    }

    #[test]
    fn latex_never_panics(s in r"[\x20-\x7E]*") {
        for display in [false, true] {
            let _ = latex_to_unicode(&s, display);
        }
    }

    #[test]
    fn segment_is_idempotent(doc in document_strategy()) {
        prop_assert_eq!(segment(&doc), segment(&doc));
    }

    #[test]
    fn blocks_cover_every_line(doc in document_strategy()) {
        let blocks = segment(&doc);
        let lines: Vec<String> = doc.lines().map(String::from).collect();

        if lines.iter().all(|l| l.trim().is_empty()) {
            prop_assert!(blocks.is_empty());
        } else {
            prop_assert_eq!(blocks[0].start_line, 0);
            for pair in blocks.windows(2) {
                prop_assert_eq!(pair[0].end_line(), pair[1].start_line);
            }
            prop_assert_eq!(blocks.last().map(|b| b.end_line()), Some(lines.len()));

            let rejoined: Vec<String> = blocks.iter().flat_map(|b| b.raw_lines.clone()).collect();
            prop_assert_eq!(rejoined, lines);
        }
    }

    #[test]
    fn marker_removal_reconstructs_text(pieces in prop::collection::vec(piece_strategy(), 0..8)) {
        let marked: String = pieces
            .iter()
            .map(|(marker, content)| format!("{marker}{content}{marker}"))
            .collect();
        let expected: String = pieces.iter().map(|(_, content)| content.as_str()).collect();

        prop_assert_eq!(plain_text(&tokenize(&marked)), expected);
    }

    #[test]
    fn render_and_paint_never_panic(doc in document_strategy(), width in 1usize..120) {
        for variant in [Variant::Full, Variant::Compact, Variant::Minimal] {
            let nodes = render_document(&segment(&doc), variant);
            let lines = Painter::new(width).paint(&nodes);
            for line in &lines {
                let _ = visible(line);
            }
        }
    }

    #[test]
    fn wrapped_lines_fit(words in prop::collection::vec("[a-z]{1,8}", 0..20), width in 10usize..60) {
        let text = words.join(" ");
        for line in wrap_ansi(&text, width) {
            prop_assert!(visible_length(&line) <= width);
        }
    }
}
