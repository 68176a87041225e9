// Response formatter: turns the model's free-text answer into typed
// display segments using the markdown-ish conventions Gemini tends to
// follow. This runs on the render path, so it must accept any input.

const PARAGRAPH_SEPARATOR: &str = "\n\n";
const BOLD_MARKER: &str = "**";
const FEATURE_MARKER: &str = "* **";

/// One renderable unit derived from a paragraph of model output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplaySegment {
    /// A section starting with `**`, all bold markers removed.
    Title(String),
    /// A `* **term**: value` bullet.
    Feature { label: String, value: String },
    /// Anything else, passed through unchanged.
    Paragraph(String),
}

/// Split `text` into paragraphs and classify each one. Empty paragraphs
/// produce nothing, so an empty body yields an empty vector.
pub fn format_response(text: &str) -> Vec<DisplaySegment> {
    text.split(PARAGRAPH_SEPARATOR)
        .filter(|section| !section.is_empty())
        .map(classify_section)
        .collect()
}

fn classify_section(section: &str) -> DisplaySegment {
    if section.starts_with(BOLD_MARKER) {
        DisplaySegment::Title(strip_bold(section).trim().to_string())
    } else if section.starts_with(FEATURE_MARKER) {
        // A bullet without a colon keeps the whole section as its label.
        let (label, value) = section.split_once(':').unwrap_or((section, ""));
        let label = strip_bold(label);
        let label = label.trim_start().trim_start_matches('*').trim();
        DisplaySegment::Feature {
            label: label.to_string(),
            value: value.trim().to_string(),
        }
    } else {
        DisplaySegment::Paragraph(section.to_string())
    }
}

fn strip_bold(text: &str) -> String {
    text.replace(BOLD_MARKER, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use DisplaySegment::*;

    fn feature(label: &str, value: &str) -> DisplaySegment {
        Feature {
            label: label.into(),
            value: value.into(),
        }
    }

    #[test]
    fn keeps_paragraph_order_and_strips_markers() {
        let segments = format_response("A\n\n**B**\n\n* **C**: D");
        assert_eq!(
            segments,
            vec![Paragraph("A".into()), Title("B".into()), feature("C", "D")]
        );
    }

    #[test]
    fn removes_every_bold_marker_from_titles() {
        let segments = format_response("**Bold** and **more**");
        assert_eq!(segments, vec![Title("Bold and more".into())]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(format_response("").is_empty());
        assert!(format_response("\n\n\n\n").is_empty());
    }

    #[test]
    fn whitespace_only_section_is_kept_as_paragraph() {
        assert_eq!(
            format_response("A\n\n \n\nB"),
            vec![
                Paragraph("A".into()),
                Paragraph(" ".into()),
                Paragraph("B".into()),
            ]
        );
    }

    #[test]
    fn same_input_same_output() {
        let text = "**Rust**\n\n* **Speed**: fast\n\nplain text";
        assert_eq!(format_response(text), format_response(text));
    }

    #[test]
    fn feature_without_colon_has_empty_value() {
        let segments = format_response("* **Lonely term**");
        assert_eq!(segments, vec![feature("Lonely term", "")]);
    }

    #[test]
    fn feature_value_keeps_later_colons() {
        let segments = format_response("* **Opens at**: 10:30 sharp");
        assert_eq!(segments, vec![feature("Opens at", "10:30 sharp")]);
    }

    #[test]
    fn feature_value_is_not_parsed_further() {
        let segments = format_response("* **Term**: see **this**\n* nested");
        assert_eq!(segments, vec![feature("Term", "see **this**\n* nested")]);
    }

    #[test]
    fn plain_bullets_and_text_stay_paragraphs() {
        let input = "* just a bullet\n\nSome *emphasis* here.";
        assert_eq!(
            format_response(input),
            vec![
                Paragraph("* just a bullet".into()),
                Paragraph("Some *emphasis* here.".into()),
            ]
        );
    }

    #[test]
    fn paragraphs_are_passed_through_untrimmed() {
        let segments = format_response("  indented line  \n\n**T**");
        assert_eq!(
            segments,
            vec![Paragraph("  indented line  ".into()), Title("T".into())]
        );
    }

    #[test]
    fn malformed_markers_do_not_panic() {
        for input in ["**", "* **", "* **:", ":", "***", "* ** : **", "\n\n**\n\n"] {
            let _ = format_response(input);
        }
        assert_eq!(format_response("**"), vec![Title(String::new())]);
        assert_eq!(format_response("* **:"), vec![feature("", "")]);
    }
}
