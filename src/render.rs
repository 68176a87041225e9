// Terminal rendering of formatted responses. Everything writes to a
// generic `Write` so the output can be captured in tests.

use crate::api::RawResponse;
use crate::formatter::DisplaySegment;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};

const ACCENT: Color = Color::Rgb {
    r: 0x00,
    g: 0xff,
    b: 0xe6,
};
const RULE: &str = "────────────────────────────────────────";

/// Render every candidate of a response, separated by a rule line.
pub fn render_response<W: Write>(out: &mut W, response: &RawResponse) -> io::Result<()> {
    for (index, candidate) in response.candidates.iter().enumerate() {
        if index > 0 {
            queue!(out, SetForegroundColor(Color::DarkGrey), Print(RULE), ResetColor, Print("\n\n"))?;
        }
        render_segments(out, &candidate.segments())?;
    }
    out.flush()
}

pub fn render_segments<W: Write>(out: &mut W, segments: &[DisplaySegment]) -> io::Result<()> {
    for segment in segments {
        match segment {
            DisplaySegment::Title(text) => {
                queue!(
                    out,
                    SetForegroundColor(Color::White),
                    SetAttribute(Attribute::Bold),
                    Print(text),
                    SetAttribute(Attribute::Reset),
                    ResetColor,
                    Print("\n")
                )?;
            }
            DisplaySegment::Feature { label, value } => {
                queue!(
                    out,
                    SetForegroundColor(ACCENT),
                    SetAttribute(Attribute::Bold),
                    Print(format!("{label}:")),
                    SetAttribute(Attribute::Reset),
                    SetForegroundColor(ACCENT),
                    Print("\n"),
                    Print(value),
                    ResetColor,
                    Print("\n")
                )?;
            }
            DisplaySegment::Paragraph(text) => {
                queue!(out, SetForegroundColor(ACCENT), Print(text), ResetColor, Print("\n"))?;
            }
        }
        queue!(out, Print("\n"))?;
    }
    Ok(())
}

pub fn render_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    queue!(out, SetForegroundColor(Color::Red), Print(message), ResetColor, Print("\n"))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Candidate;

    fn rendered(segments: &[DisplaySegment]) -> String {
        let mut buf = Vec::new();
        render_segments(&mut buf, segments).expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn segments_appear_in_order() {
        let out = rendered(&[
            DisplaySegment::Paragraph("first".into()),
            DisplaySegment::Title("Second".into()),
            DisplaySegment::Feature {
                label: "Third".into(),
                value: "value".into(),
            },
        ]);
        let first = out.find("first").expect("paragraph");
        let second = out.find("Second").expect("title");
        let third = out.find("Third:").expect("feature label");
        let value = out.find("value").expect("feature value");
        assert!(first < second && second < third && third < value);
    }

    #[test]
    fn nothing_to_render_writes_nothing() {
        assert!(rendered(&[]).is_empty());
    }

    #[test]
    fn multiple_candidates_are_separated() {
        let response = RawResponse {
            candidates: vec![
                Candidate {
                    text: "one".into(),
                    finish_reason: None,
                },
                Candidate {
                    text: "two".into(),
                    finish_reason: None,
                },
            ],
            model_version: None,
        };
        let mut buf = Vec::new();
        render_response(&mut buf, &response).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert_eq!(out.matches(RULE).count(), 1);
        assert!(out.find("one") < out.find("two"));
    }

    #[test]
    fn error_text_is_written() {
        let mut buf = Vec::new();
        render_error(&mut buf, "boom").expect("render");
        assert!(String::from_utf8(buf).expect("utf8").contains("boom"));
    }
}
