//! Question page parser.
//!
//! Exam PDFs carry one question per page, laid out as labelled segments:
//!
//! ```text
//! Pregunta número: 12
//! <question text>
//! A: <option> B: <option> C: <option> D: <option>
//! Respuesta correcta: B
//! ```
//!
//! A page yields a question only when the whole marker sequence is present
//! in order; anything else (cover pages, instructions, half-rendered text)
//! yields nothing. Line breaks inside a segment collapse to single spaces.

use exam_core::model::{OptionLabel, Question};

const QUESTION_MARKER: &str = "Pregunta número:";
const OPTION_MARKERS: [&str; 4] = ["A:", "B:", "C:", "D:"];
const ANSWER_MARKER: &str = "Respuesta correcta:";

/// Raw parse result, before it is tied to a category and source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub number: u32,
    pub text: String,
    pub options: [String; 4],
    pub correct: OptionLabel,
}

fn take_until<'a>(input: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let at = input.find(marker)?;
    Some((&input[..at], &input[at + marker.len()..]))
}

fn collapse(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses one page of extracted text into a question, if it has one.
#[must_use]
pub fn parse_question_page(page: &str) -> Option<ParsedQuestion> {
    let (_, rest) = take_until(page, QUESTION_MARKER)?;

    let rest = rest.trim_start();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let number: u32 = rest[..digits_end].parse().ok()?;
    let rest = &rest[digits_end..];

    let (text, rest) = take_until(rest, OPTION_MARKERS[0])?;
    let (option_a, rest) = take_until(rest, OPTION_MARKERS[1])?;
    let (option_b, rest) = take_until(rest, OPTION_MARKERS[2])?;
    let (option_c, rest) = take_until(rest, OPTION_MARKERS[3])?;
    let (option_d, rest) = take_until(rest, ANSWER_MARKER)?;

    let label = rest.trim_start().chars().next()?;
    let correct = OptionLabel::from_char(label).ok()?;

    Some(ParsedQuestion {
        number,
        text: collapse(text),
        options: [
            collapse(option_a),
            collapse(option_b),
            collapse(option_c),
            collapse(option_d),
        ],
        correct,
    })
}

/// Parses a page and promotes the result to a full `Question`.
///
/// Returns `None` when the page has no question or the parsed text is
/// blank.
#[must_use]
pub fn question_from_page(
    page: &str,
    category: &str,
    source_file: Option<&str>,
) -> Option<Question> {
    let parsed = parse_question_page(page)?;
    Question::new(
        parsed.text,
        parsed.options,
        parsed.correct,
        category,
        source_file.map(str::to_owned),
    )
    .ok()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
