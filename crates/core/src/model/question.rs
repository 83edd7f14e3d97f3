use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors raised while building questions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,

    #[error("invalid option label: {0}")]
    InvalidLabel(char),
}

//
// ─── OPTION LABEL ─────────────────────────────────────────────────────────────
//

/// The four answer labels a multiple-choice question carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// All labels in presentation order.
    pub const ALL: [OptionLabel; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Converts a label character (`'A'`–`'D'`) to an `OptionLabel`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidLabel` for any other character.
    pub fn from_char(value: char) -> Result<Self, QuestionError> {
        match value {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            other => Err(QuestionError::InvalidLabel(other)),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Position of this label in the option array.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A multiple-choice question as produced by a question source.
///
/// The trimmed question text doubles as the deduplication key for the
/// statistics store; nothing else about the question is validated here.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    text: String,
    options: [String; 4],
    correct: OptionLabel,
    category: String,
    source_file: Option<String>,
}

impl Question {
    /// Builds a question, trimming the text.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the text is blank.
    pub fn new(
        text: impl Into<String>,
        options: [String; 4],
        correct: OptionLabel,
        category: impl Into<String>,
        source_file: Option<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into().trim().to_owned();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }
        Ok(Self {
            text,
            options,
            correct,
            category: category.into(),
            source_file,
        })
    }

    /// The store key: trimmed question text.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    /// The option text behind a label.
    #[must_use]
    pub fn option(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    #[must_use]
    pub fn correct(&self) -> OptionLabel {
        self.correct
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }

    /// Whether the given label is the correct answer.
    #[must_use]
    pub fn is_correct(&self, label: OptionLabel) -> bool {
        self.correct == label
    }
}

/// Derives a category from a source file name: stem only, no directory,
/// no extension.
#[must_use]
pub fn category_from_file(path: &str) -> Option<String> {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> [String; 4] {
        ["one", "two", "three", "four"].map(String::from)
    }

    #[test]
    fn label_conversion_works() {
        assert_eq!(OptionLabel::from_char('A').unwrap(), OptionLabel::A);
        assert_eq!(OptionLabel::from_char('D').unwrap(), OptionLabel::D);
        let err = OptionLabel::from_char('E').unwrap_err();
        assert!(matches!(err, QuestionError::InvalidLabel('E')));
    }

    #[test]
    fn question_trims_text_for_key() {
        let q = Question::new("  What is 2+2?  ", options(), OptionLabel::B, "Math", None)
            .unwrap();
        assert_eq!(q.key(), "What is 2+2?");
        assert_eq!(q.option(OptionLabel::B), "two");
        assert!(q.is_correct(OptionLabel::B));
        assert!(!q.is_correct(OptionLabel::A));
    }

    #[test]
    fn blank_question_is_rejected() {
        let err = Question::new("   ", options(), OptionLabel::A, "Math", None).unwrap_err();
        assert!(matches!(err, QuestionError::EmptyText));
    }

    #[test]
    fn category_comes_from_file_stem() {
        assert_eq!(
            category_from_file("exams/GPDS_2024.pdf").as_deref(),
            Some("GPDS_2024")
        );
        assert_eq!(category_from_file("plain").as_deref(), Some("plain"));
    }
}
