use exam_core::model::Question;

use crate::error::ExtractError;

/// A producer of exam questions.
///
/// The exam flow only ever sees this seam, so it can run against PDFs in
/// the app and against fixed question lists in tests.
pub trait QuestionSource: Send + Sync {
    /// Short display name for the source (e.g. the file stem).
    fn label(&self) -> String;

    /// Extracts the questions for one exam run.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError` when the source cannot be read or contains no
    /// questions.
    fn load_questions(&self) -> Result<Vec<Question>, ExtractError>;
}

/// A fixed in-memory question list.
#[derive(Debug, Clone)]
pub struct StaticQuestionSource {
    label: String,
    questions: Vec<Question>,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new(label: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            label: label.into(),
            questions,
        }
    }
}

impl QuestionSource for StaticQuestionSource {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn load_questions(&self) -> Result<Vec<Question>, ExtractError> {
        if self.questions.is_empty() {
            return Err(ExtractError::NoQuestions {
                path: self.label.clone(),
            });
        }
        Ok(self.questions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::OptionLabel;

    #[test]
    fn static_source_returns_its_questions() {
        let question = Question::new(
            "Q",
            ["a", "b", "c", "d"].map(String::from),
            OptionLabel::A,
            "General",
            None,
        )
        .unwrap();
        let source = StaticQuestionSource::new("fixture", vec![question.clone()]);
        assert_eq!(source.label(), "fixture");
        assert_eq!(source.load_questions().unwrap(), vec![question]);
    }

    #[test]
    fn empty_static_source_is_an_error() {
        let source = StaticQuestionSource::new("fixture", Vec::new());
        let err = source.load_questions().unwrap_err();
        assert!(matches!(err, ExtractError::NoQuestions { .. }));
    }
}
