use std::path::{Path, PathBuf};

use pdf_oxide::document::PdfDocument;
use rand::rng;
use rand::seq::SliceRandom;

use exam_core::model::{Question, category_from_file};

use crate::error::ExtractError;
use crate::parser;
use crate::source::QuestionSource;

/// How many questions one exam run draws from a document.
pub const DEFAULT_QUESTION_LIMIT: usize = 10;

/// Extracts questions from an exam PDF.
///
/// The first page is the cover and is skipped; the remaining pages are
/// visited in shuffled order so each run draws a fresh mix, stopping once
/// the limit is reached. The category is the file stem.
pub struct PdfQuestionSource {
    path: PathBuf,
    limit: usize,
}

impl PdfQuestionSource {
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit: DEFAULT_QUESTION_LIMIT,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn category(&self) -> String {
        category_from_file(&self.path.to_string_lossy())
            .unwrap_or_else(|| "General".to_owned())
    }
}

impl QuestionSource for PdfQuestionSource {
    fn label(&self) -> String {
        self.category()
    }

    fn load_questions(&self) -> Result<Vec<Question>, ExtractError> {
        let path = self.path.to_string_lossy().into_owned();
        let mut document = PdfDocument::open(&self.path).map_err(|e| ExtractError::Document {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let page_count = document.page_count().map_err(|e| ExtractError::Document {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        // Page 0 is the cover.
        let mut pages: Vec<_> = (1..page_count).collect();
        pages.as_mut_slice().shuffle(&mut rng());

        let category = self.category();
        let mut questions = Vec::new();
        for page in pages {
            let text = match document.extract_text(page) {
                Ok(text) => text,
                Err(err) => {
                    tracing::debug!(path = %path, %err, "skipping unreadable page");
                    continue;
                }
            };
            if let Some(question) = parser::question_from_page(&text, &category, Some(&path)) {
                questions.push(question);
                if questions.len() == self.limit {
                    break;
                }
            }
        }

        if questions.is_empty() {
            return Err(ExtractError::NoQuestions { path });
        }
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_is_the_file_stem() {
        let source = PdfQuestionSource::open("exams/GPDS_2024.pdf");
        assert_eq!(source.label(), "GPDS_2024");
    }

    #[test]
    fn missing_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = PdfQuestionSource::open(dir.path().join("absent.pdf"));
        let err = source.load_questions().unwrap_err();
        assert!(matches!(err, ExtractError::Document { .. }));
    }

    #[test]
    fn limit_has_a_floor_of_one() {
        let source = PdfQuestionSource::open("exams/x.pdf").with_limit(0);
        assert_eq!(source.limit, 1);
    }
}
