pub mod progress;
pub mod quiz;
pub mod seed;

use std::collections::HashMap;

use thiserror::Error;

use crate::models::Tutorial;

pub use progress::{ChapterCursor, ChapterProgress};
pub use quiz::{QuestionOutcome, QuizAttempt, QuizResult};

#[derive(Debug, Error)]
pub enum TutorialError {
    #[error("tutorial has no chapters")]
    NoChapters,

    #[error("chapter {index} is out of range (tutorial has {len})")]
    ChapterOutOfRange { index: usize, len: usize },

    #[error("unknown chapter: {0}")]
    UnknownChapter(String),

    #[error("tutorial has no quiz")]
    NoQuiz,

    #[error("unknown quiz question: {0}")]
    UnknownQuestion(String),

    #[error("question {question_id}: option {option} is out of range (has {options})")]
    OptionOutOfRange {
        question_id: String,
        option: usize,
        options: usize,
    },

    #[error("answer every question before submitting ({answered} of {total} answered)")]
    Incomplete { answered: usize, total: usize },
}

/// Read-only set of tutorials, keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct TutorialLibrary {
    tutorials: HashMap<String, Tutorial>,
}

impl TutorialLibrary {
    pub fn new(tutorials: impl IntoIterator<Item = Tutorial>) -> Self {
        Self {
            tutorials: tutorials.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    pub fn sample() -> Self {
        Self::new([seed::excel_tutorial()])
    }

    pub fn get(&self, slug: &str) -> Option<&Tutorial> {
        self.tutorials.get(slug)
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.tutorials.keys().map(String::as_str)
    }
}

/// Grades a full set of answers in one go.
pub fn grade_quiz<'a>(
    tutorial: &Tutorial,
    answers: impl IntoIterator<Item = (&'a str, usize)>,
) -> Result<QuizResult, TutorialError> {
    let quiz = tutorial.quiz.as_ref().ok_or(TutorialError::NoQuiz)?;
    let mut attempt = QuizAttempt::new(quiz);
    for (question_id, option) in answers {
        attempt.answer(question_id, option)?;
    }
    attempt.grade()
}
