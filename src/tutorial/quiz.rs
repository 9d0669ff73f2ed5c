use std::collections::HashMap;

use serde::Serialize;

use super::TutorialError;
use crate::models::Quiz;

/// Answers recorded against one quiz, keyed by question id.
#[derive(Debug)]
pub struct QuizAttempt<'q> {
    quiz: &'q Quiz,
    answers: HashMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub chosen: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResult {
    pub correct: usize,
    pub total: usize,
    pub score_percent: u8,
    pub outcomes: Vec<QuestionOutcome>,
}

impl<'q> QuizAttempt<'q> {
    pub fn new(quiz: &'q Quiz) -> Self {
        Self {
            quiz,
            answers: HashMap::new(),
        }
    }

    /// Records (or replaces) the answer to one question.
    pub fn answer(&mut self, question_id: &str, option: usize) -> Result<(), TutorialError> {
        let question = self
            .quiz
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| TutorialError::UnknownQuestion(question_id.to_string()))?;

        if option >= question.options.len() {
            return Err(TutorialError::OptionOutOfRange {
                question_id: question_id.to_string(),
                option,
                options: question.options.len(),
            });
        }

        self.answers.insert(question.id.clone(), option);
        Ok(())
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        self.quiz.questions.iter().all(|q| self.answers.contains_key(&q.id))
    }

    pub fn grade(&self) -> Result<QuizResult, TutorialError> {
        if !self.is_complete() {
            return Err(TutorialError::Incomplete {
                answered: self.answered(),
                total: self.quiz.questions.len(),
            });
        }

        let outcomes: Vec<QuestionOutcome> = self
            .quiz
            .questions
            .iter()
            .map(|q| {
                let chosen = self.answers[&q.id];
                QuestionOutcome {
                    question_id: q.id.clone(),
                    chosen,
                    correct_answer: q.correct_answer,
                    is_correct: chosen == q.correct_answer,
                    explanation: q.explanation.clone(),
                }
            })
            .collect();

        let correct = outcomes.iter().filter(|o| o.is_correct).count();
        let total = outcomes.len();
        let score_percent = if total == 0 {
            100
        } else {
            ((correct * 100) / total) as u8
        };

        Ok(QuizResult {
            correct,
            total,
            score_percent,
            outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutorial::seed::excel_tutorial;

    #[test]
    fn test_grade_requires_every_answer() {
        let tutorial = excel_tutorial();
        let quiz = tutorial.quiz.as_ref().unwrap();
        let mut attempt = QuizAttempt::new(quiz);

        attempt.answer("1", 0).unwrap();
        assert!(!attempt.is_complete());
        assert!(matches!(
            attempt.grade(),
            Err(TutorialError::Incomplete { answered: 1, total: 2 })
        ));

        attempt.answer("2", 3).unwrap();
        let result = attempt.grade().unwrap();
        assert_eq!(result.correct, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.score_percent, 50);
        assert!(result.outcomes[0].is_correct);
        assert!(!result.outcomes[1].is_correct);
    }

    #[test]
    fn test_answer_can_be_changed() {
        let tutorial = excel_tutorial();
        let mut attempt = QuizAttempt::new(tutorial.quiz.as_ref().unwrap());
        attempt.answer("1", 2).unwrap();
        attempt.answer("1", 0).unwrap();
        attempt.answer("2", 1).unwrap();
        assert_eq!(attempt.answered(), 2);
        assert_eq!(attempt.grade().unwrap().score_percent, 100);
    }

    #[test]
    fn test_rejects_unknown_question_and_option() {
        let tutorial = excel_tutorial();
        let mut attempt = QuizAttempt::new(tutorial.quiz.as_ref().unwrap());
        assert!(matches!(attempt.answer("9", 0), Err(TutorialError::UnknownQuestion(_))));
        assert!(matches!(
            attempt.answer("1", 4),
            Err(TutorialError::OptionOutOfRange { option: 4, options: 4, .. })
        ));
        assert_eq!(attempt.answered(), 0);
    }
}
