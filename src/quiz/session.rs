use std::collections::HashMap;

use thiserror::Error;

use super::question::{Question, QuizSet};

#[derive(Error, Debug)]
#[error("answer index {index} is out of range for a quiz of {len} questions")]
pub struct AnswerOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Outcome of grading a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect { submitted: String, expected: String },

    /// No reliable comparison could be made: the user never answered, or
    /// the question carried no correct answer. Counts toward the total but
    /// neither for nor against the score.
    Indeterminate,
}

/// Per-question verdicts in display order plus the final tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub verdicts: Vec<Verdict>,
    pub score: usize,
    pub total: usize,
}

/// Owns one quiz through the render / answer / check cycle. Lives only for
/// the duration of one document's interactive session.
#[derive(Debug, Default)]
pub struct QuizSession {
    quiz: QuizSet,
    answers: HashMap<usize, String>,
    checked: bool,
}

impl QuizSession {
    pub fn new(quiz: QuizSet) -> Self {
        Self {
            quiz,
            answers: HashMap::new(),
            checked: false,
        }
    }

    pub fn quiz(&self) -> &QuizSet {
        &self.quiz
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Replaces the quiz wholesale. Prior answers and the checked flag are
    /// discarded, never merged.
    pub fn load_quiz(&mut self, quiz: QuizSet) {
        self.quiz = quiz;
        self.answers.clear();
        self.checked = false;
    }

    /// Stores (or overwrites) the user's answer for one question. The value
    /// is not validated against the question shape here; grading happens in
    /// [`check`](Self::check).
    pub fn record_answer(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), AnswerOutOfRange> {
        if index >= self.quiz.len() {
            return Err(AnswerOutOfRange {
                index,
                len: self.quiz.len(),
            });
        }
        self.answers.insert(index, value.into());
        Ok(())
    }

    /// Grades the current answers. Repeated calls recompute from the same
    /// state and return the same report.
    pub fn check(&mut self) -> ScoreReport {
        self.checked = true;

        let mut verdicts = Vec::with_capacity(self.quiz.len());
        let mut score = 0;

        for (index, question) in self.quiz.iter().enumerate() {
            let verdict = grade(question, self.answers.get(&index));
            if matches!(verdict, Verdict::Correct) {
                score += 1;
            }
            verdicts.push(verdict);
        }

        ScoreReport {
            verdicts,
            score,
            total: self.quiz.len(),
        }
    }
}

fn grade(question: &Question, submitted: Option<&String>) -> Verdict {
    let Some(submitted) = submitted else {
        return Verdict::Indeterminate;
    };
    if question.answer.is_empty() {
        return Verdict::Indeterminate;
    }

    if normalize(submitted) == normalize(&question.answer) {
        Verdict::Correct
    } else {
        Verdict::Incorrect {
            submitted: submitted.clone(),
            expected: question.answer.clone(),
        }
    }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuestionKind;

    fn fib(prompt: &str, answer: &str) -> Question {
        Question {
            prompt: prompt.into(),
            answer: answer.into(),
            kind: QuestionKind::FillInBlank,
        }
    }

    fn three_question_set() -> QuizSet {
        QuizSet::new(vec![
            fib("capital of France?", "Paris"),
            fib("2+2?", "4"),
            fib("sky color?", "blue"),
        ])
    }

    #[test]
    fn trims_and_lowercases_before_comparing() {
        let mut session = QuizSession::new(QuizSet::new(vec![fib("capital of France?", "Paris")]));
        session.record_answer(0, " paris ").unwrap();

        let report = session.check();
        assert_eq!(report.verdicts, vec![Verdict::Correct]);
        assert_eq!(report.score, 1);
    }

    #[test]
    fn unanswered_questions_are_indeterminate_but_still_counted() {
        let mut session = QuizSession::new(three_question_set());
        session.record_answer(0, "Paris").unwrap();
        session.record_answer(2, "green").unwrap();

        let report = session.check();
        assert_eq!(report.total, 3);
        assert_eq!(report.score, 1);
        assert_eq!(report.verdicts[1], Verdict::Indeterminate);
        assert_eq!(
            report.verdicts[2],
            Verdict::Incorrect {
                submitted: "green".into(),
                expected: "blue".into()
            }
        );
    }

    #[test]
    fn empty_correct_answer_is_indeterminate() {
        let mut session = QuizSession::new(QuizSet::new(vec![fib("mystery", "")]));
        session.record_answer(0, "anything").unwrap();

        let report = session.check();
        assert_eq!(report.verdicts, vec![Verdict::Indeterminate]);
        assert_eq!(report.score, 0);
        assert_eq!(report.total, 1);
    }

    #[test]
    fn check_is_deterministic() {
        let mut session = QuizSession::new(three_question_set());
        session.record_answer(0, "paris").unwrap();

        let first = session.check();
        let second = session.check();
        assert_eq!(first, second);
        assert!(session.is_checked());
    }

    #[test]
    fn answers_overwrite_previous_entries() {
        let mut session = QuizSession::new(three_question_set());
        session.record_answer(0, "London").unwrap();
        session.record_answer(0, "Paris").unwrap();

        let report = session.check();
        assert_eq!(report.verdicts[0], Verdict::Correct);
    }

    #[test]
    fn load_quiz_resets_answers_and_checked_flag() {
        let mut session = QuizSession::new(three_question_set());
        session.record_answer(0, "Paris").unwrap();
        session.check();
        assert!(session.is_checked());

        session.load_quiz(QuizSet::new(vec![fib("2+2?", "4")]));
        assert!(!session.is_checked());

        // The old answer for index 0 must not leak into the new quiz.
        let report = session.check();
        assert_eq!(report.verdicts, vec![Verdict::Indeterminate]);
        assert_eq!(report.total, 1);
    }

    #[test]
    fn rejects_out_of_range_answers() {
        let mut session = QuizSession::new(three_question_set());
        let err = session.record_answer(3, "nope").unwrap_err();
        assert_eq!(err.index, 3);
        assert_eq!(err.len, 3);
    }
}
