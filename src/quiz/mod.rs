mod parse;
mod question;
mod session;

pub use parse::{parse, ParseError, ParseErrorReason};
pub use question::{Question, QuestionKind, QuizSet};
pub use session::{AnswerOutOfRange, QuizSession, ScoreReport, Verdict};
