/// How a question is asked and answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Pick one of the generated options.
    MultipleChoice { options: Vec<String> },
    TrueFalse,
    FillInBlank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// question text shown to the user
    pub prompt: String,

    /// expected answer, compared case- and whitespace-insensitively at
    /// scoring time
    pub answer: String,

    pub kind: QuestionKind,
}

/// The ordered questions generated for one document. Order is display order
/// and the indexing key for answers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizSet(Vec<Question>);

impl QuizSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self(questions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.0.iter()
    }
}
