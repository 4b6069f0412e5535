use super::client::{ChatClient, GenerationError};

const SUMMARIZER_INSTRUCTIONS: &str =
    "You are an expert in summarizing texts. Summarize the given text concisely and accurately.";

const QUIZ_CREATOR_INSTRUCTIONS: &str = r#"You are an expert in creating quizzes from text.
Based on the provided text, generate a quiz with 15-20 questions in valid JSON format.
The JSON object must have a single key "questions" which is an array of question objects.
Each question object must have:
1. "type": "MCQ", "T/F", or "FIB"
2. "question": The question text.
3. For "MCQ", an "options" array of exactly 4 strings.
4. For "FIB", the blank part should be represented as "___".
5. "answer": The correct answer. For "MCQ", this is the full text of the correct option."#;

/// Asks the model for a prose summary of the full document text.
pub fn summarize(client: &ChatClient, full_text: &str) -> Result<String, GenerationError> {
    log::info!("requesting summary ({} chars of source text)", full_text.len());
    client.complete(SUMMARIZER_INSTRUCTIONS, full_text)
}

/// Asks the model for a quiz over the full document text. The reply is raw
/// completion text; feeding it through [`crate::quiz::parse`] is the
/// caller's job, and malformed JSON is an expected outcome there.
pub fn generate_quiz(client: &ChatClient, full_text: &str) -> Result<String, GenerationError> {
    log::info!("requesting quiz ({} chars of source text)", full_text.len());
    client.complete(QUIZ_CREATOR_INSTRUCTIONS, full_text)
}
