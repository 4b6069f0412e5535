mod client;
mod tasks;

pub use client::{ChatClient, GenerationError};
pub use tasks::{generate_quiz, summarize};
