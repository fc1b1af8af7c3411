use crate::normalize::NormalizedQuestion;

/// System instruction sent alongside every prompt unless configured otherwise.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful, concise assistant.";

/// Final line of every prompt.
pub const ANSWER_CUE: &str = "Answer:";

const INSTRUCTIONS: &str =
    "Answer concisely and clearly. If more information is needed, ask one short clarifying question.";

/// Wraps a normalized question in the fixed prompt template.
pub fn build_prompt(question: &NormalizedQuestion) -> String {
    format!(
        "Original question: {}\nProcessed question: {}\n\n{INSTRUCTIONS}\n\n{ANSWER_CUE}\n",
        question.original, question.processed
    )
}
