//! Question answering response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::service::RagAnswer;

/// Answer produced for a question.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QueryAnswer {
    /// Text generated by the language model.
    pub answer: String,
    /// Whether any retrieved documents were included in the prompt.
    pub context_used: bool,
}

impl From<RagAnswer> for QueryAnswer {
    fn from(answer: RagAnswer) -> Self {
        Self {
            answer: answer.answer,
            context_used: answer.context_used,
        }
    }
}
