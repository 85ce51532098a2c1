//! Retrieval-augmented answering.

use std::sync::Arc;

use jiff::Timestamp;
use ragapi_core::{GenerationService, Result, RetrievalService};

/// Tracing target for answer generation.
const TRACING_TARGET: &str = "ragapi_server::service::rag";

/// Separator placed between retrieved documents in the prompt context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Outcome of answering a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagAnswer {
    /// Text generated by the model.
    pub answer: String,
    /// Whether the prompt carried any retrieved context.
    pub context_used: bool,
}

/// Answers questions by retrieving documents and prompting a language model.
///
/// Retrieval and generation each run once per question. Failures are
/// returned as-is so the HTTP layer can map them to 503 and 502.
#[derive(Debug, Clone)]
pub struct RagService {
    retrieval: RetrievalService,
    generation: GenerationService,
    model_name: Arc<str>,
}

impl RagService {
    /// Creates a new service generating with `model_name`.
    pub fn new(
        retrieval: RetrievalService,
        generation: GenerationService,
        model_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            retrieval,
            generation,
            model_name: model_name.into(),
        }
    }

    /// Returns the model used for generation.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Joins retrieved documents into a single context block.
    pub fn build_context(documents: &[String]) -> String {
        documents.join(CONTEXT_SEPARATOR)
    }

    /// Renders the prompt sent to the model.
    pub fn build_prompt(context: &str, question: &str) -> String {
        format!("Context:\n{context}\n\nQuestion: {question}\n\nAnswer clearly and concisely:")
    }

    /// Answers `question` using up to `limit` retrieved documents as context.
    ///
    /// # Errors
    ///
    /// Returns the retrieval error when the vector store cannot be queried and
    /// the generation error when the model fails.
    pub async fn answer(&self, question: &str, limit: usize) -> Result<RagAnswer> {
        let started_at = Timestamp::now();

        let documents = self.retrieval.query(question, limit).await?;
        let context = Self::build_context(&documents);
        let context_used = !context.is_empty();

        tracing::debug!(
            target: TRACING_TARGET,
            documents = documents.len(),
            context_length = context.len(),
            context_used,
            "Context assembled"
        );

        let prompt = Self::build_prompt(&context, question);
        let answer = self.generation.generate(&self.model_name, &prompt).await?;

        let elapsed = Timestamp::now().duration_since(started_at);
        tracing::info!(
            target: TRACING_TARGET,
            model = %self.model_name,
            documents = documents.len(),
            context_used,
            answer_length = answer.len(),
            elapsed_ms = elapsed.as_millis(),
            "Question answered"
        );

        Ok(RagAnswer {
            answer,
            context_used,
        })
    }
}
