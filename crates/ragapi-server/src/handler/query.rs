//! Question answering handler.
//!
//! Retrieves the closest documents for the question, builds a prompt from
//! them and asks the language model for an answer.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;

use crate::extract::{Json, ValidateQuery};
use crate::handler::Result;
use crate::handler::request::QueryParams;
use crate::handler::response::{ErrorResponse, QueryAnswer};
use crate::service::{RagService, ServiceState};

/// Tracing target for question answering.
const TRACING_TARGET: &str = "ragapi_server::handler::query";

/// Answers a question using retrieved documents as context.
#[tracing::instrument(skip_all, fields(n_results = params.n_results))]
async fn answer_query(
    State(rag): State<RagService>,
    ValidateQuery(params): ValidateQuery<QueryParams>,
) -> Result<Json<QueryAnswer>> {
    tracing::debug!(
        target: TRACING_TARGET,
        question_length = params.q.len(),
        "Answering question"
    );

    let answer = rag.answer(&params.q, params.limit()).await?;

    tracing::info!(
        target: TRACING_TARGET,
        context_used = answer.context_used,
        "Question answered"
    );

    Ok(Json(answer.into()))
}

fn answer_query_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Answer a question")
        .description(
            "Retrieves up to `n_results` documents similar to `q`, passes them to the \
             language model as context and returns the generated answer.",
        )
        .response::<200, Json<QueryAnswer>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<502, Json<ErrorResponse>>()
        .response::<503, Json<ErrorResponse>>()
        .response::<504, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with the question answering route.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/query", post_with(answer_query, answer_query_docs))
        .with_path_items(|item| item.tag("Retrieval"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use ragapi_core::mock::{MOCK_ANSWER, MockGenerationProvider, MockRetrievalProvider};

    use super::*;
    use crate::handler::test::create_test_server;

    fn documents() -> MockRetrievalProvider {
        MockRetrievalProvider::new([
            "Paris is the capital of France.",
            "Berlin is the capital of Germany.",
            "Madrid is the capital of Spain.",
        ])
    }

    #[tokio::test]
    async fn answers_with_single_document_by_default() -> anyhow::Result<()> {
        let generation = MockGenerationProvider::default();
        let server = create_test_server(documents(), &generation)?;

        let response = server
            .post("/query")
            .add_query_param("q", "What is the capital of France?")
            .await;
        response.assert_status_ok();

        let answer = response.json::<QueryAnswer>();
        assert_eq!(answer.answer, MOCK_ANSWER);
        assert!(answer.context_used);

        let prompts = generation.prompts().await;
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].model, "tinyllama");
        assert_eq!(
            prompts[0].prompt,
            "Context:\nParis is the capital of France.\n\n\
             Question: What is the capital of France?\n\n\
             Answer clearly and concisely:"
        );
        Ok(())
    }

    #[tokio::test]
    async fn joins_requested_documents() -> anyhow::Result<()> {
        let generation = MockGenerationProvider::default();
        let server = create_test_server(documents(), &generation)?;

        server
            .post("/query")
            .add_query_param("q", "Capitals?")
            .add_query_param("n_results", 2)
            .await
            .assert_status_ok();

        let prompts = generation.prompts().await;
        assert!(prompts[0].prompt.starts_with(
            "Context:\nParis is the capital of France.\n\nBerlin is the capital of Germany.\n\n"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn empty_collection_answers_without_context() -> anyhow::Result<()> {
        let generation = MockGenerationProvider::new("I don't know.");
        let server = create_test_server(MockRetrievalProvider::default(), &generation)?;

        let response = server
            .post("/query")
            .add_query_param("q", "Anything?")
            .add_query_param("n_results", 10)
            .await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!({
            "answer": "I don't know.",
            "context_used": false,
        }));
        Ok(())
    }

    #[tokio::test]
    async fn blank_question_is_rejected() -> anyhow::Result<()> {
        let generation = MockGenerationProvider::default();
        let server = create_test_server(documents(), &generation)?;

        let response = server.post("/query").add_query_param("q", "   ").await;
        response.assert_status_bad_request();

        let body = response.json::<ErrorResponse>();
        assert_eq!(body.detail, "Query cannot be empty");
        assert!(generation.prompts().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_question_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server(documents(), &MockGenerationProvider::default())?;

        let response = server.post("/query").await;
        response.assert_status_bad_request();

        let body = response.json::<ErrorResponse>();
        assert_eq!(body.detail, "Missing required query parameter 'q'");
        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_results_are_rejected() -> anyhow::Result<()> {
        let server = create_test_server(documents(), &MockGenerationProvider::default())?;

        for n_results in [0, 11, -3] {
            let response = server
                .post("/query")
                .add_query_param("q", "Capitals?")
                .add_query_param("n_results", n_results)
                .await;
            response.assert_status_bad_request();

            let body = response.json::<ErrorResponse>();
            assert_eq!(body.detail, "n_results must be between 1 and 10");
        }
        Ok(())
    }

    #[tokio::test]
    async fn blank_question_is_reported_before_results() -> anyhow::Result<()> {
        let server = create_test_server(documents(), &MockGenerationProvider::default())?;

        let response = server
            .post("/query")
            .add_query_param("q", "  ")
            .add_query_param("n_results", 0)
            .await;
        response.assert_status_bad_request();

        let body = response.json::<ErrorResponse>();
        assert_eq!(body.detail, "Query cannot be empty");
        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_results_are_rejected()-> anyhow::Result<()> {
        let server = create_test_server(documents(), &MockGenerationProvider::default())?;

        let response = server
            .post("/query")
            .add_query_param("q", "Capitals?")
            .add_query_param("n_results", "many")
            .await;
        response.assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn unavailable_store_is_503() -> anyhow::Result<()> {
        let generation = MockGenerationProvider::default();
        let server = create_test_server(MockRetrievalProvider::default().failing(), &generation)?;

        let response = server.post("/query").add_query_param("q", "Capitals?").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert!(generation.prompts().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn model_failure_is_502() -> anyhow::Result<()> {
        let server = create_test_server(documents(), &MockGenerationProvider::default().failing())?;

        let response = server.post("/query").add_query_param("q", "Capitals?").await;
        response.assert_status(StatusCode::BAD_GATEWAY);

        let body = response.json::<ErrorResponse>();
        assert_eq!(body.name, "bad_gateway");
        assert_eq!(body.resource.as_deref(), Some("model"));
        Ok(())
    }
}
