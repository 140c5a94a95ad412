//! Assistant and content-enhancer handlers.
//!
//! The Q&A endpoint answers in one response; the enhancers stream their
//! output as server-sent events so long generations render as they arrive.

use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    response::sse::{Event, Sse},
    response::Json,
    routing::post,
    Router,
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::infra::{ChatMessage, TextFragments};

/// Question for the store assistant
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AskRequest {
    /// Prior turns of the conversation, oldest first
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[validate(length(min = 1, message = "Question cannot be empty"))]
    pub question: String,
}

/// Assistant answer
#[derive(Debug, Serialize, ToSchema)]
pub struct AskResponse {
    pub answer: String,
}

/// Create assistant routes
pub fn assistant_routes() -> Router<AppState> {
    Router::new().route("/ask", post(ask))
}

/// Create enhancer routes, mounted under /products
pub fn enhancer_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/summarize-reviews", post(summarize_reviews))
        .route("/:id/seo", post(generate_seo))
}

/// Turn text fragments into an SSE response.
///
/// Fragments become data events; an error mid-stream becomes one `error`
/// event and ends the stream.
fn stream_response(fragments: TextFragments) -> Sse<impl futures::Stream<Item = Result<Event, Infallible>>> {
    let events = fragments.map(|fragment| {
        Ok(match fragment {
            Ok(text) => Event::default().data(text),
            Err(e) => Event::default().event("error").data(e.to_string()),
        })
    });
    Sse::new(events)
}

/// Ask the store assistant a question
#[utoipa::path(
    post,
    path = "/assistant/ask",
    tag = "Assistant",
    request_body = AskRequest,
    responses(
        (status = 200, description = "The grounded answer", body = AskResponse),
        (status = 400, description = "Validation error"),
        (status = 502, description = "The chat service failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn ask(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AskRequest>,
) -> AppResult<Json<AskResponse>> {
    let answer = state
        .assistant
        .ask(payload.history, &payload.question)
        .await?;
    Ok(Json(AskResponse { answer }))
}

/// Stream a summary of a product's reviews
#[utoipa::path(
    post,
    path = "/products/{id}/summarize-reviews",
    tag = "Assistant",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Summary fragments as server-sent events"),
        (status = 400, description = "The product has no reviews"),
        (status = 404, description = "No such product")
    ),
    security(("bearer_auth" = []))
)]
pub async fn summarize_reviews(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Sse<impl futures::Stream<Item = Result<Event, Infallible>>>> {
    let fragments = state.assistant.summarize_reviews(id).await?;
    Ok(stream_response(fragments))
}

/// Stream a search-optimized product description
#[utoipa::path(
    post,
    path = "/products/{id}/seo",
    tag = "Assistant",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Description fragments as server-sent events"),
        (status = 404, description = "No such product")
    ),
    security(("bearer_auth" = []))
)]
pub async fn generate_seo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Sse<impl futures::Stream<Item = Result<Event, Infallible>>>> {
    let fragments = state.assistant.generate_seo(id).await?;
    Ok(stream_response(fragments))
}
