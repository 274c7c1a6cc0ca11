use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use aria_types::CoachEvent;

use crate::error::ApiResult;
use crate::routes::chat::{validate_message, ChatRequest};
use crate::state::AppState;

/// Stream a coaching reply as Server-Sent Events.
///
/// Emits `message` events with text fragments, then a single `done` event
/// carrying the full reply and whether it is a fallback.
pub async fn chat_stream(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    validate_message(&req.message)?;

    let receiver = Arc::clone(&state.coach).spawn_chat_stream(user_id, req.message);

    let sse_stream =
        UnboundedReceiverStream::new(receiver).map(|event| Ok(to_sse_event(&event)));

    Ok(Sse::new(sse_stream).keep_alive(KeepAlive::default()))
}

fn to_sse_event(event: &CoachEvent) -> Event {
    let data = match event {
        CoachEvent::Message { content } => serde_json::json!({ "content": content }),
        CoachEvent::Done {
            reply,
            fallback,
            error,
        } => serde_json::json!({
            "reply": reply,
            "fallback": fallback,
            "error": error,
        }),
    };

    Event::default().event(event.event_name()).data(data.to_string())
}
