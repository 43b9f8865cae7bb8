//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{
        IntoResponse, Response, Sse,
        sse::{Event, KeepAlive},
    },
    routing::{get, post},
};
use futures::{Stream, StreamExt};
use tracing::{error, info, warn};

use crate::split::{JourneySearchProvider, ProgressEvent};
use crate::vendo::{ConversionError, convert_journey};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<P: JourneySearchProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/split-journey", post(split_journey::<P>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Analyse a journey for split-ticket savings.
async fn split_journey<P: JourneySearchProvider + 'static>(
    State(state): State<AppState<P>>,
    payload: Result<Json<SplitJourneyRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    let journey = convert_journey(&request.original_journey)?;
    let rider = request.rider();

    info!(
        legs = journey.legs().len(),
        streaming = request.use_streaming,
        "split journey requested"
    );

    let events = state.analyzer.analyze(journey, rider);

    if request.use_streaming {
        Ok(stream_events(events).into_response())
    } else {
        respond_once(events).await
    }
}

/// Forward analysis progress as server-sent events.
///
/// The stream ends after the terminal event. If the client disconnects the
/// stream is dropped, which cancels the analysis.
fn stream_events(
    events: impl Stream<Item = ProgressEvent> + Send + 'static,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>> + Send + 'static> {
    let stream = events.map(|event| Event::default().json_data(StreamMessage::from(event)));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Wait for the analysis to finish and answer with one JSON body.
async fn respond_once(
    mut events: impl Stream<Item = ProgressEvent> + Unpin,
) -> Result<Response, AppError> {
    let mut total = 0;

    while let Some(event) = events.next().await {
        match event {
            ProgressEvent::Start { total: t } => total = t,
            ProgressEvent::Complete {
                results,
                original_price,
            } => {
                let response = SplitJourneyResponse {
                    success: true,
                    split_options: results,
                    original_price,
                    message: (total == 0).then(|| "No split points found".to_string()),
                };
                return Ok(Json(response).into_response());
            }
            ProgressEvent::Error { message } => return Err(AppError::BadRequest { message }),
            ProgressEvent::Processing { .. } | ProgressEvent::PointDone { .. } => {}
        }
    }

    Err(AppError::Internal {
        message: "analysis ended without a result".to_string(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<ConversionError> for AppError {
    fn from(e: ConversionError) -> Self {
        AppError::BadRequest {
            message: format!("Invalid originalJourney: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
