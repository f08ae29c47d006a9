//! HTTP API for the Overtime Extraction Engine.
//!
//! Exposes the engine's single operation over a `POST /extract` route.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EntryRequest, ExtractionRequest, PolicyRequest, PolicySelector};
pub use response::{ApiError, ApiErrorResponse, ExtractionResponse};
pub use state::AppState;
