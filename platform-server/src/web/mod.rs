//! Web layer for the platform locator.
//!
//! JSON endpoints for station search, track geodata, stop signals,
//! carriage layouts and per-station train information.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
