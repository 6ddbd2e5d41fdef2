//! REST API module.
//!
//! One handler module per resource; every handler is a thin
//! validate → store → serialize translation.

mod cases;
mod command;
mod health;
mod intel;
mod metrics;
mod status;
mod timeline;

pub use cases::*;
pub use command::*;
pub use health::*;
pub use intel::*;
pub use metrics::*;
pub use status::*;
pub use timeline::*;

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::errors::AppError;

/// Handler result: a JSON body or an application error.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Result of a create handler: 201 plus the stored record.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

/// Shape a freshly stored record as a 201 response.
pub fn created<T: Serialize>(record: T) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(record)))
}
