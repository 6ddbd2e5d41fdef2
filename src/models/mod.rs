//! Data models for the Crime Connect backend.
//!
//! Each record kind lives in its own collection; the `Document` trait ties a
//! type to its collection name and the timestamp field its listings sort by.

mod case;
mod command;
mod intel;
mod status;
mod timeline;

pub use case::*;
pub use command::*;
pub use intel::*;
pub use status::*;
pub use timeline::*;

use serde::{de::DeserializeOwned, Serialize};

/// A record storable in the document table.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Collection the record belongs to.
    const COLLECTION: &'static str;
    /// Field listings of this record sort by, descending.
    const TIMESTAMP_FIELD: &'static str;

    fn id(&self) -> &str;
}
