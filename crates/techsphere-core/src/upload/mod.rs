//! Upload domain types, events, errors and the batch handle.
//!
//! This module contains the data types shared between the CMS workflow and
//! the upload coordinator implementation. Transfers themselves live in the
//! `techsphere-upload` crate.
//!
//! # Structure
//!
//! - `types` - Identifiers, requests and progress snapshots
//! - `events` - Upload events (`UploadEvent`)
//! - `errors` - Error types for transfers
//! - `batch` - Handle to an in-flight batch (`UploadBatch`)

pub mod batch;
pub mod errors;
pub mod events;
pub mod types;

pub use batch::{BatchFailure, CompletedUpload, TaskOutcome, TaskResultReceiver, UploadBatch};
pub use errors::{UploadError, UploadResult};
pub use events::UploadEvent;
pub use types::{
    BatchId, BatchProgress, COMPLETE_PERCENT, MAX_IN_FLIGHT_PERCENT, UploadBatchRequest,
    UploadFile, UploadStatus, UploadTaskSnapshot, destination_key,
};
