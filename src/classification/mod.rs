//! Classification Gateway: free-text symptoms to a specialist label.
//!
//! The gateway is total from the caller's side: every transport or service
//! failure is logged and converted into [`FALLBACK_LABEL`]. The label it
//! returns is still untrusted; `reconcile` decides what it means.

pub mod gateway;
pub mod ollama;
pub mod prompt;
pub mod types;

pub use gateway::*;
pub use ollama::*;
pub use prompt::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("Language model service is not reachable at {0}")]
    Connection(String),

    #[error("Language model service returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Language model returned an empty response")]
    EmptyResponse,

    #[error("Classification task failed: {0}")]
    Task(String),
}
