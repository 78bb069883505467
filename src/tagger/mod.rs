pub mod client;
pub mod pretagged;

pub use client::*;
pub use pretagged::*;

use std::future::Future;

use thiserror::Error;

use crate::models::Token;

/// Errors raised while tagging a single document
#[derive(Debug, Error)]
pub enum TagError {
    #[error("tagger request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("tagger returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("no pre-tagged tokens for document text {0:?}")]
    UnknownDocument(String),
}

/// Morphological tagger producing `(text, tag, morphology)` tokens for a text
///
/// The pipeline depends only on this trait, so tests can plug in a
/// deterministic fake instead of a real model.
pub trait Tagger: Send + Sync {
    fn tag(&self, text: &str) -> impl Future<Output = Result<Vec<Token>, TagError>> + Send;
}
