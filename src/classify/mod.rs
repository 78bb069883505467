pub mod extractor;
pub mod resolver;
pub mod rules;
pub mod validator;

pub use extractor::*;
pub use resolver::*;
pub use rules::*;
pub use validator::*;

use crate::models::{ClassifiedToken, Token};

/// Classify every informative token of a document, preserving order
///
/// Tokens failing the inclusion filter are dropped from the result.
pub fn classify_tokens(tokens: &[Token]) -> Vec<ClassifiedToken> {
    tokens.iter().filter_map(classify_token).collect()
}
