use tracing::debug;

use crate::models::{SourceRecord, Token};
use crate::tagger::{TagError, Tagger};

/// Execute Stage 0: morphological tagging of one document
///
/// Documents with empty or whitespace-only text are never sent to the
/// tagger; they yield no tokens.
pub async fn execute_stage0<T: Tagger>(
    tagger: &T,
    record: &SourceRecord,
) -> Result<Vec<Token>, TagError> {
    if record.text.trim().is_empty() {
        debug!("Document {}: empty text, skipping tagger", record.id);
        return Ok(Vec::new());
    }

    let tokens = tagger.tag(&record.text).await?;
    debug!("Document {}: {} tokens tagged", record.id, tokens.len());

    Ok(tokens)
}
