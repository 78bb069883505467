use tracing::debug;

use crate::classify::classify_token;
use crate::models::{ClassifiedToken, Resolution, Token};

/// Result of Stage 1 classification
#[derive(Debug)]
pub struct Stage1Result {
    /// Informative tokens with their labels, in text order
    pub classified: Vec<ClassifiedToken>,
    /// Tokens dropped by the inclusion filter
    pub tokens_dropped: usize,
    /// Tokens where rules and tagger disagreed
    pub conflicts_resolved: usize,
}

/// Execute Stage 1: per-token classification and conflict resolution
///
/// For each tagged token:
/// 1. Drop it unless it is a Spanish word with person evidence
/// 2. Label it with the rule classifier for its tag
/// 3. Read the person asserted by the tagger
/// 4. Merge both labels, rules taking precedence on conflict
pub fn execute_stage1(tokens: &[Token]) -> Stage1Result {
    let mut classified = Vec::with_capacity(tokens.len());
    let mut conflicts_resolved = 0;

    for token in tokens {
        let Some(result) = classify_token(token) else {
            continue;
        };

        if result.resolution == Resolution::RuleOverModel {
            debug!(
                "Conflict on {:?} ({}): rules={} model={}, keeping rules",
                result.text,
                result.tag,
                result.manual_person.as_u8(),
                result.model_person.as_u8()
            );
            conflicts_resolved += 1;
        }

        classified.push(result);
    }

    Stage1Result {
        tokens_dropped: tokens.len() - classified.len(),
        classified,
        conflicts_resolved,
    }
}
