use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{TagError, Tagger};
use crate::models::Token;

/// A document tagged ahead of time: its text and the tagger's raw triples
#[derive(Debug, Clone, Deserialize)]
pub struct PretaggedDocument {
    pub text: String,
    /// `(text, tag, morphology)` triples in text order
    pub tokens: Vec<(String, String, String)>,
}

/// Tagger serving token sequences that were produced offline
///
/// Lookup is by exact document text.
#[derive(Debug, Clone, Default)]
pub struct PretaggedTagger {
    documents: HashMap<String, Vec<Token>>,
}

impl PretaggedTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of pre-tagged documents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let documents: Vec<PretaggedDocument> =
            serde_json::from_str(json).context("Failed to parse pre-tagged JSON")?;

        let mut tagger = Self::new();
        for doc in documents {
            let tokens = doc
                .tokens
                .iter()
                .map(|(text, tag, morph)| Token::from_triple(text, tag, morph))
                .collect();
            tagger.insert(doc.text, tokens);
        }
        Ok(tagger)
    }

    /// Register the tokens for a document text, replacing earlier ones
    pub fn insert(&mut self, text: impl Into<String>, tokens: Vec<Token>) {
        self.documents.insert(text.into(), tokens);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Tagger for PretaggedTagger {
    async fn tag(&self, text: &str) -> Result<Vec<Token>, TagError> {
        self.documents
            .get(text)
            .cloned()
            .ok_or_else(|| TagError::UnknownDocument(text.to_string()))
    }
}
