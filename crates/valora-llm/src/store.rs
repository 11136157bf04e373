//! Disclosure documents and where they come from.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{LlmError, Result};

/// A question put to the company and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    /// The question.
    pub question: String,
    /// The company's answer.
    pub answer: String,
}

/// Disclosure text plus the Q&A gathered for one company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureDocument {
    /// Full document text.
    pub text: String,
    /// Question-and-answer pairs.
    #[serde(default)]
    pub qas: Vec<QuestionAnswer>,
}

impl DisclosureDocument {
    /// Render the Q&A as `Q: ...\nA: ...` blocks, skipping pairs with a
    /// blank question or answer.
    #[must_use]
    pub fn qa_transcript(&self) -> String {
        self.qas
            .iter()
            .filter(|qa| !qa.question.trim().is_empty() && !qa.answer.trim().is_empty())
            .map(|qa| format!("Q: {}\nA: {}\n\n", qa.question, qa.answer))
            .collect()
    }

    fn ensure_complete(&self, id: &str) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(LlmError::MissingDocument(format!("{id} (document text is empty)")));
        }
        if self.qa_transcript().is_empty() {
            return Err(LlmError::MissingDocument(format!("{id} (no question/answer pairs)")));
        }
        Ok(())
    }
}

/// Source of disclosure documents keyed by an opaque id.
pub trait DocumentStore: Send + Sync {
    /// Fetch a complete document.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingDocument`] if the id is unknown, the text
    /// is empty, or there are no answered questions.
    fn fetch(&self, id: &str) -> Result<DisclosureDocument>;
}

/// A [`DocumentStore`] held in memory.
///
/// The JSON form maps ids to documents:
///
/// ```json
/// { "acme": { "text": "...", "qas": [{ "question": "...", "answer": "..." }] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryDocumentStore {
    documents: HashMap<String, DisclosureDocument>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    pub fn insert(&mut self, id: impl Into<String>, document: DisclosureDocument) {
        self.documents.insert(id.into(), document);
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Parse a store from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Json`] if the text is not a map of documents.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a store from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Io`] if the file cannot be read, or
    /// [`LlmError::Json`] if it cannot be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn fetch(&self, id: &str) -> Result<DisclosureDocument> {
        let document = self
            .documents
            .get(id)
            .ok_or_else(|| LlmError::MissingDocument(id.to_string()))?;
        document.ensure_complete(id)?;
        Ok(document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qa(question: &str, answer: &str) -> QuestionAnswer {
        QuestionAnswer {
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_qa_transcript_skips_blank_pairs() {
        let document = DisclosureDocument {
            text: "doc".to_string(),
            qas: vec![
                qa("Revenue?", "100k"),
                qa("Team size?", ""),
                qa("", "orphan"),
                qa("Stage?", "Startup"),
            ],
        };
        assert_eq!(
            document.qa_transcript(),
            "Q: Revenue?\nA: 100k\n\nQ: Stage?\nA: Startup\n\n"
        );
    }

    #[test]
    fn test_fetch_from_json() {
        let store = InMemoryDocumentStore::from_json_str(
            r#"{
                "acme": { "text": "Acme builds rockets.", "qas": [{ "question": "Stage?", "answer": "Idea" }] },
                "blank": { "text": "  ", "qas": [{ "question": "Stage?", "answer": "Idea" }] },
                "silent": { "text": "No answers here." }
            }"#,
        )
        .unwrap();
        assert_eq!(store.len(), 3);

        let document = store.fetch("acme").unwrap();
        assert_eq!(document.text, "Acme builds rockets.");

        for id in ["blank", "silent", "missing"] {
            assert!(matches!(store.fetch(id), Err(LlmError::MissingDocument(_))));
        }
    }

    #[test]
    fn test_insert_replaces() {
        let mut store = InMemoryDocumentStore::new();
        assert!(store.is_empty());
        store.insert("a", DisclosureDocument::default());
        store.insert(
            "a",
            DisclosureDocument {
                text: "t".to_string(),
                qas: vec![qa("q", "a")],
            },
        );
        assert_eq!(store.len(), 1);
        assert!(store.fetch("a").is_ok());
    }
}
