//! Decoded documents and RFP/proposal pairs

use crate::errors::{Result, TunerError};
use serde::{Deserialize, Serialize};

/// Marker placed before each RFP file when several files form one RFP
pub fn file_header(name: &str) -> String {
    format!("--- FILE: {} ---", name)
}

/// A named piece of decoded text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub content: String,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// One RFP (one or more files) and its proposal.
///
/// The proposal side is a list so that a pair still being assembled can be
/// represented; only pairs with exactly one proposal file are processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPair {
    pub rfp_files: Vec<Document>,
    pub proposal_files: Vec<Document>,
}

impl DocumentPair {
    /// Pair with a single proposal
    pub fn new(rfp_files: Vec<Document>, proposal: Document) -> Self {
        Self {
            rfp_files,
            proposal_files: vec![proposal],
        }
    }

    /// At least one RFP file and exactly one proposal file
    pub fn is_complete(&self) -> bool {
        !self.rfp_files.is_empty() && self.proposal_files.len() == 1
    }

    /// The proposal, when there is exactly one
    pub fn proposal(&self) -> Option<&Document> {
        match self.proposal_files.as_slice() {
            [single] => Some(single),
            _ => None,
        }
    }

    /// All RFP files as one text, each preceded by a header naming its file
    pub fn combined_rfp_text(&self) -> String {
        self.rfp_files
            .iter()
            .map(|doc| format!("{}\n{}", file_header(&doc.name), doc.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Fails with `NoCompletePairs` unless at least one pair can be processed
pub fn ensure_complete_pairs(pairs: &[DocumentPair]) -> Result<()> {
    if pairs.iter().any(DocumentPair::is_complete) {
        Ok(())
    } else {
        Err(TunerError::NoCompletePairs)
    }
}
