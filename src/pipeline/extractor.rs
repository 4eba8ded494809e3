//! RFP section extraction
//!
//! One JSON-mode call per page. A page whose call fails or whose answer is
//! not an array contributes nothing; a connectivity failure stops everything.

use crate::errors::Result;
use crate::llm::{parse_json, LanguageModel};
use crate::pipeline::prompts;
use serde_json::Value;
use tracing::{debug, warn};

/// Pulls self-contained sections out of RFP pages
pub struct SectionExtractor<'a> {
    model: &'a dyn LanguageModel,
}

impl<'a> SectionExtractor<'a> {
    pub fn new(model: &'a dyn LanguageModel) -> Self {
        Self { model }
    }

    /// Sections from every page, in page order then model order.
    /// Duplicates across pages are kept.
    pub async fn extract(&self, pages: &[String]) -> Result<Vec<String>> {
        let mut sections = Vec::new();

        for (index, page) in pages.iter().enumerate() {
            let found = self.extract_page(index, page).await?;
            debug!(page = index, count = found.len(), "sections extracted");
            sections.extend(found);
        }

        Ok(sections)
    }

    async fn extract_page(&self, index: usize, page: &str) -> Result<Vec<String>> {
        let prompt = prompts::section_extraction(page);

        let response = match self.model.generate(&prompt, true).await {
            Ok(text) => text,
            Err(e) if e.is_connectivity() => return Err(e),
            Err(e) => {
                warn!(page = index, error = %e, "section extraction failed, skipping page");
                return Ok(Vec::new());
            }
        };

        match parse_json(response.trim()) {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    other => {
                        debug!(page = index, item = %other, "ignoring non-string section");
                        None
                    }
                })
                .collect()),
            other => {
                warn!(page = index, kind = json_kind(&other), "model returned non-array sections");
                Ok(Vec::new())
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
