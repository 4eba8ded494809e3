//! Shared test doubles for pipeline integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use rfptuner::{Document, DocumentPair, LanguageModel, Result, TunerError};
use std::sync::{Mutex, Once};

static INIT: Once = Once::new();

/// Initializes tracing for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Which of the three prompt kinds a call was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Extract,
    Relevance,
    Answer,
}

/// One recorded model call
#[derive(Debug, Clone)]
pub struct Call {
    pub kind: CallKind,
    pub prompt: String,
}

type Responder = Box<dyn Fn(usize, &str) -> Result<String> + Send + Sync>;

/// Deterministic model: one responder per prompt kind, each receiving the
/// per-kind call index and the prompt.
pub struct ScriptedModel {
    extract: Responder,
    relevance: Responder,
    answer: Responder,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedModel {
    /// No sections anywhere, every page irrelevant, empty answers
    pub fn new() -> Self {
        Self {
            extract: Box::new(|_, _| Ok("[]".to_string())),
            relevance: Box::new(|_, _| Ok("NO".to_string())),
            answer: Box::new(|_, _| Ok(String::new())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_extract(mut self, f: impl Fn(usize, &str) -> Result<String> + Send + Sync + 'static) -> Self {
        self.extract = Box::new(f);
        self
    }

    pub fn on_relevance(mut self, f: impl Fn(usize, &str) -> Result<String> + Send + Sync + 'static) -> Self {
        self.relevance = Box::new(f);
        self
    }

    pub fn on_answer(mut self, f: impl Fn(usize, &str) -> Result<String> + Send + Sync + 'static) -> Self {
        self.answer = Box::new(f);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.kind == kind).count()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &str, json_mode: bool) -> Result<String> {
        let kind = if json_mode {
            CallKind::Extract
        } else if prompt.contains("PROPOSAL EXCERPT") {
            CallKind::Answer
        } else {
            CallKind::Relevance
        };

        let index = {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.iter().filter(|c| c.kind == kind).count();
            calls.push(Call {
                kind,
                prompt: prompt.to_string(),
            });
            index
        };

        match kind {
            CallKind::Extract => (self.extract)(index, prompt),
            CallKind::Relevance => (self.relevance)(index, prompt),
            CallKind::Answer => (self.answer)(index, prompt),
        }
    }
}

/// Connectivity failure as the real client would report it
pub fn connectivity_error() -> TunerError {
    TunerError::Connectivity {
        endpoint: "http://127.0.0.1:11434/api/generate".to_string(),
        model: "llama3".to_string(),
        detail: "connection refused".to_string(),
    }
}

/// Content failure (the backend answered, but badly)
pub fn content_error() -> TunerError {
    TunerError::Protocol {
        status: 500,
        body: "model runner crashed".to_string(),
    }
}

/// JSON array of strings, as the extractor expects from the model
pub fn json_sections(sections: &[&str]) -> String {
    serde_json::to_string(sections).unwrap()
}

pub fn pair(rfp: &str, proposal: &str) -> DocumentPair {
    DocumentPair::new(
        vec![Document::new("rfp.txt", rfp)],
        Document::new("proposal.txt", proposal),
    )
}
