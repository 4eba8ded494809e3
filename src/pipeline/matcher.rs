//! Two-phase answer search in the proposal
//!
//! Phase 1 asks a cheap yes/no question for every proposal page. Phase 2
//! makes a single extraction call over the pages that said yes. Relevance
//! cost grows with page count; the extraction context stays bounded to the
//! relevant subset.

use crate::errors::Result;
use crate::llm::LanguageModel;
use crate::pipeline::prompts;
use tracing::{debug, warn};

/// Locates the proposal passage answering one RFP section
pub struct SectionMatcher<'a> {
    model: &'a dyn LanguageModel,
}

impl<'a> SectionMatcher<'a> {
    pub fn new(model: &'a dyn LanguageModel) -> Self {
        Self { model }
    }

    /// The answering text for `section`, or `None` when no page is relevant
    /// or the extraction produced nothing usable.
    pub async fn find_match(&self, section: &str, pages: &[String]) -> Result<Option<String>> {
        let relevant = self.relevant_pages(section, pages).await?;

        if relevant.is_empty() {
            debug!("no relevant proposal pages");
            return Ok(None);
        }

        let excerpt = relevant
            .iter()
            .map(|&index| pages[index].as_str())
            .collect::<Vec<_>>()
            .join(prompts::PAGE_SEPARATOR);

        let prompt = prompts::answer_extraction(section, &excerpt);
        match self.model.generate(&prompt, false).await {
            Ok(text) => {
                let answer = text.trim();
                if answer.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(answer.to_string()))
                }
            }
            Err(e) if e.is_connectivity() => Err(e),
            Err(e) => {
                warn!(error = %e, "answer extraction failed, leaving section unmatched");
                Ok(None)
            }
        }
    }

    /// Indices of pages judged relevant, in page order
    pub async fn relevant_pages(&self, section: &str, pages: &[String]) -> Result<Vec<usize>> {
        let mut relevant = Vec::new();

        for (index, page) in pages.iter().enumerate() {
            let prompt = prompts::relevance_check(section, page);
            match self.model.generate(&prompt, false).await {
                Ok(text) if is_affirmative(&text) => relevant.push(index),
                Ok(_) => {}
                Err(e) if e.is_connectivity() => return Err(e),
                Err(e) => {
                    warn!(page = index, error = %e, "relevance check failed, treating page as not relevant");
                }
            }
        }

        debug!(relevant = ?relevant, total = pages.len(), "relevance phase done");
        Ok(relevant)
    }
}

/// Substring match on "YES", case-insensitive. Deliberately blunt: any
/// answer containing the token counts, even inside a longer word.
pub fn is_affirmative(response: &str) -> bool {
    response.trim().to_uppercase().contains("YES")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TunerError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers relevance checks from a fixed list and records every call
    struct Judge {
        verdicts: Vec<&'static str>,
        answer: Result<String>,
        calls: Mutex<Vec<bool>>,
    }

    impl Judge {
        fn new(verdicts: Vec<&'static str>, answer: Result<String>) -> Self {
            Self {
                verdicts,
                answer,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn extraction_calls(&self) -> usize {
            self.calls.lock().unwrap().iter().filter(|is_extract| **is_extract).count()
        }
    }

    #[async_trait]
    impl LanguageModel for Judge {
        async fn generate(&self, prompt: &str, json_mode: bool) -> Result<String> {
            assert!(!json_mode);
            let is_extract = prompt.contains("PROPOSAL EXCERPT");
            let mut calls = self.calls.lock().unwrap();
            let relevance_index = calls.iter().filter(|e| !**e).count();
            calls.push(is_extract);
            drop(calls);

            if is_extract {
                return match &self.answer {
                    Ok(text) => Ok(text.clone()),
                    Err(e) if e.is_connectivity() => Err(down()),
                    Err(_) => Err(TunerError::Generic("extraction exploded".to_string())),
                };
            }
            match self.verdicts.get(relevance_index) {
                Some(&"ERR") => Err(TunerError::Generic("bad page".to_string())),
                Some(&"DOWN") => Err(down()),
                Some(v) => Ok(v.to_string()),
                None => Ok("NO".to_string()),
            }
        }
    }

    fn down() -> TunerError {
        TunerError::Connectivity {
            endpoint: "e".to_string(),
            model: "m".to_string(),
            detail: "d".to_string(),
        }
    }

    fn pages(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("proposal page {}", i)).collect()
    }

    #[test]
    fn test_affirmative_policy() {
        assert!(is_affirmative("YES"));
        assert!(is_affirmative("  yes.\n"));
        assert!(is_affirmative("Yes, page 3 covers it"));
        // Blunt substring policy
        assert!(is_affirmative("YESTERDAY I read this, the answer is NO"));
        assert!(!is_affirmative("NO"));
        assert!(!is_affirmative(""));
    }

    #[tokio::test]
    async fn test_no_relevant_pages_skips_extraction() {
        let judge = Judge::new(vec!["NO", "no", "Nope"], Ok("should not be used".to_string()));
        let result = SectionMatcher::new(&judge).find_match("req", &pages(3)).await.unwrap();
        assert!(result.is_none());
        assert_eq!(judge.extraction_calls(), 0);
        assert_eq!(judge.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_relevant_pages_keep_page_order() {
        let judge = Judge::new(vec!["NO", "YES", "yes"], Ok("  the answer  ".to_string()));
        let matcher = SectionMatcher::new(&judge);
        let relevant = matcher.relevant_pages("req", &pages(3)).await.unwrap();
        assert_eq!(relevant, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_answer_is_trimmed() {
        let judge = Judge::new(vec!["YES"], Ok("  the answer \n".to_string()));
        let result = SectionMatcher::new(&judge).find_match("req", &pages(1)).await.unwrap();
        assert_eq!(result.as_deref(), Some("the answer"));
        assert_eq!(judge.extraction_calls(), 1);
    }

    #[tokio::test]
    async fn test_whitespace_answer_is_absent() {
        let judge = Judge::new(vec!["YES"], Ok(" \n\t ".to_string()));
        let result = SectionMatcher::new(&judge).find_match("req", &pages(1)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_extraction_failure_is_soft() {
        let judge = Judge::new(vec!["YES"], Err(TunerError::Generic(String::new())));
        let result = SectionMatcher::new(&judge).find_match("req", &pages(1)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_relevance_error_marks_page_not_relevant() {
        let judge = Judge::new(vec!["ERR", "YES"], Ok("found".to_string()));
        let matcher = SectionMatcher::new(&judge);
        assert_eq!(matcher.relevant_pages("req", &pages(2)).await.unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_relevance_connectivity_failure_propagates() {
        let judge = Judge::new(vec!["YES", "DOWN", "YES"], Ok("found".to_string()));
        let result = SectionMatcher::new(&judge).find_match("req", &pages(3)).await;
        assert!(matches!(result, Err(TunerError::Connectivity { .. })));
        assert_eq!(judge.calls.lock().unwrap().len(), 2);
        assert_eq!(judge.extraction_calls(), 0);
    }

    #[tokio::test]
    async fn test_extraction_connectivity_failure_propagates() {
        let judge = Judge::new(vec!["YES", "YES"], Err(down()));
        let result = SectionMatcher::new(&judge).find_match("req", &pages(2)).await;
        assert!(matches!(result, Err(TunerError::Connectivity { .. })));
        assert_eq!(judge.extraction_calls(), 1);
    }
}
