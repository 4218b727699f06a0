//! Query condensing: verbose lead description to a short search phrase.

use tracing::{debug, info};

use crate::error::{LeadError, Result};
use crate::prompts::{condense_prompt, CONDENSE_INSTRUCTIONS};
use crate::traits::BaseAI;

/// Turns a free-text persona description into a 3-4 word phrase.
///
/// Stateless: every call is a fresh generation request. Errors from the
/// generation service are returned as-is and end the run.
pub struct QueryCondenser<A> {
    ai: A,
}

impl<A: BaseAI> QueryCondenser<A> {
    pub fn new(ai: A) -> Self {
        Self { ai }
    }

    pub async fn condense(&self, verbose_query: &str) -> Result<String> {
        let raw = self
            .ai
            .complete_with_system(CONDENSE_INSTRUCTIONS, &condense_prompt(verbose_query))
            .await?;

        debug!(raw = %raw, "Condense response");

        let phrase = clean_phrase(&raw);
        if phrase.is_empty() {
            return Err(LeadError::generation("model returned an empty search phrase"));
        }

        info!(phrase = %phrase, "Condensed query");
        Ok(phrase)
    }
}

/// Trim whitespace and one pair of wrapping quotes.
fn clean_phrase(raw: &str) -> String {
    let trimmed = raw.trim();
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAI;

    #[test]
    fn test_clean_phrase() {
        assert_eq!(clean_phrase("  voice cloning technology\n"), "voice cloning technology");
        assert_eq!(clean_phrase("\"AI video editing software\""), "AI video editing software");
        assert_eq!(clean_phrase("'ML fraud detection'"), "ML fraud detection");
        assert_eq!(clean_phrase("\"unbalanced"), "\"unbalanced");
        assert_eq!(clean_phrase("\"\""), "");
    }

    #[tokio::test]
    async fn test_condense_sends_instructions_and_query() {
        let ai = MockAI::new().with_response("\"AI video editing software\"");
        let condenser = QueryCondenser::new(ai.clone());

        let phrase = condenser
            .condense("Looking for users who need automated video editing software")
            .await
            .unwrap();

        assert_eq!(phrase, "AI video editing software");

        let calls = ai.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_prompt, CONDENSE_INSTRUCTIONS);
        assert!(calls[0]
            .prompt
            .ends_with("Looking for users who need automated video editing software"));
    }

    #[tokio::test]
    async fn test_blank_answer_is_generation_error() {
        let condenser = QueryCondenser::new(MockAI::new().with_response("   "));

        let err = condenser.condense("anything").await.unwrap_err();
        assert!(matches!(err, LeadError::Generation(_)));
    }

    #[tokio::test]
    async fn test_service_failure_propagates() {
        let condenser = QueryCondenser::new(MockAI::new().failing("connection refused"));

        let err = condenser.condense("anything").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
