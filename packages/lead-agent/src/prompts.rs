//! Fixed prompt text for the generation and extraction services.

/// Instruction block for condensing a lead description into a search phrase.
pub const CONDENSE_INSTRUCTIONS: &str = r#"You are an expert at transforming detailed user queries into concise company descriptions.
Your task is to extract the core business/product focus in 3-4 words.

Examples:
Input: "Generate leads looking for AI-powered customer support chatbots for e-commerce stores."
Output: "AI customer support chatbots for e commerce"

Input: "Find people interested in voice cloning technology for creating audiobooks and podcasts"
Output: "voice cloning technology"

Input: "Looking for users who need automated video editing software with AI capabilities"
Output: "AI video editing software"

Input: "Need to find businesses interested in implementing machine learning solutions for fraud detection"
Output: "ML fraud detection"

Always focus on the core product/service and keep it concise but clear."#;

/// Instruction sent with every page extraction.
pub const EXTRACT_PROMPT: &str = "Extract all user information including username, bio, post type (question/answer), timestamp, upvotes, and any links from Quora posts. Focus on identifying potential leads who are asking questions or providing answers related to the topic.";

/// User prompt for the condense call.
pub fn condense_prompt(verbose_query: &str) -> String {
    format!(
        "Transform this query into a concise 3-4 word company description: {}",
        verbose_query
    )
}

/// Search query restricted to the target community site.
pub fn search_query(phrase: &str) -> String {
    format!(
        "quora websites where people are looking for {} services",
        phrase
    )
}
