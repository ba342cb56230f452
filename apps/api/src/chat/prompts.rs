/// Token ceiling for a chat answer.
pub const ANSWER_MAX_TOKENS: u32 = 400;

/// Fixed reply when no trusted content was loaded at startup.
pub const NO_CONTENT_ANSWER: &str =
    "No content loaded. Please check the configured content file.";

/// Chat prompt template. Replace `{content}` and `{question}` before sending.
pub const CHAT_PROMPT_TEMPLATE: &str = r#"You are an assistant for students interested in international education and studying abroad.

Rules:
1. Answer only questions about studying abroad, applying to universities, visas, scholarships, housing, money, jobs, cost of living and student life abroad, or about the organisation whose content is given below. Politely decline anything else.
2. Use the Reference Content first. If it has nothing relevant, you may briefly use official government or university information.
3. Keep answers clear and concise, two to four sentences, and never stop mid-sentence.
4. Include the most relevant links from the Reference Content as plain URLs starting with https://. Never use markdown links, brackets or footnotes.
5. Present lists instead of tables.
{no_citations}

Reference Content:
{content}

Question: {question}
Answer:"#;

pub fn build_chat_prompt(content: &str, question: &str) -> String {
    CHAT_PROMPT_TEMPLATE
        .replace(
            "{no_citations}",
            crate::llm_client::prompts::NO_CITATIONS_INSTRUCTION,
        )
        .replace("{content}", content)
        .replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_content_and_question() {
        let prompt = build_chat_prompt("Visit https://a.com/visa", "How do I get a visa?");
        assert!(prompt.contains("Visit https://a.com/visa"));
        assert!(prompt.contains("Question: How do I get a visa?"));
        assert!(!prompt.contains("{content}"));
        assert!(!prompt.contains("{no_citations}"));
    }
}
