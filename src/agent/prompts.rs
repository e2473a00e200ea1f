//! Prompt text for planning and answering

use super::models::SubQuery;

/// Markdown, citation and math rules for the final answer
pub const FORMAT_INSTRUCTIONS: &str = "Format your response in markdown.
When citing sources, use markdown links with the source number, like this: [[Source 1]](source1-url)
Make important points and section headers bold using markdown (**text**).
Use bullet points where appropriate.
For mathematical formulas, use these formats:
- Inline math: $formula$
- Block math: $$formula$$
Write formulas directly without \\text{} commands.";

pub fn planning_prompt(question: &str, history: &str) -> String {
    format!(
        "You are a research planner. Work out which web searches are needed to answer the user's question.
{history}
Question: {question}

Respond with a JSON array only. Each element must be an object with two string fields:
- \"query\": a specific web search query
- \"reason\": why this search helps answer the question

Example:
[{{\"query\": \"population of Paris 2024\", \"reason\": \"the question asks for the current population\"}}]"
    )
}

pub fn decomposed_answer_prompt(question: &str, history: &str, sub_queries: &[SubQuery]) -> String {
    let mut plan = String::new();
    for (i, sub) in sub_queries.iter().enumerate() {
        plan.push_str(&format!("{}. {} ({})\n", i + 1, sub.query, sub.reason));
    }

    format!(
        "Based on the search results for each sub-query, please answer this question: {question}
{history}
The research was split into these sub-queries:
{plan}
{FORMAT_INSTRUCTIONS}
Organize your answer by sub-query, addressing each one in order."
    )
}

pub fn single_shot_prompt(question: &str, history: &str) -> String {
    format!(
        "Based on the search results, please answer this question: {question}
{history}
{FORMAT_INSTRUCTIONS}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planning_prompt_embeds_question_and_history() {
        let prompt = planning_prompt("How do tides work?", "Previous conversation:\nQ: a\nA: b\n\n");
        assert!(prompt.contains("Question: How do tides work?"));
        assert!(prompt.contains("Q: a"));
        assert!(prompt.contains("\"reason\""));
    }

    #[test]
    fn test_answer_prompt_lists_sub_queries() {
        let subs = vec![
            SubQuery::new("moon gravity tides", "primary cause"),
            SubQuery::new("sun effect on tides", "secondary cause"),
        ];
        let prompt = decomposed_answer_prompt("How do tides work?", "", &subs);
        assert!(prompt.contains("1. moon gravity tides (primary cause)"));
        assert!(prompt.contains("2. sun effect on tides"));
        assert!(prompt.contains("[[Source 1]](source1-url)"));
        assert!(prompt.contains("$$formula$$"));
        assert!(prompt.contains("\\text{}"));
    }
}
