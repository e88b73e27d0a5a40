//! Prompt templates for the query pipeline

/// Templates used when talking to the model
pub struct PromptTemplate;

impl PromptTemplate {
    /// System instruction declared once per query session
    pub fn system() -> &'static str {
        r#"You are a financial research assistant.
Answer questions about stocks, market news, macroeconomic indicators and regional markets.
When a question needs live or historical data, call exactly one of the provided functions.
When the user asks for a picture or chart illustration, call the image generation function.
After receiving a function result, answer in plain language using the returned figures.
If the function result reports an error, apologize briefly, explain what could not be retrieved, and suggest what the user could try instead.
Never invent prices or figures that were not returned by a function."#
    }

    /// Fallback text when the model cannot be reached after a tool ran
    pub fn tool_failure_apology(tool_name: &str) -> String {
        format!(
            "Sorry, I ran into a problem while using {} to answer your question. Please try again in a moment.",
            Self::humanize(tool_name)
        )
    }

    /// Fallback text when the model returned neither text nor a function call
    pub fn empty_answer_apology() -> &'static str {
        "Sorry, I couldn't come up with an answer to that question. Could you rephrase it?"
    }

    /// `get_stock_price` → `the stock price tool`
    fn humanize(tool_name: &str) -> String {
        let trimmed = tool_name.trim();
        if trimmed.is_empty() {
            return "a data tool".to_string();
        }
        let words = trimmed
            .strip_prefix("get_")
            .unwrap_or(trimmed)
            .replace('_', " ");
        format!("the {} tool", words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_mentions_functions() {
        assert!(PromptTemplate::system().contains("call exactly one"));
    }

    #[test]
    fn test_tool_failure_apology_names_tool() {
        let text = PromptTemplate::tool_failure_apology("get_historical_stock_data");
        assert!(text.starts_with("Sorry"));
        assert!(text.contains("the historical stock data tool"));
    }

    #[test]
    fn test_tool_failure_apology_without_name() {
        let text = PromptTemplate::tool_failure_apology("  ");
        assert!(text.contains("a data tool"));
    }
}
