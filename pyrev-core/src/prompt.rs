//! Review prompt construction.
//!
//! The prompt is a fixed instruction template with the submitted source
//! spliced in verbatim — no escaping, no truncation, no normalisation. The
//! model is asked for four sections: defects, readability/performance
//! suggestions, a 0–100 quality rating, and naming/best-practice notes.

/// Instruction text placed before the submitted source.
const PROMPT_HEADER: &str = "You are an expert Python developer and code reviewer.
Analyze the following Python code:";

/// Instruction text placed after the submitted source.
const PROMPT_SECTIONS: &str = "Provide:
- Syntax or logic errors (if any)
- Suggestions to improve readability and performance
- Code quality rating (0-100)
- Best practices or naming improvements";

/// Builds the full review prompt for `code`.
///
/// Always succeeds, including for the empty string. The code is embedded
/// unmodified between the persona header and the section list, so distinct
/// inputs always produce distinct prompts.
pub fn build_review_prompt(code: &str) -> String {
    format!("{PROMPT_HEADER}\n\n{code}\n\n{PROMPT_SECTIONS}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_code_verbatim() {
        let code = "def f(x):\n    return x * 2  # {unescaped} \"braces\" & quotes";
        let prompt = build_review_prompt(code);
        assert!(prompt.contains(code), "source must appear unmodified");
    }

    #[test]
    fn deterministic() {
        let code = "print('hello')";
        assert_eq!(build_review_prompt(code), build_review_prompt(code));
    }

    #[test]
    fn distinct_inputs_give_distinct_prompts() {
        let a = build_review_prompt("x = 1");
        let b = build_review_prompt("x = 2");
        assert_ne!(a, b);
    }

    #[test]
    fn empty_input_still_produces_full_template() {
        let prompt = build_review_prompt("");
        assert!(prompt.contains("expert Python developer"));
        assert!(prompt.contains("Code quality rating (0-100)"));
    }

    #[test]
    fn requests_all_four_sections() {
        let prompt = build_review_prompt("pass");
        assert!(prompt.contains("Syntax or logic errors"));
        assert!(prompt.contains("readability and performance"));
        assert!(prompt.contains("rating (0-100)"));
        assert!(prompt.contains("naming improvements"));
    }
}
