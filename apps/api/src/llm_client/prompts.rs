// Shared prompt constants and prompt-building utilities.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Appended to every system prompt that expects a structured (JSON) result.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended when research tools are attached to an agent.
pub const TOOL_USE_INSTRUCTION: &str = "\
    You have access to web research tools. Use them only when the provided \
    material is too thin to meet the request; otherwise answer directly. \
    When you are done with tools, give your final answer in the required format.";

/// Fills `{name}` placeholders in a template in a single pass.
///
/// Values are inserted verbatim: braces inside a value are never treated as
/// placeholders. Placeholders without a value are left as they are.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder =
        PLACEHOLDER.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

    placeholder
        .replace_all(template, |caps: &Captures<'_>| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
