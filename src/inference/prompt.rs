//! The generation prompt shared by all backends.

use std::fmt::Write;

use crate::core::request::NameRequest;

/// Length asked of the model; display accepts up to `MAX_NAME_CHARS`.
const PROMPT_NAME_CHARS: usize = 32;

/// Builds the full prompt for `request`, asking for `count` names.
pub fn build_prompt(request: &NameRequest, count: usize) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are an experienced naming consultant. Produce high-quality names from the context below.\n",
    );
    prompt.push_str("Rules:\n");
    prompt.push_str("- Reply with a JSON object shaped like {\"names\": [\"name1\", \"name2\", ...]}.\n");
    prompt.push_str("- Every name must fit the requested kind and stay easy to read and remember.\n");
    prompt.push_str("- Do not add explanations or Markdown.\n\n");

    prompt.push_str("Task:\n");
    let _ = writeln!(prompt, "- Kind: {} ({})", request.kind_label, request.kind);
    let _ = writeln!(prompt, "- Number of names: {count}");
    let _ = writeln!(prompt, "- Naming style: {} ({})", request.style_label, request.style);
    let _ = writeln!(prompt, "- Description: {}", request.description);

    if !request.kind_prompt.is_empty() {
        prompt.push_str("\nKind guidelines:\n");
        prompt.push_str(&request.kind_prompt);
        prompt.push('\n');
    }
    if !request.style_prompt.is_empty() {
        prompt.push_str("\nStyle requirements:\n");
        prompt.push_str(&request.style_prompt);
        prompt.push('\n');
    }

    let _ = write!(
        prompt,
        "\nReturn only the JSON. Names must be unique and at most {} characters long.",
        PROMPT_NAME_CHARS
    );
    prompt
}
