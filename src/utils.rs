pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Remove markdown code-fence markers a model may wrap its JSON in.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}
