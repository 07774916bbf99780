/// Format an amount as dollars with exactly two decimals
pub fn format_currency(amount: f64) -> String {
    // Adding positive zero turns -0.0 into 0.0
    format!("${:.2}", amount + 0.0)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Return the trimmed value, or the placeholder when it is blank
pub fn or_placeholder(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}
