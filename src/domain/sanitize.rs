/// Escape free text before it is written to the store.
///
/// Mirrors what the storefront applies on its side: HTML-sensitive characters
/// are entity-escaped and surrounding whitespace is dropped.
pub fn escape_for_storage(text: &str) -> String {
    let escaped: String = text
        .chars()
        .flat_map(|c| {
            match c {
                '<' => "&lt;".chars().collect::<Vec<_>>(),
                '>' => "&gt;".chars().collect(),
                '"' => "&quot;".chars().collect(),
                '\'' => "&#x27;".chars().collect(),
                '/' => "&#x2F;".chars().collect(),
                other => vec![other],
            }
        })
        .collect();
    escaped.trim().to_string()
}

/// Sanitize free text destined for an outbound chat message: strip control
/// characters and angle brackets, then truncate on a char boundary.
pub fn clean_for_message(text: &str, max_chars: usize) -> String {
    text.chars()
        .filter(|c| !c.is_control() && *c != '<' && *c != '>')
        .take(max_chars)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Redact a phone number for logging: keep the first five characters.
pub fn redact_phone(phone: &str) -> String {
    let prefix: String = phone.chars().take(5).collect();
    format!("{prefix}***")
}
