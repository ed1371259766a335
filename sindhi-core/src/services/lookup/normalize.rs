/// Lookup form of user text: trimmed and lower-cased, nothing more.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
