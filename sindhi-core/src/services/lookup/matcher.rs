use super::model::LookupTable;

pub fn exact_match<'a>(table: &'a LookupTable, normalized: &str) -> Option<&'a str> {
    if normalized.is_empty() {
        return None;
    }
    table.get(normalized)
}

/// First key, in table order, that occurs anywhere in the input.
///
/// Earlier short keys shadow later, more specific ones: `"good night"` resolves
/// through `night` only because `night` is listed before `good`.
pub fn substring_match<'a>(table: &'a LookupTable, normalized: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(key, _)| normalized.contains(key))
        .map(|(_, value)| value)
}

pub fn lookup<'a>(table: &'a LookupTable, normalized: &str) -> Option<&'a str> {
    exact_match(table, normalized).or_else(|| substring_match(table, normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LookupTable {
        LookupTable::builtin()
    }

    #[test]
    fn exact_hit() {
        assert_eq!(exact_match(&table(), "hello"), Some("سلام"));
        assert_eq!(exact_match(&table(), "how are you?"), Some("توهان ڪيئن آهيو؟"));
        assert_eq!(exact_match(&table(), "hello there"), None);
        assert_eq!(exact_match(&table(), ""), None);
    }

    #[test]
    fn exact_wins_over_earlier_substring() {
        // "how are you" precedes "how are you?" but the exact key is preferred.
        assert_eq!(lookup(&table(), "how are you?"), Some("توهان ڪيئن آهيو؟"));
        assert_eq!(lookup(&table(), "how are you doing"), Some("توهان ڪيئن آهيو"));
    }

    #[test]
    fn substring_follows_table_order() {
        // both "night" and "good" occur; "night" is defined first
        assert_eq!(substring_match(&table(), "good night"), Some("رات"));
        // "friend" precedes "good"
        assert_eq!(substring_match(&table(), "my friend is good"), Some("دوست"));
        // "goodbye" precedes "good"
        assert_eq!(substring_match(&table(), "say goodbye"), Some("الوداع"));
    }

    #[test]
    fn short_keys_match_inside_words() {
        // "no" sits inside "snowy" and is listed before "day"
        assert_eq!(substring_match(&table(), "a snowy day"), Some("نه"));
    }

    #[test]
    fn no_match() {
        assert_eq!(lookup(&table(), "xyz"), None);
    }

    #[test]
    fn custom_table_order_decides() {
        let t = LookupTable::new(vec![
            ("sun".to_string(), "S".to_string()),
            ("sunday".to_string(), "SD".to_string()),
        ]);
        assert_eq!(lookup(&t, "see you sunday"), Some("S"));
        assert_eq!(lookup(&t, "sunday"), Some("SD"));
    }
}
