use std::collections::HashMap;

use super::normalize::normalize;

/// English phrase to Sindhi, in definition order.
const BUILTIN: &[(&str, &str)] = &[
    ("hello", "سلام"),
    ("thank you", "توهان جو شكريو"),
    ("good morning", "صبح جو سلام"),
    ("how are you", "توهان ڪيئن آهيو"),
    ("how are you?", "توهان ڪيئن آهيو؟"),
    ("welcome", "ڀلي ڪري آيا"),
    ("please", "مهرباني"),
    ("excuse me", "معاف ڪجو"),
    ("i love you", "مان توهان سان پيار ڪريان ٿو"),
    ("goodbye", "الوداع"),
    ("yes", "ها"),
    ("no", "نه"),
    ("water", "پاڻي"),
    ("food", "کاڌو"),
    ("house", "گهر"),
    ("family", "خاندان"),
    ("friend", "دوست"),
    ("book", "ڪتاب"),
    ("school", "اسڪول"),
    ("work", "ڪم"),
    ("time", "وقت"),
    ("day", "ڏينهن"),
    ("night", "رات"),
    ("sun", "سج"),
    ("moon", "چنڊ"),
    ("beautiful", "خوبصورت"),
    ("good", "سٺو"),
    ("bad", "خراب"),
    ("help", "مدد"),
    ("sorry", "معاف ڪجو"),
    ("computer", "ڪمپيوٽر"),
    ("internet", "انٽرنيٽ"),
    ("website", "ويب سائيٽ"),
    ("application", "ايپليڪيشن"),
    ("software", "سافٽ ويئر"),
];

/// Read-only phrase table used by the fallback strategy.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl LookupTable {
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    /// Keys are normalized; blank keys are skipped. A repeated key replaces the
    /// value but keeps its first position.
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut table = LookupTable::default();

        for (key, value) in pairs {
            let key = normalize(&key);
            if key.is_empty() {
                continue;
            }

            match table.index.get(&key) {
                Some(&i) => table.entries[i].1 = value,
                None => {
                    table.index.insert(key.clone(), table.entries.len());
                    table.entries.push((key, value));
                }
            }
        }

        table
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_keeps_definition_order() {
        let t = LookupTable::builtin();
        assert_eq!(t.len(), 35);
        let keys: Vec<&str> = t.iter().map(|(k, _)| k).take(3).collect();
        assert_eq!(keys, ["hello", "thank you", "good morning"]);
        assert_eq!(t.iter().last().map(|(k, _)| k), Some("software"));
    }

    #[test]
    fn keys_are_normalized() {
        let t = LookupTable::new(vec![(" Hello ".to_string(), "سلام".to_string())]);
        assert_eq!(t.get("hello"), Some("سلام"));
        assert_eq!(t.get("Hello"), None);
    }

    #[test]
    fn duplicate_key_keeps_first_slot() {
        let t = LookupTable::new(vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
            ("A".to_string(), "3".to_string()),
            ("  ".to_string(), "blank".to_string()),
        ]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("a"), Some("3"));
        let order: Vec<&str> = t.iter().map(|(k, _)| k).collect();
        assert_eq!(order, ["a", "b"]);
    }
}
