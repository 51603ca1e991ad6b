use feruca::Collator;
use std::cmp::Ordering;

/// Orders display names.
///
/// Implementations must be a total order: names that a collation considers
/// equivalent are broken byte-wise, so only identical strings compare equal.
pub trait Collate {
    fn compare(&mut self, a: &str, b: &str) -> Ordering;
}

/// Unicode Collation Algorithm ordering (CLDR root), so `apple`, `Banana` and
/// `cherry` sort the way a person reading the index expects.
pub struct UnicodeCollator {
    collator: Collator,
}
impl UnicodeCollator {
    pub fn new() -> Self {
        Self {
            collator: Collator::default(),
        }
    }
}
impl Default for UnicodeCollator {
    fn default() -> Self {
        Self::new()
    }
}
impl Collate for UnicodeCollator {
    fn compare(&mut self, a: &str, b: &str) -> Ordering {
        self.collator.collate(a, b).then_with(|| a.cmp(b))
    }
}

/// Plain byte order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexical;
impl Collate for Lexical {
    fn compare(&mut self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_ignores_case_first() {
        let mut names = vec!["cherry", "Banana", "apple"];
        let mut collator = UnicodeCollator::new();
        names.sort_by(|a, b| collator.compare(a, b));
        assert_eq!(names, ["apple", "Banana", "cherry"]);
    }

    #[test]
    fn test_lexical_is_byte_order() {
        let mut names = vec!["cherry", "Banana", "apple"];
        names.sort_by(|a, b| Lexical.compare(a, b));
        assert_eq!(names, ["Banana", "apple", "cherry"]);
    }

    #[test]
    fn test_only_identical_names_are_equal() {
        let mut collator = UnicodeCollator::new();
        assert_eq!(collator.compare("six", "six"), Ordering::Equal);
        assert_ne!(collator.compare("Six", "six"), Ordering::Equal);
    }
}
