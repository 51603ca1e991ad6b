//! Sort orders for versions and display names.

mod collate;
mod version;

pub use self::collate::{Collate, Lexical, UnicodeCollator};
pub use self::version::{Version, compare as compare_versions};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}
impl Direction {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// Stable sort by name under `collator`.
pub fn sort_by_name<T>(items: &mut [T], key: impl Fn(&T) -> &str, collator: &mut impl Collate, direction: Direction) {
    items.sort_by(|a, b| direction.apply(collator.compare(key(a), key(b))));
}

/// Stable sort by version, identical versions broken byte-wise.
pub fn sort_by_version<T>(items: &mut Vec<T>, key: impl Fn(&T) -> &str, direction: Direction) {
    let mut compare = |a: &T, b: &T| {
        let (a, b) = (key(a), key(b));
        direction.apply(compare_versions(a, b).then_with(|| a.cmp(b)))
    };
    merge_sort(items, &mut compare);
}

// Mixing parseable and unparseable versions can make the comparison
// intransitive, and `slice::sort_by` may panic on such a comparator.
fn merge_sort<T>(items: &mut Vec<T>, compare: &mut dyn FnMut(&T, &T) -> Ordering) {
    if items.len() < 2 {
        return;
    }
    let mut right = items.split_off(items.len() / 2);
    let mut left = std::mem::take(items);
    merge_sort(&mut left, compare);
    merge_sort(&mut right, compare);

    items.reserve(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l).is_lt(),
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        items.extend(if take_right { right.next() } else { left.next() });
    }
}
