//! Run-length grouping of sorted sequences.

use crate::order::{Collate, Direction, sort_by_name, sort_by_version};
use wheelhouse_metadata::PackageArtifact;

/// Consecutive items sharing a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<T> {
    pub key: String,
    pub items: Vec<T>,
}

/// Collapse runs of equal keys. `items` must already be sorted by `key`;
/// order within each group is the input order.
pub fn group_sorted<T>(items: Vec<T>, key: impl Fn(&T) -> &str) -> Vec<Group<T>> {
    let mut groups: Vec<Group<T>> = Vec::new();
    for item in items {
        if let Some(group) = groups.last_mut()
            && group.key == key(&item)
        {
            group.items.push(item);
            continue;
        }
        groups.push(Group {
            key: key(&item).to_string(),
            items: vec![item],
        });
    }
    groups
}

/// Group by normalized name, groups in ascending collation order.
pub fn group_by_normalized_name(
    mut artifacts: Vec<PackageArtifact>,
    collator: &mut impl Collate,
) -> Vec<Group<PackageArtifact>> {
    sort_by_name(&mut artifacts, |a| a.metadata().normalized_name(), collator, Direction::Ascending);
    group_sorted(artifacts, |a| a.metadata().normalized_name())
}

/// Group by display name, groups in ascending collation order.
pub fn group_by_name(mut artifacts: Vec<PackageArtifact>, collator: &mut impl Collate) -> Vec<Group<PackageArtifact>> {
    sort_by_name(&mut artifacts, |a| a.metadata().name(), collator, Direction::Ascending);
    group_sorted(artifacts, |a| a.metadata().name())
}

/// Group by version string, groups ordered by `direction`.
pub fn group_by_version(mut artifacts: Vec<PackageArtifact>, direction: Direction) -> Vec<Group<PackageArtifact>> {
    sort_by_version(&mut artifacts, |a| a.metadata().version(), direction);
    group_sorted(artifacts, |a| a.metadata().version())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Lexical;
    use wheelhouse_metadata::PackageMetadata;

    fn artifact(name: &str, version: &str) -> PackageArtifact {
        PackageArtifact::new(format!("/downloads/{name}-{version}.tar.gz"), PackageMetadata::new(name, version))
    }

    fn summary(groups: &[Group<PackageArtifact>]) -> Vec<(String, Vec<String>)> {
        groups
            .iter()
            .map(|g| {
                let versions = g.items.iter().map(|a| a.metadata().version().to_string()).collect();
                (g.key.clone(), versions)
            })
            .collect()
    }

    #[test]
    fn test_group_sorted_keeps_input_order_within_groups() {
        let items = vec![("a", 1), ("b", 1), ("b", 2), ("a", 3)];
        let groups = group_sorted(items, |&(key, _)| key);
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "a"]);
        assert_eq!(groups[1].items, [("b", 1), ("b", 2)]);
    }

    #[test]
    fn test_group_by_name_is_stable() {
        let artifacts = vec![artifact("b", "1"), artifact("a", "1"), artifact("b", "2")];
        let groups = group_by_name(artifacts, &mut Lexical);
        assert_eq!(
            summary(&groups),
            [
                ("a".to_string(), vec!["1".to_string()]),
                ("b".to_string(), vec!["1".to_string(), "2".to_string()]),
            ]
        );
    }

    #[test]
    fn test_group_by_normalized_name_merges_spellings() {
        let artifacts = vec![artifact("Foo_Bar", "1.0"), artifact("six", "1.16.0"), artifact("foo.bar", "2.0")];
        let groups = group_by_normalized_name(artifacts, &mut Lexical);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "foo-bar");
        assert_eq!(groups[0].items[0].metadata().name(), "Foo_Bar");
        assert_eq!(groups[0].items[1].metadata().name(), "foo.bar");
        assert_eq!(groups[1].key, "six");
    }

    #[test]
    fn test_group_by_version_descending() {
        let artifacts = vec![artifact("six", "1.2"), artifact("six", "1.10"), artifact("six", "1.2")];
        let groups = group_by_version(artifacts, Direction::Descending);
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["1.10", "1.2"]);
        assert_eq!(groups[1].items.len(), 2);
    }
}
