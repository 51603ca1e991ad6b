use crate::group::{Group, group_by_normalized_name};
use crate::order::Collate;
use wheelhouse_metadata::PackageArtifact;

/// Give untrusted members of a normalized-name group the display name of the
/// group's first trusted member.
///
/// Returns how many names changed. A group without a trusted member is left as
/// it is. Normalized names and versions are never touched.
pub fn reconcile_names(group: &mut [PackageArtifact]) -> usize {
    let Some(canonical) = group
        .iter()
        .find(|artifact| artifact.metadata().is_trusted())
        .map(|artifact| artifact.metadata().name().to_string())
    else {
        return 0;
    };
    let mut renamed = 0;
    for artifact in group.iter_mut().filter(|artifact| !artifact.metadata().is_trusted()) {
        if artifact.metadata().name() != canonical {
            tracing::debug!(
                filename = artifact.filename(),
                from = artifact.metadata().name(),
                to = %canonical,
                "reconciled display name"
            );
            artifact.metadata_mut().set_display_name(canonical.clone());
            renamed += 1;
        }
    }
    renamed
}

/// Group `artifacts` by normalized name and reconcile every group.
pub fn reconcile_all(artifacts: Vec<PackageArtifact>, collator: &mut impl Collate) -> Vec<Group<PackageArtifact>> {
    let mut groups = group_by_normalized_name(artifacts, collator);
    let renamed: usize = groups.iter_mut().map(|group| reconcile_names(&mut group.items)).sum();
    if renamed > 0 {
        tracing::info!(renamed, "reconciled untrusted names");
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheelhouse_metadata::PackageMetadata;

    fn artifact(name: &str, version: &str, trusted: bool) -> PackageArtifact {
        let meta = PackageMetadata::new(name, version).with_trusted(trusted);
        PackageArtifact::new(format!("/downloads/{name}-{version}"), meta)
    }

    #[test]
    fn test_untrusted_takes_trusted_name() {
        let mut group = vec![artifact("Foo", "1.0", true), artifact("foo_bar", "1.0", false)];
        assert_eq!(reconcile_names(&mut group), 1);
        assert_eq!(group[0].metadata().name(), "Foo");
        assert_eq!(group[1].metadata().name(), "Foo");
        assert_eq!(group[1].metadata().normalized_name(), "foo-bar");
        assert!(!group[1].metadata().is_trusted());
    }

    #[test]
    fn test_first_trusted_member_wins() {
        let mut group = vec![
            artifact("foo", "0.9", false),
            artifact("Foo", "1.0", true),
            artifact("FOO", "2.0", true),
        ];
        reconcile_names(&mut group);
        let names: Vec<_> = group.iter().map(|a| a.metadata().name()).collect();
        assert_eq!(names, ["Foo", "Foo", "FOO"]);
        assert_eq!(group[0].metadata().version(), "0.9");
    }

    #[test]
    fn test_reconcile_all_works_per_group() {
        let artifacts = vec![
            artifact("Django", "4.2", true),
            artifact("six", "1.16.0", false),
            artifact("django", "5.0", false),
        ];
        let groups = reconcile_all(artifacts, &mut crate::order::Lexical);
        let names: Vec<Vec<&str>> =
            groups.iter().map(|g| g.items.iter().map(|a| a.metadata().name()).collect()).collect();
        assert_eq!(names, [vec!["Django", "Django"], vec!["six"]]);
    }

    #[test]
    fn test_no_trusted_member_is_unchanged() {
        let mut group = vec![artifact("foo", "1.0", false), artifact("Foo", "2.0", false)];
        let before = group.clone();
        assert_eq!(reconcile_names(&mut group), 0);
        assert_eq!(group, before);
    }
}
