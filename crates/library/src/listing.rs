use crate::group::{group_by_name, group_by_version};
use crate::order::{Collate, Direction};
use crate::reconcile::reconcile_all;
use serde::Serialize;
use wheelhouse_metadata::PackageArtifact;

/// One distribution and the versions present for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub name: String,
    /// Newest first.
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Only list the distribution shown under this name.
    pub name: Option<String>,
    /// Show normalized names instead of display names.
    pub use_normalized_name: bool,
}

/// Summarise resolved artifacts by display name, after reconciliation.
pub fn list(artifacts: Vec<PackageArtifact>, options: &ListOptions, collator: &mut impl Collate) -> Vec<Listing> {
    let reconciled: Vec<PackageArtifact> =
        reconcile_all(artifacts, collator).into_iter().flat_map(|group| group.items).collect();
    group_by_name(reconciled, collator)
        .into_iter()
        .filter_map(|group| {
            let name = match options.use_normalized_name {
                true => group.items[0].metadata().normalized_name().to_string(),
                false => group.key,
            };
            if options.name.as_ref().is_some_and(|wanted| *wanted != name) {
                return None;
            }
            let versions = group_by_version(group.items, Direction::Descending).into_iter().map(|v| v.key).collect();
            Some(Listing { name, versions })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::UnicodeCollator;
    use rstest::rstest;
    use wheelhouse_metadata::PackageMetadata;

    fn artifact(name: &str, version: &str, trusted: bool) -> PackageArtifact {
        let meta = PackageMetadata::new(name, version).with_trusted(trusted);
        PackageArtifact::new(format!("/downloads/{name}-{version}.tar.gz"), meta)
    }

    fn artifacts() -> Vec<PackageArtifact> {
        vec![
            artifact("six", "1.9.0", true),
            artifact("Zope.Interface", "6.0", true),
            artifact("six", "1.16.0", true),
            artifact("zope_interface", "6.1", false),
            artifact("six", "1.16.0", true),
        ]
    }

    fn listing(name: &str, versions: &[&str]) -> Listing {
        Listing {
            name: name.to_string(),
            versions: versions.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_list_reconciles_and_orders() {
        let listings = list(artifacts(), &ListOptions::default(), &mut UnicodeCollator::new());
        assert_eq!(listings, [listing("six", &["1.16.0", "1.9.0"]), listing("Zope.Interface", &["6.1", "6.0"])]);
    }

    #[rstest]
    #[case(false, "Zope.Interface")]
    #[case(true, "zope-interface")]
    fn test_list_one_name(#[case] use_normalized_name: bool, #[case] name: &str) {
        let options = ListOptions {
            name: Some(name.to_string()),
            use_normalized_name,
        };
        let listings = list(artifacts(), &options, &mut UnicodeCollator::new());
        assert_eq!(listings, [listing(name, &["6.1", "6.0"])]);
    }

    #[test]
    fn test_list_unknown_name_is_empty() {
        let options = ListOptions {
            name: Some("requests".to_string()),
            ..Default::default()
        };
        assert!(list(artifacts(), &options, &mut UnicodeCollator::new()).is_empty());
    }
}
