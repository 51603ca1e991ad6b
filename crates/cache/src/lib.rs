//! Sidecar cache for resolved package metadata.
//!
//! Every distribution file may be accompanied by `<file>.metadata.json`
//! holding its resolved
//! [`PackageMetadata`](wheelhouse_metadata::PackageMetadata). A sidecar is trusted as-is until
//! deleted: when present (and naming a package), the archive is neither
//! opened nor hashed again. The archive files themselves remain the source of
//! truth; removing every sidecar only costs a slower rescan.

pub mod error;
mod sidecar;

pub use crate::sidecar::{SIDECAR_SUFFIX, is_sidecar, read, remove, sidecar_path, write};
