//! Identity records for Python distribution files.
//!
//! Given a distribution on disk (sdist tarball, sdist zip or wheel), recover
//! its `(name, version, homepage)` from the embedded core-metadata document,
//! or from the file name when the document is missing. Wheels whose declared
//! name does not match their file name are flagged as untrusted so that a
//! later pass can reconcile them against their siblings.
//!
//! ```no_run
//! use wheelhouse_metadata::Extractor;
//!
//! let meta = Extractor::default().extract("downloads/requests-2.31.0.tar.gz").unwrap();
//! println!("{} {}", meta.name(), meta.version());
//! ```

pub mod error;
mod extract;
mod models;
mod normalize;
mod parse;

pub use crate::extract::Extractor;
pub use crate::models::{PackageArtifact, PackageMetadata};
pub use crate::normalize::normalize;
pub use crate::parse::MetadataParser;
