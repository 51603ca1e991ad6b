//! On-disk layout of the package mirror.
//!
//! The mirror is a plain directory tree a static web server can expose:
//!
//! ```text
//! <root>/index.html
//! <root>/<normalized-name>/index.html
//! <root>/<normalized-name>/<artifact-filename>
//! ```
//!
//! [`MirrorStore`] owns the root and refuses any relative path that would
//! escape it. Artifacts are placed either as relative symlinks back into the
//! download directory or as byte copies, see [`Placement`].

pub mod error;
mod mirror;
mod path;

pub use crate::mirror::{MirrorStore, Placement};
pub use crate::path::{relative as relative_path, validate as validate_path};
