use crate::Compression;
use std::path::Path;

impl Compression {
    /// Detect compression from the immediate file extension.
    ///
    /// Only the last extension counts: `pkg-1.0.tar.gz` is gzip, `pkg-1.0.tar`
    /// is uncompressed.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| match ext.to_lowercase().as_str() {
                "bz2" => Compression::Bzip2,
                "gz" => Compression::Gzip,
                _ => Compression::None,
            })
            .unwrap_or(Compression::None)
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use rstest::rstest;

    #[rstest]
    #[case("requests-2.31.0.tar", Compression::None)]
    #[case("requests-2.31.0.zip", Compression::None)]
    #[case("requests-2.31.0-py3-none-any.whl", Compression::None)]
    // `.gz` is a dotfile with no extension (like `.bashrc`).
    #[case(".gz", Compression::None)]
    #[case("requests-2.31.0.tar.bz2", Compression::Bzip2)]
    #[case("requests-2.31.0.tar.gz", Compression::Gzip)]
    #[case("requests-2.31.0.TAR.GZ", Compression::Gzip)]
    #[case("/srv/downloads/six-1.16.0.tar.gz", Compression::Gzip)]
    fn test_from_path(#[case] test: &str, #[case] expected: Compression) {
        assert_eq!(Compression::from_path(test), expected);
    }
}
