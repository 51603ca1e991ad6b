//! Archive builders for tests.
//!
//! Enabled by the `fixtures` feature so that downstream crates can create real
//! tarballs, zips and wheels in their own tests without shipping binary
//! fixtures.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use wheelhouse_compress::Compression;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Write a tarball named `filename` into `dir`, compressed according to its
/// immediate extension.
pub fn write_tarball(dir: &Path, filename: &str, members: &[(&str, &str)]) -> io::Result<PathBuf> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, content) in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, name, content.as_bytes())?;
    }
    let raw = builder.into_inner()?;
    let compressed = Compression::from_path(filename).compress(&raw).map_err(|err| io::Error::other(err.to_string()))?;
    let path = dir.join(filename);
    fs::write(&path, compressed)?;
    Ok(path)
}

/// Write a deflated zip archive (also used for wheels) named `filename` into `dir`.
pub fn write_zip(dir: &Path, filename: &str, members: &[(&str, &str)]) -> io::Result<PathBuf> {
    let path = dir.join(filename);
    let mut writer = ZipWriter::new(File::create(&path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in members {
        writer.start_file(*name, options)?;
        writer.write_all(content.as_bytes())?;
    }
    writer.finish()?;
    Ok(path)
}

/// Render a minimal core-metadata document.
pub fn metadata_text(name: &str, version: &str, homepage: Option<&str>) -> String {
    let mut text = format!("Metadata-Version: 2.1\nName: {name}\nVersion: {version}\nSummary: test fixture\n");
    if let Some(homepage) = homepage {
        text.push_str(&format!("Home-page: {homepage}\n"));
    }
    text.push_str("License: MIT\n");
    text
}
