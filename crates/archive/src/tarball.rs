use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use wheelhouse_compress::Compression;

/// Stream the tarball at `path`, returning the bytes of the first entry whose
/// path equals `member`.
pub(crate) fn read_member(path: &Path, member: &str) -> Result<Vec<u8>> {
    let file = File::open(path).or_raise(|| ErrorKind::Io(path.to_path_buf()))?;
    // `.tar.gz` → gzip, `.tar.bz2` → bzip2, anything else is read raw.
    let codec = Compression::from_path(path);
    let mut archive = ::tar::Archive::new(codec.wrap_reader(BufReader::new(file)));
    let entries = archive.entries().or_raise(|| ErrorKind::InvalidData(path.to_path_buf()))?;
    for entry in entries {
        let mut entry = entry.or_raise(|| ErrorKind::InvalidData(path.to_path_buf()))?;
        if entry.path_bytes().as_ref() != member.as_bytes() {
            continue;
        }
        let mut content = Vec::new();
        entry.read_to_end(&mut content).or_raise(|| ErrorKind::InvalidData(path.to_path_buf()))?;
        tracing::debug!(member, size = content.len(), "found tarball member");
        return Ok(content);
    }
    exn::bail!(ErrorKind::MemberNotFound(member.to_string()))
}
