use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zip::ZipArchive;

/// Open the zip (or wheel) at `path` and scan its central directory for an
/// entry named exactly `member`.
pub(crate) fn read_member(path: &Path, member: &str) -> Result<Vec<u8>> {
    let file = File::open(path).or_raise(|| ErrorKind::Io(path.to_path_buf()))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).or_raise(|| ErrorKind::InvalidData(path.to_path_buf()))?;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).or_raise(|| ErrorKind::InvalidData(path.to_path_buf()))?;
        if entry.name() != member {
            continue;
        }
        let mut content = Vec::new();
        entry.read_to_end(&mut content).or_raise(|| ErrorKind::InvalidData(path.to_path_buf()))?;
        tracing::debug!(member, size = content.len(), "found zip member");
        return Ok(content);
    }
    exn::bail!(ErrorKind::MemberNotFound(member.to_string()))
}
