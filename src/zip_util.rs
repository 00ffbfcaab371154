use std::io::prelude::*;
use std::io::Cursor;
use zip::read::ZipArchive;
use zip::result::ZipError;

pub type PseudoFile = Cursor<Vec<u8>>;

/// Reads `file_name` from the archive root, or from any subdirectory when the
/// root has no such member. `Ok(None)` when the archive does not carry it.
pub fn member_to_pseudofile<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    file_name: &str,
) -> Result<Option<PseudoFile>, ZipError> {
    let suffix = format!("/{}", file_name);
    let name = if archive.file_names().any(|n| n == file_name) {
        file_name.to_owned()
    } else {
        match archive.file_names().find(|n| n.ends_with(&suffix)) {
            Some(n) => n.to_owned(),
            None => return Ok(None),
        }
    };

    let mut zip = archive.by_name(&name)?;
    let mut tmp = Cursor::new(Vec::with_capacity(zip.size() as usize));
    zip.read_to_end(tmp.get_mut())?;
    Ok(Some(tmp))
}

#[cfg(test)]
pub(crate) fn build_archive(members: &[(&str, &str)]) -> Vec<u8> {
    use zip::write::{FileOptions, ZipWriter};

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in members {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
