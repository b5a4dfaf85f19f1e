use addon_packer_base::result::PackerResult;
use std::fmt::Write;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Lists every entry of an archive as `name: 'content'`, one per line.
pub fn describe_zip(archive: &[u8]) -> PackerResult<String> {
    let mut zip_archive = ZipArchive::new(Cursor::new(archive))?;
    let mut content = String::new();
    for i in 0..zip_archive.len() {
        let mut zip_entry = zip_archive.by_index(i)?;
        if zip_entry.is_file() {
            let mut entry_content = String::new();
            zip_entry.read_to_string(&mut entry_content)?;
            writeln!(content, "{}: '{entry_content}'", zip_entry.name())?;
        } else if zip_entry.is_dir() {
            writeln!(content, "{} (DIR)", zip_entry.name())?;
        }
    }
    Ok(content)
}
