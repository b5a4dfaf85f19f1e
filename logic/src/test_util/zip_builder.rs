use addon_packer_base::result::PackerResult;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{DateTime, ZipWriter};

/// Builds in-memory archives, used to plant stale archives in the mock file system.
pub struct ZipBuilder {
    zip_writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl Default for ZipBuilder {
    fn default() -> Self {
        let zip_writer = ZipWriter::new(Cursor::new(Vec::new()));
        Self { zip_writer }
    }
}

fn create_file_options() -> SimpleFileOptions {
    SimpleFileOptions::default().last_modified_time(DateTime::default())
}

impl ZipBuilder {
    pub fn add_file(&mut self, path: impl AsRef<str>, content: impl AsRef<[u8]>) -> PackerResult<()> {
        self.zip_writer
            .start_file(path.as_ref().to_string(), create_file_options())?;
        self.zip_writer.write_all(content.as_ref())?;
        Ok(())
    }

    pub fn build(self) -> PackerResult<Vec<u8>> {
        let cursor = self.zip_writer.finish()?;
        Ok(cursor.into_inner())
    }
}
