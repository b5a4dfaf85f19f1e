use crate::adapter::{Adapter, WriteSeek};
use crate::configuration::PackerConfiguration;
use crate::types::{FilePath, InputKind, MissingInput, SkippedInput};
use addon_packer_base::logging::{debug, info, info_span, warn};
use addon_packer_base::result::{Context, PackerResult};
use std::collections::BTreeSet;
use std::io::{Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Outcome of a single packing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackReport {
    pub archive: FilePath,
    pub entries: Vec<FilePath>,
    pub missing: Vec<MissingInput>,
    pub skipped: Vec<SkippedInput>,
    /// Size of the archive on disk, `None` if it could not be found after writing.
    pub archive_size: Option<u64>,
}

/// Deletes any previous archive and writes a fresh one containing every configured input that exists.
///
/// Missing or unreadable inputs are reported and skipped. Failing to delete, create or write the
/// archive itself is an error, in which case no summary is printed.
pub fn pack_archive(
    adapter: &dyn Adapter,
    config: &PackerConfiguration,
) -> PackerResult<PackReport> {
    let archive_path = &config.archive;
    let _span = info_span!("Pack archive", archive = %archive_path).entered();
    if adapter.file_exists(archive_path)? {
        adapter
            .delete_file(archive_path)
            .with_context(|| format!("Failed to delete existing archive '{archive_path}'"))?;
        adapter.print(&format!("Deleted existing {archive_path}"));
    }
    let output = adapter
        .create_file(archive_path)
        .with_context(|| format!("Failed to create archive '{archive_path}'"))?;
    let mut packer = ArchivePacker::new(adapter, archive_path, output);

    for file in &config.files {
        if adapter.is_file(file)? {
            packer.add_file(file)?;
        } else {
            packer.report_missing(file, InputKind::File);
        }
    }

    for directory in &config.directories {
        if !adapter.is_directory(directory)? {
            packer.report_missing(directory, InputKind::Directory);
            continue;
        }
        let files = match adapter.list_files_recursive(directory) {
            Ok(files) => files,
            Err(error) => {
                packer.report_skipped(directory, format!("{error:#}"));
                continue;
            }
        };
        for file in files {
            packer.add_file(&file)?;
        }
    }

    let mut report = packer.finish()?;

    if adapter.file_exists(archive_path)? {
        let size = adapter.file_size(archive_path)?;
        report.archive_size = Some(size);
        print_summary(adapter, archive_path, size);
    } else {
        warn!("Archive '{archive_path}' not found after writing");
    }
    Ok(report)
}

/// Formats a byte count as kilobytes with two decimals.
pub fn format_kilobytes(size: u64) -> String {
    format!("{:.2}", size as f64 / 1024.0)
}

fn print_summary(adapter: &dyn Adapter, archive_path: &FilePath, size: u64) {
    info!("Wrote {size} bytes to '{archive_path}'");
    adapter.print(&format!("\nZIP creation complete: {archive_path}"));
    adapter.print(&format!("Size: {} KB", format_kilobytes(size)));
    adapter.print(&format!("System: {}", adapter.host_platform()));
}

fn entry_options() -> SimpleFileOptions {
    // fixed timestamp keeps repeated runs byte-identical
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

struct ArchivePacker<'a> {
    adapter: &'a dyn Adapter,
    archive_path: &'a FilePath,
    zip_writer: ZipWriter<Box<dyn WriteSeek>>,
    entry_names: BTreeSet<FilePath>,
    report: PackReport,
}

impl<'a> ArchivePacker<'a> {
    fn new(
        adapter: &'a dyn Adapter,
        archive_path: &'a FilePath,
        output: Box<dyn WriteSeek>,
    ) -> Self {
        Self {
            adapter,
            archive_path,
            zip_writer: ZipWriter::new(output),
            entry_names: BTreeSet::new(),
            report: PackReport {
                archive: archive_path.clone(),
                entries: vec![],
                missing: vec![],
                skipped: vec![],
                archive_size: None,
            },
        }
    }

    fn add_file(&mut self, path: &FilePath) -> PackerResult<()> {
        if path == self.archive_path {
            debug!("Not adding archive '{path}' to itself");
            return Ok(());
        }
        if self.entry_names.contains(path) {
            debug!("Skipping duplicate entry '{path}'");
            return Ok(());
        }
        let content = match self.read_content(path) {
            Ok(content) => content,
            Err(error) => {
                self.report_skipped(path, format!("{error:#}"));
                return Ok(());
            }
        };
        self.zip_writer
            .start_file(path.as_str(), entry_options())
            .with_context(|| format!("Failed to add '{path}' to '{}'", self.archive_path))?;
        self.zip_writer
            .write_all(&content)
            .with_context(|| format!("Failed to write '{path}' to '{}'", self.archive_path))?;
        debug!("Added '{path}' ({} bytes)", content.len());
        self.adapter.print(&format!("Added {path}"));
        self.entry_names.insert(path.clone());
        self.report.entries.push(path.clone());
        Ok(())
    }

    fn read_content(&self, path: &FilePath) -> PackerResult<Vec<u8>> {
        let mut content = vec![];
        self.adapter
            .read_file(path)?
            .read_to_end(&mut content)
            .with_context(|| format!("Failed to read '{path}'"))?;
        Ok(content)
    }

    fn report_missing(&mut self, path: &FilePath, kind: InputKind) {
        let message = match kind {
            InputKind::File => format!("WARNING: {path} not found"),
            InputKind::Directory => format!("WARNING: {path} directory not found"),
        };
        debug!("{message}");
        self.adapter.print(&message);
        self.report.missing.push(MissingInput {
            path: path.clone(),
            kind,
        });
    }

    fn report_skipped(&mut self, path: &FilePath, reason: String) {
        debug!("Skipping '{path}': {reason}");
        self.adapter
            .print(&format!("WARNING: could not read {path}: {reason}"));
        self.report.skipped.push(SkippedInput {
            path: path.clone(),
            reason,
        });
    }

    fn finish(self) -> PackerResult<PackReport> {
        let mut output = self
            .zip_writer
            .finish()
            .with_context(|| format!("Failed to finish archive '{}'", self.archive_path))?;
        output
            .flush()
            .with_context(|| format!("Failed to flush archive '{}'", self.archive_path))?;
        Ok(self.report)
    }
}
