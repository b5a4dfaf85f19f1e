use addon_packer_base::logging::warn;
use addon_packer_base::result::{Context, PackerResult};
use addon_packer_logic::adapter::{Adapter, HostPlatform, WriteSeek};
use addon_packer_logic::types::FilePath;
use std::env;
use std::fmt::Debug;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use sysinfo::System;
use walkdir::WalkDir;

pub struct RealAdapter {
    base_path: PathBuf,
}

impl RealAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        path.to_path(&self.base_path)
    }
}

impl Adapter for RealAdapter {
    fn args(&self) -> Vec<String> {
        env::args().collect()
    }

    fn env(&self) -> Vec<(String, String)> {
        env::vars().collect()
    }

    fn print(&self, message: &str) {
        println!("{message}");
    }

    fn exit(&self, exit_code: i32) {
        std::process::exit(exit_code);
    }

    fn file_exists(&self, path: &FilePath) -> PackerResult<bool> {
        Ok(self.resolve_path(path).exists())
    }

    fn is_file(&self, path: &FilePath) -> PackerResult<bool> {
        Ok(self.resolve_path(path).is_file())
    }

    fn is_directory(&self, path: &FilePath) -> PackerResult<bool> {
        Ok(self.resolve_path(path).is_dir())
    }

    fn read_file(&self, path: &FilePath) -> PackerResult<Box<dyn Read>> {
        let physical_path = self.resolve_path(path);
        Ok(Box::new(File::open(&physical_path).with_context(|| {
            format!("Failed to read file {physical_path:?}")
        })?))
    }

    fn create_file(&self, path: &FilePath) -> PackerResult<Box<dyn WriteSeek>> {
        let physical_path = self.resolve_path(path);
        Ok(Box::new(File::create(&physical_path).with_context(
            || format!("Failed to create file {physical_path:?}"),
        )?))
    }

    fn delete_file(&self, path: &FilePath) -> PackerResult<()> {
        let physical_path = self.resolve_path(path);
        std::fs::remove_file(&physical_path)
            .with_context(|| format!("Failed to delete file {physical_path:?}"))?;
        Ok(())
    }

    fn file_size(&self, path: &FilePath) -> PackerResult<u64> {
        let physical_path = self.resolve_path(path);
        let metadata = std::fs::metadata(&physical_path)
            .with_context(|| format!("Failed to read metadata of {physical_path:?}"))?;
        Ok(metadata.len())
    }

    fn list_files_recursive(&self, path: &FilePath) -> PackerResult<Vec<FilePath>> {
        let root = self.resolve_path(path);
        let mut files = vec![];
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // the root itself must be readable, anything below is best effort
                    if err.depth() == 0 {
                        return Err(err).with_context(|| format!("Failed to list {root:?}"));
                    }
                    warn!("Skipping unreadable entry below {root:?}: {err}");
                    continue;
                }
            };
            // follows symlinks to files, but not to directories
            if !entry.path().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&root)
                .with_context(|| format!("Unexpected path {:?} below {root:?}", entry.path()))?;
            match FilePath::from_path(relative) {
                Ok(relative) => files.push(path.join(relative)),
                Err(err) => warn!("Skipping {:?}: {err}", entry.path()),
            }
        }
        Ok(files)
    }

    fn host_platform(&self) -> HostPlatform {
        HostPlatform {
            system: system_name().to_string(),
            release: System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

fn system_name() -> &'static str {
    #[cfg(target_os = "macos")]
    return "Darwin";
    #[cfg(target_os = "linux")]
    return "Linux";
    #[cfg(target_os = "windows")]
    return "Windows";
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    return env::consts::OS;
}

impl Debug for RealAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RealAdapter")
    }
}
