use crate::adapter::{Adapter, HostPlatform, WriteSeek};
use crate::types::FilePath;
use addon_packer_base::result::{PackerResult, bail, err};
use expect_test::Expect;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone)]
pub struct MockAdapter {
    inner: Arc<RwLock<MockAdapterInner>>,
}

struct MockAdapterInner {
    args: Vec<String>,
    env: Vec<(String, String)>,
    effects_string: String,
    files: BTreeMap<FilePath, Vec<u8>>,
    directories: BTreeSet<FilePath>,
    unreadable: BTreeSet<FilePath>,
    read_only: BTreeSet<FilePath>,
    platform: HostPlatform,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockAdapterInner {
                args: vec!["./addon-packer".to_string()],
                env: vec![("NO_COLOR".to_string(), "1".to_string())],
                effects_string: String::new(),
                files: BTreeMap::new(),
                directories: BTreeSet::new(),
                unreadable: BTreeSet::new(),
                read_only: BTreeSet::new(),
                platform: HostPlatform {
                    system: "MockOS".to_string(),
                    release: "1.2.3-test".to_string(),
                },
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, MockAdapterInner> {
        self.inner
            .read()
            .expect("Unable to acquire read lock for mock adapter")
    }

    fn write(&self) -> RwLockWriteGuard<'_, MockAdapterInner> {
        self.inner
            .write()
            .expect("Unable to acquire write lock for mock adapter")
    }

    fn log_effect(&self, effect: impl AsRef<str>) {
        let mut inner = self.write();
        inner.effects_string.push_str(effect.as_ref());
        inner.effects_string.push('\n');
    }

    pub fn set_args(&self, args: &[&str]) {
        let mut all_args = vec!["./addon-packer".to_string()];
        all_args.extend(args.iter().map(|s| s.to_string()));
        self.write().args = all_args;
    }

    pub fn set_file(&self, path: &str, content: impl AsRef<[u8]>) {
        self.write()
            .files
            .insert(FilePath::from(path), content.as_ref().to_vec());
    }

    /// Registers an empty directory, directories containing files exist implicitly.
    pub fn add_directory(&self, path: &str) {
        self.write().directories.insert(FilePath::from(path));
    }

    pub fn set_unreadable(&self, path: &str) {
        self.write().unreadable.insert(FilePath::from(path));
    }

    pub fn set_read_only(&self, path: &str) {
        self.write().read_only.insert(FilePath::from(path));
    }

    pub fn file_content(&self, path: &str) -> Option<Vec<u8>> {
        self.read().files.get(&FilePath::from(path)).cloned()
    }

    pub fn verify_effects(&self, expected: Expect) {
        expected.assert_eq(&self.read().effects_string);
    }

    /// Like `verify_effects`, with the archive size replaced since it depends on the deflate output.
    pub fn verify_effects_masking_size(&self, expected: Expect) {
        let effects = self
            .read()
            .effects_string
            .lines()
            .map(|line| {
                if line.starts_with("\tSize: ") {
                    "\tSize: <masked> KB"
                } else {
                    line
                }
            })
            .fold(String::new(), |mut effects, line| {
                effects.push_str(line);
                effects.push('\n');
                effects
            });
        expected.assert_eq(&effects);
    }

    pub fn get_effects(&self) -> String {
        self.read().effects_string.clone()
    }

    pub fn clear_effects(&self) {
        self.write().effects_string.clear();
    }
}

impl MockAdapterInner {
    fn is_directory(&self, path: &FilePath) -> bool {
        self.directories.contains(path)
            || self
                .files
                .keys()
                .any(|file| file != path && file.starts_with(path))
    }
}

impl Adapter for MockAdapter {
    fn args(&self) -> Vec<String> {
        self.read().args.clone()
    }

    fn env(&self) -> Vec<(String, String)> {
        self.read().env.clone()
    }

    fn print(&self, message: &str) {
        let mut effect = String::from("PRINT:");
        for line in message.lines() {
            effect.push('\n');
            if !line.is_empty() {
                effect.push('\t');
                effect.push_str(line);
            }
        }
        self.log_effect(effect);
    }

    fn exit(&self, exit_code: i32) {
        self.log_effect(format!("EXIT: {exit_code}"));
    }

    fn file_exists(&self, path: &FilePath) -> PackerResult<bool> {
        let inner = self.read();
        Ok(inner.files.contains_key(path) || inner.is_directory(path))
    }

    fn is_file(&self, path: &FilePath) -> PackerResult<bool> {
        Ok(self.read().files.contains_key(path))
    }

    fn is_directory(&self, path: &FilePath) -> PackerResult<bool> {
        Ok(self.read().is_directory(path))
    }

    fn read_file(&self, path: &FilePath) -> PackerResult<Box<dyn Read>> {
        self.log_effect(format!("READ FILE: {path}"));
        let inner = self.read();
        if inner.unreadable.contains(path) {
            bail!("Failed to read file '{path}': Permission denied");
        }
        let content = inner
            .files
            .get(path)
            .ok_or_else(|| err!("Failed to read file '{path}': No such file"))?;
        Ok(Box::new(Cursor::new(content.clone())))
    }

    fn create_file(&self, path: &FilePath) -> PackerResult<Box<dyn WriteSeek>> {
        self.log_effect(format!("CREATE FILE: {path}"));
        let mut inner = self.write();
        if inner.read_only.contains(path) {
            bail!("Failed to create file '{path}': Permission denied");
        }
        inner.files.insert(path.clone(), vec![]);
        Ok(Box::new(MockFile {
            adapter: self.clone(),
            path: path.clone(),
            cursor: Cursor::new(vec![]),
        }))
    }

    fn delete_file(&self, path: &FilePath) -> PackerResult<()> {
        self.log_effect(format!("DELETE FILE: {path}"));
        let mut inner = self.write();
        if inner.read_only.contains(path) {
            bail!("Failed to delete file '{path}': Permission denied");
        }
        inner
            .files
            .remove(path)
            .ok_or_else(|| err!("Failed to delete file '{path}': No such file"))?;
        Ok(())
    }

    fn file_size(&self, path: &FilePath) -> PackerResult<u64> {
        let inner = self.read();
        let content = inner
            .files
            .get(path)
            .ok_or_else(|| err!("Failed to get size of '{path}': No such file"))?;
        Ok(content.len() as u64)
    }

    fn list_files_recursive(&self, path: &FilePath) -> PackerResult<Vec<FilePath>> {
        let inner = self.read();
        if inner.unreadable.contains(path) {
            bail!("Failed to list directory '{path}': Permission denied");
        }
        Ok(inner
            .files
            .keys()
            .filter(|file| *file != path && file.starts_with(path))
            .cloned()
            .collect())
    }

    fn host_platform(&self) -> HostPlatform {
        self.read().platform.clone()
    }
}

impl std::fmt::Debug for MockAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockAdapter")
    }
}

/// In-memory file that publishes its content to the mock file system on flush and drop.
struct MockFile {
    adapter: MockAdapter,
    path: FilePath,
    cursor: Cursor<Vec<u8>>,
}

impl MockFile {
    fn publish(&self) {
        self.adapter
            .write()
            .files
            .insert(self.path.clone(), self.cursor.get_ref().clone());
    }
}

impl Write for MockFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.cursor.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.publish();
        Ok(())
    }
}

impl Seek for MockFile {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl Drop for MockFile {
    fn drop(&mut self) {
        self.publish();
    }
}
