use crate::types::FilePath;
use addon_packer_base::result::PackerResult;
use std::fmt::{Debug, Display, Formatter};
use std::io::{Read, Seek, Write};
use std::rc::Rc;

pub trait WriteSeek: Write + Seek {}

impl<T: Write + Seek> WriteSeek for T {}

/// Name and release of the operating system the packer runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub system: String,
    pub release: String,
}

impl Display for HostPlatform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.system, self.release)
    }
}

/// All interaction with the host goes through this trait.
///
/// Paths are relative to the working directory the packer was started in.
pub trait Adapter: Debug + 'static {
    fn args(&self) -> Vec<String>;
    fn env(&self) -> Vec<(String, String)>;
    fn print(&self, message: &str);
    fn exit(&self, exit_code: i32);

    fn file_exists(&self, path: &FilePath) -> PackerResult<bool>;
    fn is_file(&self, path: &FilePath) -> PackerResult<bool>;
    fn is_directory(&self, path: &FilePath) -> PackerResult<bool>;
    fn read_file(&self, path: &FilePath) -> PackerResult<Box<dyn Read>>;
    fn create_file(&self, path: &FilePath) -> PackerResult<Box<dyn WriteSeek>>;
    fn delete_file(&self, path: &FilePath) -> PackerResult<()>;
    fn file_size(&self, path: &FilePath) -> PackerResult<u64>;

    /// Lists every regular file below `path`, sorted by path.
    fn list_files_recursive(&self, path: &FilePath) -> PackerResult<Vec<FilePath>>;

    fn host_platform(&self) -> HostPlatform;
}

pub type AdapterBox = Rc<dyn Adapter>;
