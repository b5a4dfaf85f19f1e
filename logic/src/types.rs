pub type FilePath = relative_path::RelativePathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingInput {
    pub path: FilePath,
    pub kind: InputKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedInput {
    pub path: FilePath,
    pub reason: String,
}
