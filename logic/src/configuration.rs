use crate::adapter::Adapter;
use crate::configuration::parse_config::parse_configuration_from_kdl;
use crate::types::FilePath;
use addon_packer_base::logging::info;
use addon_packer_base::result::{Context, PackerResult};
use std::fmt::Display;

pub mod parse_config;

pub const CONFIGURATION_FILE_NAME: &str = ".addon-packer.kdl";

pub const DEFAULT_ARCHIVE_NAME: &str = "github-clone-addon.zip";
pub const DEFAULT_FILES: [&str; 3] = ["content.js", "manifest.json", "README.md"];
pub const DEFAULT_DIRECTORIES: [&str; 2] = ["assets", "icons"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationSource {
    Defaults,
    File(FilePath),
}

impl Display for ConfigurationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationSource::Defaults => write!(f, "built-in defaults"),
            ConfigurationSource::File(path) => write!(f, "{path}"),
        }
    }
}

/// What goes into the archive, and where the archive is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackerConfiguration {
    pub archive: FilePath,
    pub files: Vec<FilePath>,
    pub directories: Vec<FilePath>,
    pub source: ConfigurationSource,
}

impl Default for PackerConfiguration {
    fn default() -> Self {
        Self {
            archive: FilePath::from(DEFAULT_ARCHIVE_NAME),
            files: DEFAULT_FILES.iter().map(|name| FilePath::from(*name)).collect(),
            directories: DEFAULT_DIRECTORIES
                .iter()
                .map(|name| FilePath::from(*name))
                .collect(),
            source: ConfigurationSource::Defaults,
        }
    }
}

/// Loads the configuration file from the working directory, falling back to the defaults if there is none.
pub fn load_configuration(adapter: &dyn Adapter) -> PackerResult<PackerConfiguration> {
    let config_path = FilePath::from(CONFIGURATION_FILE_NAME);
    if !adapter.file_exists(&config_path)? {
        info!("No '{CONFIGURATION_FILE_NAME}' found, using built-in file lists");
        return Ok(PackerConfiguration::default());
    }
    let config_string = std::io::read_to_string(adapter.read_file(&config_path)?)
        .with_context(|| format!("Failed to read configuration file '{config_path}'"))?;
    parse_configuration_from_kdl(config_path.as_str(), &config_string)
}
