use crate::configuration::{ConfigurationSource, PackerConfiguration};
use crate::types::FilePath;
use addon_packer_base::logging::{info, info_span};
use addon_packer_base::result::{
    Context, HelpError, MietteReportError, PackerError, PackerResult, bail,
};
use kdl::{KdlDocument, KdlNode};
use std::path::Path;

const VALID_NODES_HELP: &str = "Valid top-level nodes are: 'archive', 'files', 'directories'";

pub fn parse_configuration_from_kdl(
    filename: &str,
    kdl: &str,
) -> PackerResult<PackerConfiguration> {
    info!("Parsing configuration file '{filename}'");
    let _span = info_span!("Parse configuration", filename).entered();
    (|| -> PackerResult<PackerConfiguration> {
        let doc = match kdl.parse::<KdlDocument>() {
            Ok(doc) => doc,
            Err(error) => {
                let report = miette::Report::new(error);
                return Err(PackerError::new(MietteReportError::from(report)));
            }
        };
        let mut configuration = PackerConfiguration {
            source: ConfigurationSource::File(FilePath::from(filename)),
            ..PackerConfiguration::default()
        };
        for node in doc.nodes() {
            let name = node.name().value();
            if node.children().is_some() {
                bail!("Node '{name}' does not take children");
            }
            match name {
                "archive" => {
                    let mut values = string_arguments(node)?;
                    if values.len() != 1 {
                        bail!(
                            "Node 'archive' expects exactly one file name, found {}",
                            values.len()
                        );
                    }
                    configuration.archive = parse_path(&values.remove(0))?;
                }
                "files" => {
                    configuration.files = parse_paths(node)?;
                }
                "directories" => {
                    configuration.directories = parse_paths(node)?;
                }
                other => {
                    return Err(HelpError::new(
                        format!("Unexpected top-level node: '{other}'"),
                        VALID_NODES_HELP,
                    )
                    .into());
                }
            }
        }
        Ok(configuration)
    })()
    .with_context(|| format!("Failed to parse configuration file '{filename}'"))
}

fn string_arguments(node: &KdlNode) -> PackerResult<Vec<String>> {
    let name = node.name().value();
    let mut values = vec![];
    for entry in node.entries() {
        if let Some(property) = entry.name() {
            bail!(
                "Node '{name}' does not take properties, found '{}'",
                property.value()
            );
        }
        let Some(value) = entry.value().as_string() else {
            bail!(
                "Node '{name}' expects string arguments, found {}",
                entry.value()
            );
        };
        values.push(value.to_string());
    }
    Ok(values)
}

fn parse_paths(node: &KdlNode) -> PackerResult<Vec<FilePath>> {
    string_arguments(node)?
        .iter()
        .map(|value| parse_path(value))
        .collect()
}

fn parse_path(value: &str) -> PackerResult<FilePath> {
    if value.starts_with('/') || value.starts_with('\\') || Path::new(value).is_absolute() {
        bail!("Path '{value}' must be relative to the working directory");
    }
    let path = FilePath::from(value).normalize();
    if path.as_str().is_empty() {
        bail!("Path '{value}' is empty");
    }
    if path.as_str() == ".." || path.as_str().starts_with("../") {
        bail!("Path '{value}' points outside of the working directory");
    }
    Ok(path)
}
