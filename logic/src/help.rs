use crate::adapter::Adapter;
use crate::configuration::PackerConfiguration;
use crate::version::get_version;

pub fn print_help(adapter: &dyn Adapter) {
    adapter.print(&format!(
        "addon-packer ({}) - Packages a browser extension into a ZIP archive",
        get_version()
    ));
    let help_text = r#"USAGE:
    addon-packer [OPTIONS]

    Without options the archive is (re)built in the current directory.

OPTIONS:
    --help              Show this help message and exit
    --version           Display version information and exit
    --list              Show what would be packed, without writing anything

CONFIGURATION:
    addon-packer looks for an optional file named '.addon-packer.kdl' in the
    current directory to override the archive name and the packed inputs:

        archive "github-clone-addon.zip"
        files "content.js" "manifest.json" "README.md"
        directories "assets" "icons""#;

    adapter.print(help_text);
}

pub fn generate_configuration_message(config: &PackerConfiguration) -> String {
    let mut message = String::new();
    message.push_str(&format!("Configuration: {}\n", config.source));
    message.push_str(&format!("Archive: {}\n", config.archive));
    push_list(&mut message, "Files", &config.files);
    push_list(&mut message, "Directories", &config.directories);
    message
}

fn push_list<T: std::fmt::Display>(message: &mut String, title: &str, items: &[T]) {
    if items.is_empty() {
        message.push_str(&format!("{title}: (none)\n"));
        return;
    }
    message.push_str(&format!("{title}:\n"));
    for item in items {
        message.push_str(&format!("    {item}\n"));
    }
}
