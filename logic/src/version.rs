pub const ADDON_PACKER_VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_SUFFIX: Option<&str> = option_env!("ADDON_PACKER_REVISION");

pub fn get_version() -> String {
    // keep snapshots independent of the crate version
    if cfg!(test) {
        return "vTEST".to_string();
    }
    let suffix = GIT_SUFFIX.unwrap_or("dev");
    format!("{ADDON_PACKER_VERSION}-{suffix}")
}
