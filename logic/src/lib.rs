pub mod adapter;
pub mod configuration;
pub mod help;
#[cfg(test)]
mod mock_adapter;
pub mod packer;
pub mod runner;
pub mod types;
pub mod version;
