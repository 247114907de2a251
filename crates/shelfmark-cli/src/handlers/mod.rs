pub mod config;
pub mod list;
pub mod preset;
pub mod window;
