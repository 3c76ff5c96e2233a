mod apportion;
mod export;
mod import;
mod init;
mod list;
mod show;
pub mod support;
mod weights;
