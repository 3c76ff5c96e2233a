//! CLI commands for marksheet

pub mod apportion;
pub mod dispatch;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod show;
pub mod table;
pub mod weights;
