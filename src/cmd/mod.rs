pub mod completions;
pub mod config;
pub mod dict;
pub mod init;
pub mod prescription;
pub mod scan;
