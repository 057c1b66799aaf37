pub mod config;
pub mod convert;
pub mod extract;
pub mod show;
