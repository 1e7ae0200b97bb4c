pub mod config;
pub mod data;
pub mod error;
pub mod serve;
pub mod site;
pub mod templates;
pub mod utils;
