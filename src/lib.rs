pub mod error;
pub mod validation;
pub mod model;
pub mod db;
pub mod store;
pub mod matcher;
pub mod picture;
pub mod http;
pub mod browser;
pub mod providers;
pub mod ops;
pub mod config;
pub mod import;
pub mod cli;
