pub mod app;
pub mod config;
pub mod csv_loader;
pub mod document;
pub mod exporter;
pub mod logging;
pub mod render;
pub mod session;
pub mod utils;
