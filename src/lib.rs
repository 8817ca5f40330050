pub mod analyzer;
pub mod commands;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod video;
pub mod youtube;
