pub mod chart;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod portfolio;
pub mod symbols;
