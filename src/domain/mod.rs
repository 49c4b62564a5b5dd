//! Core domain types and logic.

pub mod aggregator;
pub mod config;
pub mod config_validation;
pub mod error;
pub mod price;
pub mod schedule;
pub mod simulator;
pub mod strategy;
pub mod summary;
pub mod universe;
