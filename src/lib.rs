//! Music Catalog Library
//!
//! This library exposes modules for integration testing

pub mod config;
pub mod db;
pub mod error;
pub mod fuzzy;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod services;
pub mod state;
pub mod test_utils;
pub mod validation;
