//! Search UI components for the Mutation Browser desktop application.
//!
//! Provides the egui search window: gene field, Search button, and the
//! results body with the variants table.

pub mod app;
pub mod results;
pub mod status;

pub use app::SearchApp;
