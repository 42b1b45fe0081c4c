//! Links lines of movie dialogue to the performers who spoke them by joining
//! a dialogue corpus against a cast catalog.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod merge;
pub mod models;
pub mod names;
pub mod normalize;
pub mod pipeline;
pub mod predict;
pub mod resolve;
mod table;

pub use error::CastlineError;
