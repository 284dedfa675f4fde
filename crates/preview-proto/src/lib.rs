//! Metadata fetching, normalization and state for link preview cards.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod normalize;
pub mod platform;
pub mod protocol;
pub mod state;
pub mod theme;
