#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Rivulet Board
//!
//! Board shell binding host configuration and interaction signals to the
//! Rivulet flow engine.
//!
//! A [`Board`] is one flow-diagram component instance: the style parameters
//! the host configures, the graph being edited, and the translation of raw
//! gesture outcomes into graph operations. It includes:
//!
//! - [`Board`] owning one [`rivulet_graph::GraphStore`] per instance
//! - [`BoardConfig`] for the host's style parameters
//! - [`Interaction`] signals mapped one-to-one onto graph operations
//! - [`starter_flow`] as the default payload for unconfigured boards

pub mod board;
pub mod config;
pub mod interaction;

pub use board::{Board, starter_flow};
pub use config::BoardConfig;
pub use interaction::Interaction;
