#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Rivulet Core
//!
//! Identifier, geometry, and payload primitives for the Rivulet flow engine.
//!
//! This crate provides:
//! - [`NodeId`], [`EdgeId`], [`HandleId`] -- validated, opaque string
//!   identifiers for graph entities
//! - [`Point`] and [`Size`] -- canvas coordinates and pixel extents
//! - [`Payload`] -- free-form host data records, stored and forwarded
//!   without interpretation

pub mod geometry;
pub mod id;
pub mod payload;

pub use geometry::{Point, Size};
pub use id::{EdgeId, HandleId, KeyError, NodeId};
pub use payload::Payload;
