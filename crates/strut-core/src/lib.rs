//! Core types for the strut layout toolkit.
//!
//! This crate provides the foundational types used across the other strut crates:
//! - View handles and the view hierarchy
//! - Constraint descriptors (anchors, relations, priorities)
//! - Plain geometry types (points, sizes, rects)

pub mod constraint;
pub mod geometry;
pub mod view;

pub use constraint::*;
pub use geometry::*;
pub use view::*;
