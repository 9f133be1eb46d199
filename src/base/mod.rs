//! Foundation types for the rule front end.
//!
//! This module provides the primitives shared by every other layer:
//! - [`NodeId`], [`NodeIdGen`] - Identity of constructed expression/statement nodes
//! - [`PositionMap`] - Out-of-band `NodeId -> TextSize` source positions
//! - [`TextSize`], [`TextRange`] - Source offsets (byte based)
//!
//! This module has NO dependencies on other rulex modules.

mod node_id;
mod position;

pub use node_id::{NodeId, NodeIdGen};
pub use position::PositionMap;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
