//! Derived mesh topology.
//!
//! - [`Adjacency`]: neighbor and incidence sets built per step from face lists
//! - [`NeighborRing`]: a vertex's neighbors ordered along the face fan
//! - [`unverified_rings`]: audit of vertices whose ring needed the fallback

pub mod adjacency;
pub mod ring;

pub use adjacency::Adjacency;
pub use ring::{unverified_rings, NeighborRing};
