//! Geometric value types and vector helpers.
//!
//! - [`ClosedPolyline`]: ring of vertices with intrinsic decomposition
//! - [`FaceVertexMesh`] / [`MeshFace`]: vertex list plus triangle/quad faces
//! - [`Plane`]: unit-normal plane equations fit from point sets
//! - [`vector`]: unitize/resize/angle helpers shared by the flow formulas

pub mod mesh;
pub mod plane;
pub mod polyline;
pub mod vector;

pub use mesh::{FaceVertexMesh, MeshFace};
pub use plane::Plane;
pub use polyline::ClosedPolyline;
