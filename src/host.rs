//! The host-document boundary.
//!
//! Flows evolve plain value types; a host environment (a CAD document, a
//! file-backed scene, a test fixture) owns the objects those values come
//! from and go back to. [`GeometryProvider`] is the narrow interface the
//! flows need from such a host: fetch by handle, store, delete. The
//! [`advance_polyline`] and [`advance_mesh`] helpers run one flow step
//! through a provider and replace the stored predecessor with the result.
//!
//! [`MemoryDocument`] is the built-in provider for host-less use.

use std::collections::BTreeMap;

use crate::error::{FlowError, Result};
use crate::flow::Flow;
use crate::geometry::{ClosedPolyline, FaceVertexMesh};

/// Storage for flow geometry owned by a host environment.
///
/// A provider hands out opaque handles on store and resolves them back to
/// geometry on fetch. Fetching a handle that was deleted, never issued, or
/// issued for the other kind of geometry returns `None`.
pub trait GeometryProvider {
    /// The host's object identifier.
    type Handle: Copy;

    /// The polyline stored under `handle`, if any.
    fn polyline(&self, handle: Self::Handle) -> Option<&ClosedPolyline>;

    /// The mesh stored under `handle`, if any.
    fn mesh(&self, handle: Self::Handle) -> Option<&FaceVertexMesh>;

    /// Stores a polyline and returns its handle.
    fn add_polyline(&mut self, polyline: ClosedPolyline) -> Self::Handle;

    /// Stores a mesh and returns its handle.
    fn add_mesh(&mut self, mesh: FaceVertexMesh) -> Self::Handle;

    /// Removes the object under `handle`. Unknown handles are ignored.
    fn delete(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone)]
enum Stored {
    Polyline(ClosedPolyline),
    Mesh(FaceVertexMesh),
}

/// An in-memory [`GeometryProvider`] with `usize` handles.
///
/// The provider a host adapter would replace; handles are never reused, so
/// a stale handle fetches `None` rather than a successor object.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    objects: BTreeMap<usize, Stored>,
    next_handle: usize,
}

impl MemoryDocument {
    /// An empty document.
    pub fn new() -> Self {
        MemoryDocument::default()
    }

    /// Number of stored objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the document stores no objects.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn store(&mut self, object: Stored) -> usize {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.objects.insert(handle, object);
        handle
    }
}

impl GeometryProvider for MemoryDocument {
    type Handle = usize;

    fn polyline(&self, handle: usize) -> Option<&ClosedPolyline> {
        match self.objects.get(&handle) {
            Some(Stored::Polyline(polyline)) => Some(polyline),
            _ => None,
        }
    }

    fn mesh(&self, handle: usize) -> Option<&FaceVertexMesh> {
        match self.objects.get(&handle) {
            Some(Stored::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    fn add_polyline(&mut self, polyline: ClosedPolyline) -> usize {
        self.store(Stored::Polyline(polyline))
    }

    fn add_mesh(&mut self, mesh: FaceVertexMesh) -> usize {
        self.store(Stored::Mesh(mesh))
    }

    fn delete(&mut self, handle: usize) {
        self.objects.remove(&handle);
    }
}

/// Runs one polyline flow step through a provider.
///
/// Fetches the polyline under `handle`, steps it, stores the result, deletes
/// the predecessor and returns the new handle. Fails with
/// [`FlowError::MissingObject`] when `handle` does not resolve to a
/// polyline; a failing step leaves the document untouched.
pub fn advance_polyline<P, F>(provider: &mut P, handle: P::Handle, flow: &F) -> Result<P::Handle>
where
    P: GeometryProvider,
    F: Flow<Geometry = ClosedPolyline>,
{
    let current = provider
        .polyline(handle)
        .ok_or(FlowError::MissingObject {
            expected: "polyline",
        })?;
    let next = flow.step(current)?;
    let new_handle = provider.add_polyline(next);
    provider.delete(handle);
    Ok(new_handle)
}

/// Runs one mesh flow step through a provider.
///
/// The mesh counterpart of [`advance_polyline`].
pub fn advance_mesh<P, F>(provider: &mut P, handle: P::Handle, flow: &F) -> Result<P::Handle>
where
    P: GeometryProvider,
    F: Flow<Geometry = FaceVertexMesh>,
{
    let current = provider
        .mesh(handle)
        .ok_or(FlowError::MissingObject { expected: "mesh" })?;
    let next = flow.step(current)?;
    let new_handle = provider.add_mesh(next);
    provider.delete(handle);
    Ok(new_handle)
}
