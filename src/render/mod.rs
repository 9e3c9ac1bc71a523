//! Render resource service boundary
//!
//! This module defines the trait through which geometry reaches the GPU.
//! The geometry layer is a pure client of this contract: buffer creation and
//! upload, binding, material state, and indexed draws. It never talks to a
//! graphics API directly.

pub mod mock;

use crate::geometry::Material;
use thiserror::Error;

/// Error type for render service operations
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("buffer allocation failed: {0}")]
    AllocationFailed(String),

    #[error("buffer upload failed: {0}")]
    UploadFailed(String),

    #[error("invalid buffer size: {0}")]
    InvalidSize(usize),

    #[error("unknown resource handle")]
    UnknownHandle,
}

/// Result type for render service operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Handle to a vertex buffer owned by the render service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexBufferId(pub u32);

/// Handle to an index buffer owned by the render service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexBufferId(pub u32);

/// Handle to a texture owned by the render service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Buffer/draw-call service consumed by the geometry layer.
///
/// Methods take `&self`; implementations are cheap cloneable handles over
/// shared state, so a loaded geometry can hold its own copy of the service
/// it uploads through.
///
/// # Example
/// ```ignore
/// let service = MockRenderService::new();
/// let ib = service.create_index_buffer(6)?;
/// service.update_index_buffer(ib, &index_bytes)?;
/// service.set_index_buffer(ib)?;
/// ```
pub trait RenderService {
    /// Create an index buffer of `size` bytes.
    fn create_index_buffer(&self, size: usize) -> RenderResult<IndexBufferId>;

    /// Create a vertex buffer of `size` bytes.
    fn create_vertex_buffer(&self, size: usize) -> RenderResult<VertexBufferId>;

    /// Upload `data` into an index buffer, replacing its contents from
    /// offset zero. `data` must fit the buffer.
    fn update_index_buffer(&self, buffer: IndexBufferId, data: &[u8]) -> RenderResult<()>;

    /// Upload `data` into a vertex buffer, replacing its contents from
    /// offset zero. `data` must fit the buffer.
    fn update_vertex_buffer(&self, buffer: VertexBufferId, data: &[u8]) -> RenderResult<()>;

    /// Bind an index buffer for subsequent draws.
    fn set_index_buffer(&self, buffer: IndexBufferId) -> RenderResult<()>;

    /// Bind a vertex buffer with the given per-vertex byte stride.
    fn set_vertex_buffer(&self, stride: usize, buffer: VertexBufferId) -> RenderResult<()>;

    /// Set the material state used by subsequent draws.
    fn set_material(&self, material: &Material) -> RenderResult<()>;

    /// Issue one indexed draw over the bound buffers.
    fn draw_indexed_primitive(
        &self,
        min_index: usize,
        vertex_count: usize,
        vertex_size: usize,
        start_index: usize,
        triangle_count: usize,
    ) -> RenderResult<()>;
}

// Re-export implementations
pub use mock::MockRenderService;
