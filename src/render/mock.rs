//! Mock render service for testing
//!
//! Stores buffer contents in memory and counts every service call so tests
//! can assert on upload and draw behavior without GPU hardware.

use super::{
    IndexBufferId, RenderError, RenderResult, RenderService, VertexBufferId,
};
use crate::geometry::Material;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

/// Parameters of one recorded `draw_indexed_primitive` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub min_index: usize,
    pub vertex_count: usize,
    pub vertex_size: usize,
    pub start_index: usize,
    pub triangle_count: usize,
}

#[derive(Debug, Default)]
struct MockState {
    index_buffers: HashMap<u32, Vec<u8>>,
    vertex_buffers: HashMap<u32, Vec<u8>>,
    bound_index_buffer: Option<IndexBufferId>,
    bound_vertex_buffer: Option<(usize, VertexBufferId)>,
    material: Option<Material>,
    draws: Vec<DrawCall>,
}

/// Mock render service backed by in-memory buffers.
///
/// Clones share state, so a geometry holding its own copy of the service is
/// observable through the copy the test kept.
#[derive(Clone, Debug, Default)]
pub struct MockRenderService {
    next_id: Arc<AtomicU32>,
    index_buffer_writes: Arc<AtomicU64>,
    vertex_buffer_writes: Arc<AtomicU64>,
    state: Arc<RwLock<MockState>>,
}

impl MockRenderService {
    /// Create a new mock render service
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> u32 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of index buffers created so far
    pub fn index_buffer_count(&self) -> usize {
        self.state.read().index_buffers.len()
    }

    /// Number of vertex buffers created so far
    pub fn vertex_buffer_count(&self) -> usize {
        self.state.read().vertex_buffers.len()
    }

    /// Number of `update_index_buffer` calls so far
    pub fn index_buffer_writes(&self) -> u64 {
        self.index_buffer_writes.load(Ordering::Relaxed)
    }

    /// Number of `update_vertex_buffer` calls so far
    pub fn vertex_buffer_writes(&self) -> u64 {
        self.vertex_buffer_writes.load(Ordering::Relaxed)
    }

    /// Byte length of an index buffer, if it exists
    pub fn index_buffer_len(&self, buffer: IndexBufferId) -> Option<usize> {
        self.state.read().index_buffers.get(&buffer.0).map(Vec::len)
    }

    /// Byte length of a vertex buffer, if it exists
    pub fn vertex_buffer_len(&self, buffer: VertexBufferId) -> Option<usize> {
        self.state.read().vertex_buffers.get(&buffer.0).map(Vec::len)
    }

    /// Contents of an index buffer, if it exists
    pub fn index_buffer_data(&self, buffer: IndexBufferId) -> Option<Vec<u8>> {
        self.state.read().index_buffers.get(&buffer.0).cloned()
    }

    /// Contents of a vertex buffer, if it exists
    pub fn vertex_buffer_data(&self, buffer: VertexBufferId) -> Option<Vec<u8>> {
        self.state.read().vertex_buffers.get(&buffer.0).cloned()
    }

    /// Currently bound index buffer
    pub fn bound_index_buffer(&self) -> Option<IndexBufferId> {
        self.state.read().bound_index_buffer
    }

    /// Currently bound vertex buffer with its stride
    pub fn bound_vertex_buffer(&self) -> Option<(usize, VertexBufferId)> {
        self.state.read().bound_vertex_buffer
    }

    /// Material set by the most recent `set_material` call
    pub fn current_material(&self) -> Option<Material> {
        self.state.read().material.clone()
    }

    /// Number of draw calls issued so far
    pub fn draw_count(&self) -> usize {
        self.state.read().draws.len()
    }

    /// Most recent draw call, if any
    pub fn last_draw(&self) -> Option<DrawCall> {
        self.state.read().draws.last().copied()
    }
}

impl RenderService for MockRenderService {
    fn create_index_buffer(&self, size: usize) -> RenderResult<IndexBufferId> {
        if size == 0 {
            return Err(RenderError::InvalidSize(size));
        }
        let id = self.next_id();
        self.state.write().index_buffers.insert(id, vec![0u8; size]);
        Ok(IndexBufferId(id))
    }

    fn create_vertex_buffer(&self, size: usize) -> RenderResult<VertexBufferId> {
        if size == 0 {
            return Err(RenderError::InvalidSize(size));
        }
        let id = self.next_id();
        self.state.write().vertex_buffers.insert(id, vec![0u8; size]);
        Ok(VertexBufferId(id))
    }

    fn update_index_buffer(&self, buffer: IndexBufferId, data: &[u8]) -> RenderResult<()> {
        self.index_buffer_writes.fetch_add(1, Ordering::Relaxed);
        let mut state = self.state.write();
        let contents = state
            .index_buffers
            .get_mut(&buffer.0)
            .ok_or(RenderError::UnknownHandle)?;
        if data.len() > contents.len() {
            return Err(RenderError::UploadFailed(format!(
                "data exceeds buffer size: data_len={}, buffer_size={}",
                data.len(),
                contents.len()
            )));
        }
        contents[..data.len()].copy_from_slice(data);
        Ok(())
    }

    fn update_vertex_buffer(&self, buffer: VertexBufferId, data: &[u8]) -> RenderResult<()> {
        self.vertex_buffer_writes.fetch_add(1, Ordering::Relaxed);
        let mut state = self.state.write();
        let contents = state
            .vertex_buffers
            .get_mut(&buffer.0)
            .ok_or(RenderError::UnknownHandle)?;
        if data.len() > contents.len() {
            return Err(RenderError::UploadFailed(format!(
                "data exceeds buffer size: data_len={}, buffer_size={}",
                data.len(),
                contents.len()
            )));
        }
        contents[..data.len()].copy_from_slice(data);
        Ok(())
    }

    fn set_index_buffer(&self, buffer: IndexBufferId) -> RenderResult<()> {
        let mut state = self.state.write();
        if !state.index_buffers.contains_key(&buffer.0) {
            return Err(RenderError::UnknownHandle);
        }
        state.bound_index_buffer = Some(buffer);
        Ok(())
    }

    fn set_vertex_buffer(&self, stride: usize, buffer: VertexBufferId) -> RenderResult<()> {
        let mut state = self.state.write();
        if !state.vertex_buffers.contains_key(&buffer.0) {
            return Err(RenderError::UnknownHandle);
        }
        state.bound_vertex_buffer = Some((stride, buffer));
        Ok(())
    }

    fn set_material(&self, material: &Material) -> RenderResult<()> {
        self.state.write().material = Some(material.clone());
        Ok(())
    }

    fn draw_indexed_primitive(
        &self,
        min_index: usize,
        vertex_count: usize,
        vertex_size: usize,
        start_index: usize,
        triangle_count: usize,
    ) -> RenderResult<()> {
        self.state.write().draws.push(DrawCall {
            min_index,
            vertex_count,
            vertex_size,
            start_index,
            triangle_count,
        });
        Ok(())
    }
}
