//! geoform - format-dispatching model loading behind one geometry contract
//!
//! # Features
//! - Capability-based geometry contract (counts, labels, materials, draw,
//!   collision) with loud per-capability unsupported signaling
//! - Format dispatch by suffix with canonical path and companion
//!   light-data naming rules
//! - glTF adapter with lazy first-draw GPU upload
//! - Render-service abstraction (any backend via trait, mock included)
//!
//! # Quick Start
//!
//! ```ignore
//! use geoform::{GeometryLoader, MockRenderService};
//!
//! let service = MockRenderService::new();
//! let loader = GeometryLoader::new(service, Box::new(gm_loader));
//! if let Some(mut geometry) = loader.load("props/chair.gltf", "day") {
//!     geometry.draw(&[], None)?;
//! }
//! ```

// Core modules
pub mod geometry;
pub mod loader;
pub mod render;
pub mod vertex;

// Error types
mod error;
pub use error::{GeometryError, GeometryResult, LoadError};

// Re-export the capability contract
pub use geometry::{
    AddPolygonFn, Geometry, Info, Label, Light, LightKind, Material, MaterialFn, Object, Plane,
    TextureType, TraceInfo,
};

// Re-export loading types
pub use loader::gltf::{load_gltf_file, GltfGeometry};
pub use loader::{GeometryLoader, GmLoader, MODEL_ROOT};

// Re-export render service types
pub use render::mock::MockRenderService;
pub use render::{
    IndexBufferId, RenderError, RenderResult, RenderService, TextureId, VertexBufferId,
};

// Re-export the draw-path vertex layout
pub use vertex::StaticVertex;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
