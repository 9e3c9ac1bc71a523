//! The per-model capability contract
//!
//! Every loaded model, whatever its source format, is consumed through the
//! [`Geometry`] trait: metadata counts, named-group enumeration,
//! label/material/object/light lookup, draw, and collision queries. Formats
//! differ wildly in what they can back, so capability methods default to
//! [`GeometryError::Unsupported`] and each implementation overrides exactly
//! the surface its format supports. An unsupported method fails loudly; it
//! never no-ops or fabricates data.

use crate::error::{GeometryError, GeometryResult};
use crate::render::{IndexBufferId, TextureId, VertexBufferId};
use glam::{Mat4, Vec3};

/// Number of texture slots on a material
pub const MATERIAL_TEXTURES: usize = 4;

/// Metadata counts for a loaded model.
///
/// Every implementation must answer these from the underlying format's raw
/// metadata, even when the corresponding detail accessors are unsupported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Info {
    /// Number of textures referenced by the model
    pub textures: usize,
    /// Number of materials defined by the model
    pub materials: usize,
    /// Number of objects (sub-mesh groupings)
    pub objects: usize,
}

/// A named transform attached to a node or bone.
///
/// Skinned geometry carries bone indices and weights; static geometry leaves
/// them zeroed.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Node or bone name
    pub name: Option<String>,
    /// Name of the group the label belongs to
    pub group_name: Option<String>,
    /// Label transform
    pub transform: Mat4,
    /// Format-specific flags
    pub flags: u32,
    /// Bone indices for skinned geometry
    pub bones: [u32; 4],
    /// Bone weights for skinned geometry
    pub weights: [f32; 4],
}

impl Default for Label {
    fn default() -> Self {
        Self {
            name: None,
            group_name: None,
            transform: Mat4::IDENTITY,
            flags: 0,
            bones: [0; 4],
            weights: [0.0; 4],
        }
    }
}

/// What a material texture slot holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextureType {
    #[default]
    None,
    Base,
    Normal,
}

/// Rendering parameters for one material
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// Material name
    pub name: Option<String>,
    /// Diffuse factor
    pub diffuse: f32,
    /// Per-slot texture type tags
    pub texture_types: [TextureType; MATERIAL_TEXTURES],
    /// Per-slot texture handles
    pub textures: [Option<TextureId>; MATERIAL_TEXTURES],
}

impl Material {
    /// A flat untextured material with full diffuse
    pub fn flat() -> Self {
        Self {
            diffuse: 1.0,
            ..Default::default()
        }
    }
}

/// A named sub-mesh grouping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    /// Object name
    pub name: Option<String>,
    /// Name of the group the object belongs to
    pub group_name: Option<String>,
    /// Material used by this object
    pub material_index: Option<usize>,
    /// Vertex buffer holding this object's vertices
    pub vertex_buffer: Option<VertexBufferId>,
    /// First triangle of this object in the index buffer
    pub start_triangle: u32,
    /// Number of triangles
    pub triangle_count: u32,
    /// Number of vertices
    pub vertex_count: u32,
}

/// Kind of a light source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LightKind {
    #[default]
    Point,
    Spot,
    Directional,
}

/// A named light source definition
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light name
    pub name: Option<String>,
    /// Name of the group the light belongs to
    pub group_name: Option<String>,
    /// Light kind
    pub kind: LightKind,
    /// Position in model space
    pub position: Vec3,
    /// Direction for spot and directional lights
    pub direction: Vec3,
    /// RGBA color
    pub color: [f32; 4],
    /// Attenuation range
    pub range: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            name: None,
            group_name: None,
            kind: LightKind::Point,
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            color: [1.0, 1.0, 1.0, 1.0],
            range: 0.0,
        }
    }
}

/// A clipping plane (unit normal plus distance)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

/// Details of the most recent collision trace hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceInfo {
    /// Vertices of the hit triangle
    pub triangle: [Vec3; 3],
    /// Index of the object the triangle belongs to
    pub object: usize,
    /// Index of the triangle within the object
    pub triangle_index: usize,
}

/// Callback applied to the material before an overridden draw
pub type MaterialFn<'a> = &'a dyn Fn(&mut Material);

/// Callback receiving each clipped polygon; returns false to stop clipping
pub type AddPolygonFn<'a> = &'a mut dyn FnMut(&[Vec3]) -> bool;

/// The capability contract every loaded model exposes.
///
/// `info` and `draw` are the mandatory core; everything else is a capability
/// that defaults to [`GeometryError::Unsupported`] until a format overrides
/// it. Lookup methods that run but match nothing return
/// [`GeometryError::NotFound`] instead, so callers can tell "this format
/// cannot do this" apart from "value absent".
pub trait Geometry {
    /// Metadata counts from the underlying format's raw metadata.
    fn info(&self) -> Info;

    /// Draw the model through the render service it was loaded with.
    ///
    /// `clip_planes` and `material_override` are contract-level parameters;
    /// formats without clipping or material-callback support ignore them.
    fn draw(
        &mut self,
        clip_planes: &[Plane],
        material_override: Option<MaterialFn<'_>>,
    ) -> GeometryResult<()>;

    /// Resolve a group name to its index.
    fn find_name(&self, _name: &str) -> GeometryResult<usize> {
        Err(GeometryError::Unsupported)
    }

    /// Enumerate labels belonging to the named group.
    fn group_labels(&self, _group: &str) -> GeometryResult<Vec<Label>> {
        Err(GeometryError::Unsupported)
    }

    /// Find the next label with the given name at or after `start`.
    fn find_label_by_name(&self, _start: usize, _name: &str) -> GeometryResult<usize> {
        Err(GeometryError::Unsupported)
    }

    /// Find the next label in the given group at or after `start`.
    fn find_label_by_group(&self, _start: usize, _group: &str) -> GeometryResult<usize> {
        Err(GeometryError::Unsupported)
    }

    /// Read a label by index.
    fn label(&self, _index: usize) -> GeometryResult<Label> {
        Err(GeometryError::Unsupported)
    }

    /// Overwrite a label by index.
    fn set_label(&mut self, _index: usize, _label: &Label) -> GeometryResult<()> {
        Err(GeometryError::Unsupported)
    }

    /// Find the next material with the given name at or after `start`.
    fn find_material_by_name(&self, _start: usize, _name: &str) -> GeometryResult<usize> {
        Err(GeometryError::Unsupported)
    }

    /// Find the next material in the given group at or after `start`.
    fn find_material_by_group(&self, _start: usize, _group: &str) -> GeometryResult<usize> {
        Err(GeometryError::Unsupported)
    }

    /// Read a material by index.
    fn material(&self, _index: usize) -> GeometryResult<Material> {
        Err(GeometryError::Unsupported)
    }

    /// Overwrite a material by index.
    fn set_material(&mut self, _index: usize, _material: &Material) -> GeometryResult<()> {
        Err(GeometryError::Unsupported)
    }

    /// Find the next object with the given name at or after `start`.
    fn find_object_by_name(&self, _start: usize, _name: &str) -> GeometryResult<usize> {
        Err(GeometryError::Unsupported)
    }

    /// Find the next object in the given group at or after `start`.
    fn find_object_by_group(&self, _start: usize, _group: &str) -> GeometryResult<usize> {
        Err(GeometryError::Unsupported)
    }

    /// Read an object by index.
    fn object(&self, _index: usize) -> GeometryResult<Object> {
        Err(GeometryError::Unsupported)
    }

    /// Overwrite an object by index.
    fn set_object(&mut self, _index: usize, _object: &Object) -> GeometryResult<()> {
        Err(GeometryError::Unsupported)
    }

    /// Find the next light with the given name at or after `start`.
    fn find_light_by_name(&self, _start: usize, _name: &str) -> GeometryResult<usize> {
        Err(GeometryError::Unsupported)
    }

    /// Find the next light in the given group at or after `start`.
    fn find_light_by_group(&self, _start: usize, _group: &str) -> GeometryResult<usize> {
        Err(GeometryError::Unsupported)
    }

    /// Read a light by index.
    fn light(&self, _index: usize) -> GeometryResult<Light> {
        Err(GeometryError::Unsupported)
    }

    /// Overwrite a light by index.
    fn set_light(&mut self, _index: usize, _light: &Light) -> GeometryResult<()> {
        Err(GeometryError::Unsupported)
    }

    /// Trace a ray against collision geometry; returns the hit fraction
    /// along `src..dst`.
    fn trace(&self, _src: Vec3, _dst: Vec3) -> GeometryResult<f32> {
        Err(GeometryError::Unsupported)
    }

    /// Clip collision polygons against a plane set around `center`, feeding
    /// each surviving polygon to `add_polygon`.
    fn clip(
        &self,
        _planes: &[Plane],
        _center: Vec3,
        _radius: f32,
        _add_polygon: AddPolygonFn<'_>,
    ) -> GeometryResult<bool> {
        Err(GeometryError::Unsupported)
    }

    /// Details of the most recent successful trace.
    fn collision_details(&self) -> GeometryResult<TraceInfo> {
        Err(GeometryError::Unsupported)
    }

    /// Find the next texture with the given name at or after `start`.
    fn find_texture(&self, _start: usize, _name: &str) -> GeometryResult<usize> {
        Err(GeometryError::Unsupported)
    }

    /// Render-service handle of a texture by index.
    fn texture(&self, _index: usize) -> GeometryResult<TextureId> {
        Err(GeometryError::Unsupported)
    }

    /// Name of a texture by index.
    fn texture_name(&self, _index: usize) -> GeometryResult<String> {
        Err(GeometryError::Unsupported)
    }

    /// Render-service handle of a vertex buffer by index.
    fn vertex_buffer(&self, _index: usize) -> GeometryResult<VertexBufferId> {
        Err(GeometryError::Unsupported)
    }

    /// Render-service handle of the index buffer.
    fn index_buffer(&self) -> GeometryResult<IndexBufferId> {
        Err(GeometryError::Unsupported)
    }

    /// Attach companion baked-light/collision data loaded from `path`.
    fn attach_light_data(&mut self, _path: &str) -> GeometryResult<()> {
        Err(GeometryError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareGeometry;

    impl Geometry for BareGeometry {
        fn info(&self) -> Info {
            Info::default()
        }

        fn draw(
            &mut self,
            _clip_planes: &[Plane],
            _material_override: Option<MaterialFn<'_>>,
        ) -> GeometryResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_capability_defaults_fail_loudly() {
        let mut geometry = BareGeometry;

        assert!(matches!(
            geometry.material(0),
            Err(GeometryError::Unsupported)
        ));
        assert!(matches!(
            geometry.set_label(0, &Label::default()),
            Err(GeometryError::Unsupported)
        ));
        assert!(matches!(
            geometry.trace(Vec3::ZERO, Vec3::ONE),
            Err(GeometryError::Unsupported)
        ));
        assert!(matches!(
            geometry.index_buffer(),
            Err(GeometryError::Unsupported)
        ));
    }

    #[test]
    fn test_trait_is_object_safe() {
        let mut boxed: Box<dyn Geometry> = Box::new(BareGeometry);
        assert_eq!(boxed.info(), Info::default());
        assert!(boxed.draw(&[], None).is_ok());
    }

    #[test]
    fn test_flat_material() {
        let material = Material::flat();
        assert_eq!(material.diffuse, 1.0);
        assert!(material.textures.iter().all(Option::is_none));
        assert_eq!(material.texture_types, [TextureType::None; 4]);
    }
}
