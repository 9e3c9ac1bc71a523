//! Integration tests for the glTF adapter driven through the mock render
//! service's call-count instrumentation.

use geoform::{
    load_gltf_file, Geometry, GeometryError, Label, Material, MockRenderService, Object,
    StaticVertex,
};
use glam::Vec3;
use std::fs;
use std::path::PathBuf;

/// One triangle: three positions (VEC3 f32) followed by three u16 indices,
/// referenced by `TRIANGLE_GLTF` below.
fn triangle_bin() -> Vec<u8> {
    let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let indices: [u16; 3] = [0, 1, 2];

    let mut data = Vec::new();
    for value in positions {
        data.extend_from_slice(&value.to_le_bytes());
    }
    for value in indices {
        data.extend_from_slice(&value.to_le_bytes());
    }
    data
}

const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "buffers": [{ "uri": "tri.bin", "byteLength": 42 }],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
  ],
  "accessors": [
    {
      "bufferView": 0,
      "componentType": 5126,
      "count": 3,
      "type": "VEC3",
      "min": [0.0, 0.0, 0.0],
      "max": [1.0, 1.0, 0.0]
    },
    { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
  ],
  "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1 }] }],
  "nodes": [{ "mesh": 0, "name": "tri" }],
  "scenes": [{ "nodes": [0], "name": "props" }],
  "scene": 0
}"#;

const EMPTY_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scenes": [{ "name": "empty" }],
  "scene": 0
}"#;

fn write_fixture(test: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("geoform-{test}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    for (name, data) in files {
        fs::write(dir.join(name), data).unwrap();
    }
    dir
}

fn load_triangle(test: &str, service: MockRenderService) -> impl Geometry {
    let dir = write_fixture(
        test,
        &[
            ("tri.gltf", TRIANGLE_GLTF.as_bytes()),
            ("tri.bin", &triangle_bin()),
        ],
    );
    load_gltf_file(dir.join("tri.gltf"), service).unwrap()
}

#[test]
fn test_empty_document_draw_is_noop() {
    let dir = write_fixture("empty", &[("empty.gltf", EMPTY_GLTF.as_bytes())]);
    let service = MockRenderService::new();
    let mut geometry = load_gltf_file(dir.join("empty.gltf"), service.clone()).unwrap();

    let info = geometry.info();
    assert_eq!(info.textures, 0);
    assert_eq!(info.materials, 0);
    assert_eq!(info.objects, 0);

    geometry.draw(&[], None).unwrap();
    geometry.draw(&[], None).unwrap();

    assert_eq!(service.index_buffer_count(), 0);
    assert_eq!(service.vertex_buffer_count(), 0);
    assert_eq!(service.draw_count(), 0);
}

#[test]
fn test_first_draw_uploads_buffers() {
    let service = MockRenderService::new();
    let mut geometry = load_triangle("upload", service.clone());

    // Nothing is uploaded before the first draw.
    assert_eq!(service.index_buffer_count(), 0);
    assert_eq!(service.vertex_buffer_count(), 0);

    geometry.draw(&[], None).unwrap();

    assert_eq!(service.index_buffer_count(), 1);
    assert_eq!(service.vertex_buffer_count(), 1);

    // Index buffer holds the view's bytes verbatim.
    let index_buffer = service.bound_index_buffer().unwrap();
    assert_eq!(service.index_buffer_len(index_buffer), Some(6));
    assert_eq!(
        service.index_buffer_data(index_buffer).unwrap(),
        vec![0, 0, 1, 0, 2, 0]
    );

    // Vertex buffer holds one fixed-layout vertex per position.
    let (stride, vertex_buffer) = service.bound_vertex_buffer().unwrap();
    assert_eq!(stride, StaticVertex::size());
    assert_eq!(
        service.vertex_buffer_len(vertex_buffer),
        Some(3 * StaticVertex::size())
    );

    // Second vertex starts at one stride in; its position is (1, 0, 0).
    let data = service.vertex_buffer_data(vertex_buffer).unwrap();
    let x = f32::from_le_bytes(data[36..40].try_into().unwrap());
    assert_eq!(x, 1.0);

    let draw = service.last_draw().unwrap();
    assert_eq!(draw.vertex_count, 3);
    assert_eq!(draw.triangle_count, 1);
    assert_eq!(draw.min_index, 0);
    assert_eq!(draw.start_index, 0);

    // The draw path uses a flat untextured material.
    let material = service.current_material().unwrap();
    assert_eq!(material.diffuse, 1.0);
    assert!(material.textures.iter().all(Option::is_none));
}

#[test]
fn test_second_draw_does_not_reupload() {
    let service = MockRenderService::new();
    let mut geometry = load_triangle("reupload", service.clone());

    geometry.draw(&[], None).unwrap();
    geometry.draw(&[], None).unwrap();
    geometry.draw(&[], None).unwrap();

    assert_eq!(service.index_buffer_count(), 1);
    assert_eq!(service.vertex_buffer_count(), 1);
    assert_eq!(service.index_buffer_writes(), 1);
    assert_eq!(service.vertex_buffer_writes(), 1);
    assert_eq!(service.draw_count(), 3);
}

#[test]
fn test_unsupported_capabilities_fail_loudly() {
    let service = MockRenderService::new();
    let mut geometry = load_triangle("unsupported", service);

    assert!(matches!(
        geometry.material(0),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(
        geometry.set_material(0, &Material::flat()),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(geometry.label(0), Err(GeometryError::Unsupported)));
    assert!(matches!(
        geometry.set_label(0, &Label::default()),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(geometry.object(0), Err(GeometryError::Unsupported)));
    assert!(matches!(
        geometry.set_object(0, &Object::default()),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(geometry.light(0), Err(GeometryError::Unsupported)));
    assert!(matches!(
        geometry.find_label_by_name(0, "anchor"),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(
        geometry.find_material_by_name(0, "hull"),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(
        geometry.trace(Vec3::ZERO, Vec3::ONE),
        Err(GeometryError::Unsupported)
    ));
    let mut sink = |_: &[Vec3]| true;
    assert!(matches!(
        geometry.clip(&[], Vec3::ZERO, 1.0, &mut sink),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(
        geometry.collision_details(),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(
        geometry.find_texture(0, "hull_diffuse"),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(geometry.texture(0), Err(GeometryError::Unsupported)));
    assert!(matches!(
        geometry.texture_name(0),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(
        geometry.vertex_buffer(0),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(
        geometry.index_buffer(),
        Err(GeometryError::Unsupported)
    ));
    assert!(matches!(
        geometry.attach_light_data("resource/models/tri_day.col"),
        Err(GeometryError::Unsupported)
    ));
}

#[test]
fn test_find_name_reports_not_found() {
    let service = MockRenderService::new();
    let geometry = load_triangle("find-name", service);

    assert!(matches!(
        geometry.find_name("props"),
        Err(GeometryError::NotFound)
    ));
}

#[test]
fn test_group_labels_filter_by_scene_name() {
    let service = MockRenderService::new();
    let geometry = load_triangle("labels", service);

    let labels = geometry.group_labels("props").unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].name.as_deref(), Some("tri"));
    assert_eq!(labels[0].transform, glam::Mat4::IDENTITY);

    assert!(geometry.group_labels("interior").unwrap().is_empty());
}

#[test]
fn test_info_reports_raw_counts() {
    let service = MockRenderService::new();
    let geometry = load_triangle("info", service);

    let info = geometry.info();
    assert_eq!(info.textures, 0);
    assert_eq!(info.materials, 0);
    assert_eq!(info.objects, 1);
}
