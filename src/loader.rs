//! Binary glTF model loading with byte-level progress reporting.
//!
//! The loader reads the asset in chunks so a progress callback can drive a
//! loading UI, parses it, then normalizes the model: every mesh-bearing
//! node becomes a part, the whole model is centered on the origin, and its
//! largest extent is scaled to the configured target. Load failure is
//! surfaced once to the caller; there is no retry and no timeout (a
//! stalled read stalls boot).

use std::io::Read;
use std::path::Path;

use glam::{Mat4, Vec3};

use crate::error::VitrineError;
use crate::options::LoaderOptions;
use crate::stage::{ModelDescriptor, PartDescriptor};

const CHUNK_SIZE: usize = 64 * 1024;

/// A mesh-bearing node before normalization, in world space.
struct RawPart {
    name: String,
    world: Mat4,
    bbox_min: Vec3,
    bbox_max: Vec3,
}

/// Load and normalize a glTF (.glb or .gltf) model.
///
/// `on_progress` receives monotonically non-decreasing fractions in
/// [0, 1]; the final 1.0 is reported only after parsing succeeds.
pub fn load_model(
    path: &Path,
    options: &LoaderOptions,
    on_progress: &mut dyn FnMut(f32),
) -> Result<ModelDescriptor, VitrineError> {
    let bytes = read_with_progress(path, on_progress)?;

    let (document, _buffers, _images) = gltf::import_slice(&bytes)?;
    let raw = collect_parts(&document);
    if raw.is_empty() {
        return Err(VitrineError::ModelLoad(format!(
            "{} contains no meshes",
            path.display()
        )));
    }

    let descriptor = normalize(&raw, options.target_extent);
    log::info!(
        "loaded model {} ({} parts, {} bytes)",
        path.display(),
        descriptor.part_count(),
        bytes.len()
    );
    on_progress(1.0);
    Ok(descriptor)
}

fn read_with_progress(
    path: &Path,
    on_progress: &mut dyn FnMut(f32),
) -> Result<Vec<u8>, VitrineError> {
    let mut file = std::fs::File::open(path)?;
    let total = file.metadata()?.len().max(1) as f32;

    let mut bytes = Vec::new();
    let mut chunk = vec![0_u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        on_progress((bytes.len() as f32 / total).min(1.0));
    }
    Ok(bytes)
}

/// Walk the default scene and collect every mesh-bearing node with its
/// accumulated world transform and world-space bounding box.
fn collect_parts(document: &gltf::Document) -> Vec<RawPart> {
    let mut parts = Vec::new();
    let Some(scene) = document
        .default_scene()
        .or_else(|| document.scenes().next())
    else {
        return parts;
    };

    let mut stack: Vec<(gltf::Node<'_>, Mat4)> =
        scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect();

    while let Some((node, parent)) = stack.pop() {
        let world =
            parent * Mat4::from_cols_array_2d(&node.transform().matrix());

        if let Some(mesh) = node.mesh() {
            let mut bbox_min = Vec3::splat(f32::INFINITY);
            let mut bbox_max = Vec3::splat(f32::NEG_INFINITY);
            for primitive in mesh.primitives() {
                let bounds = primitive.bounding_box();
                let min = Vec3::from_array(bounds.min);
                let max = Vec3::from_array(bounds.max);
                // Transform all eight corners; rotation can move any
                // local corner to a world extreme.
                for i in 0..8 {
                    let corner = Vec3::new(
                        if i & 1 == 0 { min.x } else { max.x },
                        if i & 2 == 0 { min.y } else { max.y },
                        if i & 4 == 0 { min.z } else { max.z },
                    );
                    let p = world.transform_point3(corner);
                    bbox_min = bbox_min.min(p);
                    bbox_max = bbox_max.max(p);
                }
            }

            if bbox_min.x <= bbox_max.x {
                let name = node
                    .name()
                    .or_else(|| mesh.name())
                    .map_or_else(
                        || format!("part-{}", node.index()),
                        str::to_owned,
                    );
                parts.push(RawPart {
                    name,
                    world,
                    bbox_min,
                    bbox_max,
                });
            }
        }

        for child in node.children() {
            stack.push((child, world));
        }
    }

    parts
}

/// Center the model on the origin and scale its largest extent to
/// `target_extent`.
fn normalize(raw: &[RawPart], target_extent: f32) -> ModelDescriptor {
    let mut model_min = Vec3::splat(f32::INFINITY);
    let mut model_max = Vec3::splat(f32::NEG_INFINITY);
    for part in raw {
        model_min = model_min.min(part.bbox_min);
        model_max = model_max.max(part.bbox_max);
    }

    let center = (model_min + model_max) * 0.5;
    let max_dim = (model_max - model_min).max_element();
    let scale = if max_dim > 0.0 {
        target_extent / max_dim
    } else {
        1.0
    };

    let parts = raw
        .iter()
        .map(|part| {
            let (_, rotation, translation) =
                part.world.to_scale_rotation_translation();
            let bbox_center = (part.bbox_min + part.bbox_max) * 0.5;
            PartDescriptor {
                name: part.name.clone(),
                position: (translation - center) * scale,
                rotation,
                bbox_center: (bbox_center - center) * scale,
                bbox_size: (part.bbox_max - part.bbox_min) * scale,
            }
        })
        .collect();

    ModelDescriptor { parts }
}
