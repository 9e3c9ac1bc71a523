//! Model loading and format dispatch
//!
//! The dispatcher turns a logical model name into a loaded [`Geometry`]:
//! it normalizes the name against the model root, picks a format loader by
//! suffix, derives the companion light-data path, and contains every loader
//! fault at this boundary. Load failure is never fatal to the caller; it is
//! always observable as a logged message plus an absent return.

pub mod gltf;

use crate::error::{GeometryError, LoadError};
use crate::geometry::Geometry;
use crate::render::RenderService;

/// Canonical root directory for model content
pub const MODEL_ROOT: &str = "resource/models/";

/// Suffix of glTF scene files
const GLTF_SUFFIX: &str = ".gltf";
/// Suffix of proprietary binary models
const GM_SUFFIX: &str = ".gm";
/// Suffix of raw collision/light-data files
const COL_SUFFIX: &str = ".col";

/// Prefix a logical model name with the model root unless it already
/// carries it. Idempotent.
pub fn resolve_model_path(name: &str, root: &str) -> String {
    if name.starts_with(root) {
        name.to_owned()
    } else {
        format!("{root}{name}")
    }
}

/// Companion light-data path for a glTF model: the `.gltf` suffix of the
/// resolved path is stripped and `_<light_name>.col` appended.
pub fn gltf_light_data_path(gltf_path: &str, light_name: &str) -> String {
    let base = gltf_path.strip_suffix(GLTF_SUFFIX).unwrap_or(gltf_path);
    format!("{base}_{light_name}{COL_SUFFIX}")
}

/// Companion light-data path for a proprietary model: `_<light_name>.col`
/// appended verbatim to the caller's original name. Unlike the glTF case
/// this works on the un-normalized name; existing content packs depend on
/// that asymmetry.
pub fn gm_light_data_path(model_name: &str, light_name: &str) -> String {
    format!("{model_name}_{light_name}{COL_SUFFIX}")
}

/// Loader for the proprietary binary model format.
///
/// External collaborator: given a resolved model path and a companion
/// light-data path it returns a fully capable geometry, or a [`LoadError`]
/// on malformed input. The dispatcher owes it correct path construction and
/// error translation, nothing else.
pub trait GmLoader {
    fn load(&self, model_path: &str, light_path: &str) -> Result<Box<dyn Geometry>, LoadError>;
}

/// Format-dispatching model loader.
///
/// # Example
/// ```ignore
/// let loader = GeometryLoader::new(service, Box::new(gm_loader));
/// let Some(mut geometry) = loader.load("chair.gltf", "day") else {
///     // failure was logged with the requested name
///     return;
/// };
/// geometry.draw(&[], None)?;
/// ```
pub struct GeometryLoader<S> {
    service: S,
    gm_loader: Box<dyn GmLoader>,
    model_root: String,
}

impl<S: RenderService + Clone + 'static> GeometryLoader<S> {
    /// Create a dispatcher over the canonical model root.
    pub fn new(service: S, gm_loader: Box<dyn GmLoader>) -> Self {
        Self {
            service,
            gm_loader,
            model_root: MODEL_ROOT.to_owned(),
        }
    }

    /// Override the model root, for relocated content packs.
    pub fn with_model_root(mut self, root: impl Into<String>) -> Self {
        self.model_root = root.into();
        self
    }

    /// Load a model by logical name.
    ///
    /// Returns `None` on any failure; the cause is logged together with the
    /// requested name. No retries are attempted.
    pub fn load(&self, model_name: &str, light_name: &str) -> Option<Box<dyn Geometry>> {
        match self.try_load(model_name, light_name) {
            Ok(geometry) => Some(geometry),
            Err(LoadError::InvalidModel(_)) => {
                log::error!("invalid model: {model_name}");
                None
            }
            Err(err) => {
                log::error!("failed to load model {model_name}: {err}");
                None
            }
        }
    }

    fn try_load(
        &self,
        model_name: &str,
        light_name: &str,
    ) -> Result<Box<dyn Geometry>, LoadError> {
        let path = resolve_model_path(model_name, &self.model_root);

        if path.ends_with(GLTF_SUFFIX) {
            let mut geometry = gltf::load_gltf_file(&path, self.service.clone())?;
            let light_path = gltf_light_data_path(&path, light_name);
            if let Err(GeometryError::Unsupported) =
                geometry.attach_light_data(&light_path)
            {
                log::debug!("light data {light_path} not supported by glTF geometry");
            }
            Ok(Box::new(geometry))
        } else {
            let model_path = if path.ends_with(GM_SUFFIX) || path.ends_with(COL_SUFFIX) {
                path
            } else {
                format!("{path}{GM_SUFFIX}")
            };
            let light_path = gm_light_data_path(model_name, light_name);
            self.gm_loader.load(&model_path, &light_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefixes_bare_name() {
        assert_eq!(
            resolve_model_path("ships/frigate", MODEL_ROOT),
            "resource/models/ships/frigate"
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolved = resolve_model_path("chair.gltf", MODEL_ROOT);
        assert_eq!(resolve_model_path(&resolved, MODEL_ROOT), resolved);
    }

    #[test]
    fn test_gltf_light_data_path() {
        assert_eq!(
            gltf_light_data_path("resource/models/chair.gltf", "day"),
            "resource/models/chair_day.col"
        );
    }

    #[test]
    fn test_gm_light_data_path_appends_verbatim() {
        assert_eq!(gm_light_data_path("chair", "day"), "chair_day.col");
    }
}
