//! WASM-facing entry points for mesh slicing and extraction.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Native tests use the `*_internal` helpers, which return
//! Rust error types and never touch a JS host.
//!
//! ```
//! use mesh_wasm::VisualizationSession;
//!
//! let mut session = VisualizationSession::new_internal().unwrap();
//! let handle = session.extract_internal("{}").unwrap();
//! assert!(handle.triangle_count() > 0);
//! ```

use mesh_dataset::{sources, Association, JsonReader, LoadError};
use mesh_extract::{ExtractError, ExtractParams, Session};
use wasm_bindgen::prelude::*;

mod geometry_handle;
mod warnings;

pub use geometry_handle::GeometryHandle;
pub use warnings::{Warning, WarningKind, WarningList};

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "mesh-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One dataset plus its extraction cache, owned by JavaScript.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const session = new VisualizationSession();   // default sphere
/// // session.load_json(await (await fetch("volume.json")).text());
/// // const handle = session.extract(JSON.stringify({
/// //   active_field: { association: "point", name: "Temperature" },
/// //   slicing_enabled: true,
/// //   slice_normal_axis: "z",
/// // }));
/// ```
#[wasm_bindgen]
pub struct VisualizationSession {
    inner: Session,
}

#[wasm_bindgen]
impl VisualizationSession {
    /// Creates a session showing the default sphere.
    ///
    /// # Errors
    /// Returns a JavaScript error if the sphere cannot be generated.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<VisualizationSession, JsValue> {
        Self::new_internal().map_err(to_js)
    }

    /// Replaces the dataset with one parsed from a JSON document.
    ///
    /// The previous dataset stays active when parsing fails.
    pub fn load_json(&mut self, text: &str) -> Result<(), JsValue> {
        self.load_json_internal(text).map_err(to_js)
    }

    /// Replaces the dataset with the default sphere.
    pub fn load_default_sphere(&mut self) -> Result<(), JsValue> {
        self.load_default_sphere_internal().map_err(to_js)
    }

    /// Replaces the dataset with a sphere of the given resolution.
    ///
    /// # Errors
    /// Returns a JavaScript error for resolutions below 3.
    pub fn load_sphere(&mut self, resolution: u32) -> Result<(), JsValue> {
        self.load_sphere_internal(resolution).map_err(to_js)
    }

    /// Returns the arrays of the active dataset as a JSON list of
    /// `[association, name]` pairs.
    pub fn array_names(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.array_names_internal()).map_err(to_js)
    }

    /// Extracts geometry for a JSON request.
    ///
    /// Missing request fields take their defaults. A repeated request with
    /// the same dataset returns the cached result.
    ///
    /// # Errors
    /// Returns a JavaScript error for malformed or out-of-range requests.
    pub fn extract(&mut self, params_json: &str) -> Result<GeometryHandle, JsValue> {
        self.extract_internal(params_json).map_err(to_js)
    }

    /// Number of extractions actually computed.
    #[wasm_bindgen(getter)]
    pub fn computations(&self) -> u32 {
        u32::try_from(self.inner.stats().computations).unwrap_or(u32::MAX)
    }
}

impl VisualizationSession {
    /// Host-only constructor.
    pub fn new_internal() -> Result<Self, LoadError> {
        let mut session = Self {
            inner: Session::default(),
        };
        session.load_default_sphere_internal()?;
        Ok(session)
    }

    /// Host-only JSON loader.
    pub fn load_json_internal(&mut self, text: &str) -> Result<(), LoadError> {
        let dataset = JsonReader::parse(text)?;
        log::debug!(
            "Loaded JSON dataset ({} points, {} cells)",
            dataset.point_count(),
            dataset.cell_count()
        );
        self.inner.set_dataset(dataset);
        Ok(())
    }

    /// Host-only sphere loader.
    pub fn load_default_sphere_internal(&mut self) -> Result<(), LoadError> {
        self.inner.set_dataset(sources::default_sphere()?);
        Ok(())
    }

    /// Host-only sphere loader with a custom resolution.
    pub fn load_sphere_internal(&mut self, resolution: u32) -> Result<(), LoadError> {
        let dataset = sources::resolution_sphere(resolution)?;
        self.inner.set_dataset(dataset);
        Ok(())
    }

    /// Host-only array listing.
    pub fn array_names_internal(&self) -> Vec<(Association, String)> {
        self.inner.array_names()
    }

    /// Host-only extraction.
    pub fn extract_internal(&mut self, params_json: &str) -> Result<GeometryHandle, ExtractError> {
        let params = ExtractParams::from_json(params_json)?;
        let extraction = self.inner.extract(&params)?;
        Ok(GeometryHandle::new(extraction))
    }

    /// Underlying session.
    pub fn session(&self) -> &Session {
        &self.inner
    }
}
