//! # Geometry Handle
//!
//! WASM-friendly wrapper for packed geometry that can be transferred to
//! JavaScript.

use crate::warnings::WarningList;
use mesh_extract::{Extraction, PackedGeometry};
use std::sync::Arc;
use wasm_bindgen::prelude::*;

/// A handle to one extraction result that can be accessed from JavaScript.
///
/// Buffers are copied into typed arrays on access.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const handle = session.extract(JSON.stringify({ slicing_enabled: true }));
///
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(handle.positions(), 3));
/// geometry.setAttribute('color', new THREE.BufferAttribute(handle.colors(), 3));
/// geometry.setIndex(new THREE.BufferAttribute(handle.indices(), 1));
///
/// const material = new THREE.MeshBasicMaterial({
///   vertexColors: true,
///   transparent: handle.opacity < 1,
///   opacity: handle.opacity,
///   wireframe: handle.wireframe,
/// });
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct GeometryHandle {
    extraction: Arc<Extraction>,
}

#[wasm_bindgen]
impl GeometryHandle {
    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        u32::try_from(self.geometry().vertex_count).unwrap_or(u32::MAX)
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        u32::try_from(self.geometry().triangle_count).unwrap_or(u32::MAX)
    }

    /// Returns the requested opacity.
    #[wasm_bindgen(getter)]
    pub fn opacity(&self) -> f32 {
        self.geometry().opacity
    }

    /// Returns whether the mesh should be drawn as wireframe.
    #[wasm_bindgen(getter)]
    pub fn wireframe(&self) -> bool {
        self.geometry().wireframe
    }

    /// Returns the vertex positions as a Float32Array.
    ///
    /// Format: [x, y, z, x, y, z, ...]
    /// Length: vertex_count * 3
    #[wasm_bindgen]
    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.geometry().positions[..])
    }

    /// Returns the triangle indices as a Uint32Array.
    ///
    /// Format: [i0, i1, i2, i0, i1, i2, ...]
    /// Length: triangle_count * 3
    #[wasm_bindgen]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.geometry().indices[..])
    }

    /// Returns the vertex colors as a Float32Array.
    ///
    /// Format: [r, g, b, r, g, b, ...]
    /// Length: vertex_count * 3
    #[wasm_bindgen]
    pub fn colors(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.geometry().colors[..])
    }

    /// Returns the warnings raised while extracting.
    #[wasm_bindgen]
    pub fn warnings(&self) -> WarningList {
        WarningList::new(&self.extraction.warnings)
    }

    /// Returns the full output record as JSON.
    #[wasm_bindgen]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.geometry()
            .to_json()
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Returns true if there is nothing to draw.
    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.geometry().vertex_count == 0
    }
}

impl GeometryHandle {
    pub fn new(extraction: Arc<Extraction>) -> Self {
        Self { extraction }
    }

    /// Packed buffers for host-side callers.
    pub fn geometry(&self) -> &PackedGeometry {
        &self.extraction.geometry
    }

    /// Extraction result including warnings.
    pub fn extraction(&self) -> &Extraction {
        &self.extraction
    }
}
