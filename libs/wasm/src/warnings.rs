//! WASM-compatible extraction warnings.
//!
//! This module provides JavaScript-compatible wrappers for the conditions
//! the pipeline recovered from.

use mesh_extract::ExtractWarning;
use wasm_bindgen::prelude::*;

/// Warning category for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    EmptySlice,
    Oversize,
    ArrayNotFound,
}

/// A warning message for JavaScript.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const warnings = geometry.warnings();
/// // for (let i = 0; i < warnings.len(); i++) {
/// //   console.warn(warnings.get(i).message());
/// // }
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct Warning {
    kind: WarningKind,
    message: String,
}

#[wasm_bindgen]
impl Warning {
    /// Returns the warning category.
    pub fn kind(&self) -> WarningKind {
        self.kind
    }

    /// Returns the warning message.
    pub fn message(&self) -> String {
        self.message.clone()
    }

    /// Converts this warning to a plain JavaScript object.
    ///
    /// wasm-bindgen wrappers cannot be posted between a worker and the main
    /// thread; plain objects can.
    pub fn to_js_object(&self) -> Result<JsValue, JsValue> {
        use js_sys::{Object, Reflect};

        let obj = Object::new();
        Reflect::set(
            &obj,
            &JsValue::from_str("kind"),
            &JsValue::from(self.kind as i32),
        )?;
        Reflect::set(
            &obj,
            &JsValue::from_str("message"),
            &JsValue::from_str(&self.message),
        )?;
        Ok(JsValue::from(obj))
    }
}

impl From<&ExtractWarning> for Warning {
    fn from(warning: &ExtractWarning) -> Self {
        let kind = match warning {
            ExtractWarning::EmptySlice { .. } => WarningKind::EmptySlice,
            ExtractWarning::Oversize { .. } => WarningKind::Oversize,
            ExtractWarning::ArrayNotFound(_) => WarningKind::ArrayNotFound,
        };
        Self {
            kind,
            message: warning.to_string(),
        }
    }
}

/// A collection of warnings.
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct WarningList {
    warnings: Vec<Warning>,
}

#[wasm_bindgen]
impl WarningList {
    /// Returns the number of warnings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Returns true if there are no warnings.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Returns a warning by index.
    pub fn get(&self, index: usize) -> Option<Warning> {
        self.warnings.get(index).cloned()
    }
}

impl WarningList {
    pub fn new(warnings: &[ExtractWarning]) -> Self {
        Self {
            warnings: warnings.iter().map(Warning::from).collect(),
        }
    }
}
