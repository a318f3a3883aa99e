//! WebAssembly bindings for Umlify
//!
//! Browser-friendly wrappers around the conversion façade. Errors become
//! JavaScript exceptions carrying the error message.

use wasm_bindgen::prelude::*;

use crate::converter::shared;
use crate::core::{RenderOptions, Renderer};
use crate::render::PanelRenderer;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    // Logs to the browser console
    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn to_js(error: anyhow::Error) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Convert source to a UMLet `.uxf` document
#[wasm_bindgen]
pub fn convert(source: &str) -> Result<String, JsValue> {
    shared()
        .convert(source, &RenderOptions::default())
        .map(|conversion| conversion.uml_text)
        .map_err(to_js)
}

/// UMLet panel text for every type in the source
#[wasm_bindgen]
pub fn panel_text(source: &str) -> Result<String, JsValue> {
    let model = shared().analyze(source).map_err(to_js)?;
    PanelRenderer::new().render(&model).map_err(to_js)
}

/// Readable relationship report
#[wasm_bindgen]
pub fn relationship_text(source: &str) -> Result<String, JsValue> {
    crate::converter::relationship_text(source).map_err(to_js)
}

/// Detailed analysis as a JSON string
#[wasm_bindgen]
pub fn analyze(source: &str) -> Result<String, JsValue> {
    let detailed = shared().analyze_detailed(source).map_err(to_js)?;
    serde_json::to_string(&detailed).map_err(|e| JsValue::from_str(&e.to_string()))
}
