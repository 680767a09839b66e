//! WASM bindings for in-browser rendering.
//!
//! Both entry points take a record map dump as a JSON string, so a page
//! fetched on the JavaScript side can be rendered without another round trip.

use wasm_bindgen::prelude::*;

use crate::render::{AssetProxy, Renderer};
use crate::source::RecordDump;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn renderer(asset_base: Option<String>) -> Renderer {
    match asset_base {
        Some(base) => Renderer::new().with_assets(AssetProxy::new(base)),
        None => Renderer::new(),
    }
}

/// Render page `id` of a record map dump as HTML.
#[wasm_bindgen]
pub fn page_html(dump_json: &str, id: &str, asset_base: Option<String>) -> Result<String, JsValue> {
    let dump: RecordDump = dump_json.parse().map_err(to_js)?;
    crate::api::page_html(&dump, id, &renderer(asset_base)).map_err(to_js)
}

/// Coerce the rows of table `id` and return them as a JSON string.
#[wasm_bindgen]
pub fn table_rows_json(
    dump_json: &str,
    id: &str,
    asset_base: Option<String>,
) -> Result<String, JsValue> {
    let dump: RecordDump = dump_json.parse().map_err(to_js)?;
    let rows = crate::api::table_rows(&dump, id, &renderer(asset_base)).map_err(to_js)?;
    serde_json::to_string(&rows).map_err(to_js)
}
