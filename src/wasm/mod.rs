//! WASM/Browser support for ziplens
//!
//! This module exposes the editing session to JavaScript through
//! wasm-bindgen. The page hands over the dropped or picked file as a
//! `Uint8Array`, drives tree, tab and edit operations, and receives the
//! exported archive back as bytes.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import { WasmSession } from 'ziplens';
//!
//! const session = new WasmSession();
//! await session.loadArchive(file.name, new Uint8Array(await file.arrayBuffer()));
//!
//! session.toggleFolder('src/');
//! session.openTab('src/index.js');
//! session.applyEdit('src/index.js', 'console.log("edited");');
//!
//! const { fileName, data } = session.exportArchive();
//! ```

mod file;
mod preview;
mod session;

pub use session::WasmSession;

use wasm_bindgen::prelude::*;

/// Get the library version
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check whether a file name is accepted as an upload
#[wasm_bindgen(js_name = "isSupportedUpload")]
pub fn is_supported_upload(name: &str) -> bool {
    crate::source::is_zip_name(name)
}

pub(crate) fn to_js_error(error: crate::Error) -> JsValue {
    JsValue::from_str(&error.to_string())
}
