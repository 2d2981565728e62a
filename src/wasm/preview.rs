//! Object URLs for image previews.

use js_sys::Array;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, Url};

use super::file::vec_to_uint8_array;
use crate::ImageBlob;

/// A `blob:` URL for one image entry.
///
/// The URL is revoked when the guard is dropped, so replacing or clearing
/// the preview slot releases the browser-side blob.
pub(crate) struct ObjectUrl {
    path: String,
    url: String,
}

impl ObjectUrl {
    pub(crate) fn create(path: &str, image: &ImageBlob) -> Result<Self, JsValue> {
        let parts = Array::of1(&vec_to_uint8_array(image.bytes()));
        let properties = BlobPropertyBag::new();
        properties.set_type(image.mime());
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &properties)?;
        let url = Url::create_object_url_with_blob(&blob)?;
        log::debug!("Created preview URL for '{}'", path);
        Ok(Self {
            path: path.to_string(),
            url,
        })
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if Url::revoke_object_url(&self.url).is_err() {
            log::warn!("Failed to revoke preview URL for '{}'", self.path);
        }
    }
}
