//! JavaScript-exposed session API for WASM.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Object, Promise, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::file::{uint8_array_to_vec, vec_to_uint8_array};
use super::preview::ObjectUrl;
use super::to_js_error;
use crate::{ArchiveModel, Entry, EntryContent, ExportOptions, SessionStore, Upload, format_size};

/// An archive editing session exposed to JavaScript.
///
/// # JavaScript Example
///
/// ```javascript
/// const session = new WasmSession();
/// await session.loadArchive('site.zip', bytes);
///
/// for (const row of session.getTree()) {
///     console.log(`${'  '.repeat(row.depth)}${row.name}`);
/// }
///
/// session.openTab('index.html');
/// const entry = session.currentEntry();
/// console.log(entry.language, entry.text);
/// ```
#[wasm_bindgen]
pub struct WasmSession {
    inner: Rc<RefCell<SessionStore>>,
    preview: Rc<RefCell<Option<ObjectUrl>>>,
}

impl Default for WasmSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmSession {
    /// Create an empty session.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSession {
        Self {
            inner: Rc::new(RefCell::new(SessionStore::new())),
            preview: Rc::new(RefCell::new(None)),
        }
    }

    /// Load an uploaded archive.
    ///
    /// @param name - The uploaded file name (must end in .zip)
    /// @param data - Archive data as Uint8Array
    /// @returns A Promise that resolves once the archive is fully decoded,
    /// or rejects if it is unsupported, corrupt, or superseded by a later load
    #[wasm_bindgen(js_name = "loadArchive")]
    pub fn load_archive(&self, name: String, data: Uint8Array) -> Promise {
        let upload = match Upload::new(name, uint8_array_to_vec(&data)) {
            Ok(upload) => upload,
            Err(e) => return Promise::reject(&to_js_error(e)),
        };

        let ticket = self.inner.borrow_mut().begin_load();
        let inner = Rc::clone(&self.inner);
        let preview = Rc::clone(&self.preview);

        future_to_promise(async move {
            yield_to_event_loop().await;

            let result = ArchiveModel::from_upload(upload).await;
            let published = inner.borrow_mut().finish_load(ticket, result);
            published.map_err(to_js_error)?;

            preview.borrow_mut().take();
            Ok(JsValue::TRUE)
        })
    }

    /// Whether an archive is being decoded.
    #[wasm_bindgen(getter, js_name = "isLoading")]
    pub fn is_loading(&self) -> bool {
        self.inner.borrow().is_loading()
    }

    /// Whether an archive is loaded.
    #[wasm_bindgen(js_name = "hasArchive")]
    pub fn has_archive(&self) -> bool {
        self.inner.borrow().model().is_some()
    }

    /// Get the visible file tree rows.
    ///
    /// @returns An array of row objects, each containing:
    /// - path: string - Full entry path
    /// - name: string - Final path segment
    /// - depth: number - Nesting level (0 for top level)
    /// - kind: string - "directory", "text", "image" or "binary"
    /// - expanded: boolean - Whether a directory shows its children
    /// - size: number - Size in bytes
    #[wasm_bindgen(js_name = "getTree")]
    pub fn get_tree(&self) -> Result<Array, JsValue> {
        let session = self.inner.borrow();
        let arr = Array::new();
        let Some(model) = session.model() else {
            return Ok(arr);
        };

        for row in session.visible_rows() {
            let Some(entry) = model.get(&row.path) else {
                continue;
            };
            let obj = Object::new();
            Reflect::set(&obj, &"path".into(), &entry.path().into())?;
            Reflect::set(&obj, &"name".into(), &entry.name().into())?;
            Reflect::set(&obj, &"depth".into(), &(row.depth as f64).into())?;
            Reflect::set(&obj, &"kind".into(), &entry.kind().as_str().into())?;
            Reflect::set(
                &obj,
                &"expanded".into(),
                &session.is_expanded(entry.path()).into(),
            )?;
            Reflect::set(&obj, &"size".into(), &(entry.size() as f64).into())?;
            arr.push(&obj);
        }
        Ok(arr)
    }

    /// Expand or collapse a directory.
    ///
    /// @returns The new expanded state
    #[wasm_bindgen(js_name = "toggleFolder")]
    pub fn toggle_folder(&self, path: &str) -> bool {
        self.inner.borrow_mut().toggle_folder_expansion(path)
    }

    /// Preview an entry without opening a tab.
    #[wasm_bindgen(js_name = "selectEntry")]
    pub fn select_entry(&self, path: &str) -> bool {
        let changed = self.inner.borrow_mut().select_entry(path);
        self.release_stale_preview();
        changed
    }

    /// Open (or re-activate) the tab for a file.
    #[wasm_bindgen(js_name = "openTab")]
    pub fn open_tab(&self, path: &str) -> bool {
        let changed = self.inner.borrow_mut().open_tab(path);
        self.release_stale_preview();
        changed
    }

    /// Activate an open tab.
    #[wasm_bindgen(js_name = "activateTab")]
    pub fn activate_tab(&self, id: &str) -> bool {
        let changed = self.inner.borrow_mut().activate_tab(id);
        self.release_stale_preview();
        changed
    }

    /// Close a tab.
    #[wasm_bindgen(js_name = "closeTab")]
    pub fn close_tab(&self, id: &str) -> bool {
        let changed = self.inner.borrow_mut().close_tab(id);
        self.release_stale_preview();
        changed
    }

    /// Set a tab's dirty flag.
    #[wasm_bindgen(js_name = "markDirty")]
    pub fn mark_dirty(&self, id: &str, dirty: bool) -> bool {
        self.inner.borrow_mut().mark_dirty(id, dirty)
    }

    /// Get the open tabs.
    ///
    /// @returns An array of tab objects with id, title, dirty and active fields
    #[wasm_bindgen(js_name = "getTabs")]
    pub fn get_tabs(&self) -> Result<Array, JsValue> {
        let session = self.inner.borrow();
        let active = session.active_tab_id();
        let arr = Array::new();
        for tab in session.tabs() {
            let obj = Object::new();
            Reflect::set(&obj, &"id".into(), &tab.id().into())?;
            Reflect::set(&obj, &"title".into(), &tab.title().into())?;
            Reflect::set(&obj, &"dirty".into(), &tab.is_dirty().into())?;
            Reflect::set(&obj, &"active".into(), &(active == Some(tab.id())).into())?;
            arr.push(&obj);
        }
        Ok(arr)
    }

    /// Get the current entry.
    ///
    /// @returns undefined when nothing is selected, otherwise an object with
    /// path, name, kind, language, size, sizeLabel and decodeFailed, plus
    /// `text` for text files and `previewUrl` for images
    #[wasm_bindgen(js_name = "currentEntry")]
    pub fn current_entry(&self) -> Result<JsValue, JsValue> {
        let session = self.inner.borrow();
        let Some(entry) = session.current_entry() else {
            return Ok(JsValue::UNDEFINED);
        };

        let obj = entry_to_js_object(entry)?;
        match entry.content() {
            Some(EntryContent::Text(text)) => {
                Reflect::set(&obj, &"text".into(), &text.as_str().into())?;
            }
            Some(EntryContent::Image(image)) => {
                let mut preview = self.preview.borrow_mut();
                let reusable = preview.as_ref().is_some_and(|p| p.path() == entry.path());
                if !reusable {
                    *preview = Some(ObjectUrl::create(entry.path(), image)?);
                }
                if let Some(url) = preview.as_ref() {
                    Reflect::set(&obj, &"previewUrl".into(), &url.url().into())?;
                }
            }
            None => {}
        }
        Ok(obj.into())
    }

    /// Replace a text file's content.
    ///
    /// @returns true if the content changed
    #[wasm_bindgen(js_name = "applyEdit")]
    pub fn apply_edit(&self, path: &str, content: String) -> bool {
        self.inner.borrow_mut().apply_edit(path, content).is_applied()
    }

    /// Whether any open tab has unsaved edits.
    #[wasm_bindgen(js_name = "hasUnsavedChanges")]
    pub fn has_unsaved_changes(&self) -> bool {
        self.inner.borrow().has_unsaved_changes()
    }

    /// Export the edited archive.
    ///
    /// @param level - Optional deflate level (0-9, default 9)
    /// @returns An object with fileName (string), data (Uint8Array) and
    /// entriesWritten (number)
    /// @throws Error if no archive is loaded or an original entry is missing
    #[wasm_bindgen(js_name = "exportArchive")]
    pub fn export_archive(&self, level: Option<u8>) -> Result<JsValue, JsValue> {
        let mut options = ExportOptions::new();
        if let Some(level) = level {
            options = options.level(level).map_err(to_js_error)?;
        }
        let exported = self
            .inner
            .borrow_mut()
            .export(&options)
            .map_err(to_js_error)?;

        let obj = Object::new();
        Reflect::set(&obj, &"fileName".into(), &exported.file_name.as_str().into())?;
        Reflect::set(&obj, &"data".into(), &vec_to_uint8_array(&exported.bytes))?;
        Reflect::set(
            &obj,
            &"entriesWritten".into(),
            &(exported.entries_written as f64).into(),
        )?;
        Ok(obj.into())
    }
}

impl WasmSession {
    /// Drops the preview URL once its entry is no longer current.
    fn release_stale_preview(&self) {
        let session = self.inner.borrow();
        let mut preview = self.preview.borrow_mut();
        let current = session.current_path();
        if preview.as_ref().is_some_and(|p| Some(p.path()) != current) {
            preview.take();
        }
    }
}

fn entry_to_js_object(entry: &Entry) -> Result<Object, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &"path".into(), &entry.path().into())?;
    Reflect::set(&obj, &"name".into(), &entry.name().into())?;
    Reflect::set(&obj, &"kind".into(), &entry.kind().as_str().into())?;
    Reflect::set(&obj, &"language".into(), &entry.display_language().into())?;
    Reflect::set(&obj, &"size".into(), &(entry.size() as f64).into())?;
    Reflect::set(&obj, &"sizeLabel".into(), &format_size(entry.size()).into())?;
    Reflect::set(
        &obj,
        &"decodeFailed".into(),
        &entry.is_decode_failure().into(),
    )?;
    Ok(obj)
}

/// Yield to the browser event loop.
async fn yield_to_event_loop() {
    let promise = Promise::new(&mut |resolve, _| {
        match web_sys::window() {
            Some(win) => {
                let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0);
            }
            None => {
                // Workers have no window
                let _ = resolve.call0(&JsValue::NULL);
            }
        }
    });

    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
