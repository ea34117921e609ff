//! File selection and object-URL lifecycle.
//!
//! The picker and the URL registry belong to the host environment and
//! are reached through the [`FilePicker`] and [`ObjectUrls`] traits.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(1);

fn next_file_id() -> u64 {
    NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed)
}

/// A file chosen by the user.
///
/// Every selection gets its own id, so two picks of files with the same
/// name, type and size still compare unequal. Clones share the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    #[serde(default = "next_file_id")]
    id: u64,
    /// File name as reported by the picker.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl SelectedFile {
    /// Creates a new file description with a fresh id.
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            id: next_file_id(),
            name: name.into(),
            content_type: content_type.into(),
            size,
        }
    }

    /// Uses the host's own handle id instead of a generated one.
    #[must_use]
    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Identity of this selection.
    pub const fn id(&self) -> u64 {
        self.id
    }
}

/// The host's file picker.
pub trait FilePicker {
    /// Opens the picker dialog.
    fn open(&mut self);

    /// Forgets the picker's own selection so the same file can be picked
    /// again.
    fn clear(&mut self) {}
}

/// Holds the file currently chosen through a picker.
#[derive(Debug)]
pub struct FileInput<P> {
    picker: P,
    current: Option<SelectedFile>,
}

impl<P: FilePicker> FileInput<P> {
    /// Wraps a picker.
    pub const fn new(picker: P) -> Self {
        Self {
            picker,
            current: None,
        }
    }

    /// The selected file, if any.
    pub const fn current(&self) -> Option<&SelectedFile> {
        self.current.as_ref()
    }

    /// Opens the picker.
    pub fn open_picker(&mut self) {
        self.picker.open();
    }

    /// Handles the picker's change notification. An empty selection
    /// (dialog cancelled) keeps the current file.
    pub fn on_change(&mut self, files: Vec<SelectedFile>) {
        if let Some(file) = files.into_iter().next() {
            debug!(file = %file.name, size = file.size, "file selected");
            self.current = Some(file);
        }
    }

    /// Replaces the selection directly.
    pub fn set(&mut self, file: Option<SelectedFile>) {
        self.current = file;
    }

    /// Clears the selection and the picker.
    pub fn reset(&mut self) {
        self.current = None;
        self.picker.clear();
    }

    /// The wrapped picker.
    pub const fn picker(&self) -> &P {
        &self.picker
    }
}

/// The host's registry of displayable blob handles.
pub trait ObjectUrls {
    /// Derives a handle for a file.
    fn create(&self, file: &SelectedFile) -> String;

    /// Releases a previously derived handle.
    fn revoke(&self, url: &str);
}

/// Keeps at most one live handle, derived from the current file.
///
/// The handle is revoked when the file changes or is cleared and when the
/// slot is dropped.
#[derive(Debug)]
pub struct ObjectUrlSlot<R: ObjectUrls> {
    urls: R,
    source: Option<SelectedFile>,
    url: Option<String>,
}

impl<R: ObjectUrls> ObjectUrlSlot<R> {
    /// Creates an empty slot.
    pub const fn new(urls: R) -> Self {
        Self {
            urls,
            source: None,
            url: None,
        }
    }

    /// Follows the given file. Passing the file already followed (or a
    /// clone of it) keeps the current handle; any other selection gets a
    /// new one even when its metadata matches.
    pub fn sync(&mut self, file: Option<&SelectedFile>) -> Option<&str> {
        if self.source.as_ref() != file {
            self.release();
            if let Some(file) = file {
                let url = self.urls.create(file);
                debug!(file = %file.name, url = %url, "object url created");
                self.url = Some(url);
                self.source = Some(file.clone());
            }
        }
        self.url.as_deref()
    }

    /// The live handle, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn release(&mut self) {
        if let Some(url) = self.url.take() {
            self.urls.revoke(&url);
            debug!(url = %url, "object url revoked");
        }
        self.source = None;
    }
}

impl<R: ObjectUrls> Drop for ObjectUrlSlot<R> {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Debug, Default)]
struct Registry {
    next: u64,
    live: BTreeSet<String>,
    revoked: Vec<String>,
}

/// In-process [`ObjectUrls`] that records which handles are live.
///
/// Clones share one registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectUrls {
    registry: Arc<Mutex<Registry>>,
}

impl InMemoryObjectUrls {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handles created and not yet revoked.
    pub fn live(&self) -> Vec<String> {
        self.lock().live.iter().cloned().collect()
    }

    /// Handles revoked so far, in revocation order.
    pub fn revoked(&self) -> Vec<String> {
        self.lock().revoked.clone()
    }
}

impl ObjectUrls for InMemoryObjectUrls {
    fn create(&self, file: &SelectedFile) -> String {
        let mut registry = self.lock();
        registry.next += 1;
        let url = format!("blob:memory/{}/{}", registry.next, file.name);
        registry.live.insert(url.clone());
        url
    }

    fn revoke(&self, url: &str) {
        let mut registry = self.lock();
        if registry.live.remove(url) {
            registry.revoked.push(url.to_string());
        }
    }
}
