//! Device fakes and fixtures shared by the flow integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use krishi_core::{Coordinates, ImageRef, ImageSource};
use krishi_flow::{DeviceError, ImagePicker, LocationProvider, PermissionStatus};

/// Hands out queued images in order; `None` once the queue is empty.
pub struct QueuedPicker {
    permission: PermissionStatus,
    images: Mutex<VecDeque<ImageRef>>,
}

impl QueuedPicker {
    pub fn new(images: impl IntoIterator<Item = ImageRef>) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            images: Mutex::new(images.into_iter().collect()),
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            images: Mutex::new(VecDeque::new()),
        }
    }
}

#[async_trait]
impl ImagePicker for QueuedPicker {
    async fn request_permission(&self, _source: ImageSource) -> PermissionStatus {
        self.permission
    }

    async fn pick(&self, _source: ImageSource) -> Result<Option<ImageRef>, DeviceError> {
        Ok(self.images.lock().unwrap().pop_front())
    }
}

/// Reports a fixed position, counting how often it was read.
pub struct FixedLocation {
    permission: PermissionStatus,
    origin: Coordinates,
    reads: AtomicUsize,
}

impl FixedLocation {
    pub fn granted(origin: Coordinates) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            origin,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            origin: farm(),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_foreground_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn current_position(&self) -> Result<Coordinates, DeviceError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.origin)
    }
}

pub fn farm() -> Coordinates {
    Coordinates::new(12.97, 77.59)
}

/// A small JPEG-looking file the real client can upload.
pub fn leaf_photo() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("leaf")
        .suffix(".jpg")
        .tempfile()
        .expect("temp file");
    file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])
        .expect("write fixture");
    file
}
