//! Device capabilities backed by command-line arguments.
//!
//! A terminal has no permission prompts, so both devices always grant access.

use std::path::PathBuf;

use async_trait::async_trait;
use krishi_core::{Coordinates, ImageRef, ImageSource};
use krishi_flow::{DeviceError, ImagePicker, LocationProvider, PermissionStatus};

/// "Picks" the file named on the command line.
pub(crate) struct FileImagePicker {
    path: PathBuf,
}

impl FileImagePicker {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ImagePicker for FileImagePicker {
    async fn request_permission(&self, _source: ImageSource) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn pick(&self, _source: ImageSource) -> Result<Option<ImageRef>, DeviceError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| DeviceError::Picker(format!("{}: {e}", self.path.display())))?;
        if !metadata.is_file() {
            return Err(DeviceError::Picker(format!(
                "{} is not a file",
                self.path.display()
            )));
        }
        Ok(Some(ImageRef::new(self.path.clone())))
    }
}

/// Reports the coordinates given on the command line.
pub(crate) struct FixedLocation {
    origin: Coordinates,
}

impl FixedLocation {
    pub(crate) fn new(origin: Coordinates) -> Self {
        Self { origin }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_foreground_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self) -> Result<Coordinates, DeviceError> {
        Ok(self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn picker_returns_existing_file() {
        let file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .expect("temp file");
        let picker = FileImagePicker::new(file.path().to_path_buf());

        let image = picker
            .pick(ImageSource::Gallery)
            .await
            .expect("pick should succeed")
            .expect("an image");
        assert_eq!(image.path(), file.path());
        assert_eq!(image.mime(), "image/png");
    }

    #[tokio::test]
    async fn picker_reports_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let picker = FileImagePicker::new(dir.path().join("nope.jpg"));

        let err = picker.pick(ImageSource::Camera).await.unwrap_err();
        assert!(matches!(err, DeviceError::Picker(msg) if msg.contains("nope.jpg")));
    }

    #[tokio::test]
    async fn picker_rejects_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let picker = FileImagePicker::new(dir.path().to_path_buf());

        let err = picker.pick(ImageSource::Gallery).await.unwrap_err();
        assert!(err.to_string().contains("is not a file"));
    }
}
