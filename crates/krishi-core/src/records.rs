//! Domain records shared by the HTTP client and the session state machines.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the user wants the crop photo to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Gallery,
    Camera,
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Gallery => write!(f, "gallery"),
            ImageSource::Camera => write!(f, "camera"),
        }
    }
}

/// Opaque reference to a photo stored on the device.
///
/// The bytes are only read when the image is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    path: PathBuf,
    file_name: String,
    mime: &'static str,
}

impl ImageRef {
    /// Builds a reference from a local path, inferring the upload file name and
    /// MIME type. Unknown extensions are uploaded as `image/jpeg`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("photo.jpg")
            .to_string();
        let mime = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("heic") => "image/heic",
            _ => "image/jpeg",
        };
        Self {
            path,
            file_name,
            mime,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn mime(&self) -> &'static str {
        self.mime
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `true` when both components are finite and inside the WGS84 range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// A nearby store as returned by the store-search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub place_id: Option<String>,
}

/// Identity of a [`StoreRecord`]: its place identifier when the backend
/// provides one, otherwise its display name.
///
/// Two distinct stores sharing a name and lacking identifiers produce equal
/// keys. They are kept as separate records; nothing deduplicates on this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey<'a> {
    PlaceId(&'a str),
    Name(&'a str),
}

impl fmt::Display for StoreKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::PlaceId(id) => write!(f, "{id}"),
            StoreKey::Name(name) => write!(f, "{name}"),
        }
    }
}

impl StoreRecord {
    /// The place identifier, treating an empty string as absent.
    #[must_use]
    pub fn place_id(&self) -> Option<&str> {
        self.place_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    #[must_use]
    pub fn key(&self) -> StoreKey<'_> {
        match self.place_id() {
            Some(id) => StoreKey::PlaceId(id),
            None => StoreKey::Name(&self.name),
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// Extended information for a single store, fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub name: String,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpeningHours {
    /// One human-readable line per weekday, in backend order.
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

impl PlaceDetails {
    /// Opening-hours day lines, empty when the backend omitted them.
    #[must_use]
    pub fn hours(&self) -> &[String] {
        self.opening_hours
            .as_ref()
            .map_or(&[], |h| h.weekday_text.as_slice())
    }
}
