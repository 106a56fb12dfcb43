//! Device capabilities used by the capture flow and the gallery
//!
//! Camera, geolocation, reverse geocoding and asset storage sit behind
//! traits so the flows can run against real devices, the command line
//! importer or test doubles.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{Capability, DeviceError};
use crate::models::{Coordinates, MediaKind, Place};

/// Asset produced by a successful capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedAsset {
    pub uri: String,
    pub kind: MediaKind,
}

pub trait Camera: Send + Sync {
    /// Ask for camera access; `false` means the user refused
    fn request_permission(&self) -> impl Future<Output = bool> + Send;

    /// Take a picture or record a video. `None` when the user backs out
    fn capture(&self) -> impl Future<Output = Result<Option<CapturedAsset>, DeviceError>> + Send;

    /// Release an asset this camera produced that the user did not keep
    fn discard(&self, uri: &str) -> impl Future<Output = Result<(), DeviceError>> + Send;
}

pub trait Geolocator: Send + Sync {
    /// Ask for foreground location access; `false` means the user refused
    fn request_permission(&self) -> impl Future<Output = bool> + Send;

    fn current_position(&self) -> impl Future<Output = Result<Coordinates, DeviceError>> + Send;
}

pub trait ReverseGeocoder: Send + Sync {
    fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Result<Place, DeviceError>> + Send;
}

/// Storage of the asset files behind media entries
pub trait AssetStore: Send + Sync {
    /// Delete the asset at `uri`. Assets the store does not own are left alone
    fn delete(&self, uri: &str) -> impl Future<Output = Result<(), DeviceError>> + Send;
}

/// Directory holding the files imported by the logbook
#[derive(Debug, Clone)]
pub struct MediaDir {
    root: PathBuf,
}

impl MediaDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copy `source` into the directory; returns the canonical path of the copy
    pub async fn import(&self, source: &Path) -> Result<PathBuf, DeviceError> {
        let import_error = |e| DeviceError::Import {
            path: source.display().to_string(),
            source: e,
        };

        fs::create_dir_all(&self.root).await.map_err(import_error)?;

        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "capture".to_string());
        let target = self
            .root
            .join(format!("{}-{}", Utc::now().timestamp_millis(), name));

        fs::copy(source, &target).await.map_err(import_error)?;
        let target = fs::canonicalize(&target).await.map_err(import_error)?;

        info!("Imported {} as {}", source.display(), target.display());
        Ok(target)
    }

    /// Delete every imported file
    pub async fn clear(&self) -> Result<(), DeviceError> {
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => {
                info!("Cleared {}", self.root.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DeviceError::Delete {
                path: self.root.display().to_string(),
                source: e,
            }),
        }
    }

    /// Local path behind `uri` when it points inside this directory
    async fn owned_path(&self, uri: &str) -> Result<Option<PathBuf>, DeviceError> {
        let Some(path) = uri.strip_prefix("file://").map(PathBuf::from) else {
            return Ok(None);
        };
        if path.components().any(|c| c == Component::ParentDir) {
            return Ok(None);
        }

        match fs::canonicalize(&self.root).await {
            Ok(root) => Ok(path.starts_with(&root).then_some(path)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DeviceError::Delete {
                path: self.root.display().to_string(),
                source: e,
            }),
        }
    }
}

impl AssetStore for MediaDir {
    async fn delete(&self, uri: &str) -> Result<(), DeviceError> {
        let Some(path) = self.owned_path(uri).await? else {
            debug!("Keeping {}, not imported by the logbook", uri);
            return Ok(());
        };

        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("Deleted {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DeviceError::Delete {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }
}

/// Camera that "captures" an existing file by importing it into the media
/// directory
#[derive(Debug, Clone)]
pub struct ImportCamera {
    source: PathBuf,
    media: MediaDir,
}

impl ImportCamera {
    pub fn new(source: impl Into<PathBuf>, media: MediaDir) -> Self {
        Self {
            source: source.into(),
            media,
        }
    }
}

impl Camera for ImportCamera {
    async fn request_permission(&self) -> bool {
        true
    }

    async fn capture(&self) -> Result<Option<CapturedAsset>, DeviceError> {
        let target = self.media.import(&self.source).await?;
        Ok(Some(CapturedAsset {
            uri: file_uri(&target),
            kind: kind_of(&target),
        }))
    }

    async fn discard(&self, uri: &str) -> Result<(), DeviceError> {
        self.media.delete(uri).await
    }
}

fn kind_of(path: &Path) -> MediaKind {
    path.extension()
        .and_then(|e| e.to_str())
        .map(MediaKind::from_extension)
        .unwrap_or(MediaKind::Image)
}

fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Geolocator reporting a fixed position; no position means the user
/// refused location access
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Coordinates>);

impl Geolocator for FixedPosition {
    async fn request_permission(&self) -> bool {
        self.0.is_some()
    }

    async fn current_position(&self) -> Result<Coordinates, DeviceError> {
        self.0.ok_or_else(|| {
            DeviceError::Unavailable(Capability::Location, "no position set".to_string())
        })
    }
}

/// Reverse geocoder without a lookup service; every lookup fails
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGeocoder;

impl ReverseGeocoder for OfflineGeocoder {
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Place, DeviceError> {
        debug!("No geocoding service for {}", coordinates);
        Err(DeviceError::Unavailable(
            Capability::Location,
            "reverse geocoding is offline".to_string(),
        ))
    }
}
