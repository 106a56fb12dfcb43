//! Media capture flow
//!
//! A capture is held as a pending record until the user confirms it with an
//! optional note. Only a confirmed capture is written to storage.

use common::KeyValueStore;
use tracing::{error, info, warn};

use crate::device::{Camera, Geolocator};
use crate::error::{Capability, LogbookError, LogbookResult};
use crate::models::{Coordinates, MediaEntry, MediaKind, normalize_annotation};
use crate::repository::MediaRepository;

/// Captured asset waiting for confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCapture {
    pub uri: String,
    pub kind: MediaKind,
    pub location: Option<Coordinates>,
}

pub struct CaptureFlow<S, C, G> {
    repository: MediaRepository<S>,
    camera: C,
    geolocator: G,
    pending: Option<PendingCapture>,
}

impl<S, C, G> CaptureFlow<S, C, G>
where
    S: KeyValueStore,
    C: Camera,
    G: Geolocator,
{
    pub fn new(repository: MediaRepository<S>, camera: C, geolocator: G) -> Self {
        Self {
            repository,
            camera,
            geolocator,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<&PendingCapture> {
        self.pending.as_ref()
    }

    /// Run the camera and tag the result with the device position
    ///
    /// Returns `None` when the user backs out of the camera. A capture
    /// replaces any capture still pending, releasing its asset.
    pub async fn capture(&mut self) -> LogbookResult<Option<&PendingCapture>> {
        if !self.camera.request_permission().await {
            warn!("Camera permission denied");
            return Err(LogbookError::PermissionDenied(Capability::Camera));
        }

        let Some(asset) = self
            .camera
            .capture()
            .await
            .inspect_err(|e| error!("Camera failed: {}", e))?
        else {
            info!("Capture cancelled");
            return Ok(None);
        };

        if let Some(previous) = self.pending.take() {
            self.release(&previous.uri).await;
        }

        let location = self.locate().await;
        self.pending = Some(PendingCapture {
            uri: asset.uri,
            kind: asset.kind,
            location,
        });
        Ok(self.pending.as_ref())
    }

    async fn locate(&self) -> Option<Coordinates> {
        if !self.geolocator.request_permission().await {
            warn!("Location permission denied, capturing without location");
            return None;
        }

        match self.geolocator.current_position().await {
            Ok(position) => Some(position),
            Err(e) => {
                warn!("Could not get the current position: {}", e);
                None
            }
        }
    }

    /// Save the pending capture with an optional note
    ///
    /// On a storage failure the capture stays pending so the user can retry
    /// or cancel.
    pub async fn confirm(&mut self, annotation: &str) -> LogbookResult<MediaEntry> {
        let pending = self.pending.as_ref().ok_or(LogbookError::NothingPending)?;

        let entry = MediaEntry {
            id: String::new(),
            uri: pending.uri.clone(),
            kind: pending.kind,
            location: pending.location,
            annotation: normalize_annotation(annotation),
        };

        let (stored, _) = self
            .repository
            .upsert(entry)
            .await
            .inspect_err(|e| error!("Failed to save capture: {}", e))?;

        info!("Saved {} {}", stored.kind, stored.id);
        self.pending = None;
        Ok(stored)
    }

    /// Discard the pending capture and release its asset
    ///
    /// Nothing is written to storage. Failing to release the asset is
    /// logged; the capture is discarded regardless.
    pub async fn cancel(&mut self) -> LogbookResult<PendingCapture> {
        let pending = self.pending.take().ok_or(LogbookError::NothingPending)?;
        self.release(&pending.uri).await;

        info!("Discarded capture {}", pending.uri);
        Ok(pending)
    }

    async fn release(&self, uri: &str) {
        if let Err(e) = self.camera.discard(uri).await {
            warn!("Could not release {}: {}", uri, e);
        }
    }
}
