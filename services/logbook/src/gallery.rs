//! Gallery state: the captured entries with their annotations and place
//! names

use std::collections::HashMap;

use common::KeyValueStore;
use tracing::{error, info, warn};

use crate::device::{AssetStore, ReverseGeocoder};
use crate::error::{LogbookError, LogbookResult};
use crate::models::{MediaEntry, normalize_annotation};
use crate::repository::MediaRepository;

pub const UNKNOWN_LOCATION: &str = "Unknown location";

pub struct Gallery<S, G, A> {
    repository: MediaRepository<S>,
    geocoder: G,
    assets: A,
    entries: Vec<MediaEntry>,
    labels: HashMap<String, String>,
}

impl<S, G, A> Gallery<S, G, A>
where
    S: KeyValueStore,
    G: ReverseGeocoder,
    A: AssetStore,
{
    /// Rehydrate the gallery from storage
    pub async fn load(
        repository: MediaRepository<S>,
        geocoder: G,
        assets: A,
    ) -> LogbookResult<Self> {
        let entries = repository
            .list()
            .await
            .inspect_err(|e| error!("Failed to load media: {}", e))?;

        Ok(Self {
            repository,
            geocoder,
            assets,
            entries,
            labels: HashMap::new(),
        })
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn find(&self, id: &str) -> Option<&MediaEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Replace the note of entry `id`; a blank note removes it
    pub async fn annotate(&mut self, id: &str, text: &str) -> LogbookResult<MediaEntry> {
        let mut entry = self
            .find(id)
            .cloned()
            .ok_or_else(|| LogbookError::MediaNotFound(id.to_string()))?;
        entry.annotation = normalize_annotation(text);

        let (stored, entries) = self
            .repository
            .upsert(entry)
            .await
            .inspect_err(|e| error!("Failed to save annotation: {}", e))?;

        info!("Annotated media {}", stored.id);
        self.entries = entries;
        Ok(stored)
    }

    /// Delete entry `id` and its asset; deleting an absent id is a no-op
    ///
    /// The asset goes only after the entry is gone from storage. Failing to
    /// delete it is logged.
    pub async fn remove(&mut self, id: &str) -> LogbookResult<()> {
        let uri = self.find(id).map(|e| e.uri.clone());
        let entries = self
            .repository
            .remove(id)
            .await
            .inspect_err(|e| error!("Failed to delete media: {}", e))?;

        self.labels.remove(id);
        self.entries = entries;

        if let Some(uri) = uri {
            if let Err(e) = self.assets.delete(&uri).await {
                warn!("Could not delete the asset of {}: {}", id, e);
            }
        }
        Ok(())
    }

    /// Place name of entry `id`, looked up once and cached
    pub async fn location_label(&mut self, id: &str) -> String {
        if let Some(label) = self.labels.get(id) {
            return label.clone();
        }

        let Some(coordinates) = self.find(id).and_then(|e| e.location) else {
            return UNKNOWN_LOCATION.to_string();
        };

        let label = match self.geocoder.reverse_geocode(coordinates).await {
            Ok(place) => place.label(),
            Err(e) => {
                warn!("Reverse geocoding failed for {}: {}", id, e);
                UNKNOWN_LOCATION.to_string()
            }
        };
        self.labels.insert(id.to_string(), label.clone());
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::error::{Capability, DeviceError};
    use crate::models::{Coordinates, MediaKind, Place};
    use common::MemoryStore;

    /// Geocoder knowing a single place, counting its lookups
    #[derive(Clone, Default)]
    struct CountingGeocoder {
        lookups: Arc<AtomicUsize>,
    }

    impl ReverseGeocoder for CountingGeocoder {
        async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Place, DeviceError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if coordinates.latitude > 0.0 {
                Ok(Place {
                    region: Some("Bogota".to_string()),
                    country: Some("Colombia".to_string()),
                })
            } else {
                Err(DeviceError::Unavailable(
                    Capability::Location,
                    "no result".to_string(),
                ))
            }
        }
    }

    /// Asset store remembering what it was asked to delete
    #[derive(Clone, Default)]
    struct RecordingAssets {
        deleted: Arc<Mutex<Vec<String>>>,
    }

    impl AssetStore for RecordingAssets {
        async fn delete(&self, uri: &str) -> Result<(), DeviceError> {
            self.deleted.lock().unwrap().push(uri.to_string());
            Ok(())
        }
    }

    fn entry(latitude: Option<f64>, annotation: Option<&str>) -> MediaEntry {
        MediaEntry {
            id: String::new(),
            uri: format!("file:///media/{}.jpg", annotation.unwrap_or("untitled")),
            kind: MediaKind::Image,
            location: latitude.map(|latitude| Coordinates {
                latitude,
                longitude: -74.0,
            }),
            annotation: annotation.map(str::to_string),
        }
    }

    async fn seeded(entries: Vec<MediaEntry>) -> (MemoryStore, Vec<MediaEntry>) {
        let store = MemoryStore::new();
        let repository = MediaRepository::new(store.clone());
        let mut stored = Vec::new();
        for entry in entries {
            stored.push(repository.upsert(entry).await.unwrap().0);
        }
        (store, stored)
    }

    #[tokio::test]
    async fn test_annotation_is_persisted() -> LogbookResult<()> {
        let (store, stored) = seeded(vec![entry(None, Some("old")), entry(None, None)]).await;
        let mut gallery = Gallery::load(
            MediaRepository::new(store.clone()),
            CountingGeocoder::default(),
            RecordingAssets::default(),
        )
        .await?;

        let updated = gallery.annotate(&stored[0].id, "new note").await?;
        assert_eq!(updated.annotation.as_deref(), Some("new note"));

        let reloaded = MediaRepository::new(store).list().await?;
        assert_eq!(reloaded[0].annotation.as_deref(), Some("new note"));
        assert_eq!(reloaded[1], stored[1]);
        assert_eq!(gallery.entries(), reloaded.as_slice());
        Ok(())
    }

    #[tokio::test]
    async fn test_annotating_missing_entry_fails() -> LogbookResult<()> {
        let (store, _) = seeded(vec![entry(None, None)]).await;
        let mut gallery = Gallery::load(
            MediaRepository::new(store),
            CountingGeocoder::default(),
            RecordingAssets::default(),
        )
        .await?;

        let err = gallery.annotate("missing", "note").await.unwrap_err();
        assert!(matches!(err, LogbookError::MediaNotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_is_idempotent_and_deletes_the_asset() -> LogbookResult<()> {
        let (store, stored) = seeded(vec![entry(None, Some("a")), entry(None, Some("b"))]).await;
        let assets = RecordingAssets::default();
        let mut gallery = Gallery::load(
            MediaRepository::new(store.clone()),
            CountingGeocoder::default(),
            assets.clone(),
        )
        .await?;

        gallery.remove(&stored[0].id).await?;
        gallery.remove(&stored[0].id).await?;

        assert_eq!(gallery.entries(), &stored[1..]);
        assert_eq!(MediaRepository::new(store).list().await?, stored[1..].to_vec());
        assert_eq!(*assets.deleted.lock().unwrap(), ["file:///media/a.jpg"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_location_labels() -> LogbookResult<()> {
        let (store, stored) = seeded(vec![
            entry(Some(4.7), None),
            entry(Some(-33.4), None),
            entry(None, None),
        ])
        .await;
        let geocoder = CountingGeocoder::default();
        let mut gallery = Gallery::load(
            MediaRepository::new(store),
            geocoder.clone(),
            RecordingAssets::default(),
        )
        .await?;

        assert_eq!(gallery.location_label(&stored[0].id).await, "Bogota, Colombia");
        assert_eq!(gallery.location_label(&stored[1].id).await, UNKNOWN_LOCATION);
        assert_eq!(gallery.location_label(&stored[2].id).await, UNKNOWN_LOCATION);
        assert_eq!(geocoder.lookups.load(Ordering::SeqCst), 2);

        // Cached per entry, failures included
        gallery.location_label(&stored[0].id).await;
        gallery.location_label(&stored[1].id).await;
        assert_eq!(geocoder.lookups.load(Ordering::SeqCst), 2);
        Ok(())
    }
}
