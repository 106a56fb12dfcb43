//! Command-line front end

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use common::KeyValueStore;

use crate::capture::CaptureFlow;
use crate::device::{FixedPosition, ImportCamera, MediaDir, OfflineGeocoder};
use crate::error::LogbookResult;
use crate::gallery::Gallery;
use crate::models::Coordinates;
use crate::repository::MediaRepository;

#[derive(Parser, Debug)]
#[command(name = "logbook", version, about = "Geo-tagged photo and video logbook")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture a photo or video by importing a local file
    Capture {
        file: PathBuf,
        /// Device latitude; leave out to capture without location
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Device longitude
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Note saved with the capture
        #[arg(long, default_value = "")]
        note: String,
        /// Discard the capture instead of saving it
        #[arg(long)]
        discard: bool,
    },
    /// List captured media
    List,
    /// Replace the note of an entry; an empty note clears it
    Annotate { id: String, note: String },
    /// Delete an entry and its imported file
    Delete { id: String },
    /// Delete all stored data and imported files
    Reset,
}

/// Run one command against `store`, importing captures into `media_dir`
pub async fn run<S: KeyValueStore + Clone>(
    command: Command,
    store: S,
    media_dir: &Path,
) -> LogbookResult<()> {
    let repository = MediaRepository::new(store.clone());

    match command {
        Command::Capture {
            file,
            lat,
            lon,
            note,
            discard,
        } => {
            let position = lat.zip(lon).map(|(latitude, longitude)| Coordinates {
                latitude,
                longitude,
            });
            let mut flow = CaptureFlow::new(
                repository,
                ImportCamera::new(file, MediaDir::new(media_dir)),
                FixedPosition(position),
            );

            if flow.capture().await?.is_none() {
                println!("Capture cancelled");
                return Ok(());
            }
            if discard {
                let pending = flow.cancel().await?;
                println!("Discarded {}", pending.uri);
            } else {
                let entry = flow.confirm(&note).await?;
                println!("Saved {} {}", entry.kind, entry.id);
            }
        }
        Command::List => {
            let mut gallery =
                Gallery::load(repository, OfflineGeocoder, MediaDir::new(media_dir)).await?;
            let entries = gallery.entries().to_vec();
            if entries.is_empty() {
                println!("No media yet. Add some with `logbook capture`.");
            }
            for entry in entries {
                let place = gallery.location_label(&entry.id).await;
                let position = entry
                    .location
                    .map(|l| format!(" ({})", l))
                    .unwrap_or_default();
                println!(
                    "[{:<5}] {}  {}{}  {}",
                    entry.kind,
                    entry.id,
                    place,
                    position,
                    entry.annotation.as_deref().unwrap_or("No annotation")
                );
                println!("        {}", entry.uri);
            }
        }
        Command::Annotate { id, note } => {
            let mut gallery =
                Gallery::load(repository, OfflineGeocoder, MediaDir::new(media_dir)).await?;
            gallery.annotate(&id, &note).await?;
            println!("Updated note of {}", id);
        }
        Command::Delete { id } => {
            let mut gallery =
                Gallery::load(repository, OfflineGeocoder, MediaDir::new(media_dir)).await?;
            gallery.remove(&id).await?;
            println!("Deleted {}", id);
        }
        Command::Reset => {
            store.clear().await?;
            MediaDir::new(media_dir).clear().await?;
            println!("All data deleted");
        }
    }

    Ok(())
}
