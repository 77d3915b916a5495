//! Single-writer state store and snapshot persistence.
//!
//! The [`Store`] owns the canonical [`State`] (active span, entry
//! collection, notes). Mutations are serialized: one batch at a time, each
//! one folded and normalized completely before the next is applied, so
//! observers never see a partial batch. Reads never block; subscribers get
//! the latest snapshot immediately and every change afterwards.
//!
//! # Persistence
//!
//! The state lives in a single JSON snapshot file. A missing or unreadable
//! file loads as the empty default state. Writes go through a temp file and
//! rename, and the background autosave task coalesces them over a 500 ms
//! quiescence window; [`Store::flush`] writes immediately for shutdown
//! paths.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{Mutex, watch};

use stint_core::{EntryAction, NoteAction, State, reduce_entries, reduce_notes};

/// How long the state must stay untouched before the autosave task writes.
const QUIESCENCE: Duration = Duration::from_millis(500);

/// Errors from the storage boundary.
///
/// The engine itself never errors; only reading and writing the snapshot
/// file can fail, and background write failures are logged rather than
/// surfaced.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to write the snapshot file or its parent directory.
    #[error("failed to write state file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Failed to serialize the state.
    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The single writer around the canonical state.
pub struct Store {
    path: PathBuf,
    state: watch::Sender<State>,
    write_lock: Mutex<()>,
}

impl Store {
    /// Opens the store, loading the snapshot at `path`.
    ///
    /// A missing or unparseable snapshot yields the empty default state;
    /// old snapshots with missing fields load with those fields defaulted.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let initial = load_state(&path).await;
        let (state, _) = watch::channel(initial);
        Self {
            path,
            state,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The latest fully-normalized snapshot.
    pub fn state(&self) -> State {
        self.state.borrow().clone()
    }

    /// Subscribes to the snapshot stream.
    ///
    /// The latest value is immediately available on the receiver, and every
    /// settled mutation after that is observable; intermediate states
    /// within a batch never are.
    pub fn subscribe(&self) -> watch::Receiver<State> {
        self.state.subscribe()
    }

    /// Starts the timer if it is stopped; otherwise stops it and records
    /// the elapsed span as a new entry.
    pub async fn toggle_active(&self, now: DateTime<Utc>) -> State {
        self.mutate(|state| {
            if let Some(start) = state.active_start_time.take() {
                tracing::debug!(%start, %now, "timer stopped");
                state.time_entries = reduce_entries(
                    &state.time_entries,
                    &[EntryAction::Create {
                        start_time: start,
                        end_time: now,
                    }],
                );
            } else {
                tracing::debug!(%now, "timer started");
                state.active_start_time = Some(now);
            }
        })
        .await
    }

    /// Applies a batch of entry actions atomically and renormalizes once.
    pub async fn reduce_entries(&self, actions: &[EntryAction]) -> State {
        self.mutate(|state| {
            state.time_entries = reduce_entries(&state.time_entries, actions);
        })
        .await
    }

    /// Applies a batch of note actions atomically.
    pub async fn reduce_notes(&self, actions: &[NoteAction]) -> State {
        self.mutate(|state| {
            state.notes = reduce_notes(&state.notes, actions);
        })
        .await
    }

    /// Removes every time entry. The active span and notes are untouched.
    pub async fn delete_all_entries(&self) -> State {
        self.mutate(|state| {
            state.time_entries.clear();
        })
        .await
    }

    async fn mutate(&self, f: impl FnOnce(&mut State)) -> State {
        // One in-flight mutation at a time; readers see pre- or post-state,
        // never an interleaving.
        let _guard = self.write_lock.lock().await;
        let mut next = self.state.borrow().clone();
        f(&mut next);
        self.state.send_replace(next.clone());
        next
    }

    /// Spawns the debounced autosave task.
    ///
    /// After the state settles for [`QUIESCENCE`], the snapshot is written
    /// once. Write failures are logged at warn level. The task ends when
    /// the store is dropped.
    pub fn spawn_autosave(&self) -> tokio::task::JoinHandle<()> {
        let mut rx = self.state.subscribe();
        // Only future mutations need persisting; the initial value came
        // from disk.
        rx.mark_unchanged();
        let path = self.path.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                // Absorb further changes until the state is quiet.
                loop {
                    tokio::select! {
                        () = tokio::time::sleep(QUIESCENCE) => break,
                        changed = rx.changed() => {
                            if changed.is_err() {
                                break;
                            }
                        }
                    }
                }
                let snapshot = rx.borrow_and_update().clone();
                if let Err(error) = write_snapshot(&path, &snapshot).await {
                    tracing::warn!(%error, "failed to persist state");
                }
            }
        })
    }

    /// Writes the current snapshot immediately.
    ///
    /// Shutdown paths call this so persistence cannot lag behind the final
    /// mutation.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let snapshot = self.state();
        write_snapshot(&self.path, &snapshot).await
    }
}

async fn load_state(path: &Path) -> State {
    match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    %error,
                    "unreadable state file, starting from an empty state"
                );
                State::default()
            }
        },
        Err(error) if error.kind() == io::ErrorKind::NotFound => State::default(),
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                %error,
                "failed to read state file, starting from an empty state"
            );
            State::default()
        }
    }
}

/// Writes the snapshot atomically: temp file in the same directory, then
/// rename over the target.
async fn write_snapshot(path: &Path, state: &State) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
    }

    let json = serde_json::to_vec_pretty(state)?;
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, &json).await.map_err(write_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(write_err)?;
    Ok(())
}
