//! Implementation of the `stint delete` command.

use std::io::Write;

use anyhow::Result;

use stint_core::EntryAction;
use stint_store::Store;

use super::util::{resolve_entry_id, short_id};

/// Deletes one entry by ID or unique prefix.
pub async fn run(out: &mut impl Write, store: &Store, id: &str) -> Result<()> {
    let id = resolve_entry_id(&store.state().time_entries, id)?;
    store.reduce_entries(&[EntryAction::Delete { id }]).await;
    writeln!(out, "Deleted {}", short_id(id))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 1, hour, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn deletes_by_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("stint.json")).await;
        store
            .reduce_entries(&[EntryAction::Create {
                start_time: at(13, 0),
                end_time: at(14, 0),
            }])
            .await;
        let id = store.state().time_entries[0].id;

        let mut out = Vec::new();
        run(&mut out, &store, &id.to_string()[..8]).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Deleted {}\n", short_id(id))
        );
        assert!(store.state().time_entries.is_empty());
    }

    #[tokio::test]
    async fn unknown_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("stint.json")).await;
        let mut out = Vec::new();
        assert!(run(&mut out, &store, "deadbeef").await.is_err());
    }
}
