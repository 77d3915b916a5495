//! Implementation of the `stint wipe` command.

use std::io::Write;

use anyhow::{Result, bail};

use stint_store::Store;

/// Deletes every time entry. Notes and a running timer are kept.
pub async fn run(out: &mut impl Write, store: &Store, yes: bool) -> Result<()> {
    if !yes {
        bail!("this deletes every entry; pass --yes to confirm");
    }
    let removed = store.state().time_entries.len();
    store.delete_all_entries().await;
    let noun = if removed == 1 { "entry" } else { "entries" };
    writeln!(out, "Deleted {removed} {noun}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use stint_core::EntryAction;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 1, hour, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn refuses_without_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("stint.json")).await;
        store
            .reduce_entries(&[EntryAction::Create {
                start_time: at(13, 0),
                end_time: at(14, 0),
            }])
            .await;

        let mut out = Vec::new();
        assert!(run(&mut out, &store, false).await.is_err());
        assert_eq!(store.state().time_entries.len(), 1);
    }

    #[tokio::test]
    async fn wipes_when_confirmed() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("stint.json")).await;
        store
            .reduce_entries(&[EntryAction::Create {
                start_time: at(13, 0),
                end_time: at(14, 0),
            }])
            .await;

        let mut out = Vec::new();
        run(&mut out, &store, true).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Deleted 1 entry\n");
        assert!(store.state().time_entries.is_empty());
    }

    #[tokio::test]
    async fn wiping_several_entries_pluralizes() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("stint.json")).await;
        store
            .reduce_entries(&[
                EntryAction::Create {
                    start_time: at(13, 0),
                    end_time: at(13, 30),
                },
                EntryAction::Create {
                    start_time: at(14, 0),
                    end_time: at(14, 30),
                },
            ])
            .await;

        let mut out = Vec::new();
        run(&mut out, &store, true).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Deleted 2 entries\n");
    }
}
