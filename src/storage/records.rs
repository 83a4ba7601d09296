//! Typed puzzle records on top of a [`StorageProvider`]
//!
//! Two namespaces are used:
//! - `frantic-five:bounds:<date>` holds the [`BoundsSnapshot`] for one date.
//! - `frantic-five:session` holds the latest [`SessionSnapshot`].
//!
//! Neither record contains the secret word.

use super::StorageProvider;
use crate::engine::{BoundsSnapshot, PuzzleState, SessionSnapshot};
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key of the session progress record
pub const SESSION_KEY: &str = "frantic-five:session";

/// Key of the bounds record for `date`
#[must_use]
pub fn bounds_key(date: NaiveDate) -> String {
    format!("frantic-five:bounds:{date}")
}

/// Load and decode a JSON record
///
/// A malformed record is logged, removed, and reported as absent.
pub fn load_record<T, S>(storage: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: StorageProvider + ?Sized,
{
    let raw = storage.load(key)?;
    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(key, "Discarding malformed record: {}", e);
            storage.remove(key);
            None
        }
    }
}

/// Encode and save a JSON record
pub fn save_record<T, S>(storage: &S, key: &str, record: &T)
where
    T: Serialize,
    S: StorageProvider + ?Sized,
{
    match serde_json::to_string(record) {
        Ok(json) => storage.save(key, &json),
        Err(e) => tracing::error!(key, "Failed to serialize record: {}", e),
    }
}

pub fn load_bounds<S: StorageProvider + ?Sized>(
    storage: &S,
    date: NaiveDate,
) -> Option<BoundsSnapshot> {
    load_record(storage, &bounds_key(date))
}

pub fn load_session<S: StorageProvider + ?Sized>(storage: &S) -> Option<SessionSnapshot> {
    load_record(storage, SESSION_KEY)
}

pub fn save_bounds<S: StorageProvider + ?Sized>(storage: &S, state: &PuzzleState) {
    save_record(storage, &bounds_key(state.date()), &state.bounds_snapshot());
}

pub fn save_session<S: StorageProvider + ?Sized>(storage: &S, state: &PuzzleState) {
    save_record(storage, SESSION_KEY, &state.session_snapshot());
}

/// Remove every record belonging to `date`
pub fn forget_date<S: StorageProvider + ?Sized>(storage: &S, date: NaiveDate) {
    storage.remove(&bounds_key(date));
    if load_session(storage).is_some_and(|s| s.date == date) {
        storage.remove(SESSION_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::engine::Status;
    use crate::storage::MemoryStorage;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, n).unwrap()
    }

    fn bounds() -> BoundsSnapshot {
        BoundsSnapshot {
            top_word: Word::new("mango").unwrap(),
            bottom_word: Word::new("table").unwrap(),
            top_word_updated: true,
            bottom_word_updated: false,
        }
    }

    #[test]
    fn bounds_key_is_namespaced_by_date() {
        assert_eq!(bounds_key(day(2)), "frantic-five:bounds:2024-01-02");
    }

    #[test]
    fn bounds_record_format() {
        let storage = MemoryStorage::new();
        save_record(&storage, &bounds_key(day(1)), &bounds());

        let raw = storage.load(&bounds_key(day(1))).unwrap();
        assert_eq!(
            raw,
            r#"{"topWord":"mango","bottomWord":"table","topWordUpdated":true,"bottomWordUpdated":false}"#
        );
        assert_eq!(load_bounds(&storage, day(1)), Some(bounds()));
        assert_eq!(load_bounds(&storage, day(2)), None);
    }

    #[test]
    fn malformed_record_is_absent_and_removed() {
        let storage = MemoryStorage::new();
        storage.save(SESSION_KEY, "{\"date\": 12");

        assert!(load_session(&storage).is_none());
        assert!(storage.load(SESSION_KEY).is_none());
    }

    #[test]
    fn session_record_tolerates_missing_optional_fields() {
        let storage = MemoryStorage::new();
        storage.save(
            SESSION_KEY,
            r#"{"date":"2024-01-01","status":"won","attempts":3,
                "currentGuess":[null,null,null,null,null],
                "autoFilledMask":[false,false,false,false,false]}"#,
        );

        let session = load_session(&storage).unwrap();
        assert_eq!(session.status, Status::Won);
        assert_eq!(session.attempts, 3);
        assert!(session.disabled_letters.is_empty());
        assert!(!session.powerup_used);
    }

    #[test]
    fn forget_date_leaves_other_days() {
        let storage = MemoryStorage::new();
        save_record(&storage, &bounds_key(day(1)), &bounds());
        save_record(&storage, &bounds_key(day(2)), &bounds());

        forget_date(&storage, day(1));
        assert!(load_bounds(&storage, day(1)).is_none());
        assert!(load_bounds(&storage, day(2)).is_some());
    }
}
