// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Path constants and utilities for the data directory layout.

use std::path::{Path, PathBuf};

/// Base directory for all persistent storage when `DATA_DIR` is not set.
pub const DATA_ROOT: &str = "./data";

/// Storage path utilities for the data directory.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all persistent data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Car Paths ==========

    /// Directory containing all cars.
    pub fn cars_dir(&self) -> PathBuf {
        self.root.join("cars")
    }

    /// Path to a specific car file.
    pub fn car(&self, car_id: u64) -> PathBuf {
        self.cars_dir().join(format!("{car_id}.json"))
    }

    // ========== Booking Paths ==========

    /// Directory containing all bookings.
    pub fn bookings_dir(&self) -> PathBuf {
        self.root.join("bookings")
    }

    /// Path to a specific booking file.
    pub fn booking(&self, booking_id: u64) -> PathBuf {
        self.bookings_dir().join(format!("{booking_id}.json"))
    }

    // ========== User Paths ==========

    /// Directory containing all users.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific user file, keyed by uid.
    pub fn user(&self, uid: &str) -> PathBuf {
        self.users_dir().join(format!("{uid}.json"))
    }

    // ========== Sequence Paths ==========

    /// Directory containing id sequence counters.
    pub fn seq_dir(&self) -> PathBuf {
        self.root.join("seq")
    }

    /// Path to the sequence counter file for an entity (`cars`, `bookings`).
    pub fn sequence(&self, entity: &str) -> PathBuf {
        self.seq_dir().join(format!("{entity}.json"))
    }

    // ========== Audit Log Paths ==========

    /// Directory containing audit logs.
    pub fn audit_dir(&self) -> PathBuf {
        self.root.join("audit")
    }

    /// Directory for a specific date's audit logs.
    pub fn audit_date_dir(&self, date: &str) -> PathBuf {
        self.audit_dir().join(date)
    }

    /// Path to a daily audit events file (JSONL format).
    pub fn audit_events_file(&self, date: &str) -> PathBuf {
        self.audit_date_dir(date).join("events.jsonl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_root() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("./data"));
    }

    #[test]
    fn custom_root_for_testing() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(paths.root(), Path::new("/tmp/test-data"));
        assert_eq!(
            paths.car(1),
            PathBuf::from("/tmp/test-data/cars/1.json")
        );
    }

    #[test]
    fn car_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.cars_dir(), PathBuf::from("/data/cars"));
        assert_eq!(paths.car(42), PathBuf::from("/data/cars/42.json"));
    }

    #[test]
    fn booking_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.bookings_dir(), PathBuf::from("/data/bookings"));
        assert_eq!(paths.booking(7), PathBuf::from("/data/bookings/7.json"));
    }

    #[test]
    fn user_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.users_dir(), PathBuf::from("/data/users"));
        assert_eq!(
            paths.user("u-123"),
            PathBuf::from("/data/users/u-123.json")
        );
    }

    #[test]
    fn sequence_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.seq_dir(), PathBuf::from("/data/seq"));
        assert_eq!(
            paths.sequence("bookings"),
            PathBuf::from("/data/seq/bookings.json")
        );
    }

    #[test]
    fn audit_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.audit_dir(), PathBuf::from("/data/audit"));
        assert_eq!(
            paths.audit_date_dir("2026-01-28"),
            PathBuf::from("/data/audit/2026-01-28")
        );
        assert_eq!(
            paths.audit_events_file("2026-01-28"),
            PathBuf::from("/data/audit/2026-01-28/events.jsonl")
        );
    }
}
