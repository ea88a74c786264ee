// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Booking repository.
//!
//! Bookings are written exactly once by the payment workflow after the
//! on-chain transfer has been verified, so every record is created
//! already paid. The read API never mutates them.
//!
//! ## Storage Layout
//!
//! ```text
//! {data_root}/bookings/
//!   {booking_id}.json
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{FileStorage, StorageError, StorageResult};

/// Finalized booking record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StoredBooking {
    /// Store-assigned integer id
    pub id: u64,
    /// Booked car id
    pub car_id: u64,
    /// First rental day
    pub start_date: NaiveDate,
    /// Last rental day
    pub end_date: NaiveDate,
    /// Customer full name
    pub full_name: String,
    /// Customer email address
    pub email: String,
    /// Customer phone number
    pub phone_number: String,
    /// Payment method label from the frontend (e.g. `crypto`)
    pub payment_method: String,
    /// Whether payment is settled. Always true for records created by
    /// the payment workflow.
    pub is_paid: bool,
    /// Block explorer URL for the payment transaction
    pub tx_ref: String,
    /// When the booking was finalized
    pub created_at: DateTime<Utc>,
}

/// Fields for persisting a verified booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub car_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub payment_method: String,
    pub tx_ref: String,
}

/// Repository for booking operations.
pub struct BookingRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> BookingRepository<'a> {
    /// Create a new BookingRepository.
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Check if a booking exists.
    pub fn exists(&self, booking_id: u64) -> bool {
        self.storage
            .exists(self.storage.paths().booking(booking_id))
    }

    /// Get a booking by id.
    pub fn get(&self, booking_id: u64) -> StorageResult<StoredBooking> {
        let path = self.storage.paths().booking(booking_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Booking {booking_id}")));
        }
        self.storage.read_json(path)
    }

    /// Persist a verified booking, assigning the next id from the
    /// booking sequence. Returns the stored record.
    pub fn create(&self, new: NewBooking) -> StorageResult<StoredBooking> {
        let id = self.storage.next_id("bookings")?;
        let booking = StoredBooking {
            id,
            car_id: new.car_id,
            start_date: new.start_date,
            end_date: new.end_date,
            full_name: new.full_name,
            email: new.email,
            phone_number: new.phone_number,
            payment_method: new.payment_method,
            is_paid: true,
            tx_ref: new.tx_ref,
            created_at: Utc::now(),
        };

        self.storage
            .write_json(self.storage.paths().booking(id), &booking)?;
        Ok(booking)
    }

    /// List all bookings, sorted by created_at descending (newest first).
    pub fn list(&self) -> StorageResult<Vec<StoredBooking>> {
        let dir = self.storage.paths().bookings_dir();
        let files = self.storage.list_files(&dir, "json")?;
        let mut bookings = Vec::new();

        for file in files {
            let path = dir.join(format!("{}.json", file));
            match self.storage.read_json::<StoredBooking>(&path) {
                Ok(booking) => bookings.push(booking),
                Err(e) => {
                    tracing::warn!("Failed to read booking {}: {}", file, e);
                }
            }
        }

        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    /// List bookings for a customer email, newest first.
    pub fn list_by_email(&self, email: &str) -> StorageResult<Vec<StoredBooking>> {
        let bookings = self.list()?;
        Ok(bookings
            .into_iter()
            .filter(|b| b.email.eq_ignore_ascii_case(email))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, StoragePaths};
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStorage) {
        let temp = TempDir::new().unwrap();
        let paths = StoragePaths::new(temp.path().to_str().unwrap());
        let mut storage = FileStorage::new(paths);
        storage.initialize().unwrap();
        (temp, storage)
    }

    fn sample_booking() -> NewBooking {
        NewBooking {
            car_id: 1,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
            full_name: "Jane Renter".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: "+6281234567890".to_string(),
            payment_method: "crypto".to_string(),
            tx_ref: "https://sepolia.etherscan.io/tx/0xabc".to_string(),
        }
    }

    #[test]
    fn create_assigns_id_and_marks_paid() {
        let (_temp, storage) = setup();
        let repo = BookingRepository::new(&storage);

        let booking = repo.create(sample_booking()).unwrap();

        assert_eq!(booking.id, 1);
        assert!(booking.is_paid);
        assert_eq!(booking.tx_ref, "https://sepolia.etherscan.io/tx/0xabc");
    }

    #[test]
    fn create_returns_persisted_record() {
        let (_temp, storage) = setup();
        let repo = BookingRepository::new(&storage);

        let created = repo.create(sample_booking()).unwrap();
        let fetched = repo.get(created.id).unwrap();

        assert_eq!(fetched, created);
    }

    #[test]
    fn get_missing_booking_returns_not_found() {
        let (_temp, storage) = setup();
        let repo = BookingRepository::new(&storage);

        assert!(matches!(repo.get(42), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn list_returns_newest_first() {
        let (_temp, storage) = setup();
        let repo = BookingRepository::new(&storage);

        let first = repo.create(sample_booking()).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = repo.create(sample_booking()).unwrap();

        let bookings = repo.list().unwrap();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].id, second.id);
        assert_eq!(bookings[1].id, first.id);
    }

    #[test]
    fn list_by_email_matches_case_insensitively() {
        let (_temp, storage) = setup();
        let repo = BookingRepository::new(&storage);

        repo.create(sample_booking()).unwrap();
        repo.create(NewBooking {
            email: "other@example.com".to_string(),
            ..sample_booking()
        })
        .unwrap();

        let bookings = repo.list_by_email("JANE@example.com").unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].email, "jane@example.com");
    }
}
