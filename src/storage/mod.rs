// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! # File Storage Module
//!
//! This module provides persistent storage as plain JSON files under the
//! data root (`DATA_DIR`, default `./data`). There is no external
//! database; each record is one file, written atomically.
//!
//! ## Storage Layout
//!
//! ```text
//! {data_root}/
//!   cars/
//!     {car_id}.json
//!   bookings/
//!     {booking_id}.json
//!   users/
//!     {uid}.json
//!   seq/
//!     cars.json           # Next-id counters
//!     bookings.json
//!   audit/
//!     {date}/events.jsonl # Daily audit logs
//! ```
//!
//! ## Notes
//!
//! - Writes are temp-file + rename, so readers never see partial JSON
//! - Integer ids come from the persisted `seq/` counters
//! - Corrupt record files are skipped (with a warning) by list operations

pub mod audit;
pub mod fs;
pub mod paths;
pub mod repository;

pub use audit::{AuditEvent, AuditEventType, AuditRepository};
pub use fs::{FileStorage, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{
    BookingRepository, CarRepository, NewBooking, NewCar, StoredBooking, StoredCar, StoredUser,
    UserRepository,
};
