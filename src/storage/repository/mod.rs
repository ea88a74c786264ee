// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Repository layer providing typed access to file-backed storage.
//!
//! Each repository provides CRUD operations for a specific entity type,
//! using the FileStorage for all file operations.

pub mod bookings;
pub mod cars;
pub mod users;

pub use bookings::{BookingRepository, NewBooking, StoredBooking};
pub use cars::{CarRepository, NewCar, StoredCar};
pub use users::{StoredUser, UserRepository};
