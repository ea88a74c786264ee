// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Car inventory repository.
//!
//! ## Storage Layout
//!
//! Each car is stored as a separate JSON file keyed by its integer id:
//! ```text
//! {data_root}/cars/
//!   {car_id}.json
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{FileStorage, StorageError, StorageResult};

/// Car record stored on disk and returned by the inventory API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StoredCar {
    /// Store-assigned integer id
    pub id: u64,
    /// Manufacturer brand
    pub brand: String,
    /// Model name
    pub model: String,
    /// Model year
    pub year: i32,
    /// Whether the car can currently be booked
    pub is_available: bool,
    /// When the car was added to the inventory
    pub created_at: DateTime<Utc>,
}

/// Fields for creating or replacing a car record.
#[derive(Debug, Clone)]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub is_available: bool,
}

/// Repository for car inventory operations.
pub struct CarRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> CarRepository<'a> {
    /// Create a new CarRepository.
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Check if a car exists.
    pub fn exists(&self, car_id: u64) -> bool {
        self.storage.exists(self.storage.paths().car(car_id))
    }

    /// Get a car by id.
    pub fn get(&self, car_id: u64) -> StorageResult<StoredCar> {
        let path = self.storage.paths().car(car_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Car {car_id}")));
        }
        self.storage.read_json(path)
    }

    /// Add a new car, assigning the next id from the car sequence.
    pub fn create(&self, new: NewCar) -> StorageResult<StoredCar> {
        let id = self.storage.next_id("cars")?;
        let car = StoredCar {
            id,
            brand: new.brand,
            model: new.model,
            year: new.year,
            is_available: new.is_available,
            created_at: Utc::now(),
        };

        self.storage
            .write_json(self.storage.paths().car(id), &car)?;
        Ok(car)
    }

    /// Replace an existing car's fields, keeping its id and creation time.
    pub fn update(&self, car_id: u64, changes: NewCar) -> StorageResult<StoredCar> {
        let existing = self.get(car_id)?;
        let car = StoredCar {
            id: existing.id,
            brand: changes.brand,
            model: changes.model,
            year: changes.year,
            is_available: changes.is_available,
            created_at: existing.created_at,
        };

        self.storage
            .write_json(self.storage.paths().car(car_id), &car)?;
        Ok(car)
    }

    /// Delete a car, returning the removed record.
    pub fn delete(&self, car_id: u64) -> StorageResult<StoredCar> {
        let car = self.get(car_id)?;
        self.storage.delete(self.storage.paths().car(car_id))?;
        Ok(car)
    }

    /// List all cars, sorted by id ascending.
    pub fn list(&self) -> StorageResult<Vec<StoredCar>> {
        let dir = self.storage.paths().cars_dir();
        let files = self.storage.list_files(&dir, "json")?;
        let mut cars = Vec::new();

        for file in files {
            let path = dir.join(format!("{}.json", file));
            match self.storage.read_json::<StoredCar>(&path) {
                Ok(car) => cars.push(car),
                Err(e) => {
                    tracing::warn!("Failed to read car {}: {}", file, e);
                }
            }
        }

        cars.sort_by_key(|car| car.id);
        Ok(cars)
    }

    /// List cars currently marked available, sorted by id ascending.
    pub fn list_available(&self) -> StorageResult<Vec<StoredCar>> {
        let cars = self.list()?;
        Ok(cars.into_iter().filter(|car| car.is_available).collect())
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

    fn sample_car() -> NewCar {
        NewCar {
            brand: "Toyota".to_string(),
            model: "Avanza".to_string(),
            year: 2022,
            is_available: true,
        }
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let (_temp, storage) = setup();
        let repo = CarRepository::new(&storage);

        let first = repo.create(sample_car()).unwrap();
        let second = repo.create(sample_car()).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn get_returns_created_car() {
        let (_temp, storage) = setup();
        let repo = CarRepository::new(&storage);

        let created = repo.create(sample_car()).unwrap();
        let fetched = repo.get(created.id).unwrap();

        assert_eq!(fetched, created);
    }

    #[test]
    fn get_missing_car_returns_not_found() {
        let (_temp, storage) = setup();
        let repo = CarRepository::new(&storage);

        let result = repo.get(999);
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let (_temp, storage) = setup();
        let repo = CarRepository::new(&storage);

        let created = repo.create(sample_car()).unwrap();
        let updated = repo
            .update(
                created.id,
                NewCar {
                    brand: "Daihatsu".to_string(),
                    model: "Xenia".to_string(),
                    year: 2020,
                    is_available: false,
                },
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.brand, "Daihatsu");
        assert_eq!(updated.created_at, created.created_at);
        assert!(!updated.is_available);
    }

    #[test]
    fn delete_returns_removed_record() {
        let (_temp, storage) = setup();
        let repo = CarRepository::new(&storage);

        let created = repo.create(sample_car()).unwrap();
        let deleted = repo.delete(created.id).unwrap();

        assert_eq!(deleted, created);
        assert!(!repo.exists(created.id));
        assert!(matches!(repo.delete(created.id), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn list_sorts_by_id_ascending() {
        let (_temp, storage) = setup();
        let repo = CarRepository::new(&storage);

        for _ in 0..3 {
            repo.create(sample_car()).unwrap();
        }

        let cars = repo.list().unwrap();
        let ids: Vec<u64> = cars.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn list_available_filters_unavailable() {
        let (_temp, storage) = setup();
        let repo = CarRepository::new(&storage);

        repo.create(sample_car()).unwrap();
        repo.create(NewCar {
            is_available: false,
            ..sample_car()
        })
        .unwrap();

        let available = repo.list_available().unwrap();
        assert_eq!(available.len(), 1);
        assert!(available[0].is_available);
    }
}
