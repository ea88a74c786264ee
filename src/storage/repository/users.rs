// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! User account repository.
//!
//! Users are keyed by uid (UUID). Email uniqueness is enforced by the
//! auth handlers, which normalize emails before lookup and insert.
//!
//! ## Storage Layout
//!
//! ```text
//! {data_root}/users/
//!   {uid}.json
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{FileStorage, StorageError, StorageResult};

/// User record stored on disk. Never serialized to API responses
/// directly; handlers project it into a public view without the
/// password hash or reset token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredUser {
    /// Unique user identifier (UUID)
    pub uid: String,
    /// Display name
    pub full_name: String,
    /// Normalized email address (NFKC, trimmed, lowercased)
    pub email: String,
    /// bcrypt password hash
    pub password_hash: String,
    /// Outstanding password reset token, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
    /// Expiry of the outstanding reset token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token_expires: Option<DateTime<Utc>>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Repository for user account operations.
pub struct UserRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository.
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Check if a user exists.
    pub fn exists(&self, uid: &str) -> bool {
        self.storage.exists(self.storage.paths().user(uid))
    }

    /// Get a user by uid.
    pub fn get(&self, uid: &str) -> StorageResult<StoredUser> {
        let path = self.storage.paths().user(uid);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("User {uid}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new user record.
    pub fn create(&self, user: &StoredUser) -> StorageResult<()> {
        if self.exists(&user.uid) {
            return Err(StorageError::AlreadyExists(format!("User {}", user.uid)));
        }
        self.storage
            .write_json(self.storage.paths().user(&user.uid), user)
    }

    /// Update an existing user record.
    pub fn update(&self, user: &StoredUser) -> StorageResult<()> {
        if !self.exists(&user.uid) {
            return Err(StorageError::NotFound(format!("User {}", user.uid)));
        }
        self.storage
            .write_json(self.storage.paths().user(&user.uid), user)
    }

    /// Find a user by normalized email.
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>> {
        for user in self.scan()? {
            if user.email == email {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    /// Find a user holding the given reset token with an unexpired
    /// expiry. Expired or unknown tokens return None.
    pub fn find_by_valid_reset_token(&self, token: &str) -> StorageResult<Option<StoredUser>> {
        let now = Utc::now();
        for user in self.scan()? {
            if user.reset_token.as_deref() == Some(token) {
                if let Some(expires) = user.reset_token_expires {
                    if expires > now {
                        return Ok(Some(user));
                    }
                }
                return Ok(None);
            }
        }
        Ok(None)
    }

    fn scan(&self) -> StorageResult<Vec<StoredUser>> {
        let dir = self.storage.paths().users_dir();
        let files = self.storage.list_files(&dir, "json")?;
        let mut users = Vec::new();

        for file in files {
            let path = dir.join(format!("{}.json", file));
            match self.storage.read_json::<StoredUser>(&path) {
                Ok(user) => users.push(user),
                Err(e) => {
                    tracing::warn!("Failed to read user {}: {}", file, e);
                }
            }
        }

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, StoragePaths};
    use chrono::Duration;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStorage) {
        let temp = TempDir::new().unwrap();
        let paths = StoragePaths::new(temp.path().to_str().unwrap());
        let mut storage = FileStorage::new(paths);
        storage.initialize().unwrap();
        (temp, storage)
    }

    fn sample_user(email: &str) -> StoredUser {
        StoredUser {
            uid: uuid::Uuid::new_v4().to_string(),
            full_name: "Jane Renter".to_string(),
            email: email.to_string(),
            password_hash: "$2b$12$fakehash".to_string(),
            reset_token: None,
            reset_token_expires: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_and_get_user() {
        let (_temp, storage) = setup();
        let repo = UserRepository::new(&storage);

        let user = sample_user("jane@example.com");
        repo.create(&user).unwrap();

        let fetched = repo.get(&user.uid).unwrap();
        assert_eq!(fetched, user);
    }

    #[test]
    fn create_duplicate_uid_fails() {
        let (_temp, storage) = setup();
        let repo = UserRepository::new(&storage);

        let user = sample_user("jane@example.com");
        repo.create(&user).unwrap();

        assert!(matches!(
            repo.create(&user),
            Err(StorageError::AlreadyExists(_))
        ));
    }

    #[test]
    fn find_by_email_matches_exact_normalized_form() {
        let (_temp, storage) = setup();
        let repo = UserRepository::new(&storage);

        let user = sample_user("jane@example.com");
        repo.create(&user).unwrap();
        repo.create(&sample_user("other@example.com")).unwrap();

        let found = repo.find_by_email("jane@example.com").unwrap();
        assert_eq!(found.map(|u| u.uid), Some(user.uid));

        let missing = repo.find_by_email("nobody@example.com").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn valid_reset_token_is_found() {
        let (_temp, storage) = setup();
        let repo = UserRepository::new(&storage);

        let mut user = sample_user("jane@example.com");
        user.reset_token = Some("deadbeef".to_string());
        user.reset_token_expires = Some(Utc::now() + Duration::hours(1));
        repo.create(&user).unwrap();

        let found = repo.find_by_valid_reset_token("deadbeef").unwrap();
        assert_eq!(found.map(|u| u.uid), Some(user.uid));
    }

    #[test]
    fn expired_reset_token_is_rejected() {
        let (_temp, storage) = setup();
        let repo = UserRepository::new(&storage);

        let mut user = sample_user("jane@example.com");
        user.reset_token = Some("deadbeef".to_string());
        user.reset_token_expires = Some(Utc::now() - Duration::minutes(1));
        repo.create(&user).unwrap();

        assert!(repo.find_by_valid_reset_token("deadbeef").unwrap().is_none());
        assert!(repo.find_by_valid_reset_token("unknown").unwrap().is_none());
    }

    #[test]
    fn update_rewrites_record() {
        let (_temp, storage) = setup();
        let repo = UserRepository::new(&storage);

        let mut user = sample_user("jane@example.com");
        repo.create(&user).unwrap();

        user.reset_token = Some("token".to_string());
        repo.update(&user).unwrap();

        let fetched = repo.get(&user.uid).unwrap();
        assert_eq!(fetched.reset_token, Some("token".to_string()));

        let ghost = sample_user("ghost@example.com");
        assert!(matches!(repo.update(&ghost), Err(StorageError::NotFound(_))));
    }
}
