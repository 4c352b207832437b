//! Persistent user profile
//!
//! The profile is a single JSON document in its own keyspace. A missing or
//! unreadable document yields the default profile.

use tokio::task;
use tracing::{debug, instrument, warn};

use crate::models::UserProfile;
use crate::{MiniMateError, Result};

/// Storage key of the profile document
pub const PROFILE_KEY: &str = "minimate_user_profile";

fn store_error(e: impl ToString) -> MiniMateError {
    MiniMateError::cache(format!("Profile store: {}", e.to_string()))
}

#[derive(Clone)]
pub struct ProfileStore {
    _db: fjall::Database,
    store: fjall::Keyspace,
    default_language: String,
}

impl ProfileStore {
    pub fn new(db: &fjall::Database) -> Result<Self> {
        let store = db
            .keyspace("profile", fjall::KeyspaceCreateOptions::default)
            .map_err(store_error)?;
        Ok(Self {
            _db: db.clone(),
            store,
            default_language: UserProfile::default().language,
        })
    }

    /// Language used when no profile is stored or the stored one names none
    #[must_use]
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    fn default_profile(&self) -> UserProfile {
        UserProfile {
            language: self.default_language.clone(),
            ..UserProfile::default()
        }
    }

    /// Load the stored profile, or the default one if none can be read
    #[instrument(level = "debug", skip(self))]
    pub async fn get_profile(&self) -> Result<UserProfile> {
        let store = self.store.clone();
        let bytes = task::spawn_blocking(move || {
            store
                .get(PROFILE_KEY)
                .map(|value| value.map(|v| v.to_vec()))
        })
        .await
        .map_err(store_error)?
        .map_err(store_error)?;

        let Some(bytes) = bytes else {
            debug!("No stored profile, using defaults");
            return Ok(self.default_profile());
        };

        let document = serde_json::from_slice::<serde_json::Value>(&bytes).and_then(|value| {
            let has_language = value.get("Language").is_some();
            serde_json::from_value::<UserProfile>(value).map(|profile| (profile, has_language))
        });
        match document {
            Ok((mut profile, has_language)) => {
                if !has_language {
                    profile.language.clone_from(&self.default_language);
                }
                Ok(profile)
            }
            Err(e) => {
                warn!("Stored profile is unreadable, using defaults: {}", e);
                Ok(self.default_profile())
            }
        }
    }

    /// Persist the profile, replacing any previous one
    #[instrument(level = "debug", skip(self, profile), fields(name = %profile.name))]
    pub async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        let bytes = serde_json::to_vec(profile).map_err(store_error)?;
        let store = self.store.clone();
        task::spawn_blocking(move || store.insert(PROFILE_KEY, bytes))
            .await
            .map_err(store_error)?
            .map_err(store_error)?;
        debug!("Profile saved");
        Ok(())
    }

    /// Delete the stored profile, so the next read returns defaults
    pub async fn reset(&self) -> Result<()> {
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(PROFILE_KEY))
            .await
            .map_err(store_error)?
            .map_err(store_error)?;
        Ok(())
    }

    #[cfg(test)]
    async fn put_raw(&self, bytes: Vec<u8>) {
        let store = self.store.clone();
        task::spawn_blocking(move || store.insert(PROFILE_KEY, bytes))
            .await
            .unwrap()
            .unwrap();
    }
}
