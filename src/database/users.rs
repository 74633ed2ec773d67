//! User store.
//!
//! One record per Telegram user ID, written on the first qualifying message
//! and never touched again. There is no read path; the collection exists so
//! the operator knows who has used the bot.

use anyhow::Result;
use mongodb::bson::{doc, DateTime};
use mongodb::options::UpdateOptions;
use mongodb::Collection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Database;

/// A single known user of the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: i64,
    pub first_seen: DateTime,
}

/// Repository over the `users` collection.
#[derive(Clone)]
pub struct UserRepo {
    collection: Collection<UserRecord>,
}

impl UserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    /// Record a user, inserting at most one document per ID.
    ///
    /// `$setOnInsert` with upsert makes this idempotent: repeated calls with
    /// the same ID leave exactly one record, and `first_seen` keeps its
    /// original value.
    pub async fn upsert(&self, user_id: u64) -> Result<()> {
        let filter = doc! { "user_id": user_id as i64 };
        let update = doc! {
            "$setOnInsert": {
                "user_id": user_id as i64,
                "first_seen": DateTime::now(),
            }
        };
        let options = UpdateOptions::builder().upsert(true).build();

        self.collection
            .update_one(filter, update)
            .with_options(options)
            .await?;

        debug!("Upserted user {}", user_id);
        Ok(())
    }
}
