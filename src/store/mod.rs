//! Wall store - users, blocks, posts and auth tokens.
//!
//! The whole wall lives in one versioned JSON document on disk behind an
//! `Arc<RwLock>`. Mutations persist the document before returning.
//! Stepwise migrations run at load time and bump the document version.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Current on-disk document version.
pub const STORE_VERSION: u32 = 2;

/// A member allowed to post. Unknown senders are dropped at the webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A container for the posts of one scheduling period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// One post, body already rendered to HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub block_id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Post joined with its author's name, for page rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    pub post: Post,
    pub author: String,
}

/// Block joined with its posts, for the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    pub block: Block,
    pub posts: Vec<PostView>,
}

/// Entity counts for the status endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StoreCounts {
    pub users: usize,
    pub blocks: usize,
    pub posts: usize,
}

/// The on-disk document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WallData {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    next_id: i64,
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    blocks: Vec<Block>,
    #[serde(default)]
    posts: Vec<Post>,
    #[serde(default)]
    tokens: Vec<String>,
}

impl WallData {
    fn alloc_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// One migration step; `MIGRATIONS[n]` moves a document from version n to n+1.
struct Migration {
    name: &'static str,
    up: fn(&mut WallData),
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "init id allocation",
        up: |data| {
            let max_id = data
                .users
                .iter()
                .map(|u| u.id)
                .chain(data.blocks.iter().map(|b| b.id))
                .chain(data.posts.iter().map(|p| p.id))
                .max()
                .unwrap_or(0);
            if data.next_id <= max_id {
                data.next_id = max_id + 1;
            }
        },
    },
    Migration {
        name: "add user created_at timestamps",
        up: |data| {
            let now = Utc::now();
            for user in &mut data.users {
                if user.created_at.is_none() {
                    user.created_at = Some(now);
                }
            }
        },
    },
];

/// Run pending migrations. Returns true when anything changed.
fn migrate(data: &mut WallData) -> bool {
    let mut changed = false;
    while (data.version as usize) < MIGRATIONS.len() {
        let migration = &MIGRATIONS[data.version as usize];
        (migration.up)(data);
        data.version += 1;
        changed = true;
        tracing::info!("Applied migration: {}", migration.name);
    }
    changed
}

/// Wall store handle; cheap to clone, shared across handlers.
#[derive(Clone)]
pub struct WallStore {
    data: Arc<RwLock<WallData>>,
    data_dir: PathBuf,
}

impl WallStore {
    /// Open the store in `data_dir`, creating and migrating as needed.
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let path = data_dir.join("wall.json");
        let mut data = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            WallData {
                version: STORE_VERSION,
                next_id: 1,
                ..WallData::default()
            }
        };

        if migrate(&mut data) || !path.exists() {
            persist_to(&path, &data)?;
        }

        let store = Self {
            data: Arc::new(RwLock::new(data)),
            data_dir,
        };
        fs::create_dir_all(store.images_dir()).context("creating images directory")?;
        Ok(store)
    }

    /// Directory for images extracted from incoming email.
    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }

    fn persist(&self, data: &WallData) -> Result<()> {
        persist_to(&self.data_dir.join("wall.json"), data)
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Insert a member, or update the name of an existing one (keyed by email).
    pub async fn upsert_user(&self, name: &str, email: &str) -> Result<User> {
        let mut data = self.data.write().await;
        if let Some(user) = data.users.iter_mut().find(|u| u.email == email) {
            user.name = name.to_string();
            let user = user.clone();
            self.persist(&data)?;
            return Ok(user);
        }
        let user = User {
            id: data.alloc_id(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Some(Utc::now()),
        };
        data.users.push(user.clone());
        self.persist(&data)?;
        Ok(user)
    }

    pub async fn user_by_email(&self, email: &str) -> Option<User> {
        let data = self.data.read().await;
        data.users.iter().find(|u| u.email == email).cloned()
    }

    // =========================================================================
    // Auth tokens
    // =========================================================================

    pub async fn insert_token(&self, token: &str) -> Result<()> {
        let mut data = self.data.write().await;
        data.tokens.push(token.to_string());
        self.persist(&data)
    }

    pub async fn token_valid(&self, token: &str) -> bool {
        let data = self.data.read().await;
        data.tokens.iter().any(|t| t == token)
    }

    // =========================================================================
    // Blocks and posts
    // =========================================================================

    /// The most recently opened block, if any.
    pub async fn latest_block(&self) -> Option<Block> {
        let data = self.data.read().await;
        data.blocks.iter().max_by_key(|b| b.created_at).cloned()
    }

    pub async fn create_block(&self, title: &str, created_at: DateTime<Utc>) -> Result<Block> {
        let mut data = self.data.write().await;
        let block = Block {
            id: data.alloc_id(),
            title: title.to_string(),
            created_at,
        };
        data.blocks.push(block.clone());
        self.persist(&data)?;
        Ok(block)
    }

    pub async fn add_post(
        &self,
        block_id: i64,
        user_id: i64,
        title: &str,
        body: &str,
    ) -> Result<Post> {
        let mut data = self.data.write().await;
        let post = Post {
            id: data.alloc_id(),
            block_id,
            user_id,
            title: title.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
        };
        data.posts.push(post.clone());
        self.persist(&data)?;
        Ok(post)
    }

    /// A single post with its author's name.
    pub async fn post_view(&self, id: i64) -> Option<PostView> {
        let data = self.data.read().await;
        let post = data.posts.iter().find(|p| p.id == id)?.clone();
        let author = author_name(&data, post.user_id);
        Some(PostView { post, author })
    }

    /// Blocks visible at the given release horizon, newest first, each with
    /// its posts.
    pub async fn released_blocks(&self, horizon: DateTime<Utc>) -> Vec<BlockView> {
        let data = self.data.read().await;
        let mut blocks: Vec<&Block> = data
            .blocks
            .iter()
            .filter(|b| b.created_at <= horizon)
            .collect();
        blocks.sort_by(|a, b| b.id.cmp(&a.id));

        blocks
            .into_iter()
            .map(|block| BlockView {
                block: block.clone(),
                posts: data
                    .posts
                    .iter()
                    .filter(|p| p.block_id == block.id)
                    .map(|p| PostView {
                        post: p.clone(),
                        author: author_name(&data, p.user_id),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Posts sitting in blocks that have not been released yet.
    pub async fn queued_posts(&self, horizon: DateTime<Utc>) -> usize {
        let data = self.data.read().await;
        data.posts
            .iter()
            .filter(|p| {
                data.blocks
                    .iter()
                    .any(|b| b.id == p.block_id && b.created_at > horizon)
            })
            .count()
    }

    pub async fn counts(&self) -> StoreCounts {
        let data = self.data.read().await;
        StoreCounts {
            users: data.users.len(),
            blocks: data.blocks.len(),
            posts: data.posts.len(),
        }
    }
}

fn persist_to(path: &std::path::Path, data: &WallData) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

fn author_name(data: &WallData, user_id: i64) -> String {
    data.users
        .iter()
        .find(|u| u.id == user_id)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| "(unknown)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn temp_store() -> (tempfile::TempDir, WallStore) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = WallStore::open(dir.path().to_path_buf()).expect("open store");
        (dir, store)
    }

    #[tokio::test]
    async fn fresh_store_starts_at_current_version_and_persists() {
        let (dir, store) = temp_store();
        store.upsert_user("Ada", "ada@example.com").await.unwrap();

        // Reopen from disk
        let reopened = WallStore::open(dir.path().to_path_buf()).expect("reopen");
        let user = reopened.user_by_email("ada@example.com").await.unwrap();
        assert_eq!(user.name, "Ada");
        assert!(user.created_at.is_some());
    }

    #[tokio::test]
    async fn upsert_updates_name_without_duplicating() {
        let (_dir, store) = temp_store();
        let first = store.upsert_user("Ada", "ada@example.com").await.unwrap();
        let second = store
            .upsert_user("Ada Lovelace", "ada@example.com")
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.counts().await.users, 1);
        assert_eq!(
            store.user_by_email("ada@example.com").await.unwrap().name,
            "Ada Lovelace"
        );
    }

    #[tokio::test]
    async fn tokens_round_trip() {
        let (_dir, store) = temp_store();
        store.insert_token("abc123").await.unwrap();
        assert!(store.token_valid("abc123").await);
        assert!(!store.token_valid("other").await);
    }

    #[tokio::test]
    async fn release_horizon_filters_blocks_and_counts_queue() {
        let (_dir, store) = temp_store();
        let user = store.upsert_user("Ada", "ada@example.com").await.unwrap();
        let now = Utc::now();

        let old = store
            .create_block("Old", now - Duration::hours(48))
            .await
            .unwrap();
        let fresh = store.create_block("Fresh", now).await.unwrap();
        store
            .add_post(old.id, user.id, "released", "<p>hi</p>")
            .await
            .unwrap();
        store
            .add_post(fresh.id, user.id, "queued", "<p>soon</p>")
            .await
            .unwrap();

        let horizon = now - Duration::hours(32);
        let released = store.released_blocks(horizon).await;
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].block.title, "Old");
        assert_eq!(released[0].posts.len(), 1);
        assert_eq!(released[0].posts[0].author, "Ada");
        assert_eq!(store.queued_posts(horizon).await, 1);
    }

    #[tokio::test]
    async fn released_blocks_are_newest_first() {
        let (_dir, store) = temp_store();
        let now = Utc::now();
        store
            .create_block("first", now - Duration::hours(96))
            .await
            .unwrap();
        store
            .create_block("second", now - Duration::hours(72))
            .await
            .unwrap();

        let blocks = store.released_blocks(now).await;
        assert_eq!(blocks[0].block.title, "second");
        assert_eq!(blocks[1].block.title, "first");
    }

    #[tokio::test]
    async fn legacy_document_is_migrated() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let legacy = serde_json::json!({
            "users": [{"id": 3, "name": "Ada", "email": "ada@example.com"}],
            "blocks": [],
            "posts": [],
            "tokens": []
        });
        std::fs::write(
            dir.path().join("wall.json"),
            serde_json::to_string_pretty(&legacy).unwrap(),
        )
        .unwrap();

        let store = WallStore::open(dir.path().to_path_buf()).expect("open legacy");
        let user = store.user_by_email("ada@example.com").await.unwrap();
        assert!(user.created_at.is_some(), "migration backfills created_at");

        // Ids allocated after migration do not collide with legacy ids
        let fresh = store.upsert_user("Obi", "obi@example.com").await.unwrap();
        assert!(fresh.id > 3);

        // Version is persisted
        let content = std::fs::read_to_string(dir.path().join("wall.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["version"], STORE_VERSION);
    }
}
