//! SQLite-backed video store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::{Channel, SeedReport, StoreError, SubcategoryPlan, VideoRecord, VideoStore};
use crate::seed::{CategorySeed, ChannelSeed};

/// SQLite-backed video store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            -- Curated channel reference data
            CREATE TABLE IF NOT EXISTS channels (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                channel_id TEXT NOT NULL UNIQUE,
                handle TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1
            );

            -- Content buckets and their fetch strategies
            CREATE TABLE IF NOT EXISTS subcategories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                name TEXT NOT NULL,
                strategy TEXT NOT NULL,
                search_query TEXT NOT NULL DEFAULT '',
                order_param TEXT,
                video_duration TEXT,
                max_results INTEGER NOT NULL DEFAULT 20,
                is_active INTEGER NOT NULL DEFAULT 1,
                UNIQUE(category, name)
            );

            CREATE INDEX IF NOT EXISTS idx_subcategories_category ON subcategories(category);

            -- Curated channel assignments per subcategory
            CREATE TABLE IF NOT EXISTS subcategory_channels (
                subcategory_id INTEGER NOT NULL REFERENCES subcategories(id) ON DELETE CASCADE,
                channel_id INTEGER NOT NULL REFERENCES channels(id) ON DELETE CASCADE,
                UNIQUE(subcategory_id, channel_id)
            );

            -- Ingested video metadata (one row per external video ID)
            CREATE TABLE IF NOT EXISTS videos (
                video_id TEXT PRIMARY KEY,
                category TEXT NOT NULL,
                subcategory TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                channel_title TEXT NOT NULL,
                published_at TEXT,
                thumbnail_url TEXT NOT NULL DEFAULT '',
                watch_url TEXT NOT NULL DEFAULT '',
                view_count INTEGER NOT NULL DEFAULT 0,
                ingested_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_videos_bucket ON videos(category, subcategory);
            CREATE INDEX IF NOT EXISTS idx_videos_published ON videos(published_at);
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    /// Load the active curated channels for a subcategory, in assignment order.
    fn load_channels(conn: &Connection, subcategory_id: i64) -> Result<Vec<Channel>, StoreError> {
        let mut stmt = conn
            .prepare(
                "SELECT c.name, c.channel_id, c.handle, c.is_active
                 FROM subcategory_channels sc
                 JOIN channels c ON c.id = sc.channel_id
                 WHERE sc.subcategory_id = ? AND c.is_active = 1
                 ORDER BY sc.rowid",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![subcategory_id], |row| {
                Ok(Channel {
                    name: row.get(0)?,
                    channel_id: row.get(1)?,
                    handle: row.get(2)?,
                    is_active: row.get::<_, i64>(3)? != 0,
                })
            })
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut channels = Vec::new();
        for row in rows {
            channels.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(channels)
    }

    fn row_to_plan(row: &rusqlite::Row) -> rusqlite::Result<(i64, SubcategoryPlan)> {
        let id: i64 = row.get(0)?;
        Ok((
            id,
            SubcategoryPlan {
                category: row.get(1)?,
                name: row.get(2)?,
                strategy: row.get(3)?,
                search_query: row.get(4)?,
                order_param: row.get(5)?,
                video_duration: row.get(6)?,
                max_results: row.get::<_, i64>(7)? as u32,
                channels: Vec::new(), // Loaded separately
            },
        ))
    }

    fn row_to_video(row: &rusqlite::Row) -> rusqlite::Result<VideoRecord> {
        let published_at: Option<String> = row.get(6)?;
        let published_at = published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(VideoRecord {
            video_id: row.get(0)?,
            category: row.get(1)?,
            subcategory: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            channel_title: row.get(5)?,
            published_at,
            thumbnail_url: row.get(7)?,
            watch_url: row.get(8)?,
            view_count: row.get::<_, i64>(9)?.max(0) as u64,
        })
    }
}

const PLAN_COLUMNS: &str =
    "id, category, name, strategy, search_query, order_param, video_duration, max_results";

const VIDEO_COLUMNS: &str = "video_id, category, subcategory, title, description, channel_title, \
     published_at, thumbnail_url, watch_url, view_count";

impl VideoStore for SqliteStore {
    fn seed(
        &self,
        channels: &[ChannelSeed],
        categories: &[CategorySeed],
    ) -> Result<SeedReport, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut report = SeedReport::default();

        for ch in channels {
            conn.execute(
                "INSERT INTO channels (name, channel_id, handle, is_active)
                 VALUES (?, ?, ?, 1)
                 ON CONFLICT(channel_id) DO UPDATE SET
                    name = excluded.name,
                    handle = excluded.handle,
                    is_active = 1",
                params![ch.name, ch.channel_id, ch.handle],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
            report.channels += 1;
        }

        for cat in categories {
            for sub in cat.subcategories {
                conn.execute(
                    "INSERT INTO subcategories
                        (category, name, strategy, search_query, order_param,
                         video_duration, max_results, is_active)
                     VALUES (?, ?, ?, ?, ?, ?, ?, 1)
                     ON CONFLICT(category, name) DO UPDATE SET
                        strategy = excluded.strategy,
                        search_query = excluded.search_query,
                        order_param = excluded.order_param,
                        video_duration = excluded.video_duration,
                        max_results = excluded.max_results,
                        is_active = 1",
                    params![
                        cat.category,
                        sub.name,
                        sub.strategy,
                        sub.search_query,
                        sub.order_param,
                        sub.video_duration,
                        sub.max_results as i64,
                    ],
                )
                .map_err(|e| StoreError::Database(e.to_string()))?;
                report.subcategories += 1;
            }
        }

        // Junction rows are rebuilt wholesale; the seed data is the source
        // of truth for curated assignments.
        conn.execute("DELETE FROM subcategory_channels", [])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        for cat in categories {
            for sub in cat.subcategories {
                for channel_name in sub.channels {
                    let inserted = conn
                        .execute(
                            "INSERT OR IGNORE INTO subcategory_channels
                                (subcategory_id, channel_id)
                             SELECT s.id, c.id
                             FROM subcategories s, channels c
                             WHERE s.category = ? AND s.name = ? AND c.name = ?",
                            params![cat.category, sub.name, channel_name],
                        )
                        .map_err(|e| StoreError::Database(e.to_string()))?;

                    if inserted == 0 {
                        tracing::warn!(
                            channel = channel_name,
                            category = cat.category,
                            subcategory = sub.name,
                            "Seed references unknown channel, skipping link"
                        );
                    } else {
                        report.links += 1;
                    }
                }
            }
        }

        Ok(report)
    }

    fn active_subcategories(&self) -> Result<Vec<SubcategoryPlan>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {PLAN_COLUMNS} FROM subcategories WHERE is_active = 1 ORDER BY id"
            ))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_plan)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut plans = Vec::new();
        for row in rows {
            let (id, mut plan) = row.map_err(|e| StoreError::Database(e.to_string()))?;
            plan.channels = Self::load_channels(&conn, id)?;
            plans.push(plan);
        }
        Ok(plans)
    }

    fn find_subcategory(
        &self,
        category: &str,
        name: &str,
    ) -> Result<Option<SubcategoryPlan>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let result = conn.query_row(
            &format!(
                "SELECT {PLAN_COLUMNS} FROM subcategories
                 WHERE category = ? AND name = ? AND is_active = 1"
            ),
            params![category, name],
            Self::row_to_plan,
        );

        match result {
            Ok((id, mut plan)) => {
                plan.channels = Self::load_channels(&conn, id)?;
                Ok(Some(plan))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Database(e.to_string())),
        }
    }

    fn subcategory_names(&self, category: &str) -> Result<Vec<String>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT name FROM subcategories
                 WHERE category = ? AND is_active = 1
                 ORDER BY id",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![category], |row| row.get::<_, String>(0))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(names)
    }

    fn videos(
        &self,
        category: &str,
        subcategory: &str,
        limit: u32,
    ) -> Result<Vec<VideoRecord>, StoreError> {
        let conn = self.conn.lock().unwrap();

        // "Most Watched" rails (including per-language variants like
        // "Rust - Most Watched") rank by popularity; everything else by recency.
        let order_clause = if subcategory.ends_with("Most Watched") {
            "ORDER BY view_count DESC"
        } else {
            "ORDER BY published_at DESC"
        };

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {VIDEO_COLUMNS} FROM videos
                 WHERE category = ?1 AND subcategory = ?2
                 {order_clause}
                 LIMIT ?3"
            ))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![category, subcategory, limit as i64], Self::row_to_video)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut videos = Vec::new();
        for row in rows {
            videos.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(videos)
    }

    fn upsert_videos(&self, videos: &[VideoRecord]) -> Result<u32, StoreError> {
        let conn = self.conn.lock().unwrap();
        let now_str = Utc::now().to_rfc3339();
        let mut saved = 0;

        for video in videos {
            if video.video_id.is_empty() {
                continue;
            }

            conn.execute(
                "INSERT INTO videos
                    (video_id, category, subcategory, title, description,
                     channel_title, published_at, thumbnail_url, watch_url,
                     view_count, ingested_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(video_id) DO UPDATE SET
                    category = excluded.category,
                    subcategory = excluded.subcategory,
                    title = excluded.title,
                    description = excluded.description,
                    channel_title = excluded.channel_title,
                    published_at = excluded.published_at,
                    thumbnail_url = excluded.thumbnail_url,
                    watch_url = excluded.watch_url,
                    view_count = excluded.view_count,
                    ingested_at = excluded.ingested_at",
                params![
                    video.video_id,
                    video.category,
                    video.subcategory,
                    video.title,
                    video.description,
                    video.channel_title,
                    video.published_at.map(|dt| dt.to_rfc3339()),
                    video.thumbnail_url,
                    video.watch_url,
                    video.view_count as i64,
                    now_str,
                ],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
            saved += 1;
        }

        Ok(saved)
    }

    fn ping(&self) -> bool {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT 1", [], |_| Ok(())).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SubcategorySeed;
    use chrono::TimeZone;

    fn test_channels() -> Vec<ChannelSeed> {
        vec![
            ChannelSeed {
                name: "NeetCode",
                channel_id: "UC_neetcode",
                handle: "@NeetCodeio",
            },
            ChannelSeed {
                name: "freeCodeCamp.org",
                channel_id: "UC_fcc",
                handle: "@freecodecamp",
            },
        ]
    }

    fn test_categories() -> Vec<CategorySeed> {
        vec![CategorySeed {
            category: "dsa",
            subcategories: &[
                SubcategorySeed {
                    name: "Most Watched",
                    strategy: "POPULARITY",
                    search_query: "data structures OR algorithms tutorial",
                    order_param: None,
                    video_duration: None,
                    max_results: 20,
                    channels: &[],
                },
                SubcategorySeed {
                    name: "Latest Uploads",
                    strategy: "RECENCY_CURATED",
                    search_query: "data structures OR algorithms",
                    order_param: None,
                    video_duration: None,
                    max_results: 20,
                    channels: &["NeetCode", "freeCodeCamp.org"],
                },
            ],
        }]
    }

    fn seeded_store() -> SqliteStore {
        let store = SqliteStore::in_memory().unwrap();
        store.seed(&test_channels(), &test_categories()).unwrap();
        store
    }

    fn test_video(id: &str, subcategory: &str, view_count: u64, day: u32) -> VideoRecord {
        VideoRecord {
            video_id: id.to_string(),
            category: "dsa".to_string(),
            subcategory: subcategory.to_string(),
            title: format!("Video {id}"),
            description: "desc".to_string(),
            channel_title: "NeetCode".to_string(),
            published_at: Some(Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()),
            thumbnail_url: format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg"),
            watch_url: format!("https://www.youtube.com/watch?v={id}"),
            view_count,
        }
    }

    #[test]
    fn test_seed_populates_tables() {
        let store = seeded_store();
        let plans = store.active_subcategories().unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].name, "Most Watched");
        assert!(plans[0].channels.is_empty());
        assert_eq!(plans[1].channels.len(), 2);
        assert_eq!(plans[1].channels[0].name, "NeetCode");
    }

    #[test]
    fn test_seed_is_idempotent() {
        let store = seeded_store();
        let report = store.seed(&test_channels(), &test_categories()).unwrap();
        assert_eq!(report.channels, 2);
        assert_eq!(report.subcategories, 2);
        assert_eq!(report.links, 2);

        let plans = store.active_subcategories().unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[1].channels.len(), 2);
    }

    #[test]
    fn test_seed_skips_unknown_channel_reference() {
        let store = SqliteStore::in_memory().unwrap();
        let categories = vec![CategorySeed {
            category: "dsa",
            subcategories: &[SubcategorySeed {
                name: "Latest Uploads",
                strategy: "RECENCY_CURATED",
                search_query: "",
                order_param: None,
                video_duration: None,
                max_results: 20,
                channels: &["Nobody"],
            }],
        }];
        let report = store.seed(&test_channels(), &categories).unwrap();
        assert_eq!(report.links, 0);
    }

    #[test]
    fn test_find_subcategory() {
        let store = seeded_store();
        let plan = store.find_subcategory("dsa", "Latest Uploads").unwrap();
        assert!(plan.is_some());
        assert_eq!(plan.unwrap().strategy, "RECENCY_CURATED");

        let missing = store.find_subcategory("dsa", "Nope").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_subcategory_names() {
        let store = seeded_store();
        let names = store.subcategory_names("dsa").unwrap();
        assert_eq!(names, vec!["Most Watched", "Latest Uploads"]);

        let empty = store.subcategory_names("unknown").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let store = seeded_store();
        let videos = vec![
            test_video("a1", "Most Watched", 100, 1),
            test_video("a2", "Most Watched", 200, 2),
        ];

        assert_eq!(store.upsert_videos(&videos).unwrap(), 2);
        assert_eq!(store.upsert_videos(&videos).unwrap(), 2);

        let stored = store.videos("dsa", "Most Watched", 50).unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn test_upsert_second_pass_wins() {
        let store = seeded_store();
        store
            .upsert_videos(&[test_video("a1", "Most Watched", 100, 1)])
            .unwrap();

        let mut updated = test_video("a1", "Most Watched", 999, 1);
        updated.title = "Updated title".to_string();
        store.upsert_videos(&[updated]).unwrap();

        let stored = store.videos("dsa", "Most Watched", 50).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Updated title");
        assert_eq!(stored[0].view_count, 999);
    }

    #[test]
    fn test_upsert_skips_empty_video_id() {
        let store = seeded_store();
        let mut video = test_video("", "Most Watched", 1, 1);
        video.video_id = String::new();
        assert_eq!(store.upsert_videos(&[video]).unwrap(), 0);
    }

    #[test]
    fn test_videos_most_watched_ordering() {
        let store = seeded_store();
        store
            .upsert_videos(&[
                test_video("low", "Most Watched", 10, 3),
                test_video("high", "Most Watched", 1000, 1),
                test_video("mid", "Most Watched", 100, 2),
            ])
            .unwrap();

        let videos = store.videos("dsa", "Most Watched", 50).unwrap();
        let ids: Vec<&str> = videos.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_videos_recency_ordering() {
        let store = seeded_store();
        store
            .upsert_videos(&[
                test_video("old", "Latest Uploads", 1000, 1),
                test_video("new", "Latest Uploads", 10, 20),
            ])
            .unwrap();

        let videos = store.videos("dsa", "Latest Uploads", 50).unwrap();
        let ids: Vec<&str> = videos.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn test_videos_respects_limit() {
        let store = seeded_store();
        let videos: Vec<VideoRecord> = (0..60)
            .map(|i| test_video(&format!("v{i}"), "Most Watched", i, 1 + (i % 28) as u32))
            .collect();
        store.upsert_videos(&videos).unwrap();

        let rows = store.videos("dsa", "Most Watched", 50).unwrap();
        assert_eq!(rows.len(), 50);
    }

    #[test]
    fn test_ping() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.ping());
    }
}
