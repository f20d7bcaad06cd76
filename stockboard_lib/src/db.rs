//! SQLite storage for scraped news rows and per-domain refresh checkpoints.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::scrape::NewsItem;

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("timestamp parse error: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// Bumped whenever the schema changes; `init` stamps it via `user_version`.
const SCHEMA_VERSION: i32 = 1;

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    pub fn init(&self) -> Result<(), DbError> {
        let version: i32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        let schema = include_str!("../../schema/sqlite.sql");
        self.conn.execute_batch(schema)?;

        if version < SCHEMA_VERSION {
            self.conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }
        Ok(())
    }

    /// Replaces every stored row for `domain` and stamps its checkpoint, all
    /// inside one transaction: a crash mid-replace can never leave the domain
    /// half-written or empty.
    pub fn replace_news(
        &mut self,
        domain: &str,
        items: &[NewsItem],
        now: DateTime<Utc>,
    ) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM news_items WHERE domain = ?1", params![domain])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO news_items (domain, position, title, link, source, published_label)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for (position, item) in items.iter().enumerate() {
                stmt.execute(params![
                    domain,
                    position as i64,
                    item.title,
                    item.link,
                    item.source,
                    item.published_label,
                ])?;
            }
        }
        tx.execute(
            "INSERT INTO scrape_checkpoints (domain, last_scraped_at) VALUES (?1, ?2)
             ON CONFLICT(domain) DO UPDATE SET last_scraped_at = excluded.last_scraped_at",
            params![domain, now.to_rfc3339()],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Stored rows for `domain`, in scrape order.
    pub fn news_for(&self, domain: &str) -> Result<Vec<NewsItem>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT title, link, source, published_label FROM news_items
             WHERE domain = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![domain], |row| {
            Ok(NewsItem {
                title: row.get(0)?,
                link: row.get(1)?,
                source: row.get(2)?,
                published_label: row.get(3)?,
            })
        })?;
        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// When `domain` was last refreshed successfully, if ever.
    pub fn checkpoint(&self, domain: &str) -> Result<Option<DateTime<Utc>>, DbError> {
        let stamp: Option<String> = self
            .conn
            .query_row(
                "SELECT last_scraped_at FROM scrape_checkpoints WHERE domain = ?1",
                params![domain],
                |row| row.get(0),
            )
            .optional()?;
        match stamp {
            Some(stamp) => Ok(Some(
                DateTime::parse_from_rfc3339(&stamp)?.with_timezone(&Utc),
            )),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn item(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            link: format!("https://n.news.naver.com/mnews/article/001/{}", title.len()),
            source: "연합뉴스".to_string(),
            published_label: "2024-01-02 16:30".to_string(),
        }
    }

    fn open_db() -> Db {
        let db = Db::open_in_memory().unwrap();
        db.init().unwrap();
        db
    }

    fn user_version(db: &Db) -> i32 {
        db.conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn init_stamps_schema_version() {
        let db = Db::open_in_memory().unwrap();
        assert_eq!(user_version(&db), 0);
        db.init().unwrap();
        assert_eq!(user_version(&db), SCHEMA_VERSION);
    }

    #[test]
    fn init_is_idempotent() {
        let db = open_db();
        db.init().unwrap();
        assert_eq!(user_version(&db), SCHEMA_VERSION);
    }

    #[test]
    fn replace_then_read_round_trips_in_order() {
        let mut db = open_db();
        let items = vec![item("첫번째"), item("두번째"), item("세번째")];
        db.replace_news("insights", &items, Utc::now()).unwrap();

        let stored = db.news_for("insights").unwrap();
        assert_eq!(stored, items);
    }

    #[test]
    fn replace_is_wholesale_per_domain() {
        let mut db = open_db();
        db.replace_news("insights", &[item("옛날 기사")], Utc::now())
            .unwrap();
        db.replace_news("news:005930", &[item("다른 도메인")], Utc::now())
            .unwrap();

        let fresh = vec![item("새 기사 하나"), item("새 기사 둘")];
        db.replace_news("insights", &fresh, Utc::now()).unwrap();

        assert_eq!(db.news_for("insights").unwrap(), fresh);
        // The other domain is untouched.
        assert_eq!(db.news_for("news:005930").unwrap().len(), 1);
    }

    #[test]
    fn checkpoint_absent_until_first_replace() {
        let mut db = open_db();
        assert!(db.checkpoint("insights").unwrap().is_none());

        let stamp = Utc::now() - Duration::minutes(5);
        db.replace_news("insights", &[item("기사")], stamp).unwrap();

        let stored = db.checkpoint("insights").unwrap().unwrap();
        assert_eq!(stored.timestamp(), stamp.timestamp());
    }

    #[test]
    fn empty_domain_reads_as_empty_vec() {
        let db = open_db();
        assert!(db.news_for("news:000660").unwrap().is_empty());
    }
}
