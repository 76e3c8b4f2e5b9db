use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Rendered in place of any field the extractor could not populate.
pub const NOT_AVAILABLE: &str = "N/A";

/// Candidate assembled from one listing card, not yet deduplicated.
/// Fields stay optional until the persistence boundary renders them.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewJob {
    /// Dedup identity, rendered exactly the way it is stored.
    pub fn identity(&self) -> (String, String, String) {
        (
            render(&self.title).to_owned(),
            render(&self.company).to_owned(),
            render(&self.location).to_owned(),
        )
    }
}

fn render(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(NOT_AVAILABLE)
}

pub fn connect(path: &str) -> Result<Connection> {
    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let conn = Connection::open(path).with_context(|| format!("opening {path}"))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS jobs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            company     TEXT NOT NULL,
            location    TEXT NOT NULL,
            description TEXT NOT NULL,
            category    TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_jobs_identity ON jobs(title, company, location);
        ",
    )?;
    Ok(())
}

// ── Deduplicating persister ──

/// Stage every candidate whose (title, company, location) identity is
/// absent from the store, then commit the batch as one transaction.
/// Identities staged earlier in the same batch also count as present.
/// Returns the number of rows inserted.
pub fn insert_missing(conn: &Connection, candidates: &[NewJob]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;
    {
        let mut exists = tx.prepare(
            "SELECT 1 FROM jobs WHERE title = ?1 AND company = ?2 AND location = ?3 LIMIT 1",
        )?;
        let mut insert = tx.prepare(
            "INSERT INTO jobs (title, company, location, description, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        let mut staged: HashSet<(String, String, String)> = HashSet::new();
        for job in candidates {
            let key = job.identity();
            if staged.contains(&key) {
                continue;
            }
            if exists.exists(rusqlite::params![key.0, key.1, key.2])? {
                continue;
            }
            insert.execute(rusqlite::params![
                key.0,
                key.1,
                key.2,
                render(&job.description),
                render(&job.category),
                job.created_at,
            ])?;
            staged.insert(key);
            inserted += 1;
        }
    }
    tx.commit()?;
    Ok(inserted)
}

pub fn count_jobs(conn: &Connection) -> Result<usize> {
    let total = conn.query_row("SELECT COUNT(*) FROM jobs", [], |r| r.get(0))?;
    Ok(total)
}

// ── Tests ──
