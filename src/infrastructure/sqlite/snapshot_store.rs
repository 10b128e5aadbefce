use crate::domain::entities::sample::Sample;
use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_store::{CategoryKey, Snapshot, SnapshotStore};
use crate::domain::values::category_kind::CategoryKind;
use crate::domain::values::lane::Lane;
use crate::infrastructure::sqlite::migrations::run_migrations;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

const SAMPLE_COLS: &str = "id, kind, category, lane, text, word_count, seq, created_at";

/// A sample row this build cannot interpret. It stays on disk untouched.
#[derive(Debug)]
struct UnreadableRow {
    id: Option<String>,
    reason: String,
}

impl UnreadableRow {
    fn new(id: Option<&str>, reason: impl ToString) -> Self {
        Self {
            id: id.map(str::to_string),
            reason: reason.to_string(),
        }
    }
}

pub struct SqliteSnapshotStore {
    conn: Mutex<Connection>,
}

impl SqliteSnapshotStore {
    /// Open (or create) the database at `db_path`; `":memory:"` works too.
    pub fn open(db_path: &str) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        if db_path != ":memory:" {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        }
        Self::new(conn)
    }

    pub fn new(conn: Connection) -> Result<Self, DomainError> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn row_to_sample(row: &rusqlite::Row) -> Result<Sample, UnreadableRow> {
        let id: String = row.get(0).map_err(|e| UnreadableRow::new(None, e))?;
        let field = |e: rusqlite::Error| UnreadableRow::new(Some(&id), e);
        let kind_str: String = row.get(1).map_err(field)?;
        let category: String = row.get(2).map_err(field)?;
        let lane_str: String = row.get(3).map_err(field)?;
        let text: String = row.get(4).map_err(field)?;
        let word_count: i64 = row.get(5).map_err(field)?;
        let seq: i64 = row.get(6).map_err(field)?;
        let created_str: String = row.get(7).map_err(field)?;

        let kind: CategoryKind = kind_str
            .parse()
            .map_err(|e| UnreadableRow::new(Some(&id), e))?;
        let lane: Lane = lane_str
            .parse()
            .map_err(|e| UnreadableRow::new(Some(&id), e))?;

        let created_at = match DateTime::parse_from_rfc3339(&created_str) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(e) => {
                warn!(id = %id, created_at = %created_str, error = %e, "bad sample timestamp, using now");
                Utc::now()
            }
        };

        Ok(Sample {
            id,
            kind,
            category,
            lane,
            text,
            word_count: word_count.max(0) as usize,
            seq: seq.max(0) as u64,
            created_at,
        })
    }

    /// Ids of readable rows not in `keep`. Unreadable rows are never listed,
    /// so a save cannot remove what a load skipped.
    fn stale_ids(conn: &Connection, keep: &HashSet<&str>) -> Result<Vec<String>, DomainError> {
        let mut stmt = conn.prepare(&format!("SELECT {SAMPLE_COLS} FROM samples"))?;
        let rows = stmt.query_map([], |row| Ok(Self::row_to_sample(row)))?;

        let mut stale = Vec::new();
        for row in rows {
            if let Ok(sample) = row? {
                if !keep.contains(sample.id.as_str()) {
                    stale.push(sample.id);
                }
            }
        }
        Ok(stale)
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self) -> Result<Snapshot, DomainError> {
        let conn = self.lock()?;

        let mut categories = Vec::new();
        let mut stmt = conn.prepare("SELECT kind, name FROM categories ORDER BY kind, name")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
        for row in rows {
            let (kind, name) = row?;
            match kind.parse() {
                Ok(kind) => categories.push(CategoryKey { kind, name }),
                Err(_) => warn!(kind = %kind, name = %name, "skipping category with unknown kind"),
            }
        }

        let mut samples = Vec::new();
        let mut stmt = conn.prepare(&format!("SELECT {SAMPLE_COLS} FROM samples ORDER BY seq"))?;
        let rows = stmt.query_map([], |row| Ok(Self::row_to_sample(row)))?;
        for row in rows {
            match row? {
                Ok(sample) => samples.push(sample),
                Err(skipped) => warn!(
                    id = skipped.id.as_deref().unwrap_or("?"),
                    error = %skipped.reason,
                    "skipping unreadable sample row"
                ),
            }
        }

        Ok(Snapshot {
            categories,
            samples,
        })
    }

    /// Upserts every sample in `snapshot` and removes readable rows that are
    /// no longer in it. Rows and categories this build cannot read are kept.
    fn save(&self, snapshot: &Snapshot) -> Result<(), DomainError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let known_kinds: Vec<String> = CategoryKind::ALL.iter().map(|k| k.to_string()).collect();
        tx.execute(
            "DELETE FROM categories WHERE kind IN (?1, ?2)",
            params![known_kinds[0], known_kinds[1]],
        )?;

        {
            let mut insert_category =
                tx.prepare("INSERT OR IGNORE INTO categories (kind, name) VALUES (?1, ?2)")?;
            for key in &snapshot.categories {
                insert_category.execute(params![key.kind.to_string(), key.name])?;
            }

            let mut upsert_sample = tx.prepare(&format!(
                "INSERT OR REPLACE INTO samples ({SAMPLE_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            ))?;
            for sample in &snapshot.samples {
                insert_category.execute(params![sample.kind.to_string(), sample.category])?;
                upsert_sample
                    .execute(params![
                        sample.id,
                        sample.kind.to_string(),
                        sample.category,
                        sample.lane.as_str(),
                        sample.text,
                        sample.word_count as i64,
                        sample.seq as i64,
                        sample.created_at.to_rfc3339(),
                    ])
                    .map_err(|e| DomainError::Database(format!("Failed to save sample: {e}")))?;
            }
        }

        let keep: HashSet<&str> = snapshot.samples.iter().map(|s| s.id.as_str()).collect();
        let stale = Self::stale_ids(&tx, &keep)?;
        {
            let mut delete_sample = tx.prepare("DELETE FROM samples WHERE id = ?1")?;
            for id in &stale {
                delete_sample.execute(params![id])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load_preserves_everything() {
        let store = SqliteSnapshotStore::open(":memory:").unwrap();
        let mut first = Sample::new(
            CategoryKind::Voice,
            "Narrator".into(),
            Lane::Interiority,
            "She wondered if the door was locked.".into(),
        );
        first.seq = 4;
        let mut second = Sample::new(
            CategoryKind::StyleBank,
            "Noir".into(),
            Lane::Action,
            "He hit the floor running.".into(),
        );
        second.seq = 9;

        let snapshot = Snapshot {
            categories: vec![
                CategoryKey {
                    kind: CategoryKind::Voice,
                    name: "Narrator".into(),
                },
                CategoryKey {
                    kind: CategoryKind::StyleBank,
                    name: "Empty".into(),
                },
            ],
            samples: vec![second.clone(), first.clone()],
        };
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.samples.len(), 2);
        assert_eq!(loaded.samples[0].id, first.id);
        assert_eq!(loaded.samples[0].lane, Lane::Interiority);
        assert_eq!(loaded.samples[0].word_count, 7);
        assert_eq!(loaded.samples[1].seq, 9);
        assert!(loaded.categories.contains(&CategoryKey {
            kind: CategoryKind::StyleBank,
            name: "Empty".into(),
        }));
        // Implied by a sample even though it was not listed.
        assert!(loaded.categories.contains(&CategoryKey {
            kind: CategoryKind::StyleBank,
            name: "Noir".into(),
        }));
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let store = SqliteSnapshotStore::open(":memory:").unwrap();
        let sample = Sample::new(CategoryKind::Voice, "V".into(), Lane::Dialogue, "hi there".into());
        store
            .save(&Snapshot {
                categories: vec![],
                samples: vec![sample],
            })
            .unwrap();
        store.save(&Snapshot::default()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_lane_rows_are_skipped() {
        let store = SqliteSnapshotStore::open(":memory:").unwrap();
        {
            let conn = store.lock().unwrap();
            conn.execute(
                &format!("INSERT INTO samples ({SAMPLE_COLS}) VALUES ('x', 'voice', 'V', 'Monologue', 'text', 1, 0, '2024-01-01T00:00:00Z')"),
                [],
            )
            .unwrap();
        }
        assert!(store.load().unwrap().samples.is_empty());
    }

    #[test]
    fn test_save_keeps_rows_it_cannot_read() {
        let store = SqliteSnapshotStore::open(":memory:").unwrap();
        {
            let conn = store.lock().unwrap();
            conn.execute(
                &format!("INSERT INTO samples ({SAMPLE_COLS}) VALUES ('lane', 'voice', 'V', 'Monologue', 'text', 1, 0, '2024-01-01T00:00:00Z')"),
                [],
            )
            .unwrap();
            conn.execute(
                &format!("INSERT INTO samples ({SAMPLE_COLS}) VALUES ('words', 'voice', 'V', 'Dialogue', 'text', 'many', 1, '2024-01-01T00:00:00Z')"),
                [],
            )
            .unwrap();
            conn.execute("INSERT INTO categories (kind, name) VALUES ('chapter', 'One')", [])
                .unwrap();
        }

        let loaded = store.load().unwrap();
        assert!(loaded.samples.is_empty());
        assert!(loaded.categories.is_empty());

        let sample = Sample::new(CategoryKind::Voice, "V".into(), Lane::Dialogue, "hello".into());
        store
            .save(&Snapshot {
                categories: vec![],
                samples: vec![sample],
            })
            .unwrap();

        let conn = store.lock().unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM samples", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 3);
        let categories: i64 = conn
            .query_row("SELECT COUNT(*) FROM categories WHERE kind = 'chapter'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(categories, 1);
    }

    #[test]
    fn test_bad_timestamp_still_loads() {
        let store = SqliteSnapshotStore::open(":memory:").unwrap();
        {
            let conn = store.lock().unwrap();
            conn.execute(
                &format!("INSERT INTO samples ({SAMPLE_COLS}) VALUES ('t', 'voice', 'V', 'Action', 'she ran', 2, 0, 'yesterday')"),
                [],
            )
            .unwrap();
        }
        let loaded = store.load().unwrap();
        assert_eq!(loaded.samples.len(), 1);
        assert_eq!(loaded.samples[0].text, "she ran");
    }
}
