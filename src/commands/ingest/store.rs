use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Transaction, params};

use crate::transcript::{BillReference, EnrichedStatement};
use crate::util::now_utc_string;

use super::DB_SCHEMA_VERSION;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct StoreStats {
    pub statements_inserted: usize,
    pub bill_references_inserted: usize,
}

/// Identifies the sitting a set of statements belongs to.
#[derive(Debug, Clone)]
pub(super) struct SessionKey<'a> {
    pub session_date: &'a str,
    pub title: &'a str,
    pub source_filename: &'a str,
    pub source_sha256: &'a str,
}

pub(super) fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    connection
        .pragma_update(None, "foreign_keys", "ON")
        .context("failed to enable foreign_keys")?;
    Ok(())
}

pub(super) fn ensure_schema(connection: &Connection) -> Result<()> {
    connection
        .execute_batch(
            "
        CREATE TABLE IF NOT EXISTS metadata (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS speakers (
          speaker_id INTEGER PRIMARY KEY,
          name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS sessions (
          session_id INTEGER PRIMARY KEY,
          session_date TEXT NOT NULL,
          title TEXT NOT NULL,
          source_filename TEXT NOT NULL,
          source_sha256 TEXT NOT NULL,
          UNIQUE(session_date, title)
        );

        CREATE TABLE IF NOT EXISTS statements (
          statement_id INTEGER PRIMARY KEY,
          session_id INTEGER NOT NULL,
          speaker_id INTEGER NOT NULL,
          page_number INTEGER,
          start_offset INTEGER NOT NULL,
          end_offset INTEGER NOT NULL,
          text TEXT NOT NULL,
          confidence REAL NOT NULL,
          UNIQUE(session_id, page_number, start_offset),
          FOREIGN KEY(session_id) REFERENCES sessions(session_id),
          FOREIGN KEY(speaker_id) REFERENCES speakers(speaker_id)
        );

        CREATE TABLE IF NOT EXISTS bill_references (
          statement_id INTEGER NOT NULL,
          position INTEGER NOT NULL,
          bill_number TEXT,
          bill_year TEXT,
          bill_type TEXT,
          full_matched_text TEXT NOT NULL,
          normalized TEXT NOT NULL,
          PRIMARY KEY (statement_id, position),
          FOREIGN KEY(statement_id) REFERENCES statements(statement_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_statements_speaker ON statements(speaker_id);
        CREATE INDEX IF NOT EXISTS idx_statements_session ON statements(session_id, page_number);
        CREATE INDEX IF NOT EXISTS idx_bill_references_normalized ON bill_references(normalized);
        ",
        )
        .context("failed to initialize transcript schema")?;

    let now = now_utc_string();
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [DB_SCHEMA_VERSION],
    )?;
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_updated_at', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [now],
    )?;

    Ok(())
}

/// Persists one sitting's statements in a single transaction.
///
/// The session's previous statements and their bill references are removed
/// first, so a re-run leaves exactly the statements of the latest run even
/// when offsets or filters changed.
pub(super) fn store_transcript(
    connection: &mut Connection,
    session: &SessionKey<'_>,
    statements: &[EnrichedStatement],
) -> Result<StoreStats> {
    let tx = connection.transaction()?;
    let session_id = get_or_create_session(&tx, session)?;
    clear_session_statements(&tx, session_id)?;

    let mut stats = StoreStats::default();
    for enriched in statements {
        let speaker_id = get_or_create_speaker(&tx, &enriched.statement.speaker_name)?;
        let statement_id = upsert_statement(&tx, session_id, speaker_id, enriched)?;
        stats.statements_inserted += 1;
        stats.bill_references_inserted +=
            insert_bill_references(&tx, statement_id, &enriched.bill_references)?;
    }

    tx.commit()
        .with_context(|| format!("failed to commit session {}", session.session_date))?;
    Ok(stats)
}

fn get_or_create_speaker(tx: &Transaction<'_>, name: &str) -> Result<i64> {
    tx.execute(
        "INSERT INTO speakers(name) VALUES(?1) ON CONFLICT(name) DO NOTHING",
        [name],
    )
    .with_context(|| format!("failed to insert speaker {name}"))?;

    let speaker_id = tx
        .query_row(
            "SELECT speaker_id FROM speakers WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .with_context(|| format!("failed to look up speaker {name}"))?;
    Ok(speaker_id)
}

fn get_or_create_session(tx: &Transaction<'_>, session: &SessionKey<'_>) -> Result<i64> {
    let existing: Option<i64> = tx
        .query_row(
            "SELECT session_id FROM sessions WHERE session_date = ?1 AND title = ?2",
            params![session.session_date, session.title],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(session_id) = existing {
        tx.execute(
            "UPDATE sessions SET source_filename = ?1, source_sha256 = ?2 WHERE session_id = ?3",
            params![session.source_filename, session.source_sha256, session_id],
        )?;
        return Ok(session_id);
    }

    tx.execute(
        "INSERT INTO sessions(session_date, title, source_filename, source_sha256)
         VALUES(?1, ?2, ?3, ?4)",
        params![
            session.session_date,
            session.title,
            session.source_filename,
            session.source_sha256
        ],
    )
    .with_context(|| format!("failed to insert session {}", session.session_date))?;
    Ok(tx.last_insert_rowid())
}

fn upsert_statement(
    tx: &Transaction<'_>,
    session_id: i64,
    speaker_id: i64,
    enriched: &EnrichedStatement,
) -> Result<i64> {
    let statement = &enriched.statement;
    let start_offset = i64::try_from(statement.start_offset)?;
    let end_offset = i64::try_from(statement.end_offset)?;

    let statement_id = tx
        .query_row(
            "INSERT INTO statements(
               session_id, speaker_id, page_number, start_offset, end_offset, text, confidence
             ) VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(session_id, page_number, start_offset) DO UPDATE SET
               speaker_id=excluded.speaker_id,
               end_offset=excluded.end_offset,
               text=excluded.text,
               confidence=excluded.confidence
             RETURNING statement_id",
            params![
                session_id,
                speaker_id,
                statement.page_number,
                start_offset,
                end_offset,
                statement.text,
                f64::from(statement.confidence),
            ],
            |row| row.get(0),
        )
        .with_context(|| {
            format!(
                "failed to upsert statement at page {:?} offset {}",
                statement.page_number, statement.start_offset
            )
        })?;
    Ok(statement_id)
}

// Bill references go first: foreign keys are not enforced on every connection.
fn clear_session_statements(tx: &Transaction<'_>, session_id: i64) -> Result<()> {
    tx.execute(
        "DELETE FROM bill_references WHERE statement_id IN (
           SELECT statement_id FROM statements WHERE session_id = ?1
         )",
        [session_id],
    )
    .with_context(|| format!("failed to clear bill references for session {session_id}"))?;
    tx.execute("DELETE FROM statements WHERE session_id = ?1", [session_id])
        .with_context(|| format!("failed to clear statements for session {session_id}"))?;
    Ok(())
}

fn insert_bill_references(
    tx: &Transaction<'_>,
    statement_id: i64,
    references: &[BillReference],
) -> Result<usize> {
    let mut insert = tx.prepare_cached(
        "INSERT INTO bill_references(
           statement_id, position, bill_number, bill_year, bill_type, full_matched_text, normalized
         ) VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for reference in references {
        insert.execute(params![
            statement_id,
            i64::try_from(reference.position)?,
            reference.bill_number,
            reference.bill_year,
            reference.bill_type,
            reference.full_matched_text,
            reference.normalized,
        ])?;
    }

    Ok(references.len())
}

pub(crate) fn count_rows(connection: &Connection, sql: &str) -> Result<i64> {
    let count = connection.query_row(sql, [], |row| row.get(0))?;
    Ok(count)
}
