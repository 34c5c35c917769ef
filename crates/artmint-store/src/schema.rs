//! Database schema definitions

use rusqlite::Connection;
use tracing::info;

use crate::error::StoreError;

/// Current schema version for migrations
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Creating new database schema v{}", SCHEMA_VERSION);
        create_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    }

    Ok(())
}

/// Get current schema version (0 if not initialized)
fn get_schema_version(conn: &Connection) -> Result<i32, StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
        [],
    )?;

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), StoreError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?)", [version])?;
    Ok(())
}

fn create_tables(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(ASSETS_SCHEMA)?;
    conn.execute_batch(COLLECTIONS_SCHEMA)?;
    conn.execute_batch(INDEXES_SCHEMA)?;
    Ok(())
}

fn migrate_schema(conn: &Connection, _from_version: i32) -> Result<(), StoreError> {
    // Migration steps go here as the schema evolves
    set_schema_version(conn, SCHEMA_VERSION)?;
    Ok(())
}

/// Assets and their append-only provenance ledger.
///
/// The UNIQUE constraint on image_hash is the authoritative uniqueness
/// guarantee for minted content; the application-level lookup is only a
/// fast path in front of it.
const ASSETS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS assets (
    asset_id INTEGER PRIMARY KEY AUTOINCREMENT,
    token_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    prompt TEXT NOT NULL,
    style TEXT NOT NULL,
    image_hash TEXT NOT NULL UNIQUE,
    certificate_hash TEXT NOT NULL,
    image_url TEXT NOT NULL,
    metadata_json TEXT NOT NULL,
    creator_id TEXT,
    current_owner_id TEXT,
    collection_id TEXT,
    network TEXT NOT NULL DEFAULT 'off-chain',
    status TEXT NOT NULL DEFAULT 'created',
    is_verified INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Append-only: rows are inserted at mint (and future transfer) time,
-- never updated or deleted.
CREATE TABLE IF NOT EXISTS transfers (
    transfer_id INTEGER PRIMARY KEY AUTOINCREMENT,
    asset_id INTEGER NOT NULL REFERENCES assets(asset_id),
    to_user_id TEXT NOT NULL,
    transfer_type TEXT NOT NULL,
    transferred_at TEXT NOT NULL
);
"#;

/// Curated collections; featured_order is maintained by the feature-set
/// transaction, not by schema constraints.
const COLLECTIONS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS collections (
    collection_id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    is_featured INTEGER NOT NULL DEFAULT 0,
    featured_order INTEGER,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

const INDEXES_SCHEMA: &str = r#"
CREATE INDEX IF NOT EXISTS idx_assets_creator ON assets(creator_id);
CREATE INDEX IF NOT EXISTS idx_assets_owner ON assets(current_owner_id);
CREATE INDEX IF NOT EXISTS idx_assets_status ON assets(status);
CREATE INDEX IF NOT EXISTS idx_transfers_asset ON transfers(asset_id);
CREATE INDEX IF NOT EXISTS idx_collections_featured ON collections(is_featured, featured_order);
"#;
