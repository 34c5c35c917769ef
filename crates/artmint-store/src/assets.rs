//! Asset persistence: the mint insert, the uniqueness lookup, and
//! read-only projections
//!
//! The mint insert is the atomic unit of the whole pipeline: the asset
//! row and (when a creator is known) its single `mint` provenance row
//! commit together or not at all.

use artmint_core::{ContentHash, TokenId};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Row};
use tracing::debug;

use crate::db::MarketDb;
use crate::error::StoreError;

/// Transfer type written by the mint transaction; the only type this
/// core ever produces.
pub const TRANSFER_TYPE_MINT: &str = "mint";

/// A persisted asset row
#[derive(Debug, Clone)]
pub struct AssetRecord {
    pub asset_id: i64,
    pub token_id: TokenId,
    pub name: String,
    pub description: String,
    pub prompt: String,
    pub style: String,
    /// Hex SHA-256 of the image bytes; unique across all assets
    pub image_hash: String,
    pub certificate_hash: String,
    pub image_url: String,
    pub metadata_json: String,
    pub creator_id: Option<String>,
    pub current_owner_id: Option<String>,
    pub collection_id: Option<String>,
    pub network: String,
    pub status: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One append-only provenance entry
#[derive(Debug, Clone)]
pub struct TransferRecord {
    pub transfer_id: i64,
    pub asset_id: i64,
    pub to_user_id: String,
    pub transfer_type: String,
    pub transferred_at: DateTime<Utc>,
}

/// Payload for the mint insert
#[derive(Debug, Clone)]
pub struct NewAsset<'a> {
    pub token_id: TokenId,
    pub name: &'a str,
    pub description: &'a str,
    pub prompt: &'a str,
    pub style: &'a str,
    pub image_hash: &'a ContentHash,
    pub certificate_hash: &'a str,
    pub image_url: &'a str,
    pub metadata_json: &'a str,
    pub creator_id: Option<&'a str>,
    pub collection_id: Option<&'a str>,
    /// The mint instant, fixed by the caller and reused for the
    /// certificate; never recomputed here
    pub created_at: DateTime<Utc>,
}

/// Filter for the read-only asset listing
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    pub creator_id: Option<String>,
    pub owner_id: Option<String>,
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

const DEFAULT_LIST_LIMIT: u32 = 50;

fn to_storage(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

const ASSET_COLUMNS: &str = "asset_id, token_id, name, description, prompt, style, image_hash, \
     certificate_hash, image_url, metadata_json, creator_id, current_owner_id, collection_id, \
     network, status, is_verified, created_at, updated_at";

fn row_to_asset(row: &Row<'_>) -> rusqlite::Result<AssetRecord> {
    let token_raw: String = row.get(1)?;
    let token_id = token_raw.parse::<TokenId>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(AssetRecord {
        asset_id: row.get(0)?,
        token_id,
        name: row.get(2)?,
        description: row.get(3)?,
        prompt: row.get(4)?,
        style: row.get(5)?,
        image_hash: row.get(6)?,
        certificate_hash: row.get(7)?,
        image_url: row.get(8)?,
        metadata_json: row.get(9)?,
        creator_id: row.get(10)?,
        current_owner_id: row.get(11)?,
        collection_id: row.get(12)?,
        network: row.get(13)?,
        status: row.get(14)?,
        is_verified: row.get::<_, i64>(15)? != 0,
        created_at: parse_timestamp(16, row.get(16)?)?,
        updated_at: parse_timestamp(17, row.get(17)?)?,
    })
}

impl MarketDb {
    /// Advisory uniqueness check: has this content hash been minted?
    ///
    /// Fast path only. Two concurrent mints with identical content can
    /// both see `false` here; the UNIQUE constraint on the insert is
    /// what actually closes that race.
    pub fn image_hash_exists(&self, hash: &ContentHash) -> Result<bool, StoreError> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT asset_id FROM assets WHERE image_hash = ?1 LIMIT 1",
                    [hash.to_hex()],
                    |row| row.get(0),
                )
                .map(Some)
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    other => Err(other),
                })?;
            Ok(found.is_some())
        })
    }

    /// Atomically insert the asset row plus, iff a creator identity is
    /// present, exactly one `mint` provenance entry.
    ///
    /// A UNIQUE violation on `image_hash` surfaces as
    /// `StoreError::DuplicateImageHash`; everything else as `Internal`.
    /// Either way nothing is committed.
    pub fn insert_minted(&self, new: &NewAsset<'_>) -> Result<AssetRecord, StoreError> {
        self.with_conn_mut(|conn| {
            let stamp = to_storage(new.created_at);
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT INTO assets (
                    token_id, name, description, prompt, style,
                    image_hash, certificate_hash, image_url, metadata_json,
                    creator_id, current_owner_id, collection_id,
                    network, status, is_verified, created_at, updated_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                           'off-chain', 'created', 1, ?13, ?13)",
                params![
                    new.token_id.to_string(),
                    new.name,
                    new.description,
                    new.prompt,
                    new.style,
                    new.image_hash.to_hex(),
                    new.certificate_hash,
                    new.image_url,
                    new.metadata_json,
                    new.creator_id,
                    // initial owner is the creator, when known
                    new.creator_id,
                    new.collection_id,
                    stamp,
                ],
            )?;
            let asset_id = tx.last_insert_rowid();

            if let Some(creator) = new.creator_id {
                tx.execute(
                    "INSERT INTO transfers (asset_id, to_user_id, transfer_type, transferred_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![asset_id, creator, TRANSFER_TYPE_MINT, stamp],
                )?;
            }

            tx.commit()?;
            debug!(asset_id, token_id = %new.token_id, "asset minted");

            conn.query_row(
                &format!("SELECT {} FROM assets WHERE asset_id = ?1", ASSET_COLUMNS),
                [asset_id],
                row_to_asset,
            )
            .map_err(Into::into)
        })
    }

    /// Look up one asset by its token id
    pub fn get_by_token(&self, token_id: TokenId) -> Result<Option<AssetRecord>, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM assets WHERE token_id = ?1", ASSET_COLUMNS),
                [token_id.to_string()],
                row_to_asset,
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other.into()),
            })
        })
    }

    /// Plain filtered listing with pagination, newest first
    pub fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<AssetRecord>, StoreError> {
        self.with_conn(|conn| {
            let mut sql = format!("SELECT {} FROM assets WHERE 1=1", ASSET_COLUMNS);
            let mut binds: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

            if let Some(creator) = &filter.creator_id {
                sql.push_str(" AND creator_id = ?");
                binds.push(Box::new(creator.clone()));
            }
            if let Some(owner) = &filter.owner_id {
                sql.push_str(" AND current_owner_id = ?");
                binds.push(Box::new(owner.clone()));
            }
            if let Some(status) = &filter.status {
                sql.push_str(" AND status = ?");
                binds.push(Box::new(status.clone()));
            }

            sql.push_str(" ORDER BY created_at DESC, asset_id DESC LIMIT ? OFFSET ?");
            binds.push(Box::new(filter.limit.unwrap_or(DEFAULT_LIST_LIMIT) as i64));
            binds.push(Box::new(filter.offset as i64));

            let params: Vec<&dyn rusqlite::ToSql> = binds.iter().map(|b| b.as_ref()).collect();
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params.as_slice(), row_to_asset)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
        })
    }

    /// Provenance entries for one asset, oldest first
    pub fn transfers_for(&self, asset_id: i64) -> Result<Vec<TransferRecord>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT transfer_id, asset_id, to_user_id, transfer_type, transferred_at
                 FROM transfers WHERE asset_id = ?1 ORDER BY transfer_id",
            )?;
            let rows = stmt.query_map([asset_id], |row| {
                Ok(TransferRecord {
                    transfer_id: row.get(0)?,
                    asset_id: row.get(1)?,
                    to_user_id: row.get(2)?,
                    transfer_type: row.get(3)?,
                    transferred_at: parse_timestamp(4, row.get(4)?)?,
                })
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
        })
    }
}
