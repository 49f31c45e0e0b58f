//! The dataset store: snapshots of tables kept as delimited text.

use std::path::PathBuf;

use libsql::{Builder, Connection, Database};
use sift_config::DatabaseConfig;
use sift_core::{DatasetOverview, StoredDataset, Table};

use crate::error::DatabaseError;
use crate::helpers::{DATASET_COLUMNS, dataset_from_row};
use crate::retry::{RetryConfig, with_retry};
use crate::schema::ensure_schema;

const MEMORY: &str = ":memory:";

/// Where the store lives, parsed from the connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Memory,
    Local(PathBuf),
    Remote { url: String, auth_token: String },
}

impl Location {
    /// Parse and vet the connection settings.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidConfig` for an empty URL, an unknown
    /// scheme, or a plaintext URL while `require_tls` is set.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .require_url()
            .map_err(|e| DatabaseError::InvalidConfig(e.to_string()))?;

        if url == MEMORY {
            return Ok(Self::Memory);
        }
        if let Some(path) = url.strip_prefix("file:") {
            return Ok(Self::Local(PathBuf::from(path)));
        }

        let Some((scheme, _)) = url.split_once("://") else {
            return Ok(Self::Local(PathBuf::from(url)));
        };
        match scheme {
            "libsql" | "https" | "wss" => {}
            "http" | "ws" if config.require_tls => {
                return Err(DatabaseError::InvalidConfig(format!(
                    "plaintext {scheme}:// connection refused while require_tls is set"
                )));
            }
            "http" | "ws" => {}
            other => {
                return Err(DatabaseError::InvalidConfig(format!(
                    "unsupported connection scheme '{other}://'"
                )));
            }
        }
        Ok(Self::Remote {
            url: url.to_string(),
            auth_token: config.auth_token.clone(),
        })
    }
}

/// Handle to the dataset store.
///
/// Each operation opens its own connection and drops it on return. An
/// in-memory store keeps one retained connection, since every new connection
/// to `:memory:` would see an empty database.
pub struct DatasetStore {
    db: Database,
    retained: Option<Connection>,
}

impl DatasetStore {
    /// Open the store described by `config` and make sure the schema exists.
    ///
    /// Opening plus [`init`](Self::init) is bounded by the connect timeout and
    /// retried `retry_attempts` times, `retry_delay_ms` apart.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidConfig` without retrying when the
    /// settings are unusable, and `DatabaseError::Unavailable` once every
    /// attempt has failed.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let location = Location::from_config(config)?;
        let retry = RetryConfig::from(config);
        let timeout = config.connect_timeout();
        let location = &location;

        tracing::debug!(?location, attempts = retry.max_attempts, "connecting to dataset store");
        with_retry(&retry, move || async move {
            tokio::time::timeout(timeout, Self::open_and_init(location))
                .await
                .map_err(|_| DatabaseError::Timeout(timeout))?
        })
        .await
    }

    /// Open an in-memory store. Used by tests and for throwaway sessions.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if libSQL cannot open the database.
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        Self::open_and_init(&Location::Memory).await
    }

    async fn open_and_init(location: &Location) -> Result<Self, DatabaseError> {
        let store = Self::open(location).await?;
        store.init().await?;
        Ok(store)
    }

    async fn open(location: &Location) -> Result<Self, DatabaseError> {
        let (db, retained) = match location {
            Location::Memory => {
                let db = Builder::new_local(MEMORY).build().await?;
                let conn = db.connect()?;
                (db, Some(conn))
            }
            Location::Local(path) => (Builder::new_local(path).build().await?, None),
            Location::Remote { url, auth_token } => (
                Builder::new_remote(url.clone(), auth_token.clone())
                    .build()
                    .await?,
                None,
            ),
        };
        Ok(Self { db, retained })
    }

    fn connection(&self) -> Result<Connection, DatabaseError> {
        match &self.retained {
            Some(conn) => Ok(conn.clone()),
            None => Ok(self.db.connect()?),
        }
    }

    /// Create the `datasets` table when it is absent. Safe to call any number
    /// of times; never drops or alters existing data.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the catalog check or the create fails.
    pub async fn init(&self) -> Result<(), DatabaseError> {
        let conn = self.connection()?;
        ensure_schema(&conn).await
    }

    /// Insert a new snapshot of `table` under `name`. Names need not be
    /// unique; every call adds a record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Serialization` if the table cannot be encoded,
    /// or a query error.
    pub async fn save(&self, table: &Table, name: &str) -> Result<StoredDataset, DatabaseError> {
        let data =
            sift_ingest::write_csv(table).map_err(|e| DatabaseError::Serialization(e.to_string()))?;
        let conn = self.connection()?;
        let mut rows = conn
            .query(
                &format!("INSERT INTO datasets (name, data) VALUES (?1, ?2) RETURNING {DATASET_COLUMNS}"),
                libsql::params![name, data.as_str()],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::Query("insert returned no row".into()))?;
        let stored = dataset_from_row(&row)?;
        tracing::debug!(id = stored.id, name, bytes = stored.data.len(), "dataset saved");
        Ok(stored)
    }

    /// Every stored record in id order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row is malformed.
    pub async fn list(&self) -> Result<Vec<StoredDataset>, DatabaseError> {
        let conn = self.connection()?;
        let mut rows = conn
            .query(&format!("SELECT {DATASET_COLUMNS} FROM datasets ORDER BY id"), ())
            .await?;
        let mut datasets = Vec::new();
        while let Some(row) = rows.next().await? {
            datasets.push(dataset_from_row(&row)?);
        }
        Ok(datasets)
    }

    /// Listing with the shape of each stored body. A body that fails to
    /// decode is reported on its own entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only if the listing query itself fails.
    pub async fn overview(&self) -> Result<Vec<DatasetOverview>, DatabaseError> {
        Ok(self.list().await?.into_iter().map(overview_of).collect())
    }

    /// One stored record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id.
    pub async fn get(&self, id: i64) -> Result<StoredDataset, DatabaseError> {
        let conn = self.connection()?;
        let mut rows = conn
            .query(&format!("SELECT {DATASET_COLUMNS} FROM datasets WHERE id = ?1"), [id])
            .await?;
        match rows.next().await? {
            Some(row) => dataset_from_row(&row),
            None => Err(DatabaseError::NotFound(id)),
        }
    }

    /// Decode a stored record back into a table.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id and
    /// `DatabaseError::Serialization` if the body does not decode.
    pub async fn load(&self, id: i64) -> Result<Table, DatabaseError> {
        let stored = self.get(id).await?;
        let table = sift_ingest::read_csv(stored.data.as_bytes())
            .map_err(|e| DatabaseError::Serialization(format!("dataset {id}: {e}")))?;
        tracing::debug!(id, rows = table.row_count(), "dataset loaded");
        Ok(table)
    }
}

fn overview_of(stored: StoredDataset) -> DatasetOverview {
    let (rows, columns, error) = match sift_ingest::read_csv(stored.data.as_bytes()) {
        Ok(table) => (Some(table.row_count()), Some(table.column_count()), None),
        Err(e) => {
            tracing::warn!(id = stored.id, error = %e, "stored dataset does not decode");
            (None, None, Some(e.to_string()))
        }
    };
    DatasetOverview {
        id: stored.id,
        name: stored.name,
        upload_date: stored.upload_date,
        rows,
        columns,
        error,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn location(url: &str, require_tls: bool) -> Result<Location, DatabaseError> {
        let config = DatabaseConfig {
            require_tls,
            ..DatabaseConfig::with_url(url)
        };
        Location::from_config(&config)
    }

    #[test]
    fn parses_locations() {
        assert_eq!(location(":memory:", false).unwrap(), Location::Memory);
        assert_eq!(
            location("./data/sift.db", false).unwrap(),
            Location::Local(PathBuf::from("./data/sift.db"))
        );
        assert_eq!(
            location("file:sift.db", false).unwrap(),
            Location::Local(PathBuf::from("sift.db"))
        );
        assert!(matches!(
            location("libsql://sift.example.io", true).unwrap(),
            Location::Remote { .. }
        ));
        assert!(matches!(
            location("http://127.0.0.1:8080", false).unwrap(),
            Location::Remote { .. }
        ));
    }

    #[test]
    fn require_tls_refuses_plaintext() {
        assert!(matches!(
            location("http://db.example.io", true),
            Err(DatabaseError::InvalidConfig(msg)) if msg.contains("require_tls")
        ));
        assert!(matches!(
            location("ws://db.example.io", true),
            Err(DatabaseError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_scheme_and_empty_url_are_invalid() {
        assert!(matches!(
            location("postgres://user@host/db", false),
            Err(DatabaseError::InvalidConfig(msg)) if msg.contains("postgres")
        ));
        assert!(matches!(location("", false), Err(DatabaseError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn in_memory_store_keeps_rows_between_operations() {
        let store = DatasetStore::in_memory().await.unwrap();
        let table = Table::new(vec![sift_core::Column::integers("a", vec![Some(1), Some(2)])])
            .unwrap();
        let saved = store.save(&table, "mem").await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, saved.id);
        assert_eq!(store.load(saved.id).await.unwrap().row_count(), 2);
    }
}
