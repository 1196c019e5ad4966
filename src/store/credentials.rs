use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Local key/value store for user-supplied API credentials.
///
/// One row per upstream service (explorer, analytics, subgraph). Secrets
/// never leave the user's data directory.
#[derive(Debug)]
pub struct CredentialStore {
    conn: Connection,
}

impl CredentialStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create data dir {}", parent.display()))?;
        }
        let conn = Connection::open(path).with_context(|| format!("open db {}", path.display()))?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    pub fn get(&self, service: &str) -> Result<Option<String>> {
        let secret = self
            .conn
            .query_row(
                "SELECT secret FROM credentials WHERE service = ?1",
                params![service],
                |row| row.get(0),
            )
            .optional()?;
        Ok(secret)
    }

    pub fn set(&self, service: &str, secret: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO credentials(service, secret) VALUES (?1, ?2)
             ON CONFLICT(service) DO UPDATE SET secret=excluded.secret",
            params![service, secret],
        )?;
        Ok(())
    }

    pub fn remove(&self, service: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM credentials WHERE service = ?1", params![service])?;
        Ok(())
    }

    /// Services with a stored secret, without the secrets themselves.
    pub fn list_services(&self) -> Result<BTreeMap<String, usize>> {
        let mut stmt = self
            .conn
            .prepare("SELECT service, length(secret) FROM credentials ORDER BY service")?;
        let mut rows = stmt.query([])?;
        let mut out = BTreeMap::new();
        while let Some(row) = rows.next()? {
            let service: String = row.get(0)?;
            let len: usize = row.get(1)?;
            out.insert(service, len);
        }
        Ok(out)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS credentials (
                service TEXT PRIMARY KEY,
                secret  TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let store = CredentialStore::open_in_memory().unwrap();
        store.set("etherscan", "KEY123").unwrap();
        assert_eq!(store.get("etherscan").unwrap().as_deref(), Some("KEY123"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let store = CredentialStore::open_in_memory().unwrap();
        store.set("analytics", "old").unwrap();
        store.set("analytics", "new").unwrap();
        assert_eq!(store.get("analytics").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_remove_and_list() {
        let store = CredentialStore::open_in_memory().unwrap();
        store.set("etherscan", "abc").unwrap();
        store.set("analytics", "defg").unwrap();
        let services = store.list_services().unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services["analytics"], 4);

        store.remove("etherscan").unwrap();
        assert_eq!(store.get("etherscan").unwrap(), None);
        assert_eq!(store.list_services().unwrap().len(), 1);
    }
}
