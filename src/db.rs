use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::customer::{Customer, CustomerId, CustomerRequest};
use crate::error::{StoreError, StoreResult};
use crate::store::{CustomerStore, MemoryStore};

/// `database.path` value that selects the in-memory store
pub const IN_MEMORY: &str = ":memory:";

pub fn setup_database(conn: &Connection) -> StoreResult<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            email TEXT,
            age INTEGER
        )",
        [],
    )?;

    Ok(())
}

/// Read `name,email,age` rows from a CSV file; empty cells become null
pub fn load_csv(csv_path: &Path) -> StoreResult<Vec<CustomerRequest>> {
    let mut rdr = csv::Reader::from_path(csv_path)?;

    let mut requests = Vec::new();
    for result in rdr.deserialize() {
        let request: CustomerRequest = result?;
        requests.push(request);
    }

    Ok(requests)
}

/// Open the store named by `database.path`
pub fn open_store(path: &str) -> Result<Arc<dyn CustomerStore>> {
    if path == IN_MEMORY {
        info!("using in-memory customer store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path))?;
    let store = SqliteStore::new(conn).context("Failed to initialize database schema")?;
    info!(path, "opened SQLite customer store");

    Ok(Arc::new(store))
}

// ============================================================================
// SQLITE STORE
// ============================================================================

/// SQLite-backed store; one connection shared behind a mutex
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap a connection, creating the schema if needed
    pub fn new(conn: Connection) -> StoreResult<Self> {
        setup_database(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn count(&self) -> StoreResult<i64> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;

        Ok(count)
    }
}

fn customer_from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
    })
}

impl CustomerStore for SqliteStore {
    fn find_all(&self) -> StoreResult<Vec<Customer>> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt = conn.prepare("SELECT id, name, email, age FROM customers ORDER BY id")?;

        let customers = stmt
            .query_map([], customer_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = customers.len(), "loaded customers");
        Ok(customers)
    }

    fn save(&self, mut customer: Customer) -> StoreResult<Customer> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;

        match customer.id {
            Some(id) => {
                conn.execute(
                    "INSERT INTO customers (id, name, email, age) VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        email = excluded.email,
                        age = excluded.age",
                    params![id, customer.name, customer.email, customer.age],
                )?;
            }
            None => {
                conn.execute(
                    "INSERT INTO customers (name, email, age) VALUES (?1, ?2, ?3)",
                    params![customer.name, customer.email, customer.age],
                )?;
                customer.id = Some(conn.last_insert_rowid());
            }
        }

        Ok(customer)
    }

    fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let customer = conn
            .query_row(
                "SELECT id, name, email, age FROM customers WHERE id = ?1",
                params![id],
                customer_from_row,
            )
            .optional()?;

        Ok(customer)
    }

    fn delete_by_id(&self, id: CustomerId) -> StoreResult<()> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let removed = conn.execute("DELETE FROM customers WHERE id = ?1", params![id])?;
        debug!(id, removed, "delete by id");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ana() -> Customer {
        Customer::new(CustomerRequest::new("Ana", "ana@x.com", 30))
    }

    #[test]
    fn test_setup_database_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        setup_database(&conn).unwrap();
        setup_database(&conn).unwrap();

        let store = SqliteStore::new(conn).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_assigns_id_and_reads_back() {
        let store = SqliteStore::open_in_memory().unwrap();

        let saved = store.save(ana()).unwrap();

        assert_eq!(saved.id, Some(1));
        assert_eq!(store.find_by_id(1).unwrap(), Some(saved.clone()));
        assert_eq!(store.find_all().unwrap(), vec![saved]);
    }

    #[test]
    fn test_save_existing_id_updates_in_place() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut saved = store.save(ana()).unwrap();

        saved.apply(CustomerRequest::new("Ana B", "ana@x.com", 31));
        store.save(saved.clone()).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.find_by_id(1).unwrap(), Some(saved));
    }

    #[test]
    fn test_null_fields_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();

        let saved = store.save(Customer::default()).unwrap();
        let loaded = store.find_by_id(saved.id.unwrap()).unwrap().unwrap();

        assert_eq!(loaded.name, None);
        assert_eq!(loaded.email, None);
        assert_eq!(loaded.age, None);
    }

    #[test]
    fn test_delete_missing_id_leaves_others() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save(ana()).unwrap();

        store.delete_by_id(42).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        store.delete_by_id(1).unwrap();
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_load_csv_with_empty_cells() {
        let path = std::env::temp_dir().join(format!("customers-{}.csv", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "name,email,age").unwrap();
            writeln!(file, "Ana,ana@x.com,30").unwrap();
            writeln!(file, "Bo,,").unwrap();
        }

        let requests = load_csv(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], CustomerRequest::new("Ana", "ana@x.com", 30));
        assert_eq!(requests[1].name.as_deref(), Some("Bo"));
        assert_eq!(requests[1].email, None);
        assert_eq!(requests[1].age, None);
    }

    #[test]
    fn test_open_store_in_memory() {
        let store = open_store(IN_MEMORY).unwrap();
        assert!(store.find_all().unwrap().is_empty());
    }
}
