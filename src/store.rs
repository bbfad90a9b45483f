// Customer Store - storage interface + in-memory backend
//
// The service only ever talks to `dyn CustomerStore`; the SQLite backend
// lives in `db.rs`.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::customer::{Customer, CustomerId};
use crate::error::{StoreError, StoreResult};

/// Persistence capabilities the customer service relies on
pub trait CustomerStore: Send + Sync {
    /// Every stored customer, ascending by id
    fn find_all(&self) -> StoreResult<Vec<Customer>>;

    /// Insert when `customer.id` is `None`, otherwise overwrite the row with that id.
    /// Returns the stored record with its id filled in.
    fn save(&self, customer: Customer) -> StoreResult<Customer>;

    fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>>;

    /// Deleting an unknown id is a no-op.
    fn delete_by_id(&self, id: CustomerId) -> StoreResult<()>;
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    rows: BTreeMap<CustomerId, Customer>,
    last_id: CustomerId,
}

/// Map-backed store; ids start at 1 and are never reused
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerStore for MemoryStore {
    fn find_all(&self) -> StoreResult<Vec<Customer>> {
        let inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.rows.values().cloned().collect())
    }

    fn save(&self, mut customer: Customer) -> StoreResult<Customer> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;

        let id = match customer.id {
            Some(id) => {
                inner.last_id = inner.last_id.max(id);
                id
            }
            None => {
                inner.last_id += 1;
                inner.last_id
            }
        };
        customer.id = Some(id);
        inner.rows.insert(id, customer.clone());

        Ok(customer)
    }

    fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        let inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.rows.get(&id).cloned())
    }

    fn delete_by_id(&self, id: CustomerId) -> StoreResult<()> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        inner.rows.remove(&id);
        Ok(())
    }
}
