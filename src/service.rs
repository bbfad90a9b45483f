// Customer Service - maps each operation onto the store

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::customer::{Customer, CustomerId, CustomerRequest};
use crate::error::{CustomerError, CustomerResult};
use crate::store::CustomerStore;

/// Stateless handle over a shared store; clone freely
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> CustomerResult<Vec<Customer>> {
        let customers = self.store.find_all()?;
        debug!(count = customers.len(), "listed customers");
        Ok(customers)
    }

    pub fn get(&self, id: CustomerId) -> CustomerResult<Customer> {
        self.store
            .find_by_id(id)?
            .ok_or(CustomerError::NotFound(id))
    }

    /// Fields are stored exactly as given; the store assigns the id.
    pub fn create(&self, request: CustomerRequest) -> CustomerResult<Customer> {
        let customer = self.store.save(Customer::new(request))?;
        info!(id = ?customer.id, "created customer");
        Ok(customer)
    }

    /// Overwrites name, email and age. Never creates a record.
    pub fn update(&self, id: CustomerId, request: CustomerRequest) -> CustomerResult<Customer> {
        let mut customer = match self.store.find_by_id(id)? {
            Some(customer) => customer,
            None => {
                warn!(id, "update of unknown customer");
                return Err(CustomerError::NotFound(id));
            }
        };

        customer.apply(request);
        let customer = self.store.save(customer)?;
        info!(id, "updated customer");
        Ok(customer)
    }

    /// No existence check: deleting an unknown id succeeds.
    pub fn delete(&self, id: CustomerId) -> CustomerResult<()> {
        self.store.delete_by_id(id)?;
        info!(id, "deleted customer");
        Ok(())
    }
}
