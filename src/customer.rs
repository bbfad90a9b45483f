// Customer entity - the single record type served by the API

use serde::{Deserialize, Serialize};

/// Store-assigned customer identity
pub type CustomerId = i64;

/// Persisted customer record
///
/// `id` is `None` only before the first `save`; every record that comes back
/// out of a store carries the id the store assigned.
/// Fields are nullable: whatever the caller sent (including nothing) is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<CustomerId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl Customer {
    /// New, not yet persisted customer
    pub fn new(request: CustomerRequest) -> Self {
        let mut customer = Self::default();
        customer.apply(request);
        customer
    }

    /// Overwrite all mutable fields unconditionally
    pub fn apply(&mut self, request: CustomerRequest) {
        self.name = request.name;
        self.email = request.email;
        self.age = request.age;
    }
}

/// Body of create and update requests
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
}

impl CustomerRequest {
    pub fn new(name: &str, email: &str, age: i32) -> Self {
        Self {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            age: Some(age),
        }
    }
}
