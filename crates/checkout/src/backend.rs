//! Remote order backend contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::{CustomerId, Money, OrderId, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reported by an order backend operation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BackendError(String);

impl BackendError {
    /// Creates a backend error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Shipping address as denormalized onto the customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// Customer record to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub full_name: String,
    pub email: String,
    pub shipping_address: ShippingAddress,
}

/// Order record to create, referencing an already-created customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub total_amount: Money,
    pub status: String,
}

/// One order-item row: a denormalized snapshot of a cart line at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRow {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

/// Payment record to create, referencing an already-created order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayment {
    pub order_id: OrderId,
    pub amount: Money,
    pub status: String,
    pub provider: String,
}

/// Trait for the remote order-processing backend.
///
/// The backend allocates identifiers; each create returns the id the next
/// step references. The delete operations are the compensating writes used
/// by the rollback policy and are never called on the happy path. Timeouts
/// and retries are the implementation's concern, not the caller's.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Creates a customer record and returns its allocated id.
    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerId, BackendError>;

    /// Creates an order record and returns its allocated id.
    async fn create_order(&self, order: NewOrder) -> Result<OrderId, BackendError>;

    /// Creates one row per cart line for an existing order.
    async fn create_order_items(&self, items: Vec<OrderItemRow>) -> Result<(), BackendError>;

    /// Records a payment against an existing order.
    async fn create_payment(&self, payment: NewPayment) -> Result<(), BackendError>;

    /// Deletes the item rows of an order.
    async fn delete_order_items(&self, order_id: OrderId) -> Result<(), BackendError>;

    /// Deletes an order record.
    async fn delete_order(&self, order_id: OrderId) -> Result<(), BackendError>;

    /// Deletes a customer record.
    async fn delete_customer(&self, customer_id: CustomerId) -> Result<(), BackendError>;
}

#[derive(Debug, Default)]
struct InMemoryBackendState {
    customers: HashMap<CustomerId, NewCustomer>,
    orders: HashMap<OrderId, NewOrder>,
    order_items: HashMap<OrderId, Vec<OrderItemRow>>,
    payments: Vec<NewPayment>,
    fail_on_create_customer: bool,
    fail_on_create_order: bool,
    fail_on_create_order_items: bool,
    fail_on_create_payment: bool,
    latency: Option<Duration>,
}

/// In-memory order backend for testing.
///
/// Supports per-step fault injection and an optional artificial latency so
/// tests can observe the submitting window.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderBackend {
    state: Arc<RwLock<InMemoryBackendState>>,
}

impl InMemoryOrderBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to fail customer creation.
    pub fn set_fail_on_create_customer(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create_customer = fail;
    }

    /// Configures the backend to fail order creation.
    pub fn set_fail_on_create_order(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create_order = fail;
    }

    /// Configures the backend to fail order-item creation.
    pub fn set_fail_on_create_order_items(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create_order_items = fail;
    }

    /// Configures the backend to fail payment creation.
    pub fn set_fail_on_create_payment(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create_payment = fail;
    }

    /// Adds an artificial delay before every create call.
    pub fn set_latency(&self, latency: Duration) {
        self.state.write().unwrap().latency = Some(latency);
    }

    /// Returns the number of stored customer records.
    pub fn customer_count(&self) -> usize {
        self.state.read().unwrap().customers.len()
    }

    /// Returns the number of stored order records.
    pub fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }

    /// Returns the total number of stored order-item rows.
    pub fn order_item_count(&self) -> usize {
        self.state
            .read()
            .unwrap()
            .order_items
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Returns the number of stored payment records.
    pub fn payment_count(&self) -> usize {
        self.state.read().unwrap().payments.len()
    }

    /// Returns the status of an order, if it exists.
    pub fn order_status(&self, order_id: OrderId) -> Option<String> {
        self.state
            .read()
            .unwrap()
            .orders
            .get(&order_id)
            .map(|o| o.status.clone())
    }

    /// Returns the item rows stored for an order.
    pub fn items_for_order(&self, order_id: OrderId) -> Vec<OrderItemRow> {
        self.state
            .read()
            .unwrap()
            .order_items
            .get(&order_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the last recorded payment, if any.
    pub fn last_payment(&self) -> Option<NewPayment> {
        self.state.read().unwrap().payments.last().cloned()
    }

    async fn simulate_latency(&self) {
        let latency = self.state.read().unwrap().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl OrderBackend for InMemoryOrderBackend {
    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerId, BackendError> {
        self.simulate_latency().await;
        let mut state = self.state.write().unwrap();

        if state.fail_on_create_customer {
            return Err(BackendError::new("customer insert rejected"));
        }

        let customer_id = CustomerId::new();
        state.customers.insert(customer_id, customer);
        Ok(customer_id)
    }

    async fn create_order(&self, order: NewOrder) -> Result<OrderId, BackendError> {
        self.simulate_latency().await;
        let mut state = self.state.write().unwrap();

        if state.fail_on_create_order {
            return Err(BackendError::new("order insert rejected"));
        }
        if !state.customers.contains_key(&order.customer_id) {
            return Err(BackendError::new(format!(
                "unknown customer: {}",
                order.customer_id
            )));
        }

        let order_id = OrderId::new();
        state.orders.insert(order_id, order);
        Ok(order_id)
    }

    async fn create_order_items(&self, items: Vec<OrderItemRow>) -> Result<(), BackendError> {
        self.simulate_latency().await;
        let mut state = self.state.write().unwrap();

        if state.fail_on_create_order_items {
            return Err(BackendError::new("order items insert rejected"));
        }
        for item in &items {
            if !state.orders.contains_key(&item.order_id) {
                return Err(BackendError::new(format!(
                    "unknown order: {}",
                    item.order_id
                )));
            }
        }

        for item in items {
            state.order_items.entry(item.order_id).or_default().push(item);
        }
        Ok(())
    }

    async fn create_payment(&self, payment: NewPayment) -> Result<(), BackendError> {
        self.simulate_latency().await;
        let mut state = self.state.write().unwrap();

        if state.fail_on_create_payment {
            return Err(BackendError::new("payment insert rejected"));
        }
        if !state.orders.contains_key(&payment.order_id) {
            return Err(BackendError::new(format!(
                "unknown order: {}",
                payment.order_id
            )));
        }

        state.payments.push(payment);
        Ok(())
    }

    async fn delete_order_items(&self, order_id: OrderId) -> Result<(), BackendError> {
        let mut state = self.state.write().unwrap();
        state.order_items.remove(&order_id);
        Ok(())
    }

    async fn delete_order(&self, order_id: OrderId) -> Result<(), BackendError> {
        let mut state = self.state.write().unwrap();
        state.orders.remove(&order_id);
        Ok(())
    }

    async fn delete_customer(&self, customer_id: CustomerId) -> Result<(), BackendError> {
        let mut state = self.state.write().unwrap();
        state.customers.remove(&customer_id);
        Ok(())
    }
}
