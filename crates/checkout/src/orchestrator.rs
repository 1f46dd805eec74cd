//! Orchestrates one checkout submission over the order backend.

use cart::CartEngine;
use chrono::{DateTime, Utc};
use common::{CustomerId, Money, OrderId};
use snapshot_store::SnapshotStore;
use tokio::sync::Mutex;

use crate::backend::{
    BackendError, NewCustomer, NewOrder, NewPayment, OrderBackend, OrderItemRow, ShippingAddress,
};
use crate::error::CheckoutError;
use crate::form::ShippingForm;
use crate::state::CheckoutState;
use crate::submission;

/// What to do with already-committed steps when a later step fails.
///
/// The four writes are not wrapped in a transaction, so a failure at step *k*
/// leaves steps `1..k-1` committed at the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompensationPolicy {
    /// Leave earlier writes in place. The documented consistency gap: partial
    /// customer/order rows survive a failed submission.
    #[default]
    Preserve,

    /// Delete earlier writes in reverse order. Compensation failures are
    /// logged, never propagated; the submission still reports the original
    /// step failure.
    Rollback,
}

/// Returned on a fully successful submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CheckoutReceipt {
    pub customer_id: CustomerId,
    pub order_id: OrderId,
    pub amount: Money,
    pub completed_at: DateTime<Utc>,
}

/// Identifiers allocated so far in one submission, for compensation.
#[derive(Debug, Default)]
struct SubmissionLog {
    customer_id: Option<CustomerId>,
    order_id: Option<OrderId>,
    items_written: bool,
}

/// Drives the four sequential order writes for one checkout attempt.
///
/// The orchestrator reads a snapshot from the cart engine and, on success,
/// requests a clear through the engine's own operation; it never mutates the
/// collection directly. At most one submission runs at a time per instance;
/// a second `submit` while one is in flight is rejected, not queued.
pub struct CheckoutOrchestrator<B: OrderBackend> {
    backend: B,
    policy: CompensationPolicy,
    state: Mutex<CheckoutState>,
}

impl<B: OrderBackend> CheckoutOrchestrator<B> {
    /// Creates an orchestrator that preserves partial writes on failure.
    pub fn new(backend: B) -> Self {
        Self::with_policy(backend, CompensationPolicy::default())
    }

    /// Creates an orchestrator with an explicit compensation policy.
    pub fn with_policy(backend: B, policy: CompensationPolicy) -> Self {
        Self {
            backend,
            policy,
            state: Mutex::new(CheckoutState::Idle),
        }
    }

    /// Returns the current submission state.
    pub fn state(&self) -> CheckoutState {
        // The lock is held for the whole of a running submission.
        match self.state.try_lock() {
            Ok(guard) => *guard,
            Err(_) => CheckoutState::Submitting,
        }
    }

    /// Runs one checkout submission.
    ///
    /// Validates the form, then issues the four dependent writes strictly in
    /// sequence: customer, order, order items, payment. Validation failures
    /// make no backend call. On success the cart is cleared through the
    /// engine; on failure it is left untouched so the user can retry.
    #[tracing::instrument(skip(self, form, cart))]
    pub async fn submit<S: SnapshotStore>(
        &self,
        form: &ShippingForm,
        cart: &CartEngine<S>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let Ok(mut state) = self.state.try_lock() else {
            return Err(CheckoutError::SubmissionInFlight);
        };
        if !state.can_submit() {
            return Err(CheckoutError::SubmissionInFlight);
        }

        // Fail fast before any remote call; the state machine is untouched.
        form.validate()?;
        let items = cart.snapshot().await;
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let total = items
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total());

        *state = CheckoutState::Submitting;
        metrics::counter!("checkout_submissions_total").increment(1);
        let started = std::time::Instant::now();
        let mut log = SubmissionLog::default();

        // Step 1: create customer
        tracing::info!(step = submission::STEP_CREATE_CUSTOMER, "checkout step started");
        let customer = NewCustomer {
            full_name: form.full_name.trim().to_string(),
            email: form.email.trim().to_string(),
            shipping_address: ShippingAddress {
                address: form.address.trim().to_string(),
                city: form.city.trim().to_string(),
                postal_code: form.postal_code.trim().to_string(),
            },
        };
        let customer_id = match self.backend.create_customer(customer).await {
            Ok(id) => id,
            Err(e) => {
                return self
                    .fail(&mut state, submission::STEP_CREATE_CUSTOMER, e, &log, started)
                    .await;
            }
        };
        log.customer_id = Some(customer_id);

        // Step 2: create order
        tracing::info!(step = submission::STEP_CREATE_ORDER, "checkout step started");
        let order = NewOrder {
            customer_id,
            total_amount: total,
            status: submission::ORDER_STATUS_PAID.to_string(),
        };
        let order_id = match self.backend.create_order(order).await {
            Ok(id) => id,
            Err(e) => {
                return self
                    .fail(&mut state, submission::STEP_CREATE_ORDER, e, &log, started)
                    .await;
            }
        };
        log.order_id = Some(order_id);

        // Step 3: create order items
        tracing::info!(
            step = submission::STEP_CREATE_ORDER_ITEMS,
            "checkout step started"
        );
        let rows: Vec<OrderItemRow> = items
            .iter()
            .map(|item| OrderItemRow {
                order_id,
                product_id: item.product_id,
                product_name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();
        if let Err(e) = self.backend.create_order_items(rows).await {
            return self
                .fail(
                    &mut state,
                    submission::STEP_CREATE_ORDER_ITEMS,
                    e,
                    &log,
                    started,
                )
                .await;
        }
        log.items_written = true;

        // Step 4: create payment
        tracing::info!(step = submission::STEP_CREATE_PAYMENT, "checkout step started");
        let payment = NewPayment {
            order_id,
            amount: total,
            status: submission::PAYMENT_STATUS_SUCCESS.to_string(),
            provider: submission::PAYMENT_PROVIDER.to_string(),
        };
        if let Err(e) = self.backend.create_payment(payment).await {
            return self
                .fail(&mut state, submission::STEP_CREATE_PAYMENT, e, &log, started)
                .await;
        }

        // All four writes landed; only now is the cart released.
        cart.clear().await;
        *state = CheckoutState::Succeeded;

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("checkout_duration_seconds").record(duration);
        metrics::counter!("checkout_succeeded_total").increment(1);
        tracing::info!(%order_id, duration, "checkout completed successfully");

        Ok(CheckoutReceipt {
            customer_id,
            order_id,
            amount: total,
            completed_at: Utc::now(),
        })
    }

    /// Records a step failure, compensating committed steps if configured.
    async fn fail(
        &self,
        state: &mut CheckoutState,
        step: &'static str,
        error: BackendError,
        log: &SubmissionLog,
        started: std::time::Instant,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        tracing::warn!(step, error = %error, "checkout step failed");

        if self.policy == CompensationPolicy::Rollback {
            self.compensate(log).await;
        }

        *state = CheckoutState::Failed;
        metrics::histogram!("checkout_duration_seconds").record(started.elapsed().as_secs_f64());
        metrics::counter!("checkout_failed_total").increment(1);

        Err(CheckoutError::Backend {
            step,
            reason: error.to_string(),
        })
    }

    /// Deletes committed writes in reverse order of creation.
    async fn compensate(&self, log: &SubmissionLog) {
        if log.items_written
            && let Some(order_id) = log.order_id
            && let Err(e) = self.backend.delete_order_items(order_id).await
        {
            tracing::warn!(%order_id, error = %e, "compensation left order items behind");
        }
        if let Some(order_id) = log.order_id
            && let Err(e) = self.backend.delete_order(order_id).await
        {
            tracing::warn!(%order_id, error = %e, "compensation left order behind");
        }
        if let Some(customer_id) = log.customer_id
            && let Err(e) = self.backend.delete_customer(customer_id).await
        {
            tracing::warn!(%customer_id, error = %e, "compensation left customer behind");
        }
    }
}
