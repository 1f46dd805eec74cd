//! Checkout submission step and status constants.

/// Step name: create the customer record.
pub const STEP_CREATE_CUSTOMER: &str = "create_customer";

/// Step name: create the order record.
pub const STEP_CREATE_ORDER: &str = "create_order";

/// Step name: create one order-item row per cart line.
pub const STEP_CREATE_ORDER_ITEMS: &str = "create_order_items";

/// Step name: record the payment.
pub const STEP_CREATE_PAYMENT: &str = "create_payment";

/// Initial status carried by a newly created order.
pub const ORDER_STATUS_PAID: &str = "paid";

/// Status recorded for a completed payment.
pub const PAYMENT_STATUS_SUCCESS: &str = "success";

/// Payment provider label recorded with every payment.
pub const PAYMENT_PROVIDER: &str = "mock_provider";
