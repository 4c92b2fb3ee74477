pub mod client;
pub mod types;

pub use client::{GatewayClient, GatewayError, cents_to_decimal};
pub use types::{CheckoutSession, PAYMENT_STATUS_PAID};
