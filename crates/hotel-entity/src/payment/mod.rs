//! Payment entities.

pub mod method;
pub mod model;
pub mod summary;

pub use method::PaymentMethod;
pub use model::Payment;
pub use summary::{PaymentEntry, PaymentSummary};
