//! Payment ledger.

pub mod ledger;

pub use ledger::{PaymentHistory, PaymentLedger, PaymentReceipt};
