//! GiveFlow Match — the need/request ledger, donation intake and
//! assignment, and the fulfillment reconciler that turns assigned
//! donations into per-request fulfillment figures.

pub mod assign;
pub mod config;
mod guard;
pub mod ledger;
pub mod reconcile;

pub use assign::DonationService;
pub use config::LedgerConfig;
pub use ledger::NeedRequestLedger;
pub use reconcile::{FulfillmentReconciler, FulfillmentReport, RequestFulfillment};
