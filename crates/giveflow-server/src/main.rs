//! GiveFlow Server — Application entry point.
//!
//! Connects to SurrealDB, applies migrations, and wires the verification,
//! ledger, donation, and reconciliation services together.

use giveflow_core::NoopNotifier;
use giveflow_db::repository::{
    SurrealDonationRepository, SurrealNeedRequestRepository, SurrealVerificationRepository,
};
use giveflow_db::{DbConfig, DbManager, run_migrations};
use giveflow_match::{DonationService, FulfillmentReconciler, LedgerConfig, NeedRequestLedger};
use giveflow_verify::{VerificationService, VerifyConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("giveflow=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting GiveFlow server...");

    if let Err(err) = run().await {
        tracing::error!(error = %err, "GiveFlow server failed to start");
        std::process::exit(1);
    }

    tracing::info!("GiveFlow server stopped.");
}

async fn run() -> Result<(), giveflow_db::DbError> {
    let config = DbConfig::from_env();
    let manager = DbManager::connect(&config).await?;
    run_migrations(manager.client()).await?;

    let db = manager.client().clone();

    let _verifications = VerificationService::new(
        SurrealVerificationRepository::new(db.clone()),
        NoopNotifier,
        VerifyConfig::default(),
    );
    let _ledger = NeedRequestLedger::new(
        SurrealNeedRequestRepository::new(db.clone()),
        SurrealVerificationRepository::new(db.clone()),
        LedgerConfig::default(),
    );
    let _donations = DonationService::new(
        SurrealDonationRepository::new(db.clone()),
        SurrealNeedRequestRepository::new(db.clone()),
        SurrealVerificationRepository::new(db.clone()),
        NoopNotifier,
    );
    let _reconciler = FulfillmentReconciler::new(
        SurrealDonationRepository::new(db.clone()),
        SurrealNeedRequestRepository::new(db),
    );

    tracing::info!(
        namespace = %config.namespace,
        database = %config.database,
        "GiveFlow services ready"
    );

    // TODO: Attach the REST API router once the transport layer lands.

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::Surreal;
    use surrealdb::engine::local::Mem;

    #[tokio::test]
    async fn services_wire_against_a_fresh_database() {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        run_migrations(&db).await.unwrap();

        let _verifications = VerificationService::new(
            SurrealVerificationRepository::new(db.clone()),
            NoopNotifier,
            VerifyConfig::default(),
        );
        let _ledger = NeedRequestLedger::new(
            SurrealNeedRequestRepository::new(db.clone()),
            SurrealVerificationRepository::new(db.clone()),
            LedgerConfig::default(),
        );
        let _donations = DonationService::new(
            SurrealDonationRepository::new(db.clone()),
            SurrealNeedRequestRepository::new(db.clone()),
            SurrealVerificationRepository::new(db.clone()),
            NoopNotifier,
        );
        let _reconciler = FulfillmentReconciler::new(
            SurrealDonationRepository::new(db.clone()),
            SurrealNeedRequestRepository::new(db),
        );
    }
}
