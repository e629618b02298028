//! Integration tests for the need-request ledger against in-memory
//! SurrealDB repositories.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use giveflow_core::error::GiveFlowError;
use giveflow_core::models::organization::{
    CreateVerificationRecord, DocumentKind, DocumentRef, VerificationDecision,
};
use giveflow_core::models::request::{
    CreateNeedRequest, RequestDetails, RequestStatus, ResourceCategory, UrgencyLevel,
};
use giveflow_core::repository::VerificationRepository;
use giveflow_core::window::TimeWindow;
use giveflow_db::repository::{SurrealNeedRequestRepository, SurrealVerificationRepository};
use giveflow_match::{LedgerConfig, NeedRequestLedger};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;
type TestLedger = NeedRequestLedger<SurrealNeedRequestRepository<Db>, SurrealVerificationRepository<Db>>;

/// Helper: spin up in-memory DB, run migrations, build the ledger.
async fn setup() -> (TestLedger, Surreal<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    giveflow_db::run_migrations(&db).await.unwrap();

    let ledger = NeedRequestLedger::new(
        SurrealNeedRequestRepository::new(db.clone()),
        SurrealVerificationRepository::new(db.clone()),
        LedgerConfig::default(),
    );
    (ledger, db)
}

/// Push an organization through submission + approval.
async fn approve_org(db: &Surreal<Db>, organization_id: &str) {
    let repo = SurrealVerificationRepository::new(db.clone());
    let record = repo
        .create(submission(organization_id))
        .await
        .unwrap();
    repo.decide(
        record.id,
        VerificationDecision::Approve {
            reviewer_id: "admin-1".into(),
        },
    )
    .await
    .unwrap();
}

/// Submit a registration without deciding it.
async fn pending_org(db: &Surreal<Db>, organization_id: &str) {
    let repo = SurrealVerificationRepository::new(db.clone());
    repo.create(submission(organization_id)).await.unwrap();
}

fn submission(organization_id: &str) -> CreateVerificationRecord {
    CreateVerificationRecord {
        organization_id: organization_id.into(),
        organization_name: "Annapurna Kitchen".into(),
        registration_number: "NGO-2022-0301".into(),
        city: "Nagpur".into(),
        state: "Maharashtra".into(),
        documents: vec![
            DocumentRef {
                kind: DocumentKind::RegistrationCertificate,
                uri: "s3://docs/ak/cert.pdf".into(),
            },
            DocumentRef {
                kind: DocumentKind::AddressProof,
                uri: "s3://docs/ak/address.pdf".into(),
            },
            DocumentRef {
                kind: DocumentKind::IdentityProof,
                uri: "s3://docs/ak/identity.pdf".into(),
            },
        ],
    }
}

fn meal_request(organization_id: &str, quantity: u64) -> CreateNeedRequest {
    CreateNeedRequest {
        organization_id: organization_id.into(),
        required_quantity: quantity,
        urgency: UrgencyLevel::High,
        description: "Cooked meal packets for the municipal night shelter".into(),
        needed_by: None,
        details: RequestDetails::Food {
            beneficiaries: 80,
            perishable_ok: true,
            dietary_notes: None,
        },
    }
}

fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

#[tokio::test]
async fn create_request_gated_on_approval() {
    let (ledger, db) = setup().await;

    // Pending organizations cannot declare needs yet.
    pending_org(&db, "org-1").await;
    let err = ledger
        .create_request(meal_request("org-1", 50))
        .await
        .unwrap_err();
    assert!(matches!(err, GiveFlowError::PermissionDenied { .. }));

    // Approval unlocks the capability.
    let repo = SurrealVerificationRepository::new(db.clone());
    let record = repo
        .latest_for_organization("org-1")
        .await
        .unwrap()
        .unwrap();
    repo.decide(
        record.id,
        VerificationDecision::Approve {
            reviewer_id: "admin-1".into(),
        },
    )
    .await
    .unwrap();

    let request = ledger
        .create_request(meal_request("org-1", 50))
        .await
        .unwrap();
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.category(), ResourceCategory::Food);
    assert_eq!(request.required_quantity, 50);
}

#[tokio::test]
async fn create_request_for_unknown_organization_is_not_found() {
    let (ledger, _db) = setup().await;

    let err = ledger
        .create_request(meal_request("never-registered", 10))
        .await
        .unwrap_err();
    assert!(matches!(err, GiveFlowError::NotFound { .. }));
}

#[tokio::test]
async fn create_request_validates_input() {
    let (ledger, db) = setup().await;
    approve_org(&db, "org-2").await;

    let err = ledger
        .create_request(meal_request("org-2", 0))
        .await
        .unwrap_err();
    assert!(
        matches!(err, GiveFlowError::Validation { ref field, .. } if field == "required_quantity"),
        "unexpected error: {err}"
    );

    let mut too_short = meal_request("org-2", 10);
    too_short.description = "too short".into();
    let err = ledger.create_request(too_short).await.unwrap_err();
    assert!(
        matches!(err, GiveFlowError::Validation { ref field, .. } if field == "description"),
        "unexpected error: {err}"
    );

    let mut too_long = meal_request("org-2", 10);
    too_long.description = "x".repeat(1001);
    let err = ledger.create_request(too_long).await.unwrap_err();
    assert!(
        matches!(err, GiveFlowError::Validation { ref field, .. } if field == "description"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn list_requests_applies_the_time_window() {
    let (ledger, db) = setup().await;
    approve_org(&db, "org-3").await;

    ledger
        .create_request(meal_request("org-3", 20))
        .await
        .unwrap();
    ledger
        .create_request(meal_request("org-3", 30))
        .await
        .unwrap();

    let all = ledger.list_requests("org-3", None, now()).await.unwrap();
    assert_eq!(all.len(), 2);

    // Both requests were created just now, so they sit inside every
    // trailing window anchored at the present...
    let recent = ledger
        .list_requests("org-3", Some(TimeWindow::LastSevenDays), now())
        .await
        .unwrap();
    assert_eq!(recent.len(), 2);

    // ...and outside a seven-day window anchored a month ahead.
    let later = (Utc::now() + Duration::days(30)).fixed_offset();
    let stale = ledger
        .list_requests("org-3", Some(TimeWindow::LastSevenDays), later)
        .await
        .unwrap();
    assert!(stale.is_empty());

    let next_quarter = (Utc::now() + Duration::days(90)).fixed_offset();
    let other_month = ledger
        .list_requests("org-3", Some(TimeWindow::ThisMonth), next_quarter)
        .await
        .unwrap();
    assert!(other_month.is_empty());
}

#[tokio::test]
async fn get_request_does_not_leak_foreign_ids() {
    let (ledger, db) = setup().await;
    approve_org(&db, "org-a").await;
    approve_org(&db, "org-b").await;

    let request = ledger
        .create_request(meal_request("org-a", 25))
        .await
        .unwrap();

    let own = ledger.get_request("org-a", request.id).await.unwrap();
    assert_eq!(own.id, request.id);

    // A foreign request and a nonexistent one must be indistinguishable
    // to the probing caller.
    let foreign = ledger
        .get_request("org-b", request.id)
        .await
        .unwrap_err();
    let missing = ledger
        .get_request("org-b", Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(foreign, GiveFlowError::PermissionDenied { .. }));
    assert!(matches!(missing, GiveFlowError::PermissionDenied { .. }));
    assert_eq!(foreign.to_string(), missing.to_string());
}

#[tokio::test]
async fn set_status_marks_a_request_fulfilled() {
    let (ledger, db) = setup().await;
    approve_org(&db, "org-4").await;

    let request = ledger
        .create_request(meal_request("org-4", 60))
        .await
        .unwrap();

    let fulfilled = ledger
        .set_status(request.id, RequestStatus::Fulfilled)
        .await
        .unwrap();
    assert_eq!(fulfilled.status, RequestStatus::Fulfilled);

    let err = ledger
        .set_status(Uuid::new_v4(), RequestStatus::Fulfilled)
        .await
        .unwrap_err();
    assert!(matches!(err, GiveFlowError::NotFound { .. }));
}
