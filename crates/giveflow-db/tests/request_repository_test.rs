//! Integration tests for the need request repository using in-memory
//! SurrealDB.

use giveflow_core::error::GiveFlowError;
use giveflow_core::models::request::{
    CreateNeedRequest, RequestDetails, RequestStatus, ResourceCategory, UrgencyLevel,
};
use giveflow_core::repository::NeedRequestRepository;
use giveflow_db::repository::SurrealNeedRequestRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    giveflow_db::run_migrations(&db).await.unwrap();
    db
}

fn food_request(organization_id: &str, quantity: u64) -> CreateNeedRequest {
    CreateNeedRequest {
        organization_id: organization_id.into(),
        required_quantity: quantity,
        urgency: UrgencyLevel::High,
        description: "Cooked meals for flood relief camp".into(),
        needed_by: None,
        details: RequestDetails::Food {
            beneficiaries: 120,
            perishable_ok: false,
            dietary_notes: Some("vegetarian only".into()),
        },
    }
}

#[tokio::test]
async fn create_and_get_request() {
    let db = setup().await;
    let repo = SurrealNeedRequestRepository::new(db);

    let request = repo.create(food_request("org-1", 500)).await.unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.category(), ResourceCategory::Food);
    assert_eq!(request.required_quantity, 500);

    let fetched = repo.get_by_id(request.id).await.unwrap();
    assert_eq!(fetched.id, request.id);
    match fetched.details {
        RequestDetails::Food {
            beneficiaries,
            perishable_ok,
            ref dietary_notes,
        } => {
            assert_eq!(beneficiaries, 120);
            assert!(!perishable_ok);
            assert_eq!(dietary_notes.as_deref(), Some("vegetarian only"));
        }
        ref other => panic!("expected food details, got {other:?}"),
    }
}

#[tokio::test]
async fn category_follows_details_variant() {
    let db = setup().await;
    let repo = SurrealNeedRequestRepository::new(db);

    let request = repo
        .create(CreateNeedRequest {
            organization_id: "org-2".into(),
            required_quantity: 40,
            urgency: UrgencyLevel::Medium,
            description: "Insulin pens for community clinic".into(),
            needed_by: None,
            details: RequestDetails::Medical {
                item_name: "insulin pen".into(),
                prescription_required: true,
            },
        })
        .await
        .unwrap();

    assert_eq!(request.category(), ResourceCategory::Medical);

    let fetched = repo.get_by_id(request.id).await.unwrap();
    assert_eq!(fetched.category(), ResourceCategory::Medical);
    assert!(matches!(
        fetched.details,
        RequestDetails::Medical {
            prescription_required: true,
            ..
        }
    ));
}

#[tokio::test]
async fn list_for_organization_is_scoped_and_ordered() {
    let db = setup().await;
    let repo = SurrealNeedRequestRepository::new(db);

    let first = repo.create(food_request("org-3", 100)).await.unwrap();
    let second = repo.create(food_request("org-3", 200)).await.unwrap();
    repo.create(food_request("someone-else", 300)).await.unwrap();

    let requests = repo.list_for_organization("org-3").await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].id, first.id);
    assert_eq!(requests[1].id, second.id);
}

#[tokio::test]
async fn set_status_updates_and_touches_timestamp() {
    let db = setup().await;
    let repo = SurrealNeedRequestRepository::new(db);

    let request = repo.create(food_request("org-4", 50)).await.unwrap();

    let approved = repo
        .set_status(request.id, RequestStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, RequestStatus::Approved);
    assert!(approved.updated_at >= request.updated_at);

    let fulfilled = repo
        .set_status(request.id, RequestStatus::Fulfilled)
        .await
        .unwrap();
    assert_eq!(fulfilled.status, RequestStatus::Fulfilled);
}

#[tokio::test]
async fn set_status_missing_request_is_not_found() {
    let db = setup().await;
    let repo = SurrealNeedRequestRepository::new(db);

    let result = repo.set_status(Uuid::new_v4(), RequestStatus::Approved).await;
    assert!(matches!(result, Err(GiveFlowError::NotFound { .. })));
}
