//! SurrealDB implementation of [`NeedRequestRepository`].

use chrono::{DateTime, Utc};
use giveflow_core::error::GiveFlowResult;
use giveflow_core::models::request::{
    CreateNeedRequest, NeedRequest, RequestDetails, RequestStatus, ResourceCategory, UrgencyLevel,
};
use giveflow_core::repository::NeedRequestRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct RequestRow {
    organization_id: String,
    required_quantity: u64,
    urgency: String,
    description: String,
    needed_by: Option<DateTime<Utc>>,
    details: serde_json::Value,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct RequestRowWithId {
    record_id: String,
    organization_id: String,
    required_quantity: u64,
    urgency: String,
    description: String,
    needed_by: Option<DateTime<Utc>>,
    details: serde_json::Value,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_urgency(s: &str) -> Result<UrgencyLevel, DbError> {
    match s {
        "Low" => Ok(UrgencyLevel::Low),
        "Medium" => Ok(UrgencyLevel::Medium),
        "High" => Ok(UrgencyLevel::High),
        other => Err(DbError::Decode(format!("unknown urgency level: {other}"))),
    }
}

fn urgency_to_string(u: UrgencyLevel) -> &'static str {
    match u {
        UrgencyLevel::Low => "Low",
        UrgencyLevel::Medium => "Medium",
        UrgencyLevel::High => "High",
    }
}

fn parse_status(s: &str) -> Result<RequestStatus, DbError> {
    match s {
        "Pending" => Ok(RequestStatus::Pending),
        "Approved" => Ok(RequestStatus::Approved),
        "Fulfilled" => Ok(RequestStatus::Fulfilled),
        "Rejected" => Ok(RequestStatus::Rejected),
        other => Err(DbError::Decode(format!("unknown request status: {other}"))),
    }
}

fn status_to_string(s: RequestStatus) -> &'static str {
    match s {
        RequestStatus::Pending => "Pending",
        RequestStatus::Approved => "Approved",
        RequestStatus::Fulfilled => "Fulfilled",
        RequestStatus::Rejected => "Rejected",
    }
}

pub(crate) fn category_to_string(c: ResourceCategory) -> &'static str {
    match c {
        ResourceCategory::Food => "Food",
        ResourceCategory::Clothing => "Clothing",
        ResourceCategory::Medical => "Medical",
        ResourceCategory::Education => "Education",
        ResourceCategory::Other => "Other",
    }
}

pub(crate) fn parse_category(s: &str) -> Result<ResourceCategory, DbError> {
    match s {
        "Food" => Ok(ResourceCategory::Food),
        "Clothing" => Ok(ResourceCategory::Clothing),
        "Medical" => Ok(ResourceCategory::Medical),
        "Education" => Ok(ResourceCategory::Education),
        "Other" => Ok(ResourceCategory::Other),
        other => Err(DbError::Decode(format!("unknown resource category: {other}"))),
    }
}

fn decode_details(value: serde_json::Value) -> Result<RequestDetails, DbError> {
    serde_json::from_value(value)
        .map_err(|e| DbError::Decode(format!("malformed request details: {e}")))
}

fn encode_details(details: &RequestDetails) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(details)
        .map_err(|e| DbError::Decode(format!("unencodable request details: {e}")))
}

impl RequestRow {
    fn into_request(self, id: Uuid) -> Result<NeedRequest, DbError> {
        Ok(NeedRequest {
            id,
            organization_id: self.organization_id,
            required_quantity: self.required_quantity,
            urgency: parse_urgency(&self.urgency)?,
            description: self.description,
            needed_by: self.needed_by,
            details: decode_details(self.details)?,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl RequestRowWithId {
    fn try_into_request(self) -> Result<NeedRequest, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(NeedRequest {
            id,
            organization_id: self.organization_id,
            required_quantity: self.required_quantity,
            urgency: parse_urgency(&self.urgency)?,
            description: self.description,
            needed_by: self.needed_by,
            details: decode_details(self.details)?,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the need request repository.
#[derive(Clone)]
pub struct SurrealNeedRequestRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealNeedRequestRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> NeedRequestRepository for SurrealNeedRequestRepository<C> {
    async fn create(&self, input: CreateNeedRequest) -> GiveFlowResult<NeedRequest> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let category = category_to_string(input.details.category());
        let details = encode_details(&input.details)?;

        let result = self
            .db
            .query(
                "CREATE type::record('need_request', $id) SET \
                 organization_id = $organization_id, \
                 category = $category, \
                 required_quantity = $required_quantity, \
                 urgency = $urgency, \
                 description = $description, \
                 needed_by = $needed_by, \
                 details = $details, \
                 status = 'Pending'",
            )
            .bind(("id", id_str.clone()))
            .bind(("organization_id", input.organization_id))
            .bind(("category", category.to_string()))
            .bind(("required_quantity", input.required_quantity))
            .bind(("urgency", urgency_to_string(input.urgency).to_string()))
            .bind(("description", input.description))
            .bind(("needed_by", input.needed_by))
            .bind(("details", details))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<RequestRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "need_request".into(),
            id: id_str,
        })?;

        Ok(row.into_request(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> GiveFlowResult<NeedRequest> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('need_request', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RequestRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "need_request".into(),
            id: id_str,
        })?;

        Ok(row.into_request(id)?)
    }

    async fn list_for_organization(
        &self,
        organization_id: &str,
    ) -> GiveFlowResult<Vec<NeedRequest>> {
        let org = organization_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM need_request \
                 WHERE organization_id = $organization_id \
                 ORDER BY created_at ASC",
            )
            .bind(("organization_id", org))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RequestRowWithId> = result.take(0).map_err(DbError::from)?;
        let requests = rows
            .into_iter()
            .map(|row| row.try_into_request())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(requests)
    }

    async fn set_status(&self, id: Uuid, status: RequestStatus) -> GiveFlowResult<NeedRequest> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('need_request', $id) SET \
                 status = $status, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("status", status_to_string(status).to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<RequestRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "need_request".into(),
            id: id_str,
        })?;

        Ok(row.into_request(id)?)
    }
}
