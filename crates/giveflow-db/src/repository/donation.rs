//! SurrealDB implementation of [`DonationRepository`].

use chrono::{DateTime, Utc};
use giveflow_core::error::GiveFlowResult;
use giveflow_core::models::donation::{CreateDonation, Donation};
use giveflow_core::repository::{DonationRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::request::{category_to_string, parse_category};

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct DonationRow {
    donor_id: String,
    category: String,
    quantity: u64,
    assigned_organization_id: Option<String>,
    assigned_request_id: Option<String>,
    assigned_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct DonationRowWithId {
    record_id: String,
    donor_id: String,
    category: String,
    quantity: u64,
    assigned_organization_id: Option<String>,
    assigned_request_id: Option<String>,
    assigned_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_request_id(value: Option<String>) -> Result<Option<Uuid>, DbError> {
    match value {
        Some(s) => Uuid::parse_str(&s)
            .map(Some)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}"))),
        None => Ok(None),
    }
}

impl DonationRow {
    fn into_donation(self, id: Uuid) -> Result<Donation, DbError> {
        Ok(Donation {
            id,
            donor_id: self.donor_id,
            category: parse_category(&self.category)?,
            quantity: self.quantity,
            assigned_organization_id: self.assigned_organization_id,
            assigned_request_id: parse_request_id(self.assigned_request_id)?,
            assigned_at: self.assigned_at,
            created_at: self.created_at,
        })
    }
}

impl DonationRowWithId {
    fn try_into_donation(self) -> Result<Donation, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Donation {
            id,
            donor_id: self.donor_id,
            category: parse_category(&self.category)?,
            quantity: self.quantity,
            assigned_organization_id: self.assigned_organization_id,
            assigned_request_id: parse_request_id(self.assigned_request_id)?,
            assigned_at: self.assigned_at,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the donation repository.
#[derive(Clone)]
pub struct SurrealDonationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDonationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> DonationRepository for SurrealDonationRepository<C> {
    async fn create(&self, input: CreateDonation) -> GiveFlowResult<Donation> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('donation', $id) SET \
                 donor_id = $donor_id, category = $category, quantity = $quantity",
            )
            .bind(("id", id_str.clone()))
            .bind(("donor_id", input.donor_id))
            .bind(("category", category_to_string(input.category).to_string()))
            .bind(("quantity", input.quantity))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<DonationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "donation".into(),
            id: id_str,
        })?;

        Ok(row.into_donation(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> GiveFlowResult<Donation> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('donation', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DonationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "donation".into(),
            id: id_str,
        })?;

        Ok(row.into_donation(id)?)
    }

    async fn list_for_donor(
        &self,
        donor_id: &str,
        pagination: Pagination,
    ) -> GiveFlowResult<PaginatedResult<Donation>> {
        let donor = donor_id.to_string();

        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM donation WHERE donor_id = $donor_id GROUP ALL")
            .bind(("donor_id", donor.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM donation \
                 WHERE donor_id = $donor_id \
                 ORDER BY created_at DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("donor_id", donor))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DonationRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_donation())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_unassigned(
        &self,
        pagination: Pagination,
    ) -> GiveFlowResult<PaginatedResult<Donation>> {
        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM donation \
                 WHERE assigned_organization_id IS NONE GROUP ALL",
            )
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM donation \
                 WHERE assigned_organization_id IS NONE \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DonationRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_donation())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_assigned_to_organization(
        &self,
        organization_id: &str,
    ) -> GiveFlowResult<Vec<Donation>> {
        let org = organization_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM donation \
                 WHERE assigned_organization_id = $organization_id \
                 ORDER BY assigned_at ASC",
            )
            .bind(("organization_id", org))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DonationRowWithId> = result.take(0).map_err(DbError::from)?;
        let donations = rows
            .into_iter()
            .map(|row| row.try_into_donation())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(donations)
    }

    async fn assign(
        &self,
        id: Uuid,
        organization_id: &str,
        request_id: Option<Uuid>,
    ) -> GiveFlowResult<Option<Donation>> {
        let id_str = id.to_string();

        // The WHERE clause makes the update a no-op when another
        // assignment already landed, so an empty result is the signal
        // that the precondition failed.
        let result = self
            .db
            .query(
                "UPDATE type::record('donation', $id) SET \
                 assigned_organization_id = $organization_id, \
                 assigned_request_id = $request_id, \
                 assigned_at = time::now() \
                 WHERE assigned_organization_id IS NONE",
            )
            .bind(("id", id_str))
            .bind(("organization_id", organization_id.to_string()))
            .bind(("request_id", request_id.map(|r| r.to_string())))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<DonationRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_donation(id)?)),
            None => Ok(None),
        }
    }
}
