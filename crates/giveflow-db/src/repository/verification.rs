//! SurrealDB implementation of [`VerificationRepository`].

use chrono::{DateTime, Utc};
use giveflow_core::error::GiveFlowResult;
use giveflow_core::models::organization::{
    CreateVerificationRecord, DocumentKind, DocumentRef, VerificationDecision,
    VerificationRecord, VerificationStatus,
};
use giveflow_core::repository::VerificationRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side document reference.
#[derive(Debug, SurrealValue)]
struct DocumentRow {
    kind: String,
    uri: String,
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct VerificationRow {
    organization_id: String,
    organization_name: String,
    registration_number: String,
    city: String,
    state: String,
    documents: Vec<DocumentRow>,
    status: String,
    decided_by: Option<String>,
    decided_at: Option<DateTime<Utc>>,
    rejection_reason: Option<String>,
    submitted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct VerificationRowWithId {
    record_id: String,
    organization_id: String,
    organization_name: String,
    registration_number: String,
    city: String,
    state: String,
    documents: Vec<DocumentRow>,
    status: String,
    decided_by: Option<String>,
    decided_at: Option<DateTime<Utc>>,
    rejection_reason: Option<String>,
    submitted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<VerificationStatus, DbError> {
    match s {
        "Pending" => Ok(VerificationStatus::Pending),
        "Approved" => Ok(VerificationStatus::Approved),
        "Rejected" => Ok(VerificationStatus::Rejected),
        other => Err(DbError::Decode(format!(
            "unknown verification status: {other}"
        ))),
    }
}

fn status_to_string(s: VerificationStatus) -> &'static str {
    match s {
        VerificationStatus::Pending => "Pending",
        VerificationStatus::Approved => "Approved",
        VerificationStatus::Rejected => "Rejected",
    }
}

fn parse_document_kind(s: &str) -> Result<DocumentKind, DbError> {
    match s {
        "RegistrationCertificate" => Ok(DocumentKind::RegistrationCertificate),
        "AddressProof" => Ok(DocumentKind::AddressProof),
        "IdentityProof" => Ok(DocumentKind::IdentityProof),
        other => Err(DbError::Decode(format!("unknown document kind: {other}"))),
    }
}

fn document_kind_to_string(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::RegistrationCertificate => "RegistrationCertificate",
        DocumentKind::AddressProof => "AddressProof",
        DocumentKind::IdentityProof => "IdentityProof",
    }
}

fn documents_to_rows(documents: &[DocumentRef]) -> Vec<DocumentRow> {
    documents
        .iter()
        .map(|d| DocumentRow {
            kind: document_kind_to_string(d.kind).to_string(),
            uri: d.uri.clone(),
        })
        .collect()
}

fn rows_to_documents(rows: Vec<DocumentRow>) -> Result<Vec<DocumentRef>, DbError> {
    rows.into_iter()
        .map(|row| {
            Ok(DocumentRef {
                kind: parse_document_kind(&row.kind)?,
                uri: row.uri,
            })
        })
        .collect()
}

impl VerificationRow {
    fn into_record(self, id: Uuid) -> Result<VerificationRecord, DbError> {
        Ok(VerificationRecord {
            id,
            organization_id: self.organization_id,
            organization_name: self.organization_name,
            registration_number: self.registration_number,
            city: self.city,
            state: self.state,
            documents: rows_to_documents(self.documents)?,
            status: parse_status(&self.status)?,
            decided_by: self.decided_by,
            decided_at: self.decided_at,
            rejection_reason: self.rejection_reason,
            submitted_at: self.submitted_at,
            updated_at: self.updated_at,
        })
    }
}

impl VerificationRowWithId {
    fn try_into_record(self) -> Result<VerificationRecord, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(VerificationRecord {
            id,
            organization_id: self.organization_id,
            organization_name: self.organization_name,
            registration_number: self.registration_number,
            city: self.city,
            state: self.state,
            documents: rows_to_documents(self.documents)?,
            status: parse_status(&self.status)?,
            decided_by: self.decided_by,
            decided_at: self.decided_at,
            rejection_reason: self.rejection_reason,
            submitted_at: self.submitted_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the verification record repository.
#[derive(Clone)]
pub struct SurrealVerificationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealVerificationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> VerificationRepository for SurrealVerificationRepository<C> {
    async fn create(&self, input: CreateVerificationRecord) -> GiveFlowResult<VerificationRecord> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('verification_record', $id) SET \
                 organization_id = $organization_id, \
                 organization_name = $organization_name, \
                 registration_number = $registration_number, \
                 city = $city, state = $state, \
                 documents = $documents, status = 'Pending'",
            )
            .bind(("id", id_str.clone()))
            .bind(("organization_id", input.organization_id))
            .bind(("organization_name", input.organization_name))
            .bind(("registration_number", input.registration_number))
            .bind(("city", input.city))
            .bind(("state", input.state))
            .bind(("documents", documents_to_rows(&input.documents)))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<VerificationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "verification_record".into(),
            id: id_str,
        })?;

        Ok(row.into_record(id)?)
    }

    async fn latest_for_organization(
        &self,
        organization_id: &str,
    ) -> GiveFlowResult<Option<VerificationRecord>> {
        let org = organization_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM verification_record \
                 WHERE organization_id = $organization_id \
                 ORDER BY submitted_at DESC LIMIT 1",
            )
            .bind(("organization_id", org))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<VerificationRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_record()?)),
            None => Ok(None),
        }
    }

    async fn history_for_organization(
        &self,
        organization_id: &str,
    ) -> GiveFlowResult<Vec<VerificationRecord>> {
        let org = organization_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM verification_record \
                 WHERE organization_id = $organization_id \
                 ORDER BY submitted_at ASC",
            )
            .bind(("organization_id", org))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<VerificationRowWithId> = result.take(0).map_err(DbError::from)?;
        let records = rows
            .into_iter()
            .map(|row| row.try_into_record())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(records)
    }

    async fn decide(
        &self,
        id: Uuid,
        decision: VerificationDecision,
    ) -> GiveFlowResult<VerificationRecord> {
        let id_str = id.to_string();
        let status = status_to_string(decision.status()).to_string();
        let reviewer = decision.reviewer_id().to_string();

        let mut sets = vec![
            "status = $status",
            "decided_by = $reviewer",
            "decided_at = time::now()",
            "updated_at = time::now()",
        ];
        let reason = match &decision {
            VerificationDecision::Reject { reason, .. } => {
                sets.push("rejection_reason = $reason");
                Some(reason.clone())
            }
            VerificationDecision::Approve { .. } => None,
        };

        let query = format!(
            "UPDATE type::record('verification_record', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("status", status))
            .bind(("reviewer", reviewer));

        if let Some(reason) = reason {
            builder = builder.bind(("reason", reason));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<VerificationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "verification_record".into(),
            id: id_str,
        })?;

        Ok(row.into_record(id)?)
    }
}
