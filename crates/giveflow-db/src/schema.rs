//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation, and quantities carry a
//! positivity ASSERT mirroring the domain invariant.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Verification records (append-only per organization)
-- =======================================================================
DEFINE TABLE verification_record SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE verification_record TYPE string;
DEFINE FIELD organization_name ON TABLE verification_record TYPE string;
DEFINE FIELD registration_number ON TABLE verification_record \
    TYPE string;
DEFINE FIELD city ON TABLE verification_record TYPE string;
DEFINE FIELD state ON TABLE verification_record TYPE string;
DEFINE FIELD documents ON TABLE verification_record TYPE array;
DEFINE FIELD documents.* ON TABLE verification_record TYPE object;
DEFINE FIELD documents.*.kind ON TABLE verification_record TYPE string \
    ASSERT $value IN ['RegistrationCertificate', 'AddressProof', \
    'IdentityProof'];
DEFINE FIELD documents.*.uri ON TABLE verification_record TYPE string;
DEFINE FIELD status ON TABLE verification_record TYPE string \
    ASSERT $value IN ['Pending', 'Approved', 'Rejected'];
DEFINE FIELD decided_by ON TABLE verification_record \
    TYPE option<string>;
DEFINE FIELD decided_at ON TABLE verification_record \
    TYPE option<datetime>;
DEFINE FIELD rejection_reason ON TABLE verification_record \
    TYPE option<string>;
DEFINE FIELD submitted_at ON TABLE verification_record TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE verification_record TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_verification_org ON TABLE verification_record \
    COLUMNS organization_id, submitted_at;

-- =======================================================================
-- Need-requests (owned by verified organizations, never deleted)
-- =======================================================================
DEFINE TABLE need_request SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE need_request TYPE string;
DEFINE FIELD category ON TABLE need_request TYPE string \
    ASSERT $value IN ['Food', 'Clothing', 'Medical', 'Education', \
    'Other'];
DEFINE FIELD required_quantity ON TABLE need_request TYPE int \
    ASSERT $value > 0;
DEFINE FIELD urgency ON TABLE need_request TYPE string \
    ASSERT $value IN ['Low', 'Medium', 'High'];
DEFINE FIELD description ON TABLE need_request TYPE string;
DEFINE FIELD needed_by ON TABLE need_request TYPE option<datetime>;
DEFINE FIELD details ON TABLE need_request TYPE object FLEXIBLE;
DEFINE FIELD status ON TABLE need_request TYPE string \
    ASSERT $value IN ['Pending', 'Approved', 'Fulfilled', 'Rejected'];
DEFINE FIELD created_at ON TABLE need_request TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE need_request TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_request_org ON TABLE need_request \
    COLUMNS organization_id, created_at;

-- =======================================================================
-- Donations (assignment fields set at most once)
-- =======================================================================
DEFINE TABLE donation SCHEMAFULL;
DEFINE FIELD donor_id ON TABLE donation TYPE string;
DEFINE FIELD category ON TABLE donation TYPE string \
    ASSERT $value IN ['Food', 'Clothing', 'Medical', 'Education', \
    'Other'];
DEFINE FIELD quantity ON TABLE donation TYPE int ASSERT $value > 0;
DEFINE FIELD assigned_organization_id ON TABLE donation \
    TYPE option<string>;
DEFINE FIELD assigned_request_id ON TABLE donation TYPE option<string>;
DEFINE FIELD assigned_at ON TABLE donation TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE donation TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_donation_donor ON TABLE donation \
    COLUMNS donor_id, created_at;
DEFINE INDEX idx_donation_assigned_org ON TABLE donation \
    COLUMNS assigned_organization_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn schema_v1_defines_all_tables() {
        for table in ["verification_record", "need_request", "donation"] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table definition for {table}"
            );
        }
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
