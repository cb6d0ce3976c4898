// Agency read access for the commission engine.
//
// The engine never writes agency rows; the trait is deliberately limited to
// the two lookups the hierarchy walk needs.

use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::agencies::models::Agency;

/// Read-only lookup into the agency tree
#[async_trait]
pub trait AgencyRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Agency>>;

    /// Resolve the direct parent of an agency, None at the top of the tree
    async fn find_parent(&self, agency_id: &str) -> Result<Option<Agency>>;
}

/// MySQL-backed agency lookup
pub struct MySqlAgencyRepository {
    pool: MySqlPool,
}

impl MySqlAgencyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const AGENCY_COLUMNS: &str = "id, company_name, tier_level, parent_agency_id, company_type, \
     invoice_registered, invoice_number, status, created_at, updated_at";

#[async_trait]
impl AgencyRepository for MySqlAgencyRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Agency>> {
        let agency = sqlx::query_as::<_, Agency>(&format!(
            "SELECT {} FROM agencies WHERE id = ?",
            AGENCY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(agency)
    }

    async fn find_parent(&self, agency_id: &str) -> Result<Option<Agency>> {
        let parent = sqlx::query_as::<_, Agency>(&format!(
            "SELECT {} FROM agencies \
             WHERE id = (SELECT parent_agency_id FROM agencies WHERE id = ?)",
            AGENCY_COLUMNS
        ))
        .bind(agency_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(parent)
    }
}
