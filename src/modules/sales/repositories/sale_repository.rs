use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{Period, Result};
use crate::modules::sales::models::Sale;

/// Read access to recorded sales
#[async_trait]
pub trait SaleRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Sale>>;

    /// All confirmed sales in a period, for the monthly batch run
    async fn list_confirmed_by_period(&self, period: Period) -> Result<Vec<Sale>>;
}

/// MySQL-backed sale lookup
pub struct MySqlSaleRepository {
    pool: MySqlPool,
}

impl MySqlSaleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SALE_COLUMNS: &str =
    "id, agency_id, product_id, amount, sale_date, period, status, created_at, updated_at";

#[async_trait]
impl SaleRepository for MySqlSaleRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {} FROM sales WHERE id = ?",
            SALE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    async fn list_confirmed_by_period(&self, period: Period) -> Result<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {} FROM sales WHERE period = ? AND status = 'confirmed' ORDER BY sale_date",
            SALE_COLUMNS
        ))
        .bind(period.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}
