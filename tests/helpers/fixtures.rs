// Fixture builders for agencies, sales and rate rows.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use tierpay::core::Period;
use tierpay::modules::agencies::models::{Agency, AgencyStatus, CompanyType};
use tierpay::modules::rates::models::ProductRate;
use tierpay::modules::sales::models::{Sale, SaleStatus};

/// An active, invoice-registered corporation
pub fn corporate_agency(id: &str, tier_level: i32, parent: Option<&str>) -> Agency {
    let now = Utc::now();
    Agency {
        id: id.to_string(),
        company_name: format!("Agency {}", id),
        tier_level,
        parent_agency_id: parent.map(str::to_string),
        company_type: CompanyType::Corporation,
        invoice_registered: true,
        invoice_number: Some(format!("T{:013}", id.len())),
        status: AgencyStatus::Active,
        created_at: now,
        updated_at: now,
    }
}

/// An active sole proprietor without invoice registration
pub fn individual_agency(id: &str, tier_level: i32, parent: Option<&str>) -> Agency {
    Agency {
        company_type: CompanyType::Individual,
        invoice_registered: false,
        invoice_number: None,
        ..corporate_agency(id, tier_level, parent)
    }
}

/// A confirmed sale dated inside the given period
pub fn confirmed_sale(id: &str, agency_id: &str, amount: i64, period: &str) -> Sale {
    let period: Period = period.parse().expect("valid period literal");
    let sale_date = NaiveDate::from_ymd_opt(period.year(), period.month(), 15)
        .expect("mid-month date");
    let now = Utc::now();
    Sale {
        id: id.to_string(),
        agency_id: agency_id.to_string(),
        product_id: "product-default".to_string(),
        amount,
        sale_date,
        period,
        status: SaleStatus::Confirmed,
        created_at: now,
        updated_at: now,
    }
}

/// An active product-specific rate row
pub fn product_rate(product_id: &str, tier_level: i32, rate: Decimal) -> ProductRate {
    let now = Utc::now();
    ProductRate {
        id: Uuid::new_v4().to_string(),
        product_id: product_id.to_string(),
        tier_level,
        commission_rate: rate,
        is_active: true,
        valid_from: now,
        valid_until: None,
        created_at: now,
        updated_at: now,
    }
}
