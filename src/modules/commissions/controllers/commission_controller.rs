//! Commission calculation endpoints.
//!
//! Triggered by the sale-confirmation flow (one sale) or an admin batch run
//! (whole period). Both are safe to re-fire: calculation replaces the
//! previous record set for each sale.

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::{AppError, Period};
use crate::modules::commissions::services::CommissionService;

/// Calculate commissions for one confirmed sale
///
/// POST /sales/{sale_id}/commissions
pub async fn calculate_for_sale(
    service: web::Data<Arc<CommissionService>>,
    sale_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let set = service.calculate_for_sale(&sale_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "direct": set.direct,
        "bonuses": set.bonuses,
    })))
}

/// Batch-calculate commissions for every confirmed sale in a period
///
/// POST /commissions/periods/{period}/calculate
pub async fn calculate_for_period(
    service: web::Data<Arc<CommissionService>>,
    period: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let period: Period = period.parse().map_err(AppError::Validation)?;
    let outcome = service.calculate_for_period(period).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// Configure commission calculation routes
pub fn configure_commission_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/sales/{sale_id}/commissions",
        web::post().to(calculate_for_sale),
    )
    .service(
        web::scope("/commissions")
            .route("/periods/{period}/calculate", web::post().to(calculate_for_period)),
    );
}
