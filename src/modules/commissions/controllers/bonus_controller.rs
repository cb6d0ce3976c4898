//! Hierarchy bonus approval endpoints.
//!
//! Approval is the admin sign-off that merges a pending bonus into the
//! beneficiary's ledger totals.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::core::{AppError, Period};
use crate::modules::commissions::services::CommissionLedger;

#[derive(Debug, Deserialize)]
pub struct ApproveBonusRequest {
    pub approved_by: String,
}

/// Approve one pending bonus
///
/// POST /bonuses/{id}/approve
pub async fn approve_bonus(
    ledger: web::Data<Arc<CommissionLedger>>,
    bonus_id: web::Path<String>,
    request: web::Json<ApproveBonusRequest>,
) -> Result<HttpResponse, AppError> {
    let entry = ledger.on_bonus_approved(&bonus_id, &request.approved_by).await?;

    Ok(HttpResponse::Ok().json(entry))
}

/// Approve every pending bonus in a period
///
/// POST /bonuses/approve-all/{period}
pub async fn approve_all_pending(
    ledger: web::Data<Arc<CommissionLedger>>,
    period: web::Path<String>,
    request: web::Json<ApproveBonusRequest>,
) -> Result<HttpResponse, AppError> {
    let period: Period = period.parse().map_err(AppError::Validation)?;
    let outcome = ledger.approve_all_pending(period, &request.approved_by).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// List bonuses for a period
///
/// GET /bonuses/{period}
pub async fn list_bonuses(
    ledger: web::Data<Arc<CommissionLedger>>,
    period: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let period: Period = period.parse().map_err(AppError::Validation)?;
    let bonuses = ledger.bonuses_for_period(period).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "bonuses": bonuses })))
}

/// Configure bonus routes
pub fn configure_bonus_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bonuses")
            .route("/approve-all/{period}", web::post().to(approve_all_pending))
            .route("/{id}/approve", web::post().to(approve_bonus))
            .route("/{period}", web::get().to(list_bonuses)),
    );
}
