//! Ledger query and payout endpoints.

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::core::{AppError, Period};
use crate::modules::commissions::services::CommissionLedger;

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub note: Option<String>,
}

/// Fetch the aggregate entry for an agency and period
///
/// GET /ledger/{agency_id}/{period}
pub async fn get_entry(
    ledger: web::Data<Arc<CommissionLedger>>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (agency_id, period) = path.into_inner();
    let period: Period = period.parse().map_err(AppError::Validation)?;
    let entry = ledger.entry(&agency_id, period).await?;

    Ok(HttpResponse::Ok().json(entry))
}

/// Record the payout of an entry's net payment
///
/// POST /ledger/{agency_id}/{period}/payments
pub async fn record_payment(
    ledger: web::Data<Arc<CommissionLedger>>,
    path: web::Path<(String, String)>,
    request: web::Json<RecordPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let (agency_id, period) = path.into_inner();
    let period: Period = period.parse().map_err(AppError::Validation)?;

    let record = ledger
        .record_payment(
            &agency_id,
            period,
            request.payment_date,
            &request.payment_method,
            request.note.clone(),
        )
        .await?;

    Ok(HttpResponse::Created().json(record))
}

/// Configure ledger routes
pub fn configure_ledger_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ledger")
            .route("/{agency_id}/{period}", web::get().to(get_entry))
            .route("/{agency_id}/{period}/payments", web::post().to(record_payment)),
    );
}
