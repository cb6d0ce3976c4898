//! Agency hierarchy endpoints.
//!
//! Agency CRUD belongs to the management surface; the engine only exposes
//! the ancestor chain it uses for bonus propagation.

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::AppError;
use crate::modules::agencies::services::HierarchyWalker;

/// List the ancestors of an agency with their level distances
///
/// GET /agencies/{id}/ancestors
pub async fn list_ancestors(
    walker: web::Data<Arc<HierarchyWalker>>,
    agency_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let links = walker.ancestors_of(&agency_id).await?;

    let ancestors: Vec<_> = links
        .iter()
        .map(|link| {
            serde_json::json!({
                "agency_id": link.agency.id,
                "company_name": link.agency.company_name,
                "tier_level": link.agency.tier_level,
                "level_distance": link.level_distance,
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "ancestors": ancestors })))
}

/// Configure agency routes
pub fn configure_agency_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/agencies").route("/{id}/ancestors", web::get().to(list_ancestors)),
    );
}
