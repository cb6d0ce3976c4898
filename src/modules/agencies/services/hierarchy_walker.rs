use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::agencies::models::Agency;
use crate::modules::agencies::repositories::AgencyRepository;

/// Hard ceiling on how far up the parent chain bonuses propagate.
pub const MAX_ANCESTOR_DEPTH: usize = 4;

/// One ancestor of a selling agency, with its distance from the seller
/// (1 = direct parent).
#[derive(Debug, Clone)]
pub struct AncestorLink {
    pub agency: Agency,
    pub level_distance: u32,
}

/// Walks the agency parent chain upward for hierarchy-bonus propagation.
///
/// The walk is re-run from the repository on every call; nothing is cached,
/// so structural changes between calls are always observed.
pub struct HierarchyWalker {
    agencies: Arc<dyn AgencyRepository>,
}

impl HierarchyWalker {
    pub fn new(agencies: Arc<dyn AgencyRepository>) -> Self {
        Self { agencies }
    }

    /// Returns the ancestors of `agency_id` ordered by increasing distance,
    /// stopping at `MAX_ANCESTOR_DEPTH` links no matter how deep the tree is.
    ///
    /// A parent pointer that revisits an already-seen agency fails with
    /// `CycleDetected`; a dangling parent pointer ends the walk early.
    pub async fn ancestors_of(&self, agency_id: &str) -> Result<Vec<AncestorLink>> {
        let start = self
            .agencies
            .find_by_id(agency_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Agency {}", agency_id)))?;

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(start.id.clone());

        let mut links = Vec::new();
        let mut current = start;

        while links.len() < MAX_ANCESTOR_DEPTH {
            let Some(parent_id) = current.parent_agency_id.clone() else {
                break;
            };

            if !visited.insert(parent_id.clone()) {
                warn!(
                    agency_id = %agency_id,
                    revisited = %parent_id,
                    "parent chain revisits an agency, aborting walk"
                );
                return Err(AppError::cycle_detected(format!(
                    "Parent chain of agency {} revisits {}",
                    agency_id, parent_id
                )));
            }

            let Some(parent) = self.agencies.find_by_id(&parent_id).await? else {
                // Dangling pointer: treat as the top of the chain rather than
                // failing the whole calculation.
                warn!(
                    agency_id = %agency_id,
                    missing_parent = %parent_id,
                    "parent agency missing, stopping walk"
                );
                break;
            };

            links.push(AncestorLink {
                agency: parent.clone(),
                level_distance: (links.len() + 1) as u32,
            });
            current = parent;
        }

        Ok(links)
    }
}
