// ============================================================================
// TEAM VIEWMODEL - Protocol team listing
// ============================================================================

use crate::models::ProtocolMember;
use crate::services::team_service::{self, protocol_team_query};
use crate::services::QuerySnapshot;
use crate::state::AppServices;

#[derive(Clone)]
pub struct TeamViewModel {
    services: AppServices,
}

impl TeamViewModel {
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }

    pub fn members(&self) -> QuerySnapshot<Vec<ProtocolMember>> {
        self.services.queries.snapshot(&protocol_team_query().key)
    }

    pub async fn refresh(&self) {
        let query = protocol_team_query();
        if !self.services.queries.needs_fetch(&query.key) {
            return;
        }
        let api = self.services.api.clone();
        if let Err(e) = self
            .services
            .queries
            .fetch(query, move || async move { team_service::get_protocol_team(&api).await })
            .await
        {
            log::error!("❌ [TEAM] Could not load protocol team: {}", e);
        }
    }
}
