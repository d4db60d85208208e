use serde::Serialize;

use marketsync_core::{CampaignId, WarehouseId};

/// One sales channel: a campaign and the warehouse its stock is reported for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelConfig {
    /// Operator-facing label, e.g. `FBS` or `DBS`.
    pub name: String,
    pub campaign_id: CampaignId,
    pub warehouse_id: WarehouseId,
}

impl ChannelConfig {
    pub fn new(name: impl Into<String>, campaign_id: CampaignId, warehouse_id: WarehouseId) -> Self {
        Self {
            name: name.into(),
            campaign_id,
            warehouse_id,
        }
    }
}
