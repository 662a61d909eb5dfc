//! Campaign definition loader.

use std::path::Path;

use saga_core::CampaignDefinition;

use crate::loaders::{LoadResult, read_ron};

/// Loader for the campaign definition (`campaign.ron`).
pub struct CampaignLoader;

impl CampaignLoader {
    pub fn load(path: &Path) -> LoadResult<CampaignDefinition> {
        let campaign: CampaignDefinition = read_ron(path, "campaign")?;
        if campaign.id.is_empty() {
            anyhow::bail!("campaign in {} has an empty id", path.display());
        }
        Ok(campaign)
    }
}
