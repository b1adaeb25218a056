use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use crate::error::SeedError;
use crate::profile::Profile;

/// Profiles bundled with the crate, used when no seed file is given.
pub const EMBEDDED_SEED: &str = include_str!("../data/lawyers.json");

pub fn parse_seed(text: &str) -> Result<Vec<Profile>, SeedError> {
    let profiles: Vec<Profile> = serde_json::from_str(text)?;
    debug!(count = profiles.len(), "parsed seed profiles");
    Ok(profiles)
}

pub fn embedded() -> Result<Vec<Profile>, SeedError> {
    parse_seed(EMBEDDED_SEED)
}

#[tracing::instrument(skip(path))]
pub fn load_seed_file(path: &Path) -> anyhow::Result<Vec<Profile>> {
    info!(seed = %path.display(), "loading seed profiles");
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_seed(&text).with_context(|| format!("failed parsing {}", path.display()))
}
