//! Config layer: YAML schema + validated in-memory rules.
//!
//! This module owns:
//! - MatchRule (compiled, ordered patterns for one group or subgroup)
//! - OrgConfig (raw YAML) and ValidatedConfig (what the pipeline consumes)

pub mod org;
pub mod rule;

pub use org::{OrgConfig, ValidatedConfig};
pub use rule::{MatchRule, display_label};

use anyhow::Context;
use std::fs;
use std::path::Path;

/// Read, parse and validate a YAML config file.
pub fn load_config(path: &Path) -> anyhow::Result<ValidatedConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let raw = OrgConfig::from_yaml_str(&text)
        .with_context(|| format!("parse config file {}", path.display()))?;
    let validated = raw
        .validate_and_build()
        .with_context(|| format!("invalid config file {}", path.display()))?;

    tracing::debug!(
        groups = validated.groups.len(),
        subgroups = validated.subgroups.len(),
        additions = validated.supplemental.len(),
        "loaded config {}",
        path.display()
    );
    Ok(validated)
}
