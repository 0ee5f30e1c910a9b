// rulecraft-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::domain::project::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["rulecraft.yaml", "rulecraft_project_conf.yaml"];

pub const ENV_PASS_RATIO: &str = "RULECRAFT_PASS_RATIO";
pub const ENV_TEXT_EDIT_CLEARS_SQL: &str = "RULECRAFT_TEXT_EDIT_CLEARS_SQL";

// --- LOADER ---

/// Loads the project configuration. A project without a config file runs on
/// the built-in defaults.
#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Découverte du fichier principal
    let mut config = match find_main_config(project_dir) {
        Some(path) => {
            info!(path = ?path, "Loading project configuration");
            parse_config(&path)?
        }
        None => {
            debug!(dir = ?project_dir, "No configuration file, using defaults");
            ProjectConfig::default()
        }
    };

    // 2. Override via Variables d'Environnement (Pattern 'Layering')
    // Permet de faire: RULECRAFT_PASS_RATIO=0.5 rulecraft author ...
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;

    // 3. Validation finale (après overrides)
    config.validate()?;
    Ok(config)
}

pub fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

fn parse_config(path: &Path) -> Result<ProjectConfig, InfrastructureError> {
    let content = fs::read_to_string(path).map_err(|e| {
        InfrastructureError::ConfigError(format!("Failed to read {:?}: {}", path, e))
    })?;
    let config: ProjectConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Applies `RULECRAFT_*` overrides read through `lookup`.
pub fn apply_overrides(
    config: &mut ProjectConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), InfrastructureError> {
    if let Some(val) = lookup(ENV_PASS_RATIO) {
        let ratio: f64 = val.trim().parse().map_err(|_| {
            InfrastructureError::ConfigError(format!("{} is not a number: '{}'", ENV_PASS_RATIO, val))
        })?;
        info!(old = config.validation.pass_ratio, new = ratio, "Overriding pass ratio via ENV");
        config.validation.pass_ratio = ratio;
    }
    if let Some(val) = lookup(ENV_TEXT_EDIT_CLEARS_SQL) {
        let flag = parse_flag(&val).ok_or_else(|| {
            InfrastructureError::ConfigError(format!(
                "{} expects true/false, got '{}'",
                ENV_TEXT_EDIT_CLEARS_SQL, val
            ))
        })?;
        info!(new = flag, "Overriding text edit policy via ENV");
        config.workflow.text_edit_clears_sql = flag;
    }
    Ok(())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
