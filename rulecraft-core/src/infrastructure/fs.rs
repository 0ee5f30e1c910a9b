// rulecraft-core/src/infrastructure/fs.rs

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::domain::rule::RuleRecord;
use crate::infrastructure::error::InfrastructureError;

/// Export document. Same `rules:` shape as `rulecraft.yaml`, so an export can
/// seed another project.
#[derive(Debug, Serialize, Deserialize)]
struct RulesDocument {
    rules: Vec<RuleRecord>,
}

/// Writes `rules` as YAML at `path`, replacing any previous export.
pub fn export_rules(path: &Path, rules: &[RuleRecord]) -> Result<(), InfrastructureError> {
    let yaml = serde_yaml::to_string(&RulesDocument {
        rules: rules.to_vec(),
    })?;
    atomic_write(path, yaml)?;
    info!(path = ?path, count = rules.len(), "Rules exported");
    Ok(())
}

pub fn import_rules(path: &Path) -> Result<Vec<RuleRecord>, InfrastructureError> {
    let content = std::fs::read_to_string(path)?;
    let doc: RulesDocument = serde_yaml::from_str(&content)?;
    Ok(doc.rules)
}

/// The target is either fully written or untouched: content goes to a temp
/// file in the same directory, which is then renamed over the target.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::fixtures;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("rules.yaml");

        atomic_write(&file_path, "Initial")?;
        atomic_write(&file_path, "Updated")?;

        assert_eq!(fs::read_to_string(file_path)?, "Updated");
        Ok(())
    }

    #[test]
    fn test_export_then_import_keeps_rules() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("export.yaml");
        let rules = fixtures::seed_rules();

        export_rules(&path, &rules)?;
        let raw = fs::read_to_string(&path)?;
        assert!(raw.starts_with("rules:"));
        assert!(raw.contains("sql_query_usr"));
        assert!(raw.contains("rule_category: warning"));

        assert_eq!(import_rules(&path)?, rules);
        Ok(())
    }
}
