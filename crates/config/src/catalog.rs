//! Quick tools catalogue loading
//!
//! A catalogue file lists the tools shown on the quick tools page:
//!
//! ```yaml
//! tools:
//!   - id: tool1
//!     name: GST Calculator
//!     description: Calculate GST inclusive and exclusive amounts.
//!     weblink: /tools/gst-calculator
//!     tags: [tax]
//! ```

use std::collections::HashSet;
use std::path::Path;

use maduraai_core::ToolCatalog;

use crate::ConfigError;

/// Load and validate a catalogue from a YAML file
pub fn load_tool_catalog(path: impl AsRef<Path>) -> Result<ToolCatalog, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let catalog = parse_tool_catalog(&content)?;

    tracing::info!(
        path = %path.display(),
        tools = catalog.len(),
        "Loaded tool catalogue"
    );

    Ok(catalog)
}

/// Parse and validate catalogue YAML
pub fn parse_tool_catalog(content: &str) -> Result<ToolCatalog, ConfigError> {
    let catalog: ToolCatalog = serde_yaml::from_str(content)?;

    let mut seen = HashSet::new();
    for tool in catalog.tools() {
        if tool.id.trim().is_empty() {
            return Err(ConfigError::MissingField("tools[].id".to_string()));
        }
        if tool.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("tools.{}.name", tool.id),
                message: "Name cannot be blank".to_string(),
            });
        }
        if !seen.insert(tool.id.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "tools[].id".to_string(),
                message: format!("Duplicate tool id '{}'", tool.id),
            });
        }
    }

    if catalog.is_empty() {
        tracing::warn!("Tool catalogue is empty; search will return nothing");
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
tools:
  - id: emi
    name: EMI Calculator
    description: Monthly loan installments.
    weblink: /tools/emi-calculator
    tags: [loan]
  - id: pnr
    name: PNR Status
    description: Check train booking status.
    weblink: https://www.indianrail.gov.in
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_tool_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("pnr").unwrap().is_external());
        assert!(catalog.get("pnr").unwrap().tags.is_empty());

        let hits = catalog.search("LOAN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "emi");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = r#"
tools:
  - { id: a, name: One, description: x, weblink: /a }
  - { id: a, name: Two, description: y, weblink: /b }
"#;
        assert!(matches!(
            parse_tool_catalog(yaml),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let yaml = "tools:\n  - { id: a, name: ' ', description: x, weblink: /a }\n";
        assert!(parse_tool_catalog(yaml).is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            parse_tool_catalog("tools: [ {"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let catalog = load_tool_catalog(&path).unwrap();
        assert_eq!(catalog.tools()[0].name, "EMI Calculator");

        assert!(matches!(
            load_tool_catalog(dir.path().join("missing.yaml")),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
