//! District configuration loading.

use std::path::Path;

use serde::Deserialize;

use crate::error::PipelineError;

/// Default location of the district id configuration document.
pub const DEFAULT_CONFIG_PATH: &str = "district_ids.json";

#[derive(Debug, Deserialize)]
struct DistrictConfig {
    district_ids: Vec<u32>,
}

/// Load the ordered district id list from a JSON config document.
///
/// The document must expose a `district_ids` key holding the ids to query;
/// a missing file, unreadable contents, or a missing key is a
/// [`PipelineError::Config`]. The returned order is the harvester's query
/// order.
pub fn load_district_ids(path: &Path) -> Result<Vec<u32>, PipelineError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| PipelineError::Config(format!("{}: {e}", path.display())))?;
    let config: DistrictConfig = serde_json::from_str(&raw)
        .map_err(|e| PipelineError::Config(format!("{}: {e}", path.display())))?;
    Ok(config.district_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join("district_ids.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_ids_in_declared_order() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), r#"{"district_ids": [307, 294, 265]}"#);
        assert_eq!(load_district_ids(&path).unwrap(), vec![307, 294, 265]);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_district_ids(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), r#"{"districts": [307]}"#);
        let err = load_district_ids(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "not json at all");
        let err = load_district_ids(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
