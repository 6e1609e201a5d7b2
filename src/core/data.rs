//! RON data file loading shared by the player, enemy and level registries.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::error::DataLoadError;

/// Root directory of all data files.
pub const DATA_DIR: &str = "assets/data";

/// Parse a RON document, tagging errors with `origin`.
pub fn parse_ron<T: DeserializeOwned>(origin: &str, contents: &str) -> Result<T, DataLoadError> {
    ron::from_str(contents).map_err(|e| DataLoadError::Parse {
        path: origin.to_string(),
        details: e.to_string(),
    })
}

/// Read and parse a single RON file.
pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::NotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::Read {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    parse_ron(&path.display().to_string(), &contents)
}

/// Reject a delay that a timer could not be built from.
pub fn check_delay(origin: &str, field: &str, secs: f32) -> Result<(), DataLoadError> {
    if secs.is_finite() && secs >= 0.0 {
        return Ok(());
    }
    Err(DataLoadError::Invalid {
        path: origin.to_string(),
        details: format!("{field} must be a finite, non-negative number of seconds, got {secs}"),
    })
}

/// Load every `.ron` file in `dir`, keyed by file stem.
///
/// A file that fails to parse is returned as an error in its slot so the
/// caller can log it and keep the rest.
pub fn load_ron_dir<T: DeserializeOwned>(
    dir: &Path,
) -> Result<Vec<(String, Result<T, DataLoadError>)>, DataLoadError> {
    if !dir.exists() {
        return Err(DataLoadError::NotFound(dir.display().to_string()));
    }

    let entries = fs::read_dir(dir).map_err(|e| DataLoadError::Read {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    let mut loaded = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        loaded.push((stem.to_string(), load_ron_file(&path)));
    }

    loaded.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        value: u32,
    }

    #[test]
    fn test_parse_ron_reads_struct() {
        let sample: Sample = parse_ron("inline", r#"(name: "crab", value: 3)"#).unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "crab".to_string(),
                value: 3
            }
        );
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = parse_ron::<Sample>("broken.ron", "(name: )").unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { ref path, .. } if path == "broken.ron"));
    }

    #[test]
    fn test_check_delay_rejects_unusable_values() {
        assert!(check_delay("inline", "stun_secs", 0.0).is_ok());
        assert!(check_delay("inline", "stun_secs", 2.5).is_ok());
        for bad in [f32::INFINITY, f32::NAN, -1.0] {
            assert!(matches!(
                check_delay("inline", "stun_secs", bad),
                Err(DataLoadError::Invalid { .. })
            ));
        }
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_ron_file::<Sample>(Path::new("assets/data/does_not_exist.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::NotFound(_)));
    }
}
