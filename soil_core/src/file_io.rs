//! # File I/O Module
//!
//! JSON input and output for calculations:
//! - **Inputs**: a single [`PhaseInput`] or a batch of [`CalculationItem`]s
//! - **Results**: any serializable result, written atomically (`.tmp` then rename)
//!
//! ## Example
//!
//! ```rust,no_run
//! use soil_core::file_io::{load_phase_input, save_json};
//! use soil_core::solve;
//! use std::path::Path;
//!
//! let input = load_phase_input(Path::new("sample.json")).unwrap();
//! let result = solve(&input);
//! save_json(&result, Path::new("sample.result.json")).unwrap();
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::calculations::phase::PhaseInput;
use crate::calculations::CalculationItem;
use crate::errors::{CalcError, CalcResult};

/// Load a single phase input from a JSON file.
pub fn load_phase_input(path: &Path) -> CalcResult<PhaseInput> {
    let input: PhaseInput = read_json(path)?;
    input.validate()?;
    Ok(input)
}

/// Load a batch of calculations from a JSON array.
pub fn load_batch(path: &Path) -> CalcResult<Vec<CalculationItem>> {
    read_json(path)
}

/// Write a value as pretty JSON using an atomic save.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp_path = tmp_path_for(path);

    {
        let mut file = File::create(&tmp_path)
            .map_err(|e| CalcError::file_error("create", tmp_path.display().to_string(), e.to_string()))?;
        file.write_all(json.as_bytes())
            .map_err(|e| CalcError::file_error("write", tmp_path.display().to_string(), e.to_string()))?;
        file.sync_all()
            .map_err(|e| CalcError::file_error("sync", tmp_path.display().to_string(), e.to_string()))?;
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = json.len(), "saved");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::phase::SaturationCondition;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("terrastat_test_{}.json", name))
    }

    #[test]
    fn test_load_phase_input() {
        let path = temp_path("phase_input");
        fs::write(&path, r#"{"label": "S1", "Gs": 2.7, "e": 0.6, "condition": "fully_saturated"}"#).unwrap();

        let input = load_phase_input(&path).unwrap();
        assert_eq!(input.label, "S1");
        assert_eq!(input.values.gs, Some(2.7));
        assert_eq!(input.condition, SaturationCondition::FullySaturated);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_textbook_aliases() {
        let path = temp_path("aliases");
        fs::write(&path, r#"{"S": 1.0, "e": 0.5, "gamma_prime": 9.0}"#).unwrap();

        let input = load_phase_input(&path).unwrap();
        assert_eq!(input.values.sr, Some(1.0));
        assert_eq!(input.values.e, Some(0.5));
        assert_eq!(input.values.gamma_sub, Some(9.0));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let err = load_phase_input(&temp_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_invalid_json() {
        let path = temp_path("bad_json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_batch(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_leaves_no_tmp_file() {
        let path = temp_path("save");
        let input = PhaseInput::new("saved");
        save_json(&input, &path).unwrap();

        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());
        let loaded = load_phase_input(&path).unwrap();
        assert_eq!(loaded, input);

        let _ = fs::remove_file(&path);
    }
}
