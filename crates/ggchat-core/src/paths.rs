//! Local storage paths for persisted model files.

use crate::error::ChatError;
use std::path::PathBuf;

/// Environment variable overriding the models directory.
pub const MODELS_DIR_ENV: &str = "GGCHAT_MODELS_DIR";

/// Resolve the models directory without creating it.
///
/// Order: `GGCHAT_MODELS_DIR` if set and non-blank, otherwise
/// `<platform data dir>/ggchat/models`.
///
/// # Errors
///
/// Returns [`ChatError::StorageFailure`] when no platform data directory
/// can be determined.
pub fn default_models_dir() -> Result<PathBuf, ChatError> {
    resolve_models_dir(std::env::var(MODELS_DIR_ENV).ok().as_deref(), dirs::data_dir())
}

fn resolve_models_dir(
    env_value: Option<&str>,
    data_dir: Option<PathBuf>,
) -> Result<PathBuf, ChatError> {
    if let Some(dir) = env_value {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    data_dir
        .map(|base| base.join("ggchat").join("models"))
        .ok_or_else(|| ChatError::StorageFailure {
            message: "could not determine the platform data directory".to_string(),
        })
}

/// Resolve the models directory and create it if needed.
///
/// # Errors
///
/// Returns [`ChatError::StorageFailure`] when resolution or creation fails.
pub fn ensure_models_dir() -> Result<PathBuf, ChatError> {
    let dir = default_models_dir()?;
    std::fs::create_dir_all(&dir).map_err(|err| ChatError::StorageFailure {
        message: format!("failed to create models directory {}: {err}", dir.display()),
    })?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins() {
        let dir = resolve_models_dir(Some("/srv/models"), Some(PathBuf::from("/data"))).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/models"));
    }

    #[test]
    fn blank_override_falls_back_to_data_dir() {
        let dir = resolve_models_dir(Some("   "), Some(PathBuf::from("/data"))).unwrap();
        assert_eq!(dir, PathBuf::from("/data/ggchat/models"));
    }

    #[test]
    fn missing_data_dir_is_a_storage_failure() {
        let err = resolve_models_dir(None, None).unwrap_err();
        assert!(matches!(err, ChatError::StorageFailure { .. }));
    }
}
