//! Loader for RON tuning files at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use crate::movement::MovementTuning;

/// Default location of the locomotion tuning file.
pub const TUNING_PATH: &str = "assets/data/locomotion.ron";

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse tuning from RON text. Missing fields keep their defaults.
pub fn parse_movement_tuning(
    contents: &str,
    file: &str,
) -> Result<MovementTuning, ContentLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load tuning from a RON file on disk.
pub fn load_movement_tuning(path: &Path) -> Result<MovementTuning, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_movement_tuning(&contents, &file_name)
}

/// Startup system: replace the default tuning with the file contents, if any.
pub(crate) fn load_tuning_on_startup(mut tuning: ResMut<MovementTuning>) {
    let path = Path::new(TUNING_PATH);
    if !path.exists() {
        info!("No tuning file at {}, using default movement tuning", TUNING_PATH);
        return;
    }

    match load_movement_tuning(path) {
        Ok(loaded) => {
            for error in loaded.validate() {
                warn!("{}: {}", TUNING_PATH, error);
            }
            info!(
                "Loaded movement tuning from {}: top_speed={}, jump_height={}, air_jumps={}",
                TUNING_PATH, loaded.base_top_speed, loaded.jump_height, loaded.max_air_jumps
            );
            *tuning = loaded;
        }
        Err(e) => warn!("{}; keeping default movement tuning", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_tuning_keeps_defaults() {
        let tuning = parse_movement_tuning("(jump_height: 3.0, max_air_jumps: 2)", "inline")
            .expect("valid RON");
        assert_eq!(tuning.jump_height, 3.0);
        assert_eq!(tuning.max_air_jumps, 2);
        assert_eq!(tuning.base_top_speed, MovementTuning::default().base_top_speed);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_movement_tuning("(jump_height: \"high\")", "bad.ron").unwrap_err();
        assert_eq!(err.file, "bad.ron");
        assert!(err.to_string().starts_with("Failed to load bad.ron"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_movement_tuning(Path::new("does/not/exist.ron")).unwrap_err();
        assert!(err.message.starts_with("IO error"));
    }

    #[test]
    fn test_shipped_tuning_file_parses() {
        let contents = include_str!("../../assets/data/locomotion.ron");
        let tuning = parse_movement_tuning(contents, TUNING_PATH).expect("shipped tuning parses");
        assert!(tuning.validate().is_empty());
    }
}
