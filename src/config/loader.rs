use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::scoring::ScoringConfig;
use super::DebtriskConfig;

pub(crate) const CONFIG_FILE_NAME: &str = ".debtrisk.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
///
/// An invalid scoring section is replaced with the defaults (with a warning)
/// rather than failing the load; validation failures become fatal only when
/// the config is actually used by a run.
pub fn parse_and_validate_config(contents: &str) -> Result<DebtriskConfig, String> {
    let mut config = toml::from_str::<DebtriskConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Some(ref scoring) = config.scoring {
        if let Err(e) = scoring.validate() {
            log::warn!("Invalid scoring configuration: {}. Using defaults.", e);
            config.scoring = Some(ScoringConfig::default());
        }
    }

    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<DebtriskConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub(crate) fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load configuration from the nearest `.debtrisk.toml`, searching from
/// `start_dir` up through its ancestors. Falls back to defaults.
pub fn load_config_from(start_dir: PathBuf) -> DebtriskConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start_dir, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            DebtriskConfig::default()
        })
}

/// Load configuration starting from the current directory.
pub fn load_config() -> DebtriskConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            DebtriskConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AbsencePolicy;
    use indoc::indoc;

    #[test]
    fn parses_scoring_section() {
        let contents = indoc! {r#"
            [scoring]
            absence_policy = "treat_as_zero_risk"
            severity_threshold = 0.8

            [scoring.weights]
            cyclomatic_complexity = 0.6
            dead_code_ratio = 0.4
        "#};

        let config = parse_and_validate_config(contents).unwrap();
        let scoring = config.scoring.unwrap();
        assert_eq!(scoring.absence_policy, AbsencePolicy::TreatAsZeroRisk);
        assert_eq!(scoring.severity_threshold, 0.8);
        assert_eq!(scoring.weights.weight("cyclomatic_complexity"), 0.6);
        assert_eq!(scoring.weights.weight("dead_code_ratio"), 0.4);
    }

    #[test]
    fn invalid_scoring_section_falls_back_to_defaults() {
        let contents = indoc! {r#"
            [scoring.weights]
            cyclomatic_complexity = -1.0
        "#};

        let config = parse_and_validate_config(contents).unwrap();
        let scoring = config.scoring.unwrap();
        assert_eq!(scoring, ScoringConfig::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_and_validate_config("not [valid toml").is_err());
    }

    #[test]
    fn missing_scoring_section_stays_none() {
        let config = parse_and_validate_config("").unwrap();
        assert!(config.scoring.is_none());
    }

    #[test]
    fn ancestors_are_bounded() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d/e"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d/e"),
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
            ]
        );
    }
}
