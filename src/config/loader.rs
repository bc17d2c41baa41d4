//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::prototype::RegistrationPolicy;
use crate::error::{KitError, KitResult};

use super::types::KitConfig;

/// Project-level config file name.
pub const PROJECT_CONFIG: &str = "kitbash.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Sections of `kitbash.toml` and the keys each accepts.
const SCHEMA: &[(&str, &[&str])] = &[
    ("registry", &["policy"]),
    ("tree", &["separator"]),
    ("audit", &["path"]),
    ("logging", &["filter"]),
];

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> KitResult<(KitConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    let invalid = |message: String| KitError::Config {
        file: path.to_path_buf(),
        message,
    };

    let mut ignored = Vec::new();
    let config: KitConfig = serde_ignored::deserialize(
        toml::de::Deserializer::new(&content),
        |p| ignored.push(p.to_string()),
    )
    .map_err(|e| invalid(e.to_string()))?;

    let warnings = ignored
        .iter()
        .map(|dotted| warning_for(path, &content, dotted))
        .collect();
    Ok((config, warnings))
}

fn warning_for(file: &Path, content: &str, dotted: &str) -> ConfigWarning {
    let (section, key) = match dotted.split_once('.') {
        Some((section, key)) => (Some(section), key),
        None => (None, dotted),
    };
    let known: Vec<&str> = match section {
        None => SCHEMA.iter().map(|(name, _)| *name).collect(),
        Some(section) => SCHEMA
            .iter()
            .find(|(name, _)| *name == section)
            .map(|(_, keys)| keys.to_vec())
            .unwrap_or_default(),
    };

    ConfigWarning {
        key: key.to_string(),
        file: file.to_path_buf(),
        line: line_of(content, key),
        suggestion: known
            .into_iter()
            .find(|candidate| is_near_miss(key, candidate))
            .map(str::to_string),
    }
}

/// 1-based line declaring `key` as a table header or an assignment.
fn line_of(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            let line = line.trim_start();
            line.trim_start_matches('[').starts_with(&format!("{key}]"))
                || line
                    .strip_prefix(key)
                    .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .map(|index| index + 1)
}

/// One inserted, deleted or substituted character, or two adjacent
/// characters swapped.
fn is_near_miss(typed: &str, known: &str) -> bool {
    let a: Vec<char> = typed.chars().collect();
    let b: Vec<char> = known.chars().collect();
    if a == b || a.len().abs_diff(b.len()) > 1 {
        return false;
    }

    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let (ra, rb) = (&a[prefix..], &b[prefix..]);
    match ra.len().cmp(&rb.len()) {
        std::cmp::Ordering::Greater => ra[1..] == *rb,
        std::cmp::Ordering::Less => *ra == rb[1..],
        std::cmp::Ordering::Equal => {
            ra[1..] == rb[1..]
                || (ra.len() >= 2 && ra[0] == rb[1] && ra[1] == rb[0] && ra[2..] == rb[2..])
        }
    }
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> KitConfig {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG))
        .into_iter()
        .chain(dirs::config_dir().map(|dir| dir.join("kitbash/config.toml")));

    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        match KitConfig::load(&candidate) {
            Ok(config) => return with_env_overrides(config),
            Err(err) => warn!(file = %candidate.display(), error = %err, "ignoring config"),
        }
    }

    with_env_overrides(KitConfig::default())
}

/// Apply environment variable overrides (KITBASH_* prefix)
pub fn with_env_overrides(mut config: KitConfig) -> KitConfig {
    // KITBASH_REGISTRY_POLICY
    if let Ok(policy) = std::env::var("KITBASH_REGISTRY_POLICY") {
        config.registry.policy = match policy.to_lowercase().as_str() {
            "strict" => RegistrationPolicy::Strict,
            _ => RegistrationPolicy::Overwrite,
        };
    }

    // KITBASH_TREE_SEPARATOR (escape `\n` accepted)
    if let Ok(separator) = std::env::var("KITBASH_TREE_SEPARATOR") {
        config.tree.separator = separator.replace("\\n", "\n");
    }

    // KITBASH_AUDIT_PATH
    if let Ok(path) = std::env::var("KITBASH_AUDIT_PATH") {
        config.audit.path = if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        };
    }

    config
}
