use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Represents the complete configuration for git-guard.
///
/// Contains the protected-branch set, the conventional branch prefix list,
/// the commit message grammar settings, and push/formatter behavior.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default)]
    pub commits: CommitsConfig,

    #[serde(default)]
    pub push: PushConfig,

    #[serde(default)]
    pub format: Option<FormatConfig>,
}

/// Returns the default set of protected branch names.
fn default_protected_branches() -> Vec<String> {
    vec!["main".to_string(), "develop".to_string()]
}

/// Returns the default ordered list of conventional branch prefixes.
fn default_branch_prefixes() -> Vec<String> {
    vec![
        "feat".to_string(),
        "fix".to_string(),
        "hotfix".to_string(),
        "refactor".to_string(),
        "perf".to_string(),
        "docs".to_string(),
        "test".to_string(),
        "chore".to_string(),
        "ci".to_string(),
        "build".to_string(),
        "release".to_string(),
    ]
}

/// Returns the default list of conventional commit types.
fn default_commit_types() -> Vec<String> {
    vec![
        "feat".to_string(),
        "fix".to_string(),
        "docs".to_string(),
        "style".to_string(),
        "refactor".to_string(),
        "perf".to_string(),
        "test".to_string(),
        "build".to_string(),
        "ci".to_string(),
        "chore".to_string(),
        "revert".to_string(),
        "release".to_string(),
    ]
}

fn default_subject_limit() -> usize {
    100
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_merge_report_cap() -> usize {
    20
}

/// Branch naming policy: which names are protected and which prefixes
/// form a conventional branch name.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchesConfig {
    #[serde(default = "default_protected_branches")]
    pub protected: Vec<String>,

    /// Tried in declared order, first match wins.
    #[serde(default = "default_branch_prefixes")]
    pub prefixes: Vec<String>,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            protected: default_protected_branches(),
            prefixes: default_branch_prefixes(),
        }
    }
}

/// Commit message grammar settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitsConfig {
    #[serde(default = "default_commit_types")]
    pub types: Vec<String>,

    /// Maximum subject length accepted after the `type(scope): ` header.
    #[serde(default = "default_subject_limit")]
    pub subject_limit: usize,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        CommitsConfig {
            types: default_commit_types(),
            subject_limit: default_subject_limit(),
        }
    }
}

/// Push gate behavior.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PushConfig {
    /// Remote consulted for the checkout gate's grandfathering check.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Maximum number of offending merge commits reported per ref.
    #[serde(default = "default_merge_report_cap")]
    pub merge_report_cap: usize,
}

impl Default for PushConfig {
    fn default() -> Self {
        PushConfig {
            remote: default_remote(),
            merge_report_cap: default_merge_report_cap(),
        }
    }
}

/// Optional formatter commands for the commit gate's formatting step.
///
/// When absent the formatting step is disabled entirely.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FormatConfig {
    /// Command that exits non-zero when the tree needs reformatting,
    /// e.g. `cargo fmt -- --check`.
    pub check: String,

    /// Command that rewrites files in place, e.g. `cargo fmt`.
    pub apply: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            branches: BranchesConfig::default(),
            commits: CommitsConfig::default(),
            push: PushConfig::default(),
            format: None,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitguard.toml` in current directory
/// 3. `gitguard.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// After loading, the `GITGUARD_PROTECTED_BRANCHES` and
/// `GITGUARD_BRANCH_PREFIXES` environment variables (comma-separated
/// lists) override the corresponding file values, so adopters can
/// retarget the policy without editing files.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        Some(fs::read_to_string(path)?)
    } else if Path::new("./gitguard.toml").exists() {
        Some(fs::read_to_string("./gitguard.toml")?)
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("gitguard.toml");
        if config_path.exists() {
            Some(fs::read_to_string(config_path)?)
        } else {
            None
        }
    } else {
        None
    };

    let mut config: Config = match config_str {
        Some(s) => toml::from_str(&s)?,
        None => Config::default(),
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

/// Applies environment variable overrides to a loaded configuration.
fn apply_env_overrides(config: &mut Config) {
    if let Some(protected) = env_list("GITGUARD_PROTECTED_BRANCHES") {
        config.branches.protected = protected;
    }
    if let Some(prefixes) = env_list("GITGUARD_BRANCH_PREFIXES") {
        config.branches.prefixes = prefixes;
    }
}

/// Reads a comma-separated list from an environment variable.
///
/// Returns `None` when the variable is unset or contains no items.
fn env_list(name: &str) -> Option<Vec<String>> {
    let raw = env::var(name).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
