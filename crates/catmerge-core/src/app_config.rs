use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings read from the environment.
///
/// `input_dirs` and `output_path` are overrides: `None` means the value from
/// the catalog config file (or its default) stands.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub config_path: PathBuf,
    pub input_dirs: Option<Vec<PathBuf>>,
    pub output_path: Option<PathBuf>,
}
