use std::path::PathBuf;

pub fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

/// What `require()` tries for an extensionless path.
pub fn default_extensions() -> Vec<String> {
    vec![".js".to_string(), ".json".to_string(), ".node".to_string()]
}

pub fn default_condition_names() -> Vec<String> {
    vec!["node".to_string(), "require".to_string()]
}
