use std::path::PathBuf;

/// Runtime settings assembled from the command line. Durations are fixed;
/// only presentation and diagnostics can be tuned.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub animations: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            animations: true,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}
