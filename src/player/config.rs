//! Player configuration

use std::path::PathBuf;

/// Configuration for a player session
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Catalog file (text or XML)
    pub catalog_path: PathBuf,

    /// Whether to open videos in the system browser
    pub launch_browser: bool,

    /// Seed for PLAY_RANDOM (None = seeded from the OS)
    pub random_seed: Option<u64>,
}

impl PlayerConfig {
    /// Create a new configuration for the given catalog
    pub fn new(catalog_path: PathBuf) -> Self {
        Self {
            catalog_path,
            launch_browser: true,
            random_seed: None,
        }
    }

    /// Enable or disable the browser sink
    pub fn with_browser(mut self, launch_browser: bool) -> Self {
        self.launch_browser = launch_browser;
        self
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }
}
