// Startup configuration

mod loader;

pub use loader::{ConfigLoader, ConfigOverrides, RepositorySettings, ServerSettings, ToolsConfig};

use crate::commands::GitToolState;

impl ToolsConfig {
    /// Tool state handed to every operation; the default path is fixed here
    pub fn tool_state(&self) -> GitToolState {
        GitToolState::new(
            self.repository.default_path.clone(),
            self.identity.clone(),
        )
    }
}
