//! Generator configuration (logmake.toml format).

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Settings for the generated CMake project.
    #[serde(default)]
    pub project: ProjectConfig,
}

/// Settings for the generated CMake project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Name passed to `project()`.
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Name of the executable target sources and libraries attach to.
    #[serde(default = "default_target")]
    pub target: String,

    /// Version passed to `cmake_minimum_required()`.
    #[serde(default = "default_cmake_minimum_version")]
    pub cmake_minimum_version: String,
}

fn default_project_name() -> String {
    "MyProject".to_string()
}

fn default_target() -> String {
    "MyExecutable".to_string()
}

fn default_cmake_minimum_version() -> String {
    "3.10".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            target: default_target(),
            cmake_minimum_version: default_cmake_minimum_version(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GeneratorConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Override the project name.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project.name = name.into();
        self
    }

    /// Override the executable target name.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.project.target = target.into();
        self
    }
}
