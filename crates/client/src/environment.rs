use sidecar_relay_domain::config::{ENV_DOCKER, ENV_NATIVE};
use std::fs;
use std::path::PathBuf;

/// Tells whether this process runs inside a container.
pub trait EnvironmentDetector: Send + Sync {
    fn is_containerized(&self) -> bool;

    /// Label compared against the `register_in` / `proxy_in` lists.
    fn label(&self) -> &'static str {
        if self.is_containerized() {
            ENV_DOCKER
        } else {
            ENV_NATIVE
        }
    }
}

/// Looks for the marker file container runtimes drop in the root filesystem and for
/// runtime names in the init process's cgroup. Unreadable files count as "not containerized".
pub struct ProcfsDetector {
    marker_file: PathBuf,
    cgroup_file: PathBuf,
}

const CGROUP_MARKERS: [&str; 4] = ["docker", "kubepods", "containerd", "libpod"];

impl ProcfsDetector {
    pub fn new() -> Self {
        Self::with_paths("/.dockerenv", "/proc/1/cgroup")
    }

    pub fn with_paths(marker_file: impl Into<PathBuf>, cgroup_file: impl Into<PathBuf>) -> Self {
        Self {
            marker_file: marker_file.into(),
            cgroup_file: cgroup_file.into(),
        }
    }
}

impl Default for ProcfsDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentDetector for ProcfsDetector {
    fn is_containerized(&self) -> bool {
        if self.marker_file.exists() {
            return true;
        }
        fs::read_to_string(&self.cgroup_file)
            .map(|cgroup| CGROUP_MARKERS.iter().any(|m| cgroup.contains(m)))
            .unwrap_or(false)
    }
}

/// Fixed answer, for tests and for callers that already know.
pub struct FixedEnvironment(pub bool);

impl EnvironmentDetector for FixedEnvironment {
    fn is_containerized(&self) -> bool {
        self.0
    }
}
