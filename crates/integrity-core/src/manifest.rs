//! Tracked-file manifest
//!
//! The set of files under integrity tracking is a closed, versioned list —
//! never a directory walk. That keeps snapshots reproducible across
//! environments with different incidental files: adding a tracked artifact
//! is a manifest change, not auto-discovery.
//!
//! Projects may override the built-in set with `.integrity/manifest.toml`:
//!
//! ```toml
//! root = ["README.md", "requirements.txt"]
//! src = ["src/app.py"]
//! agents = ["src/agents/agent_core/core.py"]
//! utils = ["src/utils/cassandra_manager.py"]
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use integrity_fs::RelPath;

use crate::error::{Error, Result};

/// Directory under the project base holding integrity configuration
pub const CONFIG_DIR: &str = ".integrity";

/// Manifest file name under [`CONFIG_DIR`]
pub const MANIFEST_FILE: &str = "manifest.toml";

/// Category a tracked file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Root,
    Src,
    Agents,
    Utils,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Root => "root",
            Self::Src => "src",
            Self::Agents => "agents",
            Self::Utils => "utils",
        };
        f.write_str(s)
    }
}

/// A single entry of the tracked set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFile {
    pub path: RelPath,
    pub category: FileCategory,
}

/// A tracked file resolved against a project base directory.
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    pub rel: RelPath,
    pub abs: PathBuf,
    pub category: FileCategory,
}

/// TOML shape of a manifest file. Absent categories default to empty.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ManifestSpec {
    #[serde(default)]
    root: Vec<String>,
    #[serde(default)]
    src: Vec<String>,
    #[serde(default)]
    agents: Vec<String>,
    #[serde(default)]
    utils: Vec<String>,
}

/// The ordered, deduplicated tracked-file set.
#[derive(Debug, Clone)]
pub struct Manifest {
    files: Vec<TrackedFile>,
}

impl Manifest {
    /// The built-in default tracked set for agent projects.
    pub fn builtin() -> Self {
        const ROOT: &[&str] = &[
            "README.md",
            "requirements.txt",
            "setup.py",
            ".env",
            "bin/register_agent.py",
            "bin/query_agent_info.py",
        ];
        const SRC: &[&str] = &[
            "src/__init__.py",
            "src/app.py",
            "src/templates/docker/Dockerfile.j2",
        ];
        const AGENTS: &[&str] = &[
            "src/agents/agent_core/__init__.py",
            "src/agents/agent_core/core.py",
            "src/agents/agent_ai/__init__.py",
            "src/agents/agent_ai/core.py",
            "src/agents/agent_storage/__init__.py",
            "src/agents/agent_storage/core.py",
        ];
        const UTILS: &[&str] = &[
            "src/utils/__init__.py",
            "src/utils/cassandra_manager.py",
            "src/utils/elasticsearch_manager.py",
        ];

        let mut files = Vec::new();
        for (paths, category) in [
            (ROOT, FileCategory::Root),
            (SRC, FileCategory::Src),
            (AGENTS, FileCategory::Agents),
            (UTILS, FileCategory::Utils),
        ] {
            for path in paths {
                let path = RelPath::new(path).expect("builtin tracked path is valid");
                files.push(TrackedFile { path, category });
            }
        }

        Self { files }
    }

    /// Load the manifest for a project, falling back to the built-in set
    /// when `.integrity/manifest.toml` does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// contains an invalid tracked path.
    pub fn load_or_builtin(base: &Path) -> Result<Self> {
        let path = base.join(CONFIG_DIR).join(MANIFEST_FILE);
        if !path.exists() {
            tracing::debug!(?path, "No manifest file, using builtin tracked set");
            return Ok(Self::builtin());
        }

        let content = fs::read_to_string(&path)?;
        let spec: ManifestSpec = toml::from_str(&content)?;
        Self::from_spec(spec, &path)
    }

    fn from_spec(spec: ManifestSpec, source: &Path) -> Result<Self> {
        let mut files = Vec::new();
        let mut seen = BTreeSet::new();

        for (paths, category) in [
            (&spec.root, FileCategory::Root),
            (&spec.src, FileCategory::Src),
            (&spec.agents, FileCategory::Agents),
            (&spec.utils, FileCategory::Utils),
        ] {
            for raw in paths {
                let path = RelPath::new(raw).map_err(|e| Error::ManifestInvalid {
                    path: source.to_path_buf(),
                    message: e.to_string(),
                })?;
                // First category wins for duplicate paths.
                if seen.insert(path.clone()) {
                    files.push(TrackedFile { path, category });
                }
            }
        }

        Ok(Self { files })
    }

    /// The full tracked list, in manifest order.
    pub fn files(&self) -> &[TrackedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve the tracked set against a base directory, keeping only the
    /// files present on disk.
    ///
    /// Absence is not an error: a missing file is simply omitted, and shows
    /// up later as a `Missing` discrepancy if the snapshot still records it.
    pub fn resolve_present(&self, base: &Path) -> Vec<ResolvedFile> {
        self.files
            .iter()
            .filter_map(|tracked| {
                let abs = tracked.path.to_absolute(base);
                abs.is_file().then(|| ResolvedFile {
                    rel: tracked.path.clone(),
                    abs,
                    category: tracked.category,
                })
            })
            .collect()
    }
}
