//! Application state wiring the resolver and services together.
//!
//! Services are generic over filesystem/hasher traits; AppState pins them to
//! the concrete infra implementations.

use std::path::{Path, PathBuf};

use anyhow::Context;
use skillkit_core::service::install::InstallService;
use skillkit_core::storage::resolver::StorageResolver;
use skillkit_infra::config::load_config;
use skillkit_infra::filesystem::{LocalFileSystem, resolve_home_dir};
use skillkit_infra::hash::Sha256ContentHasher;
use skillkit_types::config::SkillkitConfig;
use skillkit_types::storage::{InstallScope, StorageRoots};

/// Resolver over the real filesystem.
pub type ConcreteResolver = StorageResolver<LocalFileSystem>;

/// Install service with SHA-256 content digests.
pub type ConcreteInstallService<'a> = InstallService<'a, LocalFileSystem, Sha256ContentHasher>;

/// Configuration and services shared by every command handler.
pub struct AppState {
    pub config: SkillkitConfig,
    pub resolver: ConcreteResolver,
}

impl AppState {
    /// Resolve roots, load configuration, and build the resolver.
    pub fn init(project_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let project_root = match project_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        let home_dir = resolve_home_dir();
        tracing::debug!(
            project = %project_root.display(),
            home = %home_dir.display(),
            "Resolved storage roots"
        );

        let config = load_config(&home_dir, &project_root);
        let resolver = StorageResolver::new(
            StorageRoots::new(project_root, home_dir),
            LocalFileSystem::new(),
        )
        .with_entry_files(config.entry_files.clone());

        Ok(Self { config, resolver })
    }

    /// Project root the storage locations are resolved against.
    pub fn project_root(&self) -> &Path {
        &self.resolver.roots().project_root
    }

    /// Build an install service borrowing this state's resolver.
    pub fn install_service(&self) -> ConcreteInstallService<'_> {
        InstallService::new(&self.resolver, Sha256ContentHasher::new())
    }

    /// Combine CLI flags with the configured default scope. A flag can only
    /// turn an option on.
    pub fn install_scope(&self, global: bool, universal: bool) -> InstallScope {
        InstallScope {
            global: global || self.config.install.global,
            universal: universal || self.config.install.universal,
        }
    }

    /// The AGENTS.md path for `tsk sync`, relative paths anchored at the
    /// project root.
    pub fn sync_output(&self, output: Option<&Path>) -> PathBuf {
        let output = output.unwrap_or_else(|| Path::new(&self.config.sync.output));
        if output.is_absolute() {
            output.to_path_buf()
        } else {
            self.project_root().join(output)
        }
    }
}
