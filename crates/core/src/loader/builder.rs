//! Assembles a loader tree from configuration and host capabilities.

use super::ModuleLoader;
use super::tree::LoaderTree;
use crate::config::LoaderConfig;
use crate::resource::WorkArea;
use kinload_api::{
    FallbackResolver, LoaderResult, Materializer, NoFallback, RawBytesMaterializer,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Builder for a root [`ModuleLoader`].
///
/// ```no_run
/// use kinload_core::ModuleLoader;
///
/// let root = ModuleLoader::builder()
///     .with_location("/app/classes")
///     .with_location("/app/lib/ext.jar")
///     .exclude_package("com.acme.internal")
///     .build()?;
/// # Ok::<(), kinload_api::LoaderError>(())
/// ```
pub struct ModuleLoaderBuilder {
    config: LoaderConfig,
    fallback: Arc<dyn FallbackResolver>,
    materializer: Arc<dyn Materializer>,
}

impl ModuleLoaderBuilder {
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
            fallback: Arc::new(NoFallback),
            materializer: Arc::new(RawBytesMaterializer),
        }
    }

    /// Replace everything set so far with `config`.
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.config.resource_locations.push(location.into());
        self
    }

    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .resource_locations
            .extend(locations.into_iter().map(Into::into));
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.config.base_path = Some(base_path.into());
        self
    }

    pub fn with_work_path(mut self, work_path: impl Into<PathBuf>) -> Self {
        self.config.work_path = Some(work_path.into());
        self
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackResolver>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_materializer(mut self, materializer: Arc<dyn Materializer>) -> Self {
        self.materializer = materializer;
        self
    }

    pub fn exclude_package(mut self, package: impl Into<String>) -> Self {
        self.config.exclude_packages.push(package.into());
        self
    }

    pub fn exclude_class(mut self, class: impl Into<String>) -> Self {
        self.config.exclude_classes.push(class.into());
        self
    }

    /// Sweep the work path on its first use in this process, create the
    /// root and scan every configured location. Fails if any configured location cannot be attached.
    pub fn build(self) -> LoaderResult<ModuleLoader> {
        let config = self.config;

        let work_area = Arc::new(WorkArea::new(config.work_path.as_deref()));
        let swept = work_area.sweep_once();
        if swept > 0 {
            debug!(
                "Swept {} stale scratch directories from {}",
                swept,
                work_area.base().display()
            );
        }

        let tree = Arc::new(LoaderTree::new(
            self.fallback,
            self.materializer,
            work_area,
            config.base_path.clone(),
        ));
        let root = ModuleLoader::new_root(tree);
        root.exclude_packages(&config.exclude_packages);
        root.exclude_classes(&config.exclude_classes);
        root.set_resource_locations(&config.resource_locations)?;

        info!(
            "Loader tree ready: {} nodes, {} resources",
            root.tree_size(),
            root.members().map(|m| m.number_of_resources()).sum::<usize>()
        );
        Ok(root)
    }
}

impl Default for ModuleLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
