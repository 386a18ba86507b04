//! Startup discovery of module resource trees.
//!
//! Each independently built module may carry its resources as an embedded
//! packed blob, as embedded raw text, or as a `{Module}.res.xml` file next
//! to the executable (or under its `ExternalResources` directory, or under a
//! configured resource root). [`Discovery::load`] tries those sources in
//! that order per module and merges every tree found into a single root.
//!
//! A module with no resources anywhere simply contributes nothing; a
//! resource that is found but malformed fails the load. The returned
//! [`Project`] is a plain value the caller owns and passes to whatever needs
//! it; `load` is meant to run once during process initialization.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::codec::{decode, unpack};
use crate::config::{Config, RESOURCE_FILE_SUFFIX};
use crate::error::Result;
use crate::except::ExceptionKindRegistry;
use crate::tree::Project;

/// The resources one module ships with, registered at startup.
#[derive(Debug, Clone, Default)]
pub struct ModuleResources {
    pub name: String,
    packed: Option<Vec<u8>>,
    raw: Option<String>,
}

impl ModuleResources {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packed: None,
            raw: None,
        }
    }

    /// Attach an embedded packed blob (e.g. via `include_bytes!`).
    pub fn with_packed(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.packed = Some(bytes.into());
        self
    }

    /// Attach embedded raw text (e.g. via `include_str!`).
    pub fn with_raw(mut self, text: impl Into<String>) -> Self {
        self.raw = Some(text.into());
        self
    }
}

/// Collects module registrations and produces one merged root tree.
pub struct Discovery {
    config: Config,
    modules: Vec<ModuleResources>,
}

impl Discovery {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            modules: Vec::new(),
        }
    }

    pub fn register(&mut self, module: ModuleResources) {
        self.modules.push(module);
    }

    /// Load and merge every discoverable resource tree.
    ///
    /// Registered modules are tried packed, then raw, then filesystem.
    /// Afterwards the configured resource roots are scanned for resource
    /// files of modules that never registered.
    pub fn load(&self, registry: &ExceptionKindRegistry) -> Result<Project> {
        let mut root = Project::new("Resources")?;
        let mut seen: HashSet<String> = HashSet::new();

        for module in &self.modules {
            seen.insert(module.name.clone());
            match self.load_module(module, registry)? {
                Some(tree) => root.merge_from(tree),
                None => debug!(module = %module.name, "no resources found for module"),
            }
        }

        for file in self.scan_resource_files() {
            let Some(name) = module_name_of(&file) else {
                continue;
            };
            if !seen.insert(name) {
                continue;
            }
            debug!(file = %file.display(), "loading scanned resource file");
            let text = fs::read_to_string(&file)?;
            root.merge_from(decode(&text, registry)?);
        }

        Ok(root)
    }

    fn load_module(
        &self,
        module: &ModuleResources,
        registry: &ExceptionKindRegistry,
    ) -> Result<Option<Project>> {
        if let Some(bytes) = &module.packed {
            debug!(module = %module.name, "loading embedded packed resources");
            return unpack(bytes, registry).map(Some);
        }
        if let Some(text) = &module.raw {
            debug!(module = %module.name, "loading embedded raw resources");
            return decode(text, registry).map(Some);
        }

        let file_name = format!("{}{}", module.name, RESOURCE_FILE_SUFFIX);
        for dir in self.search_dirs() {
            for candidate in [
                dir.join(&file_name),
                dir.join("ExternalResources").join(&file_name),
            ] {
                if candidate.is_file() {
                    debug!(module = %module.name, file = %candidate.display(),
                        "loading resource file");
                    let text = fs::read_to_string(&candidate)?;
                    return decode(&text, registry).map(Some);
                }
            }
        }
        Ok(None)
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            dirs.push(exe_dir);
        }
        dirs.extend(self.config.resource_roots.iter().map(PathBuf::from));
        dirs
    }

    fn scan_resource_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for root in &self.config.resource_roots {
            for entry in WalkDir::new(root).into_iter().flatten() {
                let path = entry.path();
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if !name.ends_with(RESOURCE_FILE_SUFFIX) {
                    continue;
                }
                if self.config.is_ignored(path) {
                    continue;
                }
                files.push(path.to_path_buf());
            }
        }
        files.sort();
        files
    }
}

fn module_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(RESOURCE_FILE_SUFFIX))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::codec::{encode, pack};
    use crate::discovery::*;
    use crate::locale::LocaleTag;
    use crate::tree::{Class, Method, Namespace, Prompt};

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::parse(s).unwrap()
    }

    fn registry() -> ExceptionKindRegistry {
        ExceptionKindRegistry::with_builtins()
    }

    fn project(name: &str, namespace: &str, text: &str) -> Project {
        let mut p = Project::new(name).unwrap();
        p.settings.set_default(tag("en-CA"));
        let mut method = Method::new("Baz").unwrap();
        let mut prompt = Prompt::new("greeting").unwrap();
        prompt.set_text(tag("en-CA"), text);
        method.add_prompt(prompt);
        let mut class = Class::new("Bar").unwrap();
        class.add_method(method);
        let mut ns = Namespace::new(namespace).unwrap();
        ns.add_class(class);
        p.add_namespace(ns);
        p
    }

    fn config_with_root(root: &Path) -> Config {
        Config {
            resource_roots: vec![root.to_string_lossy().to_string()],
            ignores: Vec::new(),
        }
    }

    #[test]
    fn test_load_registered_raw() {
        let dir = tempdir().unwrap();
        let mut discovery = Discovery::new(config_with_root(dir.path()));
        discovery
            .register(ModuleResources::new("Alpha").with_raw(encode(&project("Alpha", "Foo", "hi"))));

        let root = discovery.load(&registry()).unwrap();
        assert_eq!(root.resolve("Foo.Bar.Baz.greeting", None).unwrap(), "hi");
    }

    #[test]
    fn test_packed_beats_raw() {
        let dir = tempdir().unwrap();
        let mut discovery = Discovery::new(config_with_root(dir.path()));
        discovery.register(
            ModuleResources::new("Alpha")
                .with_packed(pack(&project("Alpha", "Foo", "from packed")).unwrap())
                .with_raw(encode(&project("Alpha", "Foo", "from raw"))),
        );

        let root = discovery.load(&registry()).unwrap();
        assert_eq!(
            root.resolve("Foo.Bar.Baz.greeting", None).unwrap(),
            "from packed"
        );
    }

    #[test]
    fn test_raw_beats_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("Alpha.res.xml"),
            encode(&project("Alpha", "Foo", "from file")),
        )
        .unwrap();

        let mut discovery = Discovery::new(config_with_root(dir.path()));
        discovery.register(
            ModuleResources::new("Alpha").with_raw(encode(&project("Alpha", "Foo", "from raw"))),
        );

        let root = discovery.load(&registry()).unwrap();
        assert_eq!(
            root.resolve("Foo.Bar.Baz.greeting", None).unwrap(),
            "from raw"
        );
    }

    #[test]
    fn test_registered_module_found_on_disk() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("Alpha.res.xml"),
            encode(&project("Alpha", "Foo", "from file")),
        )
        .unwrap();

        let mut discovery = Discovery::new(config_with_root(dir.path()));
        discovery.register(ModuleResources::new("Alpha"));

        let root = discovery.load(&registry()).unwrap();
        assert_eq!(
            root.resolve("Foo.Bar.Baz.greeting", None).unwrap(),
            "from file"
        );
    }

    #[test]
    fn test_external_resources_subdirectory() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("ExternalResources");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(
            sub.join("Alpha.res.xml"),
            encode(&project("Alpha", "Foo", "nested")),
        )
        .unwrap();

        let mut discovery = Discovery::new(config_with_root(dir.path()));
        discovery.register(ModuleResources::new("Alpha"));

        let root = discovery.load(&registry()).unwrap();
        assert_eq!(root.resolve("Foo.Bar.Baz.greeting", None).unwrap(), "nested");
    }

    #[test]
    fn test_missing_module_contributes_nothing() {
        let dir = tempdir().unwrap();
        let mut discovery = Discovery::new(config_with_root(dir.path()));
        discovery.register(ModuleResources::new("Ghost"));

        let root = discovery.load(&registry()).unwrap();
        assert_eq!(root.node_count(), 0);
    }

    #[test]
    fn test_scan_merges_unregistered_modules() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("Alpha.res.xml"),
            encode(&project("Alpha", "Foo", "alpha")),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("Beta.res.xml"),
            encode(&project("Beta", "Quux", "beta")),
        )
        .unwrap();

        let discovery = Discovery::new(config_with_root(dir.path()));
        let root = discovery.load(&registry()).unwrap();
        assert_eq!(root.resolve("Foo.Bar.Baz.greeting", None).unwrap(), "alpha");
        assert_eq!(root.resolve("Quux.Bar.Baz.greeting", None).unwrap(), "beta");
    }

    #[test]
    fn test_scan_honors_ignores() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("Legacy.res.xml"),
            encode(&project("Legacy", "Old", "old")),
        )
        .unwrap();

        let mut config = config_with_root(dir.path());
        config.ignores = vec!["**/Legacy.res.xml".to_string()];
        let discovery = Discovery::new(config);

        let root = discovery.load(&registry()).unwrap();
        assert_eq!(root.node_count(), 0);
    }

    #[test]
    fn test_malformed_resource_is_loud() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Bad.res.xml"), "<project>").unwrap();

        let discovery = Discovery::new(config_with_root(dir.path()));
        assert!(discovery.load(&registry()).is_err());
    }

    #[test]
    fn test_later_module_overrides_culture_entry() {
        let dir = tempdir().unwrap();
        let mut discovery = Discovery::new(config_with_root(dir.path()));
        discovery.register(
            ModuleResources::new("First").with_raw(encode(&project("First", "Foo", "first"))),
        );
        discovery.register(
            ModuleResources::new("Second").with_raw(encode(&project("Second", "Foo", "second"))),
        );

        let root = discovery.load(&registry()).unwrap();
        assert_eq!(root.resolve("Foo.Bar.Baz.greeting", None).unwrap(), "second");
    }
}
