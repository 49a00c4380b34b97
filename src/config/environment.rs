//! Build environment supplied by the host build system
//!
//! The host exports its paths as environment variables. The four path
//! variables are only honoured as a set; with any of them missing every path
//! falls back to a default, so running the tool by hand outside a build
//! works against the current directory.

use std::path::PathBuf;

/// Cache directory created under `CONFIGURATION_BUILD_DIR`
pub const CACHE_DIR_NAME: &str = "LaunchKitCachedBundles";

/// Resources directory created inside the application's executable folder
pub const RESOURCES_DIR_NAME: &str = "LaunchKitRemoteResources";

/// Configuration name that marks a debug build
const DEBUG_CONFIGURATION: &str = "Debug";

/// Paths and build flavour derived from the host build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnvironment {
    /// Intermediate build products, home of the bundle cache
    pub configuration_build_dir: PathBuf,
    /// Final build destination
    pub target_build_dir: PathBuf,
    /// Executable folder relative to `target_build_dir`
    pub executable_folder: PathBuf,
    /// Absolute path to the application's property list
    pub info_plist: Option<PathBuf>,
    pub debug_build: bool,
}

impl Default for BuildEnvironment {
    fn default() -> Self {
        Self {
            configuration_build_dir: PathBuf::from("."),
            target_build_dir: PathBuf::from("."),
            executable_folder: PathBuf::new(),
            info_plist: None,
            debug_build: false,
        }
    }
}

impl BuildEnvironment {
    /// Read the build environment from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the build environment through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug_build = lookup("CONFIGURATION").is_some_and(|c| c == DEBUG_CONFIGURATION);

        let paths = (
            lookup("CONFIGURATION_BUILD_DIR"),
            lookup("TARGET_BUILD_DIR"),
            lookup("EXECUTABLE_FOLDER_PATH"),
            lookup("INFOPLIST_PATH"),
        );

        match paths {
            (Some(config_dir), Some(build_dir), Some(executable_dir), Some(plist_path)) => {
                let target_build_dir = PathBuf::from(build_dir);
                Self {
                    configuration_build_dir: PathBuf::from(config_dir),
                    info_plist: Some(target_build_dir.join(plist_path)),
                    target_build_dir,
                    executable_folder: PathBuf::from(executable_dir),
                    debug_build,
                }
            }
            _ => Self {
                debug_build,
                ..Self::default()
            },
        }
    }

    /// Directory holding `<name>/<version>/` cache entries
    pub fn cache_root(&self) -> PathBuf {
        self.configuration_build_dir.join(CACHE_DIR_NAME)
    }

    /// Directory holding `<name>/<version>/` staged bundles inside the app
    pub fn output_root(&self) -> PathBuf {
        self.target_build_dir
            .join(&self.executable_folder)
            .join(RESOURCES_DIR_NAME)
    }
}
