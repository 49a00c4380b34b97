//! Application identity read from the app's property list

use std::path::Path;

use tracing::debug;

const BUNDLE_ID_KEY: &str = "CFBundleIdentifier";
const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";
const BUILD_NUMBER_KEY: &str = "CFBundleVersion";

/// Identity of the application being built, sent with the manifest query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppIdentity {
    pub bundle_id: String,
    pub short_version: String,
    pub build_number: String,
    pub debug_build: bool,
}

impl AppIdentity {
    /// Read identity from a property list.
    ///
    /// All three strings are taken together or not at all: a missing file,
    /// an unreadable file or a missing key yields empty strings. Never fails.
    pub fn from_info_plist(path: Option<&Path>, debug_build: bool) -> Self {
        let strings = path.and_then(|p| match read_identity_strings(p) {
            Some(strings) => Some(strings),
            None => {
                debug!("No app identity found in {}", p.display());
                None
            }
        });

        match strings {
            Some((bundle_id, short_version, build_number)) => Self {
                bundle_id,
                short_version,
                build_number,
                debug_build,
            },
            None => Self {
                debug_build,
                ..Self::default()
            },
        }
    }

    /// `debug_build` as sent on the wire
    pub fn debug_flag(&self) -> &'static str {
        if self.debug_build { "1" } else { "0" }
    }
}

fn read_identity_strings(path: &Path) -> Option<(String, String, String)> {
    let value = plist::Value::from_file(path).ok()?;
    let dict = value.as_dictionary()?;
    let get = |key: &str| dict.get(key).and_then(plist::Value::as_string).map(str::to_string);

    Some((
        get(BUNDLE_ID_KEY)?,
        get(SHORT_VERSION_KEY)?,
        get(BUILD_NUMBER_KEY)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_plist(dir: &Path, entries: &[(&str, &str)]) -> std::path::PathBuf {
        let body: String = entries
            .iter()
            .map(|(k, v)| format!("  <key>{k}</key>\n  <string>{v}</string>\n"))
            .collect();
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
             <plist version=\"1.0\">\n<dict>\n{body}</dict>\n</plist>\n"
        );
        let path = dir.join("Info.plist");
        std::fs::write(&path, xml).unwrap();
        path
    }

    #[test]
    fn test_reads_identity() {
        let temp = TempDir::new().unwrap();
        let path = write_plist(
            temp.path(),
            &[
                ("CFBundleIdentifier", "com.example.sample"),
                ("CFBundleShortVersionString", "2.1"),
                ("CFBundleVersion", "42"),
            ],
        );

        let identity = AppIdentity::from_info_plist(Some(&path), true);
        assert_eq!(identity.bundle_id, "com.example.sample");
        assert_eq!(identity.short_version, "2.1");
        assert_eq!(identity.build_number, "42");
        assert!(identity.debug_build);
        assert_eq!(identity.debug_flag(), "1");
    }

    #[test]
    fn test_missing_key_empties_everything() {
        let temp = TempDir::new().unwrap();
        let path = write_plist(
            temp.path(),
            &[
                ("CFBundleIdentifier", "com.example.sample"),
                ("CFBundleVersion", "42"),
            ],
        );

        let identity = AppIdentity::from_info_plist(Some(&path), false);
        assert_eq!(identity, AppIdentity::default());
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let identity =
            AppIdentity::from_info_plist(Some(&temp.path().join("Info.plist")), true);

        assert!(identity.bundle_id.is_empty());
        assert!(identity.debug_build);
    }

    #[test]
    fn test_no_plist_path() {
        let identity = AppIdentity::from_info_plist(None, false);
        assert_eq!(identity.debug_flag(), "0");
        assert!(identity.short_version.is_empty());
    }
}
