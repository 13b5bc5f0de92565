use std::env;
use std::path::PathBuf;

/// Filename used for the JSON export.
pub const EXPORT_FILENAME: &str = "snippets.json";

/// How long the "copied" confirmation stays visible.
pub const COPY_TOAST_MS: u64 = 2000;

const DEFAULT_SHARE_ORIGIN: &str = "https://snipcat.dev";

/// Which build of the companion app deep links should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    /// Read the environment from `SNIPCAT_ENV`, falling back to the build
    /// profile when unset or unrecognized.
    pub fn detect() -> Self {
        match env::var("SNIPCAT_ENV").as_deref() {
            Ok("development") => Environment::Development,
            Ok("production") => Environment::Production,
            Ok("test") => Environment::Test,
            _ => {
                if cfg!(debug_assertions) {
                    Environment::Development
                } else {
                    Environment::Production
                }
            }
        }
    }

    /// URI scheme of the companion app for this environment.
    pub fn deep_link_scheme(&self) -> &'static str {
        match self {
            Environment::Production => "snipcat",
            Environment::Development | Environment::Test => "snipcatinternal",
        }
    }
}

/// Origin used when building share URLs.
pub fn share_origin() -> String {
    env::var("SNIPCAT_ORIGIN").unwrap_or_else(|_| DEFAULT_SHARE_ORIGIN.to_string())
}

/// Directory the export file is written into. Defaults to the working
/// directory when it cannot be determined.
pub fn default_export_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes_map_per_environment() {
        assert_eq!(Environment::Production.deep_link_scheme(), "snipcat");
        assert_eq!(
            Environment::Development.deep_link_scheme(),
            "snipcatinternal"
        );
        assert_eq!(Environment::Test.deep_link_scheme(), "snipcatinternal");
    }
}
