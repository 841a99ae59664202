//! Climate Data Store credential discovery.

use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the API base URL.
pub const URL_ENV: &str = "CDSAPI_URL";

/// Environment variable holding the personal access token.
pub const KEY_ENV: &str = "CDSAPI_KEY";

/// Environment variable overriding the configuration file location.
pub const RC_ENV: &str = "CDSAPI_RC";

/// Default configuration file name, looked up in the home directory.
pub const RC_FILE: &str = ".cdsapirc";

/// Errors that can occur while resolving credentials.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine the home directory.
    #[error("Failed to determine home directory to locate .cdsapirc")]
    NoHomeDir,

    /// Neither the environment nor a configuration file provided credentials.
    #[error("Missing credentials: set CDSAPI_URL and CDSAPI_KEY or create '{path}'")]
    NotFound {
        /// The configuration file that was looked for.
        path: PathBuf,
    },

    /// Failed to read the configuration file.
    #[error("Failed to read configuration file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A required entry is missing.
    #[error("Missing '{field}' in {origin}")]
    MissingField {
        /// The missing entry (`url` or `key`).
        field: &'static str,
        /// Where the credentials were read from.
        origin: String,
    },
}

/// Credentials and endpoint of the Climate Data Store API.
#[derive(Clone, PartialEq, Eq)]
pub struct CdsCredentials {
    /// API base URL without trailing slash, e.g. `https://cds.climate.copernicus.eu/api`.
    pub url: String,
    /// Personal access token.
    pub key: String,
    /// Whether TLS certificates are verified.
    pub verify: bool,
}

impl std::fmt::Debug for CdsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdsCredentials")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("verify", &self.verify)
            .finish()
    }
}

/// Entries read from a configuration file.
#[derive(Debug, Default)]
struct RcEntries {
    url: Option<String>,
    key: Option<String>,
    verify: Option<bool>,
}

impl CdsCredentials {
    /// Creates credentials for the given endpoint and token.
    #[must_use]
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            key: key.into(),
            verify: true,
        }
    }

    /// Resolves credentials from the process environment and home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no complete set of credentials can be found.
    pub fn from_env() -> Result<Self, ConfigError> {
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        Self::resolve(|name| std::env::var(name).ok(), home)
    }

    /// Resolves credentials using `env` for variable lookup.
    ///
    /// `CDSAPI_URL` and `CDSAPI_KEY` take precedence; whatever they leave unset
    /// is read from the file named by `CDSAPI_RC`, else `<home>/.cdsapirc`.
    ///
    /// # Errors
    ///
    /// Returns an error if no complete set of credentials can be found.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        home: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let env_url = env(URL_ENV).filter(|v| !v.is_empty());
        let env_key = env(KEY_ENV).filter(|v| !v.is_empty());

        if let (Some(url), Some(key)) = (&env_url, &env_key) {
            return Ok(Self::new(url.as_str(), key.as_str()));
        }

        let path = match env(RC_ENV).filter(|v| !v.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => home.ok_or(ConfigError::NoHomeDir)?.join(RC_FILE),
        };
        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }

        let mut entries = read_rc(&path)?;
        entries.url = env_url.or(entries.url);
        entries.key = env_key.or(entries.key);
        Self::from_entries(entries, &path)
    }

    /// Reads credentials from a configuration file only.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or lacks `url` or `key`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_entries(read_rc(path)?, path)
    }

    fn from_entries(entries: RcEntries, path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let url = entries.url.ok_or_else(|| ConfigError::MissingField {
            field: "url",
            origin: origin.clone(),
        })?;
        let key = entries
            .key
            .ok_or(ConfigError::MissingField { field: "key", origin })?;

        let mut credentials = Self::new(url, key);
        credentials.verify = entries.verify.unwrap_or(true);
        Ok(credentials)
    }
}

fn read_rc(path: &Path) -> Result<RcEntries, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_rc(&contents))
}

/// Parses `name: value` lines, ignoring comments and unknown names.
fn parse_rc(contents: &str) -> RcEntries {
    let mut entries = RcEntries::default();

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        match name.trim() {
            "url" => entries.url = Some(value),
            "key" => entries.key = Some(value),
            "verify" => entries.verify = Some(value != "0"),
            _ => {}
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_rc() {
        let entries = parse_rc(
            "# CDS\nurl: https://cds.climate.copernicus.eu/api\n\nkey: abc-123\nverify: 0\nother: x\n",
        );
        assert_eq!(
            entries.url.as_deref(),
            Some("https://cds.climate.copernicus.eu/api")
        );
        assert_eq!(entries.key.as_deref(), Some("abc-123"));
        assert_eq!(entries.verify, Some(false));
    }

    #[test]
    fn test_legacy_uid_key_is_kept_whole() {
        let entries = parse_rc("key: 12345:abcdef\n");
        assert_eq!(entries.key.as_deref(), Some("12345:abcdef"));
    }

    #[test]
    fn test_env_takes_precedence() {
        let env = env_from(&[(URL_ENV, "https://example.com/api/"), (KEY_ENV, "token")]);
        let credentials = CdsCredentials::resolve(|n| env.get(n).cloned(), None).unwrap();
        assert_eq!(credentials.url, "https://example.com/api");
        assert_eq!(credentials.key, "token");
        assert!(credentials.verify);
    }

    #[test]
    fn test_rc_in_home() {
        let home = tempfile::tempdir().unwrap();
        fs::write(
            home.path().join(RC_FILE),
            "url: https://example.com/api\nkey: from-file\n",
        )
        .unwrap();

        let credentials =
            CdsCredentials::resolve(|_| None, Some(home.path().to_path_buf())).unwrap();
        assert_eq!(credentials.url, "https://example.com/api");
        assert_eq!(credentials.key, "from-file");
    }

    #[test]
    fn test_env_key_overrides_rc() {
        let dir = tempfile::tempdir().unwrap();
        let rc = dir.path().join("custom.rc");
        fs::write(&rc, "url: https://example.com/api\nkey: from-file\n").unwrap();

        let env = env_from(&[(RC_ENV, rc.to_str().unwrap()), (KEY_ENV, "from-env")]);
        let credentials = CdsCredentials::resolve(|n| env.get(n).cloned(), None).unwrap();
        assert_eq!(credentials.key, "from-env");
        assert_eq!(credentials.url, "https://example.com/api");
    }

    #[test]
    fn test_missing_file() {
        let home = tempfile::tempdir().unwrap();
        let result = CdsCredentials::resolve(|_| None, Some(home.path().to_path_buf()));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_no_home() {
        let result = CdsCredentials::resolve(|_| None, None);
        assert!(matches!(result, Err(ConfigError::NoHomeDir)));
    }

    #[test]
    fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let rc = dir.path().join(RC_FILE);
        fs::write(&rc, "url: https://example.com/api\n").unwrap();

        let result = CdsCredentials::from_file(&rc);
        assert!(matches!(
            result,
            Err(ConfigError::MissingField { field: "key", .. })
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let credentials = CdsCredentials::new("https://example.com/api", "secret");
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("secret"));
    }
}
