//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ADOPTME_*` environment variables and
//! configuration files. Accessors apply defaults and turn invalid values
//! into structured configuration errors so startup fails fast.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;
use zeroize::Zeroize;

use crate::domain::{Error, ErrorKind};
use crate::logging::Mode;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILE: &str = "logs/errors.log";
const SESSION_KEY_FILE_ENV: &str = "ADOPTME_SESSION_KEY_FILE";

/// Minimum accepted session key length in bytes.
pub const SESSION_KEY_MIN_LEN: usize = 32;

/// Settings for the HTTP server and its logger.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADOPTME")]
pub struct AppSettings {
    /// Run mode: `DEV` or `PROD`. Required.
    pub mode: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// HTTP worker count; Actix picks one per core when unset.
    pub workers: Option<usize>,
    /// Path of the persistent error log.
    pub log_file: Option<PathBuf>,
    /// File holding the session cookie key.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: Option<bool>,
}

impl AppSettings {
    /// Resolve the configured run mode.
    ///
    /// # Errors
    /// `MISSING_ENV_VARIABLE` when unset, `INVALID_CONFIG` for unknown
    /// values.
    pub fn mode(&self) -> Result<Mode, Error> {
        Mode::resolve(self.mode.as_deref())
    }

    /// Socket address to bind.
    ///
    /// # Errors
    /// `INVALID_CONFIG` when the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, Error> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|_| {
            Error::new(ErrorKind::InvalidConfig)
                .with_detail(json!({ "setting": "host", "value": host }))
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Persistent log path, defaulting to `logs/errors.log`.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    /// Whether session cookies are `Secure`; defaults on in production.
    #[must_use]
    pub fn cookie_secure(&self, mode: Mode) -> bool {
        self.cookie_secure
            .unwrap_or(matches!(mode, Mode::Production))
    }

    /// Load the session key.
    ///
    /// Production requires a readable key file. Development falls back to
    /// an ephemeral key, so sessions do not survive a restart.
    ///
    /// # Errors
    /// `MISSING_ENV_VARIABLE` when production has no key file configured;
    /// `INVALID_CONFIG` when the key is unreadable in production or too
    /// short in any mode.
    pub fn session_key(&self, mode: Mode) -> Result<Key, Error> {
        match (&self.session_key_file, mode) {
            (Some(path), Mode::Production) => read_key(path),
            (Some(path), Mode::Development) => match read_key(path) {
                Err(error) if error.kind() == ErrorKind::InvalidConfig && !path.exists() => {
                    warn!(path = %path.display(), "session key file missing; using ephemeral key");
                    Ok(Key::generate())
                }
                other => other,
            },
            (None, Mode::Production) => Err(Error::new(ErrorKind::MissingEnvVariable)
                .with_detail(json!({ "variable": SESSION_KEY_FILE_ENV }))),
            (None, Mode::Development) => {
                warn!("no session key configured; using ephemeral key");
                Ok(Key::generate())
            }
        }
    }
}

fn read_key(path: &Path) -> Result<Key, Error> {
    let invalid = |reason: String| {
        Error::new(ErrorKind::InvalidConfig).with_detail(json!({
            "setting": "session_key_file",
            "path": path.display().to_string(),
            "reason": reason,
        }))
    };
    let mut bytes = std::fs::read(path).map_err(|error| invalid(error.to_string()))?;
    if bytes.len() < SESSION_KEY_MIN_LEN {
        let len = bytes.len();
        bytes.zeroize();
        return Err(invalid(format!(
            "key is {len} bytes; at least {SESSION_KEY_MIN_LEN} required"
        )));
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings loading and resolution.

    use std::ffi::OsString;
    use std::io::Write;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 7] = [
        "ADOPTME_MODE",
        "ADOPTME_HOST",
        "ADOPTME_PORT",
        "ADOPTME_WORKERS",
        "ADOPTME_LOG_FILE",
        "ADOPTME_SESSION_KEY_FILE",
        "ADOPTME_COOKIE_SECURE",
    ];

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        with_overrides(&[])
    }

    fn with_overrides(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("adoptme-backend")])
            .expect("config should load")
    }

    fn key_file(len: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(&vec![7_u8; len]).expect("write key");
        file
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = blank();
        assert_eq!(
            settings.mode().expect_err("mode is required").kind(),
            ErrorKind::MissingEnvVariable
        );
        assert_eq!(
            settings.bind_addr().expect("addr"),
            SocketAddr::new(IpAddr::from([0, 0, 0, 0]), DEFAULT_PORT)
        );
        assert_eq!(settings.log_file(), PathBuf::from(DEFAULT_LOG_FILE));
        assert!(!settings.cookie_secure(Mode::Development));
        assert!(settings.cookie_secure(Mode::Production));
        assert!(settings.workers.is_none());
    }

    #[rstest]
    fn empty_environment_leaves_every_setting_unset() {
        let home = tempfile::tempdir().expect("temp home");
        let home_path = home.path().display().to_string();
        let mut vars = cleared();
        vars.push(("ADOPTME_CONFIG_PATH", None));
        vars.push(("HOME", Some(home_path.clone())));
        vars.push(("XDG_CONFIG_HOME", Some(home_path)));
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert!(settings.mode.is_none());
        assert!(settings.host.is_none());
        assert!(settings.port.is_none());
        assert!(settings.log_file.is_none());
        assert!(settings.session_key_file.is_none());
        assert!(settings.cookie_secure.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(with_overrides(&[
            ("ADOPTME_MODE", "prod"),
            ("ADOPTME_HOST", "127.0.0.1"),
            ("ADOPTME_PORT", "9090"),
            ("ADOPTME_LOG_FILE", "/tmp/adoptme.log"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.mode().expect("mode"), Mode::Production);
        assert_eq!(
            settings.bind_addr().expect("addr"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("socket")
        );
        assert_eq!(settings.log_file(), PathBuf::from("/tmp/adoptme.log"));
    }

    #[rstest]
    fn unknown_mode_fails_fast() {
        let _guard = lock_env(with_overrides(&[("ADOPTME_MODE", "STAGING")]));

        let err = load_from_empty_args().mode().expect_err("unknown mode");
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[rstest]
    fn production_requires_a_session_key() {
        let _guard = lock_env(cleared());
        let err = load_from_empty_args()
            .session_key(Mode::Production)
            .err()
            .expect("missing key");
        assert_eq!(err.kind(), ErrorKind::MissingEnvVariable);
    }

    #[rstest]
    #[case(Mode::Development)]
    #[case(Mode::Production)]
    fn short_keys_are_rejected(#[case] mode: Mode) {
        let file = key_file(SESSION_KEY_MIN_LEN - 1);
        let settings = AppSettings {
            session_key_file: Some(file.path().to_path_buf()),
            ..blank()
        };
        let err = settings.session_key(mode).err().expect("short key");
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[rstest]
    fn key_files_are_read() {
        let file = key_file(SESSION_KEY_MIN_LEN);
        let settings = AppSettings {
            session_key_file: Some(file.path().to_path_buf()),
            ..blank()
        };
        let first = settings.session_key(Mode::Production).expect("key");
        let second = settings.session_key(Mode::Production).expect("key");
        assert_eq!(first.master(), second.master());
    }

    #[rstest]
    fn development_tolerates_a_missing_key_file() {
        let settings = AppSettings {
            session_key_file: Some(PathBuf::from("/nonexistent/adoptme/key")),
            ..blank()
        };
        assert!(settings.session_key(Mode::Development).is_ok());
        let err = settings
            .session_key(Mode::Production)
            .err()
            .expect("unreadable in production");
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[rstest]
    fn invalid_host_is_a_config_error() {
        let settings = AppSettings {
            host: Some("not an ip".to_owned()),
            ..blank()
        };
        let err = settings.bind_addr().expect_err("bad host");
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    fn blank() -> AppSettings {
        AppSettings {
            mode: None,
            host: None,
            port: None,
            workers: None,
            log_file: None,
            session_key_file: None,
            cookie_secure: None,
        }
    }
}
