use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gdhttp_core::{Credential, Error, Result, Url};
use serde::Deserialize;

/// One access key pair from the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigAuth {
    #[serde(rename = "accessKeyID", default)]
    pub access_key_id: String,
    #[serde(rename = "accessKeySecret", default)]
    pub access_key_secret: String,
}

/// On disk configuration: `{"auths": {"<host[:port]>": {...}}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auths: HashMap<String, ConfigAuth>,
}

impl Config {
    /// Read the configuration file. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Config>> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::config_invalid(format!(
                    "parse config file {} error {}",
                    path.display(),
                    e
                ))
                .with_source(e))
            }
        };

        match serde_json::from_slice(&data) {
            Ok(config) => Ok(Some(config)),
            Err(e) => Err(Error::config_invalid(format!(
                "parse config file {} error {}",
                path.display(),
                e
            ))
            .with_source(e)),
        }
    }
}

/// The configuration path: the `--config` flag, or `$HOME/.gdhttp.json`.
pub fn config_path(flag: Option<&Path>) -> Option<PathBuf> {
    match flag {
        Some(path) => Some(path.to_path_buf()),
        None => home::home_dir().map(|dir| dir.join(".gdhttp.json")),
    }
}

/// The config lookup key for a URL: `host`, or `host:port` when the port is
/// explicit and not the scheme default.
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?;

    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Pick the credential for a request. A matching per-host entry in the
/// configuration replaces the command line key pair entirely.
pub fn resolve_credential(
    flag_credential: Credential,
    config: Option<&Config>,
    url: &Url,
) -> Credential {
    if let (Some(config), Some(key)) = (config, host_key(url)) {
        if let Some(auth) = config.auths.get(&key) {
            return Credential::new(&auth.access_key_id, &auth.access_key_secret);
        }
    }

    flag_credential
}
