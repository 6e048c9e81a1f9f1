use crate::errors::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub pkcs12: Pkcs12Config,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PolicyConfig {
    pub warn: Option<i64>,
    pub crit: Option<i64>,
}

#[derive(Default, PartialEq, Eq, Deserialize)]
pub struct Pkcs12Config {
    pub password: Option<String>,
}

impl fmt::Debug for Pkcs12Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = self.password.as_ref().map(|_| "<redacted>");
        f.debug_struct("Pkcs12Config")
            .field("password", &password)
            .finish()
    }
}

fn load_str<T: DeserializeOwned>(s: &str) -> Result<T> {
    let conf = toml::from_str(s).context("Failed to parse config")?;
    Ok(conf)
}

fn load_file<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> Result<T> {
    let buf = fs::read_to_string(path.as_ref()).context("Failed to read file")?;
    load_str(&buf)
}

/// Without a path every setting falls back to the command line and built-in defaults
pub fn load(path: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = path {
        debug!("Loading config file {:?}", path);
        load_file(path).with_context(|| anyhow!("Failed to load config file {:?}", path))
    } else {
        Ok(ConfigFile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let conf = load_str::<ConfigFile>(
            r#"
            [policy]
            warn = 60
            crit = 7

            [pkcs12]
            password = "hunter2"
        "#,
        )
        .unwrap();

        assert_eq!(
            conf,
            ConfigFile {
                policy: PolicyConfig {
                    warn: Some(60),
                    crit: Some(7),
                },
                pkcs12: Pkcs12Config {
                    password: Some("hunter2".to_string()),
                },
            }
        );
    }

    #[test]
    fn empty_config() {
        let conf = load_str::<ConfigFile>("").unwrap();
        assert_eq!(conf, ConfigFile::default());
    }

    #[test]
    fn partial_policy() {
        let conf = load_str::<ConfigFile>("[policy]\ncrit = 3\n").unwrap();
        assert_eq!(conf.policy.warn, None);
        assert_eq!(conf.policy.crit, Some(3));
    }

    #[test]
    fn invalid_config() {
        assert!(load_str::<ConfigFile>("[policy]\nwarn = \"soon\"\n").is_err());
    }

    #[test]
    fn missing_file() {
        assert!(load(Some(Path::new("/nonexistent/chk-cert.toml"))).is_err());
        assert_eq!(load(None).unwrap(), ConfigFile::default());
    }

    #[test]
    fn password_is_redacted() {
        let conf = Pkcs12Config {
            password: Some("hunter2".to_string()),
        };
        let debug = format!("{:?}", conf);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
