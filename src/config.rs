use std::path::Path;
use std::{fs, io};

use anyhow::{Context, Result};
use log::warn;
use serde::de::DeserializeOwned;

/// Configuration sections share this shape: every field has a serde default,
/// and `complete` validates the loaded values (expanding env references where
/// a field allows them).
pub trait CommonConfig {
    fn default() -> Self;
    fn complete(&mut self) -> Result<()>;
}

/// Loads a TOML config file. A missing file is not an error: the defaults are
/// used instead. The result is always completed before being returned.
pub fn load_config<T>(path: &Path) -> Result<T>
where
    T: CommonConfig + DeserializeOwned,
{
    let mut cfg: T = match fs::read_to_string(path) {
        Ok(s) => toml::from_str(&s)
            .with_context(|| format!("parse config toml '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(
                "Config file '{}' not found, using defaults",
                path.display()
            );
            T::default()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read config file '{}'", path.display()));
        }
    };

    cfg.complete().context("validate config")?;
    Ok(cfg)
}

/// See: [`shellexpand::full`].
pub fn expandenv(name: &str, s: impl AsRef<str>) -> Result<String> {
    let s =
        shellexpand::full(s.as_ref()).with_context(|| format!("expand env value for '{name}'"))?;
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use std::env;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct TestConfig {
        #[serde(default = "TestConfig::default_name")]
        name: String,

        #[serde(skip)]
        completed: bool,
    }

    impl CommonConfig for TestConfig {
        fn default() -> Self {
            Self {
                name: Self::default_name(),
                completed: false,
            }
        }

        fn complete(&mut self) -> Result<()> {
            self.name = expandenv("name", &self.name)?;
            self.completed = true;
            Ok(())
        }
    }

    impl TestConfig {
        fn default_name() -> String {
            String::from("default")
        }
    }

    #[test]
    fn test_load_missing_file() {
        let path = env::temp_dir().join("rolegate-config-test-missing.toml");
        let _ = fs::remove_file(&path);

        let cfg: TestConfig = load_config(&path).unwrap();
        assert_eq!(cfg.name, "default");
        assert!(cfg.completed);
    }

    #[test]
    fn test_load_file() {
        let path = env::temp_dir().join("rolegate-config-test-load.toml");
        fs::write(&path, "name = \"from-file\"\n").unwrap();

        let cfg: TestConfig = load_config(&path).unwrap();
        assert_eq!(cfg.name, "from-file");
        assert!(cfg.completed);

        fs::write(&path, "name = [").unwrap();
        let result: Result<TestConfig> = load_config(&path);
        assert!(result.is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_expandenv() {
        env::set_var("ROLEGATE_EXPANDENV_TEST", "secret");
        let value = expandenv("token", "${ROLEGATE_EXPANDENV_TEST}-suffix").unwrap();
        assert_eq!(value, "secret-suffix");

        let value = expandenv("token", "plain").unwrap();
        assert_eq!(value, "plain");
    }
}
