use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use serde::Deserialize;
use teahouse_api::client::{DEFAULT_URL, DEFAULT_TIMEOUT};

use crate::error::{self, Context};

pub const DEFAULT_SESSION_FILE: &str = "teahouse_session.json";
pub const DEFAULT_NOTIFY_CAPACITY: usize = 32;

#[derive(Debug, Default, Args)]
pub struct CliArgs {
    /// path to a yaml or json config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// base url of the shop api
    ///
    /// every request path is joined beneath it. defaults to
    /// "http://localhost:8081/api"
    #[arg(long)]
    pub url: Option<String>,

    /// request timeout in milliseconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// file that stores the login session
    ///
    /// if a file is not specified then it will attempt to load
    /// "teahouse_session.json" in the current working directory
    #[arg(long)]
    pub session: Option<PathBuf>,

    /// keep the session in memory only
    #[arg(long)]
    pub no_persist: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct Root {
    pub url: Option<String>,
    pub timeout: Option<u64>,
    pub session: Option<PathBuf>,
    pub persist: Option<bool>,
    pub notify_capacity: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub url: String,
    pub timeout: Duration,
    /// `None` when the session only lives in memory
    pub session: Option<PathBuf>,
    pub notify_capacity: usize,
}

pub fn load(path: &Path) -> error::Result<Root> {
    let Some(ext) = path.extension() else {
        return Err(error::Error::new()
            .context("failed to retrieve the file extension of the config file"));
    };

    let ext = ext.to_ascii_lowercase();
    let file = std::fs::OpenOptions::new()
        .read(true)
        .open(path)
        .context("failed to open the specified config file")?;
    let reader = std::io::BufReader::new(file);

    if ext.eq("yaml") || ext.eq("yml") {
        serde_yaml::from_reader(reader)
            .context("there was an error when attempting to parse the yaml config file")
    } else if ext.eq("json") {
        serde_json::from_reader(reader)
            .context("there was an error when attempting to parse the json config file")
    } else {
        Err(error::Error::new()
            .context("the specified config type is not yaml or json"))
    }
}

/// command line values win over the config file, the config file wins
/// over the defaults. relative session paths resolve against `cwd`
pub fn merge(args: &CliArgs, file: Root, cwd: &Path) -> Config {
    let url = args.url.clone()
        .or(file.url)
        .unwrap_or_else(|| DEFAULT_URL.to_owned());

    let timeout = args.timeout
        .or(file.timeout)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_TIMEOUT);

    let persist = !args.no_persist && file.persist.unwrap_or(true);

    let session = if persist {
        let path = args.session.clone()
            .or(file.session)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));

        if path.is_absolute() {
            Some(path)
        } else {
            Some(cwd.join(path))
        }
    } else {
        None
    };

    Config {
        url,
        timeout,
        session,
        notify_capacity: file.notify_capacity
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_NOTIFY_CAPACITY),
    }
}

pub fn get_config(args: &CliArgs) -> error::Result<Config> {
    let cwd = std::env::current_dir()?;

    let file = if let Some(path) = &args.config {
        let path = if path.is_absolute() {
            path.clone()
        } else {
            cwd.join(path)
        };

        load(&path)?
    } else {
        Root::default()
    };

    let config = merge(args, file, &cwd);

    tracing::debug!(url = %config.url, timeout = ?config.timeout, session = ?config.session, "loaded config");

    Ok(config)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults() {
        let config = merge(&CliArgs::default(), Root::default(), Path::new("/srv"));

        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.session, Some(PathBuf::from("/srv/teahouse_session.json")));
        assert_eq!(config.notify_capacity, DEFAULT_NOTIFY_CAPACITY);
    }

    #[test]
    fn cli_wins_over_file() {
        let args = CliArgs {
            url: Some("http://shop.local/api".into()),
            timeout: Some(2500),
            ..CliArgs::default()
        };
        let file = Root {
            url: Some("http://other/api".into()),
            timeout: Some(100),
            session: Some(PathBuf::from("/tmp/s.json")),
            ..Root::default()
        };

        let config = merge(&args, file, Path::new("/srv"));

        assert_eq!(config.url, "http://shop.local/api");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.session, Some(PathBuf::from("/tmp/s.json")));
    }

    #[test]
    fn persistence_can_be_disabled() {
        let args = CliArgs {
            no_persist: true,
            ..CliArgs::default()
        };

        assert_eq!(merge(&args, Root::default(), Path::new("/srv")).session, None);

        let file = Root {
            persist: Some(false),
            ..Root::default()
        };

        assert_eq!(merge(&CliArgs::default(), file, Path::new("/srv")).session, None);
    }

    #[test]
    fn load_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("teahouse.yaml");
        let mut file = std::fs::File::create(&yaml).unwrap();
        writeln!(file, "url: http://yaml.local/api\ntimeout: 3000").unwrap();

        let root = load(&yaml).unwrap();
        assert_eq!(root.url.as_deref(), Some("http://yaml.local/api"));
        assert_eq!(root.timeout, Some(3000));

        let json = dir.path().join("teahouse.json");
        std::fs::write(&json, r#"{"persist": false, "notify_capacity": 4}"#).unwrap();

        let root = load(&json).unwrap();
        assert_eq!(root.persist, Some(false));
        assert_eq!(root.notify_capacity, Some(4));

        let toml = dir.path().join("teahouse.toml");
        std::fs::write(&toml, "url = 1").unwrap();

        assert!(load(&toml).is_err());
    }
}
