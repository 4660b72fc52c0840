use std::fmt;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context as _};
use contest_api::{ContestApi, ContestsApi, HttpSession, SessionConfig, Transport};
use getset::{CopyGetters, Getters};
use itertools::Itertools as _;
use serde::{Deserialize, Serialize};
use strum::VariantNames as _;

use crate::{Console, GlobalOpt, Result};

static CONFIG_DIR_NAME: &str = "icpc";
static CONFIG_FILE_NAME: &str = "settings.yaml";

/// Keys of the config file.
#[derive(
    EnumString, EnumVariantNames, IntoStaticStr, Debug, Copy, Clone, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "lowercase")]
pub enum ConfigKey {
    Baseurl,
    Contest,
    Insecure,
    Timeout,
    Username,
    Password,
}

impl ConfigKey {
    /// Parses a key that can be changed by `config set` and `config delete`.
    ///
    /// Credentials are changed by `login` and `logout` only.
    pub fn parse_editable(key: &str) -> Result<Self> {
        match key.parse::<Self>() {
            Ok(key) if !key.is_credential() => Ok(key),
            _ => {
                let editable: Vec<&str> = Self::VARIANTS
                    .iter()
                    .copied()
                    .filter(|k| k.parse().map_or(false, |k: Self| !k.is_credential()))
                    .collect();
                Err(anyhow!(
                    "Unknown config key : '{}'. Only {} and {} are allowed",
                    key,
                    editable[..editable.len() - 1].iter().join(", "),
                    editable[editable.len() - 1]
                ))
            }
        }
    }

    fn is_credential(self) -> bool {
        matches!(self, Self::Username | Self::Password)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.into())
    }
}

/// Content of the config file.
#[derive(Serialize, Deserialize, Getters, CopyGetters, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct StoredConfig {
    #[get = "pub"]
    baseurl: String,
    #[get = "pub"]
    username: String,
    password: String,
    #[get = "pub"]
    contest: String,
    #[get_copy = "pub"]
    insecure: bool,
    #[serde(with = "humantime_serde")]
    #[get_copy = "pub"]
    timeout: Duration,
}

impl StoredConfig {
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config dir")?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the config file, or the default config when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let file = fs::File::open(path)
            .with_context(|| format!("Could not open config file : {}", path.display()))?;
        serde_yaml::from_reader(file).context("Could not read config file as yaml")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Could not create config dir : {}", dir.display()))?;
        }
        let file = fs::File::create(path)
            .with_context(|| format!("Could not create config file : {}", path.display()))?;
        serde_yaml::to_writer(file, self).context("Could not write config file as yaml")
    }

    pub fn set_credentials(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.username = username.into();
        self.password = password.into();
    }

    pub fn clear_credentials(&mut self) {
        self.set_credentials("", "");
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::Baseurl => self.baseurl = value.to_string(),
            ConfigKey::Contest => self.contest = value.to_string(),
            ConfigKey::Insecure => {
                self.insecure = value
                    .parse()
                    .with_context(|| format!("Could not parse as bool : {}", value))?
            }
            ConfigKey::Timeout => {
                self.timeout = humantime::parse_duration(value)
                    .with_context(|| format!("Could not parse as duration : {}", value))?
            }
            ConfigKey::Username => self.username = value.to_string(),
            ConfigKey::Password => self.password = value.to_string(),
        }
        Ok(())
    }

    pub fn delete(&mut self, key: ConfigKey) {
        let default = Self::default();
        match key {
            ConfigKey::Baseurl => self.baseurl = default.baseurl,
            ConfigKey::Contest => self.contest = default.contest,
            ConfigKey::Insecure => self.insecure = default.insecure,
            ConfigKey::Timeout => self.timeout = default.timeout,
            ConfigKey::Username => self.username = default.username,
            ConfigKey::Password => self.password = default.password,
        }
    }

    /// Every key with its value as shown to users. The password is masked.
    pub fn entries(&self) -> Vec<(ConfigKey, String)> {
        let password = if self.password.is_empty() {
            String::new()
        } else {
            String::from("********")
        };
        vec![
            (ConfigKey::Baseurl, self.baseurl.clone()),
            (ConfigKey::Contest, self.contest.clone()),
            (ConfigKey::Insecure, self.insecure.to_string()),
            (
                ConfigKey::Timeout,
                humantime::format_duration(self.timeout).to_string(),
            ),
            (ConfigKey::Username, self.username.clone()),
            (ConfigKey::Password, password),
        ]
    }
}

impl Default for StoredConfig {
    fn default() -> Self {
        Self {
            baseurl: String::new(),
            username: String::new(),
            password: String::new(),
            contest: String::new(),
            insecure: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Settings of one invocation: flags and env vars merged over the config file.
#[derive(Serialize, Getters, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Config {
    #[get = "pub"]
    path: PathBuf,
    #[get = "pub"]
    stored: StoredConfig,
    #[get = "pub"]
    session: SessionConfig,
    contest_id: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Config {
    pub fn load(global_opt: &GlobalOpt) -> Result<Self> {
        let path = match &global_opt.config {
            Some(path) => shellexpand::full(&path.to_string_lossy())?.parse()?,
            None => StoredConfig::default_path()?,
        };
        let stored = StoredConfig::load(&path)?;
        Ok(Self::new(global_opt, path, stored))
    }

    pub fn new(global_opt: &GlobalOpt, path: PathBuf, stored: StoredConfig) -> Self {
        let session = SessionConfig::new(
            non_empty(&global_opt.base_url).unwrap_or(&stored.baseurl),
            non_empty(&global_opt.username).unwrap_or(&stored.username),
            non_empty(&global_opt.password).unwrap_or(&stored.password),
            global_opt.insecure || stored.insecure,
            stored.timeout,
        );
        let contest_id = non_empty(&global_opt.contest_id)
            .or_else(|| Some(stored.contest.as_str()).filter(|c| !c.is_empty()))
            .map(String::from);
        Self {
            path,
            stored,
            session,
            contest_id,
        }
    }

    pub fn contest_id(&self) -> Option<&str> {
        self.contest_id.as_deref()
    }

    /// Writes `stored` to the config file of this invocation.
    pub fn save(&self, stored: &StoredConfig) -> Result<()> {
        stored.save(&self.path)
    }

    pub fn open_session(&self) -> Result<HttpSession> {
        if self.session.base_url().is_empty() {
            return Err(anyhow!(
                "Missing flag: '--baseurl'. Set it by flag, env CONTEST_BASEURL or `set url`"
            ));
        }
        HttpSession::new(self.session.clone())
    }

    /// Accessor for the configured contest, or for the best contest when
    /// none is configured.
    pub fn contest_api<'a, T: Transport + ?Sized>(
        &self,
        transport: &'a T,
        cnsl: &mut Console,
    ) -> Result<ContestApi<'a, T>> {
        let contests_api = ContestsApi::new(transport);
        let contest_id = match self.contest_id() {
            Some(contest_id) => contest_id.to_string(),
            None => {
                let best = contests_api.best_contest(cnsl)?;
                writeln!(
                    cnsl,
                    "Automatically connecting to contest: {}",
                    best.display_name()
                )?;
                best.id().clone()
            }
        };
        Ok(contests_api.contest_api(contest_id))
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self::new(
            &GlobalOpt::default(),
            std::env::temp_dir().join(env!("CARGO_PKG_NAME")).join(CONFIG_FILE_NAME),
            StoredConfig::default(),
        )
    }
}
