use std::io::Write as _;
use std::time::Duration;

use anyhow::Context as _;
use getset::{CopyGetters, Getters};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::console::{sty_g, sty_r};
use crate::transport::{RawResponse, Transport};
use crate::{Console, Result};

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));

/// Connection settings of an [`HttpSession`].
#[derive(Serialize, Deserialize, Getters, CopyGetters, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct SessionConfig {
    #[get = "pub"]
    base_url: String,
    #[get = "pub"]
    username: String,
    #[serde(skip_serializing)]
    password: String,
    #[get_copy = "pub"]
    insecure: bool,
    #[serde(with = "humantime_serde")]
    #[get_copy = "pub"]
    timeout: Duration,
}

impl SessionConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        insecure: bool,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            insecure,
            timeout,
        }
    }

    fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Parses the base URL so that relative paths are appended to it.
    fn parse_base_url(&self) -> Result<Url> {
        let base_url = format!("{}/", self.base_url.trim_end_matches('/'));
        Url::parse(&base_url).with_context(|| format!("Could not parse base url : {}", self.base_url))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            insecure: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// [`Transport`] over HTTP(S) with optional basic auth.
#[derive(Debug)]
pub struct HttpSession {
    client: Client,
    base_url: Url,
    conf: SessionConfig,
}

impl HttpSession {
    pub fn new(conf: SessionConfig) -> Result<Self> {
        let base_url = conf.parse_base_url()?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Some(conf.timeout))
            .danger_accept_invalid_certs(conf.insecure)
            .build()
            .context("Could not setup client")?;
        Ok(Self {
            client,
            base_url,
            conf,
        })
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Could not build url for path : {}", path))
    }

    fn send_pretty(&self, builder: RequestBuilder, cnsl: &mut Console) -> Result<RawResponse> {
        let builder = if self.conf.has_credentials() {
            builder.basic_auth(&self.conf.username, Some(&self.conf.password))
        } else {
            builder
        };
        let req = builder.build().context("Could not build request")?;
        write!(cnsl, "{:7} {} ... ", req.method().as_str(), req.url()).unwrap_or(());
        let result = self.client.execute(req).context("Could not send request");
        match &result {
            Ok(res) if res.status().is_success() => writeln!(cnsl, "{}", sty_g(res.status())),
            Ok(res) => writeln!(cnsl, "{}", sty_r(res.status())),
            Err(_) => writeln!(cnsl, "{}", sty_r("failed")),
        }
        .unwrap_or(());
        let res = result?;
        let status = res.status();
        let body = res.bytes().context("Could not read response body")?;
        Ok(RawResponse::new(status, body.to_vec()))
    }
}

impl Transport for HttpSession {
    fn get(&self, path: &str, cnsl: &mut Console) -> Result<RawResponse> {
        let url = self.url(path)?;
        self.send_pretty(self.client.get(url), cnsl)
    }

    fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
        cnsl: &mut Console,
    ) -> Result<RawResponse> {
        let url = self.url(path)?;
        self.send_pretty(self.client.post(url).json(body), cnsl)
    }
}
