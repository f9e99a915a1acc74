//! Best-effort HTTP credential trials
//!
//! A prober holds an ordered list of authentication strategies. Each one is
//! tried in turn; a strategy error only means "try the next one" and the
//! first success wins.

use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::SimConfig;

/// Page fragments that indicate a successful form login
pub const FORM_SUCCESS_MARKERS: [&str; 3] = ["welcome", "dashboard", "logout"];

/// Username/password pair under trial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// One way of presenting credentials to a web target
#[async_trait]
pub trait AuthMethod: Send + Sync {
    /// Strategy name used in logs
    fn name(&self) -> &str;

    /// Ok(true) when the target accepted the credentials
    async fn attempt(&self, client: &Client, url: &str, credentials: &Credentials) -> reqwest::Result<bool>;
}

/// HTTP Basic authentication, accepted on a 200 response
pub struct BasicAuth;

#[async_trait]
impl AuthMethod for BasicAuth {
    fn name(&self) -> &str {
        "basic"
    }

    async fn attempt(&self, client: &Client, url: &str, credentials: &Credentials) -> reqwest::Result<bool> {
        let response = client
            .get(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()
            .await?;
        Ok(response.status() == StatusCode::OK)
    }
}

/// HTML form POST, accepted when the page looks like a logged-in view
pub struct FormAuth;

#[async_trait]
impl AuthMethod for FormAuth {
    fn name(&self) -> &str {
        "form"
    }

    async fn attempt(&self, client: &Client, url: &str, credentials: &Credentials) -> reqwest::Result<bool> {
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("submit", "Login"),
        ];
        let body = client.post(url).form(&form).send().await?.text().await?;
        let body = body.to_lowercase();
        Ok(FORM_SUCCESS_MARKERS.iter().any(|marker| body.contains(marker)))
    }
}

/// JSON API login at `{url}/api/auth`, accepted on `"success": true`
pub struct ApiAuth;

#[async_trait]
impl AuthMethod for ApiAuth {
    fn name(&self) -> &str {
        "api"
    }

    async fn attempt(&self, client: &Client, url: &str, credentials: &Credentials) -> reqwest::Result<bool> {
        let endpoint = format!("{}/api/auth", url.trim_end_matches('/'));
        let payload = json!({
            "username": credentials.username,
            "password": credentials.password,
        });
        let response = client.post(endpoint).json(&payload).send().await?;
        // A non-JSON body is a plain rejection
        let accepted = match response.json::<Value>().await {
            Ok(body) => body.get("success").and_then(Value::as_bool).unwrap_or(false),
            Err(_) => false,
        };
        Ok(accepted)
    }
}

/// Default strategy order: basic, form, API
pub fn default_methods() -> Vec<Box<dyn AuthMethod>> {
    vec![Box::new(BasicAuth), Box::new(FormAuth), Box::new(ApiAuth)]
}

/// Tries credentials against a URL with every configured strategy
pub struct CredentialProber {
    client: Client,
    methods: Vec<Box<dyn AuthMethod>>,
    stealth: bool,
    stealth_delay: (f64, f64),
}

impl CredentialProber {
    /// Build a prober with the default strategies
    pub fn new(config: &SimConfig, stealth: bool) -> crate::Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.http_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            methods: default_methods(),
            stealth,
            stealth_delay: config.stealth_login_delay,
        })
    }

    /// Replace the strategy list
    pub fn with_methods(mut self, methods: Vec<Box<dyn AuthMethod>>) -> Self {
        self.methods = methods;
        self
    }

    /// Names of the configured strategies, in trial order
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|method| method.name()).collect()
    }

    /// Try one credential pair. Never fails: unreachable targets and
    /// strategy errors both count as a rejected login.
    pub async fn try_login(&self, url: &str, username: &str, password: &str) -> bool {
        if self.stealth {
            let pause = {
                let mut rng = rand::thread_rng();
                rng.gen_range(self.stealth_delay.0..=self.stealth_delay.1)
            };
            tokio::time::sleep(Duration::from_secs_f64(pause)).await;
        }

        let credentials = Credentials::new(username, password);
        for method in &self.methods {
            match method.attempt(&self.client, url, &credentials).await {
                Ok(true) => {
                    log::debug!("{} login accepted by {}", method.name(), url);
                    return true;
                }
                Ok(false) => log::debug!("{} login rejected by {}", method.name(), url),
                Err(e) => log::debug!("{} login against {} failed: {}", method.name(), url, e),
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_method_order() {
        let prober = CredentialProber::new(&SimConfig::default(), false).unwrap();
        assert_eq!(prober.method_names(), vec!["basic", "form", "api"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig::default().with_http_timeout(0);
        assert!(CredentialProber::new(&config, false).is_err());

        // An unbounded pause would overflow the sleep duration
        let config = SimConfig::default().with_stealth_login_delay(0.0, 1e20);
        assert!(CredentialProber::new(&config, true).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_target_is_rejection() {
        let config = SimConfig::default().with_http_timeout(500);
        let prober = CredentialProber::new(&config, false).unwrap();
        // Port 9 on loopback is closed on any sane test machine
        assert!(!prober.try_login("http://127.0.0.1:9/login", "admin", "admin").await);
    }
}
