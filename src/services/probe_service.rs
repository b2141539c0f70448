use std::time::Duration;

use async_trait::async_trait;

/// Reachability check against the companion UI
#[async_trait]
pub trait CompanionProbe: Send + Sync {
    /// Base URL of the companion service.
    fn url(&self) -> &str;

    /// `true` when the companion answered. Never fails: any error or
    /// timeout simply reports the companion as offline.
    async fn is_online(&self) -> bool;
}

pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl CompanionProbe for HttpProbe {
    fn url(&self) -> &str {
        &self.url
    }

    async fn is_online(&self) -> bool {
        match self.client.get(&self.url).send().await {
            // Any page, even an error page, means the companion is up
            Ok(response) => response.status().as_u16() < 500,
            Err(e) => {
                tracing::debug!("Companion {} unreachable: {}", self.url, e);
                false
            }
        }
    }
}

/// Probe with a fixed answer, used where no network should be touched
pub struct StaticProbe {
    url: String,
    online: bool,
}

impl StaticProbe {
    pub fn new(url: impl Into<String>, online: bool) -> Self {
        Self {
            url: url.into(),
            online,
        }
    }
}

#[async_trait]
impl CompanionProbe for StaticProbe {
    fn url(&self) -> &str {
        &self.url
    }

    async fn is_online(&self) -> bool {
        self.online
    }
}
