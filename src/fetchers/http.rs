use crate::config::ScrapeConfig;
use crate::error::{Error, Result};
use crate::fetchers::Fetcher;
use async_trait::async_trait;
use reqwest::Client;

/// Fetches pages over HTTP(S) with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    /// Create a fetcher that identifies itself with the configured user agent
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let http = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        ::log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&ScrapeConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
            .mount(&server)
            .await;

        let body = fetcher()
            .fetch(&format!("{}/page", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let server = MockServer::start().await;
        let config = ScrapeConfig {
            user_agent: "test-agent/1.0".to_string(),
            ..ScrapeConfig::default()
        };
        Mock::given(method("GET"))
            .and(header("user-agent", "test-agent/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let body = HttpFetcher::new(&config)
            .unwrap()
            .fetch(&server.uri())
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = fetcher().fetch(&format!("{}/missing", server.uri())).await;
        assert!(matches!(result, Err(Error::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        // Nothing listens on port 9 of the loopback interface
        let result = fetcher().fetch("http://127.0.0.1:9/").await;
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
