use crate::config::ClientConfig;
use crate::error::Error;
use reqwest::blocking::Client;

/// One blocking GET round trip against `base_url + command`.
///
/// Implementations return the raw response body; decoding is up to the caller.
/// Errors carry the URL without its query string so tokens never reach logs.
pub trait Transport {
    fn get(&self, command: &str, params: &[(&str, String)]) -> Result<String, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, command: &str, params: &[(&str, String)]) -> Result<String, Error> {
        (**self).get(command, params)
    }
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(cfg: &ClientConfig) -> Result<Self, Error> {
        let mut builder = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(cfg.timeout)
            .connect_timeout(cfg.connect_timeout);
        if !cfg.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()
            .map_err(|e| Error::Transient {
                url: cfg.base_url.clone(),
                source: Box::new(e),
            })?;

        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
        })
    }

    fn url_for(&self, command: &str) -> String {
        format!("{}{command}", self.base_url)
    }
}

impl Transport for HttpTransport {
    fn get(&self, command: &str, params: &[(&str, String)]) -> Result<String, Error> {
        let url = self.url_for(command);
        crate::dlog!("GET {url} params={}", params.len());

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .map_err(|e| Error::Transient {
                url: url.clone(),
                source: Box::new(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "request rejected");
            return Err(Error::Request {
                status: status.as_u16(),
                url,
            });
        }

        response.text().map_err(|e| Error::Transient {
            url,
            source: Box::new(e),
        })
    }
}
