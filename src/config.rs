use once_cell::sync::Lazy;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_BASE_URL: &str = "http://api.mobile.endomondo.com/mobile/";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Records requested per listing call.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Hard upper bound on listing calls per fetch window.
pub const DEFAULT_MAX_PAGES: usize = 1_000;

pub const OS: &str = "Android";
pub const OS_VERSION: &str = "2.2";
pub const MODEL: &str = "M";

/// Stable per-host device id, as the mobile app would send.
pub static DEVICE_ID: Lazy<String> =
    Lazy::new(|| device_id_for(&gethostname::gethostname().to_string_lossy()));

/// UUIDv5 of `host` in the DNS namespace.
pub fn device_id_for(host: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, host.as_bytes()).to_string()
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment.
    pub system_proxy: bool,
    pub user_agent: String,
    pub device_id: String,
    pub page_size: usize,
    pub max_pages: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            system_proxy: true,
            user_agent: format!("Dalvik/1.4.0 (Linux; U; {OS} {OS_VERSION}; {MODEL} Build/GRI54)"),
            device_id: (*DEVICE_ID).clone(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mimic_the_android_client() {
        let cfg = ClientConfig::default();
        assert_eq!(
            cfg.user_agent,
            "Dalvik/1.4.0 (Linux; U; Android 2.2; M Build/GRI54)"
        );
        assert_eq!(cfg.page_size, 10);
        assert!(cfg.base_url.ends_with('/'));
        assert!(Uuid::parse_str(&cfg.device_id).is_ok());
    }

    #[test]
    fn device_id_follows_the_host_name() {
        let host = gethostname::gethostname();
        assert_eq!(*DEVICE_ID, device_id_for(&host.to_string_lossy()));
        assert_ne!(device_id_for("alpha.local"), device_id_for("beta.local"));
        // Well-known v5 vector for "python.org" in the DNS namespace.
        assert_eq!(
            device_id_for("python.org"),
            "886313e1-3b8a-5372-9b90-0c9aee199e5d"
        );
    }

    #[test]
    fn page_size_and_cap_never_zero() {
        let cfg = ClientConfig::default().with_page_size(0).with_max_pages(0);
        assert_eq!(cfg.page_size, 1);
        assert_eq!(cfg.max_pages, 1);
    }
}
