use crate::config::{ClientConfig, MODEL, OS, OS_VERSION};
use crate::error::Error;
use crate::transport::Transport;

pub const AUTH_COMMAND: &str = "auth";
const SUCCESS_MARKER: &str = "OK";

pub enum Credentials {
    Password { email: String, password: String },
    Token(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Password { email, .. } => f
                .debug_struct("Password")
                .field("email", email)
                .finish_non_exhaustive(),
            Self::Token(_) => f.write_str("Token(..)"),
        }
    }
}

/// Exchange credentials for a session token.
///
/// A token passed in is returned as-is without touching the network.
pub fn authenticate<T: Transport>(
    transport: &T,
    cfg: &ClientConfig,
    credentials: Credentials,
) -> Result<String, Error> {
    let (email, password) = match credentials {
        Credentials::Token(token) => {
            crate::dlog!("auth=reuse_token");
            return Ok(token);
        }
        Credentials::Password { email, password } => (email, password),
    };

    tracing::info!(email = %email, "requesting auth token");

    let params = [
        ("email", email),
        ("password", password),
        ("country", "US".to_string()),
        ("deviceId", cfg.device_id.clone()),
        ("os", OS.to_string()),
        ("appVersion", "7.1".to_string()),
        ("appVariant", "M-Pro".to_string()),
        ("osVersion", OS_VERSION.to_string()),
        ("model", MODEL.to_string()),
        ("v", "2.4".to_string()),
        ("action", "PAIR".to_string()),
    ];

    let body = transport.get(AUTH_COMMAND, &params)?;
    let token = parse_auth_response(&body)?;
    tracing::info!("auth token acquired");
    Ok(token)
}

/// Split a plain-text response into its `key=value` lines after the `OK` marker.
pub fn parse_text_response(body: &str) -> Result<Vec<(&str, &str)>, Error> {
    let mut lines = body.lines().map(str::trim_end);

    let first = lines
        .next()
        .filter(|l| !l.is_empty())
        .ok_or_else(|| Error::auth("empty response"))?;
    if first != SUCCESS_MARKER {
        return Err(Error::auth(first));
    }

    Ok(lines.filter_map(|l| l.split_once('=')).collect())
}

pub fn parse_auth_response(body: &str) -> Result<String, Error> {
    parse_text_response(body)?
        .into_iter()
        .find(|(k, _)| *k == "authToken")
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::auth("response carried no authToken"))
}
