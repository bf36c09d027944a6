use reqwest::StatusCode;

use crate::config::PortalConfig;
use crate::error::{DecodeError, Error, Result};
use crate::model::Granularity;
use crate::portal::directory::ServiceDirectory;

const LOGIN_PATH: &str = "/portalen/index.xml";
const EXPORT_PATH: &str = "/_internal/kundportal/export";

/// Substring present in the login response body when the portal rejects the
/// credentials. There is no status code to go on; the portal answers 200
/// either way.
const LOGIN_FAILURE_MARKER: &str = "Kunde inte logga in";

/// Literal value of the login form's submit field, sent exactly as the
/// portal's own form does.
const LOGIN_BUTTON_VALUE: &str = "Välkommen+in";

/// Session-holding client for the customer portal.
///
/// Holds a cookie-carrying HTTP client, a `logged_in` flag and the service
/// directory scraped from the login response. Login happens lazily, at most
/// once per client instance: every fetch operation calls
/// [`PortalClient::ensure_logged_in`] before touching the export API.
pub struct PortalClient {
    http_client: reqwest::Client,
    config: PortalConfig,
    logged_in: bool,
    directory: Option<ServiceDirectory>,
}

impl PortalClient {
    pub fn new(config: PortalConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
            .build()?;
        Ok(Self {
            http_client,
            config,
            logged_in: false,
            directory: None,
        })
    }

    /// Logs in unless the session is already authenticated.
    pub async fn ensure_logged_in(&mut self) -> Result<()> {
        if self.logged_in {
            return Ok(());
        }
        self.login().await
    }

    /// Posts the credentials to the portal's login form and scrapes the
    /// service directory from the response body.
    async fn login(&mut self) -> Result<()> {
        tracing::debug!("logging in");
        let url = format!("{}{}", self.config.base_url, LOGIN_PATH);
        let form = [
            ("uname", self.config.username.as_str()),
            ("pword", self.config.password.as_str()),
            ("login", LOGIN_BUTTON_VALUE),
        ];
        let body = self
            .http_client
            .post(&url)
            .form(&form)
            .send()
            .await?
            .text()
            .await?;

        if body.contains(LOGIN_FAILURE_MARKER) {
            return Err(Error::LoginFailed);
        }

        self.directory = ServiceDirectory::from_login_page(&body);
        match &self.directory {
            Some(directory) => {
                let found = directory
                    .entries()
                    .map(|(name, lpid)| format!("'{name}' ({lpid})"))
                    .collect::<Vec<_>>()
                    .join(", ");
                tracing::info!("found services {found}");
            }
            None => tracing::warn!("login page listed no services"),
        }

        self.logged_in = true;
        Ok(())
    }

    /// Issues one export request and returns the JSON body verbatim.
    ///
    /// The URL substitutes the service's lpid and the granularity's api name
    /// into the export path; `params` become the query string. A 404 is
    /// reported as its own error because the portal answers 404 (rather than
    /// 401) when the session is not actually authenticated.
    pub async fn get_raw(
        &mut self,
        service: &str,
        granularity: Granularity,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value> {
        self.ensure_logged_in().await?;

        let directory = self.directory.as_ref().ok_or(Error::NoServicesFound)?;
        let lpid = directory
            .lpid(service)
            .ok_or_else(|| Error::service_unavailable(service, directory.service_names()))?;

        let url = format!(
            "{}{}/{}/{}.json",
            self.config.base_url, EXPORT_PATH, lpid, granularity
        );
        tracing::info!("GET '{url}' with params {params:?}");
        let response = self.http_client.get(&url).query(params).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::EndpointNotFound);
        }

        let body = response.text().await?;
        let value = serde_json::from_str(&body).map_err(DecodeError::Json)?;
        Ok(value)
    }

    #[cfg(test)]
    pub(crate) fn directory(&self) -> Option<&ServiceDirectory> {
        self.directory.as_ref()
    }
}
