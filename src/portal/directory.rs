//! Service discovery from the post-login account page.
//!
//! The portal has no API for listing services; the only source is the HTML
//! of the login response, where each metered service links to its detail
//! page with an anchor like `<a href="fjarrvarme/info/?lpid=12345">`. The
//! path segment is the service name and `lpid` is the provider-assigned
//! delivery-point identifier used by the export API.

use std::collections::BTreeMap;

use scraper::{Html, Selector};

/// Mapping from service name (e.g. "fjarrvarme", "el", "vatten", "avfall")
/// to the provider's lpid for that service.
#[derive(Debug, Clone)]
pub struct ServiceDirectory {
    services: BTreeMap<String, String>,
}

impl ServiceDirectory {
    /// Scrapes the directory from a login response body. Returns `None` when
    /// the page contains no service anchors at all, which callers treat as
    /// "no services discovered" rather than an empty directory.
    pub fn from_login_page(body: &str) -> Option<Self> {
        let selector =
            Selector::parse(r#"a[href*="/info/?lpid="]"#).expect("selector literal is valid");
        let document = Html::parse_document(body);

        let mut services = BTreeMap::new();
        for anchor in document.select(&selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if let Some((service, lpid)) = parse_service_href(href) {
                services.insert(service.to_string(), lpid.to_string());
            }
        }

        if services.is_empty() {
            None
        } else {
            Some(Self { services })
        }
    }

    /// Looks up the lpid for a service name.
    pub fn lpid(&self, service: &str) -> Option<&str> {
        self.services.get(service).map(String::as_str)
    }

    /// The discovered service names, in sorted order.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// (name, lpid) pairs, in sorted name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.services
            .iter()
            .map(|(name, lpid)| (name.as_str(), lpid.as_str()))
    }
}

/// Splits an href of the form `<segment>/info/?lpid=<digits>` into the
/// service name and its lpid. The segment must be a single word path
/// component and the identifier must start with at least one digit.
fn parse_service_href(href: &str) -> Option<(&str, &str)> {
    let (service, rest) = href.split_once("/info/?lpid=")?;
    if service.is_empty()
        || !service
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return None;
    }
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    Some((service, &rest[..digits]))
}
