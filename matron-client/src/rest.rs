//! Low-level HTTP access to an OpenMRS instance.
//!
//! Two base URLs are involved: the REST webservices base
//! (`…/ws/rest/v1`) and the FHIR R4 base (`…/ws/fhir2/R4`). Paths passed to
//! the helpers are joined against the appropriate base; absolute URLs (the
//! `links.next` URIs of paged responses) are used as-is.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{extract_server_message, ApiError, Result};

#[derive(Debug, Clone)]
pub struct RestClient {
    rest_base: String,
    fhir_base: String,
    auth: Option<(String, String)>,
    http: reqwest::Client,
}

impl RestClient {
    pub fn new(rest_base: impl Into<String>, fhir_base: impl Into<String>) -> Result<Self> {
        Self::with_timeout(rest_base, fhir_base, Duration::from_secs(30))
    }

    pub fn with_timeout(
        rest_base: impl Into<String>,
        fhir_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            rest_base: trim_slash(rest_base.into()),
            fhir_base: trim_slash(fhir_base.into()),
            auth: None,
            http,
        })
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    pub fn rest_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.rest_base, path.trim_start_matches('/'))
        }
    }

    pub fn fhir_url(&self, path: &str) -> String {
        format!("{}/{}", self.fhir_base, path.trim_start_matches('/'))
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some((user, pass)) => request.basic_auth(user, Some(pass)),
            None => request,
        }
    }

    /// GET a REST path (or an absolute next-page URL) and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.rest_url(path);
        tracing::debug!(%url, "GET");
        let response = self.apply_auth(self.http.get(&url)).send().await?;
        Self::decode(response).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.rest_url(path);
        tracing::debug!(%url, "POST");
        let response = self
            .apply_auth(self.http.post(&url))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.rest_url(path);
        tracing::debug!(%url, "DELETE");
        let response = self.apply_auth(self.http.delete(&url)).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// POST an `application/x-www-form-urlencoded` body to a FHIR path
    /// (`/Patient/_search` style).
    pub async fn fhir_post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.fhir_url(path);
        let body: String = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        tracing::debug!(%url, "POST (form)");

        let response = self
            .apply_auth(self.http.post(&url))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn fhir_get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.fhir_url(path);
        tracing::debug!(%url, "GET");
        let response = self.apply_auth(self.http.get(&url)).send().await?;
        Self::decode(response).await
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_server_message(&body)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        tracing::warn!(status = status.as_u16(), %message, "Server rejected request");
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn trim_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_url_joining() {
        let client = RestClient::new("http://x/ws/rest/v1/", "http://x/ws/fhir2/R4").unwrap();
        assert_eq!(client.rest_url("bed"), "http://x/ws/rest/v1/bed");
        assert_eq!(client.rest_url("/bed"), "http://x/ws/rest/v1/bed");
        // Absolute next-page links pass through untouched.
        assert_eq!(
            client.rest_url("http://x/ws/rest/v1/queue-entry?startIndex=50"),
            "http://x/ws/rest/v1/queue-entry?startIndex=50"
        );
    }

    #[test]
    fn test_fhir_url_joining() {
        let client = RestClient::new("http://x/ws/rest/v1", "http://x/ws/fhir2/R4/").unwrap();
        assert_eq!(
            client.fhir_url("Patient/_search"),
            "http://x/ws/fhir2/R4/Patient/_search"
        );
    }
}
