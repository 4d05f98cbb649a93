use crate::config::CloudConfig;
use crate::errors::{AppError, AppResult};
use crate::remote::{ArtifactUploader, artifact_name, join_remote};
use reqwest::blocking::{Body, Client};
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::time::Duration;

/// Body of `GET /resources/upload`.
#[derive(Debug, Deserialize)]
pub struct UploadLink {
    pub href: String,
    #[serde(default)]
    pub method: Option<String>,
}

impl UploadLink {
    /// HTTP method the link expects; `PUT` when the server names none.
    pub fn http_method(&self) -> AppResult<Method> {
        match self.method.as_deref().map(str::trim) {
            None | Some("") => Ok(Method::PUT),
            Some(m) => Method::from_bytes(m.to_ascii_uppercase().as_bytes()).map_err(|_| {
                AppError::UnexpectedResponse(format!("upload link with invalid method '{m}'"))
            }),
        }
    }
}

/// Cloud drive push: ask for an upload link, then send the file there.
#[derive(Debug, Clone)]
pub struct CloudDriveUploader {
    client: Client,
    api_base: String,
    token: String,
    folder: String,
}

impl CloudDriveUploader {
    /// Fails with a configuration error when the token is missing.
    pub fn from_config(cfg: &CloudConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Self::with_client(cfg, client)
    }

    /// Same as [`from_config`](Self::from_config) with a caller-built client.
    pub fn with_client(cfg: &CloudConfig, client: Client) -> AppResult<Self> {
        let token = cfg
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Config(
                    "cloud drive token is not configured (set cloud.token or HRTRACK_CLOUD_TOKEN)"
                        .to_string(),
                )
            })?
            .to_string();

        Ok(Self {
            client,
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            token,
            folder: cfg.folder.clone(),
        })
    }

    /// Pre-signed upload link for `remote_path`, overwriting any existing file.
    pub fn request_upload_link(&self, remote_path: &str) -> AppResult<UploadLink> {
        let resp = self
            .client
            .get(format!("{}/resources/upload", self.api_base))
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("path", remote_path), ("overwrite", "true")])
            .send()?
            .error_for_status()?;

        let link: UploadLink = resp
            .json()
            .map_err(|e| AppError::UnexpectedResponse(format!("upload link: {e}")))?;

        if link.href.is_empty() {
            return Err(AppError::UnexpectedResponse(
                "upload link without href".to_string(),
            ));
        }
        Ok(link)
    }
}

impl ArtifactUploader for CloudDriveUploader {
    fn name(&self) -> &'static str {
        "cloud"
    }

    fn upload(&self, local_path: &Path) -> AppResult<String> {
        let remote_path = join_remote(&self.folder, &artifact_name(local_path)?);

        let file = File::open(local_path)?;
        let len = file.metadata()?.len();

        let link = self.request_upload_link(&remote_path)?;
        let method = link.http_method()?;

        self.client
            .request(method, &link.href)
            .body(Body::sized(file, len))
            .send()?
            .error_for_status()?;

        Ok(remote_path)
    }
}
