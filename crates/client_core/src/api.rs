use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::GuestRecord,
    protocol::{
        GuestEntry, GuestListResponse, SendMessageRequest, UpdateGuestRequest, UpdateGuestResponse,
    },
};
use tracing::debug;
use url::Url;

use crate::error::{DirectoryError, InvitationError, SubmissionError};

const GUEST_LIST_PATH: &str = "api/data";
const UPDATE_GUEST_PATH: &str = "api/updateInvitados";
const SEND_MESSAGE_PATH: &str = "api/send-message";

/// Remote guest list: the read path feeding suggestions and the write path recording answers.
#[async_trait]
pub trait GuestApi: Send + Sync {
    async fn list_guests(&self) -> Result<Vec<GuestRecord>, DirectoryError>;
    async fn update_attendance(&self, request: &UpdateGuestRequest) -> Result<(), SubmissionError>;
}

/// Joins `path` onto `base` as a child, whether or not `base` ends with a slash.
pub fn endpoint(base: &Url, path: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path)
        .with_context(|| format!("invalid endpoint path '{path}' for base url '{base}'"))
}

pub struct HttpGuestApi {
    http: Client,
    list_url: Url,
    update_url: Url,
}

impl HttpGuestApi {
    pub fn new(base_url: &Url) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &Url) -> Result<Self> {
        let mut list_url = endpoint(base_url, GUEST_LIST_PATH)?;
        list_url.query_pairs_mut().append_pair("num_invitados", "0");
        Ok(Self {
            http,
            list_url,
            update_url: endpoint(base_url, UPDATE_GUEST_PATH)?,
        })
    }

    /// Full directory rows, including the columns the form ignores.
    pub async fn fetch_guest_table(&self) -> Result<Vec<GuestEntry>, DirectoryError> {
        let res = self
            .http
            .get(self.list_url.clone())
            .send()
            .await?
            .error_for_status()?;
        let body: GuestListResponse = res.json().await?;
        debug!(rows = body.invitados.len(), "fetched guest directory");
        Ok(body.invitados)
    }
}

#[async_trait]
impl GuestApi for HttpGuestApi {
    async fn list_guests(&self) -> Result<Vec<GuestRecord>, DirectoryError> {
        Ok(self
            .fetch_guest_table()
            .await?
            .into_iter()
            .map(GuestRecord::from)
            .collect())
    }

    async fn update_attendance(&self, request: &UpdateGuestRequest) -> Result<(), SubmissionError> {
        let res = self
            .http
            .post(self.update_url.clone())
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        let body: UpdateGuestResponse = res.json().await?;
        if !body.is_success() {
            return Err(SubmissionError::UnexpectedAcknowledgement(body.message));
        }
        Ok(())
    }
}

/// Client for the messaging service used by the guest panel to send invitations.
pub struct InvitationSender {
    http: Client,
    send_url: Url,
    request_timeout: Duration,
}

impl InvitationSender {
    pub fn new(messaging_url: &Url, request_timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: Client::new(),
            send_url: endpoint(messaging_url, SEND_MESSAGE_PATH)?,
            request_timeout,
        })
    }

    /// Sends one message and returns the message SID reported by the service.
    pub async fn send(&self, to: &str, body: &str) -> Result<String, InvitationError> {
        tokio::time::timeout(self.request_timeout, self.deliver(to, body))
            .await
            .map_err(|_| InvitationError::TimedOut(self.request_timeout))?
    }

    async fn deliver(&self, to: &str, body: &str) -> Result<String, InvitationError> {
        let res = self
            .http
            .post(self.send_url.clone())
            .json(&SendMessageRequest {
                to: to.to_string(),
                body: body.to_string(),
            })
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(InvitationError::Status(res.status()));
        }
        let sid: serde_json::Value = res.json().await?;
        Ok(match sid {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
