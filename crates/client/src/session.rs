//! Authentication and per-instance session state.

use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::transport::Transport;
use crate::JsonBank;

/// The API key the client authenticated with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedKey {
    pub title: String,
    /// Projects the key may access.
    #[serde(default, deserialize_with = "one_or_many")]
    pub projects: Vec<String>,
}

/// Identity returned by `POST /v1/authenticate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedData {
    pub authenticated: bool,
    pub username: String,
    pub api_key: AuthenticatedKey,
}

/// Older servers send `projects` as a single string.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Null(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(project) if project.is_empty() => Vec::new(),
        OneOrMany::One(project) => vec![project],
        OneOrMany::Many(projects) => projects,
        OneOrMany::Null(()) => Vec::new(),
    })
}

/// Result of the last successful authentication. Never cleared.
#[derive(Debug, Clone, Default)]
pub struct Session {
    authenticated: bool,
    identity: Option<AuthenticatedData>,
}

impl Session {
    fn record(&mut self, identity: AuthenticatedData) {
        self.authenticated = true;
        self.identity = Some(identity);
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn identity(&self) -> Option<&AuthenticatedData> {
        self.identity.as_ref()
    }
}

impl<T: Transport> JsonBank<T> {
    /// Verify the public key and remember who it belongs to.
    ///
    /// Safe to call again; each success overwrites the stored identity and
    /// a failure leaves the previous session untouched.
    pub fn authenticate(&mut self) -> Result<AuthenticatedData> {
        let url = format!("{}/authenticate", self.urls.v1);
        let request = self.build_keyed(Method::POST, url, None)?;
        let data: AuthenticatedData = self.send(&request)?;

        log::info!("authenticated as {} (key {:?})", data.username, data.api_key.title);
        self.session.record(data.clone());
        Ok(data)
    }

    /// True once [`JsonBank::authenticate`] has succeeded on this instance.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Username of the authenticated key owner, or `""`.
    pub fn username(&self) -> String {
        self.session
            .identity()
            .map(|identity| identity.username.clone())
            .unwrap_or_default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
