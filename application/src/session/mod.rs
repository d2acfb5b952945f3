//! Session state for one assessment run.
//!
//! A string-keyed store of serialized values, scoped by a [`FlowToken`].
//! Restarting the flow clears every key and issues a new token; a caller
//! still holding the old token is treated as if the flow never started.
//!
//! Reading a missing key never yields defaults. It yields a
//! [`NavigationError`] naming the screen to redirect to, which guards
//! against deep-linking into a later step.

use crate::flow::Step;
use blueprint_domain::{AnswerSet, Lead, Responses};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

pub const ANSWERS_KEY: &str = "bb_answers";
pub const SELECTIONS_KEY: &str = "bb_selections";
pub const SLIDERS_KEY: &str = "bb_sliders";
pub const LEAD_KEY: &str = "bb_lead";

/// Identity of one assessment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowToken(u64);

impl std::fmt::Display for FlowToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A later screen was entered without the state it needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Assessment has not been completed; redirecting to {redirect}")]
    FlowNotStarted { redirect: Step },

    #[error("Flow token {presented} is no longer current ({current}); redirecting to {redirect}")]
    StaleToken {
        presented: FlowToken,
        current: FlowToken,
        redirect: Step,
    },
}

impl NavigationError {
    /// Screen the caller must move to.
    pub fn redirect(&self) -> Step {
        match self {
            NavigationError::FlowNotStarted { redirect }
            | NavigationError::StaleToken { redirect, .. } => *redirect,
        }
    }

    fn not_started() -> Self {
        NavigationError::FlowNotStarted {
            redirect: Step::first(),
        }
    }
}

/// Errors writing to the session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Process-local key/value store for a single assessment run.
#[derive(Debug)]
pub struct SessionStore {
    token: FlowToken,
    entries: HashMap<&'static str, String>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            token: FlowToken(1),
            entries: HashMap::new(),
        }
    }

    /// Token of the current run.
    pub fn token(&self) -> FlowToken {
        self.token
    }

    /// Start a new run: drop every key and invalidate the old token.
    pub fn restart(&mut self) -> FlowToken {
        self.entries.clear();
        self.token = FlowToken(self.token.0 + 1);
        debug!("Session restarted with token {}", self.token);
        self.token
    }

    /// Raw serialized value of a key.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn check(&self, token: FlowToken) -> Result<(), NavigationError> {
        if token == self.token {
            Ok(())
        } else {
            Err(NavigationError::StaleToken {
                presented: token,
                current: self.token,
                redirect: Step::first(),
            })
        }
    }

    fn encode<T: Serialize>(key: &'static str, value: &T) -> Result<String, SessionError> {
        serde_json::to_string(value).map_err(|source| SessionError::Serialize { key, source })
    }

    fn decode<T: DeserializeOwned>(&self, key: &'static str) -> Option<Result<T, serde_json::Error>> {
        self.entries.get(key).map(|raw| serde_json::from_str(raw))
    }

    /// Commit all three response groups at once.
    ///
    /// Everything is serialized before anything is written, so a failure
    /// leaves the previous contents untouched.
    pub fn commit_responses(
        &mut self,
        token: FlowToken,
        responses: &Responses,
    ) -> Result<(), SessionError> {
        self.check(token)?;
        let answers = Self::encode(ANSWERS_KEY, &responses.scores)?;
        let selections = Self::encode(SELECTIONS_KEY, &responses.selections)?;
        let sliders = Self::encode(SLIDERS_KEY, &responses.sliders)?;

        self.entries.insert(ANSWERS_KEY, answers);
        self.entries.insert(SELECTIONS_KEY, selections);
        self.entries.insert(SLIDERS_KEY, sliders);
        debug!(
            "Committed {} answers to session {}",
            responses.scores.len(),
            self.token
        );
        Ok(())
    }

    /// Whether a completed run is available under `token`.
    pub fn has_responses(&self, token: FlowToken) -> bool {
        self.check(token).is_ok() && self.entries.contains_key(ANSWERS_KEY)
    }

    /// Load the committed responses.
    ///
    /// Missing selections or slider values load as empty; a missing answer
    /// set means the flow never completed.
    pub fn load_responses(&self, token: FlowToken) -> Result<Responses, NavigationError> {
        self.check(token)?;
        let scores: AnswerSet = match self.decode(ANSWERS_KEY) {
            Some(Ok(scores)) => scores,
            Some(Err(e)) => {
                warn!("Discarding unreadable '{}': {}", ANSWERS_KEY, e);
                return Err(NavigationError::not_started());
            }
            None => return Err(NavigationError::not_started()),
        };
        let selections = self
            .decode(SELECTIONS_KEY)
            .and_then(Result::ok)
            .unwrap_or_default();
        let sliders = self
            .decode(SLIDERS_KEY)
            .and_then(Result::ok)
            .unwrap_or_default();

        Ok(Responses {
            scores,
            selections,
            sliders,
        })
    }

    /// Store the captured lead identity.
    pub fn store_lead(&mut self, token: FlowToken, lead: &Lead) -> Result<(), SessionError> {
        self.check(token)?;
        let encoded = Self::encode(LEAD_KEY, lead)?;
        self.entries.insert(LEAD_KEY, encoded);
        Ok(())
    }

    /// Captured lead, if the capture step has been completed.
    pub fn load_lead(&self, token: FlowToken) -> Result<Option<Lead>, NavigationError> {
        self.check(token)?;
        Ok(self.decode(LEAD_KEY).and_then(Result::ok))
    }
}
