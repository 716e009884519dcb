//! Chat response pipeline: a linear chain of three strategies. The cloud
//! model is tried once, then the local model, then the rule-based fallback,
//! which cannot fail and therefore terminates the chain.

pub mod cloud;
pub mod fallback;
pub mod local;

use serde::Serialize;

use crate::error::{RespondError, TierError};
use cloud::CloudClient;
use local::LocalClient;

/// Tag for local-model replies so callers can tell they came from the
/// offline fallback source.
const LOCAL_TAG: &str = "[offline model]";

/// Which strategy produced the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Cloud,
    Local,
    Fallback,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tier::Cloud => "cloud",
            Tier::Local => "local",
            Tier::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// A chat reply and the tier that produced it.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub text: String,
    pub tier: Tier,
}

/// Sequences the three tiers for each inbound message.
#[derive(Debug, Clone)]
pub struct Responder {
    cloud: CloudClient,
    local: LocalClient,
    match_threshold: f64,
}

impl Responder {
    pub fn new(cloud: CloudClient, local: LocalClient, match_threshold: f64) -> Self {
        Self {
            cloud,
            local,
            match_threshold,
        }
    }

    /// Produces a reply for `message`, advancing cloud -> local -> fallback.
    /// Only an empty message is an error; every tier failure is absorbed.
    pub async fn respond(&self, message: &str) -> Result<ChatReply, RespondError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(RespondError::EmptyMessage);
        }

        let prompt = frame_prompt(message);

        let cloud_err = match self.cloud.attempt(&prompt).await {
            Ok(text) => {
                return Ok(ChatReply {
                    text,
                    tier: Tier::Cloud,
                })
            }
            Err(err) => {
                tracing::warn!("cloud model unavailable: {err}");
                err
            }
        };

        let local_err = match self.local.attempt(&prompt).await {
            Ok(text) => {
                return Ok(ChatReply {
                    text: format!("{LOCAL_TAG} {text}"),
                    tier: Tier::Local,
                })
            }
            Err(err) => {
                tracing::warn!("local model unavailable: {err}");
                err
            }
        };

        tracing::warn!(
            cloud = %cloud_err,
            local = %local_err,
            "all model tiers failed; using rule-based fallback"
        );

        let threshold = effective_threshold(self.match_threshold, &local_err);
        Ok(ChatReply {
            text: fallback::respond(message, threshold).to_owned(),
            tier: Tier::Fallback,
        })
    }
}

/// Wraps the user message in the sustainability framing sent to both models.
fn frame_prompt(message: &str) -> String {
    format!(
        "You are a helpful sustainability assistant focused on providing information \
         about carbon footprints, climate change, and environmental topics.\n\n\
         User query: {message}\n\n\
         Please provide an informative, accurate, and helpful response about this \
         environmental topic. Keep your answer concise, clear, and focused on \
         sustainability."
    )
}

/// A timeout means the local model was reachable but slow, so a topical
/// canned answer is preferred over the generic one.
fn effective_threshold(base: f64, local_err: &TierError) -> f64 {
    if matches!(local_err, TierError::Timeout) {
        fallback::TIMEOUT_THRESHOLD.min(base)
    } else {
        base
    }
}
