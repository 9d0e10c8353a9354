//! Outbound delivery seam.
//!
//! Services never talk to Discord directly; they hand payloads to a
//! `MessageSink`. The bot layer implements it over serenity's HTTP client and
//! tests use an in-memory recorder.

use dioxus_logger::tracing;
use serenity::async_trait;

use crate::{error::delivery::DeliveryError, model::rule::RuleEmbed};

/// Something that can post to a Discord channel.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Posts plain text to `channel_id`.
    async fn send_text(&self, channel_id: u64, text: &str) -> Result<(), DeliveryError>;

    /// Posts a rule embed to `channel_id`.
    async fn send_rule(&self, channel_id: u64, embed: &RuleEmbed) -> Result<(), DeliveryError>;
}

/// Content fanned out to several channels.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    Text(&'a str),
    Rule(&'a RuleEmbed),
}

/// Per-destination outcome of a fan-out.
#[derive(Debug, Default, PartialEq)]
pub struct DeliveryReport {
    pub delivered: Vec<u64>,
    pub failed: Vec<DeliveryError>,
}

/// Delivers `payload` to every destination except `skip`.
///
/// Destinations are attempted in order. A failure is logged and recorded in
/// the report; it never prevents delivery to the remaining destinations.
///
/// # Arguments
/// - `sink` - Transport used for delivery
/// - `destinations` - Channel IDs to post to
/// - `skip` - Channel to leave out (usually the channel the request came from)
/// - `payload` - What to post
pub async fn fan_out(
    sink: &dyn MessageSink,
    destinations: &[u64],
    skip: Option<u64>,
    payload: Payload<'_>,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    for &channel_id in destinations {
        if Some(channel_id) == skip {
            continue;
        }

        let result = match payload {
            Payload::Text(text) => sink.send_text(channel_id, text).await,
            Payload::Rule(embed) => sink.send_rule(channel_id, embed).await,
        };

        match result {
            Ok(()) => report.delivered.push(channel_id),
            Err(e) => {
                tracing::error!("{}", e);
                report.failed.push(e);
            }
        }
    }

    report
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use std::sync::Mutex;

    /// Sink that records every delivery and rejects configured channels.
    #[derive(Default)]
    pub struct RecordingSink {
        pub sent: Mutex<Vec<(u64, String)>>,
        pub forbidden: Vec<u64>,
        pub missing: Vec<u64>,
    }

    impl RecordingSink {
        pub fn rejecting(forbidden: Vec<u64>, missing: Vec<u64>) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                forbidden,
                missing,
            }
        }

        pub fn sent(&self) -> Vec<(u64, String)> {
            self.sent.lock().unwrap().clone()
        }

        fn record(&self, channel_id: u64, content: String) -> Result<(), DeliveryError> {
            if self.forbidden.contains(&channel_id) {
                return Err(DeliveryError::PermissionDenied(channel_id));
            }
            if self.missing.contains(&channel_id) {
                return Err(DeliveryError::NotFound(channel_id));
            }
            self.sent.lock().unwrap().push((channel_id, content));
            Ok(())
        }
    }

    #[async_trait]
    impl MessageSink for RecordingSink {
        async fn send_text(&self, channel_id: u64, text: &str) -> Result<(), DeliveryError> {
            self.record(channel_id, text.to_string())
        }

        async fn send_rule(&self, channel_id: u64, embed: &RuleEmbed) -> Result<(), DeliveryError> {
            self.record(channel_id, embed.title.clone())
        }
    }
}
