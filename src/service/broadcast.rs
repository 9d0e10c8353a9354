use dioxus_logger::tracing;

use crate::service::{
    delivery::{fan_out, DeliveryReport, MessageSink, Payload},
    generator::GeneratorGateway,
};

/// Result of one scheduled broadcast run.
#[derive(Debug, PartialEq)]
pub enum BroadcastOutcome {
    /// Generation failed or produced nothing; nothing was posted.
    Skipped,
    /// Generated text was fanned out.
    Posted(DeliveryReport),
}

/// Generates one message and posts it verbatim to every channel.
///
/// # Arguments
/// - `gateway` - Shared generator gateway
/// - `sink` - Transport used for delivery
/// - `label` - Schedule name, for logs
/// - `channels` - Destination channel IDs
pub async fn broadcast(
    gateway: &GeneratorGateway,
    sink: &dyn MessageSink,
    label: &str,
    channels: &[u64],
) -> BroadcastOutcome {
    let result = gateway.invoke().await;

    let Some(text) = result.text() else {
        let reason = if result.is_success() {
            "generator produced no output".to_string()
        } else {
            result.render(gateway.program_name())
        };
        tracing::warn!("Skipping {} broadcast: {}", label, reason);
        return BroadcastOutcome::Skipped;
    };

    let report = fan_out(sink, channels, None, Payload::Text(text)).await;

    tracing::info!(
        "{} broadcast delivered to {} of {} channels",
        label,
        report.delivered.len(),
        channels.len()
    );

    BroadcastOutcome::Posted(report)
}
