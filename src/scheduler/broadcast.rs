use dioxus_logger::tracing;
use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    bot::http::HttpSink, config::Config, error::AppError, service::broadcast::broadcast,
    service::generator::GeneratorGateway, state::BotState,
};

/// A recurring broadcast: cron expression plus destination channels.
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastSchedule {
    pub label: &'static str,
    pub cron: String,
    pub channels: Vec<u64>,
}

/// Broadcast schedules with at least one destination channel.
pub fn schedules(config: &Config) -> Vec<BroadcastSchedule> {
    [
        BroadcastSchedule {
            label: "hourly",
            cron: config.hourly_schedule.clone(),
            channels: config.hourly_channel_ids.clone(),
        },
        BroadcastSchedule {
            label: "frequent",
            cron: config.frequent_schedule.clone(),
            channels: config.frequent_channel_ids.clone(),
        },
    ]
    .into_iter()
    .filter(|schedule| {
        if schedule.channels.is_empty() {
            tracing::info!("No channels configured for {} broadcasts", schedule.label);
        }
        !schedule.channels.is_empty()
    })
    .collect()
}

fn broadcast_job(
    schedule: BroadcastSchedule,
    generator: GeneratorGateway,
    sink: HttpSink,
) -> Result<Job, AppError> {
    let label = schedule.label;
    let channels = Arc::new(schedule.channels);

    let job = Job::new_async(schedule.cron.as_str(), move |_uuid, _lock| {
        let generator = generator.clone();
        let sink = sink.clone();
        let channels = channels.clone();

        Box::pin(async move {
            broadcast(&generator, &sink, label, &channels).await;
        })
    })?;

    Ok(job)
}

/// Starts the scheduled broadcasts.
///
/// Registers one cron job per configured schedule. Every run invokes the
/// generator through the shared gateway, so broadcasts queue behind any
/// command that is generating at the same moment.
///
/// # Arguments
/// - `state` - Shared bot state (configuration and generator gateway)
/// - `discord_http` - Discord HTTP client for posting
pub async fn start_scheduler(state: BotState, discord_http: Arc<Http>) -> Result<(), AppError> {
    let schedules = schedules(&state.config);
    if schedules.is_empty() {
        tracing::info!("No broadcasts scheduled");
        return Ok(());
    }

    let scheduler = JobScheduler::new().await?;
    let sink = HttpSink::new(discord_http);

    for schedule in schedules {
        tracing::info!(
            "Scheduling {} broadcast ({}) to {} channels",
            schedule.label,
            schedule.cron,
            schedule.channels.len()
        );
        let job = broadcast_job(schedule, state.generator.clone(), sink.clone())?;
        scheduler.add(job).await?;
    }

    scheduler.start().await?;

    tracing::info!("Broadcast scheduler started");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::generator::GeneratorCommand;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let mut vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        vars.insert("DISCORD_BOT_TOKEN".to_string(), "token".to_string());
        Config::from_lookup(|name| vars.get(name).cloned()).unwrap()
    }

    #[test]
    fn skips_schedules_without_channels() {
        let config = config(&[("HOURLY_CHANNEL_IDS", "1,2")]);

        assert_eq!(
            schedules(&config),
            vec![BroadcastSchedule {
                label: "hourly",
                cron: "0 0 * * * *".to_string(),
                channels: vec![1, 2],
            }]
        );
        assert!(schedules(&self::config(&[])).is_empty());
    }

    #[tokio::test]
    async fn default_schedules_build_jobs() {
        let config = config(&[("HOURLY_CHANNEL_IDS", "1"), ("FREQUENT_CHANNEL_IDS", "2")]);
        let generator = GeneratorGateway::new(
            GeneratorCommand::from_parts(vec!["rod_gen".to_string()]).unwrap(),
        );
        let sink = HttpSink::new(Arc::new(Http::new("token")));

        for schedule in schedules(&config) {
            assert!(broadcast_job(schedule, generator.clone(), sink.clone()).is_ok());
        }
    }

    #[tokio::test]
    async fn rejects_malformed_cron() {
        let config = config(&[("HOURLY_CHANNEL_IDS", "1"), ("HOURLY_SCHEDULE", "whenever")]);
        let generator = GeneratorGateway::new(
            GeneratorCommand::from_parts(vec!["rod_gen".to_string()]).unwrap(),
        );
        let sink = HttpSink::new(Arc::new(Http::new("token")));

        let schedule = schedules(&config).remove(0);
        assert!(broadcast_job(schedule, generator, sink).is_err());
    }
}
