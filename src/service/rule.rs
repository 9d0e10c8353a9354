use dioxus_logger::tracing;
use rand::seq::IndexedRandom;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    data::rule_counter::RuleCounterRepository,
    error::{command::CommandError, AppError},
    model::rule::{CreatedRule, QuoteResolution, RuleEmbed, RuleRequest, RuleSource},
    service::generator::GeneratorGateway,
};

const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate a rule. Please try again or provide text directly.";
const FALLBACK_HINT: &str = "If no text is provided, I'll attempt to generate a rule.";

/// Allocates rule numbers and composes rule embeds.
///
/// Clones share the in-memory counter. Each allocation increments the counter
/// and persists it before the lock is released, so numbers are unique and
/// strictly increasing for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct RuleService {
    counter: Arc<Mutex<u64>>,
    repository: RuleCounterRepository,
    gifs: Arc<Vec<String>>,
}

impl RuleService {
    /// Loads the persisted counter and builds the service.
    ///
    /// # Arguments
    /// - `repository` - Persistence for the last rule number
    /// - `gifs` - Pool of GIF URLs attached to rule embeds
    pub async fn load(
        repository: RuleCounterRepository,
        gifs: Vec<String>,
    ) -> Result<Self, AppError> {
        let last = repository.load().await?;

        tracing::info!(
            "Loaded rule counter {} from {}",
            last,
            repository.path().display()
        );

        Ok(Self {
            counter: Arc::new(Mutex::new(last)),
            repository,
            gifs: Arc::new(gifs),
        })
    }

    /// Increments the counter and persists it.
    ///
    /// A failed save is logged and the in-memory number is still returned.
    pub async fn next_number(&self) -> u64 {
        let mut counter = self.counter.lock().await;
        *counter += 1;

        if let Err(e) = self.repository.save(*counter).await {
            tracing::error!("Failed to persist rule counter {}: {}", *counter, e);
        }

        *counter
    }

    #[cfg(test)]
    pub async fn last_number(&self) -> u64 {
        *self.counter.lock().await
    }

    fn random_gif(&self) -> Option<String> {
        self.gifs.choose(&mut rand::rng()).cloned()
    }

    /// Creates a rule from a resolved request.
    ///
    /// A found quote always wins. Any other quote resolution adds a notice and
    /// falls back to the request text, which is only accepted in the rules
    /// channel. Blank text asks the generator for one.
    ///
    /// # Arguments
    /// - `request` - The resolved command invocation
    /// - `gateway` - Generator used when no text was provided
    /// - `rules_channel_id` - Channel where non-quote rules are accepted
    ///
    /// # Returns
    /// - `Ok(CreatedRule)` - Numbered rule with embed and private notices
    /// - `Err(CommandError::WrongChannel)` - Non-quote rule outside the rules channel
    /// - `Err(CommandError::ContentMissing)` - Generation produced no text
    pub async fn create_rule(
        &self,
        request: RuleRequest,
        gateway: &GeneratorGateway,
        rules_channel_id: Option<u64>,
    ) -> Result<CreatedRule, CommandError> {
        let mut notices = Vec::new();

        let quote = match request.quote {
            QuoteResolution::Found { content, author } if !content.trim().is_empty() => {
                Some((content, author))
            }
            QuoteResolution::Found { .. } | QuoteResolution::Empty => {
                notices.push(format!(
                    "The replied message has no text content to quote. {}",
                    FALLBACK_HINT
                ));
                None
            }
            QuoteResolution::Missing => {
                notices.push(format!(
                    "Could not find the replied message. {}",
                    FALLBACK_HINT
                ));
                None
            }
            QuoteResolution::Failed(reason) => {
                notices.push(format!(
                    "Error fetching replied message: {}. {}",
                    reason, FALLBACK_HINT
                ));
                None
            }
            QuoteResolution::None => None,
        };

        let (text, source) = match quote {
            Some((content, author)) => (content, RuleSource::Quoted(author)),
            None => {
                if rules_channel_id != Some(request.channel_id) {
                    return Err(CommandError::WrongChannel);
                }

                let text = request.text.trim().to_string();
                if text.is_empty() {
                    let generated = gateway.invoke().await;
                    let text = generated
                        .text()
                        .ok_or_else(|| {
                            CommandError::ContentMissing(GENERATION_FAILED_MESSAGE.to_string())
                        })?
                        .to_string();
                    (text, RuleSource::Generated(request.author))
                } else {
                    (text, RuleSource::Submitted(request.author))
                }
            }
        };

        let number = self.next_number().await;
        let embed = RuleEmbed::compose(number, &text, &source, self.random_gif());

        tracing::info!("Created rule {}", number);

        Ok(CreatedRule {
            number,
            embed,
            notices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::rule::{RuleAuthor, RULE_EMBED_COLOR},
        service::generator::GeneratorCommand,
    };
    use test_utils::{builder::TestBuilder, context::TestContext, generator::FakeGenerator};

    const RULES_CHANNEL: u64 = 100;
    const OTHER_CHANNEL: u64 = 200;

    fn author(name: &str) -> RuleAuthor {
        RuleAuthor {
            display_name: name.to_string(),
            avatar_url: Some(format!("https://cdn.example/{}.png", name)),
        }
    }

    fn request(channel_id: u64, text: &str, quote: QuoteResolution) -> RuleRequest {
        RuleRequest {
            channel_id,
            text: text.to_string(),
            author: author("alice"),
            quote,
        }
    }

    fn gateway(test: &TestContext) -> GeneratorGateway {
        GeneratorGateway::new(GeneratorCommand::from_parts(test.generator_command()).unwrap())
    }

    async fn service(test: &TestContext) -> RuleService {
        RuleService::load(
            RuleCounterRepository::new(test.rules_file()),
            vec!["https://gif.example/rod.gif".to_string()],
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn numbering_survives_restart() {
        let test = TestBuilder::new().build().unwrap();
        let gateway = gateway(&test);

        let rules = service(&test).await;
        for expected in 1..=3 {
            let created = rules
                .create_rule(
                    request(RULES_CHANNEL, "be nice", QuoteResolution::None),
                    &gateway,
                    Some(RULES_CHANNEL),
                )
                .await
                .unwrap();
            assert_eq!(created.number, expected);
        }

        let restarted = service(&test).await;
        let created = restarted
            .create_rule(
                request(RULES_CHANNEL, "be nicer", QuoteResolution::None),
                &gateway,
                Some(RULES_CHANNEL),
            )
            .await
            .unwrap();

        assert_eq!(created.number, 4);
        assert_eq!(created.embed.title, "Rule 4: be nicer");
    }

    #[tokio::test]
    async fn continues_from_persisted_counter() {
        let test = TestBuilder::new().with_rule_counter(41).build().unwrap();
        let rules = service(&test).await;

        assert_eq!(rules.next_number().await, 42);
        let stored = std::fs::read_to_string(test.rules_file()).unwrap();
        assert_eq!(stored, r#"{"last_rule_number":42}"#);
    }

    #[tokio::test]
    async fn concurrent_allocations_are_unique() {
        let test = TestBuilder::new().build().unwrap();
        let rules = service(&test).await;

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let rules = rules.clone();
                tokio::spawn(async move { rules.next_number().await })
            })
            .collect();

        let mut numbers = Vec::new();
        for handle in handles {
            numbers.push(handle.await.unwrap());
        }
        numbers.sort_unstable();

        assert_eq!(numbers, (1..=20).collect::<Vec<u64>>());
        assert_eq!(rules.last_number().await, 20);
    }

    #[tokio::test]
    async fn submitted_rules_require_the_rules_channel() {
        let test = TestBuilder::new().build().unwrap();
        let rules = service(&test).await;

        let result = rules
            .create_rule(
                request(OTHER_CHANNEL, "be nice", QuoteResolution::None),
                &gateway(&test),
                Some(RULES_CHANNEL),
            )
            .await;

        assert_eq!(result, Err(CommandError::WrongChannel));
        assert_eq!(rules.last_number().await, 0);
    }

    #[tokio::test]
    async fn quotes_are_accepted_anywhere() {
        let test = TestBuilder::new().build().unwrap();
        let rules = service(&test).await;

        let created = rules
            .create_rule(
                request(
                    OTHER_CHANNEL,
                    "",
                    QuoteResolution::Found {
                        content: "never trust a duck".to_string(),
                        author: author("bob"),
                    },
                ),
                &gateway(&test),
                Some(RULES_CHANNEL),
            )
            .await
            .unwrap();

        assert!(created.notices.is_empty());
        assert_eq!(created.embed.title, "Rule 1: never trust a duck");
        assert_eq!(created.embed.color, RULE_EMBED_COLOR);
        assert_eq!(created.embed.footer_text, "Quoted from bob");
        assert_eq!(
            created.embed.image_url.as_deref(),
            Some("https://gif.example/rod.gif")
        );
    }

    #[tokio::test]
    async fn unusable_quote_falls_back_with_notice() {
        let test = TestBuilder::new().build().unwrap();
        let rules = service(&test).await;

        let created = rules
            .create_rule(
                request(RULES_CHANNEL, "fallback text", QuoteResolution::Missing),
                &gateway(&test),
                Some(RULES_CHANNEL),
            )
            .await
            .unwrap();

        assert_eq!(created.notices.len(), 1);
        assert!(created.notices[0].starts_with("Could not find the replied message."));
        assert_eq!(created.embed.footer_text, "Submitted by alice");
    }

    #[tokio::test]
    async fn blank_text_is_generated() {
        let test = TestBuilder::new()
            .with_generator(FakeGenerator::Succeeds("no running indoors".to_string()))
            .build()
            .unwrap();
        let rules = service(&test).await;

        let created = rules
            .create_rule(
                request(RULES_CHANNEL, "  ", QuoteResolution::None),
                &gateway(&test),
                Some(RULES_CHANNEL),
            )
            .await
            .unwrap();

        assert_eq!(created.embed.title, "Rule 1: no running indoors");
        assert_eq!(created.embed.footer_text, "Submitted by alice (Generated)");
    }

    #[tokio::test]
    async fn failed_generation_does_not_consume_a_number() {
        let test = TestBuilder::new()
            .with_generator(FakeGenerator::Fails {
                code: 2,
                stderr: "out of ideas".to_string(),
            })
            .build()
            .unwrap();
        let rules = service(&test).await;

        let result = rules
            .create_rule(
                request(RULES_CHANNEL, "", QuoteResolution::None),
                &gateway(&test),
                Some(RULES_CHANNEL),
            )
            .await;

        assert_eq!(
            result,
            Err(CommandError::ContentMissing(
                GENERATION_FAILED_MESSAGE.to_string()
            ))
        );
        assert_eq!(rules.last_number().await, 0);
    }
}
