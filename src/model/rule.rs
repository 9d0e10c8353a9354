//! Domain models for Rod rule posts.
//!
//! A rule is a numbered embed carrying either quoted, submitted, or generated
//! text together with a random GIF. The models here are plain data: the bot
//! layer converts `RuleEmbed` to a serenity `CreateEmbed` at the boundary.

/// Embed color used for every rule post.
pub const RULE_EMBED_COLOR: u32 = 0xF7DC6F;

/// Discord rejects embeds whose title exceeds this many characters.
pub const MAX_TITLE_CHARS: usize = 256;

/// Display identity of a Discord user as shown in embed footers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleAuthor {
    /// Guild nickname or global display name.
    pub display_name: String,
    /// Avatar URL, `None` when the user has no custom avatar.
    pub avatar_url: Option<String>,
}

/// Result of resolving the message a rule command replied to.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteResolution {
    /// The command was not a reply.
    None,
    /// The replied message was found and has text content.
    Found {
        /// Text of the replied message.
        content: String,
        /// Author of the replied message.
        author: RuleAuthor,
    },
    /// The replied message exists but has no text content.
    Empty,
    /// The replied message could not be found.
    Missing,
    /// Fetching the replied message failed for another reason.
    Failed(String),
}

/// Everything needed to author a rule, resolved from the invoking message.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleRequest {
    /// Channel the command was invoked in.
    pub channel_id: u64,
    /// Rule text passed as argument; blank asks for a generated rule.
    pub text: String,
    /// The invoking user.
    pub author: RuleAuthor,
    /// Resolution of the replied-to message, if any.
    pub quote: QuoteResolution,
}

/// Where the rule text came from; determines the footer.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSource {
    Quoted(RuleAuthor),
    Submitted(RuleAuthor),
    Generated(RuleAuthor),
}

impl RuleSource {
    /// Footer text and icon for this source.
    pub fn footer(&self) -> (String, Option<String>) {
        match self {
            Self::Quoted(author) => (
                format!("Quoted from {}", author.display_name),
                author.avatar_url.clone(),
            ),
            Self::Submitted(author) => (
                format!("Submitted by {}", author.display_name),
                author.avatar_url.clone(),
            ),
            Self::Generated(author) => (
                format!("Submitted by {} (Generated)", author.display_name),
                author.avatar_url.clone(),
            ),
        }
    }
}

/// Platform-agnostic description of a rule embed.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEmbed {
    pub title: String,
    pub color: u32,
    pub image_url: Option<String>,
    pub footer_text: String,
    pub footer_icon_url: Option<String>,
}

impl RuleEmbed {
    /// Composes the embed for rule `number`.
    ///
    /// Titles longer than `MAX_TITLE_CHARS` are cut short with an ellipsis.
    ///
    /// # Arguments
    /// - `number` - The rule number just allocated
    /// - `text` - Rule text
    /// - `source` - Where the text came from (drives the footer)
    /// - `image_url` - GIF shown in the embed, if any are configured
    pub fn compose(
        number: u64,
        text: &str,
        source: &RuleSource,
        image_url: Option<String>,
    ) -> Self {
        let (footer_text, footer_icon_url) = source.footer();

        Self {
            title: truncate_title(format!("Rule {}: {}", number, text)),
            color: RULE_EMBED_COLOR,
            image_url,
            footer_text,
            footer_icon_url,
        }
    }
}

fn truncate_title(title: String) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title;
    }

    let mut short: String = title.chars().take(MAX_TITLE_CHARS - 1).collect();
    short.push('…');
    short
}

/// A freshly numbered rule plus any notices gathered while resolving it.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedRule {
    pub number: u64,
    pub embed: RuleEmbed,
    /// Private notices for the requester (e.g. the replied message was empty).
    pub notices: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> RuleSource {
        RuleSource::Submitted(RuleAuthor {
            display_name: "alice".to_string(),
            avatar_url: None,
        })
    }

    #[test]
    fn short_titles_are_kept() {
        let embed = RuleEmbed::compose(7, "no running", &author(), None);

        assert_eq!(embed.title, "Rule 7: no running");
        assert_eq!(embed.footer_text, "Submitted by alice");
    }

    #[test]
    fn long_titles_fit_the_embed_limit() {
        let text = "ä".repeat(400);
        let embed = RuleEmbed::compose(12, &text, &author(), None);

        assert_eq!(embed.title.chars().count(), MAX_TITLE_CHARS);
        assert!(embed.title.starts_with("Rule 12: ää"));
        assert!(embed.title.ends_with('…'));
    }
}
