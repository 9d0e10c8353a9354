use rand::Rng;
use std::fmt;

use crate::service::decision::WeightedOutcomeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Classic,
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

/// `(winner, loser, verb)`
const BEATS: &[(Hand, Hand, &str)] = &[
    (Hand::Scissors, Hand::Paper, "cuts"),
    (Hand::Paper, Hand::Rock, "covers"),
    (Hand::Rock, Hand::Lizard, "crushes"),
    (Hand::Lizard, Hand::Spock, "poisons"),
    (Hand::Spock, Hand::Scissors, "smashes"),
    (Hand::Scissors, Hand::Lizard, "decapitates"),
    (Hand::Lizard, Hand::Paper, "eats"),
    (Hand::Paper, Hand::Spock, "disproves"),
    (Hand::Spock, Hand::Rock, "vaporizes"),
    (Hand::Rock, Hand::Scissors, "crushes"),
];

impl Variant {
    pub fn hands(self) -> &'static [Hand] {
        match self {
            Variant::Classic => &[Hand::Rock, Hand::Paper, Hand::Scissors],
            Variant::Extended => &[
                Hand::Rock,
                Hand::Paper,
                Hand::Scissors,
                Hand::Lizard,
                Hand::Spock,
            ],
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Variant::Classic => "Pick one of `rock`, `paper` or `scissors` (or `r`, `p`, `s`).",
            Variant::Extended => {
                "Pick one of `rock`, `paper`, `scissors`, `lizard` or `spock` (or `r`, `p`, `s`, `l`, `sp`)."
            }
        }
    }
}

impl Hand {
    /// Parses a full hand name or its shorthand, limited to the variant's hands.
    pub fn parse(text: &str, variant: Variant) -> Option<Self> {
        let hand = match text.trim().to_lowercase().as_str() {
            "rock" | "r" => Hand::Rock,
            "paper" | "p" => Hand::Paper,
            "scissors" | "s" => Hand::Scissors,
            "lizard" | "l" => Hand::Lizard,
            "spock" | "sp" => Hand::Spock,
            _ => return None,
        };

        variant.hands().contains(&hand).then_some(hand)
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Hand::Rock => "🪨",
            Hand::Paper => "📄",
            Hand::Scissors => "✂️",
            Hand::Lizard => "🦎",
            Hand::Spock => "🖖",
        }
    }

    /// Outcome from `self`'s point of view, with the verb when someone wins.
    pub fn against(self, other: Hand) -> (Outcome, Option<&'static str>) {
        if self == other {
            return (Outcome::Draw, None);
        }

        for (winner, loser, verb) in BEATS {
            if *winner == self && *loser == other {
                return (Outcome::Win, Some(*verb));
            }
            if *winner == other && *loser == self {
                return (Outcome::Lose, Some(*verb));
            }
        }

        // Classic hands always meet in the table.
        (Outcome::Draw, None)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hand::Rock => "rock",
            Hand::Paper => "paper",
            Hand::Scissors => "scissors",
            Hand::Lizard => "lizard",
            Hand::Spock => "spock",
        };
        write!(f, "{}", name)
    }
}

fn render(player: Hand, bot: Hand) -> String {
    let header = format!(
        "You picked {} {}, Rod picked {} {}.",
        player.emoji(),
        player,
        bot.emoji(),
        bot
    );

    match player.against(bot) {
        (Outcome::Draw, _) => format!("{header}\nIt's a draw."),
        (Outcome::Win, verb) => format!(
            "{header}\n{} {} {}. You win!",
            capitalize(&player.to_string()),
            verb.unwrap_or("beats"),
            bot
        ),
        (Outcome::Lose, verb) => format!(
            "{header}\n{} {} {}. Rod wins!",
            capitalize(&bot.to_string()),
            verb.unwrap_or("beats"),
            player
        ),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Plays one round against a uniformly drawn bot hand.
pub fn play<R: Rng>(text: &str, variant: Variant, rng: &mut R) -> String {
    let Some(player) = Hand::parse(text, variant) else {
        return variant.usage().to_string();
    };

    let hands = WeightedOutcomeSet::uniform(variant.hands().iter().copied());
    let bot = *hands.draw(rng);

    render(player, bot)
}
