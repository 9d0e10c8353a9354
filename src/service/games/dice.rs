use rand::Rng;
use std::{fmt, num::IntErrorKind};
use thiserror::Error;

const MAX_DICE: u32 = 100;
const MIN_SIDES: u32 = 2;
const MAX_SIDES: u32 = 1000;
const DEFAULT_SIDES: u32 = 6;
const MAX_MODIFIER: i64 = 1_000_000;

#[derive(Error, Debug, PartialEq)]
pub enum DiceError {
    #[error("I don't understand `{0}`. Try `2d6`, `d20`, `20` or `3d8+2`.")]
    Unparseable(String),
    #[error("I can roll between 1 and 100 dice at once.")]
    TooManyDice,
    #[error("Dice need between 2 and 1000 sides.")]
    BadSides,
    #[error("Modifiers must stay between -1000000 and +1000000.")]
    BadModifier,
}

/// A parsed dice expression such as `3d6+2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiceRoll {
    count: u32,
    sides: u32,
    modifier: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiceOutcome {
    pub roll: DiceRoll,
    pub rolls: Vec<u32>,
    pub total: i64,
}

impl DiceRoll {
    pub fn new(count: u32, sides: u32, modifier: i64) -> Result<Self, DiceError> {
        if count == 0 || count > MAX_DICE {
            return Err(DiceError::TooManyDice);
        }
        if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
            return Err(DiceError::BadSides);
        }
        if !(-MAX_MODIFIER..=MAX_MODIFIER).contains(&modifier) {
            return Err(DiceError::BadModifier);
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Parses `""`, `N`, `dM`, `NdM`, each with an optional `+K` / `-K`.
    ///
    /// A bare number is the number of sides of a single die.
    pub fn parse(text: &str) -> Result<Self, DiceError> {
        let compact: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        if compact.is_empty() {
            return Self::new(1, DEFAULT_SIDES, 0);
        }

        let unparseable = || DiceError::Unparseable(text.trim().to_string());

        let (dice, modifier) = match compact.find(['+', '-']) {
            Some(index) => {
                let modifier = compact[index..]
                    .parse::<i64>()
                    .map_err(|e| match e.kind() {
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                            DiceError::BadModifier
                        }
                        _ => unparseable(),
                    })?;
                (&compact[..index], modifier)
            }
            None => (compact.as_str(), 0),
        };

        let parse_number = |value: &str| value.parse::<u32>().map_err(|_| unparseable());

        match dice.split_once('d') {
            Some(("", sides)) => Self::new(1, parse_number(sides)?, modifier),
            Some((count, sides)) => Self::new(parse_number(count)?, parse_number(sides)?, modifier),
            None => Self::new(1, parse_number(dice)?, modifier),
        }
    }

    pub fn roll<R: Rng>(&self, rng: &mut R) -> DiceOutcome {
        let rolls: Vec<u32> = (0..self.count)
            .map(|_| rng.random_range(1..=self.sides))
            .collect();
        let total = rolls.iter().map(|r| i64::from(*r)).sum::<i64>() + self.modifier;

        DiceOutcome {
            roll: *self,
            rolls,
            total,
        }
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}

impl fmt::Display for DiceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rolls.len() == 1 && self.roll.modifier == 0 {
            return write!(f, ":game_die: `{}` → **{}**", self.roll, self.total);
        }

        let rolls: Vec<String> = self.rolls.iter().map(u32::to_string).collect();
        write!(
            f,
            ":game_die: `{}` → [{}] = **{}**",
            self.roll,
            rolls.join(", "),
            self.total
        )
    }
}

/// Parses and rolls a dice expression, rendering the outcome or the error.
pub fn roll<R: Rng>(text: &str, rng: &mut R) -> String {
    match DiceRoll::parse(text) {
        Ok(dice) => dice.roll(rng).to_string(),
        Err(e) => e.to_string(),
    }
}
