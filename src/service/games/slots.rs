use rand::Rng;
use std::sync::LazyLock;

use crate::service::decision::WeightedOutcomeSet;

/// Reel symbols and their weights; rarer symbols pay out less often.
///
/// # Panics
/// - On first use if the table is empty or all weights are zero.
static SYMBOLS: LazyLock<WeightedOutcomeSet<&'static str>> = LazyLock::new(|| {
    WeightedOutcomeSet::new(vec![
        ("🍒", 5),
        ("🍋", 4),
        ("🍊", 3),
        ("🍇", 2),
        ("🔔", 2),
        ("💎", 1),
        ("7️⃣", 1),
    ])
    .expect("slot symbol table has positive weights")
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinVerdict {
    Jackpot,
    Pair,
    Loss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spin {
    pub reels: [&'static str; 3],
    pub verdict: SpinVerdict,
}

impl Spin {
    pub fn render(&self) -> String {
        let verdict = match self.verdict {
            SpinVerdict::Jackpot => "**JACKPOT!** Rod is proud of you.",
            SpinVerdict::Pair => "Two of a kind, not bad.",
            SpinVerdict::Loss => "You lost. Rod keeps your money.",
        };

        format!(
            ":slot_machine: [ {} | {} | {} ]\n{}",
            self.reels[0], self.reels[1], self.reels[2], verdict
        )
    }
}

fn judge(reels: &[&str; 3]) -> SpinVerdict {
    let [a, b, c] = reels;
    if a == b && b == c {
        SpinVerdict::Jackpot
    } else if a == b || b == c || a == c {
        SpinVerdict::Pair
    } else {
        SpinVerdict::Loss
    }
}

/// Spins three independent reels.
pub fn spin<R: Rng>(rng: &mut R) -> Spin {
    let reels = [
        *SYMBOLS.draw(rng),
        *SYMBOLS.draw(rng),
        *SYMBOLS.draw(rng),
    ];

    Spin {
        verdict: judge(&reels),
        reels,
    }
}
