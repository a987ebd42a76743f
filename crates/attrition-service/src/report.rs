//! End-of-match capital-profile reports.
//!
//! A report reads party A's side of a [`MatchSummary`] and renders a short
//! labelled block. [`ProfileReportGenerator`] is deterministic and local;
//! the [`ReportGenerator`] trait is the seam for anything slower.

use std::future::Future;

use attrition_types::{MatchSummary, Result};
use rust_decimal::Decimal;

/// Turns a finished match into a player-facing report.
pub trait ReportGenerator: Send + Sync {
    fn generate_report(&self, summary: &MatchSummary)
    -> impl Future<Output = Result<String>> + Send;
}

/// Rounds with activity needed before adaptability is judged.
const MIN_ADAPT_ROUNDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Posture {
    Passive,
    Defensive,
    Balanced,
    Aggressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Standing {
    Won,
    Lost,
    Drew,
}

/// Descriptors derived from a summary.
#[derive(Debug, Clone)]
struct Profile {
    posture: Posture,
    result: Standing,
    efficiency: String,
    efficient: bool,
    discipline: String,
    impulsive: bool,
    liquidity: String,
    overextended: bool,
    adaptability: String,
    adaptive: Option<bool>,
}

/// Rule-based report generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileReportGenerator;

impl ProfileReportGenerator {
    /// Render the report synchronously.
    #[must_use]
    pub fn render(summary: &MatchSummary) -> String {
        let profile = Profile::from_summary(summary);
        let suggestions = profile.suggestions();
        format!(
            "Your Capital Profile:\n\
             - Risk Posture: {}\n\
             - Capital Efficiency: {}\n\
             - Emotional Discipline: {}\n\
             - Liquidity Management: {}\n\
             - Adaptability: {}\n\
             \n\
             Overall Archetype: {}\n\
             \n\
             Key Takeaway: {}\n\
             \n\
             Player Suggestions:\n\
             - {}\n\
             - {}\n\
             - {}\n",
            profile.posture_label(),
            profile.efficiency,
            profile.discipline,
            profile.liquidity,
            profile.adaptability,
            profile.archetype(),
            profile.takeaway(),
            suggestions[0],
            suggestions[1],
            suggestions[2],
        )
    }
}

impl ReportGenerator for ProfileReportGenerator {
    async fn generate_report(&self, summary: &MatchSummary) -> Result<String> {
        Ok(Self::render(summary))
    }
}

impl Profile {
    fn from_summary(s: &MatchSummary) -> Self {
        let avg_a = s.bids.avg.a;
        let avg_b = s.bids.avg.b;

        let posture = if avg_a.is_zero() && avg_b.is_zero() {
            Posture::Passive
        } else if avg_a > avg_b * Decimal::new(125, 2) {
            Posture::Aggressive
        } else if avg_a < avg_b * Decimal::new(75, 2) {
            Posture::Defensive
        } else {
            Posture::Balanced
        };

        let result = match s.scores.a.cmp(&s.scores.b) {
            std::cmp::Ordering::Greater => Standing::Won,
            std::cmp::Ordering::Less => Standing::Lost,
            std::cmp::Ordering::Equal => Standing::Drew,
        };

        let (efficiency, efficient) = if s.bids.total.a == 0 {
            ("Untested (no money committed to bids)".to_string(), false)
        } else {
            let per_ten = (Decimal::from(s.scores.a) * Decimal::TEN
                / Decimal::from(s.bids.total.a))
            .round_dp(2);
            let label = if per_ten >= Decimal::ONE {
                "High"
            } else if per_ten >= Decimal::new(4, 1) {
                "Moderate"
            } else {
                "Low"
            };
            (
                format!("{label} ({per_ten} points per $10 bid)"),
                per_ten >= Decimal::new(4, 1),
            )
        };

        let impulsive =
            !avg_a.is_zero() && Decimal::from(s.bids.max.a) > avg_a * Decimal::from(3);
        let discipline = if impulsive {
            format!(
                "Impulsive (peak bid {} against an average of {avg_a})",
                s.bids.max.a
            )
        } else {
            "Steady (consistent bid sizing)".to_string()
        };

        let overextended = s.money_final.a == 0;
        let liquidity = if overextended {
            "Overextended (finished at $0)".to_string()
        } else if s.money_final.a >= s.money_final.b {
            format!("Strong (finished with ${})", s.money_final.a)
        } else {
            format!(
                "Adequate (finished with ${} against ${})",
                s.money_final.a, s.money_final.b
            )
        };

        let (adaptability, adaptive) = adaptability(s);

        Self {
            posture,
            result,
            efficiency,
            efficient,
            discipline,
            impulsive,
            liquidity,
            overextended,
            adaptability,
            adaptive,
        }
    }

    fn posture_label(&self) -> &'static str {
        match self.posture {
            Posture::Passive => "Passive (barely bid at all)",
            Posture::Defensive => "Defensive (bid well below the opponent)",
            Posture::Balanced => "Balanced (bid close to the opponent)",
            Posture::Aggressive => "Aggressive (bid well above the opponent)",
        }
    }

    fn archetype(&self) -> &'static str {
        match (self.posture, self.result) {
            (_, Standing::Drew) => "The Even Trader",
            (Posture::Aggressive, Standing::Won) => "The Blitz Capitalist",
            (Posture::Aggressive, Standing::Lost) => "The Overleveraged Raider",
            (Posture::Defensive | Posture::Passive, Standing::Won) => "The Patient Compounder",
            (Posture::Defensive | Posture::Passive, Standing::Lost) => "The Cash Hoarder",
            (Posture::Balanced, Standing::Won) => "The Disciplined Allocator",
            (Posture::Balanced, Standing::Lost) => "The Cautious Generalist",
        }
    }

    fn takeaway(&self) -> &'static str {
        if self.overextended {
            "Running dry handed your opponent free rounds; the last dollar is worth more than any single point."
        } else if self.impulsive {
            "Single oversized bids cost more than they won; steady sizing compounds better."
        } else if !self.efficient {
            "Too much money bought too few points; pick the rounds you contest."
        } else if self.result == Standing::Lost {
            "Your capital was sound but your opponent converted theirs into points faster."
        } else {
            "You converted capital into points efficiently while staying liquid."
        }
    }

    fn suggestions(&self) -> [&'static str; 3] {
        let mut picked: Vec<&'static str> = Vec::with_capacity(3);
        if self.overextended {
            picked.push("Keep next round's maintenance in reserve before sizing a bid.");
        }
        if self.impulsive {
            picked.push("Cap any single bid at a fixed share of your bankroll.");
        }
        if !self.efficient {
            picked.push("Concede rounds you cannot win cheaply and let your opponent overpay.");
        }
        if self.adaptive == Some(false) {
            picked.push("Adjust your sizing when your opponent changes theirs.");
        }
        if self.posture == Posture::Passive {
            picked.push("Contest early free rounds; they cost nothing but the bid.");
        }
        for fallback in [
            "Watch the maintenance schedule: fees step up every few rounds.",
            "Track your opponent's recent bids and outbid their typical size by one.",
            "Plan the endgame: a bankrupt opponent hands you every remaining round you can pay for.",
        ] {
            if picked.len() == 3 {
                break;
            }
            picked.push(fallback);
        }
        [picked[0], picked[1], picked[2]]
    }
}

/// Compare party A's average bid over the first and second half of the
/// rounds in which anyone bid.
fn adaptability(s: &MatchSummary) -> (String, Option<bool>) {
    let bids: Vec<u64> = s
        .history
        .iter()
        .filter(|r| r.bid_a > 0 || r.bid_b > 0)
        .map(|r| r.bid_a)
        .collect();
    if bids.len() < MIN_ADAPT_ROUNDS {
        return ("Too few contested rounds to judge".to_string(), None);
    }

    let (early, late) = bids.split_at(bids.len() / 2);
    let mean =
        |xs: &[u64]| Decimal::from(xs.iter().sum::<u64>()) / Decimal::from(xs.len() as u64);
    let (early, late) = (mean(early), mean(late));
    let base = early.max(Decimal::ONE);
    let shift = ((late - early).abs() / base * Decimal::ONE_HUNDRED).round_dp(0);

    if shift > Decimal::from(25) {
        (format!("Responsive (bid sizing shifted {shift}% mid-match)"), Some(true))
    } else {
        (format!("Static (bid sizing shifted {shift}% mid-match)"), Some(false))
    }
}
