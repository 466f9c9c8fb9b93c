//! Rubber progression: below/above-the-line totals, games, vulnerability,
//! rubber bonuses, and the session-lifetime history.

use serde::Serialize;

use super::auction::Doubling;
use super::cards_parsing::parse_contract;
use super::cards_types::{Card, Strain};
use super::scoring::{honors, score_contract, HonorAward, ScoreResult};
use super::seats::{Partnership, Seat};
use crate::errors::domain::DomainError;

/// One partnership's column on the scoresheet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PartnershipScore {
    pub below: u32,
    pub above: u32,
    pub games: u8,
    pub vulnerable: bool,
    /// Lifetime rubbers won; survives `start_new_rubber`.
    pub rubbers: u32,
}

impl PartnershipScore {
    pub fn total(&self) -> u32 {
        self.below + self.above
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HandRecord {
    pub contract: String,
    pub declarer: Seat,
    pub tricks_made: u8,
    pub score: ScoreResult,
    pub honors: Option<HonorAward>,
    pub rubber_number: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RubberRecord {
    pub rubber_number: u32,
    pub winner: Partnership,
    pub games: String,
    pub ns_total: u32,
    pub ew_total: u32,
    pub bonus: u32,
}

/// Exported rubber standing for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct RubberStatus {
    pub rubber_number: u32,
    pub ns: PartnershipScore,
    pub ew: PartnershipScore,
    pub rubber_complete: bool,
    pub hand_count: usize,
}

/// Outcome of recording one hand: the score that was applied plus where
/// the rubber stands afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct HandOutcome {
    pub score: ScoreResult,
    pub honors: Option<HonorAward>,
    pub game_won: bool,
    pub rubber_won: Option<Partnership>,
    pub status: RubberStatus,
}

#[derive(Debug, Clone)]
pub struct RubberState {
    ns: PartnershipScore,
    ew: PartnershipScore,
    hand_history: Vec<HandRecord>,
    rubber_history: Vec<RubberRecord>,
    current_rubber_number: u32,
    rubber_complete: bool,
}

impl RubberState {
    pub fn new() -> Self {
        Self {
            ns: PartnershipScore::default(),
            ew: PartnershipScore::default(),
            hand_history: Vec::new(),
            rubber_history: Vec::new(),
            current_rubber_number: 1,
            rubber_complete: false,
        }
    }

    fn side(&self, p: Partnership) -> &PartnershipScore {
        match p {
            Partnership::NorthSouth => &self.ns,
            Partnership::EastWest => &self.ew,
        }
    }

    fn side_mut(&mut self, p: Partnership) -> &mut PartnershipScore {
        match p {
            Partnership::NorthSouth => &mut self.ns,
            Partnership::EastWest => &mut self.ew,
        }
    }

    pub fn is_vulnerable(&self, p: Partnership) -> bool {
        self.side(p).vulnerable
    }

    pub fn rubber_complete(&self) -> bool {
        self.rubber_complete
    }

    pub fn hand_history(&self) -> &[HandRecord] {
        &self.hand_history
    }

    pub fn rubber_history(&self) -> &[RubberRecord] {
        &self.rubber_history
    }

    /// Record a hand given the boundary contract string ("3NT", "5Cx",
    /// "2SXX"). Malformed strings are `InvalidContractFormat` for this call
    /// only; the doubling suffix and the explicit flags are combined, the
    /// stronger winning.
    pub fn record_hand_result(
        &mut self,
        contract: &str,
        declarer: Seat,
        tricks_made: u8,
        doubled: bool,
        redoubled: bool,
        dealt_hands: Option<&[Vec<Card>; 4]>,
    ) -> Result<HandOutcome, DomainError> {
        let token = parse_contract(contract)?;
        let doubling = if redoubled || token.redoubled {
            Doubling::Redoubled
        } else if doubled || token.doubled {
            Doubling::Doubled
        } else {
            Doubling::Undoubled
        };
        Ok(self.record_hand(token.level, token.strain, declarer, tricks_made, doubling, dealt_hands))
    }

    /// Record a hand from typed contract data (the session's path once the
    /// auction has finalized a real `Contract`).
    pub fn record_hand(
        &mut self,
        level: u8,
        strain: Strain,
        declarer: Seat,
        tricks_made: u8,
        doubling: Doubling,
        dealt_hands: Option<&[Vec<Card>; 4]>,
    ) -> HandOutcome {
        let vulnerable = self.is_vulnerable(declarer.partnership());
        let score = score_contract(level, strain, declarer, tricks_made, doubling, vulnerable);

        let scorer = score.partnership;
        self.side_mut(scorer).below += score.below_line;
        self.side_mut(scorer).above += score.above_line;

        // Honors accrue to whoever holds them, independent of the result.
        let honor_award = dealt_hands.and_then(|hands| honors(hands, strain));
        if let Some(award) = &honor_award {
            self.side_mut(award.partnership).above += award.points;
        }

        let mut game_won = false;
        let mut rubber_won = None;
        let below_winner = if self.side(scorer).below >= 100 {
            Some(scorer)
        } else {
            None
        };
        if let Some(winner) = below_winner {
            game_won = true;
            let side = self.side_mut(winner);
            side.games += 1;
            side.vulnerable = true;
            if side.games >= 2 {
                rubber_won = Some(winner);
            }
            if let Some(winner) = rubber_won {
                self.complete_rubber(winner);
            }
            // A won game closes the current game for both sides: all
            // outstanding part scores are cleared.
            self.ns.below = 0;
            self.ew.below = 0;
        }

        self.hand_history.push(HandRecord {
            contract: format_contract(level, strain, doubling),
            declarer,
            tricks_made,
            score: score.clone(),
            honors: honor_award.clone(),
            rubber_number: self.current_rubber_number,
        });

        tracing::info!(
            contract = %format_contract(level, strain, doubling),
            %declarer,
            tricks_made,
            game_won,
            rubber = ?rubber_won,
            "hand recorded"
        );
        HandOutcome {
            score,
            honors: honor_award,
            game_won,
            rubber_won,
            status: self.status(),
        }
    }

    /// First to two games takes the rubber: the losing side's part score in
    /// the unfinished game earns the 50-point consolation (read before the
    /// final below-line reset), then the winner collects 500 against a
    /// shut-out opponent or 700 against one game.
    fn complete_rubber(&mut self, winner: Partnership) {
        self.rubber_complete = true;

        let loser = winner.opponents();
        if self.side(loser).below > 0 {
            self.side_mut(loser).above += 50;
        }

        let loser_games = self.side(loser).games;
        let bonus = if loser_games == 0 { 500 } else { 700 };
        self.side_mut(winner).above += bonus;
        self.side_mut(winner).rubbers += 1;

        self.rubber_history.push(RubberRecord {
            rubber_number: self.current_rubber_number,
            winner,
            games: format!("{}-{}", self.ns.games, self.ew.games),
            ns_total: self.ns.total(),
            ew_total: self.ew.total(),
            bonus,
        });
        tracing::info!(winner = %winner, bonus, "rubber complete");
    }

    /// Reset the per-rubber columns; lifetime rubber counts and both
    /// history logs survive.
    pub fn start_new_rubber(&mut self) {
        let ns_rubbers = self.ns.rubbers;
        let ew_rubbers = self.ew.rubbers;
        self.ns = PartnershipScore {
            rubbers: ns_rubbers,
            ..Default::default()
        };
        self.ew = PartnershipScore {
            rubbers: ew_rubbers,
            ..Default::default()
        };
        self.rubber_complete = false;
        self.current_rubber_number = self.rubber_history.len() as u32 + 1;
    }

    pub fn status(&self) -> RubberStatus {
        RubberStatus {
            rubber_number: self.current_rubber_number,
            ns: self.ns.clone(),
            ew: self.ew.clone(),
            rubber_complete: self.rubber_complete,
            hand_count: self.hand_history.len(),
        }
    }
}

impl Default for RubberState {
    fn default() -> Self {
        Self::new()
    }
}

fn format_contract(level: u8, strain: Strain, doubling: Doubling) -> String {
    let suffix = match doubling {
        Doubling::Undoubled => "",
        Doubling::Doubled => "X",
        Doubling::Redoubled => "XX",
    };
    format!("{level}{strain}{suffix}")
}
