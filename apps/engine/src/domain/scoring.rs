//! Pure contract scoring under rubber-bridge rules.
//!
//! Rubber bridge awards no per-hand game or part-score bonus: trick values
//! go below the line, doubling insults, overtricks, slams and penalties go
//! above, and the 50-point part-score consolation plus the 500/700 rubber
//! bonus appear only when a rubber completes (see `rubber`). This is
//! deliberately not duplicate scoring.

use serde::Serialize;

use super::auction::Doubling;
use super::cards_types::{Card, Rank, Strain};
use super::seats::{Partnership, Seat};

/// Score breakdown for one completed contract. Points belong to
/// `partnership`: the declaring side when the contract made, the defenders
/// when it went down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub partnership: Partnership,
    pub below_line: u32,
    pub above_line: u32,
    pub makes_game: bool,
    pub overtricks: u8,
    pub undertricks: u8,
    pub vulnerable: bool,
    pub description: String,
}

impl ScoreResult {
    pub fn total(&self) -> u32 {
        self.below_line + self.above_line
    }
}

fn trick_value(strain: Strain) -> u32 {
    if strain.is_minor() {
        20
    } else {
        30
    }
}

/// Score a completed contract. `vulnerable` is the declaring partnership's
/// rubber vulnerability, not the board label.
pub fn score_contract(
    level: u8,
    strain: Strain,
    declarer: Seat,
    tricks_made: u8,
    doubling: Doubling,
    vulnerable: bool,
) -> ScoreResult {
    let partnership = declarer.partnership();
    let tricks_needed = 6 + level;

    if tricks_made < tricks_needed {
        return score_penalty(
            level,
            strain,
            partnership,
            tricks_needed - tricks_made,
            doubling,
            vulnerable,
        );
    }

    let overtricks = tricks_made - tricks_needed;

    // Trick value below the line: minors 20, majors 30, notrump 40 for the
    // first trick then 30.
    let base = if strain == Strain::NoTrump {
        40 + (level as u32 - 1) * 30
    } else {
        level as u32 * trick_value(strain)
    };
    let below_line = match doubling {
        Doubling::Undoubled => base,
        Doubling::Doubled => base * 2,
        Doubling::Redoubled => base * 4,
    };

    let mut above_line = 0;

    if overtricks > 0 {
        let per_overtrick = match doubling {
            Doubling::Undoubled => trick_value(strain),
            Doubling::Doubled => {
                if vulnerable {
                    200
                } else {
                    100
                }
            }
            Doubling::Redoubled => {
                if vulnerable {
                    400
                } else {
                    200
                }
            }
        };
        above_line += overtricks as u32 * per_overtrick;
    }

    // The insult: awarded once, regardless of overtricks.
    above_line += match doubling {
        Doubling::Undoubled => 0,
        Doubling::Doubled => 50,
        Doubling::Redoubled => 100,
    };

    above_line += match level {
        6 => {
            if vulnerable {
                750
            } else {
                500
            }
        }
        7 => {
            if vulnerable {
                1500
            } else {
                1000
            }
        }
        _ => 0,
    };

    let makes_game = below_line >= 100;

    let description = if overtricks > 0 {
        format!("{level}{strain} made with {overtricks} overtrick(s)")
    } else {
        format!("{level}{strain} made")
    };

    ScoreResult {
        partnership,
        below_line,
        above_line,
        makes_game,
        overtricks,
        undertricks: 0,
        vulnerable,
        description,
    }
}

/// Defeated contract: the defenders collect above the line. Undoubled is a
/// flat 50 (100 vulnerable) per undertrick; doubled runs 100/200/200/300...
/// not vulnerable and 200/300/300... vulnerable; redoubled doubles it all.
fn score_penalty(
    level: u8,
    strain: Strain,
    declarer_partnership: Partnership,
    undertricks: u8,
    doubling: Doubling,
    vulnerable: bool,
) -> ScoreResult {
    let penalty = match doubling {
        Doubling::Undoubled => undertricks as u32 * if vulnerable { 100 } else { 50 },
        Doubling::Doubled | Doubling::Redoubled => {
            let mut total = 0;
            for i in 0..undertricks as u32 {
                total += match (i, vulnerable) {
                    (0, false) => 100,
                    (1 | 2, false) => 200,
                    (_, false) => 300,
                    (0, true) => 200,
                    (_, true) => 300,
                };
            }
            if doubling == Doubling::Redoubled {
                total *= 2;
            }
            total
        }
    };

    let qualifier = match doubling {
        Doubling::Undoubled => "",
        Doubling::Doubled => " doubled",
        Doubling::Redoubled => " redoubled",
    };

    ScoreResult {
        partnership: declarer_partnership.opponents(),
        below_line: 0,
        above_line: penalty,
        makes_game: false,
        overtricks: 0,
        undertricks,
        vulnerable,
        description: format!("{level}{strain} down {undertricks}{qualifier}"),
    }
}

/// Honor points: 100 for four of the five trump honors in a single dealt
/// hand, 150 for all five, 150 for all four aces in one hand at notrump.
/// Credited to the holding partnership wherever the contract landed.
/// Honors split across partners score nothing: detection only looks at
/// concentration in a single hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HonorAward {
    pub partnership: Partnership,
    pub points: u32,
    pub description: String,
}

pub fn honors(dealt: &[Vec<Card>; 4], strain: Strain) -> Option<HonorAward> {
    match strain.trump_suit() {
        Some(trump_suit) => {
            for seat in Seat::ALL {
                let held = Rank::HONORS
                    .iter()
                    .filter(|&&rank| {
                        dealt[seat.index()]
                            .iter()
                            .any(|c| c.suit == trump_suit && c.rank == rank)
                    })
                    .count();
                if held == 5 {
                    return Some(HonorAward {
                        partnership: seat.partnership(),
                        points: 150,
                        description: format!("5 trump honors in {seat}"),
                    });
                }
                if held == 4 {
                    return Some(HonorAward {
                        partnership: seat.partnership(),
                        points: 100,
                        description: format!("4 trump honors in {seat}"),
                    });
                }
            }
            None
        }
        None => {
            for seat in Seat::ALL {
                let aces = dealt[seat.index()]
                    .iter()
                    .filter(|c| c.rank == Rank::Ace)
                    .count();
                if aces == 4 {
                    return Some(HonorAward {
                        partnership: seat.partnership(),
                        points: 150,
                        description: format!("4 aces in {seat}"),
                    });
                }
            }
            None
        }
    }
}
