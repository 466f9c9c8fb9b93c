//! Domain-level error type used across the engine.
//!
//! Every variant is scoped to the single event that triggered it: callers
//! reject the event, log, and keep the session alive. Nothing here is
//! allowed to terminate the state-owning task.

use thiserror::Error;

use crate::domain::cards_types::Card;
use crate::domain::seats::Seat;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The named seat's derived hand does not contain the card.
    #[error("illegal play: {seat} does not hold {card}")]
    CardNotInHand { seat: Seat, card: Card },

    /// The seat has already played every card it was dealt.
    #[error("hand exhausted: {0} has no cards left this deal")]
    HandExhausted(Seat),

    /// Player unknown and the trick context gives nothing to infer from.
    #[error("ambiguous player: {0}")]
    AmbiguousPlayer(String),

    /// A claim for more tricks than remain in the deal.
    #[error("claim too large: {claimed} claimed with {remaining} tricks remaining")]
    ClaimTooLarge { claimed: u8, remaining: u8 },

    /// Malformed contract string at scoring time. Fatal for that scoring
    /// call only; never defaulted to a guessed score.
    #[error("invalid contract: {0}")]
    InvalidContractFormat(String),

    /// An event referenced deal state before any deal was started.
    #[error("no deal in progress")]
    NoDealInProgress,

    /// An event needed a finalized contract that does not exist.
    #[error("no contract finalized for this deal")]
    NoContract,

    #[error("parse card: {0}")]
    ParseCard(String),

    #[error("parse call: {0}")]
    ParseCall(String),

    #[error("parse seat: {0}")]
    ParseSeat(String),

    #[error("parse vulnerability: {0}")]
    ParseVulnerability(String),
}
