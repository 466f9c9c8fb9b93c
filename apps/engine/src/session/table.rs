//! The table session: single owner of all game state.
//!
//! `TableSession` is the synchronous state machine — every mutation goes
//! through `apply`, whose `Result` is the rejected-event signal for the
//! caller. `spawn` wraps it in the one task per table that serializes
//! events from an mpsc channel and publishes a fresh `TableSnapshot` on a
//! watch channel after each one. Oracle solves run off that critical path
//! as spawned tasks with a bounded wait; their results come back through
//! the same channel and are discarded if the position has moved on.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::ai::dd_table::DdTable;
use crate::ai::pushed::PushedSolver;
use crate::ai::recommend::{recommend, Recommendation, RecommendInputs};
use crate::ai::trait_def::{DoubleDummySolver, Position, SolvedPlay, SolverError};
use crate::domain::cards_types::Card;
use crate::domain::rubber::RubberState;
use crate::domain::snapshot::{deal_view, TableSnapshot};
use crate::domain::state::DealState;
use crate::domain::tricks;
use crate::errors::domain::DomainError;

use super::events::TableEvent;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Bounded wait for one oracle solve; a slow or hung solver must not
    /// stall ingestion of the next play event.
    pub solve_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            solve_timeout: Duration::from_secs(2),
        }
    }
}

/// What the actor should do after an event was applied.
#[derive(Debug, Default)]
pub struct Applied {
    /// Position to hand to the oracle, when the event changed the position
    /// a recommendation is wanted for.
    pub solve_position: Option<Position>,
}

pub struct TableSession {
    deal: Option<DealState>,
    rubber: RubberState,
    dd_table: Option<DdTable>,
    last_recommendation: Option<Recommendation>,
    /// Routes pushed solve results to the production adapter.
    pushed: Arc<PushedSolver>,
    /// Guards against scoring the same deal twice.
    deal_scored: bool,
}

impl TableSession {
    pub fn new() -> Self {
        Self {
            deal: None,
            rubber: RubberState::new(),
            dd_table: None,
            last_recommendation: None,
            pushed: Arc::new(PushedSolver::new()),
            deal_scored: false,
        }
    }

    pub fn pushed_solver(&self) -> Arc<PushedSolver> {
        Arc::clone(&self.pushed)
    }

    pub fn rubber(&self) -> &RubberState {
        &self.rubber
    }

    pub fn deal(&self) -> Option<&DealState> {
        self.deal.as_ref()
    }

    pub fn last_recommendation(&self) -> Option<&Recommendation> {
        self.last_recommendation.as_ref()
    }

    /// Apply one event. Errors reject exactly that event: state is left as
    /// it was, the session stays alive.
    pub fn apply(&mut self, event: TableEvent) -> Result<Applied, DomainError> {
        match event {
            TableEvent::NewDeal {
                board,
                dealer,
                vulnerability,
                hands,
            } => {
                let mut dealt: [Vec<Card>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
                for (seat, cards) in hands {
                    dealt[seat.index()] = cards;
                }
                tracing::info!(board, %dealer, ?vulnerability, "new deal");
                self.deal = Some(DealState::new(board, dealer, vulnerability, dealt));
                self.dd_table = None;
                self.last_recommendation = None;
                self.deal_scored = false;
                Ok(Applied::default())
            }

            TableEvent::BidMade { seat, call } => {
                let deal = self.deal.as_mut().ok_or(DomainError::NoDealInProgress)?;
                deal.record_call(seat, call);
                if deal.auction.is_closed() {
                    if deal.contract().is_some() {
                        let position = Position::of(deal);
                        self.refresh_recommendation(None, false);
                        return Ok(Applied {
                            solve_position: position,
                        });
                    }
                    // Passed out: nothing to play, nothing to score.
                }
                Ok(Applied::default())
            }

            TableEvent::CardPlayed { seat, card } => {
                let deal = self.deal.as_mut().ok_or(DomainError::NoDealInProgress)?;
                let result = tricks::play_card(deal, seat, card)?;
                if let Some(winner) = result.winner {
                    tracing::debug!(%winner, "trick complete");
                }
                if deal.is_complete() {
                    self.finish_deal();
                    return Ok(Applied::default());
                }
                let position = Position::of(deal);
                self.refresh_recommendation(None, false);
                Ok(Applied {
                    solve_position: position,
                })
            }

            TableEvent::ClaimAccepted {
                seat,
                tricks_claimed,
            } => {
                let deal = self.deal.as_mut().ok_or(DomainError::NoDealInProgress)?;
                if deal.contract().is_none() {
                    return Err(DomainError::NoContract);
                }
                let remaining = deal.tricks_remaining();
                if tricks_claimed > remaining {
                    return Err(DomainError::ClaimTooLarge {
                        claimed: tricks_claimed,
                        remaining,
                    });
                }
                // The claiming side takes what it claimed; the rest of the
                // remaining tricks go to the other side.
                let claimers = seat.partnership();
                deal.tricks_won.add(claimers, tricks_claimed);
                deal.tricks_won.add(claimers.opponents(), remaining - tricks_claimed);
                deal.play_finished = true;
                deal.next_to_play = None;
                tracing::info!(%seat, tricks_claimed, "claim accepted");
                self.finish_deal();
                Ok(Applied::default())
            }

            TableEvent::DdResult { tricks } => {
                let table = DdTable::new(
                    tricks
                        .into_iter()
                        .map(|(seat, by_suit)| (seat, by_suit.into_iter().collect()))
                        .collect(),
                );
                tracing::debug!("static double-dummy table received");
                self.dd_table = Some(table);
                self.refresh_recommendation(None, false);
                Ok(Applied::default())
            }

            TableEvent::SolveResult { fingerprint, plays } => {
                self.pushed.push(fingerprint, plays);
                // Re-ask the solver now that a push may match the position.
                let position = self
                    .deal
                    .as_ref()
                    .filter(|d| !d.is_complete())
                    .and_then(Position::of);
                Ok(Applied {
                    solve_position: position,
                })
            }

            TableEvent::NewRubber => {
                self.rubber.start_new_rubber();
                Ok(Applied::default())
            }
        }
    }

    /// Apply a finished oracle solve. Results for positions the game has
    /// already advanced past are discarded, not applied.
    pub fn apply_solve_outcome(
        &mut self,
        fingerprint: u64,
        outcome: Result<Vec<SolvedPlay>, SolverError>,
    ) {
        let current = self
            .deal
            .as_ref()
            .filter(|d| !d.is_complete())
            .map(|d| d.position_fingerprint());
        if current != Some(fingerprint) {
            tracing::debug!(fingerprint, ?current, "discarding stale oracle result");
            return;
        }
        match outcome {
            Ok(plays) => self.refresh_recommendation(Some(&plays), false),
            Err(err) => {
                // Never fatal: one failure falls straight through to the
                // static heuristic, annotated as degraded.
                tracing::warn!(%err, "oracle solve failed; using fallback heuristic");
                self.refresh_recommendation(None, true);
            }
        }
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            deal: self.deal.as_ref().map(deal_view),
            last_recommendation: self.last_recommendation.as_ref().map(|r| r.view()),
            rubber: self.rubber.status(),
        }
    }

    fn refresh_recommendation(&mut self, solved: Option<&[SolvedPlay]>, oracle_failed: bool) {
        let Some(deal) = self.deal.as_ref().filter(|d| !d.is_complete()) else {
            return;
        };
        let inputs = RecommendInputs {
            solved,
            table: self.dd_table.as_ref(),
            oracle_failed,
        };
        match recommend(deal, inputs) {
            Ok(rec) => {
                tracing::info!(
                    seat = %rec.seat,
                    card = %rec.card,
                    explanation = %rec.explanation,
                    "recommendation"
                );
                self.last_recommendation = Some(rec);
            }
            Err(reason) => {
                tracing::debug!(%reason, "no recommendation");
            }
        }
    }

    /// Deal over (13 tricks or an accepted claim): fold the result into the
    /// rubber score exactly once. A passed-out deal records nothing.
    fn finish_deal(&mut self) {
        if self.deal_scored {
            return;
        }
        let Some(deal) = self.deal.as_ref() else {
            return;
        };
        let Some(contract) = deal.contract().copied() else {
            return;
        };
        let tricks_made = deal.tricks_won.get(contract.declarer.partnership());
        let outcome = self.rubber.record_hand(
            contract.level,
            contract.strain,
            contract.declarer,
            tricks_made,
            contract.doubling,
            Some(deal.hands.dealt_hands()),
        );
        tracing::info!(
            score = %outcome.score.description,
            total = outcome.score.total(),
            "deal scored"
        );
        self.deal_scored = true;
        self.last_recommendation = None;
    }
}

impl Default for TableSession {
    fn default() -> Self {
        Self::new()
    }
}

enum SessionMsg {
    Event(TableEvent),
    SolveDone {
        fingerprint: u64,
        outcome: Result<Vec<SolvedPlay>, SolverError>,
    },
}

/// Handle held by the transport layer: enqueue events, observe snapshots.
#[derive(Clone)]
pub struct TableHandle {
    tx: mpsc::Sender<SessionMsg>,
    snapshots: watch::Receiver<TableSnapshot>,
}

impl TableHandle {
    /// Enqueue an event for the session task. Returns false when the
    /// session has shut down.
    pub async fn send(&self, event: TableEvent) -> bool {
        self.tx.send(SessionMsg::Event(event)).await.is_ok()
    }

    pub fn snapshots(&self) -> watch::Receiver<TableSnapshot> {
        self.snapshots.clone()
    }
}

/// Spawn a table with the production oracle wiring: solves answered from
/// results the solver feed pushes into the event stream.
pub fn spawn(config: SessionConfig) -> TableHandle {
    let session = TableSession::new();
    let solver: Arc<dyn DoubleDummySolver> = session.pushed_solver();
    spawn_session(session, solver, config)
}

/// Spawn a table with an injected oracle (tests use a deterministic table
/// of precomputed best plays).
pub fn spawn_with_solver(solver: Arc<dyn DoubleDummySolver>, config: SessionConfig) -> TableHandle {
    spawn_session(TableSession::new(), solver, config)
}

fn spawn_session(
    mut session: TableSession,
    solver: Arc<dyn DoubleDummySolver>,
    config: SessionConfig,
) -> TableHandle {
    let (tx, mut rx) = mpsc::channel::<SessionMsg>(64);
    let (watch_tx, watch_rx) = watch::channel(session.snapshot());
    let solve_tx = tx.clone();

    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match msg {
                SessionMsg::Event(event) => {
                    match session.apply(event) {
                        Ok(applied) => {
                            if let Some(position) = applied.solve_position {
                                dispatch_solve(
                                    Arc::clone(&solver),
                                    position,
                                    config.solve_timeout,
                                    solve_tx.clone(),
                                );
                            }
                        }
                        Err(err) => tracing::warn!(%err, "event rejected"),
                    }
                    let _ = watch_tx.send(session.snapshot());
                }
                SessionMsg::SolveDone {
                    fingerprint,
                    outcome,
                } => {
                    session.apply_solve_outcome(fingerprint, outcome);
                    let _ = watch_tx.send(session.snapshot());
                }
            }
        }
    });

    TableHandle {
        tx,
        snapshots: watch_rx,
    }
}

/// Run one oracle solve off the critical path. The session keeps ingesting
/// events while this waits; the result is matched against the position it
/// was requested for when it lands.
fn dispatch_solve(
    solver: Arc<dyn DoubleDummySolver>,
    position: Position,
    timeout: Duration,
    tx: mpsc::Sender<SessionMsg>,
) {
    tokio::spawn(async move {
        let outcome = match tokio::time::timeout(timeout, solver.solve(&position)).await {
            Ok(result) => result,
            Err(_) => Err(SolverError::Timeout),
        };
        let _ = tx
            .send(SessionMsg::SolveDone {
                fingerprint: position.fingerprint,
                outcome,
            })
            .await;
    });
}
