//! Game session management.
//!
//! [`GameSession`] is the host-facing surface of the engine. It owns the
//! authoritative [`Position`], the fingerprint history used for repetition
//! detection, the two-phase promotion state and the draw-offer flag.
//! Every operation either succeeds or leaves the session exactly as it was.

use arbiter_core::{MoveRequest, PieceKind, Square};

use crate::config::{check_kings, ConfigError, SessionConfig};
use crate::error::{DrawOfferError, MoveError, PromotionError};
use crate::history::MoveHistory;
use crate::movegen::{self, apply_move, finish_promotion, MoveEffects};
use crate::rules::{DrawReason, GameStatus, TerminalEvaluator};
use crate::Position;

/// Result of an accepted move proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move completed and the game now has this status.
    Applied(GameStatus),
    /// A pawn reached the far rank; call
    /// [`GameSession::finalize_promotion`] to pick its new piece.
    PendingPromotion { square: Square },
}

/// A pawn waiting on the far rank for its promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub square: Square,
}

/// A two-player game driven by a host, one request at a time.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    evaluator: TerminalEvaluator,
    start: Position,
    position: Position,
    history: MoveHistory,
    pending: Option<PendingPromotion>,
    draw_offered: bool,
    last_effects: Option<MoveEffects>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session at the standard starting position.
    pub fn new() -> Self {
        Self::build(SessionConfig::default(), Position::startpos())
    }

    /// Creates a session from a validated configuration.
    pub fn with_config(config: SessionConfig) -> Result<Self, ConfigError> {
        config.check_limits()?;
        let start = config.start_position()?;
        Ok(Self::build(config, start))
    }

    /// Creates a session from an arbitrary position, using default limits.
    ///
    /// The position must hold exactly one king per side.
    /// [`reset`](Self::reset) returns to `position`, not the standard start.
    pub fn from_position(position: Position) -> Result<Self, ConfigError> {
        check_kings(&position)?;
        let config = SessionConfig {
            start_fen: position.to_fen(),
            ..SessionConfig::default()
        };
        Ok(Self::build(config, position))
    }

    /// A start position that is already finished (a stalemate fixture,
    /// say) is reported as such straight away.
    fn build(config: SessionConfig, mut start: Position) -> Self {
        let evaluator = TerminalEvaluator::from(&config);
        let status = evaluator.evaluate(&start, &MoveHistory::new());
        start.set_status(status);
        GameSession {
            evaluator,
            config,
            position: start.clone(),
            start,
            history: MoveHistory::new(),
            pending: None,
            draw_offered: false,
            last_effects: None,
        }
    }

    /// The current position, for rendering.
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn status(&self) -> GameStatus {
        self.position.status()
    }

    pub fn is_over(&self) -> bool {
        self.status().is_terminal()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending
    }

    pub fn draw_offered(&self) -> bool {
        self.draw_offered
    }

    /// Side effects of the most recent move, if any.
    pub fn last_effects(&self) -> Option<&MoveEffects> {
        self.last_effects.as_ref()
    }

    /// Moves the side to move can make without exposing its own king.
    ///
    /// Empty once the game is over or while a promotion is pending.
    pub fn legal_moves(&self) -> Vec<MoveRequest> {
        if self.is_over() || self.pending.is_some() {
            return Vec::new();
        }
        movegen::legal_moves(&self.position)
    }

    /// Legal destinations for the piece on `from`.
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        if self.is_over() || self.pending.is_some() {
            return Vec::new();
        }
        movegen::legal_targets(&self.position, from)
    }

    /// Validates and plays a move for the side to move.
    ///
    /// Moves are checked for pseudo-legality only: leaving one's own king
    /// attacked is allowed, and the opponent may then capture it.
    pub fn propose_move(&mut self, request: MoveRequest) -> Result<MoveOutcome, MoveError> {
        if self.pending.is_some() {
            tracing::debug!(%request, "rejected: promotion pending");
            return Err(MoveError::PromotionPending);
        }

        let (next, effects) = apply_move(&self.position, request).map_err(|err| {
            tracing::debug!(%request, %err, "move rejected");
            err
        })?;

        tracing::debug!(
            %request,
            captured = ?effects.captured,
            castled = ?effects.castled,
            "move applied"
        );
        self.position = next;
        self.last_effects = Some(effects);
        self.draw_offered = false;

        if effects.promotion_pending {
            self.pending = Some(PendingPromotion { square: request.to });
            return Ok(MoveOutcome::PendingPromotion { square: request.to });
        }
        Ok(MoveOutcome::Applied(self.complete_turn()))
    }

    /// Parses a coordinate move such as `e2e4` or `e7e8q` and plays it.
    pub fn propose_uci(&mut self, uci: &str) -> Result<MoveOutcome, MoveError> {
        let request =
            MoveRequest::from_uci(uci).ok_or_else(|| MoveError::Malformed(uci.to_string()))?;
        self.propose_move(request)
    }

    /// Supplies the piece for the pawn waiting on the far rank and
    /// completes the turn.
    pub fn finalize_promotion(&mut self, kind: PieceKind) -> Result<GameStatus, PromotionError> {
        let pending = self.pending.ok_or(PromotionError::NotPending)?;
        if !kind.is_promotion_choice() {
            return Err(PromotionError::InvalidChoice(kind));
        }

        self.position = finish_promotion(&self.position, pending.square, kind);
        self.pending = None;
        if let Some(effects) = self.last_effects.as_mut() {
            effects.promotion_pending = false;
            effects.promoted = Some(kind);
        }
        tracing::debug!(square = %pending.square, piece = %kind, "promotion finalized");
        Ok(self.complete_turn())
    }

    /// Records the new position and runs terminal detection.
    fn complete_turn(&mut self) -> GameStatus {
        self.history.push(self.position.fingerprint());
        let status = self.evaluator.evaluate(&self.position, &self.history);
        self.position.set_status(status);
        if status.is_terminal() {
            tracing::info!(%status, plies = self.history.len(), "game over");
        }
        status
    }

    /// Marks a draw offer as standing.
    pub fn offer_draw(&mut self) -> Result<(), DrawOfferError> {
        self.check_draw_allowed()?;
        if self.draw_offered {
            return Err(DrawOfferError::AlreadyOffered);
        }
        self.draw_offered = true;
        tracing::debug!(by = %self.position.side_to_move(), "draw offered");
        Ok(())
    }

    /// Accepts the standing offer; the game ends in a draw.
    pub fn accept_draw(&mut self) -> Result<GameStatus, DrawOfferError> {
        self.check_draw_allowed()?;
        if !self.draw_offered {
            return Err(DrawOfferError::NotOffered);
        }
        self.draw_offered = false;
        let status = GameStatus::Draw(DrawReason::Agreement);
        self.position.set_status(status);
        tracing::info!(%status, "draw agreed");
        Ok(status)
    }

    /// Withdraws the standing offer; play continues.
    pub fn decline_draw(&mut self) -> Result<(), DrawOfferError> {
        self.check_draw_allowed()?;
        if !self.draw_offered {
            return Err(DrawOfferError::NotOffered);
        }
        self.draw_offered = false;
        tracing::debug!("draw declined");
        Ok(())
    }

    fn check_draw_allowed(&self) -> Result<(), DrawOfferError> {
        if self.is_over() {
            return Err(DrawOfferError::GameOver);
        }
        if self.pending.is_some() {
            return Err(DrawOfferError::PromotionPending);
        }
        Ok(())
    }

    /// Returns to the start position and clears history and all flags.
    pub fn reset(&mut self) {
        self.position = self.start.clone();
        self.history.clear();
        self.pending = None;
        self.draw_offered = false;
        self.last_effects = None;
        tracing::info!("session reset");
    }
}
