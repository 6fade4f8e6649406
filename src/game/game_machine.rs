//! The game state machine.
//!
//! `ChessGame` owns the current position, the committed history and at most
//! one suspended promotion. Every mutation goes through a commit: the chosen
//! legal move is applied to a copy, the copy becomes the position, the SAN
//! token is appended and the status is re-evaluated. Rejected requests leave
//! all of it untouched.

use tracing::{debug, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game::promotion::{PendingPromotion, PromotionChooser};
use crate::game::status::{evaluate_status, GameStatus};
use crate::game_state::chess_types::{Color, PieceKind, Square, PROMOTION_KINDS};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::ChessMove;
use crate::uci::uci_protocol::BestMove;
use crate::utils::san::move_to_san;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub chess_move: ChessMove,
    pub notation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    pub committed_move: ChessMove,
    pub notation: String,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveProposal {
    Committed(CommitResult),
    /// The move reaches the last rank and no kind was given. Nothing is
    /// committed until the token comes back through `resolve_promotion`.
    PendingPromotion(PendingPromotion),
}

enum Selection {
    Move(ChessMove),
    NeedsPromotion(Color),
}

#[derive(Debug, Clone)]
pub struct ChessGame {
    state: GameState,
    history: Vec<HistoryEntry>,
    status: GameStatus,
    pending: Option<PendingPromotion>,
    next_promotion_id: u64,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    pub fn new() -> Self {
        Self::with_state(GameState::new_game())
    }

    /// Starts from an arbitrary position. Both sides need exactly one king and
    /// the side not to move must not be in check.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let state = GameState::from_fen(fen)?;
        for color in [Color::White, Color::Black] {
            let kings = state.board.count(color, PieceKind::King);
            if kings != 1 {
                return Err(ChessError::parse(format!(
                    "{color} must have exactly one king, found {kings}"
                )));
            }
        }
        let waiting = state.side_to_move.opposite();
        if is_king_in_check(&state.board, waiting) {
            return Err(ChessError::parse(format!(
                "{waiting} is in check but it is not their move"
            )));
        }
        Ok(Self::with_state(state))
    }

    fn with_state(state: GameState) -> Self {
        let status = evaluate_status(&state);
        Self {
            state,
            history: Vec::new(),
            status,
            pending: None,
            next_promotion_id: 0,
        }
    }

    /// Back to the initial position. Any pending promotion is discarded and
    /// its token goes stale.
    pub fn restart(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(from = %pending.from, to = %pending.to, "restart discards pending promotion");
        }
        self.state = GameState::new_game();
        self.history.clear();
        self.status = GameStatus::Ongoing;
        debug!("game restarted");
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn fen(&self) -> String {
        self.state.get_fen()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    pub fn current_status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_tokens(&self) -> Vec<&str> {
        self.history.iter().map(|entry| entry.notation.as_str()).collect()
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending
    }

    /// Legal moves of the piece on `square`. Empty for an empty square, an
    /// opponent piece, a finished game, or while a promotion is pending.
    pub fn legal_moves(&self, square: Square) -> Vec<ChessMove> {
        if self.pending.is_some() || self.status.is_over() {
            return Vec::new();
        }
        legal_moves(&self.state, square)
    }

    pub fn propose_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveProposal> {
        match self.select(from, to, promotion)? {
            Selection::Move(chess_move) => Ok(MoveProposal::Committed(self.commit(chess_move))),
            Selection::NeedsPromotion(color) => {
                let token = PendingPromotion {
                    id: self.next_promotion_id,
                    from,
                    to,
                    color,
                };
                self.next_promotion_id += 1;
                self.pending = Some(token);
                debug!(%from, %to, "promotion pending");
                Ok(MoveProposal::PendingPromotion(token))
            }
        }
    }

    /// Completes the suspended promotion `token` with `kind`.
    ///
    /// A token that is not the pending one (already resolved, discarded by
    /// `restart`, or never issued) is an `InvalidState`. A kind that is not
    /// one of the promotion targets is an `InvalidMove` and keeps the
    /// promotion pending.
    pub fn resolve_promotion(
        &mut self,
        token: PendingPromotion,
        kind: PieceKind,
    ) -> ChessResult<CommitResult> {
        let Some(pending) = self.pending else {
            warn!(from = %token.from, to = %token.to, "promotion resolved with nothing pending");
            return Err(ChessError::invalid_state("no promotion is pending"));
        };
        if pending != token {
            warn!(from = %token.from, to = %token.to, "stale promotion token");
            return Err(ChessError::invalid_state("promotion token is stale"));
        }

        let chess_move = legal_moves(&self.state, pending.from)
            .into_iter()
            .find(|mv| mv.to == pending.to && mv.promotion() == Some(kind))
            .ok_or(ChessError::InvalidMove {
                from: pending.from,
                to: pending.to,
            })?;

        self.pending = None;
        Ok(self.commit(chess_move))
    }

    /// One-shot commit. A promoting move must name its kind.
    pub fn commit_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<CommitResult> {
        match self.select(from, to, promotion)? {
            Selection::Move(chess_move) => Ok(self.commit(chess_move)),
            Selection::NeedsPromotion(_) => Err(ChessError::InvalidMove { from, to }),
        }
    }

    /// Commits `(from, to)`, asking `chooser` for the kind if the move
    /// promotes.
    pub fn commit_move_with<C: PromotionChooser + ?Sized>(
        &mut self,
        from: Square,
        to: Square,
        chooser: &mut C,
    ) -> ChessResult<CommitResult> {
        let chess_move = match self.select(from, to, None)? {
            Selection::Move(chess_move) => chess_move,
            Selection::NeedsPromotion(color) => {
                let kind = chooser.choose(color, &PROMOTION_KINDS);
                match self.select(from, to, Some(kind))? {
                    Selection::Move(chess_move) => chess_move,
                    Selection::NeedsPromotion(_) => return Err(ChessError::InvalidMove { from, to }),
                }
            }
        };
        Ok(self.commit(chess_move))
    }

    /// Commits the move an external engine picked for the side to move.
    pub fn apply_engine_reply(&mut self, reply: &BestMove) -> ChessResult<CommitResult> {
        let best = reply.best;
        self.commit_move(best.from, best.to, best.promotion)
    }

    fn select(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<Selection> {
        if let Some(pending) = self.pending {
            warn!(%from, %to, "move proposed while a promotion is pending");
            return Err(ChessError::invalid_state(format!(
                "promotion on {} must be resolved first",
                pending.to
            )));
        }
        if self.status.is_over() {
            return Err(ChessError::GameOver(self.status));
        }

        let candidates: Vec<ChessMove> = legal_moves(&self.state, from)
            .into_iter()
            .filter(|mv| mv.to == to)
            .collect();

        let Some(first) = candidates.first().copied() else {
            warn!(%from, %to, "rejected illegal move");
            return Err(ChessError::InvalidMove { from, to });
        };

        if first.promotion().is_none() {
            // Only a promotion fans out into several candidates per target.
            if promotion.is_some() {
                warn!(%from, %to, "promotion kind given for a non-promoting move");
                return Err(ChessError::InvalidMove { from, to });
            }
            return Ok(Selection::Move(first));
        }

        match promotion {
            None => Ok(Selection::NeedsPromotion(first.moved_piece.color)),
            Some(kind) => candidates
                .into_iter()
                .find(|mv| mv.promotion() == Some(kind))
                .map(Selection::Move)
                .ok_or(ChessError::InvalidMove { from, to }),
        }
    }

    fn commit(&mut self, chess_move: ChessMove) -> CommitResult {
        let notation = move_to_san(&chess_move);
        self.state = apply_move(&self.state, &chess_move);
        self.status = evaluate_status(&self.state);
        self.history.push(HistoryEntry {
            chess_move,
            notation: notation.clone(),
        });

        debug!(
            mv = %chess_move,
            san = %notation,
            status = %self.status,
            "move committed"
        );

        CommitResult {
            committed_move: chess_move,
            notation,
            status: self.status,
        }
    }
}
