//! A single game driven by one caller.
//!
//! The session is the only place that mutates the live position. Every
//! public mutation is validate-then-commit: on error nothing has changed.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::config::SessionConfig;
use crate::game_state::chess_types::{Color, PieceKind, Square, SquareSet};
use crate::game_state::game_status::{evaluate_with_limit, GameStatus};
use crate::game_state::position::Position;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::attack_map::AttackMapCache;
use crate::move_generation::legal_move_filter::{all_legal_moves, legal_moves, resolve_move};
use crate::moves::chess_move::Move;
use crate::serialization::record::{GameInfo, GameRecord};
use crate::serialization::serializer::{replay_record, to_record_with_history};
use crate::utils::long_algebraic::parse_long_algebraic;

#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    initial: Position,
    position: Position,
    history: Vec<UndoState>,
    info: GameInfo,
    status: GameStatus,
    attack_cache: AttackMapCache,
}

impl GameSession {
    /// Standard game with the default configuration.
    pub fn new_game(username: impl Into<String>) -> Self {
        Self::with_config(username, SessionConfig::default())
    }

    pub fn with_config(username: impl Into<String>, config: SessionConfig) -> Self {
        Self::from_position(Position::new_game(), GameInfo::new(username), config)
    }

    /// Start from an arbitrary setup, e.g. a two-figure training layout.
    pub fn from_position(position: Position, info: GameInfo, config: SessionConfig) -> Self {
        let status = evaluate_with_limit(&position, config.fifty_move_limit);
        debug!(fen = %position.to_fen(), %status, "session started");
        Self {
            attack_cache: AttackMapCache::new(config.attack_cache_capacity),
            config,
            initial: position.clone(),
            position,
            history: Vec::new(),
            info,
            status,
        }
    }

    /// Throw the current game away and set up the standard layout.
    /// Without a name the configured default user plays.
    pub fn restart(&mut self, username: Option<&str>) {
        let username = username.unwrap_or(&self.config.default_username).to_owned();
        *self = Self::with_config(username, self.config.clone());
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn initial_position(&self) -> &Position {
        &self.initial
    }

    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn history(&self) -> &[UndoState] {
        &self.history
    }

    pub fn moves_played(&self) -> Vec<Move> {
        self.history.iter().map(|entry| entry.mv).collect()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn status_text(&self) -> String {
        self.status.status_text(self.position.side_to_move)
    }

    /// True once no further move is accepted.
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
            || (self.config.end_on_fifty_move_rule
                && self.status == GameStatus::DrawByFiftyMoveRule)
    }

    pub fn legal_moves(&self, square: Square) -> Vec<Move> {
        legal_moves(&self.position, square)
    }

    pub fn all_legal_moves(&self) -> Vec<Move> {
        all_legal_moves(&self.position)
    }

    /// Squares `color` attacks in the live position.
    pub fn attacked_squares(&mut self, color: Color) -> SquareSet {
        self.attack_cache
            .get_or_compute(&self.position)
            .attacked_by(color)
    }

    /// Play `from`-`to` if it is legal and return the new status.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<GameStatus> {
        if self.is_game_over() {
            warn!(%from, %to, status = %self.status, "move after game end rejected");
            return Err(ChessErrors::GameOver(self.status));
        }

        let generated = match resolve_move(&self.position, from, to, promotion) {
            Ok(generated) => generated,
            Err(err) => {
                debug!(%from, %to, %err, "move rejected");
                return Err(err);
            }
        };

        self.history.push(UndoState {
            mv: generated.mv,
            position_before: std::mem::replace(&mut self.position, generated.position_after),
            status_before: self.status,
        });

        let previous = self.status;
        self.status = evaluate_with_limit(&self.position, self.config.fifty_move_limit);
        debug!(mv = %generated.mv, status = %self.status, "move applied");

        if self.status != previous {
            info!(from = %previous, to = %self.status, "status changed");
        }
        if self.is_game_over() {
            self.finish();
        }

        Ok(self.status)
    }

    /// [`GameSession::apply_move`] from long algebraic text ("e7e8q").
    pub fn apply_long_algebraic(&mut self, text: &str) -> ChessResult<GameStatus> {
        let (from, to, promotion) = parse_long_algebraic(text)?;
        self.apply_move(from, to, promotion)
    }

    /// Take back the last move. A finished game is reopened.
    pub fn undo(&mut self) -> ChessResult<Move> {
        let entry = self.history.pop().ok_or(ChessErrors::NothingToUndo)?;
        self.position = entry.position_before;
        self.status = entry.status_before;
        self.info.end_time = None;
        self.info.score = 0;
        debug!(mv = %entry.mv, status = %self.status, "move taken back");
        Ok(entry.mv)
    }

    pub fn to_record(&self) -> GameRecord {
        to_record_with_history(&self.initial, &self.position, &self.moves_played(), &self.info)
    }

    /// Replace the game with `record`. On error the current game is kept.
    pub fn load_record(&mut self, record: &GameRecord) -> ChessResult<()> {
        let replayed = replay_record(record).inspect_err(|err| {
            warn!(%err, "record rejected");
        })?;

        self.initial = replayed.initial;
        self.position = replayed.position;
        self.history = replayed.history;
        self.info = record.info.clone();
        self.status = evaluate_with_limit(&self.position, self.config.fifty_move_limit);
        self.attack_cache.clear();

        info!(
            username = %self.info.username,
            plies = self.history.len(),
            status = %self.status,
            "record loaded"
        );
        Ok(())
    }

    fn finish(&mut self) {
        self.info.end_time = Some(Utc::now());
        self.info.score = match self.status.winner(self.position.side_to_move) {
            Some(Color::White) => 1,
            Some(Color::Black) => -1,
            None => 0,
        };
        info!(
            username = %self.info.username,
            score = self.info.score,
            "{}",
            self.status_text()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::codec_registry::CodecRegistry;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    fn play(session: &mut GameSession, moves: &[&str]) {
        for text in moves {
            session
                .apply_long_algebraic(text)
                .unwrap_or_else(|err| panic!("{text} should be legal: {err}"));
        }
    }

    #[test]
    fn new_game_starts_normal() {
        let session = GameSession::new_game("user1");
        assert_eq!(session.status(), GameStatus::Normal);
        assert_eq!(session.all_legal_moves().len(), 20);
        assert_eq!(session.info().username, "user1");
        assert_eq!(session.status_text(), "White to move.");
    }

    #[test]
    fn illegal_moves_leave_the_game_untouched() {
        let mut session = GameSession::new_game("user1");
        let before = session.position().clone();
        assert_eq!(
            session.apply_move(sq("e2"), sq("e5"), None),
            Err(ChessErrors::IllegalMove {
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert_eq!(session.position(), &before);
        assert!(session.history().is_empty());
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut session = GameSession::new_game("user1");
        play(&mut session, &["f2f3", "e7e5", "g2g4"]);
        assert_eq!(session.apply_long_algebraic("d8h4"), Ok(GameStatus::Checkmate));
        assert!(session.is_game_over());
        assert_eq!(session.info().score, -1);
        assert!(session.info().end_time.is_some());
        assert_eq!(session.status_text(), "Check mate! Black wins.");

        assert_eq!(
            session.apply_long_algebraic("a2a3"),
            Err(ChessErrors::GameOver(GameStatus::Checkmate))
        );

        assert_eq!(session.undo().map(|mv| mv.to), Ok(sq("h4")));
        assert!(!session.is_game_over());
        assert_eq!(session.info().end_time, None);
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn undo_on_empty_history_fails() {
        let mut session = GameSession::new_game("user1");
        assert_eq!(session.undo(), Err(ChessErrors::NothingToUndo));
    }

    #[test]
    fn promotion_needs_a_choice() {
        // The black pawn keeps mating material on the board after an underpromotion.
        let position = Position::from_fen("k7/4P3/8/8/8/8/p7/4K3 w - - 0 1").expect("fen");
        let mut session =
            GameSession::from_position(position, GameInfo::new("user1"), SessionConfig::default());
        assert_eq!(
            session.apply_move(sq("e7"), Square::E8, None),
            Err(ChessErrors::AmbiguousPromotion {
                from: sq("e7"),
                to: Square::E8
            })
        );
        assert_eq!(
            session.apply_move(sq("e7"), Square::E8, Some(PieceKind::Knight)),
            Ok(GameStatus::Normal)
        );
        let promoted = session.position().piece_at(Square::E8).expect("piece on e8");
        assert_eq!(promoted.kind, PieceKind::Knight);
    }

    #[test]
    fn fifty_move_draw_is_reported_unless_configured_to_end() {
        let fen = "4k3/8/8/8/8/8/8/R3K3 w - - 99 80";
        let position = Position::from_fen(fen).expect("fen");

        let mut lenient = GameSession::from_position(
            position.clone(),
            GameInfo::new("user1"),
            SessionConfig::default(),
        );
        assert_eq!(
            lenient.apply_long_algebraic("a1a2"),
            Ok(GameStatus::DrawByFiftyMoveRule)
        );
        assert_eq!(lenient.status_text(), "50-move-rule applies");
        assert!(lenient.apply_long_algebraic("e8d8").is_ok());

        let strict_config = SessionConfig {
            end_on_fifty_move_rule: true,
            ..SessionConfig::default()
        };
        let mut strict = GameSession::from_position(position, GameInfo::new("user1"), strict_config);
        play(&mut strict, &["a1a2"]);
        assert_eq!(
            strict.apply_long_algebraic("e8d8"),
            Err(ChessErrors::GameOver(GameStatus::DrawByFiftyMoveRule))
        );
        assert_eq!(strict.info().score, 0);
    }

    #[test]
    fn attacked_squares_use_the_cache() {
        let mut session = GameSession::new_game("user1");
        let first = session.attacked_squares(Color::White);
        let second = session.attacked_squares(Color::Black);
        assert!(first.contains(sq("f3")));
        assert!(second.contains(sq("f6")));
        assert_eq!(session.attack_cache.hits(), 1);
    }

    #[test]
    fn oversized_cache_setting_builds_a_session() {
        let config = SessionConfig::from_lookup(|key| {
            (key == crate::config::ENV_ATTACK_CACHE).then(|| usize::MAX.to_string())
        });
        assert_eq!(config.attack_cache_capacity, usize::MAX);
        let mut session = GameSession::with_config("user1", config);
        assert!(session.attacked_squares(Color::White).contains(sq("f3")));
    }

    #[test]
    fn drawn_games_refuse_further_moves() {
        let position = Position::from_fen("k7/8/1K6/8/8/8/8/2Q5 w - - 0 1").expect("fen");
        let mut stalemate =
            GameSession::from_position(position, GameInfo::new("user1"), SessionConfig::default());
        assert_eq!(stalemate.apply_long_algebraic("c1c7"), Ok(GameStatus::Stalemate));
        assert_eq!(stalemate.status_text(), "Stalemate! Black can't move.");
        assert_eq!(
            stalemate.apply_long_algebraic("a8b8"),
            Err(ChessErrors::GameOver(GameStatus::Stalemate))
        );
        assert_eq!(stalemate.info().score, 0);
        assert!(stalemate.info().end_time.is_some());

        // Taking the last rook leaves bare kings.
        let position = Position::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1").expect("fen");
        let mut bare_kings =
            GameSession::from_position(position, GameInfo::new("user1"), SessionConfig::default());
        assert_eq!(
            bare_kings.apply_long_algebraic("e1d2"),
            Ok(GameStatus::DrawByInsufficientMaterial)
        );
        assert_eq!(
            bare_kings.apply_long_algebraic("e8e7"),
            Err(ChessErrors::GameOver(GameStatus::DrawByInsufficientMaterial))
        );
        assert_eq!(bare_kings.history().len(), 1);
    }

    #[test]
    fn save_and_load_through_the_json_codec() {
        let mut session = GameSession::new_game("user1");
        play(&mut session, &["e2e4", "c7c5", "g1f3"]);
        let registry = CodecRegistry::with_defaults();
        let codec = registry.for_file_name("game.json").expect("json codec");
        let bytes = codec.encode(&session.to_record()).expect("encode");

        let mut restored = GameSession::new_game("someone else");
        restored
            .load_record(&codec.decode(&bytes).expect("decode"))
            .expect("load");
        assert_eq!(restored.position(), session.position());
        assert_eq!(restored.moves_played(), session.moves_played());
        assert_eq!(restored.info().username, "user1");
        assert_eq!(restored.undo().map(|mv| mv.to), Ok(sq("f3")));
    }

    #[test]
    fn failed_load_keeps_the_current_game() {
        let mut session = GameSession::new_game("user1");
        play(&mut session, &["d2d4"]);
        let mut record = session.to_record();
        record.history = vec!["d2d5".to_owned()];

        let before = session.position().clone();
        assert!(matches!(
            session.load_record(&record),
            Err(ChessErrors::MalformedRecord(_))
        ));
        assert_eq!(session.position(), &before);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn restart_uses_the_default_user() {
        let mut session = GameSession::new_game("alice");
        play(&mut session, &["e2e4"]);
        session.restart(None);
        assert_eq!(session.info().username, "user1");
        assert!(session.history().is_empty());
        session.restart(Some("bob"));
        assert_eq!(session.info().username, "bob");
    }
}
