use chrono::Utc;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::config::SessionConfig;
use crate::game_state::position::Position;
use crate::serialization::codec_registry::RecordCodec;
use crate::serialization::record::{GameInfo, GameRecord};
use crate::serialization::serializer::{from_record, to_record};

/// Single-line FEN. Only the current snapshot survives; history and
/// metadata are dropped on save and synthesized on load.
#[derive(Debug, Clone)]
pub struct FenCodec {
    pub username: String,
}

impl FenCodec {
    /// Codec whose loaded games are played by `username`.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl Default for FenCodec {
    fn default() -> Self {
        Self::new(SessionConfig::default().default_username)
    }
}

impl RecordCodec for FenCodec {
    fn encode(&self, record: &GameRecord) -> ChessResult<Vec<u8>> {
        let position = from_record(record)?;
        let mut out = position.to_fen();
        out.push('\n');
        Ok(out.into_bytes())
    }

    fn decode(&self, data: &[u8]) -> ChessResult<GameRecord> {
        let text = std::str::from_utf8(data)
            .map_err(|err| ChessErrors::InvalidFen(format!("not UTF-8: {err}")))?;
        let position = Position::from_fen(text.trim())?;
        Ok(to_record(
            &position,
            &GameInfo::started_at(self.username.clone(), Utc::now()),
        ))
    }

    fn file_extension(&self) -> &'static str {
        "fen"
    }

    fn file_type_description(&self) -> &'static str {
        "Position (FEN)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn writes_one_fen_line() {
        let position = Position::from_fen(KIWIPETE).expect("fen");
        let record = to_record(&position, &GameInfo::new("user1"));
        let bytes = FenCodec::default().encode(&record).expect("encode");
        assert_eq!(bytes, format!("{KIWIPETE}\n").into_bytes());
    }

    #[test]
    fn reads_fen_with_surrounding_whitespace() {
        let codec = FenCodec::new("guest");
        let record = codec.decode(format!("  {KIWIPETE}\r\n").as_bytes()).expect("decode");
        assert_eq!(record.info.username, "guest");
        assert_eq!(from_record(&record).expect("position").to_fen(), KIWIPETE);
    }

    #[test]
    fn invalid_fen_is_rejected() {
        assert!(matches!(
            FenCodec::default().decode(b"not a fen"),
            Err(ChessErrors::InvalidFen(_))
        ));
    }
}
