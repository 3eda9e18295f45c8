use crate::chess_errors::{ChessErrors, ChessResult};
use crate::serialization::codec_registry::RecordCodec;
use crate::serialization::record::GameRecord;

/// Pretty-printed JSON, the native save format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl RecordCodec for JsonCodec {
    fn encode(&self, record: &GameRecord) -> ChessResult<Vec<u8>> {
        serde_json::to_vec_pretty(record)
            .map_err(|err| ChessErrors::MalformedRecord(format!("cannot encode record: {err}")))
    }

    fn decode(&self, data: &[u8]) -> ChessResult<GameRecord> {
        serde_json::from_slice(data).map_err(|err| ChessErrors::MalformedRecord(err.to_string()))
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn file_type_description(&self) -> &'static str {
        "Chess game (JSON)"
    }
}
