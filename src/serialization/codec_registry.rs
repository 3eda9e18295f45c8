//! File-extension based codec lookup.
//!
//! A codec only turns records into bytes and back; reading and writing files
//! is left to the caller.

use std::collections::BTreeMap;

use tracing::debug;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::config::SessionConfig;
use crate::serialization::fen_codec::FenCodec;
use crate::serialization::json_codec::JsonCodec;
use crate::serialization::record::GameRecord;

pub trait RecordCodec {
    fn encode(&self, record: &GameRecord) -> ChessResult<Vec<u8>>;
    fn decode(&self, data: &[u8]) -> ChessResult<GameRecord>;
    /// Extension without the leading dot, lower case.
    fn file_extension(&self) -> &'static str;
    fn file_type_description(&self) -> &'static str;
}

#[derive(Default)]
pub struct CodecRegistry {
    codecs: BTreeMap<&'static str, Box<dyn RecordCodec>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the JSON and FEN codecs installed.
    pub fn with_defaults() -> Self {
        Self::from_config(&SessionConfig::default())
    }

    /// JSON and FEN codecs; FEN loads are credited to the configured user.
    pub fn from_config(config: &SessionConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(JsonCodec));
        registry.register(Box::new(FenCodec::new(config.default_username.clone())));
        registry
    }

    /// Install `codec`, replacing any codec with the same extension.
    pub fn register(&mut self, codec: Box<dyn RecordCodec>) {
        debug!(extension = codec.file_extension(), "codec registered");
        self.codecs.insert(codec.file_extension(), codec);
    }

    pub fn by_extension(&self, extension: &str) -> ChessResult<&dyn RecordCodec> {
        let key = extension.trim_start_matches('.').to_ascii_lowercase();
        self.codecs
            .get(key.as_str())
            .map(|codec| codec.as_ref())
            .ok_or(ChessErrors::UnknownFileExtension(key))
    }

    /// Codec for the extension of `file_name` ("game.json" -> JSON).
    pub fn for_file_name(&self, file_name: &str) -> ChessResult<&dyn RecordCodec> {
        match file_name.rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => self.by_extension(extension),
            _ => Err(ChessErrors::UnknownFileExtension(file_name.to_owned())),
        }
    }

    /// (extension, description) pairs, sorted by extension, for file dialogs.
    pub fn file_types(&self) -> Vec<(&'static str, &'static str)> {
        self.codecs
            .values()
            .map(|codec| (codec.file_extension(), codec.file_type_description()))
            .collect()
    }
}
