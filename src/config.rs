//! Session tuning knobs.
//!
//! Defaults follow standard chess. Every field can be overridden from the
//! environment (see [`SessionConfig::from_env`]) or loaded from JSON.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::game_state::chess_rules::FIFTY_MOVE_RULE_PLIES;

pub const ENV_FIFTY_MOVE_LIMIT: &str = "CHESS_CORE_FIFTY_MOVE_LIMIT";
pub const ENV_END_ON_FIFTY_MOVE: &str = "CHESS_CORE_END_ON_FIFTY_MOVE";
pub const ENV_ATTACK_CACHE: &str = "CHESS_CORE_ATTACK_CACHE";
pub const ENV_USERNAME: &str = "CHESS_CORE_USERNAME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Half-move clock value at which the fifty-move draw is reported.
    pub fifty_move_limit: u16,
    /// Refuse further moves once the fifty-move draw is reported.
    pub end_on_fifty_move_rule: bool,
    /// Positions kept in the session's attack-map cache.
    pub attack_cache_capacity: usize,
    pub default_username: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fifty_move_limit: FIFTY_MOVE_RULE_PLIES,
            end_on_fifty_move_rule: false,
            attack_cache_capacity: 256,
            default_username: "user1".to_owned(),
        }
    }
}

impl SessionConfig {
    /// Defaults overridden by the `CHESS_CORE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SessionConfig::from_env`] with an arbitrary variable source.
    /// Unparsable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(limit) = parse_var(&lookup, ENV_FIFTY_MOVE_LIMIT) {
            config.fifty_move_limit = limit;
        }
        if let Some(value) = lookup(ENV_END_ON_FIFTY_MOVE) {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.end_on_fifty_move_rule = true,
                "0" | "false" | "no" | "off" => config.end_on_fifty_move_rule = false,
                other => warn!(key = ENV_END_ON_FIFTY_MOVE, value = other, "ignoring invalid flag"),
            }
        }
        if let Some(capacity) = parse_var::<usize, _>(&lookup, ENV_ATTACK_CACHE) {
            config.attack_cache_capacity = capacity.max(1);
        }
        if let Some(name) = lookup(ENV_USERNAME) {
            let name = name.trim();
            if !name.is_empty() {
                config.default_username = name.to_owned();
            }
        }

        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}
