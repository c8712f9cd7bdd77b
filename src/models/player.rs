use thiserror::Error;

pub const PLAYER_NAME_MIN_LENGTH: usize = 3;
pub const PLAYER_NAME_MAX_LENGTH: usize = 16;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerNameError {
    #[error("player name must be at least {PLAYER_NAME_MIN_LENGTH} characters")]
    TooShort,

    #[error("player name must be at most {PLAYER_NAME_MAX_LENGTH} characters")]
    TooLong,
}

/// Validated player name shown on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    /// Trim and validate a raw name.
    pub fn parse(raw: &str) -> Result<Self, PlayerNameError> {
        let trimmed = raw.trim();

        if trimmed.chars().count() < PLAYER_NAME_MIN_LENGTH {
            return Err(PlayerNameError::TooShort);
        }
        if trimmed.chars().count() > PLAYER_NAME_MAX_LENGTH {
            return Err(PlayerNameError::TooLong);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
