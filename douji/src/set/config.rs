//! Set configuration.

use serde::{Deserialize, Serialize};
use std::{env, str::FromStr};

use super::errors::{SetError, SetResult};
use crate::game::{
    GameSettings, HiddenCards,
    constants::{
        DEFAULT_ANTE, DEFAULT_CEILING, DEFAULT_GAME_COUNT, DEFAULT_STEP, MAX_CEILING,
        MAX_LADDER_RUNGS,
    },
    entities::Chips,
};

/// Set configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetConfig {
    /// Games to play before any bombing extends the set
    pub games: usize,

    /// Chips every player pays into a fresh pot
    pub ante: Chips,

    /// Face-down cards dealt to each player (1 or 2)
    pub hidden_cards: HiddenCards,

    /// Smallest non-zero call
    pub step: Chips,

    /// Largest call outside the final round
    pub ceiling: Chips,

    /// Pot the first game starts with. A positive value skips its antes.
    pub starting_pot: Chips,

    /// Log table status after every round at info level
    pub verbose: bool,

    /// Seed for deck shuffles. OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            games: DEFAULT_GAME_COUNT,
            ante: DEFAULT_ANTE,
            hidden_cards: HiddenCards::One,
            step: DEFAULT_STEP,
            ceiling: DEFAULT_CEILING,
            starting_pot: 0,
            verbose: false,
            seed: None,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> SetResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| SetError::InvalidConfig(format!("{key} has an invalid value: {raw}"))),
        Err(_) => Ok(default),
    }
}

impl SetConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `DOUJI_GAMES`: Games per set (default: 2)
    /// - `DOUJI_ANTE`: Ante per player (default: 1)
    /// - `DOUJI_HIDDEN_CARDS`: 1 or 2 (default: 1)
    /// - `DOUJI_STEP`: Call step (default: 1)
    /// - `DOUJI_CEILING`: Call ceiling (default: 5)
    /// - `DOUJI_STARTING_POT`: Pot of the first game (default: 0)
    /// - `DOUJI_VERBOSE`: `true` to log table status (default: false)
    /// - `DOUJI_SEED`: Shuffle seed (default: unset)
    ///
    /// The result is not validated, so callers can still override fields.
    /// [`SetRunner::new`](super::SetRunner::new) validates before playing.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidConfig`] if a variable doesn't parse.
    pub fn from_env() -> SetResult<Self> {
        let defaults = Self::default();
        let hidden: u8 = env_or("DOUJI_HIDDEN_CARDS", defaults.hidden_cards.count())?;
        let seed = match env::var("DOUJI_SEED") {
            Ok(raw) => Some(raw.trim().parse().map_err(|_| {
                SetError::InvalidConfig(format!("DOUJI_SEED has an invalid value: {raw}"))
            })?),
            Err(_) => None,
        };
        Ok(Self {
            games: env_or("DOUJI_GAMES", defaults.games)?,
            ante: env_or("DOUJI_ANTE", defaults.ante)?,
            hidden_cards: HiddenCards::try_from(hidden).map_err(SetError::InvalidConfig)?,
            step: env_or("DOUJI_STEP", defaults.step)?,
            ceiling: env_or("DOUJI_CEILING", defaults.ceiling)?,
            starting_pot: env_or("DOUJI_STARTING_POT", defaults.starting_pot)?,
            verbose: env_or("DOUJI_VERBOSE", defaults.verbose)?,
            seed,
        })
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> SetResult<()> {
        if self.games == 0 {
            return Err(SetError::InvalidConfig(
                "A set needs at least one game".to_string(),
            ));
        }

        if self.ante < 0 {
            return Err(SetError::InvalidConfig(
                "Ante can't be negative".to_string(),
            ));
        }

        if self.step <= 0 {
            return Err(SetError::InvalidConfig(
                "Call step must be positive".to_string(),
            ));
        }

        if self.ceiling < self.step {
            return Err(SetError::InvalidConfig(
                "Call ceiling must be at least the step".to_string(),
            ));
        }

        if self.ceiling % self.step != 0 {
            return Err(SetError::InvalidConfig(format!(
                "Call ceiling {} must be a multiple of the step {}",
                self.ceiling, self.step
            )));
        }

        if self.ceiling > MAX_CEILING {
            return Err(SetError::InvalidConfig(format!(
                "Call ceiling can't exceed {MAX_CEILING}"
            )));
        }

        if self.ceiling / self.step > MAX_LADDER_RUNGS {
            return Err(SetError::InvalidConfig(format!(
                "Ladder can't have more than {MAX_LADDER_RUNGS} calls, got {}",
                self.ceiling / self.step
            )));
        }

        if self.ante > MAX_CEILING {
            return Err(SetError::InvalidConfig(format!(
                "Ante can't exceed {MAX_CEILING}"
            )));
        }

        if self.starting_pot < 0 {
            return Err(SetError::InvalidConfig(
                "Starting pot can't be negative".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings for a game that starts fresh, without a carried pot.
    #[must_use]
    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            ante: self.ante,
            hidden_cards: self.hidden_cards,
            pot: 0,
            step: self.step,
            ceiling: self.ceiling,
            verbose: self.verbose,
        }
    }
}
