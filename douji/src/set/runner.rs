//! Runs the games of a set in sequence and persists results in the
//! background.

use log::{error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::{
    config::SetConfig,
    errors::{SetError, SetResult},
};
use crate::{
    game::{
        DecisionProvider, Game, GameOutcome, GameSettings,
        constants::{MAX_CEILING, MAX_PLAYERS},
        entities::{CardDealer, Chips, Deck, Player, PlayerId, PlayerSnapshot},
    },
    results::{GameRecord, ResultSink, SinkResult},
};

/// A result that never made it into the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistenceFailure {
    pub game_id: usize,
    pub message: String,
}

/// Summary of a completed set.
#[derive(Debug, Clone, Serialize)]
pub struct SetReport {
    pub set_id: Uuid,
    /// One entry per game played, in order.
    pub games: Vec<GameOutcome>,
    /// Game count after every bombing extension.
    pub target_games: usize,
    pub balances: Vec<PlayerSnapshot>,
    pub persistence_failures: Vec<PersistenceFailure>,
}

impl SetReport {
    #[must_use]
    pub fn bombed_games(&self) -> usize {
        self.games
            .iter()
            .filter(|outcome| outcome.winner.is_none())
            .count()
    }

    /// Chips still in the pot when the set ended.
    #[must_use]
    pub fn unclaimed_pot(&self) -> Chips {
        self.games.last().map_or(0, |outcome| outcome.leftover_pot)
    }
}

type PendingSave = (usize, JoinHandle<SinkResult<()>>);

/// Betting parameters carried from one game to the next.
#[derive(Debug)]
struct Escalation {
    pot: Chips,
    step: Chips,
    ceiling: Chips,
    prev_winner: Option<PlayerId>,
}

impl Escalation {
    /// Stakes for the game added by a bomb: the pot carries and the ladder
    /// doubles, unless that would take the ceiling past [`MAX_CEILING`].
    fn bombed(self, pot: Chips) -> Self {
        let (step, ceiling) = match self.ceiling.checked_mul(2) {
            Some(ceiling) if ceiling <= MAX_CEILING => (self.step * 2, ceiling),
            _ => {
                warn!("ceiling {} is at the limit, stakes stay put", self.ceiling);
                (self.step, self.ceiling)
            }
        };
        Self {
            pot,
            step,
            ceiling,
            prev_winner: None,
        }
    }
}

/// Plays the games of one set against a result sink.
pub struct SetRunner {
    id: Uuid,
    config: SetConfig,
    sink: Arc<dyn ResultSink>,
}

impl SetRunner {
    /// # Errors
    ///
    /// Returns [`SetError::InvalidConfig`] if the config fails validation.
    pub fn new(config: SetConfig, sink: Arc<dyn ResultSink>) -> SetResult<Self> {
        config.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            config,
            sink,
        })
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &SetConfig {
        &self.config
    }

    /// Play the set with freshly shuffled decks, seeded from the config
    /// when a seed is set.
    ///
    /// # Errors
    ///
    /// See [`SetRunner::run_with`].
    pub async fn run<P>(&self, players: &mut [Player], decider: &mut P) -> SetResult<SetReport>
    where
        P: DecisionProvider + ?Sized,
    {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with(players, decider, |_| Deck::shuffled(&mut rng))
            .await
    }

    /// Play the set, asking `dealer_for` for the dealer of each game by
    /// its 1-based id.
    ///
    /// # Errors
    ///
    /// - [`SetError::InvalidConfig`] with more players than the deck
    ///   can serve.
    /// - [`SetError::Game`] when a game aborts. Results already handed to
    ///   the sink are still awaited first.
    pub async fn run_with<P, D, F>(
        &self,
        players: &mut [Player],
        decider: &mut P,
        mut dealer_for: F,
    ) -> SetResult<SetReport>
    where
        P: DecisionProvider + ?Sized,
        D: CardDealer,
        F: FnMut(usize) -> D,
    {
        if players.len() > MAX_PLAYERS {
            return Err(SetError::InvalidConfig(format!(
                "at most {MAX_PLAYERS} players fit the deck, got {}",
                players.len()
            )));
        }

        let mut target = self.config.games;
        let mut escalation = self.fresh_escalation(self.config.starting_pot, None);
        let mut games = Vec::with_capacity(target);
        let mut pending: Vec<PendingSave> = Vec::with_capacity(target);

        let mut game_id = 0;
        while game_id < target {
            game_id += 1;
            let settings = GameSettings {
                pot: escalation.pot,
                step: escalation.step,
                ceiling: escalation.ceiling,
                ..self.config.game_settings()
            };
            let mut dealer = dealer_for(game_id);
            let result = Game::new(&mut *players, settings, escalation.prev_winner.take())
                .run(&mut dealer, decider);
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(source) => {
                    error!("set {} aborted in game {game_id}: {source}", self.id);
                    clear_hands(players);
                    join_pending(pending).await;
                    return Err(SetError::Game {
                        index: game_id,
                        source,
                    });
                }
            };

            let snapshots = players.iter().map(Player::snapshot).collect();
            pending.push((game_id, self.dispatch(GameRecord::new(self.id, game_id, snapshots))));
            clear_hands(players);

            if outcome.leftover_pot > 0 {
                target += 1;
                escalation = escalation.bombed(outcome.leftover_pot);
                info!(
                    "game {game_id} bombed with {} in the pot, playing {target} games",
                    outcome.leftover_pot
                );
            } else {
                if let Some(winner) = &outcome.winner {
                    info!("game {game_id} won by {winner}");
                }
                escalation = self.fresh_escalation(0, outcome.winner.clone());
            }
            games.push(outcome);
        }

        let persistence_failures = join_pending(pending).await;
        Ok(SetReport {
            set_id: self.id,
            games,
            target_games: target,
            balances: players.iter().map(Player::snapshot).collect(),
            persistence_failures,
        })
    }

    fn fresh_escalation(&self, pot: Chips, prev_winner: Option<PlayerId>) -> Escalation {
        Escalation {
            pot,
            step: self.config.step,
            ceiling: self.config.ceiling,
            prev_winner,
        }
    }

    fn dispatch(&self, record: GameRecord) -> JoinHandle<SinkResult<()>> {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move { sink.save_game(&record).await })
    }
}

fn clear_hands(players: &mut [Player]) {
    for player in players {
        player.clear_hand();
    }
}

/// Wait for every dispatched save, collecting the ones that failed.
async fn join_pending(pending: Vec<PendingSave>) -> Vec<PersistenceFailure> {
    let mut failures = Vec::new();
    for (game_id, handle) in pending {
        let message = match handle.await {
            Ok(Ok(())) => continue,
            Ok(Err(err)) => err.to_string(),
            Err(join_err) => format!("save task failed: {join_err}"),
        };
        warn!("couldn't save game {game_id}: {message}");
        failures.push(PersistenceFailure { game_id, message });
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::BidLadder;

    #[test]
    fn test_bomb_doubles_stakes_and_drops_winner() {
        let escalation = Escalation {
            pot: 0,
            step: 2,
            ceiling: 10,
            prev_winner: Some(PlayerId::new("p0")),
        };
        let next = escalation.bombed(40);
        assert_eq!((next.pot, next.step, next.ceiling), (40, 4, 20));
        assert_eq!(next.prev_winner, None);
    }

    #[test]
    fn test_bomb_stops_doubling_at_ceiling_limit() {
        let mut escalation = Escalation {
            pot: 0,
            step: 1,
            ceiling: 5,
            prev_winner: None,
        };
        for _ in 0..64 {
            escalation = escalation.bombed(1);
            assert!(escalation.ceiling <= MAX_CEILING);
            assert_eq!(escalation.ceiling, escalation.step * 5);
        }
        let ladder = BidLadder::new(escalation.step, escalation.ceiling, true);
        assert_eq!(ladder.max(), escalation.ceiling * 2);
    }
}
