//! Per-player bot registry answering every decision a game asks for.

use super::{
    decision::BotDecisionMaker,
    models::{BotDifficulty, BotKind, BotPlayer, BotStats, RandomBot, Strategy},
};
use crate::game::{
    entities::{BidLadder, Chips, Player, PlayerId},
    state_machine::DecisionProvider,
};
use log::{info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::BTreeMap;

/// Bots keyed by the player they act for.
///
/// Players without a registered bot fold everything, so a table can mix
/// bots with players that are expected to leave early.
#[derive(Debug)]
pub struct BotTable {
    bots: BTreeMap<PlayerId, BotKind>,
    next_bot_id: u64,
    /// Drives names and per-bot seeds. Seeded tables are reproducible.
    rng: StdRng,
}

impl BotTable {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            bots: BTreeMap::new(),
            next_bot_id: 1,
            rng,
        }
    }

    /// Register a bot for `id`, returning any bot it replaces.
    pub fn insert(&mut self, id: PlayerId, bot: BotKind) -> Option<BotKind> {
        self.bots.insert(id, bot)
    }

    #[must_use]
    pub fn get(&self, id: &PlayerId) -> Option<&BotKind> {
        self.bots.get(id)
    }

    #[must_use]
    pub fn bot_count(&self) -> usize {
        self.bots.len()
    }

    /// Create `count` heuristic bots and the players they act for.
    pub fn spawn_bots(
        &mut self,
        count: usize,
        difficulty: BotDifficulty,
        starting_chips: Chips,
    ) -> Vec<Player> {
        (0..count)
            .map(|_| {
                let decision_maker = BotDecisionMaker::from_seed(self.rng.random());
                let bot = BotPlayer::new(difficulty, decision_maker);
                self.spawn(bot.into(), starting_chips, &difficulty.to_string())
            })
            .collect()
    }

    /// Create `count` random bots and the players they act for.
    pub fn spawn_random_bots(
        &mut self,
        count: usize,
        stay_probability: f64,
        starting_chips: Chips,
    ) -> Vec<Player> {
        (0..count)
            .map(|_| {
                let bot = RandomBot::new(self.rng.random(), stay_probability);
                self.spawn(bot.into(), starting_chips, "random")
            })
            .collect()
    }

    fn spawn(&mut self, bot: BotKind, starting_chips: Chips, kind: &str) -> Player {
        let bot_id = self.next_bot_id;
        self.next_bot_id += 1;
        let player = Player::new(
            format!("bot-{bot_id}"),
            &self.generate_bot_name(bot_id),
            starting_chips,
        );
        info!("spawned {kind} bot {} as {}", player.id, player.name);
        self.bots.insert(player.id.clone(), bot);
        player
    }

    /// Statistics of every bot, ordered by player id.
    #[must_use]
    pub fn stats(&self) -> Vec<(&PlayerId, &BotStats)> {
        self.bots.iter().map(|(id, bot)| (id, bot.stats())).collect()
    }

    fn generate_bot_name(&mut self, bot_id: u64) -> String {
        const PREFIXES: [&str; 8] = [
            "Bomb", "Chip", "Card", "Pot", "Ante", "Joker", "Wild", "Stack",
        ];
        const SUFFIXES: [&str; 8] = [
            "Master", "Pro", "King", "Queen", "Ace", "Jack", "Shark", "Whale",
        ];

        let prefix = PREFIXES[self.rng.random_range(0..PREFIXES.len())];
        let suffix = SUFFIXES[self.rng.random_range(0..SUFFIXES.len())];
        format!("{prefix}{suffix}_{bot_id}")
    }
}

impl Default for BotTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionProvider for BotTable {
    fn call_once(&mut self, player: &Player, ladder: &BidLadder) -> Chips {
        match self.bots.get_mut(&player.id) {
            Some(bot) => bot.choose_call(player, ladder),
            None => {
                warn!("no bot for {}, folding the call", player.id);
                0
            }
        }
    }

    fn in_or_out(&mut self, player: &Player, to_match: Chips) -> bool {
        match self.bots.get_mut(&player.id) {
            Some(bot) => bot.choose_stay(player, to_match),
            None => {
                warn!("no bot for {}, folding", player.id);
                false
            }
        }
    }
}
