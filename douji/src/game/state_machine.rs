//! Douji game state machine implementation.
//!
//! A game borrows the set's players for its whole lifetime and tracks the
//! still-active ones as an ordered list of seats. Folded players keep their
//! seat in the borrowed slice, so balances stay reachable for settlement
//! and snapshots.

use log::{Level, debug, error, info, log};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{
    constants::{
        DEFAULT_ANTE, DEFAULT_CEILING, DEFAULT_STEP, MIN_PLAYERS, ONE_HIDDEN_MAX_ROUND,
        TWO_HIDDEN_MAX_ROUND,
    },
    entities::{BidLadder, CardDealer, Chips, Player, PlayerId, SeatIndex},
    functional::HandEvaluation,
    states::{Bombing, InProcess, Over, Ready, WinReason},
};

/// Errors that abort a single game.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("deck is empty, can't deal anymore")]
    DeckExhausted,
    #[error("need 2+ players, found {found}")]
    InsufficientPlayers { found: usize },
    #[error("invalid game state: calling player not found")]
    CallingPlayerNotFound,
    #[error("illegal call of {amount}, expected one of: {ladder}")]
    IllegalCall { amount: Chips, ladder: BidLadder },
}

impl GameError {
    /// Whether the error was raised before anything was dealt or paid,
    /// leaving every balance untouched.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::InsufficientPlayers { .. })
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameStatus {
    Ready,
    InProcess,
    Bombing,
    Over,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Ready => "ready",
            Self::InProcess => "in process",
            Self::Bombing => "bombing",
            Self::Over => "over",
        };
        write!(f, "{repr}")
    }
}

/// Number of face-down cards each player receives at the deal.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HiddenCards {
    #[default]
    One,
    Two,
}

impl HiddenCards {
    #[must_use]
    pub const fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    #[must_use]
    pub const fn max_round(self) -> u8 {
        match self {
            Self::One => ONE_HIDDEN_MAX_ROUND,
            Self::Two => TWO_HIDDEN_MAX_ROUND,
        }
    }
}

impl TryFrom<u8> for HiddenCards {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(format!("hidden card count must be 1 or 2, got {other}")),
        }
    }
}

impl From<HiddenCards> for u8 {
    fn from(value: HiddenCards) -> Self {
        value.count()
    }
}

/// Per-game configuration handed down by the set.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameSettings {
    pub ante: Chips,
    pub hidden_cards: HiddenCards,
    /// Chips entering the game. A positive pot means the previous game
    /// bombed and nobody pays the ante.
    pub pot: Chips,
    pub step: Chips,
    pub ceiling: Chips,
    /// Log table status at info level instead of debug.
    pub verbose: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            ante: DEFAULT_ANTE,
            hidden_cards: HiddenCards::One,
            pot: 0,
            step: DEFAULT_STEP,
            ceiling: DEFAULT_CEILING,
            verbose: false,
        }
    }
}

/// How a finished game went, from the set's point of view.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameOutcome {
    pub winner: Option<PlayerId>,
    pub reason: Option<WinReason>,
    /// Zero unless the game bombed.
    pub leftover_pot: Chips,
    pub status: GameStatus,
}

/// Source of player decisions. Implementations are expected to return
/// legal answers; an amount off the ladder aborts the game.
pub trait DecisionProvider {
    /// Amount the calling player puts up. Zero folds.
    fn call_once(&mut self, player: &Player, ladder: &BidLadder) -> Chips;

    /// Whether `player` matches `to_match` (true) or folds (false).
    fn in_or_out(&mut self, player: &Player, to_match: Chips) -> bool;
}

/// Ties each game state to the status it reports.
pub trait Phase {
    const STATUS: GameStatus;
}

impl Phase for Ready {
    const STATUS: GameStatus = GameStatus::Ready;
}

impl Phase for InProcess {
    const STATUS: GameStatus = GameStatus::InProcess;
}

impl Phase for Over {
    const STATUS: GameStatus = GameStatus::Over;
}

impl Phase for Bombing {
    const STATUS: GameStatus = GameStatus::Bombing;
}

/// Mutable game data shared across all states.
#[derive(Debug)]
pub struct GameData<'a> {
    players: &'a mut [Player],
    /// Seats still in the game, in asking order. Only ever shrinks.
    active: Vec<SeatIndex>,
    settings: GameSettings,
    pot: Chips,
    /// Only consulted for the first call of a two-hidden game, and at
    /// most once.
    prev_winner: Option<PlayerId>,
}

/// A single douji game, from antes to settlement.
#[derive(Debug)]
pub struct Game<'a, T> {
    pub data: GameData<'a>,
    pub state: T,
}

/// A game that reached one of its two terminal states.
#[derive(Debug)]
pub enum Finished<'a> {
    Over(Game<'a, Over>),
    Bombing(Game<'a, Bombing>),
}

impl<T: Phase> Game<'_, T> {
    #[must_use]
    pub fn status(&self) -> GameStatus {
        T::STATUS
    }
}

impl<'a, T> Game<'a, T> {
    #[must_use]
    pub fn pot(&self) -> Chips {
        self.data.pot
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.data.settings
    }

    /// All seated players, including those who folded.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.data.players
    }

    #[must_use]
    pub fn active_seats(&self) -> &[SeatIndex] {
        &self.data.active
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.data.active.iter().map(|&seat| &self.data.players[seat])
    }

    fn with_state<U>(self, state: U) -> Game<'a, U> {
        Game {
            data: self.data,
            state,
        }
    }

    fn status_level(&self) -> Level {
        if self.data.settings.verbose {
            Level::Info
        } else {
            Level::Debug
        }
    }

    fn position_of(&self, seat: SeatIndex) -> Result<usize, GameError> {
        self.data
            .active
            .iter()
            .position(|&s| s == seat)
            .ok_or(GameError::CallingPlayerNotFound)
    }

    /// Active seats after `position` followed by those before it.
    fn asking_order(&self, position: usize) -> Vec<SeatIndex> {
        let (before, after) = self.data.active.split_at(position);
        after.iter().skip(1).chain(before.iter()).copied().collect()
    }

    fn pay_into_pot(&mut self, seat: SeatIndex, amount: Chips) {
        self.data.players[seat].chips -= amount;
        self.data.pot += amount;
    }

    fn award(mut self, seat: SeatIndex, reason: WinReason) -> Game<'a, Over> {
        let pot = self.data.pot;
        self.data.players[seat].chips += pot;
        self.data.pot = 0;
        let winner = &self.data.players[seat];
        info!("{} wins {pot} ({reason})", winner.name);
        self.with_state(Over {
            winner: seat,
            reason,
        })
    }
}

impl<'a> Game<'a, Ready> {
    #[must_use]
    pub fn new(
        players: &'a mut [Player],
        settings: GameSettings,
        prev_winner: Option<PlayerId>,
    ) -> Self {
        let active = (0..players.len()).collect();
        let pot = settings.pot;
        Self {
            data: GameData {
                players,
                active,
                settings,
                pot,
                prev_winner,
            },
            state: Ready {},
        }
    }

    /// Collect antes (unless a carried pot is present) and deal the
    /// opening cards.
    ///
    /// # Errors
    ///
    /// - [`GameError::InsufficientPlayers`] with fewer than two players,
    ///   before any chips move.
    /// - [`GameError::DeckExhausted`] if the dealer runs dry.
    pub fn start<D: CardDealer + ?Sized>(
        mut self,
        dealer: &mut D,
    ) -> Result<Game<'a, InProcess>, GameError> {
        let found = self.data.active.len();
        if found < MIN_PLAYERS {
            return Err(GameError::InsufficientPlayers { found });
        }

        if self.data.pot > 0 {
            debug!("carrying a pot of {}, no antes", self.data.pot);
        } else {
            let ante = self.data.settings.ante;
            for seat in self.data.active.clone() {
                self.pay_into_pot(seat, ante);
            }
        }

        for seat in self.data.active.clone() {
            let card = dealer.deal_one()?;
            self.data.players[seat].receive_hidden(card);
        }
        let two_hidden = self.data.settings.hidden_cards == HiddenCards::Two;
        for seat in self.data.active.clone() {
            let card = dealer.deal_one()?;
            let player = &mut self.data.players[seat];
            if two_hidden {
                player.receive_hidden(card);
            } else {
                player.receive_revealed(card);
            }
        }

        let game = self.with_state(InProcess { round: 0 });
        game.log_status();
        Ok(game)
    }

    /// Start the game and play it to the end.
    ///
    /// # Errors
    ///
    /// Any [`GameError`] from [`Game::start`] or [`Game::play`].
    pub fn run<D, P>(self, dealer: &mut D, decider: &mut P) -> Result<GameOutcome, GameError>
    where
        D: CardDealer + ?Sized,
        P: DecisionProvider + ?Sized,
    {
        let finished = self.start(dealer)?.play(dealer, decider)?;
        Ok(finished.outcome())
    }
}

impl<'a> Game<'a, InProcess> {
    /// Play every round, then settle.
    ///
    /// # Errors
    ///
    /// - [`GameError::CallingPlayerNotFound`] if nobody can open a round.
    /// - [`GameError::IllegalCall`] if the decider answers off the ladder.
    /// - [`GameError::DeckExhausted`] if the dealer runs dry.
    pub fn play<D, P>(mut self, dealer: &mut D, decider: &mut P) -> Result<Finished<'a>, GameError>
    where
        D: CardDealer + ?Sized,
        P: DecisionProvider + ?Sized,
    {
        let max_round = self.data.settings.hidden_cards.max_round();
        for round in 1..=max_round {
            self.state.round = round;
            let ladder = BidLadder::new(
                self.data.settings.step,
                self.data.settings.ceiling,
                round == max_round,
            );

            let mut caller = self.calling_player(round == 1)?;
            let mut call = self.solicit_call(caller, &ladder, decider)?;
            while call == 0 {
                self.fold_caller(caller)?;
                if let Some(survivor) = self.sole_survivor() {
                    return Ok(Finished::Over(
                        self.award(survivor, WinReason::SoleSurvivor),
                    ));
                }
                caller = self.calling_player(round == 1)?;
                call = self.solicit_call(caller, &ladder, decider)?;
            }

            self.collect_matches(caller, call, decider)?;
            if let Some(survivor) = self.sole_survivor() {
                return Ok(Finished::Over(
                    self.award(survivor, WinReason::SoleSurvivor),
                ));
            }

            if round < max_round {
                for seat in self.data.active.clone() {
                    let card = dealer.deal_one()?;
                    self.data.players[seat].receive_revealed(card);
                }
            }
            self.log_status();
        }
        self.settle()
    }

    /// Seat that opens the bidding.
    ///
    /// With one hidden card, the strictly highest face score calls and the
    /// earlier position wins ties. With two hidden cards nothing is showing
    /// in round one, so the previous game's winner (or else the first
    /// active player) calls instead.
    fn calling_player(&mut self, first_round: bool) -> Result<SeatIndex, GameError> {
        if first_round && self.data.settings.hidden_cards == HiddenCards::Two {
            return match self.data.prev_winner.take() {
                Some(id) => self
                    .data
                    .active
                    .iter()
                    .copied()
                    .find(|&seat| self.data.players[seat].id == id)
                    .ok_or_else(|| {
                        error!("previous winner {id} is not at the table");
                        GameError::CallingPlayerNotFound
                    }),
                None => self
                    .data
                    .active
                    .first()
                    .copied()
                    .ok_or(GameError::CallingPlayerNotFound),
            };
        }

        let mut best: Option<(SeatIndex, u8)> = None;
        for &seat in &self.data.active {
            let face = self.data.players[seat].face_score();
            if face > best.map_or(0, |(_, score)| score) {
                best = Some((seat, face));
            }
        }
        best.map(|(seat, _)| seat)
            .ok_or(GameError::CallingPlayerNotFound)
    }

    fn solicit_call<P: DecisionProvider + ?Sized>(
        &self,
        caller: SeatIndex,
        ladder: &BidLadder,
        decider: &mut P,
    ) -> Result<Chips, GameError> {
        let player = &self.data.players[caller];
        let amount = decider.call_once(player, ladder);
        if !ladder.contains(amount) {
            return Err(GameError::IllegalCall {
                amount,
                ladder: *ladder,
            });
        }
        debug!("{} calls {amount}", player.name);
        Ok(amount)
    }

    /// Drop the caller and restart the order right after them.
    fn fold_caller(&mut self, caller: SeatIndex) -> Result<(), GameError> {
        let position = self.position_of(caller)?;
        debug!("{} folds the call", self.data.players[caller].name);
        self.data.active = self.asking_order(position);
        Ok(())
    }

    /// The caller pays, then everyone else pays the same or folds.
    fn collect_matches<P: DecisionProvider + ?Sized>(
        &mut self,
        caller: SeatIndex,
        call: Chips,
        decider: &mut P,
    ) -> Result<(), GameError> {
        let position = self.position_of(caller)?;
        self.pay_into_pot(caller, call);
        let mut staying = vec![caller];
        for seat in self.asking_order(position) {
            if decider.in_or_out(&self.data.players[seat], call) {
                self.pay_into_pot(seat, call);
                staying.push(seat);
            } else {
                debug!("{} folds", self.data.players[seat].name);
            }
        }
        self.data.active = staying;
        Ok(())
    }

    fn sole_survivor(&self) -> Option<SeatIndex> {
        match self.data.active.as_slice() {
            [seat] => Some(*seat),
            _ => None,
        }
    }

    /// Compare final hands of everyone left after the last round.
    fn settle(self) -> Result<Finished<'a>, GameError> {
        let mut ranked: Vec<(SeatIndex, HandEvaluation)> = self
            .data
            .active
            .iter()
            .map(|&seat| (seat, self.data.players[seat].final_eval()))
            .collect();

        let quads: Vec<SeatIndex> = ranked
            .iter()
            .filter(|(_, evaluation)| evaluation.four_of_a_kind)
            .map(|(seat, _)| *seat)
            .collect();
        if let [holder] = quads.as_slice() {
            return Ok(Finished::Over(self.award(*holder, WinReason::FourOfAKind)));
        }

        ranked.sort_by(|(_, a), (_, b)| b.score.cmp(&a.score));
        match ranked.as_slice() {
            [(_, first), (_, second), ..] if first.score == second.score => {
                let top = first.score;
                let tied = ranked
                    .iter()
                    .take_while(|(_, evaluation)| evaluation.score == top)
                    .map(|(seat, _)| *seat)
                    .collect();
                info!("tie at {top}, {} chips stay in the pot", self.data.pot);
                Ok(Finished::Bombing(self.with_state(Bombing { tied })))
            }
            [(seat, _), ..] => Ok(Finished::Over(self.award(*seat, WinReason::HighestScore))),
            [] => Err(GameError::InsufficientPlayers { found: 0 }),
        }
    }

    fn log_status(&self) {
        let level = self.status_level();
        if !log::log_enabled!(level) {
            return;
        }
        log!(
            level,
            "round {} | pot {} | step {} | ceiling {}",
            self.state.round,
            self.data.pot,
            self.data.settings.step,
            self.data.settings.ceiling,
        );
        for player in self.active_players() {
            log!(level, "  {player}");
        }
    }
}

impl Finished<'_> {
    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self {
            Self::Over(game) => game.status(),
            Self::Bombing(game) => game.status(),
        }
    }

    #[must_use]
    pub fn pot(&self) -> Chips {
        match self {
            Self::Over(game) => game.pot(),
            Self::Bombing(game) => game.pot(),
        }
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        match self {
            Self::Over(game) => game.players(),
            Self::Bombing(game) => game.players(),
        }
    }

    #[must_use]
    pub fn outcome(&self) -> GameOutcome {
        match self {
            Self::Over(game) => GameOutcome {
                winner: Some(game.data.players[game.state.winner].id.clone()),
                reason: Some(game.state.reason),
                leftover_pot: game.data.pot,
                status: GameStatus::Over,
            },
            Self::Bombing(game) => GameOutcome {
                winner: None,
                reason: None,
                leftover_pot: game.data.pot,
                status: GameStatus::Bombing,
            },
        }
    }
}
