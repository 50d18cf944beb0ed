//! Turn controller.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::history::{TurnKind, TurnRecord};
use crate::board::{TileGraph, TileId};
use crate::core::{GameError, GameRng, Player, PlayerId, Result, RollSource};
use crate::dice::Die;
use crate::observers::{GameObserver, ObserverId, ObserverList};

/// Fewest players a game can be started with.
pub const MIN_PLAYERS: usize = 2;

/// Lifecycle of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Constructed, not yet started.
    Setup,
    /// Turns are being played.
    InProgress,
    /// A winner has been recorded. Absorbing.
    Finished,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::Setup => "setup",
            GameStatus::InProgress => "in progress",
            GameStatus::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// How players get onto the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryRule {
    /// Everyone may move from the first turn.
    #[default]
    Immediate,
    /// A player must pass a turn-marker roll before their first move. The
    /// entry roll uses up the turn whether or not it succeeds.
    TurnMarker,
}

/// The turn controller shared by both game variants.
///
/// Owns the board, the players (turn order fixed at construction), the die
/// and the current-turn pointer. Each [`GameEngine::play_turn`] runs the
/// whole roll, move, check-win, advance cycle synchronously and notifies the
/// registered [`GameObserver`]s along the way.
///
/// ## Example
///
/// ```
/// use ladder_games::board::TileGraph;
/// use ladder_games::core::{Player, PlayerColor, PlayerId};
/// use ladder_games::engine::{GameEngine, GameStatus};
///
/// let players = vec![
///     Player::new(PlayerId::new(0), "Ada", PlayerColor::Red).unwrap(),
///     Player::new(PlayerId::new(1), "Bo", PlayerColor::Blue).unwrap(),
/// ];
/// let mut game = GameEngine::new(TileGraph::linear(10), players).unwrap();
/// game.start().unwrap();
///
/// while !game.is_finished() {
///     game.play_turn().unwrap();
/// }
/// assert_eq!(game.status(), GameStatus::Finished);
/// assert!(game.winner().is_some());
/// ```
#[derive(Debug)]
pub struct GameEngine<R: RollSource = GameRng> {
    board: TileGraph,
    players: Vec<Player>,
    die: Die<R>,
    entry_rule: EntryRule,
    current: usize,
    status: GameStatus,
    winner: Option<usize>,
    history: Vec<TurnRecord>,
    observers: ObserverList<dyn GameObserver>,
}

impl GameEngine<GameRng> {
    /// Create a game in `Setup` with an entropy-seeded die.
    pub fn new(board: TileGraph, players: Vec<Player>) -> Result<Self> {
        Self::with_die(board, players, Die::new(GameRng::from_entropy()))
    }

    /// Create a game in `Setup` whose die is seeded with `seed`.
    pub fn with_seed(board: TileGraph, players: Vec<Player>, seed: u64) -> Result<Self> {
        Self::with_die(board, players, Die::new(GameRng::new(seed)))
    }
}

impl<R: RollSource> GameEngine<R> {
    /// Create a game in `Setup` using the given die.
    ///
    /// Every player is moved to the start tile. Fails with `InvalidArgument`
    /// if two players share an id.
    pub fn with_die(board: TileGraph, mut players: Vec<Player>, die: Die<R>) -> Result<Self> {
        let mut seen = FxHashSet::default();
        for player in &players {
            if !seen.insert(player.id()) {
                return Err(GameError::invalid_argument(format!(
                    "{} appears more than once",
                    player.id()
                )));
            }
        }
        for player in &mut players {
            player.reset();
        }

        Ok(Self {
            board,
            players,
            die,
            entry_rule: EntryRule::default(),
            current: 0,
            status: GameStatus::Setup,
            winner: None,
            history: Vec::new(),
            observers: ObserverList::new(),
        })
    }

    /// Set the entry rule (builder pattern).
    ///
    /// Fails with `InvalidState` once the game has been started, since
    /// [`GameEngine::start`] already applied the previous rule.
    pub fn with_entry_rule(mut self, rule: EntryRule) -> Result<Self> {
        if self.status != GameStatus::Setup {
            return Err(GameError::invalid_state(format!(
                "cannot change the entry rule of a game that is {}",
                self.status
            )));
        }
        self.entry_rule = rule;
        Ok(self)
    }

    // === Lifecycle ===

    /// Move from `Setup` to `InProgress`.
    ///
    /// Fails with `InvalidState` if the game was already started, if there
    /// are fewer than two players, or if the board has no tiles.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<()> {
        if self.status != GameStatus::Setup {
            return Err(GameError::invalid_state(format!(
                "cannot start a game that is {}",
                self.status
            )));
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::invalid_state(format!(
                "need at least {MIN_PLAYERS} players, have {}",
                self.players.len()
            )));
        }
        if self.board.is_empty() {
            return Err(GameError::invalid_state("cannot start on an empty board"));
        }

        if self.entry_rule == EntryRule::Immediate {
            for player in &mut self.players {
                player.enter();
            }
        }
        self.status = GameStatus::InProgress;
        info!(
            players = self.players.len(),
            tiles = self.board.len(),
            entry = ?self.entry_rule,
            "game started"
        );
        Ok(())
    }

    /// Play one turn for the current player.
    ///
    /// Rolls, moves, and then either finishes the game or passes the turn.
    /// Observers see `on_die_rolled`, `on_player_moved`, then
    /// `on_game_ended` or `on_turn_changed`. A player who still has to enter
    /// the board only makes a turn-marker roll (no `on_player_moved`).
    ///
    /// ## Errors
    ///
    /// - `InvalidState` before [`GameEngine::start`] or after the game ended
    /// - `Observer` if a sink fails; the roll and move stay applied and the
    ///   turn pointer is only advanced if `on_turn_changed` was reached
    #[instrument(skip(self), fields(turn = self.history.len() + 1))]
    pub fn play_turn(&mut self) -> Result<TurnRecord> {
        match self.status {
            GameStatus::Setup => return Err(GameError::invalid_state("game has not been started")),
            GameStatus::Finished => return Err(GameError::invalid_state("game is already finished")),
            GameStatus::InProgress => {}
        }

        let seat = self.current;
        if self.entry_rule == EntryRule::TurnMarker && !self.players[seat].is_entered() {
            self.play_entry(seat)
        } else {
            self.play_move(seat)
        }
    }

    fn play_entry(&mut self, seat: usize) -> Result<TurnRecord> {
        let entered = self.die.roll_to_turn_marker()?;
        let value = self.die.value();
        if entered {
            self.players[seat].enter();
        }
        let tile = self.players[seat].tile();
        let record = self.record(seat, value, tile, tile, TurnKind::Entry { entered });

        let player = &self.players[seat];
        debug!(player = %player, value, entered, "entry roll");
        self.observers.notify(|o| o.on_die_rolled(player, value))?;

        self.pass_turn()?;
        Ok(record)
    }

    fn play_move(&mut self, seat: usize) -> Result<TurnRecord> {
        let roll = self.die.roll_die()?;
        let (from, to) = self.players[seat].advance(roll, &self.board)?;

        let won = self.board.is_terminal(to);
        if won {
            self.status = GameStatus::Finished;
            self.winner = Some(seat);
        }
        let kind = if won { TurnKind::Win } else { TurnKind::Move };
        let record = self.record(seat, roll, from, to, kind);

        let player = &self.players[seat];
        debug!(player = %player, roll, %from, %to, "player moved");
        self.observers.notify(|o| o.on_die_rolled(player, roll))?;
        self.observers.notify(|o| o.on_player_moved(player, from, to))?;

        if won {
            info!(winner = %player, turns = self.history.len(), "game finished");
            self.observers.notify(|o| o.on_game_ended(player))?;
        } else {
            self.pass_turn()?;
        }
        Ok(record)
    }

    fn record(&mut self, seat: usize, roll: u8, from: TileId, to: TileId, kind: TurnKind) -> TurnRecord {
        let record = TurnRecord {
            turn: self.history.len() as u32 + 1,
            player: self.players[seat].id(),
            roll,
            from,
            to,
            kind,
        };
        self.history.push(record.clone());
        record
    }

    fn pass_turn(&mut self) -> Result<()> {
        self.current = (self.current + 1) % self.players.len();
        let next = &self.players[self.current];
        debug!(next = %next, "turn changed");
        self.observers.notify(|o| o.on_turn_changed(next))
    }

    // === Observers ===

    /// Register a sink for turn events. Notification follows registration
    /// order; the engine only holds a weak reference.
    pub fn add_observer<O: GameObserver + 'static>(&mut self, observer: &Rc<RefCell<O>>) -> ObserverId {
        let observer: Rc<RefCell<dyn GameObserver>> = observer.clone();
        self.observers.register(Rc::downgrade(&observer))
    }

    /// Unregister a sink. Unknown handles are ignored.
    pub fn remove_observer(&mut self, id: ObserverId) {
        self.observers.unregister(id);
    }

    // === Inspection ===

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// The winner, once the game is finished.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|seat| &self.players[seat])
    }

    /// The player whose turn it is. `None` only for a game with no players.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn board(&self) -> &TileGraph {
        &self.board
    }

    #[must_use]
    pub fn die(&self) -> &Die<R> {
        &self.die
    }

    /// Mutable die access, e.g. to force the next roll with
    /// [`Die::set_value`] or to attach a die observer.
    pub fn die_mut(&mut self) -> &mut Die<R> {
        &mut self.die
    }

    #[must_use]
    pub fn entry_rule(&self) -> EntryRule {
        self.entry_rule
    }

    /// Completed turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Number of completed turns.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.history.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerColor, ScriptedRolls};

    fn players(n: u8) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(PlayerId::new(i), format!("P{i}"), PlayerColor::for_seat(i as usize)).unwrap())
            .collect()
    }

    fn scripted(board: TileGraph, n: u8, rolls: &[u8]) -> GameEngine<ScriptedRolls> {
        GameEngine::with_die(board, players(n), Die::new(ScriptedRolls::new(rolls.iter().copied()))).unwrap()
    }

    #[test]
    fn test_starts_in_setup() {
        let game = GameEngine::with_seed(TileGraph::linear(10), players(2), 1).unwrap();
        assert_eq!(game.status(), GameStatus::Setup);
        assert!(!game.is_finished());
        assert!(game.winner().is_none());
        assert_eq!(game.current_player().map(Player::id), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_play_before_start_fails() {
        let mut game = scripted(TileGraph::linear(10), 2, &[1]);
        assert!(matches!(game.play_turn(), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_start_requires_two_players() {
        let mut game = scripted(TileGraph::linear(10), 1, &[1]);
        assert!(matches!(game.start(), Err(GameError::InvalidState(_))));
        assert_eq!(game.status(), GameStatus::Setup);
    }

    #[test]
    fn test_start_requires_tiles() {
        let mut game = scripted(TileGraph::linear(0), 2, &[1]);
        assert!(matches!(game.start(), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_start_twice_fails() {
        let mut game = scripted(TileGraph::linear(10), 2, &[1]);
        game.start().unwrap();
        assert!(matches!(game.start(), Err(GameError::InvalidState(_))));
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut dup = players(2);
        dup.push(Player::new(PlayerId::new(1), "Again", PlayerColor::White).unwrap());
        let err = GameEngine::with_seed(TileGraph::linear(10), dup, 1).unwrap_err();
        assert!(matches!(err, GameError::InvalidArgument(_)));
    }

    #[test]
    fn test_round_robin() {
        let mut game = scripted(TileGraph::linear(100), 3, &[1]);
        game.start().unwrap();

        let order: Vec<PlayerId> = (0..6).map(|_| game.play_turn().unwrap().player).collect();
        assert_eq!(
            order,
            [0, 1, 2, 0, 1, 2].map(PlayerId::new).to_vec()
        );
        assert_eq!(game.current_player().map(Player::id), Some(PlayerId::new(0)));
        assert_eq!(game.turn_number(), 6);
    }

    #[test]
    fn test_win_is_absorbing() {
        let mut game = scripted(TileGraph::linear(4), 2, &[3]);
        game.start().unwrap();

        let record = game.play_turn().unwrap();
        assert_eq!(record.kind, TurnKind::Win);
        assert!(game.is_finished());
        assert_eq!(game.winner().map(Player::id), Some(PlayerId::new(0)));
        assert!(matches!(game.play_turn(), Err(GameError::InvalidState(_))));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_turn_marker_entry() {
        // marker rolls: 3 (fail), 5 (pass); then P0 enters on 6, P1 moves on 2
        let mut game = scripted(TileGraph::linear(30), 2, &[3, 5, 6, 2])
            .with_entry_rule(EntryRule::TurnMarker)
            .unwrap();
        game.start().unwrap();

        let first = game.play_turn().unwrap();
        assert_eq!(first.kind, TurnKind::Entry { entered: false });
        assert_eq!(first.roll, 3);

        let second = game.play_turn().unwrap();
        assert_eq!(second.kind, TurnKind::Entry { entered: true });
        assert!(game.players()[1].is_entered());
        assert!(!game.players()[0].is_entered());

        let third = game.play_turn().unwrap();
        assert_eq!(third.kind, TurnKind::Entry { entered: true });
        assert_eq!(game.players()[0].tile(), TileId::START);

        let fourth = game.play_turn().unwrap();
        assert_eq!(fourth.kind, TurnKind::Move);
        assert_eq!((fourth.from, fourth.to), (TileId::new(0), TileId::new(2)));
    }

    #[test]
    fn test_entry_rule_fixed_after_start() {
        let mut game = scripted(TileGraph::linear(10), 2, &[1]);
        game.start().unwrap();
        let err = game.with_entry_rule(EntryRule::TurnMarker).unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
    }

    #[test]
    fn test_forced_value_spent_on_entry_turn() {
        let mut game = scripted(TileGraph::linear(30), 2, &[4, 4, 5, 5])
            .with_entry_rule(EntryRule::TurnMarker)
            .unwrap();
        game.start().unwrap();

        // 2 cannot pass the marker, so it is dropped instead of lingering.
        game.die_mut().set_value(2).unwrap();
        let entry = game.play_turn().unwrap();
        assert_eq!(entry.kind, TurnKind::Entry { entered: true });
        assert_eq!(entry.roll, 4);
        assert_eq!(game.die().value(), 4);

        game.play_turn().unwrap();
        let first_move = game.play_turn().unwrap();
        assert_eq!(first_move.player, PlayerId::new(0));
        assert_eq!(first_move.roll, 5);

        // A forced value inside the marker range decides the entry roll.
        let mut game = scripted(TileGraph::linear(30), 2, &[3])
            .with_entry_rule(EntryRule::TurnMarker)
            .unwrap();
        game.start().unwrap();
        game.die_mut().set_value(6).unwrap();
        assert_eq!(game.play_turn().unwrap().kind, TurnKind::Entry { entered: true });
        assert_eq!(game.play_turn().unwrap().kind, TurnKind::Entry { entered: false });
    }

    #[test]
    fn test_immediate_rule_enters_everyone() {
        let mut game = scripted(TileGraph::linear(10), 3, &[1]);
        game.start().unwrap();
        assert!(game.players().iter().all(Player::is_entered));
    }

    #[test]
    fn test_players_reset_to_start() {
        let board = TileGraph::linear(10);
        let mut moved = players(2);
        moved[0].advance(4, &board).unwrap();

        let game = GameEngine::with_seed(board, moved, 5).unwrap();
        assert!(game.players().iter().all(|p| p.tile() == TileId::START));
    }

    #[test]
    fn test_forced_roll() {
        let mut game = GameEngine::with_seed(TileGraph::linear(20), players(2), 99).unwrap();
        game.start().unwrap();
        game.die_mut().set_value(4).unwrap();

        let record = game.play_turn().unwrap();
        assert_eq!(record.roll, 4);
        assert_eq!(game.player(PlayerId::new(0)).map(Player::tile), Some(TileId::new(4)));
    }
}
