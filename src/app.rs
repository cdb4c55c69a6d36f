#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::info;
use std::time::Duration;

use crate::board::Board;
use crate::components::{ActivePiece, Command, GameState, PendingCommands, PieceType};
use crate::config::{Config, SimulationConfig};
use crate::snapshot::Snapshot;
use crate::systems::{active_piece, game_tick_system, input_system, spawn_piece};

/// A simulation session. Owns the world holding the board, the game state and the falling piece.
pub struct App {
    world: World,
    rules: SimulationConfig,
}

impl App {
    /// Session using the process-wide configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&Config::current().simulation)
    }

    #[must_use]
    pub fn with_config(rules: &SimulationConfig) -> Self {
        Self::build(rules, GameState::new(rules))
    }

    /// Session whose first two pieces are fixed. Later pieces are drawn as usual.
    #[must_use]
    pub fn with_queue(rules: &SimulationConfig, current: PieceType, next: PieceType) -> Self {
        let rng = match rules.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self::build(rules, GameState::with_queue(rules, rng, current, next))
    }

    fn build(rules: &SimulationConfig, game_state: GameState) -> Self {
        let mut world = World::new();
        world.insert_resource(Board::new());
        world.insert_resource(game_state);
        world.insert_resource(PendingCommands::default());

        let mut app = Self {
            world,
            rules: rules.clone(),
        };

        // Spawn initial piece
        spawn_piece(&mut app.world);

        app
    }

    /// Queues a command for the next tick.
    pub fn queue_command(&mut self, command: Command) {
        self.world.resource_mut::<PendingCommands>().push(command);
    }

    /// One simulation step: apply queued commands plus `commands` in order, then evaluate
    /// gravity once with `elapsed` time since the previous tick.
    pub fn tick<I>(&mut self, commands: I, elapsed: Duration)
    where
        I: IntoIterator<Item = Command>,
    {
        if self.rules.restart_on_game_over && self.state().is_game_over() {
            info!("Restarting after game over");
            self.reset();
        }

        {
            let mut pending = self.world.resource_mut::<PendingCommands>();
            for command in commands {
                pending.push(command);
            }
        }

        // A piece locked by a command already used up this tick
        if !input_system(&mut self.world) {
            game_tick_system(&mut self.world, elapsed);
        }
    }

    /// Full session reset: fresh board, zero score, new piece pair.
    pub fn reset(&mut self) {
        if let Some((entity, _)) = active_piece(&self.world) {
            self.world.despawn(entity);
        }

        let game_state = self.world.resource_mut::<GameState>().restarted();
        self.world.insert_resource(game_state);
        self.world.resource_mut::<Board>().reset();
        self.world.resource_mut::<PendingCommands>().clear();

        info!("Session reset");
        spawn_piece(&mut self.world);
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let piece = self.active_piece();
        Snapshot::capture(self.board(), self.state(), piece.as_ref())
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.world.resource::<Board>()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        self.world.resource::<GameState>()
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<ActivePiece> {
        active_piece(&self.world).map(|(_, piece)| piece)
    }

    #[must_use]
    pub fn rules(&self) -> &SimulationConfig {
        &self.rules
    }

    /// Mutable board access for building test positions.
    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> Mut<'_, Board> {
        self.world.resource_mut::<Board>()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
