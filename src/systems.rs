use bevy_ecs::prelude::*;
use log::{debug, info, trace};
use std::time::Duration;

use crate::board::Board;
use crate::components::{ActivePiece, Command, GameState, PendingCommands, Phase};

/// Turns the queued type into the falling piece at the spawn anchor.
///
/// Any commands still queued were aimed at the previous piece and are dropped. If the
/// spawn anchor is already blocked the session tops out instead.
pub fn spawn_piece(world: &mut World) {
    world.resource_mut::<PendingCommands>().clear();

    let piece = {
        let mut game_state = world.resource_mut::<GameState>();
        let piece_type = game_state.advance_queue();
        game_state.gravity_timer = Duration::ZERO;
        ActivePiece::spawn(piece_type)
    };

    let blocked = world
        .resource::<Board>()
        .collides(&piece.shape, piece.row, piece.col);
    if blocked {
        let mut game_state = world.resource_mut::<GameState>();
        info!(
            "Spawn area blocked for {:?}, game over with score {}",
            piece.piece_type, game_state.score
        );
        game_state.active_piece = None;
        game_state.phase = Phase::GameOver;
        return;
    }

    let entity = world.spawn(piece).id();
    let mut game_state = world.resource_mut::<GameState>();
    game_state.active_piece = Some(entity);
    game_state.phase = Phase::Falling;
    debug!(
        "Spawned {:?} at ({}, {}), next is {:?}",
        piece.piece_type, piece.row, piece.col, game_state.next_type
    );
}

/// The falling piece and its entity, if one exists.
#[must_use]
pub fn active_piece(world: &World) -> Option<(Entity, ActivePiece)> {
    let entity = world.resource::<GameState>().active_piece?;
    world.get::<ActivePiece>(entity).map(|piece| (entity, *piece))
}

// Moves the piece when the target is free; returns whether it moved
fn try_shift(
    world: &mut World,
    entity: Entity,
    piece: ActivePiece,
    d_row: i32,
    d_col: i32,
) -> bool {
    let candidate = piece.shifted(d_row, d_col);
    let blocked = world
        .resource::<Board>()
        .collides(&candidate.shape, candidate.row, candidate.col);
    if !blocked {
        world.entity_mut(entity).insert(candidate);
    }
    !blocked
}

// Rotation is speculative: the turned shape is committed only if it fits in place
fn try_rotate(world: &mut World, entity: Entity, piece: ActivePiece) -> bool {
    if !piece.piece_type.rotates() {
        return false;
    }
    let candidate = piece.with_shape(piece.shape.rotated());
    let blocked = world
        .resource::<Board>()
        .collides(&candidate.shape, candidate.row, candidate.col);
    if !blocked {
        world.entity_mut(entity).insert(candidate);
    }
    !blocked
}

fn hard_drop(world: &mut World, entity: Entity, piece: ActivePiece) {
    let landed = {
        let board = world.resource::<Board>();
        let mut landed = piece;
        loop {
            let next = landed.shifted(1, 0);
            if board.collides(&next.shape, next.row, next.col) {
                break;
            }
            landed = next;
        }
        landed
    };
    debug!(
        "Hard drop of {:?} by {} rows",
        piece.piece_type,
        landed.row - piece.row
    );
    lock_piece(world, entity, landed);
}

/// Applies one command to the falling piece. Returns true when it caused a lock.
pub fn apply_command(world: &mut World, command: Command) -> bool {
    let Some((entity, piece)) = active_piece(world) else {
        return false;
    };

    let accepted = match command {
        Command::MoveLeft => try_shift(world, entity, piece, 0, -1),
        Command::MoveRight => try_shift(world, entity, piece, 0, 1),
        Command::SoftDropStep => try_shift(world, entity, piece, 1, 0),
        Command::Rotate => try_rotate(world, entity, piece),
        Command::HardDrop => {
            hard_drop(world, entity, piece);
            return true;
        }
    };

    if accepted {
        debug!("Applied {command:?}");
    } else {
        debug!("Ignored {command:?}, piece is blocked");
    }
    false
}

/// Drains the pending commands in order. Returns true if one of them locked the piece.
pub fn input_system(world: &mut World) -> bool {
    let mut locked = false;

    loop {
        let Some(command) = world.resource_mut::<PendingCommands>().pop() else {
            break;
        };
        let phase = world.resource::<GameState>().phase;
        if phase != Phase::Falling {
            debug!("Ignoring {command:?} while {phase:?}");
            continue;
        }
        locked |= apply_command(world, command);
    }

    locked
}

/// Advances the gravity clock by `delta` and performs at most one automatic descent.
pub fn game_tick_system(world: &mut World, delta: Duration) {
    let phase = world.resource::<GameState>().phase;
    match phase {
        Phase::GameOver => return,
        Phase::Spawning => spawn_piece(world),
        Phase::Falling | Phase::Locking => {}
    }

    let Some((entity, piece)) = active_piece(world) else {
        return;
    };

    let should_drop = {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.gravity_timer = game_state.gravity_timer.saturating_add(delta);
        trace!(
            "Gravity timer: {:?}, interval: {:?}",
            game_state.gravity_timer, game_state.gravity_interval
        );
        game_state.gravity_timer >= game_state.gravity_interval
    };

    if !should_drop {
        return;
    }

    if try_shift(world, entity, piece, 1, 0) {
        trace!("Gravity moved {:?} to row {}", piece.piece_type, piece.row + 1);
        world.resource_mut::<GameState>().gravity_timer = Duration::ZERO;
    } else {
        lock_piece(world, entity, piece);
    }
}

/// Merges the piece into the board, clears rows, checks for game over and spawns the next piece.
pub fn lock_piece(world: &mut World, entity: Entity, piece: ActivePiece) {
    info!(
        "Locking {:?} at ({}, {})",
        piece.piece_type, piece.row, piece.col
    );

    world.despawn(entity);
    {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.active_piece = None;
        game_state.phase = Phase::Locking;
    }

    let (rows_cleared, is_over) = {
        let mut board = world.resource_mut::<Board>();
        board.merge(&piece.shape, piece.row, piece.col);
        let rows_cleared = board.clear_full_rows(piece.row);
        (rows_cleared, board.is_over())
    };

    {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.pieces_locked += 1;
        game_state.award_lines(rows_cleared);

        if is_over {
            info!("Stack reached the spawn row, game over with score {}", game_state.score);
            game_state.phase = Phase::GameOver;
            return;
        }
        game_state.phase = Phase::Spawning;
    }

    spawn_piece(world);
}
