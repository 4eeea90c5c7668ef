//! Overworld walk between encounters.
//!
//! A small fixed grid, not a tile engine: the player moves one cell per key
//! press, a few cells block movement, and invisible encounter zones start a
//! battle when stepped on. A triggered zone relocates so the same spot does
//! not chain encounters, mirroring the reference behavior.

use battle_core::{PcgRng, RngOracle};

pub const WORLD_WIDTH: i32 = 24;
pub const WORLD_HEIGHT: i32 = 12;

const ENCOUNTER_ZONES: usize = 8;

/// Grid cell position in the overworld.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Cardinal walking direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// What a single step produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Blocked,
    /// The player stepped onto an encounter zone; a battle begins.
    Encounter,
}

/// Overworld state: player position, blocking cells, encounter zones.
#[derive(Clone, Debug)]
pub struct World {
    player: Position,
    obstacles: Vec<Position>,
    zones: Vec<Position>,
    rng: PcgRng,
    seed: u64,
    roll_nonce: u64,
}

impl World {
    pub fn new(seed: u64) -> Self {
        let obstacles = vec![
            Position::new(6, 3),
            Position::new(6, 4),
            Position::new(6, 5),
            Position::new(14, 7),
            Position::new(15, 7),
            Position::new(16, 7),
            Position::new(10, 2),
            Position::new(18, 4),
        ];

        let mut world = Self {
            player: Position::new(2, 6),
            obstacles,
            zones: Vec::new(),
            rng: PcgRng,
            seed,
            roll_nonce: 0,
        };
        for _ in 0..ENCOUNTER_ZONES {
            let zone = world.random_open_cell();
            world.zones.push(zone);
        }
        world
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }

    /// Walks the player one cell. Leaving the grid or hitting an obstacle
    /// blocks; landing on an encounter zone relocates that zone and reports
    /// the encounter.
    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        let (dx, dy) = direction.delta();
        let next = Position::new(self.player.x + dx, self.player.y + dy);

        if !self.in_bounds(next) || self.obstacles.contains(&next) {
            return StepOutcome::Blocked;
        }
        self.player = next;

        if let Some(zone) = self.zones.iter().position(|&z| z == next) {
            let relocated = self.random_open_cell();
            self.zones[zone] = relocated;
            return StepOutcome::Encounter;
        }
        StepOutcome::Moved
    }

    fn in_bounds(&self, position: Position) -> bool {
        (0..WORLD_WIDTH).contains(&position.x) && (0..WORLD_HEIGHT).contains(&position.y)
    }

    fn next_roll_seed(&mut self) -> u64 {
        let nonce = self.roll_nonce;
        self.roll_nonce += 1;
        self.seed.wrapping_add(nonce)
    }

    /// Picks a cell that is neither blocked nor the player's own cell.
    fn random_open_cell(&mut self) -> Position {
        loop {
            let seed = self.next_roll_seed();
            let x = self.rng.index(seed, WORLD_WIDTH as usize) as i32;
            let y = self.rng.index(seed.wrapping_mul(31), WORLD_HEIGHT as usize) as i32;
            let cell = Position::new(x, y);
            if cell != self.player && !self.obstacles.contains(&cell) {
                return cell;
            }
        }
    }
}
