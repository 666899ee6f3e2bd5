//! Built-in training arena
//!
//! A square grid with one controlled character and a few stationary
//! enemies. Attacking the enemy directly ahead damages it; everything else
//! costs a little reward so idling is never optimal.

use rand::Rng;

use qbot_core::{Action, PlayerFeatures, Result, Reward, State, MAX_PLAYERS};
use qbot_rl::Game;

const ENEMY_HEALTH: u32 = 3;
const HIT_REWARD: Reward = 1.0;
const KILL_REWARD: Reward = 5.0;
const BUMP_PENALTY: Reward = -0.1;
const IDLE_PENALTY: Reward = -0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    fn delta(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::East => (1, 0),
            Facing::South => (0, 1),
            Facing::West => (-1, 0),
        }
    }

    fn left(self) -> Self {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }

    fn right(self) -> Self {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Enemy {
    position: (i32, i32),
    health: u32,
}

#[derive(Debug, Clone)]
pub struct Arena {
    size: i32,
    position: (i32, i32),
    facing: Facing,
    enemies: Vec<Enemy>,
}

impl Arena {
    /// Place the character and `enemies` enemies on distinct random cells
    pub fn random<R: Rng>(size: i32, enemies: usize, rng: &mut R) -> Self {
        let size = size.max(2);
        let cells = (size * size) as usize;
        let enemies = enemies.clamp(1, MAX_PLAYERS.min(cells - 1));

        let mut taken = Vec::with_capacity(enemies + 1);
        while taken.len() < enemies + 1 {
            let cell = (rng.gen_range(0..size), rng.gen_range(0..size));
            if !taken.contains(&cell) {
                taken.push(cell);
            }
        }

        let facing = match rng.gen_range(0..4) {
            0 => Facing::North,
            1 => Facing::East,
            2 => Facing::South,
            _ => Facing::West,
        };

        Self {
            size,
            position: taken[0],
            facing,
            enemies: taken[1..]
                .iter()
                .map(|&position| Enemy {
                    position,
                    health: ENEMY_HEALTH,
                })
                .collect(),
        }
    }

    pub fn enemies_left(&self) -> usize {
        self.enemies.len()
    }

    fn ahead(&self) -> (i32, i32) {
        let (dx, dy) = self.facing.delta();
        (self.position.0 + dx, self.position.1 + dy)
    }

    fn in_bounds(&self, (x, y): (i32, i32)) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y)
    }

    fn attack(&mut self) -> Reward {
        let target = self.ahead();
        let Some(idx) = self.enemies.iter().position(|e| e.position == target) else {
            return IDLE_PENALTY;
        };

        self.enemies[idx].health -= 1;
        if self.enemies[idx].health == 0 {
            self.enemies.swap_remove(idx);
            KILL_REWARD
        } else {
            HIT_REWARD
        }
    }

    fn step_forward(&mut self) -> Reward {
        let next = self.ahead();
        if !self.in_bounds(next) || self.enemies.iter().any(|e| e.position == next) {
            return BUMP_PENALTY;
        }
        self.position = next;
        IDLE_PENALTY
    }
}

impl Game for Arena {
    /// Enemies nearest first, as offsets in the character's facing frame
    fn observe(&self) -> State {
        let (fx, fy) = self.facing.delta();
        let scale = f64::from(self.size);

        let mut players: Vec<PlayerFeatures> = self
            .enemies
            .iter()
            .map(|enemy| {
                let dx = enemy.position.0 - self.position.0;
                let dy = enemy.position.1 - self.position.1;
                PlayerFeatures {
                    forward: f64::from(dx * fx + dy * fy) / scale,
                    lateral: f64::from(-dx * fy + dy * fx) / scale,
                }
            })
            .collect();
        players.sort_by(|a, b| {
            (a.forward.abs() + a.lateral.abs()).total_cmp(&(b.forward.abs() + b.lateral.abs()))
        });
        players.truncate(MAX_PLAYERS);

        State::from_players(&players).unwrap_or_else(|_| State::zeros())
    }

    fn apply(&mut self, action: Action) -> Result<Reward> {
        let reward = match action {
            Action::DoNothing => IDLE_PENALTY,
            Action::TurnLeft => {
                self.facing = self.facing.left();
                IDLE_PENALTY
            }
            Action::TurnRight => {
                self.facing = self.facing.right();
                IDLE_PENALTY
            }
            Action::StepForward => self.step_forward(),
            Action::Attack => self.attack(),
        };
        Ok(reward)
    }

    fn is_over(&self) -> bool {
        self.enemies.is_empty()
    }
}
