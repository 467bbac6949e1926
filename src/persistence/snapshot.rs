//! Snapshot records and their layout inside a [`StateStore`]

use serde::{Deserialize, Serialize};

use super::store::StateStore;
use crate::sim::{Ball, GameMode, Paddle};

/// Store keys
pub mod keys {
    /// `[left, top, score]`
    pub const HUMAN_PLAYER: &str = "human_player";
    /// `[left, top, score]`
    pub const COMPUTER_PLAYER: &str = "computer_player";
    /// `[cx, cy, dx, dy]`
    pub const BALL: &str = "ball";
    pub const MODE: &str = "mode";
    pub const FPS: &str = "fps";
}

/// Reasons a store does not hold a usable snapshot
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RestoreError {
    #[error("saved state has no `{0}` entry")]
    MissingKey(&'static str),

    #[error("saved `{key}` entry has {found} values, expected {expected}")]
    BadLength {
        key: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("saved mode code {0} is unknown")]
    UnknownMode(i32),

    #[error("saved tick rate {0} is not positive")]
    BadTickRate(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleRecord {
    pub left: f32,
    pub top: f32,
    pub score: u32,
}

impl From<&Paddle> for PaddleRecord {
    fn from(paddle: &Paddle) -> Self {
        Self {
            left: paddle.left,
            top: paddle.top,
            score: paddle.score,
        }
    }
}

impl PaddleRecord {
    fn to_floats(self) -> [f32; 3] {
        [self.left, self.top, self.score as f32]
    }

    fn from_floats(values: [f32; 3]) -> Self {
        let [left, top, score] = values;
        // float -> int casts saturate, so a negative score reads back as 0
        Self {
            left,
            top,
            score: score as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallRecord {
    pub cx: f32,
    pub cy: f32,
    pub dx: f32,
    pub dy: f32,
}

impl From<&Ball> for BallRecord {
    fn from(ball: &Ball) -> Self {
        Self {
            cx: ball.pos.x,
            cy: ball.pos.y,
            dx: ball.vel.x,
            dy: ball.vel.y,
        }
    }
}

/// Everything needed to resume a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub human: PaddleRecord,
    pub computer: PaddleRecord,
    pub ball: BallRecord,
    pub mode: GameMode,
    pub frames_per_second: u32,
}

impl Snapshot {
    /// Write every record into `store`
    pub fn write_to<S: StateStore + ?Sized>(&self, store: &mut S) {
        store.put_floats(keys::HUMAN_PLAYER, &self.human.to_floats());
        store.put_floats(keys::COMPUTER_PLAYER, &self.computer.to_floats());
        store.put_floats(
            keys::BALL,
            &[self.ball.cx, self.ball.cy, self.ball.dx, self.ball.dy],
        );
        store.put_int(keys::MODE, self.mode.code());
        store.put_int(
            keys::FPS,
            i32::try_from(self.frames_per_second).unwrap_or(i32::MAX),
        );
    }

    /// Read a snapshot written by [`Snapshot::write_to`]
    pub fn read_from<S: StateStore + ?Sized>(store: &S) -> Result<Self, RestoreError> {
        let human = PaddleRecord::from_floats(read_floats(store, keys::HUMAN_PLAYER)?);
        let computer = PaddleRecord::from_floats(read_floats(store, keys::COMPUTER_PLAYER)?);
        let [cx, cy, dx, dy] = read_floats::<S, 4>(store, keys::BALL)?;

        let code = store
            .get_int(keys::MODE)
            .ok_or(RestoreError::MissingKey(keys::MODE))?;
        let mode = GameMode::from_code(code).ok_or(RestoreError::UnknownMode(code))?;

        let fps = store
            .get_int(keys::FPS)
            .ok_or(RestoreError::MissingKey(keys::FPS))?;
        let frames_per_second = u32::try_from(fps)
            .ok()
            .filter(|&fps| fps > 0)
            .ok_or(RestoreError::BadTickRate(fps))?;

        Ok(Self {
            human,
            computer,
            ball: BallRecord { cx, cy, dx, dy },
            mode,
            frames_per_second,
        })
    }
}

fn read_floats<S: StateStore + ?Sized, const N: usize>(
    store: &S,
    key: &'static str,
) -> Result<[f32; N], RestoreError> {
    let values = store.get_floats(key).ok_or(RestoreError::MissingKey(key))?;
    let found = values.len();
    values.try_into().map_err(|_| RestoreError::BadLength {
        key,
        expected: N,
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn snapshot() -> Snapshot {
        Snapshot {
            human: PaddleRecord {
                left: 2.0,
                top: 90.0,
                score: 4,
            },
            computer: PaddleRecord {
                left: 453.0,
                top: 117.5,
                score: 7,
            },
            ball: BallRecord {
                cx: 200.5,
                cy: 33.0,
                dx: -6.0,
                dy: 5.291_503,
            },
            mode: GameMode::Paused,
            frames_per_second: 60,
        }
    }

    #[test]
    fn store_layout() {
        let mut store = MemoryStore::new();
        snapshot().write_to(&mut store);
        assert_eq!(store.get_floats(keys::HUMAN_PLAYER), Some(vec![2.0, 90.0, 4.0]));
        assert_eq!(store.get_floats(keys::BALL).map(|b| b.len()), Some(4));
        assert_eq!(store.get_int(keys::MODE), Some(0));
        assert_eq!(store.get_int(keys::FPS), Some(60));

        assert_eq!(Snapshot::read_from(&store), Ok(snapshot()));
    }

    #[test]
    fn missing_entry() {
        let mut store = MemoryStore::new();
        snapshot().write_to(&mut store);
        let mut partial = MemoryStore::new();
        partial.put_floats(keys::HUMAN_PLAYER, &store.get_floats(keys::HUMAN_PLAYER).unwrap());
        assert_eq!(
            Snapshot::read_from(&partial),
            Err(RestoreError::MissingKey(keys::COMPUTER_PLAYER))
        );
    }

    #[test]
    fn wrong_record_length() {
        let mut store = MemoryStore::new();
        snapshot().write_to(&mut store);
        store.put_floats(keys::BALL, &[1.0, 2.0]);
        assert_eq!(
            Snapshot::read_from(&store),
            Err(RestoreError::BadLength {
                key: keys::BALL,
                expected: 4,
                found: 2
            })
        );
    }

    #[test]
    fn unknown_mode_and_bad_rate() {
        let mut store = MemoryStore::new();
        snapshot().write_to(&mut store);
        store.put_int(keys::MODE, 12);
        assert_eq!(Snapshot::read_from(&store), Err(RestoreError::UnknownMode(12)));

        store.put_int(keys::MODE, 2);
        store.put_int(keys::FPS, 0);
        assert_eq!(Snapshot::read_from(&store), Err(RestoreError::BadTickRate(0)));
    }
}
