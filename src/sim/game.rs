//! The owned game state and its round state machine

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::state::{Arena, Ball, EntryAction, GameMode, Paddle, Side, StatusKind};
use crate::consts::PADDLE_WALL_MARGIN;
use crate::notify::Notifier;
use crate::persistence::{BallRecord, PaddleRecord, RestoreError, Snapshot, StateStore};
use crate::settings::{ConfigError, Palette, Settings};

/// Complete game: entities, mode and the outbound notification channel.
///
/// Owned by one thread at a time; see [`crate::driver`] for the threaded loop.
#[derive(Debug)]
pub struct Game {
    pub(super) settings: Settings,
    pub(super) arena: Arena,
    pub(super) human: Paddle,
    pub(super) computer: Paddle,
    pub(super) ball: Ball,
    pub(super) mode: GameMode,
    frames_per_second: u32,
    pub(super) rng: Pcg32,
    notifier: Notifier,
}

impl Game {
    /// Build a game. The game starts in Ready mode in a 1×1 arena until the
    /// host reports the surface size.
    pub fn new(settings: Settings, notifier: Notifier) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::debug!("Reaction RNG seed: {seed}");

        let palette = settings.palette;
        let mut game = Self {
            arena: Arena::default(),
            human: Paddle::new(settings.paddle_width, settings.paddle_height, palette.human),
            computer: Paddle::new(settings.paddle_width, settings.paddle_height, palette.computer),
            ball: Ball::new(settings.ball_radius, palette.ball),
            mode: GameMode::Ready,
            frames_per_second: settings.frames_per_second,
            rng: Pcg32::seed_from_u64(seed),
            notifier,
            settings,
        };
        game.set_mode(GameMode::Ready);
        Ok(game)
    }

    // === Accessors ===

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is_between_rounds(&self) -> bool {
        self.mode.is_between_rounds()
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn human(&self) -> &Paddle {
        &self.human
    }

    pub fn computer(&self) -> &Paddle {
        &self.computer
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn palette(&self) -> &Palette {
        &self.settings.palette
    }

    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }

    /// Wall-clock budget of one tick
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frames_per_second.max(1) as f64)
    }

    #[cfg(test)]
    pub(crate) fn human_mut(&mut self) -> &mut Paddle {
        &mut self.human
    }

    #[cfg(test)]
    pub(crate) fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    // === State machine ===

    /// Enter `mode` and run its entry actions
    pub fn set_mode(&mut self, mode: GameMode) {
        log::debug!("Mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        for action in mode.entry_actions() {
            self.apply(*action);
        }
    }

    fn apply(&mut self, action: EntryAction) {
        match action {
            EntryAction::ResetRound => self.reset_round(),
            EntryAction::HideStatus => self.notifier.hide_status(),
            EntryAction::ShowStatus(kind) => {
                let messages = &self.settings.messages;
                let text = match kind {
                    StatusKind::Win => &messages.win,
                    StatusKind::Lose => &messages.lose,
                    StatusKind::Paused => &messages.paused,
                };
                self.notifier.show_status(text);
            }
            EntryAction::AwardPoint(Side::Human) => self.human.score += 1,
            EntryAction::AwardPoint(Side::Computer) => self.computer.score += 1,
        }
    }

    /// Start play
    pub fn start(&mut self) {
        self.set_mode(GameMode::Running);
    }

    /// Pause, only if a round is in progress
    pub fn pause(&mut self) {
        if self.mode == GameMode::Running {
            self.set_mode(GameMode::Paused);
        }
    }

    /// Resume from any between-rounds mode
    pub fn resume(&mut self) {
        self.set_mode(GameMode::Running);
    }

    /// Zero both scores, reset the round and start playing
    pub fn new_game(&mut self) {
        log::info!("New game");
        self.human.score = 0;
        self.computer.score = 0;
        self.reset_round();
        self.set_mode(GameMode::Running);
    }

    /// Surface size changed: adopt it and reset the round. The mode is kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.arena = Arena::new(width, height);
        log::debug!("Arena resized to {}x{}", self.arena.width, self.arena.height);
        self.reset_round();
    }

    /// Ball to the center moving left, paddles centered against their walls
    fn reset_round(&mut self) {
        let width = self.arena.width as f32;
        let height = self.arena.height as f32;

        self.ball.pos = Vec2::new(width / 2.0, height / 2.0);
        self.ball.vel = Vec2::new(-self.settings.ball_speed, 0.0);

        let arena = self.arena;
        let human_top = (height - self.human.height()) / 2.0;
        self.human.move_to(PADDLE_WALL_MARGIN, human_top, &arena);

        let computer_left = width - self.computer.width() - PADDLE_WALL_MARGIN;
        let computer_top = (height - self.computer.height()) / 2.0;
        self.computer.move_to(computer_left, computer_top, &arena);

        self.notifier.score(self.human.score, self.computer.score);
    }

    // === Input ===

    pub fn is_point_in_human_paddle(&self, x: f32, y: f32) -> bool {
        self.human.bounds().contains(x, y)
    }

    /// Center the human paddle on `y`, keeping its column
    pub fn move_human_paddle_to(&mut self, y: f32) {
        let top = y - self.human.height() / 2.0;
        let arena = self.arena;
        self.human.move_to(self.human.left, top, &arena);
    }

    pub fn move_human_paddle_by(&mut self, dy: f32) {
        let arena = self.arena;
        self.human.move_to(self.human.left, self.human.top + dy, &arena);
    }

    // === Save / restore ===

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            human: PaddleRecord::from(&self.human),
            computer: PaddleRecord::from(&self.computer),
            ball: BallRecord::from(&self.ball),
            mode: self.mode,
            frames_per_second: self.frames_per_second,
        }
    }

    /// Write the current state into a host store
    pub fn save_state<S: StateStore + ?Sized>(&self, store: &mut S) {
        self.snapshot().write_to(store);
    }

    /// Read a snapshot back from a host store and restore it
    pub fn restore_state<S: StateStore + ?Sized>(&mut self, store: &S) -> Result<(), RestoreError> {
        let snapshot = Snapshot::read_from(store)?;
        self.restore(&snapshot);
        Ok(())
    }

    /// Restore a snapshot taken by [`Game::snapshot`].
    ///
    /// Paddle positions pass through the arena clamp. The saved mode is
    /// re-entered for its status message only: scores and positions come from
    /// the snapshot.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        let arena = self.arena;

        self.human.score = snapshot.human.score;
        self.human.move_to(snapshot.human.left, snapshot.human.top, &arena);

        self.computer.score = snapshot.computer.score;
        self.computer
            .move_to(snapshot.computer.left, snapshot.computer.top, &arena);

        self.ball.pos = Vec2::new(snapshot.ball.cx, snapshot.ball.cy);
        self.ball.vel = Vec2::new(snapshot.ball.dx, snapshot.ball.dy);

        self.frames_per_second = snapshot.frames_per_second.max(1);

        self.mode = snapshot.mode;
        for action in snapshot.mode.entry_actions() {
            if action.is_presentational() {
                self.apply(*action);
            }
        }
        self.notifier.score(self.human.score, self.computer.score);
        log::info!(
            "Restored game in {:?} mode, score {}-{}",
            self.mode,
            self.human.score,
            self.computer.score
        );
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::Receiver;

    use super::*;
    use crate::consts::BALL_SPEED;
    use crate::notify::Notification;
    use crate::persistence::MemoryStore;

    fn game() -> (Game, Receiver<Notification>) {
        let (notifier, rx) = Notifier::channel();
        let settings = Settings {
            seed: Some(1),
            ..Settings::default()
        };
        let mut game = Game::new(settings, notifier).unwrap();
        game.resize(480, 320);
        (game, rx)
    }

    fn assert_ready_positions(game: &Game) {
        assert_eq!(game.ball().pos, Vec2::new(240.0, 160.0));
        assert_eq!(game.ball().vel, Vec2::new(-BALL_SPEED, 0.0));
        assert_eq!((game.human().left, game.human().top), (2.0, 117.5));
        assert_eq!((game.computer().left, game.computer().top), (453.0, 117.5));
    }

    #[test]
    fn starts_ready_and_centered() {
        let (game, _rx) = game();
        assert_eq!(game.mode(), GameMode::Ready);
        assert!(game.is_between_rounds());
        assert_ready_positions(&game);
    }

    #[test]
    fn win_scores_human_and_resets() {
        let (mut game, rx) = game();
        game.start();
        game.ball_mut().pos = Vec2::new(300.0, 40.0);
        game.move_human_paddle_by(-60.0);
        rx.try_iter().for_each(drop);

        game.set_mode(GameMode::Win);
        assert_eq!(game.human().score, 1);
        assert_eq!(game.computer().score, 0);
        assert_ready_positions(&game);

        let got: Vec<Notification> = rx.try_iter().collect();
        assert_eq!(
            got,
            vec![
                Notification::Status {
                    text: "You win!".to_string(),
                    visible: true
                },
                Notification::Score("1    0".to_string()),
            ]
        );
    }

    #[test]
    fn lose_scores_computer() {
        let (mut game, _rx) = game();
        game.set_mode(GameMode::Lose);
        game.set_mode(GameMode::Lose);
        assert_eq!(game.human().score, 0);
        assert_eq!(game.computer().score, 2);
        assert_ready_positions(&game);
    }

    #[test]
    fn round_reset_is_repeatable() {
        let (mut game, _rx) = game();
        game.set_mode(GameMode::Ready);
        let first = game.snapshot();
        game.ball_mut().pos = Vec2::new(1.0, 2.0);
        game.set_mode(GameMode::Ready);
        game.set_mode(GameMode::Ready);
        assert_eq!(game.snapshot(), first);
    }

    #[test]
    fn pause_only_from_running() {
        let (mut game, rx) = game();
        rx.try_iter().for_each(drop);
        game.pause();
        assert_eq!(game.mode(), GameMode::Ready);
        assert_eq!(rx.try_iter().count(), 0);

        game.start();
        game.pause();
        assert_eq!(game.mode(), GameMode::Paused);
        assert_eq!(
            rx.try_iter().last(),
            Some(Notification::Status {
                text: "Paused".to_string(),
                visible: true
            })
        );

        game.resume();
        assert_eq!(game.mode(), GameMode::Running);
    }

    #[test]
    fn new_game_zeroes_scores_and_runs() {
        let (mut game, _rx) = game();
        game.set_mode(GameMode::Win);
        game.set_mode(GameMode::Lose);
        game.new_game();
        assert_eq!(game.human().score, 0);
        assert_eq!(game.computer().score, 0);
        assert_eq!(game.mode(), GameMode::Running);
        assert_ready_positions(&game);
    }

    #[test]
    fn resize_keeps_mode_and_recenters() {
        let (mut game, _rx) = game();
        game.start();
        game.resize(800, 600);
        assert_eq!(game.mode(), GameMode::Running);
        assert_eq!(game.ball().pos, Vec2::new(400.0, 300.0));
        assert_eq!(game.computer().left, 800.0 - 25.0 - 2.0);
        assert_eq!(game.human().top, (600.0 - 85.0) / 2.0);
    }

    #[test]
    fn human_paddle_input_is_clamped() {
        let (mut game, _rx) = game();
        game.move_human_paddle_to(0.0);
        assert_eq!(game.human().top, 0.0);
        game.move_human_paddle_by(1000.0);
        assert_eq!(game.human().top, 320.0 - 85.0 - 1.0);
        game.move_human_paddle_to(160.0);
        assert_eq!(game.human().top, 117.5);
        assert_eq!(game.human().left, 2.0);

        assert!(game.is_point_in_human_paddle(10.0, 160.0));
        assert!(!game.is_point_in_human_paddle(100.0, 160.0));
    }

    #[test]
    fn snapshot_restore_round_trip() {
        let (mut game, _rx) = game();
        game.set_mode(GameMode::Win);
        game.set_mode(GameMode::Win);
        game.set_mode(GameMode::Lose);
        game.start();
        game.ball_mut().pos = Vec2::new(123.0, 45.5);
        game.ball_mut().vel = Vec2::new(3.0, -7.0);
        game.move_human_paddle_by(-30.0);
        game.pause();
        let saved = game.snapshot();

        let (mut restored, rx) = self::game();
        rx.try_iter().for_each(drop);
        restored.restore(&saved);
        assert_eq!(restored.snapshot(), saved);
        assert_eq!(restored.mode(), GameMode::Paused);

        let got: Vec<Notification> = rx.try_iter().collect();
        assert!(got.contains(&Notification::Status {
            text: "Paused".to_string(),
            visible: true
        }));
        assert!(got.contains(&Notification::Score("2    1".to_string())));
    }

    #[test]
    fn store_round_trip() {
        let (mut game, _rx) = game();
        game.start();
        game.update_physics();
        game.update_physics();
        let mut store = MemoryStore::new();
        game.save_state(&mut store);

        let (mut restored, _rx2) = self::game();
        restored.restore_state(&store).unwrap();
        assert_eq!(restored.snapshot(), game.snapshot());
        assert_eq!(restored.mode(), GameMode::Running);
    }

    #[test]
    fn empty_store_is_rejected() {
        let (mut game, _rx) = game();
        let before = game.snapshot();
        assert!(game.restore_state(&MemoryStore::new()).is_err());
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn restore_in_win_mode_does_not_rescore() {
        let (mut game, _rx) = game();
        game.set_mode(GameMode::Win);
        let saved = game.snapshot();

        let (mut restored, _rx2) = self::game();
        restored.restore(&saved);
        assert_eq!(restored.human().score, 1);
        assert_eq!(restored.mode(), GameMode::Win);
    }

    #[test]
    fn restore_clamps_out_of_range_paddles() {
        let (mut game, _rx) = game();
        let mut saved = game.snapshot();
        saved.human.left = -40.0;
        saved.human.top = 9000.0;
        saved.computer.left = 9000.0;
        saved.computer.top = -3.0;
        game.restore(&saved);
        assert_eq!((game.human().left, game.human().top), (2.0, 234.0));
        assert_eq!((game.computer().left, game.computer().top), (453.0, 0.0));
    }
}
