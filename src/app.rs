//! Screen state machine
//!
//! Menus, the level editor and the leaderboard sit around a play `Session`.
//! `transition` is the full table of screen changes; `App` applies it and
//! carries out the side effects (starting sessions, saving levels, recording
//! scores).

use std::path::PathBuf;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::Result;
use crate::highscores::HighScores;
use crate::levels::{LevelGrid, LevelKind, LevelSource};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameMode, GamePhase, Session, TickInput, tick};

/// Custom level slots offered by the editor
pub const CUSTOM_LEVEL_SLOTS: u32 = 10;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    /// Normal or custom level sequence
    LevelSelect,
    /// A session is running (serving, playing or paused)
    Playing,
    Won,
    Lost,
    Leaderboard,
    Info,
    /// Choosing which custom level to edit
    EditorSelect,
    /// Painting a custom level
    Editor,
    Quit,
}

/// A menu command, already decoded from keys or button clicks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    PlayLevels,
    PlayEndless,
    OpenLevelCreator,
    OpenHighScores,
    OpenInfo,
    NormalLevels,
    CustomLevels,
    /// Custom level slot to edit, 1 to `CUSTOM_LEVEL_SLOTS`
    EditLevel(u32),
    /// Palette index to paint with, `None` for the eraser
    SelectColor(Option<u8>),
    /// Paint the cell under the pointer
    Paint(Vec2),
    ClearLevel,
    SaveLevel,
    Back,
    Quit,
}

/// Screen reached by `action` from `screen`, or `None` if it does not apply.
///
/// `paused` matters only on the play screen, where going back is allowed
/// from the pause menu alone.
pub fn transition(screen: Screen, action: MenuAction, paused: bool) -> Option<Screen> {
    use MenuAction as A;
    use Screen as S;

    if action == A::Quit {
        return Some(S::Quit);
    }
    match (screen, action) {
        (S::Title, A::PlayLevels) => Some(S::LevelSelect),
        (S::Title, A::PlayEndless) => Some(S::Playing),
        (S::Title, A::OpenLevelCreator) => Some(S::EditorSelect),
        (S::Title, A::OpenHighScores) => Some(S::Leaderboard),
        (S::Title, A::OpenInfo) => Some(S::Info),

        (S::LevelSelect, A::NormalLevels | A::CustomLevels) => Some(S::Playing),

        (S::EditorSelect, A::EditLevel(level)) if (1..=CUSTOM_LEVEL_SLOTS).contains(&level) => {
            Some(S::Editor)
        }
        (S::Editor, A::SelectColor(_) | A::Paint(_) | A::ClearLevel) => Some(S::Editor),
        (S::Editor, A::SaveLevel | A::Back) => Some(S::EditorSelect),

        (S::Playing, A::Back) if paused => Some(S::Title),

        (
            S::LevelSelect | S::Leaderboard | S::Info | S::EditorSelect | S::Won | S::Lost,
            A::Back,
        ) => Some(S::Title),

        _ => None,
    }
}

/// Level editor state
#[derive(Debug, Clone)]
pub struct Editor {
    /// Custom level slot being edited
    pub level: u32,
    pub grid: LevelGrid,
    /// Current palette index, `None` while erasing
    pub color: Option<u8>,
}

/// The whole game outside the frame loop
pub struct App<L: LevelSource> {
    pub settings: Settings,
    screen: Screen,
    session: Option<Session>,
    editor: Option<Editor>,
    high_scores: HighScores,
    score_path: Option<PathBuf>,
    levels: L,
    seeds: Pcg32,
}

impl<L: LevelSource> App<L> {
    pub fn new(settings: Settings, levels: L, seed: u64) -> Self {
        Self {
            settings,
            screen: Screen::Title,
            session: None,
            editor: None,
            high_scores: HighScores::new(),
            score_path: None,
            levels,
            seeds: Pcg32::seed_from_u64(seed),
        }
    }

    /// Keep the leaderboard in a file, loading what is there now
    pub fn with_score_file(mut self, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        self.high_scores = HighScores::load(&path)?;
        self.score_path = Some(path);
        Ok(self)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn levels(&self) -> &L {
        &self.levels
    }

    /// Apply a menu command. Returns false if it does nothing on this screen.
    pub fn handle(&mut self, action: MenuAction) -> Result<bool> {
        let paused = self
            .session
            .as_ref()
            .is_some_and(|s| s.phase == GamePhase::Paused);
        let Some(next) = transition(self.screen, action, paused) else {
            return Ok(false);
        };

        match action {
            MenuAction::PlayEndless => self.start_session(GameMode::Endless)?,
            MenuAction::NormalLevels => self.start_session(GameMode::Levels)?,
            MenuAction::CustomLevels => self.start_session(GameMode::Custom)?,
            MenuAction::EditLevel(level) => {
                let grid = self.levels.load_grid(LevelKind::Custom, level)?;
                self.editor = Some(Editor {
                    level,
                    grid,
                    color: Some(0),
                });
            }
            MenuAction::SelectColor(color) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.color = color;
                }
            }
            MenuAction::Paint(point) => {
                if let Some(editor) = self.editor.as_mut()
                    && let Some((column, row)) = editor.grid.cell_at(point, &self.settings)
                {
                    editor.grid.set(column, row, editor.color);
                }
            }
            MenuAction::ClearLevel => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.grid.clear();
                }
            }
            MenuAction::SaveLevel => {
                if let Some(editor) = self.editor.take() {
                    self.levels
                        .save_grid(LevelKind::Custom, editor.level, &editor.grid)?;
                }
            }
            MenuAction::Back => {
                self.editor = None;
                if next == Screen::Title {
                    self.session = None;
                }
            }
            _ => {}
        }

        log::debug!("Screen {:?} -> {:?}", self.screen, next);
        self.screen = next;
        Ok(true)
    }

    /// Run one frame of play. Does nothing off the play screen.
    pub fn update(&mut self, input: &TickInput) -> Result<Vec<GameEvent>> {
        if self.screen != Screen::Playing {
            return Ok(Vec::new());
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(Vec::new());
        };

        let events = tick(session, input, &self.levels)?;
        let mode = session.mode;

        for event in &events {
            match *event {
                GameEvent::Defeat { total_score } => {
                    // Only endless runs compete for the leaderboard
                    if mode == GameMode::Endless {
                        self.record_score(total_score)?;
                    }
                    self.screen = Screen::Lost;
                }
                GameEvent::Victory { .. } => {
                    self.screen = Screen::Won;
                }
                _ => {}
            }
        }
        Ok(events)
    }

    fn start_session(&mut self, mode: GameMode) -> Result<()> {
        let seed = self.seeds.random::<u64>();
        self.session = Some(Session::start(
            mode,
            self.settings.clone(),
            seed,
            &self.levels,
        )?);
        Ok(())
    }

    fn record_score(&mut self, total_score: u64) -> Result<()> {
        if let Some(rank) = self.high_scores.add_score(total_score) {
            log::info!("New high score {total_score} at rank {rank}");
        }
        if let Some(path) = &self.score_path {
            self.high_scores.save(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::MemoryLevels;

    fn app() -> App<MemoryLevels> {
        let settings = Settings::default();
        let levels = MemoryLevels::builtin(&settings);
        App::new(settings, levels, 5)
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(
            transition(Screen::Title, MenuAction::PlayLevels, false),
            Some(Screen::LevelSelect)
        );
        assert_eq!(
            transition(Screen::Info, MenuAction::Back, false),
            Some(Screen::Title)
        );
        assert_eq!(
            transition(Screen::Editor, MenuAction::Back, false),
            Some(Screen::EditorSelect)
        );
        assert_eq!(
            transition(Screen::Leaderboard, MenuAction::Quit, false),
            Some(Screen::Quit)
        );
        assert_eq!(transition(Screen::Title, MenuAction::SaveLevel, false), None);
        assert_eq!(
            transition(Screen::EditorSelect, MenuAction::EditLevel(10), false),
            Some(Screen::Editor)
        );
        assert_eq!(transition(Screen::EditorSelect, MenuAction::EditLevel(0), false), None);
        assert_eq!(transition(Screen::EditorSelect, MenuAction::EditLevel(11), false), None);
        assert_eq!(transition(Screen::Playing, MenuAction::Back, false), None);
        assert_eq!(
            transition(Screen::Playing, MenuAction::Back, true),
            Some(Screen::Title)
        );
    }

    #[test]
    fn test_start_levels() {
        let mut app = app();
        assert!(app.handle(MenuAction::PlayLevels).unwrap());
        assert!(app.handle(MenuAction::NormalLevels).unwrap());
        assert_eq!(app.screen(), Screen::Playing);
        let session = app.session().unwrap();
        assert_eq!(session.mode, GameMode::Levels);
        assert_eq!(session.bricks.len(), 8);
    }

    #[test]
    fn test_ignored_action() {
        let mut app = app();
        assert!(!app.handle(MenuAction::ClearLevel).unwrap());
        assert_eq!(app.screen(), Screen::Title);
    }

    #[test]
    fn test_endless_defeat_records_score() {
        let mut app = app();
        app.handle(MenuAction::PlayEndless).unwrap();
        let session = app.session.as_mut().unwrap();
        session.phase = GamePhase::Playing;
        session.total_score = 17;
        session.target_score = 100;
        session.balls[0].pos = Vec2::new(200.0, 748.0);
        session.balls[0].vel = Vec2::new(0.0, 6.0);

        let events = app.update(&TickInput::default()).unwrap();
        assert!(events.contains(&GameEvent::Defeat { total_score: 17 }));
        assert_eq!(app.screen(), Screen::Lost);
        assert_eq!(app.high_scores().entries(), &[17]);

        app.handle(MenuAction::Back).unwrap();
        assert_eq!(app.screen(), Screen::Title);
    }

    #[test]
    fn test_levels_defeat_leaves_leaderboard() {
        let mut app = app();
        app.handle(MenuAction::PlayLevels).unwrap();
        app.handle(MenuAction::NormalLevels).unwrap();
        let session = app.session.as_mut().unwrap();
        session.phase = GamePhase::Playing;
        session.balls[0].pos = Vec2::new(200.0, 748.0);
        session.balls[0].vel = Vec2::new(0.0, 6.0);

        app.update(&TickInput::default()).unwrap();
        assert_eq!(app.screen(), Screen::Lost);
        assert!(app.high_scores().is_empty());
    }

    #[test]
    fn test_back_from_pause_drops_session() {
        let mut app = app();
        app.handle(MenuAction::PlayEndless).unwrap();
        assert!(!app.handle(MenuAction::Back).unwrap());

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        app.update(&pause).unwrap();
        assert!(app.handle(MenuAction::Back).unwrap());
        assert_eq!(app.screen(), Screen::Title);
        assert!(app.session().is_none());
    }

    #[test]
    fn test_editor_paint_and_save() {
        let mut app = app();
        app.handle(MenuAction::OpenLevelCreator).unwrap();
        app.handle(MenuAction::EditLevel(1)).unwrap();
        assert_eq!(app.screen(), Screen::Editor);

        app.handle(MenuAction::SelectColor(Some(4))).unwrap();
        app.handle(MenuAction::Paint(Vec2::new(125.0, 10.0))).unwrap();
        app.handle(MenuAction::Paint(Vec2::new(25.0, 30.0))).unwrap();
        // Outside the placement area
        app.handle(MenuAction::Paint(Vec2::new(25.0, 700.0))).unwrap();
        app.handle(MenuAction::SelectColor(None)).unwrap();
        app.handle(MenuAction::Paint(Vec2::new(25.0, 30.0))).unwrap();

        let grid = &app.editor().unwrap().grid;
        assert_eq!(grid.get(2, 0), Some(4));
        assert_eq!(grid.get(0, 1), None);
        assert_eq!(grid.brick_count(), 1);

        app.handle(MenuAction::SaveLevel).unwrap();
        assert_eq!(app.screen(), Screen::EditorSelect);
        assert!(app.editor().is_none());
        let saved = app.levels().load_grid(LevelKind::Custom, 1).unwrap();
        assert_eq!(saved.get(2, 0), Some(4));

        // Custom play picks up the saved layout
        app.handle(MenuAction::Back).unwrap();
        app.handle(MenuAction::PlayLevels).unwrap();
        app.handle(MenuAction::CustomLevels).unwrap();
        let session = app.session().unwrap();
        assert_eq!(session.mode, GameMode::Custom);
        assert_eq!(session.bricks.len(), 1);
        assert_eq!(session.target_score, 1);
    }

    #[test]
    fn test_editor_back_discards() {
        let mut app = app();
        app.handle(MenuAction::OpenLevelCreator).unwrap();
        app.handle(MenuAction::EditLevel(2)).unwrap();
        app.handle(MenuAction::Paint(Vec2::new(25.0, 5.0))).unwrap();
        app.handle(MenuAction::ClearLevel).unwrap();
        assert_eq!(app.editor().unwrap().grid.brick_count(), 0);
        app.handle(MenuAction::Paint(Vec2::new(25.0, 5.0))).unwrap();
        app.handle(MenuAction::Back).unwrap();
        assert_eq!(app.screen(), Screen::EditorSelect);
        let stored = app.levels().load_grid(LevelKind::Custom, 2).unwrap();
        assert_eq!(stored.brick_count(), 0);
    }
}
