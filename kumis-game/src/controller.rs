//! Root controller: owns the store and the active scene and maps phases to screens.
use crate::config::GameConfig;
use crate::content::Content;
use crate::ending::EndingSummary;
use crate::gallery::{GalleryFilter, GalleryView};
use crate::input::InputKey;
use crate::menu::{MainMenu, MenuOption};
use crate::minigame::{MiniGame, MiniGameAction};
use crate::phase::{Phase, PhaseEvent};
use crate::player::PlayerForm;
use crate::scene::{Scene, SceneEffect, SceneStage};
use crate::store::{GameStore, ProgressUpdate};
use crate::timers::{Tick, TimerSpec};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// What the UI should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Menu,
    PlayerForm,
    Story(Phase),
    Ending,
    Gallery,
    Credits,
}

impl Screen {
    #[must_use]
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Menu => Self::Menu,
            Phase::PlayerForm => Self::PlayerForm,
            Phase::Ending => Self::Ending,
            Phase::Gallery => Self::Gallery,
            Phase::Credits => Self::Credits,
            story => Self::Story(story),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerEvent {
    Key(InputKey),
    MenuSelect(MenuOption),
    MenuHover(MenuOption),
    OpenInstructions,
    CloseInstructions,
    PlayerName(String),
    PlayerClass(String),
    SubmitPlayer,
    AdvanceDialog,
    Choose(usize),
    RequestSkip,
    CancelSkip,
    ConfirmSkip,
    ContinueSummary,
    MiniGame(MiniGameAction),
    Tick(Tick),
    GalleryFilter(GalleryFilter),
    GallerySelect(String),
    GalleryClose,
    BackToMenu,
    ReturnFromEnding,
}

#[derive(Debug, Clone)]
pub struct GameController {
    store: GameStore,
    content: Arc<Content>,
    config: GameConfig,
    scene: Option<Scene>,
    menu: MainMenu,
    form: PlayerForm,
    gallery: GalleryView,
    seed: u64,
}

impl GameController {
    #[must_use]
    pub fn new(content: Content, config: GameConfig, seed: u64) -> Self {
        Self::with_shared_content(Arc::new(content), config, seed)
    }

    /// Build over content already shared with other controllers.
    #[must_use]
    pub fn with_shared_content(content: Arc<Content>, config: GameConfig, seed: u64) -> Self {
        Self {
            store: GameStore::new(),
            content,
            config,
            scene: None,
            menu: MainMenu::default(),
            form: PlayerForm::default(),
            gallery: GalleryView::default(),
            seed,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        Screen::for_phase(self.store.phase())
    }

    #[must_use]
    pub const fn store(&self) -> &GameStore {
        &self.store
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    #[must_use]
    pub fn minigame(&self) -> Option<&MiniGame> {
        self.scene.as_ref().and_then(Scene::minigame)
    }

    #[must_use]
    pub const fn menu(&self) -> &MainMenu {
        &self.menu
    }

    #[must_use]
    pub const fn form(&self) -> &PlayerForm {
        &self.form
    }

    #[must_use]
    pub const fn gallery(&self) -> &GalleryView {
        &self.gallery
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Summary for the ending screen, only while it is showing.
    #[must_use]
    pub fn ending_summary(&self) -> Option<EndingSummary> {
        (self.store.phase() == Phase::Ending)
            .then(|| EndingSummary::from_progress(self.store.progress(), &self.content.story.endings))
    }

    /// Timers the current screen needs.
    #[must_use]
    pub fn timers(&self) -> Vec<TimerSpec> {
        self.scene.as_ref().map(Scene::timers).unwrap_or_default()
    }

    pub fn handle(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Key(key) => self.handle_key(key),
            ControllerEvent::MenuSelect(option) => self.activate(option),
            ControllerEvent::MenuHover(option) => self.menu.hover(option),
            ControllerEvent::OpenInstructions => self.menu.open_instructions(),
            ControllerEvent::CloseInstructions => self.menu.close_instructions(),
            ControllerEvent::PlayerName(name) => self.form.set_name(name),
            ControllerEvent::PlayerClass(class) => self.form.set_class(class),
            ControllerEvent::SubmitPlayer => self.submit_player(),
            ControllerEvent::AdvanceDialog => self.with_scene(Scene::advance_dialog),
            ControllerEvent::Choose(idx) => self.with_scene(|s| s.choose(idx)),
            ControllerEvent::RequestSkip => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.request_skip();
                }
            }
            ControllerEvent::CancelSkip => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.cancel_skip();
                }
            }
            ControllerEvent::ConfirmSkip => self.with_scene(Scene::confirm_skip),
            ControllerEvent::ContinueSummary => self.with_scene(Scene::continue_from_summary),
            ControllerEvent::MiniGame(action) => self.with_scene(|s| s.minigame_action(action)),
            ControllerEvent::Tick(tick) => self.with_scene(|s| s.on_tick(tick)),
            ControllerEvent::GalleryFilter(filter) => self.gallery.set_filter(filter),
            ControllerEvent::GallerySelect(id) => self.gallery.select(id),
            ControllerEvent::GalleryClose => self.gallery.close_detail(),
            ControllerEvent::BackToMenu => self.fire(PhaseEvent::BackToMenu),
            ControllerEvent::ReturnFromEnding => self.return_from_ending(),
        }
    }

    fn handle_key(&mut self, key: InputKey) {
        match self.screen() {
            Screen::Menu => {
                if let Some(option) = self.menu.handle_key(key) {
                    self.activate(option);
                }
            }
            Screen::PlayerForm => {
                if key == InputKey::Enter {
                    self.submit_player();
                }
            }
            Screen::Story(_) => self.story_key(key),
            Screen::Gallery | Screen::Credits => {
                if key == InputKey::Escape {
                    if self.gallery.selected.is_some() {
                        self.gallery.close_detail();
                    } else {
                        self.fire(PhaseEvent::BackToMenu);
                    }
                }
            }
            Screen::Ending => {
                if key == InputKey::Enter {
                    self.return_from_ending();
                }
            }
        }
    }

    fn story_key(&mut self, key: InputKey) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let confirming = scene.dialog().is_confirming_skip();
        match (scene.stage(), key) {
            (SceneStage::Dialog, InputKey::Escape) if confirming => {
                self.handle(ControllerEvent::CancelSkip);
            }
            (SceneStage::Dialog, InputKey::Escape) => self.handle(ControllerEvent::RequestSkip),
            (SceneStage::Dialog, InputKey::Enter) if confirming => {
                self.handle(ControllerEvent::ConfirmSkip);
            }
            (SceneStage::Dialog, k) if k.advances() => self.handle(ControllerEvent::AdvanceDialog),
            (SceneStage::Summary, k) if k.advances() => {
                self.handle(ControllerEvent::ContinueSummary);
            }
            (SceneStage::MiniGame, k) => self.handle(ControllerEvent::MiniGame(MiniGameAction::Key(k))),
            (stage, k) => log::debug!("{k:?} ignored in {stage:?}"),
        }
    }

    fn activate(&mut self, option: MenuOption) {
        if self.screen() != Screen::Menu {
            log::debug!("menu option {option:?} outside menu");
            return;
        }
        let event = match option {
            MenuOption::Start => PhaseEvent::StartGame,
            MenuOption::Gallery => PhaseEvent::OpenGallery,
            MenuOption::About => PhaseEvent::OpenCredits,
        };
        self.fire(event);
    }

    fn fire(&mut self, event: PhaseEvent) {
        if let Err(err) = self.store.fire(event) {
            log::debug!("{err}");
            return;
        }
        if self.store.phase() == Phase::Menu {
            self.gallery = GalleryView::default();
            self.menu.close_instructions();
        }
    }

    fn submit_player(&mut self) {
        if self.screen() != Screen::PlayerForm {
            return;
        }
        let Some(info) = self.form.submit() else {
            return;
        };
        log::info!("player registered: {} ({})", info.name, info.class);
        self.store.set_player_info(info.name, info.class);
        if self.store.fire(PhaseEvent::PlayerRegistered).is_ok() {
            self.enter_phase();
        }
    }

    fn enter_phase(&mut self) {
        let phase = self.store.phase();
        let Some(idx) = phase.story_index() else {
            self.scene = None;
            return;
        };
        self.store.update_progress(ProgressUpdate {
            current_act: u8::try_from(idx).ok(),
            ..ProgressUpdate::default()
        });
        let seed = self.seed ^ (idx as u64 + 1).wrapping_mul(SEED_STRIDE);
        self.scene = Some(Scene::new(phase, &self.content, &self.config, seed));
    }

    fn with_scene(&mut self, step: impl FnOnce(&mut Scene) -> Vec<SceneEffect>) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        for effect in step(scene) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: SceneEffect) {
        match effect {
            SceneEffect::RecordChoice { id, value } => self.store.make_choice(id, value),
            SceneEffect::MiniGameStarted(kind) => self.store.start_mini_game(kind),
            SceneEffect::MiniGameFinished(outcome) => {
                self.store
                    .end_mini_game(outcome.score, outcome.total_questions);
            }
            SceneEffect::PhaseComplete => {
                if let Err(err) = self.store.fire(PhaseEvent::StoryComplete) {
                    log::warn!("phase completion rejected: {err}");
                    return;
                }
                if self.store.phase() == Phase::Ending {
                    self.scene = None;
                    if let Some(summary) = self.ending_summary() {
                        log::info!(
                            "ending reached: {} ({}%)",
                            summary.tier,
                            summary.percentage
                        );
                    }
                } else {
                    self.enter_phase();
                }
            }
        }
    }

    fn return_from_ending(&mut self) {
        if self.store.fire(PhaseEvent::EndingAcknowledged).is_err() {
            return;
        }
        self.store.reset_game();
        self.scene = None;
        self.menu = MainMenu::default();
        self.form = PlayerForm::default();
        self.gallery = GalleryView::default();
    }
}
