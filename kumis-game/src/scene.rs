//! Per-phase orchestration: transition banner, dialog, summary, mini-game.
use crate::config::{GameConfig, TransitionTimings};
use crate::content::{Content, MiniGameSpec};
use crate::dialog::{DialogEngine, DialogSignal};
use crate::minigame::{MiniGame, MiniGameAction, MiniGameKind, MiniGameOutcome};
use crate::phase::Phase;
use crate::timers::{Repeat, TaskScope, Tick, TimerKind, TimerSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStage {
    In,
    Hold,
    Out,
}

impl TransitionStage {
    #[must_use]
    pub const fn duration_ms(self, timings: &TransitionTimings) -> u32 {
        match self {
            Self::In => timings.fade_in_ms,
            Self::Hold => timings.hold_ms,
            Self::Out => timings.fade_out_ms,
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::In => Some(Self::Hold),
            Self::Hold => Some(Self::Out),
            Self::Out => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneStage {
    Transition(TransitionStage),
    Dialog,
    Summary,
    MiniGame,
    Complete,
}

/// Side effects for the owner to apply, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEffect {
    RecordChoice { id: String, value: bool },
    MiniGameStarted(MiniGameKind),
    MiniGameFinished(MiniGameOutcome),
    PhaseComplete,
}

pub type Effects = Vec<SceneEffect>;

#[derive(Debug, Clone)]
pub struct Scene {
    phase: Phase,
    title: String,
    background: String,
    stage: SceneStage,
    dialog: DialogEngine,
    spec: Option<MiniGameSpec>,
    minigame: Option<MiniGame>,
    transition: TaskScope,
    timings: TransitionTimings,
    config: GameConfig,
    seed: u64,
    completed: bool,
}

impl Scene {
    #[must_use]
    pub fn new(phase: Phase, content: &Content, config: &GameConfig, seed: u64) -> Self {
        let mut transition = TaskScope::default();
        transition.enter();
        Self {
            phase,
            title: content.title(phase).to_string(),
            background: content.background(phase).to_string(),
            stage: SceneStage::Transition(TransitionStage::In),
            dialog: DialogEngine::new(content.dialog(phase).to_vec(), config.typing_interval_ms()),
            spec: content.minigame(phase).cloned(),
            minigame: None,
            transition,
            timings: config.transition,
            config: config.clone(),
            seed,
            completed: false,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }

    #[must_use]
    pub const fn stage(&self) -> SceneStage {
        self.stage
    }

    #[must_use]
    pub const fn dialog(&self) -> &DialogEngine {
        &self.dialog
    }

    #[must_use]
    pub const fn minigame(&self) -> Option<&MiniGame> {
        self.minigame.as_ref()
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn timers(&self) -> Vec<TimerSpec> {
        match self.stage {
            SceneStage::Transition(stage) => self
                .transition
                .spec(TimerKind::Transition, stage.duration_ms(&self.timings), Repeat::Once)
                .into_iter()
                .collect(),
            SceneStage::Dialog => self.dialog.timers(),
            SceneStage::MiniGame => self.minigame.as_ref().map(MiniGame::timers).unwrap_or_default(),
            SceneStage::Summary | SceneStage::Complete => Vec::new(),
        }
    }

    pub fn on_tick(&mut self, tick: Tick) -> Effects {
        match self.stage {
            SceneStage::Transition(stage) => {
                if tick.kind != TimerKind::Transition || !self.transition.accepts(tick) {
                    return Effects::new();
                }
                if let Some(next) = stage.next() {
                    self.stage = SceneStage::Transition(next);
                    self.transition.enter();
                    return Effects::new();
                }
                self.transition.cancel();
                self.enter_dialog()
            }
            SceneStage::Dialog => {
                self.dialog.on_tick(tick);
                Effects::new()
            }
            SceneStage::MiniGame => {
                if let Some(game) = self.minigame.as_mut() {
                    game.on_tick(tick);
                }
                Effects::new()
            }
            SceneStage::Summary | SceneStage::Complete => Effects::new(),
        }
    }

    fn enter_dialog(&mut self) -> Effects {
        self.stage = SceneStage::Dialog;
        if self.dialog.is_finished() {
            return self.after_dialog(false);
        }
        Effects::new()
    }

    fn after_dialog(&mut self, skipped: bool) -> Effects {
        if skipped {
            self.stage = SceneStage::Summary;
            return Effects::new();
        }
        self.launch_minigame()
    }

    fn launch_minigame(&mut self) -> Effects {
        match self.spec.take() {
            Some(spec) if spec.kind().is_timed() || spec.question_count() > 0 => {
                let game = MiniGame::start(&spec, &self.config, self.seed);
                let kind = game.kind();
                log::info!("{}: starting {kind}", self.phase);
                self.minigame = Some(game);
                self.stage = SceneStage::MiniGame;
                vec![SceneEffect::MiniGameStarted(kind)]
            }
            Some(spec) => {
                log::warn!("{}: {} has no questions, skipping", self.phase, spec.kind());
                self.complete()
            }
            None => self.complete(),
        }
    }

    fn complete(&mut self) -> Effects {
        self.stage = SceneStage::Complete;
        if self.completed {
            return Effects::new();
        }
        self.completed = true;
        vec![SceneEffect::PhaseComplete]
    }

    fn dialog_signal(&mut self, signal: DialogSignal) -> Effects {
        let mut effects = Effects::new();
        if let DialogSignal::Chose { choice, .. } = &signal
            && let Some(id) = &choice.choice_id
        {
            effects.push(SceneEffect::RecordChoice {
                id: id.clone(),
                value: choice.value,
            });
        }
        if let Some(skipped) = signal.finished() {
            effects.extend(self.after_dialog(skipped));
        }
        effects
    }

    pub fn advance_dialog(&mut self) -> Effects {
        if self.stage != SceneStage::Dialog {
            return Effects::new();
        }
        let signal = self.dialog.advance();
        self.dialog_signal(signal)
    }

    pub fn choose(&mut self, index: usize) -> Effects {
        if self.stage != SceneStage::Dialog {
            return Effects::new();
        }
        let signal = self.dialog.choose(index);
        self.dialog_signal(signal)
    }

    pub fn request_skip(&mut self) {
        if self.stage == SceneStage::Dialog {
            self.dialog.request_skip();
        }
    }

    pub fn cancel_skip(&mut self) {
        self.dialog.cancel_skip();
    }

    pub fn confirm_skip(&mut self) -> Effects {
        if self.stage != SceneStage::Dialog {
            return Effects::new();
        }
        let signal = self.dialog.confirm_skip();
        self.dialog_signal(signal)
    }

    /// Leave the story summary shown after a skipped dialog.
    pub fn continue_from_summary(&mut self) -> Effects {
        if self.stage != SceneStage::Summary {
            return Effects::new();
        }
        self.launch_minigame()
    }

    pub fn minigame_action(&mut self, action: MiniGameAction) -> Effects {
        if self.stage != SceneStage::MiniGame {
            return Effects::new();
        }
        let Some(outcome) = self.minigame.as_mut().and_then(|g| g.apply(action)) else {
            return Effects::new();
        };
        self.minigame = None;
        let mut effects = vec![SceneEffect::MiniGameFinished(outcome)];
        effects.extend(self.complete());
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{DialogLine, PhaseScript, StoryData, TrueFalseQuestion};

    fn content(dialog: Vec<DialogLine>, spec: Option<MiniGameSpec>) -> Content {
        let mut content = Content {
            story: StoryData {
                phases: vec![PhaseScript {
                    phase: Phase::Act2,
                    title: "ACT II: KAPANG".into(),
                    background: "/assets/images/kitchen.png".into(),
                    dialog,
                }],
                ..StoryData::default()
            },
            ..Content::default()
        };
        if let Some(spec) = spec {
            content.minigames.acts.insert(Phase::Act2, spec);
        }
        content
    }

    fn tf() -> MiniGameSpec {
        MiniGameSpec::TrueFalse {
            questions: vec![TrueFalseQuestion {
                statement: "Oncom dari bungkil kacang".into(),
                is_true: true,
                explanation: String::new(),
                image: None,
            }],
        }
    }

    fn run_timers(scene: &mut Scene) -> Effects {
        let mut effects = Effects::new();
        while let Some(spec) = scene.timers().first().copied() {
            if spec.kind == TimerKind::Countdown {
                break;
            }
            effects.extend(scene.on_tick(spec.tick()));
        }
        effects
    }

    #[test]
    fn transition_runs_three_stages() {
        let mut scene = Scene::new(
            Phase::Act2,
            &content(vec![DialogLine::new("Bu Siti", "Oncom!")], None),
            &GameConfig::default(),
            1,
        );
        let durations: Vec<u32> = (0..3)
            .map(|_| {
                let spec = scene.timers()[0];
                assert_eq!(spec.kind, TimerKind::Transition);
                scene.on_tick(spec.tick());
                spec.period_ms
            })
            .collect();
        assert_eq!(durations, vec![500, 1500, 500]);
        assert_eq!(scene.stage(), SceneStage::Dialog);
    }

    #[test]
    fn dialog_end_launches_minigame_then_completes_once() {
        let mut scene = Scene::new(
            Phase::Act2,
            &content(vec![DialogLine::new("Bu Siti", "Oncom!")], Some(tf())),
            &GameConfig::default(),
            1,
        );
        assert!(run_timers(&mut scene).is_empty());
        assert_eq!(
            scene.advance_dialog(),
            vec![SceneEffect::MiniGameStarted(MiniGameKind::TrueFalse)]
        );
        assert_eq!(scene.stage(), SceneStage::MiniGame);
        scene.minigame_action(MiniGameAction::Select(0));
        let effects = scene.minigame_action(MiniGameAction::Next);
        assert_eq!(
            effects,
            vec![
                SceneEffect::MiniGameFinished(MiniGameOutcome {
                    kind: MiniGameKind::TrueFalse,
                    score: 10,
                    total_questions: 1
                }),
                SceneEffect::PhaseComplete
            ]
        );
        assert!(scene.minigame_action(MiniGameAction::Next).is_empty());
        assert!(scene.advance_dialog().is_empty());
    }

    #[test]
    fn skipped_dialog_shows_summary_first() {
        let mut scene = Scene::new(
            Phase::Act2,
            &content(vec![DialogLine::new("A", "panjang sekali")], Some(tf())),
            &GameConfig::default(),
            1,
        );
        for _ in 0..3 {
            let spec = scene.timers()[0];
            scene.on_tick(spec.tick());
        }
        scene.request_skip();
        assert!(scene.confirm_skip().is_empty());
        assert_eq!(scene.stage(), SceneStage::Summary);
        assert!(scene.timers().is_empty());
        assert_eq!(
            scene.continue_from_summary(),
            vec![SceneEffect::MiniGameStarted(MiniGameKind::TrueFalse)]
        );
    }

    #[test]
    fn empty_phase_completes_after_transition() {
        let mut scene = Scene::new(Phase::Epilog, &Content::default(), &GameConfig::default(), 1);
        let effects = run_timers(&mut scene);
        assert_eq!(effects, vec![SceneEffect::PhaseComplete]);
        assert!(scene.is_complete());
        assert_eq!(scene.title(), "");
    }

    #[test]
    fn stale_transition_tick_is_ignored() {
        let mut scene = Scene::new(Phase::Act2, &content(vec![], None), &GameConfig::default(), 1);
        let first = scene.timers()[0].tick();
        scene.on_tick(first);
        assert_eq!(scene.stage(), SceneStage::Transition(TransitionStage::Hold));
        scene.on_tick(first);
        assert_eq!(scene.stage(), SceneStage::Transition(TransitionStage::Hold));
    }
}
