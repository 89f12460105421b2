use kumis_game::{
    Autoplayer, Content, ControllerEvent, EndingTier, GameConfig, GameController, InputKey,
    MenuOption, MiniGameAction, MiniGameKind, Phase, Scene, SceneStage, Screen, Strategy,
    VirtualClock,
};

fn controller(seed: u64) -> GameController {
    GameController::new(
        Content::load_from_static().unwrap(),
        GameConfig::load_from_static(),
        seed,
    )
}

fn registered(seed: u64) -> GameController {
    let mut c = controller(seed);
    c.handle(ControllerEvent::MenuSelect(MenuOption::Start));
    c.handle(ControllerEvent::PlayerName("Sari".into()));
    c.handle(ControllerEvent::PlayerClass("X IPA 1".into()));
    c.handle(ControllerEvent::SubmitPlayer);
    c
}

/// Tick timers until the scene accepts player input.
fn settle(c: &mut GameController, clock: &mut VirtualClock) {
    for _ in 0..10_000 {
        let waiting = c.scene().is_some_and(|s| {
            matches!(s.stage(), SceneStage::Transition(_)) || s.dialog().is_typing()
        });
        if !waiting {
            return;
        }
        let tick = clock.next_tick(&c.timers()).unwrap();
        c.handle(ControllerEvent::Tick(tick));
    }
    panic!("scene never settled");
}

#[test]
fn perfect_run_reaches_perfect_ending() {
    let mut c = controller(7);
    let run = Autoplayer::new(Strategy::Perfect, 7)
        .play(&mut c, "Sari", "X IPA 1")
        .unwrap();
    assert_eq!(c.screen(), Screen::Ending);
    assert_eq!(run.summary.tier, EndingTier::Perfect);
    assert_eq!(run.summary.player_name, "Sari");
    assert_eq!(
        run.completed_mini_games,
        vec![
            MiniGameKind::MultipleChoice,
            MiniGameKind::TrueFalse,
            MiniGameKind::WordGuess,
            MiniGameKind::PickWord
        ]
    );
    assert_eq!(run.summary.total_questions, 20);
    assert!(run.summary.percentage >= 80);
    assert_eq!(run.skipped_dialogs, 0);
}

#[test]
fn worst_run_needs_study() {
    let mut c = controller(9);
    let run = Autoplayer::new(Strategy::Worst, 9)
        .play(&mut c, "Raka", "XI IPA 2")
        .unwrap();
    assert_eq!(run.summary.tier, EndingTier::NeedsStudy);
    assert_eq!(run.summary.total_score, 0);
    assert_eq!(run.completed_mini_games.len(), 4);
}

#[test]
fn playthrough_is_deterministic_per_seed() {
    let run = |seed| {
        let mut c = controller(seed);
        Autoplayer::new(Strategy::Random, seed)
            .play(&mut c, "A", "B")
            .unwrap()
    };
    let a = run(21);
    let b = run(21);
    assert_eq!(a.summary, b.summary);
    assert_eq!(a.steps, b.steps);
    assert_eq!(a.virtual_ms, b.virtual_ms);
}

#[test]
fn returning_from_ending_resets_progress() {
    let mut c = controller(3);
    Autoplayer::new(Strategy::Perfect, 3)
        .play(&mut c, "Sari", "X")
        .unwrap();
    c.handle(ControllerEvent::Key(InputKey::Enter));
    assert_eq!(c.screen(), Screen::Menu);
    assert_eq!(c.store().progress().total_quiz_score, 0);
    assert!(c.store().progress().player_name.is_none());
    assert!(c.ending_summary().is_none());
    assert!(c.timers().is_empty());
}

#[test]
fn prolog_dialog_ignores_advance_while_typing() {
    let mut c = registered(1);
    let mut clock = VirtualClock::default();
    for _ in 0..3 {
        let tick = clock.next_tick(&c.timers()).unwrap();
        c.handle(ControllerEvent::Tick(tick));
    }
    let scene = c.scene().unwrap();
    assert_eq!(scene.stage(), SceneStage::Dialog);
    assert!(scene.dialog().is_typing());
    c.handle(ControllerEvent::AdvanceDialog);
    assert_eq!(c.scene().unwrap().dialog().index(), 0);
    settle(&mut c, &mut clock);
    c.handle(ControllerEvent::Key(InputKey::Space));
    assert_eq!(c.scene().unwrap().dialog().index(), 1);
}

#[test]
fn stale_typewriter_tick_is_dropped_across_lines() {
    let mut c = registered(2);
    let mut clock = VirtualClock::default();
    for _ in 0..3 {
        let tick = clock.next_tick(&c.timers()).unwrap();
        c.handle(ControllerEvent::Tick(tick));
    }
    let line_zero = c.timers()[0].tick();
    settle(&mut c, &mut clock);
    c.handle(ControllerEvent::AdvanceDialog);
    assert_eq!(c.scene().unwrap().dialog().index(), 1);
    c.handle(ControllerEvent::Tick(line_zero));
    assert_eq!(c.scene().unwrap().dialog().visible_text(), "");
    let fresh = c.timers()[0].tick();
    c.handle(ControllerEvent::Tick(fresh));
    assert_eq!(
        c.scene().unwrap().dialog().visible_text().chars().count(),
        1
    );
}

#[test]
fn skipping_act_dialog_shows_summary_then_minigame() {
    let mut c = registered(4);
    let mut clock = VirtualClock::default();
    // Finish the prolog by reading every line.
    while c.scene().map(Scene::phase) == Some(Phase::Prolog) {
        settle(&mut c, &mut clock);
        c.handle(ControllerEvent::AdvanceDialog);
    }
    assert_eq!(c.screen(), Screen::Story(Phase::Act1));
    assert_eq!(c.store().progress().current_act, 1);
    settle(&mut c, &mut clock);
    c.handle(ControllerEvent::Key(InputKey::Escape));
    assert!(c.scene().unwrap().dialog().is_confirming_skip());
    assert!(c.timers().is_empty());
    c.handle(ControllerEvent::Key(InputKey::Enter));
    assert_eq!(c.scene().unwrap().stage(), SceneStage::Summary);
    assert_eq!(c.store().active_mini_game(), None);
    c.handle(ControllerEvent::ContinueSummary);
    assert_eq!(c.scene().unwrap().stage(), SceneStage::MiniGame);
    assert_eq!(
        c.store().active_mini_game(),
        Some(MiniGameKind::MultipleChoice)
    );
}

#[test]
fn minigame_outcome_is_banked_once() {
    let mut c = registered(5);
    let mut clock = VirtualClock::default();
    while c.scene().map(Scene::phase) == Some(Phase::Prolog) {
        settle(&mut c, &mut clock);
        c.handle(ControllerEvent::AdvanceDialog);
    }
    settle(&mut c, &mut clock);
    c.handle(ControllerEvent::RequestSkip);
    c.handle(ControllerEvent::ConfirmSkip);
    c.handle(ControllerEvent::ContinueSummary);
    for _ in 0..5 {
        c.handle(ControllerEvent::MiniGame(MiniGameAction::Select(0)));
        c.handle(ControllerEvent::MiniGame(MiniGameAction::Next));
    }
    assert_eq!(c.screen(), Screen::Story(Phase::Act2));
    let banked = c.store().progress().total_quiz_questions;
    assert_eq!(banked, 5);
    c.handle(ControllerEvent::MiniGame(MiniGameAction::Next));
    assert_eq!(c.store().progress().total_quiz_questions, banked);
    assert_eq!(c.store().progress().completed_mini_games.len(), 1);
}

#[test]
fn every_practice_game_finishes_under_each_strategy() {
    let content = Content::load_from_static().unwrap();
    let config = GameConfig::default();
    for strategy in Strategy::ALL {
        for (idx, spec) in content.practice().iter().enumerate() {
            let mut game = kumis_game::MiniGame::start(spec, &config, idx as u64);
            let outcome = Autoplayer::new(strategy, idx as u64)
                .play_mini_game(&mut game)
                .unwrap_or_else(|err| panic!("{strategy} {}: {err}", spec.kind()));
            assert_eq!(outcome.kind, spec.kind());
            assert_eq!(outcome.total_questions, spec.question_count());
        }
    }
}
