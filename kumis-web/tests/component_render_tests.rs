use futures::executor::block_on;
use kumis_game::{
    Content, ControllerEvent, Emotion, GameConfig, GameController, MenuOption, MiniGameKind, Phase, Scene,
    SceneStage, TransitionStage, VirtualClock,
};
use kumis_web::components::{LangToggle, Modal, Portrait, TransitionBanner};
use kumis_web::minigames::MiniGamePanel;
use kumis_web::pages::ScreenProps;
use std::rc::Rc;
use yew::LocalServerRenderer;
use yew::prelude::*;

fn render<C>(props: C::Properties) -> String
where
    C: BaseComponent,
{
    block_on(LocalServerRenderer::<C>::with_props(props).render())
}

/// A controller parked on act 1's mini-game, with act 1 bound to `kind`.
fn act_one_playing(kind: MiniGameKind) -> GameController {
    let mut content = Content::load_from_static().unwrap();
    let spec = content
        .minigames
        .practice
        .iter()
        .chain(content.minigames.acts.values())
        .find(|spec| spec.kind() == kind)
        .cloned()
        .unwrap();
    content.minigames.acts.insert(Phase::Act1, spec);

    let mut c = GameController::new(content, GameConfig::default(), 5);
    c.handle(ControllerEvent::MenuSelect(MenuOption::Start));
    c.handle(ControllerEvent::PlayerName("Raka".into()));
    c.handle(ControllerEvent::PlayerClass("XI".into()));
    c.handle(ControllerEvent::SubmitPlayer);

    let mut clock = VirtualClock::default();
    let mut settle = |c: &mut GameController| {
        while c.scene().is_some_and(|s| {
            matches!(s.stage(), SceneStage::Transition(_)) || s.dialog().is_typing()
        }) {
            let tick = clock.next_tick(&c.timers()).unwrap();
            c.handle(ControllerEvent::Tick(tick));
        }
    };
    while c.scene().map(Scene::phase) == Some(Phase::Prolog) {
        settle(&mut c);
        c.handle(ControllerEvent::AdvanceDialog);
    }
    settle(&mut c);
    c.handle(ControllerEvent::RequestSkip);
    c.handle(ControllerEvent::ConfirmSkip);
    c.handle(ControllerEvent::ContinueSummary);
    assert_eq!(c.store().active_mini_game(), Some(kind));
    c
}

fn panel(c: &GameController) -> String {
    render::<MiniGamePanel>(ScreenProps {
        controller: Rc::new(c.clone()),
        on_event: Callback::noop(),
    })
}

#[test]
fn every_minigame_kind_renders_its_view() {
    kumis_web::i18n::set_lang("en");
    let expectations = [
        (MiniGameKind::MultipleChoice, "quiz-option-0"),
        (MiniGameKind::TrueFalse, "TRUE"),
        (MiniGameKind::PickWord, "quiz-option-0"),
        (MiniGameKind::Sorting, "quiz-prompt"),
        (MiniGameKind::FillBlank, "typed-input"),
        (MiniGameKind::WordScramble, "scramble-tiles"),
        (MiniGameKind::WordGuess, "word-board"),
        (MiniGameKind::ClickTarget, "arcade-field"),
        (MiniGameKind::FindObject, "arcade-field"),
        (MiniGameKind::SpeedClick, "arcade-field"),
        (MiniGameKind::Microscope, "arcade-field"),
        (MiniGameKind::Temperature, "temperature-start"),
    ];
    for (kind, marker) in expectations {
        let html = panel(&act_one_playing(kind));
        assert!(html.contains(&format!(r#"data-kind="{}""#, kind.as_str())), "{kind}");
        assert!(html.contains(marker), "{kind} missing {marker}");
        assert!(html.contains("Score: 0"), "{kind}");
    }
}

#[test]
fn quiz_feedback_appears_after_answering() {
    kumis_web::i18n::set_lang("en");
    let mut c = act_one_playing(MiniGameKind::TrueFalse);
    c.handle(ControllerEvent::MiniGame(kumis_game::MiniGameAction::Select(0)));
    let html = panel(&c);
    assert!(html.contains("quiz-feedback"));
    assert!(html.contains("quiz-next"));
    assert!(html.contains("disabled"));
}

#[test]
fn temperature_controls_replace_start_button() {
    kumis_web::i18n::set_lang("en");
    let mut c = act_one_playing(MiniGameKind::Temperature);
    c.handle(ControllerEvent::MiniGame(kumis_game::MiniGameAction::Start));
    let html = panel(&c);
    assert!(!html.contains("temperature-start"));
    assert!(html.contains("temperature-raise"));
    assert!(html.contains("20.0°C"));
}

#[test]
fn transition_banner_reflects_stage() {
    let html = render::<TransitionBanner>(yew::props!(kumis_web::components::transition_banner::Props {
        title: AttrValue::from("ACT I: KHAMIR"),
        stage: TransitionStage::Hold,
    }));
    assert!(html.contains("transition--hold"));
    assert!(html.contains("ACT I: KHAMIR"));
}

#[test]
fn closed_modal_renders_nothing() {
    let closed = yew::props!(kumis_web::components::modal::Props {
        open: false,
        title: AttrValue::from("Hidden"),
        on_close: Callback::noop(),
    });
    assert!(!render::<Modal>(closed).contains("Hidden"));

    let open = yew::props!(kumis_web::components::modal::Props {
        open: true,
        title: AttrValue::from("Shown"),
        on_close: Callback::noop(),
        testid: Some(AttrValue::from("probe")),
    });
    let html = render::<Modal>(open);
    assert!(html.contains("Shown"));
    assert!(html.contains(r#"data-testid="probe""#));
}

#[test]
fn lang_toggle_offers_the_other_locale() {
    kumis_web::i18n::set_lang("id");
    let html = render::<LangToggle>(yew::props!(kumis_web::components::lang_toggle::Props {
        current: AttrValue::from("id"),
        on_change: Callback::noop(),
    }));
    assert!(html.contains("EN"));
}

#[test]
fn portrait_is_omitted_for_unknown_speaker() {
    let content = Content::load_from_static().unwrap();
    let portrait = |speaker: &str, emotion: Emotion| {
        render::<Portrait>(yew::props!(kumis_web::components::portrait::Props {
            speaker: AttrValue::from(speaker.to_string()),
            image: content.portrait(speaker).map(|src| AttrValue::from(src.to_string())),
            emotion,
        }))
    };

    let narrator = portrait("Narrator", Emotion::Normal);
    assert!(!narrator.contains("dialog-portrait"));
    assert!(!narrator.contains("<img"));

    let bu_siti = portrait("Bu Siti", Emotion::Worried);
    assert!(bu_siti.contains("character-busiti.png"));
    assert!(bu_siti.contains("sepia-20"));
    assert!(bu_siti.contains(r#"data-emotion="worried""#));
}
