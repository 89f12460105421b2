use super::ScreenProps;
use crate::components::{DialogBox, SummaryPanel, TransitionBanner};
use crate::i18n::t;
use crate::minigames::MiniGamePanel;
use kumis_game::SceneStage;
use yew::prelude::*;

#[must_use]
pub const fn stage_name(stage: SceneStage) -> &'static str {
    match stage {
        SceneStage::Transition(_) => "transition",
        SceneStage::Dialog => "dialog",
        SceneStage::Summary => "summary",
        SceneStage::MiniGame => "minigame",
        SceneStage::Complete => "complete",
    }
}

#[function_component(StoryPage)]
pub fn story_page(props: &ScreenProps) -> Html {
    let Some(scene) = props.controller.scene() else {
        return html! {
            <div class="story-screen" data-testid="story-screen">{ t("story.loading") }</div>
        };
    };
    let stage = scene.stage();
    let style = format!("background-image: url('{}')", scene.background());

    let body = match stage {
        SceneStage::Transition(step) => html! {
            <TransitionBanner title={scene.title().to_string()} stage={step} />
        },
        SceneStage::Dialog => html! { <DialogBox ..props.clone() /> },
        SceneStage::Summary => html! { <SummaryPanel ..props.clone() /> },
        SceneStage::MiniGame => html! { <MiniGamePanel ..props.clone() /> },
        SceneStage::Complete => Html::default(),
    };

    html! {
        <div
            class={classes!("story-screen", format!("story-screen--{}", stage_name(stage)))}
            {style}
            data-testid="story-screen"
            data-phase={scene.phase().as_str()}
            data-stage={stage_name(stage)}
        >
            { body }
        </div>
    }
}
