use kumis_game::TransitionStage;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub title: AttrValue,
    pub stage: TransitionStage,
}

#[must_use]
pub const fn stage_class(stage: TransitionStage) -> &'static str {
    match stage {
        TransitionStage::In => "transition--in",
        TransitionStage::Hold => "transition--hold",
        TransitionStage::Out => "transition--out",
    }
}

/// Full-screen act title shown while a phase fades in.
#[function_component(TransitionBanner)]
pub fn transition_banner(props: &Props) -> Html {
    html! {
        <div class={classes!("transition-banner", stage_class(props.stage))} data-testid="transition-banner" aria-live="polite">
            <h1 class="transition-banner__title">{ props.title.clone() }</h1>
        </div>
    }
}
