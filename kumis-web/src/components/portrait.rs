use kumis_game::Emotion;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub speaker: AttrValue,
    #[prop_or_default]
    pub image: Option<AttrValue>,
    #[prop_or_default]
    pub emotion: Emotion,
}

/// Image filter applied per emotion.
#[must_use]
pub const fn emotion_filter(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Normal => "brightness-100",
        Emotion::Happy => "brightness-110 saturate-110",
        Emotion::Sad => "brightness-80 saturate-80",
        Emotion::Surprised => "brightness-115 contrast-110",
        Emotion::Worried => "brightness-85 sepia-20",
    }
}

/// Speaker portrait; renders nothing for speakers without an image.
#[function_component(Portrait)]
pub fn portrait(props: &Props) -> Html {
    let Some(src) = props.image.clone() else {
        return Html::default();
    };
    html! {
        <figure class="portrait" data-testid="dialog-portrait" data-emotion={props.emotion.as_str()}>
            <img
                class={classes!("portrait__image", emotion_filter(props.emotion))}
                {src}
                alt={props.speaker.clone()}
            />
            <figcaption class="portrait__name">{ props.speaker.clone() }</figcaption>
        </figure>
    }
}
