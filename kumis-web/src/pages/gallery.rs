use super::ScreenProps;
use crate::components::Modal;
use crate::i18n::t;
use kumis_game::{ControllerEvent, Fungi, GalleryFilter};
use yew::prelude::*;

fn fungi_card(fungi: &Fungi, on_event: &Callback<ControllerEvent>) -> Html {
    let id = fungi.id.clone();
    let onclick = on_event.reform(move |_: MouseEvent| ControllerEvent::GallerySelect(id.clone()));
    html! {
        <li>
            <button
                type="button"
                class={classes!("card", "gallery-card", format!("gallery-card--{}", fungi.kind.as_str()))}
                data-testid={format!("gallery-card-{}", fungi.id)}
                {onclick}
            >
                <img src={fungi.image.clone()} alt={fungi.name.clone()} loading="lazy" />
                <span class="gallery-card__name">{ fungi.name.clone() }</span>
                <em class="gallery-card__latin">{ fungi.scientific_name.clone() }</em>
            </button>
        </li>
    }
}

#[function_component(GalleryPage)]
pub fn gallery_page(props: &ScreenProps) -> Html {
    let catalogue = &props.controller.content().fungi;
    let view = props.controller.gallery();
    let visible = view.visible(catalogue);
    let detail = view.detail(catalogue);

    let filters = GalleryFilter::ALL.iter().copied().map(|filter| {
        let active = filter == view.filter;
        let onclick = props
            .on_event
            .reform(move |_: MouseEvent| ControllerEvent::GalleryFilter(filter));
        html! {
            <button
                type="button"
                role="tab"
                aria-selected={active.to_string()}
                class={classes!("tab", active.then_some("tab-active"))}
                data-testid={format!("gallery-filter-{}", filter.as_str())}
                {onclick}
            >
                { t(&format!("gallery.filter.{}", filter.as_str())) }
            </button>
        }
    });

    let on_close = props.on_event.reform(|()| ControllerEvent::GalleryClose);
    let on_back = props
        .on_event
        .reform(|_: MouseEvent| ControllerEvent::BackToMenu);

    html! {
        <div class="shell-screen gallery-screen" data-testid="gallery-screen">
            <header class="gallery-header">
                <h2 class="text-xl font-bold">{ t("gallery.title") }</h2>
                <button type="button" class="btn btn-ghost" data-testid="gallery-back" onclick={on_back}>{ t("ui.back") }</button>
            </header>
            <div class="tabs" role="tablist">{ for filters }</div>
            if visible.is_empty() {
                <p class="opacity-60" data-testid="gallery-empty">{ t("gallery.empty") }</p>
            } else {
                <ul class="gallery-grid">
                    { for visible.iter().map(|fungi| fungi_card(fungi, &props.on_event)) }
                </ul>
            }
            if let Some(fungi) = detail {
                <Modal
                    open=true
                    title={fungi.name.clone()}
                    description={Some(AttrValue::from(fungi.scientific_name.clone()))}
                    on_close={on_close}
                    testid="gallery-detail"
                >
                    <img class="gallery-detail__image" src={fungi.image.clone()} alt={fungi.name.clone()} />
                    <p>{ fungi.description.clone() }</p>
                    <h3 class="font-bold">{ t("gallery.features") }</h3>
                    <ul class="gallery-detail__features">
                        { for fungi.features.iter().map(|f| html! { <li>{ f.clone() }</li> }) }
                    </ul>
                </Modal>
            }
        </div>
    }
}
