use crate::i18n::locales;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub current: AttrValue,
    pub on_change: Callback<String>,
}

/// The locale after `current`, wrapping around.
#[must_use]
pub fn next_locale(current: &str) -> &'static str {
    let all = locales();
    let idx = all.iter().position(|m| m.code == current).unwrap_or(0);
    all[(idx + 1) % all.len()].code
}

#[function_component(LangToggle)]
pub fn lang_toggle(props: &Props) -> Html {
    let next = next_locale(&props.current);
    let onclick = {
        let cb = props.on_change.clone();
        Callback::from(move |_: MouseEvent| cb.emit(next.to_string()))
    };
    html! {
        <button
            type="button"
            class="btn btn-sm lang-toggle"
            aria-label={crate::i18n::t("app.lang_toggle")}
            data-testid="lang-toggle"
            {onclick}
        >
            { next.to_uppercase() }
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::next_locale;

    #[test]
    fn toggle_cycles_through_locales() {
        assert_eq!(next_locale("id"), "en");
        assert_eq!(next_locale("en"), "id");
        assert_eq!(next_locale("xx"), "en");
    }
}
