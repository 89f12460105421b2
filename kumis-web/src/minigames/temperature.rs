use crate::i18n::{t, tr};
use kumis_game::MiniGameAction;
use kumis_game::minigame::{TemperatureGame, TemperatureZone};
use std::collections::BTreeMap;
use yew::prelude::*;

#[must_use]
pub const fn zone_name(zone: TemperatureZone) -> &'static str {
    match zone {
        TemperatureZone::Cold => "cold",
        TemperatureZone::Optimal => "optimal",
        TemperatureZone::Hot => "hot",
    }
}

/// Position of `value` along the thermometer, 0..=100.
#[must_use]
pub fn gauge_percent(value: f32, min: f32, max: f32) -> f32 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}

pub fn render(game: &TemperatureGame, on_action: &Callback<MiniGameAction>) -> Html {
    let cfg = game.config();
    let zone = game.zone();
    let fill = gauge_percent(game.value(), cfg.min, cfg.max);
    let band_low = gauge_percent(cfg.target - cfg.tolerance, cfg.min, cfg.max);
    let band_high = gauge_percent(cfg.target + cfg.tolerance, cfg.min, cfg.max);
    let secs = game.time_left().to_string();
    let mut args = BTreeMap::new();
    args.insert("secs", secs.as_str());

    let on_start = on_action.reform(|_: MouseEvent| MiniGameAction::Start);
    let on_raise = on_action.reform(|_: MouseEvent| MiniGameAction::RaiseTemperature);
    let on_lower = on_action.reform(|_: MouseEvent| MiniGameAction::LowerTemperature);
    let on_next = on_action.reform(|_: MouseEvent| MiniGameAction::Next);

    html! {
        <div class="temperature" data-testid="temperature">
            <p class="text-sm opacity-70">{ t("minigame.help.temperature") }</p>
            <div class="thermometer" aria-hidden="true">
                <div class="thermometer__band" style={format!("bottom: {band_low:.0}%; height: {:.0}%", band_high - band_low)}></div>
                <div class="thermometer__fill" style={format!("height: {fill:.0}%")}></div>
            </div>
            <p class="temperature__reading" data-testid="temperature-value">
                { format!("{:.1}°C", game.value()) }
                <span class={classes!("badge", format!("zone-{}", zone_name(zone)))} data-zone={zone_name(zone)}>
                    { t(&format!("game.zone.{}", zone_name(zone))) }
                </span>
            </p>
            <p data-testid="temperature-time">{ tr("game.time", Some(&args)) }</p>
            if let Some(success) = game.result() {
                <div class="temperature__result" role="status" data-testid="temperature-result">
                    <strong>{ if success { t("game.temp_success") } else { t("game.temp_fail") } }</strong>
                    <button type="button" class="btn btn-primary" data-testid="temperature-next" onclick={on_next}>
                        { t("game.finish") }
                    </button>
                </div>
            } else if game.is_running() {
                <div class="temperature__controls">
                    <button type="button" class="btn" data-testid="temperature-lower" onclick={on_lower}>{ t("game.lower") }</button>
                    <button type="button" class="btn" data-testid="temperature-raise" onclick={on_raise}>{ t("game.raise") }</button>
                </div>
            } else {
                <button type="button" class="btn btn-primary" data-testid="temperature-start" onclick={on_start}>
                    { t("game.start") }
                </button>
            }
        </div>
    }
}
