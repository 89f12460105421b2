//! Browser timers that feed [`Tick`]s back into the controller.
//!
//! One `TimerDriver` is mounted per active [`TimerSpec`], keyed by
//! [`TimerSpec::key`]. A new scope produces a new key, so Yew unmounts the old
//! driver and its cleanup clears the browser handle.
use kumis_game::{Tick, TimerSpec};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct TimerDriverProps {
    pub spec: TimerSpec,
    pub on_tick: Callback<Tick>,
}

#[function_component(TimerDriver)]
pub fn timer_driver(props: &TimerDriverProps) -> Html {
    #[cfg(target_arch = "wasm32")]
    {
        let on_tick = props.on_tick.clone();
        use_effect_with(props.spec, move |spec| {
            let scheduled = browser::schedule(*spec, on_tick);
            move || drop(scheduled)
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = props;
    }
    Html::default()
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use kumis_game::{Repeat, Tick, TimerSpec};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use yew::Callback;

    pub struct ScheduledTimer {
        handle: i32,
        repeat: Repeat,
        _callback: Closure<dyn FnMut()>,
    }

    impl Drop for ScheduledTimer {
        fn drop(&mut self) {
            if let Some(window) = crate::dom::window() {
                match self.repeat {
                    Repeat::Once => window.clear_timeout_with_handle(self.handle),
                    Repeat::Interval => window.clear_interval_with_handle(self.handle),
                }
            }
        }
    }

    pub fn schedule(spec: TimerSpec, on_tick: Callback<Tick>) -> Option<ScheduledTimer> {
        let window = crate::dom::window()?;
        let tick = spec.tick();
        let callback = Closure::<dyn FnMut()>::new(move || on_tick.emit(tick));
        let period = i32::try_from(spec.period_ms).unwrap_or(i32::MAX);
        let function = callback.as_ref().unchecked_ref();
        let handle = match spec.repeat {
            Repeat::Once => {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(function, period)
            }
            Repeat::Interval => {
                window.set_interval_with_callback_and_timeout_and_arguments_0(function, period)
            }
        };
        match handle {
            Ok(handle) => Some(ScheduledTimer {
                handle,
                repeat: spec.repeat,
                _callback: callback,
            }),
            Err(err) => {
                log::warn!("failed to schedule {}: {err:?}", spec.key());
                None
            }
        }
    }
}
