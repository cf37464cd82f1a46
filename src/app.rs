use std::rc::Rc;

use leptos::html::Canvas;
use leptos::*;

use crate::{
    application::TooltipData,
    domain::{
        function::FunctionCatalog,
        logging::LogComponent,
        plot::ScreenPoint,
    },
    log_error,
    presentation::ParallelPlotApi,
};

const CANVAS_ID: &str = "parallel-plot-canvas";
const TOOLTIP_OFFSET: f64 = 14.0;
const TOOLTIP_STYLE: &str = "position: absolute; white-space: pre; pointer-events: none; \
    background: rgba(0, 0, 0, 0.8); color: #fff; padding: 4px 8px; font: 12px monospace;";

fn report(context: &str, result: Result<(), wasm_bindgen::JsValue>) {
    if let Err(e) = result {
        log_error!(LogComponent::Presentation("App"), "{}: {:?}", context, e);
    }
}

/// Canvas with hover tooltip, playback and fit controls.
#[component]
pub fn App() -> impl IntoView {
    let (plot, set_plot) = create_signal::<Option<Rc<ParallelPlotApi>>>(None);
    let (tooltip, set_tooltip) = create_signal::<Option<TooltipData>>(None);
    let (fit_label, set_fit_label) = create_signal("domain".to_string());
    let (status, set_status) = create_signal("Initializing...".to_string());

    let canvas_ref = create_node_ref::<Canvas>();

    create_effect(move |_| {
        if canvas_ref.get().is_some() && plot.get_untracked().is_none() {
            match ParallelPlotApi::new(CANVAS_ID) {
                Ok(api) => {
                    set_plot.set(Some(Rc::new(api)));
                    set_status.set("Ready".to_string());
                }
                Err(e) => set_status.set(format!("Canvas unavailable: {:?}", e)),
            }
        }
    });

    let with_plot = move |action: &dyn Fn(&ParallelPlotApi)| {
        plot.with_untracked(|p| {
            if let Some(api) = p {
                action(api);
            }
        });
    };

    let resize_listener = window_event_listener(ev::resize, move |_| {
        set_tooltip.set(None);
        with_plot(&|api| report("resize", api.fit_to_layout()));
    });
    on_cleanup(move || resize_listener.remove());

    let on_mouse_move = move |event: web_sys::MouseEvent| {
        let pointer = ScreenPoint::new(event.offset_x() as f64, event.offset_y() as f64);
        with_plot(&|api| match api.hover(pointer) {
            Ok(hit) => set_tooltip.set(hit),
            Err(e) => report("hover", Err(e)),
        });
    };

    let on_mouse_leave = move |_event: web_sys::MouseEvent| {
        set_tooltip.set(None);
        with_plot(&|api| report("pointer leave", api.pointer_leave()));
    };

    let on_function_change = move |event: ev::Event| {
        let id = event_target_value(&event);
        set_tooltip.set(None);
        with_plot(&|api| report("set function", api.set_function(&id)));
    };

    let on_toggle_fit = move |_| {
        with_plot(&|api| match api.toggle_fit() {
            Ok(policy) => set_fit_label.set(policy),
            Err(e) => report("toggle fit", Err(e)),
        });
    };

    let function_options = FunctionCatalog::builtin()
        .ids()
        .into_iter()
        .map(|id| view! { <option value=id>{id}</option> })
        .collect_view();

    view! {
        <div class="parallel-plot-app">
            <div class="plot-controls">
                <select on:change=on_function_change>{function_options}</select>
                <button on:click=move |_| with_plot(&|api| report("play", api.play()))>"Play"</button>
                <button on:click=move |_| with_plot(&|api| api.pause())>"Pause"</button>
                <button on:click=move |_| with_plot(&|api| report("reset", api.reset()))>"Reset"</button>
                <button on:click=on_toggle_fit>{move || format!("Fit: {}", fit_label.get())}</button>
            </div>
            <div class="plot-wrapper" style="position: relative; width: 100%;">
                <canvas
                    id=CANVAS_ID
                    node_ref=canvas_ref
                    width="800"
                    height="500"
                    style="display: block; width: 100%; height: 500px; background: #11151c; cursor: crosshair;"
                    on:mousemove=on_mouse_move
                    on:mouseleave=on_mouse_leave
                />
                {move || {
                    tooltip
                        .get()
                        .map(|t| {
                            let style = format!(
                                "{} left: {}px; top: {}px;",
                                TOOLTIP_STYLE,
                                t.position.x + TOOLTIP_OFFSET,
                                t.position.y + TOOLTIP_OFFSET
                            );
                            view! { <div class="plot-tooltip" style=style>{t.text}</div> }
                        })
                }}
            </div>
            <div class="status">{move || status.get()}</div>
        </div>
    }
}

/// Mount [`App`] into `<body>`.
#[wasm_bindgen::prelude::wasm_bindgen(js_name = mountApp)]
pub fn mount_app() {
    mount_to_body(App);
}
