use gloo_storage::Storage;
use leptos::prelude::*;

use coropleta_shared::{DashboardConfig, DashboardState};

use crate::chart_view::BarChart;
use crate::dropdown::AttributeDropdown;
use crate::fetch::{self, LoadedData};
use crate::map_view::MapView;
use crate::tooltip::InfoLabel;

const SETTINGS_KEY: &str = "coropleta_settings";

/// Newtype wrappers give each context signal a distinct type; without
/// them `provide_context` would overwrite same-typed signals.
#[derive(Clone, Copy)]
pub(crate) struct Dashboard(pub RwSignal<DashboardState>);
#[derive(Clone, Copy)]
pub(crate) struct Data(pub RwSignal<Option<LoadedData>>);
#[derive(Clone, Copy)]
pub(crate) struct LoadFailure(pub RwSignal<Option<String>>);
#[derive(Clone, Copy)]
pub(crate) struct MousePos(pub RwSignal<(f64, f64)>);

#[derive(serde::Serialize, serde::Deserialize, Default)]
#[serde(default)]
struct Settings {
    expressed: String,
}

/// Remember the chosen attribute across reloads.
pub(crate) fn save_selected_attribute(key: &str) {
    let _ = gloo_storage::LocalStorage::set(
        SETTINGS_KEY,
        Settings {
            expressed: key.to_string(),
        },
    );
}

fn restore_selected_attribute(state: &mut DashboardState, config: &DashboardConfig) {
    let saved: Settings = gloo_storage::LocalStorage::get(SETTINGS_KEY).unwrap_or_default();
    state.select_attribute(&saved.expressed, config);
}

/// Root dashboard component. Owns the coordinator state and the loaded
/// record set, provides both via context, and kicks off the one-shot
/// concurrent load of the two data resources.
#[component]
pub fn App() -> impl IntoView {
    let config = DashboardConfig::default();
    let mut initial = DashboardState::new(&config);
    restore_selected_attribute(&mut initial, &config);

    let dashboard: RwSignal<DashboardState> = RwSignal::new(initial);
    let data: RwSignal<Option<LoadedData>> = RwSignal::new(None);
    let load_failure: RwSignal<Option<String>> = RwSignal::new(None);
    let mouse_pos: RwSignal<(f64, f64)> = RwSignal::new((0.0, 0.0));

    provide_context(Dashboard(dashboard));
    provide_context(Data(data));
    provide_context(LoadFailure(load_failure));
    provide_context(MousePos(mouse_pos));
    provide_context(config.clone());

    wasm_bindgen_futures::spawn_local(async move {
        match fetch::load_dashboard(&config).await {
            Ok(loaded) => data.set(Some(loaded)),
            Err(e) => load_failure.set(Some(e.to_string())),
        }
    });

    view! {
        <div
            class="dashboard"
            on:mousemove=move |ev: web_sys::MouseEvent| {
                mouse_pos.set((ev.client_x() as f64, ev.client_y() as f64));
            }
        >
            {move || {
                if let Some(message) = load_failure.get() {
                    view! {
                        <div class="error">"Failed to load data: " {message}</div>
                    }
                    .into_any()
                } else if data.with(Option::is_some) {
                    view! {
                        <AttributeDropdown />
                        <div class="panels">
                            <MapView />
                            <BarChart />
                        </div>
                        <InfoLabel />
                    }
                    .into_any()
                } else {
                    view! { <div class="loading">"Loading data…"</div> }.into_any()
                }
            }}
        </div>
    }
}
