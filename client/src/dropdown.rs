use leptos::prelude::*;

use coropleta_shared::DashboardConfig;

use crate::app::{self, Dashboard};

/// Attribute selector. Changing it rebuilds the color scale, recolors
/// the map, re-sorts the bars and updates the chart title, all derived
/// from the one `DashboardState` signal. The hover highlight survives
/// the switch.
#[component]
pub fn AttributeDropdown() -> impl IntoView {
    let Dashboard(dashboard) = expect_context();
    let config: DashboardConfig = expect_context();

    let options = config.attributes.clone();
    let initial = dashboard.with_untracked(|s| s.expressed().to_string());

    let on_change = move |ev: leptos::ev::Event| {
        let key = event_target_value(&ev);
        let mut changed = false;
        dashboard.update(|s| changed = s.select_attribute(&key, &config));
        if changed {
            app::save_selected_attribute(&key);
        }
    };

    view! {
        <select class="dropdown" on:change=on_change>
            <option class="title-option" disabled=true>"Select Attribute"</option>
            {options
                .into_iter()
                .map(|attr| {
                    let selected = attr.key == initial;
                    view! {
                        <option value=attr.key.clone() selected=selected>{attr.label}</option>
                    }
                })
                .collect::<Vec<_>>()}
        </select>
    }
}
