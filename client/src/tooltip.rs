use leptos::prelude::*;

use coropleta_shared::{DashboardConfig, LabelContent, place_label};

use crate::app::{Dashboard, Data, MousePos};
use crate::layout;

/// Floating info label tracking the pointer while a region or bar is
/// highlighted. Its rendered size is measured back from the DOM so the
/// placement flip happens against real dimensions.
#[component]
pub fn InfoLabel() -> impl IntoView {
    let Dashboard(dashboard) = expect_context();
    let Data(data) = expect_context();
    let MousePos(mouse_pos) = expect_context();
    let config: DashboardConfig = expect_context();

    let node: NodeRef<leptos::html::Div> = NodeRef::new();
    let measured: RwSignal<(f64, f64)> = RwSignal::new((140.0, 60.0));

    let content = Memo::new(move |_| {
        let (code, expressed) =
            dashboard.with(|s| (s.highlight().map(str::to_string), s.expressed().to_string()));
        let code = code?;
        data.with(|d| {
            let loaded = d.as_ref()?;
            let region = loaded.regions.iter().find(|r| r.code == code)?;
            Some(LabelContent::for_region(region, &expressed, &config))
        })
    });

    Effect::new(move || {
        content.track();
        if let Some(el) = node.get() {
            let rect = el.get_bounding_client_rect();
            if rect.width() > 0.0 {
                measured.set((rect.width(), rect.height()));
            }
        }
    });

    view! {
        {move || {
            let Some(info) = content.get() else {
                return view! { <div class="infolabel" style="display: none;" /> }.into_any();
            };
            let (x, y) = place_label(mouse_pos.get(), measured.get(), layout::viewport_size());
            view! {
                <div
                    class="infolabel"
                    node_ref=node
                    style:left=format!("{x}px")
                    style:top=format!("{y}px")
                >
                    <div class="label-title">{info.title}</div>
                    <div class="label-value">{info.value}</div>
                    <div class="label-attribute">{info.attribute_label}</div>
                </div>
            }
            .into_any()
        }}
    }
}
