use leptos::prelude::*;

use coropleta_shared::{
    ConicEqualArea, GREEN_RAMP, QuantileScale, attribute_domain, graticule, line_path,
    polygon_path,
};

use crate::app::{Dashboard, Data};
use crate::layout;

/// Graticule extent around the projected view, degrees.
const GRID_EXTENT: [[f64; 2]; 2] = [[-130.0, 5.0], [-75.0, 40.0]];

/// Choropleth map panel: one SVG path per region, filled from the
/// quantile scale of the expressed attribute, with hover emphasis.
#[component]
pub fn MapView() -> impl IntoView {
    let Dashboard(dashboard) = expect_context();
    let Data(data) = expect_context();

    let (map_width, _) = layout::split_frames(layout::viewport_size().0);
    let map_height = layout::FRAME_HEIGHT;
    let projection = ConicEqualArea::mexico(map_width, map_height);

    let grid = graticule(GRID_EXTENT, 10.0)
        .iter()
        .map(|line| line_path(line, &projection))
        .collect::<String>();

    // Outlines only change when data loads; fills and strokes change per
    // attribute and highlight, so the path strings are cached separately.
    let outlines = Memo::new({
        let projection = projection.clone();
        move |_| {
            data.with(|d| match d {
                Some(loaded) => loaded
                    .regions
                    .iter()
                    .map(|r| polygon_path(&r.polygons, &projection))
                    .collect::<Vec<_>>(),
                None => Vec::new(),
            })
        }
    });

    view! {
        <svg class="map" width=map_width height=map_height>
            <rect class="map-frame" x=0 y=0 width=map_width height=map_height />
            <path class="graticule" d=grid fill="none" />
            {move || {
                let shapes = outlines.get();
                data.with(|d| {
                    let Some(loaded) = d else {
                        return Vec::new();
                    };
                    let expressed = dashboard.with(|s| s.expressed().to_string());
                    let scale = QuantileScale::build(
                        attribute_domain(&loaded.regions, &expressed),
                        &GREEN_RAMP,
                    );
                    loaded
                        .regions
                        .iter()
                        .zip(shapes)
                        .map(|(region, outline)| {
                            let highlighted = dashboard.with(|s| s.is_highlighted(&region.code));
                            let fill = scale.color(region.value(&expressed)).to_string();
                            let stroke = if highlighted { "#000" } else { "#fff" };
                            let stroke_width = if highlighted { 2.0 } else { 0.5 };
                            let enter_code = region.code.clone();
                            let leave_code = region.code.clone();
                            view! {
                                <path
                                    class="state"
                                    d=outline
                                    fill=fill
                                    stroke=stroke
                                    stroke-width=stroke_width
                                    on:mouseenter=move |_| {
                                        dashboard.update(|s| s.pointer_enter(&enter_code));
                                    }
                                    on:mouseleave=move |_| {
                                        dashboard.update(|s| {
                                            s.pointer_leave(&leave_code);
                                        });
                                    }
                                />
                            }
                        })
                        .collect::<Vec<_>>()
                })
            }}
        </svg>
    }
}
