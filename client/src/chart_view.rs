use leptos::prelude::*;

use coropleta_shared::{
    Bar, ChartFrame, DashboardConfig, GREEN_RAMP, LinearScale, QuantileScale, attribute_domain,
    layout_bars,
};

use crate::app::{Dashboard, Data};
use crate::layout;

/// Coordinated bar chart panel: one bar per region, sorted tallest
/// first, sharing the map's color scale. Zero-height bars keep an
/// invisible baseline rectangle so they stay hoverable.
#[component]
pub fn BarChart() -> impl IntoView {
    let Dashboard(dashboard) = expect_context();
    let Data(data) = expect_context();
    let config: DashboardConfig = expect_context();

    let (_, chart_width) = layout::split_frames(layout::viewport_size().0);
    let frame = ChartFrame::new(chart_width, layout::FRAME_HEIGHT);
    let title_x = frame.left_margin + (frame.width - frame.left_margin) / 2.0;

    let model = Memo::new(move |_| {
        data.with(|d| {
            let Some(loaded) = d else {
                return (
                    Vec::new(),
                    LinearScale::for_values(std::iter::empty(), frame.height),
                );
            };
            let expressed = dashboard.with(|s| s.expressed().to_string());
            let scale = QuantileScale::build(
                attribute_domain(&loaded.regions, &expressed),
                &GREEN_RAMP,
            );
            let y = LinearScale::for_values(
                loaded.regions.iter().map(|r| r.numeric(&expressed)),
                frame.height,
            );
            (layout_bars(&loaded.regions, &expressed, &scale, &y, &frame), y)
        })
    });

    view! {
        <svg class="chart" width=frame.width height=frame.height>
            {move || {
                let (bars, _) = model.get();
                bars.into_iter()
                    .map(|bar| bar_view(bar, dashboard, &frame))
                    .collect::<Vec<_>>()
            }}
            {move || {
                let (_, y) = model.get();
                let axis_x = frame.left_margin;
                let mark_x = axis_x - 4.0;
                let text_x = axis_x - 6.0;
                let ticks = y
                    .ticks(10)
                    .into_iter()
                    .map(|t| {
                        let ty = y.scale(t);
                        let text_y = ty + 3.0;
                        view! {
                            <g class="tick">
                                <line x1=mark_x y1=ty x2=axis_x y2=ty />
                                <text x=text_x y=text_y text-anchor="end">
                                    {format_tick(t)}
                                </text>
                            </g>
                        }
                    })
                    .collect::<Vec<_>>();
                view! {
                    <g class="y-axis">
                        <line class="domain" x1=axis_x y1=0.0 x2=axis_x y2=frame.height />
                        {ticks}
                    </g>
                }
            }}
            <text
                class="chart-title"
                x=title_x
                y=40.0
                text-anchor="middle"
            >
                {move || {
                    let expressed = dashboard.with(|s| s.expressed().to_string());
                    config.label_for(&expressed).to_string()
                }}
            </text>
        </svg>
    }
}

fn bar_view(
    bar: Bar,
    dashboard: RwSignal<coropleta_shared::DashboardState>,
    frame: &ChartFrame,
) -> impl IntoView + use<> {
    let invisible = bar.is_invisible();
    let opacity = dashboard.with(|s| s.bar_opacity(&bar.code, invisible));
    let highlighted = dashboard.with(|s| s.is_highlighted(&bar.code));
    let stroke = if highlighted { "#000" } else { "none" };
    let stroke_width = if highlighted { 2.0 } else { 0.0 };
    let hit = invisible.then(|| bar.hit_rect(frame));

    let enter = bar.code.clone();
    let leave = bar.code.clone();
    let hit_enter = bar.code.clone();
    let hit_leave = bar.code.clone();

    view! {
        <g class="bar-slot">
            <rect
                class="bar"
                x=bar.x
                y=bar.y
                width=bar.width
                height=bar.height
                fill=bar.color
                opacity=opacity
                stroke=stroke
                stroke-width=stroke_width
                on:mouseenter=move |_| {
                    dashboard.update(|s| s.pointer_enter(&enter));
                }
                on:mouseleave=move |_| {
                    dashboard.update(|s| {
                        s.pointer_leave(&leave);
                    });
                }
            />
            {hit.map(|(x, y, w, h)| {
                view! {
                    <rect
                        class="zero-hover"
                        x=x
                        y=y
                        width=w
                        height=h
                        fill="transparent"
                        style="pointer-events: all;"
                        on:mouseenter=move |_| {
                            dashboard.update(|s| s.pointer_enter(&hit_enter));
                        }
                        on:mouseleave=move |_| {
                            dashboard.update(|s| {
                                s.pointer_leave(&hit_leave);
                            });
                        }
                    />
                }
            })}
        </g>
    }
}

/// Tick labels: integers plain, fractional steps trimmed to two places.
fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
