use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{QuestionDetailVm, StatsDashboardVm};

const SUCCESS_COLOR: &str = "#4CAF50";
const FAILURE_COLOR: &str = "#f44336";
const CATEGORY_COLOR: &str = "#2196F3";
const TIMING_COLOR: &str = "#FF9800";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatsTab {
    Summary,
    Hardest,
    Categories,
    Progress,
    Times,
}

impl StatsTab {
    const ALL: [StatsTab; 5] = [
        Self::Summary,
        Self::Hardest,
        Self::Categories,
        Self::Progress,
        Self::Times,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Hardest => "Hardest questions",
            Self::Categories => "Categories",
            Self::Progress => "Progress",
            Self::Times => "Response times",
        }
    }
}

#[component]
pub fn StatsView() -> Element {
    let ctx = use_context::<AppContext>();
    let dashboard = use_signal({
        let ctx = ctx.clone();
        move || StatsDashboardVm::load(ctx.services())
    });
    let mut tab = use_signal(|| StatsTab::Summary);
    let mut detail = use_signal(|| None::<QuestionDetailVm>);

    let vm = dashboard.read().clone();
    let active = tab();

    let on_select_question = {
        let ctx = ctx.clone();
        use_callback(move |question: String| {
            detail.set(StatsDashboardVm::detail(ctx.services(), &question));
        })
    };

    rsx! {
        div { class: "page stats-page",
            h2 { "Statistics" }

            if vm.is_empty {
                p { class: "empty-hint", "No statistics yet. Answer some questions first." }
                Link { class: "btn btn-secondary", to: Route::Home {}, "Back to Home" }
            } else {
                div { class: "tab-bar",
                    for (entry, label) in StatsTab::ALL.map(|entry| (entry, entry.label())) {
                        button {
                            class: if entry == active { "tab tab--active" } else { "tab" },
                            key: "{label}",
                            onclick: move |_| tab.set(entry),
                            "{label}"
                        }
                    }
                }

                match active {
                    StatsTab::Summary => rsx! {
                        SummaryTab { vm: vm.clone() }
                    },
                    StatsTab::Hardest => rsx! {
                        HardestTab { vm: vm.clone(), on_select: on_select_question }
                        if let Some(selected) = detail() {
                            DetailPanel { detail: selected, on_close: move |()| detail.set(None) }
                        }
                    },
                    StatsTab::Categories => rsx! {
                        CategoriesTab { vm: vm.clone() }
                    },
                    StatsTab::Progress => rsx! {
                        ProgressTab { vm: vm.clone() }
                    },
                    StatsTab::Times => rsx! {
                        TimesTab { vm: vm.clone() }
                    },
                }
            }
        }
    }
}

//
// ─── TABS ─────────────────────────────────────────────────────────────────────
//

#[component]
fn SummaryTab(vm: StatsDashboardVm) -> Element {
    let success = vm.overview.success_rate.clamp(0.0, 100.0);
    let success_style = format!("width: {success:.1}%; background: {SUCCESS_COLOR};");
    let failure_style = format!("width: {:.1}%; background: {FAILURE_COLOR};", 100.0 - success);

    rsx! {
        div { class: "stats-summary",
            ul { class: "stat-list",
                li { "Distinct questions: {vm.overview.questions}" }
                li { "Total attempts: {vm.overview.attempts}" }
                li { "Total failures: {vm.overview.failures}" }
                li { "Failure rate: {vm.overview.failure_rate}" }
            }
            div { class: "rate-meter", title: "Correct vs failed attempts",
                div { class: "rate-meter__success", style: "{success_style}" }
                div { class: "rate-meter__failure", style: "{failure_style}" }
            }
        }
    }
}

#[component]
fn HardestTab(vm: StatsDashboardVm, on_select: EventHandler<String>) -> Element {
    rsx! {
        table { class: "stats-table",
            thead {
                tr {
                    th { "Question" }
                    th { "Category" }
                    th { "Attempts" }
                    th { "Failures" }
                    th { "% failed" }
                    th { "Mean time (s)" }
                }
            }
            tbody {
                for row in vm.hardest {
                    tr {
                        class: "stats-row",
                        key: "{row.question}",
                        onclick: {
                            let question = row.question.clone();
                            move |_| on_select.call(question.clone())
                        },
                        td { class: "cell-question", "{row.question_display}" }
                        td { "{row.category}" }
                        td { "{row.attempts}" }
                        td { "{row.failures}" }
                        td { "{row.failure_rate}" }
                        td { "{row.mean_time}" }
                    }
                }
            }
        }
        p { class: "table-hint", "Click a row for the full record." }
    }
}

#[component]
fn DetailPanel(detail: QuestionDetailVm, on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "detail-panel",
            h3 { "Question detail" }
            p { class: "detail-question", "{detail.question}" }
            ul { class: "stat-list",
                li { "Category: {detail.category}" }
                if let Some(file) = detail.source_file.as_deref() {
                    li { "Source: {file}" }
                }
                li { "Attempts: {detail.attempts}" }
                li { "Failures: {detail.failures}" }
                li { "Failure rate: {detail.failure_rate}" }
                li { "Mean time: {detail.mean_time}" }
            }
            h4 { "Recent attempts" }
            ul { class: "history-list",
                for (index, line) in detail.recent_history.iter().enumerate() {
                    li { key: "{index}", "{line}" }
                }
            }
            button { class: "btn btn-secondary", onclick: move |_| on_close.call(()), "Close" }
        }
    }
}

#[component]
fn CategoriesTab(vm: StatsDashboardVm) -> Element {
    let bars: Vec<(String, f64)> = vm
        .categories
        .iter()
        .map(|row| (row.category.clone(), row.success_rate))
        .collect();

    rsx! {
        BarChart {
            bars,
            max: 100.0,
            color: CATEGORY_COLOR,
            unit: "%",
            title: "Success rate per question set",
        }
        table { class: "stats-table",
            thead {
                tr {
                    th { "Question set" }
                    th { "Questions" }
                    th { "Attempts" }
                    th { "Failures" }
                    th { "% failed" }
                }
            }
            tbody {
                for row in vm.categories {
                    tr { key: "{row.category}",
                        td { "{row.category}" }
                        td { "{row.questions}" }
                        td { "{row.attempts}" }
                        td { "{row.failures}" }
                        td { "{row.failure_rate}" }
                    }
                }
            }
        }
    }
}

#[component]
fn ProgressTab(vm: StatsDashboardVm) -> Element {
    rsx! {
        TrendChart { points: vm.trend.iter().map(|p| (p.timestamp.clone(), p.rate)).collect::<Vec<_>>() }
        table { class: "stats-table",
            thead {
                tr {
                    th { "Session" }
                    th { "Success rate" }
                }
            }
            tbody {
                for point in vm.trend {
                    tr { key: "{point.timestamp}",
                        td { "{point.timestamp}" }
                        td { "{point.rate_display}" }
                    }
                }
            }
        }
    }
}

#[component]
fn TimesTab(vm: StatsDashboardVm) -> Element {
    let max = vm
        .timings
        .iter()
        .map(|row| row.mean_seconds)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let bars: Vec<(String, f64)> = vm
        .timings
        .iter()
        .map(|row| (row.category.clone(), row.mean_seconds))
        .collect();

    rsx! {
        BarChart {
            bars,
            max,
            color: TIMING_COLOR,
            unit: "s",
            title: "Mean response time per question set",
        }
        table { class: "stats-table",
            thead {
                tr {
                    th { "Question set" }
                    th { "Mean time" }
                }
            }
            tbody {
                for row in vm.timings {
                    tr { key: "{row.category}",
                        td { "{row.category}" }
                        td { "{row.mean_time}" }
                    }
                }
            }
        }
    }
}

//
// ─── CHARTS ───────────────────────────────────────────────────────────────────
//

const CHART_WIDTH: f64 = 420.0;
const CHART_HEIGHT: f64 = 200.0;
const CHART_PAD: f64 = 24.0;

#[derive(Clone, Debug, PartialEq)]
struct BarGeometry {
    label: String,
    value_display: String,
    x: String,
    y: String,
    width: String,
    height: String,
    value_y: String,
    label_x: String,
    label_y: String,
}

fn bar_geometry(bars: &[(String, f64)], max: f64, unit: &str) -> Vec<BarGeometry> {
    let count = bars.len().max(1) as f64;
    let slot = (CHART_WIDTH - CHART_PAD * 2.0) / count;
    let bar_width = (slot * 0.6).max(4.0);
    let floor = CHART_HEIGHT - CHART_PAD;

    bars.iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let scaled = (value / max).clamp(0.0, 1.0) * (CHART_HEIGHT - CHART_PAD * 2.5);
            let x = CHART_PAD + slot * index as f64 + (slot - bar_width) / 2.0;
            let y = floor - scaled;
            let center = x + bar_width / 2.0;
            BarGeometry {
                label: label.clone(),
                value_display: format!("{value:.1}{unit}"),
                x: format!("{x:.1}"),
                y: format!("{y:.1}"),
                width: format!("{bar_width:.1}"),
                height: format!("{scaled:.1}"),
                value_y: format!("{:.1}", y - 4.0),
                label_x: format!("{center:.1}"),
                label_y: format!("{:.1}", floor + 14.0),
            }
        })
        .collect()
}

#[component]
fn BarChart(
    bars: Vec<(String, f64)>,
    max: f64,
    color: &'static str,
    unit: &'static str,
    title: &'static str,
) -> Element {
    let geometry = bar_geometry(&bars, max, unit);
    let floor = format!("{:.1}", CHART_HEIGHT - CHART_PAD);
    let axis_start = format!("{CHART_PAD:.1}");
    let axis_end = format!("{:.1}", CHART_WIDTH - CHART_PAD);
    let view_box = format!("0 0 {CHART_WIDTH:.0} {CHART_HEIGHT:.0}");

    rsx! {
        figure { class: "chart",
            figcaption { "{title}" }
            svg {
                view_box: "{view_box}",
                class: "chart-svg",
                line {
                    x1: "{axis_start}",
                    y1: "{floor}",
                    x2: "{axis_end}",
                    y2: "{floor}",
                    stroke: "#999",
                }
                for bar in geometry {
                    g { key: "{bar.label}",
                        rect {
                            x: "{bar.x}",
                            y: "{bar.y}",
                            width: "{bar.width}",
                            height: "{bar.height}",
                            fill: color,
                        }
                        text {
                            x: "{bar.label_x}",
                            y: "{bar.value_y}",
                            text_anchor: "middle",
                            class: "chart-value",
                            "{bar.value_display}"
                        }
                        text {
                            x: "{bar.label_x}",
                            y: "{bar.label_y}",
                            text_anchor: "middle",
                            class: "chart-label",
                            "{bar.label}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TrendChart(points: Vec<(String, f64)>) -> Element {
    let count = points.len();
    let floor = CHART_HEIGHT - CHART_PAD;
    let span = (CHART_WIDTH - CHART_PAD * 2.0) / count.saturating_sub(1).max(1) as f64;
    let coords: Vec<(String, String, String)> = points
        .into_iter()
        .enumerate()
        .map(|(index, (label, rate))| {
            let x = CHART_PAD + span * index as f64;
            let y = floor - (rate / 100.0).clamp(0.0, 1.0) * (CHART_HEIGHT - CHART_PAD * 2.0);
            (format!("{x:.1}"), format!("{y:.1}"), label)
        })
        .collect();
    let path = coords
        .iter()
        .map(|(x, y, _)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ");
    let floor = format!("{floor:.1}");
    let axis_start = format!("{CHART_PAD:.1}");
    let axis_end = format!("{:.1}", CHART_WIDTH - CHART_PAD);
    let view_box = format!("0 0 {CHART_WIDTH:.0} {CHART_HEIGHT:.0}");

    rsx! {
        figure { class: "chart",
            figcaption { "Success rate per session" }
            svg {
                view_box: "{view_box}",
                class: "chart-svg",
                line {
                    x1: "{axis_start}",
                    y1: "{floor}",
                    x2: "{axis_end}",
                    y2: "{floor}",
                    stroke: "#999",
                }
                if count > 1 {
                    polyline {
                        points: "{path}",
                        fill: "none",
                        stroke: SUCCESS_COLOR,
                        stroke_width: "2",
                    }
                }
                for (x, y, label) in coords {
                    circle {
                        key: "{label}",
                        cx: "{x}",
                        cy: "{y}",
                        r: "3",
                        fill: SUCCESS_COLOR,
                    }
                }
            }
        }
    }
}
