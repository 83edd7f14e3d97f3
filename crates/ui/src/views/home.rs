use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let labels: Vec<String> = ctx.sources().iter().map(|source| source.label()).collect();

    rsx! {
        div { class: "page",
            h2 { "Home" }
            p { class: "page-subtitle", "Pick a question set and start an exam run." }

            if labels.is_empty() {
                p { class: "empty-hint",
                    "No question sets loaded. Launch with --pdf <file> to add exam PDFs."
                }
            } else {
                ul { class: "source-list",
                    for (index, label) in labels.into_iter().enumerate() {
                        li { key: "{index}",
                            span { class: "source-label", "{label}" }
                            Link {
                                class: "btn btn-primary",
                                to: Route::Exam { source_index: index },
                                "Start exam"
                            }
                        }
                    }
                }
            }

            p {
                Link { class: "btn btn-secondary", to: Route::Stats {}, "View statistics" }
            }
        }
    }
}
