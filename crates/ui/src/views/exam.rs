use dioxus::prelude::*;
use dioxus_router::Link;

use exam_core::model::OptionLabel;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::ExamVm;

/// Owned snapshot of what the exam screen shows this frame.
#[derive(Clone, Debug, PartialEq)]
enum ExamScreen {
    Failed(String),
    Question {
        progress: String,
        text: String,
        options: Vec<(OptionLabel, String)>,
    },
    Feedback {
        progress: String,
        correct: bool,
        chosen: String,
        correct_label: String,
        correct_text: String,
    },
    Complete {
        grade: String,
    },
}

fn screen_from(vm: &Result<ExamVm, String>) -> ExamScreen {
    let exam = match vm {
        Err(message) => return ExamScreen::Failed(message.clone()),
        Ok(exam) => exam,
    };

    if let Some(feedback) = exam.feedback() {
        return ExamScreen::Feedback {
            progress: exam.progress_label(),
            correct: feedback.correct,
            chosen: feedback.chosen.to_string(),
            correct_label: feedback.correct_label.to_string(),
            correct_text: feedback.correct_text.clone(),
        };
    }
    if exam.is_complete() {
        return ExamScreen::Complete {
            grade: exam.grade_label(),
        };
    }
    match exam.question() {
        Some(question) => ExamScreen::Question {
            progress: exam.progress_label(),
            text: question.text().to_owned(),
            options: OptionLabel::ALL
                .iter()
                .map(|&label| (label, question.option(label).to_owned()))
                .collect(),
        },
        None => ExamScreen::Complete {
            grade: exam.grade_label(),
        },
    }
}

#[component]
pub fn ExamView(source_index: usize) -> Element {
    let ctx = use_context::<AppContext>();
    let services = ctx.services().clone();

    let mut vm = use_signal({
        let ctx = ctx.clone();
        move || match ctx.source(source_index) {
            Some(source) => {
                ExamVm::start(ctx.services(), source.as_ref()).map_err(|e| e.to_string())
            }
            None => Err("Unknown question set.".to_owned()),
        }
    });
    let mut action_error = use_signal(|| None::<String>);

    let screen = screen_from(&vm.read());

    let on_choose = {
        let services = services.clone();
        use_callback(move |label: OptionLabel| {
            let outcome = vm.with_mut(|state| match state {
                Ok(exam) => exam.choose(&services, label).map_err(|e| e.to_string()),
                Err(_) => Ok(()),
            });
            action_error.set(outcome.err());
        })
    };
    let on_skip = {
        let services = services.clone();
        use_callback(move |()| {
            let outcome = vm.with_mut(|state| match state {
                Ok(exam) => exam.skip(&services).map_err(|e| e.to_string()),
                Err(_) => Ok(()),
            });
            action_error.set(outcome.err());
        })
    };
    let on_continue = {
        let services = services.clone();
        use_callback(move |()| {
            vm.with_mut(|state| {
                if let Ok(exam) = state {
                    exam.advance(&services);
                }
            });
        })
    };

    rsx! {
        div { class: "page exam-page",
            h2 { "Exam" }

            if let Some(message) = action_error() {
                p { class: "error-line", "{message}" }
            }

            match screen {
                ExamScreen::Failed(message) => rsx! {
                    p { class: "error-line", "{message}" }
                    Link { class: "btn btn-secondary", to: Route::Home {}, "Back to Home" }
                },
                ExamScreen::Question { progress, text, options } => rsx! {
                    p { class: "exam-progress", "{progress}" }
                    div { class: "exam-question",
                        p { class: "exam-question__text", "{text}" }
                        div { class: "exam-options",
                            for (label, option) in options {
                                button {
                                    class: "exam-option",
                                    key: "{label}",
                                    onclick: move |_| on_choose.call(label),
                                    span { class: "exam-option__label", "{label}" }
                                    "{option}"
                                }
                            }
                        }
                        button {
                            class: "btn btn-ghost",
                            onclick: move |_| on_skip.call(()),
                            "Skip (not recorded)"
                        }
                    }
                },
                ExamScreen::Feedback { progress, correct, chosen, correct_label, correct_text } => rsx! {
                    p { class: "exam-progress", "{progress}" }
                    div { class: if correct { "exam-feedback exam-feedback--right" } else { "exam-feedback exam-feedback--wrong" },
                        if correct {
                            h3 { "Correct!" }
                            p { "You chose {chosen}." }
                        } else {
                            h3 { "Wrong" }
                            p { "You chose {chosen}. Correct answer: {correct_label} ({correct_text})" }
                        }
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| on_continue.call(()),
                            "Continue"
                        }
                    }
                },
                ExamScreen::Complete { grade } => rsx! {
                    div { class: "exam-complete",
                        h3 { "Exam complete" }
                        p { "{grade}" }
                        div { class: "exam-complete__actions",
                            Link { class: "btn btn-primary", to: Route::Stats {}, "View statistics" }
                            Link { class: "btn btn-secondary", to: Route::Home {}, "Back to Home" }
                        }
                    }
                },
            }
        }
    }
}
