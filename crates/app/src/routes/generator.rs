use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdSparkles;
use dioxus_free_icons::Icon;
use shared_types::FeatureFlags;
use shared_ui::{
    Button, Card, CardContent, CardDescription, CardHeader, CardTitle, CodeBlock, Form, Textarea,
};

use crate::components::preview::Preview;
use crate::dynamic_style::replace_dynamic_style;
use crate::generation::{
    apply_response, button_label, run_cycle, CycleOutcome, CycleTracker, OutputPanel,
};

/// Generator page: describe a background, get its HTML and CSS, and see it
/// applied to the page.
#[component]
pub fn Generator() -> Element {
    let flags = use_context::<FeatureFlags>();
    let mut description = use_signal(String::new);
    let in_flight = use_signal(|| 0u32);
    let mut tracker = use_signal(CycleTracker::default);
    let mut panel = use_signal(OutputPanel::default);

    let loading = in_flight() > 0;

    // `Form` has already suppressed native submission.
    let handle_submit = move |_: FormEvent| async move {
        let raw = description.peek().clone();

        let outcome = run_cycle(
            &raw,
            in_flight,
            move |description| {
                let ticket = tracker.write().begin();
                async move {
                    let result = server::api::generate_background(description.into_inner()).await;
                    (ticket, result)
                }
            },
            move |(ticket, result)| {
                let (outcome, stylesheet) =
                    apply_response(&tracker.peek(), ticket, result, &mut panel.write());
                if outcome == CycleOutcome::Applied {
                    replace_dynamic_style(stylesheet.as_deref());
                }
                outcome
            },
        )
        .await;

        tracing::debug!(?outcome, "Generation cycle finished");
    };

    let label = button_label(loading);
    let current = panel.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./generator.css") }

        div { class: "generator-page",
            Card { class: "generator-card",
                CardHeader {
                    CardTitle { "Magic Background" }
                    CardDescription {
                        "Describe the background you want. The workflow writes the HTML and CSS and the page wears it."
                    }
                }
                CardContent {
                    Form { class: "form-group", onsubmit: handle_submit,
                        Textarea {
                            id: "description",
                            label: "Description",
                            placeholder: "Slow purple and blue aurora waves over a dark sky",
                            value: description(),
                            disabled: loading,
                            on_input: move |e: FormEvent| description.set(e.value()),
                        }
                        Button { id: "generate-btn", button_type: "submit", busy: loading,
                            Icon::<LdSparkles> { icon: LdSparkles, width: 18, height: 18 }
                            span { "{label}" }
                        }
                    }
                    div { class: "generator-code",
                        CodeBlock { id: "html-code", title: "HTML", language: "html", text: current.html_code }
                        CodeBlock { id: "css-code", title: "CSS", language: "css", text: current.css_code }
                    }
                }
            }

            Preview {
                markup: current.preview_markup,
                stylesheet: current.preview_style,
                visible: current.preview_visible,
                sandboxed: flags.sandboxed_preview,
            }
        }
    }
}
