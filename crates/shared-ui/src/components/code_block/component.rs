use dioxus::prelude::*;

/// Read-only source listing. `text` is rendered as plain text, never as markup.
#[component]
pub fn CodeBlock(
    #[props(default)] title: String,
    #[props(default)] language: String,
    text: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "code-block", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        figure {
            ..merged,
            if !title.is_empty() {
                figcaption { class: "code-block-title", "{title}" }
            }
            pre { "data-language": language,
                code { "{text}" }
            }
        }
    }
}
