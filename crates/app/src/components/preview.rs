use dioxus::prelude::*;

/// Document for the sandboxed frame. The page stylesheet does not reach
/// inside the frame, so the generated CSS travels with the markup.
pub fn sandboxed_document(markup: &str, stylesheet: &str) -> String {
    if stylesheet.is_empty() {
        markup.to_string()
    } else {
        format!("<style>{stylesheet}</style>{markup}")
    }
}

/// Container for the generated markup.
///
/// By default the markup becomes live page content, unescaped, styled by
/// the page-wide dynamic stylesheet. With `sandboxed` it is rendered in a
/// script-less iframe together with `stylesheet`, so it cannot reach the
/// hosting page.
#[component]
pub fn Preview(
    markup: String,
    #[props(default)] stylesheet: String,
    visible: bool,
    #[props(default)] sandboxed: bool,
) -> Element {
    let display = if visible { "display: block" } else { "display: none" };

    if sandboxed {
        let document = sandboxed_document(&markup, &stylesheet);
        rsx! {
            section { id: "preview-section", class: "preview", style: display,
                iframe {
                    class: "preview-frame",
                    title: "Generated background preview",
                    "sandbox": "",
                    "srcdoc": document,
                }
            }
        }
    } else {
        rsx! {
            section {
                id: "preview-section",
                class: "preview",
                style: display,
                dangerous_inner_html: markup,
            }
        }
    }
}
