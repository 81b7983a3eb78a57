use dioxus::prelude::*;

/// A button. `busy` marks it as working and disables it.
#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    /// The `type` attribute: `"button"` or `"submit"`.
    #[props(default = "button")]
    pub button_type: &'static str,
    #[props(default = false)]
    pub busy: bool,
    #[props(extends = GlobalAttributes)]
    pub attributes: Vec<Attribute>,
    pub children: Element,
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let base = vec![Attribute::new("class", "button", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, props.attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        button {
            r#type: props.button_type,
            disabled: props.busy,
            "aria-busy": if props.busy { "true" } else { "false" },
            ..merged,
            {props.children}
        }
    }
}
