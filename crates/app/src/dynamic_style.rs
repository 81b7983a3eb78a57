use dioxus::prelude::*;

/// Id of the single `<style>` element that carries generated CSS.
pub const DYNAMIC_STYLE_ID: &str = "dynamic-style";

/// Script that removes the reserved style element and, for a non-empty
/// stylesheet, appends a fresh one to `<head>`.
///
/// Strings are embedded as JSON literals, so quotes, backslashes and line
/// breaks in the CSS cannot escape the script.
pub fn dynamic_style_script(stylesheet: Option<&str>) -> String {
    let id = serde_json::Value::from(DYNAMIC_STYLE_ID);
    let mut script = format!(
        r#"(function() {{
    var existing = document.getElementById({id});
    if (existing) existing.remove();
"#
    );

    if let Some(css) = stylesheet.filter(|css| !css.is_empty()) {
        let css = serde_json::Value::from(css);
        script.push_str(&format!(
            r#"    var style = document.createElement("style");
    style.id = {id};
    style.textContent = {css};
    document.head.appendChild(style);
"#
        ));
    }

    script.push_str("})();");
    script
}

/// Replace the page-wide generated stylesheet.
pub fn replace_dynamic_style(stylesheet: Option<&str>) {
    document::eval(&dynamic_style_script(stylesheet));
}
