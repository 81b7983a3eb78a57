use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "validation")]
use validator::Validate;

/// User-supplied text describing the desired background.
///
/// Always trimmed and never empty; construct through [`Description::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Trim surrounding whitespace. Returns `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Request body sent to the workflow webhook and accepted by `POST /api/backgrounds`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct GenerateBackgroundRequest {
    /// Free-form description of the background to generate.
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "validate_not_blank", message = "Description is required"))
    )]
    pub description: String,
}

impl GenerateBackgroundRequest {
    /// The validated description, or `None` if the text is blank.
    pub fn description(&self) -> Option<Description> {
        Description::parse(&self.description)
    }
}

impl From<Description> for GenerateBackgroundRequest {
    fn from(description: Description) -> Self {
        Self {
            description: description.into_inner(),
        }
    }
}

#[cfg(feature = "validation")]
fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Decoded workflow response: an HTML fragment and a CSS fragment.
///
/// Both fields may be missing from the response; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeneratedBackground {
    /// HTML markup for the preview container.
    #[serde(default)]
    pub code: Option<String>,
    /// CSS applied to the whole page.
    #[serde(default)]
    pub style: Option<String>,
}

impl GeneratedBackground {
    pub fn code_or_empty(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }

    pub fn style_or_empty(&self) -> &str {
        self.style.as_deref().unwrap_or_default()
    }

    /// The stylesheet to inject, if there is anything to inject.
    pub fn stylesheet(&self) -> Option<&str> {
        self.style.as_deref().filter(|s| !s.is_empty())
    }

    /// Read a workflow reply.
    ///
    /// `code` and `style` are taken from an object the loose way a browser
    /// script would: falsy values (missing, `null`, `false`, `0`, `""`) read
    /// as absent and any other value is stringified. Any other non-null
    /// reply carries no fields. A `null` reply is not a background at all.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Null => None,
            Value::Object(fields) => Some(Self {
                code: fields.get("code").and_then(loose_text),
                style: fields.get("style").and_then(loose_text),
            }),
            _ => Some(Self::default()),
        }
    }
}

/// `Some(text)` for a truthy value, `None` for a falsy one.
fn loose_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    let truthy = match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
    truthy.then(|| stringify(value))
}

fn stringify(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
