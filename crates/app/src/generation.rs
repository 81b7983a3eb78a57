//! One generation cycle: validate, show loading, call the workflow, render, reset.
//!
//! Everything here is platform-independent so the cycle can be exercised
//! without a browser. The generator page wires it to signals and the DOM.

use dioxus::prelude::*;
use shared_types::{AppError, Description, GeneratedBackground};
use std::fmt;
use std::future::Future;

/// Submit button label while idle.
pub const RESTING_LABEL: &str = "Generate Magic Background";
/// Submit button label while a cycle is loading.
pub const WORKING_LABEL: &str = "Generating…";

pub const HTML_FAILURE_MESSAGE: &str = "failed to generate HTML code, try again";
pub const CSS_FAILURE_MESSAGE: &str = "failed to generate CSS code, try again";

pub fn button_label(loading: bool) -> &'static str {
    if loading {
        WORKING_LABEL
    } else {
        RESTING_LABEL
    }
}

/// The visible result sinks: the two code listings and the preview container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputPanel {
    pub html_code: String,
    pub css_code: String,
    pub preview_visible: bool,
    pub preview_markup: String,
    /// CSS for a preview that cannot see the page stylesheet.
    pub preview_style: String,
}

impl OutputPanel {
    pub fn apply_success(&mut self, background: &GeneratedBackground) {
        self.html_code = background.code_or_empty().to_string();
        self.css_code = background.style_or_empty().to_string();
        self.preview_visible = true;
        self.preview_markup = background.code_or_empty().to_string();
        self.preview_style = background.style_or_empty().to_string();
    }

    /// Fixed failure messages and an empty preview. Visibility is untouched.
    pub fn apply_failure(&mut self) {
        self.html_code = HTML_FAILURE_MESSAGE.to_string();
        self.css_code = CSS_FAILURE_MESSAGE.to_string();
        self.preview_markup.clear();
        self.preview_style.clear();
    }
}

/// Something that shows whether generation is in progress.
///
/// Calls are balanced: every `begin` is followed by exactly one `end`.
pub trait LoadingIndicator {
    fn begin(&mut self);
    fn end(&mut self);
}

/// In-flight cycle count; the page is loading while it is non-zero.
impl LoadingIndicator for Signal<u32> {
    fn begin(&mut self) {
        *self.write() += 1;
    }

    fn end(&mut self) {
        // The owning scope may already be gone when a cancelled task unwinds.
        if let Ok(mut count) = self.try_write() {
            *count = count.saturating_sub(1);
        }
    }
}

/// Holds the indicator in its loading state until dropped.
///
/// Release happens on every exit path, including a panic while rendering
/// the result.
pub struct LoadingGuard<L: LoadingIndicator> {
    indicator: L,
}

impl<L: LoadingIndicator> LoadingGuard<L> {
    pub fn acquire(mut indicator: L) -> Self {
        indicator.begin();
        Self { indicator }
    }
}

impl<L: LoadingIndicator> Drop for LoadingGuard<L> {
    fn drop(&mut self) {
        self.indicator.end();
    }
}

/// Identifies one cycle so late responses can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTicket(u64);

/// Hands out increasing tickets; only the newest ticket may touch the page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CycleTracker {
    latest: u64,
}

impl CycleTracker {
    pub fn begin(&mut self) -> CycleTicket {
        self.latest += 1;
        CycleTicket(self.latest)
    }

    pub fn is_current(&self, ticket: CycleTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// How a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Blank description; nothing happened.
    Skipped,
    Applied,
    Failed,
    /// A newer cycle started before this one's response arrived.
    Stale,
}

/// Run one cycle.
///
/// A blank `raw` description returns [`CycleOutcome::Skipped`] before the
/// indicator is touched. Otherwise the indicator is held for the duration
/// of `generate` and `apply`, and released afterwards whatever happens.
pub async fn run_cycle<I, G, Fut, T, A>(raw: &str, indicator: I, generate: G, apply: A) -> CycleOutcome
where
    I: LoadingIndicator,
    G: FnOnce(Description) -> Fut,
    Fut: Future<Output = T>,
    A: FnOnce(T) -> CycleOutcome,
{
    let Some(description) = Description::parse(raw) else {
        return CycleOutcome::Skipped;
    };

    let _loading = LoadingGuard::acquire(indicator);
    let response = generate(description).await;
    apply(response)
}

/// Apply the response of the cycle holding `ticket` to `panel`.
///
/// A response from a superseded cycle leaves the panel untouched. On
/// success the second element is the stylesheet the page should carry;
/// `None` there means the dynamic style element is removed.
pub fn apply_response<E: fmt::Display>(
    tracker: &CycleTracker,
    ticket: CycleTicket,
    result: Result<GeneratedBackground, E>,
    panel: &mut OutputPanel,
) -> (CycleOutcome, Option<String>) {
    if !tracker.is_current(ticket) {
        tracing::debug!(?ticket, "Discarding response from a superseded cycle");
        return (CycleOutcome::Stale, None);
    }

    match result {
        Ok(background) => {
            panel.apply_success(&background);
            let stylesheet = background.stylesheet().map(str::to_string);
            (CycleOutcome::Applied, stylesheet)
        }
        Err(e) => {
            let raw = e.to_string();
            let detail = AppError::from_server_error(&raw)
                .map(|err| err.to_string())
                .unwrap_or(raw);
            tracing::error!(error = %detail, "Failed to generate background");
            panel.apply_failure();
            (CycleOutcome::Failed, None)
        }
    }
}
