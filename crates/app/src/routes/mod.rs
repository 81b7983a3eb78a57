pub mod generator;
pub mod not_found;

use dioxus::prelude::*;

use generator::Generator;
use not_found::NotFound;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Generator {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}
