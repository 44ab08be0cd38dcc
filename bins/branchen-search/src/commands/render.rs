//! `render`: print the form markup for a given state

use crate::Context;
use branchen_core::{Error, Result};
use branchen_search_form::{Markup, SearchState, UiState};
use clap::Args;

#[derive(Args)]
pub struct RenderArgs {
    /// Value of the "what" field
    #[arg(long, default_value = "")]
    what: String,

    /// Value of the "where" field
    #[arg(long = "where", default_value = "")]
    where_text: String,

    /// Show the suggestion list under the "where" field
    #[arg(long, conflicts_with_all = ["locating", "error"])]
    suggestions: bool,

    /// Render the form while the device position is being acquired
    #[arg(long, conflicts_with = "error")]
    locating: bool,

    /// Open the error modal with this message
    #[arg(long)]
    error: Option<String>,
}

pub fn run(ctx: &Context, args: RenderArgs) -> Result<()> {
    let ui = match (args.suggestions, args.locating, args.error) {
        (true, _, _) => UiState::SuggestionsOpen,
        (_, true, _) => UiState::Locating,
        (_, _, Some(message)) => UiState::error(message),
        _ => UiState::Idle,
    };
    let state = SearchState {
        what: args.what,
        where_text: args.where_text,
        ui,
        ..SearchState::default()
    };

    let html = Markup::new()
        .and_then(|markup| markup.render(&state))
        .map_err(|e| Error::internal(e.to_string()))?;

    if ctx.json {
        crate::output::print_json(&serde_json::json!({ "state": state, "html": html }))
    } else {
        print!("{html}");
        Ok(())
    }
}
