//! HTML rendering of the form and the error modal.
//!
//! Element ids, names and classes match what the directory's stylesheet and
//! the host scripts look for (`what_search`, `where_search`,
//! `location-dropdown`, `location-modal-overlay`). All values are escaped.

use crate::messages;
use crate::state::SearchState;
use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

const FORM_TEMPLATE_NAME: &str = "search_form";

const FORM_TEMPLATE: &str = r#"<form name="startpageForm" class="mod mod-Grouped grouped">
  <div class="mod-Input input input--float-label" data-name="WAS">
    <input type="search" id="what_search" name="WAS" value="{{what}}" placeholder="{{what_placeholder}}" class="input__input input__searchblock" spellcheck="false" aria-label="Was" autofocus>
    <div class="input__notice"></div>
  </div>
  <div class="mod-Grouped__flex-wrapper">
    <div class="mod-Input input input--float-label" data-name="WO">
      <input type="search" id="where_search" name="WO" value="{{where}}" placeholder="{{where_placeholder}}"{{#if locating}} disabled{{/if}} class="input__input input__searchblock" spellcheck="false" aria-label="Wo" autocomplete="address-level2">
{{#if suggestions_open}}
      <ul class="WO-Vorschalgsliste" id="location-dropdown">
        <li class="geolocation-trigger" tabindex="1">
          <span>{{use_my_location}}</span>
          <img src="/assets/gsbiz/images/ic-compass.svg" alt="Location" width="16" height="16">
        </li>
      </ul>
{{/if}}
      <div class="input__notice"></div>
    </div>
    <button type="submit" class="gc-btn gc-btn--black gc-btn--l search_go" aria-label="Suche">
      <span class="gc-btn__text">{{submit_label}}</span>
    </button>
  </div>
</form>
{{#if error}}
<div id="location-modal-overlay" data-dismiss="overlay">
  <div class="location-modal" role="alertdialog" data-stop-propagation="true">
    <div class="location-modal__title">{{error_title}}</div>
    <div class="location-modal__message">{{error}}</div>
    <div class="location-modal__actions">
      <button type="button" data-dismiss="button">{{dismiss_label}}</button>
    </div>
  </div>
</div>
{{/if}}
"#;

/// Rendering failures.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("invalid template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Template context derived from [`SearchState`].
#[derive(Debug, Serialize)]
struct FormView<'a> {
    what: &'a str,
    #[serde(rename = "where")]
    where_text: &'a str,
    locating: bool,
    suggestions_open: bool,
    error: Option<&'a str>,
    what_placeholder: &'static str,
    where_placeholder: &'static str,
    use_my_location: &'static str,
    submit_label: &'static str,
    error_title: &'static str,
    dismiss_label: &'static str,
}

impl<'a> FormView<'a> {
    fn from_state(state: &'a SearchState) -> Self {
        let locating = state.is_locating();
        Self {
            what: &state.what,
            where_text: &state.where_text,
            locating,
            suggestions_open: state.suggestions_visible(),
            error: state.error(),
            what_placeholder: messages::WHAT_PLACEHOLDER,
            where_placeholder: if locating {
                messages::WHERE_LOCATING_PLACEHOLDER
            } else {
                messages::WHERE_PLACEHOLDER
            },
            use_my_location: messages::USE_MY_LOCATION,
            submit_label: messages::SUBMIT_LABEL,
            error_title: messages::ERROR_TITLE,
            dismiss_label: messages::DISMISS_LABEL,
        }
    }
}

/// Compiled form template.
pub struct Markup {
    registry: Handlebars<'static>,
}

impl Markup {
    pub fn new() -> Result<Self, MarkupError> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(FORM_TEMPLATE_NAME, FORM_TEMPLATE)
            .map_err(Box::new)?;
        Ok(Self { registry })
    }

    /// Render `state` to HTML.
    pub fn render(&self, state: &SearchState) -> Result<String, MarkupError> {
        let view = FormView::from_state(state);
        Ok(self.registry.render(FORM_TEMPLATE_NAME, &view)?)
    }
}
