//! View command handler.
//!
//! Implements the `view` subcommand: mount preferences from a URL, apply the
//! requested changes, run the pipeline and print the grouped result.

use crate::config::AppConfig;
use crate::pipeline::{
    auto_detect_format, exit_codes, load_catalog_with_context, write_output, OutputFormat,
    OutputTarget,
};
use crate::preferences::{
    FilterDimension, GroupBy, PreferenceAction, PreferenceStore, Preferences, SortBy, SortOrder,
    UrlEnvironment,
};
use crate::render::{filter_controls, render_csv, render_table, FilterControl};
use crate::view::{GroupedView, ViewModel};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use url::Url;

/// Preference changes requested on the command line, applied in a fixed
/// order after mounting: reset, then scalars, then filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceOverrides {
    pub reset: bool,
    pub query: Option<String>,
    pub group_by: Option<GroupBy>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    /// Header clicks, applied after `sort_by`/`sort_order`
    pub sort_columns: Vec<SortBy>,
    pub languages: Vec<String>,
    pub licenses: Vec<String>,
    pub drafts: Vec<String>,
    pub tooling_types: Vec<String>,
}

impl PreferenceOverrides {
    /// The overrides as reducer actions, in application order.
    #[must_use]
    pub fn actions(&self, current: &Preferences) -> Vec<PreferenceAction> {
        let mut actions = Vec::new();
        if self.reset {
            actions.push(PreferenceAction::Reset);
        }
        if let Some(query) = &self.query {
            actions.push(PreferenceAction::SetQuery(query.clone()));
        }
        if let Some(group_by) = self.group_by {
            actions.push(PreferenceAction::SetGroupBy(group_by));
        }
        if self.sort_by.is_some() || self.sort_order.is_some() {
            let base = if self.reset {
                Preferences::default()
            } else {
                current.clone()
            };
            actions.push(PreferenceAction::SetSort {
                sort_by: self.sort_by.unwrap_or(base.sort_by),
                sort_order: self.sort_order.unwrap_or(base.sort_order),
            });
        }
        actions.extend(self.sort_columns.iter().copied().map(PreferenceAction::SortColumn));

        let filters = [
            (FilterDimension::Languages, &self.languages),
            (FilterDimension::Licenses, &self.licenses),
            (FilterDimension::Drafts, &self.drafts),
            (FilterDimension::ToolingTypes, &self.tooling_types),
        ];
        for (dimension, values) in filters {
            if !values.is_empty() {
                actions.push(PreferenceAction::SetFilter {
                    dimension,
                    values: values.clone(),
                });
            }
        }
        actions
    }
}

/// Settings for one `view` invocation.
#[derive(Debug, Clone)]
pub struct ViewCommand {
    pub catalog_path: PathBuf,
    /// Page URL or bare query string to mount preferences from
    pub location: Option<String>,
    pub overrides: PreferenceOverrides,
    /// Include filter checkbox lists in the output
    pub show_filters: bool,
    pub fail_on_empty: bool,
    pub quiet: bool,
}

/// JSON shape of a rendered view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewOutput<'a> {
    url: &'a str,
    preferences: &'a Preferences,
    #[serde(flatten)]
    view: &'a GroupedView,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<Vec<FilterControl>>,
}

/// Run the view command
pub fn run_view(command: ViewCommand, config: &AppConfig) -> Result<i32> {
    let loaded = load_catalog_with_context(&command.catalog_path, command.quiet)?;

    let initial = initial_url(command.location.as_deref(), &config.base_url)?;
    let mut store = PreferenceStore::mount(UrlEnvironment::new(initial));
    for action in command.overrides.actions(store.preferences()) {
        store.dispatch(action);
    }
    let prefs = store.preferences().clone();

    let mut view_model = ViewModel::new(loaded.catalog.clone(), config.search);
    let view = view_model.view(&prefs);
    let url = store.environment().url().to_string();
    if !command.quiet {
        tracing::info!("View URL: {url}");
    }

    let target = OutputTarget::from_option(config.output.file.clone());
    let content = match auto_detect_format(config.output.format, &target) {
        OutputFormat::Table | OutputFormat::Auto => {
            let mut out = render_table(&view, &prefs);
            if command.show_filters {
                let uniques = loaded.unique_values(&config.values);
                out.push_str(&render_filter_summary(&filter_controls(&uniques, &prefs)));
            }
            out
        }
        OutputFormat::Csv => render_csv(&view),
        OutputFormat::Json => {
            let filters = command.show_filters.then(|| {
                let uniques = loaded.unique_values(&config.values);
                filter_controls(&uniques, &prefs)
            });
            serde_json::to_string_pretty(&ViewOutput {
                url: &url,
                preferences: &prefs,
                view: &view,
                filters,
            })
            .context("Failed to serialize view")?
        }
    };
    write_output(&content, &target, command.quiet)?;

    if command.fail_on_empty && view.number_of_tools == 0 {
        return Ok(exit_codes::EMPTY_VIEW);
    }
    Ok(exit_codes::SUCCESS)
}

/// The address preferences are mounted from.
///
/// A full URL is used as is. A bare query string, or nothing, is attached to
/// `base_url`.
fn initial_url(location: Option<&str>, base_url: &str) -> Result<Url> {
    let mut base =
        Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;
    let Some(location) = location else {
        return Ok(base);
    };
    if let Ok(url) = Url::parse(location) {
        return Ok(url);
    }
    Preferences::from_location(location).apply_to_url(&mut base);
    Ok(base)
}

fn render_filter_summary(controls: &[FilterControl]) -> String {
    let mut out = String::from("\nFilters\n");
    for control in controls {
        let options: Vec<String> = control
            .options
            .iter()
            .map(|o| format!("[{}] {}", if o.checked { "x" } else { " " }, o.value))
            .collect();
        out.push_str(&format!("  {}: {}\n", control.label, options.join("  ")));
    }
    out
}
