//! Detail view of a single tool.

use crate::model::{Person, Tool};
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;

/// Which tool, if any, the detail overlay shows.
///
/// Clicking a row opens it; the close button and a click on the backdrop
/// both dismiss it.
#[derive(Debug, Clone, Default)]
pub struct DetailSelection {
    selected: Option<Arc<Tool>>,
}

impl DetailSelection {
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    /// Show `tool`, replacing any current selection.
    pub fn open(&mut self, tool: Arc<Tool>) {
        tracing::debug!(tool = %tool.name, "Opening detail view");
        self.selected = Some(tool);
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Backdrop click; same effect as [`close`](Self::close).
    pub fn dismiss_backdrop(&mut self) {
        self.close();
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Arc<Tool>> {
        self.selected.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    /// Rendered detail of the selected tool.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.selected.as_deref().map(render_detail)
    }
}

/// Render every attribute `tool` carries. Absent attributes are omitted.
#[must_use]
pub fn render_detail(tool: &Tool) -> String {
    let mut out = String::new();
    out.push_str(&tool.name);
    out.push('\n');
    out.push_str(&"=".repeat(tool.name.chars().count().max(1)));
    out.push('\n');

    if let Some(description) = &tool.description {
        out.push('\n');
        out.push_str(description.trim());
        out.push('\n');
    }

    let mut section = Section::new(&mut out);

    if let Some(config) = tool.compliance.as_ref().and_then(|c| c.config.as_ref()) {
        section.field("Compliance docs", config.docs.as_deref());
        section.field("Compliance instructions", config.instructions.as_deref());
    }
    section.field("Listing notes", tool.tooling_listing_notes.as_deref());
    section.list("Tooling types", tool.tooling_types.as_deref());
    section.list("Languages", tool.languages.as_deref());
    section.list("Environments", tool.environments.as_deref());
    section.people("Creators", tool.creators.as_deref());
    section.people("Maintainers", tool.maintainers.as_deref());
    section.field("License", tool.license.as_deref());
    section.field("Source", tool.source.as_deref());
    section.field("Homepage", tool.homepage.as_deref());

    if let Some(dialects) = &tool.supported_dialects {
        section.list("Supported drafts", dialects.draft.as_deref());
        if let Some(additional) = &dialects.additional {
            let rendered = additional_dialects(additional);
            section.list("Additional dialects", Some(rendered.as_slice()));
        }
    }

    if let Some(identifier) = tool.bowtie.as_ref().and_then(|b| b.identifier.as_deref()) {
        section.field("Bowtie identifier", Some(identifier));
        section.field("Bowtie report", tool.bowtie_url().as_deref());
    }
    section.list("Depends on validators", tool.depends_on_validators.as_deref());
    section.field(
        "Last updated",
        tool.last_updated.as_deref().map(format_date).as_deref(),
    );

    for (key, value) in &tool.extra {
        section.field(key, Some(&extra_value(value)));
    }

    out
}

/// "March 10, 2024" for ISO dates; anything else is shown as written.
fn format_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |date| date.format("%B %-d, %Y").to_string())
}

/// `additional` is free-form; the usual shape is a list of `{name, source}`.
fn additional_dialects(value: &Value) -> Vec<String> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        other => std::slice::from_ref(other),
    };
    items
        .iter()
        .map(|item| {
            let name = item.get("name").and_then(Value::as_str);
            let source = item.get("source").and_then(Value::as_str);
            match (name, source) {
                (Some(name), Some(source)) => format!("{name} ({source})"),
                (Some(name), None) => name.to_string(),
                _ => extra_value(item),
            }
        })
        .collect()
}

fn extra_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        other => other.to_string(),
    }
}

struct Section<'a> {
    out: &'a mut String,
}

impl<'a> Section<'a> {
    fn new(out: &'a mut String) -> Self {
        out.push('\n');
        Self { out }
    }

    fn field(&mut self, label: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.out.push_str(&format!("{label}: {value}\n"));
        }
    }

    fn list(&mut self, label: &str, values: Option<&[String]>) {
        let Some(values) = values else {
            return;
        };
        self.out.push_str(&format!("{label}:\n"));
        for value in values {
            self.out.push_str(&format!("  - {value}\n"));
        }
    }

    fn people(&mut self, label: &str, people: Option<&[Person]>) {
        let rendered: Option<Vec<String>> = people.map(|p| p.iter().map(Person::display).collect());
        self.list(label, rendered.as_deref());
    }
}
