//! Grouped table and CSV output.

use super::{convert_to_title_case, csv_escape, pad, truncate};
use crate::model::{sort_by_draft_order, Tool};
use crate::preferences::{GroupBy, Preferences, SortBy, SortOrder};
use crate::view::{GroupedView, NONE_GROUP};
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// A table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Name,
    ToolingType,
    Languages,
    Drafts,
    License,
    Bowtie,
}

impl TableColumn {
    const ALL: [Self; 6] = [
        Self::Name,
        Self::ToolingType,
        Self::Languages,
        Self::Drafts,
        Self::License,
        Self::Bowtie,
    ];

    /// Columns shown for a grouping. The column a table is grouped on would
    /// repeat the heading on every row, so it is hidden.
    #[must_use]
    pub fn visible_for(group_by: GroupBy) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|column| match column {
                Self::ToolingType => group_by != GroupBy::ToolingTypes,
                Self::Languages => group_by != GroupBy::Languages,
                _ => true,
            })
            .collect()
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::ToolingType => "TOOLING TYPE",
            Self::Languages => "LANGUAGES",
            Self::Drafts => "DRAFTS",
            Self::License => "LICENSE",
            Self::Bowtie => "BOWTIE",
        }
    }

    const fn sort_by(self) -> Option<SortBy> {
        match self {
            Self::Name => Some(SortBy::Name),
            Self::License => Some(SortBy::License),
            _ => None,
        }
    }

    const fn max_width(self) -> usize {
        match self {
            Self::Name | Self::ToolingType | Self::Drafts => 40,
            Self::Languages => 30,
            Self::License => 20,
            Self::Bowtie => 6,
        }
    }

    /// Header text; the active sort column carries a direction arrow.
    fn header(self, prefs: &Preferences) -> String {
        match self.sort_by() {
            Some(sort_by) if sort_by == prefs.sort_by => {
                let arrow = match prefs.sort_order {
                    SortOrder::Ascending => "▲",
                    SortOrder::Descending => "▼",
                };
                format!("{} {arrow}", self.title())
            }
            _ => self.title().to_string(),
        }
    }

    fn cell(self, tool: &Tool) -> String {
        match self {
            Self::Name => tool.name.clone(),
            Self::ToolingType => tool
                .tooling_types
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|t| convert_to_title_case(t, "-", " "))
                .collect::<Vec<_>>()
                .join(", "),
            Self::Languages => tool.languages.as_deref().unwrap_or_default().join(", "),
            Self::Drafts => drafts_in_release_order(tool).join(" "),
            Self::License => tool.license.clone().unwrap_or_default(),
            Self::Bowtie => {
                let mark = if tool.bowtie_url().is_some() { "✓" } else { "✗" };
                mark.to_string()
            }
        }
    }
}

fn drafts_in_release_order(tool: &Tool) -> Vec<String> {
    let mut drafts = tool.drafts().unwrap_or_default().to_vec();
    sort_by_draft_order(&mut drafts);
    drafts
}

fn count_line(number_of_tools: usize) -> String {
    match number_of_tools {
        1 => "1 tool".to_string(),
        n => format!("{n} tools"),
    }
}

/// Render the grouped view as terminal tables, one section per group.
#[must_use]
pub fn render_table(view: &GroupedView, prefs: &Preferences) -> String {
    let mut out = String::new();
    out.push_str(&count_line(view.number_of_tools));
    out.push('\n');

    if view.is_empty() {
        out.push_str("\nNo tools match the current preferences.\n");
        return out;
    }

    let columns = TableColumn::visible_for(prefs.group_by);

    for (label, tools) in &view.groups {
        out.push('\n');
        if label != NONE_GROUP {
            out.push_str(&format!("── {} ──\n", convert_to_title_case(label, "-", " ")));
        }
        render_group(&mut out, tools, &columns, prefs);
    }

    out
}

fn render_group(out: &mut String, tools: &[Arc<Tool>], columns: &[TableColumn], prefs: &Preferences) {
    let headers: Vec<String> = columns.iter().map(|c| c.header(prefs)).collect();
    let rows: Vec<Vec<String>> = tools
        .iter()
        .map(|tool| {
            columns
                .iter()
                .map(|c| truncate(&c.cell(tool), c.max_width()))
                .collect()
        })
        .collect();

    // Calculate column widths
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, _)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(headers[i].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    push_row(out, &headers, &widths);
    for row in &rows {
        push_row(out, row, &widths);
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Render the grouped view as CSV, one row per group membership.
#[must_use]
pub fn render_csv(view: &GroupedView) -> String {
    let mut out = String::from("Group,Name,Tooling Types,Languages,Drafts,License,Bowtie\n");

    for (label, tools) in &view.groups {
        for tool in tools {
            out.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                csv_escape(label),
                csv_escape(&tool.name),
                csv_escape(&tool.tooling_types.as_deref().unwrap_or_default().join("; ")),
                csv_escape(&tool.languages.as_deref().unwrap_or_default().join("; ")),
                csv_escape(&drafts_in_release_order(tool).join("; ")),
                csv_escape(tool.license.as_deref().unwrap_or_default()),
                csv_escape(&tool.bowtie_url().unwrap_or_default()),
            ));
        }
    }

    out
}
