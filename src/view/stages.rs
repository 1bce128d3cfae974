//! The four pipeline stages. Each is a pure function of its inputs.

use super::{GroupedView, NONE_GROUP};
use crate::extract::{collation_key, compare_collated, field_value, FieldValue};
use crate::model::Tool;
use crate::preferences::{FilterDimension, GroupBy, Preferences, SortBy, SortOrder};
use crate::search::SearchIndex;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Stage 1: fuzzy search. A blank query passes the catalog through.
#[must_use]
pub fn search_stage(index: &SearchIndex, query: &str) -> Vec<Arc<Tool>> {
    index.search(query)
}

/// Stage 2: keep tools matching every non-empty filter dimension.
///
/// Within a dimension any selected value may match (OR); across dimensions
/// all must (AND). Comparison ignores case. A tool without the field fails
/// a non-empty filter on it.
#[must_use]
pub fn filter_stage(tools: &[Arc<Tool>], prefs: &Preferences) -> Vec<Arc<Tool>> {
    let active: Vec<(&str, Vec<String>)> = FilterDimension::ALL
        .into_iter()
        .filter_map(|dimension| {
            let selected = prefs.filter(dimension);
            (!selected.is_empty()).then(|| {
                (
                    dimension.field_path(),
                    selected.iter().map(|v| v.to_lowercase()).collect(),
                )
            })
        })
        .collect();

    if active.is_empty() {
        return tools.to_vec();
    }

    let kept: Vec<Arc<Tool>> = tools
        .iter()
        .filter(|tool| {
            active
                .iter()
                .all(|(path, selected)| matches_any(tool, path, selected))
        })
        .cloned()
        .collect();

    tracing::debug!(input = tools.len(), kept = kept.len(), "Filter stage");
    kept
}

fn matches_any(tool: &Tool, path: &str, selected_lower: &[String]) -> bool {
    field_value(tool, path).is_some_and(|value| {
        value
            .as_slice()
            .iter()
            .any(|v| selected_lower.contains(&v.to_lowercase()))
    })
}

/// Stage 3: stable sort on the folded (case- and accent-insensitive) sort key.
///
/// A tool without the key sorts as the empty string. Descending order keeps
/// equal keys in their input order.
#[must_use]
pub fn sort_stage(tools: &[Arc<Tool>], sort_by: SortBy, order: SortOrder) -> Vec<Arc<Tool>> {
    let mut keyed: Vec<(String, Arc<Tool>)> = tools
        .iter()
        .map(|tool| (sort_key(tool, sort_by), Arc::clone(tool)))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match order {
        SortOrder::Ascending => a.cmp(b),
        SortOrder::Descending => b.cmp(a),
    });

    keyed.into_iter().map(|(_, tool)| tool).collect()
}

fn sort_key(tool: &Tool, sort_by: SortBy) -> String {
    match field_value(tool, sort_by.as_str()) {
        Some(FieldValue::Scalar(value)) => collation_key(&value),
        Some(FieldValue::List(values)) => values.first().map(|v| collation_key(v)).unwrap_or_default(),
        None => String::new(),
    }
}

/// Stage 4: group by a field, fanning a tool out to every value it holds.
///
/// Group order ignores case and accents; tools keep their sorted order
/// inside each group. A tool whose field is absent or an empty list joins no
/// group and is not counted.
#[must_use]
pub fn group_stage(tools: &[Arc<Tool>], group_by: GroupBy) -> GroupedView {
    let Some(path) = group_by.field_path() else {
        if tools.is_empty() {
            return GroupedView::default();
        }
        let mut groups = IndexMap::with_capacity(1);
        groups.insert(NONE_GROUP.to_string(), tools.to_vec());
        return GroupedView {
            groups,
            number_of_tools: tools.len(),
        };
    };

    let mut groups: IndexMap<String, Vec<Arc<Tool>>> = IndexMap::new();
    let mut number_of_tools = 0;

    for tool in tools {
        let Some(value) = field_value(tool, path) else {
            continue;
        };
        // A value repeated within one record adds it only once
        let mut seen = HashSet::new();
        for label in value.as_slice() {
            if seen.insert(label.as_str()) {
                groups.entry(label.clone()).or_default().push(Arc::clone(tool));
            }
        }
        if !seen.is_empty() {
            number_of_tools += 1;
        }
    }

    groups.sort_by(|a, _, b, _| compare_collated(a, b));
    tracing::debug!(
        group_by = %group_by,
        groups = groups.len(),
        number_of_tools,
        "Group stage"
    );
    GroupedView {
        groups,
        number_of_tools,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arcs(tools: Vec<Tool>) -> Vec<Arc<Tool>> {
        tools.into_iter().map(Arc::new).collect()
    }

    fn names(tools: &[Arc<Tool>]) -> Vec<&str> {
        tools.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_filter_or_within_and_across() {
        let tools = arcs(vec![
            Tool::new("a").with_languages(&["Python"]).with_license("MIT"),
            Tool::new("b").with_languages(&["Go"]).with_license("Apache-2.0"),
            Tool::new("c").with_languages(&["Go", "Rust"]).with_license("MIT"),
            Tool::new("d").with_license("MIT"),
        ]);
        let prefs = Preferences {
            languages: vec!["python".to_string(), "GO".to_string()],
            licenses: vec!["mit".to_string()],
            ..Preferences::default()
        };
        assert_eq!(names(&filter_stage(&tools, &prefs)), vec!["a", "c"]);
    }

    #[test]
    fn test_filter_passthrough_without_constraints() {
        let tools = arcs(vec![Tool::new("a"), Tool::new("b")]);
        assert_eq!(filter_stage(&tools, &Preferences::default()).len(), 2);
    }

    #[test]
    fn test_filter_drafts_dimension() {
        let tools = arcs(vec![
            Tool::new("old").with_drafts(&["4"]),
            Tool::new("new").with_drafts(&["2020-12"]),
        ]);
        let prefs = Preferences {
            drafts: vec!["2020-12".to_string()],
            ..Preferences::default()
        };
        assert_eq!(names(&filter_stage(&tools, &prefs)), vec!["new"]);
    }

    #[test]
    fn test_sort_missing_license_first_ascending() {
        let tools = arcs(vec![
            Tool::new("x").with_license("MIT"),
            Tool::new("y"),
            Tool::new("z").with_license("apache-2.0"),
        ]);
        let sorted = sort_stage(&tools, SortBy::License, SortOrder::Ascending);
        assert_eq!(names(&sorted), vec!["y", "z", "x"]);
        let sorted = sort_stage(&tools, SortBy::License, SortOrder::Descending);
        assert_eq!(names(&sorted), vec!["x", "z", "y"]);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let tools = arcs(vec![
            Tool::new("b1").with_license("MIT"),
            Tool::new("a").with_license("Apache-2.0"),
            Tool::new("b2").with_license("mit"),
        ]);
        let asc = sort_stage(&tools, SortBy::License, SortOrder::Ascending);
        assert_eq!(names(&asc), vec!["a", "b1", "b2"]);
        let desc = sort_stage(&tools, SortBy::License, SortOrder::Descending);
        assert_eq!(names(&desc), vec!["b1", "b2", "a"]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let tools = arcs(vec![Tool::new("beta"), Tool::new("Alpha"), Tool::new("alpha2")]);
        let sorted = sort_stage(&tools, SortBy::Name, SortOrder::Ascending);
        assert_eq!(names(&sorted), vec!["Alpha", "alpha2", "beta"]);
    }

    #[test]
    fn test_group_fan_out_and_count() {
        let tools = arcs(vec![
            Tool::new("A").with_tooling_types(&["validator", "code-generator"]),
            Tool::new("B").with_tooling_types(&["validator"]),
            Tool::new("C"),
        ]);
        let view = group_stage(&tools, GroupBy::ToolingTypes);
        let labels: Vec<&str> = view.groups.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["code-generator", "validator"]);
        assert_eq!(names(&view.groups["validator"]), vec!["A", "B"]);
        assert_eq!(names(&view.groups["code-generator"]), vec!["A"]);
        assert_eq!(view.number_of_tools, 2);
    }

    #[test]
    fn test_group_none_single_group() {
        let tools = arcs(vec![Tool::new("b"), Tool::new("a")]);
        let view = group_stage(&tools, GroupBy::None);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(names(&view.groups[NONE_GROUP]), vec!["b", "a"]);
        assert_eq!(view.number_of_tools, 2);
    }

    #[test]
    fn test_group_empty_inputs() {
        assert!(group_stage(&[], GroupBy::None).is_empty());
        assert!(group_stage(&[], GroupBy::Languages).is_empty());
    }

    #[test]
    fn test_group_none_on_empty_input_has_no_groups() {
        let view = group_stage(&[], GroupBy::None);
        assert_eq!(view.groups.len(), 0);
        assert_eq!(view.number_of_tools, 0);
        let json = serde_json::to_value(&view).expect("serialize");
        assert_eq!(json["groups"], serde_json::json!({}));
    }

    #[test]
    fn test_sort_folds_accents() {
        let tools = arcs(vec![Tool::new("zod"), Tool::new("Élan"), Tool::new("elm")]);
        let sorted = sort_stage(&tools, SortBy::Name, SortOrder::Ascending);
        assert_eq!(names(&sorted), vec!["Élan", "elm", "zod"]);
    }

    #[test]
    fn test_group_labels_fold_accents() {
        let tools = arcs(vec![
            Tool::new("a").with_languages(&["zig"]),
            Tool::new("b").with_languages(&["Élixir"]),
            Tool::new("c").with_languages(&["erlang"]),
        ]);
        let view = group_stage(&tools, GroupBy::Languages);
        assert_eq!(view.labels().collect::<Vec<_>>(), vec!["Élixir", "erlang", "zig"]);
    }

    #[test]
    fn test_group_field_absent_everywhere() {
        let tools = arcs(vec![Tool::new("a"), Tool::new("b").with_languages(&[])]);
        let view = group_stage(&tools, GroupBy::Environments);
        assert!(view.groups.is_empty());
        assert_eq!(view.number_of_tools, 0);
        let view = group_stage(&tools, GroupBy::Languages);
        assert!(view.groups.is_empty());
    }

    #[test]
    fn test_group_repeated_value_counts_once() {
        let tools = arcs(vec![Tool::new("a").with_languages(&["Go", "go", "Go"])]);
        let view = group_stage(&tools, GroupBy::Languages);
        assert_eq!(view.groups["Go"].len(), 1);
        assert_eq!(view.groups["go"].len(), 1);
        assert_eq!(view.number_of_tools, 1);
    }

    #[test]
    fn test_group_labels_case_insensitive_order() {
        let tools = arcs(vec![
            Tool::new("a").with_languages(&["rust"]),
            Tool::new("b").with_languages(&["Go"]),
            Tool::new("c").with_languages(&["C#"]),
        ]);
        let view = group_stage(&tools, GroupBy::Languages);
        let labels: Vec<&str> = view.groups.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["C#", "Go", "rust"]);
    }
}
