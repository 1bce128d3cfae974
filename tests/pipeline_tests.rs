//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full load → search → filter → sort → group
//! pipeline, URL-mirrored preferences, and the CLI command handlers with a
//! real fixture catalog.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tooling_catalog::cli::{run_show, run_values, run_view, ShowCommand, ValuesCommand, ViewCommand};
use tooling_catalog::config::{AppConfig, ValuesConfig};
use tooling_catalog::pipeline::{
    build_unique_values, exit_codes, load_catalog_with_context, OutputFormat,
};
use tooling_catalog::preferences::UrlEnvironment;
use tooling_catalog::{
    filter_controls, unique_values_per_field, Catalog, Exclusions, GroupBy, PreferenceAction,
    PreferenceStore, Preferences, SearchOptions, SortBy, SortOrder, Tool, ViewModel,
};
use url::Url;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn fixture_catalog() -> Arc<Catalog> {
    load_catalog_with_context(&fixture_path("tooling-data.yaml"), true)
        .expect("fixture should load")
        .catalog
}

/// Ajv, jsonschema and Newtonsoft.Json.Schema.
fn three_validators() -> Arc<Catalog> {
    Arc::new(Catalog::from_tools([
        Tool::new("Ajv")
            .with_languages(&["JavaScript"])
            .with_license("MIT")
            .with_tooling_types(&["validator"]),
        Tool::new("jsonschema")
            .with_languages(&["Python"])
            .with_license("MIT")
            .with_tooling_types(&["validator"]),
        Tool::new("Newtonsoft.Json.Schema")
            .with_languages(&["C#"])
            .with_license("AGPL-3.0")
            .with_tooling_types(&["validator", "code-generator"]),
    ]))
}

fn names(tools: &[Arc<Tool>]) -> Vec<&str> {
    tools.iter().map(|t| t.name.as_str()).collect()
}

// ============================================================================
// Reference Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn grouping_by_tooling_type_fans_out() {
        let mut vm = ViewModel::new(three_validators(), SearchOptions::default());
        let view = vm.view(&Preferences::default());

        assert_eq!(view.labels().collect::<Vec<_>>(), vec!["code-generator", "validator"]);
        assert_eq!(
            names(view.group("validator")),
            vec!["Ajv", "jsonschema", "Newtonsoft.Json.Schema"]
        );
        assert_eq!(names(view.group("code-generator")), vec!["Newtonsoft.Json.Schema"]);
        assert_eq!(view.number_of_tools, 3);
        assert_eq!(view.total_memberships(), 4);
    }

    #[test]
    fn license_filter_excludes_non_matching() {
        let mut vm = ViewModel::new(three_validators(), SearchOptions::default());
        let prefs = Preferences {
            licenses: vec!["MIT".to_string()],
            ..Preferences::default()
        };
        let view = vm.view(&prefs);
        assert_eq!(names(view.group("validator")), vec!["Ajv", "jsonschema"]);
        assert!(view.group("code-generator").is_empty());
        assert_eq!(view.number_of_tools, 2);
    }

    #[test]
    fn query_finds_single_tool() {
        let mut vm = ViewModel::new(three_validators(), SearchOptions::default());
        let prefs = Preferences {
            query: "ajv".to_string(),
            group_by: GroupBy::None,
            ..Preferences::default()
        };
        let view = vm.view(&prefs);
        assert_eq!(names(view.group("none")), vec!["Ajv"]);
    }

    #[test]
    fn descending_name_sort() {
        let mut vm = ViewModel::new(three_validators(), SearchOptions::default());
        let prefs = Preferences {
            group_by: GroupBy::None,
            sort_by: SortBy::Name,
            sort_order: SortOrder::Descending,
            ..Preferences::default()
        };
        let view = vm.view(&prefs);
        assert_eq!(
            names(view.group("none")),
            vec!["Newtonsoft.Json.Schema", "jsonschema", "Ajv"]
        );
    }

    #[test]
    fn no_grouping_yields_single_group() {
        let mut vm = ViewModel::new(three_validators(), SearchOptions::default());
        let prefs = Preferences {
            group_by: GroupBy::None,
            ..Preferences::default()
        };
        let view = vm.view(&prefs);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.group("none").len(), 3);
        assert_eq!(view.number_of_tools, 3);
    }

    #[test]
    fn unique_license_values_with_exclusion() {
        let catalog = three_validators();
        let exclusions = Exclusions::new().with("license", ["AGPL-3.0"]);
        let uniques = unique_values_per_field(catalog.iter(), &["license"], &exclusions);
        assert_eq!(uniques.get("license"), ["MIT"]);
    }
}

// ============================================================================
// Fixture Catalog
// ============================================================================

mod fixture_catalog {
    use super::*;

    #[test]
    fn loads_every_entry() {
        let loaded = load_catalog_with_context(&fixture_path("tooling-data.yaml"), true)
            .expect("fixture should load");
        assert_eq!(loaded.catalog.len(), 6);
        assert!(!loaded.report.has_skipped());
    }

    #[test]
    fn default_view() {
        let mut vm = ViewModel::new(fixture_catalog(), SearchOptions::default());
        let view = vm.view(&Preferences::default());

        assert_eq!(
            view.labels().collect::<Vec<_>>(),
            vec!["code-generator", "editor", "validator"]
        );
        assert_eq!(
            names(view.group("validator")),
            vec!["Ajv", "boon", "jsonschema", "Newtonsoft.Json.Schema"]
        );
        assert_eq!(
            names(view.group("code-generator")),
            vec!["Newtonsoft.Json.Schema", "quicktype"]
        );
        assert_eq!(view.number_of_tools, 6);
    }

    #[test]
    fn shared_url_reproduces_view() {
        let url = Url::parse(
            "https://json-schema.org/tools?query=&groupBy=languages&sortBy=name&sortOrder=ascending&drafts=2020-12",
        )
        .expect("url");
        let prefs = Preferences::from_url(&url);
        let mut vm = ViewModel::new(fixture_catalog(), SearchOptions::default());
        let view = vm.view(&prefs);

        assert_eq!(
            view.labels().collect::<Vec<_>>(),
            vec!["C#", "JavaScript", "Python", "Rust"]
        );
        assert_eq!(view.number_of_tools, 4);
        assert_eq!(prefs.to_query_string(), url.query().unwrap_or_default());
    }

    #[test]
    fn environments_grouping_skips_tools_without_environments() {
        let mut vm = ViewModel::new(fixture_catalog(), SearchOptions::default());
        let prefs = Preferences {
            group_by: GroupBy::Environments,
            ..Preferences::default()
        };
        let view = vm.view(&prefs);
        assert_eq!(names(view.group("Command Line")), vec!["Ajv", "quicktype"]);
        assert_eq!(names(view.group("Web (Online)")), vec!["JSON Schema Lint", "quicktype"]);
        assert_eq!(view.number_of_tools, 3);
        assert_eq!(view.total_memberships(), 4);
    }

    #[test]
    fn unique_values_and_controls() {
        let catalog = fixture_catalog();
        let uniques = build_unique_values(&catalog, &ValuesConfig::default());
        assert_eq!(
            uniques.get("supportedDialects.draft"),
            ["4", "6", "7", "2019-09", "2020-12"]
        );
        assert_eq!(uniques.get("license"), ["AGPL-3.0", "Apache-2.0", "MIT"]);

        let prefs = Preferences {
            licenses: vec!["mit".to_string()],
            ..Preferences::default()
        };
        let controls = filter_controls(&uniques, &prefs);
        let labels: Vec<&str> = controls.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["License", "Draft", "Languages", "ToolingTypes"]);
        assert_eq!(controls[0].checked().collect::<Vec<_>>(), vec!["MIT"]);
    }
}

// ============================================================================
// URL-Mirrored Preferences
// ============================================================================

mod url_state {
    use super::*;

    #[test]
    fn mount_normalizes_and_reset_keeps_grouping() {
        let url = Url::parse("https://json-schema.org/tools?groupBy=bogus&languages=Go&groupBy=languages")
            .expect("url");
        let mut store = PreferenceStore::mount(UrlEnvironment::new(url));

        // First groupBy wins even when invalid
        assert_eq!(store.preferences().group_by, GroupBy::ToolingTypes);
        assert_eq!(
            store.environment().url().query(),
            Some("query=&groupBy=toolingTypes&sortBy=name&sortOrder=ascending&languages=Go")
        );

        store.dispatch(PreferenceAction::SetGroupBy(GroupBy::Languages));
        store.dispatch(PreferenceAction::SetQuery("json schema".to_string()));
        store.reset();

        let env = store.environment();
        assert_eq!(
            env.url().query(),
            Some("query=&groupBy=languages&sortBy=name&sortOrder=ascending")
        );
        assert_eq!(env.scroll_requests(), 1);
        assert_eq!(env.history_len(), 1, "mirroring never pushes history");
        assert_eq!(env.url().path(), "/tools");
    }

    #[test]
    fn rapid_edits_converge_on_latest_state() {
        let url = Url::parse("https://json-schema.org/tools").expect("url");
        let mut store = PreferenceStore::mount(UrlEnvironment::new(url));
        for prefix in ["a", "aj", "ajv"] {
            store.dispatch(PreferenceAction::SetQuery(prefix.to_string()));
        }
        let mirrored = Preferences::from_url(store.environment().url());
        assert_eq!(&mirrored, store.preferences());
        assert_eq!(mirrored.query, "ajv");
        assert_eq!(store.revision(), 3);
    }
}

// ============================================================================
// CLI Command Handlers
// ============================================================================

mod cli_handlers {
    use super::*;
    use tooling_catalog::cli::PreferenceOverrides;

    fn view_command(location: Option<&str>, overrides: PreferenceOverrides) -> ViewCommand {
        ViewCommand {
            catalog_path: fixture_path("tooling-data.yaml"),
            location: location.map(ToString::to_string),
            overrides,
            show_filters: false,
            fail_on_empty: true,
            quiet: true,
        }
    }

    fn config_writing(format: OutputFormat, path: &Path) -> AppConfig {
        AppConfig::builder()
            .output_format(format)
            .output_file(Some(path.to_path_buf()))
            .build()
    }

    #[test]
    fn view_json_output() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let out = dir.path().join("view.json");
        let config = config_writing(OutputFormat::Json, &out);

        let code = run_view(view_command(Some("?query=ajv"), PreferenceOverrides::default()), &config)
            .expect("view");
        assert_eq!(code, exit_codes::SUCCESS);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).expect("read")).expect("json");
        assert_eq!(json["numberOfTools"], 1);
        assert_eq!(json["groups"]["validator"][0]["name"], "Ajv");
        assert_eq!(json["preferences"]["query"], "ajv");
        let url = json["url"].as_str().expect("url string");
        assert!(url.starts_with("https://json-schema.org/tools?query=ajv&groupBy=toolingTypes"));
    }

    #[test]
    fn view_overrides_apply_after_url() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let out = dir.path().join("view.csv");
        let config = config_writing(OutputFormat::Csv, &out);
        let overrides = PreferenceOverrides {
            group_by: Some(GroupBy::None),
            licenses: vec!["Apache-2.0".to_string()],
            ..PreferenceOverrides::default()
        };

        run_view(view_command(Some("sortOrder=descending"), overrides), &config).expect("view");
        let csv = std::fs::read_to_string(&out).expect("read");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Group,Name,Tooling Types,Languages,Drafts,License,Bowtie");
        assert!(lines[1].starts_with("none,quicktype,"));
        assert!(lines[2].starts_with("none,boon,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn view_empty_result_exit_code() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let out = dir.path().join("view.txt");
        let config = config_writing(OutputFormat::Table, &out);
        let overrides = PreferenceOverrides {
            query: Some("zzzzzz".to_string()),
            ..PreferenceOverrides::default()
        };

        let code = run_view(view_command(None, overrides), &config).expect("view");
        assert_eq!(code, exit_codes::EMPTY_VIEW);
        let table = std::fs::read_to_string(&out).expect("read");
        assert!(table.contains("No tools match the current preferences."));
    }

    #[test]
    fn values_json_output() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let out = dir.path().join("values.json");
        let code = run_values(ValuesCommand {
            catalog_path: fixture_path("tooling-data.yaml"),
            values: ValuesConfig {
                fields: vec!["languages".to_string(), "environments".to_string()],
                ..ValuesConfig::default()
            },
            format: OutputFormat::Json,
            output_file: Some(out.clone()),
            quiet: true,
        })
        .expect("values");
        assert_eq!(code, exit_codes::SUCCESS);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).expect("read")).expect("json");
        assert_eq!(
            json["languages"],
            serde_json::json!(["C#", "JavaScript", "Python", "Rust", "TypeScript"])
        );
        assert_eq!(json["environments"], serde_json::json!(["Command Line", "Web (Online)"]));
    }

    #[test]
    fn show_renders_detail() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let out = dir.path().join("ajv.txt");
        run_show(ShowCommand {
            catalog_path: fixture_path("tooling-data.yaml"),
            name: "AJV".to_string(),
            json: false,
            output_file: Some(out.clone()),
            quiet: true,
        })
        .expect("show");
        let detail = std::fs::read_to_string(&out).expect("read");
        assert!(detail.starts_with("Ajv\n===\n"));
        assert!(detail.contains("March 10, 2024"));
        assert!(detail.contains("epoberezkin (github)"));
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let command = ViewCommand {
            catalog_path: fixture_path("does-not-exist.yaml"),
            ..view_command(None, PreferenceOverrides::default())
        };
        assert!(run_view(command, &AppConfig::default()).is_err());
    }
}
