use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let config = ProjectConfig::default();
    assert_eq!(config.thresholds, Thresholds::default());
    assert!(config.correlation.exclude_dirs.is_empty());
    assert_eq!(config.export.export_format(), ExportFormat::Auto);
    assert_eq!(config.export.timeout(), Duration::from_secs(30 * 60));
}

#[test]
fn test_parse_full_file() {
    let toml = r#"
[thresholds]
excessive_rerender_count = 20
cascade_depth_limit = 6
frequent_trigger_count = 5
high_confidence = 0.8

[correlation]
exclude_dirs = ["Generated", "Fixtures"]

[export]
format = "json"
timeout_minutes = 5
"#;
    let config: ProjectConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.thresholds.excessive_rerender_count, 20);
    assert_eq!(config.thresholds.cascade_depth_limit, 6);
    assert_eq!(config.thresholds.frequent_trigger_count, 5);
    assert_eq!(config.thresholds.high_confidence, 0.8);
    assert_eq!(config.correlation.exclude_dirs, vec!["Generated", "Fixtures"]);
    assert_eq!(config.export.export_format(), ExportFormat::Json);
    assert_eq!(config.export.timeout(), Duration::from_secs(300));
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config: ProjectConfig = toml::from_str("[thresholds]\ncascade_depth_limit = 8\n").unwrap();
    assert_eq!(config.thresholds.cascade_depth_limit, 8);
    assert_eq!(config.thresholds.excessive_rerender_count, 10);
    assert_eq!(config.export, ExportConfig::default());
}

#[test]
fn test_unknown_export_format_falls_back_to_auto() {
    let export = ExportConfig {
        format: "yaml".into(),
        timeout_minutes: 0,
    };
    assert_eq!(export.export_format(), ExportFormat::Auto);
    assert_eq!(export.timeout(), Duration::from_secs(30 * 60));
}

#[test]
fn test_huge_timeout_saturates() {
    let export = ExportConfig {
        timeout_minutes: u64::MAX,
        ..Default::default()
    };
    assert_eq!(export.timeout(), Duration::from_secs(u64::MAX));

    let config: ProjectConfig =
        toml::from_str("[export]\ntimeout_minutes = 9223372036854775807\n").unwrap();
    assert_eq!(config.export.timeout(), Duration::from_secs(u64::MAX));
}

#[test]
fn test_explicit_path_wins_over_source_root() {
    let dir = tempdir().unwrap();
    let explicit = dir.path().join("custom.toml");
    fs::write(&explicit, "[thresholds]\nexcessive_rerender_count = 3\n").unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[thresholds]\nexcessive_rerender_count = 7\n",
    )
    .unwrap();

    let config = load_project_config(Some(&explicit), Some(dir.path()));
    assert_eq!(config.thresholds.excessive_rerender_count, 3);

    let config = load_project_config(None, Some(dir.path()));
    assert_eq!(config.thresholds.excessive_rerender_count, 7);
}

#[test]
fn test_missing_explicit_falls_through_to_source_root() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[correlation]\nexclude_dirs = [\"Gen\"]\n",
    )
    .unwrap();
    let config = load_project_config(Some(&dir.path().join("nope.toml")), Some(dir.path()));
    assert_eq!(config.correlation.exclude_dirs, vec!["Gen"]);
}

#[test]
fn test_malformed_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[thresholds\nexcessive_rerender_count = ").unwrap();
    assert_eq!(
        load_project_config(Some(&path), None),
        ProjectConfig::default()
    );

    fs::write(&path, "[thresholds]\nexcessive_rerender_count = \"many\"\n").unwrap();
    assert_eq!(
        load_project_config(Some(&path), None),
        ProjectConfig::default()
    );
}

#[test]
fn test_candidate_order() {
    let paths = candidates(Some(Path::new("a.toml")), Some(Path::new("src")));
    assert_eq!(
        paths,
        vec![
            PathBuf::from("a.toml"),
            Path::new("src").join(CONFIG_FILE_NAME),
            PathBuf::from(CONFIG_FILE_NAME),
        ]
    );
}
