use std::path::PathBuf;

use scribe::config::{
    ConfigFlags, EditorConfig, load_config_flags, parse_flag_tokens, save_config_flags,
};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".scriberc");
    let content = r#"
# comment
--perf

--language rust

--render-debug-log=render.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.perf);
    assert_eq!(flags.language.as_deref(), Some("rust"));
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".scriberc");
    let content = "--language rust\n--blink-ms 300\n--render-debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "scribe".to_string(),
        "--language".to_string(),
        "python".to_string(),
        "--perf".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(
        effective.language.as_deref(),
        Some("python"),
        "cli should override language"
    );
    assert_eq!(effective.blink_ms, Some(300));
    assert_eq!(
        effective.render_debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_saved_font_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config");
    let flags = ConfigFlags {
        font: Some("14px Fira Code, monospace".to_string()),
        click_ms: Some(300),
        ..ConfigFlags::default()
    };
    save_config_flags(&path, &flags).unwrap();

    let loaded = load_config_flags(&path).unwrap();
    assert_eq!(loaded, flags);

    let config = EditorConfig::from_flags(&loaded);
    assert_eq!(config.font.family, "Fira Code, monospace");
    assert!((config.font.size_px - 14.0).abs() < f32::EPSILON);
    assert_eq!(config.click_ms, 300);
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "scribe".to_string(),
        "--language=go".to_string(),
        "--click-ms=250".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.language.as_deref(), Some("go"));
    assert_eq!(flags.click_ms, Some(250));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        perf: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        blink_ms: Some(700),
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.perf);
    assert_eq!(merged.blink_ms, Some(700));
}
