use std::{fs, path::PathBuf};

use tempfile::tempdir;

use kanji_colorize::{ColorizeError, config::FilenameMode};
use kanji_colorize_cli::{Args, Switch, run};

/// KanjiVG fixtures shared with the library crate
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("kanji-colorize")
        .join("tests")
        .join("fixtures")
        .join("kanji")
}

/// Collects the names of all .svg files in a directory
fn collect_svg_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read output directory")
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".svg"))
        .collect();
    names.sort();
    names
}

fn args_for(output: PathBuf) -> Args {
    Args {
        output_directory: Some(output),
        source_directory: Some(fixtures_path()),
        log_level: "off".to_string(),
        ..Args::default()
    }
}

#[test]
fn e2e_smoke_test_all_characters() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("colorized");

    let report = run(&args_for(output.clone())).expect("Run should succeed");

    assert!(report.is_success(), "Unexpected failures: {:?}", report.failed());
    assert_eq!(
        collect_svg_names(&output),
        ["A.svg", "a_.svg", "あ.svg", "字-Kaisho.svg", "字.svg"]
    );

    for name in collect_svg_names(&output) {
        let svg = fs::read_to_string(output.join(&name)).unwrap();
        assert!(svg.contains("width=\"327\""), "{name} was not resized");
        assert_eq!(
            svg.matches("This file has been modified").count(),
            1,
            "{name} should carry one modification note"
        );
    }
}

#[test]
fn e2e_smoke_test_selected_characters() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().to_path_buf();

    let args = Args {
        characters: Some("字Л".to_string()),
        group_mode: Some(Switch::On),
        filename_mode: Some(FilenameMode::Code),
        ..args_for(output.clone())
    };
    let report = run(&args).expect("Missing characters should not abort the run");

    assert_eq!(collect_svg_names(&output), ["05b57.svg"]);
    assert_eq!(report.failed().len(), 1);
    assert!(matches!(report.failed()[0].1, ColorizeError::NotFound { .. }));

    let svg = fs::read_to_string(output.join("05b57.svg")).unwrap();
    assert!(svg.contains("group mode: on"));
}

#[test]
fn e2e_smoke_test_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[render]\nmode = \"css-class\"\nimage-size = \"relative\"\n\n[output]\noverwrite = false\n",
    )
    .unwrap();
    let output = temp_dir.path().join("out");
    fs::create_dir(&output).unwrap();
    fs::write(output.join("A.svg"), "existing").unwrap();

    let args = Args {
        characters: Some("aA".to_string()),
        config: Some(config_path.to_string_lossy().into_owned()),
        ..args_for(output.clone())
    };
    let report = run(&args).expect("Run should succeed");

    assert_eq!(report.written().len(), 1);
    assert_eq!(report.skipped().len(), 1);
    assert_eq!(fs::read_to_string(output.join("A.svg")).unwrap(), "existing");

    let svg = fs::read_to_string(output.join("a_.svg")).unwrap();
    assert!(svg.contains("kc-stroke kc-stroke-1"));
    assert!(svg.contains("width=\"100%\""));
}

#[test]
fn e2e_smoke_test_error_cases() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let missing_source = Args {
        source_directory: Some(temp_dir.path().join("no-such-dir")),
        ..args_for(temp_dir.path().join("out"))
    };
    assert!(matches!(run(&missing_source), Err(ColorizeError::Config(_))));

    let bad_saturation = Args {
        saturation: Some(1.5),
        ..args_for(temp_dir.path().join("out"))
    };
    assert!(matches!(run(&bad_saturation), Err(ColorizeError::Config(_))));
}

#[test]
fn e2e_smoke_test_bad_list_entries() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out");

    let args = Args {
        characters: Some("字字, a, 字-../../x".to_string()),
        ..args_for(output.clone())
    };
    let report = run(&args).expect("Bad list entries should not abort the run");

    assert_eq!(collect_svg_names(&output), ["a_.svg"]);
    let entries: Vec<&str> = report.failed().iter().map(|(entry, _)| entry.as_str()).collect();
    assert_eq!(entries, ["字字", "字-../../x"]);
    assert!(
        report
            .failed()
            .iter()
            .all(|(_, err)| matches!(err, ColorizeError::Character(_)))
    );
    assert!(!temp_dir.path().join("x.svg").exists());
}

#[test]
fn e2e_smoke_test_malformed_source_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let source = temp_dir.path().join("kanji");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("05b57.svg"), "<svg><g></svg>").unwrap();
    fs::copy(fixtures_path().join("00061.svg"), source.join("00061.svg")).unwrap();

    let args = Args {
        source_directory: Some(source),
        ..args_for(temp_dir.path().join("out"))
    };
    let report = run(&args).expect("Malformed files should not abort the run");

    assert_eq!(report.written().len(), 1);
    assert_eq!(report.failed().len(), 1);
    assert!(matches!(report.failed()[0].1, ColorizeError::Markup { .. }));
}
