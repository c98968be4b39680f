//! Deserialization of configuration files.

use std::path::Path;

use kanji_colorize::config::{AppConfig, FilenameMode, ImageSize, Mode};

#[test]
fn test_empty_file_uses_defaults() {
    let config: AppConfig = toml::from_str("").unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_full_file() {
    let config: AppConfig = toml::from_str(
        r#"
        [render]
        mode = "contrast"
        group-mode = true
        saturation = 1.0
        value = 0.5
        image-size = "relative"

        [render.classes]
        script = "colorize.js"
        stylesheet = "kanji.css"

        [output]
        directory = "diagrams"
        filename-mode = "code"
        overwrite = false

        [source]
        directory = "kanjivg/kanji"
        "#,
    )
    .unwrap();

    let render = config.render();
    assert_eq!(render.mode(), Mode::Contrast);
    assert!(render.group_mode());
    assert_eq!(render.saturation(), 1.0);
    assert_eq!(render.value(), 0.5);
    assert_eq!(render.image_size(), ImageSize::Relative);
    assert_eq!(render.classes().script(), "colorize.js");
    assert_eq!(render.classes().onload(), "kanjiColorize(evt)");
    assert_eq!(render.classes().stylesheet(), Some("kanji.css"));

    let output = config.output();
    assert_eq!(output.directory(), Path::new("diagrams"));
    assert_eq!(output.filename_mode(), FilenameMode::Code);
    assert!(!output.overwrite());

    assert_eq!(config.source().directory(), Some(Path::new("kanjivg/kanji")));
}

#[test]
fn test_pixel_image_size() {
    let config: AppConfig = toml::from_str("[render]\nimage-size = 500\n").unwrap();
    assert_eq!(config.render().image_size(), ImageSize::Pixels(500));
    assert_eq!(config.render().mode(), Mode::Spectrum);
}

#[test]
fn test_invalid_values_are_rejected() {
    assert!(toml::from_str::<AppConfig>("[render]\nmode = \"rainbow\"\n").is_err());
    assert!(toml::from_str::<AppConfig>("[render]\nimage-size = \"huge\"\n").is_err());
    assert!(toml::from_str::<AppConfig>("[output]\nfilename-mode = \"hex\"\n").is_err());
}
