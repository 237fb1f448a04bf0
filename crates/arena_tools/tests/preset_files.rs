//! Preset file loading against the shipped assets.

use std::path::{Path, PathBuf};

use arena_tools::validate::{load_catalog, validate_preset_file};
use arena_tools::ToolError;

fn shipped_presets() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/maps/presets.ron")
}

#[test]
fn test_shipped_presets_validate() {
    let reports = validate_preset_file(&shipped_presets()).unwrap();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].name, "Courtyard");
    assert_eq!(reports[0].budget, 30);
    for report in &reports {
        assert!(report.placed <= report.budget, "{report}");
    }
}

#[test]
fn test_shipped_presets_select() {
    let mut catalog = load_catalog(&shipped_presets()).unwrap();
    assert_eq!(catalog.select(2).unwrap().name, "Pillar Hall");
}

#[test]
fn test_missing_file() {
    let err = load_catalog(Path::new("does/not/exist.ron")).unwrap_err();
    assert!(matches!(err, ToolError::Io { .. }));
}
