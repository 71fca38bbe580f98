use gc_chem::{ConfigError, RunFile};
use gc_fields::{MetalCooling, PrimordialLevel};
use std::path::Path;

#[test]
fn demo_run_file_finalizes() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/single_cell.yaml");
    let run = RunFile::load(&path).unwrap();
    let config = run.chemistry.finalize(&run.units).unwrap();
    let variant = config.variant();
    assert_eq!(variant.level, PrimordialLevel::Level3);
    assert_eq!(variant.metals, MetalCooling::On);
    assert!(config.tables().is_some());
    assert_eq!(config.token().as_str().len(), 64);
}

#[test]
fn missing_run_file_reports_path() {
    let err = RunFile::load(Path::new("/nonexistent/gascool/run.yaml")).unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert!(path.ends_with("run.yaml")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn invalid_units_are_rejected_on_load() {
    let yaml = "units:\n  density_units: -1.0\n  length_units: 1.0\n  time_units: 1.0\n";
    assert!(matches!(
        RunFile::from_yaml_str(yaml),
        Err(ConfigError::Yaml(_))
    ));
}
