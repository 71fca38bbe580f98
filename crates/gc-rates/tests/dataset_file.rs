//! Integration test: builtin dataset written to disk and read back.

use gc_rates::{CoolingChannel, RateDataSource, RateDataset, Reaction, TemperatureGrid};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("gascool-{}-{}", std::process::id(), name))
}

#[test]
fn saved_builtin_dataset_loads_through_source() {
    let grid = TemperatureGrid {
        start: 1.0,
        end: 1.0e9,
        bins: 64,
    };
    let builtin = RateDataSource::Builtin.load(grid, 0.76).unwrap();
    let path = temp_path("rates.json");
    builtin.save(&path).unwrap();

    let loaded = RateDataSource::File(path.clone()).load(grid, 0.76).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.grid, grid);
    assert_eq!(loaded.rates.len(), builtin.rates.len());
    let (a, b) = (
        builtin.rate(Reaction::K1).unwrap(),
        loaded.rate(Reaction::K1).unwrap(),
    );
    for (x, y) in a.iter().zip(b) {
        assert!((x - y).abs() <= 1e-12 * x.abs().max(1e-300));
    }
    assert!(loaded.cooling(CoolingChannel::Metal).is_some());
    assert!(loaded.uvb.is_some());
}

#[test]
fn truncated_file_is_rejected() {
    let grid = TemperatureGrid {
        start: 1.0,
        end: 1.0e9,
        bins: 16,
    };
    let mut dataset = RateDataSource::Builtin.load(grid, 0.76).unwrap();
    if let Some(col) = dataset.rates.get_mut(&Reaction::K3) {
        col.truncate(10);
    }
    let path = temp_path("truncated.json");
    std::fs::write(&path, to_json(&dataset)).unwrap();
    let result = RateDataset::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}

fn to_json(dataset: &RateDataset) -> String {
    // bypass validation on write: to_json_string does not validate
    dataset.to_json_string().unwrap()
}
