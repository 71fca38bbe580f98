//! One neutral primordial cell with the full network, evolved for 1 Myr.

use gc_chem::{
    ChemistryConfiguration, evolve_step, query_cooling_time, query_gamma, query_pressure,
    query_temperature,
};
use gc_core::units::{k, myr};
use gc_core::{Real, UnitSystem, to_f64};
use gc_fields::{FieldName, GridFieldState, GridShape, PrimordialInit};
use gc_rates::RateDataSource;

fn hydrogen_nuclei(state: &GridFieldState) -> f64 {
    let get = |f| to_f64(state.field(f).unwrap()[0]);
    get(FieldName::HI)
        + get(FieldName::HII)
        + get(FieldName::HM)
        + get(FieldName::H2I)
        + get(FieldName::H2II)
        + get(FieldName::HDI) / 3.0
}

#[test]
fn neutral_gas_under_uv_background() {
    let units = UnitSystem::physical(1.67e-24, 1.0, 1.0e12).unwrap();
    let config = ChemistryConfiguration {
        use_chemistry: true,
        with_radiative_cooling: true,
        primordial_chemistry: 3,
        metal_cooling: true,
        uv_background: true,
        rate_data_source: Some(RateDataSource::Builtin),
        ..Default::default()
    };
    let config = config.finalize(&units).unwrap();

    let mu = 1.0 / (0.76 + 0.24 / 4.0);
    let init = PrimordialInit {
        internal_energy: units.internal_energy_for_temperature(k(1000.0), mu, 5.0 / 3.0),
        ..Default::default()
    };
    let shape = GridShape::new(&[1, 1, 1], &[0, 0, 0], &[0, 0, 0]).unwrap();
    let mut state = init.build(shape, &config.variant()).unwrap();

    let mut temperature: Vec<Real> = vec![0.0; 1];
    query_temperature(&config, &units, &state, 1.0, &mut temperature).unwrap();
    assert!((to_f64(temperature[0]) - 1000.0).abs() < 1.0);

    let h_before = hydrogen_nuclei(&state);
    let hi_before = to_f64(state.field(FieldName::HI).unwrap()[0]);

    let dt = units.code_time(myr(1.0));
    let stats = evolve_step(&config, &units, &mut state, 1.0, dt).unwrap();
    assert_eq!(stats.cells, 1);
    assert!(stats.max_subcycles >= 1 && stats.max_subcycles <= 10_000);

    let hi_after = to_f64(state.field(FieldName::HI).unwrap()[0]);
    assert!(hi_after < hi_before, "UV background must ionize hydrogen");
    assert!((hydrogen_nuclei(&state) / h_before - 1.0).abs() < 1e-8);

    let mut cooling_time: Vec<Real> = vec![0.0; 1];
    let mut pressure: Vec<Real> = vec![0.0; 1];
    let mut gamma: Vec<Real> = vec![0.0; 1];
    query_cooling_time(&config, &units, &state, 1.0, &mut cooling_time).unwrap();
    query_temperature(&config, &units, &state, 1.0, &mut temperature).unwrap();
    query_pressure(&config, &units, &state, 1.0, &mut pressure).unwrap();
    query_gamma(&config, &units, &state, 1.0, &mut gamma).unwrap();

    let t_cool = to_f64(cooling_time[0]) * units.time_units();
    assert!(t_cool.is_finite() && t_cool > 0.0);
    let t = to_f64(temperature[0]);
    assert!(t > 1000.0 && t < 1.0e5, "photoheated gas at {t} K");
    assert!(to_f64(pressure[0]) > 0.0);
    let g = to_f64(gamma[0]);
    assert!(g > 1.0 && g <= 5.0 / 3.0 + 1e-12);
}
