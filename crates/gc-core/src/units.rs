// gc-core/src/units.rs

use uom::si::f64::{ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

/// Seconds in a megayear, the driver's customary timestep unit.
pub const SECONDS_PER_MEGAYEAR: f64 = 3.15e13;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn myr(v: f64) -> Time {
    s(v * SECONDS_PER_MEGAYEAR)
}

#[inline]
pub fn seconds(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

#[inline]
pub fn kelvin(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        assert_eq!(kelvin(k(1000.0)), 1000.0);
        assert_eq!(seconds(s(2.0)), 2.0);
        assert!((seconds(myr(1.0)) - 3.15e13).abs() < 1.0);
    }
}
