// fd-core/src/units.rs

use uom::si::f64::{Time as UomTime, Volume as UomVolume, VolumeRate as UomVolumeRate};

// Public canonical unit types (SI, f64)
pub type Time = UomTime;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

/// Cubic metres per millilitre.
const M3_PER_ML: f64 = 1.0e-6;

#[inline]
pub fn ml(v: f64) -> Volume {
    use uom::si::volume::milliliter;
    Volume::new::<milliliter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Flow rate entered in mL/min.
#[inline]
pub fn ml_per_min(v: f64) -> VolumeRate {
    ml(v) / s(60.0)
}

#[inline]
pub fn in_ml_per_s(q: VolumeRate) -> f64 {
    q.value / M3_PER_ML
}
