//! Syringe catalog and bore geometry.

use crate::error::{SyringeError, SyringeResult};
use std::f64::consts::PI;
use std::fmt;

/// Registered syringe sizes. Each size has exactly one inner diameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyringeSize {
    Ml3,
    Ml5,
    /// NormJect 10 (12) mL luer-lock, the default syringe
    #[default]
    Ml10,
    Ml20,
}

impl SyringeSize {
    pub const ALL: [SyringeSize; 4] = [Self::Ml3, Self::Ml5, Self::Ml10, Self::Ml20];

    /// Look up a catalog size from its nominal volume.
    pub fn from_volume_ml(volume_ml: f64) -> SyringeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.nominal_volume_ml() == volume_ml)
            .ok_or(SyringeError::UnknownSize { volume_ml })
    }

    pub fn nominal_volume_ml(self) -> f64 {
        match self {
            Self::Ml3 => 3.0,
            Self::Ml5 => 5.0,
            Self::Ml10 => 10.0,
            Self::Ml20 => 20.0,
        }
    }

    /// Inner diameter of the barrel in mm.
    pub fn inner_diameter_mm(self) -> f64 {
        match self {
            Self::Ml3 => 9.83,
            Self::Ml5 => 12.46,
            Self::Ml10 => 15.96,
            Self::Ml20 => 20.10,
        }
    }
}

/// A catalog syringe: nominal volume paired with its registered bore.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyringeSpec {
    size: SyringeSize,
}

impl SyringeSpec {
    pub fn new(size: SyringeSize) -> Self {
        Self { size }
    }

    pub fn from_volume_ml(volume_ml: f64) -> SyringeResult<Self> {
        SyringeSize::from_volume_ml(volume_ml).map(Self::new)
    }

    pub fn size(&self) -> SyringeSize {
        self.size
    }

    pub fn volume_ml(&self) -> f64 {
        self.size.nominal_volume_ml()
    }

    pub fn diameter_mm(&self) -> f64 {
        self.size.inner_diameter_mm()
    }

    pub fn radius_mm(&self) -> f64 {
        self.diameter_mm() / 2.0
    }

    /// Bore cross-section, `π·(D/2)²`, in mm².
    pub fn cross_section_area_mm2(&self) -> f64 {
        PI * self.radius_mm().powi(2)
    }

    /// Length of barrel occupied by the full nominal volume, in mm.
    pub fn initial_column_length_mm(&self) -> f64 {
        self.volume_ml() * 1000.0 / self.cross_section_area_mm2()
    }
}

impl Default for SyringeSpec {
    fn default() -> Self {
        Self::new(SyringeSize::default())
    }
}

impl From<SyringeSize> for SyringeSpec {
    fn from(size: SyringeSize) -> Self {
        Self::new(size)
    }
}

impl fmt::Display for SyringeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mL syringe (ID = {:.2} mm)",
            self.volume_ml(),
            self.diameter_mm()
        )
    }
}
