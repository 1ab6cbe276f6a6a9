//! Foam formulations.

use crate::error::{SyringeError, SyringeResult};
use fd_core::ensure_positive_divisor;
use std::fmt;
use std::str::FromStr;

/// Gas:liquid ratios offered by the foam catalog.
pub const CATALOG_GAS_RATIOS: [u32; 3] = [3, 4, 5];

/// Foam preparation technique.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoamType {
    Tessari,
    /// Double Syringe System
    Dss,
}

impl FoamType {
    /// Foam half time in seconds.
    pub fn half_time_s(self) -> f64 {
        match self {
            Self::Tessari => 90.0,
            Self::Dss => 160.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Tessari => "Tessari",
            Self::Dss => "DSS",
        }
    }
}

impl FromStr for FoamType {
    type Err = SyringeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "t" | "tessari" => Ok(Self::Tessari),
            "d" | "dss" => Ok(Self::Dss),
            _ => Err(SyringeError::UnknownFoamType {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FoamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Drainage-relevant description of a foam. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct FoamSpec {
    foam_type: Option<FoamType>,
    half_time_s: f64,
    gas_ratio: u32,
    liquid_fraction: f64,
}

impl FoamSpec {
    /// Foam from the catalog: half time from the technique, gas ratio 3, 4 or 5.
    pub fn from_catalog(foam_type: FoamType, gas_ratio: u32) -> SyringeResult<Self> {
        if !CATALOG_GAS_RATIOS.contains(&gas_ratio) {
            return Err(SyringeError::InvalidGasRatio { ratio: gas_ratio });
        }
        let mut foam = Self::new(foam_type.half_time_s(), gas_ratio)?;
        foam.foam_type = Some(foam_type);
        Ok(foam)
    }

    /// Foam with an arbitrary positive half time and gas ratio.
    pub fn new(half_time_s: f64, gas_ratio: u32) -> SyringeResult<Self> {
        let half_time_s = ensure_positive_divisor(half_time_s, "foam half time")?;
        if gas_ratio == 0 {
            return Err(SyringeError::InvalidGasRatio { ratio: gas_ratio });
        }
        Ok(Self {
            foam_type: None,
            half_time_s,
            gas_ratio,
            liquid_fraction: 1.0 / (1.0 + gas_ratio as f64),
        })
    }

    pub fn foam_type(&self) -> Option<FoamType> {
        self.foam_type
    }

    pub fn half_time_s(&self) -> f64 {
        self.half_time_s
    }

    pub fn gas_ratio(&self) -> u32 {
        self.gas_ratio
    }

    pub fn liquid_fraction(&self) -> f64 {
        self.liquid_fraction
    }

    /// Drainable liquid held by `foam_volume_ml` of this foam, in mL.
    pub fn liquid_content_ml(&self, foam_volume_ml: f64) -> f64 {
        foam_volume_ml * self.liquid_fraction
    }
}

impl fmt::Display for FoamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.foam_type.map_or("custom", FoamType::name);
        write!(
            f,
            "1:{} {} foam, half time: {} s",
            self.gas_ratio, name, self.half_time_s
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_half_times() {
        let tessari = FoamSpec::from_catalog(FoamType::Tessari, 4).unwrap();
        assert_eq!(tessari.half_time_s(), 90.0);
        let dss = FoamSpec::from_catalog(FoamType::Dss, 3).unwrap();
        assert_eq!(dss.half_time_s(), 160.0);
        assert_eq!(dss.foam_type(), Some(FoamType::Dss));
    }

    #[test]
    fn liquid_fraction_from_ratio() {
        let foam = FoamSpec::from_catalog(FoamType::Tessari, 4).unwrap();
        assert!((foam.liquid_fraction() - 0.2).abs() < 1e-12);
        assert!((foam.liquid_content_ml(5.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn catalog_rejects_other_ratios() {
        assert_eq!(
            FoamSpec::from_catalog(FoamType::Tessari, 6),
            Err(SyringeError::InvalidGasRatio { ratio: 6 })
        );
    }

    #[test]
    fn custom_foam_requires_positive_half_time() {
        assert!(matches!(
            FoamSpec::new(0.0, 4),
            Err(SyringeError::Core(fd_core::FdError::DivisionByZero { .. }))
        ));
        assert!(FoamSpec::new(f64::NAN, 4).is_err());
        assert!(FoamSpec::new(45.0, 0).is_err());
        let foam = FoamSpec::new(45.0, 7).unwrap();
        assert_eq!(foam.foam_type(), None);
        assert_eq!(foam.to_string(), "1:7 custom foam, half time: 45 s");
    }

    #[test]
    fn parse_foam_type() {
        assert_eq!("T".parse::<FoamType>().unwrap(), FoamType::Tessari);
        assert_eq!("dss".parse::<FoamType>().unwrap(), FoamType::Dss);
        assert!("x".parse::<FoamType>().is_err());
    }
}
