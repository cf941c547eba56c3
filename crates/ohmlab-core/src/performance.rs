//! Performance tiers and the particle budget that follows from them.
//!
//! The tier is chosen either explicitly by the user or, in `Auto` mode, from
//! a one-off capability query supplied by the embedding application.

use crate::constants::*;
use crate::error::PerformanceModeParseError;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PerformanceMode {
    #[default]
    Auto,
    Low,
    High,
}

impl PerformanceMode {
    pub const ALL: [PerformanceMode; 3] = [Self::Auto, Self::Low, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceMode::Auto => "auto",
            PerformanceMode::Low => "low",
            PerformanceMode::High => "high",
        }
    }

    /// auto -> low -> high -> auto
    pub fn next(self) -> Self {
        match self {
            PerformanceMode::Auto => PerformanceMode::Low,
            PerformanceMode::Low => PerformanceMode::High,
            PerformanceMode::High => PerformanceMode::Auto,
        }
    }
}

impl fmt::Display for PerformanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerformanceMode {
    type Err = PerformanceModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(PerformanceMode::Auto),
            "low" => Ok(PerformanceMode::Low),
            "high" => Ok(PerformanceMode::High),
            _ => Err(PerformanceModeParseError(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PerformanceTier {
    Low,
    High,
}

impl PerformanceTier {
    pub fn resolve(mode: PerformanceMode, auto_low: bool) -> Self {
        match mode {
            PerformanceMode::Low => PerformanceTier::Low,
            PerformanceMode::High => PerformanceTier::High,
            PerformanceMode::Auto if auto_low => PerformanceTier::Low,
            PerformanceMode::Auto => PerformanceTier::High,
        }
    }

    pub fn is_low(&self) -> bool {
        matches!(self, PerformanceTier::Low)
    }
}

/// What the host platform reports about the device. Absent values are
/// treated as a mid-range device.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceCapabilities {
    pub hardware_concurrency: Option<u32>,
    pub device_memory_gb: Option<f64>,
    pub user_agent: String,
}

impl DeviceCapabilities {
    pub fn cores(&self) -> u32 {
        self.hardware_concurrency
            .filter(|&c| c > 0)
            .unwrap_or(ASSUMED_CORES)
    }

    pub fn memory_gb(&self) -> f64 {
        self.device_memory_gb
            .filter(|m| m.is_finite() && *m > 0.0)
            .unwrap_or(ASSUMED_MEMORY_GB)
    }

    pub fn is_mobile(&self) -> bool {
        let ua = self.user_agent.to_ascii_lowercase();
        ua.contains("mobi") || ua.contains("android")
    }

    /// True when the device should start in the low tier under `Auto`.
    pub fn is_constrained(&self) -> bool {
        self.cores() <= LOW_PERF_MAX_CORES
            || self.memory_gb() <= LOW_PERF_MAX_MEMORY_GB
            || self.is_mobile()
    }
}

/// Host-specific device query, implemented by each front-end.
pub trait CapabilityProbe {
    fn capabilities(&self) -> DeviceCapabilities;
}

/// Fixed capabilities, for native front-ends and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticProbe(pub DeviceCapabilities);

impl CapabilityProbe for StaticProbe {
    fn capabilities(&self) -> DeviceCapabilities {
        self.0.clone()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleBudget {
    pub tier: PerformanceTier,
    /// Smoke puffs above the resistor.
    pub smoke: usize,
    /// Flow particles per wire.
    pub trail: usize,
    pub max_pixel_ratio: f64,
    pub antialias: bool,
}

impl ParticleBudget {
    pub fn for_tier(tier: PerformanceTier) -> Self {
        match tier {
            PerformanceTier::Low => Self {
                tier,
                smoke: SMOKE_COUNT_LOW,
                trail: TRAIL_COUNT_LOW,
                max_pixel_ratio: PIXEL_RATIO_CAP_LOW,
                antialias: false,
            },
            PerformanceTier::High => Self {
                tier,
                smoke: SMOKE_COUNT_HIGH,
                trail: TRAIL_COUNT_HIGH,
                max_pixel_ratio: PIXEL_RATIO_CAP_HIGH,
                antialias: true,
            },
        }
    }

    /// Device pixel ratio actually used for the canvas backing store.
    pub fn pixel_ratio(&self, device_pixel_ratio: f64) -> f64 {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        dpr.min(self.max_pixel_ratio)
    }
}

pub fn particle_budget(mode: PerformanceMode, auto_detected_low: bool) -> ParticleBudget {
    ParticleBudget::for_tier(PerformanceTier::resolve(mode, auto_detected_low))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(cores: Option<u32>, mem: Option<f64>, ua: &str) -> DeviceCapabilities {
        DeviceCapabilities {
            hardware_concurrency: cores,
            device_memory_gb: mem,
            user_agent: ua.to_string(),
        }
    }

    #[test]
    fn explicit_modes_override_detection() {
        assert_eq!(PerformanceTier::resolve(PerformanceMode::Low, false), PerformanceTier::Low);
        assert_eq!(PerformanceTier::resolve(PerformanceMode::High, true), PerformanceTier::High);
        assert_eq!(PerformanceTier::resolve(PerformanceMode::Auto, true), PerformanceTier::Low);
        assert_eq!(PerformanceTier::resolve(PerformanceMode::Auto, false), PerformanceTier::High);
    }

    #[test]
    fn budgets_per_tier() {
        let low = particle_budget(PerformanceMode::Low, false);
        assert_eq!((low.smoke, low.trail), (10, 3));
        assert!(!low.antialias);
        let high = particle_budget(PerformanceMode::Auto, false);
        assert_eq!((high.smoke, high.trail), (40, 8));
        assert_eq!(high.pixel_ratio(3.0), 2.0);
        assert_eq!(low.pixel_ratio(3.0), 1.0);
        assert_eq!(high.pixel_ratio(f64::NAN), 1.0);
    }

    #[test]
    fn detection_thresholds() {
        let desktop = "Mozilla/5.0 (X11; Linux x86_64)";
        assert!(!caps(Some(8), Some(8.0), desktop).is_constrained());
        assert!(caps(Some(2), Some(8.0), desktop).is_constrained());
        assert!(caps(Some(8), Some(2.0), desktop).is_constrained());
        assert!(caps(Some(8), Some(8.0), "Mozilla/5.0 (Linux; Android 14)").is_constrained());
        assert!(caps(Some(8), Some(8.0), "Mozilla/5.0 (iPhone) Mobile/15E148").is_constrained());
        // Missing values behave like a 4-core, 4 GB device.
        assert!(!caps(None, None, desktop).is_constrained());
        assert!(!caps(Some(0), Some(f64::NAN), desktop).is_constrained());
    }

    #[test]
    fn mode_parse_and_cycle() {
        assert_eq!("HIGH".parse::<PerformanceMode>(), Ok(PerformanceMode::High));
        assert_eq!(" low ".parse::<PerformanceMode>(), Ok(PerformanceMode::Low));
        assert!("turbo".parse::<PerformanceMode>().is_err());
        for m in PerformanceMode::ALL {
            assert_eq!(m.to_string().parse::<PerformanceMode>(), Ok(m));
        }
        assert_eq!(PerformanceMode::Auto.next().next().next(), PerformanceMode::Auto);
    }
}
