use thiserror::Error;

/// Rejections from [`CircuitInputs::try_new`](super::circuit::CircuitInputs::try_new).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error("voltage must be a finite number, got {0}")]
    NonFiniteVoltage(f64),
    #[error("resistance must be a finite number, got {0}")]
    NonFiniteResistance(f64),
    #[error("voltage {value} V outside [{min}, {max}] V")]
    VoltageOutOfRange { value: f64, min: f64, max: f64 },
    #[error("resistance {value} Ω outside [{min}, {max}] Ω")]
    ResistanceOutOfRange { value: f64, min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown performance mode `{0}` (expected auto, low or high)")]
pub struct PerformanceModeParseError(pub String);
