//! ERA5 ocean wave variable catalogue.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// An ERA5 single-level ocean wave parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveVariable {
    /// Coefficient of drag with waves.
    CoefficientOfDragWithWaves,
    /// Mean direction of total swell.
    MeanDirectionOfTotalSwell,
    /// Mean direction of wind waves.
    MeanDirectionOfWindWaves,
    /// Mean period of wind waves.
    MeanPeriodOfWindWaves,
    /// Mean wave direction.
    MeanWaveDirection,
    /// Mean wave period.
    MeanWavePeriod,
    /// Significant height of combined wind waves and swell.
    SignificantHeightOfCombinedWindWavesAndSwell,
    /// Significant height of total swell.
    SignificantHeightOfTotalSwell,
    /// Significant height of wind waves.
    SignificantHeightOfWindWaves,
    /// Wave spectral directional width.
    WaveSpectralDirectionalWidth,
    /// Wave spectral directional width for swell.
    WaveSpectralDirectionalWidthForSwell,
    /// Wave spectral directional width for wind waves.
    WaveSpectralDirectionalWidthForWindWaves,
    /// Mean period of total swell.
    MeanPeriodOfTotalSwell,
}

impl WaveVariable {
    /// Every variable, in request order.
    pub const ALL: [Self; 13] = [
        Self::CoefficientOfDragWithWaves,
        Self::MeanDirectionOfTotalSwell,
        Self::MeanDirectionOfWindWaves,
        Self::MeanPeriodOfWindWaves,
        Self::MeanWaveDirection,
        Self::MeanWavePeriod,
        Self::SignificantHeightOfCombinedWindWavesAndSwell,
        Self::SignificantHeightOfTotalSwell,
        Self::SignificantHeightOfWindWaves,
        Self::WaveSpectralDirectionalWidth,
        Self::WaveSpectralDirectionalWidthForSwell,
        Self::WaveSpectralDirectionalWidthForWindWaves,
        Self::MeanPeriodOfTotalSwell,
    ];

    /// Returns the variable name used by the Climate Data Store.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CoefficientOfDragWithWaves => "coefficient_of_drag_with_waves",
            Self::MeanDirectionOfTotalSwell => "mean_direction_of_total_swell",
            Self::MeanDirectionOfWindWaves => "mean_direction_of_wind_waves",
            Self::MeanPeriodOfWindWaves => "mean_period_of_wind_waves",
            Self::MeanWaveDirection => "mean_wave_direction",
            Self::MeanWavePeriod => "mean_wave_period",
            Self::SignificantHeightOfCombinedWindWavesAndSwell => {
                "significant_height_of_combined_wind_waves_and_swell"
            }
            Self::SignificantHeightOfTotalSwell => "significant_height_of_total_swell",
            Self::SignificantHeightOfWindWaves => "significant_height_of_wind_waves",
            Self::WaveSpectralDirectionalWidth => "wave_spectral_directional_width",
            Self::WaveSpectralDirectionalWidthForSwell => {
                "wave_spectral_directional_width_for_swell"
            }
            Self::WaveSpectralDirectionalWidthForWindWaves => {
                "wave_spectral_directional_width_for_wind_waves"
            }
            Self::MeanPeriodOfTotalSwell => "mean_period_of_total_swell",
        }
    }
}

impl std::fmt::Display for WaveVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown variable name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown wave variable: {0}")]
pub struct UnknownVariable(pub String);

impl FromStr for WaveVariable {
    type Err = UnknownVariable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == name)
            .ok_or_else(|| UnknownVariable(s.to_string()))
    }
}
