//! Retrieval request payload and output naming.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{DataFormatError, WaveVariable};

/// Climate Data Store catalogue entry holding the ERA5 wave fields.
pub const DATASET: &str = "reanalysis-era5-single-levels";

/// Product type requested from [`DATASET`].
pub const PRODUCT_TYPE: &str = "reanalysis";

/// Output encoding of retrieved files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// GRIB edition 1/2 as produced by the archive.
    #[default]
    Grib,
    /// NetCDF4.
    Netcdf,
}

impl DataFormat {
    /// Returns the value sent to the retrieval service.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grib => "grib",
            Self::Netcdf => "netcdf",
        }
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Grib => "grib",
            Self::Netcdf => "nc",
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = DataFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grib" | "grb" => Ok(Self::Grib),
            "netcdf" | "nc" => Ok(Self::Netcdf),
            _ => Err(DataFormatError(s.to_string())),
        }
    }
}

/// Request payload for one hour of ERA5 wave data.
///
/// Serializes to the `inputs` document expected by the Climate Data Store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalRequest {
    /// Product types; always [`PRODUCT_TYPE`].
    pub product_type: Vec<String>,
    /// CDS variable names.
    pub variable: Vec<String>,
    /// Four-digit year.
    pub year: String,
    /// Two-digit month.
    pub month: String,
    /// Two-digit day of month.
    pub day: String,
    /// Times of day as `HH:00`.
    pub time: Vec<String>,
    /// Output encoding.
    pub data_format: DataFormat,
    /// Archive packaging of the result; always `unarchived`.
    pub download_format: String,
}

impl RetrievalRequest {
    /// Builds the request for the hour containing `timestamp`.
    ///
    /// Minutes and seconds are dropped.
    #[must_use]
    pub fn for_hour(timestamp: NaiveDateTime, format: DataFormat) -> Self {
        Self {
            product_type: vec![PRODUCT_TYPE.to_string()],
            variable: WaveVariable::ALL
                .iter()
                .map(|v| v.as_str().to_string())
                .collect(),
            year: timestamp.format("%Y").to_string(),
            month: timestamp.format("%m").to_string(),
            day: timestamp.format("%d").to_string(),
            time: vec![timestamp.format("%H:00").to_string()],
            data_format: format,
            download_format: "unarchived".to_string(),
        }
    }
}

/// Returns the file name for the hour containing `timestamp`.
///
/// # Example
///
/// ```
/// use seastate_types::{DataFormat, output_file_name, parse_timestamp};
///
/// let ts = parse_timestamp("20200101020000").unwrap();
/// assert_eq!(output_file_name(ts, DataFormat::Grib), "2020_01_01_02.grib");
/// ```
#[must_use]
pub fn output_file_name(timestamp: NaiveDateTime, format: DataFormat) -> String {
    format!("{}.{}", timestamp.format("%Y_%m_%d_%H"), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_timestamp;
    use serde_json::json;

    #[test]
    fn test_request_fields() {
        let ts = parse_timestamp("20200305071500").unwrap();
        let request = RetrievalRequest::for_hour(ts, DataFormat::Grib);

        assert_eq!(request.product_type, vec!["reanalysis"]);
        assert_eq!(request.variable.len(), 13);
        assert_eq!(request.year, "2020");
        assert_eq!(request.month, "03");
        assert_eq!(request.day, "05");
        assert_eq!(request.time, vec!["07:00"]);
        assert_eq!(request.data_format, DataFormat::Grib);
    }

    #[test]
    fn test_request_json() {
        let ts = parse_timestamp("20191231230000").unwrap();
        let request = RetrievalRequest::for_hour(ts, DataFormat::Netcdf);
        let value = serde_json::to_value(request).unwrap();

        assert_eq!(value["year"], json!("2019"));
        assert_eq!(value["month"], json!("12"));
        assert_eq!(value["day"], json!("31"));
        assert_eq!(value["time"], json!(["23:00"]));
        assert_eq!(value["data_format"], json!("netcdf"));
        assert_eq!(value["download_format"], json!("unarchived"));
        assert_eq!(
            value["variable"][6],
            json!("significant_height_of_combined_wind_waves_and_swell")
        );
    }

    #[test]
    fn test_output_file_name() {
        let ts = parse_timestamp("20200101000000").unwrap();
        assert_eq!(output_file_name(ts, DataFormat::Grib), "2020_01_01_00.grib");
        assert_eq!(output_file_name(ts, DataFormat::Netcdf), "2020_01_01_00.nc");

        let ts = parse_timestamp("20201109234559").unwrap();
        assert_eq!(output_file_name(ts, DataFormat::Grib), "2020_11_09_23.grib");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("grib".parse::<DataFormat>().unwrap(), DataFormat::Grib);
        assert_eq!("NetCDF".parse::<DataFormat>().unwrap(), DataFormat::Netcdf);
        assert!("csv".parse::<DataFormat>().is_err());
    }
}
