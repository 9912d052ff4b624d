//! Pattern requests read from JSON files

use crate::generation::assembler::PatternAssembler;
use crate::io::configuration::DEFAULT_LANGUAGE;
use crate::io::error::{PatternError, Result, file_system_error};
use crate::model::garment::GarmentAnalysis;
use crate::model::measurements::{Gauge, Measurements, YarnInfo};
use crate::model::pattern::GeneratedPattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Everything one pattern is generated from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRequest {
    /// Garment reading from the image analysis
    #[serde(default)]
    pub analysis: GarmentAnalysis,
    /// Knitter's swatch gauge
    pub gauge: Gauge,
    /// Body measurements in centimeters
    pub measurements: Measurements,
    /// Yarn stock, absent when nothing was declared
    #[serde(default)]
    pub yarn: YarnInfo,
    /// Language tag the pattern is rendered in
    #[serde(default = "default_language")]
    pub language: String,
}

impl PatternRequest {
    /// Parse a request from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a request
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| PatternError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// Read a request from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| file_system_error(path, "read request", source))?;
        serde_json::from_str(&json).map_err(|source| PatternError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Generate the pattern for this request
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge is not usable
    pub fn generate(&self, assembler: &mut PatternAssembler) -> Result<GeneratedPattern> {
        assembler.generate(
            &self.analysis,
            self.gauge,
            &self.measurements,
            &self.yarn,
            &self.language,
        )
    }
}
