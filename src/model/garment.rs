//! Garment description produced by the upstream image analysis
//!
//! Every axis is a closed enum with an `Unknown` variant that absorbs values
//! the analysis could not classify. [`ResolvedGarment::resolve`] applies the
//! fallbacks once so the piece generators only branch on supported shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall garment family
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GarmentType {
    /// Closed front, pulled over the head
    Pullover,
    /// Open front with a band
    Cardigan,
    /// Sleeveless
    Vest,
    /// Recognised as a garment but outside the taxonomy
    Other,
    /// Not recognised
    #[default]
    #[serde(other)]
    Unknown,
}

/// How the garment is constructed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructionMethod {
    /// Flat pieces seamed together
    AssembledPieces,
    /// Seamless, from the neck down
    TopDown,
    /// Seamless, from the hem up
    BottomUp,
    /// Worked sideways from cuff to cuff
    SideToSide,
    /// Not recognised
    #[default]
    #[serde(other)]
    Unknown,
}

/// Neckline shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NecklineType {
    /// Round neck close to the base of the neck
    Crew,
    /// Front divided into a V
    VNeck,
    /// Wide, shallow opening
    Boat,
    /// Front edges run straight to the shoulder
    OpenCardigan,
    /// Hood picked up around the neck
    Hood,
    /// Not recognised
    #[default]
    #[serde(other)]
    Unknown,
}

/// Sleeve attachment style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SleeveStyle {
    /// Curved cap set into a shaped armhole
    SetIn,
    /// Diagonal line from underarm to neck
    Raglan,
    /// Straight top sewn to an unshaped body
    DropShoulder,
    /// Sleeveless
    None,
    /// Not recognised
    #[default]
    #[serde(other)]
    Unknown,
}

/// Sleeve length
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SleeveLength {
    /// To the wrist
    Long,
    /// To mid-forearm
    ThreeQuarter,
    /// Just below the bicep
    Short,
    /// No sleeve
    None,
    /// Not recognised
    #[default]
    #[serde(other)]
    Unknown,
}

/// Front closure
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Closure {
    /// No fastening
    #[default]
    None,
    /// Buttons, optionally with an estimated count
    Buttons {
        /// Button count estimated from the image
        #[serde(default)]
        count: Option<u32>,
    },
    /// Zip
    Zip,
    /// Not recognised
    #[serde(other)]
    Unknown,
}

/// Fit style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitStyle {
    /// Shaped from hip to chest
    Fitted,
    /// Straight body
    Regular,
    /// Straight body with a deeper armhole
    Oversized,
    /// Not recognised
    #[default]
    #[serde(other)]
    Unknown,
}

/// Confidence of the analysis for each sub-field, from 0 to 1
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfidence {
    /// Garment type reading
    pub garment_type: f64,
    /// Construction reading
    pub construction: f64,
    /// Neckline reading
    pub neckline: f64,
    /// Sleeve style and length reading
    pub sleeves: f64,
    /// Closure reading
    pub closure: f64,
    /// Fit reading
    pub fit: f64,
}

impl Default for FieldConfidence {
    fn default() -> Self {
        Self {
            garment_type: 1.0,
            construction: 1.0,
            neckline: 1.0,
            sleeves: 1.0,
            closure: 1.0,
            fit: 1.0,
        }
    }
}

impl FieldConfidence {
    /// Name and confidence of every sub-field in a fixed order
    pub const fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("garment type", self.garment_type),
            ("construction", self.construction),
            ("neckline", self.neckline),
            ("sleeves", self.sleeves),
            ("closure", self.closure),
            ("fit", self.fit),
        ]
    }
}

/// Garment reading supplied by the image analysis
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GarmentAnalysis {
    /// Garment family
    pub garment_type: GarmentType,
    /// Construction method
    pub construction_method: ConstructionMethod,
    /// Neckline shape
    pub neckline_type: NecklineType,
    /// Sleeve attachment style
    pub sleeve_style: SleeveStyle,
    /// Sleeve length
    pub sleeve_length: SleeveLength,
    /// Front closure
    pub closure: Closure,
    /// Fit style
    pub fit_style: FitStyle,
    /// Per-field confidence
    pub confidence: FieldConfidence,
    /// Overall confidence, from 0 to 1
    pub overall_confidence: f64,
    /// Free-text limitations reported by the analysis
    pub limitations: Vec<String>,
}

/// Construction the piece generators actually branch on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Construction {
    /// Flat pieces seamed together
    Assembled,
    /// Seamless from the hem up
    SeamlessBottomUp,
    /// Seamless from the neck down
    SeamlessTopDown,
}

impl Construction {
    /// Whether the garment needs no seaming
    pub const fn is_seamless(self) -> bool {
        !matches!(self, Self::Assembled)
    }
}

/// A substitution made while resolving the analysis
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fallback {
    /// Axis that was substituted
    pub field: String,
    /// Value the analysis reported
    pub requested: String,
    /// Value the pattern uses
    pub used: String,
}

/// Analysis with every fallback applied
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGarment {
    /// Pullover, cardigan or vest
    pub garment: GarmentType,
    /// Construction to generate
    pub construction: Construction,
    /// Neckline to generate
    pub neckline: NecklineType,
    /// Sleeve style, `None` for sleeveless garments
    pub sleeve_style: SleeveStyle,
    /// Sleeve length, `None` for sleeveless garments
    pub sleeve_length: SleeveLength,
    /// Closure, `None` unless the garment is a cardigan
    pub closure: Closure,
    /// Fit style
    pub fit: FitStyle,
    /// Substitutions made, in the order they were applied
    pub fallbacks: Vec<Fallback>,
}

impl ResolvedGarment {
    /// Apply the fallback policy to a raw analysis
    ///
    /// Unrecognised garments become a flat, crew-neck, set-in pullover.
    /// Remaining combinations are made coherent: vests lose their sleeves,
    /// closures only apply to cardigans, and top-down construction is only
    /// kept for raglan sleeves.
    pub fn resolve(analysis: &GarmentAnalysis) -> Self {
        let mut fallbacks = Vec::new();
        let mut note = |field: &str, requested: &dyn fmt::Display, used: &dyn fmt::Display| {
            fallbacks.push(Fallback {
                field: field.to_string(),
                requested: requested.to_string(),
                used: used.to_string(),
            });
        };

        let generic = matches!(
            analysis.garment_type,
            GarmentType::Other | GarmentType::Unknown
        );

        let garment = match analysis.garment_type {
            GarmentType::Pullover => GarmentType::Pullover,
            GarmentType::Cardigan => GarmentType::Cardigan,
            GarmentType::Vest => GarmentType::Vest,
            other @ (GarmentType::Other | GarmentType::Unknown) => {
                note("garment type", &other, &GarmentType::Pullover);
                GarmentType::Pullover
            }
        };

        let mut construction = match analysis.construction_method {
            ConstructionMethod::AssembledPieces => Construction::Assembled,
            ConstructionMethod::BottomUp => Construction::SeamlessBottomUp,
            ConstructionMethod::TopDown => Construction::SeamlessTopDown,
            other @ (ConstructionMethod::SideToSide | ConstructionMethod::Unknown) => {
                note("construction", &other, &ConstructionMethod::AssembledPieces);
                Construction::Assembled
            }
        };
        if generic && construction != Construction::Assembled {
            note(
                "construction",
                &analysis.construction_method,
                &ConstructionMethod::AssembledPieces,
            );
            construction = Construction::Assembled;
        }

        let mut neckline = match analysis.neckline_type {
            NecklineType::Unknown => {
                note("neckline", &NecklineType::Unknown, &NecklineType::Crew);
                NecklineType::Crew
            }
            NecklineType::OpenCardigan if garment != GarmentType::Cardigan => {
                note("neckline", &NecklineType::OpenCardigan, &NecklineType::Crew);
                NecklineType::Crew
            }
            known => known,
        };
        if generic && neckline != NecklineType::Crew {
            note("neckline", &neckline, &NecklineType::Crew);
            neckline = NecklineType::Crew;
        }

        let mut sleeve_style = match analysis.sleeve_style {
            SleeveStyle::Unknown => {
                note("sleeve style", &SleeveStyle::Unknown, &SleeveStyle::SetIn);
                SleeveStyle::SetIn
            }
            known => known,
        };
        if generic && sleeve_style != SleeveStyle::SetIn {
            note("sleeve style", &sleeve_style, &SleeveStyle::SetIn);
            sleeve_style = SleeveStyle::SetIn;
        }
        if garment == GarmentType::Vest && sleeve_style != SleeveStyle::None {
            note("sleeve style", &sleeve_style, &SleeveStyle::None);
            sleeve_style = SleeveStyle::None;
        }

        let sleeve_length = match (sleeve_style, analysis.sleeve_length) {
            (SleeveStyle::None, _) => SleeveLength::None,
            (_, length @ (SleeveLength::None | SleeveLength::Unknown)) => {
                note("sleeve length", &length, &SleeveLength::Long);
                SleeveLength::Long
            }
            (_, length) => length,
        };

        let closure = match (garment, analysis.closure) {
            (GarmentType::Cardigan, Closure::Unknown) => {
                note("closure", &Closure::Unknown, &Closure::None);
                Closure::None
            }
            (GarmentType::Cardigan, closure) => closure,
            (_, Closure::None) => Closure::None,
            (_, closure) => {
                note("closure", &closure, &Closure::None);
                Closure::None
            }
        };

        let fit = match analysis.fit_style {
            FitStyle::Unknown => {
                note("fit", &FitStyle::Unknown, &FitStyle::Regular);
                FitStyle::Regular
            }
            known => known,
        };

        if construction == Construction::SeamlessTopDown && sleeve_style != SleeveStyle::Raglan {
            note(
                "construction",
                &ConstructionMethod::TopDown,
                &ConstructionMethod::BottomUp,
            );
            construction = Construction::SeamlessBottomUp;
        }

        Self {
            garment,
            construction,
            neckline,
            sleeve_style,
            sleeve_length,
            closure,
            fit,
            fallbacks,
        }
    }

    /// Whether the garment has sleeves
    pub const fn has_sleeves(&self) -> bool {
        !matches!(self.sleeve_style, SleeveStyle::None)
    }

    /// Whether the sleeves reach the wrist
    pub const fn has_long_sleeves(&self) -> bool {
        self.has_sleeves() && matches!(self.sleeve_length, SleeveLength::Long)
    }

    /// Whether the garment opens at the front
    pub const fn is_cardigan(&self) -> bool {
        matches!(self.garment, GarmentType::Cardigan)
    }
}

impl fmt::Display for GarmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pullover => "pullover",
            Self::Cardigan => "cardigan",
            Self::Vest => "vest",
            Self::Other => "other",
            Self::Unknown => "unknown",
        })
    }
}

impl fmt::Display for ConstructionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AssembledPieces => "assembled-pieces",
            Self::TopDown => "top-down",
            Self::BottomUp => "bottom-up",
            Self::SideToSide => "side-to-side",
            Self::Unknown => "unknown",
        })
    }
}

impl fmt::Display for Construction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Assembled => "assembled pieces",
            Self::SeamlessBottomUp => "seamless bottom-up",
            Self::SeamlessTopDown => "seamless top-down",
        })
    }
}

impl fmt::Display for NecklineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Crew => "crew",
            Self::VNeck => "v-neck",
            Self::Boat => "boat",
            Self::OpenCardigan => "open-cardigan",
            Self::Hood => "hood",
            Self::Unknown => "unknown",
        })
    }
}

impl fmt::Display for SleeveStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SetIn => "set-in",
            Self::Raglan => "raglan",
            Self::DropShoulder => "drop-shoulder",
            Self::None => "none",
            Self::Unknown => "unknown",
        })
    }
}

impl fmt::Display for SleeveLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Long => "long",
            Self::ThreeQuarter => "three-quarter",
            Self::Short => "short",
            Self::None => "none",
            Self::Unknown => "unknown",
        })
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Buttons { count: Some(count) } => write!(f, "buttons ({count})"),
            Self::Buttons { count: None } => f.write_str("buttons"),
            Self::Zip => f.write_str("zip"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

impl fmt::Display for FitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fitted => "fitted",
            Self::Regular => "regular",
            Self::Oversized => "oversized",
            Self::Unknown => "unknown",
        })
    }
}
