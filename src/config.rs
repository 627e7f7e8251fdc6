//! Per-document stem settings
//!
//! Read once from document attributes at the start of a conversion and
//! passed explicitly through every stage. Nothing here is process-wide, so
//! two documents converted side by side never see each other's settings.

use std::fmt;
use std::str::FromStr;

use crate::attr::DocAttrs;

/// Attribute selecting the artifact format (`png` or `svg`).
pub const FORMAT_ATTR: &str = "mathematical-format";
/// Attribute selecting the PNG resolution in pixels per inch.
pub const PPI_ATTR: &str = "mathematical-ppi";
/// Attribute enabling inline embedding of rendered output.
pub const INLINE_ATTR: &str = "mathematical-inline";

/// Default PNG resolution.
pub const DEFAULT_PPI: f64 = 300.0;
/// Resolution used for SVG output regardless of configuration.
pub const SVG_PPI: f64 = 72.0;

// =============================================================================
// ImageFormat
// =============================================================================

/// Rendered artifact format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// File extension (without dot)
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// Whether generated block images carry explicit width/height.
    ///
    /// SVG output sizes itself.
    pub fn needs_dimensions(&self) -> bool {
        matches!(self, Self::Png)
    }
}

impl FromStr for ImageFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(UnknownFormat(other.to_owned())),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Format name that is neither `png` nor `svg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown format '{}'", self.0)
    }
}

impl std::error::Error for UnknownFormat {}

// =============================================================================
// EngineOptions
// =============================================================================

/// Options a math engine is created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    pub format: ImageFormat,
    /// Effective resolution: the configured value for PNG, 72.0 for SVG
    pub ppi: f64,
}

// =============================================================================
// StemSettings
// =============================================================================

/// Resolved settings for one document conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StemSettings {
    pub format: ImageFormat,
    pub ppi: f64,
    /// Embed rendered output instead of writing image files
    pub inline: bool,
}

impl Default for StemSettings {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            ppi: DEFAULT_PPI,
            inline: false,
        }
    }
}

impl StemSettings {
    /// Resolve settings from document attributes.
    ///
    /// Never fails: unknown formats fall back to PNG and bad resolutions to
    /// the default, each with a warning. `mathematical-inline` is enabled by
    /// its mere presence, whatever its value.
    pub fn from_attrs(attrs: &DocAttrs) -> Self {
        let format = match attrs.get(FORMAT_ATTR) {
            None => ImageFormat::Png,
            Some(name) => name.parse().unwrap_or_else(|err: UnknownFormat| {
                log::warn!("{err}, retreat to 'png'");
                ImageFormat::Png
            }),
        };

        let configured_ppi = match attrs.get(PPI_ATTR) {
            None => DEFAULT_PPI,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(ppi) if ppi.is_finite() && ppi > 0.0 => ppi,
                _ => {
                    log::warn!("invalid {PPI_ATTR} '{raw}', using {DEFAULT_PPI}");
                    DEFAULT_PPI
                }
            },
        };
        let ppi = match format {
            ImageFormat::Png => configured_ppi,
            ImageFormat::Svg => SVG_PPI,
        };

        let inline = attrs.contains_key(INLINE_ATTR);
        if inline && format == ImageFormat::Png {
            log::warn!("can't use {INLINE_ATTR} together with {FORMAT_ATTR}=png");
        }

        Self { format, ppi, inline }
    }

    /// Options for creating the math engine.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            format: self.format,
            ppi: self.ppi,
        }
    }

    /// Whether the stem processor is registered for a backend.
    ///
    /// Only PDF output needs equations pre-rendered; HTML backends typeset
    /// math in the browser.
    pub fn applies_to_backend(backend: &str) -> bool {
        backend == "pdf"
    }
}
