//! Equation rendering
//!
//! Wraps equation bodies in the delimiters the engine expects and attaches
//! the document's artifact format to the result.

use crate::config::{ImageFormat, StemSettings};
use crate::engine::MathEngine;
use crate::error::{StemError, StemResult};

// =============================================================================
// Delimiters
// =============================================================================

/// Wrap an equation body: `$…$` inline, `$$…$$` for blocks.
pub fn wrap_equation(body: &str, inline: bool) -> String {
    if inline {
        format!("${body}$")
    } else {
        format!("$${body}$$")
    }
}

// =============================================================================
// Rendered
// =============================================================================

/// A rendered equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// Wrapped input the engine was given (also the content-address key)
    pub input: String,
    /// PNG bytes or SVG markup
    pub data: Vec<u8>,
    pub width: f64,
    pub height: f64,
    pub format: ImageFormat,
}

impl Rendered {
    /// Payload as text, for embedding SVG markup inline.
    pub fn markup(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

// =============================================================================
// EquationRenderer
// =============================================================================

/// Engine handle plus the settings of the document being converted.
pub struct EquationRenderer<E> {
    engine: E,
    settings: StemSettings,
}

impl<E: MathEngine> EquationRenderer<E> {
    /// Bind an engine to a document's settings.
    pub fn new(engine: E, settings: StemSettings) -> Self {
        Self { engine, settings }
    }

    /// Settings of the document being converted.
    pub fn settings(&self) -> &StemSettings {
        &self.settings
    }

    /// Render one equation body.
    ///
    /// Engine failures are not recovered here; they abort the conversion.
    pub fn render(&self, body: &str, inline: bool) -> StemResult<Rendered> {
        let input = wrap_equation(body, inline);
        let output = self
            .engine
            .parse(&input)
            .map_err(|err| StemError::engine(input.as_str(), err))?;
        Ok(Rendered {
            input,
            data: output.data,
            width: output.width,
            height: output.height,
            format: self.settings.format,
        })
    }
}
