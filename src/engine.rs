//! Math engine seam
//!
//! The typesetting engine is an external collaborator. It is created once
//! per document with that document's [`EngineOptions`] and then asked to
//! parse wrapped equations (`$…$` or `$$…$$`) one at a time.

use crate::config::EngineOptions;
use crate::error::EngineError;

/// Output of one engine call.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    /// PNG bytes or SVG markup
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

/// A math typesetting engine bound to one format and resolution.
pub trait MathEngine {
    /// Render a wrapped equation synchronously.
    fn parse(&self, input: &str) -> Result<EngineOutput, EngineError>;
}

impl<E: MathEngine + ?Sized> MathEngine for &E {
    fn parse(&self, input: &str) -> Result<EngineOutput, EngineError> {
        (**self).parse(input)
    }
}

impl<E: MathEngine + ?Sized> MathEngine for Box<E> {
    fn parse(&self, input: &str) -> Result<EngineOutput, EngineError> {
        (**self).parse(input)
    }
}

/// Creates a [`MathEngine`] for each document conversion.
pub trait EngineFactory {
    /// Engine type produced by this factory.
    type Engine: MathEngine;

    /// Create an engine for one document.
    fn create(&self, options: &EngineOptions) -> Result<Self::Engine, EngineError>;
}

impl<F, E> EngineFactory for F
where
    F: Fn(&EngineOptions) -> Result<E, EngineError>,
    E: MathEngine,
{
    type Engine = E;

    fn create(&self, options: &EngineOptions) -> Result<E, EngineError> {
        self(options)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted engine used by unit tests across the crate.

    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::ImageFormat;

    /// Everything a [`FakeEngine`] was asked to do.
    #[derive(Debug, Default)]
    pub struct EngineLog {
        pub created: Vec<EngineOptions>,
        pub inputs: Vec<String>,
    }

    /// Engine that echoes its input as the rendered payload.
    ///
    /// Inputs containing `FAIL` are rejected.
    #[derive(Debug, Clone)]
    pub struct FakeEngine {
        pub options: EngineOptions,
        pub log: Rc<RefCell<EngineLog>>,
    }

    impl FakeEngine {
        pub fn new(format: ImageFormat, ppi: f64) -> Self {
            Self {
                options: EngineOptions { format, ppi },
                log: Rc::default(),
            }
        }
    }

    impl MathEngine for FakeEngine {
        fn parse(&self, input: &str) -> Result<EngineOutput, EngineError> {
            self.log.borrow_mut().inputs.push(input.to_owned());
            if input.contains("FAIL") {
                return Err(EngineError::new("undefined control sequence"));
            }
            let data = match self.options.format {
                ImageFormat::Svg => format!("<svg>{input}</svg>").into_bytes(),
                ImageFormat::Png => input.as_bytes().to_vec(),
            };
            Ok(EngineOutput {
                data,
                width: input.len() as f64 * 10.0,
                height: 24.0,
            })
        }
    }

    /// Factory that records every engine it creates into a shared log.
    pub fn recording_factory(
        log: Rc<RefCell<EngineLog>>,
    ) -> impl Fn(&EngineOptions) -> Result<FakeEngine, EngineError> {
        move |options: &EngineOptions| {
            log.borrow_mut().created.push(*options);
            Ok(FakeEngine {
                options: *options,
                log: Rc::clone(&log),
            })
        }
    }
}
