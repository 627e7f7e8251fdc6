//! Inline stem macro scanning
//!
//! Finds `stem:[...]`, `latexmath:[...]` and `asciimath:[...]` in raw text
//! and replaces each with rendered output. A macro may name its own
//! substitution list (`stem:c,q[...]`); a leading backslash escapes it.
//!
//! Scanning always returns the final text. Callers write it back whenever
//! it differs from the input, so stripping an escape is persisted even if
//! nothing was rendered.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::attr::DocAttrs;
use crate::engine::MathEngine;
use crate::error::StemResult;
use crate::render::EquationRenderer;
use crate::rewrite::{inline_image, inline_pass};
use crate::store::ArtifactStore;
use crate::subs::{Substitution, apply_subs, resolve_pass_subs};

/// Optional escape, macro name, substitution list, body up to the first
/// unescaped `]`. The body may span lines.
static STEM_INLINE_MACRO_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\\?(?:stem|latexmath|asciimath):([a-z,]*)\[(.*?[^\\])\]")
        .expect("valid stem macro regex")
});

const MACRO_NAMES: [&str; 3] = ["stem:", "latexmath:", "asciimath:"];

/// Cheap check run before the regex.
pub fn may_contain_macros(text: &str) -> bool {
    text.contains(':') && MACRO_NAMES.iter().any(|name| text.contains(name))
}

// =============================================================================
// Scanned
// =============================================================================

/// Result of scanning one text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned<'t> {
    /// Final text; borrowed when nothing changed
    pub text: Cow<'t, str>,
    /// Macros rendered
    pub rendered: usize,
    /// Escaped macros whose backslash was stripped
    pub escaped: usize,
}

impl<'t> Scanned<'t> {
    fn unchanged(text: &'t str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            rendered: 0,
            escaped: 0,
        }
    }

    /// Whether the final text differs from the input.
    pub fn is_modified(&self) -> bool {
        matches!(self.text, Cow::Owned(_))
    }

    /// The new text, if it differs from the input.
    pub fn into_modified(self) -> Option<String> {
        match self.text {
            Cow::Owned(text) => Some(text),
            Cow::Borrowed(_) => None,
        }
    }
}

// =============================================================================
// MacroScanner
// =============================================================================

/// Scanner bound to one document's attributes and output family.
#[derive(Debug, Clone, Copy)]
pub struct MacroScanner<'a> {
    attrs: &'a DocAttrs,
    to_html: bool,
}

impl<'a> MacroScanner<'a> {
    /// `to_html` selects the default substitutions of macros that name none.
    pub fn new(attrs: &'a DocAttrs, to_html: bool) -> Self {
        Self { attrs, to_html }
    }

    /// Substitutions of a macro with no explicit list.
    pub fn default_subs(&self) -> &'static [Substitution] {
        if self.to_html {
            &[Substitution::SpecialCharacters]
        } else {
            &[]
        }
    }

    /// Decode a macro body into equation source.
    ///
    /// Returns `None` for blank bodies, which are left alone. Trailing
    /// whitespace is dropped, escaped brackets are unescaped and the
    /// substitutions are applied.
    pub fn prepare(&self, subs_spec: &str, body: &str) -> Option<String> {
        let body = body.trim_end();
        if body.is_empty() {
            return None;
        }
        let body = body.replace(r"\]", "]");

        let resolved;
        let subs = if subs_spec.is_empty() {
            self.default_subs()
        } else {
            resolved = resolve_pass_subs(subs_spec);
            resolved.as_slice()
        };
        if subs.is_empty() {
            Some(body)
        } else {
            Some(apply_subs(&body, subs, self.attrs))
        }
    }

    /// Replace every macro in `text` with the output of `replace`.
    ///
    /// `replace` receives the prepared equation source. Its first error
    /// aborts the scan.
    pub fn scan<'t, F>(&self, text: &'t str, mut replace: F) -> StemResult<Scanned<'t>>
    where
        F: FnMut(&str) -> StemResult<String>,
    {
        if !may_contain_macros(text) {
            return Ok(Scanned::unchanged(text));
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut rendered = 0;
        let mut escaped = 0;

        for caps in STEM_INLINE_MACRO_RX.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&text[last..whole.start()]);
            last = whole.end();

            let matched = whole.as_str();
            if let Some(unescaped) = matched.strip_prefix('\\') {
                out.push_str(unescaped);
                escaped += 1;
                continue;
            }

            let subs_spec = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            match self.prepare(subs_spec, body) {
                Some(equation) => {
                    out.push_str(&replace(&equation)?);
                    rendered += 1;
                }
                None => out.push_str(matched),
            }
        }
        out.push_str(&text[last..]);

        if out == text {
            return Ok(Scanned::unchanged(text));
        }
        Ok(Scanned {
            text: Cow::Owned(out),
            rendered,
            escaped,
        })
    }

    /// Render every macro in `text`.
    ///
    /// In inline mode the rendered markup is embedded in a passthrough;
    /// otherwise an image is written to `store` and referenced with its
    /// dimensions.
    pub fn render<'t, E: MathEngine>(
        &self,
        text: &'t str,
        renderer: &EquationRenderer<E>,
        store: &ArtifactStore,
    ) -> StemResult<Scanned<'t>> {
        let inline = renderer.settings().inline;
        self.scan(text, |equation| {
            let rendered = renderer.render(equation, true)?;
            if inline {
                Ok(inline_pass(&rendered))
            } else {
                let record = store.persist(&rendered, None)?;
                Ok(inline_image(&record))
            }
        })
    }
}
