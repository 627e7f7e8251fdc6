//! Text substitutions applied to equation source before rendering
//!
//! A substitution list is an ordered set of passes. Blocks carry one to
//! describe how their text is converted; inline stem macros may name their
//! own with `stem:c,q[...]`.

use std::borrow::Cow;
use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::attr::DocAttrs;

// =============================================================================
// Substitution
// =============================================================================

/// A single substitution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Substitution {
    /// `&`, `<`, `>` replaced by entities
    SpecialCharacters,
    /// Constrained inline formatting (`*strong*`, `_emphasis_`, ...)
    Quotes,
    /// `{name}` attribute references
    Attributes,
    /// Typographic replacements (`(C)`, `--`, `...`, arrows)
    Replacements,
    /// Inline macros
    Macros,
    /// Hard line breaks (` +` at end of line)
    PostReplacements,
}

impl Substitution {
    /// Substitutions applied to normal paragraph text, in order.
    pub const NORMAL: &'static [Substitution] = &[
        Self::SpecialCharacters,
        Self::Quotes,
        Self::Attributes,
        Self::Replacements,
        Self::Macros,
        Self::PostReplacements,
    ];

    /// Substitutions applied to verbatim (literal, listing) text.
    pub const VERBATIM: &'static [Substitution] = &[Self::SpecialCharacters];

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Self::SpecialCharacters => "specialcharacters",
            Self::Quotes => "quotes",
            Self::Attributes => "attributes",
            Self::Replacements => "replacements",
            Self::Macros => "macros",
            Self::PostReplacements => "post_replacements",
        }
    }

    /// Resolve a single name, alias, shorthand or group into passes.
    ///
    /// Returns `None` for unknown names.
    pub fn lookup(name: &str) -> Option<&'static [Substitution]> {
        let subs: &'static [Substitution] = match name {
            "c" | "specialcharacters" | "specialchars" => &[Self::SpecialCharacters],
            "q" | "quotes" => &[Self::Quotes],
            "a" | "attributes" => &[Self::Attributes],
            "r" | "replacements" => &[Self::Replacements],
            "m" | "macros" => &[Self::Macros],
            "p" | "post_replacements" => &[Self::PostReplacements],
            "n" | "normal" => Self::NORMAL,
            "v" | "verbatim" => Self::VERBATIM,
            "none" => &[],
            _ => return None,
        };
        Some(subs)
    }

    /// Apply this pass to `text`.
    pub fn apply<'a>(&self, text: &'a str, attrs: &DocAttrs) -> Cow<'a, str> {
        match self {
            Self::SpecialCharacters => escape_special_chars(text),
            Self::Quotes => apply_quotes(text),
            Self::Attributes => apply_attributes(text, attrs),
            Self::Replacements => apply_replacements(text),
            // Equation source never contains macros that must be expanded
            // before the engine sees it.
            Self::Macros => Cow::Borrowed(text),
            Self::PostReplacements => apply_post_replacements(text),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve the comma-separated substitution list of an inline macro
/// (`stem:c,q[...]`).
///
/// Groups expand in place, duplicates keep their first position and unknown
/// names are dropped with a warning.
pub fn resolve_pass_subs(spec: &str) -> Vec<Substitution> {
    let mut resolved = Vec::new();
    for name in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match Substitution::lookup(name) {
            Some(subs) => {
                for sub in subs {
                    if !resolved.contains(sub) {
                        resolved.push(*sub);
                    }
                }
            }
            None => log::warn!("invalid substitution type for passthrough macro: {name}"),
        }
    }
    resolved
}

/// Apply `subs` to `text` in order.
pub fn apply_subs(text: &str, subs: &[Substitution], attrs: &DocAttrs) -> String {
    let mut current = text.to_owned();
    for sub in subs {
        let next = match sub.apply(&current, attrs) {
            Cow::Owned(next) => Some(next),
            Cow::Borrowed(_) => None,
        };
        if let Some(next) = next {
            current = next;
        }
    }
    current
}

// =============================================================================
// Passes
// =============================================================================

fn escape_special_chars(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut result = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

static QUOTE_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\*(\S|\S[^*]*?\S)\*", "<strong>$1</strong>"),
        (r"`(\S|\S[^`]*?\S)`", "<code>$1</code>"),
        (r"_(\S|\S[^_]*?\S)_", "<em>$1</em>"),
        (r"\^(\S+?)\^", "<sup>$1</sup>"),
        (r"~(\S+?)~", "<sub>$1</sub>"),
    ]
    .into_iter()
    .map(|(rx, rep)| (Regex::new(rx).expect("valid quote regex"), rep))
    .collect()
});

fn apply_quotes(text: &str) -> Cow<'_, str> {
    apply_rules(text, &QUOTE_RULES)
}

/// Run every rule in order, allocating only when one of them matches.
fn apply_rules<'a>(text: &'a str, rules: &[(Regex, &'static str)]) -> Cow<'a, str> {
    let mut current: Option<String> = None;
    for (rx, rep) in rules {
        let haystack = current.as_deref().unwrap_or(text);
        let next = match rx.replace_all(haystack, *rep) {
            Cow::Owned(next) => Some(next),
            Cow::Borrowed(_) => None,
        };
        if next.is_some() {
            current = next;
        }
    }
    match current {
        Some(s) => Cow::Owned(s),
        None => Cow::Borrowed(text),
    }
}

static ATTRIBUTE_REF_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_][A-Za-z0-9_-]*)\}").expect("valid attribute regex"));

fn apply_attributes<'a>(text: &'a str, attrs: &DocAttrs) -> Cow<'a, str> {
    if !text.contains('{') {
        return Cow::Borrowed(text);
    }
    ATTRIBUTE_REF_RX.replace_all(text, |caps: &Captures<'_>| {
        attrs
            .get(&caps[1])
            .cloned()
            .unwrap_or_else(|| caps[0].to_owned())
    })
}

static REPLACEMENT_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\(C\)", "&#169;"),
        (r"\(R\)", "&#174;"),
        (r"\(TM\)", "&#8482;"),
        (r"(^|\s)--(\s|$)", "&#8201;&#8212;&#8201;"),
        (r"(\w)--(\w)", "$1&#8212;&#8203;$2"),
        (r"\.\.\.", "&#8230;&#8203;"),
        (r"(\w)'(\w)", "$1&#8217;$2"),
        (r"->", "&#8594;"),
        (r"=>", "&#8658;"),
        (r"<-", "&#8592;"),
        (r"<=", "&#8656;"),
    ]
    .into_iter()
    .map(|(rx, rep)| (Regex::new(rx).expect("valid replacement regex"), rep))
    .collect()
});

fn apply_replacements(text: &str) -> Cow<'_, str> {
    apply_rules(text, &REPLACEMENT_RULES)
}

static HARD_BREAK_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m) \+$").expect("valid line break regex"));

fn apply_post_replacements(text: &str) -> Cow<'_, str> {
    HARD_BREAK_RX.replace_all(text, "<br>")
}
