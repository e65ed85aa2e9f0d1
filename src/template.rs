//! Template compiler.
//!
//! Turns a human-authored template such as
//! `%[shortLevelName]s[%04[relativeCreated]d] %-45[message]s%[fields]s\n`
//! into a positional format string (`%[1]s[%04[2]d] %-45[3]s%[4]s\n`) plus
//! the ordered list of handlers that produce each argument.
//!
//! Names with no custom or built-in handler do not take an argument slot and
//! print literally. A purely numeric one such as `%[2]s` would read as an
//! argument index, so its `%` is escaped to `%%`.

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::handlers::{self, CustomHandlers, Handler};

/// Log level name, logger name, message and fields.
pub const BASIC: &str = "%[levelName]s:%[name]s:%[message]s%[fields]s\n";

/// Message and fields only.
pub const MESSAGE: &str = "%[message]s%[fields]s\n";

/// Padded timestamp, PID, short level name, logger name, message and fields.
pub const DETAILED: &str =
    "%-23[ascTime]s %-5[process]d %[shortLevelName]s %-20[name]s %[message]s%[fields]s\n";

/// `%%` is matched first so an escaped percent never starts a placeholder.
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%%|%[-+# 0]*\d*(?:\.\d*)?\[(\w+)\][A-Za-z]")
        .expect("placeholder regex is a compile-time constant and must be valid")
});

/// Set of attribute names a compiled template uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(HashSet<String>);

impl Attributes {
    /// Returns true if `attribute` appears in the template.
    pub fn contains(&self, attribute: &str) -> bool {
        self.0.contains(attribute)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn insert(&mut self, attribute: &str) {
        self.0.insert(attribute.to_string());
    }
}

/// Output of [`compile`].
///
/// `handlers[i]` produces argument `i + 1` of `format`, and `slots[i]` is the
/// attribute name it was compiled from.
#[derive(Clone)]
pub struct CompiledTemplate {
    pub source: String,
    pub format: String,
    pub handlers: Vec<Handler>,
    pub slots: Vec<String>,
    pub attributes: Attributes,
}

impl fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("source", &self.source)
            .field("format", &self.format)
            .field("slots", &self.slots)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

/// Compile `template`, resolving names against `custom` first and the
/// built-in registry second.
///
/// Every occurrence of a recognized name gets its own slot, so a name used
/// twice is resolved twice per render.
pub fn compile(template: &str, custom: &CustomHandlers) -> CompiledTemplate {
    let mut resolvers: Vec<Handler> = Vec::new();
    let mut slots = Vec::new();
    let mut attributes = Attributes::default();
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    for caps in BRACKETED.captures_iter(template) {
        let Some(name) = caps.get(1) else {
            continue; // %%
        };
        let attribute = name.as_str();
        let handler = match custom.get(attribute) {
            Some(handler) => handler.clone(),
            None => match handlers::builtin(attribute) {
                Some(handler) => handler,
                None => {
                    if attribute.bytes().all(|b| b.is_ascii_digit()) {
                        let start = caps.get(0).map_or(name.start(), |m| m.start());
                        edits.push((start..start + 1, "%%".to_string()));
                    }
                    continue;
                }
            },
        };
        resolvers.push(handler);
        slots.push(attribute.to_string());
        attributes.insert(attribute);
        edits.push((name.range(), resolvers.len().to_string()));
    }

    // Rewrite right to left so earlier byte offsets stay valid.
    let mut format = template.to_string();
    for (span, replacement) in edits.into_iter().rev() {
        format.replace_range(span, &replacement);
    }

    CompiledTemplate {
        source: template.to_string(),
        format,
        handlers: resolvers,
        slots,
        attributes,
    }
}

/// Count `%[n]` argument references in a compiled format string.
pub fn positional_count(format: &str) -> usize {
    static INDEXED: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"%%|%[-+# 0]*\d*(?:\.\d*)?\[(\d+)\][A-Za-z]")
            .expect("positional index regex is a compile-time constant and must be valid")
    });
    INDEXED
        .captures_iter(format)
        .filter(|caps| caps.get(1).is_some())
        .count()
}
