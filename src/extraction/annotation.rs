//! Recognizer for the property-documentation mini-grammar.
//!
//! ```text
//! line         := prefixedName WS? "-[" cardinality "]->" WS? prefixedName
//! prefixedName := prefix ":" localName
//! cardinality  := INTEGER | INTEGER ".." (INTEGER | "N")
//! ```
//!
//! Annotation text is split into lines by [`tokenize`]; each line is then
//! classified by [`match_line`]. Lines that do not have the shape of the
//! grammar are ordinary prose and come back as [`LineMatch::Skipped`].

use std::sync::LazyLock;

use regex::Regex;

use crate::error::LineError;
use crate::extraction::cardinality;
use crate::model::descriptor::{PropertyDescriptor, TargetRef};
use crate::model::graph::PrefixMap;

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        concat!(
            r"^(?P<pp>[A-Za-z_][\w.-]*)?:(?P<pl>[\w-]+(?:\.[\w-]+)*)",
            r"\s*-\[(?P<card>[^\]]*)\]->\s*",
            r"(?P<tp>[A-Za-z_][\w.-]*)?:(?P<tl>[\w-]+(?:\.[\w-]+)*)",
        ),
    )
    .expect("annotation line pattern is valid")
});

/// Result of matching one annotation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    Matched(PropertyDescriptor),
    /// Not a descriptor line.
    Skipped,
    /// A descriptor line that could not be resolved.
    Malformed(LineError),
}

/// Split annotation text into candidate lines: trimmed, bullet marker
/// (`* ` or `- `) removed, blank lines dropped.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .map(|line| {
            line.strip_prefix("* ")
                .or_else(|| line.strip_prefix("- "))
                .map(str::trim_start)
                .unwrap_or(line)
        })
        .filter(|line| !line.is_empty())
}

/// Match a single line documented on `owner_class`.
pub fn match_line(line: &str, owner_class: &str, prefixes: &PrefixMap) -> LineMatch {
    let Some(caps) = LINE_RE.captures(line) else {
        return LineMatch::Skipped;
    };

    let property_prefix = caps.name("pp").map_or("", |m| m.as_str());
    let property_local = &caps["pl"];
    let target_prefix = caps.name("tp").map_or("", |m| m.as_str());
    let target_local = &caps["tl"];

    let Some(property) = prefixes.expand(property_prefix, property_local) else {
        return LineMatch::Malformed(LineError::UnresolvedPrefix {
            prefix: property_prefix.to_string(),
        });
    };
    let Some(target) = prefixes.expand(target_prefix, target_local) else {
        return LineMatch::Malformed(LineError::UnresolvedPrefix {
            prefix: target_prefix.to_string(),
        });
    };

    let written = format!("{property_prefix}:{property_local}");
    match cardinality::resolve(&caps["card"], &written) {
        Ok(cardinality) => LineMatch::Matched(PropertyDescriptor {
            owner_class: owner_class.to_string(),
            property,
            cardinality,
            target: TargetRef::classify(target),
        }),
        Err(e) => LineMatch::Malformed(e),
    }
}

/// Match every line of `text`, keeping source order. Each entry carries the
/// tokenized line it came from.
pub fn parse_annotation<'t>(
    text: &'t str,
    owner_class: &str,
    prefixes: &PrefixMap,
) -> Vec<(&'t str, LineMatch)> {
    tokenize(text)
        .map(|line| (line, match_line(line, owner_class, prefixes)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_strips_bullets_and_blank_lines() {
        let text = "The properties are:\n\n* ex:a -[1]-> ex:B\n- ex:c -[0..N]-> ex:D\n   \n";
        let lines: Vec<&str> = tokenize(text).collect();
        assert_eq!(
            lines,
            vec!["The properties are:", "ex:a -[1]-> ex:B", "ex:c -[0..N]-> ex:D"]
        );
    }

    #[test]
    fn prose_with_arrow_like_text_is_skipped() {
        let prefixes = PrefixMap::new();
        assert_eq!(
            match_line("use -[ and ]-> in docs", "http://ex.org/C", &prefixes),
            LineMatch::Skipped
        );
    }
}
