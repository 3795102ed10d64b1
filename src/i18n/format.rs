use std::{fmt::Display, sync::OnceLock};

use regex::{Captures, Regex};

fn placeholder_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\{(\d+)\}").ok())
        .as_ref()
}

/// Replaces `{N}` placeholders with the `N`th argument.
///
/// Placeholders without a matching argument are left untouched.
pub fn format_message(pattern: &str, args: &[&dyn Display]) -> String {
    let Some(regex) = placeholder_pattern() else {
        return pattern.to_string();
    };

    regex
        .replace_all(pattern, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map_or_else(|| caps[0].to_string(), |arg| arg.to_string())
        })
        .into_owned()
}
