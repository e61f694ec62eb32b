//! `SurrealQL` operators and the aliases accepted for them.

/// Operators `SurrealQL` understands natively.
pub const OPERATORS: &[&str] = &[
    "=", "!=", "==", "?=", "*=", "~", "!~", "?~", "*~", "<", "<=", ">", ">=", "+", "-", "*", "/",
    "**", "&&", "||", "∋", "∌", "⊇", "⊃", "⊅", "∈", "∉", "⊆", "⊂", "⊄", "OUTSIDE", "INTERSECTS",
];

/// Accepted alias tokens and the operator each one is emitted as.
pub const ALIASES: &[(&str, &str)] = &[
    ("IS", "="),
    ("IS NOT", "!="),
    ("AND", "&&"),
    ("OR", "||"),
    ("CONTAINS", "∋"),
    ("CONTAINSNOT", "∌"),
    ("CONTAINSALL", "⊇"),
    ("CONTAINSANY", "⊃"),
    ("CONTAINSNONE", "⊅"),
    ("INSIDE", "∈"),
    ("NOTINSIDE", "∉"),
    ("ALLINSIDE", "⊆"),
    ("ANYINSIDE", "⊂"),
    ("NONEINSIDE", "⊄"),
];

/// Resolves an operator token to the form emitted in compiled text.
///
/// Aliases are matched case-insensitively with whitespace collapsed; any
/// other token is returned unchanged so raw operators pass through.
#[must_use]
pub fn resolve(token: &str) -> &str {
    let normalized = token.split_whitespace().collect::<Vec<_>>().join(" ");
    ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(&normalized))
        .map_or(token, |&(_, operator)| operator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_aliases() {
        assert_eq!(resolve("IS"), "=");
        assert_eq!(resolve("IS NOT"), "!=");
        assert_eq!(resolve("AND"), "&&");
        assert_eq!(resolve("OR"), "||");
        assert_eq!(resolve("CONTAINS"), "∋");
        assert_eq!(resolve("CONTAINSNONE"), "⊅");
        assert_eq!(resolve("INSIDE"), "∈");
        assert_eq!(resolve("NONEINSIDE"), "⊄");
    }

    #[test]
    fn test_alias_lookup_is_case_and_space_insensitive() {
        assert_eq!(resolve("is  not"), "!=");
        assert_eq!(resolve("containsAll"), "⊇");
    }

    #[test]
    fn test_canonical_and_unknown_pass_through() {
        assert_eq!(resolve("="), "=");
        assert_eq!(resolve("?~"), "?~");
        assert_eq!(resolve("INTERSECTS"), "INTERSECTS");
        assert_eq!(resolve("like"), "like");
    }

    #[test]
    fn test_every_alias_targets_a_native_operator() {
        for (alias, operator) in ALIASES {
            assert!(OPERATORS.contains(operator), "{alias} -> {operator}");
        }
    }
}
