//! Canonical container names.
//!
//! `list module`, `ListModule`, `listModuleContainer` and `listModule` all
//! name the same container. The canonical form is what the generated code
//! uses as the `<name>Container` property prefix.

/// Container used when a registration does not name one.
pub const DEFAULT_CONTAINER: &str = "base";

const CONTAINER_SUFFIX: &str = "Container";

/// Canonicalize `raw`, falling back to `default` (itself canonicalized) when
/// `raw` has no words.
///
/// Idempotent: canonicalizing a canonical name returns it unchanged.
pub fn canonical_container_name(raw: &str, default: &str) -> String {
    normalize(raw)
        .or_else(|| normalize(default))
        .unwrap_or_else(|| DEFAULT_CONTAINER.to_string())
}

fn normalize(raw: &str) -> Option<String> {
    let joined: String = raw.split_whitespace().map(capitalize).collect();
    if joined.is_empty() {
        return None;
    }

    let mut name = joined.as_str();
    while let Some(stripped) = name.strip_suffix(CONTAINER_SUFFIX)
        && !stripped.is_empty()
    {
        name = stripped;
    }
    Some(lowercase_first(name))
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spellings_of_the_same_container() {
        for raw in [
            "listModule",
            "ListModule",
            "list module",
            "listModuleContainer",
            "List Module Container",
        ] {
            assert_eq!(canonical_container_name(raw, DEFAULT_CONTAINER), "listModule", "{raw}");
        }
    }

    #[test]
    fn test_suffix_is_stripped_repeatedly() {
        assert_eq!(
            canonical_container_name("fooContainerContainer", DEFAULT_CONTAINER),
            "foo"
        );
    }

    #[test]
    fn test_suffix_alone_is_kept() {
        assert_eq!(canonical_container_name("Container", DEFAULT_CONTAINER), "container");
        assert_eq!(
            canonical_container_name("ContainerContainer", DEFAULT_CONTAINER),
            "container"
        );
    }

    #[test]
    fn test_empty_name_maps_to_default() {
        assert_eq!(canonical_container_name("", DEFAULT_CONTAINER), "base");
        assert_eq!(canonical_container_name("   ", "Shared Things"), "sharedThings");
        assert_eq!(canonical_container_name("", ""), DEFAULT_CONTAINER);
    }

    #[test]
    fn test_canonicalization_is_idempotent() {
        for raw in [
            "base",
            "list module",
            "Container",
            "ÉcranPrincipal",
            "a b c",
            "networkContainer",
        ] {
            let once = canonical_container_name(raw, DEFAULT_CONTAINER);
            let twice = canonical_container_name(&once, DEFAULT_CONTAINER);
            assert_eq!(once, twice, "{raw}");
        }
    }
}
