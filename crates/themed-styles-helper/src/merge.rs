//! Merging base and themed style blocks.
//!
//! Colors move out of the base table (the themed factory provides them) and
//! spread references leave the themed blocks (the base properties they
//! pulled in are now inlined). For every name the surviving base
//! properties come first, followed by the surviving themed ones.

use crate::config::FilterConfig;
use crate::scanner::{Block, BlockMap, Property};

/// True when a base property sets one of the themed colors.
///
/// Plain prefix test with no word boundary: a prefix configured without its
/// colon (`color`) also catches `colorIntensity:`.
pub fn is_color_property(property: &Property, prefixes: &[String]) -> bool {
    let head = property.head();
    prefixes.iter().any(|prefix| head.starts_with(prefix.as_str()))
}

pub fn is_spread_reference(property: &Property, marker: &str) -> bool {
    property.contains(marker)
}

pub fn filter_base(properties: &[Property], config: &FilterConfig) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| !is_color_property(p, &config.color_prefixes))
        .cloned()
        .collect()
}

pub fn filter_themed(properties: &[Property], config: &FilterConfig) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| !is_spread_reference(p, &config.spread_marker))
        .cloned()
        .collect()
}

/// Merge the two block maps. Names whose filtered properties are empty in
/// both sources are left out.
pub fn merge_blocks(base: &BlockMap, themed: &BlockMap, config: &FilterConfig) -> BlockMap {
    let names: std::collections::BTreeSet<&String> = base.keys().chain(themed.keys()).collect();
    let mut merged = BlockMap::new();

    for name in names {
        let base_block = base.get(name);
        let themed_block = themed.get(name);

        let mut properties = base_block
            .map(|b| filter_base(&b.properties, config))
            .unwrap_or_default();
        if let Some(block) = themed_block {
            properties.extend(filter_themed(&block.properties, config));
        }

        if properties.is_empty() {
            tracing::debug!(name = %name, "Dropping style with no remaining properties");
            continue;
        }

        let span = themed_block
            .or(base_block)
            .map(|b| b.span.clone())
            .unwrap_or_default();
        merged.insert(
            name.clone(),
            Block {
                name: name.clone(),
                properties,
                span,
            },
        );
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_blocks;

    fn blocks(text: &str) -> BlockMap {
        let lines: Vec<&str> = text.lines().collect();
        scan_blocks(&lines, 0).unwrap()
    }

    fn heads(block: &Block) -> Vec<&str> {
        block.properties.iter().map(Property::head).collect()
    }

    #[test]
    fn test_container_scenario() {
        let base = blocks("  container: {\n    flex: 1,\n    backgroundColor: 'red',\n  },");
        let themed = blocks("  container: {\n    ...styles.container,\n    color: colors.text,\n  },");

        let merged = merge_blocks(&base, &themed, &FilterConfig::default());
        assert_eq!(merged.len(), 1);
        assert_eq!(heads(&merged["container"]), vec!["flex: 1,", "color: colors.text,"]);
    }

    #[test]
    fn test_spread_only_themed_block_is_dropped() {
        let base = BlockMap::new();
        let themed = blocks("  badge: {\n    ...styles.badge,\n  },");

        let merged = merge_blocks(&base, &themed, &FilterConfig::default());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_color_only_base_block_is_dropped() {
        let base = blocks("  divider: {\n    borderBottomColor: '#eee',\n  },\n  row: {\n    flexDirection: 'row',\n  },");
        let merged = merge_blocks(&base, &BlockMap::new(), &FilterConfig::default());
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["row"]);
    }

    #[test]
    fn test_every_surviving_name_is_kept() {
        let base = blocks("  a: {\n    flex: 1,\n  },\n  b: {\n    color: 'red',\n  },");
        let themed = blocks("  b: {\n    color: colors.text,\n  },\n  c: {\n    borderColor: colors.border,\n  },");

        let merged = merge_blocks(&base, &themed, &FilterConfig::default());
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(heads(&merged["b"]), vec!["color: colors.text,"]);
        assert_eq!(heads(&merged["c"]), vec!["borderColor: colors.border,"]);
    }

    #[test]
    fn test_multi_line_values_are_filtered_whole() {
        let base = blocks(
            "  card: {\n    backgroundColor:\n      Platform.OS === 'ios' ? '#fff' : '#000',\n    transform: [\n      { rotate: '45deg' },\n    ],\n    shadowColor: isDark\n      ? '#000'\n      : '#333',\n    borderRadius: 8,\n  },",
        );
        let themed = blocks("  card: {\n    ...styles.card,\n    backgroundColor:\n      colors.card,\n  },");

        let merged = merge_blocks(&base, &themed, &FilterConfig::default());
        let card = &merged["card"];
        assert_eq!(heads(card), vec!["transform: [", "borderRadius: 8,", "backgroundColor:"]);
        let lines: Vec<&str> = card
            .properties
            .iter()
            .flat_map(|p| p.lines.iter().map(String::as_str))
            .collect();
        assert!(!lines.iter().any(|l| l.contains("Platform.OS") || l.contains("'#333'")));
        assert_eq!(lines.last(), Some(&"      colors.card,"));
    }

    #[test]
    fn test_color_prefix_has_no_word_boundary() {
        let base = blocks("  a: {\n    colorIntensity: 2,\n    width: 3,\n  },");
        let config = FilterConfig {
            color_prefixes: vec!["color".to_string()],
            ..FilterConfig::default()
        };
        let merged = merge_blocks(&base, &BlockMap::new(), &config);
        assert_eq!(heads(&merged["a"]), vec!["width: 3,"]);

        let merged = merge_blocks(&base, &BlockMap::new(), &FilterConfig::default());
        assert_eq!(heads(&merged["a"]), vec!["colorIntensity: 2,", "width: 3,"]);
    }

    #[test]
    fn test_filters_are_idempotent() {
        let base = blocks("  a: {\n    flex: 1,\n    shadowColor: '#000',\n    color: 'red',\n    padding: 2,\n  },");
        let themed = blocks("  a: {\n    ...styles.a,\n    color: colors.text,\n  },");
        let config = FilterConfig::default();

        let once = filter_base(&base["a"].properties, &config);
        assert_eq!(filter_base(&once, &config), once);
        assert_eq!(once.len(), 2);

        let once = filter_themed(&themed["a"].properties, &config);
        assert_eq!(filter_themed(&once, &config), once);
        assert_eq!(once.len(), 1);
    }
}
