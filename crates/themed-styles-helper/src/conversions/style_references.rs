// style-references: point JSX at the themed style object
//
// Once the base table is gone, every `styles.header` no longer resolves,
// whether it sits in `style={...}`, an array, or a conditional.
//
// Example:
//   Input:  <View style={[styles.row, active && styles.active]}>
//   Output: <View style={[themedStyles.row, active && themedStyles.active]}>
//
// Member accesses (`props.styles.x`) and spreads (`...styles.x`) are left
// alone; the spreads belong to the themed-styles rule.
//

use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

use crate::config::ReferenceConfig;
use crate::rule::{CheckResult, ConvertResult, Rule};
use crate::utils::file_io::{read_file, write_file};
use crate::utils::location::offset_to_location;

pub struct StyleReferencesConverter {
    reference_regex: Regex,
    replacement: String,
    config: ReferenceConfig,
}

impl StyleReferencesConverter {
    pub fn new(config: ReferenceConfig) -> Result<Self> {
        let pattern = format!(
            r"(?m)(^|[^\w$.]){}\.([A-Za-z_$][\w$]*)",
            regex::escape(&config.base_object)
        );
        let reference_regex =
            Regex::new(&pattern).context("Failed to compile style reference regex")?;
        let replacement = format!("${{1}}{}.${{2}}", config.themed_object);

        Ok(Self {
            reference_regex,
            replacement,
            config,
        })
    }

    /// Byte offsets and style names of every base reference
    pub fn find_references<'a>(&self, content: &'a str) -> Vec<(usize, &'a str)> {
        self.reference_regex
            .captures_iter(content)
            .filter_map(|caps| {
                let lead = caps.get(1)?;
                let name = caps.get(2)?;
                Some((lead.end(), name.as_str()))
            })
            .collect()
    }

    pub fn apply_fixes(&self, content: &str) -> String {
        self.reference_regex
            .replace_all(content, self.replacement.as_str())
            .into_owned()
    }
}

impl Rule for StyleReferencesConverter {
    fn name(&self) -> &str {
        "style-references"
    }

    fn description(&self) -> &str {
        "Rewrite styles.X references to themedStyles.X"
    }

    fn check(&self, file_path: &Path, verbose: bool) -> Result<Vec<CheckResult>> {
        let content = read_file(file_path)?;
        let references = self.find_references(&content);

        if verbose {
            if references.is_empty() {
                println!("  No {} references found", self.config.base_object);
            } else {
                println!(
                    "  Found {} reference(s) to {}",
                    references.len(),
                    self.config.base_object
                );
            }
        }

        Ok(references
            .into_iter()
            .map(|(offset, name)| {
                CheckResult::issue(
                    self,
                    file_path,
                    format!(
                        "{base}.{name} should read from {themed}",
                        base = self.config.base_object,
                        themed = self.config.themed_object
                    ),
                    offset_to_location(&content, offset),
                )
            })
            .collect())
    }

    fn convert(
        &self,
        file_path: &Path,
        in_place: bool,
        check_mode: bool,
        _verbose: bool,
    ) -> Result<ConvertResult> {
        let content = read_file(file_path)?;
        let count = self.find_references(&content).len();

        if count == 0 {
            return Ok(ConvertResult::new(self, file_path, 0, None));
        }

        if check_mode {
            return Ok(ConvertResult::new(
                self,
                file_path,
                count,
                Some(format!("Would rewrite {} style reference(s)", count)),
            ));
        }

        let new_content = self.apply_fixes(&content);
        if in_place {
            write_file(file_path, &new_content)?;
            Ok(ConvertResult::new(
                self,
                file_path,
                count,
                Some(format!("Rewrote {} style reference(s)", count)),
            ))
        } else {
            Ok(ConvertResult::new(self, file_path, count, Some(new_content)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converter() -> StyleReferencesConverter {
        StyleReferencesConverter::new(ReferenceConfig::default()).unwrap()
    }

    #[test]
    fn test_rewrites_plain_references() {
        let content = "<View style={styles.header}>\n  <Text style={ styles.title }>Hi</Text>\n</View>";
        assert_eq!(
            converter().apply_fixes(content),
            "<View style={themedStyles.header}>\n  <Text style={ themedStyles.title }>Hi</Text>\n</View>"
        );
    }

    #[test]
    fn test_rewrites_arrays_and_conditionals() {
        let content = "<View style={[styles.a, styles.b]} />\n<View style={active && styles.on} />\nconst s = styles.c;";
        let converter = converter();
        let names: Vec<&str> = converter
            .find_references(content)
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        assert_eq!(names, vec!["a", "b", "on", "c"]);
        assert_eq!(
            converter.apply_fixes(content),
            "<View style={[themedStyles.a, themedStyles.b]} />\n<View style={active && themedStyles.on} />\nconst s = themedStyles.c;"
        );
    }

    #[test]
    fn test_leaves_other_objects_alone() {
        let content = "<View style={themedStyles.header} />\n<View style={otherStyles.x} />\n<View style={props.styles.y} />\n  ...styles.card,\nconst $styles = {};";
        let converter = converter();
        assert!(converter.find_references(content).is_empty());
        assert_eq!(converter.apply_fixes(content), content);
    }

    #[test]
    fn test_finds_offsets() {
        let content = "a\n<View style={styles.row} />\nstyles.top";
        let refs = converter().find_references(content);
        assert_eq!(refs, vec![(15, "row"), (30, "top")]);
    }
}
