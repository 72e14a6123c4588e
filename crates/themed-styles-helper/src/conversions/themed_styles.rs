// themed-styles: merge the base StyleSheet table into a themed style factory
//
// A screen that keeps layout in `StyleSheet.create` and colors in a memoized
// object spreading those layouts back in:
//
//   export default function AdminScreen() {
//     const themedStyles = useMemo(() => ({
//       container: { ...styles.container, backgroundColor: colors.bg },
//     }), [colors]);
//   }
//   const styles = StyleSheet.create({ container: { flex: 1 } });
//
// becomes a single module-level factory:
//
//   const createThemedStyles = (colors: any) => ({
//     container: { flex: 1, backgroundColor: colors.bg },
//   });
//   export default function AdminScreen() {
//     const themedStyles = useMemo(() => createThemedStyles(colors), [colors]);
//   }
//

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::anchors::Anchors;
use crate::config::HelperConfig;
use crate::error::StyleSplitError;
use crate::merge::{is_spread_reference, merge_blocks};
use crate::rule::{CheckResult, ConvertResult, Rule};
use crate::scanner::{BlockMap, scan_blocks};
use crate::serialize::render_factory;
use crate::splice::splice;
use crate::utils::file_io::{read_file, write_file};
use crate::utils::location::line_location;

pub struct ThemedStylesConverter {
    config: HelperConfig,
}

/// Everything learned while planning the rewrite of one document.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub anchors: Anchors,
    pub base: BlockMap,
    pub themed: BlockMap,
    pub merged: BlockMap,
    pub output: String,
}

#[derive(Debug, Clone)]
pub enum Plan {
    /// The factory already exists and neither style region is left
    AlreadyTransformed,
    Rewrite(Box<Rewrite>),
}

impl ThemedStylesConverter {
    pub fn new(config: HelperConfig) -> Result<Self> {
        Ok(Self { config })
    }

    /// True when the document has the factory and no split regions left:
    /// no base table and no memoized block closing with the themed closer.
    pub fn is_transformed(&self, content: &str) -> bool {
        let anchors = &self.config.anchors;
        content.contains(&self.config.factory.declaration())
            && !content.contains(&anchors.base_start)
            && !content.lines().any(|line| line.trim() == anchors.themed_end)
    }

    /// Work out the rewritten document without touching the file.
    pub fn plan(&self, content: &str) -> Result<Plan, StyleSplitError> {
        if self.is_transformed(content) {
            return Ok(Plan::AlreadyTransformed);
        }

        let lines: Vec<&str> = content.split('\n').collect();
        let anchors = Anchors::locate(&lines, &self.config.anchors)?;

        let base = scan_blocks(anchors.base_region(&lines), anchors.base_start + 1)?;
        let themed = scan_blocks(anchors.themed_region(&lines), anchors.themed_start + 1)?;
        tracing::debug!(
            base = base.len(),
            themed = themed.len(),
            "Scanned style regions"
        );

        let merged = merge_blocks(&base, &themed, &self.config.filter);
        let factory = render_factory(&merged, &self.config.factory);
        let output = splice(&lines, &anchors, &factory, &self.config.factory.replacement);

        Ok(Plan::Rewrite(Box::new(Rewrite {
            anchors,
            base,
            themed,
            merged,
            output,
        })))
    }

    /// Progress goes to stderr so it never mixes with a rewrite printed to stdout.
    fn print_progress(&self, rewrite: &Rewrite) {
        let anchors = &rewrite.anchors;
        eprintln!("  Component starts at line: {}", anchors.component_start + 1);
        eprintln!(
            "  Themed styles: lines {} to {}",
            anchors.themed_start + 1,
            anchors.themed_end + 1
        );
        eprintln!(
            "  Base styles: lines {} to {}",
            anchors.base_start + 1,
            anchors.base_end + 1
        );
        eprintln!(
            "  Parsed {} base styles and {} themed styles",
            rewrite.base.len().to_string().yellow(),
            rewrite.themed.len().to_string().yellow()
        );
    }
}

impl Rule for ThemedStylesConverter {
    fn name(&self) -> &str {
        "themed-styles"
    }

    fn description(&self) -> &str {
        "Merge the StyleSheet.create table into a themed style factory"
    }

    fn check(&self, file_path: &Path, verbose: bool) -> Result<Vec<CheckResult>> {
        let content = read_file(file_path)?;
        if self.is_transformed(&content) {
            if verbose {
                println!("  Already uses {}", self.config.factory.name);
            }
            return Ok(Vec::new());
        }

        let lines: Vec<&str> = content.split('\n').collect();
        let anchors = Anchors::locate(&lines, &self.config.anchors)?;
        let base = scan_blocks(anchors.base_region(&lines), anchors.base_start + 1)?;
        let themed = scan_blocks(anchors.themed_region(&lines), anchors.themed_start + 1)?;

        let mut results = vec![CheckResult::issue(
            self,
            file_path,
            format!(
                "Base style table with {} style(s) can be merged into {}",
                base.len(),
                self.config.factory.name
            ),
            line_location(anchors.base_start),
        )];

        let marker = &self.config.filter.spread_marker;
        for block in themed.values() {
            for property in block
                .properties
                .iter()
                .filter(|p| is_spread_reference(p, marker))
            {
                results.push(CheckResult::issue(
                    self,
                    file_path,
                    format!(
                        "Themed style `{}` spreads a base style: {}",
                        block.name,
                        property.head()
                    ),
                    line_location(property.line),
                ));
            }
        }

        if verbose {
            println!(
                "  Found {} themed style issue(s)",
                results.len().to_string().yellow()
            );
        }

        Ok(results)
    }

    fn convert(
        &self,
        file_path: &Path,
        in_place: bool,
        check_mode: bool,
        verbose: bool,
    ) -> Result<ConvertResult> {
        let content = read_file(file_path)?;

        let rewrite = match self.plan(&content)? {
            Plan::AlreadyTransformed => {
                tracing::info!(file = %file_path.display(), "Already transformed, nothing to do");
                return Ok(ConvertResult::new(
                    self,
                    file_path,
                    0,
                    Some(format!("Already uses {}", self.config.factory.name)),
                ));
            }
            Plan::Rewrite(rewrite) => rewrite,
        };

        if verbose {
            self.print_progress(&rewrite);
        }
        let merged = rewrite.merged.len();
        // The base table goes away even when no style survives the filters
        let fixes = merged.max(1);

        if check_mode {
            return Ok(ConvertResult::new(
                self,
                file_path,
                fixes,
                Some(format!(
                    "Would merge {} style(s) into {}",
                    merged, self.config.factory.name
                )),
            ));
        }

        if in_place {
            write_file(file_path, &rewrite.output)?;
            tracing::info!(file = %file_path.display(), styles = merged, "Rewrote themed styles");
            Ok(ConvertResult::new(
                self,
                file_path,
                fixes,
                Some(format!(
                    "Created {} with {} style(s) and deleted the base style table",
                    self.config.factory.name, merged
                )),
            ))
        } else {
            Ok(ConvertResult::new(self, file_path, fixes, Some(rewrite.output)))
        }
    }
}
