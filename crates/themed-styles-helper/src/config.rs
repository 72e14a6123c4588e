//! Configuration for the style helper.
//!
//! Every value defaults to the layout of `src/screens/AdminScreen.tsx`, so
//! running without a config file reproduces the original one-off rewrite.
//! A TOML file can override any subset of keys:
//!
//! ```toml
//! [anchors]
//! component = "export default function SettingsScreen"
//!
//! [factory]
//! name = "createSettingsStyles"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StyleSplitError;

/// File rewritten when no paths are given on the command line.
pub const DEFAULT_TARGET: &str = "src/screens/AdminScreen.tsx";

/// Base style properties that move to the themed factory.
pub const DEFAULT_COLOR_PREFIXES: [&str; 8] = [
    "backgroundColor:",
    "color:",
    "borderColor:",
    "shadowColor:",
    "borderBottomColor:",
    "borderTopColor:",
    "borderLeftColor:",
    "borderRightColor:",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct HelperConfig {
    pub anchors: AnchorPatterns,
    pub filter: FilterConfig,
    pub factory: FactoryConfig,
    pub references: ReferenceConfig,
}

/// Literal text used to locate each anchor line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AnchorPatterns {
    /// Substring of the component declaration line
    pub component: String,
    /// Substring of the line opening the memoized themed styles
    pub themed_start: String,
    /// Exact trimmed text of the line closing the memoized themed styles
    pub themed_end: String,
    /// Substring of the line opening the base style table
    pub base_start: String,
}

impl Default for AnchorPatterns {
    fn default() -> Self {
        Self {
            component: "export default function AdminScreen".to_string(),
            themed_start: "const themedStyles = useMemo".to_string(),
            themed_end: "}), [colors]);".to_string(),
            base_start: "const styles = StyleSheet.create({".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilterConfig {
    /// Base properties starting with any of these are dropped
    pub color_prefixes: Vec<String>,
    /// Themed properties containing this are dropped
    pub spread_marker: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            color_prefixes: DEFAULT_COLOR_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            spread_marker: "...styles.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FactoryConfig {
    pub name: String,
    pub parameter: String,
    /// Line that replaces the whole memoized themed block
    pub replacement: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            name: "createThemedStyles".to_string(),
            parameter: "colors: any".to_string(),
            replacement:
                "  const themedStyles = useMemo(() => createThemedStyles(colors), [colors]);"
                    .to_string(),
        }
    }
}

impl FactoryConfig {
    /// Opening text of the generated factory declaration
    pub fn declaration(&self) -> String {
        format!("const {} = ({}) => ({{", self.name, self.parameter)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ReferenceConfig {
    /// Object the JSX currently reads styles from
    pub base_object: String,
    /// Object the JSX should read styles from after the merge
    pub themed_object: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            base_object: "styles".to_string(),
            themed_object: "themedStyles".to_string(),
        }
    }
}

impl HelperConfig {
    pub fn from_toml(text: &str) -> Result<Self, StyleSplitError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = crate::utils::file_io::read_file(path)?;
        Self::from_toml(&text)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}
