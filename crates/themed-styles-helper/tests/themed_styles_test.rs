use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use themed_styles_helper::config::HelperConfig;
use themed_styles_helper::error::{AnchorKind, StyleSplitError};
use themed_styles_helper::rule::RuleRegistry;

const FIXTURE: &str = "tests/fixtures/AdminScreen.tsx";
const EXPECTED: &str = "tests/fixtures/AdminScreen.expected.tsx";

fn write_screen(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("AdminScreen.tsx");
    fs::write(&path, content).unwrap();
    path
}

fn fixture() -> String {
    fs::read_to_string(Path::new(FIXTURE)).unwrap()
}

fn expected() -> String {
    fs::read_to_string(Path::new(EXPECTED)).unwrap()
}

#[test]
fn test_converts_fixture_in_place() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(&dir, &fixture());

    let registry = RuleRegistry::new().unwrap();
    let rule = registry.get("themed-styles").unwrap();

    let result = rule.convert(&screen, true, false, false).unwrap();
    assert_eq!(result.fixes_applied, 5, "button, card, container, row, title");

    let converted = fs::read_to_string(&screen).unwrap();
    assert_eq!(converted, expected());
    assert!(!converted.contains("StyleSheet.create"));
    assert!(!converted.contains("...styles."));
    assert!(
        !converted.contains("  badge: {"),
        "spread-only themed style with color-only base should vanish"
    );
}

#[test]
fn test_stdout_mode_returns_content_without_writing() {
    let dir = TempDir::new().unwrap();
    let original = fixture();
    let screen = write_screen(&dir, &original);

    let registry = RuleRegistry::new().unwrap();
    let rule = registry.get("themed-styles").unwrap();

    let result = rule.convert(&screen, false, false, false).unwrap();
    assert_eq!(result.message.unwrap(), expected());
    assert_eq!(fs::read_to_string(&screen).unwrap(), original);
}

#[test]
fn test_check_mode_does_not_write() {
    let dir = TempDir::new().unwrap();
    let original = fixture();
    let screen = write_screen(&dir, &original);

    let registry = RuleRegistry::new().unwrap();
    let rule = registry.get("themed-styles").unwrap();

    let result = rule.convert(&screen, true, true, false).unwrap();
    assert_eq!(result.fixes_applied, 5);
    assert!(result.message.unwrap().starts_with("Would merge 5 style(s)"));
    assert_eq!(fs::read_to_string(&screen).unwrap(), original);
}

#[test]
fn test_check_reports_base_table_and_spreads() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(&dir, &fixture());

    let registry = RuleRegistry::new().unwrap();
    let rule = registry.get("themed-styles").unwrap();

    let results = rule.check(&screen, false).unwrap();
    assert_eq!(results.len(), 5, "one base table plus four spreads");
    assert!(results.iter().all(|r| r.has_issue));

    let base = results[0].location.as_ref().unwrap();
    assert_eq!(base.row, 41);

    let spread_rows: Vec<usize> = results[1..]
        .iter()
        .map(|r| r.location.as_ref().unwrap().row)
        .collect();
    // themed blocks are visited in name order: badge, card, container, title
    assert_eq!(spread_rows, vec![20, 23, 12, 16]);
}

#[test]
fn test_rerun_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(&dir, &fixture());

    let registry = RuleRegistry::new().unwrap();
    let rule = registry.get("themed-styles").unwrap();

    rule.convert(&screen, true, false, false).unwrap();
    let first = fs::read_to_string(&screen).unwrap();

    let result = rule.convert(&screen, true, false, false).unwrap();
    assert_eq!(result.fixes_applied, 0);
    assert_eq!(fs::read_to_string(&screen).unwrap(), first);

    assert!(rule.check(&screen, false).unwrap().is_empty());
}

#[test]
fn test_missing_component_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let original = fixture().replace("export default function AdminScreen", "export function Other");
    let screen = write_screen(&dir, &original);

    let registry = RuleRegistry::new().unwrap();
    let rule = registry.get("themed-styles").unwrap();

    let err = rule.convert(&screen, true, false, false).unwrap_err();
    let err = err.downcast::<StyleSplitError>().unwrap();
    assert!(matches!(
        err,
        StyleSplitError::MissingAnchor {
            anchor: AnchorKind::ComponentStart,
            ..
        }
    ));
    assert_eq!(fs::read(&screen).unwrap(), original.as_bytes());
}

#[test]
fn test_unrecognized_line_aborts_before_writing() {
    let dir = TempDir::new().unwrap();
    let original = fixture().replace("  badge: {\n    borderColor", "  oops\n  badge: {\n    borderColor");
    let screen = write_screen(&dir, &original);

    let registry = RuleRegistry::new().unwrap();
    let rule = registry.get("themed-styles").unwrap();

    let err = rule.convert(&screen, true, false, false).unwrap_err();
    let err = err.downcast::<StyleSplitError>().unwrap();
    assert!(matches!(err, StyleSplitError::UnclassifiedLine { ref text, .. } if text == "oops"));
    assert_eq!(fs::read_to_string(&screen).unwrap(), original);
}

#[test]
fn test_container_scenario() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(
        &dir,
        r#"export default function AdminScreen() {
  const themedStyles = useMemo(() => ({
    container: {
      ...styles.container,
      color: colors.text,
    },
  }), [colors]);
  return null;
}

const styles = StyleSheet.create({
  container: {
    flex: 1,
    backgroundColor: 'red',
  },
});
"#,
    );

    let registry = RuleRegistry::new().unwrap();
    let rule = registry.get("themed-styles").unwrap();
    let converted = rule.convert(&screen, false, false, false).unwrap().message.unwrap();

    assert_eq!(
        converted,
        r#"
const createThemedStyles = (colors: any) => ({
  container: {
    flex: 1,
      color: colors.text,
  },
});

export default function AdminScreen() {
  const themedStyles = useMemo(() => createThemedStyles(colors), [colors]);

  return null;
}
"#
    );
}

#[test]
fn test_multi_line_values_survive_the_merge() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(
        &dir,
        r#"export default function AdminScreen() {
  const themedStyles = useMemo(() => ({
    card: {
      ...styles.card,
      borderColor: colors.border,
    },
  }), [colors]);
  return null;
}

const styles = StyleSheet.create({
  card: {
    backgroundColor:
      Platform.OS === 'ios' ? '#fff' : '#000',
    transform: [
      { rotate: '45deg' },
    ],
  },
});
"#,
    );

    let registry = RuleRegistry::new().unwrap();
    let rule = registry.get("themed-styles").unwrap();
    let converted = rule.convert(&screen, false, false, false).unwrap().message.unwrap();

    assert!(converted.starts_with(
        r#"
const createThemedStyles = (colors: any) => ({
  card: {
    transform: [
      { rotate: '45deg' },
    ],
      borderColor: colors.border,
  },
});
"#
    ));
    assert!(!converted.contains("Platform.OS"));
    assert!(!converted.contains("[,"));
}

#[test]
fn test_content_after_base_table_is_kept() {
    let dir = TempDir::new().unwrap();
    let screen = write_screen(
        &dir,
        &format!("{}\nexport const ADMIN_ROUTE = 'admin';\n", fixture()),
    );

    let registry = RuleRegistry::new().unwrap();
    let rule = registry.get("themed-styles").unwrap();
    rule.convert(&screen, true, false, false).unwrap();

    let converted = fs::read_to_string(&screen).unwrap();
    assert!(converted.ends_with("}\n\n\nexport const ADMIN_ROUTE = 'admin';\n"));
    assert!(!converted.contains("StyleSheet.create"));
}

#[test]
fn test_custom_config() {
    let dir = TempDir::new().unwrap();
    let original = fixture().replace("AdminScreen", "SettingsScreen");
    let screen = write_screen(&dir, &original);

    let config = HelperConfig::from_toml(
        r#"
[anchors]
component = "export default function SettingsScreen"

[factory]
name = "createSettingsStyles"
replacement = "  const themedStyles = useMemo(() => createSettingsStyles(colors), [colors]);"
"#,
    )
    .unwrap();
    let registry = RuleRegistry::with_config(&config).unwrap();
    let rule = registry.get("themed-styles").unwrap();

    rule.convert(&screen, true, false, false).unwrap();
    let converted = fs::read_to_string(&screen).unwrap();
    assert!(converted.contains("const createSettingsStyles = (colors: any) => ({"));
    assert!(converted.contains("useMemo(() => createSettingsStyles(colors), [colors]);"));
    assert!(!converted.contains("createThemedStyles"));
}
