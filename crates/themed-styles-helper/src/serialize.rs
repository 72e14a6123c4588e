use crate::config::FactoryConfig;
use crate::scanner::BlockMap;

/// Render the merged blocks as a single factory assignment:
///
/// ```text
/// const createThemedStyles = (colors: any) => ({
///   container: {
///     flex: 1,
///   },
/// });
/// ```
///
/// Property lines are emitted verbatim, blocks in name order.
pub fn render_factory(blocks: &BlockMap, factory: &FactoryConfig) -> String {
    let mut out = vec![factory.declaration()];

    for (name, block) in blocks {
        out.push(format!("  {name}: {{"));
        for property in &block.properties {
            out.extend(property.rendered_lines().map(|line| line.into_owned()));
        }
        out.push("  },".to_string());
    }

    out.push("});".to_string());
    out.join("\n")
}
