use crate::anchors::Anchors;

/// Reassemble the document around the generated factory.
///
/// The result is, in order: everything before the component, the factory
/// framed by blank lines, the component up to the memoized themed styles,
/// `replacement` in place of that whole block, the rest of the component,
/// and whatever followed the base table. The base table itself is removed.
/// Trailing blank lines collapse into the final newline.
pub fn splice(lines: &[&str], anchors: &Anchors, factory: &str, replacement: &str) -> String {
    let trailing = lines.get(anchors.base_end + 1..).unwrap_or(&[]);

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    out.extend_from_slice(&lines[..anchors.component_start]);
    out.extend(["", factory, ""]);
    out.extend_from_slice(&lines[anchors.component_start..anchors.themed_start]);
    out.extend([replacement, ""]);
    out.extend_from_slice(&lines[anchors.themed_end + 1..anchors.base_start]);
    out.extend_from_slice(trailing);

    while out.last().is_some_and(|line| line.trim().is_empty()) {
        out.pop();
    }

    let mut text = out.join("\n");
    if lines.last().is_some_and(|line| line.is_empty()) {
        text.push('\n');
    }
    text
}
