//! Indented text view of a configuration tree.

use std::fmt::Write;

use tardis_config_tree::{ConfigTreeModel, NodeId, Value};

const INDENT: &str = "  ";

/// One line per key. Value keys show their value inline, choices list the
/// alternatives, required keys carry `*` and inactive subtrees `[disabled]`.
pub fn render_tree(model: &ConfigTreeModel) -> String {
    let mut out = String::new();
    let header = model.header(0).map(display_value).unwrap_or_default();
    out.push_str(&header);
    out.push('\n');
    render_children(model, model.root(), 1, &mut out);
    out
}

fn render_children(model: &ConfigTreeModel, parent: NodeId, depth: usize, out: &mut String) {
    for row in 0..model.row_count(parent) {
        let Some(child) = model.child_at(parent, row) else {
            continue;
        };
        let Some(node) = model.node(child) else {
            continue;
        };

        let mut line = format!("{}{}", INDENT.repeat(depth), node.name().unwrap_or("?"));
        if node.is_required() {
            line.push('*');
        }

        let leaf = model.value_leaf(child).and_then(|id| model.node(id));
        if let Some(leaf) = leaf {
            let _ = write!(line, ": {}", leaf.field(0).map(display_value).unwrap_or_default());
            if leaf.num_fields() > 1 {
                let others: Vec<String> = leaf.fields()[1..].iter().map(display_value).collect();
                let _ = write!(line, " ({})", others.join(" | "));
            }
        }
        if model.disabled().contains(&child) {
            line.push_str("  [disabled]");
        }

        out.push_str(&line);
        out.push('\n');

        if leaf.is_none() {
            render_children(model, child, depth + 1, out);
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "~".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(display_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(mapping) => {
            let entries: Vec<String> = mapping
                .iter()
                .map(|(k, v)| format!("{}: {}", display_value(k), display_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, display_value(&tagged.value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tardis_config_tree::{TemplateEntry, TemplateMap};

    #[test]
    fn test_render_marks_disabled_and_required() {
        let mut density = TemplateMap::new();
        density.insert("type", TemplateEntry::choice(true, &["uniform|value", "exponential|time_0"]));
        density.insert("value", TemplateEntry::scalar(true, "1e-13 g/cm^3"));
        density.insert("time_0", TemplateEntry::scalar(false, Value::Null));
        let mut template = TemplateMap::new();
        template.insert("density", TemplateEntry::Mapping(density));

        let model = ConfigTreeModel::from_template(&template);
        let text = render_tree(&model);

        assert_eq!(
            text,
            "Configuration\n\
             \x20 density\n\
             \x20   type*: uniform (exponential)\n\
             \x20   value*: 1e-13 g/cm^3\n\
             \x20   time_0: ~  [disabled]\n"
        );
    }
}
