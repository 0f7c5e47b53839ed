//! Tree -> JSON conversion

use serde_json::{Value, json};

use crate::{Error, NodeId, Tree};

/// Convert the subtree at `id` to JSON.
///
/// Groups become `{"nested": [...]}`, leaves become
/// `{"leaf": {"name": ..., "parameters": [[delimiter, value], ...]}}`.
/// Every leaf is tokenized on the way, so malformed tokens surface here.
pub fn tree_to_json(tree: &Tree, id: NodeId) -> Result<Value, Error> {
    if tree.is_nested(id) {
        let children = tree
            .children(id)?
            .iter()
            .map(|&child| tree_to_json(tree, child))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(json!({ "nested": children }));
    }

    let arg = tree.arg(id)?;
    let parameters: Vec<Value> = arg
        .parameters
        .iter()
        .map(|p| json!([p.delimiter, p.value]))
        .collect();
    Ok(json!({
        "leaf": {
            "name": arg.name,
            "parameters": parameters,
        }
    }))
}
