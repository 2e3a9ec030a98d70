//! The store tree: path segments map to branches, leaves hold JSON values.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One node in the store tree.
///
/// Branches hold named children; leaves hold a JSON document. Writing
/// through a leaf replaces it with a branch, and removals prune branches
/// that end up empty, so a path exists exactly when data is stored at or
/// below it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Interior node with named children, ordered by key
    Branch(BTreeMap<String, Node>),
    /// Terminal node holding a value
    Leaf(Value),
}

impl Default for Node {
    fn default() -> Self {
        Node::Branch(BTreeMap::new())
    }
}

impl Node {
    /// Look up the node at `segments`, if present
    pub fn get(&self, segments: &[String]) -> Option<&Node> {
        let Some((head, rest)) = segments.split_first() else {
            return Some(self);
        };
        match self {
            Node::Branch(children) => children.get(head)?.get(rest),
            Node::Leaf(_) => None,
        }
    }

    /// Write `value` at `segments`, creating intermediate branches.
    ///
    /// A leaf found along the way is overwritten by a branch.
    pub fn set(&mut self, segments: &[String], value: Value) {
        let Some((head, rest)) = segments.split_first() else {
            *self = Node::Leaf(value);
            return;
        };
        if matches!(self, Node::Leaf(_)) {
            *self = Node::Branch(BTreeMap::new());
        }
        if let Node::Branch(children) = self {
            children
                .entry(head.clone())
                .or_insert_with(|| Node::Branch(BTreeMap::new()))
                .set(rest, value);
        }
    }

    /// Remove and return the node at `segments`, pruning branches left
    /// empty by the removal. Removing the root clears the tree.
    pub fn remove(&mut self, segments: &[String]) -> Option<Node> {
        let Some((head, rest)) = segments.split_first() else {
            return Some(std::mem::take(self));
        };
        let Node::Branch(children) = self else {
            return None;
        };
        if rest.is_empty() {
            children.remove(head)
        } else {
            let child = children.get_mut(head)?;
            let removed = child.remove(rest);
            if child.is_empty() {
                children.remove(head);
            }
            removed
        }
    }

    /// Whether any data is stored at or below `segments`
    pub fn exists(&self, segments: &[String]) -> bool {
        match self.get(segments) {
            Some(node) => !node.is_empty(),
            None => false,
        }
    }

    /// Whether this node carries no data
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Branch(children) => children.is_empty(),
            Node::Leaf(value) => value.is_null(),
        }
    }

    /// Materialize the subtree as a JSON value
    pub fn value(&self) -> Value {
        match self {
            Node::Leaf(value) => value.clone(),
            Node::Branch(children) => {
                let mut object = Map::new();
                for (key, child) in children {
                    object.insert(key.clone(), child.value());
                }
                Value::Object(object)
            }
        }
    }

    /// The direct children of this node, materialized, in key order
    pub fn children(&self) -> Vec<(String, Value)> {
        match self {
            Node::Branch(children) => children
                .iter()
                .map(|(key, child)| (key.clone(), child.value()))
                .collect(),
            Node::Leaf(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segments(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut root = Node::default();
        root.set(&segments(&["users", "a"]), json!({"name": "Alice"}));

        let node = root.get(&segments(&["users", "a"])).unwrap();
        assert_eq!(node.value(), json!({"name": "Alice"}));
    }

    #[test]
    fn set_creates_intermediate_branches() {
        let mut root = Node::default();
        root.set(&segments(&["a", "b", "c"]), json!(1));

        assert!(root.exists(&segments(&["a"])));
        assert!(root.exists(&segments(&["a", "b"])));
        assert!(root.exists(&segments(&["a", "b", "c"])));
    }

    #[test]
    fn set_overwrites_leaf_with_branch() {
        let mut root = Node::default();
        root.set(&segments(&["a"]), json!("scalar"));
        root.set(&segments(&["a", "b"]), json!(2));

        assert_eq!(
            root.get(&segments(&["a"])).unwrap().value(),
            json!({"b": 2})
        );
    }

    #[test]
    fn remove_prunes_empty_branches() {
        let mut root = Node::default();
        root.set(&segments(&["users", "a"]), json!(1));
        root.remove(&segments(&["users", "a"]));

        assert!(!root.exists(&segments(&["users"])));
        assert!(root.is_empty());
    }

    #[test]
    fn remove_missing_is_none() {
        let mut root = Node::default();
        assert!(root.remove(&segments(&["nope"])).is_none());
    }

    #[test]
    fn remove_keeps_siblings() {
        let mut root = Node::default();
        root.set(&segments(&["users", "a"]), json!(1));
        root.set(&segments(&["users", "b"]), json!(2));
        root.remove(&segments(&["users", "a"]));

        assert!(!root.exists(&segments(&["users", "a"])));
        assert!(root.exists(&segments(&["users", "b"])));
    }

    #[test]
    fn children_come_back_in_key_order() {
        let mut root = Node::default();
        root.set(&segments(&["users", "b"]), json!(2));
        root.set(&segments(&["users", "a"]), json!(1));

        let users = root.get(&segments(&["users"])).unwrap();
        let keys: Vec<_> = users.children().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn branch_materializes_as_object() {
        let mut root = Node::default();
        root.set(&segments(&["users", "a"]), json!({"name": "Alice"}));

        assert_eq!(
            root.value(),
            json!({"users": {"a": {"name": "Alice"}}})
        );
    }
}
