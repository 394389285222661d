//! Syntax tree of a parsed configuration dump, plus the read-only view API.

use std::collections::BTreeMap;

/// A literal value carried by a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

/// One node of the parsed tree. Closed set: a dump contains nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    Group(GroupNode),
    Variable { name: String, value: Value },
}

/// A named group owning an ordered body of child nodes.
///
/// Group names are unique among siblings in well-formed dumps; on a
/// duplicate the later group wins in `ConfigGroup::groups`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    pub name: String,
    pub body: Vec<SyntaxNode>,
}

/// Root of a parsed dump. The document body behaves as an unnamed group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub(crate) root: GroupNode,
}

impl SyntaxTree {
    pub fn root(&self) -> ConfigGroup<'_> {
        ConfigGroup { node: &self.root }
    }
}

/// Borrowed, read-only view over one group of the tree.
///
/// All lookups touch the group's immediate body only, never descendants.
#[derive(Debug, Clone, Copy)]
pub struct ConfigGroup<'a> {
    node: &'a GroupNode,
}

impl<'a> ConfigGroup<'a> {
    pub fn name(&self) -> &'a str {
        &self.node.name
    }

    /// Value of an immediate child variable, or None if absent.
    pub fn variable_value(&self, name: &str) -> Option<Value> {
        self.node.body.iter().find_map(|n| match n {
            SyntaxNode::Variable { name: vn, value } if vn == name => Some(value.clone()),
            _ => None,
        })
    }

    /// Immediate child groups, keyed by name.
    pub fn groups(&self) -> BTreeMap<&'a str, ConfigGroup<'a>> {
        self.node
            .body
            .iter()
            .filter_map(|n| match n {
                SyntaxNode::Group(g) => Some((g.name.as_str(), ConfigGroup { node: g })),
                _ => None,
            })
            .collect()
    }

    /// Single immediate child group by name.
    pub fn group(&self, name: &str) -> Option<ConfigGroup<'a>> {
        self.node.body.iter().find_map(|n| match n {
            SyntaxNode::Group(g) if g.name == name => Some(ConfigGroup { node: g }),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SyntaxTree {
        SyntaxTree {
            root: GroupNode {
                name: String::new(),
                body: vec![
                    SyntaxNode::Variable {
                        name: "version".into(),
                        value: Value::Integer(1),
                    },
                    SyntaxNode::Group(GroupNode {
                        name: "vg0".into(),
                        body: vec![SyntaxNode::Variable {
                            name: "id".into(),
                            value: Value::Text("abc".into()),
                        }],
                    }),
                ],
            },
        }
    }

    #[test]
    fn variable_lookup_is_immediate_only() {
        let tree = sample();
        let root = tree.root();
        assert_eq!(root.variable_value("version"), Some(Value::Integer(1)));
        // "id" lives one level down; the root must not see it.
        assert_eq!(root.variable_value("id"), None);
        let vg = root.group("vg0").expect("vg0 present");
        assert_eq!(vg.variable_value("id"), Some(Value::Text("abc".into())));
    }

    #[test]
    fn groups_are_keyed_by_name() {
        let tree = sample();
        let groups = tree.root().groups();
        assert_eq!(groups.len(), 1);
        assert!(groups.contains_key("vg0"));
        assert!(tree.root().group("nope").is_none());
    }
}
