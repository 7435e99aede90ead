//! The Java edition command tree (`commands.json`).

use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::{validate_min_len, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierAmount {
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierType {
    Entities,
    Greedy,
    Phrase,
    Players,
    Word,
}

/// Constraints attached to a parser: numeric bounds, selection mode or the
/// registry providing valid values (`minecraft:entity_type`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserModifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<ModifierAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ModifierType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
}

/// A parser available to argument nodes, with example inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandRootParserInfo {
    /// `brigadier:integer`, `minecraft:vec3`, ...
    pub parser: String,
    pub modifier: Option<ParserModifier>,
    pub examples: Vec<String>,
}

/// The parser bound to one argument node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandInnerParserInfo {
    pub parser: String,
    pub modifier: Option<ParserModifier>,
}

/// A fixed keyword (`time`, `teleport`, `from`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandLiteralNode {
    pub name: String,
    pub executable: bool,
    pub redirects: Vec<String>,
    pub children: Vec<CommandNode>,
}

/// A typed parameter (`player`, `fadeIn`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandArgumentNode {
    pub name: String,
    pub executable: bool,
    pub redirects: Vec<String>,
    pub children: Vec<CommandNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<CommandInnerParserInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CommandNode {
    Literal(CommandLiteralNode),
    Argument(CommandArgumentNode),
}

impl CommandNode {
    pub fn name(&self) -> &str {
        match self {
            CommandNode::Literal(node) => &node.name,
            CommandNode::Argument(node) => &node.name,
        }
    }

    pub fn children(&self) -> &[CommandNode] {
        match self {
            CommandNode::Literal(node) => &node.children,
            CommandNode::Argument(node) => &node.children,
        }
    }

    pub fn is_executable(&self) -> bool {
        match self {
            CommandNode::Literal(node) => node.executable,
            CommandNode::Argument(node) => node.executable,
        }
    }

    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children().iter().find(|c| c.name() == name)
    }

    /// Nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(CommandNode::node_count).sum::<usize>()
    }
}

/// Invisible parent of every top-level command literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandRootNode {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub executable: bool,
    pub redirects: Vec<String>,
    pub children: Vec<CommandNode>,
}

impl Validate for CommandRootNode {
    fn validate(&self) -> Result<()> {
        if self.kind != "root" {
            return Err(MinebaseError::validation("type", "root node must have type 'root'"));
        }
        if self.name != "root" {
            return Err(MinebaseError::validation("name", "root node must be named 'root'"));
        }
        if self.executable {
            return Err(MinebaseError::validation(
                "executable",
                "root node can't be executable",
            ));
        }
        if !self.redirects.is_empty() {
            return Err(MinebaseError::validation(
                "redirects",
                "root node can't redirect",
            ));
        }
        validate_min_len("children", &self.children, 1)?;
        for (idx, child) in self.children.iter().enumerate() {
            if !matches!(child, CommandNode::Literal(_)) {
                return Err(MinebaseError::validation(
                    format!("children[{idx}]"),
                    format!("top-level command {:?} must be a literal", child.name()),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandsData {
    pub root: CommandRootNode,
    pub parsers: Vec<CommandRootParserInfo>,
}

impl CommandsData {
    pub fn command(&self, name: &str) -> Option<&CommandNode> {
        self.root.children.iter().find(|c| c.name() == name)
    }

    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.root.children.iter().map(CommandNode::name)
    }

    pub fn parser(&self, parser: &str) -> Option<&CommandRootParserInfo> {
        self.parsers.iter().find(|p| p.parser == parser)
    }
}

impl Validate for CommandsData {
    fn validate(&self) -> Result<()> {
        self.root.validate().map_err(|e| e.nested("root"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn commands() -> serde_json::Value {
        json!({
            "root": {
                "type": "root",
                "name": "root",
                "executable": false,
                "redirects": [],
                "children": [
                    {
                        "type": "literal",
                        "name": "kill",
                        "executable": true,
                        "redirects": [],
                        "children": [{
                            "type": "argument",
                            "name": "targets",
                            "executable": true,
                            "redirects": [],
                            "children": [],
                            "parser": {
                                "parser": "minecraft:entity",
                                "modifier": {"type": "entities", "amount": "multiple"}
                            }
                        }]
                    },
                    {
                        "type": "literal",
                        "name": "tm",
                        "executable": false,
                        "redirects": ["teammsg"],
                        "children": []
                    }
                ]
            },
            "parsers": [{
                "parser": "brigadier:integer",
                "modifier": {"min": 0},
                "examples": ["0", "123", "-123"]
            }]
        })
    }

    #[test]
    fn test_command_tree() {
        let data: CommandsData = serde_json::from_value(commands()).unwrap();
        assert!(data.validate().is_ok());
        assert_eq!(data.command_names().collect::<Vec<_>>(), vec!["kill", "tm"]);

        let kill = data.command("kill").unwrap();
        assert_eq!(kill.node_count(), 2);
        match kill.child("targets").unwrap() {
            CommandNode::Argument(arg) => {
                let modifier = arg.parser.as_ref().unwrap().modifier.as_ref().unwrap();
                assert_eq!(modifier.kind, Some(ModifierType::Entities));
                assert_eq!(modifier.amount, Some(ModifierAmount::Multiple));
            }
            other => panic!("unexpected node: {other:?}"),
        }
        assert_eq!(
            data.parser("brigadier:integer").unwrap().examples.len(),
            3
        );
    }

    #[test]
    fn test_root_must_hold_literals() {
        let mut value = commands();
        value["root"]["children"][1] = value["root"]["children"][0]["children"][0].clone();
        let data: CommandsData = serde_json::from_value(value).unwrap();
        match data.validate().unwrap_err() {
            MinebaseError::ValidationError { path, .. } => assert_eq!(path, "root.children[1]"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_root_rules() {
        let mut value = commands();
        value["root"]["executable"] = json!(true);
        let data: CommandsData = serde_json::from_value(value).unwrap();
        assert!(data.validate().is_err());

        let mut value = commands();
        value["root"]["children"] = json!([]);
        let data: CommandsData = serde_json::from_value(value).unwrap();
        assert!(data.validate().is_err());
    }
}
