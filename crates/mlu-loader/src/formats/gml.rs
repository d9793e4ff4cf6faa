//! GML topologies, as written by networkx `write_gml`
//!
//! ```text
//! graph [
//!   node [ id 0 label "0" ]
//!   node [ id 1 label "1" ]
//!   edge [ source 0 target 1 weight 3 ]
//! ]
//! ```
//!
//! Nodes are named by their `label` when present, otherwise by `id`. Edges
//! refer to node ids. A missing `weight` counts as zero load. An optional
//! graph-level `capacity` sets the shared link capacity.

use super::TopologyFormat;
use crate::error::{LoadError, Result};
use mlu_core::{DEFAULT_LINK_CAPACITY, NodeId, Topology};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"#[^\n]*|"[^"]*"|\[|\]|"|[^\s\[\]"]+"#).expect("GML token pattern")
});

pub struct GmlFormat;

impl TopologyFormat for GmlFormat {
    fn name(&self) -> &'static str {
        "GML"
    }

    fn parse(&self, content: &str, capacity: Option<f64>) -> Result<Topology> {
        let document = Parser::new(content).parse_document()?;
        build_topology(&document, capacity)
    }
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    line: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    /// Number or bare word.
    Scalar(String),
    /// Quoted string, quotes stripped.
    Text(String),
    List(Vec<Entry>),
}

impl Value {
    fn as_label(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) | Value::Text(s) => Some(s),
            Value::List(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    key: String,
    value: Value,
    line: usize,
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    last_line: usize,
}

impl<'a> Parser<'a> {
    fn new(content: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut line = 1;
        let mut scanned = 0;
        for m in TOKEN.find_iter(content) {
            line += content[scanned..m.start()].matches('\n').count();
            scanned = m.start();
            if m.as_str().starts_with('#') {
                continue;
            }
            tokens.push(Token {
                text: m.as_str(),
                line,
            });
        }
        let last_line = content.lines().count().max(1);
        Parser {
            tokens,
            pos: 0,
            last_line,
        }
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    fn parse_document(&mut self) -> Result<Vec<Entry>> {
        self.parse_list(false)
    }

    fn parse_list(&mut self, nested: bool) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        loop {
            let Some(token) = self.next() else {
                if nested {
                    return Err(syntax(self.last_line, "unclosed '['"));
                }
                return Ok(entries);
            };
            match token.text {
                "]" if nested => return Ok(entries),
                "]" => return Err(syntax(token.line, "unexpected ']'")),
                text if text == "[" || text.starts_with('"') => {
                    return Err(syntax(token.line, format!("expected a key, found {}", text)));
                }
                key => {
                    let value = self.parse_value(key)?;
                    entries.push(Entry {
                        key: key.to_string(),
                        value,
                        line: token.line,
                    });
                }
            }
        }
    }

    fn parse_value(&mut self, key: &str) -> Result<Value> {
        let Some(token) = self.next() else {
            return Err(syntax(self.last_line, format!("missing value for '{}'", key)));
        };
        match token.text {
            "[" => Ok(Value::List(self.parse_list(true)?)),
            "]" => Err(syntax(token.line, format!("missing value for '{}'", key))),
            "\"" => Err(syntax(token.line, "unterminated string")),
            text if text.starts_with('"') => Ok(Value::Text(text[1..text.len() - 1].to_string())),
            text => Ok(Value::Scalar(text.to_string())),
        }
    }
}

fn syntax(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Gml {
        line,
        message: message.into(),
    }
}

fn find<'e>(entries: &'e [Entry], key: &str) -> Option<&'e Entry> {
    entries.iter().find(|entry| entry.key == key)
}

fn label_of(entries: &[Entry], key: &str, line: usize) -> Result<String> {
    let entry = find(entries, key).ok_or_else(|| syntax(line, format!("missing '{}'", key)))?;
    entry
        .value
        .as_label()
        .map(str::to_string)
        .ok_or_else(|| syntax(entry.line, format!("'{}' must be a scalar", key)))
}

fn number_of(entry: &Entry) -> Result<f64> {
    entry
        .value
        .as_label()
        .and_then(|text| text.parse::<f64>().ok())
        .ok_or_else(|| syntax(entry.line, format!("'{}' must be a number", entry.key)))
}

fn build_topology(document: &[Entry], capacity: Option<f64>) -> Result<Topology> {
    let graph = find(document, "graph").ok_or_else(|| syntax(1, "missing 'graph' block"))?;
    let Value::List(items) = &graph.value else {
        return Err(syntax(graph.line, "'graph' must be a list"));
    };

    let mut declared_capacity = None;
    let mut labels: HashMap<String, NodeId> = HashMap::new();
    let mut nodes: Vec<NodeId> = Vec::new();
    let mut edges: Vec<&Entry> = Vec::new();

    for item in items {
        match (item.key.as_str(), &item.value) {
            ("node", Value::List(fields)) => {
                let id = label_of(fields, "id", item.line)?;
                let label = match find(fields, "label") {
                    Some(_) => label_of(fields, "label", item.line)?,
                    None => id.clone(),
                };
                let node = NodeId::new(label);
                if labels.insert(id.clone(), node.clone()).is_some() {
                    return Err(syntax(item.line, format!("duplicate node id {}", id)));
                }
                nodes.push(node);
            }
            ("edge", Value::List(_)) => edges.push(item),
            ("capacity", _) => declared_capacity = Some(number_of(item)?),
            ("directed", value) if value.as_label() == Some("1") => {
                tracing::warn!("GML graph is directed; links are treated as undirected");
            }
            ("node" | "edge", _) => {
                return Err(syntax(item.line, format!("'{}' must be a list", item.key)));
            }
            _ => {}
        }
    }

    let mut topology =
        Topology::with_link_capacity(capacity.or(declared_capacity).unwrap_or(DEFAULT_LINK_CAPACITY));
    for node in nodes {
        topology.add_node(node);
    }

    for edge in edges {
        let Value::List(fields) = &edge.value else {
            continue;
        };
        let endpoint = |key: &str| -> Result<NodeId> {
            let id = label_of(fields, key, edge.line)?;
            labels
                .get(&id)
                .cloned()
                .ok_or_else(|| syntax(edge.line, format!("edge {} refers to unknown node {}", key, id)))
        };
        let source = endpoint("source")?;
        let target = endpoint("target")?;
        let load = match find(fields, "weight") {
            Some(weight) => number_of(weight)?,
            None => 0.0,
        };
        topology.add_link(source, target, load)?;
    }

    Ok(topology)
}
