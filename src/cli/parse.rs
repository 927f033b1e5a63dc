//! Value parsers for scope flags

use typegraph_core::graph::Direction;

/// An edge type name with an optional navigation direction: `road` or `road:in`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeTypeArg {
    pub name: String,
    pub direction: Option<Direction>,
}

/// A weighted edge type: `road=km` or `road=km:both`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightArg {
    pub edge_type: EdgeTypeArg,
    pub attribute: String,
}

/// Parse direction from string
pub fn parse_direction(s: &str) -> std::result::Result<Direction, String> {
    s.parse::<Direction>()
}

/// Parse `name[:direction]`
pub fn parse_edge_type(s: &str) -> std::result::Result<EdgeTypeArg, String> {
    let (name, direction) = match s.split_once(':') {
        Some((name, direction)) => (name, Some(parse_direction(direction)?)),
        None => (s, None),
    };
    if name.is_empty() {
        return Err(format!("missing edge type name in '{}'", s));
    }
    Ok(EdgeTypeArg {
        name: name.to_string(),
        direction,
    })
}

/// Parse `type=attribute[:direction]`
pub fn parse_weight(s: &str) -> std::result::Result<WeightArg, String> {
    let Some((name, rest)) = s.split_once('=') else {
        return Err(format!("expected TYPE=ATTRIBUTE, got '{}'", s));
    };
    let (attribute, edge_spec) = match rest.split_once(':') {
        Some((attribute, direction)) => (attribute, format!("{}:{}", name, direction)),
        None => (rest, name.to_string()),
    };
    if attribute.is_empty() {
        return Err(format!("missing weight attribute in '{}'", s));
    }
    Ok(WeightArg {
        edge_type: parse_edge_type(&edge_spec)?,
        attribute: attribute.to_string(),
    })
}
