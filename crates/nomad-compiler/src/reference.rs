//! Machine-generated editor palette.
//!
//! Produces a JSON table of every node kind, action kind and predicate with
//! a human-readable description. Descriptions are matched exhaustively on the
//! closed sets, so adding a variant without describing it fails to compile.

use nomad_eval::DEFAULT_MAX_EXECUTION_STEPS;
use nomad_types::{ActionKind, NodeTag, Predicate};
use serde_json::{json, Value};

// ══════════════════════════════════════════════════════════════════════════════
// Descriptions
// ══════════════════════════════════════════════════════════════════════════════

fn node_description(tag: NodeTag) -> &'static str {
    match tag {
        NodeTag::Entry => "Where the algorithm starts. Exactly one per graph.",
        NodeTag::Action => "Performs one action. Each action costs one step.",
        NodeTag::Condition => {
            "Asks a yes/no question and follows the true or the false edge"
        }
        NodeTag::Loop => "Repeats the node connected by its first edge a fixed number of times",
        NodeTag::Exit => "Ends the algorithm",
    }
}

/// Payload field a node kind carries, if any.
fn node_payload(tag: NodeTag) -> Option<&'static str> {
    match tag {
        NodeTag::Action => Some("actionKind"),
        NodeTag::Condition => Some("predicateId"),
        NodeTag::Loop => Some("iterations"),
        NodeTag::Entry | NodeTag::Exit => None,
    }
}

fn action_description(action: ActionKind) -> &'static str {
    match action {
        ActionKind::Move => "Step one cell forward. Hitting a wall or the map edge fails the run.",
        ActionKind::TurnLeft => "Turn 90° counter-clockwise in place",
        ActionKind::TurnRight => "Turn 90° clockwise in place",
        ActionKind::Wait => "Do nothing for one step",
    }
}

fn predicate_description(predicate: &Predicate) -> &'static str {
    match predicate {
        Predicate::WallAhead => "True when the cell ahead is a wall or off the map",
        Predicate::CanMove => "True when the cell ahead is open",
        Predicate::AtGoal => "True when standing on the goal",
        Predicate::NotAtGoal => "True when not yet on the goal",
        Predicate::Unknown(_) => "Unrecognised; always true",
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Palette
// ══════════════════════════════════════════════════════════════════════════════

/// Structured palette as a JSON value.
pub fn palette() -> Value {
    let nodes: Vec<Value> = NodeTag::ALL
        .iter()
        .map(|&tag| {
            json!({
                "kind": tag.as_str(),
                "payload": node_payload(tag),
                "description": node_description(tag),
            })
        })
        .collect();

    let actions: Vec<Value> = ActionKind::ALL
        .iter()
        .map(|&action| {
            json!({
                "key": action.as_str(),
                "description": action_description(action),
            })
        })
        .collect();

    let predicates: Vec<Value> = Predicate::KNOWN
        .iter()
        .map(|predicate| {
            json!({
                "key": predicate.key(),
                "default": *predicate == Predicate::default(),
                "description": predicate_description(predicate),
            })
        })
        .collect();

    json!({
        "version": crate::ENGINE_VERSION,
        "maxExecutionSteps": DEFAULT_MAX_EXECUTION_STEPS,
        "nodeKinds": nodes,
        "actions": actions,
        "predicates": predicates,
    })
}

/// Pretty-printed [`palette`].
///
/// ```json
/// {
///   "version": "0.1.0",
///   "maxExecutionSteps": 100,
///   "nodeKinds": [ { "kind": "entry", "payload": null, "description": "..." } ],
///   "actions": [ { "key": "move", "description": "..." } ],
///   "predicates": [ { "key": "wallAhead", "default": false, "description": "..." } ]
/// }
/// ```
pub fn generate_palette() -> String {
    format!("{:#}", palette())
}

// ══════════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed() -> Value {
        serde_json::from_str(&generate_palette()).expect("palette should be valid JSON")
    }

    #[test]
    fn palette_is_valid_json() {
        let palette = parsed();
        assert!(palette.is_object());
        assert!(palette["version"].is_string());
        assert_eq!(palette["maxExecutionSteps"], 100);
    }

    #[test]
    fn palette_lists_every_node_kind_in_order() {
        let palette = parsed();
        let kinds: Vec<&str> = palette["nodeKinds"]
            .as_array()
            .unwrap()
            .iter()
            .map(|k| k["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["entry", "action", "condition", "loop", "exit"]);
    }

    #[test]
    fn palette_payload_fields() {
        let palette = parsed();
        let kinds = palette["nodeKinds"].as_array().unwrap();
        assert!(kinds[0]["payload"].is_null());
        assert_eq!(kinds[1]["payload"], "actionKind");
        assert_eq!(kinds[2]["payload"], "predicateId");
        assert_eq!(kinds[3]["payload"], "iterations");
        assert!(kinds[4]["payload"].is_null());
    }

    #[test]
    fn palette_lists_every_action() {
        let palette = parsed();
        let actions = palette["actions"].as_array().unwrap();
        assert_eq!(actions.len(), ActionKind::ALL.len());
        for (entry, action) in actions.iter().zip(ActionKind::ALL) {
            assert_eq!(entry["key"], action.as_str());
        }
    }

    #[test]
    fn palette_marks_can_move_as_default_predicate() {
        let palette = parsed();
        let defaults: Vec<&str> = palette["predicates"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|p| p["default"] == true)
            .map(|p| p["key"].as_str().unwrap())
            .collect();
        assert_eq!(defaults, vec!["canMove"]);
    }

    #[test]
    fn all_descriptions_present() {
        let palette = parsed();
        for section in ["nodeKinds", "actions", "predicates"] {
            for entry in palette[section].as_array().unwrap() {
                let desc = entry["description"].as_str().unwrap();
                assert!(!desc.is_empty(), "missing description in {section}: {entry}");
            }
        }
    }
}
