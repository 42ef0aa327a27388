//! Factory functions for creating test scenes.
//!
//! Provides helpers to construct `Entity`, `Definition` and `SceneModel`
//! values used in tests and by the command protocol.

use shared::*;

// ── Entity factories ────────────────────────────────────────────

/// Create a group with its own definition `d{id}`.
pub fn group(id: &str) -> Entity {
    Entity {
        id: id.to_string(),
        name: id.to_string(),
        kind: EntityKind::Group {
            definition: format!("d{id}"),
        },
        hidden: false,
        layer: DEFAULT_LAYER.to_string(),
    }
}

/// Create a component instance of `definition`.
pub fn component(id: &str, definition: &str) -> Entity {
    Entity {
        id: id.to_string(),
        name: id.to_string(),
        kind: EntityKind::ComponentInstance {
            definition: definition.to_string(),
        },
        hidden: false,
        layer: DEFAULT_LAYER.to_string(),
    }
}

/// Create loose geometry (not a container).
pub fn geometry(id: &str) -> Entity {
    Entity {
        id: id.to_string(),
        name: id.to_string(),
        kind: EntityKind::Geometry,
        hidden: false,
        layer: DEFAULT_LAYER.to_string(),
    }
}

/// Same entity, flagged hidden.
pub fn hidden(mut entity: Entity) -> Entity {
    entity.hidden = true;
    entity
}

/// Same entity, moved to `layer`.
pub fn on_layer(mut entity: Entity, layer: &str) -> Entity {
    entity.layer = layer.to_string();
    entity
}

// ── Definition / layer factories ────────────────────────────────

/// Create a definition holding `entities`.
pub fn definition(id: &str, entities: &[&str]) -> Definition {
    Definition {
        id: id.to_string(),
        name: id.to_string(),
        entities: entities.iter().map(|e| e.to_string()).collect(),
    }
}

pub fn layer(name: &str, visible: bool) -> Layer {
    Layer {
        name: name.to_string(),
        visible,
    }
}

// ── Scene factories ─────────────────────────────────────────────

/// A document four levels deep.
///
/// ```text
/// root: A  X  Y(component)  Z(invisible layer)  edge0
///   A: B  P  Q(component, hidden)  face_a
///     B: C  R  face_b
///       C: D  face_c
///         D: face_d
/// ```
pub fn nested_scene() -> SceneModel {
    SceneModel {
        version: 1,
        name: "nested".to_string(),
        entities: vec![
            group("A"),
            group("X"),
            component("Y", "dWidget"),
            on_layer(group("Z"), "Hidden"),
            geometry("edge0"),
            group("B"),
            group("P"),
            hidden(component("Q", "dWidget")),
            geometry("face_a"),
            group("C"),
            group("R"),
            geometry("face_b"),
            group("D"),
            geometry("face_c"),
            geometry("face_d"),
        ],
        root: ["A", "X", "Y", "Z", "edge0"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        definitions: vec![
            definition("dA", &["B", "P", "Q", "face_a"]),
            definition("dB", &["C", "R", "face_b"]),
            definition("dC", &["D", "face_c"]),
            definition("dD", &["face_d"]),
            definition("dX", &[]),
            definition("dZ", &[]),
            definition("dP", &[]),
            definition("dR", &[]),
            definition("dWidget", &[]),
        ],
        layers: vec![layer(DEFAULT_LAYER, true), layer("Hidden", false)],
        hide_rest_of_model: false,
    }
}

/// A chain of `levels` nested groups `L0 ⊃ L1 ⊃ ...`, each level with
/// `siblings` extra groups beside it. Returns the scene and the chain,
/// root first.
pub fn chain_scene(levels: usize, siblings: usize) -> (SceneModel, Vec<EntityId>) {
    let mut entities = Vec::new();
    let mut definitions = Vec::new();
    let mut root = Vec::new();
    let chain: Vec<EntityId> = (0..levels).map(|i| format!("L{i}")).collect();

    for (i, element) in chain.iter().enumerate() {
        let mut members = vec![element.clone()];
        for j in 0..siblings {
            let sibling = format!("{element}_s{j}");
            entities.push(group(&sibling));
            definitions.push(definition(&format!("d{sibling}"), &[]));
            members.push(sibling);
        }
        entities.push(group(element));
        match i {
            0 => root = members,
            _ => {
                let parent_def = format!("d{}", chain[i - 1]);
                if let Some(def) = definitions.iter_mut().find(|d| d.id == parent_def) {
                    def.entities = members;
                }
            }
        }
        definitions.push(definition(&format!("d{element}"), &[]));
    }

    let scene = SceneModel {
        version: 1,
        name: format!("chain_{levels}"),
        entities,
        root,
        definitions,
        layers: vec![layer(DEFAULT_LAYER, true)],
        hide_rest_of_model: false,
    };
    (scene, chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_scene_is_consistent() {
        let scene = nested_scene();
        assert!(scene.validate().is_ok());
        assert!(scene.entity("Q").unwrap().hidden);
    }

    #[test]
    fn test_chain_scene_nests() {
        let (scene, chain) = chain_scene(3, 2);
        assert!(scene.validate().is_ok());
        assert_eq!(chain, ["L0", "L1", "L2"]);
        assert_eq!(scene.root, ["L0", "L0_s0", "L0_s1"]);
        assert_eq!(scene.children_of(Some("L1")), ["L2", "L2_s0", "L2_s1"]);
        assert!(scene.children_of(Some("L2")).is_empty());
    }

    #[test]
    fn test_chain_scene_empty() {
        let (scene, chain) = chain_scene(0, 3);
        assert!(chain.is_empty());
        assert!(scene.root.is_empty());
    }
}
