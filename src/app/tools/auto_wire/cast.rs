//! Verbindbarkeit zweier Ports für das automatische Einfügen.

use crate::core::{Graph, Port, PortId};

/// Darf `from` (als Quelle) mit `to` (als Ziel) verbunden werden?
///
/// Nie für denselben Port, für eine Quelle ohne Output-Grip oder ein Ziel
/// ohne Input-Grip. Sonst genügt eine der Bedingungen: beide Ports sind
/// eigenständige Parameter, die Typen sind gleich, der Quell-Typ ist dem
/// Ziel-Typ zuweisbar, oder eine Seite ist generisch, Geometrie oder
/// Passthrough.
pub fn can_cast(graph: &Graph, from: PortId, to: PortId) -> bool {
    if from == to {
        return false;
    }
    let (Some(source), Some(target)) = (graph.port(from), graph.port(to)) else {
        return false;
    };
    ports_castable(graph, source, target)
}

fn ports_castable(graph: &Graph, from: &Port, to: &Port) -> bool {
    if !from.has_output_grip() || !to.has_input_grip() {
        return false;
    }
    (from.capabilities.is_top_level && to.capabilities.is_top_level)
        || from.value_type == to.value_type
        || graph.types.is_assignable(&from.value_type, &to.value_type)
        || from.capabilities.is_wildcard()
        || to.capabilities.is_wildcard()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PortCapabilities, PortDirection, Rect, TypeHierarchy};
    use glam::Vec2;

    fn bounds() -> Rect {
        Rect::from_corners(Vec2::ZERO, Vec2::splat(20.0))
    }

    fn graph() -> Graph {
        let mut types = TypeHierarchy::new();
        types.register("Integer", "Number");
        let mut graph = Graph::with_types(types);
        graph.add_component(
            1,
            "Quelle",
            bounds(),
            vec![
                Port::new(10, 0, PortDirection::Output, "Integer", Vec2::ZERO),
                Port::new(11, 0, PortDirection::Output, "Curve", Vec2::ZERO),
            ],
        );
        graph.add_component(
            2,
            "Ziel",
            bounds(),
            vec![
                Port::new(20, 0, PortDirection::Input, "Number", Vec2::ZERO),
                Port::new(21, 0, PortDirection::Input, "Integer", Vec2::ZERO),
                Port::new(22, 0, PortDirection::Input, "Text", Vec2::ZERO),
            ],
        );
        graph.add_parameter(
            3,
            "Generic",
            bounds(),
            Port::new(30, 0, PortDirection::Bidirectional, "Object", Vec2::ZERO).with_capabilities(
                PortCapabilities {
                    accepts_any: true,
                    ..PortCapabilities::default()
                },
            ),
        );
        graph.add_parameter(
            4,
            "Zahl",
            bounds(),
            Port::new(40, 0, PortDirection::Bidirectional, "Number", Vec2::ZERO),
        );
        graph.add_parameter(
            5,
            "Text",
            bounds(),
            Port::new(50, 0, PortDirection::Bidirectional, "Text", Vec2::ZERO),
        );
        graph
    }

    #[test]
    fn port_never_casts_to_itself() {
        let graph = graph();
        for port in [10, 20, 30, 40] {
            assert!(!can_cast(&graph, port, port));
        }
    }

    #[test]
    fn grips_are_required() {
        let graph = graph();
        // Eingang als Quelle, Ausgang als Ziel
        assert!(!can_cast(&graph, 21, 20));
        assert!(!can_cast(&graph, 10, 11));
        assert!(!can_cast(&graph, 99, 20));
    }

    #[test]
    fn equal_and_assignable_types() {
        let graph = graph();
        assert!(can_cast(&graph, 10, 21));
        // Integer ist Number zuweisbar, nicht umgekehrt
        assert!(can_cast(&graph, 10, 20));
        assert!(!can_cast(&graph, 40, 21));
        assert!(!can_cast(&graph, 11, 22));
    }

    #[test]
    fn generic_port_is_wildcard_both_ways() {
        let graph = graph();
        for other in [10, 11] {
            assert!(can_cast(&graph, other, 30));
        }
        for other in [20, 21, 22] {
            assert!(can_cast(&graph, 30, other));
        }
    }

    #[test]
    fn top_level_parameters_always_connect() {
        let graph = graph();
        assert!(can_cast(&graph, 40, 50));
        assert!(can_cast(&graph, 50, 40));
        // Komponenten-Port gegen Parameter folgt den Typ-Regeln
        assert!(!can_cast(&graph, 11, 50));
    }
}
