//! Pure filters over an edge listing.
//!
//! Each filter keeps the listing's relative order and never fails.

use crate::model::{Checksum256, Edge, Name};

pub fn edges_from<'a>(edges: &'a [Edge], node: &Checksum256) -> Vec<&'a Edge> {
    edges.iter().filter(|e| e.from_node == *node).collect()
}

pub fn edges_to<'a>(edges: &'a [Edge], node: &Checksum256) -> Vec<&'a Edge> {
    edges.iter().filter(|e| e.to_node == *node).collect()
}

pub fn edges_from_named<'a>(edges: &'a [Edge], node: &Checksum256, edge_name: Name) -> Vec<&'a Edge> {
    edges
        .iter()
        .filter(|e| e.from_node == *node && e.edge_name == edge_name)
        .collect()
}

pub fn edges_to_named<'a>(edges: &'a [Edge], node: &Checksum256, edge_name: Name) -> Vec<&'a Edge> {
    edges
        .iter()
        .filter(|e| e.to_node == *node && e.edge_name == edge_name)
        .collect()
}

pub fn edges_between<'a>(edges: &'a [Edge], from: &Checksum256, to: &Checksum256) -> Vec<&'a Edge> {
    edges
        .iter()
        .filter(|e| e.from_node == *from && e.to_node == *to)
        .collect()
}

pub fn edge_exists(edges: &[Edge], from: &Checksum256, to: &Checksum256, edge_name: Name) -> bool {
    edges.iter().any(|e| e.connects(from, to, edge_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimePoint;

    fn node(byte: u8) -> Checksum256 {
        Checksum256::from_bytes([byte; 32])
    }

    fn edge(id: u64, from: u8, to: u8, name: &str) -> Edge {
        Edge {
            id,
            from_node: node(from),
            to_node: node(to),
            edge_name: Name::new(name).unwrap(),
            created_date: TimePoint::from_millis(id as i64).unwrap(),
            creator: None,
        }
    }

    fn listing() -> Vec<Edge> {
        vec![
            edge(0, 1, 2, "edge1"),
            edge(1, 1, 3, "edge1"),
            edge(2, 3, 1, "owns"),
            edge(3, 1, 2, "owns"),
        ]
    }

    fn ids(edges: &[&Edge]) -> Vec<u64> {
        edges.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_direction_filters() {
        let edges = listing();
        assert_eq!(ids(&edges_from(&edges, &node(1))), [0u64, 1, 3]);
        assert_eq!(ids(&edges_to(&edges, &node(1))), [2u64]);
        assert!(edges_to(&edges, &node(9)).is_empty());
    }

    #[test]
    fn test_named_filters() {
        let edges = listing();
        let edge1 = Name::new("edge1").unwrap();
        assert_eq!(ids(&edges_from_named(&edges, &node(1), edge1)), [0u64, 1]);
        assert!(edges_from_named(&edges, &node(1), Name::new("wrongedge").unwrap()).is_empty());
        assert_eq!(ids(&edges_to_named(&edges, &node(2), Name::new("owns").unwrap())), [3u64]);
    }

    #[test]
    fn test_between_and_exists() {
        let edges = listing();
        assert_eq!(ids(&edges_between(&edges, &node(1), &node(2))), [0u64, 3]);
        assert!(edge_exists(&edges, &node(1), &node(2), Name::new("edge1").unwrap()));
        assert!(!edge_exists(&edges, &node(2), &node(1), Name::new("edge1").unwrap()));
        assert!(!edge_exists(&edges, &node(1), &node(2), Name::new("doesnotexist").unwrap()));
    }

    #[test]
    fn test_empty_listing() {
        assert!(edges_from(&[], &node(1)).is_empty());
        assert!(!edge_exists(&[], &node(1), &node(2), Name::default()));
    }
}
