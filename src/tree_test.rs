use super::*;

#[derive(Debug, Clone, PartialEq)]
struct Group {
    id: i64,
    name: String,
    parent_id: Option<i64>,
    level: u32,
    children: Vec<Group>,
}

fn group(id: i64, children: Vec<Group>) -> Group {
    Group { id, name: format!("g{id}"), parent_id: None, level: 0, children }
}

fn flat(id: i64, parent_id: Option<i64>) -> Group {
    Group { parent_id, ..group(id, Vec::new()) }
}

impl TreeNode for Group {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }

    fn take_children(&mut self) -> Vec<Self> {
        std::mem::take(&mut self.children)
    }

    fn place(&mut self, level: u32, parent_id: Option<i64>) {
        self.level = level;
        self.parent_id = parent_id;
    }
}

fn shape(nodes: &[Group]) -> Vec<(i64, u32, Option<i64>)> {
    nodes.iter().map(|n| (n.id, n.level, n.parent_id)).collect()
}

// =============================================================================
// flatten_tree
// =============================================================================

#[test]
fn flatten_is_depth_first_pre_order() {
    let forest = vec![
        group(1, vec![group(2, vec![group(3, vec![])]), group(4, vec![])]),
        group(5, vec![group(6, vec![])]),
    ];

    let flat = flatten_tree(forest);
    assert_eq!(
        shape(&flat),
        vec![
            (1, 0, None),
            (2, 1, Some(1)),
            (3, 2, Some(2)),
            (4, 1, Some(1)),
            (5, 0, None),
            (6, 1, Some(5)),
        ]
    );
    assert!(flat.iter().all(|n| n.children.is_empty()));
}

#[test]
fn flatten_empty_forest() {
    assert!(flatten_tree(Vec::<Group>::new()).is_empty());
}

#[test]
fn flatten_skips_repeated_ids_and_their_subtrees() {
    let forest = vec![group(1, vec![group(2, vec![group(1, vec![group(9, vec![])])])])];
    assert_eq!(shape(&flatten_tree(forest)), vec![(1, 0, None), (2, 1, Some(1))]);
}

// =============================================================================
// PARENT LINKS
// =============================================================================

#[test]
fn link_parents_maps_child_to_parent_name() {
    let nodes = vec![flat(1, None), flat(2, Some(1)), flat(3, Some(2)), flat(4, Some(99))];
    let links = link_parents(&nodes);

    assert_eq!(links.get(&2).map(String::as_str), Some("g1"));
    assert_eq!(links.get(&3).map(String::as_str), Some("g2"));
    assert!(!links.contains_key(&1));
    assert!(!links.contains_key(&4), "parent outside the page is not linked");
}

#[test]
fn parent_candidates_exclude_group_and_descendants() {
    let nodes = vec![
        flat(1, None),
        flat(2, Some(1)),
        flat(3, Some(2)),
        flat(4, Some(1)),
        flat(5, None),
    ];
    let ids: Vec<i64> = parent_candidates(&nodes, 2).iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![1, 4, 5]);
}

#[test]
fn descendant_walk_terminates_on_cycles() {
    let nodes = vec![flat(1, Some(3)), flat(2, Some(1)), flat(3, Some(2))];
    let below = descendant_ids(&nodes, 1);
    assert_eq!(below, HashSet::from([2, 3]));
    assert!(parent_candidates(&nodes, 1).is_empty());
}
