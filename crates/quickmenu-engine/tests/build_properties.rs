//! Property tests for menu materialization: for any well-formed tree, the
//! built structure's leaf count and nesting depth match the input exactly.

use config::{ActionDescriptor, MenuNode};
use proptest::prelude::*;
use quickmenu_engine::{
    PopupShell,
    mocks::{EventLog, MockShell},
};

/// Strategy for an action descriptor.
fn action_strategy() -> impl Strategy<Value = ActionDescriptor> {
    prop_oneof![
        "[a-z]{1,12}".prop_map(ActionDescriptor::OpenUrl),
        "[a-z/]{1,12}".prop_map(ActionDescriptor::OpenPath),
        ("[a-z]{1,8}", prop::collection::vec("[a-z0-9]{1,6}", 0..3))
            .prop_map(|(command, args)| ActionDescriptor::Spawn { command, args }),
        Just(ActionDescriptor::Exit),
    ]
}

/// Strategy for a well-formed menu node of varied depth.
fn node_strategy() -> impl Strategy<Value = MenuNode> {
    let leaf = prop_oneof![
        Just(MenuNode::Separator),
        ("[a-z ]{1,10}", action_strategy())
            .prop_map(|(label, action)| MenuNode::Action { label, action }),
    ];
    leaf.prop_recursive(4, 24, 4, |inner| {
        ("[a-z ]{1,10}", prop::collection::vec(inner, 0..4))
            .prop_map(|(label, children)| MenuNode::Submenu { label, children })
    })
}

/// Leaf count computed directly over the input tree.
fn tree_leaves(nodes: &[MenuNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            MenuNode::Submenu { children, .. } => tree_leaves(children),
            _ => 1,
        })
        .sum()
}

/// Nesting depth computed directly over the input tree; a flat menu has
/// depth 1.
fn tree_depth(nodes: &[MenuNode]) -> usize {
    1 + nodes
        .iter()
        .filter_map(|node| match node {
            MenuNode::Submenu { children, .. } => Some(tree_depth(children)),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn built_structure_matches_the_tree(tree in prop::collection::vec(node_strategy(), 0..5)) {
        let log = EventLog::default();
        let mut shell = MockShell::new(&log);
        let menu = shell.build_menu(&tree).unwrap();

        prop_assert_eq!(menu.leaf_count(), tree_leaves(&tree));
        prop_assert_eq!(menu.depth(), tree_depth(&tree));
    }
}
