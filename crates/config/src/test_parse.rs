#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::*;

    /// The canonical three-entry document: a separator, a URL entry, and a
    /// cascade holding an exit entry.
    const SCENARIO: &str = r#"
menu:
  - separator: true
  - label: "A"
    open: "https://x"
  - label: "B"
    items:
      - label: "C"
        action: exit
"#;

    #[test]
    fn scenario_tree_validates() {
        let cfg = load_from_str(SCENARIO, None).unwrap();
        assert_eq!(
            cfg.menu,
            vec![
                MenuNode::Separator,
                MenuNode::Action {
                    label: "A".into(),
                    action: ActionDescriptor::OpenUrl("https://x".into()),
                },
                MenuNode::Submenu {
                    label: "B".into(),
                    children: vec![MenuNode::Action {
                        label: "C".into(),
                        action: ActionDescriptor::Exit,
                    }],
                },
            ]
        );
        // No settings section: hotkey falls back to the default.
        assert_eq!(cfg.hotkey, DEFAULT_HOTKEY);
    }

    #[test]
    fn bad_node_reports_its_label() {
        let res = load_from_str("menu:\n  - label: \"Bad\"\n", None);
        let err = res.unwrap_err();
        let pretty = err.pretty();
        assert!(pretty.contains("Bad"), "missing label in: {}", pretty);
        assert!(pretty.contains("menu[1]"), "missing index in: {}", pretty);
    }

    #[test]
    fn nested_bad_node_reports_ancestor_chain() {
        let yaml = r#"
menu:
  - label: "One"
    open: "https://one"
  - separator: true
  - label: "Tools"
    items:
      - label: "Fine"
        open: "https://fine"
      - label: "Broken"
"#;
        let err = load_from_str(yaml, None).unwrap_err();
        let pretty = err.pretty();
        assert!(
            pretty.contains("menu[3] > Tools[2]"),
            "missing trail in: {}",
            pretty
        );
        assert!(pretty.contains("Broken"), "missing label in: {}", pretty);
    }

    #[test]
    fn validation_is_fail_fast() {
        // Two invalid nodes: only the first (depth-first, left-to-right)
        // is reported.
        let yaml = r#"
menu:
  - label: "First"
  - label: "Second"
"#;
        let err = load_from_str(yaml, None).unwrap_err();
        assert!(err.pretty().contains("menu[1]"));
    }

    #[test]
    fn action_precedence_open_wins() {
        let yaml = r#"
menu:
  - label: "Both"
    open: "https://x"
    cmd: "tool"
"#;
        let cfg = load_from_str(yaml, None).unwrap();
        assert_eq!(
            cfg.menu[0],
            MenuNode::Action {
                label: "Both".into(),
                action: ActionDescriptor::OpenUrl("https://x".into()),
            }
        );
    }

    #[test]
    fn action_precedence_path_over_cmd() {
        let yaml = r#"
menu:
  - label: "Both"
    path: "/tmp"
    cmd: "tool"
    action: exit
"#;
        let cfg = load_from_str(yaml, None).unwrap();
        assert_eq!(
            cfg.menu[0],
            MenuNode::Action {
                label: "Both".into(),
                action: ActionDescriptor::OpenPath("/tmp".into()),
            }
        );
    }

    #[test]
    fn submenu_wins_over_action_keys() {
        let yaml = r#"
menu:
  - label: "Sub"
    open: "https://ignored"
    items: []
"#;
        let cfg = load_from_str(yaml, None).unwrap();
        assert_eq!(
            cfg.menu[0],
            MenuNode::Submenu {
                label: "Sub".into(),
                children: vec![],
            }
        );
    }

    #[test]
    fn scalar_args_are_promoted() {
        let yaml = r#"
menu:
  - label: "Run"
    cmd: "tool"
    args: "single"
"#;
        let cfg = load_from_str(yaml, None).unwrap();
        assert_eq!(
            cfg.menu[0],
            MenuNode::Action {
                label: "Run".into(),
                action: ActionDescriptor::Spawn {
                    command: "tool".into(),
                    args: vec!["single".into()],
                },
            }
        );
    }

    #[test]
    fn numeric_args_are_stringified() {
        let yaml = r#"
menu:
  - label: "Run"
    cmd: "tool"
    args: [8080, true, "x"]
"#;
        let cfg = load_from_str(yaml, None).unwrap();
        assert_eq!(
            cfg.menu[0],
            MenuNode::Action {
                label: "Run".into(),
                action: ActionDescriptor::Spawn {
                    command: "tool".into(),
                    args: vec!["8080".into(), "true".into(), "x".into()],
                },
            }
        );
    }

    #[test]
    fn nested_args_are_rejected() {
        let yaml = r#"
menu:
  - label: "Run"
    cmd: "tool"
    args: [["nested"]]
"#;
        let err = load_from_str(yaml, None).unwrap_err();
        assert!(err.pretty().contains("scalars"));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let yaml = "menu:\n  - label: \"Odd\"\n    action: reboot\n";
        let err = load_from_str(yaml, None).unwrap_err();
        let pretty = err.pretty();
        assert!(pretty.contains("reboot"));
        assert!(pretty.contains("Odd"));
    }

    #[test]
    fn separator_false_is_not_a_separator() {
        let yaml = "menu:\n  - separator: false\n";
        assert!(load_from_str(yaml, None).is_err());
    }

    #[test]
    fn unknown_styling_keys_are_tolerated() {
        let yaml = r##"
menu:
  - label: "Styled"
    open: "https://x"
    bold: true
    color: "#ff0000"
    accelerator: "Ctrl+G"
"##;
        let cfg = load_from_str(yaml, None).unwrap();
        assert_eq!(cfg.menu.len(), 1);
    }

    #[test]
    fn empty_document_is_an_empty_menu() {
        let cfg = load_from_str("", None).unwrap();
        assert!(cfg.menu.is_empty());
        assert_eq!(cfg.hotkey, DEFAULT_HOTKEY);
    }

    #[test]
    fn empty_hotkey_falls_back() {
        let yaml = "settings:\n  hotkey: \"\"\nmenu: []\n";
        let cfg = load_from_str(yaml, None).unwrap();
        assert_eq!(cfg.hotkey, DEFAULT_HOTKEY);
    }

    #[test]
    fn configured_hotkey_is_used() {
        let yaml = "settings:\n  hotkey: \"cmd+shift+m\"\nmenu: []\n";
        let cfg = load_from_str(yaml, None).unwrap();
        assert_eq!(cfg.hotkey, "cmd+shift+m");
    }

    #[test]
    fn deep_nesting_resolves() {
        let mut yaml = String::from("menu:\n");
        let mut indent = String::from("  ");
        for depth in 0..8 {
            yaml.push_str(&format!("{}- label: \"L{}\"\n", indent, depth));
            yaml.push_str(&format!("{}  items:\n", indent));
            indent.push_str("    ");
        }
        yaml.push_str(&format!("{}- label: \"leaf\"\n", indent));
        yaml.push_str(&format!("{}  open: \"https://deep\"\n", indent));

        let cfg = load_from_str(&yaml, None).unwrap();
        let mut node = &cfg.menu[0];
        let mut seen = 0;
        while let MenuNode::Submenu { children, .. } = node {
            seen += 1;
            node = &children[0];
        }
        assert_eq!(seen, 8);
        assert_eq!(node.leaf_count(), 1);
    }

    #[test]
    fn template_bootstraps_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.yaml");
        assert!(!path.exists());

        let cfg = load_from_path(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.hotkey, DEFAULT_HOTKEY);
        assert!(!cfg.menu.is_empty());
    }

    #[test]
    fn existing_document_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.yaml");
        std::fs::write(&path, "settings:\n  hotkey: \"f9\"\nmenu: []\n").unwrap();

        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.hotkey, "f9");
        assert!(cfg.menu.is_empty());
    }

    #[test]
    fn load_hotkey_tolerates_a_broken_tree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.yaml");
        std::fs::write(&path, "settings:\n  hotkey: \"f6\"\nmenu:\n  - label: \"Bad\"\n").unwrap();

        assert_eq!(load_hotkey(&path).unwrap(), "f6");
        assert!(load_from_path(&path).is_err());
    }

    // ===== Property: any well-formed tree round-trips through YAML =====

    /// Strategy for an action descriptor.
    fn action_strategy() -> impl Strategy<Value = ActionDescriptor> {
        prop_oneof![
            "[a-z]{1,12}".prop_map(ActionDescriptor::OpenUrl),
            "[a-z/]{1,12}".prop_map(ActionDescriptor::OpenPath),
            ("[a-z]{1,8}", prop::collection::vec("[a-z0-9]{1,6}", 0..3)).prop_map(
                |(command, args)| ActionDescriptor::Spawn { command, args }
            ),
            Just(ActionDescriptor::Exit),
        ]
    }

    /// Strategy for a well-formed menu node of bounded but varied depth.
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

    /// Emit the raw YAML shape for a node.
    fn node_to_value(node: &MenuNode) -> serde_yaml::Value {
        use serde_yaml::{Mapping, Value};
        let mut map = Mapping::new();
        match node {
            MenuNode::Separator => {
                map.insert(Value::String("separator".into()), Value::Bool(true));
            }
            MenuNode::Submenu { label, children } => {
                map.insert(
                    Value::String("label".into()),
                    Value::String(label.clone()),
                );
                map.insert(
                    Value::String("items".into()),
                    Value::Sequence(children.iter().map(node_to_value).collect()),
                );
            }
            MenuNode::Action { label, action } => {
                map.insert(
                    Value::String("label".into()),
                    Value::String(label.clone()),
                );
                match action {
                    ActionDescriptor::OpenUrl(url) => {
                        map.insert(
                            Value::String("open".into()),
                            Value::String(url.clone()),
                        );
                    }
                    ActionDescriptor::OpenPath(path) => {
                        map.insert(
                            Value::String("path".into()),
                            Value::String(path.clone()),
                        );
                    }
                    ActionDescriptor::Spawn { command, args } => {
                        map.insert(
                            Value::String("cmd".into()),
                            Value::String(command.clone()),
                        );
                        if !args.is_empty() {
                            map.insert(
                                Value::String("args".into()),
                                Value::Sequence(
                                    args.iter()
                                        .map(|a| Value::String(a.clone()))
                                        .collect(),
                                ),
                            );
                        }
                    }
                    ActionDescriptor::Exit => {
                        map.insert(
                            Value::String("action".into()),
                            Value::String("exit".into()),
                        );
                    }
                }
            }
        }
        Value::Mapping(map)
    }

    proptest! {
        #[test]
        fn well_formed_trees_round_trip(tree in prop::collection::vec(node_strategy(), 0..5)) {
            use serde_yaml::{Mapping, Value};
            let mut doc = Mapping::new();
            doc.insert(
                Value::String("menu".into()),
                Value::Sequence(tree.iter().map(node_to_value).collect()),
            );
            let yaml = serde_yaml::to_string(&Value::Mapping(doc)).unwrap();

            let cfg = load_from_str(&yaml, None).unwrap();
            prop_assert_eq!(cfg.menu, tree);
        }
    }
}
