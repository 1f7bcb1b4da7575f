use tessera_core::{Element, LayoutTree, Vec2, Vec3};
use tessera_markup::{MarkupError, TokenKind, parse, parse_file, tokenize};

fn root_elements(tree: &LayoutTree) -> &[Element] {
    tree.elements(tree.root())
}

#[test]
fn test_box_from_flat_leaves() {
    let doc = parse(
        "<layout><box><x>1</x><y>2</y><x>3</x><y>4</y><x>5</x><y>6</y><z>7</z></box></layout>",
    )
    .unwrap();

    assert!(doc.is_clean());
    assert_eq!(
        root_elements(&doc.tree),
        &[Element::rect(
            Vec2::new(1.0, 2.0),
            Vec2::new(3.0, 4.0),
            Vec3::new(5.0, 6.0, 7.0)
        )]
    );
}

#[test]
fn test_bad_number_reads_as_zero_and_parsing_continues() {
    let doc = parse(
        "<layout>
            <point><x>notanumber</x><y>4</y><x>1</x><y>2</y><z>3</z></point>
            <layout><sX>0.5</sX></layout>
        </layout>",
    )
    .unwrap();

    assert_eq!(
        root_elements(&doc.tree),
        &[Element::point(Vec2::new(0.0, 4.0), Vec3::new(1.0, 2.0, 3.0))]
    );
    assert_eq!(doc.tree.len(), 2);
    assert_eq!(doc.diagnostics.len(), 1);
    assert!(doc.diagnostics[0].message.contains("notanumber"));
}

#[test]
fn test_wrapped_and_spread_out_leaves_read_the_same() {
    let doc = parse(
        "<layout>
            <line>
                <vec2><x>0</x><y>0</y></vec2>
                <ivec2><x>10</x><y>5</y></ivec2>
                <vec3><x>255</x><y>128</y><z>0</z></vec3>
            </line>
        </layout>",
    )
    .unwrap();

    assert!(doc.is_clean());
    assert_eq!(
        root_elements(&doc.tree),
        &[Element::line(
            Vec2::ZERO,
            Vec2::new(10.0, 5.0),
            Vec3::new(255.0, 128.0, 0.0)
        )]
    );
}

#[test]
fn test_missing_leaves_default_to_zero() {
    let doc = parse("<layout><box><x>1</x></box></layout>").unwrap();

    assert_eq!(
        root_elements(&doc.tree),
        &[Element::rect(Vec2::new(1.0, 0.0), Vec2::ZERO, Vec3::ZERO)]
    );
    assert_eq!(doc.diagnostics.len(), 6);
}

#[test]
fn test_nested_layout_fields_and_active_forms() {
    let doc = parse(
        r#"<layout>
            <layout active="true">
                <sX>0.25</sX><sY>0.5</sY><eX>0.75</eX><eY>1</eY>
            </layout>
            <layout>active="true"</layout>
            <layout><name>hidden</name></layout>
        </layout>"#,
    )
    .unwrap();
    let tree = &doc.tree;
    let children = tree.children(tree.root());
    assert_eq!(children.len(), 3);

    let first = tree.get(children[0]).unwrap();
    assert_eq!(
        first.fractions(),
        (Vec2::new(0.25, 0.5), Vec2::new(0.75, 1.0))
    );

    let active: Vec<bool> = children.iter().map(|&id| tree.is_active(id)).collect();
    assert_eq!(active, vec![true, true, false]);

    let hidden = tree.get(children[2]).unwrap();
    assert_eq!(hidden.fractions(), (Vec2::ZERO, Vec2::ONE));
    assert_eq!(tree.find_by_name("hidden"), Some(children[2]));
}

#[test]
fn test_root_is_forced_active_and_full() {
    let doc = parse(r#"<layout active="false"><sX>0.5</sX></layout>"#).unwrap();
    let root = doc.tree.get(doc.tree.root()).unwrap();

    assert!(root.active);
    assert_eq!(root.fractions(), (Vec2::ZERO, Vec2::ONE));
    assert_eq!(doc.diagnostics.len(), 1);
}

#[test]
fn test_button_fields() {
    let doc = parse(
        "<layout>
            <button>
                <x>10</x><y>10</y><x>40</x><y>20</y><x>0</x><y>0</y><z>255</z>
                <hoverable>false</hoverable>
                <target>settings</target>
                <sound>click.wav</sound>
            </button>
            <layout><name>settings</name></layout>
        </layout>",
    )
    .unwrap();

    let button = root_elements(&doc.tree)[0].as_button().unwrap();
    assert_eq!(button.position, Vec2::new(10.0, 10.0));
    assert_eq!(button.size, Vec2::new(40.0, 20.0));
    assert_eq!(button.color, Vec3::new(0.0, 0.0, 255.0));
    assert!(!button.hoverable);
    assert!(button.clickable);
    assert_eq!(button.target.as_deref(), Some("settings"));
    assert_eq!(button.sound.as_deref(), Some("click.wav"));
    assert!(doc.is_clean());
}

#[test]
fn test_unknown_tags_are_skipped_whole() {
    let doc = parse(
        "<layout>
            <circle><x>1</x><radius><x>9</x></radius></circle>
            <point><x>2</x><y>3</y><x>4</x><y>5</y><z>6</z></point>
        </layout>",
    )
    .unwrap();

    assert_eq!(
        root_elements(&doc.tree),
        &[Element::point(Vec2::new(2.0, 3.0), Vec3::new(4.0, 5.0, 6.0))]
    );
    assert_eq!(doc.diagnostics.len(), 1);
    assert!(doc.diagnostics[0].message.contains("circle"));
}

#[test]
fn test_unclosed_tag_is_fatal() {
    let err = parse("<layout><box>").err().unwrap();
    assert!(matches!(
        err,
        MarkupError::Unclosed { ref tag, offset: 8 } if tag == "box"
    ));

    let err = parse("<layout><layout></layout>").err().unwrap();
    assert!(matches!(
        err,
        MarkupError::Unclosed { ref tag, offset: 0 } if tag == "layout"
    ));
}

#[test]
fn test_mismatched_close_is_fatal() {
    let err = parse("<layout><box></line></layout>").err().unwrap();
    assert!(matches!(
        err,
        MarkupError::Mismatched { ref expected, ref found, offset: 13 }
            if expected == "box" && found == "line"
    ));
}

#[test]
fn test_missing_root() {
    assert!(matches!(parse(""), Err(MarkupError::MissingRoot)));
    assert!(matches!(
        parse("<box><x>1</x></box>"),
        Err(MarkupError::MissingRoot)
    ));
}

#[test]
fn test_unreadable_file() {
    let err = parse_file("/definitely/not/here.layout").err().unwrap();
    assert!(matches!(err, MarkupError::Io { .. }));
}

#[test]
fn test_tokenize_offsets_and_attributes() {
    let tokens = tokenize(r#"<layout active="true" hidden/> text <x>1</x>"#).unwrap();
    let summary: Vec<(usize, &TokenKind)> = tokens.iter().map(|t| (t.offset, &t.kind)).collect();

    assert_eq!(summary.len(), 6);
    match summary[0].1 {
        TokenKind::Open { name, attrs } => {
            assert_eq!(name, "layout");
            assert_eq!(
                attrs.as_slice(),
                &[
                    ("active".to_string(), "true".to_string()),
                    ("hidden".to_string(), "true".to_string()),
                ]
            );
        }
        other => panic!("unexpected token {:?}", other),
    }
    assert_eq!(
        summary[1],
        (0, &TokenKind::Close { name: "layout".into() })
    );
    assert_eq!(summary[2], (31, &TokenKind::Text("text".into())));
    assert_eq!(summary[3].0, 36);
    assert_eq!(summary[4], (39, &TokenKind::Text("1".into())));
    assert_eq!(summary[5], (40, &TokenKind::Close { name: "x".into() }));
}

#[test]
fn test_demo_document_parses_clean() {
    let doc = parse(include_str!("../../../demos/menu.layout")).unwrap();
    assert!(doc.is_clean(), "{:?}", doc.diagnostics);

    let tree = &doc.tree;
    assert_eq!(tree.len(), 3);
    assert_eq!(root_elements(tree).len(), 3);
    let menu = tree.find_by_name("menu").unwrap();
    assert!(!tree.is_active(menu));
    assert_eq!(tree.elements(menu).len(), 2);
}

#[test]
fn test_whitespace_inside_values_is_ignored() {
    let doc = parse(
        "<layout>
            <layout>active = \"true\"<sX> 0. 5 </sX><eY>1\n</eY></layout>
            <point><x>- 1</x><y>2</y><x>1 0</x><y>0</y><z>0</z></point>
        </layout>",
    )
    .unwrap();
    assert!(doc.is_clean(), "{:?}", doc.diagnostics);

    let tree = &doc.tree;
    let child = tree.children(tree.root())[0];
    assert!(tree.is_active(child));
    assert_eq!(tree.get(child).unwrap().s_x, 0.5);
    assert_eq!(
        root_elements(tree),
        &[Element::point(Vec2::new(-1.0, 2.0), Vec3::new(10.0, 0.0, 0.0))]
    );
}

#[test]
fn test_non_finite_numbers_read_as_zero() {
    let doc = parse(
        "<layout><point><x>inf</x><y>NaN</y><x>1e39</x><y>-infinity</y><z>7</z></point></layout>",
    )
    .unwrap();

    assert_eq!(
        root_elements(&doc.tree),
        &[Element::point(Vec2::ZERO, Vec3::new(0.0, 0.0, 7.0))]
    );
    assert_eq!(doc.diagnostics.len(), 4);
    assert!(doc.diagnostics[0].message.contains("inf"));
}
