//! Write/read round-trip coverage for the document codec.

use glam::{DVec3, DVec4};
use rage_doc::{read_tree, write_tree, DocNode};

fn sample_archetype() -> DocNode {
    DocNode::new("Item")
        .with_attr("type", "CBaseArchetypeDef")
        .with_child(DocNode::scalar("lodDist", 100.0))
        .with_child(DocNode::scalar("flags", 536870912u32))
        .with_child(DocNode::vec3("bbMin", DVec3::new(-1.5, -2.0, -0.25)))
        .with_child(DocNode::vec3("bbMax", DVec3::new(1.5, 2.0, 0.25)))
        .with_child(DocNode::vec4("bsCentre", DVec4::new(0.0, 0.0, 0.0, 1.0)))
        .with_child(DocNode::text_node("name", "prop_bench_01"))
        .with_child(DocNode::text_node("assetType", "ASSET_TYPE_DRAWABLE"))
        .with_child(DocNode::string_list(
            "CompositeFlags1",
            &["FLAG_STAIRS", "FLAG_SEE_THROUGH"],
        ))
}

#[test]
fn test_round_trip_preserves_tree() {
    let root = DocNode::new("CMapTypes")
        .with_child(DocNode::new("archetypes").with_child(sample_archetype()));
    let text = write_tree(&root);
    let back = read_tree(&text).unwrap();
    assert_eq!(back, root);
}

#[test]
fn test_round_trip_preserves_item_order() {
    let mut list = DocNode::new("rooms");
    for i in 0..5 {
        list.push(DocNode::text_node("Item", format!("Room.{i}")));
    }
    let text = write_tree(&list);
    let back = read_tree(&text).unwrap();
    let names: Vec<&str> = back.items().map(|i| i.text.as_str()).collect();
    assert_eq!(names, vec!["Room.0", "Room.1", "Room.2", "Room.3", "Room.4"]);
}

#[test]
fn test_round_trip_escaped_text() {
    let root = DocNode::text_node("name", "a<b>&\"c\"");
    let back = read_tree(&write_tree(&root)).unwrap();
    assert_eq!(back.text, "a<b>&\"c\"");
}

#[test]
fn test_round_trip_float_precision() {
    let v = DVec3::new(1.000244140625, -0.3333333333333333, 12345.6789);
    let back = read_tree(&write_tree(&DocNode::vec3("corner", v))).unwrap();
    assert_eq!(back.as_vec3().unwrap(), v);
}
