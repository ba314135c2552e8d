//! Writer output re-parses to the same tree and values.

mod common;

use std::fmt::Write;

use common::*;
use insta::assert_snapshot;
use openddl::{write_document, Document, Structure, Type, Vocabulary};
use pretty_assertions::assert_eq;

const SCENE: &str = r#"
Metric (key = "distance") {float {0.01}}
Metric (key = "up") {string {"z"}}

GeometryNode $node1 (visible = true, shadow = false)
{
    Name {string {"Cube " "No1"}}
    ObjectRef {ref {$geometry1}}
    Transform {float[16] {{1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0.5, -2.25, 1e3, 1}}}
}

GeometryObject $geometry1
{
    Mesh (lod = 0, primitive = "triangles")
    {
        VertexArray (attrib = "normal") {float[3] %normals {{0, 0, 1}, {0, 0, -1}}}
        IndexArray (restart = 0xFFFFFFFF) {u16[3] {{0, 1, 2}, {2, 1, 0}}}
    }
}

Extension (applic = "Tool", type = "flags")
{
    bool {true, false}
    int8 {-128, 127}
    unsigned_int64 {18446744073709551615}
    double {inf, -inf, 0x7FF8000000000001}
    type {float, ref, type}
    ref {$node1%mesh, null}
    string {"tab\there", "quote\"", "unié"}
}
"#;

fn dump(document: &Document) -> String {
    fn walk(structure: Structure<'_>, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        if structure.is_custom() {
            let _ = writeln!(
                out,
                "{}{}#{} {:?}",
                indent,
                structure.keyword(),
                structure.identifier(),
                structure.name()
            );
            for property in structure.properties() {
                let _ = writeln!(
                    out,
                    "{}  .{}: {} {:?}",
                    indent,
                    property.keyword(),
                    property.ty(),
                    property.values()
                );
            }
            for child in structure.children() {
                walk(child, depth + 1, out);
            }
        } else {
            let bits: Vec<String> = match structure.values() {
                openddl::Values::Float(v) => v.iter().map(|f| format!("{:08x}", f.to_bits())).collect(),
                openddl::Values::Double(v) => v.iter().map(|f| format!("{:016x}", f.to_bits())).collect(),
                other => vec![format!("{:?}", other)],
            };
            let _ = writeln!(
                out,
                "{}{}[{}] {:?} {:?}",
                indent,
                structure.ty(),
                structure.sub_array_size(),
                structure.name(),
                bits
            );
        }
    }

    let mut out = String::new();
    for root in document.children() {
        walk(root, 0, &mut out);
    }
    out
}

fn parse(source: &str) -> Document {
    init_logging();
    Document::parse(source, &vocabulary()).unwrap()
}

#[test]
fn test_scene_round_trips() {
    let original = parse(SCENE);
    let text = original.to_string();
    let reparsed = parse(&text);

    assert_eq!(dump(&original), dump(&reparsed));
    assert_eq!(original.structure_count(), reparsed.structure_count());
}

#[test]
fn test_round_trip_is_stable() {
    let once = parse(SCENE).to_string();
    let twice = parse(&once).to_string();

    assert_eq!(once, twice);
}

#[test]
fn test_round_trip_keeps_validity() {
    let original = parse(SCENE);
    original.validate(&schema()).unwrap();

    parse(&original.to_string()).validate(&schema()).unwrap();
}

#[test]
fn test_nan_payload_survives() {
    let original = parse(SCENE);
    let reparsed = parse(&original.to_string());

    let doubles = reparsed
        .first_child_of(EXTENSION)
        .first_child_of_type(openddl::Type::Double)
        .as_array::<f64>();
    assert_eq!(doubles[2].to_bits(), 0x7FF8_0000_0000_0001);
}

#[test]
fn test_write_document_output() {
    let document = parse(r#"Node $root { Name {string {"a\nb"}} Translation (kind = "xyz") {float[3] {{1, 2.5, -0.0}}} }"#);

    let mut text = String::new();
    write_document(&document, &mut text).unwrap();

    assert_snapshot!(text, @r###"
    Node $root {
        Name {
            string { "a\nb" }
        }
        Translation (kind = "xyz") {
            float[3] { {1.0, 2.5, -0.0} }
        }
    }
    "###);
}

#[test]
fn test_alias_only_vocabulary_round_trips() {
    init_logging();
    let vocabulary = Vocabulary::empty()
        .structure("Mesh", MESH)
        .primitive("vec3", Type::Float)
        .primitive("idx", Type::UnsignedShort);
    let original =
        Document::parse("Mesh { vec3[3] {{1, 2, 3}} idx {0, 1, 2} }", &vocabulary).unwrap();

    let reparsed = Document::parse(&original.to_string(), &vocabulary).unwrap();
    assert_eq!(dump(&original), dump(&reparsed));
    let keywords: Vec<_> = reparsed.first_child().children().map(|s| s.keyword()).collect();
    assert_eq!(keywords, vec!["vec3", "idx"]);
}
