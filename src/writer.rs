//! Canonical OpenDDL text output.
//!
//! Output re-parses with the same vocabulary to the same tree and values.
//! Structures and properties keep the keyword they were parsed with, so
//! primitive aliases survive. `type` values use the canonical keyword.
//! Non-finite
//! floating-point data is written as a hex bit pattern, except in
//! properties whose type may be inferred, where `inf` and `nan` are used.

use std::fmt::{self, Write};

use crate::document::{Document, Property, Scalar, Structure, Values};

const INDENT: &str = "    ";

/// Write `document` as OpenDDL text.
pub fn write_document<W: Write>(document: &Document, out: &mut W) -> fmt::Result {
    let mut writer = Writer { out, depth: 0 };
    for structure in document.children() {
        writer.structure(structure)?;
    }
    Ok(())
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_document(self, f)
    }
}

struct Writer<'w, W: Write> {
    out: &'w mut W,
    depth: usize,
}

impl<W: Write> Writer<'_, W> {
    fn indent(&mut self) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.write_str(INDENT)?;
        }
        Ok(())
    }

    fn structure(&mut self, structure: Structure<'_>) -> fmt::Result {
        self.indent()?;
        if structure.is_custom() {
            self.custom(structure)
        } else {
            self.primitive(structure)
        }
    }

    fn custom(&mut self, structure: Structure<'_>) -> fmt::Result {
        self.out.write_str(structure.keyword())?;
        if structure.has_name() {
            write!(self.out, " {}", structure.name())?;
        }
        if structure.has_properties() {
            self.out.write_str(" (")?;
            for (i, property) in structure.properties().enumerate() {
                if i > 0 {
                    self.out.write_str(", ")?;
                }
                self.property(property)?;
            }
            self.out.write_char(')')?;
        }

        if !structure.has_children() {
            return self.out.write_str(" {}\n");
        }
        self.out.write_str(" {\n")?;
        self.depth += 1;
        for child in structure.children() {
            self.structure(child)?;
        }
        self.depth -= 1;
        self.indent()?;
        self.out.write_str("}\n")
    }

    fn property(&mut self, property: Property<'_>) -> fmt::Result {
        write!(self.out, "{} = ", property.keyword())?;
        let values = property.values();
        if values.len() == 1 {
            return self.property_value(values, 0);
        }
        self.out.write_char('{')?;
        for i in 0..values.len() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.property_value(values, i)?;
        }
        self.out.write_char('}')
    }

    fn property_value(&mut self, values: Values<'_>, index: usize) -> fmt::Result {
        match values.get(index) {
            Some(Scalar::Float(v)) if v.is_nan() => self.out.write_str("nan"),
            Some(Scalar::Float(v)) if v.is_infinite() => {
                self.out.write_str(if v > 0.0 { "inf" } else { "-inf" })
            }
            _ => self.value(values, index),
        }
    }

    fn primitive(&mut self, structure: Structure<'_>) -> fmt::Result {
        self.out.write_str(structure.keyword())?;
        let sub_array_size = structure.sub_array_size();
        if sub_array_size > 0 {
            write!(self.out, "[{}]", sub_array_size)?;
        }
        if structure.has_name() {
            write!(self.out, " {}", structure.name())?;
        }

        let values = structure.values();
        if values.is_empty() {
            return self.out.write_str(" {}\n");
        }

        self.out.write_str(" { ")?;
        let group = if sub_array_size > 0 {
            sub_array_size
        } else {
            values.len()
        };
        for start in (0..values.len()).step_by(group) {
            if start > 0 {
                self.out.write_str(", ")?;
            }
            if sub_array_size > 0 {
                self.out.write_char('{')?;
            }
            for i in start..start + group {
                if i > start {
                    self.out.write_str(", ")?;
                }
                self.value(values, i)?;
            }
            if sub_array_size > 0 {
                self.out.write_char('}')?;
            }
        }
        self.out.write_str(" }\n")
    }

    fn value(&mut self, values: Values<'_>, index: usize) -> fmt::Result {
        match values {
            Values::Bool(v) => write!(self.out, "{}", v[index]),
            Values::UnsignedByte(v) => write!(self.out, "{}", v[index]),
            Values::Byte(v) => write!(self.out, "{}", v[index]),
            Values::UnsignedShort(v) => write!(self.out, "{}", v[index]),
            Values::Short(v) => write!(self.out, "{}", v[index]),
            Values::UnsignedInt(v) => write!(self.out, "{}", v[index]),
            Values::Int(v) => write!(self.out, "{}", v[index]),
            Values::UnsignedLong(v) => write!(self.out, "{}", v[index]),
            Values::Long(v) => write!(self.out, "{}", v[index]),
            Values::Float(v) => {
                let value = v[index];
                if value.is_finite() {
                    write!(self.out, "{:?}", value)
                } else {
                    write!(self.out, "0x{:08X}", value.to_bits())
                }
            }
            Values::Double(v) => {
                let value = v[index];
                if value.is_finite() {
                    write!(self.out, "{:?}", value)
                } else {
                    write!(self.out, "0x{:016X}", value.to_bits())
                }
            }
            Values::String(v) => write_string(self.out, &v[index]),
            Values::Reference(v) => match &v[index] {
                "" => self.out.write_str("null"),
                path => self.out.write_str(path),
            },
            Values::Type(v) => self.out.write_str(v[index].keyword()),
        }
    }
}

fn write_string<W: Write>(out: &mut W, text: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in text.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if c.is_control() => write!(out, "\\x{:02X}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Vocabulary;
    use crate::types::{Identifier, Type};

    const NODE: Identifier = 1;
    const LOD: Identifier = 10;
    const TAGS: Identifier = 11;

    fn vocabulary() -> Vocabulary {
        Vocabulary::new()
            .structure("Node", NODE)
            .property("lod", LOD)
            .typed_property("tags", TAGS, Type::String)
    }

    fn rewrite(source: &str) -> String {
        Document::parse(source, &vocabulary()).unwrap().to_string()
    }

    #[test]
    fn test_nested_layout() {
        let text = rewrite("Node $a (lod = 2) { Node {} f32[2] %v {{1, 2}, {3, 4}} }");
        assert_eq!(
            text,
            "Node $a (lod = 2) {\n    Node {}\n    f32[2] %v { {1.0, 2.0}, {3.0, 4.0} }\n}\n"
        );
    }

    #[test]
    fn test_property_lists() {
        assert_eq!(
            rewrite(r#"Node (tags = {}, lod = {1, 2.5}) {}"#),
            "Node (tags = {}, lod = {1.0, 2.5}) {}\n"
        );
    }

    #[test]
    fn test_scalar_formats() {
        let text = rewrite(
            r#"Node { bool {true} int8 {-3} ref {$a%b, null} type {double} string {"q\"\n\x01"} }"#,
        );
        assert_eq!(
            text,
            "Node {\n    bool { true }\n    int8 { -3 }\n    ref { $a%b, null }\n    type { double }\n    string { \"q\\\"\\n\\x01\" }\n}\n"
        );
    }

    #[test]
    fn test_non_finite_floats() {
        assert_eq!(
            rewrite("float { inf, -inf } double { nan }"),
            "float { 0x7F800000, 0xFF800000 }\ndouble { 0x7FF8000000000000 }\n"
        );
        assert_eq!(rewrite("Node (lod = -inf) {}"), "Node (lod = -inf) {}\n");
    }

    #[test]
    fn test_primitive_alias_kept() {
        let vocabulary = Vocabulary::empty()
            .structure("Mesh", NODE)
            .primitive("vec3", Type::Float);
        let document = Document::parse("Mesh { vec3 {1, 2, 3} }", &vocabulary).unwrap();

        assert_eq!(document.to_string(), "Mesh {\n    vec3 { 1.0, 2.0, 3.0 }\n}\n");
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(rewrite("float[3] {}"), "float[3] {}\n");
        assert_eq!(rewrite(""), "");
    }
}
