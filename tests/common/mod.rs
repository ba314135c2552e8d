//! OpenGEX 1.1 vocabulary and schema shared by the integration tests.

#![allow(dead_code)]

use openddl::{
    ChildRule, Identifier, PrimitiveRule, PropertyRule, Schema, StructureRule, Type, Vocabulary,
};

pub const ANIMATION: Identifier = 0;
pub const ATTEN: Identifier = 1;
pub const BONE_COUNT_ARRAY: Identifier = 2;
pub const BONE_INDEX_ARRAY: Identifier = 3;
pub const BONE_NODE: Identifier = 4;
pub const BONE_REF_ARRAY: Identifier = 5;
pub const BONE_WEIGHT_ARRAY: Identifier = 6;
pub const CAMERA_NODE: Identifier = 7;
pub const CAMERA_OBJECT: Identifier = 8;
pub const CLIP: Identifier = 9;
pub const COLOR: Identifier = 10;
pub const EXTENSION: Identifier = 11;
pub const GEOMETRY_NODE: Identifier = 12;
pub const GEOMETRY_OBJECT: Identifier = 13;
pub const INDEX_ARRAY: Identifier = 14;
pub const KEY: Identifier = 15;
pub const LIGHT_NODE: Identifier = 16;
pub const LIGHT_OBJECT: Identifier = 17;
pub const MATERIAL: Identifier = 18;
pub const MATERIAL_REF: Identifier = 19;
pub const MESH: Identifier = 20;
pub const METRIC: Identifier = 21;
pub const MORPH: Identifier = 22;
pub const MORPH_WEIGHT: Identifier = 23;
pub const NAME: Identifier = 24;
pub const NODE: Identifier = 25;
pub const OBJECT_REF: Identifier = 26;
pub const PARAM: Identifier = 27;
pub const ROTATION: Identifier = 28;
pub const SCALE: Identifier = 29;
pub const SKELETON: Identifier = 30;
pub const SKIN: Identifier = 31;
pub const TEXTURE: Identifier = 32;
pub const TIME: Identifier = 33;
pub const TRACK: Identifier = 34;
pub const TRANSFORM: Identifier = 35;
pub const TRANSLATION: Identifier = 36;
pub const VALUE: Identifier = 37;
pub const VERTEX_ARRAY: Identifier = 38;

pub const APPLIC: Identifier = 0;
pub const ATTRIB: Identifier = 1;
pub const BEGIN: Identifier = 2;
pub const CLIP_INDEX: Identifier = 3;
pub const CURVE: Identifier = 4;
pub const END: Identifier = 5;
pub const FRONT: Identifier = 6;
pub const INDEX: Identifier = 7;
pub const KEY_NAME: Identifier = 8;
pub const KIND: Identifier = 9;
pub const LOD: Identifier = 10;
pub const MATERIAL_INDEX: Identifier = 11;
pub const MORPH_INDEX: Identifier = 12;
pub const MOTION_BLUR: Identifier = 13;
pub const OBJECT: Identifier = 14;
pub const PRIMITIVE: Identifier = 15;
pub const RESTART: Identifier = 16;
pub const SHADOW: Identifier = 17;
pub const TARGET: Identifier = 18;
pub const TEXCOORD: Identifier = 19;
pub const TWO_SIDED: Identifier = 20;
pub const TYPE: Identifier = 21;
pub const VISIBLE: Identifier = 22;

const STRUCTURES: &[(&str, Identifier)] = &[
    ("Animation", ANIMATION),
    ("Atten", ATTEN),
    ("BoneCountArray", BONE_COUNT_ARRAY),
    ("BoneIndexArray", BONE_INDEX_ARRAY),
    ("BoneNode", BONE_NODE),
    ("BoneRefArray", BONE_REF_ARRAY),
    ("BoneWeightArray", BONE_WEIGHT_ARRAY),
    ("CameraNode", CAMERA_NODE),
    ("CameraObject", CAMERA_OBJECT),
    ("Clip", CLIP),
    ("Color", COLOR),
    ("Extension", EXTENSION),
    ("GeometryNode", GEOMETRY_NODE),
    ("GeometryObject", GEOMETRY_OBJECT),
    ("IndexArray", INDEX_ARRAY),
    ("Key", KEY),
    ("LightNode", LIGHT_NODE),
    ("LightObject", LIGHT_OBJECT),
    ("Material", MATERIAL),
    ("MaterialRef", MATERIAL_REF),
    ("Mesh", MESH),
    ("Metric", METRIC),
    ("Morph", MORPH),
    ("MorphWeight", MORPH_WEIGHT),
    ("Name", NAME),
    ("Node", NODE),
    ("ObjectRef", OBJECT_REF),
    ("Param", PARAM),
    ("Rotation", ROTATION),
    ("Scale", SCALE),
    ("Skeleton", SKELETON),
    ("Skin", SKIN),
    ("Texture", TEXTURE),
    ("Time", TIME),
    ("Track", TRACK),
    ("Transform", TRANSFORM),
    ("Translation", TRANSLATION),
    ("Value", VALUE),
    ("VertexArray", VERTEX_ARRAY),
];

const PROPERTIES: &[(&str, Identifier)] = &[
    ("applic", APPLIC),
    ("attrib", ATTRIB),
    ("begin", BEGIN),
    ("clip", CLIP_INDEX),
    ("curve", CURVE),
    ("end", END),
    ("front", FRONT),
    ("index", INDEX),
    ("key", KEY_NAME),
    ("kind", KIND),
    ("lod", LOD),
    ("material", MATERIAL_INDEX),
    ("morph", MORPH_INDEX),
    ("motion_blur", MOTION_BLUR),
    ("object", OBJECT),
    ("primitive", PRIMITIVE),
    ("restart", RESTART),
    ("shadow", SHADOW),
    ("target", TARGET),
    ("texcoord", TEXCOORD),
    ("two_sided", TWO_SIDED),
    ("type", TYPE),
    ("visible", VISIBLE),
];

/// Install a test logger; repeated calls are harmless.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}

pub fn vocabulary() -> Vocabulary {
    let vocabulary = STRUCTURES
        .iter()
        .fold(Vocabulary::new(), |v, &(name, id)| v.structure(name, id));
    PROPERTIES
        .iter()
        .fold(vocabulary, |v, &(name, id)| v.property(name, id))
}

/// Children every node kind accepts, after its own specific ones.
fn node_children(rule: StructureRule) -> StructureRule {
    [
        TRANSFORM,
        TRANSLATION,
        ROTATION,
        SCALE,
        ANIMATION,
        NODE,
        BONE_NODE,
        GEOMETRY_NODE,
        CAMERA_NODE,
        LIGHT_NODE,
        EXTENSION,
    ]
    .into_iter()
    .fold(rule, |rule, id| rule.child(ChildRule::any(id)))
}

fn unsigned_integers() -> PrimitiveRule {
    PrimitiveRule::new([
        Type::UnsignedByte,
        Type::UnsignedShort,
        Type::UnsignedInt,
        Type::UnsignedLong,
    ])
}

fn floats() -> PrimitiveRule {
    PrimitiveRule::new([Type::Float])
}

fn single(rule: PrimitiveRule) -> PrimitiveRule {
    rule.with_count(1)
}

fn single_value(rule: PrimitiveRule) -> PrimitiveRule {
    rule.with_count(1).with_min_array_size(1)
}

fn extension_only() -> StructureRule {
    StructureRule::new().child(ChildRule::any(EXTENSION))
}

fn transform_like() -> StructureRule {
    extension_only()
        .property(PropertyRule::optional(KIND, Type::String))
        .property(PropertyRule::optional(OBJECT, Type::Bool))
        .primitives(single(floats()))
}

pub fn schema() -> Schema {
    let roots = [
        BONE_NODE,
        CAMERA_NODE,
        CAMERA_OBJECT,
        CLIP,
        EXTENSION,
        GEOMETRY_NODE,
        GEOMETRY_OBJECT,
        LIGHT_NODE,
        LIGHT_OBJECT,
        MATERIAL,
        METRIC,
        NODE,
    ];
    let schema = roots
        .into_iter()
        .fold(Schema::new(), |schema, id| schema.root(ChildRule::any(id)));

    schema
        .structure(
            ANIMATION,
            StructureRule::new()
                .property(PropertyRule::optional(CLIP_INDEX, Type::UnsignedInt))
                .property(PropertyRule::optional(BEGIN, Type::Float))
                .property(PropertyRule::optional(END, Type::Float))
                .child(ChildRule::at_least(TRACK, 1))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            ATTEN,
            StructureRule::new()
                .property(PropertyRule::optional(KIND, Type::String))
                .property(PropertyRule::optional(CURVE, Type::String))
                .child(ChildRule::any(PARAM))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(BONE_COUNT_ARRAY, extension_only().primitives(single(unsigned_integers())))
        .structure(BONE_INDEX_ARRAY, extension_only().primitives(single(unsigned_integers())))
        .structure(
            BONE_NODE,
            node_children(StructureRule::new().child(ChildRule::optional(NAME))),
        )
        .structure(
            BONE_REF_ARRAY,
            extension_only().primitives(single(PrimitiveRule::new([Type::Reference]))),
        )
        .structure(BONE_WEIGHT_ARRAY, extension_only().primitives(single(floats())))
        .structure(
            CAMERA_NODE,
            node_children(
                StructureRule::new()
                    .child(ChildRule::optional(NAME))
                    .child(ChildRule::exactly(OBJECT_REF, 1)),
            ),
        )
        .structure(
            CAMERA_OBJECT,
            StructureRule::new()
                .child(ChildRule::any(PARAM))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            CLIP,
            StructureRule::new()
                .property(PropertyRule::optional(INDEX, Type::UnsignedInt))
                .child(ChildRule::optional(NAME))
                .child(ChildRule::any(PARAM))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            COLOR,
            extension_only()
                .property(PropertyRule::required(ATTRIB, Type::String))
                .primitives(single(floats())),
        )
        .structure(
            EXTENSION,
            extension_only()
                .property(PropertyRule::optional(APPLIC, Type::String))
                .property(PropertyRule::required(TYPE, Type::String))
                .primitives(PrimitiveRule::new(Type::primitives().iter().copied())),
        )
        .structure(
            GEOMETRY_NODE,
            node_children(
                StructureRule::new()
                    .property(PropertyRule::optional(VISIBLE, Type::Bool))
                    .property(PropertyRule::optional(SHADOW, Type::Bool))
                    .property(PropertyRule::optional(MOTION_BLUR, Type::Bool))
                    .child(ChildRule::optional(NAME))
                    .child(ChildRule::exactly(OBJECT_REF, 1))
                    .child(ChildRule::any(MATERIAL_REF))
                    .child(ChildRule::any(MORPH_WEIGHT)),
            ),
        )
        .structure(
            GEOMETRY_OBJECT,
            StructureRule::new()
                .property(PropertyRule::optional(VISIBLE, Type::Bool))
                .property(PropertyRule::optional(SHADOW, Type::Bool))
                .property(PropertyRule::optional(MOTION_BLUR, Type::Bool))
                .child(ChildRule::at_least(MESH, 1))
                .child(ChildRule::any(MORPH))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            INDEX_ARRAY,
            extension_only()
                .property(PropertyRule::optional(MATERIAL_INDEX, Type::UnsignedInt))
                .property(PropertyRule::optional(RESTART, Type::UnsignedLong))
                .property(PropertyRule::optional(FRONT, Type::String))
                .primitives(single(unsigned_integers())),
        )
        .structure(
            KEY,
            extension_only()
                .property(PropertyRule::optional(KIND, Type::String))
                .primitives(single(floats())),
        )
        .structure(
            LIGHT_NODE,
            node_children(
                StructureRule::new()
                    .property(PropertyRule::optional(SHADOW, Type::Bool))
                    .child(ChildRule::optional(NAME))
                    .child(ChildRule::exactly(OBJECT_REF, 1)),
            ),
        )
        .structure(
            LIGHT_OBJECT,
            StructureRule::new()
                .property(PropertyRule::required(TYPE, Type::String))
                .property(PropertyRule::optional(SHADOW, Type::Bool))
                .child(ChildRule::optional(COLOR))
                .child(ChildRule::optional(PARAM))
                .child(ChildRule::optional(TEXTURE))
                .child(ChildRule::any(ATTEN))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            MATERIAL,
            StructureRule::new()
                .property(PropertyRule::optional(TWO_SIDED, Type::Bool))
                .child(ChildRule::optional(NAME))
                .child(ChildRule::any(COLOR))
                .child(ChildRule::any(PARAM))
                .child(ChildRule::any(TEXTURE))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            MATERIAL_REF,
            extension_only()
                .property(PropertyRule::optional(INDEX, Type::UnsignedInt))
                .primitives(single_value(PrimitiveRule::new([Type::Reference]))),
        )
        .structure(
            MESH,
            StructureRule::new()
                .property(PropertyRule::optional(LOD, Type::UnsignedInt))
                .property(PropertyRule::optional(PRIMITIVE, Type::String))
                .child(ChildRule::at_least(VERTEX_ARRAY, 1))
                .child(ChildRule::any(INDEX_ARRAY))
                .child(ChildRule::optional(SKIN))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            METRIC,
            extension_only()
                .property(PropertyRule::required(KEY_NAME, Type::String))
                .primitives(single_value(PrimitiveRule::new([Type::Float, Type::String]))),
        )
        .structure(
            MORPH,
            StructureRule::new()
                .property(PropertyRule::optional(INDEX, Type::UnsignedInt))
                .child(ChildRule::optional(NAME))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            MORPH_WEIGHT,
            extension_only()
                .property(PropertyRule::optional(INDEX, Type::UnsignedInt))
                .primitives(single_value(floats())),
        )
        .structure(
            NAME,
            extension_only().primitives(single_value(PrimitiveRule::new([Type::String]))),
        )
        .structure(
            NODE,
            node_children(StructureRule::new().child(ChildRule::optional(NAME))),
        )
        .structure(
            OBJECT_REF,
            extension_only().primitives(single_value(PrimitiveRule::new([Type::Reference]))),
        )
        .structure(
            PARAM,
            extension_only()
                .property(PropertyRule::required(ATTRIB, Type::String))
                .primitives(single_value(floats())),
        )
        .structure(ROTATION, transform_like())
        .structure(SCALE, transform_like())
        .structure(
            SKELETON,
            StructureRule::new()
                .child(ChildRule::exactly(BONE_REF_ARRAY, 1))
                .child(ChildRule::exactly(TRANSFORM, 1))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            SKIN,
            StructureRule::new()
                .child(ChildRule::optional(TRANSFORM))
                .child(ChildRule::exactly(SKELETON, 1))
                .child(ChildRule::exactly(BONE_COUNT_ARRAY, 1))
                .child(ChildRule::exactly(BONE_INDEX_ARRAY, 1))
                .child(ChildRule::exactly(BONE_WEIGHT_ARRAY, 1))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            TEXTURE,
            StructureRule::new()
                .property(PropertyRule::required(ATTRIB, Type::String))
                .property(PropertyRule::optional(TEXCOORD, Type::UnsignedInt))
                .primitives(single_value(PrimitiveRule::new([Type::String])))
                .child(ChildRule::any(TRANSFORM))
                .child(ChildRule::any(TRANSLATION))
                .child(ChildRule::any(ROTATION))
                .child(ChildRule::any(SCALE))
                .child(ChildRule::any(ANIMATION))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            TIME,
            StructureRule::new()
                .property(PropertyRule::optional(CURVE, Type::String))
                .child(ChildRule::new(KEY, 1, 3))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            TRACK,
            StructureRule::new()
                .property(PropertyRule::required(TARGET, Type::Reference))
                .child(ChildRule::exactly(TIME, 1))
                .child(ChildRule::exactly(VALUE, 1))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            TRANSFORM,
            extension_only()
                .property(PropertyRule::optional(OBJECT, Type::Bool))
                .primitives(single(floats())),
        )
        .structure(TRANSLATION, transform_like())
        .structure(
            VALUE,
            StructureRule::new()
                .property(PropertyRule::optional(CURVE, Type::String))
                .child(ChildRule::new(KEY, 1, 4))
                .child(ChildRule::any(EXTENSION)),
        )
        .structure(
            VERTEX_ARRAY,
            extension_only()
                .property(PropertyRule::required(ATTRIB, Type::String))
                .property(PropertyRule::optional(MORPH_INDEX, Type::UnsignedInt))
                .primitives(single(PrimitiveRule::new([Type::Float, Type::Double]))),
        )
}
