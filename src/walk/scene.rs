use {
    super::Walker,
    crate::{
        emit::{EmissionUnit, Field},
        error::EmitError,
        scene::Scene,
        value::{Kind, Value},
    },
};

static FIELDS: &[Field<Scene>] = &[
    Field {
        name: "flags",
        kind: Kind::UInt,
        read: |scene: &Scene| Value::UInt(scene.flags.bits() as _),
    },
    Field {
        name: "rootNode",
        kind: Kind::Pointer,
        read: |scene: &Scene| Value::Pointer(scene.root().is_some()),
    },
    Field {
        name: "meshes.length",
        kind: Kind::UInt,
        read: |scene: &Scene| Value::count(scene.meshes.len()),
    },
    Field {
        name: "materials.length",
        kind: Kind::UInt,
        read: |scene: &Scene| Value::count(scene.materials.len()),
    },
    Field {
        name: "animations.length",
        kind: Kind::UInt,
        read: |scene: &Scene| Value::count(scene.animations.len()),
    },
    Field {
        name: "textures.length",
        kind: Kind::UInt,
        read: |scene: &Scene| Value::count(scene.textures.len()),
    },
    Field {
        name: "lights.length",
        kind: Kind::UInt,
        read: |scene: &Scene| Value::count(scene.lights.len()),
    },
    Field {
        name: "cameras.length",
        kind: Kind::UInt,
        read: |scene: &Scene| Value::count(scene.cameras.len()),
    },
    Field {
        name: "metaData",
        kind: Kind::Pointer,
        read: |scene: &Scene| Value::Pointer(scene.metadata.is_some()),
    },
];

/// An absent scene reads as zero flags, null pointers and empty collections.
pub(super) fn baseline(unit: &mut EmissionUnit) {
    let none = Scene::default();

    unit.expect("scene", "flags", &Value::UInt(none.flags.bits() as _));
    unit.expect("scene", "rootNode", &Value::Pointer(false));

    for collection in [
        "meshes",
        "materials",
        "animations",
        "textures",
        "lights",
        "cameras",
    ] {
        unit.expect("scene", collection, &Value::Length(0));
    }

    unit.expect("scene", "metaData", &Value::Pointer(false));
}

pub(super) fn walk(walker: &mut Walker, scene: &Scene) -> Result<(), EmitError> {
    walker.unit.fields("scene", scene, FIELDS)
}
