use {
    super::Walker,
    crate::{
        emit::{Field, NodePath},
        error::EmitError,
        scene::{Light, Scene},
        value::{Kind, Value},
    },
};

static FIELDS: &[Field<Light>] = &[
    Field {
        name: "name",
        kind: Kind::String,
        read: |light: &Light| Value::from(light.name.as_str()),
    },
    Field {
        name: "type",
        kind: Kind::Enum,
        read: |light: &Light| Value::symbol(light.ty),
    },
    Field {
        name: "position",
        kind: Kind::Vector3,
        read: |light: &Light| Value::Vector3(light.position),
    },
    Field {
        name: "direction",
        kind: Kind::Vector3,
        read: |light: &Light| Value::Vector3(light.direction),
    },
    Field {
        name: "up",
        kind: Kind::Vector3,
        read: |light: &Light| Value::Vector3(light.up),
    },
    Field {
        name: "attenuationConstant",
        kind: Kind::Float,
        read: |light: &Light| Value::Float(light.attenuation_constant),
    },
    Field {
        name: "attenuationLinear",
        kind: Kind::Float,
        read: |light: &Light| Value::Float(light.attenuation_linear),
    },
    Field {
        name: "attenuationQuadratic",
        kind: Kind::Float,
        read: |light: &Light| Value::Float(light.attenuation_quadratic),
    },
    Field {
        name: "colorDiffuse",
        kind: Kind::Color3,
        read: |light: &Light| Value::Color3(light.color_diffuse),
    },
    Field {
        name: "colorSpecular",
        kind: Kind::Color3,
        read: |light: &Light| Value::Color3(light.color_specular),
    },
    Field {
        name: "colorAmbient",
        kind: Kind::Color3,
        read: |light: &Light| Value::Color3(light.color_ambient),
    },
    Field {
        name: "angleInnerCone",
        kind: Kind::Float,
        read: |light: &Light| Value::Float(light.angle_inner_cone),
    },
    Field {
        name: "angleOuterCone",
        kind: Kind::Float,
        read: |light: &Light| Value::Float(light.angle_outer_cone),
    },
    Field {
        name: "size",
        kind: Kind::Vector2,
        read: |light: &Light| Value::Vector2(light.size),
    },
];

pub(super) fn walk(walker: &mut Walker, scene: &Scene) -> Result<(), EmitError> {
    walker.expect("lights", "length", Value::count(scene.lights.len()));

    for (idx, light) in scene.lights.iter().enumerate() {
        let ident = walker.element(&NodePath::new().at("light", idx), "lights", idx)?;
        walker.unit.fields(&ident, light, FIELDS)?;
    }

    Ok(())
}
