use {
    super::Walker,
    crate::{
        emit::{Field, NodePath},
        error::EmitError,
        scene::{Camera, Scene},
        value::{Kind, Value},
    },
};

static FIELDS: &[Field<Camera>] = &[
    Field {
        name: "name",
        kind: Kind::String,
        read: |camera: &Camera| Value::from(camera.name.as_str()),
    },
    Field {
        name: "position",
        kind: Kind::Vector3,
        read: |camera: &Camera| Value::Vector3(camera.position),
    },
    Field {
        name: "up",
        kind: Kind::Vector3,
        read: |camera: &Camera| Value::Vector3(camera.up),
    },
    Field {
        name: "lookAt",
        kind: Kind::Vector3,
        read: |camera: &Camera| Value::Vector3(camera.look_at),
    },
    Field {
        name: "horizontalFOV",
        kind: Kind::Float,
        read: |camera: &Camera| Value::Float(camera.horizontal_fov),
    },
    Field {
        name: "clipPlaneNear",
        kind: Kind::Float,
        read: |camera: &Camera| Value::Float(camera.clip_plane_near),
    },
    Field {
        name: "clipPlaneFar",
        kind: Kind::Float,
        read: |camera: &Camera| Value::Float(camera.clip_plane_far),
    },
    Field {
        name: "aspect",
        kind: Kind::Float,
        read: |camera: &Camera| Value::Float(camera.aspect),
    },
    Field {
        name: "orthographicWidth",
        kind: Kind::Float,
        read: |camera: &Camera| Value::Float(camera.orthographic_width),
    },
];

pub(super) fn walk(walker: &mut Walker, scene: &Scene) -> Result<(), EmitError> {
    walker.expect("cameras", "length", Value::count(scene.cameras.len()));

    for (idx, camera) in scene.cameras.iter().enumerate() {
        let ident = walker.element(&NodePath::new().at("camera", idx), "cameras", idx)?;
        walker.unit.fields(&ident, camera, FIELDS)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{config::TexelIndexing, walk::RecordKind},
        glam::Vec3,
    };

    #[test]
    fn one_assertion_per_field() {
        let scene = Scene::default().with_cameras(vec![
            Camera {
                name: "persp".to_owned(),
                up: Vec3::Y,
                look_at: Vec3::NEG_Z,
                horizontal_fov: 0.7,
                clip_plane_near: 0.01,
                clip_plane_far: 100.0,
                aspect: 1.5,
                ..Default::default()
            },
            Camera::default(),
        ]);
        let lines = RecordKind::Camera
            .walk("cameras.gltf", &scene, TexelIndexing::Legacy)
            .unwrap()
            .assertions()
            .iter()
            .map(|record| record.render())
            .collect::<Vec<_>>();

        assert_eq!(lines.len(), 1 + 2 * FIELDS.len());
        assert_eq!(lines[1], "expect(camera_0.name, equals('persp'));");
        assert_eq!(lines[3], "expect(camera_0.up, vector3Equals(Vector3(0.0, 1.0, 0.0)));");
        assert_eq!(lines[5], "expect(camera_0.horizontalFOV, floatEquals(0.699999988));");
        assert_eq!(lines[6], "expect(camera_0.clipPlaneNear, floatEquals(0.00999999978));");
        assert_eq!(lines[9], "expect(camera_0.orthographicWidth, isZero);");
        assert_eq!(lines[10], "expect(camera_1.name, isEmpty);");
    }
}
