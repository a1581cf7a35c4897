use {
    super::Walker,
    crate::{
        emit::{Field, NodePath},
        error::EmitError,
        scene::{Animation, MeshAnim, MeshMorphAnim, NodeAnim, Scene},
        value::{Kind, Value},
    },
};

static ANIMATION: &[Field<Animation>] = &[
    Field {
        name: "name",
        kind: Kind::String,
        read: |animation: &Animation| Value::from(animation.name.as_str()),
    },
    Field {
        name: "duration",
        kind: Kind::Double,
        read: |animation: &Animation| Value::Double(animation.duration),
    },
    Field {
        name: "ticksPerSecond",
        kind: Kind::Double,
        read: |animation: &Animation| Value::Double(animation.ticks_per_second),
    },
    Field {
        name: "channels.length",
        kind: Kind::UInt,
        read: |animation: &Animation| Value::count(animation.channels.len()),
    },
];

static CHANNEL_HEAD: &[Field<NodeAnim>] = &[
    Field {
        name: "nodeName",
        kind: Kind::String,
        read: |channel: &NodeAnim| Value::from(channel.node_name.as_str()),
    },
    Field {
        name: "positionKeys.length",
        kind: Kind::UInt,
        read: |channel: &NodeAnim| Value::count(channel.position_keys.len()),
    },
    Field {
        name: "rotationKeys.length",
        kind: Kind::UInt,
        read: |channel: &NodeAnim| Value::count(channel.rotation_keys.len()),
    },
    Field {
        name: "scalingKeys.length",
        kind: Kind::UInt,
        read: |channel: &NodeAnim| Value::count(channel.scaling_keys.len()),
    },
];

static CHANNEL_TAIL: &[Field<NodeAnim>] = &[
    Field {
        name: "preState",
        kind: Kind::Enum,
        read: |channel: &NodeAnim| Value::symbol(channel.pre_state),
    },
    Field {
        name: "postState",
        kind: Kind::Enum,
        read: |channel: &NodeAnim| Value::symbol(channel.post_state),
    },
];

static MESH_CHANNEL: &[Field<MeshAnim>] = &[
    Field {
        name: "name",
        kind: Kind::String,
        read: |channel: &MeshAnim| Value::from(channel.name.as_str()),
    },
    Field {
        name: "keys.length",
        kind: Kind::UInt,
        read: |channel: &MeshAnim| Value::count(channel.keys.len()),
    },
];

static MORPH_CHANNEL: &[Field<MeshMorphAnim>] = &[
    Field {
        name: "name",
        kind: Kind::String,
        read: |channel: &MeshMorphAnim| Value::from(channel.name.as_str()),
    },
    Field {
        name: "keys.length",
        kind: Kind::UInt,
        read: |channel: &MeshMorphAnim| Value::count(channel.keys.len()),
    },
];

pub(super) fn walk(walker: &mut Walker, scene: &Scene) -> Result<(), EmitError> {
    walker.expect("animations", "length", Value::count(scene.animations.len()));

    for (animation_idx, animation) in scene.animations.iter().enumerate() {
        let path = NodePath::new().at("animation", animation_idx);
        let ident = walker.element(&path, "animations", animation_idx)?;

        walker.unit.fields(&ident, animation, ANIMATION)?;

        for (idx, channel) in animation.channels.iter().enumerate() {
            node_channel(walker, &path.at("channel", idx), &ident, idx, channel)?;
        }

        walker.unit.blank();
        walker.expect(
            &ident,
            "meshChannels.length",
            Value::count(animation.mesh_channels.len()),
        );

        for (channel_idx, channel) in animation.mesh_channels.iter().enumerate() {
            let path = path.at("meshChannel", channel_idx);
            let channel_ident = walker.element(
                &path,
                &format!("{ident}.meshChannels"),
                channel_idx,
            )?;

            walker.unit.fields(&channel_ident, channel, MESH_CHANNEL)?;

            for (key_idx, key) in channel.keys.iter().enumerate() {
                let key_ident = walker.bind(
                    &path.at("meshKey", key_idx),
                    format!("{channel_ident}.keys.elementAt({key_idx})"),
                )?;

                walker.expect(&key_ident, "time", Value::Double(key.time));
                walker.expect(&key_ident, "value", Value::UInt(key.value as _));
            }
        }

        walker.unit.blank();
        walker.expect(
            &ident,
            "morphMeshChannels.length",
            Value::count(animation.morph_mesh_channels.len()),
        );

        for (channel_idx, channel) in animation.morph_mesh_channels.iter().enumerate() {
            let path = path.at("morphMeshChannel", channel_idx);
            let channel_ident = walker.element(
                &path,
                &format!("{ident}.morphMeshChannels"),
                channel_idx,
            )?;

            walker.unit.fields(&channel_ident, channel, MORPH_CHANNEL)?;

            for (key_idx, key) in channel.keys.iter().enumerate() {
                let key_ident = walker.bind(
                    &path.at("morphMeshKey", key_idx),
                    format!("{channel_ident}.keys.elementAt({key_idx})"),
                )?;

                walker.expect(&key_ident, "time", Value::Double(key.time));
                walker.expect(
                    &key_ident,
                    "values",
                    Value::UIntList(key.values.iter().map(|&value| value as _).collect()),
                );
                walker.expect(&key_ident, "weights", Value::DoubleList(key.weights.clone()));
            }
        }
    }

    Ok(())
}

fn node_channel(
    walker: &mut Walker,
    path: &NodePath,
    animation: &str,
    idx: usize,
    channel: &NodeAnim,
) -> Result<(), EmitError> {
    let ident = walker.element(path, &format!("{animation}.channels"), idx)?;

    walker.unit.fields(&ident, channel, CHANNEL_HEAD)?;

    for (key_idx, key) in channel.position_keys.iter().enumerate() {
        let key_ident = walker.bind(
            &path.at("positionKey", key_idx),
            format!("{ident}.positionKeys.elementAt({key_idx})"),
        )?;

        walker.expect(&key_ident, "time", Value::Double(key.time));
        walker.expect(&key_ident, "value", Value::Vector3(key.value));
    }

    for (key_idx, key) in channel.rotation_keys.iter().enumerate() {
        let key_ident = walker.bind(
            &path.at("rotationKey", key_idx),
            format!("{ident}.rotationKeys.elementAt({key_idx})"),
        )?;

        walker.expect(&key_ident, "time", Value::Double(key.time));
        walker.expect(&key_ident, "value", Value::Quaternion(key.value));
    }

    for (key_idx, key) in channel.scaling_keys.iter().enumerate() {
        let key_ident = walker.bind(
            &path.at("scalingKey", key_idx),
            format!("{ident}.scalingKeys.elementAt({key_idx})"),
        )?;

        walker.expect(&key_ident, "time", Value::Double(key.time));
        walker.expect(&key_ident, "value", Value::Vector3(key.value));
    }

    walker.unit.fields(&ident, channel, CHANNEL_TAIL)
}
