use {
    super::Walker,
    crate::{
        emit::{Field, NodePath},
        error::EmitError,
        scene::{Scene, Texture},
        value::{Kind, Value},
    },
};

static FIELDS: &[Field<Texture>] = &[
    Field {
        name: "width",
        kind: Kind::UInt,
        read: |texture: &Texture| Value::UInt(texture.width as _),
    },
    Field {
        name: "height",
        kind: Kind::UInt,
        read: |texture: &Texture| Value::UInt(texture.height as _),
    },
    Field {
        name: "data.length",
        kind: Kind::UInt,
        read: |texture: &Texture| Value::count(texture.texel_count()),
    },
    Field {
        name: "formatHint",
        kind: Kind::String,
        read: |texture: &Texture| Value::from(texture.format_hint.as_str()),
    },
    Field {
        name: "filename",
        kind: Kind::String,
        read: |texture: &Texture| Value::from(texture.filename.as_str()),
    },
];

/// Walks each texture and then every texel position, row by row.
///
/// The texel read at each position depends on the configured indexing; positions whose index
/// falls outside the texel data assert that the read throws.
pub(super) fn walk(walker: &mut Walker, scene: &Scene) -> Result<(), EmitError> {
    walker.expect("textures", "length", Value::count(scene.textures.len()));

    for (texture_idx, texture) in scene.textures.iter().enumerate() {
        let path = NodePath::new().at("texture", texture_idx);
        let ident = walker.element(&path, "textures", texture_idx)?;

        walker.unit.fields(&ident, texture, FIELDS)?;

        let width = texture.width as usize;
        let len = texture.texel_count().min(texture.texels.len());

        for row in 0..texture.height as usize {
            for col in 0..width {
                let idx = walker.texel_indexing.index(row, col, width);
                let texel = texture.texels.get(idx).filter(|_| idx < len);

                for (channel, value) in [
                    ("b", texel.map(|texel| texel.b)),
                    ("g", texel.map(|texel| texel.g)),
                    ("r", texel.map(|texel| texel.r)),
                    ("a", texel.map(|texel| texel.a)),
                ] {
                    let field = format!("data.elementAt({idx}).{channel}");
                    let value = match value {
                        Some(value) => Value::UInt(value as _),
                        None => Value::Throws("RangeError"),
                    };

                    walker.expect(&ident, &field, value);
                }
            }
        }
    }

    Ok(())
}
