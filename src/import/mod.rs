mod gltf;

pub use self::gltf::GltfImporter;

use {
    crate::scene::Scene,
    log::warn,
    std::{borrow::Cow, path::Path},
};

/// Loads a sample file into an owned [`Scene`].
///
/// Generation walks whatever the importer returns, so an implementation decides the exact shape
/// of the scene the generated tests pin down.
pub trait Importer {
    fn import(&self, path: &Path) -> anyhow::Result<Scene>;
}

/// Decodes bytes which should be UTF-8, replacing anything invalid.
pub(crate) fn lossy_utf8(bytes: &[u8], what: &str) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(str) => str.to_owned(),
        Cow::Owned(str) => {
            warn!("Invalid UTF-8 in {what}, replaced as {str:?}");

            str
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lossy_utf8_replaces_invalid_bytes() {
        assert_eq!(lossy_utf8(b"box.png", "uri"), "box.png");
        assert_eq!(lossy_utf8(b"bo\xffx", "uri"), "bo\u{fffd}x");
    }
}
