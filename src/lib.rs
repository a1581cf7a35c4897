//! Generates golden-value Dart tests for the `assimp` FFI binding.
//!
//! Sample models are imported into a [`Scene`], walked one [`RecordKind`] at a time into
//! [`EmissionUnit`]s of assertions, and assembled into one `<kind>_test.dart` file per kind.

pub mod assemble;
pub mod config;
pub mod emit;
pub mod import;
pub mod layout;
pub mod scene;
pub mod value;
pub mod walk;

mod error;

pub use self::{
    assemble::{Sink, TestFile, assemble, generate},
    config::{Config, Sample, TexelIndexing},
    emit::EmissionUnit,
    error::EmitError,
    import::{GltfImporter, Importer},
    scene::Scene,
    walk::RecordKind,
};
