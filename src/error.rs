use {crate::value::Kind, thiserror::Error};

/// Programming errors detected while turning a scene into assertions.
///
/// None of these are recoverable: a partially emitted test file would under-test the binding
/// while still passing.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Two different node paths rendered to the same variable name.
    #[error("identifier {ident} is used by both {first} and {second}")]
    DuplicateIdentifier {
        /// The colliding variable name.
        ident: String,
        /// The path which claimed the name first.
        first: String,
        /// The path which collided with it.
        second: String,
    },
    /// A field descriptor read a value of a different kind than it declares.
    #[error("field {subject}.{field} is declared {expected:?} but read {found:?}")]
    KindMismatch {
        /// Variable the field was read through.
        subject: String,
        /// Field name from the descriptor table.
        field: &'static str,
        /// Kind from the descriptor table.
        expected: Kind,
        /// Kind of the value actually read.
        found: Kind,
    },
    /// A native enum code has no symbolic name.
    #[error("unknown {ty} code {code}")]
    UnknownEnumCode {
        /// Dart enum type name.
        ty: &'static str,
        /// Offending native code.
        code: u32,
    },
}
