//! Renders typed field values as Dart `package:test` matchers.

use {
    crate::scene::Aabb,
    glam::{Mat4, Quat, Vec2, Vec3, Vec4},
    std::fmt::Write,
};

/// Significant digits used for every floating point literal.
pub const SIGNIFICANT_DIGITS: usize = 9;

/// Single precision values at or below this magnitude are treated as zero.
pub const FUZZY_ZERO_F32: f32 = 0.00001;

/// Double precision values at or below this magnitude are treated as zero.
pub const FUZZY_ZERO_F64: f64 = 0.000000000001;

/// How an emitted assertion compares the actual value with the expected one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Comparison {
    /// `equals(..)` of an exact literal.
    Exact,
    /// `isZero`, `isEmpty`, `isNull` and friends.
    Sentinel,
    /// A matcher which allows for floating point error.
    Tolerance,
    /// `isA<T>()` or a regular expression match.
    Pattern,
    /// The access itself is expected to throw.
    Throws,
}

/// The semantic kind of a [`Value`], used by field descriptor tables.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Int,
    UInt,
    Float,
    Double,
    Bool,
    String,
    Bytes,
    Vector2,
    Vector3,
    Matrix4,
    Quaternion,
    Color3,
    Color4,
    Aabb,
    Enum,
    Length,
    Pointer,
    Presence,
    IntList,
    UIntList,
    FloatList,
    DoubleList,
    StringList,
    TypeIs,
    Pattern,
    Throws,
}

/// Native enums which render as a Dart enum symbol, such as `AnimBehaviour.constant`.
pub trait Symbol: Copy {
    /// The Dart enum type.
    const TYPE_NAME: &'static str;

    /// The Dart enum member.
    fn symbol(self) -> &'static str;
}

/// A field value observed in a scene.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    Vector2(Vec2),
    Vector3(Vec3),
    Matrix4(Mat4),
    Quaternion(Quat),
    Color3(Vec3),
    Color4(Vec4),
    Aabb(Aabb),
    Enum {
        ty: &'static str,
        symbol: &'static str,
    },
    /// The length of a whole collection.
    Length(usize),
    /// Presence of a raw pointer field.
    Pointer(bool),
    /// Presence of a wrapped (nullable) object.
    Presence(bool),
    IntList(Vec<i64>),
    UIntList(Vec<u64>),
    FloatList(Vec<f32>),
    DoubleList(Vec<f64>),
    StringList(Vec<String>),
    /// The runtime type of the actual value, such as `String` or `List<double>`.
    TypeIs(&'static str),
    /// A regular expression the actual value must match.
    Pattern(String),
    /// The name of the error type thrown by the access, such as `RangeError`.
    Throws(&'static str),
}

impl Value {
    /// A collection length.
    pub fn count(len: usize) -> Self {
        Self::UInt(len as _)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Int(_) => Kind::Int,
            Self::UInt(_) => Kind::UInt,
            Self::Float(_) => Kind::Float,
            Self::Double(_) => Kind::Double,
            Self::Bool(_) => Kind::Bool,
            Self::String(_) => Kind::String,
            Self::Bytes(_) => Kind::Bytes,
            Self::Vector2(_) => Kind::Vector2,
            Self::Vector3(_) => Kind::Vector3,
            Self::Matrix4(_) => Kind::Matrix4,
            Self::Quaternion(_) => Kind::Quaternion,
            Self::Color3(_) => Kind::Color3,
            Self::Color4(_) => Kind::Color4,
            Self::Aabb(_) => Kind::Aabb,
            Self::Enum { .. } => Kind::Enum,
            Self::Length(_) => Kind::Length,
            Self::Pointer(_) => Kind::Pointer,
            Self::Presence(_) => Kind::Presence,
            Self::IntList(_) => Kind::IntList,
            Self::UIntList(_) => Kind::UIntList,
            Self::FloatList(_) => Kind::FloatList,
            Self::DoubleList(_) => Kind::DoubleList,
            Self::StringList(_) => Kind::StringList,
            Self::TypeIs(_) => Kind::TypeIs,
            Self::Pattern(_) => Kind::Pattern,
            Self::Throws(_) => Kind::Throws,
        }
    }

    /// The Dart matcher asserting this value, and how it compares.
    pub fn matcher(&self) -> (String, Comparison) {
        use Comparison::*;

        match self {
            Self::Int(0) | Self::UInt(0) => ("isZero".to_owned(), Sentinel),
            Self::Int(val) => (format!("equals({val})"), Exact),
            Self::UInt(val) => (format!("equals({val})"), Exact),
            Self::Float(val) if is_fuzzy_zero_f32(*val) => ("isZero".to_owned(), Sentinel),
            Self::Float(val) => (format!("floatEquals({})", float_literal(*val as _)), Tolerance),
            Self::Double(val) if is_fuzzy_zero_f64(*val) => ("isZero".to_owned(), Sentinel),
            Self::Double(val) => (format!("floatEquals({})", float_literal(*val)), Tolerance),
            Self::Bool(true) => ("isTrue".to_owned(), Exact),
            Self::Bool(false) => ("isFalse".to_owned(), Exact),
            Self::String(val) if val.is_empty() => ("isEmpty".to_owned(), Sentinel),
            Self::String(val) => (format!("equals({})", string_literal(val)), Exact),
            Self::Bytes(val) if val.is_empty() => ("isEmpty".to_owned(), Sentinel),
            Self::Bytes(val) => (format!("equals({})", list_literal(val, u8::to_string)), Exact),
            Self::Vector2(val) => (format!("vector2Equals({})", vector2_literal(*val)), Tolerance),
            Self::Vector3(val) => (format!("vector3Equals({})", vector3_literal(*val)), Tolerance),
            Self::Matrix4(val) => (format!("matrix4Equals({})", matrix4_literal(val)), Tolerance),
            Self::Quaternion(val) => (
                format!(
                    "quaternionEquals(Quaternion({}))",
                    components(&val.to_array())
                ),
                Tolerance,
            ),
            Self::Color3(val) => (
                format!("color3Equals(Color3({}))", components(&val.to_array())),
                Tolerance,
            ),
            Self::Color4(val) => (
                format!("color4Equals(Color4({}))", components(&val.to_array())),
                Tolerance,
            ),
            Self::Aabb(val) => (
                format!(
                    "aabbEquals(Aabb3.minMax({}, {}))",
                    vector3_literal(val.min),
                    vector3_literal(val.max)
                ),
                Tolerance,
            ),
            Self::Enum { ty, symbol } => (format!("equals({ty}.{symbol})"), Exact),
            Self::Length(0) => ("isEmpty".to_owned(), Sentinel),
            Self::Length(len) => (format!("hasLength({len})"), Exact),
            Self::Pointer(true) | Self::Presence(true) => ("isNotNull".to_owned(), Sentinel),
            Self::Pointer(false) => ("isNullPointer".to_owned(), Sentinel),
            Self::Presence(false) => ("isNull".to_owned(), Sentinel),
            Self::IntList(val) => (format!("equals({})", list_literal(val, i64::to_string)), Exact),
            Self::UIntList(val) => (format!("equals({})", list_literal(val, u64::to_string)), Exact),
            Self::FloatList(val) if val.is_empty() => ("equals([])".to_owned(), Exact),
            Self::FloatList(val) => (
                format!(
                    "floatListEquals({})",
                    list_literal(val, |val| float_literal(*val as _))
                ),
                Tolerance,
            ),
            Self::DoubleList(val) if val.is_empty() => ("equals([])".to_owned(), Exact),
            Self::DoubleList(val) => (
                format!("floatListEquals({})", list_literal(val, |val| float_literal(*val))),
                Tolerance,
            ),
            Self::StringList(val) if val.is_empty() => ("isEmpty".to_owned(), Sentinel),
            Self::StringList(val) => (
                format!("equals({})", list_literal(val, |val| string_literal(val))),
                Exact,
            ),
            Self::TypeIs(ty) => (format!("isA<{ty}>()"), Pattern),
            Self::Pattern(regex) => (format!("matches({})", string_literal(regex)), Pattern),
            Self::Throws(error) => (format!("throws{error}"), Throws),
        }
    }

    pub fn symbol<T: Symbol>(val: T) -> Self {
        Self::Enum {
            ty: T::TYPE_NAME,
            symbol: val.symbol(),
        }
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Self::String(val.to_owned())
    }
}

impl From<f32> for Value {
    fn from(val: f32) -> Self {
        Self::Float(val)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Self::Double(val)
    }
}

impl From<Mat4> for Value {
    fn from(val: Mat4) -> Self {
        Self::Matrix4(val)
    }
}

impl From<Vec3> for Value {
    fn from(val: Vec3) -> Self {
        Self::Vector3(val)
    }
}

/// Renders a float component; fuzzy zeros become `0.0` so that `-0.0` and denormal noise do
/// not leak into the generated source.
fn component_literal(val: f32) -> String {
    if is_fuzzy_zero_f32(val) {
        "0.0".to_owned()
    } else {
        float_literal(val as _)
    }
}

fn components(vals: &[f32]) -> String {
    vals.iter()
        .map(|val| component_literal(*val))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders `val` with [`SIGNIFICANT_DIGITS`] significant digits as a valid Dart double literal.
///
/// Positional notation is used for decimal exponents in `-4..SIGNIFICANT_DIGITS`, like C's `%g`;
/// trailing zeros are dropped but at least one fractional digit is kept.
pub fn float_literal(val: f64) -> String {
    if val.is_nan() {
        return "double.nan".to_owned();
    } else if val.is_infinite() {
        return if val > 0.0 {
            "double.infinity".to_owned()
        } else {
            "double.negativeInfinity".to_owned()
        };
    } else if val == 0.0 {
        return "0.0".to_owned();
    }

    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, val);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    let sign = if mantissa.starts_with('-') { "-" } else { "" };
    let digits = mantissa
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    let mut res = sign.to_owned();
    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let (int, frac) = digits.split_at(1);
        let frac = if frac.is_empty() { "0" } else { frac };
        write!(res, "{int}.{frac}e{exponent}").unwrap_or_default();
    } else if exponent < 0 {
        res.push_str("0.");
        res.extend(std::iter::repeat_n('0', (-exponent - 1) as usize));
        res.push_str(digits);
    } else {
        let int_len = exponent as usize + 1;
        if digits.len() <= int_len {
            res.push_str(digits);
            res.extend(std::iter::repeat_n('0', int_len - digits.len()));
            res.push_str(".0");
        } else {
            let (int, frac) = digits.split_at(int_len);
            write!(res, "{int}.{frac}").unwrap_or_default();
        }
    }

    res
}

pub fn is_fuzzy_zero_f32(val: f32) -> bool {
    val.abs() <= FUZZY_ZERO_F32
}

pub fn is_fuzzy_zero_f64(val: f64) -> bool {
    val.abs() <= FUZZY_ZERO_F64
}

fn list_literal<T>(vals: &[T], f: impl Fn(&T) -> String) -> String {
    let items = vals.iter().map(f).collect::<Vec<_>>();

    format!("[{}]", items.join(", "))
}

fn matrix4_literal(val: &Mat4) -> String {
    format!("Matrix4({})", components(&val.to_cols_array()))
}

/// Quotes `val` as a single-quoted Dart string literal.
///
/// Backslash, the quote and `$` (string interpolation) are escaped, as is every control
/// character, so the literal decodes back to exactly `val`.
pub fn string_literal(val: &str) -> String {
    let mut res = String::with_capacity(val.len() + 2);
    res.push('\'');

    for c in val.chars() {
        match c {
            '\\' => res.push_str("\\\\"),
            '\'' => res.push_str("\\'"),
            '$' => res.push_str("\\$"),
            '\n' => res.push_str("\\n"),
            '\r' => res.push_str("\\r"),
            '\t' => res.push_str("\\t"),
            c if c.is_control() => {
                write!(res, "\\u{{{:x}}}", c as u32).unwrap_or_default();
            }
            c => res.push(c),
        }
    }

    res.push('\'');
    res
}

fn vector2_literal(val: Vec2) -> String {
    format!("Vector2({})", components(&val.to_array()))
}

fn vector3_literal(val: Vec3) -> String {
    format!("Vector3({})", components(&val.to_array()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decodes a single-quoted Dart string literal.
    fn unescape(literal: &str) -> String {
        let inner = &literal[1..literal.len() - 1];
        let mut res = String::new();
        let mut chars = inner.chars();

        while let Some(c) = chars.next() {
            if c != '\\' {
                assert_ne!(c, '\'', "unescaped quote in {literal}");
                assert_ne!(c, '$', "unescaped interpolation in {literal}");
                res.push(c);
                continue;
            }

            match chars.next().unwrap() {
                'n' => res.push('\n'),
                'r' => res.push('\r'),
                't' => res.push('\t'),
                'u' => {
                    assert_eq!(chars.next(), Some('{'));
                    let hex = chars.by_ref().take_while(|c| *c != '}').collect::<String>();
                    res.push(char::from_u32(u32::from_str_radix(&hex, 16).unwrap()).unwrap());
                }
                c => res.push(c),
            }
        }

        res
    }

    #[test]
    fn escaping_round_trips() {
        for val in [
            "",
            "plain",
            "it's",
            "C:\\models\\box.obj",
            "$tex.file",
            "${oops}",
            "line\nbreak\ttab\rret",
            "bell\u{7}nul\u{0}",
            "ünïcødé ✓",
            "\\'$",
        ] {
            assert_eq!(unescape(&string_literal(val)), val);
        }
    }

    #[test]
    fn float_literals() {
        assert_eq!(float_literal(0.0), "0.0");
        assert_eq!(float_literal(-0.0), "0.0");
        assert_eq!(float_literal(1.0), "1.0");
        assert_eq!(float_literal(-2.5), "-2.5");
        assert_eq!(float_literal(100.0), "100.0");
        assert_eq!(float_literal(123456789.0), "123456789.0");
        assert_eq!(float_literal(1234567890.0), "1.23456789e9");
        assert_eq!(float_literal(0.001), "0.001");
        assert_eq!(float_literal(0.0001), "0.0001");
        assert_eq!(float_literal(-0.00012), "-0.00012");
        assert_eq!(float_literal(0.00001), "1.0e-5");
        assert_eq!(float_literal(0.000015), "1.5e-5");
        assert_eq!(float_literal(0.000001), "1.0e-6");
        assert_eq!(float_literal(1.0 / 3.0), "0.333333333");
        assert_eq!(float_literal(0.1f32 as f64), "0.100000001");
        assert_eq!(float_literal(f64::INFINITY), "double.infinity");
    }

    #[test]
    fn float_literals_keep_nine_significant_digits() {
        for val in [0.123456789f64, 98765.4321, -3.14159265358979, 6.02214076e23] {
            let literal = float_literal(val);
            let parsed = literal.parse::<f64>().unwrap();
            let digits = literal
                .split('e')
                .next()
                .unwrap()
                .chars()
                .filter(char::is_ascii_digit)
                .collect::<String>();

            assert!(digits.trim_start_matches('0').len() <= SIGNIFICANT_DIGITS);
            assert!(((parsed - val) / val).abs() < 1e-8, "{val} -> {literal}");
        }
    }

    #[test]
    fn zero_sentinel_law() {
        let sentinel = |val: Value| val.matcher() == ("isZero".to_owned(), Comparison::Sentinel);

        assert!(sentinel(Value::Int(0)));
        assert!(sentinel(Value::UInt(0)));
        assert!(sentinel(Value::Float(0.0)));
        assert!(sentinel(Value::Float(-0.0)));
        assert!(sentinel(Value::Float(0.000001)));
        assert!(sentinel(Value::Double(1e-13)));

        assert!(!sentinel(Value::Int(-1)));
        assert!(!sentinel(Value::UInt(7)));
        assert!(!sentinel(Value::Float(0.001)));
        assert!(!sentinel(Value::Double(1e-9)));

        assert_eq!(
            Value::UInt(3).matcher(),
            ("equals(3)".to_owned(), Comparison::Exact)
        );
        assert_eq!(
            Value::Float(0.5).matcher(),
            ("floatEquals(0.5)".to_owned(), Comparison::Tolerance)
        );
    }

    #[test]
    fn empty_sentinels() {
        assert_eq!(Value::from("").matcher().0, "isEmpty");
        assert_eq!(Value::Bytes(vec![]).matcher().0, "isEmpty");
        assert_eq!(Value::StringList(vec![]).matcher().0, "isEmpty");
        assert_eq!(Value::UIntList(vec![]).matcher().0, "equals([])");
        assert_eq!(Value::DoubleList(vec![]).matcher().0, "equals([])");
        assert_eq!(Value::Bytes(vec![1, 0, 255]).matcher().0, "equals([1, 0, 255])");
        assert_eq!(Value::Length(0).matcher().0, "isEmpty");
        assert_eq!(Value::Length(2).matcher().0, "hasLength(2)");
    }

    #[test]
    fn null_sentinels() {
        assert_eq!(Value::Pointer(false).matcher().0, "isNullPointer");
        assert_eq!(Value::Pointer(true).matcher().0, "isNotNull");
        assert_eq!(Value::Presence(false).matcher().0, "isNull");
        assert_eq!(Value::Presence(true).matcher().0, "isNotNull");
    }

    #[test]
    fn composite_matchers() {
        assert_eq!(
            Value::Vector3(Vec3::new(1.0, 0.0, -0.5)).matcher().0,
            "vector3Equals(Vector3(1.0, 0.0, -0.5))"
        );
        assert_eq!(
            Value::Quaternion(Quat::IDENTITY).matcher().0,
            "quaternionEquals(Quaternion(0.0, 0.0, 0.0, 1.0))"
        );
        assert_eq!(
            Value::Matrix4(Mat4::IDENTITY).matcher().0,
            "matrix4Equals(Matrix4(1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, \
             0.0, 0.0, 0.0, 1.0))"
        );
        assert_eq!(
            Value::Aabb(Aabb {
                min: Vec3::splat(-1.0),
                max: Vec3::ONE,
            })
            .matcher()
            .0,
            "aabbEquals(Aabb3.minMax(Vector3(-1.0, -1.0, -1.0), Vector3(1.0, 1.0, 1.0)))"
        );
        assert_eq!(
            Value::Color4(Vec4::new(1.0, 0.5, 0.25, 1.0)).matcher().0,
            "color4Equals(Color4(1.0, 0.5, 0.25, 1.0))"
        );
    }

    #[test]
    fn list_and_pattern_matchers() {
        assert_eq!(
            Value::UIntList(vec![0, 1, 2]).matcher(),
            ("equals([0, 1, 2])".to_owned(), Comparison::Exact)
        );
        assert_eq!(
            Value::DoubleList(vec![1.0, 0.25]).matcher(),
            (
                "floatListEquals([1.0, 0.25])".to_owned(),
                Comparison::Tolerance
            )
        );
        assert_eq!(
            Value::StringList(vec!["a.png".to_owned(), "$b.png".to_owned()]).matcher().0,
            "equals(['a.png', '\\$b.png'])"
        );
        assert_eq!(
            Value::TypeIs("String").matcher(),
            ("isA<String>()".to_owned(), Comparison::Pattern)
        );
        assert_eq!(
            Value::Throws("RangeError").matcher(),
            ("throwsRangeError".to_owned(), Comparison::Throws)
        );
    }
}
