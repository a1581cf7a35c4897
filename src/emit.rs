//! The intermediate model between walking a scene and writing Dart source text.

use {
    crate::{
        error::EmitError,
        value::{Comparison, Kind, Value, string_literal},
    },
    std::{
        collections::HashMap,
        fmt::{Display, Formatter, Result as FmtResult, Write},
    },
};

const INDENT: &str = "  ";

/// One `expect(..)` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct AssertionRecord {
    /// Variable or expression the field is read through.
    pub subject: String,

    /// Accessor appended to `subject`; empty when the subject itself is asserted.
    pub field: String,

    pub matcher: String,
    pub comparison: Comparison,
}

impl AssertionRecord {
    pub fn new(subject: &str, field: &str, value: &Value) -> Self {
        let (matcher, comparison) = value.matcher();

        Self {
            subject: subject.to_owned(),
            field: field.to_owned(),
            matcher,
            comparison,
        }
    }

    /// The Dart expression under test.
    pub fn target(&self) -> String {
        if self.field.is_empty() {
            self.subject.clone()
        } else {
            format!("{}.{}", self.subject, self.field)
        }
    }

    pub fn render(&self) -> String {
        match self.comparison {
            Comparison::Throws => format!("expect(() => {}, {});", self.target(), self.matcher),
            _ => format!("expect({}, {});", self.target(), self.matcher),
        }
    }
}

/// Describes one observable attribute of a record type.
pub struct Field<T> {
    /// Dart accessor, such as `name` or `vertices.length`.
    pub name: &'static str,
    pub kind: Kind,
    pub read: fn(&T) -> Value,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    /// `final <ident> = <expr>;`
    Bind { ident: String, expr: String },
    Assert(AssertionRecord),
    Unit(EmissionUnit),
    Blank,
}

/// A named, nestable block of generated statements, such as a `test(..)` group or a tester
/// callback.
#[derive(Clone, Debug, PartialEq)]
pub struct EmissionUnit {
    call: String,
    items: Vec<Item>,
}

impl EmissionUnit {
    /// Every assertion of this unit and its nested units, in emission order.
    pub fn assertions(&self) -> Vec<&AssertionRecord> {
        let mut res = vec![];

        for item in &self.items {
            match item {
                Item::Assert(record) => res.push(record),
                Item::Unit(unit) => res.extend(unit.assertions()),
                Item::Bind { .. } | Item::Blank => (),
            }
        }

        res
    }

    pub fn bind(&mut self, ident: impl Into<String>, expr: impl Into<String>) {
        self.items.push(Item::Bind {
            ident: ident.into(),
            expr: expr.into(),
        });
    }

    pub fn blank(&mut self) {
        // Never lead with, or double up, blank lines
        if !matches!(self.items.last(), None | Some(Item::Blank)) {
            self.items.push(Item::Blank);
        }
    }

    /// The opening line, without indentation.
    pub fn call(&self) -> &str {
        &self.call
    }

    pub fn expect(&mut self, subject: &str, field: &str, value: &Value) {
        self.push_assertion(AssertionRecord::new(subject, field, value));
    }

    /// Asserts each field of `record` in table order.
    pub fn fields<T>(
        &mut self,
        subject: &str,
        record: &T,
        fields: &[Field<T>],
    ) -> Result<(), EmitError> {
        for field in fields {
            let value = (field.read)(record);
            let found = value.kind();

            if found != field.kind {
                return Err(EmitError::KindMismatch {
                    subject: subject.to_owned(),
                    field: field.name,
                    expected: field.kind,
                    found,
                });
            }

            self.expect(subject, field.name, &value);
        }

        Ok(())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn push(&mut self, unit: EmissionUnit) {
        self.items.push(Item::Unit(unit));
    }

    pub fn push_assertion(&mut self, record: AssertionRecord) {
        self.items.push(Item::Assert(record));
    }

    /// Writes this unit indented by `depth` levels.
    pub fn render(&self, out: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);

        writeln!(out, "{indent}{}", self.call).unwrap_or_default();

        for item in &self.items {
            match item {
                Item::Bind { ident, expr } => {
                    writeln!(out, "{indent}{INDENT}final {ident} = {expr};").unwrap_or_default()
                }
                Item::Assert(record) => {
                    writeln!(out, "{indent}{INDENT}{}", record.render()).unwrap_or_default()
                }
                Item::Unit(unit) => unit.render(out, depth + 1),
                Item::Blank => out.push('\n'),
            }
        }

        writeln!(out, "{indent}}});").unwrap_or_default();
    }

    /// A `test('<name>', () {` group.
    pub fn test(name: &str) -> Self {
        Self {
            call: format!("test({}, () {{", string_literal(name)),
            items: vec![],
        }
    }

    /// A `<func>('<sample>', tester: (<param>) {` callback; a `None` sample loads nothing.
    pub fn tester(func: &str, sample: Option<&str>, param: &str) -> Self {
        let sample = sample.map(string_literal);
        let sample = sample.as_deref().unwrap_or("null");

        Self {
            call: format!("{func}({sample}, tester: ({param}) {{"),
            items: vec![],
        }
    }
}

/// The position of a record within a scene, as a list of named segments which may carry an
/// index.
///
/// Identifiers are formed from the last segment's name and every index along the way, so
/// `animation[2]/channel[1]/positionKey[5]` becomes `positionKey_2_1_5`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct NodePath(Vec<(&'static str, Option<usize>)>);

impl NodePath {
    pub fn at(&self, name: &'static str, index: usize) -> Self {
        self.with((name, Some(index)))
    }

    pub fn field(&self, name: &'static str) -> Self {
        self.with((name, None))
    }

    pub fn ident(&self) -> String {
        let mut res = self
            .0
            .last()
            .map(|(name, _)| (*name).to_owned())
            .unwrap_or_default();

        for index in self.0.iter().filter_map(|(_, index)| *index) {
            write!(res, "_{index}").unwrap_or_default();
        }

        res
    }

    pub fn new() -> Self {
        Self::default()
    }

    fn with(&self, segment: (&'static str, Option<usize>)) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);

        Self(segments)
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (idx, (name, index)) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("/")?;
            }

            f.write_str(name)?;

            if let Some(index) = index {
                write!(f, "[{index}]")?;
            }
        }

        Ok(())
    }
}

/// Hands out variable identifiers within one Dart scope and rejects collisions.
#[derive(Debug, Default)]
pub struct Namer {
    claimed: HashMap<String, NodePath>,
}

impl Namer {
    /// Claims the identifier of `path`. Claiming the same path twice is allowed.
    pub fn claim(&mut self, path: &NodePath) -> Result<String, EmitError> {
        let ident = path.ident();

        match self.claimed.get(&ident) {
            Some(first) if first != path => Err(EmitError::DuplicateIdentifier {
                ident,
                first: first.to_string(),
                second: path.to_string(),
            }),
            Some(_) => Ok(ident),
            None => {
                self.claimed.insert(ident.clone(), path.clone());

                Ok(ident)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, glam::Vec3};

    struct Pair {
        name: String,
        len: usize,
    }

    static PAIR: &[Field<Pair>] = &[
        Field {
            name: "name",
            kind: Kind::String,
            read: |pair: &Pair| Value::from(pair.name.as_str()),
        },
        Field {
            name: "items.length",
            kind: Kind::UInt,
            read: |pair: &Pair| Value::count(pair.len),
        },
    ];

    static BROKEN: &[Field<Pair>] = &[Field {
        name: "name",
        kind: Kind::Int,
        read: |pair: &Pair| Value::from(pair.name.as_str()),
    }];

    #[test]
    fn path_identifiers() {
        let animation = NodePath::new().at("animation", 2);
        let key = animation.at("channel", 1).at("positionKey", 5);

        assert_eq!(NodePath::new().at("mesh", 2).ident(), "mesh_2");
        assert_eq!(animation.at("channel", 1).ident(), "channel_2_1");
        assert_eq!(key.ident(), "positionKey_2_1_5");
        assert_eq!(key.to_string(), "animation[2]/channel[1]/positionKey[5]");
        assert_eq!(NodePath::new().field("sceneMetaData").ident(), "sceneMetaData");
        assert_eq!(
            NodePath::new()
                .at("child", 1)
                .at("child", 0)
                .field("nodeMetaData")
                .ident(),
            "nodeMetaData_1_0"
        );
    }

    #[test]
    fn namer_rejects_collisions() {
        let mut namer = Namer::default();
        let a = NodePath::new().at("a", 1).at("bone", 2);
        let b = NodePath::new().at("b", 1).at("bone", 2);

        assert_eq!(namer.claim(&a).unwrap(), "bone_1_2");
        assert_eq!(namer.claim(&a).unwrap(), "bone_1_2");

        match namer.claim(&b) {
            Err(EmitError::DuplicateIdentifier {
                ident,
                first,
                second,
            }) => {
                assert_eq!(ident, "bone_1_2");
                assert_eq!(first, "a[1]/bone[2]");
                assert_eq!(second, "b[1]/bone[2]");
            }
            res => panic!("unexpected {res:?}"),
        }
    }

    #[test]
    fn fields_keep_table_order() {
        let mut unit = EmissionUnit::test("pair");
        let pair = Pair {
            name: "first".to_owned(),
            len: 0,
        };

        unit.fields("pair_0", &pair, PAIR).unwrap();

        let rendered = unit
            .assertions()
            .iter()
            .map(|record| record.render())
            .collect::<Vec<_>>();

        assert_eq!(
            rendered,
            [
                "expect(pair_0.name, equals('first'));",
                "expect(pair_0.items.length, isZero);",
            ]
        );
    }

    #[test]
    fn fields_reject_kind_mismatch() {
        let mut unit = EmissionUnit::test("pair");
        let pair = Pair {
            name: "first".to_owned(),
            len: 0,
        };

        assert!(matches!(
            unit.fields("pair_0", &pair, BROKEN),
            Err(EmitError::KindMismatch {
                field: "name",
                expected: Kind::Int,
                found: Kind::String,
                ..
            })
        ));
        assert!(unit.assertions().is_empty());
    }

    #[test]
    fn render_nests_units() {
        let mut tester = EmissionUnit::tester("testMeshes", Some("Box.gltf"), "meshes");
        tester.expect("meshes", "length", &Value::count(1));
        tester.blank();
        tester.bind("mesh_0", "meshes.elementAt(0)");
        tester.expect("mesh_0", "vertices.elementAt(0)", &Value::Vector3(Vec3::X));
        tester.push_assertion(AssertionRecord::new(
            "texture_0",
            "data.elementAt(2).b",
            &Value::Throws("RangeError"),
        ));

        let mut group = EmissionUnit::test("Box.gltf");
        group.push(tester);

        let mut out = String::new();
        group.render(&mut out, 1);

        assert_eq!(
            out,
            "  test('Box.gltf', () {\n\
             \x20   testMeshes('Box.gltf', tester: (meshes) {\n\
             \x20     expect(meshes.length, equals(1));\n\
             \n\
             \x20     final mesh_0 = meshes.elementAt(0);\n\
             \x20     expect(mesh_0.vertices.elementAt(0), vector3Equals(Vector3(1.0, 0.0, 0.0)));\n\
             \x20     expect(() => texture_0.data.elementAt(2).b, throwsRangeError);\n\
             \x20   });\n\
             \x20 });\n"
        );
    }

    #[test]
    fn null_tester() {
        let unit = EmissionUnit::tester("testScene", None, "scene");

        assert_eq!(unit.call(), "testScene(null, tester: (scene) {");
    }

    #[test]
    fn blank_lines_collapse() {
        let mut unit = EmissionUnit::test("t");
        unit.blank();
        unit.expect("a", "", &Value::Bool(true));
        unit.blank();
        unit.blank();

        assert_eq!(unit.items().len(), 2);
    }
}
