//! # Datatype Engine Scenarios
//!
//! End-to-end behaviour of the builder, the validation engine and the
//! comparator through the public API only: the reference scenarios for
//! bounds, strings, choice lists, set widths, structural equality and range
//! restriction, plus cyclic and derived aggregates.

use gpd_core::{
    ConstructionError, Facet, GpdError, Length, PathSegment, Pattern, Value, ValueErrorKind,
};
use gpd_types::{
    Aggregate, AggregateKind, Character, Enumerated, Integral, Member, Real, SchemaBuilder,
    Sequence,
};

fn kind_of(schema: &gpd_types::Schema, ty: &gpd_types::TypeRef, raw: Value) -> ValueErrorKind {
    schema.to_value(ty, &raw).unwrap_err().kind
}

// ─── Bounds ──────────────────────────────────────────────────────────

#[test]
fn test_octet_bounds() {
    let mut b = SchemaBuilder::new();
    let byte = b.define("Byte", Integral::new(0, 255).unwrap()).unwrap();
    let schema = b.build().unwrap();

    assert_eq!(kind_of(&schema, &byte, Value::from(-1)), ValueErrorKind::NumericOutOfRange);
    assert_eq!(schema.to_value(&byte, &Value::from(255)).unwrap(), Value::from(255));
    let err = schema.to_value(&byte, &Value::from(256)).unwrap_err();
    assert_eq!(err.kind, ValueErrorKind::NumericOutOfRange);
    assert_eq!(err.facet, Facet::MaxInclusive);
}

// ─── Strings ─────────────────────────────────────────────────────────

#[test]
fn test_latin1_string_length_then_repertoire() {
    let mut b = SchemaBuilder::new();
    let ch = b.add(Character::latin1()).unwrap();
    let name = b
        .define("Name", Sequence::new(ch, Length::new(1, Some(11)).unwrap()))
        .unwrap();
    let schema = b.build().unwrap();

    assert_eq!(
        schema.to_value(&name, &Value::text("Hello world")).unwrap(),
        Value::text("Hello world")
    );
    assert_eq!(kind_of(&schema, &name, Value::text("")), ValueErrorKind::BoundsRange);
    assert_eq!(
        kind_of(&schema, &name, Value::text("123456789012")),
        ValueErrorKind::BoundsRange
    );

    let err = schema.to_value(&name, &Value::text("\u{0100}")).unwrap_err();
    assert_eq!(err.kind, ValueErrorKind::CharacterNotInRepertoire);
    assert_eq!(err.path.segments(), &[PathSegment::Index(0)]);

    // Too long and out of repertoire: length is checked first.
    assert_eq!(
        kind_of(&schema, &name, Value::text("\u{0100}".repeat(12))),
        ValueErrorKind::BoundsRange
    );
}

#[test]
fn test_pattern_checked_before_repertoire() {
    let mut b = SchemaBuilder::new();
    let ch = b.add(Character::ascii()).unwrap();
    let code = b
        .define(
            "Code",
            Sequence::unbounded(ch).with_pattern(Pattern::new("[A-Z]{3}").unwrap()),
        )
        .unwrap();
    let schema = b.build().unwrap();

    assert!(schema.to_value(&code, &Value::text("EUR")).is_ok());
    assert_eq!(kind_of(&schema, &code, Value::text("eur")), ValueErrorKind::PatternMismatch);
    assert_eq!(
        kind_of(&schema, &code, Value::text("\u{c9}UR")),
        ValueErrorKind::PatternMismatch
    );
    assert_eq!(kind_of(&schema, &code, Value::from(42)), ValueErrorKind::DataTypeMismatch);
}

#[test]
fn test_string_choices_with_derived_length() {
    let mut b = SchemaBuilder::new();
    let ch = b.add(Character::latin1()).unwrap();
    let seq = Sequence::unbounded(ch)
        .with_choices(vec![Value::text("Choice1"), Value::text("Choice2")])
        .unwrap();
    let choice = b.define("Choice", seq).unwrap();
    let schema = b.build().unwrap();

    let Some(gpd_types::TypeKind::Sequence(seq)) = schema.get(&choice).map(|d| d.kind()) else {
        panic!("expected a sequence");
    };
    assert_eq!(seq.length(), Length::fixed(7));
    assert_eq!(
        schema.to_value(&choice, &Value::text("Choice1")).unwrap(),
        Value::text("Choice1")
    );
    assert_eq!(
        kind_of(&schema, &choice, Value::text("Choice3")),
        ValueErrorKind::NoMatchingChoice
    );
    assert_eq!(kind_of(&schema, &choice, Value::text("Choice")), ValueErrorKind::BoundsRange);
}

#[test]
fn test_octet_string_canonical_form() {
    let mut b = SchemaBuilder::new();
    let byte = b.add(Integral::octet()).unwrap();
    let quad = b
        .define("Quad", Sequence::new(byte, Length::fixed(4)))
        .unwrap();
    let schema = b.build().unwrap();

    let canonical = schema
        .to_value(&quad, &Value::integers([1, 2, 3, 4]))
        .unwrap();
    assert_eq!(canonical, Value::Octets(vec![1, 2, 3, 4]));
    assert_eq!(schema.to_value(&quad, &canonical).unwrap(), canonical);

    let err = schema
        .to_value(&quad, &Value::integers([1, 2, 300, 4]))
        .unwrap_err();
    assert_eq!(err.kind, ValueErrorKind::NumericOutOfRange);
    assert_eq!(err.path.to_string(), "$[2]");
}

// ─── Sets ────────────────────────────────────────────────────────────

#[test]
fn test_set_over_wide_base_fails_at_construction() {
    let mut b = SchemaBuilder::new();
    let wide = b.define("Wide", Integral::new(0, 1024).unwrap()).unwrap();
    assert!(matches!(
        b.set(&wide).unwrap_err(),
        ConstructionError::RangeTooLarge { width: 256, .. }
    ));
}

#[test]
fn test_set_over_real_or_boolean_base() {
    let mut b = SchemaBuilder::new();
    let real = b.define("Ratio", Real::single()).unwrap();
    let flag = b.define("Flag", gpd_types::Datatype::boolean()).unwrap();
    assert!(matches!(
        b.set(&real).unwrap_err(),
        ConstructionError::RangeTooLarge { .. }
    ));
    assert!(matches!(
        b.set(&flag).unwrap_err(),
        ConstructionError::NotOrdered { .. }
    ));
}

#[test]
fn test_set_values_sorted_and_deduplicated() {
    let mut b = SchemaBuilder::new();
    let day = b
        .define("Day", Enumerated::new(["mon", "tue", "wed"]).unwrap())
        .unwrap();
    let days = b.set(&day).unwrap();
    let days = b.define("Days", days).unwrap();
    let schema = b.build().unwrap();

    let raw = Value::List(vec![
        Value::text("wed"),
        Value::text("mon"),
        Value::text("wed"),
    ]);
    assert_eq!(
        schema.to_value(&days, &raw).unwrap(),
        Value::List(vec![Value::symbol("mon"), Value::symbol("wed")])
    );
    let err = schema
        .to_value(&days, &Value::List(vec![Value::text("sun")]))
        .unwrap_err();
    assert_eq!(err.kind, ValueErrorKind::NoMatchingChoice);
    assert_eq!(err.path.to_string(), "$[0]");
}

// ─── Ranges ──────────────────────────────────────────────────────────

#[test]
fn test_range_construction_errors() {
    let mut b = SchemaBuilder::new();
    let int = b.define("Int", Integral::integer()).unwrap();
    let flag = b.define("Flag", gpd_types::Datatype::boolean()).unwrap();
    let ch = b.add(Character::latin1()).unwrap();
    let text = b.define("Text", Sequence::unbounded(ch)).unwrap();

    assert!(matches!(
        b.range(&int, 12, 0).unwrap_err(),
        ConstructionError::InvertedBounds { .. }
    ));
    assert!(matches!(
        b.range(&flag, false, true).unwrap_err(),
        ConstructionError::NotOrdered { .. }
    ));
    assert!(matches!(
        b.range(&text, "a", "z").unwrap_err(),
        ConstructionError::NotOrdered { .. }
    ));
    assert!(matches!(
        b.range(&int, "low", 10).unwrap_err(),
        ConstructionError::IncompatibleBound { .. }
    ));
    let byte = b.define("Byte", Integral::octet()).unwrap();
    assert!(matches!(
        b.range(&byte, 0, 300).unwrap_err(),
        ConstructionError::OutsideBase { .. }
    ));
}

#[test]
fn test_range_restriction_is_directional() {
    let mut b = SchemaBuilder::new();
    let int = b.define("Int", Integral::integer()).unwrap();
    let month = b.range(&int, 0, 12).unwrap();
    let month = b.define("Month", month).unwrap();
    let day = b.range(&int, 0, 31).unwrap();
    let day = b.define("Day", day).unwrap();
    let schema = b.build().unwrap();

    assert!(schema.is_restriction_of(&month, &day));
    assert!(!schema.is_restriction_of(&day, &month));
    assert!(schema.is_restriction_of(&month, &int));
    assert!(!schema.is_restriction_of(&month, &month));

    assert_eq!(schema.to_value(&month, &Value::from(12)).unwrap(), Value::from(12));
    assert_eq!(kind_of(&schema, &month, Value::from(13)), ValueErrorKind::NumericOutOfRange);
}

#[test]
fn test_enumerated_ranges_compare_by_value_name() {
    let mut b = SchemaBuilder::new();
    let weekday = b
        .define(
            "Weekday",
            Enumerated::new(["mon", "tue", "wed", "thu", "fri", "sat", "sun"]).unwrap(),
        )
        .unwrap();
    let rota = b.define("Rota", Enumerated::new(["sat", "sun", "mon"]).unwrap()).unwrap();
    let workday = b.range(&weekday, "mon", "fri").unwrap();
    let workday = b.define("Workday", workday).unwrap();
    let weekend = b.range(&rota, "sat", "sun").unwrap();
    let weekend = b.define("WeekendShift", weekend).unwrap();
    let monday = b.range(&rota, "mon", "mon").unwrap();
    let monday = b.define("MondayShift", monday).unwrap();
    let weekend_set = b.set(&weekend).unwrap();
    let weekend_set = b.define("WeekendShifts", weekend_set).unwrap();
    let workday_set = b.set(&workday).unwrap();
    let workday_set = b.define("Workdays", workday_set).unwrap();
    let weekday_set = b.set(&weekday).unwrap();
    let weekday_set = b.define("Weekdays", weekday_set).unwrap();
    let schema = b.build().unwrap();

    // Both ranges cover the first positions of their own lists.
    assert!(schema.to_value(&weekend, &Value::text("sat")).is_ok());
    assert!(schema.to_value(&workday, &Value::text("sat")).is_err());
    assert!(!schema.is_restriction_of(&weekend, &workday));
    assert!(schema.is_restriction_of(&weekend, &weekday));
    assert!(schema.is_restriction_of(&monday, &workday));
    assert!(!schema.is_restriction_of(&rota, &workday));

    assert!(!schema.is_restriction_of(&weekend_set, &workday_set));
    assert!(schema.is_restriction_of(&weekend_set, &weekday_set));
}

#[test]
fn test_character_range_validates_codepoints() {
    let mut b = SchemaBuilder::new();
    let ch = b.define("Char", Character::unicode()).unwrap();
    let digit = b.range(&ch, '0', '9').unwrap();
    let digit = b.define("Digit", digit).unwrap();
    let digits = b.define("Digits", Sequence::unbounded(digit)).unwrap();
    let schema = b.build().unwrap();

    assert_eq!(
        schema.to_value(&digits, &Value::text("2024")).unwrap(),
        Value::text("2024")
    );
    let err = schema.to_value(&digits, &Value::text("20x4")).unwrap_err();
    assert_eq!(err.kind, ValueErrorKind::NumericOutOfRange);
    assert_eq!(err.path.to_string(), "$[2]");
}

// ─── Structural equality ─────────────────────────────────────────────

#[test]
fn test_distinct_references_with_identical_facets_are_equal() {
    let mut b = SchemaBuilder::new();
    let byte_a = b.add(Integral::new(0, 255).unwrap()).unwrap();
    let byte_b = b.add(Integral::new(0, 255).unwrap()).unwrap();
    let a = b.add(Sequence::new(byte_a, Length::fixed(4))).unwrap();
    let c = b
        .define("Address", Sequence::new(byte_b, Length::fixed(4)))
        .unwrap();
    let schema = b.build().unwrap();

    assert_ne!(a.id(), c.id());
    assert!(schema.equals(&a, &c));
    assert!(schema.equals(&c, &a));
    // Structurally equal but distinct: each restricts the other.
    assert!(schema.is_restriction_of(&a, &c));
}

#[test]
fn test_cyclic_aggregates_compare_and_terminate() {
    let mut b = SchemaBuilder::new();
    let byte = b.add(Integral::octet()).unwrap();
    let list_of = |b: &mut SchemaBuilder, name: &str| {
        let node = b.declare(name);
        let next = b
            .add(Sequence::new(node.clone(), Length::new(0, Some(1)).unwrap()))
            .unwrap();
        let record = Aggregate::record(vec![
            Member::new("value", byte.clone()),
            Member::new("next", next),
        ])
        .unwrap();
        b.define(name, record).unwrap()
    };
    let left = list_of(&mut b, "Left");
    let right = list_of(&mut b, "Right");
    let schema = b.build().unwrap();

    assert!(schema.equals(&left, &right));
    assert!(schema.equals(&right, &left));
    assert!(schema.is_restriction_of(&left, &right));

    let raw = Value::Record(vec![
        ("value".into(), Value::from(1)),
        (
            "next".into(),
            Value::List(vec![Value::Record(vec![
                ("value".into(), Value::from(2)),
                ("next".into(), Value::List(vec![])),
            ])]),
        ),
    ]);
    assert!(schema.to_value(&left, &raw).is_ok());
}

// ─── Aggregates ──────────────────────────────────────────────────────

#[test]
fn test_record_members_by_name_and_position() {
    let mut b = SchemaBuilder::new();
    let byte = b.add(Integral::octet()).unwrap();
    let ch = b.add(Character::ascii()).unwrap();
    let text = b.add(Sequence::unbounded(ch)).unwrap();
    let person = Aggregate::record(vec![
        Member::new("Name", text),
        Member::new("age", byte),
    ])
    .unwrap();
    let person = b.define("Person", person).unwrap();
    let schema = b.build().unwrap();

    let expected = Value::Record(vec![
        ("Name".into(), Value::text("Ada")),
        ("age".into(), Value::from(36)),
    ]);
    let by_name = Value::Record(vec![
        ("AGE".into(), Value::from(36)),
        ("name".into(), Value::text("Ada")),
    ]);
    assert_eq!(schema.to_value(&person, &by_name).unwrap(), expected);
    let positional = Value::List(vec![Value::text("Ada"), Value::from(36)]);
    assert_eq!(schema.to_value(&person, &positional).unwrap(), expected);

    let missing = Value::Record(vec![("name".into(), Value::text("Ada"))]);
    let err = schema.to_value(&person, &missing).unwrap_err();
    assert_eq!(err.kind, ValueErrorKind::DataTypeMismatch);
    assert_eq!(err.facet, Facet::Members);

    let bad_age = Value::Record(vec![
        ("name".into(), Value::text("Ada")),
        ("age".into(), Value::from(999)),
    ]);
    let err = schema.to_value(&person, &bad_age).unwrap_err();
    assert_eq!(err.path.to_string(), "$.age");
}

#[test]
fn test_json_input_and_output() {
    let mut b = SchemaBuilder::new();
    let byte = b.add(Integral::octet()).unwrap();
    let ratio = b.add(Real::single()).unwrap();
    let ch = b.add(Character::latin1()).unwrap();
    let text = b.add(Sequence::unbounded(ch)).unwrap();
    let scores = b.add(Sequence::unbounded(ratio)).unwrap();
    let entry = Aggregate::record(vec![
        Member::new("label", text),
        Member::new("flags", byte),
        Member::new("scores", scores),
    ])
    .unwrap();
    let entry = b.define("Entry", entry).unwrap();
    let schema = b.build().unwrap();

    let raw = serde_json::json!({ "scores": [0.5, 2], "label": "caf\u{e9}", "flags": 7 });
    let canonical = schema.to_value(&entry, &Value::from_json(&raw)).unwrap();
    assert_eq!(
        canonical.to_json(),
        serde_json::json!({ "label": "caf\u{e9}", "flags": 7, "scores": ["0.5", "2"] })
    );

    let raw = serde_json::json!({ "label": "x", "flags": 7, "scores": [1e40] });
    let err = schema.to_value(&entry, &Value::from_json(&raw)).unwrap_err();
    assert_eq!(err.kind, ValueErrorKind::NumericOutOfRange);
    assert_eq!(err.path.to_string(), "$.scores[0]");
}

#[test]
fn test_table_rows_are_records() {
    let mut b = SchemaBuilder::new();
    let byte = b.add(Integral::octet()).unwrap();
    let table = Aggregate::table(vec![Member::new("x", byte.clone()), Member::new("y", byte)])
        .unwrap();
    let points = b.define("Points", table).unwrap();
    let schema = b.build().unwrap();

    let raw = Value::List(vec![
        Value::integers([1, 2]),
        Value::integers([3, 400]),
    ]);
    let err = schema.to_value(&points, &raw).unwrap_err();
    assert_eq!(err.path.to_string(), "$[1].y");
}

#[test]
fn test_class_inherits_interface_members() {
    let mut b = SchemaBuilder::new();
    let byte = b.add(Integral::octet()).unwrap();
    let shape = Aggregate::new(AggregateKind::Interface, vec![Member::new("id", byte.clone())])
        .unwrap();
    let shape = b.define("Shape", shape).unwrap();
    let circle = Aggregate::derivable(
        AggregateKind::Class,
        vec![Member::new("radius", byte)],
        vec![shape],
    )
    .unwrap();
    let circle = b.define("Circle", circle).unwrap();
    let schema = b.build().unwrap();

    let names: Vec<&str> = schema
        .members(&circle)
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["radius", "id"]);
    let raw = Value::Record(vec![
        ("id".into(), Value::from(1)),
        ("radius".into(), Value::from(5)),
    ]);
    assert_eq!(
        schema.to_value(&circle, &raw).unwrap(),
        Value::Record(vec![
            ("radius".into(), Value::from(5)),
            ("id".into(), Value::from(1)),
        ])
    );
}

#[test]
fn test_named_lookup_through_schema() {
    let mut b = SchemaBuilder::new();
    b.define("Byte", Integral::octet()).unwrap();
    let schema = b.build().unwrap();
    assert_eq!(
        schema.to_value_named("Byte", &Value::text("7")).unwrap(),
        Value::from(7)
    );
    assert!(matches!(
        schema.to_value_named("Word", &Value::from(7)).unwrap_err(),
        GpdError::Symbol(_)
    ));
}
