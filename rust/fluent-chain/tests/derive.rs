#![cfg(feature = "derive")]

use fluent_chain::*;

#[derive(Debug, Structural)]
struct Order {
    id: u32,
    lines: Vec<Line>,
    notes: Option<String>,
}

#[derive(Debug, Structural)]
struct Line {
    sku: &'static str,
    quantity: u8,
}

#[derive(Debug, Structural)]
struct OrderDto {
    notes: Option<&'static str>,
    lines: Vec<LineDto>,
    id: i64,
}

#[derive(Debug, Structural)]
struct LineDto {
    quantity: i32,
    sku: String,
}

#[derive(Debug, Structural)]
struct Point(i32, i32);

#[derive(Debug, Structural)]
struct Marker;

#[derive(Debug, Structural)]
enum Shape {
    Dot,
    Circle(f64),
    Rect { width: f64, height: f64 },
}

#[derive(Debug, Structural)]
enum ShapeDto {
    Dot,
    Circle(f32),
    Rect { height: f32, width: f32 },
}

#[derive(Debug, Structural)]
struct Tagged<T> {
    tag: T,
}

fn order() -> Order {
    Order {
        id: 7,
        lines: vec![Line { sku: "A-1", quantity: 2 }],
        notes: None,
    }
}

#[test]
fn records_compare_by_member_name() {
    assert_that(order()).is_equivalent_to(OrderDto {
        notes: None,
        lines: vec![LineDto {
            quantity: 2,
            sku: "A-1".to_owned(),
        }],
        id: 7,
    });
}

#[test]
fn nested_member_mismatch_fails() {
    should_fail_with_message!(
        assert_that(order()).is_equivalent_to(OrderDto {
            notes: Some("rush"),
            lines: vec![],
            id: 7,
        }),
        "is_equivalent_to() expectation failed"
    );
}

#[test]
fn tuple_and_unit_structs() {
    assert_that(Point(1, 2)).is_equivalent_to((1u8, 2u8)).is_not_equivalent_to((2, 1));
    assert_that(Marker).is_equivalent_to(Marker).is_not_equivalent_to(Point(0, 0));
}

#[test]
fn enums_compare_variant_then_payload() {
    assert_that(Shape::Dot).is_equivalent_to(ShapeDto::Dot);
    assert_that(Shape::Circle(1.5)).is_equivalent_to(ShapeDto::Circle(1.5));
    assert_that(Shape::Rect { width: 2.0, height: 1.0 })
        .is_equivalent_to(ShapeDto::Rect { height: 1.0, width: 2.0 })
        .is_not_equivalent_to(ShapeDto::Rect { height: 2.0, width: 1.0 })
        .is_not_equivalent_to(ShapeDto::Dot);
}

#[test]
fn generic_structs() {
    assert_that(Tagged { tag: vec![1, 2] }).is_equivalent_to(Tagged { tag: [1u64, 2] });
    assert_that(vec![Tagged { tag: "x" }]).is_equivalent_to([Tagged { tag: 'x'.to_string() }]);
}
