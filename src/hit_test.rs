use super::*;
use crate::shape::Shape;

fn rect_at(x: i64, y: i64, w: i64, h: i64, z: i64) -> Shape {
    let mut s = Shape::rectangle();
    s.x = x;
    s.y = y;
    s.resize(w - 100, h - 100);
    s.z_order = z;
    s
}

#[test]
fn miss_on_empty_canvas() {
    assert_eq!(hit_test(&Canvas::new(), Point::new(0, 0)), None);
}

#[test]
fn miss_outside_every_box() {
    let mut canvas = Canvas::new();
    canvas.add_shape(rect_at(10, 10, 50, 50, 0));
    assert_eq!(hit_test(&canvas, Point::new(61, 61)), None);
    assert_eq!(hit_test(&canvas, Point::new(9, 30)), None);
}

#[test]
fn edges_are_inclusive() {
    let mut canvas = Canvas::new();
    let id = canvas.add_shape(rect_at(10, 10, 50, 50, 0));
    for pt in [Point::new(10, 10), Point::new(60, 60), Point::new(10, 60), Point::new(60, 10)] {
        assert_eq!(hit_test(&canvas, pt), Some(id));
    }
}

#[test]
fn highest_z_wins_regardless_of_insertion_order() {
    for n in 2..7_i64 {
        let mut canvas = Canvas::new();
        // Insert with z-orders in a scrambled order so insertion order never
        // matches paint order.
        let mut top = None;
        for i in 0..n {
            let z = (i * 7) % n;
            let id = canvas.add_shape(rect_at(i, i, 100, 100, z));
            if z == n - 1 {
                top = Some(id);
            }
        }
        assert_eq!(hit_test(&canvas, Point::new(50, 50)), top, "n = {n}");
    }
}

#[test]
fn tie_goes_to_later_inserted_shape() {
    let mut canvas = Canvas::new();
    canvas.add_shape(rect_at(0, 0, 50, 50, 1));
    let later = canvas.add_shape(rect_at(0, 0, 50, 50, 1));
    assert_eq!(hit_test(&canvas, Point::new(25, 25)), Some(later));
}

#[test]
fn lower_shape_hit_outside_overlap() {
    let mut canvas = Canvas::new();
    let bottom = canvas.add_shape(rect_at(0, 0, 50, 50, 0));
    canvas.add_shape(rect_at(40, 40, 50, 50, 1));
    assert_eq!(hit_test(&canvas, Point::new(5, 5)), Some(bottom));
}

#[test]
fn line_hit_uses_endpoint_box() {
    let mut canvas = Canvas::new();
    let mut line = Shape::line();
    line.move_by(100, 100);
    line.resize(-40, 20);
    let id = canvas.add_shape(line);
    assert_eq!(hit_test(&canvas, Point::new(70, 110)), Some(id));
    assert_eq!(hit_test(&canvas, Point::new(101, 110)), None);
}
