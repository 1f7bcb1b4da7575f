use tessera_core::recording::{DrawCall, RecordingSurface};
use tessera_core::{Button, Element, Event, IVec2, Rgb, Vec2, Vec3};

fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

fn grey() -> Vec3 {
    Vec3::splat(128.0)
}

#[test]
fn test_triangle_hit_test() {
    let tri = Element::triangle(v(0.0, 0.0), v(10.0, 0.0), v(0.0, 10.0), grey());
    assert!(tri.is_inside(IVec2::new(2, 2)));
    assert!(!tri.is_inside(IVec2::new(20, 20)));
    // Edges count as inside.
    assert!(tri.is_inside(IVec2::new(5, 0)));
}

#[test]
fn test_box_point_line_hit_tests() {
    let rect = Element::rect(v(10.0, 10.0), v(50.0, 30.0), grey());
    assert!(rect.is_inside(IVec2::new(10, 30)));
    assert!(!rect.is_inside(IVec2::new(51, 20)));

    let point = Element::point(v(4.0, 7.0), grey());
    assert!(point.is_inside(IVec2::new(4, 7)));
    assert!(!point.is_inside(IVec2::new(4, 8)));

    let line = Element::line(v(0.0, 0.0), v(10.0, 10.0), grey());
    assert!(!line.is_inside(IVec2::new(5, 5)));
}

#[test]
fn test_button_click_toggles_only_when_clickable() {
    let mut button = Button::new(v(10.0, 10.0), v(40.0, 20.0), grey());
    assert!(button.handle_event(&Event::click(20, 20)));
    assert!(button.clicked);
    assert!(button.handle_event(&Event::click(20, 20)));
    assert!(!button.clicked);
    assert!(!button.handle_event(&Event::click(5, 5)));

    let mut inert = Button::new(v(10.0, 10.0), v(40.0, 20.0), grey()).with_flags(true, false);
    assert!(!inert.handle_event(&Event::click(20, 20)));
    assert!(!inert.clicked);
}

#[test]
fn test_button_hover_respects_flag_and_ignores_clicks() {
    let button = Button::new(v(0.0, 0.0), v(10.0, 10.0), grey());
    assert!(button.handle_hover(&Event::show(5, 5)));
    assert!(!button.handle_hover(&Event::show(15, 5)));
    assert!(!button.handle_hover(&Event::click(5, 5)));

    let blind = button.clone().with_flags(false, true);
    assert!(!blind.handle_hover(&Event::show(5, 5)));
}

#[test]
fn test_draw_translates_by_region_start_and_clamps_color() {
    let mut surface = RecordingSurface::new(100, 100);
    let line = Element::line(v(1.4, 1.6), v(5.0, 5.0), Vec3::new(300.0, -4.0, 127.6));

    line.draw(&mut surface, IVec2::new(10, 20), IVec2::new(50, 50));

    assert_eq!(
        surface.calls,
        vec![DrawCall::Line {
            a: IVec2::new(11, 22),
            b: IVec2::new(15, 25),
            color: Rgb::new(255, 0, 128),
        }]
    );
}

#[test]
fn test_fully_outside_elements_are_skipped() {
    let mut surface = RecordingSurface::new(100, 100);
    let start = IVec2::new(0, 0);
    let end = IVec2::new(10, 10);

    Element::point(v(11.0, 3.0), grey()).draw(&mut surface, start, end);
    Element::line(v(20.0, 20.0), v(30.0, 30.0), grey()).draw(&mut surface, start, end);
    Element::triangle(v(20.0, 0.0), v(30.0, 0.0), v(20.0, 5.0), grey()).draw(&mut surface, start, end);
    Element::rect(v(11.0, 11.0), v(20.0, 20.0), grey()).draw(&mut surface, start, end);
    assert!(surface.calls.is_empty());

    // One vertex inside is enough for the surface to receive the call.
    Element::triangle(v(5.0, 5.0), v(30.0, 0.0), v(20.0, 25.0), grey()).draw(&mut surface, start, end);
    assert_eq!(surface.calls.len(), 1);
}

#[test]
fn test_box_with_one_corner_inside_is_forwarded_whole() {
    let mut surface = RecordingSurface::new(100, 100);
    let start = IVec2::new(10, 10);
    let end = IVec2::new(30, 30);

    Element::rect(v(5.0, 2.0), v(60.0, 8.0), grey()).draw(&mut surface, start, end);
    Element::from(Button::new(v(-20.0, -20.0), v(25.0, 25.0), grey()))
        .draw(&mut surface, start, end);
    // Spans the region but has neither corner in it.
    Element::rect(v(-5.0, 2.0), v(30.0, 8.0), grey()).draw(&mut surface, start, end);

    assert_eq!(
        surface.calls,
        vec![
            DrawCall::Box {
                min: IVec2::new(15, 12),
                max: IVec2::new(70, 18),
                color: Rgb::new(128, 128, 128),
            },
            DrawCall::Box {
                min: IVec2::new(-10, -10),
                max: IVec2::new(15, 15),
                color: Rgb::new(128, 128, 128),
            },
        ]
    );
}

#[test]
fn test_huge_coordinates_saturate_instead_of_overflowing() {
    let mut surface = RecordingSurface::new(100, 100);
    let start = IVec2::new(640, 360);
    let end = IVec2::new(1280, 720);

    Element::line(v(0.0, 0.0), v(3.0e9, 0.0), grey()).draw(&mut surface, start, end);
    Element::rect(v(0.0, 0.0), v(f32::MAX, f32::INFINITY), grey()).draw(&mut surface, start, end);
    Element::point(v(-3.0e9, f32::NAN), grey()).draw(&mut surface, start, end);

    assert_eq!(surface.calls.len(), 2);
    match &surface.calls[0] {
        DrawCall::Line { a, b, .. } => {
            assert_eq!(*a, start);
            assert!(b.x > start.x && b.y == start.y);
        }
        other => panic!("unexpected call {:?}", other),
    }
    match &surface.calls[1] {
        DrawCall::Box { min, max, .. } => {
            assert_eq!(*min, start);
            assert!(max.cmpgt(start).all());
        }
        other => panic!("unexpected call {:?}", other),
    }

    let far = Event::click(i32::MIN, i32::MAX).relative_to(IVec2::new(5, -5));
    assert_eq!(far, Event::click(i32::MIN, i32::MAX));
}

#[test]
fn test_as_button_only_matches_buttons() {
    let mut button: Element = Button::new(v(0.0, 0.0), v(1.0, 1.0), grey()).into();
    assert!(button.as_button().is_some());
    button.as_button_mut().unwrap().clicked = true;
    assert!(button.as_button().unwrap().clicked);
    assert!(Element::point(v(0.0, 0.0), grey()).as_button().is_none());
}
