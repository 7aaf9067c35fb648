//! End-to-end checks for the backdrop animation path.
//!
//! Run with: cargo test --test backdrop_flow

use backdrop::{Backdrop, BackdropConfig, ContactForm, Purpose};

/// Pointer at (100, 50) on a 1000x800 window, then one animation step.
/// The camera must cover 5% of the way toward the parallax goal.
#[test]
fn test_pointer_move_then_step_moves_camera_five_percent() {
    let mut backdrop = Backdrop::new(BackdropConfig::default(), 1000, 800);

    backdrop.on_pointer_move(100.0, 50.0);
    let offset = backdrop.pointer_offset();
    assert!((offset.x - -0.4).abs() < 0.001);
    assert!((offset.y - -0.4375).abs() < 0.001);

    assert!(backdrop.step());

    let position = backdrop.camera().position();
    assert!((position.x - 0.2).abs() < 0.001, "x was {}", position.x);
    assert!(
        (position.y - 0.21875).abs() < 0.001,
        "y was {}",
        position.y
    );
    assert!((position.z - 40.0).abs() < 0.001);
}

/// Holding the pointer still, the camera settles at the goal and the
/// remaining distance shrinks every single step on the way there.
#[test]
fn test_camera_settles_on_goal_under_steady_pointer() {
    let mut backdrop = Backdrop::new(BackdropConfig::default(), 1000, 800);
    backdrop.on_pointer_move(100.0, 50.0);

    let goal = backdrop.camera().goal();
    let mut last_distance = (goal - backdrop.camera().position()).length();

    for _ in 0..200 {
        backdrop.step();
        let distance = (goal - backdrop.camera().position()).length();
        assert!(distance < last_distance);
        last_distance = distance;
    }

    let position = backdrop.camera().position();
    assert!((position.x - 4.0).abs() < 0.01);
    assert!((position.y - 4.375).abs() < 0.01);
}

/// The field spins at a fixed angle per step, independent of anything else.
#[test]
fn test_rotation_accumulates_per_step() {
    let mut backdrop = Backdrop::new(BackdropConfig::default(), 1000, 800);
    for _ in 0..200 {
        backdrop.step();
    }
    assert!((backdrop.field().rotation_x() - 200.0 * 0.0005).abs() < 1e-4);
    assert!((backdrop.field().rotation_y() - 200.0 * 0.001).abs() < 1e-4);
}

/// After teardown no step runs, no input lands, and calling teardown again
/// is harmless.
#[test]
fn test_teardown_stops_all_further_work() {
    let mut backdrop = Backdrop::new(BackdropConfig::default(), 1000, 800);
    backdrop.on_pointer_move(100.0, 50.0);
    for _ in 0..10 {
        backdrop.step();
    }

    backdrop.teardown();
    let steps_at_teardown = backdrop.steps();
    let frozen_camera = backdrop.camera().position();
    let frozen_rotation = backdrop.field().rotation_y();

    for _ in 0..100 {
        assert!(!backdrop.step());
    }
    backdrop.on_pointer_move(999.0, 1.0);
    backdrop.on_resize(640, 480);
    backdrop.teardown();

    assert_eq!(backdrop.steps(), steps_at_teardown);
    assert_eq!(backdrop.camera().position(), frozen_camera);
    assert_eq!(backdrop.field().rotation_y(), frozen_rotation);
    assert_eq!(backdrop.size(), (1000, 800));
}

/// Resizing changes how later pointer positions are normalized.
#[test]
fn test_resize_rescales_pointer_normalization() {
    let mut backdrop = Backdrop::new(BackdropConfig::default(), 1000, 800);

    backdrop.on_resize(2000, 1000);
    backdrop.on_pointer_move(1000.0, 500.0);
    assert!(backdrop.pointer_offset().x.abs() < 0.001);
    assert!(backdrop.pointer_offset().y.abs() < 0.001);

    backdrop.on_pointer_move(0.0, 0.0);
    assert!((backdrop.pointer_offset().x - -0.5).abs() < 0.001);
    assert!((backdrop.pointer_offset().y - -0.5).abs() < 0.001);
}

/// The full contact path: fill the form, build the link, decode it back.
#[test]
fn test_contact_form_produces_decodable_link() {
    let mut form = ContactForm::new();
    form.set_name("Ada");
    form.set_purpose(Purpose::Collaboration);
    form.set_message("Hello");

    let url = form.whatsapp_url().unwrap();
    assert!(url.as_str().starts_with("https://wa.me/"));

    let text = url
        .query()
        .and_then(|q| q.strip_prefix("text="))
        .expect("link must carry a text parameter");
    let decoded = percent_encoding::percent_decode_str(text)
        .decode_utf8()
        .unwrap();
    assert_eq!(
        decoded,
        "*New Connection Request*\n\n*Name:* Ada\n*Purpose:* Collaboration\n*Message:* Hello"
    );
}
