//! Drives the whole control frame by frame with a manual clock: mount, tap,
//! watch the four phases play out, land back at rest.

use std::time::Duration;

use cestino::button::LABEL;
use cestino::prelude::*;

const FRAME_MS: u64 = 16;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn mount() -> DeleteButton {
    let mut button = delete_button();
    button.tick(ms(0));
    button.layout(Constraints::unbounded());
    button.set_origin(0.0, 0.0);
    button
}

fn tap_center(button: &mut DeleteButton) {
    let b = button.bounds();
    let (x, y) = (b.x + b.width / 2.0, b.y + b.height / 2.0);
    button.event(&Event::MouseDown {
        x,
        y,
        button: MouseButton::Left,
    });
    button.event(&Event::MouseUp {
        x,
        y,
        button: MouseButton::Left,
    });
}

/// One simulated frame: tick, relayout, reposition.
fn frame(button: &mut DeleteButton, now_ms: u64) -> bool {
    let active = button.tick(ms(now_ms));
    button.layout(Constraints::unbounded());
    button.set_origin(0.0, 0.0);
    active
}

#[test]
fn tap_once_plays_the_full_choreography_and_returns_to_rest() {
    let mut button = mount();
    let initial_width = button.bounds().width;
    assert!(initial_width > 0.0);

    tap_center(&mut button);
    assert!(!button.is_idle(), "tap must start the sequence");

    let mut t = 0u64;
    let mut saw_reveal = false;
    let mut saw_overshoot = false;

    // Expand: both scalars reach the expanded checkpoint together at 600 ms.
    while t < 640 {
        t += FRAME_MS;
        frame(&mut button, t);
    }
    assert_eq!(button.sequencer().scale(), 4.0);
    assert_eq!(button.sequencer().position(), 4.0);
    assert_eq!(button.sequencer().phase(), Phase::Reveal);

    // Reveal: strictly staggered starts, first letter before the last.
    while t < 800 {
        t += FRAME_MS;
        frame(&mut button, t);
    }
    assert!(button.sequencer().letter_progress(0) > 0.0);
    assert_eq!(button.sequencer().letter_progress(LABEL.len() - 1), 0.0);

    // Run the rest to completion.
    loop {
        t += FRAME_MS;
        let active = frame(&mut button, t);
        if button.sequencer().phase() == Phase::Reveal {
            saw_reveal = true;
        }
        if (button.sequencer().position() - 5.0).abs() < 1e-4 {
            saw_overshoot = true;
        }
        if !active {
            break;
        }
        assert!(t < 10_000, "sequence never settled");
    }

    assert!(saw_reveal);
    assert!(saw_overshoot, "position must pass through the overshoot checkpoint");

    // Everything returns exactly to its initial value.
    assert!(button.is_idle());
    assert_eq!(button.sequencer().scale(), 1.0);
    assert_eq!(button.sequencer().position(), 1.0);
    for i in 0..LABEL.len() {
        assert_eq!(button.sequencer().letter_progress(i), 0.0);
        assert_eq!(button.sequencer().letter_opacity(i), 1.0);
    }

    // The footprint never moved.
    assert_eq!(button.bounds().width, initial_width);
    assert_eq!(button.pinned_width(), Some(initial_width));
}

#[test]
fn tap_during_a_running_sequence_changes_nothing() {
    let mut button = mount();
    tap_center(&mut button);

    let mut t = 0u64;
    while t < 900 {
        t += FRAME_MS;
        frame(&mut button, t);
    }

    let phase = button.sequencer().phase();
    let scale = button.sequencer().scale();
    let position = button.sequencer().position();
    let progress: Vec<f32> = (0..LABEL.len())
        .map(|i| button.sequencer().letter_progress(i))
        .collect();

    tap_center(&mut button);

    assert_eq!(button.sequencer().phase(), phase);
    assert_eq!(button.sequencer().scale(), scale);
    assert_eq!(button.sequencer().position(), position);
    for (i, p) in progress.iter().enumerate() {
        assert_eq!(button.sequencer().letter_progress(i), *p);
    }
}

#[test]
fn width_stays_pinned_while_content_scales() {
    let mut button = mount();
    let width = button.bounds().width;
    tap_center(&mut button);

    let mut t = 0u64;
    while t < 2600 {
        t += FRAME_MS;
        frame(&mut button, t);
        assert_eq!(button.bounds().width, width, "footprint moved at {t} ms");
    }
}

#[test]
fn frames_composite_through_the_software_pipeline() {
    let mut button = mount();
    frame(&mut button, 16);

    let compositor = Compositor::new(360, 180);
    // Center the 130x45 button on the surface.
    button.set_origin(115.0, 67.5);
    let mut ctx = PaintContext::new();
    button.paint(&mut ctx);
    let image = compositor.render(&ctx, Color::WHITE);

    // A spot inside the backdrop but clear of the icon box and the label
    // row reads pure red; the background stays white.
    let inside = image.get_pixel(160, 105);
    assert_eq!(inside.0[0], 255);
    assert!(inside.0[1] < 10 && inside.0[2] < 10);
    let corner = image.get_pixel(2, 2);
    assert_eq!(corner.0, [255, 255, 255, 255]);
}

#[test]
fn shell_without_a_font_stays_blank_forever() {
    let (tx, rx) = std::sync::mpsc::channel();
    drop(tx);
    let mut shell = Shell::with_loader(rx);

    for i in 0..50 {
        shell.tick(ms(i * FRAME_MS));
        shell.layout(Constraints::tight(Size::new(360.0, 180.0)));
        shell.set_origin(0.0, 0.0);
    }

    assert_eq!(shell.status().get(), FontStatus::Failed);
    assert!(!shell.is_mounted());

    // Only the blank background gets painted, frame after frame.
    let mut ctx = PaintContext::new();
    shell.paint(&mut ctx);
    assert_eq!(ctx.primitives().len(), 1);
}
