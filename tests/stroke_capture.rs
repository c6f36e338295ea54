use egui::Pos2;
use ink_canvas::{
    COMMIT_TIMEOUT, CapturePhase, StrokeEvent, StrokeRecognizer, Touch, TouchEvent,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn touch(id: u64, x: f32, y: f32, timestamp: f64) -> Touch {
    Touch {
        id,
        pos: Pos2::new(x, y),
        timestamp,
    }
}

fn began(touches: Vec<Touch>) -> TouchEvent {
    TouchEvent::Began { touches }
}

fn moved(t: Touch) -> TouchEvent {
    TouchEvent::Moved {
        touch: t,
        coalesced: Vec::new(),
    }
}

#[test]
fn single_finger_draw_captures_every_sample_in_order() {
    init_logs();
    let mut recognizer = StrokeRecognizer::new();

    assert_eq!(
        recognizer.handle_event(&began(vec![touch(1, 0.0, 0.0, 0.0)])),
        Some(StrokeEvent::Possible)
    );
    let stroke = recognizer.stroke().unwrap().clone();

    recognizer.poll(COMMIT_TIMEOUT + 0.01);
    assert_eq!(recognizer.phase(), CapturePhase::Active);

    for i in 1..=5 {
        let t = 0.3 + i as f64 * 0.016;
        assert_eq!(
            recognizer.handle_event(&moved(touch(1, i as f32 * 10.0, 0.0, t))),
            Some(StrokeEvent::Moved)
        );
    }

    assert_eq!(
        recognizer.handle_event(&TouchEvent::Ended {
            touch: touch(1, 50.0, 0.0, 0.5),
        }),
        Some(StrokeEvent::Ended)
    );
    assert_eq!(recognizer.phase(), CapturePhase::Ended);

    // Initial touch-down plus the five moves, in report order.
    let stroke = stroke.read();
    assert_eq!(stroke.samples().len(), 6);
    let xs: Vec<f32> = stroke
        .samples()
        .iter()
        .map(|s| s.location().x)
        .collect();
    assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
}

#[test]
fn second_finger_inside_commit_window_fails_the_gesture() {
    init_logs();
    let mut recognizer = StrokeRecognizer::new();

    assert_eq!(
        recognizer.handle_event(&began(vec![touch(1, 0.0, 0.0, 0.0)])),
        Some(StrokeEvent::Possible)
    );
    assert_eq!(
        recognizer.handle_event(&began(vec![touch(2, 100.0, 0.0, 0.1)])),
        Some(StrokeEvent::Failed)
    );
    assert_eq!(recognizer.phase(), CapturePhase::Failed);
    assert!(recognizer.stroke().is_none());
}

#[test]
fn simultaneous_two_finger_down_surfaces_nothing() {
    init_logs();
    let mut recognizer = StrokeRecognizer::new();

    let event = began(vec![touch(1, 0.0, 0.0, 0.0), touch(2, 50.0, 0.0, 0.0)]);
    assert_eq!(recognizer.handle_event(&event), None);
    assert_eq!(recognizer.phase(), CapturePhase::Failed);
    assert!(recognizer.stroke().is_none());
}

#[test]
fn commit_fires_at_exactly_the_timeout() {
    init_logs();
    let mut recognizer = StrokeRecognizer::new();

    recognizer.handle_event(&began(vec![touch(1, 0.0, 0.0, 0.0)]));
    assert_eq!(recognizer.phase(), CapturePhase::Possible);

    recognizer.poll(COMMIT_TIMEOUT);
    assert_eq!(recognizer.phase(), CapturePhase::Active);
}

#[test]
fn second_finger_after_timeout_is_ignored() {
    init_logs();
    let mut recognizer = StrokeRecognizer::new();

    recognizer.handle_event(&began(vec![touch(1, 0.0, 0.0, 0.0)]));
    let stroke = recognizer.stroke().unwrap().clone();

    // The extra finger arrives after the window even though no poll ran;
    // the event's own timestamp commits the gesture first.
    assert_eq!(
        recognizer.handle_event(&began(vec![touch(2, 80.0, 0.0, COMMIT_TIMEOUT + 0.05)])),
        None
    );
    assert_eq!(recognizer.phase(), CapturePhase::Active);

    // Moves from the ignored finger contribute nothing...
    assert_eq!(
        recognizer.handle_event(&moved(touch(2, 90.0, 0.0, 0.35))),
        None
    );
    // ...and its lift does not end the stroke.
    assert_eq!(
        recognizer.handle_event(&TouchEvent::Ended {
            touch: touch(2, 90.0, 0.0, 0.4),
        }),
        None
    );
    assert_eq!(recognizer.phase(), CapturePhase::Active);

    recognizer.handle_event(&moved(touch(1, 10.0, 0.0, 0.45)));
    assert_eq!(stroke.read().samples().len(), 2);
}

#[test]
fn platform_cancellation_unwinds_the_gesture() {
    init_logs();
    let mut recognizer = StrokeRecognizer::new();

    recognizer.handle_event(&began(vec![touch(1, 0.0, 0.0, 0.0)]));
    recognizer.handle_event(&moved(touch(1, 5.0, 5.0, 0.05)));

    assert_eq!(
        recognizer.handle_event(&TouchEvent::Cancelled {
            touch: touch(1, 5.0, 5.0, 0.1),
        }),
        Some(StrokeEvent::Cancelled)
    );
    assert_eq!(recognizer.phase(), CapturePhase::Cancelled);
    assert!(recognizer.stroke().is_none());
}

#[test]
fn coalesced_positions_append_as_individual_samples() {
    init_logs();
    let mut recognizer = StrokeRecognizer::new();

    recognizer.handle_event(&began(vec![touch(1, 0.0, 0.0, 0.0)]));
    let stroke = recognizer.stroke().unwrap().clone();

    let event = TouchEvent::Moved {
        touch: touch(1, 6.0, 0.0, 0.048),
        coalesced: vec![
            touch(1, 2.0, 0.0, 0.032),
            touch(1, 4.0, 0.0, 0.040),
            touch(1, 6.0, 0.0, 0.048),
        ],
    };
    // One notification per report, three samples appended.
    assert_eq!(recognizer.handle_event(&event), Some(StrokeEvent::Moved));

    let stroke = stroke.read();
    assert_eq!(stroke.samples().len(), 4);
    let xs: Vec<f32> = stroke.samples().iter().map(|s| s.location().x).collect();
    assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0]);
}

#[test]
fn moves_for_an_untracked_finger_are_dropped() {
    init_logs();
    let mut recognizer = StrokeRecognizer::new();

    recognizer.handle_event(&began(vec![touch(1, 0.0, 0.0, 0.0)]));
    let stroke = recognizer.stroke().unwrap().clone();

    assert_eq!(
        recognizer.handle_event(&moved(touch(7, 99.0, 99.0, 0.02))),
        None
    );
    assert_eq!(stroke.read().samples().len(), 1);
}

#[test]
fn lift_before_the_timeout_still_commits() {
    // A quick tap ends while still provisional; it is a committed dot, not
    // a rejected gesture.
    init_logs();
    let mut recognizer = StrokeRecognizer::new();

    recognizer.handle_event(&began(vec![touch(1, 3.0, 3.0, 0.0)]));
    assert_eq!(
        recognizer.handle_event(&TouchEvent::Ended {
            touch: touch(1, 3.0, 3.0, 0.1),
        }),
        Some(StrokeEvent::Ended)
    );
}

#[test]
fn recognizer_is_reusable_after_a_terminal_phase() {
    init_logs();
    let mut recognizer = StrokeRecognizer::new();

    recognizer.handle_event(&began(vec![touch(1, 0.0, 0.0, 0.0)]));
    recognizer.handle_event(&TouchEvent::Ended {
        touch: touch(1, 0.0, 0.0, 0.1),
    });
    assert_eq!(recognizer.phase(), CapturePhase::Ended);

    assert_eq!(
        recognizer.handle_event(&began(vec![touch(2, 1.0, 1.0, 1.0)])),
        Some(StrokeEvent::Possible)
    );
    assert_eq!(recognizer.phase(), CapturePhase::Possible);
    assert!(recognizer.stroke().is_some());
}

#[test]
fn reset_clears_everything() {
    init_logs();
    let mut recognizer = StrokeRecognizer::new();

    recognizer.handle_event(&began(vec![touch(1, 0.0, 0.0, 0.0)]));
    recognizer.reset();
    assert_eq!(recognizer.phase(), CapturePhase::Idle);
    assert!(recognizer.stroke().is_none());

    // A later poll past the old deadline must not commit anything.
    recognizer.poll(10.0);
    assert_eq!(recognizer.phase(), CapturePhase::Idle);
}
