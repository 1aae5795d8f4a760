//! Integration tests for tracker-driven interpolation
//!
//! These tests drive collidables only through the tracker, the way a host game
//! loop does:
//! 1. `pre_update` before every simulation step
//! 2. mutations during the step
//! 3. `interpolate(alpha)` before every render

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mini2dx_collision::{
    CollisionArea, CollisionBox, CollisionError, CollisionObject, CollisionPoint, CollisionPolygon,
    InterpolatedShape, InterpolationTracker, PositionChangeListener, SizeChangeListener,
};

fn tracker() -> Arc<InterpolationTracker> {
    Arc::new(InterpolationTracker::new())
}

fn render_bounds(b: &CollisionBox) -> (i32, i32, i32, i32) {
    (b.render_x(), b.render_y(), b.render_width(), b.render_height())
}

#[derive(Default)]
struct ChangeCounter {
    moves: AtomicUsize,
    resizes: AtomicUsize,
}

impl PositionChangeListener<CollisionBox> for ChangeCounter {
    fn position_changed(&self, _moved: &CollisionBox) {
        self.moves.fetch_add(1, Ordering::SeqCst);
    }
}

impl SizeChangeListener<CollisionBox> for ChangeCounter {
    fn size_changed(&self, _changed: &CollisionBox) {
        self.resizes.fetch_add(1, Ordering::SeqCst);
    }
}

// ==================== Convergence ====================

/// Box moved by one step converges as alpha rises to 1
#[test]
fn test_box_scenario_through_tracker() {
    let tracker = tracker();
    let b = CollisionBox::new(&tracker, 0.0, 0.0, 10.0, 10.0);

    tracker.pre_update();
    b.set(10.0, 0.0, 10.0, 10.0).unwrap();
    assert!(b.is_interpolate_required());

    tracker.interpolate(0.5);
    assert_eq!(render_bounds(&b), (5, 0, 10, 10));

    tracker.interpolate(1.0);
    assert_eq!(render_bounds(&b), (10, 0, 10, 10));
    assert!(!b.is_interpolate_required());
}

/// Increasing alpha always ends at the rounded current state
#[test]
fn test_convergence_for_many_alpha_sequences() {
    let tracker = tracker();
    let b = CollisionBox::new(&tracker, 1.3, -2.7, 4.0, 4.0);
    let p = CollisionPoint::new(&tracker, 0.0, 0.0);
    let poly = CollisionPolygon::new(&tracker, &[0.0, 0.0, 3.0, 0.0, 0.0, 3.0]).unwrap();

    for steps in 1..=8 {
        tracker.pre_update();
        b.set(13.7 * steps as f32, 2.2, 4.0 + steps as f32, 9.9).unwrap();
        p.translate(-7.3, 3.1).unwrap();
        poly.translate(2.6, -1.4).unwrap();

        for i in 1..=steps {
            tracker.interpolate(i as f32 / steps as f32);
        }

        assert!(!b.is_interpolate_required());
        assert!(!p.is_interpolate_required());
        assert!(!poly.is_interpolate_required());
        assert_eq!(b.render_coords(), b.shape().render_coords());
        assert_eq!(p.render_coords(), p.shape().render_coords());
        assert_eq!(poly.render_coords(), poly.shape().render_coords());
    }
}

/// Targets on a half pixel round the same way as current at alpha 1.0
#[test]
fn test_half_pixel_targets_converge_at_full_alpha() {
    let tracker = tracker();
    let b = CollisionBox::new(&tracker, -88.775_34, 0.0, 2.0, 2.0);
    let p = CollisionPoint::new(&tracker, 0.944_093_5, 0.0);

    tracker.pre_update();
    b.set_x(74.5).unwrap();
    p.set_x(-3.5).unwrap();
    tracker.interpolate(1.0);

    assert_eq!(b.render_x(), 75);
    assert_eq!(p.render_x(), -3);
    assert!(!b.is_interpolate_required());
    assert!(!p.is_interpolate_required());
}

/// Once converged, further interpolation leaves render coordinates alone
#[test]
fn test_converged_interpolation_is_noop() {
    let tracker = tracker();
    let b = CollisionBox::new(&tracker, 0.0, 0.0, 10.0, 10.0);

    tracker.pre_update();
    b.set_x(30.0).unwrap();
    tracker.interpolate(1.0);
    let settled = render_bounds(&b);

    for alpha in [0.0, 0.25, 0.5, 0.75] {
        tracker.interpolate(alpha);
        assert_eq!(render_bounds(&b), settled);
    }
}

/// Unmoved collidables are not blended at all
#[test]
fn test_idle_collidables_stay_put() {
    let tracker = tracker();
    let still = CollisionBox::new(&tracker, 2.0, 2.0, 1.0, 1.0);
    let moving = CollisionBox::new(&tracker, 0.0, 0.0, 1.0, 1.0);

    tracker.pre_update();
    moving.set_x(8.0).unwrap();
    tracker.interpolate(0.5);

    assert_eq!(render_bounds(&still), (2, 2, 1, 1));
    assert_eq!(render_bounds(&moving), (4, 0, 1, 1));
}

// ==================== forceTo ====================

#[test]
fn test_force_to_has_no_lag() {
    let tracker = tracker();
    let b = CollisionBox::new(&tracker, 0.0, 0.0, 10.0, 10.0);

    tracker.pre_update();
    b.set_x(40.0).unwrap();
    b.force_to_bounds(100.4, 50.5, 8.49, 2.51).unwrap();

    assert_eq!(render_bounds(&b), (100, 51, 8, 3));
    assert!(!b.is_interpolate_required());

    tracker.interpolate(0.3);
    assert_eq!(render_bounds(&b), (100, 51, 8, 3));
}

#[test]
fn test_polygon_force_to_bounds_unsupported() {
    let tracker = tracker();
    let poly = CollisionPolygon::new(&tracker, &[0.0, 0.0, 3.0, 0.0, 0.0, 3.0]).unwrap();
    let area: &dyn CollisionArea = &*poly;

    let err = area.force_to_bounds(0.0, 0.0, 1.0, 1.0).unwrap_err();
    assert!(matches!(err, CollisionError::UnsupportedOperation(_)));
}

// ==================== Identity ====================

#[test]
fn test_ids() {
    let tracker = tracker();
    assert_eq!(CollisionBox::with_id(&tracker, 5, 0.0, 0.0, 1.0, 1.0).id(), 5);

    let first = CollisionBox::new(&tracker, 0.0, 0.0, 1.0, 1.0);
    let second = CollisionBox::new(&tracker, 0.0, 0.0, 1.0, 1.0);
    assert!(second.id() > first.id());
}

// ==================== Listeners ====================

#[test]
fn test_listener_receives_exactly_one_callback_per_mutation() {
    let tracker = tracker();
    let b = CollisionBox::new(&tracker, 0.0, 0.0, 10.0, 10.0);
    let counter = Arc::new(ChangeCounter::default());
    let position: Arc<dyn PositionChangeListener<CollisionBox>> = counter.clone();
    let size: Arc<dyn SizeChangeListener<CollisionBox>> = counter.clone();
    b.add_position_listener(position.clone());
    b.add_size_listener(size.clone());

    b.set_x(1.0).unwrap();
    assert_eq!(counter.moves.load(Ordering::SeqCst), 1);
    assert_eq!(counter.resizes.load(Ordering::SeqCst), 0);

    b.set(2.0, 2.0, 3.0, 3.0).unwrap();
    assert_eq!(counter.moves.load(Ordering::SeqCst), 2);
    assert_eq!(counter.resizes.load(Ordering::SeqCst), 1);

    b.remove_position_listener(&position);
    b.remove_size_listener(&size);
    b.set(4.0, 4.0, 5.0, 5.0).unwrap();
    assert_eq!(counter.moves.load(Ordering::SeqCst), 2);
    assert_eq!(counter.resizes.load(Ordering::SeqCst), 1);
}

/// A listener may read the collidable it is notified about
#[test]
fn test_listener_can_read_moved_collidable() {
    struct Follower {
        target: Arc<CollisionPoint>,
    }

    impl PositionChangeListener<CollisionBox> for Follower {
        fn position_changed(&self, moved: &CollisionBox) {
            self.target.set(moved.x(), moved.y()).unwrap();
        }
    }

    let tracker = tracker();
    let leader = CollisionBox::new(&tracker, 0.0, 0.0, 2.0, 2.0);
    let marker = CollisionPoint::new(&tracker, 0.0, 0.0);
    leader.add_position_listener(Arc::new(Follower { target: marker.clone() }));

    tracker.pre_update();
    leader.set_position(6.0, 8.0).unwrap();
    tracker.interpolate(0.5);

    assert_eq!((marker.x(), marker.y()), (6.0, 8.0));
    assert_eq!((marker.render_x(), marker.render_y()), (3, 4));
}

/// Despawning from a position listener
#[test]
fn test_listener_can_dispose_moved_collidable() {
    struct Despawn;

    impl PositionChangeListener<CollisionBox> for Despawn {
        fn position_changed(&self, moved: &CollisionBox) {
            if moved.x() > 320.0 {
                moved.dispose();
            }
        }
    }

    let tracker = tracker();
    let b = CollisionBox::new(&tracker, 0.0, 0.0, 2.0, 2.0);
    let counter = Arc::new(ChangeCounter::default());
    b.add_position_listener(Arc::new(Despawn));
    b.add_position_listener(counter.clone());

    b.set_x(100.0).unwrap();
    assert!(!b.is_disposed());
    assert_eq!(counter.moves.load(Ordering::SeqCst), 1);

    b.set_x(500.0).unwrap();
    assert!(b.is_disposed());
    assert!(!tracker.is_registered(&*b));
    assert_eq!(counter.moves.load(Ordering::SeqCst), 1);
    tracker.pre_update();
    tracker.interpolate(1.0);
}

#[test]
fn test_polygon_reshape_notifies_size_listeners() {
    struct Reshapes(AtomicUsize);

    impl SizeChangeListener<CollisionPolygon> for Reshapes {
        fn size_changed(&self, _changed: &CollisionPolygon) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    let tracker = tracker();
    let poly = CollisionPolygon::new(&tracker, &[0.0, 0.0, 3.0, 0.0, 0.0, 3.0]).unwrap();
    let reshapes = Arc::new(Reshapes(AtomicUsize::new(0)));
    poly.add_size_listener(reshapes.clone());

    poly.translate(1.0, 1.0).unwrap();
    assert_eq!(reshapes.0.load(Ordering::SeqCst), 0);

    poly.set_vertices(&[0.0, 0.0, 6.0, 0.0, 0.0, 6.0]).unwrap();
    assert_eq!(reshapes.0.load(Ordering::SeqCst), 1);
}

// ==================== Tracker membership ====================

#[test]
fn test_membership_follows_lifecycle() {
    let tracker = tracker();
    let b = CollisionBox::new(&tracker, 0.0, 0.0, 1.0, 1.0);
    let p = CollisionPoint::new(&tracker, 0.0, 0.0);

    assert!(tracker.is_registered(&*b));
    assert!(tracker.is_registered(&*p));
    assert_eq!(tracker.len(), 2);

    b.dispose();
    assert!(!tracker.is_registered(&*b));
    assert!(tracker.is_registered(&*p));
    assert_eq!(b.set_x(3.0), Err(CollisionError::Disposed(b.id())));
}

#[test]
fn test_deregister_all_unregisters_everything() {
    let tracker = tracker();
    let boxes: Vec<_> = (0..10)
        .map(|i| CollisionBox::new(&tracker, i as f32, 0.0, 1.0, 1.0))
        .collect();

    tracker.deregister_all();

    assert!(boxes.iter().all(|b| !b.is_tracked()));
    assert!(tracker.is_empty());
}

#[test]
fn test_dropped_collidable_leaves_tracker() {
    let tracker = tracker();
    let b = CollisionBox::new(&tracker, 0.0, 0.0, 1.0, 1.0);
    let id = b.id();
    drop(b);

    assert!(!tracker.contains_id(id));
    tracker.pre_update();
    tracker.interpolate(1.0);
}

// ==================== Concurrency ====================

/// Simulation threads mutate their own collidables while the main thread
/// runs the frame protocol
#[test]
fn test_concurrent_mutation_and_fan_out() {
    let tracker = tracker();
    let boxes: Vec<_> = (0..8)
        .map(|i| CollisionBox::new(&tracker, 0.0, i as f32 * 10.0, 4.0, 4.0))
        .collect();

    let workers: Vec<_> = boxes
        .iter()
        .cloned()
        .map(|b| {
            std::thread::spawn(move || {
                for _ in 0..100 {
                    b.translate(1.0, 0.0).unwrap();
                }
            })
        })
        .collect();

    for _ in 0..50 {
        tracker.pre_update();
        tracker.interpolate(0.5);
    }
    for worker in workers {
        worker.join().unwrap();
    }

    tracker.pre_update();
    for b in &boxes {
        b.force_to(b.x(), b.y()).unwrap();
        assert_eq!(b.render_x(), 100);
    }
}
