use embedded_time::clock::Error as ClockError;
use embedded_time::fraction::Fraction;
use embedded_time::{Clock, Instant};
use tstp::buffer::{Buffer, BufferPool};
use tstp::geometry::{Coordinates, Region};
use tstp::pipeline::{FixedLocation, Forward, Locator, NoopPolicy, Router, Security, Timekeeper};

/// A clock that never ticks, standing in for a disciplined network
/// clock in tests that only care about `Timekeeper::marshal`/`update`.
struct FixedClock(u64);

impl Clock for FixedClock {
    type T = u64;
    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

    fn try_now(&self) -> Result<Instant<Self>, ClockError> {
        Ok(Instant::new(self.0))
    }
}

#[test]
fn locator_marshal_sets_symmetric_initial_distances() {
    let locator = Locator::new(FixedLocation(Coordinates::new(0i32, 0, 0)));
    let dest = Region::new(Coordinates::new(3i32, 4, 0), 10, 0, 100);
    let mut buf = blank_buffer();
    locator.marshal(&mut buf, &dest);
    assert_eq!(buf.meta.my_distance, 5);
    assert_eq!(buf.meta.sender_distance, 5);
}

#[test]
fn locator_update_takes_the_microframe_hint() {
    let locator = Locator::new(FixedLocation(Coordinates::new(0i32, 0, 0)));
    let dest = Region::new(Coordinates::new(100i32, 0, 0), 10, 0, 100);
    let mut buf = blank_buffer();
    buf.meta.is_microframe = true;
    locator.update(&mut buf, &dest, Some(42));
    assert_eq!(buf.meta.sender_distance, 42);
}

#[test]
fn router_forwards_only_when_strictly_closer() {
    let router = Router::new(170);
    let mut pool: BufferPool<4> = BufferPool::new();
    let dest = Region::new(Coordinates::new(200i32, 0, 0), 0, 0, u64::MAX);

    let handle = pool.alloc(3).unwrap();
    {
        let buf = pool.get_mut(handle).unwrap();
        buf.meta.sender_distance = 200;
        buf.meta.my_distance = 100;
        buf.meta.id = 7;
    }
    let buf = *pool.get(handle).unwrap();

    let (destined, forward) = router
        .update_data(&buf, &dest, Coordinates::new(100i32, 0, 0), 0, &mut pool)
        .unwrap();
    assert!(!destined);
    match forward {
        Forward::Relay { handle: relay } => {
            let relay_buf = pool.get(relay).unwrap();
            assert_eq!(relay_buf.meta.id, 7);
            assert!(!relay_buf.meta.is_new);
        }
        Forward::None => panic!("node strictly closer to destination must relay"),
    }
}

#[test]
fn router_marks_destined_to_me_inside_region_without_relaying() {
    let router = Router::new(170);
    let mut pool: BufferPool<4> = BufferPool::new();
    let dest = Region::new(Coordinates::new(200i32, 0, 0), 0, 0, u64::MAX);

    let handle = pool.alloc(3).unwrap();
    {
        let buf = pool.get_mut(handle).unwrap();
        buf.meta.sender_distance = 0;
        buf.meta.my_distance = 0;
    }
    let buf = *pool.get(handle).unwrap();

    let (destined, forward) = router
        .update_data(&buf, &dest, Coordinates::new(200i32, 0, 0), 0, &mut pool)
        .unwrap();
    assert!(destined);
    assert!(matches!(forward, Forward::None));
}

#[test]
fn security_noop_policy_always_trusts() {
    let security = Security::new(NoopPolicy);
    let mut buf = blank_buffer();
    security.update(&mut buf);
    assert!(buf.meta.trusted);
}

#[test]
fn timekeeper_stamps_expiry_from_the_destination_window() {
    let timekeeper = Timekeeper::new(FixedClock(5_000_000));
    let dest = Region::new(Coordinates::new(0i32, 0, 0), 10, 0, 42);
    let mut buf = blank_buffer();

    timekeeper.marshal(&mut buf, &dest);
    assert_eq!(buf.meta.expiry, 42);

    buf.meta.expiry = 0;
    timekeeper.update(&mut buf, &dest);
    assert_eq!(buf.meta.expiry, 42);

    assert_eq!(timekeeper.now(), Some(5_000_000));
}

fn blank_buffer() -> Buffer {
    let mut pool: BufferPool<1> = BufferPool::new();
    let handle = pool.alloc(0).unwrap();
    *pool.get(handle).unwrap()
}
