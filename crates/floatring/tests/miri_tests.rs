//! Miri-compatible tests for detecting undefined behavior.
//!
//! Run with: `cargo +nightly miri test --test miri_tests`
//!
//! The crate has no `unsafe`, but the rings are shared across threads through
//! relaxed atomics. These tests keep capacities tiny so Miri can walk every
//! copy path (contiguous, split, whole, wrapping and oversize writes) and its
//! data race detector can watch a small concurrent run.

use floatring_rs::{NonBlockingRing, RingBuffer, StrictRing, ThreadSafeRing};
use std::sync::Arc;
use std::thread;

/// Every copy path on a 3-slot ring.
#[test]
fn miri_all_copy_paths() {
    let ring = NonBlockingRing::with_capacity(3);

    // contiguous write + read
    ring.write_slice(&[1.0, 2.0]);
    let mut out = [0.0; 2];
    ring.read_into(&mut out);
    assert_eq!(out, [1.0, 2.0]);

    // wrapping write, split read
    ring.write_slice(&[3.0, 4.0]);
    ring.read_into(&mut out);
    assert_eq!(out, [3.0, 3.0]);

    // whole read
    let mut whole = [0.0; 4];
    ring.read_into(&mut whole);
    assert_eq!(&whole[..3], &[4.0, 2.0, 3.0]);

    // oversize write (still within the backing allocation)
    ring.reset();
    ring.write_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(ring.read(), 4.0);
    assert_eq!(ring.read(), 5.0);
    assert_eq!(ring.read(), 3.0);
}

/// Capacity of one: every cursor update wraps.
#[test]
fn miri_single_slot_ring() {
    let ring = ThreadSafeRing::with_capacity(1);
    ring.write(1.0);
    assert_eq!(ring.read(), 1.0);
    ring.write_slice(&[2.0]);
    assert_eq!(ring.read(), 2.0);
    let mut out = [0.0; 3];
    ring.read_into(&mut out);
    assert_eq!(out, [2.0, 0.0, 0.0]);
    ring.reset();
    assert_eq!(ring.read(), 0.0);
}

/// Small concurrent run for the data race detector.
#[test]
fn miri_concurrent_writer_reader() {
    let rings: [Arc<dyn RingBuffer>; 3] = [
        Arc::new(NonBlockingRing::with_capacity(4)),
        Arc::new(ThreadSafeRing::with_capacity(4)),
        Arc::new(StrictRing::with_capacity(4)),
    ];

    for ring in rings {
        let writer = {
            let ring = Arc::clone(&ring);
            thread::spawn(move || {
                for i in 0..8 {
                    ring.write_slice(&[i as f32, i as f32]);
                }
            })
        };

        let mut out = [0.0; 3];
        for _ in 0..8 {
            ring.read_into(&mut out);
        }
        writer.join().unwrap();
    }
}
