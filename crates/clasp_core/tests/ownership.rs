//! Property tests for the owner state machine.
//!
//! `releases_match_the_model` generates random operation sequences (reset to
//! a fresh or recycled handle, clear, detach) and applies them in lockstep
//! to a [`Scoped`] owner and to a reference model that predicts the exact
//! release sequence. After every step the owner's observers must agree with
//! the model; when the owner finally drops, the recorded releases must equal
//! the prediction — which encodes release-exactly-once per ownership period.
//!
//! Handles are drawn from `0..64` so sequences frequently re-own recycled
//! values; the sentinel (`-1`) is never generated, so every stored handle is
//! releasable.

use std::cell::RefCell;

use clasp_core::{ClosePolicy, Scoped};
use proptest::prelude::*;

thread_local! {
    static CLOSED: RefCell<Vec<i32>> = const { RefCell::new(Vec::new()) };
}

fn record(handle: i32) -> i32 {
    CLOSED.with(|log| log.borrow_mut().push(handle));
    0
}

fn reset_log() {
    CLOSED.with(|log| log.borrow_mut().clear());
}

fn closed() -> Vec<i32> {
    CLOSED.with(|log| log.borrow().clone())
}

struct Record;

// SAFETY: `record` is a safe function and accepts every `i32`.
unsafe impl ClosePolicy for Record {
    type Close = fn(i32) -> i32;

    const CLOSE: Self::Close = record;
    const SENTINEL: i32 = -1;
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Reset(i32),
    Clear,
    Detach,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..64i32).prop_map(Op::Reset),
        Just(Op::Clear),
        Just(Op::Detach),
    ]
}

proptest! {
    #[test]
    fn releases_match_the_model(ops in prop::collection::vec(op_strategy(), 0..32)) {
        reset_log();

        let mut owner = Scoped::<Record>::empty();
        let mut held: Option<i32> = None;
        let mut expected: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Reset(handle) => {
                    if let Some(previous) = held {
                        expected.push(previous);
                    }
                    owner.reset(handle);
                    held = Some(handle);
                }
                Op::Clear => {
                    if let Some(previous) = held.take() {
                        expected.push(previous);
                    }
                    owner.clear();
                }
                Op::Detach => {
                    let raw = owner.detach();
                    prop_assert_eq!(raw, held.take().unwrap_or(Record::SENTINEL));
                }
            }
            prop_assert_eq!(owner.get(), held.unwrap_or(Record::SENTINEL));
            prop_assert_eq!(owner.is_valid(), held.is_some());
        }

        drop(owner);
        if let Some(last) = held {
            expected.push(last);
        }
        prop_assert_eq!(closed(), expected);
    }
}

#[test]
fn every_exit_path_releases() {
    fn consume(early: bool) -> Option<i32> {
        let owner = Scoped::<Record>::new(21);
        if early {
            return Some(owner.get()); // released on this path
        }
        drop(owner); // ... and explicitly on this one
        None
    }

    reset_log();
    assert_eq!(consume(true), Some(21));
    assert_eq!(consume(false), None);
    assert_eq!(closed(), vec![21, 21]);
}
