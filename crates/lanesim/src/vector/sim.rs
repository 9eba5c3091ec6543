//! Reference implementation of [`VectorIsa`]: lanes execute in lock-step on
//! the host, one instruction at a time, and every instruction is reported to
//! a [`LaneObserver`] together with the mask it ran under.

use super::{Instruction, Lanes, Mask, VECTOR_WIDTH, VecF32, VecI32, VectorIsa};
use crate::stats::{LaneObserver, NoopObserver};

/// Simulated vector unit.
///
/// The observer is owned by the unit; pass `&mut stats` to keep ownership
/// on the caller's side.
#[derive(Debug, Default)]
pub struct SimulatedUnit<O: LaneObserver = NoopObserver> {
    observer: O,
}

impl SimulatedUnit<NoopObserver> {
    /// A unit that records nothing.
    pub fn unobserved() -> Self {
        Self::default()
    }
}

impl<O: LaneObserver> SimulatedUnit<O> {
    pub fn new(observer: O) -> Self {
        Self { observer }
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    fn masked<T: Copy + Default>(
        &mut self,
        instruction: Instruction,
        mask: Mask,
        mut f: impl FnMut(usize) -> T,
    ) -> Lanes<T> {
        self.observer.record(instruction, mask);
        Lanes::from_fn(|lane| if mask[lane] { f(lane) } else { T::default() })
    }
}

impl<O: LaneObserver> VectorIsa for SimulatedUnit<O> {
    fn first_lanes(&mut self, n: usize) -> Mask {
        self.observer.record(Instruction::MaskInit, Mask::all());
        Mask::first(n)
    }

    fn mask_and(&mut self, a: Mask, b: Mask) -> Mask {
        self.observer.record(Instruction::MaskAnd, Mask::all());
        Mask::from_fn(|lane| a[lane] && b[lane])
    }

    fn mask_not(&mut self, a: Mask) -> Mask {
        self.observer.record(Instruction::MaskNot, Mask::all());
        Mask::from_fn(|lane| !a[lane])
    }

    fn count_active(&mut self, mask: Mask) -> usize {
        self.observer.record(Instruction::CountBits, Mask::all());
        mask.count()
    }

    fn broadcast_f32(&mut self, value: f32, mask: Mask) -> VecF32 {
        self.masked(Instruction::Broadcast, mask, |_| value)
    }

    fn broadcast_i32(&mut self, value: i32, mask: Mask) -> VecI32 {
        self.masked(Instruction::Broadcast, mask, |_| value)
    }

    fn load_f32(&mut self, src: &[f32], mask: Mask) -> VecF32 {
        self.masked(Instruction::Load, mask, |lane| src[lane])
    }

    fn load_i32(&mut self, src: &[i32], mask: Mask) -> VecI32 {
        self.masked(Instruction::Load, mask, |lane| src[lane])
    }

    fn store_f32(&mut self, dst: &mut [f32], value: VecF32, mask: Mask) {
        self.observer.record(Instruction::Store, mask);
        for lane in 0..VECTOR_WIDTH {
            if mask[lane] {
                dst[lane] = value[lane];
            }
        }
    }

    fn add_f32(&mut self, a: VecF32, b: VecF32, mask: Mask) -> VecF32 {
        self.masked(Instruction::Add, mask, |lane| a[lane] + b[lane])
    }

    fn mul_f32(&mut self, a: VecF32, b: VecF32, mask: Mask) -> VecF32 {
        self.masked(Instruction::Mul, mask, |lane| a[lane] * b[lane])
    }

    fn abs_f32(&mut self, a: VecF32, mask: Mask) -> VecF32 {
        self.masked(Instruction::Abs, mask, |lane| a[lane].abs())
    }

    fn sub_i32(&mut self, a: VecI32, b: VecI32, mask: Mask) -> VecI32 {
        self.masked(Instruction::Sub, mask, |lane| a[lane].wrapping_sub(b[lane]))
    }

    fn gt_f32(&mut self, a: VecF32, b: VecF32, mask: Mask) -> Mask {
        self.masked(Instruction::CompareGt, mask, |lane| a[lane] > b[lane])
    }

    fn gt_i32(&mut self, a: VecI32, b: VecI32, mask: Mask) -> Mask {
        self.masked(Instruction::CompareGt, mask, |lane| a[lane] > b[lane])
    }

    fn select_f32(&mut self, mask: Mask, on_true: VecF32, on_false: VecF32) -> VecF32 {
        self.observer.record(Instruction::Select, Mask::all());
        VecF32::from_fn(|lane| if mask[lane] { on_true[lane] } else { on_false[lane] })
    }

    fn hadd_f32(&mut self, a: VecF32) -> VecF32 {
        self.observer.record(Instruction::HorizontalAdd, Mask::all());
        VecF32::from_fn(|lane| {
            let pair = lane & !1;
            a[pair] + a[pair + 1]
        })
    }

    fn interleave_f32(&mut self, a: VecF32) -> VecF32 {
        self.observer.record(Instruction::Interleave, Mask::all());
        let half = VECTOR_WIDTH / 2;
        VecF32::from_fn(|lane| {
            if lane < half {
                a[2 * lane]
            } else {
                a[2 * (lane - half) + 1]
            }
        })
    }
}
