//! Fixed-width vector execution model.
//!
//! Kernels never touch lanes directly. They talk to a [`VectorIsa`]
//! implementation, which exposes the instruction contract the vectorized
//! kernels are written against:
//!
//! - masked loads and stores of `f32` / `i32` lanes
//! - elementwise add, multiply, abs (f32) and subtract (i32)
//! - compare-greater producing a [`Mask`]
//! - `select(mask, on_true, on_false)` merges
//! - mask construction, and / not, and active population count
//! - horizontal add and interleave for reductions
//!
//! Every instruction takes the active-lane mask it executes under. Inactive
//! lanes of an arithmetic result are zero (`false` for comparisons); the only
//! way to keep an old value in a lane is an explicit `select`.

use std::fmt;
use std::ops::Index;

pub mod sim;

pub use sim::SimulatedUnit;

/// Number of lanes in the simulated vector unit.
pub const VECTOR_WIDTH: usize = 4;

// The reduction kernel collapses lanes by repeated halving.
const _: () = assert!(VECTOR_WIDTH.is_power_of_two());

/// One vector register: `VECTOR_WIDTH` lanes of `T`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lanes<T>(pub [T; VECTOR_WIDTH]);

pub type VecF32 = Lanes<f32>;
pub type VecI32 = Lanes<i32>;
/// Active-lane mask: `true` lanes take part in an instruction.
pub type Mask = Lanes<bool>;

impl<T: Copy> Lanes<T> {
    /// Every lane set to `value`.
    pub fn splat(value: T) -> Self {
        Self([value; VECTOR_WIDTH])
    }

    /// Build a register lane by lane.
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self(std::array::from_fn(f))
    }
}

impl<T> Index<usize> for Lanes<T> {
    type Output = T;

    fn index(&self, lane: usize) -> &T {
        &self.0[lane]
    }
}

impl Mask {
    pub fn all() -> Self {
        Self::splat(true)
    }

    pub fn none() -> Self {
        Self::splat(false)
    }

    /// The first `n` lanes active, the rest inactive. `n >= VECTOR_WIDTH`
    /// yields a full mask.
    pub fn first(n: usize) -> Self {
        Self::from_fn(|lane| lane < n)
    }

    /// Number of active lanes.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&active| active).count()
    }
}

/// Renders active lanes as `*` and inactive lanes as `_`.
impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &active in &self.0 {
            f.write_str(if active { "*" } else { "_" })?;
        }
        Ok(())
    }
}

/// Instructions of the simulated vector unit, as reported to a
/// [`LaneObserver`](crate::stats::LaneObserver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Instruction {
    MaskInit,
    MaskAnd,
    MaskNot,
    CountBits,
    Broadcast,
    Load,
    Store,
    Add,
    Sub,
    Mul,
    Abs,
    CompareGt,
    Select,
    HorizontalAdd,
    Interleave,
}

impl Instruction {
    pub const ALL: [Instruction; 15] = [
        Instruction::MaskInit,
        Instruction::MaskAnd,
        Instruction::MaskNot,
        Instruction::CountBits,
        Instruction::Broadcast,
        Instruction::Load,
        Instruction::Store,
        Instruction::Add,
        Instruction::Sub,
        Instruction::Mul,
        Instruction::Abs,
        Instruction::CompareGt,
        Instruction::Select,
        Instruction::HorizontalAdd,
        Instruction::Interleave,
    ];

    /// Mnemonic used in execution logs.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Instruction::MaskInit => "minit",
            Instruction::MaskAnd => "mand",
            Instruction::MaskNot => "mnot",
            Instruction::CountBits => "cntbits",
            Instruction::Broadcast => "vset",
            Instruction::Load => "vload",
            Instruction::Store => "vstore",
            Instruction::Add => "vadd",
            Instruction::Sub => "vsub",
            Instruction::Mul => "vmult",
            Instruction::Abs => "vabs",
            Instruction::CompareGt => "vgt",
            Instruction::Select => "vselect",
            Instruction::HorizontalAdd => "hadd",
            Instruction::Interleave => "interleave",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

/// The instruction contract consumed by the vectorized kernels.
///
/// Slices passed to loads and stores start at the chunk being processed;
/// only lanes active in the mask are read or written, so a tail mask keeps
/// a kernel inside its logical range.
pub trait VectorIsa {
    /// Mask with the first `n` lanes active.
    fn first_lanes(&mut self, n: usize) -> Mask;
    fn mask_and(&mut self, a: Mask, b: Mask) -> Mask;
    fn mask_not(&mut self, a: Mask) -> Mask;
    /// Population count of the mask.
    fn count_active(&mut self, mask: Mask) -> usize;

    fn broadcast_f32(&mut self, value: f32, mask: Mask) -> VecF32;
    fn broadcast_i32(&mut self, value: i32, mask: Mask) -> VecI32;

    /// # Panics
    /// Panics if an active lane lies beyond the end of `src`.
    fn load_f32(&mut self, src: &[f32], mask: Mask) -> VecF32;
    /// # Panics
    /// Panics if an active lane lies beyond the end of `src`.
    fn load_i32(&mut self, src: &[i32], mask: Mask) -> VecI32;
    /// # Panics
    /// Panics if an active lane lies beyond the end of `dst`.
    fn store_f32(&mut self, dst: &mut [f32], value: VecF32, mask: Mask);

    fn add_f32(&mut self, a: VecF32, b: VecF32, mask: Mask) -> VecF32;
    fn mul_f32(&mut self, a: VecF32, b: VecF32, mask: Mask) -> VecF32;
    fn abs_f32(&mut self, a: VecF32, mask: Mask) -> VecF32;
    fn sub_i32(&mut self, a: VecI32, b: VecI32, mask: Mask) -> VecI32;

    /// Lanes where `a > b`, restricted to `mask`.
    fn gt_f32(&mut self, a: VecF32, b: VecF32, mask: Mask) -> Mask;
    /// Lanes where `a > b`, restricted to `mask`.
    fn gt_i32(&mut self, a: VecI32, b: VecI32, mask: Mask) -> Mask;

    /// `on_true` where the mask is set, `on_false` elsewhere.
    fn select_f32(&mut self, mask: Mask, on_true: VecF32, on_false: VecF32) -> VecF32;

    /// Adds adjacent lane pairs: `[a0+a1, a0+a1, a2+a3, a2+a3, ...]`.
    fn hadd_f32(&mut self, a: VecF32) -> VecF32;
    /// Even lanes followed by odd lanes: `[a0, a2, ..., a1, a3, ...]`.
    fn interleave_f32(&mut self, a: VecF32) -> VecF32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_clamps_to_width() {
        assert_eq!(Mask::first(0), Mask::none());
        assert_eq!(Mask::first(VECTOR_WIDTH), Mask::all());
        assert_eq!(Mask::first(VECTOR_WIDTH + 7), Mask::all());
    }

    #[test]
    fn first_partial() {
        let m = Mask::first(1);
        assert!(m[0]);
        assert_eq!(m.count(), 1);
    }

    #[test]
    fn mask_display() {
        assert_eq!(Mask::all().to_string(), "*".repeat(VECTOR_WIDTH));
        assert_eq!(Mask::none().to_string(), "_".repeat(VECTOR_WIDTH));
        let s = Mask::first(1).to_string();
        assert!(s.starts_with('*'));
        assert_eq!(s.matches('_').count(), VECTOR_WIDTH - 1);
    }

    #[test]
    fn mask_counts() {
        assert_eq!(Mask::none().count(), 0);
        assert_eq!(Mask::all().count(), VECTOR_WIDTH);
    }

    #[test]
    fn splat_and_index() {
        let v = VecF32::splat(2.5);
        for lane in 0..VECTOR_WIDTH {
            assert_eq!(v[lane], 2.5);
        }
    }

    #[test]
    fn mnemonics_are_unique() {
        let mut names: Vec<_> = Instruction::ALL.iter().map(|i| i.mnemonic()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Instruction::ALL.len());
    }
}
