//! Lane-utilization accounting for the simulated vector unit.
//!
//! The vector unit reports each executed instruction and its active-lane
//! mask to a [`LaneObserver`]. [`NoopObserver`] discards everything;
//! [`LaneStats`] counts instructions and utilized lanes and can optionally
//! keep the full execution log. Stats are owned by the run that collects
//! them and cleared with [`LaneStats::reset`] between kernels.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::vector::{Instruction, Mask, VECTOR_WIDTH};

/// Receives one callback per executed vector instruction.
pub trait LaneObserver {
    fn record(&mut self, instruction: Instruction, mask: Mask);
}

impl<O: LaneObserver + ?Sized> LaneObserver for &mut O {
    fn record(&mut self, instruction: Instruction, mask: Mask) {
        (**self).record(instruction, mask);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LaneObserver for NoopObserver {
    fn record(&mut self, _instruction: Instruction, _mask: Mask) {}
}

/// One line of the execution log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogEntry {
    pub instruction: Instruction,
    pub mask: Mask,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counts {
    instructions: usize,
    utilized_lanes: usize,
}

/// Instruction and lane counters, plus an optional execution log.
#[derive(Debug, Clone, Default)]
pub struct LaneStats {
    keep_log: bool,
    log: Vec<LogEntry>,
    per_instruction: BTreeMap<Instruction, Counts>,
    total: Counts,
}

impl LaneStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats that also keep every executed instruction for [`format_log`](Self::format_log).
    pub fn with_log() -> Self {
        Self {
            keep_log: true,
            ..Self::default()
        }
    }

    /// Clear all counters and the log. Logging mode is kept.
    pub fn reset(&mut self) {
        self.log.clear();
        self.per_instruction.clear();
        self.total = Counts::default();
    }

    pub fn total_instructions(&self) -> usize {
        self.total.instructions
    }

    pub fn utilized_lanes(&self) -> usize {
        self.total.utilized_lanes
    }

    pub fn total_lanes(&self) -> usize {
        self.total.instructions * VECTOR_WIDTH
    }

    /// Fraction of available lanes that did useful work, in `[0, 1]`.
    /// Zero when nothing has executed.
    #[allow(clippy::cast_precision_loss)]
    pub fn utilization(&self) -> f64 {
        let total = self.total_lanes();
        if total == 0 {
            return 0.0;
        }
        self.utilized_lanes() as f64 / total as f64
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn count_of(&self, instruction: Instruction) -> usize {
        self.per_instruction
            .get(&instruction)
            .map_or(0, |c| c.instructions)
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            vector_width: VECTOR_WIDTH,
            total_instructions: self.total_instructions(),
            utilized_lanes: self.utilized_lanes(),
            total_lanes: self.total_lanes(),
            utilization_percent: self.utilization() * 100.0,
            per_instruction: self
                .per_instruction
                .iter()
                .map(|(instruction, counts)| InstructionSummary {
                    instruction: instruction.mnemonic().to_string(),
                    count: counts.instructions,
                    utilized_lanes: counts.utilized_lanes,
                })
                .collect(),
        }
    }

    /// One line per executed instruction: mnemonic and lane pattern.
    pub fn format_log(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.log.iter().enumerate() {
            let _ = writeln!(out, "{i:>6}  {:<12}| {}", entry.instruction, entry.mask);
        }
        out
    }
}

impl LaneObserver for LaneStats {
    fn record(&mut self, instruction: Instruction, mask: Mask) {
        let used = mask.count();
        let counts = self.per_instruction.entry(instruction).or_default();
        counts.instructions += 1;
        counts.utilized_lanes += used;
        self.total.instructions += 1;
        self.total.utilized_lanes += used;
        if self.keep_log {
            self.log.push(LogEntry { instruction, mask });
        }
    }
}

/// Serializable snapshot of [`LaneStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub vector_width: usize,
    pub total_instructions: usize,
    pub utilized_lanes: usize,
    pub total_lanes: usize,
    pub utilization_percent: f64,
    pub per_instruction: Vec<InstructionSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionSummary {
    pub instruction: String,
    pub count: usize,
    pub utilized_lanes: usize,
}

impl StatsSummary {
    pub fn format_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "****************** Printing Vector Unit Statistics *******************"
        );
        let _ = writeln!(out, "Vector Width:              {}", self.vector_width);
        let _ = writeln!(out, "Total Vector Instructions: {}", self.total_instructions);
        let _ = writeln!(
            out,
            "Vector Utilization:        {:.6}%",
            self.utilization_percent
        );
        let _ = writeln!(out, "Utilized Vector Lanes:     {}", self.utilized_lanes);
        let _ = writeln!(out, "Total Vector Lanes:        {}", self.total_lanes);
        out
    }
}
