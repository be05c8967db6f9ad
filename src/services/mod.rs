//! Service layer: problem bank, judge, and the capture protocol.

pub mod capture;
pub mod judge;
pub mod problem_bank;

pub use capture::{CaptureOutcome, CaptureService};
pub use judge::{Judge, JudgeReport, Verdict};
pub use problem_bank::{ProblemBank, SelectedChallenge};
