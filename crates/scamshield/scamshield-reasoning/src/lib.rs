//! # scamshield-reasoning
//!
//! Turns fused evidence plus retrieved context into exactly one verdict.
//!
//! The dispatcher walks an ordered provider chain under one shared
//! deadline. The first provider to return a valid verdict wins; if every
//! provider fails or the deadline passes, the heuristic produces the
//! verdict instead. Outputs are never blended.

pub mod dispatcher;
pub mod parse;
pub mod prompt;
pub mod providers;

pub use dispatcher::{DispatchOutcome, VerdictDispatcher, VerdictSource};
pub use providers::{create_provider, GeminiReasoner, HeuristicReasoner, OpenAiReasoner};
