//! SyncWatch Logs - Log discovery, catalog caching, and bounded tail reads

mod candidates;
mod reader;
mod registry;
mod resolve;

pub use candidates::{default_specs, CandidateSpec, Resolver};
pub use reader::{clamp_lines, LogReader, TailStrategy};
pub use registry::{Download, LogRegistry};
pub use resolve::{latest_run, RunFile};
