//! Core types: the ordered header map, the front matter grammar, the
//! metadata index, autofill and the run report.

pub mod autofill;
pub mod front_matter;
pub mod header;
pub mod index;
pub mod report;

pub use autofill::{Autofill, HistoryProvider};
pub use header::Header;
pub use index::{ContentRecord, MetadataIndex};
pub use report::{ContentKind, DestinationState, Issue, IssueKind, Report};
