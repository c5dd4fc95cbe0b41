//! Domain model (codes, records, outcomes, decisions, events).
//!
//! 純粋なデータと判定ロジックのみ。No I/O and no injected capabilities live
//! here; the executors in `app` wire these together with the ports.

pub mod code;
pub mod context;
pub mod decision;
pub mod events;
pub mod ids;
pub mod notice;
pub mod outcome;
pub mod policy;
pub mod raw;
pub mod record;
pub mod severity;

pub use self::code::{ErrorCode, UnknownCode, classify_message};
pub use self::context::ErrorContext;
pub use self::decision::{Decision, should_retry};
pub use self::events::{DEFAULT_SOURCE, ERROR_OCCURRED, ErrorEvent};
pub use self::ids::EventId;
pub use self::notice::{Notice, ReportOptions};
pub use self::outcome::{Failure, OperationOutcome, Success};
pub use self::policy::RetryPolicy;
pub use self::raw::{Exception, RawError, StructuredError};
pub use self::record::{ErrorRecord, UNKNOWN_MESSAGE, normalize, normalize_with};
pub use self::severity::{GENERIC_USER_MESSAGE, Severity};
