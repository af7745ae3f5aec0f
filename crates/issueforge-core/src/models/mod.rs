pub mod bug;
pub mod payload;
pub mod request;
pub mod testcase;

pub use bug::BugRecord;
pub use payload::IssuePayload;
pub use request::{IssueRequest, IssueType, Labels, Preconditions, TestCaseEntry, TestStepInput};
pub use testcase::{TestCaseRecord, TestStep};
