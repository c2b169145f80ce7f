pub mod api;
pub mod cli;
pub mod error;
pub mod evaluation;
pub mod form;
pub mod types;

pub use api::{AdrenalEvaluator, Assessment};
pub use cli::report::TextReport;
pub use error::{AdrenalError, Result};
pub use evaluation::{Conclusion, ConclusionBranch, WashoutResult};
pub use form::{AssessmentForm, ParsedForm};
pub use types::*;
