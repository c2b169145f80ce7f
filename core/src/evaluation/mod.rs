//! Rule components of the assessment
//!
//! Each component is a pure function of the input record (and, for the
//! feature classifier and conclusion ladder, the washout figures).

pub mod complementary;
pub mod conclusion;
pub mod features;
pub mod probability;
pub mod triage;
pub mod washout;

pub use complementary::complementary_notes;
pub use conclusion::{
    conclude, derive_conclusion, malignancy_caveat, Conclusion, ConclusionBranch,
    ConclusionContext, CONCLUSION_LADDER,
};
pub use features::classify;
pub use probability::estimate_probabilities;
pub use triage::{triage, triage_record};
pub use washout::{compute_washout, WashoutResult};
