pub mod action;
pub mod eligibility;
pub mod error;
pub mod refresh;
pub mod table;

pub use action::ActionId;
pub use eligibility::{
    resolve, Eligibility, EligibilityFlags, QuoteApprovalPolicy, Resolver, ResolverOptions,
};
pub use error::{MutationFailure, RefetchFailure, RefetchTarget, WorkflowError};
pub use refresh::{
    after_mutate, MutateOutcome, Refetch, RefetchOutcome, RefetchPlan, RefreshReport,
    Subject, TransitionKey, ViewScope,
};
