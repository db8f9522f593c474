//! External decision interface and the providers shipped with the crate.

pub mod channel;
pub mod random;
pub mod slot;
mod trait_def;

// Re-exports for ergonomics
pub use channel::{
    ChannelDecisionProvider, Prompt, Submission, SubmissionHandle, SubmitAck, SubmitError,
};
pub use random::RandomDecider;
pub use slot::DecisionSlot;
pub use trait_def::{
    ActionRequest, BlockRequest, BlockResponse, CardLossRequest, ChallengeRequest, DecisionError,
    DecisionProvider, ExchangeRequest, OpportunityId, TargetRequest,
};
