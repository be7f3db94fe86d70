pub mod config;
pub mod llm;
pub mod normalize;
pub mod pipeline;
pub mod report;

pub use config::RunConfig;
pub use llm::{HfChatClient, ModelError, ModelSettings, RecommendationClient};
pub use pipeline::{
    process_profiles, BatchOutcome, CloudOnPremMix, ModelAnswer, Profile, ProfileFailure,
    ProfileValidationError, SizeBreakdown, SummaryRecord,
};
pub use pipeline::reference_library::{load_profiles, ReferenceLibrary};
