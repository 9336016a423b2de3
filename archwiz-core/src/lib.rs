pub mod application;
pub mod engine;
pub mod flow;
pub mod metadata;
pub mod models;
pub mod questionnaire;
pub mod storage;
pub mod store;

pub use application::ApplicationState;
pub use engine::{ArchitectureRequest, EngineError, Recommendation, RecommendationEngine};
pub use flow::{FlowError, SolutionFlow};
pub use models::*;
pub use questionnaire::{LAST_STEP, QuestionnaireError, QuestionnaireState, STEP_COUNT};
pub use storage::{StateStorage, StorageConfig, StorageError, StorageFactory, StorageRegistry};
pub use store::{ApplicationStore, QuestionnaireStore};
