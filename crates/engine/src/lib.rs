#![forbid(unsafe_code)]

pub mod dispatcher;
pub mod error;
pub mod scorer;
pub mod session;

pub use study_core::Clock;

pub use dispatcher::RewardDispatcher;
pub use error::{ScoreError, SessionError};
pub use scorer::{AnswerCheck, QuizScorer};

pub use session::{
    ItemView, SessionController, SessionPhase, SessionView, SessionWorkflow, StudyMode,
};
