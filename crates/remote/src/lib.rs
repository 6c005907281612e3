#![forbid(unsafe_code)]

pub mod api;
pub mod http;

pub use api::{
    InMemoryStudySets, ProviderError, RecordingRewards, RewardError, RewardService,
    StudyItemRecord, StudySetInfo, StudySetProvider, StudySetRecord,
};
pub use http::{HttpRewardService, HttpStudySetProvider, RemoteConfig};
