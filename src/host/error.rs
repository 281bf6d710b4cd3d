use thiserror::Error;

use super::catalog::BehaviorTypeId;
use crate::utils::allocator::SceneId;

/// Host-level misuse: stale handles, unregistered types, lifecycle ordering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("{0} is not loaded")]
    UnknownScene(SceneId),

    #[error("no shared data registered for behavior type `{0}`")]
    UnknownBehaviorType(BehaviorTypeId),

    #[error("shared data of `{0}` has an unexpected type")]
    UnexpectedSharedDataType(BehaviorTypeId),

    #[error("a simulation world is already running in {0}")]
    WorldAlreadyRunning(SceneId),
}
