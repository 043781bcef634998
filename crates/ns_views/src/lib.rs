pub mod coordinator;

pub use coordinator::{ViewCoordinator, ViewKind, QUIZ_REWARD};

pub mod prelude {
    pub use crate::coordinator::{ViewCoordinator, ViewKind};
    pub use ns_core::{Error, Result};
}
