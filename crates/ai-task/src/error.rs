use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The agent, world or blackboard handed to the task cannot be used by it.
    #[error("cannot bind task: {0}")]
    Bind(String),

    #[error("adding a ConditionList within a ConditionList is not allowed")]
    NestedConditionList,
}

impl TaskError {
    pub fn bind(reason: impl Into<String>) -> Self {
        TaskError::Bind(reason.into())
    }
}
