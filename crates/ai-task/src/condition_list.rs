use std::borrow::Cow;

use ai_core::WorldMut;

use crate::{ConditionBehavior, ConditionContext, ConditionTask, TaskError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckMode {
    #[default]
    AllTrueRequired,
    AnyTrueSuffice,
}

/// A condition made of an ordered list of child conditions.
///
/// Inactive children count as satisfied. An empty list is satisfied under either mode.
pub struct ConditionList<W>
where
    W: WorldMut + 'static,
{
    check_mode: CheckMode,
    conditions: Vec<ConditionTask<W>>,
}

impl<W> ConditionList<W>
where
    W: WorldMut + 'static,
{
    pub fn new(check_mode: CheckMode) -> Self {
        Self {
            check_mode,
            conditions: Vec::new(),
        }
    }

    pub fn check_mode(&self) -> CheckMode {
        self.check_mode
    }

    pub fn set_check_mode(&mut self, check_mode: CheckMode) {
        self.check_mode = check_mode;
    }

    pub fn conditions(&self) -> &[ConditionTask<W>] {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut [ConditionTask<W>] {
        &mut self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Append a child. Nested lists are rejected and the list is left unchanged.
    pub fn add_condition(&mut self, condition: ConditionTask<W>) -> Result<(), TaskError> {
        if condition.is_condition_list() {
            tracing::warn!("adding a ConditionList within a ConditionList is not allowed");
            return Err(TaskError::NestedConditionList);
        }
        self.conditions.push(condition);
        Ok(())
    }

    pub fn remove_condition(&mut self, index: usize) -> Option<ConditionTask<W>> {
        (index < self.conditions.len()).then(|| self.conditions.remove(index))
    }

    /// One line per active child, headed by the mode when there is more than one child.
    pub fn summary(&self) -> String {
        if self.conditions.is_empty() {
            return "No Conditions".to_string();
        }

        let mut lines = Vec::with_capacity(self.conditions.len() + 1);
        if self.conditions.len() > 1 {
            lines.push(match self.check_mode {
                CheckMode::AllTrueRequired => "(ALL True)".to_string(),
                CheckMode::AnyTrueSuffice => "(ANY True)".to_string(),
            });
        }
        lines.extend(
            self.conditions
                .iter()
                .filter(|c| c.is_active())
                .map(ConditionTask::summary),
        );
        lines.join("\n")
    }
}

impl<W> ConditionBehavior<W> for ConditionList<W>
where
    W: WorldMut + 'static,
{
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("Condition List")
    }

    fn check(&mut self, cx: &mut ConditionContext<'_, W>) -> bool {
        let all_required = self.check_mode == CheckMode::AllTrueRequired;
        let mut satisfied = 0;

        for condition in self.conditions.iter_mut() {
            if !condition.is_active() {
                satisfied += 1;
                continue;
            }

            if condition.check_condition(cx.ctx, cx.agent, cx.world, cx.blackboard) {
                if !all_required {
                    return true;
                }
                satisfied += 1;
            } else if all_required {
                return false;
            }
        }

        satisfied == self.conditions.len()
    }

    fn duplicate(&self) -> Option<Box<dyn ConditionBehavior<W>>> {
        let mut copy = ConditionList::new(self.check_mode);
        for condition in &self.conditions {
            copy.conditions.push(condition.duplicate()?);
        }
        Some(Box::new(copy))
    }

    fn is_condition_list(&self) -> bool {
        true
    }
}
