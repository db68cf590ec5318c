use std::borrow::Cow;

use ai_core::{Status, TickContext, WorldMut};
use ai_graph::{Bound, NodeBehavior, NodeContext};
use ai_task::{ActionTask, ConditionTask};

/// Leaf node running an [`ActionTask`].
///
/// Resetting the node interrupts a running task (`end_action(None)`), and pausing the graph
/// pauses the task.
pub struct ActionNode<W>
where
    W: WorldMut + 'static,
{
    task: ActionTask<W>,
}

impl<W> ActionNode<W>
where
    W: WorldMut + 'static,
{
    pub fn new(task: ActionTask<W>) -> Self {
        Self { task }
    }

    pub fn task(&self) -> &ActionTask<W> {
        &self.task
    }

    pub fn task_mut(&mut self) -> &mut ActionTask<W> {
        &mut self.task
    }
}

impl<W> NodeBehavior<W> for ActionNode<W>
where
    W: WorldMut + 'static,
{
    fn name(&self) -> Cow<'static, str> {
        self.task.name()
    }

    fn max_out_connections(&self) -> Bound {
        Bound::AtMost(0)
    }

    fn execute(&mut self, cx: &mut NodeContext<'_, W>) -> Status {
        self.task.execute(cx.ctx, cx.agent, cx.world, cx.blackboard)
    }

    fn reset(&mut self) {
        self.task.end_action(None);
    }

    fn on_destroy(&mut self) {
        self.task.end_action(None);
    }

    fn on_graph_paused(&mut self, ctx: &TickContext) {
        self.task.pause_action(ctx);
    }

    fn duplicate(&self) -> Option<Box<dyn NodeBehavior<W>>> {
        let task = self.task.duplicate()?;
        Some(Box::new(ActionNode { task }))
    }
}

/// Leaf node checking a [`ConditionTask`]: `Success` when it holds, `Failure` otherwise.
pub struct ConditionNode<W>
where
    W: WorldMut + 'static,
{
    condition: ConditionTask<W>,
}

impl<W> ConditionNode<W>
where
    W: WorldMut + 'static,
{
    pub fn new(condition: ConditionTask<W>) -> Self {
        Self { condition }
    }

    pub fn condition(&self) -> &ConditionTask<W> {
        &self.condition
    }

    pub fn condition_mut(&mut self) -> &mut ConditionTask<W> {
        &mut self.condition
    }
}

impl<W> NodeBehavior<W> for ConditionNode<W>
where
    W: WorldMut + 'static,
{
    fn name(&self) -> Cow<'static, str> {
        Cow::Owned(self.condition.summary())
    }

    fn max_out_connections(&self) -> Bound {
        Bound::AtMost(0)
    }

    fn execute(&mut self, cx: &mut NodeContext<'_, W>) -> Status {
        Status::from(
            self.condition
                .check_condition(cx.ctx, cx.agent, &*cx.world, &*cx.blackboard),
        )
    }

    fn duplicate(&self) -> Option<Box<dyn NodeBehavior<W>>> {
        let condition = self.condition.duplicate()?;
        Some(Box::new(ConditionNode { condition }))
    }
}

/// Which child result ends a composite early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Composite {
    /// Stop on the first failure.
    Sequence,
    /// Stop on the first success.
    Select,
}

/// Shared child loop for [`Sequencer`] and [`Selector`].
///
/// A non-dynamic composite resumes from the child that was running; a dynamic one re-runs
/// every child from the first each tick and interrupts the previously running child when an
/// earlier one takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    kind: Composite,
    dynamic: bool,
    current: usize,
}

impl Cursor {
    fn run<W>(&mut self, cx: &mut NodeContext<'_, W>) -> Status
    where
        W: WorldMut + 'static,
    {
        let (stop_on, otherwise) = match self.kind {
            Composite::Sequence => (Status::Failure, Status::Success),
            Composite::Select => (Status::Success, Status::Failure),
        };

        if self.current >= cx.out_connection_count() {
            self.current = 0;
        }
        let start = if self.dynamic { 0 } else { self.current };
        for index in start..cx.out_connection_count() {
            let status = cx.execute_child(index);
            match status {
                Status::Running => {
                    self.interrupt_later(cx, index);
                    self.current = index;
                    return Status::Running;
                }
                Status::Error => {
                    self.interrupt_later(cx, index);
                    self.current = 0;
                    return Status::Error;
                }
                status if status == stop_on => {
                    self.interrupt_later(cx, index);
                    self.current = 0;
                    return status;
                }
                // Resting: the connection is inactive.
                _ => {}
            }
        }

        self.current = 0;
        otherwise
    }

    /// Keeps `current` on the same child when an out-connection at `index` goes away.
    fn child_disconnected(&mut self, index: usize) {
        if index < self.current {
            self.current -= 1;
        } else if index == self.current {
            self.current = 0;
        }
    }

    fn interrupt_later<W>(&self, cx: &mut NodeContext<'_, W>, index: usize)
    where
        W: WorldMut + 'static,
    {
        if self.dynamic && self.current > index {
            tracing::debug!(node = %cx.node_id(), from = self.current, to = index, "interrupting running child");
            cx.reset_child(self.current, true);
        }
    }
}

/// Runs children in order. Fails on the first failing child, succeeds when all succeed.
#[derive(Debug, Clone)]
pub struct Sequencer {
    cursor: Cursor,
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            cursor: Cursor {
                kind: Composite::Sequence,
                dynamic: false,
                current: 0,
            },
        }
    }

    /// Re-evaluate from the first child every tick.
    pub fn dynamic() -> Self {
        let mut sequencer = Self::new();
        sequencer.cursor.dynamic = true;
        sequencer
    }

    pub fn is_dynamic(&self) -> bool {
        self.cursor.dynamic
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> NodeBehavior<W> for Sequencer
where
    W: WorldMut + 'static,
{
    fn execute(&mut self, cx: &mut NodeContext<'_, W>) -> Status {
        self.cursor.run(cx)
    }

    fn reset(&mut self) {
        self.cursor.current = 0;
    }

    fn on_child_disconnected(&mut self, index: usize) {
        self.cursor.child_disconnected(index);
    }

    fn duplicate(&self) -> Option<Box<dyn NodeBehavior<W>>> {
        Some(Box::new(self.clone()))
    }
}

/// Runs children in order. Succeeds on the first succeeding child, fails when all fail.
#[derive(Debug, Clone)]
pub struct Selector {
    cursor: Cursor,
}

impl Selector {
    pub fn new() -> Self {
        Self {
            cursor: Cursor {
                kind: Composite::Select,
                dynamic: false,
                current: 0,
            },
        }
    }

    /// Re-evaluate from the first child every tick.
    pub fn dynamic() -> Self {
        let mut selector = Self::new();
        selector.cursor.dynamic = true;
        selector
    }

    pub fn is_dynamic(&self) -> bool {
        self.cursor.dynamic
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> NodeBehavior<W> for Selector
where
    W: WorldMut + 'static,
{
    fn execute(&mut self, cx: &mut NodeContext<'_, W>) -> Status {
        self.cursor.run(cx)
    }

    fn reset(&mut self) {
        self.cursor.current = 0;
    }

    fn on_child_disconnected(&mut self, index: usize) {
        self.cursor.child_disconnected(index);
    }

    fn duplicate(&self) -> Option<Box<dyn NodeBehavior<W>>> {
        Some(Box::new(self.clone()))
    }
}
