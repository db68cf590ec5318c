use std::borrow::Cow;
use std::fmt;

use ai_core::names::short_type_name;
use ai_core::{Blackboard, Status, TickContext, WorldMut};

use crate::TaskError;

/// Per-action behavior. Every hook has a no-op default.
pub trait ActionBehavior<W>: 'static
where
    W: WorldMut + 'static,
{
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(short_type_name(std::any::type_name::<Self>()))
    }

    /// Validate the agent/world/blackboard before a run starts. An error deactivates the task.
    fn on_bind(
        &mut self,
        _agent: W::Agent,
        _world: &W,
        _blackboard: &Blackboard,
    ) -> Result<(), TaskError> {
        Ok(())
    }

    /// Called once when a run starts.
    fn on_execute(&mut self, _cx: &mut ActionContext<'_, W>) {}

    /// Called every tick while the action is running.
    fn on_update(&mut self, _cx: &mut ActionContext<'_, W>) {}

    /// Called whenever the action leaves `Running`, for any reason.
    fn on_stop(&mut self) {}

    fn on_pause(&mut self) {}

    /// Deep copy used when the owning node is duplicated. `None` means "not duplicable".
    fn duplicate(&self) -> Option<Box<dyn ActionBehavior<W>>> {
        None
    }
}

/// What an action hook gets to work with.
pub struct ActionContext<'a, W>
where
    W: WorldMut + 'static,
{
    pub ctx: &'a TickContext,
    pub agent: W::Agent,
    pub world: &'a mut W,
    pub blackboard: &'a mut Blackboard,
    started_at: f32,
    end: Option<Option<bool>>,
}

impl<'a, W> ActionContext<'a, W>
where
    W: WorldMut + 'static,
{
    pub fn elapsed_time(&self) -> f32 {
        self.ctx.time_seconds - self.started_at
    }

    /// End the running action once the current hook returns.
    ///
    /// `Some(true)` succeeds, `Some(false)` fails, `None` interrupts (fails without latching).
    pub fn end_action(&mut self, success: Option<bool>) {
        self.end = Some(success);
    }

    pub fn succeed(&mut self) {
        self.end_action(Some(true));
    }

    pub fn fail(&mut self) {
        self.end_action(Some(false));
    }
}

enum Hook {
    Execute,
    Update,
}

/// A multi-tick unit of work with its own start/update/pause/stop state machine.
pub struct ActionTask<W>
where
    W: WorldMut + 'static,
{
    behavior: Box<dyn ActionBehavior<W>>,
    active: bool,
    agent_override: Option<W::Agent>,
    status: Status,
    started_at: f32,
    paused_at: f32,
    latch: bool,
    paused: bool,
}

impl<W> ActionTask<W>
where
    W: WorldMut + 'static,
{
    pub fn new(behavior: impl ActionBehavior<W>) -> Self {
        Self::from_boxed(Box::new(behavior))
    }

    pub fn from_boxed(behavior: Box<dyn ActionBehavior<W>>) -> Self {
        Self {
            behavior,
            active: true,
            agent_override: None,
            status: Status::Resting,
            started_at: 0.0,
            paused_at: 0.0,
            latch: false,
            paused: false,
        }
    }

    pub fn with_agent_override(mut self, agent: W::Agent) -> Self {
        self.agent_override = Some(agent);
        self
    }

    pub fn name(&self) -> Cow<'static, str> {
        self.behavior.name()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn agent_override(&self) -> Option<W::Agent> {
        self.agent_override
    }

    pub fn set_agent_override(&mut self, agent: Option<W::Agent>) {
        self.agent_override = agent;
    }

    /// Seconds this run has been going, excluding paused time. Zero when not running.
    pub fn elapsed_time(&self, ctx: &TickContext) -> f32 {
        if self.paused {
            return self.paused_at - self.started_at;
        }
        if self.is_running() {
            return ctx.time_seconds - self.started_at;
        }
        0.0
    }

    pub fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Status {
        if !self.active {
            return Status::Failure;
        }

        let agent = self.agent_override.unwrap_or(agent);

        if self.paused {
            self.started_at += ctx.time_seconds - self.paused_at;
            self.paused = false;
        }

        if self.status == Status::Running {
            self.run_hook(Hook::Update, ctx, agent, world, blackboard);
            self.latch = false;
            return self.status;
        }

        // An end that happened since the last poll is reported exactly once.
        if self.latch {
            self.latch = false;
            return self.status;
        }

        if let Err(err) = self.behavior.on_bind(agent, &*world, &*blackboard) {
            tracing::warn!(task = %self.name(), error = %err, "deactivating task");
            self.active = false;
            return Status::Failure;
        }

        self.started_at = ctx.time_seconds;
        self.status = Status::Running;
        self.run_hook(Hook::Execute, ctx, agent, world, blackboard);
        self.latch = false;
        self.status
    }

    /// Finish the current run. No-op unless running.
    ///
    /// `None` is an interruption: the task fails but the next `execute` starts a
    /// fresh run instead of reporting the failure.
    pub fn end_action(&mut self, success: Option<bool>) {
        if self.status != Status::Running {
            return;
        }

        self.paused = false;
        self.status = if success == Some(true) {
            Status::Success
        } else {
            Status::Failure
        };
        self.latch = success.is_some();
        tracing::debug!(task = %self.name(), status = ?self.status, "action ended");
        self.behavior.on_stop();
    }

    /// Freeze elapsed-time accounting. The status stays `Running`.
    pub fn pause_action(&mut self, ctx: &TickContext) {
        if self.status != Status::Running || self.paused {
            return;
        }

        self.paused_at = ctx.time_seconds;
        self.paused = true;
        self.behavior.on_pause();
    }

    /// Deep copy with fresh runtime state, or `None` if the behavior is not duplicable.
    pub fn duplicate(&self) -> Option<Self> {
        let behavior = self.behavior.duplicate()?;
        let mut copy = Self::from_boxed(behavior);
        copy.active = self.active;
        copy.agent_override = self.agent_override;
        Some(copy)
    }

    fn run_hook(
        &mut self,
        hook: Hook,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        let mut cx = ActionContext {
            ctx,
            agent,
            world,
            blackboard,
            started_at: self.started_at,
            end: None,
        };
        match hook {
            Hook::Execute => self.behavior.on_execute(&mut cx),
            Hook::Update => self.behavior.on_update(&mut cx),
        }
        if let Some(success) = cx.end {
            self.end_action(success);
        }
    }
}

impl<W> fmt::Debug for ActionTask<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTask")
            .field("name", &self.name())
            .field("active", &self.active)
            .field("agent_override", &self.agent_override)
            .field("status", &self.status)
            .field("paused", &self.paused)
            .finish()
    }
}

/// Closure-backed action: `f` runs on start and on every update until it ends the action.
#[derive(Clone)]
pub struct ActionFn<F> {
    name: &'static str,
    f: F,
}

impl<F> ActionFn<F> {
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F, W> ActionBehavior<W> for ActionFn<F>
where
    F: FnMut(&mut ActionContext<'_, W>) + Clone + 'static,
    W: WorldMut + 'static,
{
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.name)
    }

    fn on_execute(&mut self, cx: &mut ActionContext<'_, W>) {
        (self.f)(cx);
    }

    fn on_update(&mut self, cx: &mut ActionContext<'_, W>) {
        (self.f)(cx);
    }

    fn duplicate(&self) -> Option<Box<dyn ActionBehavior<W>>> {
        Some(Box::new(self.clone()))
    }
}
