use std::borrow::Cow;
use std::fmt;

use ai_core::names::short_type_name;
use ai_core::{Blackboard, TickContext, WorldMut};

use crate::TaskError;

pub trait ConditionBehavior<W>: 'static
where
    W: WorldMut + 'static,
{
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(short_type_name(std::any::type_name::<Self>()))
    }

    fn on_bind(
        &mut self,
        _agent: W::Agent,
        _world: &W,
        _blackboard: &Blackboard,
    ) -> Result<(), TaskError> {
        Ok(())
    }

    fn check(&mut self, cx: &mut ConditionContext<'_, W>) -> bool;

    fn duplicate(&self) -> Option<Box<dyn ConditionBehavior<W>>> {
        None
    }

    fn is_condition_list(&self) -> bool {
        false
    }
}

/// Read-only view handed to a condition check.
pub struct ConditionContext<'a, W>
where
    W: WorldMut + 'static,
{
    pub ctx: &'a TickContext,
    pub agent: W::Agent,
    pub world: &'a W,
    pub blackboard: &'a Blackboard,
}

/// A single boolean check, optionally inverted.
pub struct ConditionTask<W>
where
    W: WorldMut + 'static,
{
    behavior: Box<dyn ConditionBehavior<W>>,
    active: bool,
    invert: bool,
    agent_override: Option<W::Agent>,
}

impl<W> ConditionTask<W>
where
    W: WorldMut + 'static,
{
    pub fn new(behavior: impl ConditionBehavior<W>) -> Self {
        Self::from_boxed(Box::new(behavior))
    }

    pub fn from_boxed(behavior: Box<dyn ConditionBehavior<W>>) -> Self {
        Self {
            behavior,
            active: true,
            invert: false,
            agent_override: None,
        }
    }

    pub fn inverted(mut self) -> Self {
        self.invert = true;
        self
    }

    pub fn with_agent_override(mut self, agent: W::Agent) -> Self {
        self.agent_override = Some(agent);
        self
    }

    pub fn name(&self) -> Cow<'static, str> {
        self.behavior.name()
    }

    /// Name prefixed with `!` when inverted.
    pub fn summary(&self) -> String {
        if self.invert {
            format!("!{}", self.name())
        } else {
            self.name().into_owned()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    pub fn set_inverted(&mut self, invert: bool) {
        self.invert = invert;
    }

    pub fn agent_override(&self) -> Option<W::Agent> {
        self.agent_override
    }

    pub fn set_agent_override(&mut self, agent: Option<W::Agent>) {
        self.agent_override = agent;
    }

    pub fn is_condition_list(&self) -> bool {
        self.behavior.is_condition_list()
    }

    /// Inactive conditions and conditions that fail to bind check `false`.
    pub fn check_condition(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &W,
        blackboard: &Blackboard,
    ) -> bool {
        if !self.active {
            return false;
        }

        let agent = self.agent_override.unwrap_or(agent);
        if let Err(err) = self.behavior.on_bind(agent, world, blackboard) {
            tracing::warn!(task = %self.name(), error = %err, "deactivating task");
            self.active = false;
            return false;
        }

        let mut cx = ConditionContext {
            ctx,
            agent,
            world,
            blackboard,
        };
        self.behavior.check(&mut cx) != self.invert
    }

    pub fn duplicate(&self) -> Option<Self> {
        let behavior = self.behavior.duplicate()?;
        Some(Self {
            behavior,
            active: self.active,
            invert: self.invert,
            agent_override: self.agent_override,
        })
    }
}

impl<W> fmt::Debug for ConditionTask<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionTask")
            .field("name", &self.name())
            .field("active", &self.active)
            .field("invert", &self.invert)
            .field("agent_override", &self.agent_override)
            .finish()
    }
}

/// Closure-backed condition.
#[derive(Clone)]
pub struct ConditionFn<F> {
    name: &'static str,
    f: F,
}

impl<F> ConditionFn<F> {
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F, W> ConditionBehavior<W> for ConditionFn<F>
where
    F: FnMut(&TickContext, W::Agent, &W, &Blackboard) -> bool + Clone + 'static,
    W: WorldMut + 'static,
{
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.name)
    }

    fn check(&mut self, cx: &mut ConditionContext<'_, W>) -> bool {
        (self.f)(cx.ctx, cx.agent, cx.world, cx.blackboard)
    }

    fn duplicate(&self) -> Option<Box<dyn ConditionBehavior<W>>> {
        Some(Box::new(self.clone()))
    }
}
