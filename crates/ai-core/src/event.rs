use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// A named event sent through a graph, optionally carrying a value.
#[derive(Clone)]
pub struct EventData {
    pub name: Cow<'static, str>,
    value: Option<Rc<dyn Any>>,
}

impl EventData {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value<T: 'static>(mut self, value: T) -> Self {
        self.value = Some(Rc::new(value));
        self
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// The payload, if present and of type `T`.
    pub fn value<T: 'static>(&self) -> Option<&T> {
        self.value.as_deref()?.downcast_ref::<T>()
    }
}

impl fmt::Debug for EventData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventData")
            .field("name", &self.name)
            .field("has_value", &self.value.is_some())
            .finish()
    }
}
