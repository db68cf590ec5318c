use std::any::Any;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Typed name of a blackboard variable.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    name: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

/// Named key/value store shared by every node and task of a graph instance.
///
/// Access is single-threaded; callers serialize any cross-thread use themselves.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<Cow<'static, str>, Box<dyn Any>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(key.name)
    }

    pub fn set<T: 'static>(&mut self, key: BbKey<T>, value: T) {
        self.values.insert(Cow::Borrowed(key.name), Box::new(value));
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        let value = self.values.get(key.name)?;
        value
            .downcast_ref::<T>()
            .or_else(|| type_mismatch(key.name))
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let value = self.values.get_mut(key.name)?;
        value
            .downcast_mut::<T>()
            .or_else(|| type_mismatch(key.name))
    }

    /// Like [`Blackboard::get_mut`], but a value of another type reads as absent.
    pub fn try_get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        self.values.get_mut(key.name)?.downcast_mut::<T>()
    }

    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Option<T> {
        let value = self.values.remove(key.name)?;
        value
            .downcast::<T>()
            .map(|b| *b)
            .ok()
            .or_else(|| type_mismatch(key.name))
    }

    /// Names of every variable currently holding a value of type `T`, in name order.
    pub fn variable_names<T: 'static>(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(_, value)| (***value).is::<T>())
            .map(|(name, _)| name.as_ref())
            .collect()
    }
}

fn type_mismatch<R>(name: &str) -> Option<R> {
    panic!("blackboard type mismatch for variable '{name}' (stored type differs from requested)")
}

impl std::fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}
