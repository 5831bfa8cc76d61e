//! Extension registry contract for host-level shared components.
//! This provides a minimal type-erased container entry for state published by extensions.

use std::any::Any;
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

/// Marker trait for extension state that can be shared across threads.
///
/// Implemented for every `Debug + Send + Sync + 'static` type; downcast through
/// `dyn Any` upcasting.
pub trait Extension: Any + Debug + Send + Sync {}

impl<T: Any + Debug + Send + Sync> Extension for T {}

/// A named, published extension.
#[derive(Debug, Clone)]
pub struct RegisteredExtension {
    pub key: Cow<'static, str>,
    pub state: Arc<dyn Extension>,
}

impl RegisteredExtension {
    /// Wraps a concrete state under the given key.
    pub fn new<T: Extension>(key: impl Into<Cow<'static, str>>, state: T) -> Self {
        Self { key: key.into(), state: Arc::new(state) }
    }

    /// Returns the state as `T` if the types match.
    #[must_use]
    pub fn downcast_ref<T: Extension>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.state;
        any.downcast_ref::<T>()
    }
}
