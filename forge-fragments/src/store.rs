use crate::{Fragment, Result};

/// Read-only lookup of code fragments by id.
///
/// A store is opened once and then queried for every generation request.
/// Implementations never modify the backing data.
pub trait FragmentStore {
    /// Fetch and parse the fragment with the given id.
    fn get(&self, id: &str) -> Result<Fragment>;

    /// All fragment ids the store holds, sorted.
    fn ids(&self) -> Result<Vec<String>>;

    /// Human readable description of where fragments come from.
    fn location(&self) -> &str;
}

impl<S: FragmentStore + ?Sized> FragmentStore for &S {
    fn get(&self, id: &str) -> Result<Fragment> {
        (**self).get(id)
    }

    fn ids(&self) -> Result<Vec<String>> {
        (**self).ids()
    }

    fn location(&self) -> &str {
        (**self).location()
    }
}

impl<S: FragmentStore + ?Sized> FragmentStore for Box<S> {
    fn get(&self, id: &str) -> Result<Fragment> {
        (**self).get(id)
    }

    fn ids(&self) -> Result<Vec<String>> {
        (**self).ids()
    }

    fn location(&self) -> &str {
        (**self).location()
    }
}
