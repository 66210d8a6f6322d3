use std::{
    fmt,
    fmt::{Debug, Display},
};

use zeroize::Zeroize;

/// A value that must never end up in logs. `Debug` and `Display` both print `****`, and the value is wiped from
/// memory when dropped.
#[derive(Clone, Default)]
pub struct Secret<T>
where T: Clone + Default + Zeroize
{
    value: T,
}

impl<T: Clone + Default + Zeroize> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn reveal(&self) -> &T {
        &self.value
    }
}

impl<T: Clone + Default + Zeroize> Drop for Secret<T> {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

impl<T: Clone + Default + Zeroize> Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl<T: Clone + Default + Zeroize> Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}
