/// Scope functions for the end of long iterator chains.
pub trait LetAlso: Sized {
    /// Passes `self` by value into `f` and returns its result.
    fn let_owned<R, F>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }

    /// Runs `f` on a reference to `self`, then returns `self`.
    fn also<F>(self, f: F) -> Self
    where
        F: FnOnce(&Self),
    {
        f(&self);
        self
    }
}

impl<T> LetAlso for T {}

#[cfg(test)]
mod tests {
    use super::LetAlso;

    #[test]
    fn let_owned_maps_value() {
        let len = vec![1, 2, 3].let_owned(|v| v.len());
        assert_eq!(len, 3);
    }

    #[test]
    fn also_returns_self() {
        let mut seen = 0;
        let value = 7.also(|v| seen = *v);
        assert_eq!(value, 7);
        assert_eq!(seen, 7);
    }
}
