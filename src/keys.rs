use crate::EventKey;

/// Specifies which keys a handler registers under.
///
/// [`Emitter::on`](crate::Emitter::on) accepts anything that converts into
/// `Keys`, so single keys, arrays, slices, and vectors all work without
/// wrapping:
///
/// ```ignore
/// // These are equivalent:
/// emitter.on("save", &handler);
/// emitter.on(Keys::one("save"), &handler);
///
/// // Register under several keys at once:
/// emitter.on(["save", "autosave"], &handler);
/// ```
///
/// Order is preserved: the handler is appended to each key's sequence in the
/// order the keys were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keys<K: EventKey>(pub(crate) Vec<K>);

impl<K: EventKey> Keys<K> {
    /// A single key.
    pub fn one(key: K) -> Self {
        Keys(vec![key])
    }

    /// An ordered list of keys.
    ///
    /// Accepts any iterator of keys:
    /// ```ignore
    /// Keys::many(["a", "b"])
    /// Keys::many(vec![MyKey::Save])
    /// ```
    pub fn many(keys: impl IntoIterator<Item = K>) -> Self {
        Keys(keys.into_iter().collect())
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, K> {
        self.0.iter()
    }

    pub(crate) fn into_vec(self) -> Vec<K> {
        self.0
    }
}

impl<K: EventKey> From<K> for Keys<K> {
    fn from(key: K) -> Self {
        Keys::one(key)
    }
}

impl<K: EventKey> From<Vec<K>> for Keys<K> {
    fn from(keys: Vec<K>) -> Self {
        Keys(keys)
    }
}

impl<K: EventKey> From<&[K]> for Keys<K> {
    fn from(keys: &[K]) -> Self {
        Keys::many(keys.iter().cloned())
    }
}

impl<K: EventKey, const N: usize> From<[K; N]> for Keys<K> {
    fn from(keys: [K; N]) -> Self {
        Keys::many(keys)
    }
}

impl<K: EventKey, const N: usize> From<&[K; N]> for Keys<K> {
    fn from(keys: &[K; N]) -> Self {
        Keys::many(keys.iter().cloned())
    }
}

impl From<&str> for Keys<String> {
    fn from(key: &str) -> Self {
        Keys::one(key.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_key_converts() {
        let keys: Keys<&'static str> = "save".into();
        assert_eq!(keys, Keys::one("save"));
    }

    #[test]
    fn array_preserves_order() {
        let keys: Keys<&'static str> = ["a", "b", "c"].into();
        assert_eq!(keys.0, vec!["a", "b", "c"]);
    }

    #[test]
    fn slice_and_vec_convert() {
        let from_slice: Keys<u32> = (&[1u32, 2][..]).into();
        let from_vec: Keys<u32> = vec![1u32, 2].into();
        assert_eq!(from_slice, from_vec);
    }

    #[test]
    fn str_converts_to_string_keys() {
        let keys: Keys<String> = "save".into();
        assert_eq!(keys.0, vec!["save".to_owned()]);
    }
}
