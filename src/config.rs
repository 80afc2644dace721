/// Construction options for an [`RBTree`](crate::RBTree).
///
/// # Examples
///
/// ```
/// use redblack_tree::{Config, NaturalOrder, RBTree};
///
/// let config = Config::default().with_capacity(64).with_diagnostics(true);
/// let mut tree = RBTree::with_config(NaturalOrder, config);
/// tree.insert(7);
/// assert!(tree.config().diagnostics());
/// assert!(tree.capacity() >= 64);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config {
    capacity: usize,
    diagnostics: bool,
}

impl Config {
    /// Options for an empty tree without preallocation or diagnostics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            capacity: 0,
            diagnostics: false,
        }
    }

    /// Preallocates room for `capacity` keys.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enables or disables insertion diagnostics.
    ///
    /// With diagnostics on, every insertion logs its rebalancing steps through the
    /// [`log`] facade and re-validates the whole tree afterwards, panicking if a
    /// red-black invariant does not hold. Insertion becomes O(n).
    #[must_use]
    pub const fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The number of keys to preallocate room for.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether insertion diagnostics are enabled.
    #[must_use]
    pub const fn diagnostics(&self) -> bool {
        self.diagnostics
    }
}
