use super::handle::Handle;

/// The color tag carried by every node, sentinel included.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    /// A red node never has a red child.
    Red,
    /// Black nodes are the ones counted by the black-height.
    Black,
}

impl Color {
    /// Returns `true` for [`Color::Red`].
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    /// Returns `true` for [`Color::Black`].
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}

// Red-Black tree: the color and the three navigation links of a node. Keys live in
// a separate arena so the sentinel slot does not need one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Node {
    color: Color,
    parent: Handle,
    left: Handle,
    right: Handle,
}

impl Node {
    /// The sentinel: black, with every link pointing back at itself.
    pub(crate) const SENTINEL: Self = Self {
        color: Color::Black,
        parent: Handle::NIL,
        left: Handle::NIL,
        right: Handle::NIL,
    };

    /// Creates a freshly inserted node: red, with both children set to the sentinel.
    pub(crate) const fn new_red(parent: Handle) -> Self {
        Self {
            color: Color::Red,
            parent,
            left: Handle::NIL,
            right: Handle::NIL,
        }
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) const fn is_red(&self) -> bool {
        self.color.is_red()
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Handle {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Handle) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Handle {
        self.left
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Handle) {
        self.left = left;
    }

    #[inline]
    pub(crate) const fn right(&self) -> Handle {
        self.right
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Handle) {
        self.right = right;
    }

    /// Returns the child on the given side.
    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Handle {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Sets the child on the given side.
    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Handle) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
