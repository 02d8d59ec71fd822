#![forbid(unsafe_code)]

//! In-memory UI tree for exercising overlay coordination without a toolkit.
//!
//! `MockHost` models just enough of a document to drive the host traits:
//! a tree of elements (some focusable), a single focused element, a
//! background scroll-lock flag, an inert flag, and the last top-marker
//! written for each overlay root.
//!
//! Element `0` is the document body. It is always attached and never
//! focusable.

use std::cell::RefCell;

use ahash::AHashMap;

use crate::host::{FocusHost, OverlayHost};

/// Handle type used by [`MockHost`].
pub type ElementId = u32;

/// The document body of every [`MockHost`].
pub const BODY: ElementId = 0;

#[derive(Debug, Clone)]
struct MockNode {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    focusable: bool,
    removed: bool,
}

#[derive(Debug)]
struct MockTree {
    nodes: AHashMap<ElementId, MockNode>,
    next_id: ElementId,
    focused: Option<ElementId>,
    scroll_locked: bool,
    scroll_lock_transitions: usize,
    inert: bool,
    inert_transitions: usize,
    markers: AHashMap<ElementId, (bool, u64)>,
}

impl MockTree {
    fn attached(&self, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.nodes.get(&current) {
                Some(node) if !node.removed => cursor = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Ancestry ignoring removal, so hidden-but-kept subtrees still count.
    fn within(&self, root: ElementId, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == root {
                return true;
            }
            cursor = self.nodes.get(&current).and_then(|node| node.parent);
        }
        false
    }

    fn collect_focusable(&self, id: ElementId, out: &mut Vec<ElementId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        for &child in &node.children {
            if let Some(child_node) = self.nodes.get(&child) {
                if child_node.removed {
                    continue;
                }
                if child_node.focusable {
                    out.push(child);
                }
                self.collect_focusable(child, out);
            }
        }
    }
}

/// A scriptable UI tree implementing [`OverlayHost`].
#[derive(Debug)]
pub struct MockHost {
    tree: RefCell<MockTree>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Create a tree containing only the document body.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = AHashMap::new();
        nodes.insert(
            BODY,
            MockNode {
                parent: None,
                children: Vec::new(),
                focusable: false,
                removed: false,
            },
        );
        Self {
            tree: RefCell::new(MockTree {
                nodes,
                next_id: BODY + 1,
                focused: None,
                scroll_locked: false,
                scroll_lock_transitions: 0,
                inert: false,
                inert_transitions: 0,
                markers: AHashMap::new(),
            }),
        }
    }

    fn insert(&self, parent: ElementId, focusable: bool) -> ElementId {
        let mut tree = self.tree.borrow_mut();
        let id = tree.next_id;
        tree.next_id += 1;
        tree.nodes.insert(
            id,
            MockNode {
                parent: Some(parent),
                children: Vec::new(),
                focusable,
                removed: false,
            },
        );
        if let Some(parent_node) = tree.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        id
    }

    /// Add a non-focusable container (e.g. an overlay content root).
    pub fn add_container(&self, parent: ElementId) -> ElementId {
        self.insert(parent, false)
    }

    /// Add a focusable control (button, input, link).
    pub fn add_focusable(&self, parent: ElementId) -> ElementId {
        self.insert(parent, true)
    }

    /// Detach `id` and its whole subtree from the document.
    ///
    /// If the focused element is inside the subtree, focus falls back to
    /// nothing (the body).
    pub fn remove(&self, id: ElementId) {
        if id == BODY {
            return;
        }
        let mut tree = self.tree.borrow_mut();
        if let Some(node) = tree.nodes.get_mut(&id) {
            node.removed = true;
        }
        if let Some(focused) = tree.focused
            && !tree.attached(focused)
        {
            tree.focused = None;
        }
    }

    /// Put focus on `id` as a user click would. Ignored for detached ids.
    pub fn set_focus(&self, id: ElementId) {
        let mut tree = self.tree.borrow_mut();
        if tree.attached(id) && id != BODY {
            tree.focused = Some(id);
        }
    }

    /// Drop focus back to the body.
    pub fn blur(&self) {
        self.tree.borrow_mut().focused = None;
    }

    /// The currently focused element.
    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.tree.borrow().focused
    }

    /// Whether background scrolling is suppressed.
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.tree.borrow().scroll_locked
    }

    /// Number of times the scroll lock actually changed state.
    #[must_use]
    pub fn scroll_lock_transitions(&self) -> usize {
        self.tree.borrow().scroll_lock_transitions
    }

    /// Whether the background is marked inert.
    #[must_use]
    pub fn is_background_inert(&self) -> bool {
        self.tree.borrow().inert
    }

    /// Number of times the inert marking actually changed state.
    #[must_use]
    pub fn inert_transitions(&self) -> usize {
        self.tree.borrow().inert_transitions
    }

    /// Last `(is_top, tier)` written for an overlay root.
    #[must_use]
    pub fn marker(&self, root: ElementId) -> Option<(bool, u64)> {
        self.tree.borrow().markers.get(&root).copied()
    }
}

impl FocusHost for MockHost {
    type Handle = ElementId;

    fn current_focus_target(&self) -> Option<ElementId> {
        self.tree.borrow().focused
    }

    fn focus(&self, handle: &ElementId) -> bool {
        let mut tree = self.tree.borrow_mut();
        if *handle == BODY || !tree.attached(*handle) {
            return false;
        }
        tree.focused = Some(*handle);
        true
    }

    fn is_attached(&self, handle: &ElementId) -> bool {
        self.tree.borrow().attached(*handle)
    }

    fn focusable_descendants(&self, root: &ElementId) -> Vec<ElementId> {
        let tree = self.tree.borrow();
        let mut out = Vec::new();
        if tree.attached(*root) {
            tree.collect_focusable(*root, &mut out);
        }
        out
    }

    fn is_within(&self, root: &ElementId, element: &ElementId) -> bool {
        self.tree.borrow().within(*root, *element)
    }
}

impl OverlayHost for MockHost {
    fn set_scroll_locked(&self, locked: bool) {
        let mut tree = self.tree.borrow_mut();
        if tree.scroll_locked != locked {
            tree.scroll_locked = locked;
            tree.scroll_lock_transitions += 1;
        }
    }

    fn set_background_inert(&self, inert: bool) {
        let mut tree = self.tree.borrow_mut();
        if tree.inert != inert {
            tree.inert = inert;
            tree.inert_transitions += 1;
        }
    }

    fn mark_top(&self, root: &ElementId, is_top: bool, tier: u64) {
        self.tree.borrow_mut().markers.insert(*root, (is_top, tier));
    }
}
