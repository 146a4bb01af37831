//! Host tree management.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{HostError, HostResult};
use crate::event::EventHandler;
use crate::node::{Attribute, ElementData, HostId, HostKind, HostNode};

/// A tree of host nodes.
///
/// Nodes live in an arena keyed by [`HostId`]; detached nodes stay alive
/// until [`HostTree::discard`] removes them.
#[derive(Debug, Default)]
pub struct HostTree {
    /// All nodes by ID
    nodes: FxHashMap<HostId, HostNode>,
    /// Next available node ID
    next_id: HostId,
}

impl HostTree {
    /// Create a new, empty host tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, kind: HostKind) -> HostId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, HostNode::new(id, kind));
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> HostId {
        self.insert(HostKind::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, value: &str) -> HostId {
        self.insert(HostKind::Text(value.into()))
    }

    /// Create a detached grouping container.
    pub fn create_fragment(&mut self) -> HostId {
        self.insert(HostKind::Fragment)
    }

    /// Get a node by ID.
    pub fn get(&self, id: HostId) -> Option<&HostNode> {
        self.nodes.get(&id)
    }

    /// Whether the id resolves to a live node.
    pub fn contains(&self, id: HostId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Get node count.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Parent of a node.
    pub fn parent(&self, id: HostId) -> Option<HostId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Children of a node, empty for unknown ids.
    pub fn children(&self, id: HostId) -> &[HostId] {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// First child of a node.
    pub fn first_child(&self, id: HostId) -> Option<HostId> {
        self.children(id).first().copied()
    }

    /// Tag name of an element.
    pub fn tag_name(&self, id: HostId) -> Option<&str> {
        self.get(id).and_then(HostNode::tag_name)
    }

    /// Whether the node is an element.
    pub fn is_element(&self, id: HostId) -> bool {
        self.get(id).is_some_and(HostNode::is_element)
    }

    /// Text value of a text node.
    pub fn node_value(&self, id: HostId) -> Option<&str> {
        self.get(id).and_then(HostNode::node_value)
    }

    /// Overwrite a text node's value. Other node kinds ignore the write.
    pub fn set_node_value(&mut self, id: HostId, value: &str) -> HostResult<()> {
        let node = self.node_mut(id)?;
        if let HostKind::Text(text) = &mut node.kind {
            *text = value.into();
        }
        Ok(())
    }

    fn node_mut(&mut self, id: HostId) -> HostResult<&mut HostNode> {
        self.nodes.get_mut(&id).ok_or(HostError::UnknownNode(id))
    }

    fn element_mut(&mut self, id: HostId) -> HostResult<&mut ElementData> {
        match &mut self.node_mut(id)?.kind {
            HostKind::Element(el) => Ok(el),
            _ => Err(HostError::NotAnElement(id)),
        }
    }

    fn is_fragment(&self, id: HostId) -> bool {
        self.get(id)
            .is_some_and(|node| matches!(node.kind, HostKind::Fragment))
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    fn is_inclusive_ancestor(&self, ancestor: HostId, id: HostId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.parent(cur);
        }
        false
    }

    /// Detach a node from its parent, if any.
    fn detach(&mut self, id: HostId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            if let Some(pos) = parent_node.children.iter().position(|&c| c == id) {
                parent_node.children.remove(pos);
            }
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
    }

    /// Nodes that actually get inserted for `id`: a grouping container
    /// contributes its children, anything else contributes itself.
    fn insertion_set(&self, id: HostId) -> SmallVec<[HostId; 4]> {
        if self.is_fragment(id) {
            SmallVec::from_slice(self.children(id))
        } else {
            smallvec::smallvec![id]
        }
    }

    fn check_insert(&self, parent: HostId, child: HostId) -> HostResult<()> {
        if !self.contains(parent) {
            return Err(HostError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(HostError::UnknownNode(child));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(HostError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// The child is detached from its previous parent first. Appending a
    /// grouping container moves its children instead and leaves it empty.
    pub fn append_child(&mut self, parent: HostId, child: HostId) -> HostResult<()> {
        self.check_insert(parent, child)?;

        for id in self.insertion_set(child) {
            self.detach(id);
            self.node_mut(id)?.parent = Some(parent);
            self.node_mut(parent)?.children.push(id);
        }
        Ok(())
    }

    /// Replace `old` (a child of `parent`) with `new`.
    pub fn replace_child(&mut self, parent: HostId, new: HostId, old: HostId) -> HostResult<()> {
        self.check_insert(parent, new)?;
        if self.parent(old) != Some(parent) {
            return Err(HostError::NotAChild { parent, child: old });
        }
        if new == old {
            return Ok(());
        }

        let incoming = self.insertion_set(new);
        for &id in &incoming {
            self.detach(id);
        }

        let pos = self
            .children(parent)
            .iter()
            .position(|&c| c == old)
            .ok_or(HostError::NotAChild { parent, child: old })?;
        self.node_mut(old)?.parent = None;

        let parent_node = self.node_mut(parent)?;
        parent_node.children.remove(pos);
        parent_node.children.insert_many(pos, incoming.iter().copied());

        for id in incoming {
            self.node_mut(id)?.parent = Some(parent);
        }
        Ok(())
    }

    /// Remove `child` from `parent`, leaving it detached but alive.
    pub fn remove_child(&mut self, parent: HostId, child: HostId) -> HostResult<()> {
        if self.parent(child) != Some(parent) {
            return Err(HostError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    /// Remove a node and all its descendants from the arena.
    ///
    /// Returns every removed id; unknown ids remove nothing.
    pub fn discard(&mut self, id: HostId) -> Vec<HostId> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.detach(id);

        let descendants = self.collect_descendants(id);
        for node_id in &descendants {
            self.nodes.remove(node_id);
        }
        descendants
    }

    /// Collect a node and all its descendants.
    fn collect_descendants(&self, id: HostId) -> Vec<HostId> {
        let mut result = vec![id];
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            for &child_id in self.children(current) {
                result.push(child_id);
                stack.push(child_id);
            }
        }

        result
    }

    /// Attributes of an element, empty for other nodes.
    pub fn attributes(&self, id: HostId) -> &[Attribute] {
        match self.get(id).map(|node| &node.kind) {
            Some(HostKind::Element(el)) => el.attributes.as_slice(),
            _ => &[],
        }
    }

    /// Look up a single attribute.
    pub fn attribute(&self, id: HostId, name: &str) -> Option<&str> {
        match self.get(id).map(|node| &node.kind) {
            Some(HostKind::Element(el)) => el.attribute(name),
            _ => None,
        }
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, id: HostId, name: &str, value: &str) -> HostResult<()> {
        let el = self.element_mut(id)?;
        match el.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value.into(),
            None => el.attributes.push(Attribute::new(name, value)),
        }
        Ok(())
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, id: HostId, name: &str) -> HostResult<()> {
        let el = self.element_mut(id)?;
        el.attributes.retain(|attr| attr.name != name);
        Ok(())
    }

    /// Remove every attribute of an element.
    pub fn clear_attributes(&mut self, id: HostId) -> HostResult<()> {
        self.element_mut(id)?.attributes.clear();
        Ok(())
    }

    /// Assign a direct host property.
    ///
    /// `className` writes the `class` attribute. `innerHTML` replaces the
    /// element's children with a single raw-markup node.
    pub fn set_property(&mut self, id: HostId, key: &str, value: &str) -> HostResult<()> {
        match key {
            "className" => self.set_attribute(id, "class", value),
            "innerHTML" => {
                self.element_mut(id)?;
                for child in self.children(id).to_vec() {
                    self.discard(child);
                }
                let raw = self.insert(HostKind::Raw(value.into()));
                self.append_child(id, raw)
            }
            _ => Err(HostError::UnknownProperty(key.to_string())),
        }
    }

    /// Subscribe a handler to an event on an element.
    pub fn add_event_listener(
        &mut self,
        id: HostId,
        event: &str,
        handler: EventHandler,
    ) -> HostResult<()> {
        let el = self.element_mut(id)?;
        el.listeners
            .entry(CompactString::from(event))
            .or_default()
            .push(handler);
        Ok(())
    }

    /// Handlers subscribed to an event, in subscription order.
    pub fn listeners(&self, id: HostId, event: &str) -> Vec<EventHandler> {
        match self.get(id).map(|node| &node.kind) {
            Some(HostKind::Element(el)) => el
                .listeners
                .get(event)
                .map(|handlers| handlers.to_vec())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Walk a subtree depth-first, pre-order.
    pub fn walk_preorder(&self, start: HostId) -> TreeWalker<'_> {
        TreeWalker::new(self, start)
    }
}

/// Iterator for tree traversal.
pub struct TreeWalker<'a> {
    tree: &'a HostTree,
    stack: Vec<HostId>,
}

impl<'a> TreeWalker<'a> {
    fn new(tree: &'a HostTree, start: HostId) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for TreeWalker<'a> {
    type Item = &'a HostNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.tree.get(id) {
                // Push children in reverse order so they're processed left-to-right
                for &child_id in node.children.iter().rev() {
                    self.stack.push(child_id);
                }
                return Some(node);
            }
        }
        None
    }
}
