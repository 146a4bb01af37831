//! The diff engine.
//!
//! An update never rebuilds the live tree. It materializes a detached
//! reference subtree for the new description, then for every live child of
//! the target that shares the reference's tag but not its markup:
//!
//! - attributes equal, fewer live children: the reference's extra trailing
//!   children are moved over
//! - attributes equal, more live children: the live child is swapped for the
//!   reference wholesale
//! - attributes equal, same count: text of each child pair is patched
//! - attributes differ: the live attribute set is replaced
//!
//! Whatever the live tree did not adopt from the reference is discarded when
//! the pass ends.

use std::rc::Rc;

use compact_str::CompactString;
use rustc_hash::FxHashSet;
use teddy_canvas::{Attribute, HostId};
use teddy_relief::{InstanceId, Node, VNode};

use crate::errors::{RenderError, RenderResult};
use crate::metadata::Metadata;
use crate::renderer::Renderer;

/// How [`Renderer::diff`] treats the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// Materialize the node and append it; `dirty` fires mount hooks
    Placement { dirty: bool },
    /// Patch the target's live children toward the node
    Update,
}

/// Bookkeeping for one top-level operation.
#[derive(Debug, Default)]
pub(crate) struct Pass {
    /// Detached candidates for removal once the pass ends
    pub retired: Vec<HostId>,
    /// Sibling failures that did not abort the pass
    pub errors: Vec<RenderError>,
}

impl Renderer {
    /// Run one diff in the given mode, then apply any queued state updates.
    pub fn diff(&mut self, target: HostId, node: &Node, mode: DiffMode) -> RenderResult<HostId> {
        if !self.host.contains(target) {
            return Err(RenderError::UnknownHostNode(target));
        }

        self.begin_pass();
        let result = match mode {
            DiffMode::Placement { dirty } => self.place(node, target, dirty),
            DiffMode::Update => self.update(target, node),
        };
        let result = self.end_pass(result);

        let flushed = self.flush();
        let host = result?;
        flushed?;
        Ok(host)
    }

    pub(crate) fn begin_pass(&mut self) {
        self.pass = Pass::default();
    }

    pub(crate) fn end_pass<T>(&mut self, result: RenderResult<T>) -> RenderResult<T> {
        self.sweep();

        let mut errors = std::mem::take(&mut self.pass.errors);
        match result {
            Ok(value) if errors.is_empty() => Ok(value),
            Ok(_) => Err(RenderError::aggregate(errors)),
            Err(err) => {
                errors.push(err);
                Err(RenderError::aggregate(errors))
            }
        }
    }

    /// Discard retired nodes the live tree did not adopt.
    fn sweep(&mut self) {
        for id in std::mem::take(&mut self.pass.retired) {
            if self.host.contains(id) && self.host.parent(id).is_none() {
                let removed = self.host.discard(id);
                tracing::trace!("sweep: discarded {} nodes under {}", removed.len(), id);
                self.forget(&removed);
            }
        }
    }

    fn update(&mut self, target: HostId, node: &Node) -> RenderResult<HostId> {
        let (reference, vnode) = match self.reusable_instance(target, node) {
            Some(id) => self.rerender(id)?,
            None => {
                let materialized = self.materialize_node(node, None, false)?;
                if let Some(id) = materialized.instance() {
                    if let Some(instance) = self.instances.get_mut(&id) {
                        instance.base = Some(target);
                    }
                }
                (materialized.host(), node.as_element().cloned())
            }
        };

        self.pass.retired.push(reference);
        self.reconcile(target, reference, vnode.as_ref());
        Ok(target)
    }

    /// The instance to re-render when `node` describes the same component
    /// type that was last placed into `target`.
    fn reusable_instance(&self, target: HostId, node: &Node) -> Option<InstanceId> {
        let Node::Component(descriptor) = node else {
            return None;
        };
        match self.metadata.get(target)? {
            Metadata::Component(id) => self
                .instances
                .get(id)
                .filter(|instance| instance.ty() == descriptor.ty())
                .map(|instance| instance.id()),
            Metadata::Node(_) => None,
        }
    }

    /// Render an existing instance again into a detached reference subtree.
    pub(crate) fn rerender(&mut self, id: InstanceId) -> RenderResult<(HostId, Option<Rc<VNode>>)> {
        let instance = self
            .instances
            .get(&id)
            .ok_or(RenderError::UnknownInstance(id))?;
        let rendered = instance.render(&self.queue);

        let reference = self.materialize_node(&rendered, None, false)?.host();
        let vnode = rendered.as_element().cloned();
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.node = Some(rendered);
        }
        Ok((reference, vnode))
    }

    /// Patch every live child of `target` that differs from `reference`.
    pub(crate) fn reconcile(&mut self, target: HostId, reference: HostId, vnode: Option<&Rc<VNode>>) {
        let Some(tag) = self.host.tag_name(reference).map(CompactString::from) else {
            tracing::trace!("reconcile: reference {} is not an element", reference);
            return;
        };

        for child in self.host.children(target).to_vec() {
            if self.host.parent(reference).is_some() {
                break;
            }
            if self.host.tag_name(child) != Some(tag.as_str())
                || self.host.inner_html(child) == self.host.inner_html(reference)
            {
                continue;
            }

            if let Err(err) = self.diff_children(child, reference) {
                self.pass.errors.push(err);
            }
            if let Some(vnode) = vnode {
                vnode.link(child);
            }
        }
    }

    pub(crate) fn diff_children(&mut self, child: HostId, reference: HostId) -> RenderResult<()> {
        // tag mismatches are left alone
        if !self.host.is_element(child) || self.host.tag_name(child) != self.host.tag_name(reference) {
            return Ok(());
        }

        let same_kind = self.options.same_kind_guard && self.replaced.contains(&child);

        if !self.attributes_equal(child, reference) {
            tracing::trace!("diff: replacing attributes of {}", child);
            let attributes = self.host.attributes(reference).to_vec();
            self.host.clear_attributes(child)?;
            for Attribute { name, value } in attributes {
                self.host.set_attribute(child, &name, &value)?;
            }
            return Ok(());
        }

        let live = self.host.children(child).to_vec();
        let fresh = self.host.children(reference).to_vec();

        if live.len() < fresh.len() {
            tracing::trace!("diff: appending {} children to {}", fresh.len() - live.len(), child);
            for &extra in &fresh[live.len()..] {
                self.host.append_child(child, extra)?;
            }
        } else if live.len() > fresh.len() {
            if same_kind {
                tracing::trace!("diff: {} was already replaced in this flush", child);
                return Ok(());
            }
            self.replace(child, reference)?;
        } else {
            for (&live_child, &fresh_child) in live.iter().zip(&fresh) {
                match (self.host.first_child(live_child), self.host.first_child(fresh_child)) {
                    (Some(live_first), Some(fresh_first)) => self.patch_text(live_first, fresh_first)?,
                    _ => self.patch_text(live_child, fresh_child)?,
                }
            }
        }
        Ok(())
    }

    fn patch_text(&mut self, live: HostId, fresh: HostId) -> RenderResult<()> {
        let Some(value) = self.host.node_value(fresh).map(CompactString::from) else {
            return Ok(());
        };
        if self.host.node_value(live) != Some(value.as_str()) {
            tracing::trace!("diff: patching text of {}", live);
            self.host.set_node_value(live, &value)?;
        }
        Ok(())
    }

    /// Swap `child` for `reference` in place and retire the old node.
    fn replace(&mut self, child: HostId, reference: HostId) -> RenderResult<()> {
        let Some(parent) = self.host.parent(child) else {
            return Ok(());
        };
        tracing::trace!("diff: replacing {} with {}", child, reference);
        self.host.replace_child(parent, reference, child)?;

        for instance in self.instances.values_mut() {
            if instance.dom == Some(child) {
                instance.dom = Some(reference);
            }
        }
        self.pass.retired.push(child);
        self.replaced.insert(reference);
        Ok(())
    }

    fn attributes_equal(&self, a: HostId, b: HostId) -> bool {
        let left = self.host.attributes(a);
        let right = self.host.attributes(b);

        if self.options.order_sensitive_attributes {
            return concat_attributes(left) == concat_attributes(right);
        }
        if left.len() != right.len() {
            return false;
        }
        let left: FxHashSet<&Attribute> = left.iter().collect();
        right.iter().all(|attr| left.contains(attr))
    }
}

fn concat_attributes(attributes: &[Attribute]) -> String {
    attributes
        .iter()
        .map(|attr| format!("{}=\"{}\"", attr.name, attr.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RendererOptions;
    use teddy_relief::{h, Props};

    fn list(items: &[&str]) -> Node {
        h(
            "ul",
            None,
            items.iter().map(|item| h("li", None, [(*item).into()])),
        )
    }

    fn detached(renderer: &mut Renderer, node: &Node) -> HostId {
        renderer.materialize(node, None, false).unwrap().host()
    }

    #[test]
    fn test_same_count_patches_text() {
        let mut renderer = Renderer::new();
        let live = detached(&mut renderer, &list(&["a", "b"]));
        let reference = detached(&mut renderer, &list(&["a", "c"]));

        renderer.begin_pass();
        renderer.diff_children(live, reference).unwrap();
        assert_eq!(renderer.host().inner_html(live), "<li>a</li><li>c</li>");
    }

    #[test]
    fn test_fewer_children_appends() {
        let mut renderer = Renderer::new();
        let live = detached(&mut renderer, &list(&["a"]));
        let reference = detached(&mut renderer, &list(&["a", "b", "c"]));

        renderer.begin_pass();
        renderer.diff_children(live, reference).unwrap();
        assert_eq!(
            renderer.host().inner_html(live),
            "<li>a</li><li>b</li><li>c</li>"
        );
        // moved, not copied
        assert_eq!(renderer.host().inner_html(reference), "<li>a</li>");
    }

    #[test]
    fn test_empty_live_element_receives_children() {
        let mut renderer = Renderer::new();
        let live = detached(&mut renderer, &list(&[]));
        let reference = detached(&mut renderer, &list(&["a"]));

        renderer.begin_pass();
        renderer.diff_children(live, reference).unwrap();
        assert_eq!(renderer.host().inner_html(live), "<li>a</li>");
    }

    #[test]
    fn test_more_children_replaces_wholesale() {
        let mut renderer = Renderer::new();
        let parent = renderer.create_container("div");
        let live = detached(&mut renderer, &list(&["a", "b", "c"]));
        renderer.host_mut().append_child(parent, live).unwrap();
        let reference = detached(&mut renderer, &list(&["a"]));

        renderer.begin_pass();
        renderer.diff_children(live, reference).unwrap();
        assert_eq!(renderer.host().children(parent), &[reference]);
        assert_eq!(renderer.host().parent(live), None);
    }

    #[test]
    fn test_attribute_change_replaces_set_only() {
        let mut renderer = Renderer::new();
        let live = detached(
            &mut renderer,
            &h("p", Some(Props::new().with("class", "a").with("title", "t")), ["old".into()]),
        );
        let reference = detached(
            &mut renderer,
            &h("p", Some(Props::new().with("class", "b")), ["new".into()]),
        );

        renderer.begin_pass();
        renderer.diff_children(live, reference).unwrap();
        // children wait for the next pass
        assert_eq!(renderer.host().outer_html(live), r#"<p class="b">old</p>"#);
    }

    #[test]
    fn test_tag_mismatch_is_ignored() {
        let mut renderer = Renderer::new();
        let live = detached(&mut renderer, &h("p", None, ["a".into()]));
        let reference = detached(&mut renderer, &h("div", None, ["b".into()]));

        renderer.begin_pass();
        renderer.diff_children(live, reference).unwrap();
        assert_eq!(renderer.host().outer_html(live), "<p>a</p>");
    }

    #[test]
    fn test_attribute_order() {
        let first = h("a", Some(Props::new().with("x", "1").with("y", "2")), []);
        let second = h("a", Some(Props::new().with("y", "2").with("x", "1")), []);

        let mut renderer = Renderer::new();
        let live = detached(&mut renderer, &first);
        let reference = detached(&mut renderer, &second);
        assert!(renderer.attributes_equal(live, reference));

        let mut renderer = Renderer::with_options(RendererOptions {
            order_sensitive_attributes: true,
            ..Default::default()
        });
        let live = detached(&mut renderer, &first);
        let reference = detached(&mut renderer, &second);
        assert!(!renderer.attributes_equal(live, reference));
    }

    #[test]
    fn test_update_discards_reference() {
        let mut renderer = Renderer::new();
        let root = renderer.create_container("main");
        renderer.render(&list(&["a"]), root).unwrap();
        let before = renderer.host().node_count();

        renderer.render(&list(&["b"]), root).unwrap();
        assert_eq!(renderer.host().inner_html(root), "<ul><li>b</li></ul>");
        assert_eq!(renderer.host().node_count(), before);
    }
}
