//! Component re-rendering and the state update loop.

use teddy_canvas::{Event, HostId};
use teddy_relief::{InstanceId, PendingUpdate, State};

use crate::errors::{RenderError, RenderResult};
use crate::renderer::Renderer;

impl Renderer {
    /// Re-render a mounted instance in place and apply queued updates.
    ///
    /// `component_did_update` fires only when the markup under the
    /// instance's base actually changed.
    pub fn render_component(&mut self, id: InstanceId) -> RenderResult<()> {
        self.rerender_component(id)?;
        self.flush().map(|_| ())
    }

    /// Replace an instance's state and re-render it.
    ///
    /// Returns the number of re-renders the update caused.
    pub fn set_state(&mut self, id: InstanceId, state: State) -> RenderResult<usize> {
        if !self.instances.contains_key(&id) {
            return Err(RenderError::UnknownInstance(id));
        }
        self.queue.push(id, state);
        self.flush()
    }

    /// Invoke the `event` listeners of `target`, then apply any state
    /// updates they queued.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch_event(&mut self, target: HostId, event: &str) -> RenderResult<usize> {
        if !self.host.contains(target) {
            return Err(RenderError::UnknownHostNode(target));
        }

        let handlers = self.host.listeners(target, event);
        let event = Event::new(event, target);
        for handler in &handlers {
            handler.call(&event);
        }
        tracing::debug!("dispatch: {} listeners for {} on {}", handlers.len(), event.name, target);

        self.flush()?;
        Ok(handlers.len())
    }

    /// Apply queued state updates until the queue is empty.
    ///
    /// Updater closures see the instance's state as left by the updates
    /// before them. Returns the number of re-renders performed.
    pub fn flush(&mut self) -> RenderResult<usize> {
        let result = self.drain_queue();
        self.replaced.clear();
        result
    }

    fn drain_queue(&mut self) -> RenderResult<usize> {
        let limit = self.options.max_update_passes;
        let mut passes = 0;
        let mut rendered = 0;

        while let Some(PendingUpdate { instance, change }) = self.queue.pop() {
            passes += 1;
            if passes > limit {
                self.queue.clear();
                tracing::warn!("flush: giving up after {} state updates", limit);
                return Err(RenderError::UpdateLimit { limit });
            }

            let Some(target) = self.instances.get_mut(&instance) else {
                tracing::debug!("flush: dropping state for unknown instance {}", instance);
                continue;
            };
            target.state = change.apply(&target.state);

            match self.rerender_component(instance) {
                Ok(()) => rendered += 1,
                Err(RenderError::UnmountedInstance { instance }) => {
                    tracing::debug!("flush: instance {} is not mounted yet", instance);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(rendered)
    }

    fn rerender_component(&mut self, id: InstanceId) -> RenderResult<()> {
        let instance = self
            .instances
            .get(&id)
            .ok_or(RenderError::UnknownInstance(id))?;
        let (Some(base), Some(old)) = (instance.base, instance.dom) else {
            return Err(RenderError::UnmountedInstance { instance: id });
        };

        self.begin_pass();
        let result = self.rerender_into(id, base, old);
        self.end_pass(result)
    }

    fn rerender_into(&mut self, id: InstanceId, base: HostId, old: HostId) -> RenderResult<()> {
        let before = self.host.inner_html(base);

        let (reference, vnode) = self.rerender(id)?;
        self.pass.retired.push(reference);
        self.reconcile(base, reference, vnode.as_ref());

        if self.host.inner_html(base) != before {
            let new = self.dom_node(id).unwrap_or(old);
            tracing::debug!("render_component: instance {} updated ({} -> {})", id, old, new);
            self.with_instance(id, |instance, queue| instance.did_update(queue, old, new));
        }
        Ok(())
    }
}
