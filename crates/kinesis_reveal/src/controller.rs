//! Reveal controller
//!
//! Owns every reveal registration on the page. Registrations belong to a
//! scope (one per mounted section) and run a small state machine:
//!
//! ```text
//! pending --threshold--> fired --teardown--> disposed
//! pending --teardown--> disposed
//! ```
//!
//! `evaluate` is the observer pass: it compares each pending element against
//! the viewport and fires the ones that crossed their threshold, in
//! registration order. `tick` advances the entrance tweens and counters of
//! fired registrations.

use kinesis_animation::{
    AnimationScheduler, CountAnimation, CounterId, CounterState, EffectProps, FrameReport,
    RevealEffect, Style, TweenId,
};
use kinesis_core::{ElementId, EventId, LayoutSource, StateId, StateMachine, Transition};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::trigger::RevealTrigger;
use crate::viewport::Viewport;

new_key_type! {
    /// Handle to a single reveal registration
    pub struct RevealHandle;
    /// Lifetime group of registrations, typically one mounted section
    pub struct ScopeId;
}

// Registration lifecycle
const PENDING: StateId = 0;
const FIRED: StateId = 1;
const DISPOSED: StateId = 2;

const THRESHOLD_CROSSED: EventId = 0;
const TEARDOWN: EventId = 1;

const LIFECYCLE: [Transition; 3] = [
    Transition::new(PENDING, THRESHOLD_CROSSED, FIRED),
    Transition::new(PENDING, TEARDOWN, DISPOSED),
    Transition::new(FIRED, TEARDOWN, DISPOSED),
];

/// Observable lifecycle state of a registration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Fired,
    Disposed,
}

impl RevealState {
    fn from_state_id(id: StateId) -> Self {
        match id {
            PENDING => RevealState::Pending,
            FIRED => RevealState::Fired,
            _ => RevealState::Disposed,
        }
    }
}

struct Registration {
    scope: ScopeId,
    element: ElementId,
    trigger: RevealTrigger,
    effect: RevealEffect,
    machine: StateMachine,
    tween: Option<TweenId>,
    counter: Option<CounterId>,
}

impl Registration {
    fn state(&self) -> RevealState {
        RevealState::from_state_id(self.machine.current_state())
    }
}

struct Scope {
    name: String,
    handles: SmallVec<[RevealHandle; 8]>,
}

/// A registration that fired during an evaluation pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    pub handle: RevealHandle,
    pub element: ElementId,
    pub scope: ScopeId,
}

/// Scroll-triggered, fire-once entrance animations
pub struct RevealController {
    scopes: SlotMap<ScopeId, Scope>,
    registrations: SlotMap<RevealHandle, Registration>,
    /// Pending registrations in registration order
    observing: Vec<RevealHandle>,
    /// Fired registrations with a tween or counter in flight
    animating: Vec<RevealHandle>,
    scheduler: AnimationScheduler,
    /// Style override per element and the registration that owns it
    styles: FxHashMap<ElementId, (RevealHandle, EffectProps)>,
    counters: FxHashMap<ElementId, CounterState>,
    fired_total: u64,
}

impl RevealController {
    pub fn new() -> Self {
        Self {
            scopes: SlotMap::with_key(),
            registrations: SlotMap::with_key(),
            observing: Vec::new(),
            animating: Vec::new(),
            scheduler: AnimationScheduler::new(),
            styles: FxHashMap::default(),
            counters: FxHashMap::default(),
            fired_total: 0,
        }
    }

    // ========== Scopes ==========

    pub fn create_scope(&mut self, name: impl Into<String>) -> ScopeId {
        self.scopes.insert(Scope {
            name: name.into(),
            handles: SmallVec::new(),
        })
    }

    pub fn scope_name(&self, scope: ScopeId) -> Option<&str> {
        self.scopes.get(scope).map(|s| s.name.as_str())
    }

    pub fn has_scope(&self, scope: ScopeId) -> bool {
        self.scopes.contains_key(scope)
    }

    // ========== Registration ==========

    /// Observe `element` and play `effect` once it crosses `trigger`.
    ///
    /// Until then the element shows the effect's initial state. Registering
    /// into an unknown scope yields a handle that is already disposed.
    pub fn register(
        &mut self,
        scope: ScopeId,
        element: ElementId,
        trigger: RevealTrigger,
        effect: RevealEffect,
    ) -> RevealHandle {
        let initial = effect.from;
        let handle = self.registrations.insert(Registration {
            scope,
            element,
            trigger,
            effect,
            machine: StateMachine::new(PENDING, &LIFECYCLE),
            tween: None,
            counter: None,
        });

        match self.scopes.get_mut(scope) {
            Some(scope) => {
                scope.handles.push(handle);
                self.observing.push(handle);
                self.styles.insert(element, (handle, initial));
            }
            None => {
                tracing::warn!(?element, "reveal registered into a disposed scope");
                self.detach(handle);
            }
        }
        handle
    }

    /// Register and fire immediately, bypassing the scroll threshold
    pub fn play_now(
        &mut self,
        scope: ScopeId,
        element: ElementId,
        effect: RevealEffect,
    ) -> RevealHandle {
        let handle = self.register(scope, element, RevealTrigger::visible_fraction(0.0), effect);
        if self.fire(handle) {
            self.observing.retain(|h| *h != handle);
        }
        handle
    }

    // ========== Observation ==========

    /// Fire every pending registration whose element has crossed its
    /// threshold. Elements the layout does not know about stay pending.
    pub fn evaluate(&mut self, layout: &dyn LayoutSource, viewport: &Viewport) -> Vec<Fired> {
        let mut fired = Vec::new();
        let observing = std::mem::take(&mut self.observing);
        let mut still_observing = Vec::with_capacity(observing.len());

        for handle in observing {
            let Some(reg) = self.registrations.get(handle) else {
                continue;
            };
            if reg.state() != RevealState::Pending {
                continue;
            }
            let crossed = layout
                .bounds(reg.element)
                .map(|bounds| reg.trigger.is_met(viewport.visible_fraction(bounds)))
                .unwrap_or(false);

            if crossed && self.fire(handle) {
                if let Some(reg) = self.registrations.get(handle) {
                    fired.push(Fired {
                        handle,
                        element: reg.element,
                        scope: reg.scope,
                    });
                }
            } else {
                still_observing.push(handle);
            }
        }

        self.observing = still_observing;
        fired
    }

    /// Transition to fired and start the effect. Returns `false` if the
    /// registration was not pending.
    fn fire(&mut self, handle: RevealHandle) -> bool {
        let Some(reg) = self.registrations.get_mut(handle) else {
            return false;
        };
        if reg.machine.send(THRESHOLD_CROSSED).is_none() {
            return false;
        }

        let delay_ms = reg.effect.total_delay_ms();
        let tween = self.scheduler.add_tween(reg.effect.tween());
        reg.tween = Some(tween);

        if let Some(spec) = reg.effect.counter {
            let count = CountAnimation::from_spec(&spec).with_delay(delay_ms);
            self.counters.insert(reg.element, count.state());
            reg.counter = Some(self.scheduler.add_counter(count));
        }

        let scope_name = self
            .scopes
            .get(reg.scope)
            .map(|s| s.name.as_str())
            .unwrap_or("?");
        tracing::debug!(
            scope = scope_name,
            element = ?reg.element,
            delay_ms,
            duration_ms = reg.effect.duration_ms,
            "reveal fired"
        );

        self.animating.push(handle);
        self.fired_total += 1;
        true
    }

    // ========== Animation ==========

    /// Advance entrance tweens and counters by `dt_ms`
    pub fn tick(&mut self, dt_ms: f32) -> FrameReport {
        let report = self.scheduler.tick(dt_ms);

        let registrations = &mut self.registrations;
        let scheduler = &self.scheduler;
        let styles = &mut self.styles;
        let counters = &mut self.counters;

        self.animating.retain(|handle| {
            let Some(reg) = registrations.get_mut(*handle) else {
                return false;
            };

            if let Some(id) = reg.tween {
                let props = match scheduler.tween(id) {
                    Some(tween) => tween.value(),
                    None => {
                        reg.tween = None;
                        reg.effect.to
                    }
                };
                if let Some(entry) = styles.get_mut(&reg.element) {
                    if entry.0 == *handle {
                        entry.1 = props;
                    }
                }
            }

            if let Some(id) = reg.counter {
                let state = match scheduler.counter(id) {
                    Some(counter) => counter.state(),
                    None => {
                        reg.counter = None;
                        let target = reg.effect.counter.map(|c| c.to).unwrap_or_default();
                        CounterState {
                            target,
                            displayed: target,
                            progress: 1.0,
                        }
                    }
                };
                counters.insert(reg.element, state);
            }

            reg.tween.is_some() || reg.counter.is_some()
        });

        report
    }

    /// Current resolved style of an element. Elements without a registration
    /// are at rest.
    pub fn style(&self, element: ElementId) -> Style {
        self.styles
            .get(&element)
            .map(|(_, props)| props.resolve())
            .unwrap_or_default()
    }

    /// Counter attached to an element's reveal, once it has fired
    pub fn counter_state(&self, element: ElementId) -> Option<CounterState> {
        self.counters.get(&element).copied()
    }

    // ========== Teardown ==========

    /// Stop observing and cancel any in-flight animation. Safe to call on a
    /// fired, pending or already disposed handle.
    pub fn dispose(&mut self, handle: RevealHandle) {
        let Some(reg) = self.detach(handle) else {
            return;
        };
        if let Some(scope) = self.scopes.get_mut(reg.scope) {
            scope.handles.retain(|h| *h != handle);
        }
    }

    /// Dispose every registration of a scope and forget the scope
    pub fn dispose_scope(&mut self, scope: ScopeId) {
        let Some(entry) = self.scopes.remove(scope) else {
            return;
        };
        let count = entry.handles.len();
        for handle in entry.handles {
            self.detach(handle);
        }
        tracing::debug!(scope = %entry.name, registrations = count, "scope disposed");
    }

    /// Dispose every scope on the page
    pub fn dispose_all(&mut self) {
        let scopes: SmallVec<[ScopeId; 16]> = self.scopes.keys().collect();
        for scope in scopes {
            self.dispose_scope(scope);
        }
    }

    fn detach(&mut self, handle: RevealHandle) -> Option<Registration> {
        let mut reg = self.registrations.remove(handle)?;
        reg.machine.send(TEARDOWN);

        if let Some(id) = reg.tween.take() {
            self.scheduler.cancel_tween(id);
        }
        if let Some(id) = reg.counter.take() {
            self.scheduler.cancel_counter(id);
        }
        // finished counters leave their final state behind
        if reg.effect.counter.is_some() {
            self.counters.remove(&reg.element);
        }
        if self.styles.get(&reg.element).map(|(owner, _)| *owner) == Some(handle) {
            self.styles.remove(&reg.element);
        }
        self.observing.retain(|h| *h != handle);
        self.animating.retain(|h| *h != handle);
        Some(reg)
    }

    // ========== Queries ==========

    /// Lifecycle state; handles that were disposed report `Disposed`
    pub fn state(&self, handle: RevealHandle) -> RevealState {
        self.registrations
            .get(handle)
            .map(Registration::state)
            .unwrap_or(RevealState::Disposed)
    }

    pub fn is_fired(&self, handle: RevealHandle) -> bool {
        self.state(handle) == RevealState::Fired
    }

    /// Pending registrations of a scope still being observed
    pub fn active_observer_count(&self, scope: ScopeId) -> usize {
        self.scopes
            .get(scope)
            .map(|s| {
                s.handles
                    .iter()
                    .filter(|h| self.state(**h) == RevealState::Pending)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Pending registrations across all scopes
    pub fn observer_count(&self) -> usize {
        self.observing.len()
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    pub fn has_active_animations(&self) -> bool {
        self.scheduler.has_active_animations()
    }

    /// Reveals fired since the controller was created
    pub fn fired_total(&self) -> u64 {
        self.fired_total
    }
}

impl Default for RevealController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinesis_animation::{CounterSpec, Easing};
    use kinesis_core::Rect;

    fn fade() -> RevealEffect {
        RevealEffect::new(
            EffectProps::opacity(0.0),
            EffectProps::opacity(1.0),
            100,
            Easing::Linear,
        )
    }

    fn layout(entries: &[(ElementId, f32)]) -> FxHashMap<ElementId, Rect> {
        entries
            .iter()
            .map(|(id, y)| (*id, Rect::new(0.0, *y, 100.0, 50.0)))
            .collect()
    }

    #[test]
    fn pending_elements_show_initial_state() {
        let mut controller = RevealController::new();
        let scope = controller.create_scope("about");
        let id = ElementId::from_key("about/headline");
        controller.register(scope, id, RevealTrigger::default(), fade());

        assert_eq!(controller.style(id).opacity, 0.0);
        assert_eq!(controller.style(ElementId::from_key("elsewhere")), Style::default());
    }

    #[test]
    fn evaluation_fires_in_registration_order() {
        let mut controller = RevealController::new();
        let scope = controller.create_scope("skills");
        let ids: Vec<ElementId> = (0..20)
            .map(|i| ElementId::from_key(&format!("skills/{i}")))
            .collect();
        // reverse layout order so document position does not decide
        let positions: Vec<(ElementId, f32)> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, 500.0 - i as f32 * 10.0))
            .collect();
        for id in &ids {
            controller.register(scope, *id, RevealTrigger::default(), fade());
        }

        let fired = controller.evaluate(&layout(&positions), &Viewport::new(1280.0, 800.0));
        let order: Vec<ElementId> = fired.iter().map(|f| f.element).collect();
        assert_eq!(order, ids);
        assert_eq!(controller.active_observer_count(scope), 0);
    }

    #[test]
    fn play_now_fires_without_layout() {
        let mut controller = RevealController::new();
        let scope = controller.create_scope("experience");
        let id = ElementId::from_key("experience/content");
        let handle = controller.play_now(scope, id, fade());

        assert!(controller.is_fired(handle));
        assert_eq!(controller.observer_count(), 0);
        controller.tick(50.0);
        assert_eq!(controller.style(id).opacity, 0.5);
        controller.tick(60.0);
        assert_eq!(controller.style(id).opacity, 1.0);
        assert!(!controller.has_active_animations());
    }

    #[test]
    fn counter_runs_with_the_reveal_delay() {
        let mut controller = RevealController::new();
        let scope = controller.create_scope("about");
        let id = ElementId::from_key("about/stats/sessions");
        let effect = fade()
            .with_stagger(1, 100)
            .with_counter(CounterSpec::to(2000, 1500, Easing::POWER2_OUT));
        controller.play_now(scope, id, effect);

        assert_eq!(controller.counter_state(id).map(|c| c.displayed), Some(0));
        controller.tick(50.0);
        assert_eq!(controller.counter_state(id).map(|c| c.displayed), Some(0));

        let mut last = 0;
        for _ in 0..120 {
            controller.tick(16.0);
            let displayed = controller.counter_state(id).map(|c| c.displayed).unwrap_or(0);
            assert!(displayed >= last);
            last = displayed;
        }
        assert_eq!(controller.counter_state(id).map(|c| c.displayed), Some(2000));
    }

    #[test]
    fn finished_counter_is_forgotten_with_its_scope() {
        let mut controller = RevealController::new();
        let scope = controller.create_scope("about");
        let id = ElementId::from_key("about/stats/sessions");
        let effect = fade().with_counter(CounterSpec::to(2000, 1500, Easing::POWER2_OUT));
        controller.play_now(scope, id, effect);

        controller.tick(2000.0);
        assert_eq!(controller.counter_state(id).map(|c| c.displayed), Some(2000));
        assert!(!controller.has_active_animations());

        controller.dispose_scope(scope);
        assert_eq!(controller.registration_count(), 0);
        assert_eq!(controller.counter_state(id), None);
        assert_eq!(controller.style(id), Style::default());
    }

    #[test]
    fn registering_into_disposed_scope_is_inert() {
        let mut controller = RevealController::new();
        let scope = controller.create_scope("gone");
        controller.dispose_scope(scope);

        let id = ElementId::from_key("gone/headline");
        let handle = controller.register(scope, id, RevealTrigger::default(), fade());
        assert_eq!(controller.state(handle), RevealState::Disposed);
        let fired = controller.evaluate(&layout(&[(id, 0.0)]), &Viewport::default());
        assert!(fired.is_empty());
        assert_eq!(controller.style(id), Style::default());
    }

    #[test]
    fn later_registration_owns_the_element_style() {
        let mut controller = RevealController::new();
        let scope = controller.create_scope("experience");
        let id = ElementId::from_key("experience/content");
        let first = controller.play_now(scope, id, fade());
        let second = controller.play_now(scope, id, fade());

        controller.dispose(first);
        assert_eq!(controller.style(id).opacity, 0.0);
        controller.tick(200.0);
        assert_eq!(controller.style(id).opacity, 1.0);
        controller.dispose(second);
        assert_eq!(controller.style(id), Style::default());
    }
}
