//! The scene director: progress recomputation, timeline application, and
//! phase tracking for the scroll narrative.

pub mod progress;
pub mod timeline;

pub use progress::{DocumentLayout, ScrollRegion};
pub use timeline::{Keyframe, Timeline};

use std::cmp::Ordering;

use crate::stage::ObjectRegistry;

/// Playback phase of one scene, driven solely by scroll position. Fully
/// reversible; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    /// Progress 0: the scene's initial authored state.
    Before,
    /// Progress strictly within (0, 1): interpolating.
    Active,
    /// Progress 1: the scene's final authored state.
    After,
}

impl ScenePhase {
    /// Phase for a given progress value.
    #[must_use]
    pub fn of(progress: f32) -> Self {
        if progress <= 0.0 {
            Self::Before
        } else if progress >= 1.0 {
            Self::After
        } else {
            Self::Active
        }
    }
}

/// One act of the scroll narrative: a trigger region, a keyframe table,
/// and an explicit write priority.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Scene identifier for logs.
    pub id: String,
    /// Trigger region in document pixels.
    pub region: ScrollRegion,
    /// Explicit write priority for scenes applied in the same update.
    ///
    /// Application order is primarily spatial (see [`Director`]); priority
    /// breaks the tie when two scenes sit at the same distance from the
    /// scroll position — notably scenes authored with overlapping trigger
    /// regions, where the source relied on array iteration order. Higher
    /// priority applies later and therefore wins shared handles.
    pub priority: i32,
    /// Scrub smoothing time constant in seconds (0 disables smoothing).
    pub scrub: f32,
    /// The scene's keyframe table.
    pub timeline: Timeline,
}

impl Scene {
    /// Scene with priority 0 and no scrub smoothing.
    #[must_use]
    pub fn new(id: &str, region: ScrollRegion, timeline: Timeline) -> Self {
        Self {
            id: id.to_owned(),
            region,
            priority: 0,
            scrub: 0.0,
            timeline,
        }
    }

    /// Set the write priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the scrub smoothing time constant.
    #[must_use]
    pub fn with_scrub(mut self, scrub: f32) -> Self {
        self.scrub = scrub;
        self
    }

    /// Distance from `scroll` to this scene's trigger region (0 when the
    /// region contains it).
    fn distance(&self, scroll: f32) -> f32 {
        if scroll < self.region.start {
            self.region.start - scroll
        } else if scroll > self.region.end {
            scroll - self.region.end
        } else {
            0.0
        }
    }
}

/// A named scroll threshold with enter/leave-back semantics (nav and
/// scroll-indicator visibility in the source page).
#[derive(Debug, Clone)]
pub struct Marker {
    /// Marker identifier.
    pub id: String,
    /// Document offset at which the marker becomes active.
    pub threshold: f32,
}

/// Orchestrates the scene list: recomputes per-scene progress on every
/// update and applies the timelines whose progress changed.
///
/// Scenes are independent (no shared keyframe state) but share registry
/// handles, so application order matters. Changed scenes apply farthest
/// from the scroll position first and nearest last: the scene the user is
/// actually looking at is always the final writer for any handle it
/// touches, and a scroll jump across several scenes replays the skipped
/// timelines at their endpoint states on the way. Unchanged scenes are
/// not re-applied, which makes updates at a fixed offset idempotent.
#[derive(Debug, Clone)]
pub struct Director {
    scenes: Vec<Scene>,
    /// Per-scene progress as last applied (scrub-smoothed when advancing).
    applied: Vec<f32>,
    phases: Vec<ScenePhase>,
    /// Whether the first update has run (it applies every scene).
    primed: bool,
    markers: Vec<Marker>,
    marker_active: Vec<bool>,
    /// Scratch list of scene indices to apply this update.
    pending: Vec<usize>,
}

/// Progress difference below which smoothing snaps to the target, keeping
/// scene boundaries exact.
const SCRUB_SNAP: f32 = 1e-3;

impl Director {
    /// Director over `scenes` in document order.
    #[must_use]
    pub fn new(scenes: Vec<Scene>) -> Self {
        let n = scenes.len();
        Self {
            scenes,
            applied: vec![0.0; n],
            phases: vec![ScenePhase::Before; n],
            primed: false,
            markers: Vec::new(),
            marker_active: Vec::new(),
            pending: Vec::with_capacity(n),
        }
    }

    /// Attach scroll markers.
    #[must_use]
    pub fn with_markers(mut self, markers: Vec<Marker>) -> Self {
        self.marker_active = vec![false; markers.len()];
        self.markers = markers;
        self
    }

    /// Replace the marker set (used after a viewport resize).
    pub fn set_markers(&mut self, markers: Vec<Marker>) {
        self.marker_active = vec![false; markers.len()];
        self.markers = markers;
    }

    /// Exact update: apply the instantaneous progress for every scene
    /// whose progress changed. Idempotent for a fixed scroll offset.
    pub fn update(&mut self, scroll: f32, registry: &mut ObjectRegistry) {
        self.pending.clear();
        for i in 0..self.scenes.len() {
            let target = self.scenes[i].region.progress(scroll);
            if !self.primed || target != self.applied[i] {
                self.applied[i] = target;
                self.pending.push(i);
            }
        }
        self.apply_pending(scroll, registry);
        self.update_markers(scroll);
    }

    /// Frame update with scrub smoothing: each scene's applied progress
    /// exponentially approaches the instantaneous value with the scene's
    /// time constant. Scenes with scrub 0 apply exactly.
    pub fn advance(
        &mut self,
        scroll: f32,
        dt: f32,
        registry: &mut ObjectRegistry,
    ) {
        self.pending.clear();
        for i in 0..self.scenes.len() {
            let target = self.scenes[i].region.progress(scroll);
            let scrub = self.scenes[i].scrub;

            let next = if scrub <= 0.0 || dt <= 0.0 || !self.primed {
                target
            } else {
                let alpha = 1.0 - (-dt / scrub).exp();
                let next = self.applied[i] + (target - self.applied[i]) * alpha;
                if (target - next).abs() < SCRUB_SNAP { target } else { next }
            };

            if !self.primed || next != self.applied[i] {
                self.applied[i] = next;
                self.pending.push(i);
            }
        }
        self.apply_pending(scroll, registry);
        self.update_markers(scroll);
    }

    /// Apply the pending scenes, farthest from `scroll` first.
    fn apply_pending(&mut self, scroll: f32, registry: &mut ObjectRegistry) {
        self.primed = true;

        let scenes = &self.scenes;
        self.pending.sort_by(|&a, &b| {
            scenes[b]
                .distance(scroll)
                .partial_cmp(&scenes[a].distance(scroll))
                .unwrap_or(Ordering::Equal)
                .then_with(|| scenes[a].priority.cmp(&scenes[b].priority))
                .then_with(|| a.cmp(&b))
        });

        for &i in &self.pending {
            self.scenes[i].timeline.apply(self.applied[i], registry);

            let phase = ScenePhase::of(self.applied[i]);
            if phase != self.phases[i] {
                log::debug!(
                    "scene '{}': {:?} -> {:?}",
                    self.scenes[i].id,
                    self.phases[i],
                    phase
                );
                self.phases[i] = phase;
            }
        }
    }

    fn update_markers(&mut self, scroll: f32) {
        for (marker, active) in
            self.markers.iter().zip(self.marker_active.iter_mut())
        {
            let now = scroll >= marker.threshold;
            if now != *active {
                log::debug!(
                    "marker '{}': {}",
                    marker.id,
                    if now { "enter" } else { "leave-back" }
                );
                *active = now;
            }
        }
    }

    /// Re-derive scene trigger regions from a resized layout. Scene `i`
    /// maps to section `i` in document order.
    pub fn relayout(&mut self, layout: &DocumentLayout) {
        for (i, scene) in self.scenes.iter_mut().enumerate() {
            scene.region = layout.region(i);
        }
    }

    /// The scenes in document order.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Last-applied progress of scene `index`.
    #[must_use]
    pub fn progress(&self, index: usize) -> Option<f32> {
        self.applied.get(index).copied()
    }

    /// Current phase of scene `index`.
    #[must_use]
    pub fn phase(&self, index: usize) -> Option<ScenePhase> {
        self.phases.get(index).copied()
    }

    /// Whether the named marker is currently active.
    #[must_use]
    pub fn marker_active(&self, id: &str) -> Option<bool> {
        self.markers
            .iter()
            .position(|m| m.id == id)
            .map(|i| self.marker_active[i])
    }
}
