//! Kinetic pan engine driving the x and y axes of a map pane.
//!
//! The engine never owns the camera: callers pass the current position in and apply the
//! positions that [`PanAnimation::animate_frame`] hands back. Frames are requested, not
//! scheduled; the host checks [`PanAnimation::wants_frame`] and calls `animate_frame` once
//! per display frame.

use super::axis::AxisState;
use crate::core::{
    constants::{
        CROSS_FADE_MOVE_DISTANCE, CURVE_PARAMETER, DRAG_STEP_THRESHOLD,
        MAX_MOVE_DISTANCE_WITHOUT_CROSS_FADE,
    },
    geo::Point,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CrossFadeState {
    start_time: f64,
    duration: f64,
    stopping: bool,
}

/// What a single frame produced
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameUpdate {
    /// New camera position, if any axis was active
    pub position: Option<Point>,
    /// Cross-fade progress in `[0, 1]`, if a cross-fade was running
    pub cross_fade_progress: Option<f64>,
    /// The last active axis came to rest in this frame
    pub ended: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PanAnimation {
    x_axis: Option<AxisState>,
    y_axis: Option<AxisState>,
    cross_fade: Option<CrossFadeState>,
    frame_requested: bool,
}

impl PanAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(&self, axis: Axis) -> Option<&AxisState> {
        match axis {
            Axis::X => self.x_axis.as_ref(),
            Axis::Y => self.y_axis.as_ref(),
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut Option<AxisState> {
        match axis {
            Axis::X => &mut self.x_axis,
            Axis::Y => &mut self.y_axis,
        }
    }

    fn set_axis(&mut self, axis: Axis, state: Option<AxisState>) {
        let active = state.is_some();
        *self.axis_mut(axis) = state;
        if active {
            self.frame_requested = true;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.x_axis.is_some() || self.y_axis.is_some()
    }

    pub fn is_cross_fading(&self) -> bool {
        self.cross_fade.is_some()
    }

    pub fn wants_frame(&self) -> bool {
        self.frame_requested
    }

    /// Drops both axes. A running cross-fade is finished on the next frame.
    pub fn stop(&mut self) {
        self.x_axis = None;
        self.y_axis = None;
        match self.cross_fade.as_mut() {
            Some(cross_fade) => cross_fade.stopping = true,
            None => self.frame_requested = false,
        }
    }

    /// Starts a decay-only motion from a release velocity [px/ms].
    ///
    /// Returns `false` (and leaves the engine stopped) when the fling would travel
    /// less than the drag step threshold.
    pub fn fling(&mut self, speed: Point, current: Point, now: f64) -> bool {
        let magnitude = speed.length();
        let decay_duration = magnitude / (2.0 * CURVE_PARAMETER);
        let distance = CURVE_PARAMETER * decay_duration.powi(2);
        if !distance.is_finite() || distance < DRAG_STEP_THRESHOLD {
            log::trace!("fling of {:.1}px dropped", distance);
            self.x_axis = None;
            self.y_axis = None;
            return false;
        }
        let dx = distance * speed.x / magnitude;
        let dy = distance * speed.y / magnitude;
        self.set_axis(
            Axis::X,
            Some(AxisState::new(current.x, dx, distance, now, now, decay_duration)),
        );
        self.set_axis(
            Axis::Y,
            Some(AxisState::new(current.y, dy, distance, now, now, decay_duration)),
        );
        true
    }

    /// Animates towards `target` along a straight line.
    ///
    /// Long moves are shortened to their last [`CROSS_FADE_MOVE_DISTANCE`] pixels; the
    /// skipped part is returned as the offset from the new start to the old position so the
    /// caller can fade out what it currently shows.
    pub fn move_to(&mut self, target: Point, current: Point, now: f64) -> Option<Point> {
        let mut start = current;
        let mut delta = target.subtract(&start);
        if delta.x == 0.0 && delta.y == 0.0 {
            self.x_axis = None;
            self.y_axis = None;
            return None;
        }
        let mut distance = delta.length();
        let mut cross_fade_offset = None;
        if distance > MAX_MOVE_DISTANCE_WITHOUT_CROSS_FADE {
            let jumped = target.subtract(&delta.multiply(CROSS_FADE_MOVE_DISTANCE / distance));
            cross_fade_offset = Some(current.subtract(&jumped));
            start = jumped;
            delta = target.subtract(&start);
            distance = CROSS_FADE_MOVE_DISTANCE;
            self.cross_fade = Some(CrossFadeState {
                start_time: now,
                duration: (distance / CURVE_PARAMETER).sqrt(),
                stopping: false,
            });
        }
        let decay_duration = (distance / CURVE_PARAMETER).sqrt();
        self.set_axis(
            Axis::X,
            Some(AxisState::new(start.x, delta.x, distance, now, now, decay_duration)),
        );
        self.set_axis(
            Axis::Y,
            Some(AxisState::new(start.y, delta.y, distance, now, now, decay_duration)),
        );
        cross_fade_offset
    }

    /// Decay-only nudge of one axis, used for single key presses.
    pub fn step(&mut self, axis: Axis, offset: f64, current: f64, now: f64) {
        self.set_axis(axis, Some(AxisState::single(current, offset, 0.0, now)));
    }

    /// Constant-velocity motion followed by decay, used for held keys.
    ///
    /// While the axis is still in its linear phase only the end of that phase is pushed
    /// back, so repeated calls keep the axis moving without a restart.
    pub fn linear_step(
        &mut self,
        axis: Axis,
        offset: f64,
        linear_duration: f64,
        current: f64,
        now: f64,
    ) {
        if let Some(state) = self.axis_mut(axis).as_mut() {
            if state.is_linear(now) {
                state.extend_linear_phase(now + linear_duration);
                return;
            }
        }
        self.set_axis(
            axis,
            Some(AxisState::single(current, offset, linear_duration, now)),
        );
    }

    pub fn transition_to_decay(&mut self, axis: Axis, now: f64) {
        if let Some(state) = self.axis_mut(axis).as_mut() {
            state.transition_to_decay(now);
        }
    }

    /// Advances the animation to `time`. Axes that came to rest are dropped.
    pub fn animate_frame(&mut self, time: f64, current: Point) -> FrameUpdate {
        let mut update = FrameUpdate::default();
        if !self.frame_requested {
            return update;
        }
        let was_animating = self.is_animating();
        let mut position = current;

        if let Some(axis) = self.x_axis {
            position.x = axis.position(time);
            if axis.is_ended(time) {
                self.x_axis = None;
            }
        }
        if let Some(axis) = self.y_axis {
            position.y = axis.position(time);
            if axis.is_ended(time) {
                self.y_axis = None;
            }
        }
        if was_animating {
            update.position = Some(position);
        }

        if let Some(cross_fade) = self.cross_fade {
            if cross_fade.stopping || time - cross_fade.start_time >= cross_fade.duration {
                update.cross_fade_progress = Some(1.0);
                self.cross_fade = None;
            } else {
                update.cross_fade_progress =
                    Some(((time - cross_fade.start_time) / cross_fade.duration).max(0.0));
            }
        }

        let animating = self.is_animating();
        update.ended = was_animating && !animating;
        self.frame_requested = animating || self.cross_fade.is_some();
        update
    }
}
