use crate::{
    animation::pan::Axis,
    core::{
        constants::{KEY_REPEAT_LINEAR_DURATION, PAN_STEP_BASE, SHIFT_MULTIPLIER},
        geo::Point,
    },
    input::{
        events::{InputEvent, KeyCode, KeyModifiers, MapEvent},
        gestures::{pinch_zoom_delta, Drag, PointerSet},
    },
    prelude::{HashMap, VecDeque},
};

/// What a map pane should do in response to an input event
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Cancel the running pan animation
    StopAnimation,
    /// Move the position immediately (drag)
    PanBy(Point),
    /// Zoom keeping the point at `anchor` (relative to the viewport center) fixed, mid-gesture
    ZoomBy { dz: i32, anchor: Point },
    /// Discrete zoom (wheel, double click, keys) that settles at once: a move end follows
    /// only if the zoom actually changed
    ZoomStep { dz: i32, anchor: Point },
    /// Release with a velocity in px/ms
    Fling(Point),
    /// Decay-only nudge of one axis
    Step { axis: Axis, offset: f64 },
    /// Sustained motion of one axis for a held key
    LinearStep {
        axis: Axis,
        offset: f64,
        duration: f64,
    },
    TransitionToDecay(Axis),
    ReportMoveEnd,
    Resize(Point),
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent)>;

/// Listener registry and outbound queue for map events
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: HashMap<String, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + 'static,
    {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Deliver queued events to their listeners and hand them back
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.event_type()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Clear all events from the queue
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

/// Translates raw pointer, wheel and keyboard input into map actions
pub struct InputHandler {
    pub enabled: bool,
    pointers: PointerSet,
    drag: Option<Drag>,
    pinch_baseline: Option<f64>,

    /// Arrow key pan distance without shift [px]
    pub pan_step: f64,
    /// Linear phase granted by every key repeat [ms]
    pub key_repeat_duration: f64,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            enabled: true,
            pointers: PointerSet::new(),
            drag: None,
            pinch_baseline: None,
            pan_step: PAN_STEP_BASE,
            key_repeat_duration: KEY_REPEAT_LINEAR_DURATION,
        }
    }

    pub fn with_steps(pan_step: f64, key_repeat_duration: f64) -> Self {
        Self {
            pan_step,
            key_repeat_duration,
            ..Self::new()
        }
    }

    /// Number of pointers currently pressed
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Handle an input event at time `now` [ms] on a viewport whose half extent is
    /// `half_size`. An empty result means the event was not for the map.
    pub fn handle_event(&mut self, event: InputEvent, now: f64, half_size: Point) -> Vec<Action> {
        if !self.enabled {
            return vec![];
        }

        match event {
            InputEvent::PointerDown {
                pointer_id,
                is_primary,
                position,
            } => {
                if is_primary {
                    self.pointers.clear();
                }
                if self.pointers.len() >= 2 && !self.pointers.contains(pointer_id) {
                    return vec![];
                }
                self.pointers.insert(pointer_id, position);
                self.restart_drag(now);
                vec![Action::StopAnimation]
            }
            InputEvent::PointerMove {
                pointer_id,
                position,
            } => {
                if !self.pointers.update(pointer_id, position) {
                    return vec![];
                }
                let (Some(drag), Some(centroid)) = (self.drag.as_mut(), self.pointers.centroid())
                else {
                    return vec![];
                };
                let mut actions = vec![Action::PanBy(drag.update(centroid, now))];
                if let (Some(baseline), Some(current)) =
                    (self.pinch_baseline, self.pointers.pinch_squared_distance())
                {
                    let dz = pinch_zoom_delta(baseline, current);
                    if dz != 0 {
                        actions.push(Action::ZoomBy {
                            dz,
                            anchor: centroid.subtract(&half_size),
                        });
                        self.pinch_baseline = Some(current);
                    }
                }
                actions
            }
            InputEvent::PointerUp { pointer_id } | InputEvent::PointerCancel { pointer_id } => {
                if !self.pointers.remove(pointer_id) {
                    return vec![];
                }
                let mut actions = vec![];
                if self.pointers.is_empty() {
                    if let Some(drag) = self.drag.as_ref() {
                        actions.push(if drag.is_moving() {
                            Action::Fling(drag.speed)
                        } else {
                            Action::ReportMoveEnd
                        });
                    }
                }
                self.restart_drag(now);
                actions
            }
            InputEvent::Wheel { delta_y, offset } => {
                let mut actions = vec![Action::StopAnimation];
                if delta_y != 0.0 && !delta_y.is_nan() {
                    let dz = if delta_y > 0.0 { -1 } else { 1 };
                    actions.push(Action::ZoomStep {
                        dz,
                        anchor: offset.subtract(&half_size),
                    });
                }
                actions
            }
            InputEvent::DoubleClick { offset, modifiers } => {
                let dz = if modifiers.shift { -1 } else { 1 };
                vec![
                    Action::StopAnimation,
                    Action::ZoomStep {
                        dz,
                        anchor: offset.subtract(&half_size),
                    },
                ]
            }
            InputEvent::KeyDown {
                key,
                modifiers,
                repeat,
            } => self.handle_key_down(key, modifiers, repeat),
            InputEvent::KeyUp { key } => match key {
                KeyCode::ArrowLeft | KeyCode::ArrowRight => vec![Action::TransitionToDecay(Axis::X)],
                KeyCode::ArrowUp | KeyCode::ArrowDown => vec![Action::TransitionToDecay(Axis::Y)],
                _ => vec![],
            },
            InputEvent::Resize { size } => vec![Action::Resize(size)],
        }
    }

    fn handle_key_down(&self, key: KeyCode, modifiers: KeyModifiers, repeat: bool) -> Vec<Action> {
        let multiplier = if modifiers.shift { SHIFT_MULTIPLIER } else { 1 };
        let pan_step = self.pan_step * multiplier as f64;
        let arrow = |axis, offset| {
            if repeat {
                Action::LinearStep {
                    axis,
                    offset,
                    duration: self.key_repeat_duration,
                }
            } else {
                Action::Step { axis, offset }
            }
        };
        let zoom = |dz| {
            vec![
                Action::StopAnimation,
                Action::ZoomStep {
                    dz,
                    anchor: Point::default(),
                },
            ]
        };
        match key {
            KeyCode::ArrowLeft => vec![arrow(Axis::X, -pan_step)],
            KeyCode::ArrowRight => vec![arrow(Axis::X, pan_step)],
            KeyCode::ArrowUp => vec![arrow(Axis::Y, -pan_step)],
            KeyCode::ArrowDown => vec![arrow(Axis::Y, pan_step)],
            KeyCode::Plus => zoom(multiplier),
            KeyCode::Minus => zoom(-multiplier),
            KeyCode::Other(_) => vec![],
        }
    }

    /// Every change of the pointer set starts a fresh drag at the new centroid
    fn restart_drag(&mut self, now: f64) {
        self.drag = self
            .pointers
            .centroid()
            .map(|centroid| Drag::new(centroid, now));
        self.pinch_baseline = self.pointers.pinch_squared_distance();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
