//! the interaction state machine.
//!
//! [`Editor`] owns the schematic and every piece of transient ui state: mode, selection, view and
//! submission bookkeeping. input arrives as [`EditorEvent`]s through [`Editor::dispatch`], one at a
//! time, each processed to completion.

mod event;
mod state;

use flagset::FlagSet;
use qucslink::{
    CircuitRequest, ParamValue, SimulationError, SimulationOutput, SimulationResponse, Simulator,
};

use crate::config::EditorConfig;
use crate::schematic::nets::{resolve_nets, NetLookup};
use crate::schematic::{
    Catalog, Change, InstanceId, PinRef, Rotation, Schematic, SchematicError, WireId,
};
use crate::submit::{build_request, SubmissionTicket, Submissions};
use crate::transforms::{self, CSPoint, VSPoint};
use crate::viewport::Viewport;

pub use event::{EditorEvent, Key, MouseButton};
pub use state::{EditorState, Selection, WirePreview};

/// what the pointer is over, in order of precedence
#[derive(Debug, Clone, PartialEq)]
enum Hit {
    Pin(PinRef),
    Body(InstanceId),
    Wire(WireId),
    Empty,
}

#[derive(Debug)]
pub struct Editor {
    schematic: Schematic,
    catalog: Catalog,
    config: EditorConfig,
    viewport: Viewport,
    state: EditorState,
    selection: Option<Selection>,
    submissions: Submissions,
    /// last message for the user, e.g. a failed simulation
    status: Option<String>,
    results: Option<SimulationOutput>,
    changes: FlagSet<Change>,
}

impl Editor {
    pub fn new(catalog: Catalog, config: EditorConfig) -> Self {
        Editor {
            schematic: Schematic::new(),
            catalog,
            viewport: Viewport::from_config(&config),
            config,
            state: EditorState::Idle,
            selection: None,
            submissions: Submissions::default(),
            status: None,
            results: None,
            changes: FlagSet::default(),
        }
    }

    pub fn schematic(&self) -> &Schematic {
        &self.schematic
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// output of the last successful simulation
    pub fn results(&self) -> Option<&SimulationOutput> {
        self.results.as_ref()
    }

    /// process one input event to completion. returns what changed
    pub fn dispatch(&mut self, event: EditorEvent) -> FlagSet<Change> {
        if let Some(pos) = event.pos() {
            self.viewport.curpos_update(pos);
        }
        let was = std::mem::discriminant(&self.state);
        match event {
            EditorEvent::LibraryPress { component } => self.library_press(component),
            EditorEvent::PointerDown {
                button: MouseButton::Primary,
                pos,
            } => self.primary_down(pos),
            EditorEvent::PointerDown {
                button: MouseButton::Secondary,
                ..
            } => self.escape(),
            EditorEvent::PointerDown {
                button: MouseButton::Middle,
                ..
            } => {}
            EditorEvent::PointerMove { pos } => self.pointer_move(pos),
            EditorEvent::PointerUp { button, pos } => self.pointer_up(button, pos),
            EditorEvent::Wheel { delta, pos } => {
                self.viewport.zoom(Viewport::wheel_factor(delta), pos);
                self.changes |= Change::View;
            }
            EditorEvent::KeyPress { key: Key::Escape } => self.escape(),
            EditorEvent::KeyPress { key: Key::Delete } => self.delete_selected(),
            EditorEvent::KeyPress { key: Key::Rotate } => self.rotate(),
        }
        if std::mem::discriminant(&self.state) != was {
            log::debug!("editor: {}", self.state);
        }
        self.take_changes()
    }

    /// changes accumulated since the last dispatch, from the editor and the schematic
    pub fn take_changes(&mut self) -> FlagSet<Change> {
        std::mem::take(&mut self.changes) | self.schematic.take_changes()
    }

    /// explicit parameter edit
    pub fn set_param(
        &mut self,
        id: &InstanceId,
        param: &str,
        value: ParamValue,
    ) -> Result<(), SchematicError> {
        self.schematic.set_param(id, param, value)
    }

    /// resolve the nets of the current schematic
    pub fn nets(&self) -> NetLookup {
        resolve_nets(&self.schematic, &self.catalog, &self.config.nets)
    }

    fn select(&mut self, selection: Option<Selection>) {
        if self.selection != selection {
            self.selection = selection;
            self.changes |= Change::Selection;
        }
    }

    fn hit_test(&self, vsp: VSPoint) -> Hit {
        let cfg = &self.config;
        if let Some(pin) = self.schematic.pin_at(vsp, &self.catalog, cfg.pin_radius) {
            Hit::Pin(pin)
        } else if let Some(inst) = self
            .schematic
            .instance_at(vsp, &self.catalog, cfg.body_padding)
        {
            Hit::Body(inst.id.clone())
        } else if let Some(w) = self
            .schematic
            .wire_at(vsp, &self.catalog, cfg.wire_tolerance)
        {
            Hit::Wire(w)
        } else {
            Hit::Empty
        }
    }

    /// drop the pending operation and go back to idle. a cancelled drag puts the instance back
    fn cancel(&mut self) {
        match std::mem::take(&mut self.state) {
            EditorState::Idle => return,
            EditorState::Dragging {
                instance, origin, ..
            } => {
                if let Err(e) = self.schematic.set_position(&instance, origin) {
                    log::warn!("cancelling drag: {}", e);
                }
            }
            _ => {}
        }
        self.changes |= Change::Preview;
    }

    fn escape(&mut self) {
        if self.state.is_idle() {
            self.select(None);
        } else {
            self.cancel();
        }
    }

    fn library_press(&mut self, component: String) {
        self.cancel();
        if !self.catalog.contains(&component) {
            log::warn!("no component `{}` in catalog", component);
            self.status = Some(format!("unknown component `{}`", component));
            return;
        }
        self.state = EditorState::Placing {
            component,
            rotation: Rotation::R0,
            at: self.viewport.curpos_ssp(),
        };
        self.changes |= Change::Preview;
    }

    fn primary_down(&mut self, pos: CSPoint) {
        let vsp = self.viewport.to_viewport(pos);
        let ssp = self.viewport.curpos_ssp();
        match std::mem::take(&mut self.state) {
            EditorState::Placing {
                component,
                rotation,
                ..
            } => {
                // checked on library press
                if let Some(def) = self.catalog.get(&component) {
                    let id = self.schematic.add_instance(def, ssp.x, ssp.y);
                    if let Err(e) = self.schematic.set_rotation(&id, rotation) {
                        log::warn!("placing {}: {}", id, e);
                    }
                    log::debug!("placed {} at {:?}", id, ssp.to_tuple());
                    self.select(Some(Selection::Instance(id)));
                }
                self.changes |= Change::Preview;
            }
            EditorState::Wiring { start, preview } => match self.hit_test(vsp) {
                Hit::Pin(end) if end == start => {
                    self.state = EditorState::Wiring { start, preview };
                }
                Hit::Pin(end) => self.complete_wire(start, end),
                _ => {
                    log::debug!("wiring from {} cancelled", start);
                    self.changes |= Change::Preview;
                }
            },
            EditorState::Idle => match self.hit_test(vsp) {
                Hit::Pin(start) => {
                    let anchor = self
                        .schematic
                        .resolve_pin_position(&start, &self.catalog)
                        .unwrap_or(ssp);
                    let mut preview = WirePreview::new(anchor);
                    preview.tip = ssp;
                    self.state = EditorState::Wiring { start, preview };
                    self.changes |= Change::Preview;
                }
                Hit::Body(instance) => {
                    let origin = self
                        .schematic
                        .instance(&instance)
                        .map(|i| i.position)
                        .unwrap_or_default();
                    self.select(Some(Selection::Instance(instance.clone())));
                    self.state = EditorState::Dragging {
                        instance,
                        grab: vsp,
                        origin,
                    };
                }
                Hit::Wire(w) => self.select(Some(Selection::Wire(w))),
                Hit::Empty => {
                    self.select(None);
                    self.state = EditorState::Panning { last: pos };
                }
            },
            // a press while a button is already held
            st @ (EditorState::Dragging { .. } | EditorState::Panning { .. }) => {
                self.state = st;
            }
        }
    }

    fn pointer_move(&mut self, pos: CSPoint) {
        let ssp = self.viewport.curpos_ssp();
        match &mut self.state {
            EditorState::Idle => {}
            EditorState::Placing { at, .. } => {
                if *at != ssp {
                    *at = ssp;
                    self.changes |= Change::Preview;
                }
            }
            EditorState::Dragging {
                instance,
                grab,
                origin,
            } => {
                let vsp = self.viewport.to_viewport(pos);
                let delta = transforms::snap_vec(vsp - *grab, self.viewport.grid());
                if let Err(e) = self.schematic.set_position(instance, *origin + delta) {
                    log::warn!("dragging: {}", e);
                }
            }
            EditorState::Wiring { preview, .. } => {
                if preview.tip != ssp {
                    preview.tip = ssp;
                    self.changes |= Change::Preview;
                }
            }
            EditorState::Panning { last } => {
                let prev = *last;
                *last = pos;
                self.viewport.pan(pos, prev);
                self.changes |= Change::View;
            }
        }
    }

    fn pointer_up(&mut self, button: MouseButton, pos: CSPoint) {
        if matches!(
            self.state,
            EditorState::Dragging { .. } | EditorState::Panning { .. }
        ) {
            self.pointer_move(pos);
            self.state = EditorState::Idle;
            return;
        }
        if button != MouseButton::Primary {
            return;
        }
        let EditorState::Wiring { start, .. } = &self.state else {
            return;
        };
        // releasing anywhere but on another pin keeps wiring, completing by click-click
        let vsp = self.viewport.to_viewport(pos);
        if let Hit::Pin(end) = self.hit_test(vsp) {
            if &end != start {
                let start = start.clone();
                self.complete_wire(start, end);
            }
        }
    }

    /// the one place wiring ends in a new wire, whether by click-click or drag-drop
    fn complete_wire(&mut self, start: PinRef, end: PinRef) {
        self.state = EditorState::Idle;
        match self.schematic.add_wire(start, end) {
            Ok(id) => log::debug!("added wire {}", id),
            Err(e) => {
                log::warn!("{}", e);
                self.status = Some(e.to_string());
            }
        }
        self.changes |= Change::Preview;
    }

    fn delete_selected(&mut self) {
        let Some(sel) = self.selection.clone() else {
            return;
        };
        self.cancel();
        match &sel {
            Selection::Instance(id) => {
                self.schematic.delete_instance(id);
            }
            Selection::Wire(id) => {
                self.schematic.delete_wire(*id);
            }
        }
        log::debug!("deleted {:?}", sel);
        self.select(None);
    }

    fn rotate(&mut self) {
        match &mut self.state {
            EditorState::Placing { rotation, .. } => {
                *rotation = rotation.rotated();
                self.changes |= Change::Preview;
            }
            EditorState::Idle => {
                if let Some(Selection::Instance(id)) = &self.selection {
                    if let Err(e) = self.schematic.rotate_instance(id) {
                        log::warn!("rotate: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    /// resolve nets and build the request for a new submission.
    /// None, with a status message, while another submission is in flight
    pub fn begin_submission(&mut self) -> Option<(SubmissionTicket, CircuitRequest)> {
        if self.submissions.in_flight().is_some() {
            log::info!("simulation already running, request dropped");
            self.status = Some(String::from("simulation already running"));
            return None;
        }
        let mut nets = self.nets();
        let request = match build_request(&self.schematic, &self.catalog, &mut nets) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("{}", e);
                self.status = Some(e.to_string());
                return None;
            }
        };
        let ticket = self.submissions.begin()?;
        log::info!("submitting {} instances", request.instances.len());
        self.status = Some(String::from("simulating"));
        Some((ticket, request))
    }

    /// take the answer to a submission. answers to anything but the outstanding ticket are dropped.
    /// returns true if the simulation succeeded
    pub fn finish_submission(
        &mut self,
        ticket: SubmissionTicket,
        response: Result<SimulationResponse, SimulationError>,
    ) -> bool {
        if !self.submissions.finish(ticket) {
            log::warn!("dropping answer to stale submission {:?}", ticket);
            return false;
        }
        match response.and_then(SimulationResponse::into_result) {
            Ok(out) => {
                log::info!("simulation finished with {} curves", out.results.len());
                self.status = Some(format!("simulation finished: {} curves", out.results.len()));
                self.results = Some(out);
                true
            }
            Err(e) => {
                log::warn!("{}", e);
                self.status = Some(e.to_string());
                false
            }
        }
    }

    /// begin, simulate and finish in one go. failures end up in [`Editor::status`]
    pub fn submit(&mut self, simulator: &mut impl Simulator) -> bool {
        let Some((ticket, request)) = self.begin_submission() else {
            return false;
        };
        let response = simulator.simulate(&request);
        self.finish_submission(ticket, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> Editor {
        Editor::new(Catalog::builtin(), EditorConfig::default())
    }

    fn down(x: f32, y: f32) -> EditorEvent {
        EditorEvent::PointerDown {
            button: MouseButton::Primary,
            pos: CSPoint::new(x, y),
        }
    }

    fn up(x: f32, y: f32) -> EditorEvent {
        EditorEvent::PointerUp {
            button: MouseButton::Primary,
            pos: CSPoint::new(x, y),
        }
    }

    fn mv(x: f32, y: f32) -> EditorEvent {
        EditorEvent::PointerMove {
            pos: CSPoint::new(x, y),
        }
    }

    #[test]
    fn place_snaps_and_selects() {
        let mut ed = editor();
        ed.dispatch(EditorEvent::LibraryPress {
            component: String::from("resistor"),
        });
        ed.dispatch(mv(23.0, 48.0));
        assert!(matches!(ed.state(), EditorState::Placing { .. }));
        let changes = ed.dispatch(down(23.0, 48.0));
        assert!(ed.state().is_idle());
        assert!(changes.contains(Change::Instances));
        assert!(changes.contains(Change::Selection));
        let r1 = InstanceId::from("R1");
        assert_eq!(ed.selection(), Some(&Selection::Instance(r1.clone())));
        assert_eq!(
            ed.schematic().instance(&r1).unwrap().position,
            crate::transforms::SSPoint::new(20, 50)
        );
    }

    #[test]
    fn rotate_while_placing() {
        let mut ed = editor();
        ed.dispatch(EditorEvent::LibraryPress {
            component: String::from("resistor"),
        });
        ed.dispatch(EditorEvent::KeyPress { key: Key::Rotate });
        ed.dispatch(down(0.0, 0.0));
        let inst = ed.schematic().instance(&InstanceId::from("R1")).unwrap();
        assert_eq!(inst.rotation, Rotation::R90);
    }

    #[test]
    fn unknown_library_item() {
        let mut ed = editor();
        ed.dispatch(EditorEvent::LibraryPress {
            component: String::from("flux_capacitor"),
        });
        assert!(ed.state().is_idle());
        assert!(ed.status().unwrap().contains("flux_capacitor"));
    }

    #[test]
    fn wheel_zooms_in_any_state() {
        let mut ed = editor();
        let changes = ed.dispatch(EditorEvent::Wheel {
            delta: 1.0,
            pos: CSPoint::new(10.0, 10.0),
        });
        assert!(changes.contains(Change::View));
        assert!((ed.viewport().vc_scale() - 1.2).abs() < 1e-4);
    }
}
