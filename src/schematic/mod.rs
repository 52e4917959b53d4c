//! the graph model: placed instances and the wires between their pins.
//! instances and wires are kept in creation order, which keeps everything derived from them deterministic.

pub mod devices;
pub mod nets;
mod wire;

use std::collections::{HashMap, HashSet};

use flagset::{flags, FlagSet};
use qucslink::ParamValue;

use crate::transforms::{self, SSPoint, VSBox, VSPoint};
pub use devices::{Catalog, CatalogError, ComponentDef, Instance, InstanceId, Rotation};
pub use wire::{PinRef, Wire, WireId};

flags! {
    /// what changed since the view layer last looked
    pub enum Change: u8 {
        Instances,
        Wires,
        Selection,
        Preview,
        View,
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchematicError {
    #[error("a wire cannot start and end on the same pin `{0}`")]
    SelfLoop(PinRef),
    #[error("no instance `{0}`")]
    UnknownInstance(InstanceId),
    #[error("instance `{instance}` has no parameter `{param}`")]
    UnknownParameter { instance: InstanceId, param: String },
}

#[derive(Debug, Default)]
pub struct Schematic {
    instances: Vec<Instance>,
    wires: Vec<Wire>,
    /// last ordinal handed out per designator prefix
    watermarks: HashMap<String, usize>,
    /// every instance id ever handed out, deleted ones included
    issued: HashSet<InstanceId>,
    /// last wire id handed out
    wire_wm: usize,
    changes: FlagSet<Change>,
}

impl Schematic {
    pub fn new() -> Self {
        Schematic::default()
    }

    /// place a new instance of def at (x, y), with default parameters.
    /// prefixes ending in digits can spell another prefix's id (`Q` 11, `Q1` 1), such ordinals are skipped
    pub fn add_instance(&mut self, def: &ComponentDef, x: i32, y: i32) -> InstanceId {
        let prefix = def.prefix();
        let wm = self.watermarks.entry(prefix.clone()).or_insert(0);
        let id = loop {
            *wm += 1;
            let id = InstanceId::new(&prefix, *wm);
            if !self.issued.contains(&id) {
                break id;
            }
        };
        self.issued.insert(id.clone());
        self.instances
            .push(Instance::new(id.clone(), def, SSPoint::new(x, y)));
        self.changes |= Change::Instances;
        id
    }

    /// removes the instance and every wire attached to it. returns false if there was no such instance
    pub fn delete_instance(&mut self, id: &InstanceId) -> bool {
        let Some(idx) = self.instances.iter().position(|i| &i.id == id) else {
            return false;
        };
        self.instances.remove(idx);
        let before = self.wires.len();
        self.wires.retain(|w| !w.touches(id));
        if self.wires.len() != before {
            self.changes |= Change::Wires;
        }
        self.changes |= Change::Instances;
        true
    }

    /// adds a wire between two pins. pins are not checked against the catalog here
    pub fn add_wire(&mut self, start: PinRef, end: PinRef) -> Result<WireId, SchematicError> {
        if start == end {
            return Err(SchematicError::SelfLoop(start));
        }
        self.wire_wm += 1;
        let id = WireId(self.wire_wm);
        self.wires.push(Wire { id, start, end });
        self.changes |= Change::Wires;
        Ok(id)
    }

    pub fn delete_wire(&mut self, id: WireId) -> bool {
        let before = self.wires.len();
        self.wires.retain(|w| w.id != id);
        let removed = self.wires.len() != before;
        if removed {
            self.changes |= Change::Wires;
        }
        removed
    }

    /// absolute position of a pin, None if the instance or its port does not exist
    pub fn resolve_pin_position(&self, pin: &PinRef, catalog: &Catalog) -> Option<SSPoint> {
        let inst = self.instance(&pin.instance)?;
        let def = catalog.get(&inst.component)?;
        inst.pin_position(def, &pin.port)
    }

    pub fn set_position(&mut self, id: &InstanceId, position: SSPoint) -> Result<(), SchematicError> {
        let inst = self.instance_mut(id)?;
        if inst.position != position {
            inst.position = position;
            self.changes |= Change::Instances;
        }
        Ok(())
    }

    /// rotate the instance 90 deg clockwise about its origin
    pub fn rotate_instance(&mut self, id: &InstanceId) -> Result<Rotation, SchematicError> {
        let r = self.instance_mut(id)?.rotation.rotated();
        self.set_rotation(id, r)?;
        Ok(r)
    }

    pub fn set_rotation(&mut self, id: &InstanceId, rotation: Rotation) -> Result<(), SchematicError> {
        let inst = self.instance_mut(id)?;
        if inst.rotation != rotation {
            inst.rotation = rotation;
            self.changes |= Change::Instances;
        }
        Ok(())
    }

    /// explicit parameter edit. only parameters the instance was created with can be set
    pub fn set_param(
        &mut self,
        id: &InstanceId,
        param: &str,
        value: ParamValue,
    ) -> Result<(), SchematicError> {
        let inst = self.instance_mut(id)?;
        match inst.params.get_mut(param) {
            Some(v) => *v = value,
            None => {
                return Err(SchematicError::UnknownParameter {
                    instance: id.clone(),
                    param: param.to_string(),
                })
            }
        }
        self.changes |= Change::Instances;
        Ok(())
    }

    pub fn instance(&self, id: &InstanceId) -> Option<&Instance> {
        self.instances.iter().find(|i| &i.id == id)
    }

    fn instance_mut(&mut self, id: &InstanceId) -> Result<&mut Instance, SchematicError> {
        self.instances
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| SchematicError::UnknownInstance(id.clone()))
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == id)
    }

    /// instances in creation order
    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.instances.iter()
    }

    /// wires in creation order
    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.iter()
    }

    pub fn wires_of<'a>(&'a self, id: &'a InstanceId) -> impl Iterator<Item = &'a Wire> + 'a {
        self.wires.iter().filter(move |w| w.touches(id))
    }

    /// the pin nearest to vsp within radius. on a tie the later instance wins, it is drawn on top
    pub fn pin_at(&self, vsp: VSPoint, catalog: &Catalog, radius: f32) -> Option<PinRef> {
        let mut best: Option<(f32, PinRef)> = None;
        for inst in &self.instances {
            let Some(def) = catalog.get(&inst.component) else {
                continue;
            };
            for port in &def.ports {
                let Some(ssp) = inst.pin_position(def, port) else {
                    continue;
                };
                let pin_vsp: VSPoint = ssp.to_f32().cast_unit();
                let d = (pin_vsp - vsp).length();
                if d <= radius && best.as_ref().map_or(true, |(bd, _)| d <= *bd) {
                    best = Some((d, PinRef::new(inst.id.clone(), port)));
                }
            }
        }
        best.map(|(_, pin)| pin)
    }

    /// the topmost instance whose body contains vsp
    pub fn instance_at(&self, vsp: VSPoint, catalog: &Catalog, padding: i32) -> Option<&Instance> {
        self.instances.iter().rev().find(|inst| {
            let Some(def) = catalog.get(&inst.component) else {
                return false;
            };
            let b: VSBox = inst.bounds(def, padding).to_f32().cast_unit();
            b.min.x <= vsp.x && vsp.x <= b.max.x && b.min.y <= vsp.y && vsp.y <= b.max.y
        })
    }

    /// the topmost wire passing within tolerance of vsp
    pub fn wire_at(&self, vsp: VSPoint, catalog: &Catalog, tolerance: f32) -> Option<WireId> {
        self.wires
            .iter()
            .rev()
            .find(|w| {
                match (
                    self.resolve_pin_position(&w.start, catalog),
                    self.resolve_pin_position(&w.end, catalog),
                ) {
                    (Some(a), Some(b)) => {
                        transforms::distance_to_segment(
                            vsp,
                            a.to_f32().cast_unit(),
                            b.to_f32().cast_unit(),
                        ) <= tolerance
                    }
                    _ => false,
                }
            })
            .map(|w| w.id)
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty() && self.wires.is_empty()
    }

    /// drain the change flags accumulated since the last call
    pub fn take_changes(&mut self) -> FlagSet<Change> {
        std::mem::take(&mut self.changes)
    }
}
