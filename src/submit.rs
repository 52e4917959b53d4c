//! turns a resolved schematic into the request handed to the simulator,
//! and keeps track of the one submission allowed in flight

use qucslink::{CircuitRequest, InstancePayload};

use crate::schematic::nets::{NetError, NetLookup};
use crate::schematic::{Catalog, Schematic};

/// one issued submission. only the outstanding ticket is accepted back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

#[derive(Debug, Default)]
pub struct Submissions {
    /// last ticket number handed out
    wm: u64,
    in_flight: Option<SubmissionTicket>,
}

impl Submissions {
    /// a new ticket, or None while another submission is outstanding
    pub fn begin(&mut self) -> Option<SubmissionTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        self.wm += 1;
        let t = SubmissionTicket(self.wm);
        self.in_flight = Some(t);
        Some(t)
    }

    /// retire ticket. false if it is not the outstanding one, e.g. a stale answer
    pub fn finish(&mut self, ticket: SubmissionTicket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn in_flight(&self) -> Option<SubmissionTicket> {
        self.in_flight
    }
}

/// every instance with every port mapped to its net, in creation order.
/// instances of components missing from the catalog are left out
pub fn build_request(
    schematic: &Schematic,
    catalog: &Catalog,
    nets: &mut NetLookup,
) -> Result<CircuitRequest, NetError> {
    let mut instances = vec![];
    for inst in schematic.instances() {
        if !catalog.contains(&inst.component) {
            log::warn!(
                "{}: component `{}` not in catalog, left out of the netlist",
                inst.id,
                inst.component
            );
            continue;
        }
        instances.push(InstancePayload {
            id: inst.id.to_string(),
            component_id: inst.component.clone(),
            parameters: inst.params.clone(),
            connections: nets.connections(&inst.id)?,
        });
    }
    Ok(CircuitRequest { instances })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetConfig;
    use crate::schematic::nets::resolve_nets;
    use crate::schematic::{ComponentDef, PinRef};
    use pretty_assertions::assert_eq;
    use qucslink::ParamValue;

    #[test]
    fn one_ticket_at_a_time() {
        let mut subs = Submissions::default();
        let t1 = subs.begin().unwrap();
        assert_eq!(subs.begin(), None);
        assert!(subs.finish(t1));
        assert!(!subs.finish(t1));
        let t2 = subs.begin().unwrap();
        assert_ne!(t1, t2);
        assert!(!subs.finish(t1));
        assert_eq!(subs.in_flight(), Some(t2));
    }

    #[test]
    fn request_for_divider() {
        let cat = Catalog::builtin();
        let mut sch = Schematic::new();
        let v1 = sch.add_instance(cat.get("vdc").unwrap(), 0, 0);
        let r1 = sch.add_instance(cat.get("resistor").unwrap(), 100, 0);
        let g1 = sch.add_instance(cat.get("ground").unwrap(), 0, 100);
        sch.set_param(&r1, "R", ParamValue::from(2.2e3)).unwrap();
        sch.add_wire(PinRef::new(v1.clone(), "p"), PinRef::new(r1.clone(), "p1"))
            .unwrap();
        sch.add_wire(PinRef::new(v1.clone(), "n"), PinRef::new(g1.clone(), "G"))
            .unwrap();
        sch.add_wire(PinRef::new(r1.clone(), "p2"), PinRef::new(g1.clone(), "G"))
            .unwrap();

        let mut nets = resolve_nets(&sch, &cat, &NetConfig::default());
        let req = build_request(&sch, &cat, &mut nets).unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"instances": [
                {"id": "V1", "component_id": "vdc", "parameters": {"U": 1.0},
                 "connections": {"n": "0", "p": "n1"}},
                {"id": "R1", "component_id": "resistor", "parameters": {"R": 2200.0},
                 "connections": {"p1": "n1", "p2": "0"}},
                {"id": "GND1", "component_id": "ground", "parameters": {},
                 "connections": {"G": "0"}}
            ]})
        );
    }

    #[test]
    fn unknown_components_are_left_out() {
        let opamp = ComponentDef::new("opamp", "Op amp", "OP").with_port("out", 20, 0);
        let lib = Catalog::builtin();
        let mut sch = Schematic::new();
        sch.add_instance(&opamp, 0, 0);
        let r1 = sch.add_instance(lib.get("resistor").unwrap(), 0, 0);

        let mut nets = resolve_nets(&sch, &lib, &NetConfig::default());
        let req = build_request(&sch, &lib, &mut nets).unwrap();
        assert_eq!(req.instances.len(), 1);
        assert_eq!(req.instances[0].id, r1.to_string());
    }
}
