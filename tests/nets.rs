use pretty_assertions::assert_eq;
use qucsweb::*;

fn setup() -> (Schematic, Catalog) {
    (Schematic::new(), Catalog::builtin())
}

fn pin(id: &InstanceId, port: &str) -> PinRef {
    PinRef::new(id.clone(), port)
}

#[test]
fn test_resistor_to_ground() {
    let (mut sch, cat) = setup();
    let r1 = sch.add_instance(cat.get("resistor").unwrap(), 0, 0);
    let gnd1 = sch.add_instance(cat.get("ground").unwrap(), 0, 60);
    assert_eq!(r1, "R1");
    assert_eq!(gnd1, "GND1");
    sch.add_wire(pin(&r1, "p2"), pin(&gnd1, "G")).unwrap();

    let cfg = NetConfig::default();
    let mut nets = resolve_nets(&sch, &cat, &cfg);
    assert_eq!(nets.net(&r1, "p2").unwrap(), cfg.ground_label);
    assert_eq!(nets.net(&r1, "p1").unwrap(), "n1");
}

#[test]
fn test_chain_shares_only_direct_unions() {
    let (mut sch, cat) = setup();
    let r = cat.get("resistor").unwrap();
    let r1 = sch.add_instance(r, 0, 0);
    let r2 = sch.add_instance(r, 100, 0);
    let r3 = sch.add_instance(r, 200, 0);
    sch.add_wire(pin(&r1, "p2"), pin(&r2, "p1")).unwrap();
    sch.add_wire(pin(&r2, "p2"), pin(&r3, "p1")).unwrap();

    let mut nets = resolve_nets(&sch, &cat, &NetConfig::default());
    let a = nets.net(&r1, "p2").unwrap();
    let b = nets.net(&r2, "p2").unwrap();
    assert_eq!(nets.net(&r2, "p1").unwrap(), a);
    assert_eq!(nets.net(&r3, "p1").unwrap(), b);
    assert_ne!(a, b);
}

#[test]
fn test_delete_middle_of_chain() {
    let (mut sch, cat) = setup();
    let r = cat.get("resistor").unwrap();
    let r1 = sch.add_instance(r, 0, 0);
    let r2 = sch.add_instance(r, 100, 0);
    let r3 = sch.add_instance(r, 200, 0);
    sch.add_wire(pin(&r1, "p2"), pin(&r2, "p1")).unwrap();
    sch.add_wire(pin(&r2, "p2"), pin(&r3, "p1")).unwrap();

    assert!(sch.delete_instance(&r2));
    assert_eq!(sch.wires().count(), 0);
    assert_eq!(sch.wires_of(&r1).count(), 0);

    let mut nets = resolve_nets(&sch, &cat, &NetConfig::default());
    let a = nets.net(&r1, "p2").unwrap();
    let b = nets.net(&r3, "p1").unwrap();
    assert_ne!(a, b);
    assert_ne!(a, "0");
    assert_ne!(b, "0");
    assert!(matches!(
        nets.net(&r2, "p1"),
        Err(NetError::Unresolvable(_))
    ));
}

#[test]
fn test_singleton_differs_from_assigned() {
    let (mut sch, cat) = setup();
    let r = cat.get("resistor").unwrap();
    let r1 = sch.add_instance(r, 0, 0);
    let r2 = sch.add_instance(r, 100, 0);
    let r3 = sch.add_instance(r, 200, 0);
    sch.add_wire(pin(&r1, "p1"), pin(&r2, "p1")).unwrap();

    let mut nets = resolve_nets(&sch, &cat, &NetConfig::default());
    let mut seen = vec![];
    for (id, port) in [(&r1, "p1"), (&r1, "p2"), (&r2, "p2"), (&r3, "p1"), (&r3, "p2")] {
        seen.push(nets.net(id, port).unwrap());
    }
    let mut dedup = seen.clone();
    dedup.sort();
    dedup.dedup();
    assert_eq!(dedup.len(), seen.len());
    assert_eq!(nets.net(&r2, "p1").unwrap(), seen[0]);
}

#[test]
fn test_ground_label_from_config() {
    let (mut sch, cat) = setup();
    let g1 = sch.add_instance(cat.get("ground").unwrap(), 0, 0);
    let g2 = sch.add_instance(cat.get("ground").unwrap(), 100, 0);
    let r1 = sch.add_instance(cat.get("resistor").unwrap(), 50, 0);
    sch.add_wire(pin(&r1, "p1"), pin(&g1, "G")).unwrap();
    sch.add_wire(pin(&r1, "p2"), pin(&g2, "G")).unwrap();

    let cfg = NetConfig {
        ground_label: String::from("gnd"),
        ..Default::default()
    };
    let mut nets = resolve_nets(&sch, &cat, &cfg);
    assert_eq!(nets.net(&r1, "p1").unwrap(), "gnd");
    assert_eq!(nets.net(&r1, "p2").unwrap(), "gnd");
    assert_eq!(nets.ground_label(), "gnd");
}

#[test]
fn test_resolution_is_pure() {
    let (mut sch, cat) = setup();
    let r1 = sch.add_instance(cat.get("resistor").unwrap(), 0, 0);
    let c1 = sch.add_instance(cat.get("capacitor").unwrap(), 100, 0);
    sch.add_wire(pin(&r1, "p2"), pin(&c1, "p1")).unwrap();
    sch.take_changes();

    let mut first = resolve_nets(&sch, &cat, &NetConfig::default());
    let mut second = resolve_nets(&sch, &cat, &NetConfig::default());
    assert_eq!(first.connections(&c1).unwrap(), second.connections(&c1).unwrap());
    assert!(sch.take_changes().is_empty());
}
