//! component definitions available without a library file

use lazy_static::lazy_static;

use super::devicetype::{ComponentDef, ParamSpec};
use super::Catalog;

fn builtin_defs() -> Vec<ComponentDef> {
    vec![
        ComponentDef::new("resistor", "Resistor", "R")
            .with_category("passive")
            .with_port("p1", 0, -30)
            .with_port("p2", 0, 30)
            .with_param("R", ParamSpec::new(1e3, Some("Ohm"))),
        ComponentDef::new("capacitor", "Capacitor", "C")
            .with_category("passive")
            .with_port("p1", 0, -20)
            .with_port("p2", 0, 20)
            .with_param("C", ParamSpec::new(1e-12, Some("F"))),
        ComponentDef::new("vdc", "DC voltage source", "V")
            .with_category("sources")
            .with_port("p", 0, -30)
            .with_port("n", 0, 30)
            .with_param("U", ParamSpec::new(1.0, Some("V"))),
        ComponentDef::new("ground", "Ground", "GND")
            .with_category("sources")
            .with_port("G", 0, -10)
            .with_flag("ground", true),
        ComponentDef::new("dc_sweep", "DC sweep", "SW")
            .with_category("simulations")
            .with_param("Param", ParamSpec::new("R", None))
            .with_param("Start", ParamSpec::new(1.0, None))
            .with_param("Stop", ParamSpec::new(1e3, None))
            .with_param("Points", ParamSpec::new(10.0, None)),
    ]
}

lazy_static! {
    /// resistor, capacitor, dc voltage source, ground and dc sweep
    pub static ref BUILTIN: Catalog = {
        let mut catalog = Catalog::new();
        for def in builtin_defs() {
            // pins are declared together with their ports above
            if let Err(e) = catalog.insert(def) {
                log::error!("built-in catalog: {}", e);
            }
        }
        catalog
    };
}
