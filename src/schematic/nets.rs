//! collapses the wire graph into electrical nets.
//!
//! pins joined by wires, directly or transitively, share a net. every net touching a ground
//! component gets the reserved ground label, the others get fresh labels in the order they are
//! first looked up. labels are only stable within one [`NetLookup`].

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::unionfind::UnionFind;

use super::{Catalog, InstanceId, PinRef, Schematic};
use crate::config::NetConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("pin `{0}` does not exist")]
    Unresolvable(PinRef),
}

/// This struct facillitates the creation of unique net names
#[derive(Clone, Debug)]
struct LabelManager {
    prefix: String,
    /// watermark for net names
    wm: usize,
    /// never handed out
    reserved: String,
}

impl LabelManager {
    fn new(cfg: &NetConfig) -> Self {
        LabelManager {
            prefix: cfg.label_prefix.clone(),
            wm: cfg.label_seed,
            reserved: cfg.ground_label.clone(),
        }
    }

    /// returns a label never returned before by this manager
    fn new_label(&mut self) -> String {
        loop {
            let l = format!("{}{}", self.prefix, self.wm);
            self.wm += 1;
            if l != self.reserved {
                break l;
            }
        }
    }
}

/// result of one resolution pass over a schematic
#[derive(Debug, Clone)]
pub struct NetLookup {
    /// ports of every instance whose component is known
    ports: HashMap<InstanceId, Vec<String>>,
    /// pins taking part in a wire or a ground component
    index: HashMap<PinRef, usize>,
    sets: UnionFind<usize>,
    ground_roots: HashSet<usize>,
    ground_label: String,
    root_labels: HashMap<usize, String>,
    /// labels of pins found in no set, allocated on first lookup
    singletons: HashMap<PinRef, String>,
    labels: LabelManager,
}

/// resolve the nets of schematic. pure, the schematic is not touched
pub fn resolve_nets(schematic: &Schematic, catalog: &Catalog, cfg: &NetConfig) -> NetLookup {
    let mut ports = HashMap::new();
    let mut grounds = vec![];
    for inst in schematic.instances() {
        let Some(def) = catalog.get(&inst.component) else {
            log::warn!("{}: unknown component `{}`", inst.id, inst.component);
            continue;
        };
        if def.flagged_ground() || def.id == cfg.ground_component {
            grounds.extend(def.ports.iter().map(|p| PinRef::new(inst.id.clone(), p)));
        }
        ports.insert(inst.id.clone(), def.ports.clone());
    }

    let valid = |pin: &PinRef| {
        ports
            .get(&pin.instance)
            .map_or(false, |ps: &Vec<String>| ps.contains(&pin.port))
    };

    let mut index: HashMap<PinRef, usize> = HashMap::new();
    let mut intern = |pin: &PinRef| -> usize {
        let n = index.len();
        *index.entry(pin.clone()).or_insert(n)
    };

    let mut edges = vec![];
    for w in schematic.wires() {
        if !valid(&w.start) || !valid(&w.end) {
            log::warn!("{}: skipped, dangling between {} and {}", w.id, w.start, w.end);
            continue;
        }
        edges.push((intern(&w.start), intern(&w.end)));
    }
    let ground_ix: Vec<usize> = grounds.iter().map(|p| intern(p)).collect();

    let mut sets = UnionFind::new(index.len());
    for (a, b) in edges {
        sets.union(a, b);
    }
    let ground_roots = ground_ix.into_iter().map(|ix| sets.find_mut(ix)).collect();

    NetLookup {
        ports,
        index,
        sets,
        ground_roots,
        ground_label: cfg.ground_label.clone(),
        root_labels: HashMap::new(),
        singletons: HashMap::new(),
        labels: LabelManager::new(cfg),
    }
}

impl NetLookup {
    pub fn ground_label(&self) -> &str {
        &self.ground_label
    }

    /// net label of the port. allocates a fresh label the first time a net is looked up
    pub fn net(&mut self, instance: &InstanceId, port: &str) -> Result<String, NetError> {
        let pin = PinRef::new(instance.clone(), port);
        if !self
            .ports
            .get(instance)
            .map_or(false, |ps| ps.iter().any(|p| p == port))
        {
            return Err(NetError::Unresolvable(pin));
        }
        let Some(&ix) = self.index.get(&pin) else {
            let labels = &mut self.labels;
            return Ok(self
                .singletons
                .entry(pin)
                .or_insert_with(|| labels.new_label())
                .clone());
        };
        let root = self.sets.find_mut(ix);
        if self.ground_roots.contains(&root) {
            return Ok(self.ground_label.clone());
        }
        let labels = &mut self.labels;
        Ok(self
            .root_labels
            .entry(root)
            .or_insert_with(|| labels.new_label())
            .clone())
    }

    /// port -> net label for every port of the instance, looked up in port order
    pub fn connections(
        &mut self,
        instance: &InstanceId,
    ) -> Result<BTreeMap<String, String>, NetError> {
        let ports = self
            .ports
            .get(instance)
            .cloned()
            .ok_or_else(|| NetError::Unresolvable(PinRef::new(instance.clone(), "")))?;
        let mut ret = BTreeMap::new();
        for port in ports {
            let label = self.net(instance, &port)?;
            ret.insert(port, label);
        }
        Ok(ret)
    }

    /// true if both pins resolve to the same net
    pub fn connected(&mut self, a: &PinRef, b: &PinRef) -> Result<bool, NetError> {
        Ok(self.net(&a.instance, &a.port)? == self.net(&b.instance, &b.port)?)
    }
}
