//! Simulation results: named numeric curves, one of which is the independent variable.

#[cfg(feature = "serde")]
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Curve names recognized as the independent variable, in order of preference.
pub const INDEPENDENT_NAMES: [&str; 4] = ["time", "frequency", "acfrequency", "sweep"];

/// A single named sequence of values
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Curve {
    pub name: String,
    pub values: Vec<f64>,
}

/// Curves in the order the backend reported them.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SimulationResults {
    curves: Vec<Curve>,
}

impl SimulationResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// adds a curve. A curve with the same name is replaced in place.
    pub fn push(&mut self, name: impl Into<String>, values: Vec<f64>) {
        let name = name.into();
        if let Some(c) = self.curves.iter_mut().find(|c| c.name == name) {
            c.values = values;
        } else {
            self.curves.push(Curve { name, values });
        }
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.curves
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// name of the independent variable: the first curve carrying one of [`INDEPENDENT_NAMES`]
    /// (case insensitive, earlier names win), else the first curve present.
    pub fn independent_key(&self) -> Option<&str> {
        for known in INDEPENDENT_NAMES {
            if let Some(c) = self
                .curves
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(known))
            {
                return Some(&c.name);
            }
        }
        let first = self.curves.first().map(|c| c.name.as_str());
        if let Some(name) = first {
            log::debug!("no recognized independent variable, falling back to `{}`", name);
        }
        first
    }

    pub fn independent(&self) -> Option<&Curve> {
        let key = self.independent_key()?;
        self.curves.iter().find(|c| c.name == key)
    }

    /// every curve except the independent one
    pub fn dependents(&self) -> impl Iterator<Item = &Curve> {
        let key = self.independent_key().map(str::to_string);
        self.curves
            .iter()
            .filter(move |c| Some(c.name.as_str()) != key.as_deref())
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<f64>)> for SimulationResults {
    fn from_iter<I: IntoIterator<Item = (S, Vec<f64>)>>(iter: I) -> Self {
        let mut ret = SimulationResults::new();
        for (name, values) in iter {
            ret.push(name, values);
        }
        ret
    }
}

#[cfg(feature = "serde")]
impl Serialize for SimulationResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.curves.len()))?;
        for c in &self.curves {
            map.serialize_entry(&c.name, &c.values)?;
        }
        map.end()
    }
}

/// deserializes from a JSON object without losing key order, which decides the fallback
/// independent variable
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SimulationResults {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResultsVisitor;

        impl<'de> Visitor<'de> for ResultsVisitor {
            type Value = SimulationResults;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of curve names to numeric sequences")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut ret = SimulationResults::new();
                while let Some((name, values)) = access.next_entry::<String, Vec<f64>>()? {
                    ret.push(name, values);
                }
                Ok(ret)
            }
        }

        deserializer.deserialize_map(ResultsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn independent_prefers_known_names() {
        let r: SimulationResults = [
            ("n1", vec![1.0, 2.0]),
            ("Time", vec![0.0, 1.0]),
            ("frequency", vec![5.0, 6.0]),
        ]
        .into_iter()
        .collect();
        assert_eq!(r.independent_key(), Some("Time"));
        let deps: Vec<_> = r.dependents().map(|c| c.name.as_str()).collect();
        assert_eq!(deps, vec!["n1", "frequency"]);
    }

    #[test]
    fn independent_falls_back_to_first() {
        let r: SimulationResults = [("n2", vec![1.0]), ("n1", vec![2.0])].into_iter().collect();
        assert_eq!(r.independent_key(), Some("n2"));
        assert!(SimulationResults::new().independent_key().is_none());
    }

    #[test]
    fn push_replaces_existing() {
        let mut r = SimulationResults::new();
        r.push("n1", vec![1.0]);
        r.push("n1", vec![3.0]);
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("n1"), Some(&[3.0][..]));
    }
}
