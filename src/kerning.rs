use crate::{codecs::float_from_plist, GlyphsError};
use indexmap::IndexMap;
use openstep_plist::Plist;
use serde::{Deserialize, Serialize};

/// Pair kerning, keyed by master id, then left glyph or group, then right
/// glyph or group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kerning(IndexMap<String, IndexMap<String, IndexMap<String, f64>>>);

impl Kerning {
    pub(crate) fn from_plist(plist: &Plist) -> Result<Kerning, GlyphsError> {
        let mismatch = |field: &str, found: &Plist| GlyphsError::TypeMismatch {
            entity: "GSFont",
            field: field.to_string(),
            expected: "dictionary",
            found: found.kind().to_string(),
        };
        let mut kerning = Kerning::default();
        let masters = plist.as_dict().ok_or_else(|| mismatch("kerning", plist))?;
        for (master_id, lefts) in masters {
            let lefts = lefts
                .as_dict()
                .ok_or_else(|| mismatch(&format!("kerning.{master_id}"), lefts))?;
            for (left, rights) in lefts {
                let rights = rights
                    .as_dict()
                    .ok_or_else(|| mismatch(&format!("kerning.{master_id}.{left}"), rights))?;
                for (right, value) in rights {
                    kerning.set(master_id, left, right, float_from_plist(value)?);
                }
            }
        }
        Ok(kerning)
    }

    pub fn get(&self, master_id: &str, left: &str, right: &str) -> Option<f64> {
        self.0.get(master_id)?.get(left)?.get(right).copied()
    }

    pub fn set(&mut self, master_id: &str, left: &str, right: &str, value: f64) {
        self.0
            .entry(master_id.to_string())
            .or_default()
            .entry(left.to_string())
            .or_default()
            .insert(right.to_string(), value);
    }

    /// Remove a pair, dropping any tables it leaves empty.
    pub fn remove(&mut self, master_id: &str, left: &str, right: &str) -> Option<f64> {
        let lefts = self.0.get_mut(master_id)?;
        let rights = lefts.get_mut(left)?;
        let value = rights.shift_remove(right)?;
        if rights.is_empty() {
            lefts.shift_remove(left);
        }
        if lefts.is_empty() {
            self.0.shift_remove(master_id);
        }
        Some(value)
    }

    /// The kerning table of one master.
    pub fn master(&self, master_id: &str) -> Option<&IndexMap<String, IndexMap<String, f64>>> {
        self.0.get(master_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every pair as `(master id, left, right, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str, f64)> {
        self.0.iter().flat_map(|(master_id, lefts)| {
            lefts.iter().flat_map(move |(left, rights)| {
                rights
                    .iter()
                    .map(move |(right, value)| (master_id.as_str(), left.as_str(), right.as_str(), *value))
            })
        })
    }

    pub(crate) fn tables(&self) -> &IndexMap<String, IndexMap<String, IndexMap<String, f64>>> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn string_values_become_floats() {
        let plist = Plist::parse("{ M1 = { A = { V = \"-20\"; W = -15.5; }; }; }").unwrap();
        let kerning = Kerning::from_plist(&plist).unwrap();
        assert_eq!(kerning.get("M1", "A", "V"), Some(-20.0));
        assert_eq!(kerning.get("M1", "A", "W"), Some(-15.5));
        assert_eq!(kerning.get("M2", "A", "V"), None);
        assert_eq!(kerning.iter().count(), 2);
    }

    #[test]
    fn remove_prunes_empty_tables() {
        let mut kerning = Kerning::default();
        kerning.set("M1", "A", "V", -40.0);
        assert_eq!(kerning.remove("M1", "A", "V"), Some(-40.0));
        assert!(kerning.is_empty());
    }

    #[test]
    fn nested_values_must_be_dictionaries() {
        let plist = Plist::parse("{ M1 = (1, 2); }").unwrap();
        assert!(matches!(
            Kerning::from_plist(&plist),
            Err(GlyphsError::TypeMismatch { ref field, .. }) if field == "kerning.M1"
        ));
    }
}
