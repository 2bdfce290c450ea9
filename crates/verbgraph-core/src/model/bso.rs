use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// VerbNet class <-> Basic Semantic Ontology category, kept in both directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BsoMapping {
    pub vn_to_bso: BTreeMap<String, String>,
    pub bso_to_vn: BTreeMap<String, Vec<BsoClassEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BsoClassEntry {
    pub class_id: String,
    pub members: Vec<String>,
}

impl BsoMapping {
    /// Record `class_id -> category` and mirror it into `bso_to_vn`.
    pub fn map_class(&mut self, class_id: &str, category: &str) {
        self.vn_to_bso
            .insert(class_id.to_string(), category.to_string());
        self.add_category_member(category, class_id, Vec::new());
    }

    /// Add (or extend) a class under a category without touching `vn_to_bso`.
    pub fn add_category_member(&mut self, category: &str, class_id: &str, members: Vec<String>) {
        let entries = self.bso_to_vn.entry(category.to_string()).or_default();
        match entries.iter_mut().find(|e| e.class_id == class_id) {
            Some(entry) => {
                for member in members {
                    if !entry.members.contains(&member) {
                        entry.members.push(member);
                    }
                }
            }
            None => entries.push(BsoClassEntry {
                class_id: class_id.to_string(),
                members,
            }),
        }
    }

    /// Fill whichever direction is missing an entry the other one has.
    /// Classes listed only in `bso_to_vn` map to the first category naming them.
    pub fn reconcile(&mut self) {
        let mut reverse: Vec<(String, String)> = Vec::new();
        for (category, entries) in &self.bso_to_vn {
            for entry in entries {
                reverse.push((entry.class_id.clone(), category.clone()));
            }
        }
        for (class_id, category) in reverse {
            self.vn_to_bso.entry(class_id).or_insert(category);
        }
        let forward: Vec<(String, String)> = self
            .vn_to_bso
            .iter()
            .map(|(c, k)| (c.clone(), k.clone()))
            .collect();
        for (class_id, category) in forward {
            self.add_category_member(&category, &class_id, Vec::new());
        }
    }

    /// Every class in `vn_to_bso` appears under its category in `bso_to_vn`.
    pub fn is_consistent(&self) -> bool {
        self.vn_to_bso.iter().all(|(class_id, category)| {
            self.bso_to_vn
                .get(category)
                .map(|entries| entries.iter().any(|e| &e.class_id == class_id))
                .unwrap_or(false)
        })
    }

    pub fn classes_for_category(&self, category: &str) -> Vec<&str> {
        self.bso_to_vn
            .get(category)
            .map(|entries| entries.iter().map(|e| e.class_id.as_str()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_class_keeps_both_directions_in_step() {
        let mut bso = BsoMapping::default();
        bso.map_class("give-13.1", "Transfer");
        bso.add_category_member("Transfer", "give-13.1", vec!["give".into(), "hand".into()]);
        bso.map_class("run-51.3.2", "Motion");

        assert!(bso.is_consistent());
        assert_eq!(bso.bso_to_vn["Transfer"].len(), 1);
        assert_eq!(bso.bso_to_vn["Transfer"][0].members, vec!["give", "hand"]);
        assert_eq!(bso.classes_for_category("Motion"), vec!["run-51.3.2"]);
    }

    #[test]
    fn dangling_forward_entry_is_inconsistent_until_reconciled() {
        let mut bso = BsoMapping::default();
        bso.vn_to_bso.insert("give-13.1".into(), "Transfer".into());
        bso.add_category_member("Motion", "run-51.3.2", vec!["run".into()]);
        assert!(!bso.is_consistent());

        bso.reconcile();
        assert!(bso.is_consistent());
        assert_eq!(bso.vn_to_bso["run-51.3.2"], "Motion");
        assert_eq!(bso.classes_for_category("Transfer"), vec!["give-13.1"]);
    }
}
