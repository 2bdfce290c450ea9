use crate::model::CrossReference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropBankCorpus {
    /// Predicates keyed by lemma.
    pub predicates: BTreeMap<String, PropBankPredicate>,
    /// Roleset id (`give.01`) -> lemma of the predicate that owns it.
    pub rolesets: BTreeMap<String, String>,
}

impl PropBankCorpus {
    pub fn roleset(&self, id: &str) -> Option<&Roleset> {
        let lemma = self.rolesets.get(id)?;
        self.predicates
            .get(lemma)?
            .rolesets
            .iter()
            .find(|r| r.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropBankPredicate {
    pub lemma: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
    pub rolesets: Vec<Roleset>,
    pub source_files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roleset {
    pub id: String,
    pub name: String,
    /// Raw `vncls` attribute.
    pub vncls: String,
    /// Raw `framnet` attribute (PropBank's spelling).
    pub framenet: String,
    pub aliases: Vec<RolesetAlias>,
    pub roles: Vec<Role>,
    pub examples: Vec<PropBankExample>,
    pub cross_references: Vec<CrossReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RolesetAlias {
    pub text: String,
    pub pos: String,
    pub framenet: String,
    pub verbnet: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Argument number (`0`, `1`, `m`, ...).
    pub number: String,
    pub description: String,
    pub function: String,
    pub vnroles: Vec<VerbNetRoleMapping>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbNetRoleMapping {
    pub vncls: String,
    pub theta: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropBankExample {
    pub name: String,
    pub text: String,
    pub arguments: Vec<ExampleArgument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExampleArgument {
    pub number: String,
    pub function: String,
    pub text: String,
}
