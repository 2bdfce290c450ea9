use crate::model::CrossReference;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// All VerbNet classes plus the indexes derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbNetCorpus {
    /// Top-level classes keyed by class id.
    pub classes: BTreeMap<String, VerbClass>,
    /// Member verb -> ids of the top-level classes that list it (at any depth).
    pub members: BTreeMap<String, Vec<String>>,
    pub hierarchy: VerbNetHierarchy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbNetHierarchy {
    /// Class or subclass id -> ids of its direct subclasses.
    pub parent_child: BTreeMap<String, Vec<String>>,
    /// Leading numeric component of the id (`13` for `give-13.1`) -> class ids.
    pub by_number: BTreeMap<String, Vec<String>>,
    /// Upper-cased first letter -> class ids.
    pub by_letter: BTreeMap<String, Vec<String>>,
}

/// A VerbNet class or subclass. Subclasses nest recursively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbClass {
    pub id: String,
    pub members: Vec<Member>,
    pub themroles: Vec<ThematicRole>,
    pub frames: Vec<Frame>,
    pub subclasses: Vec<VerbClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bso_category: Option<String>,
}

impl VerbClass {
    /// Visit this class and every nested subclass, parents first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a VerbClass)) {
        f(self);
        for sub in &self.subclasses {
            sub.visit(f);
        }
    }

    /// Every member name declared by this class or any subclass.
    pub fn all_member_names(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.visit(&mut |class| {
            for member in &class.members {
                if !member.name.is_empty() {
                    names.insert(member.name.as_str());
                }
            }
        });
        names
    }

    /// This id followed by every nested subclass id.
    pub fn all_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.visit(&mut |class| ids.push(class.id.as_str()));
        ids
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    /// Raw WordNet sense keys (`wn` attribute).
    pub wn: String,
    /// Raw grouping tokens (`grouping` attribute), e.g. `give.01`.
    pub grouping: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub features: String,
    /// Raw FrameNet frame names (`fn_mapping` attribute).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fn_mapping: String,
    /// Member key such as `give#2` (`verbnet_key` attribute).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub verbnet_key: String,
    pub cross_references: Vec<CrossReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThematicRole {
    #[serde(rename = "type")]
    pub role_type: String,
    pub selrestrs: RestrictionSet,
}

/// A (possibly nested) conjunction or disjunction of restrictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestrictionSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<String>,
    pub restrictions: Vec<Restriction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<RestrictionSet>,
}

impl RestrictionSet {
    pub fn is_empty(&self) -> bool {
        self.restrictions.is_empty() && self.groups.iter().all(|g| g.is_empty())
    }

    /// Labels of every restriction in this set and nested groups.
    pub fn collect_labels(&self, out: &mut BTreeSet<String>) {
        for restriction in &self.restrictions {
            let label = restriction.label();
            if !label.is_empty() {
                out.insert(label.to_string());
            }
        }
        for group in &self.groups {
            group.collect_labels(out);
        }
    }
}

/// One `SELRESTR`/`SYNRESTR`: `Value` is the polarity (`+`/`-`) in released
/// VerbNet, `type` the restriction name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Restriction {
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "type")]
    pub restriction_type: String,
}

impl Restriction {
    /// The restriction name, falling back to `Value` when `type` is absent.
    pub fn label(&self) -> &str {
        if self.restriction_type.is_empty() {
            &self.value
        } else {
            &self.restriction_type
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub description: FrameDescription,
    pub examples: Vec<String>,
    pub syntax: Vec<SyntaxElement>,
    pub semantics: Vec<SemanticPredicate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameDescription {
    pub primary: String,
    pub secondary: String,
    #[serde(rename = "descriptionNumber")]
    pub number: String,
    #[serde(rename = "xtag")]
    pub tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SyntaxCategory {
    Np,
    Verb,
    Prep,
    Adv,
    Adj,
    Lex,
}

impl SyntaxCategory {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "NP" => Some(SyntaxCategory::Np),
            "VERB" => Some(SyntaxCategory::Verb),
            "PREP" => Some(SyntaxCategory::Prep),
            "ADV" => Some(SyntaxCategory::Adv),
            "ADJ" => Some(SyntaxCategory::Adj),
            "LEX" => Some(SyntaxCategory::Lex),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxElement {
    #[serde(rename = "type")]
    pub category: SyntaxCategory,
    pub value: String,
    pub synrestrs: RestrictionSet,
    #[serde(default, skip_serializing_if = "RestrictionSet::is_empty")]
    pub selrestrs: RestrictionSet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticPredicate {
    pub value: String,
    #[serde(default)]
    pub negated: bool,
    pub args: Vec<PredicateArg>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredicateArg {
    #[serde(rename = "type")]
    pub arg_type: String,
    pub value: String,
}
