//! Structural and cross-corpus validation.
//!
//! Corpus checks run over the JSON projection of each record, so a tree of
//! the wrong shape is reported rather than assumed away. Findings fall in
//! three buckets: shape faults (`validation_error`), errors (`invalid`) and
//! warnings (`valid_with_warnings`).

use crate::builder::{
    BuildOutcome, ReferenceCollections, SELECTIONAL_RESTRICTIONS, SYNTACTIC_RESTRICTIONS, VERB_SPECIFIC_FEATURES,
};
use crate::record::CorpusRecord;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use verbgraph_core::{CorpusKind, FrameNetCorpus, PropBankCorpus, VerbNetCorpus};

/// Key of the reference-collection result in [`validate_collections`].
pub const REFERENCE_COLLECTIONS: &str = "reference_collections";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    ValidWithWarnings,
    Invalid,
    ValidationError,
    NoValidation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub item_count: usize,
}

impl ValidationResult {
    fn not_validated() -> Self {
        Self {
            status: ValidationStatus::NoValidation,
            errors: Vec::new(),
            warnings: Vec::new(),
            item_count: 0,
        }
    }

    fn structural(message: String) -> Self {
        Self {
            status: ValidationStatus::ValidationError,
            errors: vec![message],
            warnings: Vec::new(),
            item_count: 0,
        }
    }
}

/// Accumulates findings for one corpus.
#[derive(Default)]
struct Findings {
    faults: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    fn finish(self, item_count: usize) -> ValidationResult {
        let status = if !self.faults.is_empty() {
            ValidationStatus::ValidationError
        } else if !self.errors.is_empty() {
            ValidationStatus::Invalid
        } else if !self.warnings.is_empty() {
            ValidationStatus::ValidWithWarnings
        } else {
            ValidationStatus::Valid
        };
        let mut errors = self.faults;
        errors.extend(self.errors);
        ValidationResult {
            status,
            errors,
            warnings: self.warnings,
            item_count,
        }
    }

    /// `field` of `owner` as a sequence; a present non-array is a shape fault.
    fn seq<'a>(&mut self, owner: &'a Value, field: &str, context: &str) -> Option<&'a Vec<Value>> {
        match owner.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(items),
            Some(_) => {
                self.faults.push(format!("{context}: `{field}` is not a sequence"));
                None
            }
        }
    }

    /// `field` of `owner` as a map; a present non-object is a shape fault.
    fn map<'a>(&mut self, owner: &'a Value, field: &str, context: &str) -> Option<&'a Map<String, Value>> {
        match owner.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::Object(entries)) => Some(entries),
            Some(_) => {
                self.faults.push(format!("{context}: `{field}` is not a map"));
                None
            }
        }
    }
}

/// Required top-level container of a corpus tree.
fn container<'a>(tree: &'a Value, field: &str, kind: CorpusKind) -> Result<&'a Map<String, Value>, String> {
    match tree.get(field) {
        Some(Value::Object(entries)) => Ok(entries),
        Some(_) => Err(format!("{kind}: `{field}` is not a map")),
        None => Err(format!("{kind}: missing `{field}`")),
    }
}

fn is_empty_seq(value: Option<&Vec<Value>>) -> bool {
    value.map_or(true, |items| items.is_empty())
}

fn str_field<'a>(value: &'a Value, field: &str) -> &'a str {
    value.get(field).and_then(Value::as_str).unwrap_or_default()
}

// ============================================================================
// Per-corpus checks
// ============================================================================

/// Validate one corpus tree (the JSON projection of a record).
pub fn validate_corpus(kind: CorpusKind, tree: &Value) -> ValidationResult {
    match kind {
        CorpusKind::VerbNet => validate_verbnet(tree),
        CorpusKind::FrameNet => validate_framenet(tree),
        CorpusKind::PropBank => validate_propbank(tree),
        _ => ValidationResult::not_validated(),
    }
}

fn validate_verbnet(tree: &Value) -> ValidationResult {
    let classes = match container(tree, "classes", CorpusKind::VerbNet) {
        Ok(classes) => classes,
        Err(message) => return ValidationResult::structural(message),
    };
    let mut findings = Findings::default();

    for (key, class) in classes {
        let context = format!("class {key}");
        if !class.is_object() {
            findings.faults.push(format!("{context}: not a map"));
            continue;
        }
        let id = str_field(class, "id");
        if id != key {
            findings
                .errors
                .push(format!("{context}: declared id `{id}` does not match its key"));
        }
        if is_empty_seq(findings.seq(class, "members", &context)) {
            findings.warnings.push(format!("{context} has no members"));
        }
        match findings.seq(class, "frames", &context) {
            Some(frames) if !frames.is_empty() => {
                for (i, frame) in frames.iter().enumerate() {
                    let primary = frame
                        .get("description")
                        .map(|d| str_field(d, "primary"))
                        .unwrap_or_default();
                    if primary.trim().is_empty() {
                        findings
                            .warnings
                            .push(format!("{context} frame {i} has no primary description"));
                    }
                }
            }
            _ => findings.warnings.push(format!("{context} has no frames")),
        }
    }

    if let Some(index) = findings.map(tree, "members", "verbnet") {
        for (member, class_ids) in index {
            let Some(class_ids) = class_ids.as_array() else {
                findings
                    .faults
                    .push(format!("member index entry `{member}` is not a sequence"));
                continue;
            };
            for class_id in class_ids.iter().filter_map(Value::as_str) {
                if !classes.contains_key(class_id) {
                    findings.errors.push(format!(
                        "member index entry `{member}` names unknown class `{class_id}`"
                    ));
                }
            }
        }
    }

    findings.finish(classes.len())
}

fn validate_framenet(tree: &Value) -> ValidationResult {
    let frames = match container(tree, "frames", CorpusKind::FrameNet) {
        Ok(frames) => frames,
        Err(message) => return ValidationResult::structural(message),
    };
    let mut findings = Findings::default();

    for (key, frame) in frames {
        let context = format!("frame {key}");
        if !frame.is_object() {
            findings.faults.push(format!("{context}: not a map"));
            continue;
        }
        let name = str_field(frame, "name");
        if name != key {
            findings
                .errors
                .push(format!("{context}: declared name `{name}` does not match its key"));
        }
        let units = findings.map(frame, "lexical_units", &context);
        if units.map_or(true, |units| units.is_empty()) {
            findings.warnings.push(format!("{context} has no lexical units"));
        }
        if str_field(frame, "definition").trim().is_empty() {
            findings.warnings.push(format!("{context} has no definition"));
        }
    }

    findings.finish(frames.len())
}

fn validate_propbank(tree: &Value) -> ValidationResult {
    let predicates = match container(tree, "predicates", CorpusKind::PropBank) {
        Ok(predicates) => predicates,
        Err(message) => return ValidationResult::structural(message),
    };
    let mut findings = Findings::default();
    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();

    for (lemma, predicate) in predicates {
        let context = format!("predicate {lemma}");
        if !predicate.is_object() {
            findings.faults.push(format!("{context}: not a map"));
            continue;
        }
        let rolesets = findings.seq(predicate, "rolesets", &context);
        if is_empty_seq(rolesets) {
            findings.warnings.push(format!("{context} has no rolesets"));
        }
        for roleset in rolesets.into_iter().flatten() {
            let id = str_field(roleset, "id");
            if let Some(previous) = owners.insert(id, lemma.as_str()) {
                findings.errors.push(format!(
                    "roleset `{id}` is declared by both `{previous}` and `{lemma}`"
                ));
            }
            let roleset_context = format!("roleset {id}");
            if is_empty_seq(findings.seq(roleset, "roles", &roleset_context)) {
                findings.warnings.push(format!("{roleset_context} has no roles"));
            }
        }
    }

    if let Some(index) = findings.map(tree, "rolesets", "propbank") {
        for (id, lemma) in index {
            let lemma = lemma.as_str().unwrap_or_default();
            if !predicates.contains_key(lemma) {
                findings
                    .errors
                    .push(format!("roleset index maps `{id}` to unknown predicate `{lemma}`"));
            }
        }
    }

    findings.finish(predicates.len())
}

/// Derived lists must be sorted and duplicate-free.
pub fn validate_references(collections: &ReferenceCollections) -> ValidationResult {
    let mut findings = Findings::default();
    let lists = [
        (VERB_SPECIFIC_FEATURES, &collections.verb_specific_features),
        (SYNTACTIC_RESTRICTIONS, &collections.syntactic_restrictions),
        (SELECTIONAL_RESTRICTIONS, &collections.selectional_restrictions),
    ];
    for (name, items) in lists {
        if items.windows(2).any(|pair| pair[0] >= pair[1]) {
            findings
                .errors
                .push(format!("{name} is not a sorted, duplicate-free sequence"));
        }
    }
    for (name, outcome) in &collections.report {
        if let BuildOutcome::Skipped { reason } = outcome {
            findings.warnings.push(format!("{name} not built: {reason}"));
        }
    }
    let item_count = collections.sizes().values().sum::<u64>() as usize;
    findings.finish(item_count)
}

/// Validate every loaded corpus, plus the reference collections when built.
pub fn validate_collections(
    corpora: &BTreeMap<CorpusKind, CorpusRecord>,
    references: Option<&ReferenceCollections>,
) -> BTreeMap<String, ValidationResult> {
    let mut results = BTreeMap::new();
    for (kind, record) in corpora {
        let result = match record.to_value() {
            Ok(tree) => validate_corpus(*kind, &tree),
            Err(err) => ValidationResult::structural(format!("{kind}: cannot project tree: {err}")),
        };
        tracing::debug!(corpus = %kind, status = ?result.status, errors = result.errors.len(), warnings = result.warnings.len(), "validated corpus");
        results.insert(kind.as_str().to_string(), result);
    }
    if let Some(references) = references {
        results.insert(REFERENCE_COLLECTIONS.to_string(), validate_references(references));
    }
    results
}

// ============================================================================
// Cross-corpus checks
// ============================================================================

pub const VN_PB_MAPPINGS: &str = "vn_pb_mappings";
pub const PB_VN_MAPPINGS: &str = "pb_vn_mappings";
pub const VN_FN_MAPPINGS: &str = "vn_fn_mappings";
pub const VN_WN_MAPPINGS: &str = "vn_wn_mappings";
pub const ON_MAPPINGS: &str = "on_mappings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossReferenceStatus {
    Checked,
    Skipped,
    NotChecked,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossReferenceResult {
    pub status: CrossReferenceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// References examined.
    pub checked: usize,
}

impl CrossReferenceResult {
    fn with_status(status: CrossReferenceStatus) -> Self {
        Self {
            status,
            reason: None,
            errors: Vec::new(),
            warnings: Vec::new(),
            checked: 0,
        }
    }
}

/// Every VerbNet member grouping must name a PropBank predicate; an unknown
/// roleset of a known predicate is only a warning.
pub fn check_verbnet_to_propbank(verbnet: &VerbNetCorpus, propbank: &PropBankCorpus) -> CrossReferenceResult {
    let mut result = CrossReferenceResult::with_status(CrossReferenceStatus::Checked);
    for class in verbnet.classes.values() {
        class.visit(&mut |class| {
            for member in &class.members {
                for reference in member
                    .cross_references
                    .iter()
                    .filter(|r| r.target_corpus == CorpusKind::PropBank)
                {
                    result.checked += 1;
                    let roleset = reference.target_id.as_str();
                    if propbank.rolesets.contains_key(roleset) {
                        continue;
                    }
                    let lemma = roleset.rsplit_once('.').map_or(roleset, |(lemma, _)| lemma);
                    if propbank.predicates.contains_key(lemma) {
                        result.warnings.push(format!(
                            "{} member `{}`: predicate `{lemma}` has no roleset `{roleset}`",
                            class.id, member.name
                        ));
                    } else {
                        result.errors.push(format!(
                            "{} member `{}`: no PropBank predicate for `{roleset}`",
                            class.id, member.name
                        ));
                    }
                }
            }
        });
    }
    result
}

/// Every roleset `vncls` must name a VerbNet class or subclass, either by full
/// id or by the numeric part after the first `-`.
pub fn check_propbank_to_verbnet(propbank: &PropBankCorpus, verbnet: &VerbNetCorpus) -> CrossReferenceResult {
    let mut ids = BTreeSet::new();
    for class in verbnet.classes.values() {
        for id in class.all_ids() {
            ids.insert(id);
            if let Some((_, number)) = id.split_once('-') {
                ids.insert(number);
            }
        }
    }

    let mut result = CrossReferenceResult::with_status(CrossReferenceStatus::Checked);
    for predicate in propbank.predicates.values() {
        for roleset in &predicate.rolesets {
            for reference in roleset
                .cross_references
                .iter()
                .filter(|r| r.target_corpus == CorpusKind::VerbNet)
            {
                result.checked += 1;
                if !ids.contains(reference.target_id.as_str()) {
                    result.errors.push(format!(
                        "roleset {}: no VerbNet class `{}`",
                        roleset.id, reference.target_id
                    ));
                }
            }
        }
    }
    result
}

/// Every member `fn_mapping` frame must be a FrameNet frame. A frame that
/// only matches ignoring case is a warning.
pub fn check_verbnet_to_framenet(verbnet: &VerbNetCorpus, framenet: &FrameNetCorpus) -> CrossReferenceResult {
    let folded: BTreeSet<String> = framenet
        .frames
        .keys()
        .chain(framenet.frame_index.keys())
        .map(|name| name.to_lowercase())
        .collect();

    let mut result = CrossReferenceResult::with_status(CrossReferenceStatus::Checked);
    for class in verbnet.classes.values() {
        class.visit(&mut |class| {
            for member in &class.members {
                for reference in member
                    .cross_references
                    .iter()
                    .filter(|r| r.target_corpus == CorpusKind::FrameNet)
                {
                    result.checked += 1;
                    let frame = reference.target_id.as_str();
                    if framenet.frames.contains_key(frame) || framenet.frame_index.contains_key(frame) {
                        continue;
                    }
                    if folded.contains(&frame.to_lowercase()) {
                        result.warnings.push(format!(
                            "{} member `{}`: FrameNet frame `{frame}` differs only in case",
                            class.id, member.name
                        ));
                    } else {
                        result.errors.push(format!(
                            "{} member `{}`: no FrameNet frame `{frame}`",
                            class.id, member.name
                        ));
                    }
                }
            }
        });
    }
    result
}

/// Run every cross-corpus check whose inputs are loaded.
pub fn validate_cross_references(
    corpora: &BTreeMap<CorpusKind, CorpusRecord>,
) -> BTreeMap<String, CrossReferenceResult> {
    let verbnet = corpora
        .get(&CorpusKind::VerbNet)
        .and_then(|record| record.tree.as_verbnet());
    let propbank = corpora
        .get(&CorpusKind::PropBank)
        .and_then(|record| record.tree.as_propbank());
    let framenet = corpora
        .get(&CorpusKind::FrameNet)
        .and_then(|record| record.tree.as_framenet());

    let mut results = BTreeMap::new();
    match (verbnet, propbank) {
        (Some(verbnet), Some(propbank)) => {
            results.insert(VN_PB_MAPPINGS.to_string(), check_verbnet_to_propbank(verbnet, propbank));
            results.insert(PB_VN_MAPPINGS.to_string(), check_propbank_to_verbnet(propbank, verbnet));
        }
        _ => {
            for name in [VN_PB_MAPPINGS, PB_VN_MAPPINGS] {
                let mut skipped = CrossReferenceResult::with_status(CrossReferenceStatus::Skipped);
                skipped.reason = Some("verbnet and propbank must both be loaded".to_string());
                results.insert(name.to_string(), skipped);
            }
        }
    }
    let vn_fn = match (verbnet, framenet) {
        (Some(verbnet), Some(framenet)) => check_verbnet_to_framenet(verbnet, framenet),
        _ => {
            let mut skipped = CrossReferenceResult::with_status(CrossReferenceStatus::Skipped);
            skipped.reason = Some("verbnet and framenet must both be loaded".to_string());
            skipped
        }
    };
    results.insert(VN_FN_MAPPINGS.to_string(), vn_fn);
    for name in [VN_WN_MAPPINGS, ON_MAPPINGS] {
        results.insert(
            name.to_string(),
            CrossReferenceResult::with_status(CrossReferenceStatus::NotChecked),
        );
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_members_and_frames_warn() {
        let tree = json!({
            "classes": {"run-51.3.2": {"id": "run-51.3.2", "members": [], "frames": []}},
            "members": {}
        });
        let result = validate_corpus(CorpusKind::VerbNet, &tree);
        assert_eq!(result.status, ValidationStatus::ValidWithWarnings);
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.item_count, 1);
    }

    #[test]
    fn classes_of_wrong_shape_is_a_structural_fault() {
        let result = validate_corpus(CorpusKind::VerbNet, &json!({"classes": "x"}));
        assert_eq!(result.status, ValidationStatus::ValidationError);
        assert_eq!(result.item_count, 0);

        let result = validate_corpus(CorpusKind::VerbNet, &json!({}));
        assert_eq!(result.status, ValidationStatus::ValidationError);

        let tree = json!({"classes": {"a-1": {"id": "a-1", "members": "give", "frames": []}}});
        let result = validate_corpus(CorpusKind::VerbNet, &tree);
        assert_eq!(result.status, ValidationStatus::ValidationError);
    }

    #[test]
    fn mismatched_id_and_dangling_member_are_invalid() {
        let frame = json!({"description": {"primary": "NP V"}});
        let tree = json!({
            "classes": {"run-51.3.2": {"id": "walk-51.3.2", "members": [{"name": "run"}], "frames": [frame]}},
            "members": {"run": ["run-51.3.2", "jog-51.3.3"]}
        });
        let result = validate_corpus(CorpusKind::VerbNet, &tree);
        assert_eq!(result.status, ValidationStatus::Invalid);
        assert_eq!(result.errors.len(), 2);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn framenet_and_propbank_checks() {
        let framenet = json!({"frames": {"Giving": {"name": "Giving", "definition": "", "lexical_units": {}}}});
        let result = validate_corpus(CorpusKind::FrameNet, &framenet);
        assert_eq!(result.status, ValidationStatus::ValidWithWarnings);
        assert_eq!(result.warnings.len(), 2);

        let propbank = json!({
            "predicates": {
                "give": {"rolesets": [{"id": "give.01", "roles": [{"number": "0"}]}]},
                "hand": {"rolesets": [{"id": "give.01", "roles": []}]},
                "take": {"rolesets": []}
            },
            "rolesets": {"give.01": "give"}
        });
        let result = validate_corpus(CorpusKind::PropBank, &propbank);
        assert_eq!(result.status, ValidationStatus::Invalid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.item_count, 3);
    }

    #[test]
    fn other_kinds_are_not_validated() {
        let result = validate_corpus(CorpusKind::WordNet, &json!({"synsets": {}}));
        assert_eq!(result.status, ValidationStatus::NoValidation);
    }

    fn class_with_frames(frames: &str) -> VerbNetCorpus {
        let mut class = verbgraph_core::VerbClass {
            id: "give-13.1".to_string(),
            ..Default::default()
        };
        class.members.push(verbgraph_core::Member {
            name: "give".to_string(),
            fn_mapping: frames.to_string(),
            cross_references: frames
                .split_whitespace()
                .map(|f| verbgraph_core::CrossReference::declared(CorpusKind::FrameNet, f))
                .collect(),
            ..Default::default()
        });
        let mut sub = verbgraph_core::VerbClass {
            id: "give-13.1-1".to_string(),
            ..Default::default()
        };
        sub.members.push(verbgraph_core::Member {
            name: "hand".to_string(),
            cross_references: vec![verbgraph_core::CrossReference::declared(CorpusKind::FrameNet, "Handing")],
            ..Default::default()
        });
        class.subclasses.push(sub);

        let mut verbnet = VerbNetCorpus::default();
        verbnet.classes.insert(class.id.clone(), class);
        verbnet
    }

    #[test]
    fn member_frames_are_checked_against_framenet() {
        let mut framenet = FrameNetCorpus::default();
        framenet.frames.insert("Giving".to_string(), Default::default());
        framenet.frame_index.insert("Commerce_buy".to_string(), Default::default());

        let result = check_verbnet_to_framenet(&class_with_frames("Giving Commerce_buy giving"), &framenet);
        assert_eq!(result.status, CrossReferenceStatus::Checked);
        assert_eq!(result.checked, 4);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("`giving`"));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("give-13.1-1 member `hand`"));
    }

    #[test]
    fn unsorted_reference_list_is_invalid() {
        let collections = ReferenceCollections {
            syntactic_restrictions: vec!["plural".into(), "np_ppart".into()],
            ..Default::default()
        };
        let result = validate_references(&collections);
        assert_eq!(result.status, ValidationStatus::Invalid);
    }
}
