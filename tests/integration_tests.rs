//! Integration tests for the complete verbgraph pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - Discovery → every format reader → CorpusLoader
//! - Loaded corpora → ReferenceCollections
//! - Validation, cross-references and statistics over the loaded state
//!
//! Run with: cargo test --test integration_tests

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use verbgraph_core::CorpusKind;
use verbgraph_corpus::{
    CorpusLoader, LoadState, LoadStatus, LoaderConfig, ValidationStatus,
};

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

/// One small but complete corpus of every kind, using alias directory names.
fn populate(root: &Path) {
    write(
        root,
        "vn/give-13.1.xml",
        r#"<?xml version="1.0"?>
<VNCLASS ID="give-13.1">
  <MEMBERS>
    <MEMBER name="give" wn="give%2:40:00" grouping="give.01" fn_mapping="Giving" verbnet_key="give#2"/>
    <MEMBER name="hand" wn="hand%2:40:00" grouping=""/>
  </MEMBERS>
  <THEMROLES>
    <THEMROLE type="Agent"><SELRESTRS><SELRESTR Value="+" type="animate"/></SELRESTRS></THEMROLE>
  </THEMROLES>
  <FRAMES>
    <FRAME>
      <DESCRIPTION descriptionNumber="0.2" primary="NP V NP NP" secondary="Dative" xtag=""/>
      <EXAMPLES><EXAMPLE>They gave the kids cookies.</EXAMPLE></EXAMPLES>
      <SYNTAX><NP value="Agent"><SYNRESTRS/></NP><VERB/><NP value="Recipient"><SYNRESTRS/></NP><NP value="Theme"><SYNRESTRS/></NP></SYNTAX>
      <SEMANTICS><PRED value="has_possession"><ARGS><ARG type="Event" value="e1"/></ARGS></PRED></SEMANTICS>
    </FRAME>
  </FRAMES>
  <SUBCLASSES/>
</VNCLASS>"#,
    );
    write(root, "vn/broken.xml", "<VNCLASS ID=\"broken-1\"><MEMBERS>");

    write(
        root,
        "framenet/frame/Giving.xml",
        r#"<frame xmlns="http://framenet.icsi.berkeley.edu" name="Giving" ID="139">
  <definition>A Donor transfers a Theme to a Recipient.</definition>
  <FE coreType="Core" name="Donor" ID="1052"><definition>The giver.</definition></FE>
  <lexUnit POS="V" name="give.v" ID="3385"><definition>freely transfer.</definition></lexUnit>
</frame>"#,
    );

    write(
        root,
        "propbank/frames/give.xml",
        r#"<frameset><predicate lemma="give">
  <roleset id="give.01" name="transfer" vncls="13.1">
    <roles><role n="0" descr="giver" f="PAG"/><role n="1" descr="thing given" f="PPT"/></roles>
    <example name="ditransitive"><text>John gave Mary a book</text><arg n="0">John</arg></example>
  </roleset>
</predicate></frameset>"#,
    );

    write(
        root,
        "ontonotes/give-v.xml",
        r#"<inventory lemma="give-v">
  <sense n="1" group="1" name="transfer possession">
    <examples>John gave Mary a book.</examples>
    <mappings><wn version="3.0">1</wn><pb>give.01</pb></mappings>
  </sense>
</inventory>"#,
    );

    write(
        root,
        "wordnet/data.verb",
        "02199590 40 v 02 give 0 hand 1 000 | transfer possession\n",
    );
    write(root, "wordnet/index.verb", "give v 1 0 1 1 02199590  \n");
    write(root, "wordnet/verb.exc", "gave give\n");

    write(
        root,
        "BSO/VNBSOMapping_withMembers.csv",
        "VN_Class,BSO_Category,Members\ngive-13.1,Transfer,give hand\n",
    );
    write(
        root,
        "BSO/BSOVNMapping_withMembers.csv",
        "BSO_Category\tVN_Class\tMembers\nTransfer\tgive-13.1\t\"give, hand\"\n",
    );

    write(root, "semnet20180205/verb-semnet.json", r#"{"give": {"synonym": ["hand"]}}"#);
    write(root, "semnet20180205/noun-semnet.json", r#"{"gift": {"hypernym": ["present"]}}"#);

    write(
        root,
        "reference_docs/pred_calc_for_website_final.json",
        r#"[{"name": "has_possession", "definition": "Agent owns Theme"}]"#,
    );
    write(
        root,
        "reference_docs/themrole_defs.json",
        r#"{"Agent": {"definition": "Actor in an event"}}"#,
    );
    write(
        root,
        "reference_docs/vn_verb_specific_predicates.tsv",
        "predicate\tdefinition\ndirection\tpath taken\n",
    );
}

// ============================================================================
// Full load
// ============================================================================

#[test]
fn test_load_all_reads_every_corpus() {
    let dir = tempdir().unwrap();
    populate(dir.path());

    let mut loader = CorpusLoader::new(LoaderConfig::new(dir.path()));
    assert_eq!(loader.corpus_paths().len(), CorpusKind::ALL.len());
    assert_eq!(loader.corpus_paths()[&CorpusKind::VerbNet], dir.path().join("vn"));

    let reports = loader.load_all();
    for kind in CorpusKind::ALL {
        assert_eq!(reports[&kind].status, LoadStatus::Success, "{kind}");
        assert_eq!(loader.state(kind), LoadState::Loaded, "{kind}");
    }
    assert_eq!(reports[&CorpusKind::VerbNet].error_files, Some(1));

    let stats = loader.collection_statistics();
    assert_eq!(stats["verbnet"]["classes"], 1);
    assert_eq!(stats["verbnet"]["members"], 2);
    assert_eq!(stats["verbnet"]["error_files"], 1);
    assert_eq!(stats["framenet"]["frames"], 1);
    assert_eq!(stats["framenet"]["lexical_units"], 1);
    assert_eq!(stats["propbank"]["predicates"], 1);
    assert_eq!(stats["propbank"]["rolesets"], 1);
    assert_eq!(stats["wordnet"]["total_synsets"], 1);
    assert_eq!(stats["semnet"]["verb_nodes"], 1);
    assert_eq!(stats["reference_collections"]["predicates"], 1);
}

#[test]
fn test_reference_collections_combine_verbnet_and_docs() {
    let dir = tempdir().unwrap();
    populate(dir.path());

    let mut loader = CorpusLoader::new(LoaderConfig::new(dir.path()));
    loader.load_all();

    let references = loader.reference_collections().unwrap();
    assert_eq!(references.verb_specific_features, vec!["direction", "has_possession"]);
    assert_eq!(references.selectional_restrictions, vec!["animate"]);
    assert!(references.syntactic_restrictions.is_empty());
    assert!(references.predicates.as_ref().unwrap().contains_key("has_possession"));
    assert!(references.themroles.as_ref().unwrap().contains_key("Agent"));

    let again = loader.build_reference_collections(true).clone();
    assert_eq!(&again, loader.reference_collections().unwrap());
}

// ============================================================================
// Validation and reporting
// ============================================================================

#[test]
fn test_validation_over_loaded_corpora() {
    let dir = tempdir().unwrap();
    populate(dir.path());

    let mut loader = CorpusLoader::new(LoaderConfig::new(dir.path()));
    loader.load_all();

    let results = loader.validate_collections();
    assert_eq!(results["verbnet"].status, ValidationStatus::Valid);
    assert_eq!(results["framenet"].status, ValidationStatus::Valid);
    assert_eq!(results["propbank"].status, ValidationStatus::Valid);
    assert_eq!(results["wordnet"].status, ValidationStatus::NoValidation);
    assert_eq!(results["reference_collections"].status, ValidationStatus::Valid);

    let cross = loader.validate_cross_references();
    assert!(cross["vn_pb_mappings"].errors.is_empty());
    assert!(cross["pb_vn_mappings"].errors.is_empty());
    assert_eq!(cross["pb_vn_mappings"].checked, 1);
    assert_eq!(cross["vn_fn_mappings"].checked, 1);
    assert!(cross["vn_fn_mappings"].errors.is_empty());
    assert!(cross["vn_fn_mappings"].warnings.is_empty());

    let bso = loader.corpus(CorpusKind::Bso).unwrap().tree.as_bso().unwrap();
    assert!(bso.is_consistent());
    assert_eq!(bso.bso_to_vn["Transfer"][0].members, vec!["give", "hand"]);
}

#[test]
fn test_metadata_serializes_for_reporting() {
    let dir = tempdir().unwrap();
    populate(dir.path());
    fs::remove_dir_all(dir.path().join("semnet20180205")).unwrap();

    let mut loader = CorpusLoader::new(LoaderConfig::new(dir.path()));
    let reports = loader.load_all();
    assert_eq!(reports[&CorpusKind::SemNet].status, LoadStatus::NotFound);

    let metadata = serde_json::to_value(loader.metadata()).unwrap();
    assert_eq!(metadata["load_status"]["verbnet"]["state"], "loaded");
    assert_eq!(metadata["load_status"]["semnet"]["state"], "not_loaded");
    assert!(metadata["build_metadata"]["last_reference_build"].is_string());
    assert!(metadata["corpus_paths"]["wordnet"].is_string());
    assert!(metadata["timestamp"].as_str().unwrap().parse::<chrono::DateTime<chrono::Utc>>().is_ok());

    let record = loader.corpus(CorpusKind::VerbNet).unwrap().to_value().unwrap();
    assert_eq!(record["statistics"]["parsed_files"], 1);
    assert_eq!(record["members"]["give"][0], "give-13.1");
}
