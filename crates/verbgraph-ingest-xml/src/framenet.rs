//! FrameNet reader: `frame/*.xml` plus the optional `frameIndex.xml`,
//! `luIndex.xml` and `frRelation.xml` at the corpus root.

use crate::dom::{self, Element};
use crate::is_xml;
use std::path::Path;
use verbgraph_core::files::{file_name, list_files};
use verbgraph_core::{
    parse_files, FeRelation, FileTally, FrameElement, FrameIndexEntry, FrameNetCorpus,
    FrameNetFrame, FrameRelation, FrameRelationRef, FrameRelations, LexicalUnit, LuIndexEntry,
    ParseError, ReadError, ReadOutcome, ReaderOptions,
};

const INDEX_FILES: [&str; 3] = ["frameIndex.xml", "luIndex.xml", "frRelation.xml"];

pub fn read(dir: &Path, options: &ReaderOptions) -> Result<ReadOutcome<FrameNetCorpus>, ReadError> {
    let frame_dir = dir.join("frame");
    let files = if frame_dir.is_dir() {
        list_files(&frame_dir, is_xml)?
    } else {
        list_files(dir, |p| is_xml(p) && !INDEX_FILES.contains(&file_name(p).as_str()))?
    };

    let results = parse_files(&files, options.workers, |path| {
        parse_frame_file(path, options.max_file_bytes)
    });

    let mut corpus = FrameNetCorpus::default();
    let mut tally = FileTally::default();
    for (path, result) in results {
        match result {
            Ok(frame) if corpus.frames.contains_key(&frame.name) => {
                tracing::warn!(path = %path.display(), frame = %frame.name, "duplicate frame name, keeping first");
                tally.failed();
            }
            Ok(frame) => {
                corpus.frames.insert(frame.name.clone(), frame);
                tally.parsed();
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping FrameNet frame");
                tally.failed();
            }
        }
    }

    let index_file = |name: &str, tally: &mut FileTally| -> Option<Element> {
        let path = dir.join(name);
        if !path.is_file() {
            return None;
        }
        match dom::parse_file(&path, options.max_file_bytes) {
            Ok(root) => {
                tally.parsed();
                Some(root)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping FrameNet index");
                tally.failed();
                None
            }
        }
    };

    if let Some(root) = index_file("frameIndex.xml", &mut tally) {
        for frame in root.children_named("frame") {
            let name = frame.attr_or_empty("name");
            if name.is_empty() {
                continue;
            }
            corpus.frame_index.insert(
                name.clone(),
                FrameIndexEntry {
                    id: frame.attr_or_empty("ID"),
                    name,
                    cdate: frame.attr_or_empty("cDate"),
                },
            );
        }
    }
    if let Some(root) = index_file("luIndex.xml", &mut tally) {
        for lu in root.children_named("lu") {
            let name = lu.attr_or_empty("name");
            if name.is_empty() {
                continue;
            }
            corpus.lu_index.insert(
                name.clone(),
                LuIndexEntry {
                    id: lu.attr_or_empty("ID"),
                    name,
                    pos: lu.attr_or_empty("POS"),
                    frame: lu.attr_or_empty("frameName"),
                },
            );
        }
    }
    if let Some(root) = index_file("frRelation.xml", &mut tally) {
        corpus.frame_relations = frame_relations(&root);
    }

    for (frame_name, frame) in &corpus.frames {
        for lu_name in frame.lexical_units.keys() {
            corpus
                .lexical_units
                .entry(lu_name.clone())
                .or_default()
                .push(frame_name.clone());
        }
    }
    for (lu_name, entry) in &corpus.lu_index {
        if !entry.frame.is_empty() {
            corpus
                .lexical_units
                .entry(lu_name.clone())
                .or_default()
                .push(entry.frame.clone());
        }
    }
    for frames in corpus.lexical_units.values_mut() {
        frames.sort();
        frames.dedup();
    }

    let frame_elements: usize = corpus.frames.values().map(|f| f.frame_elements.len()).sum();
    let extra = [
        ("total_frames", corpus.frames.len()),
        ("total_lexical_units", corpus.lexical_units.len()),
        ("total_frame_elements", frame_elements),
        ("total_frame_relations", corpus.frame_relations.frame_relations.len()),
    ];
    tracing::info!(
        corpus = "framenet",
        frames = corpus.frames.len(),
        errors = tally.errors,
        "FrameNet loaded"
    );
    Ok(tally.finish(corpus, extra))
}

pub fn parse_frame_file(path: &Path, max_bytes: u64) -> Result<FrameNetFrame, ParseError> {
    let root = dom::parse_file(path, max_bytes)?;
    dom::expect_root(&root, "frame", path)?;

    let name = root.attr_or_empty("name");
    if name.is_empty() {
        return Err(ParseError::invalid(path, "frame without a name"));
    }

    let mut frame = FrameNetFrame {
        name,
        id: root.attr_or_empty("ID"),
        definition: root.child_text("definition"),
        source_file: Some(file_name(path)),
        ..FrameNetFrame::default()
    };

    for fe in root.children_named("FE") {
        let fe_name = fe.attr_or_empty("name");
        if fe_name.is_empty() || frame.frame_elements.contains_key(&fe_name) {
            tracing::debug!(frame = %frame.name, fe = %fe_name, "skipping unnamed or repeated FE");
            continue;
        }
        frame.frame_elements.insert(
            fe_name,
            FrameElement {
                id: fe.attr_or_empty("ID"),
                core_type: fe.attr_or_empty("coreType"),
                definition: fe.child_text("definition"),
            },
        );
    }

    for lu in root.children_named("lexUnit") {
        let lu_name = lu.attr_or_empty("name");
        if lu_name.is_empty() || frame.lexical_units.contains_key(&lu_name) {
            tracing::debug!(frame = %frame.name, lu = %lu_name, "skipping unnamed or repeated lexical unit");
            continue;
        }
        frame.lexical_units.insert(
            lu_name,
            LexicalUnit {
                id: lu.attr_or_empty("ID"),
                pos: lu.attr_or_empty("POS"),
                lemma_id: lu.attr_or_empty("lemmaID"),
                definition: lu.child_text("definition"),
            },
        );
    }

    for relation in root.children_named("frameRelation") {
        let related_frames: Vec<String> = relation
            .children_named("relatedFrame")
            .map(Element::deep_text)
            .filter(|name| !name.is_empty())
            .collect();
        if related_frames.is_empty() {
            continue;
        }
        frame.relations.push(FrameRelationRef {
            relation_type: relation.attr_or_empty("type"),
            related_frames,
        });
    }

    Ok(frame)
}

fn relation_from(el: &Element, relation_type: String) -> FrameRelation {
    let pick = |a: &str, b: &str| {
        el.attr(a)
            .or_else(|| el.attr(b))
            .unwrap_or_default()
            .to_string()
    };
    FrameRelation {
        relation_type,
        id: el.attr_or_empty("ID"),
        sub_frame: pick("subFrameName", "subFrame"),
        super_frame: pick("superFrameName", "superFrame"),
    }
}

/// `frRelation.xml`: grouped `frameRelationType/frameRelation/FERelation`, or a
/// flat list of `frameRelation` elements carrying their own `type`.
fn frame_relations(root: &Element) -> FrameRelations {
    let mut relations = FrameRelations::default();

    for group in root.children_named("frameRelationType") {
        let relation_type = group.attr_or_empty("name");
        for rel in group.children_named("frameRelation") {
            let frame_relation = relation_from(rel, relation_type.clone());
            for fe in rel.children_named("FERelation") {
                relations.fe_relations.push(FeRelation {
                    relation_type: relation_type.clone(),
                    super_fe: fe.attr_or_empty("superFEName"),
                    sub_fe: fe.attr_or_empty("subFEName"),
                    frame_relation: frame_relation.id.clone(),
                });
            }
            relations.frame_relations.push(frame_relation);
        }
    }

    for rel in root.children_named("frameRelation") {
        let relation_type = rel.attr_or_empty("type");
        relations.frame_relations.push(relation_from(rel, relation_type));
    }

    relations
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIVING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<frame xmlns="http://framenet.icsi.berkeley.edu" cBy="ChW" name="Giving" ID="139">
  <definition>&lt;def-root&gt;A Donor transfers a Theme to a Recipient.&lt;/def-root&gt;</definition>
  <FE coreType="Core" name="Donor" ID="1052"><definition>The giver.</definition></FE>
  <FE coreType="Core" name="Theme" ID="1053"><definition>The object given.</definition></FE>
  <frameRelation type="Inherits from"><relatedFrame>Transfer</relatedFrame></frameRelation>
  <frameRelation type="Is Inherited by"/>
  <lexUnit POS="V" name="give.v" ID="3385" lemmaID="1234"><definition>COD: freely transfer.</definition></lexUnit>
  <lexUnit POS="V" name="hand.v" ID="3386"/>
</frame>"#;

    #[test]
    fn parses_frame_with_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Giving.xml");
        std::fs::write(&path, GIVING).unwrap();

        let frame = parse_frame_file(&path, 1 << 20).unwrap();
        assert_eq!(frame.name, "Giving");
        assert_eq!(frame.id, "139");
        assert!(frame.definition.contains("A Donor transfers"));
        assert_eq!(frame.frame_elements["Donor"].core_type, "Core");
        assert_eq!(frame.frame_elements["Theme"].definition, "The object given.");
        assert_eq!(frame.lexical_units["give.v"].pos, "V");
        assert_eq!(frame.lexical_units["give.v"].lemma_id, "1234");
        assert_eq!(frame.relations.len(), 1);
        assert_eq!(frame.relations[0].related_frames, vec!["Transfer"]);
    }

    #[test]
    fn reads_corpus_with_indexes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("frame")).unwrap();
        std::fs::write(dir.path().join("frame/Giving.xml"), GIVING).unwrap();
        std::fs::write(dir.path().join("frame/Broken.xml"), "<frame name=\"Broken\">").unwrap();
        std::fs::write(
            dir.path().join("luIndex.xml"),
            r#"<luIndex><lu name="give.v" ID="3385" POS="V" frameName="Giving"/>
               <lu name="donate.v" ID="3390" POS="V" frameName="Giving"/></luIndex>"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("frRelation.xml"),
            r#"<frameRelations>
                 <frameRelationType name="Inheritance">
                   <frameRelation ID="7" subFrameName="Giving" superFrameName="Transfer">
                     <FERelation subFEName="Donor" superFEName="Donor"/>
                   </frameRelation>
                 </frameRelationType>
               </frameRelations>"#,
        )
        .unwrap();

        let outcome = read(dir.path(), &ReaderOptions::default()).unwrap();
        assert_eq!(outcome.error_files, 1);
        assert_eq!(outcome.statistics["total_frames"], 1);

        let corpus = outcome.tree;
        assert_eq!(corpus.lexical_units["give.v"], vec!["Giving"]);
        assert_eq!(corpus.lexical_units["donate.v"], vec!["Giving"]);
        assert_eq!(corpus.frame_relations.frame_relations[0].super_frame, "Transfer");
        assert_eq!(corpus.frame_relations.fe_relations[0].frame_relation, "7");
    }
}
