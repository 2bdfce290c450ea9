//! PropBank reader: `frameset` documents, one or more `predicate` elements each
//! holding `roleset`s.

use crate::dom::{self, Element};
use crate::is_xml;
use std::path::Path;
use verbgraph_core::files::{file_name, file_stem, walk_files};
use verbgraph_core::{
    parse_files, CorpusKind, CrossReference, ExampleArgument, FileTally, ParseError,
    PropBankCorpus, PropBankExample, PropBankPredicate, ReadError, ReadOutcome, ReaderOptions,
    Role, Roleset, RolesetAlias, VerbNetRoleMapping,
};

pub fn read(dir: &Path, options: &ReaderOptions) -> Result<ReadOutcome<PropBankCorpus>, ReadError> {
    let frames_dir = dir.join("frames");
    let root = if frames_dir.is_dir() { frames_dir } else { dir.to_path_buf() };
    let files = walk_files(&root, is_xml)?;

    let results = parse_files(&files, options.workers, |path| {
        parse_frameset_file(path, options.max_file_bytes)
    });

    let mut corpus = PropBankCorpus::default();
    let mut tally = FileTally::default();
    let mut duplicate_rolesets = 0usize;
    for (path, result) in results {
        match result {
            Ok(predicates) => {
                tally.parsed();
                for predicate in predicates {
                    duplicate_rolesets += merge_predicate(&mut corpus, predicate, &path);
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping PropBank frameset");
                tally.failed();
            }
        }
    }

    let roles: usize = corpus
        .predicates
        .values()
        .flat_map(|p| p.rolesets.iter())
        .map(|r| r.roles.len())
        .sum();
    let extra = [
        ("total_predicates", corpus.predicates.len()),
        ("total_rolesets", corpus.rolesets.len()),
        ("total_roles", roles),
        ("duplicate_rolesets", duplicate_rolesets),
    ];
    tracing::info!(
        corpus = "propbank",
        predicates = corpus.predicates.len(),
        rolesets = corpus.rolesets.len(),
        errors = tally.errors,
        "PropBank loaded"
    );
    Ok(tally.finish(corpus, extra))
}

/// Fold one parsed predicate into the corpus. Returns the number of rolesets
/// dropped because their id was already taken.
fn merge_predicate(corpus: &mut PropBankCorpus, predicate: PropBankPredicate, path: &Path) -> usize {
    let mut dropped = 0;
    let entry = corpus
        .predicates
        .entry(predicate.lemma.clone())
        .or_insert_with(|| PropBankPredicate {
            lemma: predicate.lemma.clone(),
            note: predicate.note.clone(),
            ..PropBankPredicate::default()
        });
    for file in predicate.source_files {
        if !entry.source_files.contains(&file) {
            entry.source_files.push(file);
        }
    }
    for roleset in predicate.rolesets {
        if let Some(owner) = corpus.rolesets.get(&roleset.id) {
            tracing::warn!(
                path = %path.display(),
                roleset = %roleset.id,
                owner = %owner,
                "duplicate roleset id, keeping first"
            );
            dropped += 1;
            continue;
        }
        corpus
            .rolesets
            .insert(roleset.id.clone(), predicate.lemma.clone());
        entry.rolesets.push(roleset);
    }
    dropped
}

/// Parse one frameset file into its predicates.
pub fn parse_frameset_file(path: &Path, max_bytes: u64) -> Result<Vec<PropBankPredicate>, ParseError> {
    let root = dom::parse_file(path, max_bytes)?;
    dom::expect_root(&root, "frameset", path)?;
    let source = file_name(path);

    let mut predicates: Vec<PropBankPredicate> = root
        .children_named("predicate")
        .map(|p| PropBankPredicate {
            lemma: p.attr_or_empty("lemma"),
            note: p.child_text("note"),
            rolesets: p.children_named("roleset").map(parse_roleset).collect(),
            source_files: vec![source.clone()],
        })
        .collect();

    // Older framesets put rolesets directly under the root.
    let loose: Vec<Roleset> = root.children_named("roleset").map(parse_roleset).collect();
    if !loose.is_empty() {
        let lemma = root
            .attr("lemma")
            .or_else(|| root.attr("id"))
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| file_stem(path).trim_end_matches("-v").to_string());
        predicates.push(PropBankPredicate {
            lemma,
            note: root.child_text("note"),
            rolesets: loose,
            source_files: vec![source],
        });
    }

    predicates.retain(|p| {
        if p.lemma.is_empty() {
            tracing::debug!(path = %path.display(), "dropping predicate without lemma");
        }
        !p.lemma.is_empty()
    });
    for predicate in &mut predicates {
        predicate.rolesets.retain(|r| !r.id.is_empty());
    }
    Ok(predicates)
}

/// Tokens of a mapping attribute; `-` and empty mean "no mapping".
fn mapping_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != "-")
}

fn parse_roleset(el: &Element) -> Roleset {
    let vncls = el.attr_or_empty("vncls");
    let framenet = el.attr_or_empty("framnet");

    let aliases: Vec<RolesetAlias> = el
        .grandchildren("aliases", "alias")
        .map(|a| RolesetAlias {
            text: a.deep_text(),
            pos: a.attr_or_empty("pos"),
            framenet: a.attr_or_empty("framenet"),
            verbnet: a.attr_or_empty("verbnet"),
        })
        .collect();

    let roles = el
        .grandchildren("roles", "role")
        .map(|r| {
            let mut vnroles: Vec<VerbNetRoleMapping> = r
                .children_named("vnrole")
                .map(|v| VerbNetRoleMapping {
                    vncls: v.attr_or_empty("vncls"),
                    theta: v.attr_or_empty("vntheta"),
                })
                .collect();
            vnroles.extend(
                r.grandchildren("rolelinks", "rolelink")
                    .filter(|link| link.attr("resource") == Some("VerbNet"))
                    .map(|link| VerbNetRoleMapping {
                        vncls: link.attr_or_empty("class"),
                        theta: link.deep_text(),
                    }),
            );
            Role {
                number: r.attr_or_empty("n"),
                description: r.attr_or_empty("descr"),
                function: r.attr_or_empty("f"),
                vnroles,
            }
        })
        .collect();

    let examples = el.children_named("example").map(parse_example).collect();

    let mut cross_references: Vec<CrossReference> = Vec::new();
    let mut link = |kind: CorpusKind, id: &str, confidence: f32| {
        if !cross_references
            .iter()
            .any(|c| c.target_corpus == kind && c.target_id == id)
        {
            cross_references.push(CrossReference::with_confidence(kind, id, confidence));
        }
    };
    for class in mapping_tokens(&vncls) {
        link(CorpusKind::VerbNet, class, 1.0);
    }
    for frame in mapping_tokens(&framenet) {
        link(CorpusKind::FrameNet, frame, 1.0);
    }
    for alias in &aliases {
        for class in mapping_tokens(&alias.verbnet) {
            link(CorpusKind::VerbNet, class, 1.0);
        }
        for frame in mapping_tokens(&alias.framenet) {
            link(CorpusKind::FrameNet, frame, 1.0);
        }
    }
    for lexlink in el.grandchildren("lexlinks", "lexlink") {
        let kind = match lexlink.attr("resource") {
            Some("VerbNet") => CorpusKind::VerbNet,
            Some("FrameNet") => CorpusKind::FrameNet,
            _ => continue,
        };
        let confidence = lexlink
            .attr("confidence")
            .and_then(|c| c.trim().parse::<f32>().ok())
            .unwrap_or(1.0);
        for target in mapping_tokens(lexlink.attr("class").unwrap_or_default()) {
            link(kind, target, confidence);
        }
    }

    Roleset {
        id: el.attr_or_empty("id"),
        name: el.attr_or_empty("name"),
        vncls,
        framenet,
        aliases,
        roles,
        examples,
        cross_references,
    }
}

fn parse_example(el: &Element) -> PropBankExample {
    let text = match el.child("text") {
        Some(text) => text.deep_text(),
        None => el.text.clone(),
    };
    let arguments = el
        .descendants_named("arg")
        .into_iter()
        .map(|a| ExampleArgument {
            number: a
                .attr("n")
                .or_else(|| a.attr("type"))
                .unwrap_or_default()
                .to_string(),
            function: a.attr_or_empty("f"),
            text: a.deep_text(),
        })
        .collect();
    let rels = el
        .descendants_named("rel")
        .into_iter()
        .map(Element::deep_text)
        .filter(|t| !t.is_empty())
        .collect();

    PropBankExample {
        name: el.attr_or_empty("name"),
        text,
        arguments,
        rels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIVE: &str = r#"<?xml version="1.0"?>
<!DOCTYPE frameset SYSTEM "frameset.dtd">
<frameset>
  <predicate lemma="give">
    <roleset id="give.01" name="transfer" vncls="13.1-1" framnet="Giving">
      <aliases><alias pos="v" framenet="Giving" verbnet="13.1-1">give</alias></aliases>
      <roles>
        <role n="0" descr="giver" f="PAG"><vnrole vncls="13.1-1" vntheta="Agent"/></role>
        <role n="1" descr="thing given" f="PPT">
          <rolelinks><rolelink class="give-13.1-1" resource="VerbNet" version="verbnet3.4">theme</rolelink></rolelinks>
        </role>
      </roles>
      <example name="ditransitive">
        <text>John gave Mary a book</text>
        <arg n="0">John</arg><rel>gave</rel><arg n="2">Mary</arg><arg n="1">a book</arg>
      </example>
    </roleset>
    <roleset id="give.02" name="emit" vncls="-"/>
  </predicate>
</frameset>"#;

    fn write(dir: &Path, rel: &str, body: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn parses_rolesets_roles_and_examples() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "give.xml", GIVE);
        let predicates = parse_frameset_file(&dir.path().join("give.xml"), 1 << 20).unwrap();

        assert_eq!(predicates.len(), 1);
        let give = &predicates[0];
        assert_eq!(give.lemma, "give");
        assert_eq!(give.rolesets.len(), 2);

        let transfer = &give.rolesets[0];
        assert_eq!(transfer.roles[0].vnroles[0].theta, "Agent");
        assert_eq!(transfer.roles[1].vnroles[0].vncls, "give-13.1-1");
        assert_eq!(transfer.examples[0].text, "John gave Mary a book");
        assert_eq!(transfer.examples[0].arguments.len(), 3);
        assert_eq!(transfer.examples[0].rels, vec!["gave"]);
        assert_eq!(
            transfer.cross_references,
            vec![
                CrossReference::declared(CorpusKind::VerbNet, "13.1-1"),
                CrossReference::declared(CorpusKind::FrameNet, "Giving"),
            ]
        );
        assert!(give.rolesets[1].cross_references.is_empty());
    }

    #[test]
    fn lexlinks_carry_their_confidence() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "hand.xml",
            r#"<frameset><predicate lemma="hand">
  <roleset id="hand.01" name="give" vncls="13.1">
    <lexlinks>
      <lexlink class="13.1" confidence="0.4" resource="VerbNet" src="manual+strict-conv"/>
      <lexlink class="11.1" confidence="0.75" resource="VerbNet" src="manual+strict-conv"/>
      <lexlink class="Giving" confidence="n/a" resource="FrameNet" src="manual"/>
      <lexlink class="x" confidence="0.9" resource="WordNet"/>
    </lexlinks>
  </roleset>
</predicate></frameset>"#,
        );
        let predicates = parse_frameset_file(&dir.path().join("hand.xml"), 1 << 20).unwrap();
        let links = &predicates[0].rolesets[0].cross_references;

        assert_eq!(
            links,
            &vec![
                CrossReference::declared(CorpusKind::VerbNet, "13.1"),
                CrossReference::with_confidence(CorpusKind::VerbNet, "11.1", 0.75),
                CrossReference::declared(CorpusKind::FrameNet, "Giving"),
            ]
        );
        assert_eq!(links[1].confidence, 0.75);
    }

    #[test]
    fn loose_rolesets_take_the_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "hand-v.xml",
            r#"<frameset><roleset id="hand.01" name="give"/></frameset>"#,
        );
        let predicates = parse_frameset_file(&dir.path().join("hand-v.xml"), 1 << 20).unwrap();
        assert_eq!(predicates[0].lemma, "hand");
        assert_eq!(predicates[0].rolesets[0].id, "hand.01");
    }

    #[test]
    fn same_lemma_merges_and_duplicate_rolesets_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "frames/give.xml", GIVE);
        write(
            dir.path(),
            "frames/give2.xml",
            r#"<frameset><predicate lemma="give">
                 <roleset id="give.01" name="shadowed"/>
                 <roleset id="give.03" name="give up"/>
               </predicate></frameset>"#,
        );
        write(dir.path(), "frames/broken.xml", "<frameset><predicate>");

        let outcome = read(dir.path(), &ReaderOptions::default()).unwrap();
        assert_eq!(outcome.statistics["total_files"], 3);
        assert_eq!(outcome.error_files, 1);
        assert_eq!(outcome.statistics["duplicate_rolesets"], 1);

        let corpus = outcome.tree;
        assert_eq!(corpus.predicates["give"].rolesets.len(), 3);
        assert_eq!(corpus.predicates["give"].source_files, vec!["give.xml", "give2.xml"]);
        assert_eq!(corpus.roleset("give.01").unwrap().name, "transfer");
        assert_eq!(corpus.rolesets["give.03"], "give");
    }
}
