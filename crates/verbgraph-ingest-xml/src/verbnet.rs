//! VerbNet reader: one `VNCLASS` document per file, subclasses nested under
//! `SUBCLASSES/VNSUBCLASS` to arbitrary (but bounded) depth.

use crate::dom::{self, Element};
use crate::is_xml;
use std::collections::BTreeMap;
use std::path::Path;
use verbgraph_core::files::{file_name, list_files, walk_files};
use verbgraph_core::{
    parse_files, CorpusKind, CrossReference, FileTally, Frame, FrameDescription, Member,
    ParseError, PredicateArg, ReadError, ReadOutcome, ReaderOptions, Restriction,
    RestrictionSet, SemanticPredicate, SyntaxCategory, SyntaxElement, ThematicRole, VerbClass,
    VerbNetCorpus, VerbNetHierarchy,
};

pub fn read(dir: &Path, options: &ReaderOptions) -> Result<ReadOutcome<VerbNetCorpus>, ReadError> {
    let mut files = list_files(dir, is_xml)?;
    if files.is_empty() {
        files = walk_files(dir, is_xml)?;
    }

    let results = parse_files(&files, options.workers, |path| {
        parse_class_file(path, options.max_file_bytes, options.max_subclass_depth)
    });

    let mut corpus = VerbNetCorpus::default();
    let mut tally = FileTally::default();
    for (path, result) in results {
        match result {
            Ok(class) if corpus.classes.contains_key(&class.id) => {
                tracing::warn!(path = %path.display(), class = %class.id, "duplicate VerbNet class id, keeping first");
                tally.failed();
            }
            Ok(class) => {
                corpus.classes.insert(class.id.clone(), class);
                tally.parsed();
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping VerbNet file");
                tally.failed();
            }
        }
    }

    corpus.members = member_index(&corpus.classes);
    corpus.hierarchy = hierarchy(&corpus.classes);

    let subclasses: usize = corpus
        .classes
        .values()
        .map(|c| c.all_ids().len() - 1)
        .sum();
    let extra = [
        ("total_classes", corpus.classes.len()),
        ("total_subclasses", subclasses),
        ("total_members", corpus.members.len()),
    ];
    tracing::info!(
        corpus = "verbnet",
        classes = corpus.classes.len(),
        errors = tally.errors,
        "VerbNet loaded"
    );
    Ok(tally.finish(corpus, extra))
}

/// Parse one class file.
pub fn parse_class_file(
    path: &Path,
    max_bytes: u64,
    max_depth: usize,
) -> Result<VerbClass, ParseError> {
    let root = dom::parse_file(path, max_bytes)?;
    dom::expect_root(&root, "VNCLASS", path)?;
    let mut class = parse_class(&root, path, 0, max_depth)?;
    class.source_file = Some(file_name(path));
    Ok(class)
}

fn parse_class(
    el: &Element,
    path: &Path,
    depth: usize,
    max_depth: usize,
) -> Result<VerbClass, ParseError> {
    if depth > max_depth {
        return Err(ParseError::DepthExceeded {
            path: path.to_path_buf(),
            limit: max_depth,
        });
    }

    let id = el.attr("ID").map(str::trim).unwrap_or_default();
    if id.is_empty() {
        return Err(ParseError::invalid(path, format!("<{}> without ID", el.name)));
    }

    let mut subclasses = Vec::new();
    for sub in el.grandchildren("SUBCLASSES", "VNSUBCLASS") {
        subclasses.push(parse_class(sub, path, depth + 1, max_depth)?);
    }

    Ok(VerbClass {
        id: id.to_string(),
        members: el.grandchildren("MEMBERS", "MEMBER").map(parse_member).collect(),
        themroles: el
            .grandchildren("THEMROLES", "THEMROLE")
            .map(|role| ThematicRole {
                role_type: role.attr_or_empty("type"),
                selrestrs: restrictions(role.child("SELRESTRS"), "SELRESTR"),
            })
            .collect(),
        frames: el.grandchildren("FRAMES", "FRAME").map(parse_frame).collect(),
        subclasses,
        source_file: None,
        bso_category: None,
    })
}

fn parse_member(el: &Element) -> Member {
    let wn = el.attr_or_empty("wn");
    let grouping = el.attr_or_empty("grouping");

    let mut cross_references = Vec::new();
    for sense in wn.split_whitespace() {
        let sense = sense.trim_start_matches('?');
        if !sense.is_empty() {
            cross_references.push(CrossReference::declared(CorpusKind::WordNet, sense));
        }
    }
    for roleset in grouping.split_whitespace() {
        cross_references.push(CrossReference::declared(CorpusKind::PropBank, roleset));
    }
    let fn_mapping = el.attr_or_empty("fn_mapping");
    for frame in fn_mapping.split(|c: char| c == ',' || c.is_whitespace()) {
        let frame = frame.trim().trim_start_matches('?');
        if !frame.is_empty() && frame != "-" && !frame.eq_ignore_ascii_case("none") {
            cross_references.push(CrossReference::declared(CorpusKind::FrameNet, frame));
        }
    }

    Member {
        name: el.attr_or_empty("name"),
        wn,
        grouping,
        features: el.attr_or_empty("features"),
        fn_mapping,
        verbnet_key: el.attr_or_empty("verbnet_key"),
        cross_references,
    }
}

/// `SELRESTRS`/`SYNRESTRS` block; nested blocks of the same tag become groups.
fn restrictions(el: Option<&Element>, item: &str) -> RestrictionSet {
    let Some(el) = el else {
        return RestrictionSet::default();
    };
    let mut set = RestrictionSet {
        logic: el.attr("logic").filter(|l| !l.is_empty()).map(str::to_string),
        ..RestrictionSet::default()
    };
    for child in &el.children {
        if child.name == item {
            set.restrictions.push(Restriction {
                value: child.attr_or_empty("Value"),
                restriction_type: child.attr_or_empty("type"),
            });
        } else if child.name == el.name {
            set.groups.push(restrictions(Some(child), item));
        }
    }
    set
}

fn parse_frame(el: &Element) -> Frame {
    let description = el
        .child("DESCRIPTION")
        .map(|d| FrameDescription {
            primary: d.attr_or_empty("primary"),
            secondary: d.attr_or_empty("secondary"),
            number: d.attr_or_empty("descriptionNumber"),
            tag: d.attr_or_empty("xtag"),
        })
        .unwrap_or_default();

    let examples = el
        .grandchildren("EXAMPLES", "EXAMPLE")
        .map(Element::deep_text)
        .filter(|text| !text.is_empty())
        .collect();

    let mut syntax = Vec::new();
    for child in el.child("SYNTAX").into_iter().flat_map(|s| s.children.iter()) {
        match SyntaxCategory::from_tag(&child.name) {
            Some(category) => syntax.push(SyntaxElement {
                category,
                value: child.attr_or_empty("value"),
                synrestrs: restrictions(child.child("SYNRESTRS"), "SYNRESTR"),
                selrestrs: restrictions(child.child("SELRESTRS"), "SELRESTR"),
            }),
            None => tracing::debug!(tag = %child.name, "ignoring unknown syntax element"),
        }
    }

    let semantics = el
        .grandchildren("SEMANTICS", "PRED")
        .map(|pred| SemanticPredicate {
            value: pred.attr_or_empty("value"),
            negated: pred.attr("bool") == Some("!"),
            args: pred
                .grandchildren("ARGS", "ARG")
                .map(|arg| PredicateArg {
                    arg_type: arg.attr_or_empty("type"),
                    value: arg.attr_or_empty("value"),
                })
                .collect(),
        })
        .collect();

    Frame {
        description,
        examples,
        syntax,
        semantics,
    }
}

/// Member name -> sorted, unique ids of the top-level classes that declare it
/// (directly or in a subclass).
pub fn member_index(classes: &BTreeMap<String, VerbClass>) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (id, class) in classes {
        for name in class.all_member_names() {
            index.entry(name.to_string()).or_default().push(id.clone());
        }
    }
    for ids in index.values_mut() {
        ids.sort();
        ids.dedup();
    }
    index
}

/// Leading numeric component of a class id: `13` for `give-13.1`.
pub fn class_number(id: &str) -> Option<&str> {
    let (_, rest) = id.split_once('-')?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

pub fn hierarchy(classes: &BTreeMap<String, VerbClass>) -> VerbNetHierarchy {
    let mut hierarchy = VerbNetHierarchy::default();
    for (id, class) in classes {
        class.visit(&mut |node| {
            if !node.subclasses.is_empty() {
                hierarchy.parent_child.insert(
                    node.id.clone(),
                    node.subclasses.iter().map(|s| s.id.clone()).collect(),
                );
            }
        });
        if let Some(number) = class_number(id) {
            hierarchy
                .by_number
                .entry(number.to_string())
                .or_default()
                .push(id.clone());
        }
        if let Some(first) = id.chars().next() {
            hierarchy
                .by_letter
                .entry(first.to_uppercase().to_string())
                .or_default()
                .push(id.clone());
        }
    }
    hierarchy
}
