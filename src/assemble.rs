//! Class assembly — fold each unit's node stream into class aggregates.
//!
//! Members attach to the most recent class of the *same* unit. The cursor
//! starts empty for every unit, so members whose class was documented in a
//! different file end up in the orphan report.

use crate::model::*;

/// Result of assembling every unit of a run.
#[derive(Debug, Default)]
pub struct Assembly {
    pub classes: ClassMap,
    pub orphans: OrphanReport,
}

/// Fold state threaded through one unit.
#[derive(Default)]
struct Cursor {
    current: Option<String>,
}

/// Assemble units in order. Duplicate class names: the last one wins and
/// members attached to the earlier aggregate are discarded with it.
pub fn assemble<I>(units: I) -> Assembly
where
    I: IntoIterator<Item = Vec<DocNode>>,
{
    units.into_iter().fold(Assembly::default(), |mut acc, nodes| {
        nodes
            .into_iter()
            .fold(Cursor::default(), |cursor, node| step(&mut acc, cursor, node));
        acc
    })
}

fn step(acc: &mut Assembly, cursor: Cursor, node: DocNode) -> Cursor {
    match node.kind {
        TagKind::Class => match node.name.clone() {
            Some(name) => {
                if acc.classes.contains_key(&name) {
                    tracing::debug!(class = %name, "class redefined, earlier definition replaced");
                }
                acc.classes
                    .insert(name.clone(), ClassAggregate::new(name.clone(), node));
                Cursor {
                    current: Some(name),
                }
            }
            None => {
                orphan(acc, &node);
                Cursor::default()
            }
        },
        TagKind::Cfg | TagKind::Property | TagKind::Method | TagKind::Event | TagKind::Param => {
            let target = match (&cursor.current, &node.name) {
                (Some(class), Some(_)) => acc.classes.get_mut(class),
                _ => None,
            };
            match target.and_then(|cls| cls.members_mut(node.kind)) {
                Some(list) => list.push(node),
                None => orphan(acc, &node),
            }
            cursor
        }
    }
}

fn orphan(acc: &mut Assembly, node: &DocNode) {
    acc.orphans.push(Orphan {
        kind: node.kind,
        name: node.name.clone(),
        line: node.line,
    });
}
