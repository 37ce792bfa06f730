//! Leadership hierarchy traversal.
//!
//! # Responsibility
//! - Derive each member's depth below a root leader from `leader_id` links.
//! - Count direct subordinates per member.
//!
//! # Invariants
//! - Roots are members without `leader_id`, at level 0.
//! - Traversal visits each member at most once, so `leader_id` cycles terminate.
//! - Members not reachable from any root (cycles, dangling leaders) are omitted.
//! - Output order is `faction_id ASC, level ASC, member_id ASC`.

use crate::model::member::{FactionId, MemberId};
use crate::model::report::HierarchyEntry;
use log::{debug, warn};
use std::collections::{HashMap, VecDeque};

/// One member row with its leader link, as loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberLink {
    pub member_id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub faction_id: FactionId,
    pub faction_name: String,
    pub leader_id: Option<MemberId>,
}

/// Ranks members breadth-first from every root.
///
/// The adjacency index (`leader_id -> direct subordinates`) is built once per
/// call and covers every link, so subordinate counts include members that
/// are themselves unreachable.
pub fn rank_members(links: Vec<MemberLink>) -> Vec<HierarchyEntry> {
    let total = links.len();

    let mut subordinates: HashMap<MemberId, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (index, link) in links.iter().enumerate() {
        match link.leader_id {
            Some(leader_id) => subordinates.entry(leader_id).or_default().push(index),
            None => roots.push(index),
        }
    }
    roots.sort_by_key(|&index| links[index].member_id);

    // A taken slot marks its member as visited.
    let mut slots: Vec<Option<MemberLink>> = links.into_iter().map(Some).collect();
    let mut queue: VecDeque<(usize, u32)> = roots.into_iter().map(|index| (index, 0)).collect();
    let mut ranked = Vec::with_capacity(total);

    while let Some((index, level)) = queue.pop_front() {
        let Some(link) = slots[index].take() else {
            continue;
        };

        let direct = subordinates
            .get(&link.member_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        for &child in direct {
            if slots[child].is_some() {
                queue.push_back((child, level + 1));
            }
        }

        ranked.push(HierarchyEntry {
            member_id: link.member_id,
            first_name: link.first_name,
            last_name: link.last_name,
            faction_id: link.faction_id,
            faction_name: link.faction_name,
            leader_id: link.leader_id,
            level,
            subordinates: direct.len(),
        });
    }

    let unreachable = total - ranked.len();
    if unreachable > 0 {
        let skipped: Vec<String> = slots
            .iter()
            .flatten()
            .map(|link| link.member_id.to_string())
            .collect();
        warn!(
            "event=hierarchy_rank module=hierarchy status=partial unreachable={unreachable} member_ids={}",
            skipped.join(",")
        );
    }
    debug!(
        "event=hierarchy_rank module=hierarchy status=ok members={total} ranked={}",
        ranked.len()
    );

    ranked.sort_by_key(|entry| (entry.faction_id, entry.level, entry.member_id));
    ranked
}
