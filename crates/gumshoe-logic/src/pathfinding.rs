//! Shortest-path search over the case map.
//!
//! Breadth-first search, pure: no caches, no mutation. Ties between
//! equal-length paths resolve to the first path discovered, which follows
//! each room's adjacency order as declared in configuration.

use crate::map::{MansionMap, RoomId};
use std::collections::{HashSet, VecDeque};

/// Find a shortest path from `start` to `goal`, inclusive of both ends.
///
/// Returns `Some(vec![start])` when `start == goal`. Returns `None` when
/// `goal` cannot be reached — unreachable is an expected answer, not an
/// error.
pub fn find_path(map: &MansionMap, start: RoomId, goal: RoomId) -> Option<Vec<RoomId>> {
    if !map.has_room(start) || !map.has_room(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut visited = HashSet::new();
    let mut queue: VecDeque<(RoomId, Vec<RoomId>)> = VecDeque::new();
    visited.insert(start);
    queue.push_back((start, vec![start]));

    while let Some((current, path)) = queue.pop_front() {
        for &next in map.neighbors(current) {
            if next == goal {
                let mut result = path.clone();
                result.push(next);
                return Some(result);
            }
            if visited.insert(next) {
                let mut new_path = path.clone();
                new_path.push(next);
                queue.push_back((next, new_path));
            }
        }
    }

    None
}

/// Number of hops in a path returned by [`find_path`].
pub fn hop_count(path: &[RoomId]) -> usize {
    path.len().saturating_sub(1)
}
