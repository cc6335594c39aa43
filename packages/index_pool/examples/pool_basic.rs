//! Basic usage of the `index_pool` crate:
//!
//! * Creating a pool.
//! * Adding items and linking them together by index.
//! * Retrieving and modifying items.
//! * Removing items.

use index_pool::{IndexPool, NULL_INDEX};

/// A singly linked chain node that references its successor by pool index.
/// `NULL_INDEX` means "no successor" - no `Option` needed.
#[derive(Debug, Default)]
struct Node {
    label: String,
    next: usize,
}

fn main() {
    let mut pool = IndexPool::<Node>::new();

    // Build a three-node chain back to front. Each insert returns an index that
    // stays valid no matter how much the pool grows afterwards.
    let tail = pool.insert(Node {
        label: "tail".to_string(),
        next: NULL_INDEX,
    });
    let middle = pool.insert(Node {
        label: "middle".to_string(),
        next: tail,
    });
    let head = pool.insert(Node {
        label: "head".to_string(),
        next: middle,
    });

    println!(
        "Pool holds {} nodes with an auto-adjusting capacity of {}",
        pool.len(),
        pool.capacity()
    );

    // Walk the chain through the indexes stored in the nodes themselves.
    let mut cursor = head;
    while cursor != NULL_INDEX {
        let node = pool.get(cursor);
        println!("Visited node: {}", node.label);
        cursor = node.next;
    }

    // Items can be modified in place.
    pool.get_mut(middle).label.push_str(" (renamed)");
    println!("Modified node: {}", pool[middle].label);

    // Unlink and remove the middle node. Its index may be reused by a later
    // insert, so we clear our reference to it.
    pool.get_mut(head).next = tail;
    let removed = pool.remove(middle);
    println!("Removed node: {}", removed.label);

    println!(
        "Pool now holds {} nodes; middle index still live: {}",
        pool.len(),
        pool.contains(middle)
    );
}
