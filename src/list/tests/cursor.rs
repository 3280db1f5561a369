extern crate std;

use std::vec;
use std::vec::Vec;

use crate::error::ListError;
use crate::list::list::List;

fn list_of(values: &[i32]) -> List<i32> {
    let mut list = List::new().unwrap();
    for &value in values {
        list.try_push_back(value).unwrap();
    }
    list
}

fn collect(list: &List<i32>) -> Vec<i32> {
    list.iter().copied().collect()
}

#[test]
fn test_begin_equals_end_on_empty() {
    let list = List::<i32>::new().unwrap();
    assert_eq!(list.begin(), list.end());
    assert_eq!(list.rbegin(), list.rend());
}

#[test]
fn test_forward_traversal() {
    let list = list_of(&[1, 2, 3]);
    let mut values = Vec::new();

    let mut it = list.begin();
    while it != list.end() {
        values.push(*list.at(it).unwrap());
        list.increment(&mut it);
    }

    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn test_reverse_traversal() {
    let list = list_of(&[1, 2, 3]);
    let mut values = Vec::new();

    let mut it = list.rbegin();
    while it != list.rend() {
        values.push(*list.rat(it).unwrap());
        list.rincrement(&mut it);
    }

    assert_eq!(values, vec![3, 2, 1]);
}

#[test]
fn test_movement_is_bounded() {
    let list = list_of(&[1, 2]);

    // Forward: refuse to move past end or before begin.
    let end = list.end();
    assert_eq!(list.next(end), end);
    let begin = list.begin();
    assert_eq!(list.previous(begin), begin);

    let mut it = list.end();
    assert!(!list.increment(&mut it));
    let mut it = list.begin();
    assert!(!list.decrement(&mut it));

    // Moving back from end reaches the last element.
    let last = list.previous(list.end());
    assert_eq!(list.at(last), Some(&2));

    // Reverse mirrors the same bounds.
    let rend = list.rend();
    assert_eq!(list.rnext(rend), rend);
    let rbegin = list.rbegin();
    assert_eq!(list.rprevious(rbegin), rbegin);

    let mut it = list.rend();
    assert!(!list.rincrement(&mut it));
    let mut it = list.rbegin();
    assert!(!list.rdecrement(&mut it));
}

#[test]
fn test_single_element_increment_reaches_end() {
    let list = list_of(&[42]);
    let mut it = list.begin();
    assert!(list.increment(&mut it));
    assert_eq!(it, list.end());
}

#[test]
fn test_at_refuses_end() {
    let list = list_of(&[1]);
    assert!(list.at(list.end()).is_none());
    assert!(list.rat(list.rend()).is_none());
}

#[test]
fn test_at_mut_writes_through() {
    let mut list = list_of(&[1, 2]);
    let it = list.next(list.begin());
    *list.at_mut(it).unwrap() = 20;
    assert_eq!(collect(&list), vec![1, 20]);
}

#[test]
fn test_push_at_rebinds_cursor_backward() {
    let mut list = list_of(&[1, 5]);

    // Cursor on the 5; each push lands before it and captures the cursor.
    let mut it = list.next(list.begin());
    list.try_push_at(&mut it, 4).unwrap();
    assert_eq!(list.at(it), Some(&4));
    list.try_push_at(&mut it, 3).unwrap();
    assert_eq!(list.at(it), Some(&3));

    assert_eq!(collect(&list), vec![1, 3, 4, 5]);
    assert_eq!(list.len(), 4);
}

#[test]
fn test_push_at_end_appends() {
    let mut list = list_of(&[1, 2]);
    let mut it = list.end();
    list.try_push_at(&mut it, 3).unwrap();
    assert_eq!(collect(&list), vec![1, 2, 3]);
    assert_eq!(list.at(it), Some(&3));
}

#[test]
fn test_rpush_at_splices_after() {
    let mut list = list_of(&[1, 3]);

    // Reverse cursor on the 1; the new node lands after it.
    let mut it = list.rnext(list.rbegin());
    assert_eq!(list.rat(it), Some(&1));
    list.try_rpush_at(&mut it, 2).unwrap();

    assert_eq!(collect(&list), vec![1, 2, 3]);
    assert_eq!(list.rat(it), Some(&2));
}

#[test]
fn test_rpush_at_rend_prepends() {
    let mut list = list_of(&[2, 3]);
    let mut it = list.rend();
    list.try_rpush_at(&mut it, 1).unwrap();
    assert_eq!(collect(&list), vec![1, 2, 3]);
}

#[test]
fn test_pop_at_advances_to_successor() {
    let mut list = list_of(&[1, 2, 3]);

    let mut it = list.next(list.begin());
    assert_eq!(list.pop_at(&mut it), Some(2));
    assert_eq!(list.at(it), Some(&3));
    assert_eq!(collect(&list), vec![1, 3]);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_pop_at_last_leaves_cursor_at_end() {
    let mut list = list_of(&[1, 2]);
    let mut it = list.previous(list.end());
    assert_eq!(list.pop_at(&mut it), Some(2));
    assert_eq!(it, list.end());
}

#[test]
fn test_pop_at_refuses_end() {
    let mut list = list_of(&[1]);
    let mut it = list.end();
    assert_eq!(list.pop_at(&mut it), None);
    assert_eq!(list.len(), 1);
}

#[test]
fn test_rpop_at_advances_to_predecessor() {
    let mut list = list_of(&[1, 2, 3]);

    let mut it = list.rnext(list.rbegin());
    assert_eq!(list.rat(it), Some(&2));
    assert_eq!(list.rpop_at(&mut it), Some(2));
    assert_eq!(list.rat(it), Some(&1));
    assert_eq!(collect(&list), vec![1, 3]);
}

#[test]
fn test_stale_cursor_is_refused() {
    let mut list = list_of(&[1, 2, 3]);

    let stale = list.begin();
    assert_eq!(list.pop_front(), Some(1));

    assert!(list.at(stale).is_none());
    let mut it = stale;
    assert!(!list.increment(&mut it));
    assert_eq!(list.pop_at(&mut it), None);
    let mut other = list.begin();
    assert!(!list.swap(&mut it, &mut other));
    assert_eq!(
        list.try_push_at(&mut it, 9).unwrap_err(),
        ListError::InvalidCursor
    );
    assert_eq!(collect(&list), vec![2, 3]);
}

#[test]
fn test_stale_cursor_survives_slot_reuse() {
    let mut list = list_of(&[1]);

    let stale = list.begin();
    assert_eq!(list.pop_front(), Some(1));
    // The freed slot is reused for the new node with a fresh generation.
    list.try_push_back(2).unwrap();

    assert!(list.at(stale).is_none());
    assert_eq!(list.at(list.begin()), Some(&2));
}

#[test]
fn test_insert_before_moves_and_rebinds() {
    let mut list = list_of(&[1, 2, 3, 4]);

    let mut position = list.begin();
    let mut element = list.next(list.next(list.begin()));
    assert_eq!(list.at(element), Some(&3));

    assert!(list.insert_before(&mut position, &mut element));
    assert_eq!(collect(&list), vec![3, 1, 2, 4]);
    // `position` follows the moved node, `element` its former successor.
    assert_eq!(list.at(position), Some(&3));
    assert_eq!(list.at(element), Some(&4));
    assert_eq!(list.len(), 4);
}

#[test]
fn test_insert_before_refusals() {
    let mut list = list_of(&[1, 2]);

    // The sentinel cannot be relocated.
    let mut position = list.begin();
    let mut element = list.end();
    assert!(!list.insert_before(&mut position, &mut element));

    // Both cursors on the same node.
    let mut position = list.begin();
    let mut element = list.begin();
    assert!(!list.insert_before(&mut position, &mut element));

    assert_eq!(collect(&list), vec![1, 2]);
}

#[test]
fn test_insert_before_single_pass_partition() {
    let mut list = list_of(&[9, 1, 8, 2]);

    // Move every element above 5 to the back in one pass; the first moved
    // node becomes the barrier the scan stops at.
    let mut position = list.end();
    let mut element = list.begin();
    while element != position {
        if list.at(element).is_some_and(|v| *v > 5) {
            assert!(list.insert_before(&mut position, &mut element));
        } else {
            list.increment(&mut element);
        }
    }

    assert_eq!(collect(&list), vec![1, 2, 8, 9]);
}

#[test]
fn test_swap_non_adjacent() {
    let mut list = list_of(&[1, 2, 3, 4, 5]);

    let mut a = list.next(list.begin());
    let mut b = list.previous(list.previous(list.end()));
    assert_eq!(list.at(a), Some(&2));
    assert_eq!(list.at(b), Some(&4));

    assert!(list.swap(&mut a, &mut b));
    assert_eq!(collect(&list), vec![1, 4, 3, 2, 5]);
}

#[test]
fn test_swap_adjacent_both_orders() {
    let mut list = list_of(&[1, 2, 3]);
    let mut a = list.next(list.begin());
    let mut b = list.next(a);
    assert!(list.swap(&mut a, &mut b));
    assert_eq!(collect(&list), vec![1, 3, 2]);

    let mut list = list_of(&[1, 2, 3]);
    let mut a = list.next(list.begin());
    let mut b = list.begin();
    assert!(list.swap(&mut a, &mut b));
    assert_eq!(collect(&list), vec![2, 1, 3]);
}

#[test]
fn test_swap_same_node_is_noop() {
    let mut list = list_of(&[1, 2]);
    let mut a = list.begin();
    let mut b = list.begin();
    assert!(list.swap(&mut a, &mut b));
    assert_eq!(collect(&list), vec![1, 2]);
}

#[test]
fn test_swap_refuses_sentinel() {
    let mut list = list_of(&[1, 2]);
    let mut a = list.begin();
    let mut b = list.end();
    assert!(!list.swap(&mut a, &mut b));
    assert_eq!(collect(&list), vec![1, 2]);
}

#[test]
fn test_swap_cursor_rebinding() {
    let mut list = list_of(&[1, 2, 3, 4]);

    let mut a = list.begin();
    let mut b = list.previous(list.end());
    let element_a = a;
    let element_b = b;

    assert!(list.swap(&mut a, &mut b));
    assert_eq!(collect(&list), vec![4, 2, 3, 1]);

    // The passed cursors were exchanged: they keep their chain positions.
    assert_eq!(list.at(a), Some(&4));
    assert_eq!(list.at(b), Some(&1));
    // Retained copies keep following their elements to the new positions.
    assert_eq!(list.at(element_a), Some(&1));
    assert_eq!(list.at(element_b), Some(&4));
}

#[test]
fn test_swap_twice_restores() {
    let mut list = list_of(&[1, 2, 3, 4]);

    let mut a = list.next(list.begin());
    let mut b = list.previous(list.end());
    let original_a = a;

    assert!(list.swap(&mut a, &mut b));
    assert!(list.swap(&mut a, &mut b));

    assert_eq!(collect(&list), vec![1, 2, 3, 4]);
    assert_eq!(list.at(a), Some(&2));
    assert_eq!(a, original_a);
}
