//! Positional list edits for unit and page ordering.
//!
//! Positions follow array `splice` rules: a position past the end appends,
//! a negative position counts back from the end and stops at 0. `None`
//! is treated like an undefined splice start and inserts at the front.

/// Resolve a requested position against a list of length `len`.
pub fn splice_index(len: usize, order: Option<i64>) -> usize {
    let Some(order) = order else {
        return 0;
    };

    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let index = if order < 0 {
        (len_i + order).max(0)
    } else {
        order.min(len_i)
    };

    usize::try_from(index).unwrap_or(len)
}

/// Insert `item` at the requested position and return the index used.
pub fn insert_at<T>(list: &mut Vec<T>, order: Option<i64>, item: T) -> usize {
    let index = splice_index(list.len(), order);
    list.insert(index, item);
    index
}

/// Remove and return the first element matching `pred`.
pub fn remove_first_by<T>(list: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> Option<T> {
    let index = list.iter().position(pred)?;
    Some(list.remove(index))
}

/// Remove the first occurrence of `item`. Returns whether one was found.
pub fn remove_first<T: PartialEq>(list: &mut Vec<T>, item: &T) -> bool {
    remove_first_by(list, |x| x == item).is_some()
}

/// Move `item` to the requested position.
///
/// A previous occurrence is removed first, so the item ends up in the list
/// exactly once. The position is resolved against the list after removal.
pub fn reposition<T: PartialEq>(list: &mut Vec<T>, item: T, order: Option<i64>) -> usize {
    remove_first(list, &item);
    insert_at(list, order, item)
}
