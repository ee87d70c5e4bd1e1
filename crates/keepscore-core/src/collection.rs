// Generic helpers over ordered sequences: transforms, filters, quantifiers,
// sums, and tie-aware extremes.
//
// Every function borrows its input and never mutates it. An empty input is
// always a valid input.

use std::cmp::Ordering;
use std::iter::Sum;
use std::num::ParseIntError;

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

/// Treat a missing slice as an empty one.
pub fn null_to_empty<T>(items: Option<&[T]>) -> &[T] {
    items.unwrap_or(&[])
}

/// Apply `f` to every element, preserving order and length.
pub fn transform<E, T, F>(items: &[E], f: F) -> Vec<T>
where
    F: FnMut(&E) -> T,
{
    items.iter().map(f).collect()
}

/// Like [`transform`], but `f` also receives the element's position.
pub fn transform_with_index<E, T, F>(items: &[E], mut f: F) -> Vec<T>
where
    F: FnMut(&E, usize) -> T,
{
    items
        .iter()
        .enumerate()
        .map(|(index, item)| f(item, index))
        .collect()
}

/// Elements satisfying `predicate`, in their original relative order.
///
/// Returns references so callers can keep working with the original
/// elements rather than copies.
pub fn filter<'a, T, P>(items: &'a [T], mut predicate: P) -> Vec<&'a T>
where
    P: FnMut(&T) -> bool,
{
    items.iter().filter(|item| predicate(*item)).collect()
}

/// A copy of `items` in reverse order.
pub fn reversed_copy<T: Clone>(items: &[T]) -> Vec<T> {
    items.iter().rev().cloned().collect()
}

// ---------------------------------------------------------------------------
// Quantifiers
// ---------------------------------------------------------------------------

/// `true` when every element satisfies `predicate` (vacuously true when empty).
pub fn all<T, P>(items: &[T], mut predicate: P) -> bool
where
    P: FnMut(&T) -> bool,
{
    items.iter().all(|item| predicate(item))
}

/// `true` when at least one element satisfies `predicate`.
pub fn any<T, P>(items: &[T], mut predicate: P) -> bool
where
    P: FnMut(&T) -> bool,
{
    items.iter().any(|item| predicate(item))
}

// ---------------------------------------------------------------------------
// Sums and extremes
// ---------------------------------------------------------------------------

pub fn sum<T>(items: &[T]) -> T
where
    T: Copy + Sum<T>,
{
    items.iter().copied().sum()
}

pub fn sum_by<E, T, F>(items: &[E], f: F) -> T
where
    T: Sum<T>,
    F: FnMut(&E) -> T,
{
    items.iter().map(f).sum()
}

/// The greatest `f`-value across `items`, or `None` when `items` is empty.
///
/// Values are ordered by [`total_rank`].
pub fn max_value<E, T, F>(items: &[E], mut f: F) -> Option<T>
where
    T: PartialOrd,
    F: FnMut(&E) -> T,
{
    let mut max: Option<T> = None;
    for item in items {
        let value = f(item);
        if max
            .as_ref()
            .map_or(true, |current| total_rank(&value, current) == Ordering::Greater)
        {
            max = Some(value);
        }
    }
    max
}

/// The greatest of `default` and every `f`-value.
///
/// `default` seeds the comparison, so it is returned both for an empty input
/// and when no element exceeds it.
pub fn max_value_or<E, T, F>(items: &[E], mut f: F, default: T) -> T
where
    T: PartialOrd,
    F: FnMut(&E) -> T,
{
    let mut max = default;
    for item in items {
        let value = f(item);
        if total_rank(&value, &max) == Ordering::Greater {
            max = value;
        }
    }
    max
}

/// Every element whose `f`-value equals the maximum, in input order.
///
/// Callers rely on receiving the full tie set (e.g. all players sharing the
/// top score), not an arbitrary single winner. A non-empty input always
/// yields at least one element.
pub fn max_with_ties<E, T, F>(items: &[E], f: F) -> Vec<&E>
where
    T: PartialOrd,
    F: FnMut(&E) -> T,
{
    extremes_with_ties(items, f, Ordering::Greater)
}

/// Every element whose `f`-value equals the minimum, in input order.
pub fn min_with_ties<E, T, F>(items: &[E], f: F) -> Vec<&E>
where
    T: PartialOrd,
    F: FnMut(&E) -> T,
{
    extremes_with_ties(items, f, Ordering::Less)
}

/// Total order over a `PartialOrd` type.
///
/// A value that is not comparable with itself (a float NaN) ranks above
/// every other value and equal to any other such value. Two distinct values
/// that are mutually incomparable rank equal.
pub fn total_rank<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    if let Some(ordering) = a.partial_cmp(b) {
        return ordering;
    }
    let a_unordered = a.partial_cmp(a).is_none();
    let b_unordered = b.partial_cmp(b).is_none();
    match (a_unordered, b_unordered) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

fn extremes_with_ties<'a, E, T, F>(items: &'a [E], mut f: F, wins: Ordering) -> Vec<&'a E>
where
    T: PartialOrd,
    F: FnMut(&E) -> T,
{
    // Evaluate `f` once per element; it may be arbitrarily expensive.
    let scored: Vec<(&'a E, T)> = items.iter().map(|item| (item, f(item))).collect();

    let mut best: Option<&T> = None;
    for (_, value) in &scored {
        if best.map_or(true, |current| total_rank(value, current) == wins) {
            best = Some(value);
        }
    }

    let Some(best) = best else {
        return Vec::new();
    };

    scored
        .iter()
        .filter(|(_, value)| total_rank(value, best) == Ordering::Equal)
        .map(|(item, _)| *item)
        .collect()
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Parse each string as an `i64`, failing on the first malformed entry.
pub fn strings_to_longs<S: AsRef<str>>(items: &[S]) -> Result<Vec<i64>, ParseIntError> {
    items.iter().map(|s| s.as_ref().parse::<i64>()).collect()
}

/// Parse each string as an `i32`, failing on the first malformed entry.
pub fn strings_to_ints<S: AsRef<str>>(items: &[S]) -> Result<Vec<i32>, ParseIntError> {
    items.iter().map(|s| s.as_ref().parse::<i32>()).collect()
}

/// `g ∘ f`.
pub fn compose<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C
where
    F: Fn(A) -> B,
    G: Fn(B) -> C,
{
    move |value| g(f(value))
}

pub fn to_string_fn<T: ToString + ?Sized>() -> impl Fn(&T) -> String {
    |value: &T| value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Entry {
        label: &'static str,
        v: i64,
    }

    fn entry(label: &'static str, v: i64) -> Entry {
        Entry { label, v }
    }

    fn labels(items: &[&Entry]) -> Vec<&'static str> {
        items.iter().map(|e| e.label).collect()
    }

    #[test]
    fn transform_preserves_order_and_length() {
        let doubled = transform(&[1, 2, 3], |n| n * 2);
        assert_eq!(doubled, vec![2, 4, 6]);
        assert!(transform(&[] as &[i32], |n| n * 2).is_empty());
    }

    #[test]
    fn transform_with_index_passes_positions() {
        let indices = transform_with_index(&["A", "B", "C"], |_, i| i);
        assert_eq!(indices, vec![0, 1, 2]);

        let tagged = transform_with_index(&["x", "y"], |s, i| format!("{s}{i}"));
        assert_eq!(tagged, vec!["x0", "y1"]);
    }

    #[test]
    fn filter_keeps_matching_elements_in_order() {
        let evens = filter(&[1, 2, 3, 4], |n| n % 2 == 0);
        assert_eq!(evens, vec![&2, &4]);
    }

    #[test]
    fn filter_returns_the_original_elements() {
        let items = [entry("a", 1), entry("b", 2)];
        let kept = filter(&items, |e| e.v > 1);
        assert!(std::ptr::eq(kept[0], &items[1]));
    }

    #[test]
    fn all_and_any_on_empty_input() {
        let empty: [i32; 0] = [];
        assert!(all(&empty, |_| false));
        assert!(!any(&empty, |_| true));
    }

    #[test]
    fn all_and_any_short_circuit() {
        let mut calls = 0;
        assert!(!all(&[1, 2, 3], |n| {
            calls += 1;
            *n < 1
        }));
        assert_eq!(calls, 1);

        calls = 0;
        assert!(any(&[1, 2, 3], |n| {
            calls += 1;
            *n == 2
        }));
        assert_eq!(calls, 2);
    }

    #[test]
    fn sums_default_to_zero() {
        assert_eq!(sum(&[3, 4, 5]), 12);
        assert_eq!(sum::<i32>(&[]), 0);

        let items = [entry("a", 10), entry("b", -4)];
        assert_eq!(sum_by(&items, |e| e.v), 6);
        assert_eq!(sum_by(&[] as &[Entry], |e| e.v), 0);
    }

    #[test]
    fn max_value_none_when_empty() {
        assert_eq!(max_value(&[] as &[Entry], |e| e.v), None);
        let items = [entry("a", 3), entry("b", 9), entry("c", 1)];
        assert_eq!(max_value(&items, |e| e.v), Some(9));
    }

    #[test]
    fn max_value_or_treats_default_as_floor() {
        let items = [entry("a", 3), entry("b", 9)];
        assert_eq!(max_value_or(&items, |e| e.v, 0), 9);
        assert_eq!(max_value_or(&items, |e| e.v, 20), 20);
        assert_eq!(max_value_or(&[] as &[Entry], |e| e.v, -1), -1);
    }

    #[test]
    fn max_with_ties_returns_every_tied_element() {
        let items = [entry("first", 5), entry("middle", 3), entry("last", 5)];
        let winners = max_with_ties(&items, |e| e.v);
        assert_eq!(labels(&winners), vec!["first", "last"]);
    }

    #[test]
    fn min_with_ties_returns_every_tied_element() {
        let items = [entry("a", 2), entry("b", 2), entry("c", 7)];
        let losers = min_with_ties(&items, |e| e.v);
        assert_eq!(labels(&losers), vec!["a", "b"]);
    }

    #[test]
    fn ties_on_empty_and_single_inputs() {
        assert!(max_with_ties(&[] as &[Entry], |e| e.v).is_empty());
        let one = [entry("solo", 4)];
        assert_eq!(labels(&min_with_ties(&one, |e| e.v)), vec!["solo"]);
    }

    #[test]
    fn ties_work_for_floating_point_metrics() {
        let scores = [1.5_f64, 0.25, 1.5];
        assert_eq!(max_with_ties(&scores, |s| *s).len(), 2);
        assert_eq!(min_with_ties(&scores, |s| *s), vec![&0.25]);
    }

    #[test]
    fn nan_metrics_rank_above_numbers_and_tie_with_each_other() {
        let scores = [f64::NAN, 3.0, 5.0, 5.0];
        let top = max_with_ties(&scores, |s| *s);
        assert_eq!(top.len(), 1);
        assert!(top[0].is_nan());
        assert_eq!(min_with_ties(&scores, |s| *s), vec![&3.0]);
        assert!(max_value(&scores, |s| *s).unwrap().is_nan());

        let trailing = [3.0, f64::NAN, 5.0, f64::NAN];
        assert_eq!(max_with_ties(&trailing, |s| *s).len(), 2);
        assert_eq!(max_value(&[3.0, f64::NAN], |s| *s).map(f64::is_nan), Some(true));
        assert!(max_value_or(&[1.0], |s| *s, f64::NAN).is_nan());
    }

    #[test]
    fn total_rank_orders_nan_last() {
        assert_eq!(total_rank(&1.0, &2.0), Ordering::Less);
        assert_eq!(total_rank(&f64::NAN, &2.0), Ordering::Greater);
        assert_eq!(total_rank(&2.0, &f64::NAN), Ordering::Less);
        assert_eq!(total_rank(&f64::NAN, &f64::NAN), Ordering::Equal);
    }

    #[test]
    fn ties_evaluate_metric_once_per_element() {
        let mut calls = 0;
        let items = [1, 2, 3, 3];
        let top = max_with_ties(&items, |n| {
            calls += 1;
            *n
        });
        assert_eq!(top.len(), 2);
        assert_eq!(calls, items.len());
    }

    #[test]
    fn reversed_copy_leaves_input_untouched() {
        let items = vec![1, 2, 3];
        let reversed = reversed_copy(&items);
        assert_eq!(reversed, vec![3, 2, 1]);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn null_to_empty_substitutes_empty_slice() {
        assert!(null_to_empty::<i32>(None).is_empty());
        assert_eq!(null_to_empty(Some(&[1, 2][..])), &[1, 2]);
    }

    #[test]
    fn string_conversions() {
        assert_eq!(strings_to_longs(&["1", "-20", "9000000000"]).unwrap(), vec![1, -20, 9_000_000_000]);
        assert_eq!(strings_to_ints(&["7", "8"]).unwrap(), vec![7, 8]);
        assert!(strings_to_ints(&["7", "eight"]).is_err());
        assert!(strings_to_ints(&["9000000000"]).is_err());
    }

    #[test]
    fn compose_and_to_string_fn() {
        let digits = compose(|n: i64| n.abs(), |n: i64| n.to_string().len());
        assert_eq!(digits(-1234), 4);

        let rendered = transform(&[5_i64, -12], to_string_fn::<i64>());
        assert_eq!(rendered, vec!["5", "-12"]);
    }
}
