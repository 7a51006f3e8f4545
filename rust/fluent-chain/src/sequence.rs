//! Element-matching algorithms shared by the collection assertions.
//!
//! Every function takes the comparison as a closure so that the same code serves plain
//! equality, borrowed elements and structural equivalence.

/// What is left of two multisets once every matching pair has been removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Difference<'e, 'a, E, A> {
    /// Expected values without a partner in the actual sequence.
    pub missing: Vec<&'e E>,
    /// Actual values without a partner in the expected sequence.
    pub excess: Vec<&'a A>,
}

impl<E, A> Difference<'_, '_, E, A> {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.excess.is_empty()
    }
}

/// Pairwise removal of matching elements. Duplicates count: `[1, 1, 2]` against `[1, 2]`
/// leaves one `1` in excess.
pub fn multiset_difference<'e, 'a, E, A, F>(expected: &'e [E], actual: &'a [A], matches: F) -> Difference<'e, 'a, E, A>
where F: Fn(&A, &E) -> bool {
    let mut excess: Vec<&A> = actual.iter().collect();
    let mut missing = vec![];

    for e in expected {
        match excess.iter().position(|a| matches(a, e)) {
            Some(i) => {
                excess.remove(i);
            },
            None => missing.push(e),
        }
    }

    Difference { missing, excess }
}

/// Expected values that have no match anywhere in `actual`.
pub fn missing_values<'e, E, A, F>(expected: &'e [E], actual: &[A], matches: F) -> Vec<&'e E>
where F: Fn(&A, &E) -> bool {
    expected.iter().filter(|e| !actual.iter().any(|a| matches(a, e))).collect()
}

/// Expected values that do have a match in `actual`.
pub fn present_values<'e, E, A, F>(expected: &'e [E], actual: &[A], matches: F) -> Vec<&'e E>
where F: Fn(&A, &E) -> bool {
    expected.iter().filter(|e| actual.iter().any(|a| matches(a, e))).collect()
}

/// Distinct actual values that match none of `allowed`.
pub fn unexpected_values<'a, E, A, F>(actual: &'a [A], allowed: &[E], matches: F) -> Vec<&'a A>
where
    A: PartialEq,
    F: Fn(&A, &E) -> bool,
{
    let mut unexpected: Vec<&A> = vec![];

    for a in actual {
        if !allowed.iter().any(|e| matches(a, e)) && !unexpected.contains(&a) {
            unexpected.push(a);
        }
    }

    unexpected
}

/// Position of the first element where `actual` and `expected` stop agreeing, or `None` when
/// they are equal element by element. A sequence that is a strict prefix of the other
/// disagrees at its own length.
pub fn first_mismatch<E, A, F>(actual: &[A], expected: &[E], matches: F) -> Option<usize>
where F: Fn(&A, &E) -> bool {
    let common = actual.len().min(expected.len());

    (0..common)
        .find(|&i| !matches(&actual[i], &expected[i]))
        .or_else(|| (actual.len() != expected.len()).then_some(common))
}

/// Start index of the first contiguous run of `haystack` equal to `needle`.
///
/// Every start position is tried, so `[1, 1, 2]` contains `[1, 2]` at index 1. The empty
/// needle is found at index 0.
pub fn index_of_sequence<E, A, F>(haystack: &[A], needle: &[E], matches: F) -> Option<usize>
where F: Fn(&A, &E) -> bool {
    if needle.len() > haystack.len() {
        return None;
    }

    (0..=haystack.len() - needle.len())
        .find(|&start| needle.iter().enumerate().all(|(i, e)| matches(&haystack[start + i], e)))
}

/// Whether `needle` occurs in `haystack` in the same relative order, other elements allowed
/// in between.
pub fn is_interleaved_subsequence<E, A, F>(haystack: &[A], needle: &[E], matches: F) -> bool
where F: Fn(&A, &E) -> bool {
    let mut cursor = needle.iter().peekable();

    for a in haystack {
        match cursor.peek() {
            Some(e) if matches(a, e) => {
                cursor.next();
            },
            Some(_) => {},
            None => break,
        }
    }

    cursor.peek().is_none()
}

/// Distinct values occurring more than once, in order of first occurrence.
pub fn duplicates<T: PartialEq>(items: &[T]) -> Vec<&T> {
    let mut duplicated: Vec<&T> = vec![];

    for (i, item) in items.iter().enumerate() {
        if items[..i].contains(item) && !duplicated.contains(&item) {
            duplicated.push(item);
        }
    }

    duplicated
}
