//! Partial sorting and shuffling of rank arrays.

use std::cmp::Ordering;

use rand::Rng;

/// Sorts the `k` smallest elements of `items` into its front.
///
/// The elements after `k` are left in unspecified order. When `k` is at least
/// half of the length, the whole slice is sorted instead. With a total order
/// the prefix is identical to the prefix of a full sort.
pub fn partial_sort<T, F>(items: &mut [T], k: usize, mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if k.saturating_mul(2) >= len {
        items.sort_by(compare);
        return;
    }
    select(items, k, 0, len as isize - 1, &mut compare);
    items[..k].sort_by(compare);
}

/// Floyd–Rivest selection: rearranges `items[left..=right]` so that
/// `items[k]` is the element a full sort would put there, with no greater
/// element before it and no smaller one after it.
fn select<T, F>(items: &mut [T], k: usize, mut left: isize, mut right: isize, compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let k = k as isize;
    while right > left {
        if right - left > 600 {
            let n = (right - left + 1) as f64;
            let m = (k - left + 1) as f64;
            let z = n.ln();
            let s = 0.5 * (2.0 * z / 3.0).exp();
            let sign = if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 };
            let sd = 0.5 * (z * s * (n - s) / n).sqrt() * sign;
            let new_left = left.max((k as f64 - m * s / n + sd).floor() as isize);
            let new_right = right.min((k as f64 + (n - m) * s / n + sd).floor() as isize);
            select(items, k as usize, new_left, new_right, compare);
        }

        let pivot = items[k as usize];
        let mut i = left;
        let mut j = right;

        items.swap(left as usize, k as usize);
        if compare(&items[right as usize], &pivot) == Ordering::Greater {
            items.swap(left as usize, right as usize);
        }

        while i < j {
            items.swap(i as usize, j as usize);
            i += 1;
            j -= 1;
            while compare(&items[i as usize], &pivot) == Ordering::Less {
                i += 1;
            }
            while compare(&items[j as usize], &pivot) == Ordering::Greater {
                j -= 1;
            }
        }

        if compare(&items[left as usize], &pivot) == Ordering::Equal {
            items.swap(left as usize, j as usize);
        } else {
            j += 1;
            items.swap(j as usize, right as usize);
        }

        if j <= k {
            left = j + 1;
        }
        if k <= j {
            right = j - 1;
        }
    }
}

/// Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn by_value_then_index(values: &[u32]) -> impl Fn(&usize, &usize) -> Ordering + '_ {
        move |a, b| values[*a].cmp(&values[*b]).then(a.cmp(b))
    }

    #[test]
    fn prefix_matches_full_sort() {
        let mut rng = StdRng::seed_from_u64(11);
        for &(len, k) in &[(5000, 100), (1300, 7), (50, 3), (10_000, 1)] {
            let values: Vec<u32> = (0..len).map(|_| rng.gen_range(0..500)).collect();
            let mut full: Vec<usize> = (0..len).collect();
            full.sort_by(by_value_then_index(&values));

            let mut partial: Vec<usize> = (0..len).collect();
            partial_sort(&mut partial, k, by_value_then_index(&values));

            assert_eq!(&partial[..k], &full[..k], "len {} k {}", len, k);
        }
    }

    #[test]
    fn rest_holds_the_larger_elements() {
        let mut rng = StdRng::seed_from_u64(3);
        let values: Vec<u32> = (0..2000).map(|_| rng.gen_range(0..1_000_000)).collect();
        let mut order: Vec<usize> = (0..values.len()).collect();
        partial_sort(&mut order, 20, by_value_then_index(&values));

        let cutoff = values[order[19]];
        assert!(order[20..].iter().all(|&i| values[i] >= cutoff));
        let mut all = order.clone();
        all.sort_unstable();
        assert_eq!(all, (0..values.len()).collect::<Vec<_>>());
    }

    #[test]
    fn large_k_sorts_everything() {
        let values = [5, 3, 9, 1, 7, 2];
        let mut order: Vec<usize> = (0..values.len()).collect();
        partial_sort(&mut order, 3, by_value_then_index(&values));
        assert_eq!(order, vec![3, 5, 1, 0, 4, 2]);

        let mut empty: Vec<usize> = Vec::new();
        partial_sort(&mut empty, 10, by_value_then_index(&values));
        assert!(empty.is_empty());
    }

    #[test]
    fn shuffle_is_a_seeded_permutation() {
        let mut a: Vec<usize> = (0..100).collect();
        let mut b = a.clone();
        shuffle(&mut a, &mut StdRng::seed_from_u64(5));
        shuffle(&mut b, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
        assert_ne!(a, (0..100).collect::<Vec<_>>());

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
    }
}
