//! Allocation-free permutation of a small fixed-size array.

/// Calls `visit` once for every ordering of `items` (Heap's algorithm).
///
/// The array is permuted in place on the stack; the first ordering visited
/// is the input order.
pub fn for_each_permutation<T: Copy, const N: usize>(
    mut items: [T; N],
    mut visit: impl FnMut(&[T; N]),
) {
    let mut counters = [0usize; N];
    visit(&items);

    let mut i = 1;
    while i < N {
        if counters[i] < i {
            if i % 2 == 0 {
                items.swap(0, i);
            } else {
                items.swap(counters[i], i);
            }
            visit(&items);
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
}
