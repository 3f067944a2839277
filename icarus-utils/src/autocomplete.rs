use std::cmp::Ordering;

/// Keep the terms whose key contains `filter`, best matches first.
///
/// Matching ignores case. Keys that start with the filter rank ahead of keys
/// that merely contain it; within each rank keys are ordered alphabetically,
/// case-insensitively. An empty filter keeps every term.
pub fn autocomplete_sort<K, V>(filter: &str, terms: impl IntoIterator<Item = (K, V)>) -> Vec<(K, V)>
where
    K: AsRef<str>,
{
    let filter = filter.to_lowercase();

    let mut ranked: Vec<(bool, String, (K, V))> = terms
        .into_iter()
        .filter_map(|term| {
            let key = term.0.as_ref().to_lowercase();
            key.contains(&filter)
                .then(|| (key.starts_with(&filter), key, term))
        })
        .collect();

    ranked.sort_by(|(a_starts, a_key, a), (b_starts, b_key, b)| {
        b_starts
            .cmp(a_starts)
            .then_with(|| a_key.cmp(b_key))
            .then_with(|| compare_raw(&a.0, &b.0))
    });

    ranked.into_iter().map(|(_, _, term)| term).collect()
}

fn compare_raw<K: AsRef<str>>(a: &K, b: &K) -> Ordering {
    a.as_ref().cmp(b.as_ref())
}
