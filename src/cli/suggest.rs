//! "Did you mean" suggestions for unknown commands.

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 3;
/// Largest edit distance still considered a typo.
pub const MAX_DISTANCE: usize = 2;

/// Levenshtein edit distance over characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Rolling row of the (|a|+1) x (|b|+1) table.
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        current[0] = i;
        for j in 1..=b.len() {
            current[j] = if a[i - 1] == b[j - 1] {
                previous[j - 1]
            } else {
                1 + previous[j - 1].min(current[j - 1]).min(previous[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Vocabulary entries resembling `token`, in vocabulary order, at most three.
///
/// An entry qualifies when either string contains the other or their edit
/// distance is at most [`MAX_DISTANCE`].
pub fn suggest<'a, I>(token: &str, vocabulary: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    vocabulary
        .into_iter()
        .filter(|entry| {
            entry.contains(token) || token.contains(entry) || levenshtein(token, entry) <= MAX_DISTANCE
        })
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}
