//! Initial bound selection

use crate::core::{Dictionary, Word};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Whether `top < secret < bottom`
#[must_use]
pub fn brackets(top: &Word, secret: &Word, bottom: &Word) -> bool {
    top < secret && secret < bottom
}

/// Pick random bounds around `secret` from the dictionary
///
/// The top word is drawn uniformly from words strictly before the secret and
/// the bottom word from words strictly after it. When either side is empty
/// the sentinel `aaaaa` or `zzzzz` is used instead. Different calls may
/// return different bounds for the same secret.
pub fn derive_bounds<R: Rng + ?Sized>(
    dictionary: &Dictionary,
    secret: &Word,
    rng: &mut R,
) -> (Word, Word) {
    let top = dictionary
        .before(secret)
        .choose(rng)
        .copied()
        .unwrap_or(Word::FLOOR);
    let bottom = dictionary
        .after(secret)
        .choose(rng)
        .copied()
        .unwrap_or(Word::CEILING);
    (top, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn w(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn derived_bounds_bracket_secret() {
        let dict = Dictionary::from_strs(&["apple", "mango", "peach", "table", "zebra"]);
        let secret = w("peach");
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let (top, bottom) = derive_bounds(&dict, &secret, &mut rng);
            assert!(top == "apple" || top == "mango");
            assert!(bottom == "table" || bottom == "zebra");
            assert!(brackets(&top, &secret, &bottom));
        }
    }

    #[test]
    fn derived_bounds_vary() {
        let dict = Dictionary::from_strs(&["apple", "mango", "peach", "table", "zebra"]);
        let secret = w("peach");
        let mut rng = StdRng::seed_from_u64(11);

        let tops: std::collections::HashSet<Word> = (0..64)
            .map(|_| derive_bounds(&dict, &secret, &mut rng).0)
            .collect();
        assert_eq!(tops.len(), 2);
    }

    #[test]
    fn sentinels_when_nothing_on_one_side() {
        let dict = Dictionary::from_strs(&["apple", "zebra"]);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            derive_bounds(&dict, &w("apple"), &mut rng),
            (Word::FLOOR, w("zebra"))
        );
        assert_eq!(
            derive_bounds(&dict, &w("zebra"), &mut rng),
            (w("apple"), Word::CEILING)
        );
    }

    #[test]
    fn secret_missing_from_dictionary_still_bracketed() {
        let dict = Dictionary::from_strs(&["apple", "zebra"]);
        let mut rng = StdRng::seed_from_u64(3);
        let secret = w("mango");
        let (top, bottom) = derive_bounds(&dict, &secret, &mut rng);
        assert!(brackets(&top, &secret, &bottom));
    }

    #[test]
    fn brackets_is_strict() {
        let peach = w("peach");
        assert!(!brackets(&peach, &peach, &w("zebra")));
        assert!(!brackets(&w("apple"), &peach, &peach));
    }
}
