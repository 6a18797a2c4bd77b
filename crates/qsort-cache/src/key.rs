//! Order-sensitive cache key.
//!
//! The key is a SHA-256 hex digest of `(first, second, criteria)` where
//! `first`/`second` are already resolved to presentation order by the
//! caller. Resolving a presentation order against an unordered item pair
//! to get `(first, second)` is what makes `(A,B,"AB")` and `(B,A,"BA")`
//! collapse onto the same key (both present `A` first) while `(A,B,"AB")`
//! and `(A,B,"BA")` diverge (first differs).

use sha2::{Digest, Sha256};

use qsort_core::Item;

/// ASCII unit separator — vanishingly unlikely to appear in judged text,
/// and distinct from the `|`/`:` a caller's item text might contain.
const FIELD_SEPARATOR: char = '\u{1F}';

/// Opaque, stable identifier for one presentation-ordered comparison
/// question.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `first`/`second` are the items in the order they are presented to
    /// the judge; `criteria` is the rubric text.
    pub fn compute(first: &Item, second: &Item, criteria: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(first.as_str().as_bytes());
        hasher.update(FIELD_SEPARATOR.to_string().as_bytes());
        hasher.update(second.as_str().as_bytes());
        hasher.update(FIELD_SEPARATOR.to_string().as_bytes());
        hasher.update(criteria.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsort_core::PresentationOrder;

    /// Mirrors how the match runner picks `(first, second)` for a round.
    fn resolve<'a>(item_a: &'a Item, item_b: &'a Item, order: PresentationOrder) -> (&'a Item, &'a Item) {
        match order {
            PresentationOrder::Ab => (item_a, item_b),
            PresentationOrder::Ba => (item_b, item_a),
        }
    }

    #[test]
    fn swapped_items_with_matching_presentation_share_a_key() {
        // (item_a=A, item_b=B, order=AB) and (item_a=B, item_b=A, order=BA)
        // both resolve to first=A, second=B — the same physical question —
        // and so must hash to the same key.
        let a = Item::new("a");
        let b = Item::new("b");

        let (first, second) = resolve(&a, &b, PresentationOrder::Ab);
        let from_ab = CacheKey::compute(first, second, "max");

        let (first, second) = resolve(&b, &a, PresentationOrder::Ba);
        let from_ba = CacheKey::compute(first, second, "max");

        assert_eq!(from_ab, from_ba);
    }

    #[test]
    fn flipped_presentation_order_has_a_different_key() {
        // (item_a=A, item_b=B, order=AB) and (item_a=A, item_b=B, order=BA)
        // are different questions (who is shown first differs) and must
        // not share a key.
        let a = Item::new("a");
        let b = Item::new("b");

        let (first, second) = resolve(&a, &b, PresentationOrder::Ab);
        let ab = CacheKey::compute(first, second, "max");

        let (first, second) = resolve(&a, &b, PresentationOrder::Ba);
        let ba = CacheKey::compute(first, second, "max");

        assert_ne!(ab, ba);
    }

    #[test]
    fn differing_criteria_has_different_key() {
        let a = Item::new("a");
        let b = Item::new("b");
        let k1 = CacheKey::compute(&a, &b, "max");
        let k2 = CacheKey::compute(&a, &b, "min");
        assert_ne!(k1, k2);
    }
}
