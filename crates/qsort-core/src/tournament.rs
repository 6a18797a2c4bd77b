//! Tournament engine: pairing, history, termination, final ranking.
//!
//! Pure in-memory computation — no suspension points, no awaits. All
//! randomness goes through the engine's own PRNG so that pairing stays
//! reproducible across a run given a fixed seed.

use std::collections::{BTreeMap, HashMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{CoreError, Result};
use crate::model::{Item, MatchRequest, PairKey};
use crate::participant::Participant;

/// Swiss-system, multi-elimination tournament engine.
pub struct TournamentEngine {
    participants: HashMap<Item, Participant>,
    /// Original registration order; used as the stable secondary sort key
    /// so that ranking and bracket iteration stay deterministic.
    order: Vec<Item>,
    elimination_count: u32,
    history: HashSet<PairKey>,
    rng: StdRng,
    round_counter: u32,
}

impl TournamentEngine {
    /// Create one participant per item. Fails on empty/duplicate items or
    /// an `elimination_count` below 1.
    pub fn init(items: Vec<Item>, elimination_count: u32, seed: Option<u64>) -> Result<Self> {
        if items.is_empty() {
            return Err(CoreError::EmptyItems);
        }
        if elimination_count < 1 {
            return Err(CoreError::InvalidEliminationCount(elimination_count));
        }

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.clone()) {
                return Err(CoreError::DuplicateItem(item.as_str().to_string()));
            }
        }

        let mut participants = HashMap::with_capacity(items.len());
        for item in &items {
            participants.insert(item.clone(), Participant::new(item.clone()));
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            participants,
            order: items,
            elimination_count,
            history: HashSet::new(),
            rng,
            round_counter: 0,
        })
    }

    /// Active (non-eliminated) items, in stable registration order.
    fn active_items(&self) -> Vec<Item> {
        self.order
            .iter()
            .filter(|item| !self.participants[*item].is_eliminated(self.elimination_count))
            .cloned()
            .collect()
    }

    /// True iff fewer than two active participants remain.
    pub fn is_complete(&self) -> bool {
        self.active_items().len() < 2
    }

    /// Propose the next batch of disjoint pairs. May be empty when complete
    /// or when every active participant has already faced everyone else in
    /// their loss bracket (a deadlock; the caller is responsible for
    /// detecting an empty, non-complete batch and ending the run).
    pub fn get_next_matches(&mut self) -> Vec<MatchRequest> {
        self.round_counter += 1;
        let round = self.round_counter;

        if self.is_complete() {
            return Vec::new();
        }

        let mut brackets: BTreeMap<u32, Vec<Item>> = BTreeMap::new();
        for item in self.active_items() {
            let losses = self.participants[&item].losses;
            brackets.entry(losses).or_default().push(item);
        }

        let mut carry: Vec<Item> = Vec::new();
        let mut pairs: Vec<(Item, Item)> = Vec::new();

        for (_losses, members) in brackets {
            let mut working = carry;
            working.extend(members);
            working.shuffle(&mut self.rng);

            let (bracket_pairs, leftover) = pair_bracket(working, &self.history);
            pairs.extend(bracket_pairs);
            carry = leftover;
        }

        // `carry` now holds anyone who could not be paired in this round at
        // all; they sit out and wait for a later round.
        pairs
            .into_iter()
            .map(|(a, b)| MatchRequest::new(a, b, round))
            .collect()
    }

    /// Record the outcome of a match, mutating win/loss counters and
    /// extending the pair-uniqueness history.
    pub fn record_match_result(&mut self, a: &Item, b: &Item, winner: Option<&Item>) -> Result<()> {
        if !self.participants.contains_key(a) || !self.participants.contains_key(b) {
            tracing::error!(?a, ?b, "record_match_result referenced an unknown item");
            return Err(CoreError::InvariantViolation(
                "record_match_result referenced an unknown item".into(),
            ));
        }
        if a == b {
            tracing::error!(?a, "record_match_result called with identical items");
            return Err(CoreError::InvariantViolation(
                "record_match_result called with identical items".into(),
            ));
        }

        if let Some(winner) = winner {
            if winner != a && winner != b {
                tracing::error!(?winner, ?a, ?b, "winner is not one of the two items in the match");
                return Err(CoreError::InvariantViolation(
                    "winner is not one of the two items in the match".into(),
                ));
            }
            let loser = if winner == a { b } else { a };
            self.participants.get_mut(winner).unwrap().record_win();
            self.participants.get_mut(loser).unwrap().record_loss();
        }

        self.history.insert(PairKey::new(a, b));
        Ok(())
    }

    /// Competition ranking: descending wins, dense-skip ties. Valid to call
    /// at any time, but only meaningful once `is_complete()`.
    pub fn get_rankings(&self) -> Vec<(u32, Vec<Item>)> {
        let mut ordered: Vec<&Participant> = self
            .order
            .iter()
            .map(|item| &self.participants[item])
            .collect();
        ordered.sort_by(|a, b| b.wins.cmp(&a.wins));

        let mut rankings = Vec::new();
        let mut processed: u32 = 0;
        let mut i = 0usize;
        while i < ordered.len() {
            let wins = ordered[i].wins;
            let mut group = Vec::new();
            while i < ordered.len() && ordered[i].wins == wins {
                group.push(ordered[i].item.clone());
                i += 1;
            }
            let rank = processed + 1;
            processed += group.len() as u32;
            rankings.push((rank, group));
        }
        rankings
    }

    pub fn elimination_count(&self) -> u32 {
        self.elimination_count
    }

    pub fn participant_count(&self) -> usize {
        self.order.len()
    }
}

/// Greedily pair a shuffled working list, rejecting pairs already present
/// in `history`. Returns the pairs formed and the leftover that could not
/// be paired (at most a handful, typically 0 or 1).
///
/// This does not attempt a globally-optimal matching (e.g. blossom
/// algorithm) — a greedy rejection scheme is sufficient at the input
/// sizes this engine targets.
fn pair_bracket(
    mut remaining: Vec<Item>,
    history: &HashSet<PairKey>,
) -> (Vec<(Item, Item)>, Vec<Item>) {
    let mut pairs = Vec::new();
    let mut carry = Vec::new();

    while !remaining.is_empty() {
        let first = remaining.remove(0);
        if remaining.is_empty() {
            carry.push(first);
            break;
        }

        let partner_index = remaining
            .iter()
            .position(|candidate| !history.contains(&PairKey::new(&first, candidate)));

        match partner_index {
            Some(j) => {
                let second = remaining.remove(j);
                pairs.push((first, second));
            }
            None => carry.push(first),
        }
    }

    (pairs, carry)
}
