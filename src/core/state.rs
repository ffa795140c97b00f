//! Game state: piles, seats, marks, bounties, and the turn cursor.
//!
//! ## GameState
//!
//! One value per match, mutated in place by the rules. It owns:
//! - Draw pile (top = back) and discard pile
//! - Four players with hand, bank, mark, aliveness and knowledge
//! - The extra mark, active bounties, pending skips
//! - Current seat and in-turn action counter
//! - The match's RNG
//!
//! Piles are `im` vectors, so `clone_state` is cheap enough to branch on
//! every candidate move during lookahead.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::RulesConfig;
use super::error::InvariantError;
use super::player::{Holder, Mark, Player, PlayerId, MARK_COUNT, SEATS};
use super::rng::GameRng;
use crate::cards::{Card, DECK_SIZE};

/// A claimed bounty waiting to be invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounty {
    /// The mark this bounty bets on.
    pub icon: Mark,
    /// Action cycles left before it can be invoked.
    pub countdown: u8,
}

impl Bounty {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.countdown == 0
    }
}

/// Complete state of one match.
#[derive(Clone, Debug)]
pub struct GameState {
    pub draw_pile: Vector<Card>,
    pub discard_pile: Vector<Card>,
    pub players: [Player; SEATS],
    /// Marks not yet dealt. Only non-empty during setup.
    pub unused_marks: SmallVec<[Mark; MARK_COUNT]>,
    pub extra_mark: Mark,
    pub bounties: Vec<Bounty>,
    /// Seats that lose their next turn, in the order they were tied up.
    pub skips: Vec<PlayerId>,
    pub current: PlayerId,
    /// Actions taken this turn. Insomnia can push it below zero.
    pub actions: i8,
    pub rules: RulesConfig,
    pub rng: GameRng,
}

impl GameState {
    /// Deal a new match with the default rules.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rules(RulesConfig::default(), GameRng::new(seed))
    }

    /// Deal a new match.
    ///
    /// Shuffles the deck and the five marks, gives one mark to each seat,
    /// keeps the fifth as the extra mark, and deals `starting_hand` cards
    /// to every seat.
    #[must_use]
    pub fn with_rules(rules: RulesConfig, mut rng: GameRng) -> Self {
        let mut deck: Vec<Card> = Card::deck().collect();
        rng.shuffle(&mut deck);

        let mut marks: [Mark; MARK_COUNT] = std::array::from_fn(|i| Mark::new(i as u8));
        rng.shuffle(&mut marks);

        let mut draw_pile: Vector<Card> = deck.into_iter().collect();
        let players = std::array::from_fn(|seat| {
            let mut player = Player::new(marks[seat]);
            for _ in 0..rules.starting_hand {
                if let Some(card) = draw_pile.pop_back() {
                    player.hand.push(card);
                }
            }
            player
        });

        Self {
            draw_pile,
            discard_pile: Vector::new(),
            players,
            unused_marks: SmallVec::new(),
            extra_mark: marks[SEATS],
            bounties: Vec::new(),
            skips: Vec::new(),
            current: PlayerId::new(0),
            actions: 0,
            rules,
            rng,
        }
    }

    /// Throw the finished match away and deal a new one in place.
    ///
    /// The RNG stream continues, so consecutive matches differ.
    pub fn restart(&mut self) {
        log::debug!("restarting match");
        *self = Self::with_rules(self.rules, self.rng.clone());
    }

    /// Deep copy for a search branch.
    ///
    /// Takes `&mut self` because the branch gets a forked RNG.
    #[must_use]
    pub fn clone_state(&mut self) -> Self {
        let rng = self.rng.fork();
        Self {
            draw_pile: self.draw_pile.clone(),
            discard_pile: self.discard_pile.clone(),
            players: self.players.clone(),
            unused_marks: self.unused_marks.clone(),
            extra_mark: self.extra_mark,
            bounties: self.bounties.clone(),
            skips: self.skips.clone(),
            current: self.current,
            actions: self.actions,
            rules: self.rules,
            rng,
        }
    }

    // === Seats ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// The seat to act.
    #[must_use]
    pub fn acting(&self) -> &Player {
        self.player(self.current)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        PlayerId::all().filter(move |&p| self.player(p).alive)
    }

    /// Living seats other than `me`.
    pub fn opponents(&self, me: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        self.alive_players().filter(move |&p| p != me)
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive_players().count()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.alive_count() <= 1
    }

    /// The last seat standing, once the match is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        let mut alive = self.alive_players();
        match (alive.next(), alive.next()) {
            (Some(winner), None) => Some(winner),
            _ => None,
        }
    }

    /// Seat or extra slot currently holding `mark`.
    #[must_use]
    pub fn holder_of(&self, mark: Mark) -> Holder {
        PlayerId::all()
            .find(|&p| self.player(p).mark == mark)
            .map_or(Holder::Extra, Holder::Seat)
    }

    // === Bounties ===

    /// The active bounty betting on `icon`.
    #[must_use]
    pub fn bounty(&self, icon: Mark) -> Option<&Bounty> {
        self.bounties.iter().find(|b| b.icon == icon)
    }

    /// Remove and return the active bounty betting on `icon`.
    pub fn take_bounty(&mut self, icon: Mark) -> Option<Bounty> {
        let index = self.bounties.iter().position(|b| b.icon == icon)?;
        Some(self.bounties.remove(index))
    }

    // === Identity ===

    fn mark_of(&self, holder: Holder) -> Mark {
        match holder {
            Holder::Seat(p) => self.player(p).mark,
            Holder::Extra => self.extra_mark,
        }
    }

    fn set_mark(&mut self, holder: Holder, mark: Mark) {
        match holder {
            Holder::Seat(p) => self.player_mut(p).mark = mark,
            Holder::Extra => self.extra_mark = mark,
        }
    }

    /// Exchange the marks of two holders.
    ///
    /// Every observer's knowledge rows follow the identities they describe.
    pub fn swap_marks(&mut self, a: Holder, b: Holder) {
        let mark_a = self.mark_of(a);
        let mark_b = self.mark_of(b);
        self.set_mark(a, mark_b);
        self.set_mark(b, mark_a);
        for player in &mut self.players {
            player.knowledge.swap_rows(a, b);
        }
    }

    /// Knock a seat out of the match.
    ///
    /// Hand then bank go to the discard pile, pending skips for the seat are
    /// dropped, and every observer learns the eliminated seat's mark.
    pub fn eliminate(&mut self, target: PlayerId) {
        let player = self.player_mut(target);
        player.alive = false;
        let hand = std::mem::take(&mut player.hand);
        let bank = std::mem::take(&mut player.bank);
        let mark = player.mark;

        self.discard_pile.extend(hand);
        self.discard_pile.extend(bank);
        self.skips.retain(|&s| s != target);
        for observer in &mut self.players {
            observer.knowledge.learn(target, mark);
        }

        log::debug!("{target} eliminated holding {mark}");
    }

    // === Piles ===

    /// Move the top `cut` cards of the draw pile to the bottom.
    ///
    /// The moved cards keep their relative order.
    pub fn cut_draw_pile(&mut self, cut: usize) {
        let len = self.draw_pile.len();
        let cut = cut.min(len);
        let top = self.draw_pile.split_off(len - cut);
        let bottom = std::mem::replace(&mut self.draw_pile, top);
        self.draw_pile.append(bottom);
    }

    /// Shuffle the discard pile into a new draw pile.
    pub fn reshuffle_discard(&mut self) {
        let mut cards: Vec<Card> = std::mem::take(&mut self.discard_pile).into_iter().collect();
        self.rng.shuffle(&mut cards);
        self.draw_pile.extend(cards);
    }

    /// Every card location, in pile then seat order.
    pub fn cards_in_play(&self) -> impl Iterator<Item = Card> + '_ {
        let held = self
            .players
            .iter()
            .flat_map(|p| p.hand.iter().chain(p.bank.iter()));
        self.draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(held)
            .copied()
    }

    // === Invariants ===

    /// Check card conservation, the mark bijection and the turn cursor.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut seen = FxHashSet::default();
        let mut count = 0;
        for card in self.cards_in_play() {
            if !seen.insert(card) {
                return Err(InvariantError::DuplicateCard(card));
            }
            count += 1;
        }
        if count != DECK_SIZE {
            return Err(InvariantError::CardCount { found: count });
        }

        let mut held = [false; MARK_COUNT];
        let marks = self.players.iter().map(|p| p.mark).chain([self.extra_mark]);
        for mark in marks {
            if std::mem::replace(&mut held[mark.index()], true) {
                return Err(InvariantError::DuplicateMark(mark));
            }
        }
        if !self.unused_marks.is_empty() {
            return Err(InvariantError::UndealtMarks);
        }

        for &seat in self.skips.iter().chain([&self.current]) {
            if seat.index() >= SEATS {
                return Err(InvariantError::UnknownSeat(seat));
            }
        }
        if !self.is_over() && !self.acting().alive {
            return Err(InvariantError::DeadCurrentPlayer(self.current));
        }
        Ok(())
    }

    /// Panic if the state is corrupted.
    pub fn assert_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("game state invariant violated: {err}");
        }
    }
}
