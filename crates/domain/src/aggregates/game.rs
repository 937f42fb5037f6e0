//! Game aggregate - one poker game's ledger
//!
//! # Design
//!
//! - **Private fields**: players and debts are only reachable through methods that keep the
//!   ledger consistent.
//! - **Derived on read**: `total_cash_on_table` and every player's `profit_loss` are computed
//!   from the amounts they depend on, never stored as authority.
//! - **Unique keys**: player names are unique within a game, and at most one debt exists
//!   between any two players.
//! - **Events out**: resolution changes are returned to the caller, who owns the statistics
//!   side effect.

use chrono::{DateTime, Utc};

use crate::entities::{DebtUpdate, GameDebt, GamePlayer, PlayerUpdate};
use crate::error::DomainError;
use crate::events::{LifecycleEvent, ResolutionChange};
use crate::ids::{GameId, UserId};
use crate::value_objects::{GameLabel, Money, PlayerName};

/// A recorded poker game.
///
/// # Invariants
///
/// - `user_game_id >= 1`
/// - no two players share a name
/// - no two debts involve the same pair of players, in either direction
/// - `revision` only grows; it is bumped by the repository on every successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    // Identity
    id: GameId,
    owner_id: UserId,
    user_game_id: u32,

    // Descriptive
    game_type: GameLabel,
    location: GameLabel,
    created_at: DateTime<Utc>,
    user_note: String,
    game_string: String,

    // Resolution
    resolved: bool,
    resolved_string: String,

    // Ledger
    players: Vec<GamePlayer>,
    debts: Vec<GameDebt>,

    revision: u64,
}

/// Field changes accepted by the generic game update.
///
/// Applied all-or-nothing: if any part is invalid the game is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameChanges {
    pub game_type: Option<GameLabel>,
    pub location: Option<GameLabel>,
    pub user_note: Option<String>,
    pub game_string: Option<String>,
    pub resolved: Option<bool>,
    pub resolved_string: Option<String>,
    pub players: Option<Vec<GamePlayer>>,
    pub debts: Option<Vec<GameDebt>>,
}

impl GameChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn same_parties(a: &GameDebt, b: &GameDebt) -> bool {
    a.is_between(b.debtor(), b.creditor()) || a.is_between(b.creditor(), b.debtor())
}

fn ensure_unique_players(players: &[GamePlayer]) -> Result<(), DomainError> {
    for (i, player) in players.iter().enumerate() {
        if players[..i].iter().any(|p| p.name() == player.name()) {
            return Err(DomainError::constraint(format!(
                "Player '{}' already exists in this game",
                player.name()
            )));
        }
    }
    Ok(())
}

fn ensure_unique_debts(debts: &[GameDebt]) -> Result<(), DomainError> {
    for (i, debt) in debts.iter().enumerate() {
        if debts[..i].iter().any(|d| same_parties(d, debt)) {
            return Err(DomainError::constraint(format!(
                "A debt between '{}' and '{}' already exists in this game",
                debt.debtor(),
                debt.creditor()
            )));
        }
    }
    Ok(())
}

impl Game {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create an unresolved game with an empty ledger.
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` if `user_game_id` is zero.
    pub fn new(
        id: GameId,
        owner_id: UserId,
        user_game_id: u32,
        game_type: GameLabel,
        location: GameLabel,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if user_game_id == 0 {
            return Err(DomainError::validation("userGameID must be at least 1"));
        }
        Ok(Self {
            id,
            owner_id,
            user_game_id,
            game_type,
            location,
            created_at,
            user_note: String::new(),
            game_string: String::new(),
            resolved: false,
            resolved_string: String::new(),
            players: Vec::new(),
            debts: Vec::new(),
            revision: 0,
        })
    }

    // =========================================================================
    // Builder Methods (used when creating or loading from storage)
    // =========================================================================

    pub fn with_user_note(mut self, note: impl Into<String>) -> Self {
        self.user_note = note.into();
        self
    }

    pub fn with_game_string(mut self, game_string: impl Into<String>) -> Self {
        self.game_string = game_string.into();
        self
    }

    pub fn with_resolution(mut self, resolved: bool, resolved_string: impl Into<String>) -> Self {
        self.resolved = resolved;
        self.resolved_string = resolved_string.into();
        self
    }

    /// Restore a stored player list. Stored duplicates are kept as-is; new writes are the
    /// only place uniqueness is enforced.
    pub fn with_players(mut self, players: Vec<GamePlayer>) -> Self {
        self.players = players;
        self
    }

    pub fn with_debts(mut self, debts: Vec<GameDebt>) -> Self {
        self.debts = debts;
        self
    }

    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &GameId {
        &self.id
    }

    #[inline]
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    #[inline]
    pub fn user_game_id(&self) -> u32 {
        self.user_game_id
    }

    #[inline]
    pub fn game_type(&self) -> &GameLabel {
        &self.game_type
    }

    #[inline]
    pub fn location(&self) -> &GameLabel {
        &self.location
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn user_note(&self) -> &str {
        &self.user_note
    }

    #[inline]
    pub fn game_string(&self) -> &str {
        &self.game_string
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    #[inline]
    pub fn resolved_string(&self) -> &str {
        &self.resolved_string
    }

    #[inline]
    pub fn players(&self) -> &[GamePlayer] {
        &self.players
    }

    #[inline]
    pub fn debts(&self) -> &[GameDebt] {
        &self.debts
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    /// Money currently committed to the table: the sum of all buy-ins. Cash-outs are not
    /// part of it.
    pub fn total_cash_on_table(&self) -> Money {
        self.players.iter().map(GamePlayer::buy_in).sum()
    }

    pub fn player(&self, name: &PlayerName) -> Option<&GamePlayer> {
        self.players.iter().find(|p| p.name() == name)
    }

    pub fn debt(&self, debtor: &PlayerName, creditor: &PlayerName) -> Option<&GameDebt> {
        self.debts.iter().find(|d| d.is_between(debtor, creditor))
    }

    // =========================================================================
    // Players
    // =========================================================================

    /// Append a player to the table.
    ///
    /// # Errors
    ///
    /// `DomainError::Constraint` if a player with the same name is already seated.
    pub fn add_player(&mut self, player: GamePlayer) -> Result<(), DomainError> {
        if self.player(player.name()).is_some() {
            return Err(DomainError::constraint(format!(
                "Player '{}' already exists in this game",
                player.name()
            )));
        }
        self.players.push(player);
        Ok(())
    }

    /// Remove every player with this name. Returns how many were removed.
    pub fn remove_player(&mut self, name: &PlayerName) -> usize {
        let before = self.players.len();
        self.players.retain(|p| p.name() != name);
        before - self.players.len()
    }

    /// Merge `update` into the first player named `name`.
    ///
    /// Returns `Ok(None)` when no such player exists; the game is unchanged in that case.
    ///
    /// # Errors
    ///
    /// `DomainError::Constraint` if the update renames the player to a name already taken.
    pub fn update_player(
        &mut self,
        name: &PlayerName,
        update: PlayerUpdate,
    ) -> Result<Option<&GamePlayer>, DomainError> {
        let Some(index) = self.players.iter().position(|p| p.name() == name) else {
            return Ok(None);
        };

        if let Some(new_name) = &update.name {
            let taken = self
                .players
                .iter()
                .enumerate()
                .any(|(i, p)| i != index && p.name() == new_name);
            if taken {
                return Err(DomainError::constraint(format!(
                    "Player '{}' already exists in this game",
                    new_name
                )));
            }
        }

        let player = &mut self.players[index];
        player.apply(update);
        Ok(Some(player))
    }

    // =========================================================================
    // Debts
    // =========================================================================

    /// # Errors
    ///
    /// `DomainError::Constraint` if a debt between the same two players already exists,
    /// in either direction.
    pub fn add_debt(&mut self, debt: GameDebt) -> Result<(), DomainError> {
        if self.debts.iter().any(|d| same_parties(d, &debt)) {
            return Err(DomainError::constraint(format!(
                "A debt between '{}' and '{}' already exists in this game",
                debt.debtor(),
                debt.creditor()
            )));
        }
        self.debts.push(debt);
        Ok(())
    }

    /// Remove the debt owed by `debtor` to `creditor`. Returns how many were removed.
    pub fn remove_debt(&mut self, debtor: &PlayerName, creditor: &PlayerName) -> usize {
        let before = self.debts.len();
        self.debts.retain(|d| !d.is_between(debtor, creditor));
        before - self.debts.len()
    }

    /// Merge `update` into the debt owed by `debtor` to `creditor`.
    ///
    /// Returns `Ok(None)` when the pair has no debt.
    pub fn update_debt(
        &mut self,
        debtor: &PlayerName,
        creditor: &PlayerName,
        update: DebtUpdate,
    ) -> Result<Option<&GameDebt>, DomainError> {
        let Some(debt) = self.debts.iter_mut().find(|d| d.is_between(debtor, creditor)) else {
            return Ok(None);
        };
        debt.apply(update)?;
        Ok(Some(debt))
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Settle the game with a narrative of how it was settled.
    ///
    /// Resolving an already-resolved game replaces the narrative and reports
    /// [`ResolutionChange::Unchanged`].
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` if the narrative is blank.
    pub fn mark_resolved(
        &mut self,
        resolved_string: impl Into<String>,
    ) -> Result<ResolutionChange, DomainError> {
        let resolved_string = resolved_string.into();
        if resolved_string.trim().is_empty() {
            return Err(DomainError::validation("resolvedString is required"));
        }
        let change = self.set_resolved(true);
        self.resolved_string = resolved_string;
        Ok(change)
    }

    pub fn set_resolved(&mut self, resolved: bool) -> ResolutionChange {
        let change = ResolutionChange::between(self.resolved, resolved);
        self.resolved = resolved;
        change
    }

    // =========================================================================
    // Generic update
    // =========================================================================

    /// Apply a set of field changes.
    ///
    /// # Errors
    ///
    /// `DomainError::Constraint` if a replacement player or debt list contains duplicates.
    /// Nothing is changed when an error is returned.
    pub fn apply_changes(&mut self, changes: GameChanges) -> Result<ResolutionChange, DomainError> {
        if let Some(players) = &changes.players {
            ensure_unique_players(players)?;
        }
        if let Some(debts) = &changes.debts {
            ensure_unique_debts(debts)?;
        }

        if let Some(game_type) = changes.game_type {
            self.game_type = game_type;
        }
        if let Some(location) = changes.location {
            self.location = location;
        }
        if let Some(note) = changes.user_note {
            self.user_note = note;
        }
        if let Some(game_string) = changes.game_string {
            self.game_string = game_string;
        }
        if let Some(resolved_string) = changes.resolved_string {
            self.resolved_string = resolved_string;
        }
        if let Some(players) = changes.players {
            self.players = players;
        }
        if let Some(debts) = changes.debts {
            self.debts = debts;
        }

        Ok(match changes.resolved {
            Some(resolved) => self.set_resolved(resolved),
            None => ResolutionChange::Unchanged,
        })
    }

    /// Event to emit once this game has been hard-deleted.
    pub fn deletion_event(&self) -> LifecycleEvent {
        LifecycleEvent::GameDeleted {
            was_resolved: self.resolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::entities::StatField;
    use crate::value_objects::PaymentType;

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s).unwrap()
    }

    fn player(s: &str, buy_in: u32) -> GamePlayer {
        GamePlayer::new(name(s), Money::from_units(buy_in))
    }

    fn debt(debtor: &str, creditor: &str, amount: u32) -> GameDebt {
        GameDebt::new(
            name(debtor),
            name(creditor),
            Money::from_units(amount),
            PaymentType::default(),
        )
        .unwrap()
    }

    fn game() -> Game {
        Game::new(
            GameId::new("g1").unwrap(),
            UserId::new("u1").unwrap(),
            1,
            GameLabel::new("cash").unwrap(),
            GameLabel::new("home").unwrap(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn new_game_is_unresolved_and_empty() {
        let g = game();
        assert!(!g.is_resolved());
        assert!(g.players().is_empty());
        assert!(g.debts().is_empty());
        assert_eq!(g.total_cash_on_table(), Money::ZERO);
        assert_eq!(g.revision(), 0);
    }

    #[test]
    fn user_game_id_must_be_positive() {
        let err = Game::new(
            GameId::new("g1").unwrap(),
            UserId::new("u1").unwrap(),
            0,
            GameLabel::new("cash").unwrap(),
            GameLabel::new("home").unwrap(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn adding_players_grows_the_total() {
        let mut g = game();
        g.add_player(player("Alice", 100)).unwrap();
        assert_eq!(g.players().len(), 1);
        g.add_player(player("Bob", 50)).unwrap();
        assert_eq!(g.players().len(), 2);
        assert_eq!(g.total_cash_on_table(), Money::from_units(150));
    }

    #[test]
    fn total_of_largest_buy_ins_does_not_overflow() {
        let mut g = game();
        g.add_player(GamePlayer::new(name("Alice"), Money::MAX)).unwrap();
        g.add_player(GamePlayer::new(name("Bob"), Money::MAX)).unwrap();
        assert_eq!(
            g.total_cash_on_table().amount(),
            Money::MAX.amount() * Decimal::from(2)
        );
    }

    #[test]
    fn total_ignores_cash_outs() {
        let mut g = game();
        g.add_player(player("Alice", 100).with_cash_out(Money::from_units(300)))
            .unwrap();
        assert_eq!(g.total_cash_on_table(), Money::from_units(100));
    }

    #[test]
    fn duplicate_player_is_rejected() {
        let mut g = game();
        g.add_player(player("Alice", 100)).unwrap();
        let err = g.add_player(player("Alice", 20)).unwrap_err();
        assert!(matches!(err, DomainError::Constraint(_)));
        assert_eq!(g.players().len(), 1);
    }

    #[test]
    fn removing_player_recomputes_total() {
        let mut g = game();
        g.add_player(player("Alice", 100)).unwrap();
        g.add_player(player("Bob", 50)).unwrap();

        assert_eq!(g.remove_player(&name("Alice")), 1);
        assert_eq!(g.players(), &[player("Bob", 50)]);
        assert_eq!(g.total_cash_on_table(), Money::from_units(50));
    }

    #[test]
    fn removing_stored_duplicates_removes_all() {
        let mut g = game().with_players(vec![player("Alice", 10), player("Alice", 20)]);
        assert_eq!(g.remove_player(&name("Alice")), 2);
        assert!(g.players().is_empty());
    }

    #[test]
    fn removing_unknown_player_reports_zero() {
        let mut g = game();
        g.add_player(player("Alice", 100)).unwrap();
        assert_eq!(g.remove_player(&name("Carol")), 0);
        assert_eq!(g.players().len(), 1);
    }

    #[test]
    fn update_player_keeps_profit_loss_consistent() {
        let mut g = game();
        g.add_player(player("Alice", 100)).unwrap();

        let updated = g
            .update_player(
                &name("Alice"),
                PlayerUpdate {
                    cash_out: Some(Money::from_units(250)),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.profit_loss(), Decimal::from(150));

        let updated = g
            .update_player(
                &name("Alice"),
                PlayerUpdate {
                    buy_in: Some(Money::from_units(300)),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(
            updated.profit_loss(),
            updated.cash_out().amount() - updated.buy_in().amount()
        );
        assert_eq!(g.total_cash_on_table(), Money::from_units(300));
    }

    #[test]
    fn update_unknown_player_leaves_game_unchanged() {
        let mut g = game();
        g.add_player(player("Alice", 100)).unwrap();
        let before = g.clone();

        let result = g
            .update_player(
                &name("Zed"),
                PlayerUpdate {
                    buy_in: Some(Money::from_units(1)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(result.is_none());
        assert_eq!(g, before);
    }

    #[test]
    fn rename_onto_existing_player_is_rejected() {
        let mut g = game();
        g.add_player(player("Alice", 100)).unwrap();
        g.add_player(player("Bob", 50)).unwrap();

        let err = g
            .update_player(
                &name("Bob"),
                PlayerUpdate {
                    name: Some(name("Alice")),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Constraint(_)));
        assert!(g.player(&name("Bob")).is_some());
    }

    #[test]
    fn debt_add_then_remove_restores_ledger() {
        let mut g = game();
        g.add_debt(debt("Alice", "Bob", 20)).unwrap();
        let before = g.debts().to_vec();

        g.add_debt(debt("Carol", "Bob", 5)).unwrap();
        assert_eq!(g.remove_debt(&name("Carol"), &name("Bob")), 1);
        assert_eq!(g.debts(), before.as_slice());
    }

    #[test]
    fn debt_pair_is_unique_in_both_directions() {
        let mut g = game();
        g.add_debt(debt("Alice", "Bob", 20)).unwrap();

        assert!(matches!(
            g.add_debt(debt("Alice", "Bob", 5)),
            Err(DomainError::Constraint(_))
        ));
        assert!(matches!(
            g.add_debt(debt("Bob", "Alice", 5)),
            Err(DomainError::Constraint(_))
        ));
        assert_eq!(g.debts().len(), 1);
    }

    #[test]
    fn debt_removal_is_directional() {
        let mut g = game();
        g.add_debt(debt("Alice", "Bob", 20)).unwrap();
        assert_eq!(g.remove_debt(&name("Bob"), &name("Alice")), 0);
        assert_eq!(g.debts().len(), 1);
    }

    #[test]
    fn update_debt_merges_fields() {
        let mut g = game();
        g.add_debt(debt("Alice", "Bob", 20)).unwrap();

        let updated = g
            .update_debt(
                &name("Alice"),
                &name("Bob"),
                DebtUpdate {
                    amount: Some(Money::from_units(35)),
                    payment_type: Some(PaymentType::new("cash").unwrap()),
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.amount(), Money::from_units(35));
        assert_eq!(updated.payment_type().as_str(), "cash");

        let missing = g
            .update_debt(&name("Bob"), &name("Carol"), DebtUpdate::default())
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn resolving_twice_reports_a_single_transition() {
        let mut g = game();
        assert_eq!(g.mark_resolved("Bob paid Alice").unwrap(), ResolutionChange::Resolved);
        assert_eq!(
            g.mark_resolved("Bob paid Alice in cash").unwrap(),
            ResolutionChange::Unchanged
        );
        assert!(g.is_resolved());
        assert_eq!(g.resolved_string(), "Bob paid Alice in cash");
    }

    #[test]
    fn resolving_needs_a_narrative() {
        let mut g = game();
        let err = g.mark_resolved("   ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(!g.is_resolved());
    }

    #[test]
    fn generic_update_tracks_resolution_both_ways() {
        let mut g = game();
        let change = g
            .apply_changes(GameChanges {
                resolved: Some(true),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(change, ResolutionChange::Resolved);

        let change = g
            .apply_changes(GameChanges {
                resolved: Some(false),
                user_note: Some("reopened".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(change, ResolutionChange::Unresolved);
        assert_eq!(g.user_note(), "reopened");
    }

    #[test]
    fn generic_update_is_all_or_nothing() {
        let mut g = game();
        let before = g.clone();
        let err = g
            .apply_changes(GameChanges {
                location: Some(GameLabel::new("casino").unwrap()),
                players: Some(vec![player("Alice", 1), player("Alice", 2)]),
                resolved: Some(true),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Constraint(_)));
        assert_eq!(g, before);
    }

    #[test]
    fn generic_update_replaces_ledger_lists() {
        let mut g = game();
        g.add_player(player("Alice", 100)).unwrap();
        g.apply_changes(GameChanges {
            players: Some(vec![player("Dan", 40), player("Eve", 60)]),
            debts: Some(vec![debt("Dan", "Eve", 10)]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(g.total_cash_on_table(), Money::from_units(100));
        assert!(g.player(&name("Alice")).is_none());
        assert!(g.debt(&name("Dan"), &name("Eve")).is_some());
    }

    #[test]
    fn deleting_a_resolved_game_reverts_both_counters() {
        let mut g = game();
        g.mark_resolved("settled").unwrap();
        let fields: Vec<StatField> = g
            .deletion_event()
            .stat_deltas()
            .into_iter()
            .map(|d| d.field)
            .collect();
        assert_eq!(fields, vec![StatField::GamesRecorded, StatField::ProblemsSolved]);
    }
}
