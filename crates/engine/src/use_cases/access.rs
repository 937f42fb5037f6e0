//! Authenticated caller and the ownership rules applied to it.

use pokerledger_domain::{Game, UserId, UserRole};

/// The caller as vouched for by the identity collaborator. Trusted as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub role: UserRole,
}

impl Principal {
    pub fn new(id: UserId, role: UserRole) -> Self {
        Self { id, role }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Owners and admins may read and mutate a game.
    pub fn can_access_game(&self, game: &Game) -> bool {
        self.is_admin() || game.is_owned_by(&self.id)
    }

    /// Users act on their own account; admins on any.
    pub fn can_act_for(&self, user: &UserId) -> bool {
        self.is_admin() || &self.id == user
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pokerledger_domain::{GameId, GameLabel};

    use super::*;

    fn game_owned_by(owner: &str) -> Game {
        Game::new(
            GameId::new("g1").unwrap(),
            UserId::new(owner).unwrap(),
            1,
            GameLabel::new("cash").unwrap(),
            GameLabel::new("home").unwrap(),
            Utc::now(),
        )
        .unwrap()
    }

    fn principal(id: &str, role: UserRole) -> Principal {
        Principal::new(UserId::new(id).unwrap(), role)
    }

    #[test]
    fn owner_and_admin_reach_a_game() {
        let game = game_owned_by("u1");
        assert!(principal("u1", UserRole::User).can_access_game(&game));
        assert!(principal("root", UserRole::Admin).can_access_game(&game));
        assert!(!principal("u2", UserRole::User).can_access_game(&game));
    }

    #[test]
    fn users_act_only_for_themselves() {
        let u1 = UserId::new("u1").unwrap();
        assert!(principal("u1", UserRole::User).can_act_for(&u1));
        assert!(!principal("u2", UserRole::User).can_act_for(&u1));
        assert!(principal("u2", UserRole::Admin).can_act_for(&u1));
    }
}
