// src/services/token_blacklist.rs

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use chrono::Utc;

/// Tokens invalidados por logout, compartilhados pelo processo inteiro.
///
/// Fica só em memória: um restart "esquece" os logouts, e com várias instâncias
/// cada uma tem a sua lista. Guardamos o `exp` de cada token para poder
/// descartá-lo quando ele expirar de qualquer forma.
#[derive(Clone, Default)]
pub struct TokenBlacklist {
    inner: Arc<RwLock<HashMap<String, i64>>>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalida `token`. `expires_at` é o `exp` (segundos Unix) do JWT.
    pub fn add(&self, token: &str, expires_at: i64) {
        let now = Utc::now().timestamp();
        let mut tokens = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        tokens.retain(|_, exp| *exp > now);
        if expires_at > now {
            tokens.insert(token.to_string(), expires_at);
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(token)
    }

    pub fn clear(&self) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_one_hour() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[test]
    fn add_then_contains() {
        let blacklist = TokenBlacklist::new();
        assert!(!blacklist.contains("abc"));

        blacklist.add("abc", in_one_hour());

        assert!(blacklist.contains("abc"));
        assert!(!blacklist.contains("abd"));
        assert_eq!(blacklist.len(), 1);
    }

    #[test]
    fn clones_share_the_same_set() {
        let blacklist = TokenBlacklist::new();
        let other = blacklist.clone();

        other.add("shared", in_one_hour());

        assert!(blacklist.contains("shared"));
    }

    #[test]
    fn clear_empties_the_set() {
        let blacklist = TokenBlacklist::new();
        blacklist.add("a", in_one_hour());
        blacklist.add("b", in_one_hour());

        blacklist.clear();

        assert!(blacklist.is_empty());
    }

    #[test]
    fn expired_tokens_are_not_kept() {
        let blacklist = TokenBlacklist::new();
        let past = Utc::now().timestamp() - 10;

        blacklist.add("old", past);
        assert!(!blacklist.contains("old"));

        // Entradas vencidas somem na próxima inserção
        blacklist.inner.write().unwrap().insert("stale".into(), past);
        blacklist.add("fresh", in_one_hour());
        assert!(!blacklist.contains("stale"));
        assert!(blacklist.contains("fresh"));
    }

    #[test]
    fn adding_twice_keeps_one_entry() {
        let blacklist = TokenBlacklist::new();
        blacklist.add("dup", in_one_hour());
        blacklist.add("dup", in_one_hour());
        assert_eq!(blacklist.len(), 1);
    }
}
