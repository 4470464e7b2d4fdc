// src/services/access_throttle.rs

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{sync::Mutex, time::Instant};

/// Tentativas negadas seguidas antes de bloquear a fechadura.
pub const MAX_FAILED_ATTEMPTS: u32 = 5;
/// Quanto tempo a fechadura fica bloqueada depois disso.
pub const LOCKOUT: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Default)]
struct Attempts {
    failures: u32,
    locked_until: Option<Instant>,
}

/// Contador de tentativas negadas por fechadura (chave: MAC canônico).
///
/// Depois de `max_failures` negações seguidas a fechadura fica bloqueada por
/// `lockout`; um acesso liberado zera o contador. Só em memória, como a blacklist.
#[derive(Clone)]
pub struct AccessThrottle {
    attempts: Arc<Mutex<HashMap<String, Attempts>>>,
    max_failures: u32,
    lockout: Duration,
}

impl AccessThrottle {
    pub fn new(max_failures: u32, lockout: Duration) -> Self {
        Self {
            attempts: Arc::new(Mutex::new(HashMap::new())),
            max_failures: max_failures.max(1),
            lockout,
        }
    }

    /// `false` enquanto a fechadura estiver bloqueada.
    pub async fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut lock = self.attempts.lock().await;
        match lock.get(key).and_then(|a| a.locked_until) {
            Some(until) if until > now => false,
            Some(_) => {
                // Bloqueio vencido: recomeça do zero
                lock.remove(key);
                true
            }
            None => true,
        }
    }

    /// Conta uma negação. Devolve `true` se esta foi a que bloqueou.
    pub async fn record_failure(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut lock = self.attempts.lock().await;
        lock.retain(|_, a| a.locked_until.is_none_or(|until| until > now));

        let entry = lock.entry(key.to_string()).or_default();
        entry.failures += 1;
        if entry.failures >= self.max_failures {
            entry.failures = 0;
            entry.locked_until = Some(now + self.lockout);
            return true;
        }
        false
    }

    pub async fn record_success(&self, key: &str) {
        self.attempts.lock().await.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC: &str = "24:6F:28:AA:10:0C";

    #[tokio::test]
    async fn locks_after_max_failures() {
        let throttle = AccessThrottle::new(3, Duration::from_secs(60));

        assert!(!throttle.record_failure(MAC).await);
        assert!(!throttle.record_failure(MAC).await);
        assert!(throttle.allow(MAC).await);

        assert!(throttle.record_failure(MAC).await);
        assert!(!throttle.allow(MAC).await);
    }

    #[tokio::test]
    async fn success_resets_the_count() {
        let throttle = AccessThrottle::new(3, Duration::from_secs(60));

        throttle.record_failure(MAC).await;
        throttle.record_failure(MAC).await;
        throttle.record_success(MAC).await;
        throttle.record_failure(MAC).await;
        throttle.record_failure(MAC).await;

        assert!(throttle.allow(MAC).await);
    }

    #[tokio::test]
    async fn locks_are_per_device() {
        let throttle = AccessThrottle::new(1, Duration::from_secs(60));

        throttle.record_failure(MAC).await;

        assert!(!throttle.allow(MAC).await);
        assert!(throttle.allow("AA:BB:CC:DD:EE:FF").await);
    }

    #[tokio::test(start_paused = true)]
    async fn lock_expires_after_lockout() {
        let throttle = AccessThrottle::new(2, Duration::from_secs(60));
        throttle.record_failure(MAC).await;
        throttle.record_failure(MAC).await;
        assert!(!throttle.allow(MAC).await);

        tokio::time::advance(Duration::from_secs(61)).await;

        assert!(throttle.allow(MAC).await);
        // Depois do bloqueio o contador recomeça
        assert!(!throttle.record_failure(MAC).await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let throttle = AccessThrottle::new(1, Duration::from_secs(60));
        let other = throttle.clone();

        other.record_failure(MAC).await;

        assert!(!throttle.allow(MAC).await);
    }
}
