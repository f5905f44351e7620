//! Sign-up policy adapters.
//!
//! Both the local and the social sign-up paths consult the same
//! `allow_registration` switch. The flag is injected from [`AccountConfig`]
//! when the adapters are built at startup; nothing reads configuration
//! afterwards.

use crate::config::AccountConfig;

pub trait SignupPolicy {
    fn is_open_for_signup(&self) -> bool;
}

/// Policy for username/password style sign-up.
#[derive(Debug, Clone)]
pub struct AccountAdapter {
    allow_registration: bool,
}

impl AccountAdapter {
    pub fn new(config: &AccountConfig) -> Self {
        Self {
            allow_registration: config.allow_registration,
        }
    }
}

impl SignupPolicy for AccountAdapter {
    fn is_open_for_signup(&self) -> bool {
        self.allow_registration
    }
}

/// Policy for third-party (social login) sign-up.
#[derive(Debug, Clone)]
pub struct SocialAccountAdapter {
    allow_registration: bool,
}

impl SocialAccountAdapter {
    pub fn new(config: &AccountConfig) -> Self {
        Self {
            allow_registration: config.allow_registration,
        }
    }
}

impl SignupPolicy for SocialAccountAdapter {
    fn is_open_for_signup(&self) -> bool {
        self.allow_registration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapters_follow_the_injected_flag() {
        let open = AccountConfig {
            allow_registration: true,
        };
        let closed = AccountConfig {
            allow_registration: false,
        };

        assert!(AccountAdapter::new(&open).is_open_for_signup());
        assert!(SocialAccountAdapter::new(&open).is_open_for_signup());
        assert!(!AccountAdapter::new(&closed).is_open_for_signup());
        assert!(!SocialAccountAdapter::new(&closed).is_open_for_signup());
    }

    #[test]
    fn default_config_leaves_signup_open() {
        let adapter = AccountAdapter::new(&AccountConfig::default());
        assert!(adapter.is_open_for_signup());
    }
}
