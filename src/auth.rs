//! Session gating. This is not a security mechanism, it only decides whether a
//! script is allowed to run.

use crate::errors::LoginErr;

/// Decide if presented credentials open a session
pub trait CredentialValidator {
    /// `Ok` when `user` and `password` are accepted
    fn validate(&self, user: &str, password: &str) -> Result<(), LoginErr>;
}

/// Single user/password pair compared after trimming surrounding whitespace
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    user: String,
    password: String,
}

impl StaticCredentials {
    /// Accept only `user` with `password`
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl CredentialValidator for StaticCredentials {
    fn validate(&self, user: &str, password: &str) -> Result<(), LoginErr> {
        if user.trim() == self.user && password.trim() == self.password {
            Ok(())
        } else {
            Err(LoginErr::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod test {
    use super::{CredentialValidator, StaticCredentials};
    use crate::errors::LoginErr;

    #[test]
    fn only_matching_pair_is_accepted() {
        let v = StaticCredentials::new("admin", "password");
        v.validate("admin", "password").unwrap();
        v.validate(" admin ", "password\n").unwrap();
        let refused = Err(LoginErr::InvalidCredentials);
        assert_eq!(v.validate("admin", "nope"), refused);
        assert_eq!(v.validate("root", "password"), refused);
    }
}
