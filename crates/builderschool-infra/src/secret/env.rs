//! Environment variable key source.
//!
//! Read-only: looks up one variable per call and never caches it.

use secrecy::SecretString;

use super::KeySource;

pub struct EnvKeySource {
    var: String,
}

impl EnvKeySource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl KeySource for EnvKeySource {
    fn label(&self) -> String {
        format!("env:{}", self.var)
    }

    fn get(&self) -> Option<SecretString> {
        match std::env::var(&self.var) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val.trim().to_string())),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            // Present but not valid Unicode: a key must be a string.
            Err(std::env::VarError::NotUnicode(_)) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn reads_existing_var() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("BSCHOOL_TEST_ENV_KEY_1", " gsk-123 ") };

        let source = EnvKeySource::new("BSCHOOL_TEST_ENV_KEY_1");
        assert_eq!(source.get().unwrap().expose_secret(), "gsk-123");
        assert_eq!(source.label(), "env:BSCHOOL_TEST_ENV_KEY_1");

        // SAFETY: set above by this test only.
        unsafe { std::env::remove_var("BSCHOOL_TEST_ENV_KEY_1") };
    }

    #[test]
    fn missing_or_blank_var_is_none() {
        assert!(EnvKeySource::new("BSCHOOL_TEST_ENV_KEY_MISSING").get().is_none());

        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("BSCHOOL_TEST_ENV_KEY_2", "   ") };
        assert!(EnvKeySource::new("BSCHOOL_TEST_ENV_KEY_2").get().is_none());
        // SAFETY: set above by this test only.
        unsafe { std::env::remove_var("BSCHOOL_TEST_ENV_KEY_2") };
    }
}
