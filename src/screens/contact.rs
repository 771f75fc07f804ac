use serde::Serialize;

pub const CONTACT_EMAIL: &str = "hello@bandmate.app";

pub const ABOUT: &str = "Bandmate is a cross-platform mobile application designed to help \
independent bands manage their gigs, merchandise, and contacts in one place.";

/// Static content of the contact screen
#[derive(Debug, Clone, Serialize)]
pub struct ContactInfo {
    pub email: &'static str,
    pub mailto: String,
    pub about: &'static str,
}

impl ContactInfo {
    pub fn new() -> Self {
        Self {
            email: CONTACT_EMAIL,
            mailto: format!("mailto:{}", CONTACT_EMAIL),
            about: ABOUT,
        }
    }
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailto() {
        assert_eq!(ContactInfo::new().mailto, "mailto:hello@bandmate.app");
    }
}
