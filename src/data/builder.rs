use super::account::AccountInfo;

/// Fluent builder over [`AccountInfo`] starting from values the site accepts
#[derive(Debug, Clone)]
pub struct UserBuilder {
    user: AccountInfo,
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UserBuilder {
    pub fn new() -> Self {
        Self {
            user: AccountInfo {
                title: "Mr".to_string(),
                password: "Test@1234".to_string(),
                days: "1".to_string(),
                months: "1".to_string(),
                years: "1990".to_string(),
                newsletter: false,
                optin: false,
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                company: "Automation Inc".to_string(),
                address1: "123 Test Street".to_string(),
                address2: None,
                // The country dropdown only accepts India
                country: "India".to_string(),
                state: "Test State".to_string(),
                city: "Test City".to_string(),
                zipcode: "100001".to_string(),
                mobile_number: "9876543210".to_string(),
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.user.title = title.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.user.password = password.into();
        self
    }

    pub fn with_dob(
        mut self,
        days: impl Into<String>,
        months: impl Into<String>,
        years: impl Into<String>,
    ) -> Self {
        self.user.days = days.into();
        self.user.months = months.into();
        self.user.years = years.into();
        self
    }

    pub fn with_newsletter(mut self, newsletter: bool) -> Self {
        self.user.newsletter = newsletter;
        self
    }

    pub fn with_opt_in(mut self, optin: bool) -> Self {
        self.user.optin = optin;
        self
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.user.first_name = first.into();
        self.user.last_name = last.into();
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.user.company = company.into();
        self
    }

    pub fn with_address(
        mut self,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        self.user.address1 = address.into();
        self.user.city = city.into();
        self.user.state = state.into();
        self.user.zipcode = zipcode.into();
        self
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.user.mobile_number = mobile.into();
        self
    }

    pub fn build(&self) -> AccountInfo {
        self.user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let user = UserBuilder::new().build();
        assert_eq!(user.title, "Mr");
        assert_eq!(user.password, "Test@1234");
        assert_eq!((user.days.as_str(), user.months.as_str(), user.years.as_str()), ("1", "1", "1990"));
        assert_eq!(user.country, "India");
        assert_eq!(user.zipcode, "100001");
        assert!(!user.newsletter && !user.optin);
    }

    #[test]
    fn test_builds_independent_copies() {
        let builder = UserBuilder::new()
            .with_name("Sangam", "Kumar")
            .with_address("123 Main St", "New Delhi", "Delhi", "110001")
            .with_newsletter(true);
        let first = builder.build();
        let second = builder.clone().with_mobile("9000000000").build();

        assert_eq!(first.first_name, "Sangam");
        assert_eq!(first.city, "New Delhi");
        assert!(first.newsletter);
        assert_eq!(first.mobile_number, "9876543210");
        assert_eq!(second.mobile_number, "9000000000");
    }
}
