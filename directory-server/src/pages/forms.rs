//! Form bodies posted by the pages
//!
//! Nothing is validated server-side; absent inputs stay absent on the record.

use serde::Deserialize;
use shared::{Employee, EmployeeProfile, Location};

/// Password given to admin-created accounts when none is submitted
pub const DEFAULT_PASSWORD: &str = "password123";

/// Signup and both login forms
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Add/edit employee form
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub joining_date: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub is_admin: Option<String>,
    pub complete_registration: Option<String>,
}

fn checked(value: &Option<String>) -> bool {
    value.as_deref() == Some("true")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl EmployeeForm {
    fn into_profile(self, password: String, registration_completed: bool) -> EmployeeProfile {
        EmployeeProfile {
            is_admin: Some(checked(&self.is_admin)),
            name: self.name,
            designation: self.designation,
            email: self.email,
            password: Some(password),
            phone: self.phone,
            department: self.department,
            joining_date: self.joining_date,
            location: Some(Location {
                city: self.city,
                state: self.state,
            }),
            registration_completed: Some(registration_completed),
            ..Default::default()
        }
    }

    /// Record for a freshly added employee (registration already complete)
    pub fn into_new_profile(self) -> EmployeeProfile {
        let password = non_empty(self.password.as_deref())
            .unwrap_or(DEFAULT_PASSWORD)
            .to_string();
        self.into_profile(password, true)
    }

    /// Replacement record for an edit of `current`
    ///
    /// A blank password keeps the stored one. The registration flag is kept,
    /// can be completed via the checkbox, and never goes back to false.
    pub fn into_updated_profile(self, current: &Employee) -> EmployeeProfile {
        let password = non_empty(self.password.as_deref())
            .or_else(|| non_empty(current.password()))
            .unwrap_or(DEFAULT_PASSWORD)
            .to_string();
        let registration_completed = match current.profile.registration_completed {
            Some(done) => done || checked(&self.complete_registration),
            None => true,
        };
        self.into_profile(password, registration_completed)
    }
}

/// Record created by self-signup: empty profile, joined today, not yet usable
pub fn signup_profile(form: CredentialsForm, today: chrono::NaiveDate) -> EmployeeProfile {
    EmployeeProfile {
        name: Some(String::new()),
        designation: Some(String::new()),
        email: Some(form.username),
        password: Some(form.password),
        phone: Some(String::new()),
        department: Some(String::new()),
        joining_date: Some(today.format("%Y-%m-%d").to_string()),
        location: Some(Location::new("", "")),
        is_admin: Some(false),
        registration_completed: Some(false),
        ..Default::default()
    }
}
